//! Per-comment reactions with a single current reaction per member.

use super::Emoji;
use crate::member::domain::MemberId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Mapping from emoji to the members currently reacting with it.
///
/// Sets are never empty and a member appears under at most one emoji.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Emoji, BTreeSet<MemberId>>",
    into = "BTreeMap<Emoji, BTreeSet<MemberId>>"
)]
pub struct Reactions(BTreeMap<Emoji, BTreeSet<MemberId>>);

/// What a toggle did to the acting member's reaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactionChange {
    /// The member had no reaction and now reacts with the emoji.
    Added(Emoji),
    /// The member already reacted with the emoji and no longer does.
    Removed(Emoji),
    /// The member's previous reaction was replaced.
    Switched {
        /// Reaction that was removed.
        from: Emoji,
        /// Reaction that was added.
        to: Emoji,
    },
}

impl From<BTreeMap<Emoji, BTreeSet<MemberId>>> for Reactions {
    fn from(mut map: BTreeMap<Emoji, BTreeSet<MemberId>>) -> Self {
        map.retain(|_, members| !members.is_empty());
        Self(map)
    }
}

impl From<Reactions> for BTreeMap<Emoji, BTreeSet<MemberId>> {
    fn from(reactions: Reactions) -> Self {
        reactions.0
    }
}

impl Reactions {
    /// Creates an empty reaction map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles `emoji` for `actor`.
    ///
    /// The actor is first removed from every emoji, pruning emptied entries.
    /// Unless the actor had been reacting with `emoji`, they are then added
    /// under it. Toggling the same emoji twice restores the original map.
    pub fn toggle(&mut self, actor: &MemberId, emoji: &Emoji) -> ReactionChange {
        let had_this_emoji = self
            .0
            .get(emoji)
            .is_some_and(|members| members.contains(actor));
        let previous = self.reaction_of(actor).cloned();

        for members in self.0.values_mut() {
            members.remove(actor);
        }
        self.0.retain(|_, members| !members.is_empty());

        if had_this_emoji {
            return ReactionChange::Removed(emoji.clone());
        }
        self.0
            .entry(emoji.clone())
            .or_default()
            .insert(actor.clone());
        match previous {
            Some(from) => ReactionChange::Switched {
                from,
                to: emoji.clone(),
            },
            None => ReactionChange::Added(emoji.clone()),
        }
    }

    /// Returns the emoji `member` currently reacts with.
    #[must_use]
    pub fn reaction_of(&self, member: &MemberId) -> Option<&Emoji> {
        self.0
            .iter()
            .find(|(_, members)| members.contains(member))
            .map(|(emoji, _)| emoji)
    }

    /// Returns the members reacting with `emoji`.
    #[must_use]
    pub fn members(&self, emoji: &Emoji) -> Option<&BTreeSet<MemberId>> {
        self.0.get(emoji)
    }

    /// Returns how many members react with `emoji`.
    #[must_use]
    pub fn count(&self, emoji: &Emoji) -> usize {
        self.0.get(emoji).map_or(0, BTreeSet::len)
    }

    /// Iterates over emoji and their members in emoji order.
    pub fn iter(&self) -> impl Iterator<Item = (&Emoji, &BTreeSet<MemberId>)> {
        self.0.iter()
    }

    /// Returns `true` when nobody reacts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
