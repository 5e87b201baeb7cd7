//! Local mirrors of the subscribed collections.

use crate::comment::domain::{Comment, CommentId};
use crate::member::domain::{Member, MemberId, Roster};
use crate::store::domain::{Collection, Document, Revision};
use crate::store::ports::Snapshot;
use crate::task::domain::{Task, TaskId, Team, TeamId};
use serde::de::DeserializeOwned;
use tracing::warn;

/// A decoded record and the store revision it was read at.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Versioned<T> {
    pub(crate) value: T,
    pub(crate) revision: Revision,
}

/// Decodes `documents`, skipping (and logging) any that do not parse.
pub(crate) fn decode_documents<T: DeserializeOwned>(
    collection: Collection,
    documents: &[Document],
) -> Vec<Versioned<T>> {
    documents
        .iter()
        .filter_map(|document| match document.decode::<T>() {
            Ok(value) => Some(Versioned {
                value,
                revision: document.revision(),
            }),
            Err(err) => {
                warn!(
                    %collection,
                    id = %document.id(),
                    error = %err,
                    "skipping undecodable document"
                );
                None
            }
        })
        .collect()
}

/// Confirmed store state as last delivered by the change feeds.
#[derive(Debug, Default)]
pub(crate) struct Mirror {
    members: Vec<Versioned<Member>>,
    tasks: Vec<Versioned<Task>>,
    teams: Vec<Team>,
    comments: Vec<Versioned<Comment>>,
}

impl Mirror {
    /// Replaces the mirrored collection with the snapshot's contents.
    pub(crate) fn apply(&mut self, snapshot: &Snapshot) {
        let Snapshot {
            collection,
            documents,
        } = snapshot;
        match collection {
            Collection::Members => self.members = decode_documents(*collection, documents),
            Collection::Tasks => self.tasks = decode_documents(*collection, documents),
            Collection::Teams => {
                self.teams = decode_documents(*collection, documents)
                    .into_iter()
                    .map(|team| team.value)
                    .collect();
            }
            Collection::Comments => {
                let mut comments: Vec<Versioned<Comment>> =
                    decode_documents(*collection, documents);
                comments.sort_by_key(|comment| comment.value.timestamp());
                self.comments = comments;
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn clear_comments(&mut self) {
        self.comments.clear();
    }

    pub(crate) fn roster(&self) -> Roster<'_> {
        Roster::new(self.members.iter().map(|member| &member.value))
    }

    pub(crate) fn members(&self) -> impl Iterator<Item = &Versioned<Member>> {
        self.members.iter()
    }

    pub(crate) fn member(&self, id: &MemberId) -> Option<&Versioned<Member>> {
        self.members.iter().find(|member| member.value.id() == id)
    }

    pub(crate) fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().map(|task| &task.value)
    }

    pub(crate) fn task(&self, id: &TaskId) -> Option<&Versioned<Task>> {
        self.tasks.iter().find(|task| task.value.id() == id)
    }

    pub(crate) fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub(crate) fn team(&self, id: &TeamId) -> Option<&Team> {
        self.teams.iter().find(|team| team.id() == id)
    }

    pub(crate) fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.comments.iter().map(|comment| &comment.value)
    }

    pub(crate) fn comment(&self, id: &CommentId) -> Option<&Versioned<Comment>> {
        self.comments.iter().find(|comment| comment.value.id() == id)
    }
}
