//! Teams group members and tasks. The core only reads them.

use super::TeamId;
use crate::member::domain::{MemberId, Role};
use serde::{Deserialize, Serialize};

/// Member entry in a team, with the role held when joining.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMembership {
    /// Member identifier.
    pub id: MemberId,
    /// Role at join time.
    pub role: Role,
}

/// Team record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    id: TeamId,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    member_ids: Vec<TeamMembership>,
}

impl Team {
    /// Creates a team.
    #[must_use]
    pub fn new(
        id: TeamId,
        name: impl Into<String>,
        description: impl Into<String>,
        member_ids: Vec<TeamMembership>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            member_ids,
        }
    }

    /// Returns the team identifier.
    #[must_use]
    pub const fn id(&self) -> &TeamId {
        &self.id
    }

    /// Returns the team name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the memberships.
    #[must_use]
    pub fn memberships(&self) -> &[TeamMembership] {
        &self.member_ids
    }

    /// Returns the join-time role of `member`, if they belong to the team.
    #[must_use]
    pub fn role_of(&self, member: &MemberId) -> Option<Role> {
        self.member_ids
            .iter()
            .find(|membership| &membership.id == member)
            .map(|membership| membership.role)
    }
}
