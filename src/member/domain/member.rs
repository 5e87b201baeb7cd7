//! Member profile aggregate.

use super::{Email, MemberDomainError, MemberId, Role};
use serde::{Deserialize, Serialize};

/// Member profile as persisted in the `members` collection.
///
/// A soft-deleted member stays referenceable from historical tasks and
/// comments but is excluded from active listings and new assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    id: MemberId,
    name: String,
    email: Email,
    role: Role,
    #[serde(default)]
    is_deleted: bool,
    #[serde(default)]
    avatar_url: String,
}

impl Member {
    /// Creates an active member from a validated profile.
    ///
    /// `default_avatar_url` is used when the profile does not carry one.
    #[must_use]
    pub fn new(
        id: MemberId,
        profile: NewMemberProfile,
        role: Role,
        default_avatar_url: impl FnOnce(&MemberId) -> String,
    ) -> Self {
        let avatar_url = profile
            .avatar_url
            .unwrap_or_else(|| default_avatar_url(&id));
        Self {
            id,
            name: profile.name,
            email: profile.email,
            role,
            is_deleted: false,
            avatar_url,
        }
    }

    /// Returns the member identifier.
    #[must_use]
    pub const fn id(&self) -> &MemberId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Returns the workspace role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns `true` once the member has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Returns `true` unless the member has been soft-deleted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.is_deleted
    }

    /// Returns `true` for an active owner.
    #[must_use]
    pub const fn is_active_owner(&self) -> bool {
        self.is_active() && self.role.is_owner()
    }

    /// Returns the avatar URL.
    #[must_use]
    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    pub(crate) fn with_role(&self, role: Role) -> Self {
        Self {
            role,
            ..self.clone()
        }
    }

    pub(crate) fn with_deleted(&self, is_deleted: bool) -> Self {
        Self {
            is_deleted,
            ..self.clone()
        }
    }

    /// Returns a copy with the validated profile changes applied.
    #[must_use]
    pub fn with_profile(&self, update: &ValidatedProfileUpdate) -> Self {
        let mut updated = self.clone();
        if let Some(name) = &update.name {
            updated.name.clone_from(name);
        }
        if let Some(email) = &update.email {
            updated.email = email.clone();
        }
        if let Some(avatar_url) = &update.avatar_url {
            updated.avatar_url.clone_from(avatar_url);
        }
        updated
    }
}

/// Profile data used when a member record is first created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMemberProfile {
    name: String,
    email: Email,
    avatar_url: Option<String>,
}

impl NewMemberProfile {
    /// Creates a validated profile.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDomainError::EmptyName`] for a blank name or
    /// [`MemberDomainError::InvalidEmail`] for a malformed address.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self, MemberDomainError> {
        Ok(Self {
            name: validate_name(name.into())?,
            email: Email::new(email)?,
            avatar_url: None,
        })
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }
}

/// Requested edit of a member's own profile fields.
///
/// Roles are changed through the roster rules, never through a profile edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
}

impl ProfileUpdate {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Changes the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Changes the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Changes the avatar URL.
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// Validates the requested values.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDomainError::EmptyName`] or
    /// [`MemberDomainError::InvalidEmail`] for malformed values.
    pub fn validate(self) -> Result<ValidatedProfileUpdate, MemberDomainError> {
        Ok(ValidatedProfileUpdate {
            name: self.name.map(validate_name).transpose()?,
            email: self.email.map(Email::new).transpose()?,
            avatar_url: self.avatar_url,
        })
    }
}

/// Profile update whose values passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProfileUpdate {
    name: Option<String>,
    email: Option<Email>,
    avatar_url: Option<String>,
}

impl ValidatedProfileUpdate {
    /// Returns the new email address, if the update changes it.
    #[must_use]
    pub const fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    /// Returns `true` when nothing would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.avatar_url.is_none()
    }
}

fn validate_name(name: String) -> Result<String, MemberDomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(MemberDomainError::EmptyName);
    }
    Ok(trimmed.to_owned())
}
