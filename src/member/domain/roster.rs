//! Owner-invariant rules over the set of workspace members.
//!
//! Once a workspace has members, at least one active member holds
//! [`Role::Owner`]. Every rule here is pure: it inspects a snapshot of the
//! roster and returns the member record that should be written, leaving the
//! write itself to the caller.

use super::{Email, Member, MemberDomainError, MemberId, NewMemberProfile, Role};

/// Result of resolving a signed-in identity to a member profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// No profile existed; this one must be created.
    Created(Member),
    /// The profile existed but no active owner did; it must be promoted.
    Promoted(Member),
    /// The profile exists and nothing needs writing.
    Unchanged(Member),
}

impl BootstrapOutcome {
    /// Returns the resulting member record.
    #[must_use]
    pub const fn member(&self) -> &Member {
        match self {
            Self::Created(member) | Self::Promoted(member) | Self::Unchanged(member) => member,
        }
    }
}

/// Read-only view over every member profile, deleted ones included.
#[derive(Debug, Clone, Default)]
pub struct Roster<'a> {
    members: Vec<&'a Member>,
}

impl<'a> Roster<'a> {
    /// Creates a roster view.
    #[must_use]
    pub fn new(members: impl IntoIterator<Item = &'a Member>) -> Self {
        Self {
            members: members.into_iter().collect(),
        }
    }

    /// Finds a member by identifier, deleted or not.
    #[must_use]
    pub fn find(&self, id: &MemberId) -> Option<&'a Member> {
        self.members.iter().copied().find(|member| member.id() == id)
    }

    /// Iterates over active members.
    pub fn active_members(&self) -> impl Iterator<Item = &'a Member> + '_ {
        self.members.iter().copied().filter(|member| member.is_active())
    }

    /// Iterates over active owners.
    pub fn active_owners(&self) -> impl Iterator<Item = &'a Member> + '_ {
        self.members
            .iter()
            .copied()
            .filter(|member| member.is_active_owner())
    }

    /// Counts active owners.
    #[must_use]
    pub fn active_owner_count(&self) -> usize {
        self.active_owners().count()
    }

    /// Resolves the profile for a signed-in identity.
    ///
    /// A missing profile is created as [`Role::Owner`] when no active owner
    /// exists and as [`Role::Member`] otherwise. An existing active profile
    /// is promoted to owner when no active owner exists anywhere. Repeated
    /// calls against the resulting roster return
    /// [`BootstrapOutcome::Unchanged`].
    ///
    /// # Errors
    ///
    /// Returns [`MemberDomainError::AccountDeactivated`] when the profile has
    /// been soft-deleted.
    pub fn bootstrap_or_promote(
        &self,
        id: &MemberId,
        profile_if_missing: NewMemberProfile,
        default_avatar_url: impl FnOnce(&MemberId) -> String,
    ) -> Result<BootstrapOutcome, MemberDomainError> {
        let has_owner = self.active_owner_count() > 0;
        match self.find(id) {
            None => {
                let role = if has_owner { Role::Member } else { Role::Owner };
                Ok(BootstrapOutcome::Created(Member::new(
                    id.clone(),
                    profile_if_missing,
                    role,
                    default_avatar_url,
                )))
            }
            Some(member) if member.is_deleted() => {
                Err(MemberDomainError::AccountDeactivated(id.clone()))
            }
            Some(member) if !has_owner => {
                Ok(BootstrapOutcome::Promoted(member.with_role(Role::Owner)))
            }
            Some(member) => Ok(BootstrapOutcome::Unchanged(member.clone())),
        }
    }

    /// Returns whether a caller holding `acting_role` may move `target` to
    /// `new_role`.
    #[must_use]
    pub fn can_change_role(&self, acting_role: Role, target: &Member, new_role: Role) -> bool {
        acting_role.is_owner() && self.change_role(target, new_role).is_ok()
    }

    /// Moves `target` to `new_role`.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDomainError::AccountDeactivated`] for a soft-deleted
    /// target, or [`MemberDomainError::LastOwnerViolation`] when the target is
    /// an owner losing the role while at most one active owner exists.
    pub fn change_role(&self, target: &Member, new_role: Role) -> Result<Member, MemberDomainError> {
        if target.is_deleted() {
            return Err(MemberDomainError::AccountDeactivated(target.id().clone()));
        }
        if !new_role.is_owner() {
            self.ensure_not_last_owner(target)?;
        }
        Ok(target.with_role(new_role))
    }

    /// Demotes `target` to `new_role`.
    ///
    /// # Errors
    ///
    /// See [`Roster::change_role`].
    pub fn demote(&self, target: &Member, new_role: Role) -> Result<Member, MemberDomainError> {
        self.change_role(target, new_role)
    }

    /// Soft-deletes `target`. Deleting an already deleted member is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDomainError::LastOwnerViolation`] when the target is an
    /// owner and at most one active owner exists.
    pub fn soft_delete(&self, target: &Member) -> Result<Member, MemberDomainError> {
        if target.is_deleted() {
            return Ok(target.clone());
        }
        self.ensure_not_last_owner(target)?;
        Ok(target.with_deleted(true))
    }

    /// Reactivates a soft-deleted member.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDomainError::DuplicateEmail`] when an active member
    /// took over the address in the meantime.
    pub fn restore(&self, target: &Member) -> Result<Member, MemberDomainError> {
        self.ensure_email_available(target.email(), Some(target.id()))?;
        Ok(target.with_deleted(false))
    }

    /// Checks that no active member other than `except` uses `email`.
    ///
    /// # Errors
    ///
    /// Returns [`MemberDomainError::DuplicateEmail`] on a case-insensitive
    /// collision.
    pub fn ensure_email_available(
        &self,
        email: &Email,
        except: Option<&MemberId>,
    ) -> Result<(), MemberDomainError> {
        let taken = self
            .active_members()
            .filter(|member| Some(member.id()) != except)
            .any(|member| member.email().matches(email));
        if taken {
            return Err(MemberDomainError::DuplicateEmail(email.to_string()));
        }
        Ok(())
    }

    fn ensure_not_last_owner(&self, target: &Member) -> Result<(), MemberDomainError> {
        if target.role().is_owner() && self.active_owner_count() <= 1 {
            return Err(MemberDomainError::LastOwnerViolation(target.id().clone()));
        }
        Ok(())
    }
}
