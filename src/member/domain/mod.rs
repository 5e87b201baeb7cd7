//! Domain model for members and roles.

mod error;
mod ids;
mod member;
mod role;
mod roster;

pub use error::{MemberDomainError, ParseRoleError};
pub use ids::{Email, MemberId};
pub use member::{Member, NewMemberProfile, ProfileUpdate, ValidatedProfileUpdate};
pub use role::Role;
pub use roster::{BootstrapOutcome, Roster};
