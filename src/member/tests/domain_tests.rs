//! Validation tests for member scalars and profiles.

use crate::member::domain::{
    Email, Member, MemberDomainError, MemberId, NewMemberProfile, ParseRoleError, ProfileUpdate,
    Role,
};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case("ada@example.com")]
#[case("  Ada.Lovelace@Example.COM ")]
fn email_accepts_well_formed_addresses(#[case] raw: &str) {
    let email = Email::new(raw).expect("valid email");
    assert_eq!(email.as_str(), raw.trim());
}

#[rstest]
#[case("")]
#[case("ada")]
#[case("@example.com")]
#[case("ada@")]
#[case("ada@@example.com")]
#[case("ada lovelace@example.com")]
fn email_rejects_malformed_addresses(#[case] raw: &str) {
    assert_eq!(
        Email::new(raw),
        Err(MemberDomainError::InvalidEmail(raw.to_owned()))
    );
}

#[rstest]
fn email_matching_ignores_case() {
    let lower = Email::new("ada@example.com").expect("valid email");
    let upper = Email::new("ADA@EXAMPLE.com").expect("valid email");
    assert!(lower.matches(&upper));
    assert_ne!(lower, upper);
}

#[rstest]
#[case("Owner", Role::Owner)]
#[case("member", Role::Member)]
#[case(" VIEWER ", Role::Viewer)]
fn role_parses_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
    assert_eq!(Role::try_from(raw), Ok(expected));
}

#[rstest]
fn role_rejects_unknown_values() {
    assert_eq!(
        Role::try_from("admin"),
        Err(ParseRoleError("admin".to_owned()))
    );
}

#[rstest]
fn new_profile_rejects_blank_name() {
    assert_eq!(
        NewMemberProfile::new("   ", "ada@example.com"),
        Err(MemberDomainError::EmptyName)
    );
}

#[rstest]
fn member_uses_default_avatar_when_profile_has_none() {
    let profile = NewMemberProfile::new("Ada", "ada@example.com").expect("valid profile");
    let member = Member::new(MemberId::new("m1"), profile, Role::Member, |id| {
        format!("https://avatars.test/{id}")
    });

    assert_eq!(member.avatar_url(), "https://avatars.test/m1");
    assert!(member.is_active());
    assert!(!member.is_active_owner());
}

#[rstest]
fn member_serializes_with_camel_case_fields() {
    let profile = NewMemberProfile::new("Ada", "ada@example.com")
        .expect("valid profile")
        .with_avatar_url("https://avatars.test/ada");
    let member = Member::new(MemberId::new("m1"), profile, Role::Owner, |_| String::new());

    let value = serde_json::to_value(&member).expect("member serializes");
    assert_eq!(
        value,
        json!({
            "id": "m1",
            "name": "Ada",
            "email": "ada@example.com",
            "role": "Owner",
            "isDeleted": false,
            "avatarUrl": "https://avatars.test/ada",
        })
    );
}

#[rstest]
fn member_decodes_without_optional_fields() {
    let member: Member = serde_json::from_value(json!({
        "id": "m2",
        "name": "Grace",
        "email": "grace@example.com",
        "role": "Viewer",
    }))
    .expect("member decodes");

    assert!(!member.is_deleted());
    assert_eq!(member.avatar_url(), "");
}

#[rstest]
fn profile_update_trims_and_applies_fields() {
    let profile = NewMemberProfile::new("Ada", "ada@example.com").expect("valid profile");
    let member = Member::new(MemberId::new("m1"), profile, Role::Member, |_| String::new());
    let update = ProfileUpdate::new()
        .with_name("  Ada King ")
        .with_email("countess@example.com")
        .validate()
        .expect("valid update");

    let updated = member.with_profile(&update);
    assert_eq!(updated.name(), "Ada King");
    assert_eq!(updated.email().as_str(), "countess@example.com");
    assert_eq!(updated.role(), Role::Member);
}

#[rstest]
fn profile_update_rejects_malformed_email() {
    let result = ProfileUpdate::new().with_email("nope").validate();
    assert_eq!(result, Err(MemberDomainError::InvalidEmail("nope".to_owned())));
}
