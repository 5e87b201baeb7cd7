//! Tests for centralized task authorization.

use crate::member::domain::{Member, MemberId, NewMemberProfile, Role, Roster};
use crate::task::domain::{
    Capabilities, NewTask, Task, TaskAction, TaskDomainError, TaskId, capabilities_for,
    ensure_can_create_tasks,
};
use chrono::NaiveDate;
use rstest::{fixture, rstest};

fn member(id: &str, role: Role) -> Member {
    let profile = NewMemberProfile::new(id, format!("{id}@example.com")).expect("valid profile");
    Member::new(MemberId::new(id), profile, role, |_| String::new())
}

#[fixture]
fn task() -> Task {
    let due = NaiveDate::from_ymd_opt(2026, 11, 30).expect("valid date");
    let request = NewTask::new("Audit", [MemberId::new("assignee")], due).expect("valid task");
    Task::new(TaskId::new("t1"), request)
}

#[rstest]
#[case(Role::Owner, "boss", Capabilities { can_edit_task: true, can_change_status: true, can_comment: true, can_delete: true })]
#[case(Role::Member, "assignee", Capabilities { can_edit_task: false, can_change_status: true, can_comment: true, can_delete: false })]
#[case(Role::Viewer, "assignee", Capabilities { can_edit_task: false, can_change_status: true, can_comment: true, can_delete: false })]
#[case(Role::Member, "bystander", Capabilities::default())]
#[case(Role::Viewer, "bystander", Capabilities::default())]
fn capabilities_follow_role_and_assignment(
    task: Task,
    #[case] role: Role,
    #[case] id: &str,
    #[case] expected: Capabilities,
) {
    assert_eq!(capabilities_for(&member(id, role), &task), expected);
}

#[rstest]
fn deleted_members_have_no_capabilities(task: Task) {
    let owner = member("boss", Role::Owner);
    let spare = member("spare", Role::Owner);
    let removed = Roster::new([&owner, &spare])
        .soft_delete(&owner)
        .expect("soft delete succeeds");

    assert_eq!(capabilities_for(&removed, &task), Capabilities::default());
}

#[rstest]
fn require_reports_member_and_action(task: Task) {
    let bystander = member("bystander", Role::Member);
    let result = capabilities_for(&bystander, &task)
        .require(bystander.id(), TaskAction::ChangeStatus);

    assert_eq!(
        result,
        Err(TaskDomainError::NotAuthorized {
            member: MemberId::new("bystander"),
            action: TaskAction::ChangeStatus,
        })
    );
}

#[rstest]
#[case(Role::Owner, true)]
#[case(Role::Member, false)]
#[case(Role::Viewer, false)]
fn only_owners_create_tasks(#[case] role: Role, #[case] allowed: bool) {
    assert_eq!(ensure_can_create_tasks(&member("x", role)).is_ok(), allowed);
}
