//! The workspace coordinator.
//!
//! [`Workspace`] resolves the signed-in member once, checks every rule
//! against the mirrored state, and then issues a single store write. It
//! never mutates its mirror optimistically: the mirror changes only when
//! the store's change feed delivers the committed snapshot, through
//! [`Workspace::sync`] or [`Workspace::next_change`].

use super::codec;
use super::config::WorkspaceConfig;
use super::error::{EntityKind, MemberAction, WorkspaceError, WorkspaceResult};
use super::mirror::{Mirror, Versioned, decode_documents};
use crate::comment::domain::{Comment, CommentId, Emoji, NewComment, ReactionChange};
use crate::member::domain::{
    BootstrapOutcome, Email, Member, MemberDomainError, MemberId, NewMemberProfile,
    ProfileUpdate, Role, Roster,
};
use crate::member::ports::{AuthenticatedIdentity, Credential, IdentityProvider};
use crate::store::domain::{Collection, Direction, Filter, Query, WriteBatch};
use crate::store::ports::{DocumentStore, Snapshot, StoreError, Subscription};
use crate::task::domain::{
    NewTask, StatusTransition, Task, TaskAction, TaskDomainError, TaskEdit, TaskId, TaskStatus,
    TeamId, capabilities_for, ensure_can_create_tasks,
};
use mockable::Clock;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Live subscriptions owned by a signed-in session.
struct Session {
    member_id: MemberId,
    members: Subscription,
    tasks: Subscription,
    teams: Subscription,
    comments: Option<CommentScope>,
}

/// Comment feed for the currently open task.
struct CommentScope {
    task_id: TaskId,
    feed: Subscription,
}

impl Session {
    fn close(self) {
        self.members.unsubscribe();
        self.tasks.unsubscribe();
        self.teams.unsubscribe();
        if let Some(scope) = self.comments {
            scope.feed.unsubscribe();
        }
    }
}

enum Change {
    Snapshot(Snapshot),
    Identity,
}

async fn next_comment_snapshot(open: Option<&mut CommentScope>) -> Option<Snapshot> {
    match open {
        Some(scope) => scope.feed.next().await,
        None => std::future::pending().await,
    }
}

fn drain(feed: &mut Subscription, mirror: &mut Mirror) -> usize {
    let mut applied = 0;
    while let Some(snapshot) = feed.try_next() {
        mirror.apply(&snapshot);
        applied += 1;
    }
    applied
}

/// Workspace coordinator bridging member, task, and comment rules to a
/// document store and an identity provider.
pub struct Workspace<S, I, C>
where
    S: DocumentStore,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    identity: Arc<I>,
    clock: Arc<C>,
    config: WorkspaceConfig,
    identity_changes: watch::Receiver<Option<MemberId>>,
    session: Option<Session>,
    pub(super) mirror: Mirror,
}

impl<S, I, C> Workspace<S, I, C>
where
    S: DocumentStore,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    /// Creates a signed-out workspace.
    #[must_use]
    pub fn new(store: Arc<S>, identity: Arc<I>, clock: Arc<C>, config: WorkspaceConfig) -> Self {
        let identity_changes = identity.identity_changes();
        Self {
            store,
            identity,
            clock,
            config,
            identity_changes,
            session: None,
            mirror: Mirror::default(),
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Returns the signed-in member's id.
    #[must_use]
    pub fn current_member_id(&self) -> Option<&MemberId> {
        self.session.as_ref().map(|session| &session.member_id)
    }

    /// Returns the task whose comments are mirrored.
    #[must_use]
    pub fn open_task_id(&self) -> Option<&TaskId> {
        self.session
            .as_ref()
            .and_then(|session| session.comments.as_ref())
            .map(|scope| &scope.task_id)
    }

    /// Signs in, ensures the member's profile exists, and subscribes to the
    /// workspace collections.
    ///
    /// A first sign-in creates the profile, as an owner when the workspace
    /// has no active owner. An existing profile is promoted to owner when no
    /// active owner remains. Any current session is ended first.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Identity`] for rejected credentials and
    /// [`MemberDomainError::AccountDeactivated`] for soft-deleted profiles,
    /// and a store error when the profile or feeds cannot be set up. After
    /// any failure past authentication the identity is signed out again.
    pub async fn sign_in(&mut self, credential: &Credential) -> WorkspaceResult<Member> {
        self.end_session();
        let identity = self.identity.sign_in(credential).await?;
        self.identity_changes.mark_unchanged();

        let (member, session) = match self.start_session(&identity).await {
            Ok(started) => started,
            Err(err) => {
                warn!(member = %identity.member_id, error = %err, "sign-in rejected");
                if let Err(sign_out_err) = self.identity.sign_out().await {
                    warn!(error = %sign_out_err, "sign-out after rejected sign-in failed");
                }
                self.identity_changes.mark_unchanged();
                return Err(err);
            }
        };
        self.session = Some(session);
        self.sync();
        info!(member = %member.id(), role = %member.role(), "signed in");
        Ok(member)
    }

    /// Bootstraps the profile and opens the workspace-wide feeds.
    ///
    /// Feeds opened before a failing one are torn down on drop.
    async fn start_session(
        &self,
        identity: &AuthenticatedIdentity,
    ) -> WorkspaceResult<(Member, Session)> {
        let member = self.bootstrap(identity).await?;
        let members = self
            .store
            .subscribe(
                Collection::Members,
                Query::all().order_by("name", Direction::Ascending),
            )
            .await?;
        let tasks = self
            .store
            .subscribe(
                Collection::Tasks,
                Query::all().order_by("dueDate", Direction::Ascending),
            )
            .await?;
        let teams = self
            .store
            .subscribe(
                Collection::Teams,
                Query::all().order_by("name", Direction::Ascending),
            )
            .await?;
        let session = Session {
            member_id: member.id().clone(),
            members,
            tasks,
            teams,
            comments: None,
        };
        Ok((member, session))
    }

    async fn bootstrap(&self, identity: &AuthenticatedIdentity) -> WorkspaceResult<Member> {
        let documents = self.store.list(Collection::Members, &Query::all()).await?;
        let members: Vec<Versioned<Member>> = decode_documents(Collection::Members, &documents);
        let roster = Roster::new(members.iter().map(|m| &m.value));

        let email = Email::new(identity.email.as_str())?;
        let name = identity
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| email.local_part())
            .to_owned();
        let profile = NewMemberProfile::new(name, email.as_str())?;
        let outcome = roster.bootstrap_or_promote(&identity.member_id, profile, |member_id| {
            self.config.avatar_url_for(member_id)
        })?;

        let id = identity.member_id.document_id();
        match outcome {
            BootstrapOutcome::Created(member) => {
                let batch = WriteBatch::new()
                    .require_absent(Collection::Members, id.clone())
                    .set(Collection::Members, id, codec::member_fields(&member)?);
                self.store.commit(batch).await?;
                info!(member = %member.id(), role = %member.role(), "created member profile");
                Ok(member)
            }
            BootstrapOutcome::Promoted(member) => {
                let revision = members
                    .iter()
                    .find(|existing| existing.value.id() == member.id())
                    .map(|existing| existing.revision)
                    .ok_or_else(|| WorkspaceError::not_found(EntityKind::Member, member.id()))?;
                let batch = WriteBatch::new()
                    .require_revision(Collection::Members, id.clone(), revision)
                    .update(Collection::Members, id, codec::role_fields(Role::Owner)?);
                self.store.commit(batch).await?;
                info!(member = %member.id(), "promoted to owner: no active owner remained");
                Ok(member)
            }
            BootstrapOutcome::Unchanged(member) => Ok(member),
        }
    }

    /// Ends the session, clears the mirrors, and signs out of the identity
    /// provider.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Identity`] when the provider fails; the
    /// local session is ended regardless.
    pub async fn sign_out(&mut self) -> WorkspaceResult<()> {
        self.end_session();
        self.identity.sign_out().await?;
        self.identity_changes.mark_unchanged();
        Ok(())
    }

    fn end_session(&mut self) {
        if let Some(session) = self.session.take() {
            info!(member = %session.member_id, "ending session");
            session.close();
        }
        self.mirror.clear();
    }

    /// Reacts to an identity change reported by the provider; returns
    /// whether the session survives.
    fn reconcile_identity(&mut self) -> bool {
        let current = self.identity_changes.borrow_and_update().clone();
        let Some(session) = &self.session else {
            return false;
        };
        if current.as_ref() == Some(&session.member_id) {
            return true;
        }
        info!(member = %session.member_id, "identity changed outside the workspace");
        self.end_session();
        false
    }

    /// Applies every pending change notification without waiting.
    ///
    /// Returns the number of snapshots applied. A sign-out reported by the
    /// identity provider ends the session instead.
    pub fn sync(&mut self) -> usize {
        if self.identity_changes.has_changed().unwrap_or(false) && !self.reconcile_identity() {
            return 0;
        }
        let Some(session) = self.session.as_mut() else {
            return 0;
        };
        let mut applied = drain(&mut session.members, &mut self.mirror);
        applied += drain(&mut session.tasks, &mut self.mirror);
        applied += drain(&mut session.teams, &mut self.mirror);
        if let Some(scope) = session.comments.as_mut() {
            applied += drain(&mut scope.feed, &mut self.mirror);
        }
        applied
    }

    /// Waits for the next change notification and applies it.
    ///
    /// Returns the collection that changed, or `None` once no session is
    /// active (including when the identity provider signs the member out).
    pub async fn next_change(&mut self) -> Option<Collection> {
        loop {
            let session = self.session.as_mut()?;
            let change = tokio::select! {
                Some(snapshot) = session.members.next() => Change::Snapshot(snapshot),
                Some(snapshot) = session.tasks.next() => Change::Snapshot(snapshot),
                Some(snapshot) = session.teams.next() => Change::Snapshot(snapshot),
                Some(snapshot) = next_comment_snapshot(session.comments.as_mut()) => {
                    Change::Snapshot(snapshot)
                }
                Ok(()) = self.identity_changes.changed() => Change::Identity,
                else => return None,
            };
            match change {
                Change::Snapshot(snapshot) => {
                    self.mirror.apply(&snapshot);
                    return Some(snapshot.collection);
                }
                Change::Identity => {
                    if !self.reconcile_identity() {
                        return None;
                    }
                }
            }
        }
    }

    /// Mirrors the comments of `task_id`, replacing any previously open
    /// task's comment feed.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::NotSignedIn`], [`WorkspaceError::NotFound`]
    /// for an unknown task, or a store failure.
    pub async fn open_task(&mut self, task_id: &TaskId) -> WorkspaceResult<()> {
        if self.session.is_none() {
            return Err(WorkspaceError::NotSignedIn);
        }
        if self.mirror.task(task_id).is_none() {
            return Err(WorkspaceError::not_found(EntityKind::Task, task_id));
        }
        self.close_task();

        let query = Query::all()
            .filter(Filter::eq("taskId", task_id.as_str()))
            .order_by("timestamp", Direction::Ascending);
        let mut feed = self.store.subscribe(Collection::Comments, query).await?;
        drain(&mut feed, &mut self.mirror);
        debug!(task = %task_id, "opened comment feed");
        if let Some(session) = self.session.as_mut() {
            session.comments = Some(CommentScope {
                task_id: task_id.clone(),
                feed,
            });
        }
        Ok(())
    }

    /// Stops mirroring comments.
    pub fn close_task(&mut self) {
        if let Some(scope) = self
            .session
            .as_mut()
            .and_then(|session| session.comments.take())
        {
            debug!(task = %scope.task_id, "closed comment feed");
            scope.feed.unsubscribe();
        }
        self.mirror.clear_comments();
    }

    fn acting_member(&self) -> WorkspaceResult<&Versioned<Member>> {
        let session = self.session.as_ref().ok_or(WorkspaceError::NotSignedIn)?;
        let member = self
            .mirror
            .member(&session.member_id)
            .ok_or_else(|| WorkspaceError::not_found(EntityKind::Member, &session.member_id))?;
        if member.value.is_deleted() {
            return Err(MemberDomainError::AccountDeactivated(session.member_id.clone()).into());
        }
        Ok(member)
    }

    fn acting_owner(&self, action: MemberAction) -> WorkspaceResult<&Versioned<Member>> {
        let actor = self.acting_member()?;
        if !actor.value.role().is_owner() {
            return Err(WorkspaceError::NotAuthorized {
                member: actor.value.id().clone(),
                action,
            });
        }
        Ok(actor)
    }

    fn target_member(&self, id: &MemberId) -> WorkspaceResult<&Versioned<Member>> {
        self.mirror
            .member(id)
            .ok_or_else(|| WorkspaceError::not_found(EntityKind::Member, id))
    }

    /// Write batch guarded on the target's revision and, when the target is
    /// an active owner, on every other active owner's revision too.
    fn owner_guarded_batch(&self, target: &Versioned<Member>) -> WriteBatch {
        let mut batch = WriteBatch::new().require_revision(
            Collection::Members,
            target.value.id().document_id(),
            target.revision,
        );
        if target.value.is_active_owner() {
            for owner in self
                .mirror
                .members()
                .filter(|m| m.value.is_active_owner() && m.value.id() != target.value.id())
            {
                batch = batch.require_revision(
                    Collection::Members,
                    owner.value.id().document_id(),
                    owner.revision,
                );
            }
        }
        batch
    }

    /// Creates a login and a `Member` profile for someone else.
    ///
    /// The credential is created in a separate provisioning session so the
    /// signed-in owner stays signed in.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::NotAuthorized`] unless the caller is an
    /// owner, a validation error for a bad name or an email already used by
    /// an active member, or the provider's refusal.
    pub async fn provision_member(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> WorkspaceResult<MemberId> {
        let actor = self.acting_owner(MemberAction::Provision)?;
        let profile = NewMemberProfile::new(name, email)?;
        self.mirror
            .roster()
            .ensure_email_available(profile.email(), None)?;

        let mut provisioning = self.identity.open_provisioning_session().await?;
        let created = provisioning.create_identity(profile.email(), password).await;
        let closed = provisioning.close().await;
        let id = created?;
        closed?;

        let member = Member::new(id.clone(), profile, Role::Member, |member_id| {
            self.config.avatar_url_for(member_id)
        });
        let batch = WriteBatch::new()
            .require_absent(Collection::Members, id.document_id())
            .set(
                Collection::Members,
                id.document_id(),
                codec::member_fields(&member)?,
            );
        self.store.commit(batch).await?;
        info!(by = %actor.value.id(), member = %id, "provisioned member");
        Ok(id)
    }

    /// Edits a member's name, email, or avatar.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::NotAuthorized`] unless the caller edits
    /// their own profile or is an owner, and a validation error for bad
    /// values or an email used by another active member.
    pub async fn update_profile(
        &self,
        target: &MemberId,
        update: ProfileUpdate,
    ) -> WorkspaceResult<()> {
        let actor = self.acting_member()?;
        if actor.value.id() != target && !actor.value.role().is_owner() {
            return Err(WorkspaceError::NotAuthorized {
                member: actor.value.id().clone(),
                action: MemberAction::EditProfile,
            });
        }
        let existing = self.target_member(target)?;
        if existing.value.is_deleted() {
            return Err(MemberDomainError::AccountDeactivated(target.clone()).into());
        }
        let validated = update.validate()?;
        if validated.is_empty() {
            return Ok(());
        }
        if let Some(email) = validated.email() {
            self.mirror
                .roster()
                .ensure_email_available(email, Some(target))?;
        }
        let updated = existing.value.with_profile(&validated);
        self.store
            .update(
                Collection::Members,
                &target.document_id(),
                codec::profile_fields(&updated),
            )
            .await?;
        Ok(())
    }

    /// Changes a member's role.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::NotAuthorized`] unless the caller is an
    /// owner, [`MemberDomainError::LastOwnerViolation`] when demoting the
    /// last active owner, and a store precondition failure when the owners
    /// changed concurrently.
    pub async fn change_role(&self, target: &MemberId, new_role: Role) -> WorkspaceResult<()> {
        let actor = self.acting_owner(MemberAction::ChangeRole)?;
        let existing = self.target_member(target)?;
        let updated = self.mirror.roster().change_role(&existing.value, new_role)?;
        if updated.role() == existing.value.role() {
            return Ok(());
        }
        let batch = self.owner_guarded_batch(existing).update(
            Collection::Members,
            target.document_id(),
            codec::role_fields(new_role)?,
        );
        self.store.commit(batch).await?;
        info!(by = %actor.value.id(), member = %target, role = %new_role, "changed role");
        Ok(())
    }

    /// Soft-deletes a member. Removing an already removed member is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::NotAuthorized`] unless the caller is an
    /// owner, [`WorkspaceError::SelfRemoval`] when targeting oneself, and
    /// [`MemberDomainError::LastOwnerViolation`] for the last active owner.
    pub async fn remove_member(&self, target: &MemberId) -> WorkspaceResult<()> {
        let actor = self.acting_owner(MemberAction::Remove)?;
        if actor.value.id() == target {
            return Err(WorkspaceError::SelfRemoval(target.clone()));
        }
        let existing = self.target_member(target)?;
        if existing.value.is_deleted() {
            return Ok(());
        }
        self.mirror.roster().soft_delete(&existing.value)?;
        let batch = self.owner_guarded_batch(existing).update(
            Collection::Members,
            target.document_id(),
            codec::deleted_fields(true),
        );
        self.store.commit(batch).await?;
        info!(by = %actor.value.id(), member = %target, "removed member");
        Ok(())
    }

    /// Reactivates a soft-deleted member.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::NotAuthorized`] unless the caller is an
    /// owner, or a validation error when an active member now uses the same
    /// email.
    pub async fn restore_member(&self, target: &MemberId) -> WorkspaceResult<()> {
        let actor = self.acting_owner(MemberAction::Restore)?;
        let existing = self.target_member(target)?;
        if !existing.value.is_deleted() {
            return Ok(());
        }
        self.mirror.roster().restore(&existing.value)?;
        let batch = WriteBatch::new()
            .require_revision(Collection::Members, target.document_id(), existing.revision)
            .update(
                Collection::Members,
                target.document_id(),
                codec::deleted_fields(false),
            );
        self.store.commit(batch).await?;
        info!(by = %actor.value.id(), member = %target, "restored member");
        Ok(())
    }

    fn ensure_assignable(&self, assignees: &[MemberId]) -> WorkspaceResult<()> {
        for id in assignees {
            let active = self
                .mirror
                .member(id)
                .is_some_and(|member| member.value.is_active());
            if !active {
                return Err(TaskDomainError::UnassignableMember(id.clone()).into());
            }
        }
        Ok(())
    }

    fn ensure_team_exists(&self, team_id: Option<&TeamId>) -> WorkspaceResult<()> {
        match team_id {
            Some(id) if self.mirror.team(id).is_none() => {
                Err(WorkspaceError::not_found(EntityKind::Team, id))
            }
            _ => Ok(()),
        }
    }

    fn authorize_task(
        &self,
        task_id: &TaskId,
        action: TaskAction,
    ) -> WorkspaceResult<(&Versioned<Member>, &Versioned<Task>)> {
        let actor = self.acting_member()?;
        let task = self
            .mirror
            .task(task_id)
            .ok_or_else(|| WorkspaceError::not_found(EntityKind::Task, task_id))?;
        capabilities_for(&actor.value, &task.value).require(actor.value.id(), action)?;
        Ok((actor, task))
    }

    /// Creates a `ToDo` task.
    ///
    /// # Errors
    ///
    /// Returns a task authorization error unless the caller is an owner,
    /// and a validation error for an over-long title or an assignee who is
    /// not an active member.
    pub async fn create_task(&self, request: NewTask) -> WorkspaceResult<TaskId> {
        let actor = self.acting_member()?;
        ensure_can_create_tasks(&actor.value)?;
        request.ensure_title_within(self.config.max_title_length)?;
        self.ensure_assignable(request.assigned_to_ids())?;
        self.ensure_team_exists(request.team_id())?;

        let id = self
            .store
            .create(Collection::Tasks, codec::new_task_fields(&request)?)
            .await?;
        info!(by = %actor.value.id(), task = %id, "created task");
        Ok(TaskId::from(id))
    }

    /// Moves a task to `new_status`, recording or clearing completion.
    ///
    /// Setting the current status again writes nothing.
    ///
    /// # Errors
    ///
    /// Returns a task authorization error unless the caller is an owner or
    /// an assignee, and a store precondition failure when the task changed
    /// since it was last mirrored.
    pub async fn change_task_status(
        &self,
        task_id: &TaskId,
        new_status: TaskStatus,
    ) -> WorkspaceResult<StatusTransition> {
        let (actor, task) = self.authorize_task(task_id, TaskAction::ChangeStatus)?;
        if task.value.status() == new_status {
            return Ok(StatusTransition::Unchanged);
        }
        let mut updated = task.value.clone();
        let transition = updated.change_status(actor.value.id(), new_status, &*self.clock);
        let batch = WriteBatch::new()
            .require_revision(Collection::Tasks, task_id.document_id(), task.revision)
            .update(
                Collection::Tasks,
                task_id.document_id(),
                codec::status_fields(&updated)?,
            );
        self.store.commit(batch).await?;
        debug!(by = %actor.value.id(), task = %task_id, status = %new_status, "changed status");
        Ok(transition)
    }

    /// Edits a task's title, description, assignees, due date, colour, or
    /// team.
    ///
    /// # Errors
    ///
    /// Returns a task authorization error unless the caller is an owner,
    /// and a validation error for an over-long title or an inactive
    /// assignee.
    pub async fn edit_task(&self, task_id: &TaskId, edit: TaskEdit) -> WorkspaceResult<()> {
        self.authorize_task(task_id, TaskAction::Edit)?;
        if edit.is_empty() {
            return Ok(());
        }
        edit.ensure_title_within(self.config.max_title_length)?;
        if let Some(assignees) = edit.assigned_to_ids() {
            self.ensure_assignable(assignees)?;
        }
        if let Some(team_id) = edit.team_id() {
            self.ensure_team_exists(team_id.as_ref())?;
        }
        self.store
            .update(
                Collection::Tasks,
                &task_id.document_id(),
                codec::edit_fields(&edit)?,
            )
            .await?;
        Ok(())
    }

    /// Deletes a task together with all of its comments in one commit.
    ///
    /// # Errors
    ///
    /// Returns a task authorization error unless the caller is an owner.
    pub async fn delete_task(&self, task_id: &TaskId) -> WorkspaceResult<()> {
        let (actor, _) = self.authorize_task(task_id, TaskAction::Delete)?;
        let comments = self
            .store
            .list(
                Collection::Comments,
                &Query::all().filter(Filter::eq("taskId", task_id.as_str())),
            )
            .await?;
        let batch = comments
            .iter()
            .fold(WriteBatch::new(), |batch, comment| {
                batch.delete(Collection::Comments, comment.id().clone())
            })
            .delete(Collection::Tasks, task_id.document_id());
        self.store.commit(batch).await?;
        info!(by = %actor.value.id(), task = %task_id, comments = comments.len(), "deleted task");
        Ok(())
    }

    /// Adds a comment to a task; the store assigns its timestamp.
    ///
    /// # Errors
    ///
    /// Returns a task authorization error unless the caller is an owner or
    /// an assignee, and a validation error for blank or over-long text.
    pub async fn add_comment(&self, task_id: &TaskId, text: &str) -> WorkspaceResult<CommentId> {
        let (actor, _) = self.authorize_task(task_id, TaskAction::Comment)?;
        let request = NewComment::new(task_id.clone(), text, self.config.max_comment_length)?;
        let id = self
            .store
            .create(
                Collection::Comments,
                codec::new_comment_fields(actor.value.id(), &request),
            )
            .await?;
        Ok(CommentId::from(id))
    }

    /// Toggles the signed-in member's `emoji` reaction on a comment.
    ///
    /// The reactions are rewritten as a whole, conditional on the comment's
    /// revision. A concurrent change makes the toggle re-read and re-apply,
    /// up to [`WorkspaceConfig::reaction_retry_limit`] times.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank emoji,
    /// [`WorkspaceError::NotFound`] for an unknown comment, and
    /// [`StoreError::PreconditionFailed`] once retries are exhausted.
    pub async fn toggle_reaction(
        &self,
        comment_id: &CommentId,
        emoji: &str,
    ) -> WorkspaceResult<ReactionChange> {
        let actor = self.acting_member()?.value.id().clone();
        let emoji = Emoji::new(emoji)?;
        let document_id = comment_id.document_id();
        let mut attempt = 0;
        loop {
            let document = self
                .store
                .get(Collection::Comments, &document_id)
                .await?
                .ok_or_else(|| WorkspaceError::not_found(EntityKind::Comment, comment_id))?;
            let comment: Comment = document.decode()?;
            let mut reactions = comment.reactions().clone();
            let change = reactions.toggle(&actor, &emoji);
            let batch = WriteBatch::new()
                .require_revision(Collection::Comments, document_id.clone(), document.revision())
                .update(
                    Collection::Comments,
                    document_id.clone(),
                    codec::reaction_fields(&reactions)?,
                );
            match self.store.commit(batch).await {
                Ok(()) => return Ok(change),
                Err(StoreError::PreconditionFailed { .. })
                    if attempt < self.config.reaction_retry_limit =>
                {
                    attempt += 1;
                    debug!(comment = %comment_id, attempt, "reaction conflict, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
