//! Admin edit session
//!
//! One session per admin screen. It owns the form, tracks whether the form
//! is a new record or an edit of an existing one, and gates saves so that
//! only one is in flight at a time.
//!
//! ```text
//! Idle ──begin_create/form_mut──▶ Creating ─┐
//!  │                                        ├─begin_save─▶ Saving ─ok──▶ Idle
//!  └──────────edit(record)──────▶ Editing ──┘                  └─err─▶ previous state
//! ```
//!
//! Validation failures never leave the current state and never reach the
//! store. Successful saves and deletes bump a reload generation that list
//! views watch.

pub mod forms;

use tokio::sync::watch;
use uuid::Uuid;

use crate::error::{DataError, DataResult};
use crate::models::{Entity, ValidationError};
use crate::repos::Mutations;

pub use forms::{
    EditForm, MatchForm, NewsForm, PlayerForm, ShopCategoryForm, ShopItemForm, TeamForm,
};

/// What a save will do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    Create,
    Update(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Creating,
    Editing(Uuid),
    Saving(SaveTarget),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Blocking message shown to the admin after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    fn error(message: impl ToString) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("a save is already in progress")]
    SaveInFlight,

    #[error("no save in progress")]
    NotSaving,

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Validated input captured when a save starts
#[derive(Debug, Clone)]
pub struct SaveTicket<I> {
    pub target: SaveTarget,
    /// State to fall back to when the save fails
    pub origin: SessionState,
    pub input: I,
}

pub struct EditSession<F: EditForm> {
    state: SessionState,
    form: F,
    notice: Option<Notice>,
    reload: watch::Sender<u64>,
}

impl<F: EditForm> Default for EditSession<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: EditForm> EditSession<F> {
    pub fn new() -> Self {
        let (reload, _) = watch::channel(0);
        Self {
            state: SessionState::Idle,
            form: F::default(),
            notice: None,
            reload,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    /// Typing into an idle form starts a new record.
    pub fn form_mut(&mut self) -> &mut F {
        if self.state == SessionState::Idle {
            self.state = SessionState::Creating;
        }
        &mut self.form
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Receiver that changes after every successful save or delete.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.reload.subscribe()
    }

    pub fn generation(&self) -> u64 {
        *self.reload.borrow()
    }

    fn ensure_not_saving(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Saving(_) => Err(SessionError::SaveInFlight),
            _ => Ok(()),
        }
    }

    /// Fresh form with defaults for a new record.
    pub fn begin_create(&mut self) -> Result<(), SessionError> {
        self.ensure_not_saving()?;
        self.form = F::default();
        self.state = SessionState::Creating;
        self.notice = None;
        Ok(())
    }

    /// Load an existing record into the form.
    pub fn edit(&mut self, record: &F::Record) -> Result<(), SessionError> {
        self.ensure_not_saving()?;
        self.form = F::from_record(record);
        self.state = SessionState::Editing(record.id());
        self.notice = None;
        Ok(())
    }

    /// Drop the form and go back to idle.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        self.ensure_not_saving()?;
        self.form = F::default();
        self.state = SessionState::Idle;
        Ok(())
    }

    /// Validate the form and enter `Saving`.
    ///
    /// On a validation failure the state is unchanged and an error notice
    /// is set; nothing is sent anywhere.
    pub fn begin_save(&mut self) -> Result<SaveTicket<F::Input>, SessionError> {
        self.ensure_not_saving()?;
        let target = match self.state {
            SessionState::Editing(id) => SaveTarget::Update(id),
            _ => SaveTarget::Create,
        };

        let input = match self.form.to_input() {
            Ok(input) => input,
            Err(e) => {
                tracing::debug!(error = %e, "form rejected");
                self.notice = Some(Notice::error(&e));
                return Err(SessionError::Invalid(e));
            }
        };

        let origin = self.state;
        self.state = SessionState::Saving(target);
        Ok(SaveTicket {
            target,
            origin,
            input,
        })
    }

    /// Apply the outcome of the mutation started by `ticket`.
    pub fn finish_save(
        &mut self,
        ticket: SaveTicket<F::Input>,
        result: DataResult<F::Record>,
    ) -> Result<F::Record, SessionError> {
        if self.state != SessionState::Saving(ticket.target) {
            return Err(SessionError::NotSaving);
        }

        match result {
            Ok(record) => {
                let verb = match ticket.target {
                    SaveTarget::Create => "created",
                    SaveTarget::Update(_) => "updated",
                };
                self.notice = Some(Notice::success(format!(
                    "{} {} successfully",
                    <F::Record as Entity>::RESOURCE,
                    verb
                )));
                self.form = F::default();
                self.state = SessionState::Idle;
                self.bump();
                Ok(record)
            }
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                self.notice = Some(Notice::error(&e));
                self.state = ticket.origin;
                Err(SessionError::Data(e))
            }
        }
    }

    /// Save through `repo`: create without an id, update with one.
    pub async fn submit<M>(&mut self, repo: &M) -> Result<F::Record, SessionError>
    where
        M: Mutations<Input = F::Input, Record = F::Record>,
    {
        let ticket = self.begin_save()?;
        let result = match ticket.target {
            SaveTarget::Create => repo.create(&ticket.input).await,
            SaveTarget::Update(id) => repo.update(id, &ticket.input).await,
        };
        self.finish_save(ticket, result)
    }

    /// Delete a listed record. Leaves the form and state alone.
    pub async fn delete<M>(&mut self, repo: &M, id: Uuid) -> Result<(), SessionError>
    where
        M: Mutations<Record = F::Record>,
    {
        match repo.delete(id).await {
            Ok(()) => {
                self.notice = Some(Notice::success(format!(
                    "{} deleted successfully",
                    <F::Record as Entity>::RESOURCE
                )));
                self.bump();
                Ok(())
            }
            Err(e) => {
                self.notice = Some(Notice::error(&e));
                Err(SessionError::Data(e))
            }
        }
    }

    fn bump(&self) {
        self.reload.send_modify(|generation| *generation += 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Team, TeamInput};
    use crate::repos::TeamRepo;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn create_then_reset_to_idle() {
        let store = MemoryStore::new();
        let repo = TeamRepo::new(&store);
        let mut session: EditSession<TeamForm> = EditSession::new();
        let mut reload = session.subscribe();

        session.form_mut().name = "ACS Ksar".into();
        assert_eq!(session.state(), SessionState::Creating);

        let team = session.submit(&repo).await.unwrap();
        assert_eq!(team.name, "ACS Ksar");
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.form(), &TeamForm::default());
        assert_eq!(session.notice().unwrap().level, NoticeLevel::Success);
        assert!(reload.has_changed().unwrap());
        assert_eq!(*reload.borrow_and_update(), 1);
    }

    #[tokio::test]
    async fn second_save_while_saving_is_refused() {
        let mut session: EditSession<TeamForm> = EditSession::new();
        session.form_mut().name = "Kedia".into();

        let ticket = session.begin_save().unwrap();
        assert_eq!(session.state(), SessionState::Saving(SaveTarget::Create));
        assert!(matches!(session.begin_save(), Err(SessionError::SaveInFlight)));
        assert!(matches!(session.begin_create(), Err(SessionError::SaveInFlight)));

        let failed: DataResult<Team> = Err(crate::store::StoreError::new("timeout").into());
        assert!(session.finish_save(ticket, failed).is_err());
        assert_eq!(session.state(), SessionState::Creating);
        assert_eq!(session.form().name, "Kedia");
        assert_eq!(session.notice().unwrap().message, "timeout");
        assert_eq!(session.generation(), 0);
    }

    #[tokio::test]
    async fn failed_update_returns_to_editing() {
        let store = MemoryStore::new();
        let repo = TeamRepo::new(&store);
        let team = repo.create(&TeamInput::named("Chemal")).await.unwrap();

        let mut session: EditSession<TeamForm> = EditSession::new();
        session.edit(&team).unwrap();
        repo.delete(team.id).await.unwrap();

        session.form_mut().city = "Nouakchott".into();
        let err = session.submit(&repo).await.unwrap_err();
        assert!(matches!(err, SessionError::Data(ref e) if e.is_not_found()));
        assert_eq!(session.state(), SessionState::Editing(team.id));
        assert_eq!(session.form().city, "Nouakchott");
    }

    #[tokio::test]
    async fn failed_save_from_idle_returns_to_idle() {
        let store = MemoryStore::new();
        store.fail(crate::models::Table::ShopCategories, "connection refused").await;
        let repo = crate::repos::ShopCategoryRepo::new(&store);

        let mut session: EditSession<ShopCategoryForm> = EditSession::new();
        assert_eq!(session.state(), SessionState::Idle);

        let err = session.submit(&repo).await.unwrap_err();
        assert!(matches!(err, SessionError::Data(_)));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.notice().unwrap().message, "connection refused");
        assert_eq!(session.generation(), 0);
    }

    #[tokio::test]
    async fn delete_bumps_reload_without_touching_form() {
        let store = MemoryStore::new();
        let repo = TeamRepo::new(&store);
        let team = repo.create(&TeamInput::named("Douane")).await.unwrap();

        let mut session: EditSession<TeamForm> = EditSession::new();
        session.form_mut().name = "draft".into();
        session.delete(&repo, team.id).await.unwrap();

        assert_eq!(session.state(), SessionState::Creating);
        assert_eq!(session.form().name, "draft");
        assert_eq!(session.generation(), 1);
        assert_eq!(session.notice().unwrap().message, "team deleted successfully");
    }

    #[test]
    fn finish_without_begin_is_rejected() {
        let mut session: EditSession<TeamForm> = EditSession::new();
        let ticket = SaveTicket {
            target: SaveTarget::Create,
            origin: SessionState::Idle,
            input: TeamInput::named("x"),
        };
        let err = session
            .finish_save(ticket, Err(DataError::not_found("team", "x")))
            .unwrap_err();
        assert!(matches!(err, SessionError::NotSaving));
    }
}
