use thiserror::Error;

use crate::commit;
use crate::editor::{EditorOptions, EditorSurface};
use crate::file::{CommittedFile, EditedResult, SelectedFile, UploadTarget};
use crate::modal::{ModalAdapter, ModalError, ModalHost};
use crate::state::{SessionEvent, SessionPhase, SessionStateMachine, StateError};
use crate::theme::EditorTheme;

pub type SessionResult<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Caller contract violation, not user input: sessions only ever start
    /// from an already-validated selection.
    #[error("cannot start an edit session with an empty file payload")]
    EmptyFile,
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Modal(#[from] ModalError),
}

/// Builds the concrete editing surface on first use.
pub type EditorFactory = Box<dyn Fn() -> Box<dyn EditorSurface>>;

/// Per-session callbacks supplied by the trigger widget. Dropped on every
/// session exit, which is what deregisters them.
pub struct SessionHooks {
    /// Persists the final file; invoked at most once, and only on completion.
    pub commit: Box<dyn FnMut(CommittedFile, UploadTarget)>,
    /// Clears the backing file input's value.
    pub reset_input: Box<dyn FnMut()>,
}

/// Proof of which session an editor event belongs to. Tokens from a
/// superseded or finished session no longer match and their events are
/// silently dropped, so a stale listener can never fire into a later session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken {
    generation: u64,
}

struct ActiveSession {
    target: UploadTarget,
    file: SelectedFile,
    hooks: SessionHooks,
    generation: u64,
}

/// Owns the single lazily-constructed shared editor and enforces
/// one-session-at-a-time semantics. All mutation of the editor and its
/// per-target options goes through here.
pub struct SessionManager {
    editor_factory: EditorFactory,
    editor: Option<Box<dyn EditorSurface>>,
    modal: ModalAdapter,
    machine: SessionStateMachine,
    theme: EditorTheme,
    active: Option<ActiveSession>,
    generation: u64,
}

impl SessionManager {
    pub fn new(
        editor_factory: EditorFactory,
        modal_host: Box<dyn ModalHost>,
        theme: EditorTheme,
    ) -> Self {
        Self {
            editor_factory,
            editor: None,
            modal: ModalAdapter::new(modal_host),
            machine: SessionStateMachine::new(),
            theme,
            active: None,
            generation: 0,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.machine.phase()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none() && self.machine.phase() == SessionPhase::Idle
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Single entry point for the editing flow. If a previous session is
    /// still open it is forcibly superseded, and its resources are released
    /// strictly before the new session's options touch the shared editor.
    pub fn start_session(
        &mut self,
        target: UploadTarget,
        file: SelectedFile,
        hooks: SessionHooks,
    ) -> SessionResult<SessionToken> {
        if file.data.is_empty() {
            debug_assert!(false, "start_session called with an empty file payload");
            return Err(SessionError::EmptyFile);
        }

        if let Some(session) = self.active.take() {
            tracing::warn!(old = %session.target, new = %target, "superseding open edit session");
            self.release(session, SessionEvent::SupersedeSession);
        }

        self.machine.transition(SessionEvent::StartSession)?;

        let options = EditorOptions::for_target(target, self.theme);
        let factory = &self.editor_factory;
        let editor = self.editor.get_or_insert_with(|| {
            tracing::debug!("constructing shared editor surface");
            factory()
        });
        editor.configure(&options);
        editor.load(&file);

        if let Err(err) = self.modal.open() {
            tracing::error!(error = %err, "editor modal failed to open; rolling back session start");
            editor.reset();
            let _ = self.machine.transition(SessionEvent::CancelEdit);
            return Err(err.into());
        }
        self.modal.ready();

        self.generation = self.generation.wrapping_add(1);
        let token = SessionToken {
            generation: self.generation,
        };
        tracing::info!(%target, file = %file.name, "edit session started");
        self.active = Some(ActiveSession {
            target,
            file,
            hooks,
            generation: self.generation,
        });
        Ok(token)
    }

    /// The user finalized the edit. Reconstructs the file from the original
    /// name plus the edited payload and dispatches the commit hook, then
    /// tears the session down. Stale tokens are ignored.
    pub fn complete(&mut self, token: SessionToken, edited: EditedResult) {
        if !self.token_is_current(token) {
            tracing::debug!(token = token.generation, "stale completion event ignored");
            return;
        }
        let Some(mut session) = self.active.take() else {
            return;
        };
        let committed = commit::reassemble(&session.file, edited);
        tracing::info!(target = %session.target, file = %committed.name, "edit completed; dispatching commit");
        (session.hooks.commit)(committed, session.target);
        self.release(session, SessionEvent::CompleteEdit);
    }

    /// The user backed out through the editor's own cancel affordance.
    /// Stale tokens are ignored.
    pub fn cancel(&mut self, token: SessionToken) {
        if !self.token_is_current(token) {
            tracing::debug!(token = token.generation, "stale cancellation event ignored");
            return;
        }
        let Some(session) = self.active.take() else {
            return;
        };
        tracing::info!(target = %session.target, "edit session canceled");
        self.release(session, SessionEvent::CancelEdit);
    }

    /// The host modal was closed around the session (outside click, escape).
    /// Same teardown as an explicit cancel; commit never runs. A dismissal
    /// with no session open is a no-op.
    pub fn modal_dismissed(&mut self) {
        let Some(session) = self.active.take() else {
            tracing::debug!("modal dismissal with no active session");
            return;
        };
        tracing::info!(target = %session.target, "edit session dismissed via modal");
        self.release(session, SessionEvent::DismissModal);
    }

    fn token_is_current(&self, token: SessionToken) -> bool {
        self.active
            .as_ref()
            .is_some_and(|session| session.generation == token.generation)
    }

    /// Guaranteed teardown for every session exit: discard loaded editor
    /// content, close the modal, clear the backing input, drop the hooks.
    fn release(&mut self, mut session: ActiveSession, event: SessionEvent) {
        if let Some(editor) = self.editor.as_mut() {
            editor.reset();
        }
        self.modal.close();
        (session.hooks.reset_input)();
        if let Err(err) = self.machine.transition(event) {
            tracing::error!(error = %err, "session exit with inconsistent phase");
        }
    }
}
