use super::model::SessionPhase;

/// Every way an editing session can begin or end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    StartSession,
    CompleteEdit,
    CancelEdit,
    /// The host modal was closed by an interaction outside the session's own
    /// completion/cancellation path (outside click, escape).
    DismissModal,
    /// A new session forcibly replaced the open one.
    SupersedeSession,
}

/// One applied transition, kept for ordered history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    pub from: Option<SessionPhase>,
    pub event: SessionEvent,
    pub to: SessionPhase,
}

impl PhaseTransition {
    pub fn new(from: Option<SessionPhase>, event: SessionEvent, to: SessionPhase) -> Self {
        Self { from, event, to }
    }
}
