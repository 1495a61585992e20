use super::error::{StateError, StateResult};
use super::event::{PhaseTransition, SessionEvent};
use super::model::SessionPhase;

#[derive(Debug)]
pub struct SessionStateMachine {
    phase: SessionPhase,
    transition_history: Vec<PhaseTransition>,
}

impl SessionStateMachine {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::default(),
            transition_history: Vec::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn can_transition(&self, event: SessionEvent) -> bool {
        self.next_phase(event).is_some()
    }

    pub fn next_phase(&self, event: SessionEvent) -> Option<SessionPhase> {
        use SessionEvent::*;
        match (self.phase, event) {
            (SessionPhase::Idle, StartSession) => Some(SessionPhase::Editing),
            (SessionPhase::Editing, CompleteEdit) => Some(SessionPhase::Idle),
            (SessionPhase::Editing, CancelEdit) => Some(SessionPhase::Idle),
            (SessionPhase::Editing, DismissModal) => Some(SessionPhase::Idle),
            (SessionPhase::Editing, SupersedeSession) => Some(SessionPhase::Idle),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: SessionEvent) -> StateResult<SessionPhase> {
        tracing::debug!(from = ?self.phase, event = ?event, "request session phase transition");
        let next = self.next_phase(event).ok_or_else(|| {
            let from = self.phase;
            tracing::warn!(from = ?from, event = ?event, "invalid session phase transition requested");
            StateError::InvalidPhaseTransition { from, event }
        })?;

        let record = PhaseTransition::new(Some(self.phase), event, next);
        self.phase = next;
        self.transition_history.push(record);

        Ok(self.phase)
    }
}

#[cfg(test)]
impl SessionStateMachine {
    fn history(&self) -> &[PhaseTransition] {
        &self.transition_history
    }
}

impl Default for SessionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionPhase::{:?}", self.phase)
    }
}
