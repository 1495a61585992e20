use super::event::SessionEvent;
use super::model::SessionPhase;
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("invalid session phase transition: from {from:?} using event {event:?}")]
    InvalidPhaseTransition {
        from: SessionPhase,
        event: SessionEvent,
    },
}
