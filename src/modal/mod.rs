use thiserror::Error;

pub type ModalResult<T> = std::result::Result<T, ModalError>;

#[derive(Debug, Error)]
pub enum ModalError {
    #[error("modal is already open")]
    AlreadyOpen,
}

/// Host-owned modal chrome around the shared editor. The host also routes
/// dismissal interactions (outside click, escape) back into
/// `SessionManager::modal_dismissed`; the adapter never observes those
/// directly.
pub trait ModalHost {
    fn open(&mut self);
    fn close(&mut self);
    /// Toggle the loading placeholder shown while the editing surface
    /// initializes.
    fn set_busy(&mut self, busy: bool);
}

/// Tracks the single modal instance tied to the editor and keeps its
/// open/busy state coherent across every exit path.
pub struct ModalAdapter {
    host: Box<dyn ModalHost>,
    open: bool,
    busy: bool,
}

impl ModalAdapter {
    pub fn new(host: Box<dyn ModalHost>) -> Self {
        Self {
            host,
            open: false,
            busy: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opens the modal with the loading placeholder up. The session manager's
    /// forced-cancel step guarantees this precondition in correct flows.
    pub fn open(&mut self) -> ModalResult<()> {
        if self.open {
            return Err(ModalError::AlreadyOpen);
        }
        tracing::debug!("opening editor modal");
        self.host.open();
        self.open = true;
        self.host.set_busy(true);
        self.busy = true;
        Ok(())
    }

    /// Dismisses the loading placeholder once the editing surface is up.
    pub fn ready(&mut self) {
        if self.busy {
            self.host.set_busy(false);
            self.busy = false;
        }
    }

    /// Idempotent. Always clears a still-pending loading placeholder so an
    /// open immediately followed by close leaves no dangling indicator.
    pub fn close(&mut self) {
        if self.busy {
            self.host.set_busy(false);
            self.busy = false;
        }
        if !self.open {
            return;
        }
        tracing::debug!("closing editor modal");
        self.host.close();
        self.open = false;
    }
}
