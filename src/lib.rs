use std::cell::RefCell;
use std::rc::Rc;

pub mod commit;
pub mod config;
pub mod editor;
pub mod error;
pub mod file;
pub mod logging;
pub mod modal;
pub mod preview;
pub mod session;
pub mod state;
pub mod theme;
pub mod validate;
pub mod widget;

pub use error::{AppError, AppResult};
pub use file::{CommittedFile, EditedResult, SelectedFile, UploadTarget};
pub use session::{SessionHooks, SessionManager, SessionToken};
pub use widget::{DirectUploadWidget, UploadWidget, WidgetControls};

/// Install the shared editor and its host modal once at startup. Trigger
/// widgets receive the returned handle at construction time instead of
/// reaching for ambient state.
pub fn install_shared_editor(
    editor_factory: session::EditorFactory,
    modal_host: Box<dyn modal::ModalHost>,
    theme: theme::EditorTheme,
) -> Rc<RefCell<SessionManager>> {
    tracing::info!("installing shared editor session manager");
    Rc::new(RefCell::new(SessionManager::new(
        editor_factory,
        modal_host,
        theme,
    )))
}
