use crate::file::{SelectedFile, UploadTarget};
use crate::theme::EditorTheme;

/// Per-session options written to the shared editor before a file is loaded.
/// Overwritten on every session start; nothing here survives a session.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    pub aspect_ratio: f64,
    pub theme: EditorTheme,
    /// Re-encode quality for the edited payload, 0.0..=1.0.
    pub quality: f32,
}

impl EditorOptions {
    pub fn for_target(target: UploadTarget, theme: EditorTheme) -> Self {
        Self {
            aspect_ratio: target.aspect_ratio(),
            theme,
            quality: 1.0,
        }
    }
}

/// The embedded crop/zoom editor, treated as an opaque capability. The host
/// supplies the concrete surface; the session manager is the only component
/// allowed to touch it.
pub trait EditorSurface {
    fn configure(&mut self, options: &EditorOptions);
    fn load(&mut self, file: &SelectedFile);
    /// Discard any loaded content and pending edit state.
    fn reset(&mut self);
    fn is_loaded(&self) -> bool;
}
