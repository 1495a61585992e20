use serde::{Deserialize, Serialize};

/// User-facing theme preference, resolved once by the caller and passed down
/// as explicit configuration rather than probed ambiently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

/// Concrete appearance applied to the embedded editor surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorTheme {
    #[default]
    Light,
    Dark,
}

/// Collapse the preference into a concrete editor appearance.
/// `system_prefers_dark` is the host's one-time platform probe.
pub fn resolve_editor_theme(mode: ThemeMode, system_prefers_dark: bool) -> EditorTheme {
    match mode {
        ThemeMode::Light => EditorTheme::Light,
        ThemeMode::Dark => EditorTheme::Dark,
        ThemeMode::System => {
            if system_prefers_dark {
                EditorTheme::Dark
            } else {
                EditorTheme::Light
            }
        }
    }
}
