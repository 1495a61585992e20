use std::rc::Rc;
use std::time::SystemTime;

/// A user-selected file handle plus the metadata the browser-side surface
/// reports for it. Never persisted; discarded when the originating flow ends.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: Option<String>,
    pub data: Rc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: Option<&str>, data: impl Into<Rc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.map(str::to_owned),
            data: data.into(),
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Byte payload produced when the user finalizes an edit. Consumed
/// immediately by the commit dispatcher and not retained.
#[derive(Debug, Clone)]
pub struct EditedResult {
    pub data: Rc<[u8]>,
    pub mime_type: String,
}

impl EditedResult {
    pub fn new(data: impl Into<Rc<[u8]>>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// The canonical file-like value handed to the caller's commit function.
#[derive(Debug, Clone)]
pub struct CommittedFile {
    pub name: String,
    pub mime_type: String,
    pub data: Rc<[u8]>,
    pub last_modified: SystemTime,
}

/// The logical upload slot a trigger widget is bound to.
///
/// The tagged shape makes the historical mutually-exclusive
/// `(night, is_icon)` flag pair unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    Icon,
    Logo { night: bool },
}

const ICON_ASPECT_RATIO: f64 = 1.0;
const LOGO_ASPECT_RATIO: f64 = 8.0;

impl UploadTarget {
    /// Crop aspect ratio the shared editor uses for this slot.
    pub fn aspect_ratio(self) -> f64 {
        match self {
            UploadTarget::Icon => ICON_ASPECT_RATIO,
            UploadTarget::Logo { .. } => LOGO_ASPECT_RATIO,
        }
    }

    /// Bridge for callers still on the `(night: Option<bool>, is_icon: bool)`
    /// commit signature.
    pub fn legacy_flags(self) -> (Option<bool>, bool) {
        match self {
            UploadTarget::Icon => (None, true),
            UploadTarget::Logo { night } => (Some(night), false),
        }
    }
}

impl std::fmt::Display for UploadTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadTarget::Icon => write!(f, "icon"),
            UploadTarget::Logo { night: false } => write!(f, "logo"),
            UploadTarget::Logo { night: true } => write!(f, "night-logo"),
        }
    }
}
