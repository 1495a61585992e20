use crate::file::SelectedFile;

/// Image types the server-side thumbnailer accepts. Kept in sync with the
/// server allow-list; comparisons are case-sensitive.
pub const SUPPORTED_IMAGE_TYPES: [&str; 7] = [
    "image/avif",
    "image/gif",
    "image/heic",
    "image/jpeg",
    "image/png",
    "image/tiff",
    "image/webp",
];

/// Why a selection was refused. Recoverable user-input errors, surfaced as
/// inline text near the control; never propagated as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    TooLarge { limit_mib: u32 },
    UnsupportedType,
    TooManyFiles,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::TooLarge { limit_mib } => {
                write!(f, "File size must be at most {limit_mib} MiB.")
            }
            RejectReason::UnsupportedType => write!(f, "File type is not supported."),
            RejectReason::TooManyFiles => write!(f, "Please just upload one file."),
        }
    }
}

/// Classification of a raw selection list.
#[derive(Debug, Clone)]
pub enum SelectionOutcome {
    /// The user dismissed the file dialog; not a rejection.
    NoSelection,
    Rejected(RejectReason),
    Accepted(SelectedFile),
}

pub fn is_supported_image_type(file: &SelectedFile) -> bool {
    match file.mime_type.as_deref() {
        Some(mime) => SUPPORTED_IMAGE_TYPES.contains(&mime),
        None => false,
    }
}

/// Pure predicate over a raw selection list and the configured size ceiling.
/// Same inputs always yield the same classification; no side effects.
pub fn validate_selection(files: &[SelectedFile], max_upload_mib: u32) -> SelectionOutcome {
    match files {
        [] => SelectionOutcome::NoSelection,
        [file] => validate_single(file, max_upload_mib),
        _ => SelectionOutcome::Rejected(RejectReason::TooManyFiles),
    }
}

fn validate_single(file: &SelectedFile, max_upload_mib: u32) -> SelectionOutcome {
    let ceiling = u64::from(max_upload_mib) * 1024 * 1024;
    if file.size_bytes() > ceiling {
        return SelectionOutcome::Rejected(RejectReason::TooLarge {
            limit_mib: max_upload_mib,
        });
    }
    if !is_supported_image_type(file) {
        return SelectionOutcome::Rejected(RejectReason::UnsupportedType);
    }
    SelectionOutcome::Accepted(file.clone())
}
