use std::time::SystemTime;

use crate::file::{CommittedFile, EditedResult, SelectedFile, UploadTarget};

/// Callback that persists the final file. The only effect boundary of the
/// whole pipeline; invoked at most once per session.
pub type CommitFn = Box<dyn FnMut(CommittedFile, UploadTarget)>;

/// Rebuild a plain file value from a finished edit: the original file's name,
/// the edited payload's bytes and MIME type, and a fresh timestamp.
pub fn reassemble(original: &SelectedFile, edited: EditedResult) -> CommittedFile {
    reassemble_at(original, edited, SystemTime::now())
}

pub fn reassemble_at(
    original: &SelectedFile,
    edited: EditedResult,
    last_modified: SystemTime,
) -> CommittedFile {
    CommittedFile {
        name: original.name.clone(),
        mime_type: edited.mime_type,
        data: edited.data,
        last_modified,
    }
}
