use std::collections::HashMap;
use std::io::Cursor;
use std::rc::Rc;

use crate::file::SelectedFile;

/// Handle to a transient displayable resource, in the manner of a browser
/// object URL. Holders must revoke it when done; the registry tracks what is
/// still live so leaks are observable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Allocator for preview URLs backed by the selected file's bytes.
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    next_id: u64,
    live: HashMap<ObjectUrl, Rc<[u8]>>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, file: &SelectedFile) -> ObjectUrl {
        let url = ObjectUrl(format!("blob:picport/{}", self.next_id));
        self.next_id += 1;
        self.live.insert(url.clone(), Rc::clone(&file.data));
        url
    }

    /// Revoking an already-revoked URL is a no-op.
    pub fn revoke(&mut self, url: &ObjectUrl) {
        if self.live.remove(url).is_none() {
            tracing::debug!(url = %url, "revoke of unknown or already-revoked object url");
        }
    }

    pub fn is_live(&self, url: &ObjectUrl) -> bool {
        self.live.contains_key(url)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

/// Displayable preview for an accepted file. Dimensions are a best-effort
/// header probe; a probe failure still yields a usable preview.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub url: ObjectUrl,
    pub dimensions: Option<(u32, u32)>,
}

pub fn build_preview(registry: &mut ObjectUrlRegistry, file: &SelectedFile) -> PreviewImage {
    let url = registry.create(file);
    let dimensions = probe_dimensions(&file.data);
    if dimensions.is_none() {
        tracing::debug!(name = %file.name, "could not probe preview dimensions");
    }
    PreviewImage { url, dimensions }
}

fn probe_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}
