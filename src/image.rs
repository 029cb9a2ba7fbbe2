// src/image.rs
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::models::ImageFile;

/// A preview read that still has to run. `token` identifies the selection it
/// belongs to.
#[derive(Debug, Clone)]
pub struct PreviewRequest {
    pub token: u64,
    pub file: Arc<ImageFile>,
}

/// Selected image plus its inline preview.
///
/// Every selection (including clearing the input) bumps `token`. A finished
/// read is only applied when it carries the current token, so a slow read for
/// an older file can never replace the preview of a newer one.
#[derive(Debug, Default)]
pub struct ImagePicker {
    file: Option<Arc<ImageFile>>,
    preview: Option<Arc<str>>,
    token: u64,
    loading: bool,
}

impl ImagePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self) -> Option<Arc<ImageFile>> {
        self.file.clone()
    }

    pub fn preview(&self) -> Option<Arc<str>> {
        self.preview.clone()
    }

    pub fn token(&self) -> u64 {
        self.token
    }

    /// A file is selected and its read has not reported back yet.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Stores `file` right away and returns the read that will produce its
    /// preview. `None` clears both file and preview.
    pub fn select_file(&mut self, file: Option<ImageFile>) -> Option<PreviewRequest> {
        self.token += 1;
        self.preview = None;
        match file {
            Some(file) => {
                tracing::debug!(
                    "Selected image '{}' ({} bytes), token {}",
                    file.file_name,
                    file.bytes.len(),
                    self.token
                );
                let file = Arc::new(file);
                self.file = Some(Arc::clone(&file));
                self.loading = true;
                Some(PreviewRequest {
                    token: self.token,
                    file,
                })
            }
            None => {
                tracing::debug!("Image input cleared, token {}", self.token);
                self.file = None;
                self.loading = false;
                None
            }
        }
    }

    /// Applies a finished read. Returns `false` when the result was discarded
    /// because a newer selection happened in the meantime.
    pub fn apply_preview(&mut self, token: u64, preview: Option<String>) -> bool {
        if token != self.token || self.file.is_none() {
            tracing::warn!(
                "Discarding stale preview for token {} (current {})",
                token,
                self.token
            );
            return false;
        }
        self.preview = preview.map(Arc::from);
        self.loading = false;
        true
    }

    pub fn clear(&mut self) {
        self.token += 1;
        self.file = None;
        self.preview = None;
        self.loading = false;
    }
}

/// Encodes the file as a `data:` URL suitable for an `<img src>`.
pub fn read_as_data_url(file: &ImageFile) -> String {
    format!("data:{};base64,{}", file.mime_type(), STANDARD.encode(&file.bytes))
}

/// Runs the encode on the blocking pool. `None` means the read failed.
pub async fn load_preview(request: &PreviewRequest) -> Option<String> {
    let file = Arc::clone(&request.file);
    match tokio::task::spawn_blocking(move || read_as_data_url(&file)).await {
        Ok(data_url) => Some(data_url),
        Err(e) => {
            tracing::error!("Preview read for token {} failed: {}", request.token, e);
            None
        }
    }
}
