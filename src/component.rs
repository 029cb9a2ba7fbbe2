// src/component.rs
use std::future::Future;
use std::sync::Arc;

use crate::client::ProductClient;
use crate::errors::{FormError, SubmitError};
use crate::form::FormState;
use crate::image::{ImagePicker, PreviewRequest};
use crate::models::{ImageFile, ProductDraft, ProductField};
use crate::notifications::Notification;

/// What the view needs to render the form at one point in time.
#[derive(Debug, Clone, Default)]
pub struct FormSnapshot {
    pub draft: Arc<ProductDraft>,
    pub image_name: Option<String>,
    pub preview: Option<Arc<str>>,
    pub preview_loading: bool,
    pub submitting: bool,
    pub notification: Option<Notification>,
}

/// The "Add Product" form: draft fields, selected image and the submission
/// round trip to the backend.
#[derive(Debug)]
pub struct AddProductForm {
    form: FormState,
    image: ImagePicker,
    client: ProductClient,
    in_flight: usize,
    last_notification: Option<Notification>,
}

impl AddProductForm {
    pub fn new(client: ProductClient) -> Self {
        Self {
            form: FormState::new(),
            image: ImagePicker::new(),
            client,
            in_flight: 0,
            last_notification: None,
        }
    }

    pub fn draft(&self) -> Arc<ProductDraft> {
        self.form.draft()
    }

    pub fn image(&self) -> Option<Arc<ImageFile>> {
        self.image.file()
    }

    pub fn preview(&self) -> Option<Arc<str>> {
        self.image.preview()
    }

    pub fn set_field(&mut self, field: ProductField, value: impl Into<String>) {
        self.form.set_field(field, value);
    }

    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        self.form.set_field_by_name(name, value)
    }

    pub fn set_available(&mut self, available: bool) {
        self.form.set_available(available);
    }

    pub fn select_file(&mut self, file: Option<ImageFile>) -> Option<PreviewRequest> {
        self.image.select_file(file)
    }

    pub fn apply_preview(&mut self, token: u64, preview: Option<String>) -> bool {
        self.image.apply_preview(token, preview)
    }

    /// Captures the current draft and image and returns the request future.
    /// The future owns everything it needs, so the form can keep changing
    /// while it is pending.
    pub fn begin_submit(&mut self) -> impl Future<Output = Result<(), SubmitError>> + Send + use<> {
        self.in_flight += 1;
        let draft = self.form.draft();
        let image = self.image.file();
        let client = self.client.clone();
        tracing::info!(
            "Submitting product '{}' ({} request(s) in flight)",
            draft.name,
            self.in_flight
        );
        async move { client.create_product(&draft, image.as_deref()).await }
    }

    /// Applies the response: success clears everything, failure keeps the
    /// form as it is so the admin can retry.
    pub fn finish_submit(&mut self, result: Result<(), SubmitError>) -> Notification {
        self.in_flight = self.in_flight.saturating_sub(1);
        let notification = match result {
            Ok(()) => {
                self.form.reset();
                self.image.clear();
                Notification::ProductAdded
            }
            Err(e) => {
                tracing::warn!("Product submission failed: {}", e);
                Notification::ProductAddFailed
            }
        };
        tracing::info!("Submission finished: {}", notification);
        self.last_notification = Some(notification);
        notification
    }

    pub async fn submit(&mut self) -> Notification {
        let result = self.begin_submit().await;
        self.finish_submit(result)
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            draft: self.form.draft(),
            image_name: self.image.file().map(|f| f.file_name.clone()),
            preview: self.image.preview(),
            preview_loading: self.image.is_loading(),
            submitting: self.in_flight > 0,
            notification: self.last_notification,
        }
    }
}
