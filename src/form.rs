// src/form.rs
use std::str::FromStr;
use std::sync::Arc;

use crate::errors::FormError;
use crate::models::{ProductDraft, ProductField};

/// Holds the current [`ProductDraft`]. Every update swaps in a fresh `Arc`, so
/// holders of an older snapshot keep seeing the old values and can detect a
/// change with `Arc::ptr_eq`.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    draft: Arc<ProductDraft>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> Arc<ProductDraft> {
        Arc::clone(&self.draft)
    }

    pub fn set_field(&mut self, field: ProductField, value: impl Into<String>) {
        let value = value.into();
        tracing::debug!("Field {} set to '{}'", field, value);
        self.draft = Arc::new(self.draft.with_field(field, value));
    }

    /// Same as [`FormState::set_field`] but takes the input's `name` attribute.
    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field = ProductField::from_str(name).map_err(|_| {
            tracing::warn!("Rejected update for unknown field '{}'", name);
            FormError::UnknownField(name.to_string())
        })?;
        self.set_field(field, value);
        Ok(())
    }

    pub fn set_available(&mut self, available: bool) {
        tracing::debug!("productAvailable set to {}", available);
        self.draft = Arc::new(self.draft.with_available(available));
    }

    pub fn reset(&mut self) {
        self.draft = Arc::new(ProductDraft::default());
    }
}
