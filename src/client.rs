// src/client.rs

use reqwest::{Client, multipart};

use crate::errors::SubmitError;
use crate::models::{ImageFile, ProductDraft};

/// Product-creation endpoint of the storefront backend.
pub const PRODUCT_ENDPOINT: &str = "http://localhost:8080/api/product";

pub const IMAGE_PART: &str = "imageFile";
pub const PRODUCT_PART: &str = "product";

/// Thin wrapper over `reqwest` that knows how to post a new product.
#[derive(Debug, Clone)]
pub struct ProductClient {
    http: Client,
    endpoint: String,
}

impl Default for ProductClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductClient {
    pub fn new() -> Self {
        Self::with_endpoint(PRODUCT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One POST, no retries. Any 2xx is success; the body is ignored.
    pub async fn create_product(
        &self,
        draft: &ProductDraft,
        image: Option<&ImageFile>,
    ) -> Result<(), SubmitError> {
        // Step 1: image part plus the draft as a JSON part
        let form = build_form(draft, image)?;

        tracing::info!(
            "Posting product '{}' to {} (image: {:?})",
            draft.name,
            self.endpoint,
            image.map(|i| i.file_name.as_str())
        );

        // Step 2: one POST; reqwest sets `multipart/form-data; boundary=...` for us
        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await;

        // Step 3: only the status decides, the body is never read
        match response {
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    tracing::info!("Backend accepted product '{}' ({})", draft.name, status);
                    Ok(())
                } else {
                    tracing::warn!("Backend rejected product '{}': status={}", draft.name, status);
                    Err(SubmitError::Status(status))
                }
            }
            Err(e) => {
                tracing::error!("Network error while posting product: {}", e);
                Err(SubmitError::Network(e))
            }
        }
    }
}

/// Builds the two-part payload: the image bytes and the draft as JSON.
///
/// When no image is selected the `imageFile` part is still sent, empty and
/// without a file name, so the backend decides what to do with it.
pub fn build_form(
    draft: &ProductDraft,
    image: Option<&ImageFile>,
) -> Result<multipart::Form, SubmitError> {
    // The browser always sends the file input, even when nothing is picked.
    let image_part = match image {
        Some(file) => multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type())
            .map_err(SubmitError::Multipart)?,
        None => multipart::Part::bytes(Vec::new())
            .mime_str("application/octet-stream")
            .map_err(SubmitError::Multipart)?,
    };

    // Numeric fields are already strings in the draft and stay that way.
    let product_json = serde_json::to_string(draft)?;
    let product_part = multipart::Part::text(product_json)
        .file_name("blob")
        .mime_str("application/json")
        .map_err(SubmitError::Multipart)?;

    Ok(multipart::Form::new()
        .part(IMAGE_PART, image_part)
        .part(PRODUCT_PART, product_part))
}
