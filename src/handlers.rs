// src/handlers.rs
use std::collections::HashMap;

use axum::{
    Form, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    routing::{get, post},
};
use maud::Markup;
use strum::IntoEnumIterator;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::client::IMAGE_PART;
use crate::errors::AppError;
use crate::handle::FormHandle;
use crate::models::{ImageFile, ProductField};
use crate::response::{AppResponse, build_response};
use crate::state::AppState;
use crate::views::{
    FORM_PATH, PAGE_PATH, render_add_product_form, render_add_product_page, render_image_preview,
};

const AVAILABLE_PARAM: &str = "productAvailable";

pub fn router(app_state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route(PAGE_PATH, get(add_product_page_handler))
        .route(
            &format!("{}/{{form_id}}/field/{{field}}", FORM_PATH),
            post(update_field_htmx_handler),
        )
        .route(
            &format!("{}/{{form_id}}/availability", FORM_PATH),
            post(update_availability_htmx_handler),
        )
        .route(
            &format!("{}/{{form_id}}/image", FORM_PATH),
            post(select_image_htmx_handler),
        )
        .route(
            &format!("{}/{{form_id}}/submit", FORM_PATH),
            post(submit_product_htmx_handler),
        )
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(app_state)
}

async fn mounted_form(app_state: &AppState, form_id: Uuid) -> Result<FormHandle, AppError> {
    app_state.forms.get(&form_id).await.ok_or_else(|| {
        tracing::warn!("Product form {} is not mounted (expired?)", form_id);
        AppError::NotFound(format!(
            "Product form {} is no longer open, reload the page",
            form_id
        ))
    })
}

// Unchecked checkboxes are not submitted at all.
fn is_checked(value: Option<&String>) -> bool {
    value.is_some_and(|v| v == "on" || v.eq_ignore_ascii_case("true"))
}

/// Every page load mounts a fresh, empty form.
pub async fn add_product_page_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
) -> AppResponse {
    let (form_id, form) = app_state.forms.mount().await;
    tracing::info!("GET {} - rendering product form {}", PAGE_PATH, form_id);
    build_response(&headers, render_add_product_page(&form_id, &form.snapshot()))
}

/// The posted body is the whole form; only the key named in the path is used.
/// A missing key sets the field to the empty string.
pub async fn update_field_htmx_handler(
    State(app_state): State<AppState>,
    Path((form_id, field)): Path<(Uuid, String)>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<StatusCode, AppError> {
    let form = mounted_form(&app_state, form_id).await?;
    let value = params.get(&field).cloned().unwrap_or_default();
    form.set_field(&field, value).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_availability_htmx_handler(
    State(app_state): State<AppState>,
    Path(form_id): Path<Uuid>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<StatusCode, AppError> {
    let form = mounted_form(&app_state, form_id).await?;
    form.set_available(is_checked(params.get(AVAILABLE_PARAM)))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn select_image_htmx_handler(
    State(app_state): State<AppState>,
    Path(form_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Markup, AppError> {
    let form = mounted_form(&app_state, form_id).await?;
    let mut selected: Option<ImageFile> = None;

    // The enclosing form's text inputs come along too; only the file matters.
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_PART) {
            continue;
        }
        // A cleared input still sends the part, with an empty file name.
        let file_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(|name| name.to_string());
        let content_type = field.content_type().map(|s| s.to_string());
        let bytes = field.bytes().await?;

        match file_name {
            Some(file_name) => {
                tracing::info!(
                    "Received image '{}' ({} bytes, {:?})",
                    file_name,
                    bytes.len(),
                    content_type
                );
                selected = Some(ImageFile::new(file_name, content_type, bytes.to_vec()));
            }
            None => {
                tracing::debug!("'{}' part without a file name, input cleared", IMAGE_PART);
                selected = None;
            }
        }
    }

    // Store the file, then answer once its preview read has finished.
    form.select_file(selected).await?;
    let snapshot = form.preview_settled().await?;
    Ok(render_image_preview(&snapshot))
}

/// Applies the values that came with the submit, so an edit whose own
/// `change` request has not landed yet still makes it into the payload.
async fn apply_posted_fields(
    form: &FormHandle,
    params: &HashMap<String, String>,
) -> Result<(), AppError> {
    if params.is_empty() {
        return Ok(());
    }
    for field in ProductField::iter() {
        if let Some(value) = params.get(&field.to_string()) {
            if form.snapshot().draft.get(field) != value.as_str() {
                tracing::debug!("Submit carries a newer '{}'", field);
                form.set_field(&field.to_string(), value.as_str()).await?;
            }
        }
    }
    let available = is_checked(params.get(AVAILABLE_PARAM));
    if form.snapshot().draft.product_available != available {
        form.set_available(available).await?;
    }
    Ok(())
}

pub async fn submit_product_htmx_handler(
    State(app_state): State<AppState>,
    Path(form_id): Path<Uuid>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<(HeaderMap, Markup), AppError> {
    tracing::info!("POST submit for product form {}", form_id);
    let form = mounted_form(&app_state, form_id).await?;

    // Step 1: bring the draft up to date with the submitted form body
    apply_posted_fields(&form, &params).await?;

    // Step 2: send it and wait for the backend's answer
    let notification = form.submit().await?;

    // Step 3: the toast rides along in HX-Trigger, the form is re-rendered
    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(&notification.hx_trigger_payload().to_string()) {
        Ok(val) => {
            headers.insert("HX-Trigger", val);
        }
        Err(e) => tracing::error!("Cannot encode HX-Trigger for '{}': {}", notification, e),
    }
    Ok((headers, render_add_product_form(&form_id, &form.snapshot())))
}

pub async fn health_check() -> &'static str {
    "ok"
}
