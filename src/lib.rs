//! Admin "Add Product" form: field state, image preview and the multipart
//! submission to the storefront backend, plus the axum pages that host it.

pub mod client;
pub mod component;
pub mod config;
pub mod errors;
pub mod form;
pub mod handle;
pub mod handlers;
pub mod image;
pub mod models;
pub mod notifications;
pub mod response;
pub mod sessions;
pub mod state;
pub mod views;

pub use client::{PRODUCT_ENDPOINT, ProductClient};
pub use component::{AddProductForm, FormSnapshot};
pub use handle::{FormHandle, spawn_form};
pub use models::{Category, ImageFile, ProductDraft, ProductField};
pub use notifications::Notification;
pub use sessions::FormSessions;
