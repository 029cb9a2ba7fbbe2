// src/views.rs

use maud::{DOCTYPE, Markup, PreEscaped, html};
use uuid::Uuid;

use crate::component::FormSnapshot;
use crate::models::{Category, ProductDraft, ProductField};

pub const PAGE_PATH: &str = "/admin/products/new";
/// Prefix of every htmx call; the mounted form's id follows it.
pub const FORM_PATH: &str = "/htmx/admin/products/new";

pub fn availability_path(form_id: &Uuid) -> String {
    format!("{}/{}/availability", FORM_PATH, form_id)
}

pub fn image_path(form_id: &Uuid) -> String {
    format!("{}/{}/image", FORM_PATH, form_id)
}

pub fn submit_path(form_id: &Uuid) -> String {
    format!("{}/{}/submit", FORM_PATH, form_id)
}

fn field_path(form_id: &Uuid, field: ProductField) -> String {
    format!("{}/{}/field/{}", FORM_PATH, form_id, field)
}

// Field updates queue behind each other and behind the submit, so the submit
// never overtakes an edit.
const FORM_SYNC: &str = "closest form:queue all";

// Shows the `showMessage` payload from HX-Trigger as a blocking alert.
const TOAST_SCRIPT: &str = r#"
document.body.addEventListener("showMessage", function (evt) {
    if (evt.detail && evt.detail.message) { alert(evt.detail.message); }
});
"#;

fn text_input(
    form_id: &Uuid,
    column: &str,
    label: &str,
    field: ProductField,
    input_type: &str,
    placeholder: Option<&str>,
    draft: &ProductDraft,
) -> Markup {
    let name = field.to_string();
    html! {
        div class=(column) {
            label ."form-label" for=(name) { (label) }
            input ."form-control"
                id=(name)
                type=(input_type)
                name=(name)
                placeholder=[placeholder]
                value=(draft.get(field))
                hx-post=(field_path(form_id, field))
                hx-trigger="change"
                hx-sync=(FORM_SYNC)
                hx-swap="none";
        }
    }
}

/// Only the preview block, swapped in after an image is picked.
pub fn render_image_preview(snapshot: &FormSnapshot) -> Markup {
    html! {
        div #image-preview {
            @if let Some(name) = &snapshot.image_name {
                small ."form-text d-block" { "Selected: " (name) }
            }
            @if let Some(preview) = &snapshot.preview {
                img ."img-preview" src=(preview.as_ref()) alt="Preview"
                    style="width:150px;height:150px;object-fit:cover;margin-top:10px;border-radius:10px;border:1px solid #ccc";
            }
        }
    }
}

pub fn render_add_product_form(form_id: &Uuid, snapshot: &FormSnapshot) -> Markup {
    let draft = snapshot.draft.as_ref();
    html! {
        form #add-product-form ."row g-3"
            data-form-id=(form_id)
            hx-post=(submit_path(form_id))
            hx-target="this"
            hx-swap="outerHTML"
            hx-sync="this:queue all"
            hx-disabled-elt="find button[type='submit']" {
            (text_input(form_id, "col-md-6", "Name", ProductField::Name, "text", Some("Product Name"), draft))
            (text_input(form_id, "col-md-6", "Brand", ProductField::Brand, "text", Some("Brand Name"), draft))
            (text_input(form_id, "col-12", "Description", ProductField::Description, "text", Some("Product description"), draft))
            (text_input(form_id, "col-md-4", "Price", ProductField::Price, "number", Some("₹ Price"), draft))

            div ."col-md-4" {
                label ."form-label" for="category" { "Category" }
                select #category ."form-select"
                    name="category"
                    hx-post=(field_path(form_id, ProductField::Category))
                    hx-trigger="change"
                    hx-sync=(FORM_SYNC)
                    hx-swap="none" {
                    option value="" selected[draft.category.is_empty()] { "Select category" }
                    @for option in Category::options() {
                        option value=(option) selected[draft.category == option] { (option) }
                    }
                }
            }

            (text_input(form_id, "col-md-4", "Stock Quantity", ProductField::StockQuantity, "number", Some("Available stock"), draft))
            (text_input(form_id, "col-md-6", "Release Date", ProductField::ReleaseDate, "date", None, draft))

            div ."col-md-6" {
                label ."form-label" for="imageFile" { "Product Image" }
                input #imageFile ."form-control"
                    type="file"
                    name="imageFile"
                    hx-post=(image_path(form_id))
                    hx-encoding="multipart/form-data"
                    hx-trigger="change"
                    hx-target="#image-preview"
                    hx-swap="outerHTML";
                (render_image_preview(snapshot))
            }

            div ."col-12" {
                div ."form-check" {
                    input #productAvailable ."form-check-input"
                        type="checkbox"
                        name="productAvailable"
                        checked[draft.product_available]
                        hx-post=(availability_path(form_id))
                        hx-trigger="change"
                        hx-sync=(FORM_SYNC)
                        hx-swap="none";
                    label ."form-check-label" for="productAvailable" { "Product Available" }
                }
            }

            div ."col-12" {
                button ."btn btn-primary w-100" type="submit" disabled[snapshot.submitting] { "Add Product" }
            }
        }
    }
}

/// The card with heading and form. Returned alone for HTMX requests.
pub fn render_add_product_page(form_id: &Uuid, snapshot: &FormSnapshot) -> Markup {
    html! {
        div #admin-content ."card p-4" {
            h3 ."text-center mb-4 fw-bold" { "Add New Product" }
            (render_add_product_form(form_id, snapshot))
        }
    }
}

pub fn page_shell(content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Add New Product" }
                link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
                script src="https://unpkg.com/htmx.org@2.0.4" {}
            }
            body {
                main #content ."container py-5" { (content) }
                script { (PreEscaped(TOAST_SCRIPT)) }
            }
        }
    }
}
