// src/models.rs
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Product categories offered by the category select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Category {
    Laptop,
    Headphone,
    Mobile,
    Electronics,
    Toys,
    Fashion,
}

impl Category {
    /// Values rendered as `<option>`s after the empty placeholder.
    pub fn options() -> Vec<String> {
        Category::iter().map(|c| c.to_string()).collect()
    }
}

/// Text-valued fields of a [`ProductDraft`]. `productAvailable` is not listed
/// here, it has its own boolean update path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
pub enum ProductField {
    #[strum(serialize = "name")]
    Name,
    #[strum(serialize = "brand")]
    Brand,
    #[strum(serialize = "description")]
    Description,
    #[strum(serialize = "price")]
    Price,
    #[strum(serialize = "category")]
    Category,
    #[strum(serialize = "stockQuantity")]
    StockQuantity,
    #[strum(serialize = "releaseDate")]
    ReleaseDate,
}

/// Everything the admin has typed so far. Numeric fields stay as the raw
/// input text and are sent to the backend unparsed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub brand: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub stock_quantity: String,
    pub release_date: String,
    pub product_available: bool,
}

impl ProductDraft {
    pub fn get(&self, field: ProductField) -> &str {
        match field {
            ProductField::Name => &self.name,
            ProductField::Brand => &self.brand,
            ProductField::Description => &self.description,
            ProductField::Price => &self.price,
            ProductField::Category => &self.category,
            ProductField::StockQuantity => &self.stock_quantity,
            ProductField::ReleaseDate => &self.release_date,
        }
    }

    /// Copy of `self` with exactly one text field replaced.
    pub fn with_field(&self, field: ProductField, value: impl Into<String>) -> ProductDraft {
        let mut next = self.clone();
        let value = value.into();
        match field {
            ProductField::Name => next.name = value,
            ProductField::Brand => next.brand = value,
            ProductField::Description => next.description = value,
            ProductField::Price => next.price = value,
            ProductField::Category => next.category = value,
            ProductField::StockQuantity => next.stock_quantity = value,
            ProductField::ReleaseDate => next.release_date = value,
        }
        next
    }

    /// Copy of `self` with only the availability flag replaced.
    pub fn with_available(&self, available: bool) -> ProductDraft {
        ProductDraft {
            product_available: available,
            ..self.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ProductDraft::default()
    }
}

/// A file picked in the image input, held in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// Declared content type, falling back to a guess from the extension.
    pub fn mime_type(&self) -> String {
        if let Some(ct) = self.content_type.as_deref().filter(|ct| !ct.is_empty()) {
            return ct.to_string();
        }
        let extension = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "svg" => "image/svg+xml",
            "bmp" => "image/bmp",
            _ => "application/octet-stream",
        }
        .to_string()
    }
}
