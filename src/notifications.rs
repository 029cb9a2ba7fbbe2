// src/notifications.rs
use serde_json::{Value, json};
use strum_macros::Display;

/// The two outcomes reported after a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Notification {
    #[strum(serialize = "Product added successfully")]
    ProductAdded,
    #[strum(serialize = "Error adding product")]
    ProductAddFailed,
}

impl Notification {
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Notification::ProductAdded => "success",
            Notification::ProductAddFailed => "error",
        }
    }

    /// Payload for the `HX-Trigger` header picked up by the page's toast
    /// listener.
    pub fn hx_trigger_payload(&self) -> Value {
        json!({
            "showMessage": {
                "message": self.message(),
                "type": self.kind(),
            }
        })
    }
}
