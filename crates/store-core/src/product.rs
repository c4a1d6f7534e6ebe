//! # Product Types
//!
//! Product shape as served to the product detail view: a primary image plus
//! an optional secondary image collection.

use serde::{Deserialize, Serialize};

/// A product on the storefront
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Primary image URL (the gallery default)
    pub image: String,

    /// Secondary image URLs
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: image.into(),
            images: Vec::new(),
        }
    }

    /// Builder: add a secondary image
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }
}
