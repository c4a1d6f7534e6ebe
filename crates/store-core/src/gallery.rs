//! # Product Gallery State
//!
//! Selection state for the product detail image switcher. Holds a single
//! "currently displayed image", defaulting to the product's primary image.
//! Pure state: no I/O, no persistence.

use crate::product::Product;

/// Image selection state for one product view.
#[derive(Debug, Clone)]
pub struct ProductGallery {
    primary: String,
    secondary: Vec<String>,
    current: String,
}

impl ProductGallery {
    /// Create a gallery for a product, showing its primary image.
    pub fn new(product: &Product) -> Self {
        Self {
            primary: product.image.clone(),
            secondary: product.images.clone(),
            current: product.image.clone(),
        }
    }

    /// The image currently displayed.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Select a thumbnail. Unknown URLs are ignored so a stale click can
    /// never blank the view.
    pub fn select(&mut self, url: &str) {
        if url == self.primary || self.secondary.iter().any(|u| u == url) {
            self.current = url.to_string();
        }
    }

    /// Restore the default (primary) image.
    pub fn select_primary(&mut self) {
        self.current = self.primary.clone();
    }

    /// Whether a thumbnail should render with selection emphasis.
    pub fn is_selected(&self, url: &str) -> bool {
        self.current == url
    }

    /// Thumbnail strip: secondary images first, primary image last so it is
    /// always reachable once another image has been selected.
    pub fn thumbnails(&self) -> impl Iterator<Item = &str> {
        self.secondary
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.primary.as_str()))
    }

    /// Whether there is anything to switch between.
    pub fn has_thumbnails(&self) -> bool {
        !self.secondary.is_empty()
    }
}
