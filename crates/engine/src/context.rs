//! Render context
//!
//! The data handed to the host templating engine for one render:
//! named variables plus the images the template may embed. Nothing in
//! here is shared between renders.

use serde_json::Value;
use std::collections::BTreeMap;

/// One image supplied by the caller for embedding
#[derive(Debug, Clone)]
pub struct ImageSpec {
    /// Media file name inside the package; must be unique per render
    pub name: String,
    /// Raw image bytes
    pub content: Vec<u8>,
    /// Optional max-width dimension string ("12pt", "3cm", ...)
    pub width: Option<String>,
    /// Optional max-height dimension string
    pub height: Option<String>,
}

impl ImageSpec {
    /// An image with no size constraints (auto-fit to the page box)
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
            width: None,
            height: None,
        }
    }
}

/// Variables and images for one render call
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    /// Named template variables
    pub vars: BTreeMap<String, Value>,
    /// Images keyed by their media name
    pub images: BTreeMap<String, ImageSpec>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variable insert
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Builder-style image insert, keyed by the image's name
    pub fn with_image(mut self, image: ImageSpec) -> Self {
        self.images.insert(image.name.clone(), image);
        self
    }
}
