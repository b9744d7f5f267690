// src/render/mod.rs

//! Template rendering seam.
//!
//! Rendering is pure text-in/text-out: the production implementation is a
//! one-off Tera render against the merged context built by
//! [`crate::config::PackageConfig::template_context`]. A render failure
//! (bad syntax, missing key) is a hard failure of the owning stage.

use std::fmt::Debug;

use crate::errors::Result;

/// Renders a text template against a key/value context.
pub trait Renderer: Send + Sync + Debug {
    fn render(&self, template: &str, context: &tera::Context) -> Result<String>;
}

/// Production renderer backed by `Tera::one_off`.
///
/// Autoescape is off: the pipeline renders shell scripts and XML manifests,
/// not untrusted HTML.
#[derive(Debug, Clone, Default)]
pub struct TeraRenderer;

impl Renderer for TeraRenderer {
    fn render(&self, template: &str, context: &tera::Context) -> Result<String> {
        Ok(tera::Tera::one_off(template, context, false)?)
    }
}
