//! Host templating engine contract
//!
//! Variable substitution and control flow live outside this system.
//! The pipeline extracts part text, hands it to the host, and
//! consumes the rendered string; everything the host needs is in the
//! [`RenderContext`](crate::context::RenderContext).

use crate::context::RenderContext;
use crate::error::EngineResult;

/// The external engine that renders extracted part text
pub trait HostEngine {
    /// Render template source against a context, returning the
    /// substituted text (which may still carry sentinel markers)
    fn render(&self, source: &str, context: &RenderContext) -> EngineResult<String>;
}
