//! Bundled presentation resources, loaded once at startup.

use crate::assets::StaticAssets;
use crate::error::RenderError;
use crate::render::Templates;

/// Templates and static assets shared by every request.
#[derive(Debug)]
pub struct Resources {
    /// Compiled page templates.
    pub templates: Templates,
    /// Embedded static files.
    pub assets: StaticAssets,
}

impl Resources {
    /// Compile the bundled templates. Fails only if a bundled template is
    /// malformed.
    pub fn load() -> Result<Self, RenderError> {
        let templates = Templates::new()?;
        tracing::debug!(
            assets = StaticAssets.names().count(),
            "loaded templates and static assets"
        );
        Ok(Self {
            templates,
            assets: StaticAssets,
        })
    }
}
