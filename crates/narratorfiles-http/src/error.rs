//! Handler errors and their HTTP status mapping.

use http::{Method, StatusCode};
use narratorfiles_core::BrowseError;

/// Template registration or rendering failure.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A bundled template failed to parse. Only possible at startup.
    #[error("failed to register template {name}: {source}")]
    Register {
        /// Template name.
        name: &'static str,
        /// Parser error.
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    /// Rendering a registered template failed.
    #[error("failed to render template {name}: {source}")]
    Render {
        /// Template name.
        name: &'static str,
        /// Renderer error.
        #[source]
        source: Box<handlebars::RenderError>,
    },
}

/// Any error a request handler can end with.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Listing, presigning, or media-type failure from the browsing core.
    #[error(transparent)]
    Browse(#[from] BrowseError),

    /// Template rendering failure.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The method is not served by this application.
    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),

    /// No such route or asset.
    #[error("not found")]
    NotFound,
}

impl HandlerError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Browse(BrowseError::UnsupportedMedia { .. }) | Self::NotFound => {
                StatusCode::NOT_FOUND
            }
            Self::Browse(BrowseError::List { .. } | BrowseError::Access { .. })
            | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}
