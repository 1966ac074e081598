//! HTTP front-end for narratorfiles: routing, HTML rendering, embedded static
//! assets, and the hyper service.
//!
//! - **Routing** ([`router`]): maps a method and path to a [`Route`], and
//!   builds the percent-encoded links the pages point at.
//!
//! - **Rendering** ([`render`]): handlebars templates for the listing and
//!   player pages, bundled into the binary.
//!
//! - **Assets** ([`assets`]): the embedded `static/` directory, served with
//!   ETag revalidation.
//!
//! - **Handler** ([`handler`]): the [`BrowserHandler`] that calls into
//!   `narratorfiles-core` and turns its results into responses.
//!
//! - **Middleware** ([`middleware`]): request tracing and panic isolation,
//!   both wrapping any [`RequestHandler`].
//!
//! - **Service** ([`service`]): the hyper-facing [`HttpService`].
//!
//! # Architecture
//!
//! ```text
//! HTTP Request
//!   -> HttpService (hyper Service, Server header)
//!     -> TraceRequests (span, request id, latency log)
//!       -> CatchPanic
//!         -> BrowserHandler
//!           -> router::resolve
//!           -> ObjectBrowser (list / presign)
//!           -> Templates / StaticAssets
//!   <- HTTP Response
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use narratorfiles_core::{ObjectBrowser, S3Store, StoreConfig};
//! use narratorfiles_http::{BrowserHandler, CatchPanic, HttpService, Resources, TraceRequests};
//!
//! let config = StoreConfig::from_env().expect("store config");
//! let browser = ObjectBrowser::new(S3Store::new(&config), &config.key_prefix, Duration::from_secs(30));
//! let resources = Resources::load().expect("bundled templates");
//! let handler = BrowserHandler::new(Arc::new(browser), Arc::new(resources));
//! let service = HttpService::new(TraceRequests::new(CatchPanic::new(handler)));
//! // Use `service` with hyper server.
//! ```

pub mod assets;
pub mod body;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod render;
pub mod resources;
pub mod response;
pub mod router;
pub mod service;

pub use assets::{StaticAsset, StaticAssets};
pub use body::BrowserBody;
pub use dispatch::{HandlerFuture, RequestHandler};
pub use error::{HandlerError, RenderError};
pub use handler::BrowserHandler;
pub use middleware::{CatchPanic, REQUEST_ID_HEADER, TraceRequests};
pub use render::Templates;
pub use resources::Resources;
pub use router::{Route, resolve};
pub use service::{HttpService, SERVER_NAME};
