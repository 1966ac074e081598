//! The browsing handler: routes a request to the core and renders the result.

use std::sync::Arc;

use narratorfiles_core::{ObjectBrowser, ObjectStore};
use tracing::{debug, error, warn};

use crate::body::BrowserBody;
use crate::dispatch::{HandlerFuture, RequestHandler};
use crate::error::HandlerError;
use crate::resources::Resources;
use crate::response::{error_to_response, health_check_response, html_response, redirect_response};
use crate::router::{Route, resolve};

/// Serves listings, download redirects, player pages, and static assets for
/// one [`ObjectBrowser`].
#[derive(Debug)]
pub struct BrowserHandler<S: ObjectStore> {
    browser: Arc<ObjectBrowser<S>>,
    resources: Arc<Resources>,
}

impl<S: ObjectStore> BrowserHandler<S> {
    /// Create a handler over a shared browser and loaded resources.
    #[must_use]
    pub fn new(browser: Arc<ObjectBrowser<S>>, resources: Arc<Resources>) -> Self {
        Self { browser, resources }
    }
}

impl<S: ObjectStore> Clone for BrowserHandler<S> {
    fn clone(&self) -> Self {
        Self {
            browser: Arc::clone(&self.browser),
            resources: Arc::clone(&self.resources),
        }
    }
}

impl<S: ObjectStore> RequestHandler for BrowserHandler<S> {
    fn handle(&self, parts: http::request::Parts) -> HandlerFuture {
        let this = self.clone();
        Box::pin(async move {
            match this.route(&parts).await {
                Ok(response) => response,
                Err(err) => {
                    if err.status_code().is_server_error() {
                        error!(error = %err, "request failed");
                    } else {
                        debug!(error = %err, "request rejected");
                    }
                    error_to_response(&err)
                }
            }
        })
    }
}

impl<S: ObjectStore> BrowserHandler<S> {
    async fn route(
        &self,
        parts: &http::request::Parts,
    ) -> Result<http::Response<BrowserBody>, HandlerError> {
        let route = resolve(&parts.method, parts.uri.path())?;
        debug!(?route, "resolved route");

        match route {
            Route::Health => Ok(health_check_response()),
            Route::Static { path } => self.resources.assets.response(&path, &parts.headers),
            Route::Listing { sub_path } => {
                let prefix = self.browser.effective_prefix(&sub_path);
                let entries = self.browser.list(&prefix).await?;
                let html = self.resources.templates.render_listing(&sub_path, &entries)?;
                Ok(html_response(html))
            }
            Route::Download { key } => {
                let access = self.browser.download_url(&key).await?;
                Ok(redirect_response(&access.url))
            }
            Route::Play { key } => {
                let view = match self.browser.playback_view(&key).await {
                    Ok(view) => view,
                    Err(err) => {
                        warn!(key = %key, error = %err, "cannot play object");
                        return Err(err.into());
                    }
                };
                let html = self.resources.templates.render_playback(&view)?;
                Ok(html_response(html))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use http::StatusCode;
    use narratorfiles_core::{ListPage, StoreError};

    use super::*;
    use crate::body::collect_bytes;

    #[derive(Debug, Default)]
    struct MemoryStore {
        keys: Vec<String>,
        fail_listing: bool,
        listed: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ObjectStore for MemoryStore {
        async fn list_page(
            &self,
            prefix: &str,
            delimiter: &str,
            _continuation: Option<String>,
        ) -> Result<ListPage, StoreError> {
            self.listed.lock().expect("lock").push(prefix.to_owned());
            if self.fail_listing {
                return Err(StoreError::Sdk("bucket does not exist".to_owned()));
            }
            let mut page = ListPage::default();
            for key in self.keys.iter().filter(|k| k.starts_with(prefix)) {
                let rest = &key[prefix.len()..];
                match rest.find(delimiter) {
                    Some(pos) => {
                        let dir = format!("{prefix}{}", &rest[..=pos]);
                        if !page.common_prefixes.contains(&dir) {
                            page.common_prefixes.push(dir);
                        }
                    }
                    None => page.keys.push(key.clone()),
                }
            }
            Ok(page)
        }

        async fn presign_get(
            &self,
            key: &str,
            expires_in: Duration,
        ) -> Result<String, StoreError> {
            Ok(format!(
                "https://store.test/audiobooks/{key}?X-Amz-Expires={}",
                expires_in.as_secs()
            ))
        }
    }

    fn handler_with(store: MemoryStore, prefix: &str) -> (BrowserHandler<MemoryStore>, Arc<MemoryStore>) {
        let store = Arc::new(store);
        let browser = ObjectBrowser::from_shared(Arc::clone(&store), prefix, Duration::from_secs(5));
        let resources = Resources::load().expect("resources");
        (
            BrowserHandler::new(Arc::new(browser), Arc::new(resources)),
            store,
        )
    }

    fn store(keys: &[&str]) -> MemoryStore {
        MemoryStore {
            keys: keys.iter().map(|k| (*k).to_owned()).collect(),
            ..MemoryStore::default()
        }
    }

    fn request(method: http::Method, path: &str) -> http::request::Parts {
        http::Request::builder()
            .method(method)
            .uri(path)
            .body(())
            .expect("request")
            .into_parts()
            .0
    }

    async fn get(handler: &BrowserHandler<MemoryStore>, path: &str) -> (StatusCode, http::HeaderMap, String) {
        let resp = handler.handle(request(http::Method::GET, path)).await;
        let (parts, body) = resp.into_parts();
        let body = collect_bytes(body).await;
        (
            parts.status,
            parts.headers,
            String::from_utf8(body.to_vec()).expect("utf-8 body"),
        )
    }

    #[tokio::test]
    async fn test_should_render_root_listing() {
        let (handler, _) = handler_with(store(&["sub/x.mp3", "a.txt", "b.mp3"]), "");
        let (status, headers, body) = get(&handler, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["content-type"], "text/html; charset=utf-8");
        assert!(body.contains(r#"href="/sub/""#));
        assert!(body.contains(r#"href="/object/a.txt""#));
        assert!(body.contains(r#"href="/play/b.mp3""#));
    }

    #[tokio::test]
    async fn test_should_list_sub_path_under_configured_prefix() {
        let (handler, store) = handler_with(store(&["media/books/01.mp3"]), "media");
        let (status, _, body) = get(&handler, "/books/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(store.listed.lock().expect("lock").as_slice(), ["media/books/"]);
        assert!(body.contains(r#"href="/play/books/01.mp3""#));
    }

    #[tokio::test]
    async fn test_should_report_listing_failure_as_plaintext_500() {
        let failing = MemoryStore {
            fail_listing: true,
            ..MemoryStore::default()
        };
        let (handler, _) = handler_with(failing, "");
        let (status, headers, body) = get(&handler, "/").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(headers["content-type"], "text/plain; charset=utf-8");
        assert!(body.contains("bucket does not exist"));
    }

    #[tokio::test]
    async fn test_should_redirect_downloads_to_presigned_url() {
        let (handler, _) = handler_with(store(&[]), "media/");
        let (status, headers, _) = get(&handler, "/object/books/cover.jpg").await;

        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            headers["location"],
            "https://store.test/audiobooks/media/books/cover.jpg?X-Amz-Expires=900"
        );
    }

    #[tokio::test]
    async fn test_should_render_player_for_audio() {
        let (handler, _) = handler_with(store(&[]), "");
        let (status, _, body) = get(&handler, "/play/books/01.m4a").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<audio"));
        assert!(body.contains(r#"type="audio/mp4""#));
    }

    #[tokio::test]
    async fn test_should_refuse_to_play_non_audio() {
        let (handler, _) = handler_with(store(&[]), "");
        let (status, _, body) = get(&handler, "/play/notes.pdf").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "File not supported\n");
    }

    #[tokio::test]
    async fn test_should_serve_static_assets_and_health() {
        let (handler, _) = handler_with(store(&[]), "");

        let (status, headers, _) = get(&handler, "/static/style.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["content-type"], "text/css");

        let (status, _, _) = get(&handler, "/static/missing.css").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, body) = get(&handler, "/_health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("narratorfiles"));
    }

    #[tokio::test]
    async fn test_should_reject_unsupported_methods() {
        let (handler, store) = handler_with(store(&[]), "");
        let resp = handler.handle(request(http::Method::DELETE, "/a.txt")).await;

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert!(store.listed.lock().expect("lock").is_empty());
    }
}
