//! Static asset and health endpoint integration tests.

#[cfg(test)]
mod tests {
    use crate::{browser_url, get, http_client};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_serve_and_revalidate_stylesheet() {
        let client = http_client();
        let (status, headers, body) = get(&client, "/static/style.css").await;

        assert_eq!(status, 200);
        assert_eq!(headers["content-type"], "text/css");
        assert!(!body.is_empty());
        let etag = headers["etag"].clone();

        let revalidated = client
            .get(format!("{}/static/style.css", browser_url()))
            .header("if-none-match", etag)
            .send()
            .await
            .expect("conditional GET");
        assert_eq!(revalidated.status(), 304);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_404_for_unknown_asset() {
        let (status, _, _) = get(&http_client(), "/static/nope.js").await;
        assert_eq!(status, 404);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_health() {
        let (status, _, body) = get(&http_client(), "/_health").await;

        assert_eq!(status, 200);
        let json: serde_json::Value = serde_json::from_str(&body).expect("health json");
        assert_eq!(json["status"], "running");
        assert_eq!(json["service"], "narratorfiles");
    }
}
