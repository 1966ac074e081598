//! Listing integration tests.

#[cfg(test)]
mod tests {
    use crate::{cleanup_dir, get, http_client, s3_client, seed, test_dir};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_directories_before_files() {
        let s3 = s3_client();
        let dir = test_dir("listing");
        let keys = [
            format!("{dir}b.mp3"),
            format!("{dir}a.txt"),
            format!("{dir}sub/inner.mp3"),
        ];
        seed(&s3, &keys, b"x").await;

        let (status, headers, body) = get(&http_client(), &format!("/{dir}")).await;

        assert_eq!(status, 200);
        assert_eq!(headers["server"], "narratorfiles");
        assert!(headers.contains_key("x-request-id"));
        let sub = body.find(&format!(r#"href="/{dir}sub/""#)).expect("sub dir");
        let text = body.find(&format!(r#"href="/object/{dir}a.txt""#)).expect("a.txt");
        let audio = body.find(&format!(r#"href="/play/{dir}b.mp3""#)).expect("b.mp3");
        assert!(sub < text && text < audio);

        cleanup_dir(&s3, &dir).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_navigate_into_sub_directory() {
        let s3 = s3_client();
        let dir = test_dir("nested");
        seed(&s3, &[format!("{dir}book/01.mp3")], b"x").await;

        let (status, _, body) = get(&http_client(), &format!("/{dir}book/")).await;

        assert_eq!(status, 200);
        assert!(body.contains(&format!(r#"href="/play/{dir}book/01.mp3""#)));
        assert!(body.contains(&format!(r#"<a href="/{dir}">..</a>"#)));

        cleanup_dir(&s3, &dir).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_page_through_large_directories() {
        let s3 = s3_client();
        let dir = test_dir("paged");
        let keys: Vec<String> = (0..1005).map(|i| format!("{dir}track-{i:04}.mp3")).collect();
        seed(&s3, &keys, b"x").await;

        let (status, _, body) = get(&http_client(), &format!("/{dir}")).await;

        assert_eq!(status, 200);
        assert_eq!(body.matches("/play/").count(), 1005);

        cleanup_dir(&s3, &dir).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_post() {
        let resp = http_client()
            .post(format!("{}/", crate::browser_url()))
            .send()
            .await
            .expect("POST /");

        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers()["allow"], "GET, HEAD");
    }
}
