//! Download redirect and playback integration tests.

#[cfg(test)]
mod tests {
    use crate::{cleanup_dir, get, http_client, s3_client, seed, test_dir};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_redirect_to_working_presigned_url() {
        let s3 = s3_client();
        let dir = test_dir("download");
        seed(&s3, &[format!("{dir}notes.txt")], b"chapter one").await;

        let client = http_client();
        let (status, headers, _) = get(&client, &format!("/object/{dir}notes.txt")).await;

        assert_eq!(status, 307);
        let location = headers["location"].to_str().expect("location").to_owned();
        assert!(location.contains("X-Amz-Signature="));
        assert!(location.contains("X-Amz-Expires=900"));

        let fetched = client
            .get(&location)
            .send()
            .await
            .expect("presigned GET")
            .text()
            .await
            .expect("body");
        assert_eq!(fetched, "chapter one");

        cleanup_dir(&s3, &dir).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_redirect_for_missing_key() {
        let (status, headers, _) = get(&http_client(), "/object/it-missing/never-uploaded.bin").await;

        assert_eq!(status, 307);
        assert!(headers.contains_key("location"));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_render_player_for_audio() {
        let s3 = s3_client();
        let dir = test_dir("play");
        seed(&s3, &[format!("{dir}01.flac")], b"fLaC").await;

        let (status, headers, body) = get(&http_client(), &format!("/play/{dir}01.flac")).await;

        assert_eq!(status, 200);
        assert_eq!(headers["content-type"], "text/html; charset=utf-8");
        assert!(body.contains("<audio"));
        assert!(body.contains(r#"type="audio/flac""#));

        cleanup_dir(&s3, &dir).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_refuse_to_play_non_audio() {
        let (status, _, body) = get(&http_client(), "/play/it-missing/readme.pdf").await;

        assert_eq!(status, 404);
        assert_eq!(body, "File not supported\n");
    }
}
