use crate::e2e::helpers;

use helpers::fake_speech::FAKE_AUDIO;
use helpers::fixtures::two_page_pdf;
use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_generated_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .process("story.pdf", two_page_pdf(), "Rachel", "0.7")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let audio_url = response
        .body
        .as_ref()
        .and_then(|b| b.get("audio_url"))
        .and_then(|v| v.as_str())
        .unwrap()
        .to_string();

    let audio = ctx.client.get(&audio_url).await.unwrap();

    audio.assert_status(StatusCode::OK);
    assert_eq!(audio.header("content-type").map(String::as_str), Some("audio/mpeg"));
    assert_eq!(audio.body_bytes, FAKE_AUDIO);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_missing_audio(ctx: &TestContext) {
    let response = ctx.client.get("/audio/nothing_here.mp3").await.unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("File not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_directory_traversal(ctx: &TestContext) {
    // A file outside the audio directory that must stay unreachable
    std::fs::write(ctx.storage_root().join("secret.mp3"), b"secret").unwrap();

    for path in ["/audio/..%2Fsecret.mp3", "/audio/%2Fetc%2Fpasswd"] {
        let response = ctx.client.get(path).await.unwrap();

        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message("Invalid filename");
    }
}
