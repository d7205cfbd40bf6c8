use crate::e2e::helpers;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use helpers::{TestContext, STUB_AUDIO, UNKNOWN_VOICE};
use hyper::StatusCode;
use regex::Regex;
use serde_json::json;
use test_context::test_context;
use tts_studio_backend::domain::tts::{
    lookup_preview_sentence,
    provider::{AudioEncoding, SynthesisInput},
    SynthesizeResponse,
};

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_preview_a_voice_with_the_language_sentence(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/preview-voice", &json!({"language": "fr-FR", "voice": "Aoede"}))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["audio_format"], "MP3");
    let audio = STANDARD
        .decode(body["audio_content"].as_str().unwrap())
        .unwrap();
    assert_eq!(audio, STUB_AUDIO);

    let requests = ctx.provider.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(
        request.input,
        SynthesisInput::Text(lookup_preview_sentence("fr-FR").to_string())
    );
    assert_eq!(request.voice.name, "fr-FR-Chirp3-HD-Aoede");
    assert_eq!(request.voice.language_code, "fr-FR");
    assert_eq!(request.audio_config.audio_encoding, AudioEncoding::Mp3);
    assert_eq!(request.audio_config.speaking_rate, 1.0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_store_previews_in_history(ctx: &TestContext) {
    ctx.client
        .post("/preview-voice", &json!({"language": "en-US", "voice": "Kore"}))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let response = ctx.client.get("/history-list").await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body, Some(json!([])));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fall_back_to_english_preview_for_unknown_language(ctx: &TestContext) {
    ctx.client
        .post("/preview-voice", &json!({"language": "xx-XX", "voice": "Aoede"}))
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let requests = ctx.provider.requests();
    assert_eq!(
        requests[0].input,
        SynthesisInput::Text(lookup_preview_sentence("en-US").to_string())
    );
    // Language code is still passed through to the provider
    assert_eq!(requests[0].voice.name, "xx-XX-Chirp3-HD-Aoede");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_synthesize_and_store_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/synthesize",
            &json!({
                "text": "Hello",
                "language": "en-US",
                "voice": "Aoede",
                "format": "MP3",
                "speaking_rate": 1.0
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body: SynthesizeResponse = response.json().unwrap();
    let pattern = Regex::new(r"^/history/\d{8}_\d{6}_[0-9a-f]{8}\.mp3$").unwrap();
    assert!(pattern.is_match(&body.audio_url), "unexpected url {}", body.audio_url);

    let filename = body.audio_url.trim_start_matches("/history/");
    assert_eq!(std::fs::read(ctx.history_path(filename)).unwrap(), b"ABC");

    let audio = ctx.client.get(&body.audio_url).await.unwrap();
    audio
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg");
    assert_eq!(audio.body_bytes, b"ABC");

    let list = ctx.client.get("/history-list").await.unwrap();
    assert_eq!(list.body, Some(json!([filename])));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_honour_format_and_speaking_rate(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/synthesize",
            &json!({
                "text": "Slow down",
                "language": "de-DE",
                "voice": "Charon",
                "format": "wav",
                "speaking_rate": 0.75
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body: SynthesizeResponse = response.json().unwrap();
    assert!(body.audio_url.ends_with(".wav"));

    let requests = ctx.provider.requests();
    assert_eq!(requests[0].audio_config.audio_encoding, AudioEncoding::Linear16);
    assert_eq!(requests[0].audio_config.speaking_rate, 0.75);
    assert_eq!(requests[0].voice.name, "de-DE-Chirp3-HD-Charon");

    ctx.client
        .get(&body.audio_url)
        .await
        .unwrap()
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/wav");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_default_format_and_rate(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/synthesize",
            &json!({"text": "Defaults", "language": "en-US", "voice": "Puck"}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body: SynthesizeResponse = response.json().unwrap();
    assert!(body.audio_url.ends_with(".mp3"));

    let requests = ctx.provider.requests();
    assert_eq!(requests[0].audio_config.audio_encoding, AudioEncoding::Mp3);
    assert_eq!(requests[0].audio_config.speaking_rate, 1.0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_send_pause_text_as_markup(ctx: &TestContext) {
    let text = "First part [pause long] second part";
    ctx.client
        .post(
            "/synthesize",
            &json!({"text": text, "language": "en-US", "voice": "Aoede", "format": "OGG"}),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::OK);

    let requests = ctx.provider.requests();
    assert_eq!(requests[0].input, SynthesisInput::Markup(text.to_string()));
    assert_eq!(requests[0].audio_config.audio_encoding, AudioEncoding::OggOpus);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_voice_unknown_for_language(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/synthesize",
            &json!({"text": "Hello", "language": "en-US", "voice": UNKNOWN_VOICE}),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("invalid_voice")
        .assert_error_message(&format!(
            "The voice \"{}\" is not valid for the language \"en-US\".",
            UNKNOWN_VOICE
        ));

    // Nothing is written for a failed synthesis
    let list = ctx.client.get("/history-list").await.unwrap();
    assert_eq!(list.body, Some(json!([])));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_invalid_voice_on_preview(ctx: &TestContext) {
    ctx.client
        .post(
            "/preview-voice",
            &json!({"language": "ja-JP", "voice": UNKNOWN_VOICE}),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("invalid_voice")
        .assert_error_message("ja-JP");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_audio_format(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/synthesize",
            &json!({"text": "Hello", "language": "en-US", "voice": "Aoede", "format": "FLAC"}),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("request_error");
    assert!(ctx.provider.requests().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_missing_fields(ctx: &TestContext) {
    ctx.client
        .post("/synthesize", &json!({"language": "en-US", "voice": "Aoede"}))
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("request_error");

    ctx.client
        .post("/preview-voice", &json!({"voice": "Aoede"}))
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("request_error");

    assert!(ctx.provider.requests().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_text(ctx: &TestContext) {
    ctx.client
        .post(
            "/synthesize",
            &json!({"text": "   ", "language": "en-US", "voice": "Aoede"}),
        )
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("request_error")
        .assert_error_message("Text cannot be empty");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_json(ctx: &TestContext) {
    ctx.client
        .post_raw("/synthesize", "{\"text\": ")
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_code("request_error");
}
