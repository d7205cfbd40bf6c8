use crate::e2e::helpers;

use chrono::{Duration, Utc};
use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use std::time::SystemTime;
use test_context::test_context;
use tts_studio_backend::domain::history::DeleteResponse;
use tts_studio_backend::domain::tts::AudioFormat;

fn set_age(ctx: &TestContext, filename: &str, age: Duration) {
    let time: SystemTime = (Utc::now() - age).into();
    std::fs::File::options()
        .write(true)
        .open(ctx.history_path(filename))
        .unwrap()
        .set_modified(time)
        .unwrap();
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_newest_first(ctx: &TestContext) {
    let oldest = ctx.history_repo.put(b"1", AudioFormat::Mp3).await.unwrap();
    let middle = ctx.history_repo.put(b"2", AudioFormat::Wav).await.unwrap();
    let newest = ctx.history_repo.put(b"3", AudioFormat::Ogg).await.unwrap();
    set_age(ctx, &oldest, Duration::hours(3));
    set_age(ctx, &middle, Duration::hours(2));
    set_age(ctx, &newest, Duration::hours(1));

    let response = ctx.client.get("/history-list").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body, Some(json!([newest, middle, oldest])));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_empty_list_for_empty_history(ctx: &TestContext) {
    let response = ctx.client.get("/history-list").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body, Some(json!([])));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_stored_bytes_unchanged(ctx: &TestContext) {
    let bytes: Vec<u8> = (0..=255).collect();
    let filename = ctx.history_repo.put(&bytes, AudioFormat::Ogg).await.unwrap();

    let response = ctx.client.get(&format!("/history/{}", filename)).await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/ogg");
    assert_eq!(response.body_bytes, bytes);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_missing_file(ctx: &TestContext) {
    ctx.client
        .get("/history/20240101_000000_deadbeef.mp3")
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_code("not_found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_a_directory(ctx: &TestContext) {
    std::fs::create_dir(ctx.history_path("nested")).unwrap();

    ctx.client
        .get("/history/nested")
        .await
        .unwrap()
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_code("not_found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_refuse_to_serve_outside_history(ctx: &TestContext) {
    ctx.client
        .get("/history/..%2Fsecret.txt")
        .await
        .unwrap()
        .assert_status(StatusCode::FORBIDDEN)
        .assert_error_code("access_denied");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_delete_an_entry(ctx: &TestContext) {
    let filename = ctx.history_repo.put(b"bye", AudioFormat::Mp3).await.unwrap();

    let response = ctx
        .client
        .delete(&format!("/history/delete/{}", filename))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body: DeleteResponse = response.json().unwrap();
    assert!(body.success);
    assert_eq!(body.message, "File deleted successfully.");
    assert!(!ctx.history_path(&filename).exists());

    let list = ctx.client.get("/history-list").await.unwrap();
    assert_eq!(list.body, Some(json!([])));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_succeed_when_deleting_missing_entry(ctx: &TestContext) {
    let response = ctx
        .client
        .delete("/history/delete/does_not_exist.mp3")
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body: DeleteResponse = response.json().unwrap();
    assert!(body.success);
    assert_eq!(body.message, "File did not exist.");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_refuse_traversal_on_delete(ctx: &TestContext) {
    // A file next to the history directory that must survive
    let outside = ctx.history_repo.dir().parent().unwrap().join("keep.txt");
    std::fs::write(&outside, b"keep").unwrap();

    let response = ctx
        .client
        .delete("/history/delete/..%2Fkeep.txt")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::FORBIDDEN)
        .assert_error_code("access_denied");
    assert_eq!(std::fs::read(&outside).unwrap(), b"keep");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_refuse_nested_traversal_on_delete(ctx: &TestContext) {
    let outside = ctx.history_repo.dir().parent().unwrap().join("nested.txt");
    std::fs::write(&outside, b"keep").unwrap();

    ctx.client
        .delete("/history/delete/sub/../../nested.txt")
        .await
        .unwrap()
        .assert_status(StatusCode::FORBIDDEN);
    assert!(outside.exists());
}
