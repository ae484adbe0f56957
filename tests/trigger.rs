mod common;

use common::{create_test_bot, wait_until, FailingSource, RecordingPoster, StalledSource};
use coin_tweet_bot::web::{WebServer, ACKNOWLEDGEMENT};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[test_log::test(tokio::test)]
async fn trigger_replies_without_waiting_for_cycle() {
    let source = Arc::new(StalledSource { calls: AtomicUsize::new(0) });
    let poster = Arc::new(RecordingPoster::default());
    let server = WebServer::new(create_test_bot(source.clone(), poster.clone()));

    let resp = tokio::time::timeout(
        Duration::from_secs(2),
        warp::test::request().path("/").reply(&server.routes()),
    )
    .await
    .expect("trigger blocked on the scheduler");

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.body(), ACKNOWLEDGEMENT);
    assert!(wait_until(|| source.calls.load(Ordering::SeqCst) == 1).await);
    assert!(poster.posts.lock().unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn repeated_triggers_start_one_loop() {
    let source = Arc::new(StalledSource { calls: AtomicUsize::new(0) });
    let poster = Arc::new(RecordingPoster::default());
    let bot = create_test_bot(source.clone(), poster);
    let server = WebServer::new(bot.clone());

    for _ in 0..5 {
        let resp = warp::test::request().method("POST").path("/").reply(&server.routes()).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.body(), ACKNOWLEDGEMENT);
    }

    assert!(bot.is_running());
    assert!(wait_until(|| source.calls.load(Ordering::SeqCst) >= 1).await);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[test_log::test(tokio::test)]
async fn failing_fetches_keep_server_and_loop_alive() {
    let source = Arc::new(FailingSource { calls: AtomicUsize::new(0) });
    let poster = Arc::new(RecordingPoster::default());
    let server = WebServer::new(create_test_bot(source.clone(), poster.clone()));

    let resp = warp::test::request().path("/").reply(&server.routes()).await;
    assert_eq!(resp.status(), 200);

    assert!(wait_until(|| source.calls.load(Ordering::SeqCst) >= 3).await);
    assert!(poster.posts.lock().unwrap().is_empty());

    let resp = warp::test::request().path("/").reply(&server.routes()).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.body(), ACKNOWLEDGEMENT);
}
