// Tests for the completion-callback API and its delivery contexts

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use common::{feed_url, mock_feed, SAMPLE_FEED};
use mockito::Server;
use puzzle_feed::delivery::main_queue;
use puzzle_feed::{FetchError, FetchResult, PuzzleFetcher};
use tokio::sync::oneshot;

#[tokio::test]
async fn test_fetch_puzzles_delivers_success() {
    let mut server = Server::new_async().await;
    let mock = mock_feed(&mut server, SAMPLE_FEED).await;

    let (tx, rx) = oneshot::channel::<FetchResult>();
    let fetcher = PuzzleFetcher::new(feed_url(&server));
    let handle = fetcher.fetch_puzzles(move |result| {
        tx.send(result).ok();
    });

    let puzzles = rx.await.unwrap().unwrap();
    assert_eq!(puzzles.len(), 3);
    handle.await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_puzzles_delivers_failure() {
    let mut server = Server::new_async().await;
    let mock = mock_feed(&mut server, "").await;

    let (tx, rx) = oneshot::channel::<FetchResult>();
    let fetcher = PuzzleFetcher::new(feed_url(&server));
    fetcher.fetch_puzzles(move |result| {
        tx.send(result).ok();
    });

    let result = rx.await.unwrap();
    assert!(matches!(result, Err(FetchError::EmptyBody)));

    mock.assert_async().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_main_queue_runs_completion_on_loop_thread() {
    let mut server = Server::new_async().await;
    let mock = mock_feed(&mut server, SAMPLE_FEED).await;

    let (queue, mut main_loop) = main_queue();
    let fetcher = PuzzleFetcher::new(feed_url(&server)).with_delivery(queue);

    let calls = Arc::new(AtomicUsize::new(0));
    let delivered_on = Arc::new(Mutex::new(None));
    let decoded = Arc::new(AtomicUsize::new(0));

    let (calls_in, delivered_in, decoded_in) =
        (calls.clone(), delivered_on.clone(), decoded.clone());
    let handle = fetcher.fetch_puzzles(move |result| {
        calls_in.fetch_add(1, Ordering::SeqCst);
        *delivered_in.lock().unwrap() = Some(thread::current().id());
        decoded_in.store(result.map(|p| p.len()).unwrap_or(0), Ordering::SeqCst);
    });

    assert!(main_loop.run_next().await);
    handle.await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(decoded.load(Ordering::SeqCst), 3);
    assert_eq!(*delivered_on.lock().unwrap(), Some(thread::current().id()));

    // Nothing else was queued
    assert_eq!(main_loop.run_pending(), 0);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_fetches_each_complete_once() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", common::FEED_PATH)
        .with_status(200)
        .with_body(SAMPLE_FEED)
        .expect(3)
        .create_async()
        .await;

    let (queue, mut main_loop) = main_queue();
    let fetcher = PuzzleFetcher::new(feed_url(&server)).with_delivery(queue);
    let calls = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..3)
        .map(|_| {
            let calls = calls.clone();
            fetcher.fetch_puzzles(move |result| {
                assert!(result.is_ok());
                calls.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();
    drop(fetcher);

    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(main_loop.run_pending(), 3);
    assert!(!main_loop.run_next().await);
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    mock.assert_async().await;
}

#[tokio::test]
async fn test_completion_dropped_when_main_loop_gone() {
    let mut server = Server::new_async().await;
    let mock = mock_feed(&mut server, SAMPLE_FEED).await;

    let (queue, main_loop) = main_queue();
    drop(main_loop);
    let fetcher = PuzzleFetcher::new(feed_url(&server)).with_delivery(queue);

    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in = calls.clone();
    let handle = fetcher.fetch_puzzles(move |_| {
        calls_in.fetch_add(1, Ordering::SeqCst);
    });

    // Task finishes cleanly but the callback never runs
    handle.await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    mock.assert_async().await;
}
