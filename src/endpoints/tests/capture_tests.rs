//! Tests for the bounded capture endpoint.

use super::*;
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_capture_stops_after_limit() {
    let (task, mut tx, mut rx, probe) = start(Variant::BoundedCapture, ServerConfig::default());

    // A peer that keeps sending until the stream goes away.
    let sender = tokio::spawn(async move {
        let mut sent = 0u64;
        while tx.send(Frame::Binary(vec![1; 320])).await.is_ok() {
            sent += 1;
        }
        sent
    });

    let (frames, error) = read_until_error(&mut rx).await;
    let closed_at = Instant::now();

    assert_eq!(frames.len(), 50);
    assert!(frames.iter().all(|frame| *frame == Frame::Binary(vec![0; 320])));
    assert!(matches!(error, StreamError::PeerClosed { code: Some(1000) }));

    let outcome = task.await.unwrap();
    assert!(matches!(outcome.end, SessionEnd::CaptureLimitReached));
    assert_eq!(outcome.stats.messages_received, 50);
    assert_eq!(outcome.stats.frames_sent, 50);
    // The stream is held for the grace period after the close signal.
    assert_eq!(Instant::now() - closed_at, Duration::from_secs(1));

    // Exactly one close signal: after it the stream simply ends.
    assert!(matches!(
        rx.recv().await,
        Err(StreamError::PeerClosed { code: None })
    ));
    assert_eq!(probe.writes(), 51);

    assert!(sender.await.unwrap() >= 50);
}

#[tokio::test(start_paused = true)]
async fn test_text_counts_toward_limit() {
    let config = ServerConfig {
        capture_limit: 5,
        ..ServerConfig::default()
    };
    let (task, mut tx, mut rx, _probe) = start(Variant::BoundedCapture, config);

    tx.send(Frame::Text("a".to_string())).await.unwrap();
    tx.send(Frame::Binary(vec![1])).await.unwrap();
    tx.send(Frame::Text("b".to_string())).await.unwrap();
    tx.send(Frame::Binary(vec![2])).await.unwrap();
    tx.send(Frame::Binary(vec![3])).await.unwrap();
    tx.send(Frame::Binary(vec![4])).await.unwrap();

    let (frames, error) = read_until_error(&mut rx).await;
    assert_eq!(frames.len(), 3);
    assert!(matches!(error, StreamError::PeerClosed { code: Some(1000) }));

    let outcome = task.await.unwrap();
    assert_eq!(outcome.stats.text_received, 2);
    assert_eq!(outcome.stats.binary_received, 3);
}

#[tokio::test(start_paused = true)]
async fn test_read_error_ends_without_close_signal() {
    let (task, mut tx, mut rx, _probe) = start(Variant::BoundedCapture, ServerConfig::default());

    for _ in 0..3 {
        tx.send(Frame::Binary(vec![5; 320])).await.unwrap();
    }
    drop(tx);

    let (frames, error) = read_until_error(&mut rx).await;
    assert_eq!(frames.len(), 3);
    assert!(matches!(error, StreamError::PeerClosed { code: None }));

    let outcome = task.await.unwrap();
    assert!(matches!(
        outcome.end,
        SessionEnd::ReadFailed(StreamError::PeerClosed { code: None })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_reply_failure_does_not_stop_capture() {
    let config = ServerConfig {
        capture_limit: 4,
        ..ServerConfig::default()
    };
    let (task, mut tx, rx, _probe) = start(Variant::BoundedCapture, config);
    drop(rx);

    for _ in 0..4 {
        tx.send(Frame::Binary(vec![1])).await.unwrap();
    }

    let outcome = task.await.unwrap();
    assert!(matches!(outcome.end, SessionEnd::CaptureLimitReached));
    assert_eq!(outcome.stats.binary_received, 4);
    assert_eq!(outcome.stats.frames_sent, 0);
}
