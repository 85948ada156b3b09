//! Tests for streaming error classification.

use super::super::error::*;
use std::time::Duration;

#[test]
fn test_error_directions() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
    assert_eq!(StreamError::read(io).direction(), Some(Direction::Read));

    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
    assert_eq!(StreamError::write(io).direction(), Some(Direction::Write));

    assert_eq!(
        StreamError::PeerClosed { code: None }.direction(),
        Some(Direction::Read)
    );
    assert_eq!(StreamError::Closed.direction(), Some(Direction::Write));
    assert_eq!(
        StreamError::timeout("read", Duration::from_secs(1)).direction(),
        Some(Direction::Read)
    );
    assert_eq!(
        StreamError::timeout("write", Duration::from_secs(1)).direction(),
        Some(Direction::Write)
    );
    assert_eq!(StreamError::Upgrade("bad".to_string()).direction(), None);
}

#[test]
fn test_error_messages() {
    assert_eq!(
        StreamError::PeerClosed { code: Some(1000) }.to_string(),
        "Peer closed the stream (code 1000)"
    );
    assert_eq!(
        StreamError::PeerClosed { code: None }.to_string(),
        "Peer closed the stream"
    );
    assert_eq!(
        StreamError::timeout("write", Duration::from_millis(250)).to_string(),
        "Operation 'write' timed out after 250ms"
    );
    assert!(
        StreamError::Upgrade("missing key".to_string())
            .to_string()
            .contains("missing key")
    );
}

#[test]
fn test_peer_close_classification() {
    assert!(StreamError::PeerClosed { code: Some(1001) }.is_peer_close());
    assert!(!StreamError::Closed.is_peer_close());
}

#[test]
fn test_transport_error_is_source() {
    use std::error::Error;

    let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
    let err = StreamError::read(io);
    assert!(err.source().is_some());
    assert!(err.to_string().contains("reset by peer"));
}
