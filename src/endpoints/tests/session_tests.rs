//! Tests for routing and the session state machine.

use super::*;

#[test]
fn test_routes() {
    assert_eq!(Variant::from_path("/echo"), Some(Variant::PassthroughEcho));
    assert_eq!(Variant::from_path("/syncecho"), Some(Variant::PassthroughEcho));
    assert_eq!(Variant::from_path("/syncsin"), Some(Variant::SynchronizedReply));
    assert_eq!(Variant::from_path("/asyncsin"), Some(Variant::AsynchronousTimed));
    assert_eq!(Variant::from_path("/record"), Some(Variant::BoundedCapture));
    assert_eq!(Variant::from_path("/"), None);
    assert_eq!(Variant::from_path("/echo/"), None);
}

#[test]
fn test_state_transitions() {
    use EndpointState::*;

    assert!(Upgrading.can_transition_to(Streaming));
    assert!(Upgrading.can_transition_to(Closed));
    assert!(Streaming.can_transition_to(Closed));
    assert!(!Closed.can_transition_to(Streaming));
    assert!(!Closed.can_transition_to(Upgrading));
    assert!(!Streaming.can_transition_to(Upgrading));
}

#[test]
fn test_session_ids_are_unique() {
    let a = Session::new(Variant::PassthroughEcho);
    let b = Session::new(Variant::PassthroughEcho);
    assert_ne!(a.id(), b.id());
    assert_eq!(a.state(), EndpointState::Upgrading);
}

#[test]
fn test_upgrade_failure_closes_session() {
    let session = Session::new(Variant::AsynchronousTimed)
        .upgrade_failed(&StreamError::Upgrade("missing key".to_string()));
    assert_eq!(session.state(), EndpointState::Closed);
    assert_eq!(session.variant(), Variant::AsynchronousTimed);
}

#[tokio::test]
async fn test_session_stream_closes_after_run() {
    let (server, client) = MemoryDuplex::pair();
    let session = Session::new(Variant::PassthroughEcho);

    let task = tokio::spawn(async move {
        let config = ServerConfig::default();
        session.stream(server, &config).await
    });

    let (mut tx, mut rx) = client.split();
    tx.send(Frame::Binary(vec![4, 2])).await.unwrap();
    assert_eq!(rx.recv().await.unwrap(), Frame::Binary(vec![4, 2]));
    drop(tx);

    let (session, outcome) = task.await.unwrap();
    assert_eq!(session.state(), EndpointState::Closed);
    assert_eq!(outcome.stats.frames_sent, 1);
    assert_eq!(outcome.end.to_string(), "read: Peer closed the stream");
}

#[test]
fn test_variant_names() {
    let names: Vec<String> = Variant::ROUTES
        .iter()
        .map(|(_, variant)| variant.to_string())
        .collect();
    assert_eq!(names, ["echo", "echo", "syncsin", "asyncsin", "record"]);
}
