//! WebSocket transport backed by axum's upgraded connection.

use axum::extract::ws::{CloseFrame, Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};

use crate::streaming::{
    error::{StreamError, StreamResult},
    traits::{Duplex, Frame, FrameSink, FrameSource},
};

/// Send half of an upgraded WebSocket.
pub struct WebSocketSink {
    inner: SplitSink<WebSocket, Message>,
}

/// Receive half of an upgraded WebSocket.
pub struct WebSocketSource {
    inner: SplitStream<WebSocket>,
}

impl Duplex for WebSocket {
    type Sink = WebSocketSink;
    type Source = WebSocketSource;

    fn split(self) -> (Self::Sink, Self::Source) {
        let (sink, stream) = StreamExt::split(self);
        (WebSocketSink { inner: sink }, WebSocketSource { inner: stream })
    }
}

impl FrameSink for WebSocketSink {
    async fn send(&mut self, frame: Frame) -> StreamResult<()> {
        self.inner
            .send(into_message(frame))
            .await
            .map_err(StreamError::write)
    }
}

impl FrameSource for WebSocketSource {
    async fn recv(&mut self) -> StreamResult<Frame> {
        loop {
            match self.inner.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Frame::Text(text.as_str().to_owned())),
                Some(Ok(Message::Binary(data))) => return Ok(Frame::Binary(data.to_vec())),
                Some(Ok(Message::Close(frame))) => {
                    return Err(StreamError::PeerClosed {
                        code: frame.map(|frame| frame.code),
                    });
                }
                // Pongs are answered by the transport itself.
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
                Some(Err(err)) => return Err(StreamError::read(err)),
                None => return Err(StreamError::PeerClosed { code: None }),
            }
        }
    }
}

fn into_message(frame: Frame) -> Message {
    match frame {
        Frame::Text(text) => Message::Text(text.into()),
        Frame::Binary(data) => Message::Binary(data.into()),
        Frame::Close(signal) => Message::Close(Some(CloseFrame {
            code: signal.code,
            reason: signal.reason.into(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streaming::CloseSignal;

    #[test]
    fn test_binary_frame_maps_to_binary_message() {
        match into_message(Frame::Binary(vec![1, 2, 3])) {
            Message::Binary(data) => assert_eq!(&data[..], &[1, 2, 3]),
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_text_frame_maps_to_text_message() {
        match into_message(Frame::Text("hello".to_string())) {
            Message::Text(text) => assert_eq!(text.as_str(), "hello"),
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_close_frame_carries_code() {
        match into_message(Frame::Close(CloseSignal::normal())) {
            Message::Close(Some(frame)) => {
                assert_eq!(frame.code, 1000);
                assert_eq!(frame.reason.as_str(), "");
            }
            other => panic!("unexpected message {other:?}"),
        }
    }
}
