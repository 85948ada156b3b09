//! JSON control events carried in text messages.
//!
//! Telephony clients announce themselves and forward keypad digits as small JSON
//! objects tagged by an `"Event"` field:
//!
//! ```json
//! {"Event":"Hello","Channel":"SIP/100-00000001"}
//! {"Event":"DTMF","Digit":"5"}
//! ```
//!
//! The server endpoints never act on these; they are decoded only so that logs carry
//! structured fields instead of raw strings.

use serde::{Deserialize, Serialize};

/// A control event sent as a text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Event")]
pub enum ControlEvent {
    /// First message of a client session, naming the originating channel.
    Hello {
        /// Channel name of the caller.
        #[serde(rename = "Channel")]
        channel: String,
    },
    /// A keypad digit pressed on the client side.
    #[serde(rename = "DTMF")]
    Dtmf {
        /// The digit, as a one-character string.
        #[serde(rename = "Digit")]
        digit: String,
    },
}

impl ControlEvent {
    /// Hello event for `channel`.
    pub fn hello(channel: impl Into<String>) -> Self {
        Self::Hello {
            channel: channel.into(),
        }
    }

    /// DTMF event for `digit`.
    pub fn dtmf(digit: char) -> Self {
        Self::Dtmf {
            digit: digit.to_string(),
        }
    }

    /// Encode as a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Decode a text payload. Returns `None` for anything that is not a known event.
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_wire_format() {
        let json = ControlEvent::hello("SIP/100").to_json().unwrap();
        assert_eq!(json, r#"{"Event":"Hello","Channel":"SIP/100"}"#);
    }

    #[test]
    fn test_dtmf_wire_format() {
        let json = ControlEvent::dtmf('7').to_json().unwrap();
        assert_eq!(json, r#"{"Event":"DTMF","Digit":"7"}"#);
    }

    #[test]
    fn test_parse_known_and_unknown() {
        assert_eq!(
            ControlEvent::parse(r##"{"Event":"DTMF","Digit":"#"}"##),
            Some(ControlEvent::dtmf('#'))
        );
        assert_eq!(ControlEvent::parse("hello there"), None);
        assert_eq!(ControlEvent::parse(r#"{"Event":"Hangup"}"#), None);
    }
}
