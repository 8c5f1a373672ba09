//! JSON payloads returned by the Zulip REST API.

use serde::Deserialize;

/// Fields shared by every Zulip response.
#[derive(Debug, Deserialize)]
pub struct ApiStatus {
    /// `"success"` or `"error"`
    pub result: String,
    #[serde(default)]
    pub msg: String,
    /// Machine readable error code, only set on errors
    #[serde(default)]
    pub code: Option<String>,
}

impl ApiStatus {
    pub fn is_success(&self) -> bool {
        self.result == "success"
    }
}

/// Response of `POST /api/v1/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
    #[serde(default)]
    pub queue_id: Option<String>,
    #[serde(default)]
    pub last_event_id: i64,
}

/// Response of `GET /api/v1/events`.
#[derive(Debug, Deserialize)]
pub struct EventsResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
    #[serde(default)]
    pub events: Vec<Event>,
}

/// Response of `POST /api/v1/messages`.
#[derive(Debug, Deserialize)]
pub struct SendMessageResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
    #[serde(default)]
    pub id: Option<i64>,
}

/// An event read from a queue. Only `message` events carry a [`MessagePayload`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Event {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub message: Option<MessagePayload>,
}

/// The part of a Zulip message the bot cares about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessagePayload {
    pub sender_email: String,
    pub content: String,
    /// `"private"` or `"stream"`
    #[serde(rename = "type")]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_events_response() {
        let body = r#"{
            "result": "success",
            "msg": "",
            "events": [
                {"id": 0, "type": "heartbeat"},
                {"id": 1, "type": "message", "flags": [], "message": {
                    "id": 42, "sender_email": "alice@example.com", "content": "get",
                    "type": "private", "subject": ""
                }}
            ],
            "queue_id": "1375801870:2942"
        }"#;

        let response: EventsResponse = serde_json::from_str(body).unwrap();
        assert!(response.status.is_success());
        assert_eq!(response.events.len(), 2);
        assert_eq!(response.events[0].kind, "heartbeat");
        assert!(response.events[0].message.is_none());

        let message = response.events[1].message.as_ref().unwrap();
        assert_eq!(message.sender_email, "alice@example.com");
        assert_eq!(message.content, "get");
        assert_eq!(message.kind, "private");
    }

    #[test]
    fn test_deserialize_error_response() {
        let body = r#"{"result": "error", "msg": "Bad event queue id: 1", "code": "BAD_EVENT_QUEUE_ID", "queue_id": "1"}"#;

        let response: EventsResponse = serde_json::from_str(body).unwrap();
        assert!(!response.status.is_success());
        assert_eq!(response.status.code.as_deref(), Some("BAD_EVENT_QUEUE_ID"));
        assert!(response.events.is_empty());
    }
}
