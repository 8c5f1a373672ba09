//! HTTP client for the Zulip REST API.
//!
//! This module provides the [`ZulipClient`] struct, which registers an event
//! queue, long-polls it for new messages and sends replies.

use log::{debug, info};
use reqwest::Client;

use crate::zulip::{
    Credentials, EventQueue, OutboundMessage, Transport, ZulipError,
    response_structs::{
        ApiStatus, Event, EventsResponse, RegisterResponse, SendMessageResponse,
    },
};

/// Only message events are needed.
const EVENT_TYPES: &str = r#"["message"]"#;
/// Restricts the queue to private messages.
const PRIVATE_NARROW: &str = r#"[["is","private"]]"#;

/// HTTP client for the Zulip server.
///
/// Every request is authenticated with HTTP basic auth, using the bot email
/// as user name and its API key as password.
pub struct ZulipClient {
    /// Bot account credentials and server URL
    credentials: Credentials,
    /// HTTP client
    client: Client,
}

impl ZulipClient {
    /// Create a new [ZulipClient].
    pub fn new(credentials: Credentials) -> Self {
        ZulipClient {
            credentials,
            client: Client::new(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/api/v1/{}", self.credentials.site, endpoint)
    }
}

/// Turns a non-success status into a [`ZulipError::Api`].
fn check_status(status: ApiStatus) -> Result<(), ZulipError> {
    if status.is_success() {
        return Ok(());
    }

    Err(ZulipError::Api {
        code: status.code,
        msg: status.msg,
    })
}

impl Transport for ZulipClient {
    /// Request `POST /api/v1/register` to create an event queue.
    ///
    /// Markdown rendering is disabled so that events carry the raw message text.
    async fn register_queue(&self) -> Result<EventQueue, ZulipError> {
        let url = self.url("register");
        info!("register event queue");

        let response: RegisterResponse = self
            .client
            .post(&url)
            .basic_auth(&self.credentials.email, Some(&self.credentials.key))
            .form(&[
                ("event_types", EVENT_TYPES),
                ("apply_markdown", "false"),
                ("narrow", PRIVATE_NARROW),
            ])
            .send()
            .await?
            .json()
            .await?;

        debug!("response from {} -> {:?}", &url, &response);
        check_status(response.status)?;

        let Some(queue_id) = response.queue_id else {
            return Err(ZulipError::Api {
                code: None,
                msg: "register response without queue_id".to_owned(),
            });
        };

        info!("registered event queue {}", queue_id);

        Ok(EventQueue {
            queue_id,
            last_event_id: response.last_event_id,
        })
    }

    /// Request `GET /api/v1/events` to wait for new events.
    ///
    /// The server holds the request until an event arrives or a heartbeat is due.
    async fn get_events(&self, queue: &EventQueue) -> Result<Vec<Event>, ZulipError> {
        let url = self.url("events");
        let last_event_id = queue.last_event_id.to_string();
        debug!(
            "request {}?queue_id={}&last_event_id={}",
            &url, &queue.queue_id, &last_event_id
        );

        let response: EventsResponse = self
            .client
            .get(&url)
            .basic_auth(&self.credentials.email, Some(&self.credentials.key))
            .query(&[
                ("queue_id", queue.queue_id.as_str()),
                ("last_event_id", last_event_id.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;

        debug!("response from {} -> {:?}", &url, &response);
        check_status(response.status)?;

        Ok(response.events)
    }

    /// Request `POST /api/v1/messages` to send a message.
    async fn send_message(&self, message: &OutboundMessage) -> Result<(), ZulipError> {
        let url = self.url("messages");
        debug!("send {:?}", message);

        let response: SendMessageResponse = self
            .client
            .post(&url)
            .basic_auth(&self.credentials.email, Some(&self.credentials.key))
            .form(&message.form_params())
            .send()
            .await?
            .json()
            .await?;

        check_status(response.status)?;
        debug!("sent message {:?} to {}", response.id, message.to);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    /// base64 of `bot@example.com:secret`
    const AUTHORIZATION: &str = "Basic Ym90QGV4YW1wbGUuY29tOnNlY3JldA==";

    fn create_test_client(url: &str) -> ZulipClient {
        ZulipClient::new(Credentials {
            site: url.to_string(),
            email: "bot@example.com".to_string(),
            key: "secret".to_string(),
        })
    }

    #[tokio::test]
    async fn test_register_queue() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"result": "success", "msg": "", "queue_id": "1375801870:2942", "last_event_id": -1}"#;

        let mock = server
            .mock("POST", "/api/v1/register")
            .match_header("authorization", AUTHORIZATION)
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("event_types".to_owned(), EVENT_TYPES.to_owned()),
                Matcher::UrlEncoded("apply_markdown".to_owned(), "false".to_owned()),
                Matcher::UrlEncoded("narrow".to_owned(), PRIVATE_NARROW.to_owned()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let queue = client.register_queue().await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            queue,
            EventQueue {
                queue_id: "1375801870:2942".to_string(),
                last_event_id: -1,
            }
        );
    }

    #[tokio::test]
    async fn test_register_queue_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"result": "error", "msg": "Invalid API key", "code": "UNAUTHORIZED"}"#;

        server
            .mock("POST", "/api/v1/register")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let error = client.register_queue().await.unwrap_err();

        assert!(matches!(
            error,
            ZulipError::Api { code: Some(ref code), ref msg } if code == "UNAUTHORIZED" && msg == "Invalid API key"
        ));
    }

    #[tokio::test]
    async fn test_get_events() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"result": "success", "msg": "", "events": [
            {"id": 0, "type": "message", "message": {"sender_email": "alice@example.com", "content": "get", "type": "private"}},
            {"id": 1, "type": "heartbeat"}
        ]}"#;

        server
            .mock("GET", "/api/v1/events")
            .match_header("authorization", AUTHORIZATION)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("queue_id".to_owned(), "queue1".to_owned()),
                Matcher::UrlEncoded("last_event_id".to_owned(), "-1".to_owned()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let queue = EventQueue {
            queue_id: "queue1".to_string(),
            last_event_id: -1,
        };
        let events = client.get_events(&queue).await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, 0);
        assert_eq!(
            events[0].message.as_ref().unwrap().sender_email,
            "alice@example.com"
        );
        assert_eq!(events[1].kind, "heartbeat");
    }

    #[tokio::test]
    async fn test_get_events_bad_queue() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"result": "error", "msg": "Bad event queue id: queue1", "code": "BAD_EVENT_QUEUE_ID", "queue_id": "queue1"}"#;

        server
            .mock("GET", "/api/v1/events")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let queue = EventQueue {
            queue_id: "queue1".to_string(),
            last_event_id: 4,
        };
        let error = client.get_events(&queue).await.unwrap_err();

        assert!(error.is_bad_event_queue());
    }

    #[tokio::test]
    async fn test_send_message() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"result": "success", "msg": "", "id": 42}"#;

        let mock = server
            .mock("POST", "/api/v1/messages")
            .match_header("authorization", AUTHORIZATION)
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("type".to_owned(), "private".to_owned()),
                Matcher::UrlEncoded("to".to_owned(), "alice@example.com".to_owned()),
                Matcher::UrlEncoded("content".to_owned(), "Hello **there**".to_owned()),
                Matcher::UrlEncoded("subject".to_owned(), "".to_owned()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let message = OutboundMessage {
            kind: "private".to_string(),
            content: "Hello **there**".to_string(),
            subject: String::new(),
            to: "alice@example.com".to_string(),
        };
        client.send_message(&message).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_message_error() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"{"result": "error", "msg": "Invalid email 'nobody'", "code": "BAD_REQUEST"}"#;

        server
            .mock("POST", "/api/v1/messages")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let message = OutboundMessage {
            kind: "private".to_string(),
            content: "Hi".to_string(),
            subject: String::new(),
            to: "nobody".to_string(),
        };
        let error = client.send_message(&message).await.unwrap_err();

        assert_eq!(error.to_string(), "zulip error BAD_REQUEST: Invalid email 'nobody'");
    }
}
