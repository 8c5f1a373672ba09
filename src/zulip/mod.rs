//! Zulip integration for the bot.
//!
//! This module provides a small Zulip REST client with support for:
//! - Event queue registration, restricted to private messages
//! - Long-polling of new events
//! - Sending private replies
//!
//! # Architecture
//!
//! - [`client::ZulipClient`] talks to the Zulip server with `reqwest` and
//!   implements the [`Transport`] trait
//! - [`message`] translates between Zulip events and the `(sender, content)`
//!   pairs the bot works with
//! - [`response_structs`] holds the JSON payloads returned by the server
//!
//! The bot only depends on [`Transport`], which is mocked in tests.

use std::fmt;

use mockall::automock;

mod client;
mod message;
mod response_structs;

pub use crate::zulip::client::ZulipClient;
pub use crate::zulip::message::{InboundMessage, OutboundMessage};
pub use crate::zulip::response_structs::Event;

/// Credentials of the bot's Zulip account.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Base URL of the Zulip server, without trailing slash
    pub site: String,
    /// Email of the bot account
    pub email: String,
    /// API key of the bot account
    pub key: String,
}

/// A registered event queue and the last event read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQueue {
    pub queue_id: String,
    pub last_event_id: i64,
}

/// Error code returned by Zulip when an event queue expired.
pub const BAD_EVENT_QUEUE_ID: &str = "BAD_EVENT_QUEUE_ID";

/// Errors returned by the Zulip transport.
#[derive(Debug)]
pub enum ZulipError {
    /// The request could not be sent or the response could not be decoded
    Http(reqwest::Error),
    /// The server answered with `"result": "error"`
    Api { code: Option<String>, msg: String },
}

impl ZulipError {
    /// Whether the event queue must be registered again.
    pub fn is_bad_event_queue(&self) -> bool {
        matches!(self, ZulipError::Api { code: Some(code), .. } if code == BAD_EVENT_QUEUE_ID)
    }
}

impl fmt::Display for ZulipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZulipError::Http(e) => write!(f, "zulip request failed: {}", e),
            ZulipError::Api {
                code: Some(code),
                msg,
            } => write!(f, "zulip error {}: {}", code, msg),
            ZulipError::Api { code: None, msg } => write!(f, "zulip error: {}", msg),
        }
    }
}

impl std::error::Error for ZulipError {}

impl From<reqwest::Error> for ZulipError {
    fn from(e: reqwest::Error) -> Self {
        ZulipError::Http(e)
    }
}

/// Message transport used by the bot.
///
/// This trait abstracts the Zulip API for easier testing with mocks.
#[automock]
pub trait Transport {
    /// Registers a new queue receiving private messages.
    async fn register_queue(&self) -> Result<EventQueue, ZulipError>;
    /// Waits for the events following `queue.last_event_id`.
    async fn get_events(&self, queue: &EventQueue) -> Result<Vec<Event>, ZulipError>;
    /// Sends a message.
    async fn send_message(&self, message: &OutboundMessage) -> Result<(), ZulipError>;
}
