//! Translation between Zulip events and bot messages.
//!
//! Inbound events become [`InboundMessage`]s carrying only the sender's email
//! and the raw text. Replies are wrapped into [`OutboundMessage`]s shaped like
//! the form expected by `POST /api/v1/messages`.

use crate::zulip::response_structs::Event;

/// A message received by the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Email of the author
    pub sender_email: String,
    /// Raw text of the message
    pub content: String,
}

impl InboundMessage {
    /// Extracts the message carried by `event`, `None` for other event types.
    pub fn from_event(event: &Event) -> Option<Self> {
        if event.kind != "message" {
            return None;
        }

        event.message.as_ref().map(|message| InboundMessage {
            sender_email: message.sender_email.clone(),
            content: message.content.clone(),
        })
    }

    /// Whether the message was sent by `email`.
    pub fn is_from(&self, email: &str) -> bool {
        self.sender_email == email
    }
}

/// A message sent by the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// `"private"` for direct messages
    pub kind: String,
    pub content: String,
    /// Topic, unused by private messages
    pub subject: String,
    /// Email of the recipient
    pub to: String,
}

impl OutboundMessage {
    /// Wraps `content` into a private reply to the sender of `message`.
    pub fn private_reply(message: &InboundMessage, content: String) -> Self {
        OutboundMessage {
            kind: "private".to_owned(),
            content,
            subject: String::new(),
            to: message.sender_email.clone(),
        }
    }

    /// Form fields of the send request.
    pub fn form_params(&self) -> [(&'static str, &str); 4] {
        [
            ("type", self.kind.as_str()),
            ("content", self.content.as_str()),
            ("subject", self.subject.as_str()),
            ("to", self.to.as_str()),
        ]
    }
}
