//! Bot module wiring the Zulip transport to the command router.
//!
//! This module provides the main [`Bot`] implementation. It registers an event
//! queue on the Zulip server, waits for private messages and answers each one
//! with the reply computed by the [`Commander`].
//!
//! # Message Processing Flow
//!
//! ```text
//! Zulip event → InboundMessage → self check → Commander::route → OutboundMessage → Zulip
//! ```
//!
//! Messages are processed one at a time, in the order the server delivers
//! them. A message whose processing fails is logged and dropped: its sender
//! gets no reply.

use std::{sync::Arc, time::Duration};

use log::{error, info, warn};
use tokio::time::sleep;

use crate::{
    commands::Commander,
    config::Config,
    store::Database,
    zulip::{
        Credentials, Event, EventQueue, InboundMessage, OutboundMessage, Transport, ZulipClient,
        ZulipError,
    },
};

/// Delay before polling again after a transport error.
const RETRY_DELAY: Duration = Duration::from_secs(10);

/// Main bot structure answering Zulip private messages.
///
/// The `Bot` owns:
///
/// 1. **Transport** - The Zulip client used to receive and send messages
/// 2. **Commander** - The command router, holding the store
/// 3. **Own email** - Messages sent by this address are never answered
pub struct Bot<T: Transport> {
    /// Transport used to receive and send messages
    transport: T,
    /// Command router
    commander: Commander,
    /// Email of the bot account
    email: String,
    /// Delay before polling again after a transport error
    retry_delay: Duration,
}

impl Bot<ZulipClient> {
    /// Creates a new Bot from configuration.
    ///
    /// Opens the store and builds the Zulip client. Nothing is sent to the
    /// server until [`Bot::start`] is called.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new(config: Config) -> Result<Self, anyhow::Error> {
        let database = Arc::new(Database::open(&config.database.uri)?);

        let transport = ZulipClient::new(Credentials {
            site: config.api.site,
            email: config.api.email.clone(),
            key: config.api.key,
        });

        Ok(Bot::with_transport(
            transport,
            Commander::new(database),
            config.api.email,
        ))
    }
}

impl<T: Transport> Bot<T> {
    /// Creates a Bot on top of an existing transport.
    pub fn with_transport(transport: T, commander: Commander, email: String) -> Self {
        Bot {
            transport,
            commander,
            email,
            retry_delay: RETRY_DELAY,
        }
    }

    /// Starts answering messages.
    ///
    /// This method runs until the process is terminated. Transport errors are
    /// logged and polling resumes after a delay; an expired event queue is
    /// registered again right away.
    pub async fn start(self) {
        info!("genderbot is running as {}", self.email);

        let mut queue = None;
        loop {
            if let Err(e) = self.poll(&mut queue).await {
                self.recover(e, &mut queue).await;
            }
        }
    }

    /// Handles the next batch of events, registering a queue first if needed.
    ///
    /// `queue.last_event_id` is advanced past every event read, including the
    /// ones that are not messages.
    async fn poll(&self, queue: &mut Option<EventQueue>) -> Result<(), ZulipError> {
        if queue.is_none() {
            *queue = Some(self.transport.register_queue().await?);
        }
        let Some(current) = queue.as_mut() else {
            return Ok(());
        };

        let events = self.transport.get_events(current).await?;
        for event in &events {
            current.last_event_id = current.last_event_id.max(event.id);
            self.handle_event(event).await;
        }

        Ok(())
    }

    /// Reacts to a failed poll.
    async fn recover(&self, error: ZulipError, queue: &mut Option<EventQueue>) {
        if error.is_bad_event_queue() {
            warn!("event queue expired, registering a new one");
            *queue = None;
            return;
        }

        error!(
            "failed to poll zulip: {}, retrying in {}s",
            error,
            self.retry_delay.as_secs()
        );
        sleep(self.retry_delay).await;
    }

    async fn handle_event(&self, event: &Event) {
        if let Some(message) = InboundMessage::from_event(event) {
            self.handle_message(message).await;
        }
    }

    /// Answers a single message, if it deserves an answer.
    async fn handle_message(&self, message: InboundMessage) {
        let Some(reply) = self.respond(&message) else {
            return;
        };

        if let Err(e) = self.transport.send_message(&reply).await {
            error!("failed to send reply to {}: {}", reply.to, e);
        }
    }

    /// Computes the reply to `message`.
    ///
    /// Returns `None` for messages sent by the bot itself and for messages
    /// whose processing failed.
    fn respond(&self, message: &InboundMessage) -> Option<OutboundMessage> {
        info!(
            "received new message from {}: {}",
            message.sender_email, message.content
        );

        // Prevent the bot from talking to itself
        if message.is_from(&self.email) {
            return None;
        }

        match self.commander.route(&message.content, &message.sender_email) {
            Ok(content) => Some(OutboundMessage::private_reply(message, content)),
            Err(e) => {
                error!(
                    "failed to process message from {}: {:?}",
                    message.sender_email, e
                );
                None
            }
        }
    }
}
