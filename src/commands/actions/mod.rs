//! Command action handlers.
//!
//! Individual handler functions for each bot command. Each handler receives a
//! [`CommandContext`](crate::commands::CommandContext) and the argument string
//! of the message, and returns the Markdown reply.
//!
//! # Available Handlers
//!
//! - [`handle_get`] - Show pronoun sets
//! - [`handle_set`] - Store the sender's pronoun set
//! - [`handle_invite`] - Invite another user (always succeeds)
//! - [`handle_welcome`] - Introduce the bot and mark the sender as welcomed
//! - [`handle_unrecognized`] - Fallback for unknown keywords
//! - [`handle_unavailable`] - `add`, `delete` and `prefer`
//!
//! # Store Access
//!
//! `set` and `welcome` write to the store before returning, `get` and the
//! unrecognized fallback only read (the latter writes when it welcomes), and
//! `invite` and the unavailable commands never touch it.

mod get;
mod invite;
mod set;
mod unavailable;
mod welcome;

pub use crate::commands::actions::{
    get::handle_get,
    invite::handle_invite,
    set::handle_set,
    unavailable::handle_unavailable,
    welcome::{handle_unrecognized, handle_welcome},
};
