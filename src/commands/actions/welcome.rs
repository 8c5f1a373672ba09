//! Welcome and unrecognized command handlers.
//!
//! New users are greeted once with an introduction. Afterwards, anything the
//! bot does not understand is answered with the list of valid commands.

use anyhow::Result;
use log::{debug, info};

use crate::{
    commands::{
        CommandContext,
        markdown_response::{format_help, format_welcome},
    },
    store::User,
};

/// Marks the sender as welcomed and returns the introduction message.
///
/// `user` avoids a second lookup when the caller already resolved the sender.
/// When it is `None`, the sender is looked up and created if needed.
pub fn handle_welcome(context: &CommandContext, user: Option<User>) -> Result<String> {
    debug!("handling welcome command for {}", context.sender);

    let user = match user {
        Some(user) => user,
        None => context.database.get_or_create_user(context.sender)?,
    };

    context.database.mark_welcomed(user.id)?;
    info!("welcomed {}", user.email);

    Ok(format_welcome())
}

/// Replies to a message whose command keyword is not registered.
///
/// Senders that are unknown or not welcomed yet get the welcome message,
/// everybody else gets the help message.
pub fn handle_unrecognized(context: &CommandContext) -> Result<String> {
    debug!("handling unrecognized command from {}", context.sender);

    let user = context.database.get_user(context.sender)?;
    let welcomed = user.as_ref().is_some_and(|user| user.welcomed);

    if welcomed {
        Ok(format_help())
    } else {
        handle_welcome(context, user)
    }
}
