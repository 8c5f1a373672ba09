//! Pronoun lookup command handler.
//!
//! Shows the pronoun sets of the sender, or of the user whose email is given
//! as argument. This command only reads the store.

use anyhow::Result;
use log::debug;

use crate::commands::{
    CommandContext,
    markdown_response::{PronounOwner, format_get_usage, format_pronoun_sets},
};

/// Returns the pronouns of `args`, or of the sender when `args` is empty.
///
/// An unknown user and a user without pronoun sets get the same reply; the
/// suggestion at the end depends on whether the sender asked about themself.
pub fn handle_get(context: &CommandContext, args: &str) -> Result<String> {
    debug!("handling get command: {:?}", args);

    if args == "--help" {
        return Ok(format_get_usage());
    }

    let email = if args.is_empty() { context.sender } else { args };
    let owner = if email == context.sender {
        PronounOwner::Sender
    } else {
        PronounOwner::Other(email)
    };

    let sets = context.database.list_pronoun_sets_by_email(email)?;
    debug!("found {} pronoun sets for {}", sets.len(), email);

    Ok(format_pronoun_sets(owner, &sets))
}
