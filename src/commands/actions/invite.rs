//! Invitation command handler.
//!
//! Invitations are not delivered anywhere yet: [`send_invitation`] always
//! reports success and nothing is written to the store.

use log::debug;

use crate::commands::{
    CommandContext,
    markdown_response::{format_already_invited, format_invite_usage, format_successful_invite},
};

/// Invites the user whose email is given as argument.
pub fn handle_invite(context: &CommandContext, args: &str) -> String {
    debug!("handling invite command from {}: {:?}", context.sender, args);

    if args.is_empty() || args == "--help" {
        return format_invite_usage();
    }

    if send_invitation(args) {
        format_successful_invite(args)
    } else {
        format_already_invited()
    }
}

/// Sends an invitation to `invitee`, returns `true` on success.
fn send_invitation(invitee: &str) -> bool {
    debug!("pretending to invite {}", invitee);
    true
}
