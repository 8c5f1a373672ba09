//! Command keywords and message splitting.
//!
//! A message is split on its first space: the part before is the command
//! keyword, the rest is handed verbatim to the handler as its argument string.

use log::debug;

/// Every command the bot knows about.
///
/// Keywords are matched exactly and case-sensitively, see [`Command::from_keyword`].
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Command {
    /// Show the pronouns of the sender or of another user
    Get,
    /// Store the pronouns of the sender
    Set,
    /// Invite another user to the bot
    Invite,
    /// Add another pronoun set (not available yet)
    Add,
    /// Delete a pronoun set (not available yet)
    Delete,
    /// Choose the preferred pronoun set (not available yet)
    Prefer,
    /// Send the introductory message
    Welcome,
}

impl Command {
    /// All registered commands.
    pub const ALL: [Command; 7] = [
        Command::Get,
        Command::Set,
        Command::Invite,
        Command::Add,
        Command::Delete,
        Command::Prefer,
        Command::Welcome,
    ];

    /// Returns the keyword users type to run the command.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Get => "get",
            Command::Set => "set",
            Command::Invite => "invite",
            Command::Add => "add",
            Command::Delete => "delete",
            Command::Prefer => "prefer",
            Command::Welcome => "welcome",
        }
    }

    /// Resolves a keyword into a command, `None` if no command is registered for it.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Command::ALL
            .into_iter()
            .find(|command| command.keyword() == keyword)
    }
}

/// Splits a message into its command keyword and argument string.
///
/// Without any space, the whole message is the keyword and the arguments are empty.
pub fn split_command(content: &str) -> (&str, &str) {
    let (keyword, args) = content.split_once(' ').unwrap_or((content, ""));
    debug!("split message into keyword {:?} and arguments {:?}", keyword, args);
    (keyword, args)
}
