//! Markdown response formatters for bot commands.
//!
//! Every reply the bot sends is built here. Zulip renders the Markdown, so
//! command names are shown in bold and syntax in inline code.

use crate::store::PronounSet;

/// Whose pronouns a `get` reply talks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PronounOwner<'a> {
    /// The user who sent the command
    Sender,
    /// Another user, identified by email
    Other(&'a str),
}

impl PronounOwner<'_> {
    fn subject(&self) -> &'static str {
        match self {
            PronounOwner::Sender => "You have",
            PronounOwner::Other(_) => "This user has",
        }
    }

    fn possessive(&self) -> &'static str {
        match self {
            PronounOwner::Sender => "Your",
            PronounOwner::Other(_) => "This user's",
        }
    }
}

/// Reply to a message without any content.
pub fn format_empty_message() -> String {
    "Error: message is empty".to_owned()
}

/// Lists the commands users can run.
///
/// # Examples
///
/// ```text
/// Valid commands are **get** and **set**.
/// To learn more about a command, enter `<commandname> --help`
/// ```
pub fn format_help() -> String {
    "Valid commands are **get** and **set**.\n\
        To learn more about a command, enter `<commandname> --help`"
        .to_owned()
}

/// Introduces the bot, followed by the [`format_help`] message.
pub fn format_welcome() -> String {
    format!(
        "Hello! I am a robot that can store your preferred gendered pronouns.\n{}",
        format_help()
    )
}

/// Reply to `get` when the target has no pronoun set.
pub fn format_no_pronouns(owner: PronounOwner) -> String {
    let suffix = match owner {
        PronounOwner::Sender => "To set your pronouns, use the `set` command.".to_owned(),
        PronounOwner::Other(email) => {
            format!("You may invite this user by entering `invite {}`.", email)
        }
    };

    format!("{} not set any pronouns. {}", owner.subject(), suffix)
}

/// Formats a single pronoun set, in storage order.
///
/// ```text
/// (preferred) "they", "them", "their", "theirs", and "themselves"
/// ```
pub fn format_pronoun_set(set: &PronounSet) -> String {
    let forms = &set.forms;
    let preferred = if set.preferred { "(preferred) " } else { "" };

    format!(
        "{}\"{}\", \"{}\", \"{}\", \"{}\", and \"{}\"",
        preferred,
        forms.nominative,
        forms.oblique,
        forms.possessive,
        forms.possessive_determiner,
        forms.reflexive
    )
}

/// Reply to `get` listing the pronoun sets of the target.
///
/// A single set is rendered as one sentence, several sets as a numbered list.
/// An empty slice falls back to [`format_no_pronouns`].
pub fn format_pronoun_sets(owner: PronounOwner, sets: &[PronounSet]) -> String {
    match sets {
        [] => format_no_pronouns(owner),
        [set] => format!(
            "{} pronouns are: {}",
            owner.possessive(),
            format_pronoun_set(set)
        ),
        sets => {
            let list = sets
                .iter()
                .enumerate()
                .map(|(i, set)| format!("{}. {}", i + 1, format_pronoun_set(set)))
                .collect::<Vec<String>>()
                .join("\n");
            format!("{} pronouns are:\n{}", owner.possessive(), list)
        }
    }
}

/// Usage of the `get` command.
pub fn format_get_usage() -> String {
    "Usage:\n\
        `get [EMAIL]`\n\
        Example: `get alex@example.com`\n\
        Without EMAIL, your own pronouns are shown."
        .to_owned()
}

/// Usage of the `set` command.
pub fn format_set_usage() -> String {
    "Usage:\n\
        `set [INDEX] <nominative>, <oblique>, <determiner>, <possessive>, <reflexive>`\n\
        Example: `set they, them, their, theirs, themselves`\n\
        INDEX is only required if you have added more than one pronoun set."
        .to_owned()
}

/// Reply to a `set` command with the wrong number of pronouns.
pub fn format_invalid_set_field_count(count: usize) -> String {
    format!(
        "Invalid set command: expected 5 pronouns separated by `, ` but got {}.\n{}",
        count,
        format_set_usage()
    )
}

/// Reply to a `set` command with a pronoun over the length limit.
pub fn format_invalid_set_field_length(field: &str, max_length: usize) -> String {
    format!(
        "Invalid set command: \"{}\" is longer than {} characters.\n{}",
        field,
        max_length,
        format_set_usage()
    )
}

/// Usage of the `invite` command.
pub fn format_invite_usage() -> String {
    "Usage:\n\
        `invite <email>`\n\
        Example: `invite alex@example.com`"
        .to_owned()
}

pub fn format_successful_invite(invitee: &str) -> String {
    format!("You have successfully invited **{}**.", invitee)
}

pub fn format_already_invited() -> String {
    "This user has already been invited.".to_owned()
}

/// Reply to the commands that are registered but not available yet.
pub fn format_not_available(keyword: &str) -> String {
    format!("The **{}** command is not available yet.", keyword)
}
