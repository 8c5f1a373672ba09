//! Pronoun registration command handler.
//!
//! Parses the five pronoun forms given by the sender and stores them as the
//! sender's only pronoun set, then replies with the same output as `get`.
//!
//! # Syntax
//!
//! ```text
//! set [INDEX] <nominative>, <oblique>, <determiner>, <possessive>, <reflexive>
//! ```
//!
//! Fields are separated by a comma followed by a space. The fields are stored
//! by position: the third one in the `possessive` column and the fourth one in
//! the `possessive_determiner` column, whatever the usage text calls them.
//!
//! INDEX is parsed and stripped from the first field but does not select a set:
//! only one pronoun set per user can be stored for now.

use anyhow::Result;
use log::{debug, info};

use crate::{
    commands::{
        CommandContext,
        actions::get::handle_get,
        markdown_response::{
            format_invalid_set_field_count, format_invalid_set_field_length, format_set_usage,
        },
    },
    store::PronounForms,
};

/// Maximum length of a single pronoun form, in characters.
pub const MAX_FORM_LENGTH: usize = 50;

/// Arguments of a valid `set` command.
#[derive(Debug, PartialEq, Eq)]
pub struct SetArguments {
    /// Index typed before the first pronoun, if any
    pub index: Option<u32>,
    pub forms: PronounForms,
}

/// Reasons a `set` argument string is rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum SetArgumentsError {
    /// Not exactly five fields
    WrongFieldCount(usize),
    /// A field is longer than [`MAX_FORM_LENGTH`]
    FieldTooLong(String),
}

/// Stores the pronouns in `args` for the sender and returns the resulting `get` reply.
///
/// The sender is created in the store if needed. An empty argument string or
/// `--help` returns the usage text without touching the store.
pub fn handle_set(context: &CommandContext, args: &str) -> Result<String> {
    debug!("handling set command: {:?}", args);

    if args.is_empty() || args == "--help" {
        return Ok(format_set_usage());
    }

    let arguments = match parse_set_arguments(args) {
        Ok(arguments) => arguments,
        Err(SetArgumentsError::WrongFieldCount(count)) => {
            return Ok(format_invalid_set_field_count(count));
        }
        Err(SetArgumentsError::FieldTooLong(field)) => {
            return Ok(format_invalid_set_field_length(&field, MAX_FORM_LENGTH));
        }
    };

    if let Some(index) = arguments.index {
        debug!("ignoring set index {}, only one pronoun set is supported", index);
    }

    let user = context.database.get_or_create_user(context.sender)?;
    match context.database.upsert_sole_set(user.id, &arguments.forms)? {
        Some(set) => info!("stored pronoun set {} of {}", set.id, context.sender),
        None => info!(
            "{} has several pronoun sets, set command ignored",
            context.sender
        ),
    }

    handle_get(context, "")
}

/// Splits a `set` argument string into an optional index and five pronoun forms.
pub fn parse_set_arguments(args: &str) -> Result<SetArguments, SetArgumentsError> {
    let mut fields: Vec<&str> = args.split(", ").collect();
    let mut index = None;

    // An index is a leading token starting with a digit and followed by a space
    if fields[0].starts_with(|c: char| c.is_ascii_digit())
        && let Some((token, rest)) = fields[0].split_once(' ')
    {
        index = token.parse::<u32>().ok();
        fields[0] = rest;
    }

    let [nominative, oblique, possessive, possessive_determiner, reflexive] = fields[..] else {
        return Err(SetArgumentsError::WrongFieldCount(fields.len()));
    };

    if let Some(field) = fields
        .iter()
        .find(|field| field.chars().count() > MAX_FORM_LENGTH)
    {
        return Err(SetArgumentsError::FieldTooLong(field.to_string()));
    }

    Ok(SetArguments {
        index,
        forms: PronounForms {
            nominative: nominative.to_owned(),
            oblique: oblique.to_owned(),
            possessive: possessive.to_owned(),
            possessive_determiner: possessive_determiner.to_owned(),
            reflexive: reflexive.to_owned(),
        },
    })
}
