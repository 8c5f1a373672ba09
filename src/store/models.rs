//! Rows of the `users` and `user_pronoun_sets` tables.

/// A person known to the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned identity
    pub id: i64,
    /// Email of the person, as reported by the transport
    pub email: String,
    /// Whether the introductory message has been sent
    pub welcomed: bool,
    /// Whether the person has been invited (not used yet)
    pub invited: bool,
}

/// The five word forms of a pronoun set, in storage and display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PronounForms {
    /// Subject form, e.g. "they"
    pub nominative: String,
    /// Object form, e.g. "them"
    pub oblique: String,
    /// e.g. "their"
    pub possessive: String,
    /// e.g. "theirs"
    pub possessive_determiner: String,
    /// e.g. "themselves"
    pub reflexive: String,
}

/// A pronoun set owned by a [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PronounSet {
    pub id: i64,
    pub user_id: i64,
    /// At most one set per user is preferred
    pub preferred: bool,
    pub forms: PronounForms,
}
