//! # Keyword Token Handling
//!
//! Reserved words of the script language. Keywords are recognized from complete
//! identifiers (see [`parse_identifier`](super::token::parse_identifier)), so
//! `printer` is an identifier and never `print` followed by `er`.

/// Represents the keywords recognized by ndnc scripts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumString,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    /// Writes the value of an expression followed by a newline.
    Print,
    /// Binds the value of an expression to a name.
    Let,
    /// Expresses an Interest for a named piece of content.
    Interest,
}
