//! Document event consumer interface.
//!
//! The [`Parser`](crate::Parser) interprets the raw token stream with the
//! standard control word tables and relays the result to an [`Actor`]
//! implementation. Downstream crates implement this trait to build a document
//! model, extract text, or collect metadata without touching the token
//! grammar themselves.

/// Document-information fields collected from the `\info` destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoKind {
    Title,
    Author,
    Subject,
}

/// Trait implemented by consumers of the interpreted document stream.
///
/// All methods have a default empty implementation so that implementations
/// only override what they care about. The parser invokes these callbacks
/// synchronously while it walks through the input.
pub trait Actor {
    /// A decoded character of document text. Paragraph and line breaks
    /// arrive as `'\n'`, page and section breaks as `'\x0c'`.
    fn print(&mut self, _: char) {}

    /// A completed document-information field, delivered when its group
    /// closes.
    fn info(&mut self, _: InfoKind, _: &str) {}

    /// A raw byte of a binary payload embedded in the main text flow.
    fn binary(&mut self, _: u8) {}
}
