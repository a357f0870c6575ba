//! Callbacks invoked by the RTF reader.
//!
//! The [`Reader`](crate::Reader) walks through a byte stream and
//! translates it into lexical events: control words, group transitions, and
//! decoded characters. Those events are handed over to an [`Actor`]
//! implementation that owns the keyword dispatch table, the destination set,
//! and whatever document model the embedding application builds. The reader
//! performs no semantic interpretation of its own; everything it learns about
//! a control word comes back through the [`Action`] the actor returns.

use crate::destination::Destination;

/// Failure surfaced by an [`Actor`] implementation.
///
/// The reader wraps it with the current byte offset as
/// [`ParseError::Dispatch`](crate::ParseError::Dispatch) and aborts.
pub type DispatchError = Box<dyn std::error::Error + Send + Sync>;

/// Effect the reader applies after a control word has been dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing to apply; the actor consumed the word or chose to ignore it.
    None,
    /// Route a literal byte through the active destination.
    Emit(u8),
    /// Switch the active destination for the remainder of the current group.
    Destination(Destination),
    /// Decode the next two bytes as one hexadecimal escape.
    Hex,
    /// Consume the next `n` bytes verbatim as binary data.
    Binary(usize),
}

/// Consumer-facing interface for lexical events emitted by the reader.
pub trait Actor {
    /// Formatting snapshot saved when a group opens and restored when it
    /// closes. The reader copies it verbatim and never looks inside;
    /// ownership and meaning belong to the implementation.
    type Format: Clone + Default;

    /// Told about every control word or control symbol.
    ///
    /// `word` is the keyword text without the leading backslash; for a
    /// control symbol it is the single non-letter character. `param` is
    /// `Some` only when an explicit numeric parameter was present, so a
    /// literal `0` is distinguishable from no parameter at all. The
    /// formatting state is passed by exclusive reference so the dispatch
    /// table can mutate the fields it recognizes.
    fn control(
        &mut self,
        format: &mut Self::Format,
        word: &str,
        param: Option<i32>,
    ) -> Result<Action, DispatchError>;

    /// Called right before a closing brace restores the enclosing state,
    /// exactly when the group being closed had switched destinations.
    ///
    /// `destination` is the one about to be replaced; this is the single
    /// place to flush anything collected for it.
    fn group_end(&mut self, destination: Destination) -> Result<(), DispatchError>;

    /// Receives each decoded text byte routed to a delivering destination.
    /// Literal characters, hex-escape results, and [`Action::Emit`] bytes
    /// all arrive here.
    fn text(&mut self, byte: u8, destination: Destination);

    /// Receives each byte of a counted binary run routed to a delivering
    /// destination. Kept apart from [`Actor::text`] because binary payloads
    /// are not characters in any code page.
    fn binary(&mut self, byte: u8, destination: Destination);
}
