//! Plain-text extraction.

use ruft_reader::ParseError;

use crate::actor::Actor;
use crate::interpreter::Parser;

/// Actor that collects the main text flow into a string, dropping
/// formatting, metadata, and binary payloads.
#[derive(Debug, Default)]
pub struct PlainText {
    text: String,
}

impl PlainText {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The text collected so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }
}

impl Actor for PlainText {
    fn print(&mut self, c: char) {
        self.text.push(c);
    }
}

/// Parses a complete document and returns its plain text.
pub fn extract_text(bytes: &[u8]) -> Result<String, ParseError> {
    let mut parser = Parser::new();
    let mut collector = PlainText::new();
    parser.advance(bytes, &mut collector)?;
    parser.finish()?;
    Ok(collector.into_string())
}
