//! The RTF reader state machine.
//!
//! One [`Reader`] drives one parse: bytes go in through [`Reader::advance`],
//! lexical events come out through the [`Actor`] callbacks, and
//! [`Reader::finish`] accounts for end-of-stream. Formatting and destination
//! state is saved on every `{` and restored on the matching `}`, so a group
//! inherits its enclosing state, may locally override it, and reverts
//! automatically — the scope stack is the undo log.

use crate::actor::{Action, Actor};
use crate::codec::{Codec, HexStep};
use crate::destination::Destination;
use crate::errors::ParseError;
use crate::keyword::{Keyword, MAX_KEYWORD_LEN, MAX_PARAM_DIGITS};

/// Deepest group nesting accepted before the parse aborts with
/// [`ParseError::StackOverflow`]. Real documents stay far below this; the
/// bound keeps attacker-controlled nesting from growing the stack without
/// limit.
pub const MAX_GROUP_DEPTH: usize = 256;

/// Sub-lexer mode governing how the next input bytes are decoded.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReaderState {
    /// Plain text and structural characters.
    #[default]
    Normal,
    /// The next two bytes are the nibbles of one hexadecimal escape.
    HexPair,
    /// A counted run of raw bytes; nothing in it is structural.
    Binary,
}

/// Scanner position inside a control word, tracked across chunk boundaries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Scan {
    #[default]
    Ground,
    /// The byte right after a backslash.
    Escape,
    /// Accumulating keyword letters.
    Word,
    /// A `-` arrived; expecting the first parameter digit.
    Sign,
    /// Accumulating parameter digits.
    Param,
}

/// Snapshot captured when a group opens and restored when it closes.
#[derive(Debug)]
struct Frame<F> {
    format: F,
    destination: Destination,
    state: ReaderState,
}

/// Streaming reader for the RTF token grammar.
///
/// Generic over the opaque formatting snapshot `F`; the actor supplied to
/// [`Reader::advance`] must use the same type. A reader that returned an
/// error is poisoned and must be discarded.
#[derive(Debug)]
pub struct Reader<F> {
    format: F,
    destination: Destination,
    state: ReaderState,
    scan: Scan,
    stack: Vec<Frame<F>>,
    keyword: Keyword,
    codec: Codec,
    offset: usize,
}

impl<F: Clone + Default> Default for Reader<F> {
    fn default() -> Self {
        Self {
            format: F::default(),
            destination: Destination::TEXT,
            state: ReaderState::default(),
            scan: Scan::default(),
            stack: Vec::new(),
            keyword: Keyword::default(),
            codec: Codec::default(),
            offset: 0,
        }
    }
}

impl<F: Clone + Default> Reader<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open, unmatched groups.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Advance the reader with a new chunk of bytes.
    pub fn advance<A>(&mut self, bytes: &[u8], actor: &mut A) -> Result<(), ParseError>
    where
        A: Actor<Format = F>,
    {
        for &byte in bytes {
            self.step(byte, actor)?;
            self.offset += 1;
        }
        Ok(())
    }

    /// Parse a complete document in one call: advance over `bytes`, then
    /// account for end-of-stream.
    pub fn run<A>(mut self, bytes: &[u8], actor: &mut A) -> Result<(), ParseError>
    where
        A: Actor<Format = F>,
    {
        self.advance(bytes, actor)?;
        self.finish()
    }

    /// Signal end-of-stream and check that the document closed cleanly.
    pub fn finish(self) -> Result<(), ParseError> {
        if self.scan != Scan::Ground {
            return Err(ParseError::UnexpectedEof { offset: self.offset });
        }
        if !self.stack.is_empty() {
            return Err(ParseError::UnmatchedBrace { depth: self.stack.len() });
        }
        Ok(())
    }

    fn step<A>(&mut self, byte: u8, actor: &mut A) -> Result<(), ParseError>
    where
        A: Actor<Format = F>,
    {
        // Binary data may contain bytes that look structural; it bypasses
        // every other classification until the counted run is complete.
        if self.state == ReaderState::Binary {
            if self.destination.delivers() {
                actor.binary(byte, self.destination);
            }
            if self.codec.binary_byte() {
                self.state = ReaderState::Normal;
            }
            return Ok(());
        }

        match self.scan {
            Scan::Ground => self.classify(byte, actor),
            Scan::Escape => self.escape(byte, actor),
            Scan::Word => self.word(byte, actor),
            Scan::Sign => self.sign(byte, actor),
            Scan::Param => self.param(byte, actor),
        }
    }

    fn classify<A>(&mut self, byte: u8, actor: &mut A) -> Result<(), ParseError>
    where
        A: Actor<Format = F>,
    {
        match byte {
            b'{' => self.push_group(),
            b'}' => self.pop_group(actor),
            b'\\' => {
                self.scan = Scan::Escape;
                Ok(())
            },
            // Line breaks in the source encoding carry no content.
            b'\r' | b'\n' => Ok(()),
            _ => match self.state {
                ReaderState::Normal => {
                    self.route(byte, actor);
                    Ok(())
                },
                ReaderState::HexPair => self.hex(byte, actor),
                ReaderState::Binary => {
                    Err(ParseError::UnreachableState { offset: self.offset })
                },
            },
        }
    }

    fn push_group(&mut self) -> Result<(), ParseError> {
        if self.stack.len() >= MAX_GROUP_DEPTH {
            return Err(ParseError::StackOverflow {
                offset: self.offset,
                max: MAX_GROUP_DEPTH,
            });
        }
        self.stack.push(Frame {
            format: self.format.clone(),
            destination: self.destination,
            state: self.state,
        });
        // A hex or binary run never crosses into a nested group.
        self.state = ReaderState::Normal;
        Ok(())
    }

    fn pop_group<A>(&mut self, actor: &mut A) -> Result<(), ParseError>
    where
        A: Actor<Format = F>,
    {
        let Some(frame) = self.stack.pop() else {
            return Err(ParseError::StackUnderflow { offset: self.offset });
        };
        // The group being closed switched destinations; give the semantic
        // layer its one chance to finalize the departing one.
        if frame.destination != self.destination {
            actor
                .group_end(self.destination)
                .map_err(|source| ParseError::Dispatch { offset: self.offset, source })?;
        }
        self.format = frame.format;
        self.destination = frame.destination;
        self.state = frame.state;
        Ok(())
    }

    fn escape<A>(&mut self, byte: u8, actor: &mut A) -> Result<(), ParseError>
    where
        A: Actor<Format = F>,
    {
        if byte.is_ascii_alphabetic() {
            self.keyword.begin(byte);
            self.scan = Scan::Word;
            return Ok(());
        }
        // A non-letter after the backslash is a control symbol: a
        // one-character keyword with no parameter and no delimiter.
        self.scan = Scan::Ground;
        self.keyword.begin_symbol(byte);
        self.dispatch(actor)
    }

    fn word<A>(&mut self, byte: u8, actor: &mut A) -> Result<(), ParseError>
    where
        A: Actor<Format = F>,
    {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' => {
                if !self.keyword.push_letter(byte) {
                    return Err(ParseError::KeywordTooLong {
                        offset: self.offset,
                        max: MAX_KEYWORD_LEN,
                    });
                }
                Ok(())
            },
            b'-' => {
                self.keyword.set_negative();
                self.scan = Scan::Sign;
                Ok(())
            },
            b'0'..=b'9' => {
                self.scan = Scan::Param;
                self.param(byte, actor)
            },
            _ => self.delimit(byte, actor),
        }
    }

    fn sign<A>(&mut self, byte: u8, actor: &mut A) -> Result<(), ParseError>
    where
        A: Actor<Format = F>,
    {
        if byte.is_ascii_digit() {
            self.scan = Scan::Param;
            return self.param(byte, actor);
        }
        // A dash with no digits behind it is swallowed and the keyword
        // dispatches without a parameter.
        self.delimit(byte, actor)
    }

    fn param<A>(&mut self, byte: u8, actor: &mut A) -> Result<(), ParseError>
    where
        A: Actor<Format = F>,
    {
        if byte.is_ascii_digit() {
            if !self.keyword.push_digit(byte) {
                return Err(ParseError::ParameterTooLong {
                    offset: self.offset,
                    max: MAX_PARAM_DIGITS,
                });
            }
            return Ok(());
        }
        self.delimit(byte, actor)
    }

    /// Ends the keyword at `byte`: dispatch, then either drop a single
    /// delimiting space or feed the byte back through classification.
    fn delimit<A>(&mut self, byte: u8, actor: &mut A) -> Result<(), ParseError>
    where
        A: Actor<Format = F>,
    {
        self.scan = Scan::Ground;
        self.dispatch(actor)?;
        if byte == b' ' {
            return Ok(());
        }
        self.step(byte, actor)
    }

    fn dispatch<A>(&mut self, actor: &mut A) -> Result<(), ParseError>
    where
        A: Actor<Format = F>,
    {
        let action = actor
            .control(&mut self.format, self.keyword.word(), self.keyword.param())
            .map_err(|source| ParseError::Dispatch { offset: self.offset, source })?;
        match action {
            Action::None => {},
            Action::Emit(byte) => self.route(byte, actor),
            Action::Destination(destination) => self.destination = destination,
            Action::Hex => self.state = ReaderState::HexPair,
            // A zero-length run has nothing to consume.
            Action::Binary(0) => {},
            Action::Binary(count) => {
                self.codec.start_binary(count);
                self.state = ReaderState::Binary;
            },
        }
        Ok(())
    }

    fn hex<A>(&mut self, byte: u8, actor: &mut A) -> Result<(), ParseError>
    where
        A: Actor<Format = F>,
    {
        match self.codec.hex_digit(byte) {
            HexStep::Pending => Ok(()),
            HexStep::Byte(decoded) => {
                self.state = ReaderState::Normal;
                self.route(decoded, actor);
                Ok(())
            },
            HexStep::Invalid => {
                Err(ParseError::InvalidHex { offset: self.offset, byte })
            },
        }
    }

    /// Forwards a decoded byte to the actor unless the active destination
    /// discards it.
    fn route<A>(&mut self, byte: u8, actor: &mut A)
    where
        A: Actor<Format = F>,
    {
        if self.destination.delivers() {
            actor.text(byte, self.destination);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::DispatchError;

    const ASIDE: Destination = Destination::delivering(7);

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Control { word: String, param: Option<i32>, format: i32 },
        GroupEnd(Destination),
        Text { byte: u8, destination: Destination },
        Binary { byte: u8, destination: Destination },
    }

    /// Records every callback and scripts actions off the keyword name:
    /// `set` writes its parameter into the formatting value, `skip` and
    /// `aside` switch destinations, `emit` routes its parameter as a
    /// literal byte, `'` and `bin` drive the sub-lexer, `fail` rejects.
    #[derive(Default)]
    struct CollectingActor {
        events: Vec<Event>,
    }

    impl Actor for CollectingActor {
        type Format = i32;

        fn control(
            &mut self,
            format: &mut i32,
            word: &str,
            param: Option<i32>,
        ) -> Result<Action, DispatchError> {
            self.events.push(Event::Control {
                word: word.to_string(),
                param,
                format: *format,
            });
            match word {
                "set" => {
                    *format = param.unwrap_or(0);
                    Ok(Action::None)
                },
                "skip" => Ok(Action::Destination(Destination::SKIP)),
                "aside" => Ok(Action::Destination(ASIDE)),
                "emit" => Ok(Action::Emit(param.unwrap_or(0) as u8)),
                "'" => Ok(Action::Hex),
                "bin" => Ok(Action::Binary(param.unwrap_or(0).max(0) as usize)),
                "fail" => Err("rejected".into()),
                _ => Ok(Action::None),
            }
        }

        fn group_end(&mut self, destination: Destination) -> Result<(), DispatchError> {
            self.events.push(Event::GroupEnd(destination));
            Ok(())
        }

        fn text(&mut self, byte: u8, destination: Destination) {
            self.events.push(Event::Text { byte, destination });
        }

        fn binary(&mut self, byte: u8, destination: Destination) {
            self.events.push(Event::Binary { byte, destination });
        }
    }

    fn text(byte: u8) -> Event {
        Event::Text { byte, destination: Destination::TEXT }
    }

    fn control(word: &str, param: Option<i32>, format: i32) -> Event {
        Event::Control { word: word.to_string(), param, format }
    }

    fn parse(bytes: &[u8]) -> Vec<Event> {
        let mut actor = CollectingActor::default();
        Reader::new().run(bytes, &mut actor).expect("parse failed");
        actor.events
    }

    fn parse_err(bytes: &[u8]) -> ParseError {
        let mut reader = Reader::new();
        let mut actor = CollectingActor::default();
        match reader.advance(bytes, &mut actor) {
            Err(err) => err,
            Ok(()) => reader.finish().expect_err("expected a parse error"),
        }
    }

    #[test]
    fn routes_literal_text() {
        assert_eq!(parse(b"{ab}"), vec![text(b'a'), text(b'b')]);
    }

    #[test]
    fn depth_returns_to_zero() {
        let mut reader = Reader::<i32>::new();
        let mut actor = CollectingActor::default();
        reader.advance(b"{a{b}", &mut actor).unwrap();
        assert_eq!(reader.depth(), 1);
        reader.advance(b"c}", &mut actor).unwrap();
        assert_eq!(reader.depth(), 0);
        reader.finish().unwrap();
    }

    #[test]
    fn extra_close_is_underflow_at_the_brace() {
        match parse_err(b"{a}}") {
            ParseError::StackUnderflow { offset } => assert_eq!(offset, 3),
            other => panic!("expected StackUnderflow, got {other:?}"),
        }
    }

    #[test]
    fn unmatched_open_fails_only_at_end_of_stream() {
        let mut reader = Reader::<i32>::new();
        let mut actor = CollectingActor::default();
        reader.advance(b"{{a}", &mut actor).unwrap();
        match reader.finish() {
            Err(ParseError::UnmatchedBrace { depth }) => assert_eq!(depth, 1),
            other => panic!("expected UnmatchedBrace, got {other:?}"),
        }
    }

    #[test]
    fn formatting_reverts_on_group_exit() {
        assert_eq!(
            parse(b"{\\set5{\\set9\\probe }\\probe }"),
            vec![
                control("set", Some(5), 0),
                control("set", Some(9), 5),
                control("probe", None, 9),
                control("probe", None, 5),
            ]
        );
    }

    #[test]
    fn destination_reverts_and_finalizes_once() {
        assert_eq!(
            parse(b"{a{\\skip b}c}"),
            vec![
                text(b'a'),
                control("skip", None, 0),
                Event::GroupEnd(Destination::SKIP),
                text(b'c'),
            ]
        );
    }

    #[test]
    fn unchanged_destination_skips_finalization() {
        let events = parse(b"{a{b}c}");
        assert!(!events.iter().any(|e| matches!(e, Event::GroupEnd(_))));
    }

    #[test]
    fn delivering_destinations_reach_the_actor() {
        assert_eq!(
            parse(b"{{\\aside x}y}"),
            vec![
                control("aside", None, 0),
                Event::Text { byte: b'x', destination: ASIDE },
                Event::GroupEnd(ASIDE),
                text(b'y'),
            ]
        );
    }

    #[test]
    fn hex_escape_decodes_and_routes() {
        assert_eq!(
            parse(b"{\\'41}"),
            vec![control("'", None, 0), text(0x41)]
        );
    }

    #[test]
    fn hex_escape_rejects_non_digits() {
        match parse_err(b"{\\'4x}") {
            ParseError::InvalidHex { offset, byte } => {
                assert_eq!(offset, 4);
                assert_eq!(byte, b'x');
            },
            other => panic!("expected InvalidHex, got {other:?}"),
        }
    }

    #[test]
    fn pending_hex_nibble_survives_a_nested_group() {
        // The frame restores the hex mode on exit; the half-decoded high
        // nibble picks up where it left off.
        assert_eq!(
            parse(b"{\\'4{a}1}"),
            vec![
                control("'", None, 0),
                text(b'a'),
                text(0x41),
            ]
        );
    }

    #[test]
    fn binary_run_passes_structural_bytes_verbatim() {
        assert_eq!(
            parse(b"{\\bin4 \x01{}\\x}"),
            vec![
                control("bin", Some(4), 0),
                Event::Binary { byte: 0x01, destination: Destination::TEXT },
                Event::Binary { byte: b'{', destination: Destination::TEXT },
                Event::Binary { byte: b'}', destination: Destination::TEXT },
                Event::Binary { byte: b'\\', destination: Destination::TEXT },
                text(b'x'),
            ]
        );
    }

    #[test]
    fn zero_length_binary_consumes_nothing() {
        assert_eq!(
            parse(b"{\\bin0 a}"),
            vec![control("bin", Some(0), 0), text(b'a')]
        );
    }

    #[test]
    fn binary_bytes_respect_the_router() {
        let events = parse(b"{\\skip\\bin2 ab}");
        assert!(!events.iter().any(|e| matches!(e, Event::Binary { .. })));
    }

    #[test]
    fn keyword_with_negative_parameter_eats_one_space() {
        assert_eq!(
            parse(b"{\\foo-12 x}"),
            vec![control("foo", Some(-12), 0), text(b'x')]
        );
    }

    #[test]
    fn non_space_delimiter_is_reclassified() {
        assert_eq!(
            parse(b"{\\foo12X}"),
            vec![control("foo", Some(12), 0), text(b'X')]
        );
    }

    #[test]
    fn dash_without_digits_is_swallowed() {
        assert_eq!(
            parse(b"{\\foo-x}"),
            vec![control("foo", None, 0), text(b'x')]
        );
    }

    #[test]
    fn control_symbol_takes_no_delimiter() {
        assert_eq!(
            parse(b"{\\~a}"),
            vec![control("~", None, 0), text(b'a')]
        );
    }

    #[test]
    fn emitted_bytes_flow_through_the_router() {
        assert_eq!(
            parse(b"{\\emit65 a}"),
            vec![control("emit", Some(65), 0), text(65), text(b'a')]
        );
        let skipped = parse(b"{\\skip\\emit65 }");
        assert!(!skipped.iter().any(|e| matches!(e, Event::Text { .. })));
    }

    #[test]
    fn line_breaks_are_noise() {
        assert_eq!(parse(b"{a\r\nb}"), vec![text(b'a'), text(b'b')]);
    }

    #[test]
    fn overlong_keyword_is_fatal() {
        let mut input = b"{\\".to_vec();
        input.extend_from_slice(&[b'a'; MAX_KEYWORD_LEN + 1]);
        input.push(b'}');
        assert!(matches!(
            parse_err(&input),
            ParseError::KeywordTooLong { .. }
        ));
    }

    #[test]
    fn overlong_parameter_is_fatal() {
        assert!(matches!(
            parse_err(b"{\\b123456789012 }"),
            ParseError::ParameterTooLong { .. }
        ));
    }

    #[test]
    fn end_of_stream_inside_a_keyword_is_fatal() {
        assert!(matches!(
            parse_err(b"{\\foo"),
            ParseError::UnexpectedEof { .. }
        ));
        assert!(matches!(parse_err(b"{\\"), ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn nesting_beyond_the_bound_overflows() {
        let input = vec![b'{'; MAX_GROUP_DEPTH + 1];
        match parse_err(&input) {
            ParseError::StackOverflow { offset, max } => {
                assert_eq!(offset, MAX_GROUP_DEPTH);
                assert_eq!(max, MAX_GROUP_DEPTH);
            },
            other => panic!("expected StackOverflow, got {other:?}"),
        }
    }

    #[test]
    fn dispatch_errors_surface_with_their_offset() {
        match parse_err(b"{\\fail }") {
            ParseError::Dispatch { offset, .. } => assert_eq!(offset, 6),
            other => panic!("expected Dispatch, got {other:?}"),
        }
    }
}
