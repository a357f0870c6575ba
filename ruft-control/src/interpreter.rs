//! Default interpretation of the RTF control word set.

use std::mem;

use log::debug;
use ruft_reader::{Action, Destination, DispatchError, ParseError, Reader};

use crate::actor::{Actor, InfoKind};
use crate::charset;
use crate::format::{Alignment, CharFormat, CharStyle, Format, ParFormat, SectionFormat};
use crate::keyword::{self, DestWord, FlagWord, ValueWord, Word};

/// Destinations minted by this layer, beyond the reader's built-ins.
const TITLE: Destination = Destination::delivering(2);
const AUTHOR: Destination = Destination::delivering(3);
const SUBJECT: Destination = Destination::delivering(4);

fn info_kind(destination: Destination) -> Option<InfoKind> {
    match destination {
        TITLE => Some(InfoKind::Title),
        AUTHOR => Some(InfoKind::Author),
        SUBJECT => Some(InfoKind::Subject),
        _ => None,
    }
}

/// Document-wide state that is not scoped to any group.
#[derive(Debug)]
struct Session {
    version: i32,
    code_page: u16,
    /// Set by `\*`, consumed by the next control word.
    skip_unknown: bool,
    /// Characters collected for the open information destination.
    buffer: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            version: 0,
            code_page: 1252,
            skip_unknown: false,
            buffer: String::new(),
        }
    }
}

/// High-level RTF parser that forwards document events to an
/// [`Actor`](crate::Actor).
#[derive(Debug, Default)]
pub struct Parser {
    reader: Reader<Format>,
    state: Session,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the parser with a new chunk of bytes.
    pub fn advance<A: Actor>(&mut self, bytes: &[u8], actor: &mut A) -> Result<(), ParseError> {
        let mut performer = Performer { state: &mut self.state, actor };
        self.reader.advance(bytes, &mut performer)
    }

    /// Signal end-of-stream and check that the document closed cleanly.
    pub fn finish(self) -> Result<(), ParseError> {
        self.reader.finish()
    }
}

/// Borrow of the session and the caller's actor for one `advance` call.
struct Performer<'a, A: Actor> {
    state: &'a mut Session,
    actor: &'a mut A,
}

impl<A: Actor> Performer<'_, A> {
    fn value(&mut self, format: &mut Format, value: ValueWord, param: i32) {
        match value {
            ValueWord::Font => format.character.font = param.max(0) as u16,
            ValueWord::FontSize => format.character.size = param.max(0) as u16,
            ValueWord::FirstIndent => format.paragraph.first_indent = param,
            ValueWord::LeftIndent => format.paragraph.left_indent = param,
            ValueWord::RightIndent => format.paragraph.right_indent = param,
            ValueWord::Columns => format.section.columns = param.max(1) as u16,
            ValueWord::PaperWidth => format.document.page_width = param,
            ValueWord::PaperHeight => format.document.page_height = param,
            ValueWord::MarginLeft => format.document.left_margin = param,
            ValueWord::MarginRight => format.document.right_margin = param,
            ValueWord::MarginTop => format.document.top_margin = param,
            ValueWord::MarginBottom => format.document.bottom_margin = param,
            ValueWord::DefaultFont => format.document.default_font = param.max(0) as u16,
            ValueWord::Version => self.state.version = param,
            ValueWord::CodePage => self.state.code_page = param.max(0) as u16,
        }
    }

    fn flag(&mut self, format: &mut Format, flag: FlagWord) {
        match flag {
            FlagWord::Plain => format.character = CharFormat::default(),
            FlagWord::ParagraphDefault => format.paragraph = ParFormat::default(),
            FlagWord::SectionDefault => format.section = SectionFormat::default(),
            FlagWord::AlignLeft => format.paragraph.alignment = Alignment::Left,
            FlagWord::AlignCenter => format.paragraph.alignment = Alignment::Center,
            FlagWord::AlignRight => format.paragraph.alignment = Alignment::Right,
            FlagWord::AlignJustify => format.paragraph.alignment = Alignment::Justify,
            FlagWord::UnderlineNone => {
                format.character.style.remove(CharStyle::UNDERLINE);
            },
            FlagWord::Landscape => format.document.landscape = true,
            FlagWord::FacingPages => format.document.facing_pages = true,
            FlagWord::Ansi => self.state.code_page = 1252,
            FlagWord::Mac => self.state.code_page = 10000,
            FlagWord::Pc => self.state.code_page = 437,
            FlagWord::Pca => self.state.code_page = 850,
        }
    }
}

impl<A: Actor> ruft_reader::Actor for Performer<'_, A> {
    type Format = Format;

    fn control(
        &mut self,
        format: &mut Format,
        word: &str,
        param: Option<i32>,
    ) -> Result<Action, DispatchError> {
        // `\*` guards exactly one following control word.
        let skip_unknown = mem::take(&mut self.state.skip_unknown);

        let action = match keyword::lookup(word) {
            Word::Char(byte) => Action::Emit(byte),
            Word::Toggle(style) => {
                format.character.style.set(style, param != Some(0));
                Action::None
            },
            Word::Value(value) => {
                self.value(format, value, param.unwrap_or(0));
                Action::None
            },
            Word::Flag(flag) => {
                self.flag(format, flag);
                Action::None
            },
            Word::Dest(dest) => Action::Destination(match dest {
                DestWord::Skip => Destination::SKIP,
                DestWord::Title => TITLE,
                DestWord::Author => AUTHOR,
                DestWord::Subject => SUBJECT,
            }),
            Word::Hex => Action::Hex,
            Word::Binary => Action::Binary(param.unwrap_or(0).max(0) as usize),
            Word::Ignorable => {
                self.state.skip_unknown = true;
                Action::None
            },
            Word::Unknown if skip_unknown => Action::Destination(Destination::SKIP),
            Word::Unknown => {
                debug!("[unhandled] control word: \\{word}");
                Action::None
            },
        };
        Ok(action)
    }

    fn group_end(&mut self, destination: Destination) -> Result<(), DispatchError> {
        if let Some(kind) = info_kind(destination) {
            let value = mem::take(&mut self.state.buffer);
            self.actor.info(kind, &value);
        }
        Ok(())
    }

    fn text(&mut self, byte: u8, destination: Destination) {
        let c = charset::decode(byte, self.state.code_page);
        match destination {
            Destination::TEXT => self.actor.print(c),
            _ if info_kind(destination).is_some() => self.state.buffer.push(c),
            _ => debug!("[unrouted] byte {byte:#04x} for destination {destination:?}"),
        }
    }

    fn binary(&mut self, byte: u8, destination: Destination) {
        if destination == Destination::TEXT {
            self.actor.binary(byte);
        }
    }
}
