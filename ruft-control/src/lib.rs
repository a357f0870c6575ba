mod actor;
mod charset;
mod format;
mod interpreter;
mod keyword;
mod text;

pub use actor::{Actor, InfoKind};
pub use format::{
    Alignment, CharFormat, CharStyle, DocFormat, Format, ParFormat, SectionFormat,
};
pub use interpreter::Parser;
pub use ruft_reader::ParseError;
pub use text::{PlainText, extract_text};
