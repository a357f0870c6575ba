//! The standard control word table.

use crate::format::CharStyle;

/// Classes of control word the built-in interpreter recognizes, following
/// the symbol / toggle / value / flag / destination taxonomy of the format
/// specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Word {
    /// Emits a fixed literal byte into the active destination.
    Char(u8),
    /// Flips a character style bit; no parameter or a non-zero parameter
    /// sets it, an explicit zero clears it.
    Toggle(CharStyle),
    /// Carries a numeric value for a formatting or session field.
    Value(ValueWord),
    /// Switches state without a parameter.
    Flag(FlagWord),
    /// Opens a destination.
    Dest(DestWord),
    /// The next two bytes are a hexadecimal escape.
    Hex,
    /// A counted run of raw bytes follows, length in the parameter.
    Binary,
    /// Marks the next control word's destination as ignorable if unknown.
    Ignorable,
    /// Not in the table.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueWord {
    Font,
    FontSize,
    FirstIndent,
    LeftIndent,
    RightIndent,
    Columns,
    PaperWidth,
    PaperHeight,
    MarginLeft,
    MarginRight,
    MarginTop,
    MarginBottom,
    DefaultFont,
    Version,
    CodePage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlagWord {
    Plain,
    ParagraphDefault,
    SectionDefault,
    AlignLeft,
    AlignCenter,
    AlignRight,
    AlignJustify,
    UnderlineNone,
    Landscape,
    FacingPages,
    Ansi,
    Mac,
    Pc,
    Pca,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DestWord {
    Skip,
    Title,
    Author,
    Subject,
}

/// Looks a control word up by its name (case-sensitive, without the
/// backslash; control symbols appear as their single character).
pub(crate) fn lookup(word: &str) -> Word {
    use Word::*;

    match word {
        // Escaped structural characters keep their literal value.
        "\\" => Char(b'\\'),
        "{" => Char(b'{'),
        "}" => Char(b'}'),
        // Special characters, named or emitted as their Windows-1252 bytes.
        "~" => Char(0xa0),
        "-" => Char(0xad),
        "_" => Char(b'-'),
        "tab" => Char(b'\t'),
        "par" | "line" => Char(b'\n'),
        "page" | "sect" => Char(0x0c),
        "lquote" => Char(0x91),
        "rquote" => Char(0x92),
        "ldblquote" => Char(0x93),
        "rdblquote" => Char(0x94),
        "bullet" => Char(0x95),
        "endash" => Char(0x96),
        "emdash" => Char(0x97),
        // Sub-lexer switches.
        "'" => Hex,
        "bin" => Binary,
        "*" => Ignorable,
        // Character formatting.
        "b" => Toggle(CharStyle::BOLD),
        "i" => Toggle(CharStyle::ITALIC),
        "ul" => Toggle(CharStyle::UNDERLINE),
        "strike" => Toggle(CharStyle::STRIKE),
        "scaps" => Toggle(CharStyle::SMALL_CAPS),
        "v" => Toggle(CharStyle::HIDDEN),
        "ulnone" => Flag(FlagWord::UnderlineNone),
        "plain" => Flag(FlagWord::Plain),
        "f" => Value(ValueWord::Font),
        "fs" => Value(ValueWord::FontSize),
        // Paragraph formatting.
        "pard" => Flag(FlagWord::ParagraphDefault),
        "ql" => Flag(FlagWord::AlignLeft),
        "qc" => Flag(FlagWord::AlignCenter),
        "qr" => Flag(FlagWord::AlignRight),
        "qj" => Flag(FlagWord::AlignJustify),
        "fi" => Value(ValueWord::FirstIndent),
        "li" => Value(ValueWord::LeftIndent),
        "ri" => Value(ValueWord::RightIndent),
        // Section formatting.
        "sectd" => Flag(FlagWord::SectionDefault),
        "cols" => Value(ValueWord::Columns),
        // Document formatting.
        "paperw" => Value(ValueWord::PaperWidth),
        "paperh" => Value(ValueWord::PaperHeight),
        "margl" => Value(ValueWord::MarginLeft),
        "margr" => Value(ValueWord::MarginRight),
        "margt" => Value(ValueWord::MarginTop),
        "margb" => Value(ValueWord::MarginBottom),
        "deff" => Value(ValueWord::DefaultFont),
        "landscape" => Flag(FlagWord::Landscape),
        "facingp" => Flag(FlagWord::FacingPages),
        // Session-wide words.
        "rtf" => Value(ValueWord::Version),
        "ansicpg" => Value(ValueWord::CodePage),
        "ansi" => Flag(FlagWord::Ansi),
        "mac" => Flag(FlagWord::Mac),
        "pc" => Flag(FlagWord::Pc),
        "pca" => Flag(FlagWord::Pca),
        // Destinations the interpreter collects.
        "title" => Dest(DestWord::Title),
        "author" => Dest(DestWord::Author),
        "subject" => Dest(DestWord::Subject),
        // Destinations the interpreter throws away.
        "fonttbl" | "colortbl" | "stylesheet" | "info" | "pict" | "header"
        | "footer" | "footnote" | "comment" => Dest(DestWord::Skip),
        _ => Unknown,
    }
}
