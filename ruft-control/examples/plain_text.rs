//! Extract the plain text of an embedded document.
use ruft_control::extract_text;

fn main() {
    let bytes = br"{\rtf1\ansi\deff0{\fonttbl{\f0\fswiss Helv;}}{\info{\title Demo}}\pard\plain Hello, \b world\b0 !\par}";

    match extract_text(bytes) {
        Ok(text) => print!("{text}"),
        Err(err) => eprintln!("parse failed: {err}"),
    }
}
