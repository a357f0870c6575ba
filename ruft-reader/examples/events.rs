//! Print every event emitted by the reader for a small document.
use ruft_reader::{Action, Actor, Destination, DispatchError, Reader};

#[derive(Default)]
struct PrintingActor;

impl Actor for PrintingActor {
    type Format = ();

    fn control(
        &mut self,
        _format: &mut (),
        word: &str,
        param: Option<i32>,
    ) -> Result<Action, DispatchError> {
        println!("control: \\{word} param={param:?}");
        let action = match word {
            "'" => Action::Hex,
            "bin" => Action::Binary(param.unwrap_or(0).max(0) as usize),
            "nosuchthing" => Action::Destination(Destination::SKIP),
            _ => Action::None,
        };
        Ok(action)
    }

    fn group_end(&mut self, destination: Destination) -> Result<(), DispatchError> {
        println!("group end: {destination:?}");
        Ok(())
    }

    fn text(&mut self, byte: u8, destination: Destination) {
        println!("text: {:?} -> id {}", char::from(byte), destination.id);
    }

    fn binary(&mut self, byte: u8, destination: Destination) {
        println!("binary: {byte:#04x} -> id {}", destination.id);
    }
}

fn main() {
    let mut reader = Reader::new();
    let mut actor = PrintingActor;

    let bytes = b"{\\rtf1 Hex \\'41 and {\\nosuchthing hidden} text.}";
    reader.advance(bytes, &mut actor).expect("malformed input");
    reader.finish().expect("unbalanced document");
}
