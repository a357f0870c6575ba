mod actor;
mod codec;
mod destination;
mod errors;
mod keyword;
mod reader;

pub use actor::{Action, Actor, DispatchError};
pub use destination::{Destination, Route};
pub use errors::ParseError;
pub use reader::{MAX_GROUP_DEPTH, Reader, ReaderState};
