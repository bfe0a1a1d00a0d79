//! Line-oriented text protocol spoken between the board authority and the decision agent.
//!
//! The authority reads one `row column kind` action per turn and answers with the full rendered
//! board; once the game ends it prints a headline and a `visited marked` summary line.

pub use codec::*;
pub use error::*;
pub use session::*;

mod codec;
mod error;
mod session;
