pub mod brush;
pub mod cli;
pub mod clone;
pub mod draw;
pub mod error;
pub mod gamma;
pub mod history;
pub mod io;
pub mod region;
pub mod session;
pub mod types;
pub mod window;

pub use error::Error;
pub use session::{Event, Outcome, Session, SessionState};
pub use types::{FeatherMask, FrameBuffer, Point};
