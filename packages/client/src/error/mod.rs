pub mod classification;
pub mod constructors;
pub mod helpers;
pub mod types;

pub use constructors::*;
pub use helpers::{AuthRejected, ConnectionClosed, NoAcceptableMethod, TimedOut};
pub use types::{Error, Kind, Result};
