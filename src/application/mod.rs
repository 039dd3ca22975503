mod background;
mod config;
mod error;
mod session;

pub use background::BackgroundCompute;
pub use config::{PatternSource, SessionConfig};
pub use error::SessionError;
pub use session::Session;
