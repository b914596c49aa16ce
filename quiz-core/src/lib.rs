pub mod config;
pub mod countdown;
pub mod error;
pub mod repository;
pub mod round_events;
pub mod round_state;
pub mod scoring;
pub mod session;

// Re-export main components
pub use config::*;
pub use countdown::*;
pub use error::*;
pub use repository::*;
pub use round_events::*;
pub use round_state::*;
pub use scoring::*;
pub use session::*;
