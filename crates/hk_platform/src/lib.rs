pub mod error;
pub mod events;
pub mod hooks;
pub mod host;
pub mod subsystem;

pub use error::*;
pub use events::*;
pub use hooks::*;
pub use host::*;
pub use subsystem::*;
