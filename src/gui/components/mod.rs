//! GUI components

pub mod console;
pub mod stream_picker;
pub mod url_input;

// Re-export for convenience
pub use console::{console, console_id};
pub use stream_picker::{stream_picker, StreamChoices, StreamOption};
pub use url_input::url_input;
