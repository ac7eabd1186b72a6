//! Download orchestration

pub mod orchestrator;
pub mod progress;

pub use orchestrator::DownloadOrchestrator;
pub use progress::{DownloadEvent, Outcome};
