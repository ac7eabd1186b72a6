//! Modal notifications
//!
//! Dialogs block the event loop until dismissed, so at most one is visible.

use crate::utils::error::GrabError;
use rfd::{MessageButtons, MessageDialog, MessageLevel};
use tracing::{info, warn};

pub fn error(err: &GrabError) {
    warn!("{}: {}", err.title(), err);
    show(MessageLevel::Error, err.title(), &err.to_string());
}

pub fn info(title: &str, description: &str) {
    info!("{}: {}", title, description);
    show(MessageLevel::Info, title, description);
}

fn show(level: MessageLevel, title: &str, description: &str) {
    let _ = MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::Ok)
        .show();
}
