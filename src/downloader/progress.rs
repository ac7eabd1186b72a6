//! Console events produced while a download runs

use crate::extractor::ProgressReport;

pub const STARTING_LINE: &str = "Starting download...";
pub const COMPLETED_LINE: &str = "Download completed successfully!";

/// Terminal result of one download attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Carries the extractor's error message
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// Event emitted by the orchestrator, in production order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEvent {
    /// One console line
    Log(String),
    /// Always the last event of a download
    Finished(Outcome),
}

/// Console line for a progress report
pub fn progress_line(report: &ProgressReport) -> String {
    format!(
        "Downloading: {} of {} at {}",
        report.percent, report.total, report.speed
    )
}

/// Console line for a failed download
pub fn failure_line(cause: &str) -> String {
    format!("Download failed: {}", cause)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_line_is_verbatim() {
        let report = ProgressReport::downloading(" 12.5%", "10.00MiB", "1.00MiB/s");
        assert_eq!(
            progress_line(&report),
            "Downloading:  12.5% of 10.00MiB at 1.00MiB/s"
        );
    }

    #[test]
    fn test_failure_line() {
        assert_eq!(failure_line("HTTP Error 403"), "Download failed: HTTP Error 403");
        assert!(!Outcome::Failure("x".into()).is_success());
        assert!(Outcome::Success.is_success());
    }
}
