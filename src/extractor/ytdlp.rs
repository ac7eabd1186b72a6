//! yt-dlp wrapper for metadata extraction and downloading
//!
//! This module drives the yt-dlp executable as a subprocess.
//! It supports an explicitly configured binary, one shipped next to our own
//! executable, and system-installed yt-dlp.

use crate::extractor::models::{DownloadRequest, ProgressReport, RawInfo};
use crate::extractor::traits::Extractor;
use crate::utils::error::GrabError;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as AsyncCommand;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Marker prepended to every progress line we ask yt-dlp to print
const PROGRESS_PREFIX: &str = "[tubegrab]";

/// Field separator inside progress lines
const PROGRESS_SEPARATOR: char = '|';

/// Extractor backed by the yt-dlp executable
pub struct YtDlpExtractor {
    ytdlp_path: PathBuf,
}

impl YtDlpExtractor {
    /// Initialize extractor and verify yt-dlp availability
    ///
    /// Search order:
    /// 1. Explicit path from settings
    /// 2. Next to the running executable
    /// 3. System PATH
    /// 4. Common installation paths (Homebrew, pip --user, etc.)
    pub fn new(explicit: Option<&Path>) -> Result<Self, GrabError> {
        let ytdlp_path = match explicit {
            Some(path) if path.is_file() => path.to_path_buf(),
            Some(path) => {
                error!("Configured yt-dlp path does not exist: {}", path.display());
                return Err(GrabError::YtDlpNotFound);
            }
            None => find_ytdlp().ok_or(GrabError::YtDlpNotFound)?,
        };

        info!("Using yt-dlp at: {}", ytdlp_path.display());
        Ok(Self { ytdlp_path })
    }

    /// Get the path to yt-dlp being used
    pub fn ytdlp_path(&self) -> &Path {
        &self.ytdlp_path
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    fn id(&self) -> &'static str {
        "ytdlp"
    }

    /// Uses: yt-dlp --dump-single-json --flat-playlist --no-download
    ///
    /// A playlist URL yields one document for the playlist itself, so it
    /// reaches the platform check instead of one document per entry.
    async fn extract_metadata(&self, url: &str) -> Result<RawInfo> {
        debug!("Extracting metadata for URL: {}", url);

        let output = AsyncCommand::new(&self.ytdlp_path)
            .args(metadata_args(url))
            .output()
            .await
            .context("failed to run yt-dlp")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("yt-dlp extraction failed: {}", stderr.trim());
            return Err(anyhow!(error_summary(&stderr, output.status.code())));
        }

        let json_str = String::from_utf8(output.stdout)?;
        let info: RawInfo = serde_json::from_str(json_str.trim())
            .context("yt-dlp returned malformed metadata")?;
        debug!(
            "Extracted {} raw formats for {:?}",
            info.formats.len(),
            info.title
        );

        Ok(info)
    }

    /// Uses: yt-dlp -f <format> -o <template> --newline --progress-template ...
    async fn download(
        &self,
        request: DownloadRequest,
        progress: mpsc::Sender<ProgressReport>,
    ) -> Result<()> {
        info!(
            "Starting yt-dlp download of {} with format {}",
            request.url, request.format
        );

        let mut child = AsyncCommand::new(&self.ytdlp_path)
            .args(download_args(&request))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .context("failed to start yt-dlp")?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("failed to capture yt-dlp stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| anyhow!("failed to capture yt-dlp stderr"))?;

        let stderr_task = tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            let mut collected = String::new();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!("yt-dlp stderr: {}", line);
                collected.push_str(&line);
                collected.push('\n');
            }
            collected
        });

        let mut lines = BufReader::new(stdout).lines();
        while let Some(line) = lines.next_line().await? {
            match parse_progress_line(&line) {
                Some(report) => {
                    if progress.send(report).await.is_err() {
                        warn!("Progress receiver dropped; continuing download silently");
                    }
                }
                None => debug!("yt-dlp: {}", line),
            }
        }

        let status = child.wait().await?;
        let stderr = stderr_task.await.unwrap_or_default();

        if status.success() {
            info!("yt-dlp download finished");
            Ok(())
        } else {
            error!("yt-dlp download failed with {}", status);
            Err(anyhow!(error_summary(&stderr, status.code())))
        }
    }
}

/// Build the argument list for a metadata invocation
fn metadata_args(url: &str) -> Vec<String> {
    vec![
        "--dump-single-json".to_string(),
        "--flat-playlist".to_string(),
        "--no-download".to_string(),
        "--no-warnings".to_string(),
        "--no-playlist".to_string(),
        url.to_string(),
    ]
}

/// Build the argument list for a download invocation
fn download_args(request: &DownloadRequest) -> Vec<String> {
    let template = format!(
        "download:{prefix}%(progress.status)s{sep}%(progress._percent_str)s{sep}%(progress._total_bytes_str)s{sep}%(progress._speed_str)s",
        prefix = PROGRESS_PREFIX,
        sep = PROGRESS_SEPARATOR,
    );

    vec![
        "-f".to_string(),
        request.format.clone(),
        "-o".to_string(),
        request.output_template.to_string_lossy().to_string(),
        "--newline".to_string(),
        "--no-warnings".to_string(),
        "--no-playlist".to_string(),
        "--progress-template".to_string(),
        template,
        request.url.clone(),
    ]
}

/// Parse a line produced by our progress template
fn parse_progress_line(line: &str) -> Option<ProgressReport> {
    let body = line.trim_end().strip_prefix(PROGRESS_PREFIX)?;
    let mut fields = body.splitn(4, PROGRESS_SEPARATOR);

    Some(ProgressReport {
        status: fields.next()?.to_string(),
        percent: fields.next()?.to_string(),
        total: fields.next()?.to_string(),
        speed: fields.next()?.to_string(),
    })
}

/// Reduce yt-dlp stderr to the message shown to the user
fn error_summary(stderr: &str, code: Option<i32>) -> String {
    let lines: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if let Some(line) = lines.iter().rev().find(|l| l.starts_with("ERROR:")) {
        return line.trim_start_matches("ERROR:").trim().to_string();
    }

    match (lines.last(), code) {
        (Some(line), _) => line.to_string(),
        (None, Some(code)) => format!("yt-dlp exited with status {}", code),
        (None, None) => "yt-dlp was terminated by a signal".to_string(),
    }
}

// ============================================================
// yt-dlp Detection Functions
// ============================================================

fn binary_name() -> &'static str {
    if cfg!(target_os = "windows") {
        "yt-dlp.exe"
    } else {
        "yt-dlp"
    }
}

/// Find yt-dlp binary with priority:
/// 1. Next to the running executable
/// 2. System PATH
/// 3. Common installation paths
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Some(bundled) = find_beside_executable() {
        info!("✓ Using bundled yt-dlp: {:?}", bundled);
        return Some(bundled);
    }

    if let Ok(system) = which::which(binary_name()) {
        info!("✓ Using system yt-dlp: {:?}", system);
        return Some(system);
    }

    if let Some(common) = find_in_common_paths() {
        info!("✓ Using yt-dlp from common path: {:?}", common);
        return Some(common);
    }

    warn!("✗ yt-dlp not found anywhere!");
    None
}

fn find_beside_executable() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let candidate = exe_path.parent()?.join(binary_name());
    is_executable(&candidate).then_some(candidate)
}

fn find_in_common_paths() -> Option<PathBuf> {
    let mut candidates = vec![
        // macOS Homebrew (Apple Silicon)
        PathBuf::from("/opt/homebrew/bin/yt-dlp"),
        // macOS Homebrew (Intel)
        PathBuf::from("/usr/local/bin/yt-dlp"),
        PathBuf::from("/usr/bin/yt-dlp"),
    ];

    // pip --user installs
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".local").join("bin").join("yt-dlp"));
    }

    candidates.into_iter().find(|p| is_executable(p))
}

/// Check if a file is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(path)
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        path.is_file()
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_progress_line() {
        let report =
            parse_progress_line("[tubegrab]downloading|  42.0%| 10.00MiB|  1.50MiB/s").unwrap();
        assert!(report.is_downloading());
        assert_eq!(report.percent, "  42.0%");
        assert_eq!(report.total, " 10.00MiB");
        assert_eq!(report.speed, "  1.50MiB/s");
    }

    #[test]
    fn test_parse_ignores_other_output() {
        assert!(parse_progress_line("[download] Destination: clip.mp4").is_none());
        assert!(parse_progress_line("[tubegrab]downloading|12%").is_none());
    }

    #[test]
    fn test_download_args_carry_format_and_template() {
        let request = DownloadRequest {
            url: "https://www.youtube.com/watch?v=abc".to_string(),
            format: "137+140".to_string(),
            output_template: PathBuf::from("/tmp/out/%(title)s.%(ext)s"),
        };
        let args = download_args(&request);

        let f = args.iter().position(|a| a == "-f").unwrap();
        assert_eq!(args[f + 1], "137+140");
        let o = args.iter().position(|a| a == "-o").unwrap();
        assert_eq!(args[o + 1], "/tmp/out/%(title)s.%(ext)s");
        assert_eq!(args.last().unwrap(), &request.url);
    }

    #[test]
    fn test_metadata_args_request_one_document() {
        let args = metadata_args("https://www.youtube.com/playlist?list=PLx");
        assert_eq!(args[0], "--dump-single-json");
        assert!(args.iter().any(|a| a == "--flat-playlist"));
        assert!(!args.iter().any(|a| a == "--dump-json"));
        assert_eq!(args.last().unwrap(), "https://www.youtube.com/playlist?list=PLx");
    }

    #[test]
    fn test_error_summary_prefers_error_line() {
        let stderr = "WARNING: something\nERROR: [youtube] abc: Video unavailable\n";
        assert_eq!(
            error_summary(stderr, Some(1)),
            "[youtube] abc: Video unavailable"
        );
        assert_eq!(error_summary("", Some(2)), "yt-dlp exited with status 2");
    }

    #[test]
    fn test_explicit_missing_path_is_rejected() {
        let result = YtDlpExtractor::new(Some(Path::new("/definitely/not/yt-dlp")));
        assert_eq!(result.err(), Some(GrabError::YtDlpNotFound));
    }

    #[test]
    fn test_find_ytdlp() {
        let result = find_ytdlp();
        println!("yt-dlp found at: {:?}", result);
        // Don't assert - yt-dlp might not be installed in CI
    }

    #[test]
    fn test_is_executable() {
        let path = PathBuf::from("/bin/sh");
        if path.exists() {
            assert!(is_executable(&path));
        }
    }
}
