//! Drives `YtDlpExtractor` against a shell script that mimics yt-dlp output.
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tubegrab::downloader::{DownloadEvent, DownloadOrchestrator, Outcome};
use tubegrab::extractor::YtDlpExtractor;
use tubegrab::selection::{resolve, Selection};
use tubegrab::{GrabError, StreamCatalogue, StreamKind};

const FAKE_YTDLP: &str = r#"#!/bin/sh
for url; do :; done
case "$1" in
  --dump-single-json)
    case "$url" in
      *playlist*)
        cat <<'JSON'
{"id":"PLx","title":"Fake Playlist","extractor_key":"YoutubeTab","_type":"playlist","entries":[
 {"_type":"url","id":"abc","url":"https://www.youtube.com/watch?v=abc"},
 {"_type":"url","id":"def","url":"https://www.youtube.com/watch?v=def"}
]}
JSON
        exit 0
        ;;
    esac
    cat <<'JSON'
{"id":"abc","title":"Fake Clip","extractor_key":"Youtube","webpage_url":"https://www.youtube.com/watch?v=abc","formats":[
 {"format_id":"sb0","ext":"mhtml","vcodec":"none","acodec":"none","video_ext":"none","audio_ext":"none"},
 {"format_id":"18","ext":"mp4","vcodec":"avc1.42001E","acodec":"mp4a.40.2","video_ext":"mp4","audio_ext":"none","resolution":"640x360","fps":25,"filesize":1048576},
 {"format_id":"251","ext":"webm","vcodec":"none","acodec":"opus","video_ext":"none","audio_ext":"webm","resolution":"audio only"}
]}
JSON
    ;;
  -f)
    echo "[download] Destination: Fake Clip.mp4"
    echo "[tubegrab]downloading| 50.0%|2.00MiB|1.00MiB/s"
    echo "[tubegrab]downloading|100.0%|2.00MiB|1.00MiB/s"
    echo "[tubegrab]finished|100%|2.00MiB|N/A"
    echo "ERROR: unable to write data: No space left on device" >&2
    exit 1
    ;;
esac
"#;

fn install_fake(dir: &Path) -> PathBuf {
    let path = dir.join("yt-dlp");
    std::fs::write(&path, FAKE_YTDLP).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[tokio::test]
async fn fake_ytdlp_fetch_and_failing_download() {
    let bin_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let ytdlp = install_fake(bin_dir.path());

    let extractor = Arc::new(YtDlpExtractor::new(Some(ytdlp.as_path())).unwrap());
    assert_eq!(extractor.ytdlp_path(), ytdlp.as_path());

    let service = StreamCatalogue::new(extractor.clone(), "youtube", "YouTube");
    let catalogue = service
        .fetch("https://www.youtube.com/watch?v=abc")
        .await
        .unwrap();

    assert_eq!(catalogue.title, "Fake Clip");
    assert_eq!(catalogue.len(), 2);
    let combined = catalogue.get("18").unwrap();
    assert_eq!(combined.kind, StreamKind::CombinedAV);
    assert_eq!(
        combined.display_label(),
        "Video+Audio | mp4 | 640x360 | 25fps | 1.00 MB | Video: avc1 | Audio: mp4a"
    );
    assert_eq!(catalogue.get("251").unwrap().kind, StreamKind::AudioOnly);

    let directive = resolve(
        &catalogue,
        &Selection::Single {
            format_id: Some("18".to_string()),
        },
        Some(out_dir.path()),
    )
    .unwrap();

    let orchestrator = DownloadOrchestrator::new(extractor);
    let (tx, mut rx) = mpsc::channel(32);
    let outcome = orchestrator.execute(&directive, &tx).await;
    drop(tx);

    let mut lines = Vec::new();
    while let Some(event) = rx.recv().await {
        if let DownloadEvent::Log(line) = event {
            lines.push(line);
        }
    }

    assert_eq!(
        outcome,
        Outcome::Failure("unable to write data: No space left on device".to_string())
    );
    assert_eq!(
        lines,
        [
            "Starting download...",
            "Downloading:  50.0% of 2.00MiB at 1.00MiB/s",
            "Downloading: 100.0% of 2.00MiB at 1.00MiB/s",
            "Download failed: unable to write data: No space left on device",
        ]
    );
}

#[tokio::test]
async fn playlist_url_is_rejected_as_unsupported_source() {
    let bin_dir = TempDir::new().unwrap();
    let ytdlp = install_fake(bin_dir.path());

    let extractor = Arc::new(YtDlpExtractor::new(Some(ytdlp.as_path())).unwrap());
    let service = StreamCatalogue::new(extractor, "youtube", "YouTube");
    let err = service
        .fetch("https://www.youtube.com/playlist?list=PLx")
        .await
        .unwrap_err();

    assert_eq!(err, GrabError::UnsupportedSource("YouTube".to_string()));
    assert_eq!(err.to_string(), "Only YouTube videos are supported");
}

#[test]
fn missing_configured_binary_is_reported() {
    let dir = TempDir::new().unwrap();
    let result = YtDlpExtractor::new(Some(dir.path().join("nope").as_path()));
    assert!(matches!(result, Err(GrabError::YtDlpNotFound)));
}
