//! TubeGrab - YouTube stream downloader
//!
//! Lists the streams of a video and downloads the chosen renditions through
//! yt-dlp, from a small GUI or headless from the command line.

use anyhow::{bail, Result};
use clap::Parser;
use iced::Application;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tubegrab::downloader::{DownloadEvent, DownloadOrchestrator, Outcome};
use tubegrab::extractor::{Extractor, YtDlpExtractor};
use tubegrab::gui;
use tubegrab::selection::{resolve, Selection};
use tubegrab::utils::{AppSettings, SelectionMode};
use tubegrab::StreamCatalogue;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Print the stream catalogue of a URL and exit
    #[arg(long, value_name = "URL", conflicts_with = "download")]
    list: Option<String>,

    /// Download a URL without opening the window
    #[arg(long, value_name = "URL", requires_all = ["format", "output"])]
    download: Option<String>,

    /// Format id, or `video+audio` ids to merge
    #[arg(long, value_name = "EXPR")]
    format: Option<String>,

    /// Destination directory
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// yt-dlp executable to use instead of searching for one
    #[arg(long = "yt-dlp", value_name = "PATH")]
    ytdlp: Option<PathBuf>,

    /// Extractor key of the accepted platform
    #[arg(long, value_name = "KEY")]
    platform: Option<String>,

    /// Start the window with separate video and audio lists
    #[arg(long)]
    split: bool,
}

impl Args {
    fn settings(&self) -> AppSettings {
        let mut settings = AppSettings::default();
        if let Some(path) = &self.ytdlp {
            settings.ytdlp_path = Some(path.clone());
        }
        if let Some(platform) = &self.platform {
            settings.platform = platform.to_lowercase();
        }
        if self.split {
            settings.selection_mode = SelectionMode::Split;
        }
        settings
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let settings = args.settings();

    if let Some(url) = &args.list {
        let rt = tokio::runtime::Runtime::new()?;
        return rt.block_on(list_cli(&settings, url));
    }

    if let Some(url) = &args.download {
        let format = args.format.clone().unwrap_or_default();
        let output = args.output.clone().unwrap_or_default();
        let rt = tokio::runtime::Runtime::new()?;
        return rt.block_on(download_cli(&settings, url, &format, output));
    }

    // Start the GUI application (synchronous entrypoint)
    let mut window_settings = iced::Settings::with_flags(settings);
    window_settings.window = iced::window::Settings {
        size: iced::Size::new(960.0, 820.0),
        min_size: Some(iced::Size::new(760.0, 640.0)),
        ..Default::default()
    };
    window_settings.antialiasing = true;
    gui::GrabberApp::run(window_settings)?;

    Ok(())
}

fn catalogue_for(settings: &AppSettings, extractor: Arc<dyn Extractor>) -> StreamCatalogue {
    StreamCatalogue::new(
        extractor,
        settings.platform.clone(),
        settings.platform_display_name(),
    )
}

async fn list_cli(settings: &AppSettings, url: &str) -> Result<()> {
    let extractor: Arc<dyn Extractor> =
        Arc::new(YtDlpExtractor::new(settings.ytdlp_path.as_deref())?);
    let catalogue = catalogue_for(settings, extractor).fetch(url).await?;

    println!("Title: {}", catalogue.title);
    for descriptor in &catalogue.descriptors {
        println!("{:>8}  {}", descriptor.format_id, descriptor);
    }
    Ok(())
}

async fn download_cli(
    settings: &AppSettings,
    url: &str,
    format: &str,
    output: PathBuf,
) -> Result<()> {
    let extractor: Arc<dyn Extractor> =
        Arc::new(YtDlpExtractor::new(settings.ytdlp_path.as_deref())?);
    let catalogue = catalogue_for(settings, Arc::clone(&extractor))
        .fetch(url)
        .await?;
    println!("Title: {}", catalogue.title);

    let directive = resolve(
        &catalogue,
        &Selection::from_expression(format),
        Some(output.as_path()),
    )?;

    let orchestrator = DownloadOrchestrator::new(extractor);
    let (tx, mut rx) = mpsc::channel(64);
    let print = async move {
        while let Some(event) = rx.recv().await {
            if let DownloadEvent::Log(line) = event {
                println!("{}", line);
            }
        }
    };
    let run = async move { orchestrator.execute(&directive, &tx).await };

    let (outcome, ()) = tokio::join!(run, print);
    match outcome {
        Outcome::Success => Ok(()),
        Outcome::Failure(cause) => bail!("Download failed: {}", cause),
    }
}
