//! Headless driver for the feed composer
//!
//! Runs the same controller the page uses, with in-memory elements in place of
//! the DOM: `post` creates a post against a running server, `preview` prints
//! the data URL the preview would show for a local image.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use feed_composer::kernel::{
    ComposerDeps, LocalFileReader, LoggingNavigator, MemoryDropdown, MemoryFilePicker, MemoryForm,
    MemoryModal, MemoryPreview, MemoryTextField, ReqwestPostApi,
};
use feed_composer::{
    ComposerConfig, ComposerElements, DisplayStrategy, FeedComposer, PreviewOutcome, SubmitOutcome,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "feed-compose")]
#[command(about = "Create feed posts and preview images without a browser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a post on the feed page at PAGE_URL
    Post {
        #[arg(long)]
        page_url: String,
        #[arg(long)]
        contents: String,
        /// Dropdown label, public/friends/private, or 1-3
        #[arg(long, default_value = "public")]
        visibility: DisplayStrategy,
    },

    /// Print the preview data URL for an image file
    Preview { path: PathBuf },
}

struct Headless {
    content: MemoryTextField,
    display: MemoryDropdown,
    preview: MemoryPreview,
    file_picker: MemoryFilePicker,
}

impl Headless {
    fn new(contents: &str) -> Self {
        Self {
            content: MemoryTextField::new(contents),
            display: MemoryDropdown::with_strategies(),
            preview: MemoryPreview::new(),
            file_picker: MemoryFilePicker::new(),
        }
    }

    fn composer(&self, page_url: &str, config: ComposerConfig) -> Result<FeedComposer> {
        let elements = ComposerElements {
            content: Box::new(self.content.clone()),
            display: Box::new(self.display.clone()),
            preview: Box::new(self.preview.clone()),
            file_picker: Box::new(self.file_picker.clone()),
            modal: Box::new(MemoryModal::new()),
            form: Box::new(MemoryForm::new()),
        };
        let deps = ComposerDeps::new(
            Arc::new(ReqwestPostApi::new().context("Failed to build HTTP client")?),
            Arc::new(LoggingNavigator::new(page_url)),
            Arc::new(LocalFileReader::new()),
        );
        Ok(FeedComposer::new(elements, deps, config))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,feed_composer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ComposerConfig::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Post {
            page_url,
            contents,
            visibility,
        } => {
            let headless = Headless::new(&contents);
            let composer = headless.composer(&page_url, config)?;

            let entry = DisplayStrategy::variants()
                .iter()
                .position(|strategy| *strategy == visibility)
                .context("Visibility missing from dropdown")?;
            composer.highlight_own_display_choice(entry)?;

            match composer.submit_post().await.context("Failed to submit post")? {
                SubmitOutcome::Redirected(location) => println!("redirected: {}", location),
                SubmitOutcome::Reloaded => println!("created"),
                SubmitOutcome::Ignored { status } => bail!("Post was not accepted (HTTP {})", status),
            }
        }
        Commands::Preview { path } => {
            let file = LocalFileReader::select(&path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            let headless = Headless::new("");
            headless.file_picker.select(file);

            let composer = headless.composer("", config)?;
            match composer.preview_selected_image().await? {
                PreviewOutcome::Rendered(data_url) => println!("{}", data_url),
                PreviewOutcome::NotAnImage { media_type } => {
                    bail!("{} is not an image ({})", path.display(), media_type)
                }
                PreviewOutcome::NoFile | PreviewOutcome::Superseded => {
                    bail!("No preview produced for {}", path.display())
                }
            }
        }
    }

    Ok(())
}
