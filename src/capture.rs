//! Full-page screenshot of a remote diagram board.
//!
//! The board loads its content asynchronously and exposes no ready signal, so
//! the capture waits a fixed amount of wall-clock time before shooting.

use std::path::PathBuf;
use std::time::Duration;

use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig};
use derive_builder::Builder;
use futures::StreamExt;

use crate::error::{Error, Result};

pub const DEFAULT_BOARD_URL: &str = "https://miro.com/app/board/uXjVIObKXr0=/";
pub const DEFAULT_SCREENSHOT_PATH: &str = "miro_screenshots/miro_delirium_full.png";

#[derive(Debug, Clone, Builder)]
#[builder(build_fn(error = "Error"))]
pub struct CaptureSettings {
    #[builder(setter(into), default = "DEFAULT_BOARD_URL.to_string()")]
    pub url: String,
    #[builder(default = "1920")]
    pub width: u32,
    #[builder(default = "1080")]
    pub height: u32,
    /// Run without a visible window
    #[builder(default)]
    pub headless: bool,
    /// Time given to the board to finish loading before the screenshot
    #[builder(default = "Duration::from_secs(10)")]
    pub load_wait: Duration,
    /// Time the browser stays open after the screenshot
    #[builder(default = "Duration::from_secs(5)")]
    pub linger: Duration,
    #[builder(setter(into), default = "PathBuf::from(DEFAULT_SCREENSHOT_PATH)")]
    pub output: PathBuf,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_BOARD_URL.to_string(),
            width: 1920,
            height: 1080,
            headless: false,
            load_wait: Duration::from_secs(10),
            linger: Duration::from_secs(5),
            output: PathBuf::from(DEFAULT_SCREENSHOT_PATH),
        }
    }
}

impl CaptureSettings {
    fn browser_config(&self) -> Result<BrowserConfig> {
        let builder = BrowserConfig::builder()
            .window_size(self.width, self.height)
            .viewport(Viewport {
                width: self.width,
                height: self.height,
                ..Default::default()
            });
        let builder = if self.headless {
            builder
        } else {
            builder.with_head()
        };

        builder.build().map_err(Error::BrowserConfig)
    }
}

/// Opens the board, waits for it to load, saves one full-page screenshot and
/// closes the browser. Returns the screenshot path.
///
/// Nothing is retried; any browser failure is returned as is.
pub async fn capture_board(settings: &CaptureSettings) -> Result<PathBuf> {
    tracing::info!(headless = settings.headless, "launching browser");
    let (mut browser, mut handler) = Browser::launch(settings.browser_config()?).await?;

    let events = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(err) = event {
                tracing::debug!(error = %err, "browser handler stopped");
                break;
            }
        }
    });

    tracing::info!(url = %settings.url, "navigating");
    let page = browser.new_page(settings.url.as_str()).await?;

    tracing::info!(wait = ?settings.load_wait, "waiting for board to load");
    tokio::time::sleep(settings.load_wait).await;

    if let Some(parent) = settings.output.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    tracing::info!("capturing screenshot");
    page.save_screenshot(
        ScreenshotParams::builder().full_page(true).build(),
        &settings.output,
    )
    .await?;
    tracing::info!(path = %settings.output.display(), "screenshot saved");

    tokio::time::sleep(settings.linger).await;

    browser.close().await?;
    browser.wait().await?;
    if let Err(err) = events.await {
        tracing::warn!(error = %err, "browser handler task failed");
    }

    Ok(settings.output.clone())
}
