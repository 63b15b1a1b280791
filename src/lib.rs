//! # Overview
//! Two small batch utilities for turning visual documents into image files:
//!
//! - PDF page extraction: every page of a PDF is rendered through `pdftoppm` or
//!   `pdftocairo` (part of [poppler](https://poppler.freedesktop.org/)) and
//!   written as a PNG. Pages that are markedly wider than tall (or the other way
//!   round), or that were explicitly asked for, also get a 2× upscaled
//!   `_zoom.png` copy so small diagram text stays readable.
//! - Board capture: a browser is driven over the DevTools protocol to take one
//!   full-page screenshot of a remote diagram board.
//!
//! Extraction requires `poppler` to be installed; set `POPPLER_PATH` to its
//! `bin` directory if it is not on `PATH`. Capture requires a Chromium based
//! browser.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pagecapture::{extract_pdf_pages, ExtractOptionsBuilder, RenderOptionsBuilder, DPI};
//!
//! # async fn run() -> pagecapture::Result<()> {
//! let options = ExtractOptionsBuilder::default()
//!     .render(RenderOptionsBuilder::default().resolution(DPI::Uniform(400)).build()?)
//!     .zoom_pages("1,3-4".parse()?)
//!     .output_base("images")
//!     .build()?;
//!
//! let files = extract_pdf_pages("protocol.pdf".as_ref(), &options).await;
//! println!("{} images written", files.len());
//! # Ok(())
//! # }
//! ```
mod batch;
mod capture;
mod error;
mod extract;
mod logging;
mod pdf;
mod render_options;
mod utils;
mod zoom;

pub use batch::{resolve_inputs, run_batch, BatchSummary};
pub use capture::{
    capture_board, CaptureSettings, CaptureSettingsBuilder, DEFAULT_BOARD_URL,
    DEFAULT_SCREENSHOT_PATH,
};
pub use error::{Error, Result};
pub use extract::{
    extract_pdf_pages, write_pages, ExtractOptions, ExtractOptionsBuilder, PageOutput, POPPLER_HINT,
};
pub use logging::init_logging;
pub use pdf::{get_executable_path, parse_pdf_info, render_pdf_pages, PdfInfo, POPPLER_PATH_ENV};
pub use render_options::{Password, RenderOptions, RenderOptionsBuilder, DPI};
pub use utils::{output_folder, page_file_name, DEFAULT_OUTPUT_DIR};
pub use zoom::{
    zoom_image, zoom_reason, ZoomPages, ZoomReason, ASPECT_RATIO_THRESHOLD, ZOOM_FACTOR,
};

// re-export image crate
pub use image;
