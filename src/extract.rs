use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::DynamicImage;

use crate::error::{Error, Result};
use crate::pdf::{render_pdf_pages, PdfInfo};
use crate::render_options::RenderOptions;
use crate::utils::{output_folder, page_file_name};
use crate::zoom::{zoom_image, zoom_reason, ZoomPages, ZoomReason};

/// Shown after a PDF fails to render; the usual cause is missing poppler tools.
pub const POPPLER_HINT: &str = "make sure poppler-utils is installed:
  macOS:   brew install poppler
  Ubuntu:  sudo apt-get install poppler-utils
  Windows: download from https://github.com/oschwartz10612/poppler-windows";

#[derive(Debug, Clone, Default, Builder)]
#[builder(default, build_fn(error = "Error"))]
pub struct ExtractOptions {
    pub render: RenderOptions,
    /// Base folder for output; defaults to `pdf_images` beside each PDF
    #[builder(setter(into, strip_option))]
    pub output_base: Option<PathBuf>,
    pub zoom_pages: ZoomPages,
}

/// One image written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutput {
    pub pdf_stem: String,
    pub page: u32,
    pub zoom: bool,
    pub path: PathBuf,
}

/// Renders every page of `pdf` to PNG, plus zoom variants where
/// [`zoom_reason`] asks for one, and returns the written paths in order.
///
/// Failures never escape: a missing file or any rendering/saving error is
/// logged and yields an empty list, so one bad PDF cannot stop a batch.
pub async fn extract_pdf_pages(pdf: &Path, options: &ExtractOptions) -> Vec<PathBuf> {
    if !pdf.exists() {
        tracing::error!(pdf = %pdf.display(), "PDF not found");
        return vec![];
    }

    match try_extract_pdf_pages(pdf, options).await {
        Ok(outputs) => {
            tracing::info!(pdf = %pdf.display(), files = outputs.len(), "extraction finished");
            outputs.into_iter().map(|output| output.path).collect()
        }
        Err(err) => {
            tracing::error!(pdf = %pdf.display(), error = %err, "failed to process PDF");
            tracing::error!("{POPPLER_HINT}");
            vec![]
        }
    }
}

async fn try_extract_pdf_pages(pdf: &Path, options: &ExtractOptions) -> Result<Vec<PageOutput>> {
    let stem = pdf
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| Error::NoFileStem(pdf.to_path_buf()))?;

    let folder = output_folder(pdf, &stem, options.output_base.as_deref());
    tokio::fs::create_dir_all(&folder).await?;

    tracing::info!(
        pdf = %stem,
        resolution = ?options.render.resolution,
        output = %folder.display(),
        "processing"
    );

    let data = tokio::fs::read(pdf).await?;
    let info = PdfInfo::read(&data, &options.render).await?;
    let pages = render_pdf_pages(&data, &info, &options.render).await?;

    write_pages(&stem, &folder, &pages, &options.zoom_pages)
}

/// Writes already rendered pages (page 1 first) into `folder`, adding zoom
/// variants. `folder` must exist.
pub fn write_pages(
    stem: &str,
    folder: &Path,
    pages: &[DynamicImage],
    zoom_pages: &ZoomPages,
) -> Result<Vec<PageOutput>> {
    let mut outputs = Vec::with_capacity(pages.len());

    for (page_num, page) in (1u32..).zip(pages) {
        let path = folder.join(page_file_name(stem, page_num, false));
        save_png(page, &path)?;
        outputs.push(PageOutput {
            pdf_stem: stem.to_string(),
            page: page_num,
            zoom: false,
            path,
        });

        let (width, height) = (page.width(), page.height());
        let reason = zoom_reason(page_num, width, height, zoom_pages);
        match reason {
            Some(ZoomReason::Requested) => {
                tracing::info!(page = page_num, width, height, "zoom requested")
            }
            Some(ZoomReason::AspectRatio) => {
                tracing::info!(page = page_num, width, height, "possible flowchart detected")
            }
            None => tracing::info!(page = page_num, width, height, "extracted"),
        }

        if reason.is_some() {
            let file_name = page_file_name(stem, page_num, true);
            let path = folder.join(&file_name);
            save_png(&zoom_image(page), &path)?;
            tracing::info!(page = page_num, file = %file_name, "zoom variant saved");
            outputs.push(PageOutput {
                pdf_stem: stem.to_string(),
                page: page_num,
                zoom: true,
                path,
            });
        }
    }

    Ok(outputs)
}

/// Saves a lossless PNG with fast deflate and no row filtering, skipping any
/// size optimisation pass.
fn save_png(image: &DynamicImage, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    let encoder =
        PngEncoder::new_with_quality(&mut writer, CompressionType::Fast, FilterType::NoFilter);
    image.write_with_encoder(encoder)?;
    writer.flush()?;

    Ok(())
}
