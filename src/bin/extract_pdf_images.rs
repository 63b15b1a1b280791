use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use pagecapture::{
    init_logging, resolve_inputs, run_batch, ExtractOptionsBuilder, Password,
    RenderOptionsBuilder, ZoomPages, DPI,
};

/// Extract PDF pages as high-resolution PNG images
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    after_help = "Examples:
  extract-pdf-images protocol.pdf
  extract-pdf-images file1.pdf file2.pdf
  extract-pdf-images \"DAK-10 - Delirium/*.pdf\"
  extract-pdf-images --dpi 400 protocol.pdf
  extract-pdf-images --output ./images protocol.pdf
  extract-pdf-images --zoom-pages 1,3,5-7 protocol.pdf"
)]
struct Cli {
    /// PDF files to process (glob patterns with * or ? are expanded)
    #[arg(required = true)]
    pdfs: Vec<String>,

    /// Rendering resolution in DPI
    #[arg(long, default_value_t = 300)]
    dpi: u32,

    /// Base output folder (default: pdf_images beside each PDF)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pages that always get a 2x zoom copy, e.g. 1,3,5-7
    #[arg(long, default_value = "")]
    zoom_pages: String,

    /// Render with pdftocairo instead of pdftoppm
    #[arg(long)]
    pdftocairo: bool,

    /// Render pages in greyscale
    #[arg(long)]
    greyscale: bool,

    /// User password for PDFs that cannot be opened without one
    #[arg(long)]
    password: Option<String>,

    /// Directory holding the poppler binaries (default: POPPLER_PATH or PATH)
    #[arg(long)]
    poppler_path: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let zoom_pages: ZoomPages = cli
        .zoom_pages
        .parse()
        .context("invalid --zoom-pages")?;

    let pdfs = resolve_inputs(&cli.pdfs);
    if pdfs.is_empty() {
        tracing::error!("no PDF files found");
        return Ok(ExitCode::FAILURE);
    }

    tracing::info!(pdfs = pdfs.len(), dpi = cli.dpi, "extracting PDFs at high resolution");

    let mut render = RenderOptionsBuilder::default();
    render
        .resolution(DPI::Uniform(cli.dpi))
        .pdftocairo(cli.pdftocairo)
        .greyscale(cli.greyscale);
    if let Some(password) = cli.password {
        render.password(Password::User(password));
    }
    if let Some(poppler_path) = cli.poppler_path {
        render.poppler_path(poppler_path);
    }
    let render = render.build()?;

    let mut options = ExtractOptionsBuilder::default();
    options.render(render).zoom_pages(zoom_pages);
    if let Some(output) = cli.output {
        options.output_base(output);
    }
    let options = options.build()?;

    let summary = run_batch(&pdfs, &options).await;
    println!();
    print!("{summary}");

    Ok(ExitCode::SUCCESS)
}
