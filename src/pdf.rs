use futures::{stream, StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::render_options::RenderOptions;

/// Environment variable naming the directory that holds the poppler binaries.
pub const POPPLER_PATH_ENV: &str = "POPPLER_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfInfo {
    /// The page count within the pdf
    page_count: u32,
    /// Whether the PDF is encrypted
    encrypted: bool,
}

impl PdfInfo {
    pub async fn read(data: &[u8], options: &RenderOptions) -> Result<Self> {
        let mut args = options.password_args();
        args.push("-".to_string());

        let stdout = run_poppler("pdfinfo", &args, data, options).await?;
        parse_pdf_info(&stdout)
    }

    /// Returns the number of pages in the PDF.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Returns whether the PDF is encrypted. Permission-only encryption still
    /// renders without a password, so this is informational.
    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }
}

/// Renders every page, one poppler process at a time, and returns them in
/// page order once all of them are in memory.
///
/// Encryption is left to poppler: restricted-permission PDFs render as usual,
/// and a PDF that needs a missing user password fails in the poppler call.
pub async fn render_pdf_pages(
    data: &[u8],
    info: &PdfInfo,
    options: &RenderOptions,
) -> Result<Vec<image::DynamicImage>> {
    if info.encrypted {
        tracing::debug!(password = options.password.is_some(), "PDF is encrypted");
    }

    stream::iter(1..=info.page_count)
        .then(move |page| render_page(data, page, options))
        .try_collect()
        .await
}

/// Renders a specific page from the pdf file as a lossless PNG
async fn render_page(
    data: &[u8],
    page: u32,
    options: &RenderOptions,
) -> Result<image::DynamicImage> {
    let command = if options.pdftocairo {
        "pdftocairo"
    } else {
        "pdftoppm"
    };

    let mut args: Vec<String> = if options.pdftocairo {
        vec!["-".into(), "-".into(), "-png".into(), "-singlefile".into()]
    } else {
        vec!["-png".into(), "-singlefile".into()]
    };
    args.extend([
        "-f".to_string(),
        page.to_string(),
        "-l".to_string(),
        page.to_string(),
    ]);
    args.extend(options.to_cli_args());

    let stdout = run_poppler(command, &args, data, options).await?;
    let image = image::load_from_memory_with_format(&stdout, image::ImageFormat::Png)?;

    Ok(image)
}

/// Pipes `data` into a poppler tool and returns its stdout.
async fn run_poppler(
    command: &str,
    args: &[String],
    data: &[u8],
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    let executable = get_executable_path(command, options.poppler_path.as_deref());
    tracing::debug!(executable = %executable.display(), ?args, "running poppler");

    let mut child = Command::new(&executable)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()?;

    let mut stdin = child.stdin.take().ok_or(Error::MissingStdin)?;
    stdin.write_all(data).await?;
    drop(stdin);

    let output = child.wait_with_output().await?;
    if !output.status.success() {
        return Err(Error::PopplerFailed {
            command: command.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output.stdout)
}

/// Determines the executable path for the provided command. An explicit
/// poppler directory wins over `POPPLER_PATH`; without either, `PATH` is searched.
pub fn get_executable_path(command: &str, poppler_path: Option<&Path>) -> PathBuf {
    #[cfg(target_os = "windows")]
    let command = format!("{}.exe", command);

    let dir = poppler_path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(POPPLER_PATH_ENV).map(PathBuf::from));

    match dir {
        Some(dir) => dir.join(command),
        None => PathBuf::from(command),
    }
}

/// Parses the `Pages:` and `Encrypted:` lines of `pdfinfo` output.
pub fn parse_pdf_info(stdout: &[u8]) -> Result<PdfInfo> {
    let page_count = field(stdout, b"Pages:")?
        .and_then(|count| count.parse::<u32>().ok())
        .ok_or(Error::UnableToExtractPageCount)?;

    let encrypted = match field(stdout, b"Encrypted:")? {
        Some("yes") => true,
        Some("no") => false,
        _ => return Err(Error::UnableToExtractEncryptionStatus),
    };

    Ok(PdfInfo {
        page_count,
        encrypted,
    })
}

/// First value token of the line starting with `name`.
fn field<'a>(stdout: &'a [u8], name: &[u8]) -> Result<Option<&'a str>> {
    match stdout.split(|&x| x == b'\n').find(|line| line.starts_with(name)) {
        Some(line) => Ok(std::str::from_utf8(line)?.split_whitespace().nth(1)),
        None => Ok(None),
    }
}
