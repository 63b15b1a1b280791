use std::fmt;
use std::path::PathBuf;

use crate::extract::{extract_pdf_pages, ExtractOptions};
use crate::utils::{collapse_wildcards, has_pdf_extension, is_glob_pattern};

/// How many produced paths the summary lists before collapsing the rest.
const SUMMARY_PREVIEW: usize = 5;

/// Turns command line arguments into PDF paths.
///
/// Arguments with `*` or `?` are expanded as glob patterns and only `.pdf`
/// matches are kept; a pattern the glob syntax rejects is logged and matches
/// nothing. Anything else is kept as-is when it ends in `.pdf` and silently
/// dropped otherwise. Nothing is checked for existence here.
pub fn resolve_inputs<I, S>(args: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut pdfs = vec![];

    for arg in args {
        let arg = arg.as_ref();

        if is_glob_pattern(arg) {
            let matches = match glob::glob(&collapse_wildcards(arg)) {
                Ok(matches) => matches,
                Err(err) => {
                    tracing::warn!(pattern = arg, error = %err, "skipping invalid pattern");
                    continue;
                }
            };

            for entry in matches {
                match entry {
                    Ok(path) if has_pdf_extension(&path.to_string_lossy()) => pdfs.push(path),
                    Ok(_) => {}
                    Err(err) => {
                        tracing::warn!(pattern = arg, error = %err, "skipping unreadable match")
                    }
                }
            }
        } else if has_pdf_extension(arg) {
            pdfs.push(PathBuf::from(arg));
        }
    }

    pdfs
}

/// Totals of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub pdfs_processed: usize,
    pub files: Vec<PathBuf>,
}

/// Extracts every PDF in turn. A PDF that fails contributes no files but does
/// not stop the others.
pub async fn run_batch(pdfs: &[PathBuf], options: &ExtractOptions) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for pdf in pdfs {
        let files = extract_pdf_pages(pdf, options).await;
        summary.files.extend(files);
        summary.pdfs_processed += 1;
    }

    summary
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Extraction summary ===")?;
        writeln!(f, "PDFs processed: {}", self.pdfs_processed)?;
        writeln!(f, "Images extracted: {}", self.files.len())?;

        if !self.files.is_empty() {
            writeln!(f)?;
            writeln!(f, "First {} images:", SUMMARY_PREVIEW.min(self.files.len()))?;
            for path in self.files.iter().take(SUMMARY_PREVIEW) {
                writeln!(f, "  {}", path.display())?;
            }
            if self.files.len() > SUMMARY_PREVIEW {
                writeln!(f, "  ... and {} more files", self.files.len() - SUMMARY_PREVIEW)?;
            }
        }

        Ok(())
    }
}
