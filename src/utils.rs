use std::path::{Path, PathBuf};

/// Folder created beside a PDF when no output base is given.
pub const DEFAULT_OUTPUT_DIR: &str = "pdf_images";

/// Directory that receives the images of `pdf`:
/// `<base>/<stem with spaces replaced by underscores>`.
pub fn output_folder(pdf: &Path, stem: &str, output_base: Option<&Path>) -> PathBuf {
    let base = match output_base {
        Some(base) => base.to_path_buf(),
        None => pdf
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(DEFAULT_OUTPUT_DIR),
    };

    base.join(stem.replace(' ', "_"))
}

/// `{stem}_page_{NNN}.png`, or `{stem}_page_{NNN}_zoom.png` for zoom variants.
pub fn page_file_name(stem: &str, page: u32, zoom: bool) -> String {
    if zoom {
        format!("{stem}_page_{page:03}_zoom.png")
    } else {
        format!("{stem}_page_{page:03}.png")
    }
}

/// Case-insensitive `.pdf` suffix check on the raw argument text.
pub fn has_pdf_extension(path: &str) -> bool {
    path.to_lowercase().ends_with(".pdf")
}

/// Whether an argument should be treated as a glob pattern.
pub fn is_glob_pattern(arg: &str) -> bool {
    arg.contains(['*', '?'])
}

/// Folds runs of `*` into one, so `**` matches like `*` as it does in a
/// non-recursive shell-style glob.
pub fn collapse_wildcards(pattern: &str) -> String {
    let mut collapsed = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if !(c == '*' && collapsed.ends_with('*')) {
            collapsed.push(c);
        }
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_folder_sits_beside_pdf() {
        let folder = output_folder(
            Path::new("docs/DAK 10/Delirium protocol.pdf"),
            "Delirium protocol",
            None,
        );
        assert_eq!(folder, Path::new("docs/DAK 10/pdf_images/Delirium_protocol"));
    }

    #[test]
    fn bare_file_name_uses_relative_default() {
        let folder = output_folder(Path::new("Protocol.pdf"), "Protocol", None);
        assert_eq!(folder, Path::new("pdf_images/Protocol"));
    }

    #[test]
    fn override_replaces_default_base() {
        let folder = output_folder(
            Path::new("docs/Protocol v2.pdf"),
            "Protocol v2",
            Some(Path::new("/tmp/images")),
        );
        assert_eq!(folder, Path::new("/tmp/images/Protocol_v2"));
    }

    #[test]
    fn file_names_keep_raw_stem() {
        assert_eq!(page_file_name("Protocol", 1, false), "Protocol_page_001.png");
        assert_eq!(page_file_name("Protocol", 12, true), "Protocol_page_012_zoom.png");
        assert_eq!(page_file_name("My doc", 1234, false), "My doc_page_1234.png");
    }

    #[test]
    fn pdf_extension_is_case_insensitive() {
        assert!(has_pdf_extension("a.pdf"));
        assert!(has_pdf_extension("A.PDF"));
        assert!(has_pdf_extension("dir/b.Pdf"));
        assert!(!has_pdf_extension("notes.txt"));
        assert!(!has_pdf_extension("pdf"));
    }

    #[test]
    fn wildcard_runs_collapse() {
        assert_eq!(collapse_wildcards("docs/report**.pdf"), "docs/report*.pdf");
        assert_eq!(collapse_wildcards("**/***.pdf"), "*/*.pdf");
        assert_eq!(collapse_wildcards("a?.pdf"), "a?.pdf");
    }

    #[test]
    fn glob_detection() {
        assert!(is_glob_pattern("docs/*.pdf"));
        assert!(is_glob_pattern("page?.pdf"));
        assert!(!is_glob_pattern("docs/[a].pdf"));
    }
}
