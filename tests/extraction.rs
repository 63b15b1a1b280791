use std::path::{Path, PathBuf};

use pagecapture::image::{self, DynamicImage, GenericImageView};
use pagecapture::{
    extract_pdf_pages, run_batch, write_pages, ExtractOptions, ExtractOptionsBuilder, PageOutput,
    RenderOptionsBuilder, ZoomPages, DEFAULT_OUTPUT_DIR,
};

#[cfg(unix)]
const FAKE_PDF: &[u8] = b"%PDF-1.7 two pages";

/// Writes stand-in `pdfinfo`/`pdftoppm` scripts into `dir/poppler`. The PDF
/// reports two pages with permission-only encryption; page 1 renders 10x18,
/// page 2 renders 12x12. Input not starting with `%PDF` makes `pdfinfo` fail.
#[cfg(unix)]
fn fake_poppler(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let bin = dir.join("poppler");
    std::fs::create_dir(&bin).unwrap();
    DynamicImage::new_rgb8(10, 18).save(bin.join("page_1.png")).unwrap();
    DynamicImage::new_rgb8(12, 12).save(bin.join("page_2.png")).unwrap();

    let pdfinfo = r#"#!/bin/sh
case "$(head -c 4)" in
  %PDF)
    cat > /dev/null
    printf 'Pages:          2\nEncrypted:      yes (print:yes copy:no change:no addNotes:no algorithm:AES)\n'
    ;;
  *)
    cat > /dev/null
    echo "Syntax Error: Couldn't find trailer dictionary" >&2
    exit 1
    ;;
esac
"#;
    let pdftoppm = format!(
        r#"#!/bin/sh
cat > /dev/null
page=1
while [ $# -gt 0 ]; do
  if [ "$1" = "-f" ]; then page="$2"; fi
  shift
done
exec cat "{}/page_$page.png"
"#,
        bin.display()
    );

    for (name, script) in [("pdfinfo", pdfinfo.to_string()), ("pdftoppm", pdftoppm)] {
        let path = bin.join(name);
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    bin
}

#[cfg(unix)]
fn options_with(poppler: &Path, output: &Path) -> ExtractOptions {
    ExtractOptionsBuilder::default()
        .render(
            RenderOptionsBuilder::default()
                .poppler_path(poppler)
                .build()
                .unwrap(),
        )
        .output_base(output)
        .build()
        .unwrap()
}

fn file_names(outputs: &[PageOutput]) -> Vec<String> {
    outputs
        .iter()
        .map(|output| output.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

fn files_under(dir: &Path) -> Vec<PathBuf> {
    let mut files = vec![];
    if !dir.exists() {
        return files;
    }
    for entry in std::fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            files.extend(files_under(&path));
        } else {
            files.push(path);
        }
    }
    files
}

#[test]
fn tall_and_wide_pages_both_zoom() {
    let dir = tempfile::tempdir().unwrap();
    let pages = vec![
        DynamicImage::new_rgb8(100, 180),
        DynamicImage::new_rgb8(180, 100),
    ];

    let outputs = write_pages("Protocol", dir.path(), &pages, &ZoomPages::new()).unwrap();

    assert_eq!(
        file_names(&outputs),
        vec![
            "Protocol_page_001.png",
            "Protocol_page_001_zoom.png",
            "Protocol_page_002.png",
            "Protocol_page_002_zoom.png",
        ]
    );

    let zoom_1 = image::open(dir.path().join("Protocol_page_001_zoom.png")).unwrap();
    assert_eq!(zoom_1.dimensions(), (200, 360));
    let zoom_2 = image::open(dir.path().join("Protocol_page_002_zoom.png")).unwrap();
    assert_eq!(zoom_2.dimensions(), (360, 200));

    let page_1 = image::open(dir.path().join("Protocol_page_001.png")).unwrap();
    assert_eq!(page_1.dimensions(), (100, 180));
}

#[test]
fn explicit_zoom_pages_on_square_document() {
    let dir = tempfile::tempdir().unwrap();
    let pages = vec![DynamicImage::new_rgb8(50, 50); 5];
    let requested: ZoomPages = "1,3-4".parse().unwrap();

    let outputs = write_pages("square", dir.path(), &pages, &requested).unwrap();

    let zoomed: Vec<u32> = outputs
        .iter()
        .filter(|output| output.zoom)
        .map(|output| output.page)
        .collect();
    assert_eq!(zoomed, vec![1, 3, 4]);
    assert_eq!(outputs.len(), 8);
    assert_eq!(files_under(dir.path()).len(), 8);
}

#[test]
fn page_records_carry_stem_and_page() {
    let dir = tempfile::tempdir().unwrap();
    let pages = vec![DynamicImage::new_luma8(20, 20)];

    let outputs = write_pages("My doc", dir.path(), &pages, &ZoomPages::new()).unwrap();

    assert_eq!(
        outputs,
        vec![PageOutput {
            pdf_stem: "My doc".to_string(),
            page: 1,
            zoom: false,
            path: dir.path().join("My doc_page_001.png"),
        }]
    );
}

#[tokio::test]
async fn missing_pdf_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("absent.pdf");
    let options = ExtractOptionsBuilder::default().build().unwrap();

    let files = extract_pdf_pages(&pdf, &options).await;

    assert!(files.is_empty());
    assert!(!dir.path().join(DEFAULT_OUTPUT_DIR).exists());
    assert!(files_under(dir.path()).is_empty());
}

#[tokio::test]
async fn broken_pdf_is_skipped_under_override() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dir.path().join("Broken file.pdf");
    std::fs::write(&pdf, b"this is not a pdf").unwrap();
    let output = dir.path().join("out");

    let options = ExtractOptionsBuilder::default()
        .output_base(&output)
        .build()
        .unwrap();

    let files = extract_pdf_pages(&pdf, &options).await;

    assert!(files.is_empty());
    // the per-PDF folder goes under the override, never the default location
    assert!(!dir.path().join(DEFAULT_OUTPUT_DIR).exists());
    assert!(output.join("Broken_file").is_dir());
    assert!(files_under(&output).is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn extracts_every_page_under_override() {
    let dir = tempfile::tempdir().unwrap();
    let poppler = fake_poppler(dir.path());
    let pdf = dir.path().join("My Protocol.pdf");
    std::fs::write(&pdf, FAKE_PDF).unwrap();
    let output = dir.path().join("out");

    let files = extract_pdf_pages(&pdf, &options_with(&poppler, &output)).await;

    let folder = output.join("My_Protocol");
    assert_eq!(
        files,
        vec![
            folder.join("My Protocol_page_001.png"),
            folder.join("My Protocol_page_001_zoom.png"),
            folder.join("My Protocol_page_002.png"),
        ]
    );
    assert_eq!(image::open(&files[0]).unwrap().dimensions(), (10, 18));
    assert_eq!(image::open(&files[1]).unwrap().dimensions(), (20, 36));
    assert_eq!(image::open(&files[2]).unwrap().dimensions(), (12, 12));
    assert!(!dir.path().join(DEFAULT_OUTPUT_DIR).exists());
}

#[cfg(unix)]
#[tokio::test]
async fn batch_continues_after_broken_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let poppler = fake_poppler(dir.path());
    let broken = dir.path().join("broken.pdf");
    std::fs::write(&broken, b"not a pdf").unwrap();
    let good = dir.path().join("good.pdf");
    std::fs::write(&good, FAKE_PDF).unwrap();
    let output = dir.path().join("out");

    let summary = run_batch(&[broken, good], &options_with(&poppler, &output)).await;

    assert_eq!(summary.pdfs_processed, 2);
    assert_eq!(summary.files.len(), 3);
    assert!(summary
        .files
        .iter()
        .all(|path| path.starts_with(output.join("good"))));
    assert!(files_under(&output.join("broken")).is_empty());
    assert_eq!(files_under(&output.join("good")).len(), 3);
}
