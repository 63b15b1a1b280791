use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("utf8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("{command} exited with {status}: {stderr}")]
    PopplerFailed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("child process did not expose a stdin pipe")]
    MissingStdin,

    #[error("unable to extract page count")]
    UnableToExtractPageCount,

    #[error("unable to extract encryption status")]
    UnableToExtractEncryptionStatus,

    #[error("invalid zoom page token {token:?}")]
    InvalidZoomPages { token: String },

    #[error("PDF has no file name: {0}")]
    NoFileStem(PathBuf),

    #[error("browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("browser configuration error: {0}")]
    BrowserConfig(String),

    #[error("builder error: {0}")]
    Builder(#[from] derive_builder::UninitializedFieldError),
}
