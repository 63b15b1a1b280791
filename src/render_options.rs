use std::path::PathBuf;

use derive_builder::Builder;

use crate::error::Error;

/// Resolution used when rasterizing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DPI {
    /// Same resolution on both axes
    Uniform(u32),
    /// Separate horizontal and vertical resolution
    XY(u32, u32),
}

impl Default for DPI {
    fn default() -> Self {
        DPI::Uniform(300)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Password {
    Owner(String),
    User(String),
}

#[derive(Debug, Clone, Default, Builder)]
#[builder(default, build_fn(error = "Error"))]
pub struct RenderOptions {
    /// Resolution in dots per inch
    pub resolution: DPI,
    /// Render pages in greyscale
    pub greyscale: bool,
    /// Password to unlock encrypted PDFs
    #[builder(setter(into, strip_option))]
    pub password: Option<Password>,
    /// Use `pdftocairo` instead of `pdftoppm`
    pub pdftocairo: bool,
    /// Directory holding the poppler binaries; falls back to `POPPLER_PATH`
    #[builder(setter(into, strip_option))]
    pub poppler_path: Option<PathBuf>,
}

impl RenderOptions {
    /// Poppler flags for these options. Page selection and output format are
    /// added by the renderer.
    pub fn to_cli_args(&self) -> Vec<String> {
        let mut args = vec![];

        match self.resolution {
            DPI::Uniform(dpi) => {
                args.push("-r".to_string());
                args.push(dpi.to_string());
            }
            DPI::XY(dpi_x, dpi_y) => {
                args.push("-rx".to_string());
                args.push(dpi_x.to_string());
                args.push("-ry".to_string());
                args.push(dpi_y.to_string());
            }
        }

        if self.greyscale {
            args.push("-gray".to_string());
        }

        args.extend(self.password_args());

        args
    }

    /// `-opw`/`-upw` flags, shared by the renderers and `pdfinfo`.
    pub fn password_args(&self) -> Vec<String> {
        match &self.password {
            Some(Password::Owner(password)) => vec!["-opw".to_string(), password.clone()],
            Some(Password::User(password)) => vec!["-upw".to_string(), password.clone()],
            None => vec![],
        }
    }
}
