//! Deciding which pages get an upscaled "zoom" copy.
//!
//! A page is zoomed when it was explicitly requested, or when it is markedly
//! non-square (wide flowcharts, tall diagrams), which tends to leave text too
//! small to read at the base resolution.

use std::collections::BTreeSet;
use std::str::FromStr;

use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::Error;

/// A page is "markedly non-square" when one side exceeds the other by this factor.
pub const ASPECT_RATIO_THRESHOLD: f64 = 1.3;

/// Linear scale applied to both axes of a zoom variant.
pub const ZOOM_FACTOR: u32 = 2;

/// 1-indexed page numbers requested for zooming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoomPages(BTreeSet<u32>);

impl ZoomPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, page: u32) -> bool {
        self.0.contains(&page)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u32> for ZoomPages {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<u32> for ZoomPages {
    fn extend<T: IntoIterator<Item = u32>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}

/// Parses `"1,3,5-7"` style page lists. A reversed range such as `"7-5"`
/// selects nothing.
impl FromStr for ZoomPages {
    type Err = Error;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let mut pages = ZoomPages::new();
        if spec.is_empty() {
            return Ok(pages);
        }

        for token in spec.split(',') {
            let token = token.trim();
            let invalid = || Error::InvalidZoomPages {
                token: token.to_string(),
            };
            let number = |s: &str| s.trim().parse::<u32>().map_err(|_| invalid());

            if token.contains('-') {
                let mut bounds = token.split('-');
                let (start, end) = match (bounds.next(), bounds.next(), bounds.next()) {
                    (Some(start), Some(end), None) => (number(start)?, number(end)?),
                    _ => return Err(invalid()),
                };
                pages.extend(start..=end);
            } else {
                pages.extend([number(token)?]);
            }
        }

        Ok(pages)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomReason {
    /// The page number was in the explicit zoom list
    Requested,
    /// The page is markedly wider than tall, or taller than wide
    AspectRatio,
}

/// Decides whether a rendered page gets a zoom variant. An explicit request
/// wins over the aspect-ratio check.
pub fn zoom_reason(
    page: u32,
    width: u32,
    height: u32,
    requested: &ZoomPages,
) -> Option<ZoomReason> {
    let (w, h) = (f64::from(width), f64::from(height));

    if requested.contains(page) {
        Some(ZoomReason::Requested)
    } else if w > h * ASPECT_RATIO_THRESHOLD || h > w * ASPECT_RATIO_THRESHOLD {
        Some(ZoomReason::AspectRatio)
    } else {
        None
    }
}

/// Upscales a page to exactly [`ZOOM_FACTOR`] times its width and height.
pub fn zoom_image(page: &DynamicImage) -> DynamicImage {
    page.resize_exact(
        page.width() * ZOOM_FACTOR,
        page.height() * ZOOM_FACTOR,
        FilterType::Lanczos3,
    )
}
