//! Font discovery for chart text.
//!
//! Plotters' `ab_glyph` text rendering draws with fonts registered at runtime
//! under a family name. The first usable TrueType file (configured path, then
//! a list of common system locations) is registered as `sans-serif` once per
//! process. Without one, charts are drawn without text.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::FontStyle;

/// Family name chart text is drawn with.
pub const FONT_FAMILY: &str = "sans-serif";

const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Whether chart text can be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartText {
    Labeled,
    Unlabeled,
}

static REGISTERED_FONT: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Register a chart font if none is registered yet.
///
/// Only the first call searches; later calls report the same outcome even
/// if they pass a different `configured` path.
pub fn ensure_chart_font(configured: Option<&Path>) -> ChartText {
    let registered = REGISTERED_FONT.get_or_init(|| {
        let candidates = configured
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));

        for path in candidates {
            if register(&path) {
                tracing::debug!(font = %path.display(), "registered chart font");
                return Some(path);
            }
        }

        tracing::warn!("no usable TrueType font found; charts will be drawn without text");
        None
    });

    if registered.is_some() {
        ChartText::Labeled
    } else {
        ChartText::Unlabeled
    }
}

/// The font file chart text is drawn with, if one was registered.
pub fn registered_font() -> Option<&'static Path> {
    REGISTERED_FONT.get()?.as_deref()
}

fn register(path: &Path) -> bool {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    // Plotters keeps registered fonts for the lifetime of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    match plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
        Ok(()) => true,
        Err(_) => {
            tracing::warn!(font = %path.display(), "skipping file that is not a usable font");
            false
        }
    }
}
