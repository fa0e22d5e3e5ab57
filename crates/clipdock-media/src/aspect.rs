//! Aspect-ratio classification
//!
//! Coarse buckets used only to namespace storage keys.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Absolute tolerance when comparing a frame's ratio against 16:9 and 9:16.
const RATIO_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    Landscape,
    Portrait,
    Other,
}

impl AspectRatio {
    /// Classify stream dimensions: within 0.01 of 16/9 is landscape, within
    /// 0.01 of 9/16 is portrait, anything else is other.
    pub fn classify(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return AspectRatio::Other;
        }

        let ratio = width as f64 / height as f64;

        if (ratio - 16.0 / 9.0).abs() < RATIO_TOLERANCE {
            AspectRatio::Landscape
        } else if (ratio - 9.0 / 16.0).abs() < RATIO_TOLERANCE {
            AspectRatio::Portrait
        } else {
            AspectRatio::Other
        }
    }

    /// Storage-key segment for this bucket.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "landscape",
            AspectRatio::Portrait => "portrait",
            AspectRatio::Other => "other",
        }
    }
}

impl Display for AspectRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
