//! Segment and series identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sub-population tracked with its own adoption trajectory.
///
/// Segments are blended into the overall adoption figure by fixed
/// population weights (see [`SegmentWeights`](super::SegmentWeights)).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// Small and medium-sized enterprises.
    Sme,
    /// Large enterprises.
    Large,
}

impl Segment {
    /// Number of tracked segments.
    pub const COUNT: usize = 2;

    /// All segments in storage order.
    pub const ALL: [Segment; Segment::COUNT] = [Segment::Sme, Segment::Large];

    /// Position of this segment in per-segment arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Segment::Sme => 0,
            Segment::Large => 1,
        }
    }

    /// Lowercase identifier used in configuration and exports.
    pub fn name(self) -> &'static str {
        match self {
            Segment::Sme => "sme",
            Segment::Large => "large",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Year-indexed quantity tracked for every simulation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Series {
    /// Market size in currency units.
    MarketSize,
    /// SME adoption fraction.
    SmeAdoption,
    /// Large enterprise adoption fraction.
    LargeAdoption,
    /// Population-weighted blend of the segment adoptions.
    OverallAdoption,
}

impl Series {
    /// All series in export order.
    pub const ALL: [Series; 4] = [
        Series::MarketSize,
        Series::SmeAdoption,
        Series::LargeAdoption,
        Series::OverallAdoption,
    ];

    /// The adoption series of a segment.
    pub fn adoption(segment: Segment) -> Self {
        match segment {
            Segment::Sme => Series::SmeAdoption,
            Segment::Large => Series::LargeAdoption,
        }
    }

    /// Identifier used as the export key.
    pub fn name(self) -> &'static str {
        match self {
            Series::MarketSize => "market_size",
            Series::SmeAdoption => "sme_adoption",
            Series::LargeAdoption => "large_adoption",
            Series::OverallAdoption => "overall_adoption",
        }
    }

    /// Whether the series is an adoption fraction in [0, 1].
    pub fn is_adoption(self) -> bool {
        !matches!(self, Series::MarketSize)
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
