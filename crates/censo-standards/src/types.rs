//! Registry descriptor types.

use serde::Deserialize;

/// Header/footer row-skip combination of a raw indicator workbook.
///
/// The three known profiles cover every indicator family published so far;
/// the class-size/hours/distortion family uses 8 header rows, the
/// higher-education share uses 9, and the teacher-effort family uses 10.
/// All of them trail 6 footer rows of source notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum SkipProfile {
    #[serde(rename = "8/6")]
    Rows8x6,
    #[serde(rename = "9/6")]
    Rows9x6,
    #[serde(rename = "10/6")]
    Rows10x6,
}

impl SkipProfile {
    /// Rows above (and including metadata around) the header to discard.
    /// The first row after the skip is the raw header row.
    pub const fn header_rows(&self) -> usize {
        match self {
            Self::Rows8x6 => 8,
            Self::Rows9x6 => 9,
            Self::Rows10x6 => 10,
        }
    }

    /// Trailing note rows to discard.
    pub const fn footer_rows(&self) -> usize {
        6
    }
}

impl std::fmt::Display for SkipProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.header_rows(), self.footer_rows())
    }
}

/// One contiguous year range sharing a single raw column layout.
#[derive(Debug, Clone, Deserialize)]
pub struct Era {
    pub first_year: i32,
    pub last_year: i32,
    /// Position of this indicator's group block within the trailing columns.
    /// Non-zero only for indicators sliced out of a shared workbook.
    #[serde(default)]
    pub group_offset: usize,
    /// Total trailing columns the raw file must carry. Defaults to the group
    /// count; shared workbooks declare the full block width here.
    #[serde(default)]
    pub expected_trailing: Option<usize>,
    /// Ordered canonical group labels, positionally matched to the raw
    /// group columns.
    pub groups: Vec<String>,
}

impl Era {
    /// Whether this era covers the given census year.
    pub fn covers(&self, year: i32) -> bool {
        (self.first_year..=self.last_year).contains(&year)
    }

    /// Trailing column count the raw file must have for this era.
    pub fn trailing_width(&self) -> usize {
        self.expected_trailing.unwrap_or(self.groups.len())
    }
}

/// Everything the pipeline needs to know about one indicator source.
#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorDescriptor {
    /// Indicator code (AFD, IED, ...). Filled from the document key.
    #[serde(skip)]
    pub code: String,
    /// Display name inserted into every normalized row.
    pub name: String,
    /// Header/footer skip combination of the raw workbook.
    pub skip_profile: SkipProfile,
    /// Directory/file family on disk. Differs from the code for indicators
    /// sliced out of a shared workbook (the school-performance rates all
    /// live in the TRE release).
    pub source_file: String,
    /// Layout eras, ordered by year.
    pub eras: Vec<Era>,
}

impl IndicatorDescriptor {
    /// Resolve the layout era covering `year`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StandardsError::EraNotCovered`] when no era matches;
    /// new yearly layouts must be declared, never inferred.
    pub fn era_for(&self, year: i32) -> crate::Result<&Era> {
        self.eras
            .iter()
            .find(|era| era.covers(year))
            .ok_or_else(|| crate::StandardsError::EraNotCovered {
                code: self.code.clone(),
                year,
            })
    }
}
