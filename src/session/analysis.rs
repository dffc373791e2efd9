//! Presentation model for a combinability analysis
//!
//! Both entry points of the combination workflow (explicit selection and
//! concept id) end up here, so the analysis overlay always renders the
//! same shape regardless of how it was requested.

use crate::api::{Analysis, CombineResponse, FieldMapping, WfsService};

/// The nine Austrian federal provinces, in display order
pub const PROVINCES: [&str; 9] = [
    "Wien",
    "Niederösterreich",
    "Oberösterreich",
    "Salzburg",
    "Tirol",
    "Vorarlberg",
    "Kärnten",
    "Steiermark",
    "Burgenland",
];

/// Maximum common fields listed before the overflow marker
pub const MAX_COMMON_FIELDS: usize = 15;

/// Maximum field mappings listed before the overflow marker
pub const MAX_FIELD_MAPPINGS: usize = 8;

pub const FALLBACK_TITLE: &str = "Ausgewählte Datensätze";

/// A list cut to a display limit, remembering how much was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncated<T> {
    pub shown: Vec<T>,
    pub hidden: usize,
}

impl<T> Truncated<T> {
    #[must_use]
    pub fn new(mut items: Vec<T>, limit: usize) -> Self {
        let hidden = items.len().saturating_sub(limit);
        items.truncate(limit);
        Self { shown: items, hidden }
    }

    /// `"+N"` overflow label, if anything was cut
    #[must_use]
    pub fn overflow_label(&self) -> Option<String> {
        (self.hidden > 0).then(|| format!("+{}", self.hidden))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvinceCoverage {
    pub name: &'static str,
    pub covered: bool,
}

/// Everything the analysis overlay shows
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    pub title: String,
    /// Concept id when the analysis was requested for a concept
    pub concept: Option<String>,
    /// Rounded coverage in `0..=100`, drives the fill bar
    pub coverage_percent: u8,
    pub provinces: Vec<ProvinceCoverage>,
    pub datasets_with_wfs: u32,
    pub total_datasets: u32,
    pub combinable: bool,
    pub common_fields: Truncated<String>,
    pub field_mappings: Truncated<FieldMapping>,
    pub wfs_services: Vec<WfsService>,
    pub prompt: Option<String>,
}

impl AnalysisView {
    #[must_use]
    pub fn from_response(response: CombineResponse) -> Self {
        let CombineResponse {
            concept,
            name_de,
            analysis,
            wfs_services,
            combination_prompt,
        } = response;
        let Analysis {
            coverage_pct,
            provinces_covered,
            datasets_with_wfs,
            total_datasets,
            combinable,
            common_fields,
            field_mappings,
            ..
        } = analysis;

        let title = name_de
            .or_else(|| concept.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| FALLBACK_TITLE.to_string());

        let provinces = PROVINCES
            .iter()
            .map(|&name| ProvinceCoverage {
                name,
                covered: provinces_covered.iter().any(|p| p == name),
            })
            .collect();

        Self {
            title,
            concept,
            coverage_percent: coverage_percent(coverage_pct),
            provinces,
            datasets_with_wfs,
            total_datasets,
            combinable,
            common_fields: Truncated::new(common_fields, MAX_COMMON_FIELDS),
            field_mappings: Truncated::new(field_mappings, MAX_FIELD_MAPPINGS),
            wfs_services,
            prompt: combination_prompt.filter(|p| !p.trim().is_empty()),
        }
    }

    /// Number of provinces marked as covered
    #[must_use]
    pub fn covered_count(&self) -> usize {
        self.provinces.iter().filter(|p| p.covered).count()
    }
}

/// Round to the nearest integer and clamp into `0..=100`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn coverage_percent(pct: f64) -> u8 {
    if pct.is_nan() {
        return 0;
    }
    pct.round().clamp(0.0, 100.0) as u8
}
