//! Highlight items for the start-page carousel
//!
//! Normalizes two unrelated payloads, top combinable concepts and
//! individual high-score datasets, into one list the carousel can rotate
//! through.

use crate::api::{Concept, Gem};

/// Minimum WFS endpoints for a concept to count as combinable
pub const MIN_CONCEPT_WFS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    /// Opens the concept analysis when activated
    Concept,
    /// Opens the dataset detail when activated
    Dataset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub kind: HighlightKind,
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub score: f64,
}

impl Highlight {
    fn from_concept(concept: &Concept) -> Self {
        Self {
            kind: HighlightKind::Concept,
            id: concept.id.clone(),
            title: concept.name_de.clone(),
            subtitle: format!("{} Bundesländer · {} WFS", concept.provinces, concept.wfs_count),
            score: f64::from(concept.wfs_count),
        }
    }

    fn from_gem(gem: &Gem) -> Self {
        Self {
            kind: HighlightKind::Dataset,
            id: gem.id.clone(),
            title: gem.title.clone(),
            subtitle: gem.province.clone().unwrap_or_else(|| "Österreich".to_string()),
            score: gem.score,
        }
    }
}

/// Build the carousel list: the strongest combinable concepts first,
/// then gems in server order
#[must_use]
pub fn build_highlights(
    concepts: &[Concept],
    gems: &[Gem],
    max_concepts: usize,
    max_gems: usize,
) -> Vec<Highlight> {
    let mut combinable: Vec<&Concept> = concepts
        .iter()
        .filter(|c| c.wfs_count >= MIN_CONCEPT_WFS)
        .collect();
    combinable.sort_by(|a, b| b.wfs_count.cmp(&a.wfs_count));

    combinable
        .into_iter()
        .take(max_concepts)
        .map(Highlight::from_concept)
        .chain(gems.iter().take(max_gems).map(Highlight::from_gem))
        .collect()
}
