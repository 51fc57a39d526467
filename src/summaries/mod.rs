//! Linguistic summaries
//!
//! Catalogue types ([`Label`], [`LinguisticVariable`], [`Quantifier`]) and
//! the two summary calculators:
//! - [`SingleSubjectSummary`] - "Q records (being W) are S" with the full
//!   T1..T11 quality battery and the weighted optimum T*
//! - [`MultisubjectSummary`] - four comparison forms over two disjoint
//!   sub-populations

mod label;
mod multi;
mod quantifier;
mod single;

pub use label::{Label, LinguisticVariable};
pub use multi::{MultisubjectForm, MultisubjectSummary, Subpopulation};
pub use quantifier::{Quantifier, QuantifierKind};
pub use single::{SingleSubjectSummary, DEFAULT_WEIGHTS, MEASURE_KEYS};

use crate::dataset::AttributeTable;

/// Compound summarizer membership of one record: the minimum over all
/// summarizer labels of the label's degree at the extracted value.
///
/// A missing extractor or a missing value yields 0 for the whole record
/// (soft missing-data policy).
pub(crate) fn summarizer_membership<R>(
    summarizers: &[&Label],
    record: &R,
    attributes: &AttributeTable<R>,
) -> f64 {
    let mut membership = 1.0f64;
    for label in summarizers {
        let Some(value) = attributes.value(label.attribute(), record) else {
            return 0.0;
        };
        membership = membership.min(label.fuzzy_set().membership(value));
    }
    membership
}

/// Qualifier membership of one record; 1.0 when no qualifier is present
pub(crate) fn qualifier_membership<R>(
    qualifier: Option<&Label>,
    record: &R,
    attributes: &AttributeTable<R>,
) -> f64 {
    match qualifier {
        None => 1.0,
        Some(label) => attributes
            .value(label.attribute(), record)
            .map(|value| label.fuzzy_set().membership(value))
            .unwrap_or(0.0),
    }
}

/// Join summarizer names with the sentence conjunction
pub(crate) fn join_names(labels: &[&Label]) -> String {
    labels
        .iter()
        .map(|l| l.name())
        .collect::<Vec<_>>()
        .join(" and ")
}
