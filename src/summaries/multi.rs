//! Multisubject summaries
//!
//! Compares two disjoint sub-populations P1 and P2 with one of four sentence
//! forms, selected by the presence and placement of the qualifier:
//!
//! 1. "Q P1 compared to P2 are S" - no qualifier
//! 2. "Q P1 compared to P2 being W are S" - qualifier restricts P2
//! 3. "Q P1 being W compared to P2 are S" - qualifier restricts P1
//! 4. "More P1 than P2 are S" - no quantifier, inclusion-based comparison
//!
//! The form is an explicit closed selector rather than a boolean flag, so
//! dispatch is exhaustive. Every form returns 0 when either population is
//! empty or its denominator vanishes.

use crate::dataset::AttributeTable;
use crate::error::{EngineError, Result};
use crate::summaries::{join_names, qualifier_membership, summarizer_membership};
use crate::summaries::{Label, Quantifier};

/// Which comparison form a multisubject summary uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultisubjectForm {
    /// Form 1: quantified, no qualifier
    Quantified = 1,
    /// Form 2: quantified, qualifier restricts the second population
    QualifiedSecond = 2,
    /// Form 3: quantified, qualifier restricts the first population
    QualifiedFirst = 3,
    /// Form 4: unquantified inclusion comparison
    Comparative = 4,
}

impl MultisubjectForm {
    /// The conventional form number (1..4)
    pub fn number(&self) -> u8 {
        *self as u8
    }
}

/// A named sub-population: subject label plus its records
pub struct Subpopulation<'a, R> {
    name: &'a str,
    records: Vec<&'a R>,
}

impl<'a, R> Subpopulation<'a, R> {
    /// Create a sub-population from a subject name and record references
    pub fn new(name: &'a str, records: Vec<&'a R>) -> Self {
        Subpopulation { name, records }
    }

    /// The subject label used in sentences
    pub fn name(&self) -> &str {
        self.name
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the sub-population holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A two-population comparison summary
pub struct MultisubjectSummary<'a, R> {
    quantifier: Option<&'a Quantifier>,
    qualifier: Option<&'a Label>,
    summarizers: Vec<&'a Label>,
    first: Subpopulation<'a, R>,
    second: Subpopulation<'a, R>,
    attributes: &'a AttributeTable<R>,
    form: MultisubjectForm,
}

impl<R> std::fmt::Debug for MultisubjectSummary<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultisubjectSummary")
            .field("quantifier", &self.quantifier)
            .field("qualifier", &self.qualifier)
            .field("form", &self.form)
            .finish_non_exhaustive()
    }
}

impl<'a, R> MultisubjectSummary<'a, R> {
    /// Form 1: "Q P1 compared to P2 are S"
    pub fn quantified(
        quantifier: &'a Quantifier,
        summarizers: Vec<&'a Label>,
        first: Subpopulation<'a, R>,
        second: Subpopulation<'a, R>,
        attributes: &'a AttributeTable<R>,
    ) -> Result<Self> {
        Self::build(
            Some(quantifier),
            None,
            summarizers,
            first,
            second,
            attributes,
            MultisubjectForm::Quantified,
        )
    }

    /// Form 2: "Q P1 compared to P2 being W are S"
    pub fn qualified_second(
        quantifier: &'a Quantifier,
        qualifier: &'a Label,
        summarizers: Vec<&'a Label>,
        first: Subpopulation<'a, R>,
        second: Subpopulation<'a, R>,
        attributes: &'a AttributeTable<R>,
    ) -> Result<Self> {
        Self::build(
            Some(quantifier),
            Some(qualifier),
            summarizers,
            first,
            second,
            attributes,
            MultisubjectForm::QualifiedSecond,
        )
    }

    /// Form 3: "Q P1 being W compared to P2 are S"
    pub fn qualified_first(
        quantifier: &'a Quantifier,
        qualifier: &'a Label,
        summarizers: Vec<&'a Label>,
        first: Subpopulation<'a, R>,
        second: Subpopulation<'a, R>,
        attributes: &'a AttributeTable<R>,
    ) -> Result<Self> {
        Self::build(
            Some(quantifier),
            Some(qualifier),
            summarizers,
            first,
            second,
            attributes,
            MultisubjectForm::QualifiedFirst,
        )
    }

    /// Form 4: "More P1 than P2 are S"
    pub fn comparative(
        summarizers: Vec<&'a Label>,
        first: Subpopulation<'a, R>,
        second: Subpopulation<'a, R>,
        attributes: &'a AttributeTable<R>,
    ) -> Result<Self> {
        Self::build(
            None,
            None,
            summarizers,
            first,
            second,
            attributes,
            MultisubjectForm::Comparative,
        )
    }

    fn build(
        quantifier: Option<&'a Quantifier>,
        qualifier: Option<&'a Label>,
        summarizers: Vec<&'a Label>,
        first: Subpopulation<'a, R>,
        second: Subpopulation<'a, R>,
        attributes: &'a AttributeTable<R>,
        form: MultisubjectForm,
    ) -> Result<Self> {
        if summarizers.is_empty() {
            return Err(EngineError::empty_summarizers());
        }
        Ok(MultisubjectSummary {
            quantifier,
            qualifier,
            summarizers,
            first,
            second,
            attributes,
            form,
        })
    }

    /// The comparison form in use
    pub fn form(&self) -> MultisubjectForm {
        self.form
    }

    /// The conventional form number (1..4)
    pub fn form_number(&self) -> u8 {
        self.form.number()
    }

    /// Degree of truth of the comparison sentence
    pub fn degree_of_truth(&self) -> f64 {
        if self.first.is_empty() || self.second.is_empty() {
            return 0.0;
        }
        match self.form {
            MultisubjectForm::Quantified => self.truth_form_one(),
            MultisubjectForm::QualifiedSecond => self.truth_form_two(),
            MultisubjectForm::QualifiedFirst => self.truth_form_three(),
            MultisubjectForm::Comparative => self.truth_form_four(),
        }
    }

    /// Render the comparison sentence
    pub fn sentence(&self) -> String {
        let summarizers = join_names(&self.summarizers);
        let (p1, p2) = (self.first.name(), self.second.name());
        match self.form {
            MultisubjectForm::Quantified => {
                let q = self.quantifier.map(Quantifier::name).unwrap_or_default();
                format!("{} {} compared to {} are {}", q, p1, p2, summarizers)
            }
            MultisubjectForm::QualifiedSecond => {
                let q = self.quantifier.map(Quantifier::name).unwrap_or_default();
                let w = self.qualifier.map(Label::name).unwrap_or_default();
                format!("{} {} compared to {} being {} are {}", q, p1, p2, w, summarizers)
            }
            MultisubjectForm::QualifiedFirst => {
                let q = self.quantifier.map(Quantifier::name).unwrap_or_default();
                let w = self.qualifier.map(Label::name).unwrap_or_default();
                format!("{} {} being {} compared to {} are {}", q, p1, w, p2, summarizers)
            }
            MultisubjectForm::Comparative => {
                format!("More {} than {} are {}", p1, p2, summarizers)
            }
        }
    }

    // ========================================================================
    // Forms
    // ========================================================================

    fn summarizer_membership(&self, record: &R) -> f64 {
        summarizer_membership(&self.summarizers, record, self.attributes)
    }

    fn qualifier_membership(&self, record: &R) -> f64 {
        qualifier_membership(self.qualifier, record, self.attributes)
    }

    fn normalized_sigma(&self, population: &Subpopulation<'a, R>) -> f64 {
        let sigma: f64 = population
            .records
            .iter()
            .map(|r| self.summarizer_membership(r))
            .sum();
        sigma / population.len() as f64
    }

    /// Form 1: share of P1's normalized summarizer sigma-count against both
    /// populations'
    fn truth_form_one(&self) -> f64 {
        let Some(quantifier) = self.quantifier else {
            return 0.0;
        };
        let first = self.normalized_sigma(&self.first);
        let second = self.normalized_sigma(&self.second);
        let denominator = first + second;
        if denominator == 0.0 {
            return 0.0;
        }
        quantifier.fuzzy_set().membership(first / denominator)
    }

    /// Form 2: qualified numerator over P1, qualifier mass plus P2's
    /// summarizer mass in the denominator
    fn truth_form_two(&self) -> f64 {
        let Some(quantifier) = self.quantifier else {
            return 0.0;
        };
        let n1 = self.first.len() as f64;
        let numerator: f64 = self
            .first
            .records
            .iter()
            .map(|r| self.summarizer_membership(r).min(self.qualifier_membership(r)))
            .sum::<f64>()
            / n1;
        let qualifier_mass: f64 = self
            .first
            .records
            .iter()
            .map(|r| self.qualifier_membership(r))
            .sum::<f64>()
            / n1;
        let denominator = qualifier_mass + self.normalized_sigma(&self.second);
        if denominator == 0.0 {
            return 0.0;
        }
        quantifier.fuzzy_set().membership(numerator / denominator)
    }

    /// Form 3: same numerator as Form 2, but the qualified mass itself joins
    /// P2's summarizer mass in the denominator
    fn truth_form_three(&self) -> f64 {
        let Some(quantifier) = self.quantifier else {
            return 0.0;
        };
        let n1 = self.first.len() as f64;
        let numerator: f64 = self
            .first
            .records
            .iter()
            .map(|r| self.summarizer_membership(r).min(self.qualifier_membership(r)))
            .sum::<f64>()
            / n1;
        let denominator = numerator + self.normalized_sigma(&self.second);
        if denominator == 0.0 {
            return 0.0;
        }
        quantifier.fuzzy_set().membership(numerator / denominator)
    }

    /// Form 4: one minus the inclusion of P2's summarizer profile in P1's
    ///
    /// Both profiles are sorted descending and paired up to the shorter
    /// length; the inclusion degree is the paired minimum mass over P2's
    /// total mass.
    fn truth_form_four(&self) -> f64 {
        let mut profile1: Vec<f64> = self
            .first
            .records
            .iter()
            .map(|r| self.summarizer_membership(r))
            .collect();
        let mut profile2: Vec<f64> = self
            .second
            .records
            .iter()
            .map(|r| self.summarizer_membership(r))
            .collect();
        profile1.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        profile2.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));

        let reference_mass: f64 = profile2.iter().sum();
        if reference_mass == 0.0 {
            return 0.0;
        }
        let matched_mass: f64 = profile1
            .iter()
            .zip(profile2.iter())
            .map(|(a, b)| a.min(*b))
            .sum();
        1.0 - matched_mass / reference_mass
    }
}
