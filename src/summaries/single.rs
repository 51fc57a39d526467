//! Single-subject summaries
//!
//! Computes the degree of truth and ten auxiliary quality measures for a
//! sentence of the form "Q records are S" (Form 1) or "Q records being W are
//! S" (Form 2, with a qualifier). All measures are evaluated once at
//! construction and exposed as an ordered `T1..T11, T*` mapping.
//!
//! Every ratio guards its denominator: an empty population, a qualifier
//! nobody satisfies, or a zero-length universe yields a 0 measure instead of
//! a NaN or an error, so large generated batches never abort on one bad
//! combination.

use indexmap::IndexMap;

use crate::dataset::AttributeTable;
use crate::error::{EngineError, Result};
use crate::summaries::{join_names, qualifier_membership, summarizer_membership};
use crate::summaries::{Label, Quantifier, QuantifierKind};

/// Default T* weight vector: truth dominates, the auxiliary measures share
/// the remainder evenly
pub const DEFAULT_WEIGHTS: [f64; 11] = [
    0.7, 0.03, 0.03, 0.03, 0.03, 0.03, 0.03, 0.03, 0.03, 0.03, 0.03,
];

/// Measure keys in presentation order
pub const MEASURE_KEYS: [&str; 12] = [
    "T1", "T2", "T3", "T4", "T5", "T6", "T7", "T8", "T9", "T10", "T11", "T*",
];

/// A single-subject summary over one population
pub struct SingleSubjectSummary<'a, R> {
    quantifier: &'a Quantifier,
    qualifier: Option<&'a Label>,
    summarizers: Vec<&'a Label>,
    records: &'a [R],
    attributes: &'a AttributeTable<R>,
    measures: IndexMap<&'static str, f64>,
}

impl<R> std::fmt::Debug for SingleSubjectSummary<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleSubjectSummary")
            .field("quantifier", &self.quantifier)
            .field("qualifier", &self.qualifier)
            .field("measures", &self.measures)
            .finish_non_exhaustive()
    }
}

impl<'a, R> SingleSubjectSummary<'a, R> {
    /// Build the summary and compute all measures
    ///
    /// Fails with a configuration error when `summarizers` is empty. An
    /// empty population is not an error; every measure degrades to 0.
    pub fn new(
        quantifier: &'a Quantifier,
        qualifier: Option<&'a Label>,
        summarizers: Vec<&'a Label>,
        records: &'a [R],
        attributes: &'a AttributeTable<R>,
    ) -> Result<Self> {
        if summarizers.is_empty() {
            return Err(EngineError::empty_summarizers());
        }

        let mut summary = SingleSubjectSummary {
            quantifier,
            qualifier,
            summarizers,
            records,
            attributes,
            measures: IndexMap::new(),
        };
        summary.compute_measures();
        Ok(summary)
    }

    /// The quantifier of the sentence
    pub fn quantifier(&self) -> &Quantifier {
        self.quantifier
    }

    /// The qualifier, if the summary is of the second form
    pub fn qualifier(&self) -> Option<&Label> {
        self.qualifier
    }

    /// The summarizer labels
    pub fn summarizers(&self) -> &[&'a Label] {
        &self.summarizers
    }

    /// All measures keyed `T1..T11, T*` in presentation order
    pub fn measures(&self) -> &IndexMap<&'static str, f64> {
        &self.measures
    }

    /// T1 degree of truth
    pub fn degree_of_truth(&self) -> f64 {
        self.measures["T1"]
    }

    /// T* weighted optimum under the current weights
    pub fn optimal_measure(&self) -> f64 {
        self.measures["T*"]
    }

    /// Recompute T* with a custom weight vector
    ///
    /// Exactly 11 weights (for T1..T11) are required; the engine does not
    /// check that they sum to 1, callers validate that upstream.
    pub fn recalculate(&mut self, weights: &[f64]) -> Result<()> {
        let optimal = self.weighted_sum(weights)?;
        self.measures.insert("T*", optimal);
        Ok(())
    }

    /// Render the sentence with the given subject noun
    pub fn sentence(&self, subject: &str) -> String {
        let summarizers = join_names(&self.summarizers);
        match self.qualifier {
            None => format!("{} {} are {}", self.quantifier.name(), subject, summarizers),
            Some(qualifier) => format!(
                "{} {} being {} are {}",
                self.quantifier.name(),
                subject,
                qualifier.name(),
                summarizers
            ),
        }
    }

    // ========================================================================
    // Measure computation
    // ========================================================================

    fn compute_measures(&mut self) {
        let t1 = self.compute_truth();
        let t2 = self.compute_imprecision();
        let t3 = self.compute_covering();
        let t4 = self.compute_appropriateness(t3);
        let t5 = self.compute_length();
        let t6 = self.compute_quantifier_imprecision();
        let t7 = self.compute_quantifier_cardinality();
        let t8 = self.compute_summarizer_cardinality();
        let t9 = self.compute_qualifier_imprecision();
        let t10 = self.compute_qualifier_cardinality();
        let t11 = 1.0;

        let values = [t1, t2, t3, t4, t5, t6, t7, t8, t9, t10, t11];
        for (key, value) in MEASURE_KEYS.iter().zip(values.iter()) {
            self.measures.insert(key, *value);
        }
        let optimal: f64 = values
            .iter()
            .zip(DEFAULT_WEIGHTS.iter())
            .map(|(t, w)| t * w)
            .sum();
        self.measures.insert("T*", optimal);
    }

    fn weighted_sum(&self, weights: &[f64]) -> Result<f64> {
        if weights.len() != 11 {
            return Err(EngineError::weight_count(weights.len()));
        }
        Ok(MEASURE_KEYS[..11]
            .iter()
            .zip(weights.iter())
            .map(|(key, w)| self.measures[key] * w)
            .sum())
    }

    fn summarizer_membership(&self, record: &R) -> f64 {
        summarizer_membership(&self.summarizers, record, self.attributes)
    }

    fn qualifier_membership(&self, record: &R) -> f64 {
        qualifier_membership(self.qualifier, record, self.attributes)
    }

    /// T1: truth of the quantified sentence
    fn compute_truth(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        match self.qualifier {
            None => self.truth_first_form(),
            Some(_) => self.truth_second_form(),
        }
    }

    /// Form 1: sigma-count of the summarizer, normalized by population size
    /// for relative quantifiers, evaluated in the quantifier's set
    fn truth_first_form(&self) -> f64 {
        let mut sigma_count: f64 = self
            .records
            .iter()
            .map(|r| self.summarizer_membership(r))
            .sum();

        if self.quantifier.kind() == QuantifierKind::Relative {
            sigma_count /= self.records.len() as f64;
        }

        self.quantifier.fuzzy_set().membership(sigma_count)
    }

    /// Form 2: ratio of the qualified summarizer sigma-count to the
    /// qualifier sigma-count
    fn truth_second_form(&self) -> f64 {
        let mut sigma_w = 0.0;
        let mut sigma_s_and_w = 0.0;

        for record in self.records {
            let s = self.summarizer_membership(record);
            let w = self.qualifier_membership(record);
            sigma_s_and_w += s.min(w);
            sigma_w += w;
        }

        if sigma_w == 0.0 {
            return 0.0;
        }
        self.quantifier.fuzzy_set().membership(sigma_s_and_w / sigma_w)
    }

    /// T2: one minus the geometric mean of the summarizers' fuzziness
    fn compute_imprecision(&self) -> f64 {
        let product: f64 = self
            .summarizers
            .iter()
            .map(|s| s.fuzzy_set().degree_of_fuzziness())
            .product();
        1.0 - product.powf(1.0 / self.summarizers.len() as f64)
    }

    /// T3: fraction of (qualifier-satisfying) records with positive
    /// summarizer membership
    fn compute_covering(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        match self.qualifier {
            None => {
                let covered = self
                    .records
                    .iter()
                    .filter(|r| self.summarizer_membership(r) > 0.0)
                    .count();
                covered as f64 / self.records.len() as f64
            }
            Some(_) => {
                let mut in_qualifier = 0usize;
                let mut in_both = 0usize;
                for record in self.records {
                    if self.qualifier_membership(record) > 0.0 {
                        in_qualifier += 1;
                        if self.summarizer_membership(record) > 0.0 {
                            in_both += 1;
                        }
                    }
                }
                if in_qualifier == 0 {
                    return 0.0;
                }
                in_both as f64 / in_qualifier as f64
            }
        }
    }

    /// T4: distance between the independent-coverage product and T3
    fn compute_appropriateness(&self, t3: f64) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let mut product = 1.0;
        for summarizer in &self.summarizers {
            if !self.attributes.contains(summarizer.attribute()) {
                return 0.0;
            }
            let satisfying = self
                .records
                .iter()
                .filter(|r| {
                    self.attributes
                        .value(summarizer.attribute(), r)
                        .map(|v| summarizer.fuzzy_set().membership(v) > 0.0)
                        .unwrap_or(false)
                })
                .count();
            product *= satisfying as f64 / self.records.len() as f64;
        }
        (product - t3).abs()
    }

    /// T5: shorter summaries score higher
    fn compute_length(&self) -> f64 {
        2.0 * 0.5f64.powi(self.summarizers.len() as i32)
    }

    /// T6: fraction of the quantifier universe outside its support
    fn compute_quantifier_imprecision(&self) -> f64 {
        let universe_size = self.quantifier.fuzzy_set().universe().sample_count();
        if universe_size == 0 {
            return 0.0;
        }
        let support_size = self.quantifier.fuzzy_set().support().len();
        1.0 - support_size as f64 / universe_size as f64
    }

    /// T7: one minus the quantifier's relative cardinality
    fn compute_quantifier_cardinality(&self) -> f64 {
        let universe_size = self.quantifier.fuzzy_set().universe().sample_count();
        if universe_size == 0 {
            return 0.0;
        }
        1.0 - self.quantifier.fuzzy_set().sigma_count() / universe_size as f64
    }

    /// T8: one minus the geometric mean of the summarizers' relative
    /// cardinalities
    fn compute_summarizer_cardinality(&self) -> f64 {
        let mut product = 1.0;
        for summarizer in &self.summarizers {
            let length = summarizer.fuzzy_set().universe().length();
            if length == 0.0 {
                return 0.0;
            }
            product *= summarizer.fuzzy_set().sigma_count() / length;
        }
        1.0 - product.powf(1.0 / self.summarizers.len() as f64)
    }

    /// T9: one minus the qualifier's fuzziness, 0 without a qualifier
    fn compute_qualifier_imprecision(&self) -> f64 {
        match self.qualifier {
            None => 0.0,
            Some(qualifier) => 1.0 - qualifier.fuzzy_set().degree_of_fuzziness(),
        }
    }

    /// T10: one minus the qualifier's relative cardinality, 0 without a
    /// qualifier
    fn compute_qualifier_cardinality(&self) -> f64 {
        match self.qualifier {
            None => 0.0,
            Some(qualifier) => {
                let universe_size = qualifier.fuzzy_set().universe().sample_count();
                if universe_size == 0 {
                    return 0.0;
                }
                1.0 - qualifier.fuzzy_set().sigma_count() / universe_size as f64
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::{FuzzySet, MembershipFunction, Universe};
    use std::sync::Arc;

    struct Row {
        x: Option<f64>,
    }

    fn rows(values: &[f64]) -> Vec<Row> {
        values.iter().map(|&v| Row { x: Some(v) }).collect()
    }

    fn attributes() -> AttributeTable<Row> {
        AttributeTable::new().with("x", |r: &Row| r.x)
    }

    fn most() -> Quantifier {
        // membership ramps 0 -> 1 over the ratio interval [0.5, 0.8]
        Quantifier::new(
            "most",
            QuantifierKind::Relative,
            FuzzySet::new(
                Arc::new(Universe::continuous(0.0, 1.0, 0.01).unwrap()),
                MembershipFunction::trapezoidal(0.5, 0.8, 1.0, 1.0).unwrap(),
            ),
        )
    }

    fn label(name: &str, shape: MembershipFunction) -> Label {
        Label::new(
            name,
            FuzzySet::new(Arc::new(Universe::continuous(0.0, 8.0, 2.0).unwrap()), shape),
            "x",
        )
    }

    fn everything_label() -> Label {
        label("anything", MembershipFunction::trapezoidal(0.0, 0.0, 8.0, 8.0).unwrap())
    }

    #[test]
    fn test_empty_summarizers_rejected() {
        let quantifier = most();
        let records = rows(&[1.0]);
        let attributes = attributes();
        let err =
            SingleSubjectSummary::new(&quantifier, None, vec![], &records, &attributes).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::EmptySummarizers);
    }

    #[test]
    fn test_truth_fully_satisfying_population() {
        let quantifier = most();
        let summarizer = everything_label();
        let records = rows(&[1.0, 2.0, 3.0, 4.0]);
        let attributes = attributes();

        let summary =
            SingleSubjectSummary::new(&quantifier, None, vec![&summarizer], &records, &attributes)
                .unwrap();
        // every record satisfies S fully, so the ratio is 1.0
        assert_eq!(
            summary.degree_of_truth(),
            quantifier.fuzzy_set().membership(1.0)
        );
        assert_eq!(summary.degree_of_truth(), 1.0);
    }

    #[test]
    fn test_truth_empty_population_is_zero() {
        let quantifier = most();
        let summarizer = everything_label();
        let records: Vec<Row> = Vec::new();
        let attributes = attributes();

        let summary =
            SingleSubjectSummary::new(&quantifier, None, vec![&summarizer], &records, &attributes)
                .unwrap();
        assert_eq!(summary.degree_of_truth(), 0.0);
    }

    #[test]
    fn test_truth_absolute_quantifier_unnormalized() {
        // "about two": triangle peaking at a raw sigma-count of 2
        let quantifier = Quantifier::new(
            "about two",
            QuantifierKind::Absolute,
            FuzzySet::new(
                Arc::new(Universe::continuous(0.0, 10.0, 0.5).unwrap()),
                MembershipFunction::triangular(1.0, 2.0, 3.0).unwrap(),
            ),
        );
        let summarizer = everything_label();
        let records = rows(&[1.0, 2.0]);
        let attributes = attributes();

        let summary =
            SingleSubjectSummary::new(&quantifier, None, vec![&summarizer], &records, &attributes)
                .unwrap();
        // sigma-count is 2.0 and stays unnormalized
        assert_eq!(summary.degree_of_truth(), 1.0);
    }

    #[test]
    fn test_truth_second_form() {
        // S: triangle over x, W: right shoulder; records at 2, 4, 6, 8
        let summarizer = label("balanced", MembershipFunction::triangular(0.0, 4.0, 8.0).unwrap());
        let qualifier = label("high", MembershipFunction::trapezoidal(4.0, 6.0, 8.0, 8.0).unwrap());
        // quantifier peaking exactly at the expected ratio 0.25
        let quantifier = Quantifier::new(
            "about a quarter",
            QuantifierKind::Relative,
            FuzzySet::new(
                Arc::new(Universe::continuous(0.0, 1.0, 0.01).unwrap()),
                MembershipFunction::triangular(0.0, 0.25, 0.5).unwrap(),
            ),
        );
        let records = rows(&[2.0, 4.0, 6.0, 8.0]);
        let attributes = attributes();

        let summary = SingleSubjectSummary::new(
            &quantifier,
            Some(&qualifier),
            vec![&summarizer],
            &records,
            &attributes,
        )
        .unwrap();
        // W memberships: 0, 0, 1, 1 ; S memberships: 0.5, 1, 0.5, 0
        // min(S, W): 0, 0, 0.5, 0 ; ratio = 0.5 / 2 = 0.25
        assert!((summary.degree_of_truth() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_truth_unsatisfied_qualifier_is_zero() {
        let summarizer = everything_label();
        // qualifier supported only far outside the data
        let qualifier = label("nowhere", MembershipFunction::triangular(7.5, 7.75, 7.9).unwrap());
        let quantifier = most();
        let records = rows(&[0.0, 2.0]);
        let attributes = attributes();

        let summary = SingleSubjectSummary::new(
            &quantifier,
            Some(&qualifier),
            vec![&summarizer],
            &records,
            &attributes,
        )
        .unwrap();
        assert_eq!(summary.degree_of_truth(), 0.0);
    }

    #[test]
    fn test_missing_extractor_degrades_to_zero_membership() {
        let quantifier = most();
        // label bound to an attribute nobody registered
        let orphan = Label::new(
            "orphan",
            everything_label().fuzzy_set().clone(),
            "unknownAttribute",
        );
        let records = rows(&[1.0, 2.0]);
        let attributes = attributes();

        let summary =
            SingleSubjectSummary::new(&quantifier, None, vec![&orphan], &records, &attributes)
                .unwrap();
        assert_eq!(
            summary.degree_of_truth(),
            quantifier.fuzzy_set().membership(0.0)
        );
    }

    #[test]
    fn test_auxiliary_measures() {
        let quantifier = most();
        let summarizer = label("balanced", MembershipFunction::triangular(0.0, 4.0, 8.0).unwrap());
        let records = rows(&[2.0, 4.0, 6.0, 8.0]);
        let attributes = attributes();

        let summary =
            SingleSubjectSummary::new(&quantifier, None, vec![&summarizer], &records, &attributes)
                .unwrap();
        let m = summary.measures();

        // summarizer universe samples 0,2,4,6,8 -> sigma 2.0, length 8
        assert!((m["T2"] - 0.75).abs() < 1e-12);
        // records at 2,4,6 are covered, 8 is not
        assert!((m["T3"] - 0.75).abs() < 1e-12);
        // single summarizer: independent product equals T3, so T4 = 0
        assert!(m["T4"].abs() < 1e-12);
        assert_eq!(m["T5"], 1.0);
        assert!((m["T8"] - 0.75).abs() < 1e-12);
        // no qualifier
        assert_eq!(m["T9"], 0.0);
        assert_eq!(m["T10"], 0.0);
        assert_eq!(m["T11"], 1.0);

        let expected_optimal: f64 = MEASURE_KEYS[..11]
            .iter()
            .zip(DEFAULT_WEIGHTS.iter())
            .map(|(k, w)| m[k] * w)
            .sum();
        assert!((m["T*"] - expected_optimal).abs() < 1e-12);
    }

    #[test]
    fn test_measure_keys_ordered() {
        let quantifier = most();
        let summarizer = everything_label();
        let records = rows(&[1.0]);
        let attributes = attributes();
        let summary =
            SingleSubjectSummary::new(&quantifier, None, vec![&summarizer], &records, &attributes)
                .unwrap();
        let keys: Vec<&str> = summary.measures().keys().copied().collect();
        assert_eq!(keys, MEASURE_KEYS.to_vec());
    }

    #[test]
    fn test_recalculate_requires_eleven_weights() {
        let quantifier = most();
        let summarizer = everything_label();
        let records = rows(&[1.0]);
        let attributes = attributes();
        let mut summary =
            SingleSubjectSummary::new(&quantifier, None, vec![&summarizer], &records, &attributes)
                .unwrap();

        let err = summary.recalculate(&[1.0, 0.0]).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::WeightCountMismatch);

        // truth-only weighting makes T* collapse onto T1
        let mut weights = [0.0; 11];
        weights[0] = 1.0;
        summary.recalculate(&weights).unwrap();
        assert_eq!(summary.optimal_measure(), summary.degree_of_truth());
    }

    #[test]
    fn test_sentence_templates() {
        let quantifier = most();
        let s1 = label("cheap", MembershipFunction::triangular(0.0, 2.0, 4.0).unwrap());
        let s2 = label("small", MembershipFunction::triangular(4.0, 6.0, 8.0).unwrap());
        let qualifier = label("old", MembershipFunction::triangular(0.0, 4.0, 8.0).unwrap());
        let records = rows(&[1.0]);
        let attributes = attributes();

        let plain =
            SingleSubjectSummary::new(&quantifier, None, vec![&s1, &s2], &records, &attributes)
                .unwrap();
        assert_eq!(plain.sentence("houses"), "most houses are cheap and small");

        let qualified = SingleSubjectSummary::new(
            &quantifier,
            Some(&qualifier),
            vec![&s1],
            &records,
            &attributes,
        )
        .unwrap();
        assert_eq!(qualified.sentence("houses"), "most houses being old are cheap");
    }
}
