//! Summary generation engine
//!
//! Drives exhaustive sentence generation over a dataset:
//! - validates every catalogue entry before it joins the engine (convexity,
//!   normality, quantifier universes)
//! - enumerates summarizer combinations (one label per variable, up to the
//!   configured length)
//! - evaluates single-subject sentences for every quantifier/qualifier/
//!   combination and multisubject sentences for every ordered pair of
//!   partition groups
//!
//! Generation never aborts on a poor sentence: data-quality problems read
//! as zero measures and the sentence simply ranks last. Only malformed
//! catalogue entries are rejected, at registration time.

use indexmap::IndexMap;

use crate::config::LingsumConfig;
use crate::dataset::{AttributeTable, Partition};
use crate::error::{EngineError, Result};
use crate::fuzzy::Universe;
use crate::summaries::{
    Label, LinguisticVariable, MultisubjectSummary, Quantifier, QuantifierKind,
    SingleSubjectSummary, Subpopulation,
};

pub mod parallel;

// ============================================================================
// Outputs
// ============================================================================

/// One generated single-subject sentence with its quality battery
#[derive(Debug, Clone)]
pub struct SingleSummaryOutput {
    /// Rendered sentence
    pub text: String,
    /// T1 degree of truth
    pub degree_of_truth: f64,
    /// T* weighted optimum
    pub optimal_measure: f64,
    /// Full measure map, T1..T11 then T*
    pub measures: IndexMap<String, f64>,
}

/// One generated multisubject sentence
#[derive(Debug, Clone)]
pub struct MultisubjectSummaryOutput {
    /// Rendered sentence
    pub text: String,
    /// Degree of truth of the comparison
    pub degree_of_truth: f64,
    /// Comparison form number (1..4)
    pub form: u8,
}

// ============================================================================
// Jobs
// ============================================================================

struct SingleJob<'b> {
    quantifier: &'b Quantifier,
    qualifier: Option<&'b Label>,
    summarizers: Vec<&'b Label>,
}

enum MultiJobKind<'b> {
    Quantified(&'b Quantifier),
    QualifiedSecond(&'b Quantifier, &'b Label),
    QualifiedFirst(&'b Quantifier, &'b Label),
    Comparative,
}

struct MultiJob<'b> {
    kind: MultiJobKind<'b>,
    summarizers: Vec<&'b Label>,
    first: &'b str,
    second: &'b str,
}

// ============================================================================
// Engine
// ============================================================================

/// Exhaustive summary generator over one dataset
pub struct SummaryEngine<'a, R> {
    records: &'a [R],
    attributes: &'a AttributeTable<R>,
    variables: Vec<LinguisticVariable>,
    quantifiers: Vec<Quantifier>,
    partition: Option<Partition>,
    config: LingsumConfig,
}

impl<'a, R> SummaryEngine<'a, R> {
    /// Create an engine over a dataset with the default configuration
    pub fn new(records: &'a [R], attributes: &'a AttributeTable<R>) -> Self {
        SummaryEngine {
            records,
            attributes,
            variables: Vec::new(),
            quantifiers: Vec::new(),
            partition: None,
            config: LingsumConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: LingsumConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach a partition for multisubject generation
    pub fn set_partition(&mut self, partition: Partition) {
        self.partition = Some(partition);
    }

    /// Registered linguistic variables
    pub fn variables(&self) -> &[LinguisticVariable] {
        &self.variables
    }

    /// Registered quantifiers
    pub fn quantifiers(&self) -> &[Quantifier] {
        &self.quantifiers
    }

    // ========================================================================
    // Catalogue registration
    // ========================================================================

    /// Register a linguistic variable after validating every label
    ///
    /// Labels must be convex and bound to a known attribute. Subnormal
    /// labels are rescaled to height 1 on the way in.
    pub fn add_variable(&mut self, variable: LinguisticVariable) -> Result<()> {
        let mut labels = Vec::with_capacity(variable.labels().len());
        for label in variable.labels() {
            if !self.attributes.contains(label.attribute()) {
                return Err(EngineError::unknown_attribute(label.attribute()));
            }
            if !label.fuzzy_set().is_convex() {
                return Err(EngineError::invalid_shape(format!(
                    "label '{}' is not convex",
                    label.name()
                )));
            }
            let set = if label.fuzzy_set().is_normal() {
                label.fuzzy_set().clone()
            } else {
                label.fuzzy_set().normalized()?
            };
            labels.push(Label::new(label.name(), set, label.attribute()));
        }
        self.variables
            .push(LinguisticVariable::new(variable.name(), labels));
        Ok(())
    }

    /// Register a quantifier after validating its universe and shape
    ///
    /// The universe must be a continuous interval: `[0, 1]` for relative
    /// quantifiers, `[1, n]` for absolute ones where `n` is the population
    /// size. Subnormal quantifiers are rescaled to height 1.
    pub fn add_quantifier(&mut self, quantifier: Quantifier) -> Result<()> {
        let Universe::Continuous { start, end, .. } = **quantifier.fuzzy_set().universe() else {
            return Err(EngineError::invalid_quantifier_universe(format!(
                "quantifier '{}' requires a continuous universe",
                quantifier.name()
            )));
        };
        match quantifier.kind() {
            QuantifierKind::Relative => {
                if start != 0.0 || end != 1.0 {
                    return Err(EngineError::invalid_quantifier_universe(format!(
                        "relative quantifier '{}' must range over [0, 1], got [{}, {}]",
                        quantifier.name(),
                        start,
                        end
                    )));
                }
            }
            QuantifierKind::Absolute => {
                let size = self.records.len() as f64;
                if start != 1.0 || end != size {
                    return Err(EngineError::invalid_quantifier_universe(format!(
                        "absolute quantifier '{}' must range over [1, {}], got [{}, {}]",
                        quantifier.name(),
                        size,
                        start,
                        end
                    )));
                }
            }
        }
        if !quantifier.fuzzy_set().is_convex() {
            return Err(EngineError::invalid_shape(format!(
                "quantifier '{}' is not convex",
                quantifier.name()
            )));
        }
        let set = if quantifier.fuzzy_set().is_normal() {
            quantifier.fuzzy_set().clone()
        } else {
            quantifier.fuzzy_set().normalized()?
        };
        self.quantifiers
            .push(Quantifier::new(quantifier.name(), quantifier.kind(), set));
        Ok(())
    }

    // ========================================================================
    // Enumeration
    // ========================================================================

    /// All summarizer combinations: one label per variable, between one and
    /// `max_summarizers` variables, in catalogue order
    fn summarizer_combinations(&self) -> Vec<Vec<&Label>> {
        let max = self.config.generation.max_summarizers.max(1);
        let mut combos = Vec::new();
        let mut current = Vec::new();
        self.extend_combination(0, max, &mut current, &mut combos);
        combos
    }

    fn extend_combination<'b>(
        &'b self,
        start: usize,
        max: usize,
        current: &mut Vec<&'b Label>,
        out: &mut Vec<Vec<&'b Label>>,
    ) {
        if !current.is_empty() {
            out.push(current.clone());
        }
        if current.len() == max {
            return;
        }
        for index in start..self.variables.len() {
            for label in self.variables[index].labels() {
                current.push(label);
                self.extend_combination(index + 1, max, current, out);
                current.pop();
            }
        }
    }

    /// All labels across all variables, usable as qualifiers
    fn qualifier_candidates(&self) -> Vec<&Label> {
        self.variables
            .iter()
            .flat_map(|v| v.labels().iter())
            .collect()
    }

    fn combo_contains(combo: &[&Label], label: &Label) -> bool {
        combo.iter().any(|l| std::ptr::eq(*l, label))
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// Generate every single-subject sentence
    ///
    /// Form 1 pairs every quantifier with every combination; form 2 is
    /// restricted to relative quantifiers and skips combinations already
    /// containing the qualifier.
    pub fn single_summaries(&self) -> Result<Vec<SingleSummaryOutput>>
    where
        R: Sync,
    {
        let combos = self.summarizer_combinations();
        let qualifiers = self.qualifier_candidates();

        let mut jobs = Vec::new();
        for quantifier in &self.quantifiers {
            for combo in &combos {
                jobs.push(SingleJob {
                    quantifier,
                    qualifier: None,
                    summarizers: combo.clone(),
                });
            }
        }
        for quantifier in &self.quantifiers {
            if quantifier.kind() != QuantifierKind::Relative {
                continue;
            }
            for qualifier in &qualifiers {
                for combo in &combos {
                    if Self::combo_contains(combo, qualifier) {
                        continue;
                    }
                    jobs.push(SingleJob {
                        quantifier,
                        qualifier: Some(qualifier),
                        summarizers: combo.clone(),
                    });
                }
            }
        }

        let weights = self.config.weights.to_vector();
        let subject = self.config.generation.subject.as_str();
        let results = parallel::run_batch(&jobs, &self.config.parallel, |job| {
            self.evaluate_single(job, &weights, subject)
        });
        results.into_iter().collect()
    }

    fn evaluate_single(
        &self,
        job: &SingleJob<'_>,
        weights: &[f64],
        subject: &str,
    ) -> Result<SingleSummaryOutput> {
        let mut summary = SingleSubjectSummary::new(
            job.quantifier,
            job.qualifier,
            job.summarizers.clone(),
            self.records,
            self.attributes,
        )?;
        summary.recalculate(weights)?;
        Ok(SingleSummaryOutput {
            text: summary.sentence(subject),
            degree_of_truth: summary.degree_of_truth(),
            optimal_measure: summary.optimal_measure(),
            measures: summary
                .measures()
                .iter()
                .map(|(key, value)| (key.to_string(), *value))
                .collect(),
        })
    }

    /// Generate every multisubject sentence over the attached partition
    ///
    /// Forms 1-3 pair every relative quantifier with every ordered pair of
    /// partition groups; form 4 compares every ordered pair without a
    /// quantifier. Fails when no partition has been attached.
    pub fn multisubject_summaries(&self) -> Result<Vec<MultisubjectSummaryOutput>>
    where
        R: Sync,
    {
        let partition = self.partition.as_ref().ok_or_else(|| {
            EngineError::configuration("multisubject generation requires a partition")
                .with_hint("call set_partition() first")
        })?;

        let combos = self.summarizer_combinations();
        let qualifiers = self.qualifier_candidates();
        let mut pairs = Vec::new();
        for (a, b) in partition.key_pairs() {
            pairs.push((a, b));
            pairs.push((b, a));
        }

        let mut jobs = Vec::new();
        for &(first, second) in &pairs {
            for quantifier in &self.quantifiers {
                if quantifier.kind() != QuantifierKind::Relative {
                    continue;
                }
                for combo in &combos {
                    jobs.push(MultiJob {
                        kind: MultiJobKind::Quantified(quantifier),
                        summarizers: combo.clone(),
                        first,
                        second,
                    });
                }
                for qualifier in &qualifiers {
                    for combo in &combos {
                        if Self::combo_contains(combo, qualifier) {
                            continue;
                        }
                        jobs.push(MultiJob {
                            kind: MultiJobKind::QualifiedSecond(quantifier, qualifier),
                            summarizers: combo.clone(),
                            first,
                            second,
                        });
                        jobs.push(MultiJob {
                            kind: MultiJobKind::QualifiedFirst(quantifier, qualifier),
                            summarizers: combo.clone(),
                            first,
                            second,
                        });
                    }
                }
            }
            for combo in &combos {
                jobs.push(MultiJob {
                    kind: MultiJobKind::Comparative,
                    summarizers: combo.clone(),
                    first,
                    second,
                });
            }
        }

        let results = parallel::run_batch(&jobs, &self.config.parallel, |job| {
            self.evaluate_multi(job, partition)
        });
        results.into_iter().collect()
    }

    fn evaluate_multi(
        &self,
        job: &MultiJob<'_>,
        partition: &Partition,
    ) -> Result<MultisubjectSummaryOutput> {
        let subject = self.config.generation.subject.as_str();
        let first_name = format!("{} {}", job.first, subject);
        let second_name = format!("{} {}", job.second, subject);
        let first = Subpopulation::new(&first_name, partition.records(job.first, self.records));
        let second = Subpopulation::new(&second_name, partition.records(job.second, self.records));

        let summary = match job.kind {
            MultiJobKind::Quantified(quantifier) => MultisubjectSummary::quantified(
                quantifier,
                job.summarizers.clone(),
                first,
                second,
                self.attributes,
            )?,
            MultiJobKind::QualifiedSecond(quantifier, qualifier) => {
                MultisubjectSummary::qualified_second(
                    quantifier,
                    qualifier,
                    job.summarizers.clone(),
                    first,
                    second,
                    self.attributes,
                )?
            }
            MultiJobKind::QualifiedFirst(quantifier, qualifier) => {
                MultisubjectSummary::qualified_first(
                    quantifier,
                    qualifier,
                    job.summarizers.clone(),
                    first,
                    second,
                    self.attributes,
                )?
            }
            MultiJobKind::Comparative => MultisubjectSummary::comparative(
                job.summarizers.clone(),
                first,
                second,
                self.attributes,
            )?,
        };

        Ok(MultisubjectSummaryOutput {
            text: summary.sentence(),
            degree_of_truth: summary.degree_of_truth(),
            form: summary.form_number(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LingsumConfig;
    use crate::error::ErrorCode;
    use crate::fuzzy::{FuzzySet, MembershipFunction, Universe};
    use std::sync::Arc;

    struct House {
        year_built: Option<f64>,
        price: Option<f64>,
        region: &'static str,
    }

    fn houses() -> Vec<House> {
        vec![
            House { year_built: Some(1960.0), price: Some(100.0), region: "north" },
            House { year_built: Some(1980.0), price: Some(220.0), region: "north" },
            House { year_built: Some(2000.0), price: Some(300.0), region: "south" },
            House { year_built: Some(2015.0), price: Some(420.0), region: "south" },
        ]
    }

    fn attributes() -> AttributeTable<House> {
        AttributeTable::new()
            .with("yearBuilt", |h: &House| h.year_built)
            .with("price", |h: &House| h.price)
    }

    fn year_variable() -> LinguisticVariable {
        let universe = Arc::new(Universe::continuous(1950.0, 2020.0, 5.0).unwrap());
        LinguisticVariable::new(
            "yearBuilt",
            vec![
                Label::new(
                    "old",
                    FuzzySet::new(
                        Arc::clone(&universe),
                        MembershipFunction::trapezoidal(1950.0, 1950.0, 1970.0, 1990.0).unwrap(),
                    ),
                    "yearBuilt",
                ),
                Label::new(
                    "young",
                    FuzzySet::new(
                        Arc::clone(&universe),
                        MembershipFunction::trapezoidal(1985.0, 2005.0, 2020.0, 2020.0).unwrap(),
                    ),
                    "yearBuilt",
                ),
            ],
        )
    }

    fn price_variable() -> LinguisticVariable {
        let universe = Arc::new(Universe::continuous(0.0, 500.0, 10.0).unwrap());
        LinguisticVariable::new(
            "price",
            vec![
                Label::new(
                    "cheap",
                    FuzzySet::new(
                        Arc::clone(&universe),
                        MembershipFunction::trapezoidal(0.0, 0.0, 150.0, 250.0).unwrap(),
                    ),
                    "price",
                ),
                Label::new(
                    "expensive",
                    FuzzySet::new(
                        Arc::clone(&universe),
                        MembershipFunction::trapezoidal(250.0, 350.0, 500.0, 500.0).unwrap(),
                    ),
                    "price",
                ),
            ],
        )
    }

    fn most() -> Quantifier {
        Quantifier::new(
            "most",
            QuantifierKind::Relative,
            FuzzySet::new(
                Arc::new(Universe::continuous(0.0, 1.0, 0.01).unwrap()),
                MembershipFunction::trapezoidal(0.5, 0.8, 1.0, 1.0).unwrap(),
            ),
        )
    }

    fn about_two(size: f64) -> Quantifier {
        Quantifier::new(
            "about 2",
            QuantifierKind::Absolute,
            FuzzySet::new(
                Arc::new(Universe::continuous(1.0, size, 1.0).unwrap()),
                MembershipFunction::triangular(1.0, 2.0, 3.0).unwrap(),
            ),
        )
    }

    fn engine<'a>(
        records: &'a [House],
        attributes: &'a AttributeTable<House>,
    ) -> SummaryEngine<'a, House> {
        let mut engine = SummaryEngine::new(records, attributes);
        engine.add_variable(year_variable()).unwrap();
        engine.add_variable(price_variable()).unwrap();
        engine.add_quantifier(most()).unwrap();
        engine.add_quantifier(about_two(records.len() as f64)).unwrap();
        engine
    }

    #[test]
    fn test_combination_enumeration() {
        let records = houses();
        let attributes = attributes();
        let engine = engine(&records, &attributes);
        let combos = engine.summarizer_combinations();
        // 4 singletons plus 2x2 cross-variable pairs
        assert_eq!(combos.len(), 8);
        // no combination mixes two labels of the same variable
        for combo in &combos {
            let mut attrs: Vec<&str> = combo.iter().map(|l| l.attribute()).collect();
            attrs.dedup();
            assert_eq!(attrs.len(), combo.len());
        }
    }

    #[test]
    fn test_single_summary_generation() {
        let records = houses();
        let attributes = attributes();
        let engine = engine(&records, &attributes);
        let outputs = engine.single_summaries().unwrap();

        // form 1: 2 quantifiers x 8 combos; form 2: 1 relative quantifier x
        // 4 qualifiers x 5 combos free of the qualifier
        assert_eq!(outputs.len(), 16 + 20);

        for output in &outputs {
            assert!(output.degree_of_truth >= 0.0 && output.degree_of_truth <= 1.0);
            assert_eq!(output.measures.len(), 12);
            assert!(output.text.contains("records"));
        }
        assert!(outputs.iter().any(|o| o.text.starts_with("most records are")));
        assert!(outputs.iter().any(|o| o.text.contains("being")));
    }

    #[test]
    fn test_subject_noun_from_config() {
        let records = houses();
        let attributes = attributes();
        let mut config = LingsumConfig::default();
        config.generation.subject = "houses".to_string();
        let engine = engine(&records, &attributes).with_config(config);
        let outputs = engine.single_summaries().unwrap();
        assert!(outputs.iter().all(|o| o.text.contains("houses")));
    }

    #[test]
    fn test_multisubject_generation() {
        let records = houses();
        let attributes = attributes();
        let mut engine = engine(&records, &attributes);
        engine.set_partition(Partition::by_key(&records, |h| h.region.to_string()));

        let outputs = engine.multisubject_summaries().unwrap();
        // per ordered pair (2): form 1 = 8, forms 2+3 = 2 x 4 x 5, form 4 = 8
        assert_eq!(outputs.len(), 2 * (8 + 40 + 8));

        for form in 1..=4u8 {
            assert!(outputs.iter().any(|o| o.form == form));
        }
        assert!(outputs
            .iter()
            .any(|o| o.text.contains("north records") && o.text.contains("south records")));
        assert!(outputs
            .iter()
            .filter(|o| o.form == 4)
            .all(|o| o.text.starts_with("More ")));
    }

    #[test]
    fn test_multisubject_requires_partition() {
        let records = houses();
        let attributes = attributes();
        let engine = engine(&records, &attributes);
        let err = engine.multisubject_summaries().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigurationError);
    }

    #[test]
    fn test_add_variable_rejects_unknown_attribute() {
        let records = houses();
        let attributes = attributes();
        let mut engine = SummaryEngine::new(&records, &attributes);
        let variable = LinguisticVariable::new(
            "lotSize",
            vec![Label::new(
                "large",
                FuzzySet::new(
                    Arc::new(Universe::continuous(0.0, 100.0, 1.0).unwrap()),
                    MembershipFunction::triangular(0.0, 50.0, 100.0).unwrap(),
                ),
                "lotSize",
            )],
        );
        let err = engine.add_variable(variable).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownAttribute);
    }

    #[test]
    fn test_add_variable_normalizes_subnormal_labels() {
        let records = houses();
        let attributes = attributes();
        let mut engine = SummaryEngine::new(&records, &attributes);

        // triangle peaking between samples, so its height over the sampled
        // universe is below 1
        let universe = Arc::new(Universe::discrete(vec![0.0, 1.0, 2.0]));
        let variable = LinguisticVariable::new(
            "price",
            vec![Label::new(
                "dim",
                FuzzySet::new(
                    Arc::clone(&universe),
                    MembershipFunction::triangular(0.0, 0.5, 4.0).unwrap(),
                ),
                "price",
            )],
        );
        engine.add_variable(variable).unwrap();
        let stored = engine.variables()[0].label("dim").unwrap();
        assert!((stored.fuzzy_set().height() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_add_quantifier_universe_validation() {
        let records = houses();
        let attributes = attributes();
        let mut engine = SummaryEngine::new(&records, &attributes);

        // relative quantifier must span [0, 1]
        let bad_relative = Quantifier::new(
            "most",
            QuantifierKind::Relative,
            FuzzySet::new(
                Arc::new(Universe::continuous(0.0, 2.0, 0.1).unwrap()),
                MembershipFunction::triangular(0.0, 1.0, 2.0).unwrap(),
            ),
        );
        let err = engine.add_quantifier(bad_relative).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantifierUniverse);

        // absolute quantifier must span [1, population size]
        let bad_absolute = Quantifier::new(
            "about 2",
            QuantifierKind::Absolute,
            FuzzySet::new(
                Arc::new(Universe::continuous(0.0, 10.0, 1.0).unwrap()),
                MembershipFunction::triangular(0.0, 5.0, 10.0).unwrap(),
            ),
        );
        let err = engine.add_quantifier(bad_absolute).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantifierUniverse);

        // discrete universes never qualify
        let discrete = Quantifier::new(
            "half",
            QuantifierKind::Relative,
            FuzzySet::new(
                Arc::new(Universe::discrete(vec![0.0, 0.5, 1.0])),
                MembershipFunction::triangular(0.0, 0.5, 1.0).unwrap(),
            ),
        );
        let err = engine.add_quantifier(discrete).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantifierUniverse);

        assert!(engine.add_quantifier(most()).is_ok());
        assert!(engine.add_quantifier(about_two(records.len() as f64)).is_ok());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let records = houses();
        let attributes = attributes();

        let mut sequential_config = LingsumConfig::default();
        sequential_config.parallel.enabled = false;
        let sequential = engine(&records, &attributes)
            .with_config(sequential_config)
            .single_summaries()
            .unwrap();

        let mut parallel_config = LingsumConfig::default();
        parallel_config.parallel.workers = 2;
        parallel_config.parallel.min_jobs_per_worker = 1;
        let parallel = engine(&records, &attributes)
            .with_config(parallel_config)
            .single_summaries()
            .unwrap();

        assert_eq!(sequential.len(), parallel.len());
        for (a, b) in sequential.iter().zip(parallel.iter()) {
            assert_eq!(a.text, b.text);
            assert_eq!(a.optimal_measure, b.optimal_measure);
        }
    }
}
