//! Main Normalyze struct and public API.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decompose::{NormalizationStage, SchemaDecomposer};
use crate::error::{NormalyzeError, Result};
use crate::fd::{DetectorConfig, FdDetector, FunctionalDependency};
use crate::input::Dataset;
use crate::keys::{CancelToken, CandidateKeyFinder, KeySearchConfig};
use crate::nf::{NormalForm, NormalFormChecker, NormalFormReport};

/// Configuration for a normalization analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalyzeConfig {
    /// Dependency detector settings.
    pub detector: DetectorConfig,
    /// Candidate key search settings.
    pub keys: KeySearchConfig,
    /// Name used for the relation in decomposed table names.
    pub relation_name: String,
}

impl Default for NormalyzeConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            keys: KeySearchConfig::default(),
            relation_name: "relation".to_string(),
        }
    }
}

impl NormalyzeConfig {
    /// Reject settings outside their documented domain.
    pub fn validate(&self) -> Result<()> {
        let t = self.detector.confidence_threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(NormalyzeError::Config(format!(
                "confidence_threshold must be in [0, 1], got {t}"
            )));
        }
        if self.keys.max_key_size == 0 {
            return Err(NormalyzeError::Config(
                "max_key_size must be at least 1".to_string(),
            ));
        }
        if self.relation_name.is_empty() {
            return Err(NormalyzeError::Config(
                "relation_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of analyzing a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Detected functional dependencies, left-reduced.
    pub dependencies: Vec<FunctionalDependency>,
    /// Minimal candidate keys (or the full-attribute fallback).
    pub candidate_keys: Vec<BTreeSet<String>>,
    /// Union of attributes across all candidate keys.
    pub prime_attributes: BTreeSet<String>,
    /// Normal form compliance report.
    pub forms: NormalFormReport,
    /// Normalization stages, one per normal form.
    pub stages: Vec<NormalizationStage>,
    /// Summary statistics.
    pub summary: AnalysisSummary,
}

/// Summary of an analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub attribute_count: usize,
    pub row_count: usize,
    pub dependency_count: usize,
    pub candidate_key_count: usize,
    /// False when the key search fell back (bound exceeded or cancelled);
    /// the reported keys are then lower-confidence.
    pub key_search_complete: bool,
    pub current_form: NormalForm,
    /// Human-readable next step.
    pub recommendation: String,
    /// When the analysis was performed.
    pub analyzed_at: DateTime<Utc>,
}

/// The normalization analysis engine.
///
/// Every call to [`Normalyze::analyze`] constructs fresh component instances
/// from its explicit inputs; the engine holds only configuration, so
/// independent datasets can be analyzed in parallel with no locking.
pub struct Normalyze {
    config: NormalyzeConfig,
}

impl Normalyze {
    /// Create an engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(NormalyzeConfig::default())
    }

    /// Create an engine with custom configuration.
    pub fn with_config(config: NormalyzeConfig) -> Self {
        Self { config }
    }

    /// Analyze a dataset: detect FDs, find candidate keys, classify normal
    /// forms, and decompose.
    pub fn analyze(&self, dataset: &Dataset) -> Result<AnalysisResult> {
        self.analyze_with_cancel(dataset, &CancelToken::new())
    }

    /// Analyze with a cancellation token threaded into the key search.
    pub fn analyze_with_cancel(
        &self,
        dataset: &Dataset,
        token: &CancelToken,
    ) -> Result<AnalysisResult> {
        self.config.validate()?;
        dataset.validate()?;

        let detector = FdDetector::with_config(self.config.detector.clone());
        let dependencies = detector.detect_all(dataset);

        let finder = CandidateKeyFinder::with_config(
            dataset.attributes.clone(),
            dependencies.clone(),
            self.config.keys.clone(),
        );
        let search = finder.find_with_cancel(token);

        let checker = NormalFormChecker::new(dependencies.clone(), search.keys.clone());
        let prime_attributes = checker.prime_attributes().clone();
        let forms = checker.analyze_all_forms(&dataset.rows);

        let decomposer = SchemaDecomposer::new(
            self.config.relation_name.clone(),
            dataset.attributes.clone(),
            dependencies.clone(),
            search.keys.clone(),
        );
        let stages = decomposer.normalize_complete();

        let summary = self.compute_summary(dataset, &dependencies, &search.keys, search.complete, &forms);

        Ok(AnalysisResult {
            dependencies,
            candidate_keys: search.keys,
            prime_attributes,
            forms,
            stages,
            summary,
        })
    }

    fn compute_summary(
        &self,
        dataset: &Dataset,
        dependencies: &[FunctionalDependency],
        keys: &[BTreeSet<String>],
        key_search_complete: bool,
        forms: &NormalFormReport,
    ) -> AnalysisSummary {
        AnalysisSummary {
            attribute_count: dataset.attribute_count(),
            row_count: dataset.row_count(),
            dependency_count: dependencies.len(),
            candidate_key_count: keys.len(),
            key_search_complete,
            current_form: forms.current_form,
            recommendation: self.generate_recommendation(forms),
            analyzed_at: Utc::now(),
        }
    }

    fn generate_recommendation(&self, forms: &NormalFormReport) -> String {
        match forms.current_form {
            NormalForm::Third => {
                "Relation is already in 3NF. No decomposition required.".to_string()
            }
            NormalForm::Second => format!(
                "Remove {} transitive dependencies to reach 3NF.",
                forms.third.violations.len()
            ),
            NormalForm::First => format!(
                "Remove {} partial dependencies to reach 2NF.",
                forms.second.violations.len()
            ),
            NormalForm::Unf => format!(
                "Flatten {} non-atomic values to reach 1NF.",
                forms.first.violations.len()
            ),
        }
    }
}

impl Default for Normalyze {
    fn default() -> Self {
        Self::new()
    }
}
