//! The energy optimization network: a fixed 7-5-1 sigmoid network whose
//! weights are drawn once at construction and never trained.
//!
//! Pipeline for one evaluation:
//! raw inputs -> normalizer -> forward pass -> feature importance -> recommendation.

use crate::errors::{OptimizerError, OptimizerResult};
use crate::evaluator::{self, ForwardPass};
use crate::importance::{self, FeatureImportance};
use crate::inputs::{InputRange, RawInputs, INPUT_COUNT, INPUT_RANGES};
use crate::normalizer;
use crate::recommender::{self, Recommendation};
use crate::weights::{Connection, NetworkWeights};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Which evaluation rules the network follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkVariant {
    /// Min/max normalization, no biases, importance-scored energy type
    #[default]
    Detailed,
    /// Max scaling, inert biases, first-row importance, 0.7 output threshold
    Compact,
}

impl NetworkVariant {
    pub fn uses_bias(&self) -> bool {
        matches!(self, NetworkVariant::Compact)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkVariant::Detailed => "detailed",
            NetworkVariant::Compact => "compact",
        }
    }
}

impl FromStr for NetworkVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "detailed" => Ok(NetworkVariant::Detailed),
            "compact" => Ok(NetworkVariant::Compact),
            other => Err(format!("unknown network variant '{other}' (expected detailed or compact)")),
        }
    }
}

impl std::fmt::Display for NetworkVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkOptions {
    pub random_weights: bool,
    pub variant: NetworkVariant,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        Self {
            random_weights: true,
            variant: NetworkVariant::Detailed,
        }
    }
}

/// Serializable snapshot of the network for diagram rendering
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkView {
    pub variant: NetworkVariant,
    pub weights: NetworkWeights,
    pub input_ranges: Vec<InputRange>,
    pub connections: Vec<Connection>,
}

pub struct EnergyOptimizationNetwork {
    weights: NetworkWeights,
    variant: NetworkVariant,
}

impl EnergyOptimizationNetwork {
    /// Build a network, drawing weights from `rng` when `random_weights` is set.
    pub fn new<R: Rng>(options: NetworkOptions, rng: &mut R) -> Self {
        let weights = if options.random_weights {
            NetworkWeights::random(rng)
        } else {
            NetworkWeights::zeroed()
        };

        info!(
            "EnergyOptimizationNetwork initialized: variant={}, random_weights={}",
            options.variant, options.random_weights
        );

        Self {
            weights,
            variant: options.variant,
        }
    }

    /// Reproducible construction from a seed
    pub fn seeded(options: NetworkOptions, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(options, &mut rng)
    }

    pub fn from_weights(weights: NetworkWeights, variant: NetworkVariant) -> Self {
        Self { weights, variant }
    }

    /// Replace both weight vectors with fresh draws in [-1, 1)
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        self.weights.randomize(rng);
        info!("Network weights re-randomized");
    }

    pub fn weights(&self) -> &NetworkWeights {
        &self.weights
    }

    pub fn variant(&self) -> NetworkVariant {
        self.variant
    }

    pub fn input_ranges() -> &'static [InputRange; INPUT_COUNT] {
        &INPUT_RANGES
    }

    pub fn connections(&self) -> Vec<Connection> {
        self.weights.connections()
    }

    pub fn view(&self) -> NetworkView {
        NetworkView {
            variant: self.variant,
            weights: self.weights.clone(),
            input_ranges: INPUT_RANGES.to_vec(),
            connections: self.connections(),
        }
    }

    /// Validate then normalize. Non-finite inputs are rejected here so they
    /// never reach the evaluator.
    pub fn normalize(&self, inputs: &RawInputs) -> OptimizerResult<[f64; INPUT_COUNT]> {
        if let Err(e) = inputs.validate() {
            warn!("Rejected inputs before normalization: {e}");
            return Err(e);
        }
        Ok(normalizer::normalize_for(self.variant, inputs))
    }

    pub fn forward_propagate(&self, inputs: &RawInputs) -> OptimizerResult<ForwardPass> {
        let normalized = self.normalize(inputs)?;
        Ok(evaluator::evaluate(&normalized, &self.weights, self.variant.uses_bias()))
    }

    pub fn feature_importance(&self, inputs: &RawInputs) -> OptimizerResult<FeatureImportance> {
        let normalized = self.normalize(inputs)?;
        Ok(importance::importance_for(self.variant, &normalized, &self.weights))
    }

    /// Full evaluation: suitability label, energy type, confidence,
    /// importance and the step-by-step trace.
    pub fn recommend(&self, inputs: &RawInputs) -> OptimizerResult<Recommendation> {
        let normalized = self.normalize(inputs)?;
        let pass = evaluator::evaluate(&normalized, &self.weights, self.variant.uses_bias());
        let importance = importance::importance_for(self.variant, &normalized, &self.weights);

        let recommendation = recommender::recommend(self.variant, inputs, pass, importance);
        let decision = &recommendation.energy_type;
        if !(decision.solar_score.is_finite() && decision.wind_score.is_finite()) {
            let field = recommender::dominant_score_field(inputs, &recommendation.feature_importance);
            warn!("Energy scores overflowed; rejecting {}", field.name());
            return Err(OptimizerError::invalid_input(field.name(), "value too large to score"));
        }

        debug!(
            "Recommendation computed: label={}, type={}, confidence={:.2}",
            recommendation.label, recommendation.energy_type.energy_type, recommendation.confidence
        );

        Ok(recommendation)
    }
}
