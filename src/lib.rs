//! Library root for the `energy_optimizer` crate
//!
//! Scores a site's suitability for renewable energy and picks solar or wind
//! using a fixed, untrained 7-5-1 sigmoid network.

// Core error handling
pub mod errors;

// Evaluation pipeline
pub mod inputs;
pub mod weights;
pub mod normalizer;
pub mod evaluator;
pub mod importance;
pub mod recommender;
pub mod network;

// Sample sites
pub mod presets;

// Configuration & CLI
pub mod cli;
pub mod config;

// HTTP interface
pub mod web;

pub use errors::{OptimizerError, OptimizerResult};
pub use evaluator::{CalculationStep, ForwardPass, NodeKind};
pub use importance::FeatureImportance;
pub use inputs::{InputField, InputRange, RawInputs};
pub use network::{EnergyOptimizationNetwork, NetworkOptions, NetworkVariant};
pub use recommender::{EnergyType, EnergyTypeDecision, Recommendation, SuitabilityLabel};
pub use weights::{Connection, Layer, NetworkWeights};
