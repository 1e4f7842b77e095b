use crate::inputs::INPUT_COUNT;
use crate::weights::{NetworkWeights, HIDDEN_COUNT};
use serde::Serialize;

/// Logistic activation. Extreme arguments saturate to 0 or 1.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Hidden,
    Output,
}

/// Trace of one unit's evaluation. Vectors are owned copies, never views
/// into the weight store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationStep {
    pub node: NodeKind,
    pub index: usize,
    pub input: Vec<f64>,
    pub weights: Vec<f64>,
    pub bias: f64,
    pub sum: f64,
    pub activation: f64,
}

/// Result of one forward pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardPass {
    pub output: f64,
    pub hidden_activations: [f64; HIDDEN_COUNT],
    pub steps: Vec<CalculationStep>,
}

/// Run the 7-5-1 feed-forward pass over already-normalized inputs.
///
/// When `use_bias` is false the stored biases are ignored entirely, so the
/// pre-activation sums are exactly the weighted sums.
pub fn evaluate(
    normalized: &[f64; INPUT_COUNT],
    weights: &NetworkWeights,
    use_bias: bool,
) -> ForwardPass {
    let mut hidden_activations = [0.0; HIDDEN_COUNT];
    let mut steps = Vec::with_capacity(HIDDEN_COUNT + 1);

    for (i, activation_slot) in hidden_activations.iter_mut().enumerate() {
        let row = weights.hidden_row(i);
        let bias = if use_bias { weights.hidden_biases()[i] } else { 0.0 };
        let weighted: f64 = normalized.iter().zip(row).map(|(x, w)| x * w).sum();
        let sum = if use_bias { weighted + bias } else { weighted };
        let activation = sigmoid(sum);
        *activation_slot = activation;

        steps.push(CalculationStep {
            node: NodeKind::Hidden,
            index: i,
            input: normalized.to_vec(),
            weights: row.to_vec(),
            bias,
            sum,
            activation,
        });
    }

    let output_bias = if use_bias { weights.output_bias() } else { 0.0 };
    let weighted: f64 = hidden_activations
        .iter()
        .zip(weights.hidden_to_output())
        .map(|(h, w)| h * w)
        .sum();
    let output_sum = if use_bias { weighted + output_bias } else { weighted };
    let output = sigmoid(output_sum);

    steps.push(CalculationStep {
        node: NodeKind::Output,
        index: 0,
        input: hidden_activations.to_vec(),
        weights: weights.hidden_to_output().to_vec(),
        bias: output_bias,
        sum: output_sum,
        activation: output,
    });

    ForwardPass {
        output,
        hidden_activations,
        steps,
    }
}
