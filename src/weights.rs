use crate::errors::{OptimizerError, OptimizerResult};
use crate::inputs::INPUT_COUNT;
use rand::Rng;
use serde::Serialize;

/// Number of hidden units
pub const HIDDEN_COUNT: usize = 5;

/// Length of the flattened input-to-hidden matrix
pub const INPUT_TO_HIDDEN_LEN: usize = INPUT_COUNT * HIDDEN_COUNT;

/// Weight store for the 7-5-1 network.
///
/// `input_to_hidden` is row-major by hidden unit: the weight from input `j`
/// into hidden unit `i` lives at `i * INPUT_COUNT + j`. Bias terms only take
/// part in evaluation for the compact variant and always start at zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkWeights {
    input_to_hidden: Vec<f64>,
    hidden_to_output: Vec<f64>,
    hidden_biases: Vec<f64>,
    output_bias: f64,
}

impl NetworkWeights {
    /// All weights at zero. Every unit then evaluates to sigmoid(0).
    pub fn zeroed() -> Self {
        Self {
            input_to_hidden: vec![0.0; INPUT_TO_HIDDEN_LEN],
            hidden_to_output: vec![0.0; HIDDEN_COUNT],
            hidden_biases: vec![0.0; HIDDEN_COUNT],
            output_bias: 0.0,
        }
    }

    /// Independent uniform draws in [-1, 1) for every weight
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut weights = Self::zeroed();
        weights.randomize(rng);
        weights
    }

    /// Build from explicit vectors, rejecting wrong lengths.
    pub fn from_parts(input_to_hidden: Vec<f64>, hidden_to_output: Vec<f64>) -> OptimizerResult<Self> {
        if input_to_hidden.len() != INPUT_TO_HIDDEN_LEN {
            return Err(OptimizerError::weight_shape(
                "input_to_hidden",
                INPUT_TO_HIDDEN_LEN,
                input_to_hidden.len(),
            ));
        }
        if hidden_to_output.len() != HIDDEN_COUNT {
            return Err(OptimizerError::weight_shape(
                "hidden_to_output",
                HIDDEN_COUNT,
                hidden_to_output.len(),
            ));
        }
        if let Some(bad) = input_to_hidden.iter().chain(&hidden_to_output).find(|w| !w.is_finite()) {
            return Err(OptimizerError::invalid_input(
                "weights",
                format!("weights must be finite, got {bad}"),
            ));
        }

        Ok(Self {
            input_to_hidden,
            hidden_to_output,
            ..Self::zeroed()
        })
    }

    /// Overwrite both weight vectors with fresh draws. Biases are untouched.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for w in self.input_to_hidden.iter_mut().chain(self.hidden_to_output.iter_mut()) {
            *w = rng.random_range(-1.0..1.0);
        }
    }

    pub fn input_to_hidden(&self) -> &[f64] {
        &self.input_to_hidden
    }

    pub fn hidden_to_output(&self) -> &[f64] {
        &self.hidden_to_output
    }

    pub fn hidden_biases(&self) -> &[f64] {
        &self.hidden_biases
    }

    pub fn output_bias(&self) -> f64 {
        self.output_bias
    }

    /// The 7 weights feeding hidden unit `hidden`
    pub fn hidden_row(&self, hidden: usize) -> &[f64] {
        let start = hidden * INPUT_COUNT;
        &self.input_to_hidden[start..start + INPUT_COUNT]
    }

    /// Weight from input `input` into hidden unit `hidden`
    pub fn input_weight(&self, hidden: usize, input: usize) -> f64 {
        self.input_to_hidden[hidden * INPUT_COUNT + input]
    }

    /// Flat connection list for diagrams: input->hidden in storage order,
    /// then hidden->output.
    pub fn connections(&self) -> Vec<Connection> {
        let mut connections = Vec::with_capacity(INPUT_TO_HIDDEN_LEN + HIDDEN_COUNT);

        for hidden in 0..HIDDEN_COUNT {
            for input in 0..INPUT_COUNT {
                connections.push(Connection {
                    from_layer: Layer::Input,
                    from_index: input,
                    to_layer: Layer::Hidden,
                    to_index: hidden,
                    weight: self.input_weight(hidden, input),
                });
            }
        }

        for (hidden, weight) in self.hidden_to_output.iter().enumerate() {
            connections.push(Connection {
                from_layer: Layer::Hidden,
                from_index: hidden,
                to_layer: Layer::Output,
                to_index: 0,
                weight: *weight,
            });
        }

        connections
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Input,
    Hidden,
    Output,
}

/// One edge of the network with its current weight
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub from_layer: Layer,
    pub from_index: usize,
    pub to_layer: Layer,
    pub to_index: usize,
    pub weight: f64,
}
