//! Feed-forward network genome used as a decision function

use std::path::Path;

use anyhow::{ensure, Context};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::CELL_COUNT;
use crate::player::DecisionFunction;

/// Observation width for the standard board
pub const NUM_INPUTS: usize = CELL_COUNT * 2;

/// One output per cell
pub const NUM_OUTPUTS: usize = CELL_COUNT;

/// Fully connected layer, `weights[out][in]`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub weights: Vec<Vec<f64>>,
    pub biases: Vec<f64>,
}

impl Layer {
    fn random<R: Rng + ?Sized>(inputs: usize, outputs: usize, rng: &mut R) -> Self {
        let weights = (0..outputs)
            .map(|_| (0..inputs).map(|_| rng.gen_range(-1.0..1.0)).collect())
            .collect();
        let biases = (0..outputs).map(|_| rng.gen_range(-1.0..1.0)).collect();
        Self { weights, biases }
    }

    fn inputs(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    fn outputs(&self) -> usize {
        self.biases.len()
    }

    fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(row, bias)| {
                let sum: f64 = row.iter().zip(input).map(|(w, x)| w * x).sum();
                sigmoid(sum + bias)
            })
            .collect()
    }
}

/// Logistic activation, as used by the reference neuro-evolution library
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Multi-layer perceptron with sigmoid activations on every layer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Network {
    #[serde(default)]
    pub name: String,
    pub layers: Vec<Layer>,
}

impl Network {
    /// Random network with the given hidden layer sizes, weights in [-1, 1)
    pub fn random<R: Rng + ?Sized>(
        inputs: usize,
        hidden: &[usize],
        outputs: usize,
        rng: &mut R,
    ) -> Self {
        let mut sizes = Vec::with_capacity(hidden.len() + 2);
        sizes.push(inputs);
        sizes.extend_from_slice(hidden);
        sizes.push(outputs);

        let layers = sizes
            .windows(2)
            .map(|pair| Layer::random(pair[0], pair[1], rng))
            .collect();

        Self {
            name: String::new(),
            layers,
        }
    }

    /// Random network sized for the standard board
    pub fn random_for_board<R: Rng + ?Sized>(hidden: &[usize], rng: &mut R) -> Self {
        Self::random(NUM_INPUTS, hidden, NUM_OUTPUTS, rng)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn inputs(&self) -> usize {
        self.layers.first().map_or(0, Layer::inputs)
    }

    pub fn outputs(&self) -> usize {
        self.layers.last().map_or(0, Layer::outputs)
    }

    /// Forward pass. `input` must have `self.inputs()` entries.
    pub fn activate(&self, input: &[f64]) -> Vec<f64> {
        self.layers
            .iter()
            .fold(input.to_vec(), |acc, layer| layer.forward(&acc))
    }

    /// Check that consecutive layers agree on their widths
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(!self.layers.is_empty(), "network has no layers");
        for (i, layer) in self.layers.iter().enumerate() {
            ensure!(
                layer.weights.len() == layer.biases.len(),
                "layer {} has {} weight rows but {} biases",
                i,
                layer.weights.len(),
                layer.biases.len()
            );
            ensure!(
                layer.weights.iter().all(|row| row.len() == layer.inputs()),
                "layer {} has ragged weight rows",
                i
            );
        }
        for (i, pair) in self.layers.windows(2).enumerate() {
            ensure!(
                pair[0].outputs() == pair[1].inputs(),
                "layer {} emits {} values but layer {} expects {}",
                i,
                pair[0].outputs(),
                i + 1,
                pair[1].inputs()
            );
        }
        Ok(())
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read genome: {}", path.display()))?;
        let network: Network = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse genome: {}", path.display()))?;
        network.validate()?;
        network.validate_for_board()?;
        Ok(network)
    }

    /// Check the outer widths against the standard board's observation and action sizes
    pub fn validate_for_board(&self) -> anyhow::Result<()> {
        ensure!(
            self.inputs() == NUM_INPUTS && self.outputs() == NUM_OUTPUTS,
            "network maps {} inputs to {} outputs, the board needs {} to {}",
            self.inputs(),
            self.outputs(),
            NUM_INPUTS,
            NUM_OUTPUTS
        );
        Ok(())
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write genome: {}", path.display()))?;
        Ok(())
    }
}

impl DecisionFunction for Network {
    /// An input of the wrong width yields an empty output, which the policy
    /// player reports as malformed.
    fn decide(&self, observation: &[f64]) -> Vec<f64> {
        if observation.len() != self.inputs() {
            return Vec::new();
        }
        self.activate(observation)
    }
}
