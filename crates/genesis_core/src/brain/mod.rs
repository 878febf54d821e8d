pub mod forward;
pub mod mutation;
pub mod topology;

pub use genesis_data::{Layer, NeuralBrain, BRAIN_INPUTS, BRAIN_OUTPUTS};
use rand::Rng;

pub use topology::create_brain_random_with_rng;

/// Trait defining the core logic for neural network brains.
pub trait BrainLogic {
    fn new_random_with_rng<R: Rng>(hidden_layers: &[usize], weight_scale: f32, rng: &mut R)
        -> Self;

    #[must_use]
    fn forward(&self, inputs: [f32; BRAIN_INPUTS]) -> [f32; BRAIN_OUTPUTS];

    fn mutate<R: Rng>(&mut self, rate: f32, strength: f32, rng: &mut R);

    fn validate(&self) -> anyhow::Result<()>;
    fn parameter_count(&self) -> usize;
    fn distance(&self, other: &NeuralBrain) -> f32;
}

// Output indices read by movement. Outputs 4 (eat) and 5 (reproduce) are
// recorded but not acted on.
pub const OUTPUT_MOVE_NORTH: usize = 0;
pub const OUTPUT_MOVE_SOUTH: usize = 1;
pub const OUTPUT_MOVE_EAST: usize = 2;
pub const OUTPUT_MOVE_WEST: usize = 3;

impl BrainLogic for NeuralBrain {
    fn new_random_with_rng<R: Rng>(
        hidden_layers: &[usize],
        weight_scale: f32,
        rng: &mut R,
    ) -> Self {
        topology::create_brain_random_with_rng(hidden_layers, weight_scale, rng)
    }

    fn forward(&self, inputs: [f32; BRAIN_INPUTS]) -> [f32; BRAIN_OUTPUTS] {
        forward::forward(self, inputs)
    }

    fn mutate<R: Rng>(&mut self, rate: f32, strength: f32, rng: &mut R) {
        mutation::mutate(self, rate, strength, rng)
    }

    fn validate(&self) -> anyhow::Result<()> {
        topology::validate(self)
    }

    fn parameter_count(&self) -> usize {
        self.layers
            .iter()
            .map(|l| l.weights.len() + l.biases.len())
            .sum()
    }

    /// Mean absolute parameter difference; `f32::INFINITY` when topologies differ.
    fn distance(&self, other: &NeuralBrain) -> f32 {
        if self.layers.len() != other.layers.len() {
            return f32::INFINITY;
        }
        let mut total = 0.0;
        let mut count = 0usize;
        for (a, b) in self.layers.iter().zip(&other.layers) {
            if a.inputs != b.inputs || a.outputs != b.outputs {
                return f32::INFINITY;
            }
            let params_a = a.weights.iter().chain(&a.biases);
            let params_b = b.weights.iter().chain(&b.biases);
            for (x, y) in params_a.zip(params_b) {
                total += (x - y).abs();
                count += 1;
            }
        }
        total / count.max(1) as f32
    }
}
