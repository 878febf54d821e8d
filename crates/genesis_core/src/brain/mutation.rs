use super::*;
use rand_distr::StandardNormal;

/// Gaussian weight mutation with compound gating.
///
/// Each layer is gated once on `rate`. Inside a gated layer every weight and
/// every bias is independently selected with probability `rate` and shifted
/// by `N(0, 1) * strength`.
pub fn mutate<R: Rng>(brain: &mut NeuralBrain, rate: f32, strength: f32, rng: &mut R) {
    for layer in &mut brain.layers {
        if rng.gen::<f32>() >= rate {
            continue;
        }
        for param in layer.weights.iter_mut().chain(layer.biases.iter_mut()) {
            if rng.gen::<f32>() < rate {
                *param += rng.sample::<f32, _>(StandardNormal) * strength;
            }
        }
    }
}
