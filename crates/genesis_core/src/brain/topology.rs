use super::*;
use rand_distr::StandardNormal;

/// Builds `BRAIN_INPUTS → hidden_layers… → BRAIN_OUTPUTS` with weights drawn
/// from `N(0, 1) * weight_scale` and zero biases.
pub fn create_brain_random_with_rng<R: Rng>(
    hidden_layers: &[usize],
    weight_scale: f32,
    rng: &mut R,
) -> NeuralBrain {
    let sizes: Vec<usize> = std::iter::once(BRAIN_INPUTS)
        .chain(hidden_layers.iter().copied())
        .chain(std::iter::once(BRAIN_OUTPUTS))
        .collect();

    let layers = sizes
        .windows(2)
        .map(|pair| {
            let mut layer = Layer::zeroed(pair[0], pair[1]);
            for w in &mut layer.weights {
                *w = rng.sample::<f32, _>(StandardNormal) * weight_scale;
            }
            layer
        })
        .collect();

    NeuralBrain { layers }
}

/// Checks that layers chain from `BRAIN_INPUTS` to `BRAIN_OUTPUTS` with
/// consistent parameter counts.
pub fn validate(brain: &NeuralBrain) -> anyhow::Result<()> {
    anyhow::ensure!(!brain.layers.is_empty(), "Brain has no layers");

    let mut expected_inputs = BRAIN_INPUTS;
    for (i, layer) in brain.layers.iter().enumerate() {
        anyhow::ensure!(
            layer.inputs == expected_inputs,
            "Layer {} expects {} inputs, previous layer yields {}",
            i,
            layer.inputs,
            expected_inputs
        );
        anyhow::ensure!(
            layer.weights.len() == layer.inputs * layer.outputs,
            "Layer {} has {} weights, expected {}",
            i,
            layer.weights.len(),
            layer.inputs * layer.outputs
        );
        anyhow::ensure!(
            layer.biases.len() == layer.outputs,
            "Layer {} has {} biases, expected {}",
            i,
            layer.biases.len(),
            layer.outputs
        );
        expected_inputs = layer.outputs;
    }
    anyhow::ensure!(
        expected_inputs == BRAIN_OUTPUTS,
        "Brain yields {} outputs, expected {}",
        expected_inputs,
        BRAIN_OUTPUTS
    );
    Ok(())
}
