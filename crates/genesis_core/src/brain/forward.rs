use super::*;

#[inline]
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Affine + ReLU through every hidden layer, affine + sigmoid on the last.
///
/// # Panics
/// When layer dimensions do not chain; see [`topology::validate`].
pub fn forward(brain: &NeuralBrain, inputs: [f32; BRAIN_INPUTS]) -> [f32; BRAIN_OUTPUTS] {
    let mut activations: Vec<f32> = inputs.to_vec();
    let last = brain.layers.len().saturating_sub(1);

    for (i, layer) in brain.layers.iter().enumerate() {
        assert_eq!(
            activations.len(),
            layer.inputs,
            "layer {i} expects {} inputs, got {}",
            layer.inputs,
            activations.len()
        );
        let mut next = layer.biases.clone();
        for (input, &a) in activations.iter().enumerate() {
            if a == 0.0 {
                continue;
            }
            let row = &layer.weights[input * layer.outputs..(input + 1) * layer.outputs];
            for (n, &w) in next.iter_mut().zip(row) {
                *n += a * w;
            }
        }
        if i == last {
            next.iter_mut().for_each(|v| *v = sigmoid(*v));
        } else {
            next.iter_mut().for_each(|v| *v = v.max(0.0));
        }
        activations = next;
    }

    let mut outputs = [0.0; BRAIN_OUTPUTS];
    assert_eq!(
        activations.len(),
        BRAIN_OUTPUTS,
        "brain yields {} outputs",
        activations.len()
    );
    outputs.copy_from_slice(&activations);
    outputs
}
