use serde::{Deserialize, Serialize};

/// Number of sensory inputs fed to a [`NeuralBrain`].
pub const BRAIN_INPUTS: usize = 10;
/// Number of outputs produced by a [`NeuralBrain`].
pub const BRAIN_OUTPUTS: usize = 6;

/// RGB colour of an agent. Mutated channels stay within `[50, 255]`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const MIN_CHANNEL: u8 = 50;

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(128, 128, 128)
    }
}

/// One fully connected layer of a [`NeuralBrain`].
///
/// `weights` is row-major with shape `inputs × outputs`, so the weight from
/// input `i` to output `j` lives at `i * outputs + j`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Layer {
    pub inputs: usize,
    pub outputs: usize,
    pub weights: Vec<f32>,
    pub biases: Vec<f32>,
}

impl Layer {
    #[must_use]
    pub fn zeroed(inputs: usize, outputs: usize) -> Self {
        Self {
            inputs,
            outputs,
            weights: vec![0.0; inputs * outputs],
            biases: vec![0.0; outputs],
        }
    }

    #[inline]
    #[must_use]
    pub fn weight(&self, input: usize, output: usize) -> f32 {
        self.weights[input * self.outputs + output]
    }
}

/// Fixed-topology feed-forward network: `BRAIN_INPUTS → hidden… → BRAIN_OUTPUTS`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct NeuralBrain {
    pub layers: Vec<Layer>,
}

/// Signalling traits, present when communication is enabled.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CommunicationGenes {
    pub signal_probability: f64,
    pub signal_response: f64,
}

/// Social traits, present when the social feature is enabled.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SocialGenes {
    pub cooperation: f64,
    pub aggression: f64,
}

/// Mutable scalar traits of a [`Genome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneTrait {
    MoveProbability,
    MoveRandomness,
    EatThreshold,
    ReproduceThreshold,
    SignalProbability,
    SignalResponse,
    Cooperation,
    Aggression,
}

impl GeneTrait {
    pub const BASE: [GeneTrait; 4] = [
        GeneTrait::MoveProbability,
        GeneTrait::MoveRandomness,
        GeneTrait::EatThreshold,
        GeneTrait::ReproduceThreshold,
    ];

    /// Traits whose domain is the unit interval.
    #[must_use]
    pub fn is_unit_interval(self) -> bool {
        !matches!(self, GeneTrait::EatThreshold | GeneTrait::ReproduceThreshold)
    }
}

/// Heritable behaviour record of an agent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Genome {
    /// Chance per tick that the agent attempts to move at all.
    pub move_probability: f64,
    /// Chance that a heuristic move ignores senses and goes random.
    pub move_randomness: f64,
    /// Minimum cell energy before the agent eats.
    pub eat_threshold: f64,
    /// Energy needed before the agent reproduces.
    pub reproduce_threshold: f64,
    pub color: Color,
    pub generation: u32,
    pub communication: Option<CommunicationGenes>,
    pub social: Option<SocialGenes>,
    pub brain: Option<NeuralBrain>,
}

impl Genome {
    /// Traits eligible for mutation given which optional groups are present.
    #[must_use]
    pub fn enabled_traits(&self) -> Vec<GeneTrait> {
        let mut traits = GeneTrait::BASE.to_vec();
        if self.communication.is_some() {
            traits.extend([GeneTrait::SignalProbability, GeneTrait::SignalResponse]);
        }
        if self.social.is_some() {
            traits.extend([GeneTrait::Cooperation, GeneTrait::Aggression]);
        }
        traits
    }

    /// Current value of `gene`, or `None` when its group is absent.
    #[must_use]
    pub fn trait_value(&self, gene: GeneTrait) -> Option<f64> {
        match gene {
            GeneTrait::MoveProbability => Some(self.move_probability),
            GeneTrait::MoveRandomness => Some(self.move_randomness),
            GeneTrait::EatThreshold => Some(self.eat_threshold),
            GeneTrait::ReproduceThreshold => Some(self.reproduce_threshold),
            GeneTrait::SignalProbability => self.communication.map(|c| c.signal_probability),
            GeneTrait::SignalResponse => self.communication.map(|c| c.signal_response),
            GeneTrait::Cooperation => self.social.map(|s| s.cooperation),
            GeneTrait::Aggression => self.social.map(|s| s.aggression),
        }
    }

    /// Mutable handle on `gene`, or `None` when its group is absent.
    pub fn trait_value_mut(&mut self, gene: GeneTrait) -> Option<&mut f64> {
        match gene {
            GeneTrait::MoveProbability => Some(&mut self.move_probability),
            GeneTrait::MoveRandomness => Some(&mut self.move_randomness),
            GeneTrait::EatThreshold => Some(&mut self.eat_threshold),
            GeneTrait::ReproduceThreshold => Some(&mut self.reproduce_threshold),
            GeneTrait::SignalProbability => {
                self.communication.as_mut().map(|c| &mut c.signal_probability)
            }
            GeneTrait::SignalResponse => self.communication.as_mut().map(|c| &mut c.signal_response),
            GeneTrait::Cooperation => self.social.as_mut().map(|s| &mut s.cooperation),
            GeneTrait::Aggression => self.social.as_mut().map(|s| &mut s.aggression),
        }
    }

    #[must_use]
    pub fn signal_probability(&self) -> f64 {
        self.communication.map_or(0.0, |c| c.signal_probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_genome() -> Genome {
        Genome {
            move_probability: 0.5,
            move_randomness: 0.5,
            eat_threshold: 10.0,
            reproduce_threshold: 250.0,
            color: Color::default(),
            generation: 0,
            communication: None,
            social: None,
            brain: None,
        }
    }

    #[test]
    fn test_enabled_traits_follow_groups() {
        let mut genome = plain_genome();
        assert_eq!(genome.enabled_traits().len(), 4);

        genome.communication = Some(CommunicationGenes {
            signal_probability: 0.05,
            signal_response: 0.5,
        });
        genome.social = Some(SocialGenes {
            cooperation: 0.1,
            aggression: 0.9,
        });
        let traits = genome.enabled_traits();
        assert_eq!(traits.len(), 8);
        assert!(traits.contains(&GeneTrait::Aggression));
    }

    #[test]
    fn test_trait_value_absent_group() {
        let mut genome = plain_genome();
        assert_eq!(genome.trait_value(GeneTrait::Cooperation), None);
        assert!(genome.trait_value_mut(GeneTrait::SignalResponse).is_none());
        assert_eq!(genome.signal_probability(), 0.0);
    }

    #[test]
    fn test_layer_weight_layout() {
        let mut layer = Layer::zeroed(3, 2);
        layer.weights[2 * 2 + 1] = 0.75;
        assert_eq!(layer.weight(2, 1), 0.75);
        assert_eq!(layer.biases.len(), 2);
    }
}
