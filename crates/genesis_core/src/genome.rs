//! Genome construction, mutation and kinship.

use crate::brain::BrainLogic;
use crate::config::AppConfig;
use genesis_data::{
    Color, CommunicationGenes, GeneTrait, Genome, NeuralBrain, SocialGenes,
};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::StandardNormal;

/// Largest possible Euclidean distance between two RGB colours.
const MAX_COLOR_DISTANCE: f64 = 441.672_955_930_063_7; // 255 * sqrt(3)

/// Trait defining the genetic interface for agent genomes.
pub trait GenomeLogic {
    fn new_random_with_rng<R: Rng>(config: &AppConfig, rng: &mut R) -> Self;

    /// Returns a mutated copy one generation further on.
    #[must_use]
    fn mutate_with_config<R: Rng>(&self, config: &AppConfig, rng: &mut R) -> Self;

    /// Colour similarity in `[0, 1]`.
    fn similarity(&self, other: &Genome) -> f64;
    fn is_kin(&self, other: &Genome, threshold: f64) -> bool;
}

fn random_channel<R: Rng>(rng: &mut R) -> u8 {
    rng.gen_range(Color::MIN_CHANNEL..=u8::MAX)
}

fn shift_channel(value: u8, step: i16) -> u8 {
    (i16::from(value) + step).clamp(i16::from(Color::MIN_CHANNEL), i16::from(u8::MAX)) as u8
}

fn gaussian<R: Rng>(rng: &mut R, sigma: f64) -> f64 {
    rng.sample::<f64, _>(StandardNormal) * sigma
}

impl GenomeLogic for Genome {
    fn new_random_with_rng<R: Rng>(config: &AppConfig, rng: &mut R) -> Self {
        let features = &config.features;
        let move_probability = rng.gen::<f64>();
        let move_randomness = rng.gen::<f64>();
        let eat_threshold = rng.gen::<f64>() * 50.0;
        let reproduce_threshold =
            config.metabolism.min_energy_to_replicate + rng.gen::<f64>() * 100.0;
        let color = Color::new(random_channel(rng), random_channel(rng), random_channel(rng));

        let communication = features.communication.then(|| CommunicationGenes {
            signal_probability: rng.gen::<f64>() * 0.1,
            signal_response: rng.gen::<f64>(),
        });
        let social = features.social.then(|| SocialGenes {
            cooperation: rng.gen::<f64>(),
            aggression: rng.gen::<f64>(),
        });
        let brain = features.neural_networks.then(|| {
            NeuralBrain::new_random_with_rng(
                &config.brain.hidden_layers,
                config.brain.weight_scale,
                rng,
            )
        });

        Self {
            move_probability,
            move_randomness,
            eat_threshold,
            reproduce_threshold,
            color,
            generation: 0,
            communication,
            social,
            brain,
        }
    }

    fn mutate_with_config<R: Rng>(&self, config: &AppConfig, rng: &mut R) -> Self {
        let evo = &config.evolution;
        let mut child = self.clone();
        child.generation = self.generation + 1;

        if let Some(brain) = child.brain.as_mut() {
            brain.mutate(config.brain.mutation_rate, config.brain.mutation_strength, rng);
        }

        if rng.gen::<f64>() < evo.mutation_rate {
            let traits = child.enabled_traits();
            if let Some(&gene) = traits.choose(rng) {
                let min_replicate = config.metabolism.min_energy_to_replicate;
                let noise = match gene {
                    GeneTrait::EatThreshold => gaussian(rng, evo.eat_threshold_sigma),
                    GeneTrait::ReproduceThreshold => {
                        gaussian(rng, evo.reproduce_threshold_sigma)
                    }
                    _ => gaussian(rng, evo.mutation_strength),
                };
                if let Some(value) = child.trait_value_mut(gene) {
                    *value = if gene.is_unit_interval() {
                        (*value + noise).clamp(0.0, 1.0)
                    } else if gene == GeneTrait::ReproduceThreshold {
                        (*value + noise).max(min_replicate)
                    } else {
                        (*value + noise).max(0.0)
                    };
                }
            }
        }

        if rng.gen::<f64>() < evo.color_mutation_chance {
            let step = evo.color_step;
            let mut shift = |c: u8| shift_channel(c, rng.gen_range(-step..=step));
            child.color = Color::new(shift(child.color.r), shift(child.color.g), shift(child.color.b));
        }

        child
    }

    fn similarity(&self, other: &Genome) -> f64 {
        let distance: f64 = self
            .color
            .channels()
            .iter()
            .zip(other.color.channels())
            .map(|(&a, b)| (f64::from(a) - f64::from(b)).powi(2))
            .sum::<f64>()
            .sqrt();
        1.0 - distance / MAX_COLOR_DISTANCE
    }

    fn is_kin(&self, other: &Genome, threshold: f64) -> bool {
        self.similarity(other) > threshold
    }
}

/// Red-shifted colour used for freshly spawned predators.
#[must_use]
pub fn predator_tint(color: Color) -> Color {
    Color::new(
        shift_channel(color.r, 100),
        shift_channel(color.g, -50),
        shift_channel(color.b, -50),
    )
}
