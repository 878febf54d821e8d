use crate::config::AppConfig;
use crate::genome::GenomeLogic;
use crate::geometry::wrap;
use crate::lifecycle::create_agent_with_genome;
use genesis_data::{Agent, Position};
use rand::Rng;

/// Asexual reproduction with mutation.
///
/// Requires `energy >= reproduce_threshold` and `population < max_population`.
/// The parent pays `cost_replicate`; the offspring appears at a random Moore
/// offset (possibly the parent's own cell) with fresh start energy.
pub fn try_reproduce<R: Rng>(
    parent: &mut Agent,
    population: usize,
    config: &AppConfig,
    rng: &mut R,
    tick: u64,
) -> Option<Agent> {
    if parent.energy < parent.genome.reproduce_threshold
        || population >= config.population.max_population
    {
        return None;
    }

    parent.energy -= config.metabolism.cost_replicate;
    parent.offspring_count += 1;

    let genome = parent.genome.mutate_with_config(config, rng);
    let position = Position {
        x: wrap(
            i32::from(parent.position.x) + rng.gen_range(-1..=1),
            config.world.width,
        ),
        y: wrap(
            i32::from(parent.position.y) + rng.gen_range(-1..=1),
            config.world.height,
        ),
    };

    let mut child = create_agent_with_genome(parent.species, position, genome, config, rng, tick);
    child.identity.parent_id = Some(parent.id());
    Some(child)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::torus_delta;
    use crate::lifecycle::create_agent;
    use genesis_data::Species;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn parent(config: &AppConfig, rng: &mut ChaCha8Rng) -> Agent {
        let mut agent = create_agent(Species::Predator, Position { x: 0, y: 0 }, config, rng, 0);
        agent.genome.reproduce_threshold = 250.0;
        agent
    }

    #[test]
    fn test_below_threshold_refused() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut p = parent(&config, &mut rng);
        p.energy = 249.9;
        assert!(try_reproduce(&mut p, 1, &config, &mut rng, 5).is_none());
        assert_eq!(p.energy, 249.9);
        assert_eq!(p.offspring_count, 0);
    }

    #[test]
    fn test_offspring_inherits_species_and_lineage() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut p = parent(&config, &mut rng);
        p.energy = 250.0;
        let child = try_reproduce(&mut p, 1, &config, &mut rng, 5).unwrap();
        assert_eq!(p.energy, 100.0);
        assert_eq!(p.offspring_count, 1);
        assert_eq!(child.species, Species::Predator);
        assert_eq!(child.identity.parent_id, Some(p.id()));
        assert_ne!(child.id(), p.id());
        assert_eq!(child.energy, config.metabolism.start_energy);
        assert_eq!(child.genome.generation, p.genome.generation + 1);
        assert_eq!(child.birth_tick, 5);
        let (dx, dy) = torus_delta(p.position(), child.position(), 100, 100);
        assert!(dx.abs() <= 1 && dy.abs() <= 1);
    }

    #[test]
    fn test_population_cap_refuses() {
        let mut config = AppConfig::default();
        config.population.max_population = 10;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut p = parent(&config, &mut rng);
        p.energy = 1000.0;
        assert!(try_reproduce(&mut p, 10, &config, &mut rng, 1).is_none());
        assert!(try_reproduce(&mut p, 9, &config, &mut rng, 1).is_some());
    }
}
