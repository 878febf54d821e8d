use crate::config::AppConfig;
use crate::energy_field::EnergyField;
use crate::geometry::{in_vision_cone, torus_delta};
use genesis_data::{Agent, Species, BRAIN_INPUTS};
use rand::Rng;

/// A visible cell offset and the energy it holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensedCell {
    pub dx: i32,
    pub dy: i32,
    pub energy: f64,
}

/// Another agent within sight, with the shortest wrapped offset to it.
#[derive(Debug, Clone, Copy)]
pub struct SensedAgent<'a> {
    pub agent: &'a Agent,
    pub dx: i32,
    pub dy: i32,
    pub distance: f64,
}

fn visible(agent: &Agent, dx: i32, dy: i32, config: &AppConfig) -> bool {
    match agent.facing {
        Some(facing) => in_vision_cone(dx, dy, facing, config.sensing.vision_cone_angle),
        None => true,
    }
}

/// Cells in the square window of radius `vision_range`, origin excluded.
///
/// Scans `dx` in the outer loop and `dy` in the inner loop; callers rely on
/// this order for tie-breaking.
pub fn sense_environment(agent: &Agent, field: &EnergyField, config: &AppConfig) -> Vec<SensedCell> {
    let r = i32::from(config.sensing.vision_range);
    let (x, y) = (i32::from(agent.position.x), i32::from(agent.position.y));
    let mut cells = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);

    for dx in -r..=r {
        for dy in -r..=r {
            if (dx, dy) == (0, 0) || !visible(agent, dx, dy, config) {
                continue;
            }
            cells.push(SensedCell {
                dx,
                dy,
                energy: field.get(x + dx, y + dy),
            });
        }
    }
    cells
}

fn sense_living<'a, I>(agent: &Agent, others: I, config: &AppConfig) -> Vec<SensedAgent<'a>>
where
    I: IntoIterator<Item = &'a Agent>,
{
    let range = f64::from(config.sensing.vision_range);
    let (w, h) = (config.world.width, config.world.height);

    others
        .into_iter()
        .filter(|other| !other.is_dead())
        .filter_map(|other| {
            let (dx, dy) = torus_delta(agent.position(), other.position(), w, h);
            let distance = f64::from(dx).hypot(f64::from(dy));
            (distance <= range && visible(agent, dx, dy, config)).then_some(SensedAgent {
                agent: other,
                dx,
                dy,
                distance,
            })
        })
        .collect()
}

/// Living agents in sight. Empty unless the social feature is enabled.
pub fn sense_agents<'a, I>(agent: &Agent, others: I, config: &AppConfig) -> Vec<SensedAgent<'a>>
where
    I: IntoIterator<Item = &'a Agent>,
{
    if !config.features.social {
        return Vec::new();
    }
    sense_living(agent, others, config)
}

/// Living prey in sight, sorted nearest first.
pub fn sense_prey<'a, I>(agent: &Agent, others: I, config: &AppConfig) -> Vec<SensedAgent<'a>>
where
    I: IntoIterator<Item = &'a Agent>,
{
    let mut prey: Vec<_> = sense_living(agent, others, config)
        .into_iter()
        .filter(|s| s.agent.species == Species::Prey)
        .collect();
    prey.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    prey
}

fn half_plane_mean<F: Fn(&SensedCell) -> bool>(cells: &[SensedCell], pick: F) -> f64 {
    let (sum, count) = cells
        .iter()
        .filter(|c| pick(c))
        .fold((0.0, 0usize), |(s, n), c| (s + c.energy, n + 1));
    sum / count.max(1) as f64
}

/// Builds the brain input vector.
///
/// Layout: mean energy north/south/east/west (/100), energy here (/100),
/// own energy (/500), age (/1000), agents in sight (/10), facing (/7, or
/// 0.5 without a heading) and one uniform noise tap.
pub fn neural_inputs<R: Rng>(
    agent: &Agent,
    cells: &[SensedCell],
    local_energy: f64,
    agents_in_sight: usize,
    rng: &mut R,
) -> [f32; BRAIN_INPUTS] {
    let north = half_plane_mean(cells, |c| c.dy < 0);
    let south = half_plane_mean(cells, |c| c.dy > 0);
    let east = half_plane_mean(cells, |c| c.dx > 0);
    let west = half_plane_mean(cells, |c| c.dx < 0);
    let facing = agent
        .facing
        .map_or(0.5, |f| f.index() as f64 / 7.0);

    [
        (north / 100.0) as f32,
        (south / 100.0) as f32,
        (east / 100.0) as f32,
        (west / 100.0) as f32,
        (local_energy / 100.0) as f32,
        (agent.energy / 500.0) as f32,
        (agent.age as f64 / 1000.0) as f32,
        (agents_in_sight as f64 / 10.0) as f32,
        facing as f32,
        rng.gen::<f32>(),
    ]
}
