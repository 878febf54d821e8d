use crate::config::AppConfig;
use crate::lifecycle::Neighbors;
use crate::signal::SignalField;
use genesis_data::{Agent, Signal, SignalKind, Species};
use uuid::Uuid;

/// Outcome of a successful hunt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kill {
    pub prey_id: Uuid,
    pub energy_gained: f64,
}

/// Predator eats the first living prey sharing its cell.
///
/// The prey's energy drops to zero but it stays listed until the end-of-tick
/// sweep. An alarm is raised at the kill site when communication is enabled.
pub fn hunt(
    predator: &mut Agent,
    neighbors: &mut Neighbors<'_>,
    signals: &mut SignalField,
    config: &AppConfig,
) -> Option<Kill> {
    if !predator.is_predator() || !config.features.predators {
        return None;
    }
    let here = predator.position;
    let prey = neighbors
        .iter_mut()
        .find(|a| a.species == Species::Prey && !a.is_dead() && a.position == here)?;

    let gained = prey.energy * config.predation.energy_transfer;
    prey.energy = 0.0;
    predator.energy += gained;
    let kill = Kill {
        prey_id: prey.id(),
        energy_gained: gained,
    };

    if config.features.communication {
        signals.emit(Signal::with_strength(
            here.x,
            here.y,
            SignalKind::Alarm,
            config.predation.kill_alarm_strength,
        ));
    }
    tracing::debug!(
        predator = %predator.id(),
        prey = %kill.prey_id,
        energy = gained,
        "Predation"
    );
    Some(kill)
}
