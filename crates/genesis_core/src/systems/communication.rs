use crate::config::AppConfig;
use crate::signal::SignalField;
use genesis_data::{Agent, Signal, SignalKind};
use rand::Rng;

/// Occasionally broadcasts an alarm (when starving) or a food call (when
/// standing on a rich cell).
///
/// The signal cost is paid whenever an emission is attempted, including when
/// the field is full and drops it.
pub fn maybe_emit<R: Rng>(
    agent: &mut Agent,
    local_energy: f64,
    signals: &mut SignalField,
    config: &AppConfig,
    rng: &mut R,
) -> Option<SignalKind> {
    if !config.features.communication {
        return None;
    }
    let probability = agent.genome.communication?.signal_probability;
    if rng.gen::<f64>() >= probability {
        return None;
    }

    let comm = &config.communication;
    let kind = if agent.energy < comm.low_energy_threshold {
        SignalKind::Alarm
    } else if local_energy > comm.food_signal_threshold {
        SignalKind::Food
    } else {
        return None;
    };
    if agent.energy < comm.signal_cost {
        return None;
    }

    agent.energy -= comm.signal_cost;
    let (x, y) = agent.position();
    signals.emit(Signal::new(x, y, kind));
    Some(kind)
}
