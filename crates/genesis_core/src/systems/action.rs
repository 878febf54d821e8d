use super::perception::{self, SensedCell};
use crate::brain::{
    BrainLogic, OUTPUT_MOVE_EAST, OUTPUT_MOVE_NORTH, OUTPUT_MOVE_SOUTH, OUTPUT_MOVE_WEST,
};
use crate::config::AppConfig;
use crate::energy_field::EnergyField;
use crate::geometry::{step_toward, wrap};
use crate::lifecycle::TickContext;
use genesis_data::{Agent, Direction, SignalKind};
use rand::Rng;

const STEP_CHOICES: [i32; 3] = [-1, 0, 1];

/// Threshold an output must exceed before it moves the agent.
const OUTPUT_THRESHOLD: f32 = 0.5;

fn random_step<R: Rng>(rng: &mut R) -> (i32, i32) {
    (
        STEP_CHOICES[rng.gen_range(0..3)],
        STEP_CHOICES[rng.gen_range(0..3)],
    )
}

/// Resolves one axis from a positive and a negative output; the positive
/// side wins ties.
fn axis(positive: f32, negative: f32) -> i32 {
    if positive > OUTPUT_THRESHOLD && positive >= negative {
        1
    } else if negative > OUTPUT_THRESHOLD {
        -1
    } else {
        0
    }
}

fn neural_move<R: Rng>(agent: &mut Agent, ctx: &mut TickContext<'_, R>) -> Option<(i32, i32)> {
    let brain = agent.genome.brain.as_ref()?;
    let cells = perception::sense_environment(agent, ctx.field, ctx.config);
    let local = ctx
        .field
        .get(i32::from(agent.position.x), i32::from(agent.position.y));
    let crowd = perception::sense_agents(agent, ctx.neighbors.iter(), ctx.config).len();
    let inputs = perception::neural_inputs(agent, &cells, local, crowd, ctx.rng);
    let outputs = brain.forward(inputs);
    agent.last_outputs = Some(outputs);

    Some((
        axis(outputs[OUTPUT_MOVE_EAST], outputs[OUTPUT_MOVE_WEST]),
        axis(outputs[OUTPUT_MOVE_SOUTH], outputs[OUTPUT_MOVE_NORTH]),
    ))
}

fn chase_move<R: Rng>(agent: &Agent, ctx: &mut TickContext<'_, R>) -> Option<(i32, i32)> {
    if !agent.is_predator() || !ctx.config.features.predators {
        return None;
    }
    let (w, h) = (ctx.config.world.width, ctx.config.world.height);
    let target = perception::sense_prey(agent, ctx.neighbors.iter(), ctx.config)
        .first()
        .map(|s| s.agent.position())?;
    if ctx.rng.gen::<f64>() < ctx.config.predation.chase_probability {
        Some(step_toward(agent.position(), target, w, h))
    } else {
        None
    }
}

fn signal_move<R: Rng>(agent: &Agent, ctx: &TickContext<'_, R>) -> Option<(i32, i32)> {
    let comm = &ctx.config.communication;
    if !ctx.config.features.communication {
        return None;
    }
    let (w, h) = (ctx.config.world.width, ctx.config.world.height);
    let (x, y) = agent.position();
    for sensed in ctx.signals.sense(x, y, comm) {
        if sensed.strength <= comm.response_threshold {
            continue;
        }
        let toward = step_toward((x, y), (sensed.x, sensed.y), w, h);
        match sensed.kind {
            SignalKind::Alarm => return Some((-toward.0, -toward.1)),
            SignalKind::Food => return Some(toward),
            SignalKind::Mating => {}
        }
    }
    None
}

fn memory_move<R: Rng>(agent: &Agent, ctx: &mut TickContext<'_, R>) -> Option<(i32, i32)> {
    let memory = agent.memory.as_ref().filter(|m| !m.is_empty())?;
    if ctx.rng.gen::<f64>() >= ctx.config.memory.recall_probability {
        return None;
    }
    let best = memory.best()?;
    let (w, h) = (ctx.config.world.width, ctx.config.world.height);
    Some(step_toward(agent.position(), (best.x, best.y), w, h))
}

fn sensory_move<R: Rng>(agent: &Agent, ctx: &mut TickContext<'_, R>) -> (i32, i32) {
    if ctx.rng.gen::<f64>() < agent.genome.move_randomness {
        return random_step(ctx.rng);
    }
    let cells = perception::sense_environment(agent, ctx.field, ctx.config);
    let best = cells.iter().fold(None::<&SensedCell>, |best, c| match best {
        Some(b) if b.energy >= c.energy => Some(b),
        _ => Some(c),
    });
    best.map_or((0, 0), |c| (c.dx.signum(), c.dy.signum()))
}

/// Chooses this tick's step `(dx, dy)`, each component in `{-1, 0, 1}`.
///
/// Priority: movement gate, brain, predator chase, signals, memory, senses.
pub fn decide_move<R: Rng>(agent: &mut Agent, ctx: &mut TickContext<'_, R>) -> (i32, i32) {
    if ctx.rng.gen::<f64>() >= agent.genome.move_probability {
        return (0, 0);
    }
    if let Some(step) = neural_move(agent, ctx) {
        return step;
    }
    if let Some(step) = chase_move(agent, ctx) {
        return step;
    }
    if let Some(step) = signal_move(agent, ctx) {
        return step;
    }
    if let Some(step) = memory_move(agent, ctx) {
        return step;
    }
    sensory_move(agent, ctx)
}

/// Moves the agent one step with wraparound, paying move and turn costs.
/// Returns `false` for the null step.
pub fn apply_move(agent: &mut Agent, dx: i32, dy: i32, config: &AppConfig) -> bool {
    if dx == 0 && dy == 0 {
        return false;
    }
    agent.position.x = wrap(i32::from(agent.position.x) + dx, config.world.width);
    agent.position.y = wrap(i32::from(agent.position.y) + dy, config.world.height);
    agent.energy -= config.metabolism.cost_move;

    if let (Some(current), Some(heading)) = (agent.facing, Direction::from_delta(dx, dy)) {
        if current != heading {
            agent.energy -= config.sensing.turn_cost;
            agent.facing = Some(heading);
        }
    }
    true
}

/// Eats everything in the current cell when it meets the genome's threshold.
pub fn eat(agent: &mut Agent, field: &mut EnergyField) -> f64 {
    let (x, y) = (i32::from(agent.position.x), i32::from(agent.position.y));
    let available = field.get(x, y);
    if available < agent.genome.eat_threshold {
        return 0.0;
    }
    let consumed = field.consume(x, y, available);
    agent.energy += consumed;
    consumed
}
