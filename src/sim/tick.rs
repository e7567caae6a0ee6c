//! Fixed timestep simulation tick
//!
//! Advances a round by exactly one frame. Order matters and is fixed:
//! input, spawn/score, integrate, prune, collide.

use super::state::{EndCause, RoundPhase, RoundState, RoundSummary};

/// Round-level commands (quitting the process is handled by the host)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Jump,
    /// Leave the round for the menu without scoring it
    Abort,
}

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// At most one command per tick
    pub command: Option<Command>,
    /// Idle/demo mode - the simulation decides when to jump
    pub autopilot: bool,
}

impl TickInput {
    pub fn command(command: Command) -> Self {
        Self {
            command: Some(command),
            ..Default::default()
        }
    }
}

/// What happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Running,
    /// A collision ended the round on this tick
    Ended(RoundSummary),
    /// The round was abandoned; discard it
    Aborted,
}

/// Advance the round by one fixed tick
pub fn tick(state: &mut RoundState, input: &TickInput) -> TickOutcome {
    if state.phase == RoundPhase::Ended {
        return state.summary().map_or(TickOutcome::Running, TickOutcome::Ended);
    }

    // 1. Input
    match input.command {
        Some(Command::Abort) => {
            log::info!("Round aborted at frame {} (score {})", state.frame, state.score);
            return TickOutcome::Aborted;
        }
        Some(Command::Jump) => state.avatar.jump(state.tuning.jump_impulse),
        None if input.autopilot && autopilot_wants_jump(state) => {
            state.avatar.jump(state.tuning.jump_impulse)
        }
        None => {}
    }

    // 2. Spawn; scoring rides on the spawn cadence
    spawn_step(state);

    // 3. Integrate
    state.avatar.tick(state.tuning.gravity);
    state.obstacles.tick_all();

    // 4. Prune before colliding
    let pruned = state.obstacles.prune_offscreen();
    if pruned > 0 {
        log::debug!("Pruned {} bars at frame {}", pruned, state.frame);
    }

    // 5. Collide against survivors
    let cause = if state.avatar.has_hit_ground(state.tuning.playfield_height) {
        Some(EndCause::Ground)
    } else {
        state
            .obstacles
            .first_overlap(&state.avatar)
            .map(|s| EndCause::Gate { gate: s.gate })
    };

    if let Some(cause) = cause {
        state.phase = RoundPhase::Ended;
        state.end = Some(cause);
        log::info!(
            "Round over at frame {}: {:?}, score {}",
            state.frame,
            cause,
            state.score
        );
        return state.summary().map_or(TickOutcome::Running, TickOutcome::Ended);
    }

    // 6. Next frame
    state.frame += 1;
    TickOutcome::Running
}

/// Spawn a gate on cadence frames, crediting a point once past warm-up.
/// Returns true if a point was awarded.
pub fn spawn_step(state: &mut RoundState) -> bool {
    if !state.frame.is_multiple_of(state.tuning.spawn_cadence) {
        return false;
    }

    let top_height = state.draw_top_height();
    let gate = state.spawn_gate(top_height);
    log::debug!(
        "Gate {} spawned at frame {} (top {})",
        gate,
        state.frame,
        top_height
    );

    if state.frame > state.tuning.warmup_ticks {
        state.score += 1;
        return true;
    }
    false
}

/// Distance above the gap's bottom edge the autopilot keeps the avatar's top edge
const AUTOPILOT_FLOOR_MARGIN: f32 = 20.0;

/// Autopilot: hop whenever the avatar has sunk below its target line.
///
/// The target sits low in the next gap so a jump's rise stays clear of the top bar.
fn autopilot_wants_jump(state: &RoundState) -> bool {
    let avatar = &state.avatar;
    let target = match state.obstacles.next_gap(avatar.pos.x) {
        Some((_, gap_bottom)) => gap_bottom - avatar.size.y - AUTOPILOT_FLOOR_MARGIN,
        None => state.tuning.playfield_height / 2.0,
    };
    avatar.pos.y > target
}
