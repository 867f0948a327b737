//! Per-frame simulation step
//!
//! Order within a step:
//! 1. consume latched input (halt request, jump impulses)
//! 2. integrate the character and contain it in the viewport
//! 3. horizontal control, or world scroll once the character is pinned
//! 4. resolve the character against every platform
//! 5. evaluate checkpoint claims left to right

use glam::Vec2;

use super::collision::{checkpoint_reached, resolve_platform};
use super::entity::{Entity, StepContext};
use super::scale::Viewport;
use super::state::{GameEvent, Simulation};
use crate::settings::Tuning;

/// Advance the simulation by one display frame
pub fn tick(sim: &mut Simulation, viewport: Viewport, tuning: &Tuning) -> Vec<GameEvent> {
    sim.frame += 1;

    if sim.take_halt() {
        sim.player.velocity = Vec2::ZERO;
    }
    let jumps = sim.input.take_jumps();
    if jumps > 0 {
        sim.player.velocity.y -= sim.jump_impulse() * jumps as f32;
    }

    let ctx = StepContext { viewport, tuning };
    sim.player.update(&ctx);

    apply_controls(sim, tuning);

    for platform in &sim.platforms {
        resolve_platform(&mut sim.player, platform, tuning.gravity);
    }

    let mut events = Vec::new();
    claim_checkpoints(sim, tuning, &mut events);
    events
}

/// Move the character inside its band; past the band, move the world instead
fn apply_controls(sim: &mut Simulation, tuning: &Tuning) {
    let x = sim.player.position.x;
    let right = sim.input.move_right;
    let left = sim.input.move_left;

    if right && x < sim.right_threshold() {
        sim.player.velocity.x = tuning.move_speed;
    } else if left && x > sim.left_threshold() {
        sim.player.velocity.x = -tuning.move_speed;
    } else {
        sim.player.velocity.x = 0.0;
        if sim.scroll_gate_active() {
            if right {
                sim.scroll_world(-tuning.scroll_speed);
            } else if left {
                sim.scroll_world(tuning.scroll_speed);
            }
        }
    }
}

/// Claim reachable checkpoints, strictly in order
fn claim_checkpoints(sim: &mut Simulation, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let last = match sim.checkpoints.len().checked_sub(1) {
        Some(last) => last,
        None => return,
    };

    for index in 0..=last {
        let predecessor_claimed = index == 0 || sim.checkpoints[index - 1].is_claimed();
        if !predecessor_claimed {
            continue;
        }
        let checkpoint = &sim.checkpoints[index];
        if !checkpoint_reached(&sim.player, checkpoint, sim.scroll_gate_active()) {
            continue;
        }

        let level = checkpoint.level();
        let cx = checkpoint.position.x;
        sim.checkpoints[index].claim();
        log::debug!("Checkpoint {} claimed at frame {}", level, sim.frame);

        if index == last {
            sim.close_scroll_gate();
            sim.request_halt();
            log::info!("Final checkpoint reached (level {})", level);
            events.push(GameEvent::FinalCheckpointReached { level });
        } else {
            let px = sim.player.position.x;
            if px >= cx && px <= cx + tuning.announce_window {
                log::info!("Checkpoint reached (level {})", level);
                events.push(GameEvent::CheckpointReached { level });
            }
        }
    }
}
