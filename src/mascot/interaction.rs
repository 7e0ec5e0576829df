//! Tap handling and the dwell/settle continuations.
//!
//! A tap while Idle starts a transient pose animation; after the dwell
//! (1.2 s) the visuals return to rest, and after a further settle delay
//! (0.3 s) the mode returns to Idle. Both steps are scheduled as
//! `PoseReset` entities carrying the generation captured at schedule
//! time — if the state machine has moved on (another gesture, purring,
//! teardown), the reset despawns without touching anything.
//!
//! Purring takes precedence over tap interaction: a tap while purring
//! (or while the external purr switch is on) always exits purring and
//! never starts a pose animation.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;
use super::{random_tap_pose, stop_purring, PoseReset, PurrChannel, ResetPhase};

pub fn handle_tap_gestures(
    mut commands: Commands,
    mut taps: EventReader<TapGesture>,
    mut state: ResMut<MascotState>,
    mut purr_switch: ResMut<PurrSwitch>,
    mut channel: ResMut<PurrChannel>,
    mut thoughts: EventWriter<ThoughtRequested>,
) {
    for _tap in taps.read() {
        match state.mode {
            MascotMode::Purring => {
                purr_switch.0 = false;
                stop_purring(&mut commands, &mut channel);
                state.exit_purring();
                info!("[Mascot] Tap while purring → idle");
            }
            // At most one interaction in flight.
            MascotMode::Interacting => {}
            MascotMode::Idle => {
                let mut rng = rand::thread_rng();
                let pose = random_tap_pose(&mut rng);
                let rotation = rng.gen_range(-TAP_ROTATION_DEGREES..=TAP_ROTATION_DEGREES);
                let generation = state.begin_interaction(pose, rotation);

                commands.spawn(PoseReset {
                    timer: Timer::from_seconds(TAP_DWELL_SECS, TimerMode::Once),
                    generation,
                    phase: ResetPhase::Dwell,
                });

                thoughts.send(ThoughtRequested);
                info!("[Mascot] Tap → {:?} ({:+.1}°)", pose, rotation);
            }
        }
    }
}

/// Ticks the scheduled continuations and applies the ones still relevant.
///
/// A reset whose generation no longer matches the state machine is stale:
/// it was superseded by a newer gesture and must not clobber newer state.
pub fn tick_pose_resets(
    mut commands: Commands,
    time: Res<Time>,
    mut state: ResMut<MascotState>,
    mut resets: Query<(Entity, &mut PoseReset)>,
) {
    for (entity, mut reset) in resets.iter_mut() {
        reset.timer.tick(time.delta());
        if !reset.timer.finished() {
            continue;
        }

        if reset.generation == state.generation {
            match reset.phase {
                ResetPhase::Dwell => {
                    state.settle();
                    commands.spawn(PoseReset {
                        timer: Timer::from_seconds(TAP_SETTLE_SECS, TimerMode::Once),
                        generation: reset.generation,
                        phase: ResetPhase::Settle,
                    });
                }
                ResetPhase::Settle => {
                    state.finish_interaction();
                }
            }
        }

        if let Some(mut ec) = commands.get_entity(entity) {
            ec.despawn();
        }
    }
}
