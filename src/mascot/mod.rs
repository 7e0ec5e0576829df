//! Mascot domain — the interaction state machine.
//!
//! Owns `MascotState` (pose, scale, rotation, mode) and everything that
//! mutates it: tap/drag transitions, the dwell/settle continuations, the
//! repeating blink schedule, the purr audio lifecycle, and the thought
//! bubble cadence. The renderer reads the state every frame; nothing else
//! writes it.

use bevy::prelude::*;

use crate::shared::*;

mod pose;
mod interaction;
mod blink;
mod purr;
mod thoughts;
mod render;

pub use pose::*;
pub use interaction::*;
pub use blink::*;
pub use purr::*;
pub use thoughts::*;
pub use render::*;

// ─────────────────────────────────────────────────────────────────────────────
// Components
// ─────────────────────────────────────────────────────────────────────────────

/// Marker for the mascot sprite entity.
#[derive(Component, Debug)]
pub struct Mascot;

/// Which step of the tap wind-down a `PoseReset` performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetPhase {
    /// Dwell elapsed → restore resting visuals, schedule the settle step.
    Dwell,
    /// Settle elapsed → mode back to Idle.
    Settle,
}

/// A scheduled continuation of a tap interaction. Carries the generation
/// captured at schedule time; a stale one despawns without touching state.
#[derive(Component, Debug)]
pub struct PoseReset {
    pub timer: Timer,
    pub generation: u64,
    pub phase: ResetPhase,
}

/// Scheduled end of a blink (pose back to Seated after the hold).
#[derive(Component, Debug)]
pub struct BlinkReset {
    pub timer: Timer,
    pub generation: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct MascotPlugin;

impl Plugin for MascotPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MascotState>()
            .init_resource::<PurrSwitch>()
            .init_resource::<PurrChannel>()
            .init_resource::<ThoughtStream>()
            .init_resource::<BubbleState>()
            .init_resource::<MascotSpriteData>()
            // ── screen lifecycle ─────────────────────────────────────────────
            .add_systems(
                OnEnter(AppState::Content),
                (load_mascot_sprites, spawn_mascot, spawn_thought_bubble, start_blink_schedule)
                    .chain(),
            )
            .add_systems(OnExit(AppState::Content), teardown_mascot)
            // ── gesture-driven transitions ───────────────────────────────────
            .add_systems(
                Update,
                (
                    handle_tap_gestures,
                    handle_drag_started,
                    handle_drag_ended,
                    sync_purr_switch,
                    handle_audio_interrupted,
                    handle_haptic_pulses,
                    tick_pose_resets,
                )
                    .chain()
                    .run_if(in_state(AppState::Content)),
            )
            // ── idle blinking ────────────────────────────────────────────────
            .add_systems(
                Update,
                (tick_blink_schedule, tick_blink_resets).run_if(in_state(AppState::Content)),
            )
            // ── thought bubble ───────────────────────────────────────────────
            .add_systems(
                Update,
                (handle_thought_requests, advance_thought_swap, animate_thought_bubble)
                    .chain()
                    .run_if(in_state(AppState::Content)),
            )
            // ── rendering ────────────────────────────────────────────────────
            .add_systems(
                Update,
                (sync_mascot_sprite, breathe).run_if(in_state(AppState::Content)),
            );
    }
}

/// Cancels every outstanding continuation, stops audio, and restores the
/// resting state. No continuation may fire after the screen is gone.
pub fn teardown_mascot(
    mut commands: Commands,
    mut state: ResMut<MascotState>,
    mut channel: ResMut<PurrChannel>,
    mut purr_switch: ResMut<PurrSwitch>,
    mut bubble: ResMut<BubbleState>,
    mascots: Query<Entity, With<Mascot>>,
    bubbles: Query<Entity, With<ThoughtBubbleUi>>,
    pose_resets: Query<Entity, With<PoseReset>>,
    blink_resets: Query<Entity, With<BlinkReset>>,
) {
    stop_purring(&mut commands, &mut channel);
    purr_switch.0 = false;
    *state = MascotState::default();
    *bubble = BubbleState::default();
    commands.remove_resource::<BlinkSchedule>();

    for entity in mascots
        .iter()
        .chain(bubbles.iter())
        .chain(pose_resets.iter())
        .chain(blink_resets.iter())
    {
        if let Some(mut ec) = commands.get_entity(entity) {
            ec.despawn_recursive();
        }
    }
}
