//! Headless integration tests for Kitty Calm.
//!
//! These tests exercise the app's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic systems (skipping all rendering/UI), and verify that the
//! interaction state machine, audio lifecycle, emitters, and quiz flow
//! behave correctly.
//!
//! Run with: `cargo test --test headless`

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use kittycalm::data::DataPlugin;
use kittycalm::mascot::{
    handle_drag_ended, handle_drag_started, handle_tap_gestures, handle_thought_requests,
    advance_thought_swap, sync_purr_switch, tick_blink_resets, tick_blink_schedule,
    tick_pose_resets, BlinkReset, BlinkSchedule, BubbleState, MascotPlugin, PoseReset, PurrAudio,
    PurrChannel, TAP_POSES,
};
use kittycalm::particles::{
    animate_particles, emit_particles, EffectParticle, EmitterKind, ParticleEmitter,
};
use kittycalm::quiz::{QuizPlugin, QuizSession, RewardChoice, REWARD_IMAGES};
use kittycalm::shared::*;
use kittycalm::theme::ThemePlugin;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with all shared resources and events
/// registered but NO rendering, windowing, or asset loading. Systems are
/// added per-test depending on what's being exercised.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    // ── App State ────────────────────────────────────────────────────────
    app.init_state::<AppState>();

    // ── Shared Resources (mirrors main.rs + domain plugins) ──────────────
    app.init_resource::<ThoughtBank>()
        .init_resource::<QuizBank>()
        .init_resource::<BackgroundTheme>()
        .init_resource::<MascotState>()
        .init_resource::<PurrSwitch>()
        .init_resource::<PurrChannel>()
        .init_resource::<ThoughtStream>()
        .init_resource::<BubbleState>()
        .init_resource::<EffectToggles>()
        .init_resource::<ClearColor>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<TapGesture>()
        .add_event::<DragStarted>()
        .add_event::<DragEnded>()
        .add_event::<ThoughtRequested>()
        .add_event::<HapticPulse>()
        .add_event::<AudioInterrupted>()
        .add_event::<PlaySfxEvent>()
        .add_event::<UiActionEvent>();

    app
}

fn set_state(app: &mut App, state: AppState) {
    app.world_mut()
        .resource_mut::<NextState<AppState>>()
        .set(state);
    app.update(); // process state transition
}

fn tap(app: &mut App) {
    app.world_mut().send_event(TapGesture {
        position: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
    });
}

/// Forces every outstanding pose-reset timer to its end, then ticks once
/// so the continuation systems observe the expiry.
fn expire_pose_resets(app: &mut App) {
    let mut query = app.world_mut().query::<&mut PoseReset>();
    let world = app.world_mut();
    for mut reset in query.iter_mut(world) {
        let duration = reset.timer.duration();
        reset.timer.set_elapsed(duration);
    }
    app.update();
}

fn expire_blink_resets(app: &mut App) {
    let mut query = app.world_mut().query::<&mut BlinkReset>();
    let world = app.world_mut();
    for mut reset in query.iter_mut(world) {
        let duration = reset.timer.duration();
        reset.timer.set_elapsed(duration);
    }
    app.update();
}

fn expire_blink_schedule(app: &mut App) {
    let mut schedule = app.world_mut().resource_mut::<BlinkSchedule>();
    let duration = schedule.timer.duration();
    schedule.timer.set_elapsed(duration);
    app.update();
}

fn count_purr_audio(app: &mut App) -> usize {
    let mut query = app.world_mut().query_filtered::<Entity, With<PurrAudio>>();
    query.iter(app.world()).count()
}

fn count_particles(app: &mut App) -> usize {
    let mut query = app.world_mut().query::<&EffectParticle>();
    query.iter(app.world()).count()
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_boot_loads_banks_and_reaches_splash() {
    let mut app = build_test_app();
    app.add_plugins(DataPlugin);

    // First update enters Loading and populates banks; second applies NextState.
    app.update();
    app.update();

    let state = app.world().resource::<State<AppState>>();
    assert_eq!(
        state.get(),
        &AppState::Splash,
        "Expected to reach Splash after loading data"
    );

    let thoughts = app.world().resource::<ThoughtBank>();
    assert_eq!(thoughts.thoughts.len(), 30, "Thought bank should hold 30 entries");

    let quiz = app.world().resource::<QuizBank>();
    assert_eq!(quiz.questions.len(), 7, "Quiz bank should hold 7 questions");
}

// ─────────────────────────────────────────────────────────────────────────────
// Tap interaction
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_tap_while_idle_starts_and_winds_down_an_interaction() {
    let mut app = build_test_app();
    app.add_plugins(DataPlugin);
    app.add_systems(
        Update,
        (
            handle_tap_gestures,
            tick_pose_resets,
            handle_thought_requests,
            advance_thought_swap,
        )
            .chain(),
    );
    app.update();
    app.update();

    tap(&mut app);
    app.update();

    {
        let state = app.world().resource::<MascotState>();
        assert_eq!(state.mode, MascotMode::Interacting);
        assert!(TAP_POSES.contains(&state.pose), "pose must come from the tap subset");
        assert!((state.scale - TAP_SCALE).abs() < f32::EPSILON);
        assert!(state.rotation_degrees.abs() <= TAP_ROTATION_DEGREES);
    }

    {
        let bubble = app.world().resource::<BubbleState>();
        assert!(bubble.visible, "a thought bubble should be showing");
        assert!(!bubble.text.is_empty(), "thought text must be non-empty");
    }

    // Dwell elapses → visuals settle, mode still Interacting.
    expire_pose_resets(&mut app);
    {
        let state = app.world().resource::<MascotState>();
        assert_eq!(state.pose, MascotPose::Seated);
        assert_eq!(state.scale, 1.0);
        assert_eq!(state.rotation_degrees, 0.0);
        assert_eq!(state.mode, MascotMode::Interacting);
    }

    // Settle elapses → back to Idle.
    expire_pose_resets(&mut app);
    let state = app.world().resource::<MascotState>();
    assert_eq!(state.mode, MascotMode::Idle);
    assert_eq!(state.pose, MascotPose::Seated);
}

#[test]
fn test_tap_while_interacting_is_a_no_op() {
    let mut app = build_test_app();
    app.add_plugins(DataPlugin);
    app.add_systems(
        Update,
        (handle_tap_gestures, tick_pose_resets, handle_thought_requests).chain(),
    );
    app.update();
    app.update();

    tap(&mut app);
    app.update();

    let (pose, generation) = {
        let state = app.world().resource::<MascotState>();
        (state.pose, state.generation)
    };

    tap(&mut app);
    app.update();

    let state = app.world().resource::<MascotState>();
    assert_eq!(state.pose, pose, "second tap must not restart the animation");
    assert_eq!(state.generation, generation);
    assert_eq!(state.mode, MascotMode::Interacting);
}

#[test]
fn test_stale_dwell_timer_never_clobbers_purring() {
    let mut app = build_test_app();
    app.add_plugins(DataPlugin);
    app.add_systems(
        Update,
        (
            handle_tap_gestures,
            handle_drag_started,
            tick_pose_resets,
            handle_thought_requests,
        )
            .chain(),
    );
    app.update();
    app.update();

    // Start an interaction, then purring supersedes it mid-dwell.
    tap(&mut app);
    app.update();
    app.world_mut().send_event(DragStarted {
        position: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
    });
    app.update();
    assert_eq!(
        app.world().resource::<MascotState>().mode,
        MascotMode::Purring
    );

    // The superseded dwell timer fires… and must change nothing.
    expire_pose_resets(&mut app);
    expire_pose_resets(&mut app);
    let state = app.world().resource::<MascotState>();
    assert_eq!(
        state.mode,
        MascotMode::Purring,
        "a stale continuation clobbered newer state"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Purr audio lifecycle
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_purr_start_is_idempotent() {
    let mut app = build_test_app();
    app.add_systems(Update, handle_drag_started);
    app.update();

    let position = Vec2::new(210.0, 380.0);
    app.world_mut().send_event(DragStarted { position });
    app.update();
    app.world_mut().send_event(DragStarted { position });
    app.update();

    assert_eq!(
        count_purr_audio(&mut app),
        1,
        "exactly one audio player may exist"
    );
    assert!(app.world().resource::<PurrChannel>().player.is_some());
}

#[test]
fn test_drag_cycle_creates_then_destroys_the_player() {
    let mut app = build_test_app();
    app.add_systems(Update, (handle_drag_started, handle_drag_ended).chain());
    app.update();

    app.world_mut().send_event(DragStarted {
        position: Vec2::new(210.0, 380.0),
    });
    app.update();
    assert_eq!(count_purr_audio(&mut app), 1);
    assert_eq!(
        app.world().resource::<MascotState>().mode,
        MascotMode::Purring
    );

    app.world_mut().send_event(DragEnded);
    app.update();
    app.update(); // let the despawn command apply
    assert_eq!(count_purr_audio(&mut app), 0);
    assert_eq!(app.world().resource::<MascotState>().mode, MascotMode::Idle);

    // Stop with no player is a no-op.
    app.world_mut().send_event(DragEnded);
    app.update();
    assert_eq!(count_purr_audio(&mut app), 0);
    assert_eq!(app.world().resource::<MascotState>().mode, MascotMode::Idle);
}

#[test]
fn test_tap_exits_purring_without_starting_a_pose() {
    let mut app = build_test_app();
    app.add_systems(
        Update,
        (handle_tap_gestures, handle_drag_started, handle_thought_requests).chain(),
    );
    app.update();

    app.world_mut().send_event(DragStarted {
        position: Vec2::new(210.0, 380.0),
    });
    app.update();

    tap(&mut app);
    app.update();
    app.update();

    let state = app.world().resource::<MascotState>();
    assert_eq!(state.mode, MascotMode::Idle, "tap short-circuits purring");
    assert_eq!(state.pose, MascotPose::Seated, "no pose animation may start");
    assert_eq!(count_purr_audio(&mut app), 0);
}

#[test]
fn test_purr_switch_forces_and_releases_purring() {
    let mut app = build_test_app();
    app.add_systems(
        Update,
        (handle_drag_started, handle_drag_ended, sync_purr_switch).chain(),
    );
    app.update();

    app.world_mut().resource_mut::<PurrSwitch>().0 = true;
    app.update();
    assert_eq!(
        app.world().resource::<MascotState>().mode,
        MascotMode::Purring
    );
    assert_eq!(count_purr_audio(&mut app), 1);

    // Drag-end while the switch holds: purring stays.
    app.world_mut().send_event(DragEnded);
    app.update();
    assert_eq!(
        app.world().resource::<MascotState>().mode,
        MascotMode::Purring
    );
    assert_eq!(count_purr_audio(&mut app), 1);

    app.world_mut().resource_mut::<PurrSwitch>().0 = false;
    app.update();
    app.update();
    assert_eq!(app.world().resource::<MascotState>().mode, MascotMode::Idle);
    assert_eq!(count_purr_audio(&mut app), 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Blinking
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_blink_fires_while_idle_and_skips_while_busy() {
    let mut app = build_test_app();
    app.add_systems(Update, (tick_blink_schedule, tick_blink_resets).chain());
    app.insert_resource(BlinkSchedule {
        timer: Timer::from_seconds(5.0, TimerMode::Once),
    });
    app.update();

    // Busy cycle: schedule fires, blink is skipped, loop stays armed.
    app.world_mut().resource_mut::<MascotState>().mode = MascotMode::Purring;
    expire_blink_schedule(&mut app);
    {
        let state = app.world().resource::<MascotState>();
        assert_ne!(state.pose, MascotPose::Blink, "busy cycles must be skipped");
        let schedule = app.world().resource::<BlinkSchedule>();
        let remaining = schedule.timer.duration().as_secs_f32();
        assert!(
            (BLINK_INTERVAL_MIN_SECS..=BLINK_INTERVAL_MAX_SECS).contains(&remaining),
            "the schedule must re-arm with a fresh interval"
        );
        assert!(!schedule.timer.finished());
    }

    // Idle cycle: blink happens, then the hold expires back to Seated.
    app.world_mut().resource_mut::<MascotState>().mode = MascotMode::Idle;
    expire_blink_schedule(&mut app);
    assert_eq!(
        app.world().resource::<MascotState>().pose,
        MascotPose::Blink
    );

    expire_blink_resets(&mut app);
    let state = app.world().resource::<MascotState>();
    assert_eq!(state.pose, MascotPose::Seated);
    assert_eq!(state.mode, MascotMode::Idle);
}

// ─────────────────────────────────────────────────────────────────────────────
// Thoughts
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_thought_swap_picks_a_different_thought() {
    let mut app = build_test_app();
    app.add_plugins(DataPlugin);
    app.add_systems(Update, (handle_thought_requests, advance_thought_swap).chain());
    app.update();
    app.update();

    app.world_mut().send_event(ThoughtRequested);
    app.update();
    let first = app.world().resource::<BubbleState>().text.clone();
    assert!(!first.is_empty());

    // Second request fades the bubble out first…
    app.world_mut().send_event(ThoughtRequested);
    app.update();
    assert!(app.world().resource::<BubbleState>().swap.is_some());

    // …then the swap elapses and a different thought appears.
    {
        let mut bubble = app.world_mut().resource_mut::<BubbleState>();
        if let Some(timer) = bubble.swap.as_mut() {
            timer.set_elapsed(Duration::from_secs_f32(THOUGHT_FADE_OUT_SECS));
        }
    }
    app.update();

    let bubble = app.world().resource::<BubbleState>();
    assert!(bubble.swap.is_none());
    assert!(bubble.visible);
    assert_ne!(bubble.text, first, "the previous thought must not repeat");
}

// ─────────────────────────────────────────────────────────────────────────────
// Particles
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_particle_count_never_exceeds_the_cap() {
    let mut app = build_test_app();
    app.add_systems(Update, (emit_particles, animate_particles).chain());
    app.world_mut().spawn(ParticleEmitter::new(EmitterKind::Hearts));
    app.update();

    for _ in 0..(MAX_PARTICLES_PER_EMITTER + 10) {
        {
            let mut query = app.world_mut().query::<&mut ParticleEmitter>();
            let world = app.world_mut();
            for mut emitter in query.iter_mut(world) {
                let duration = emitter.timer.duration();
                emitter.timer.set_elapsed(duration);
            }
        }
        app.update();
        assert!(
            count_particles(&mut app) <= MAX_PARTICLES_PER_EMITTER,
            "live particles exceeded the cap"
        );
    }

    assert_eq!(count_particles(&mut app), MAX_PARTICLES_PER_EMITTER);

    // Eviction is oldest-first: the survivors are the newest sequences.
    let mut query = app.world_mut().query::<&EffectParticle>();
    let min_seq = query.iter(app.world()).map(|p| p.seq).min().unwrap();
    assert_eq!(min_seq as usize, 10 + 1, "the oldest particles must go first");
}

// ─────────────────────────────────────────────────────────────────────────────
// Quiz flow
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_quiz_session_flow_ends_in_a_reward() {
    let mut app = build_test_app();
    app.add_plugins(DataPlugin);
    app.add_plugins(QuizPlugin);
    app.update();
    app.update();

    set_state(&mut app, AppState::Content);
    set_state(&mut app, AppState::Quiz);
    app.update();

    assert_eq!(
        app.world().resource::<QuizSession>().total(),
        3,
        "a session presents exactly 3 questions"
    );

    for _ in 0..3 {
        app.world_mut()
            .send_event(UiActionEvent(UiAction::SelectOption(1)));
        app.update();
        assert!(app.world().resource::<QuizSession>().has_answered);

        app.world_mut()
            .send_event(UiActionEvent(UiAction::AdvanceQuiz));
        app.update();
    }

    let session = app.world().resource::<QuizSession>();
    assert!(session.completed, "answering all three completes the session");

    app.update(); // let the reward insert apply
    let reward = app.world().resource::<RewardChoice>();
    assert!(
        REWARD_IMAGES.contains(&reward.image),
        "reward must come from the fixed 5-image set"
    );

    // Back returns to the content screen and tears the session down.
    app.world_mut()
        .send_event(UiActionEvent(UiAction::BackToContent));
    app.update();
    app.update();
    assert_eq!(
        app.world().resource::<State<AppState>>().get(),
        &AppState::Content
    );
    assert!(app.world().get_resource::<QuizSession>().is_none());
    assert!(app.world().get_resource::<RewardChoice>().is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Theme
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_theme_selection_recolors_the_background() {
    let mut app = build_test_app();
    app.add_plugins(ThemePlugin);
    app.update();

    app.world_mut()
        .resource_mut::<BackgroundTheme>()
        .set_preset(ThemePreset::PastelPink);
    app.update();

    let clear_color = app.world().resource::<ClearColor>();
    assert_eq!(clear_color.0, ThemePreset::PastelPink.color());

    // The selection sticks until changed again.
    app.update();
    let clear_color = app.world().resource::<ClearColor>();
    assert_eq!(clear_color.0, ThemePreset::PastelPink.color());
}

// ─────────────────────────────────────────────────────────────────────────────
// Teardown
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_leaving_the_content_screen_cancels_everything() {
    let mut app = build_test_app();
    app.add_plugins(DataPlugin);
    app.add_plugins(MascotPlugin);
    app.update();
    app.update();

    set_state(&mut app, AppState::Content);

    app.world_mut().send_event(DragStarted {
        position: Vec2::new(210.0, 380.0),
    });
    app.update();
    assert_eq!(count_purr_audio(&mut app), 1);
    assert!(app.world().contains_resource::<BlinkSchedule>());

    set_state(&mut app, AppState::Gallery);
    app.update();

    assert_eq!(count_purr_audio(&mut app), 0, "teardown must stop audio");
    assert!(
        !app.world().contains_resource::<BlinkSchedule>(),
        "teardown must cancel the blink loop"
    );
    let state = app.world().resource::<MascotState>();
    assert_eq!(state.mode, MascotMode::Idle);
    assert_eq!(state.pose, MascotPose::Seated);

    let mut resets = app
        .world_mut()
        .query_filtered::<Entity, With<PoseReset>>();
    assert_eq!(resets.iter(app.world()).count(), 0);
}
