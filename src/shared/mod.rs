//! Shared components, resources, events, and states for Kitty Calm.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// APP STATE — top-level screen machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum AppState {
    #[default]
    Loading,
    Splash,
    Content,
    Gallery,
    Quiz,
    Settings,
}

// ═══════════════════════════════════════════════════════════════════════
// MASCOT — poses, interaction mode, visual state
// ═══════════════════════════════════════════════════════════════════════

/// Closed set of mascot poses. Each maps to a sprite asset and a
/// relative display-height multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MascotPose {
    Seated,
    Shy,
    Surprised,
    Sleeping,
    WavingHand,
    Happy,
    HelloWave,
    WavingHands,
    Blink,
    Purring,
}

impl MascotPose {
    pub fn asset_path(self) -> &'static str {
        match self {
            MascotPose::Seated => "sprites/kitten.png",
            MascotPose::Shy => "sprites/shy.png",
            MascotPose::Surprised => "sprites/surprised.png",
            MascotPose::Sleeping => "sprites/sleeping.png",
            MascotPose::WavingHand => "sprites/waving_hand.png",
            MascotPose::Happy => "sprites/happy.png",
            MascotPose::HelloWave => "sprites/hello_wave.png",
            MascotPose::WavingHands => "sprites/waving_hands.png",
            MascotPose::Blink => "sprites/blink.png",
            MascotPose::Purring => "sprites/purring.png",
        }
    }

    /// How much taller/shorter a pose renders relative to the base height.
    pub fn height_multiplier(self) -> f32 {
        match self {
            MascotPose::Seated => 1.13,
            _ => 1.0,
        }
    }
}

/// Top-level interaction mode. Exactly one active at a time;
/// purring takes precedence over everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MascotMode {
    #[default]
    Idle,
    Interacting,
    Purring,
}

/// The mascot's visual state, owned exclusively by the interaction state
/// machine and read by the renderer every frame.
///
/// `generation` increments on every transition that supersedes scheduled
/// continuations. A continuation (pose reset, blink reset) captures the
/// generation at schedule time and must no-op when it no longer matches,
/// so a stale timer can never clobber newer state.
#[derive(Resource, Debug, Clone)]
pub struct MascotState {
    pub mode: MascotMode,
    pub pose: MascotPose,
    pub scale: f32,
    pub rotation_degrees: f32,
    pub generation: u64,
}

impl Default for MascotState {
    fn default() -> Self {
        Self {
            mode: MascotMode::Idle,
            pose: MascotPose::Seated,
            scale: 1.0,
            rotation_degrees: 0.0,
            generation: 0,
        }
    }
}

impl MascotState {
    /// Invalidates every scheduled continuation. Returns the new generation
    /// for continuations scheduled by the transition that called this.
    pub fn supersede(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Tap transition: Idle → Interacting with a transient pose.
    /// Returns the generation the dwell continuation must carry.
    pub fn begin_interaction(&mut self, pose: MascotPose, rotation_degrees: f32) -> u64 {
        self.mode = MascotMode::Interacting;
        self.pose = pose;
        self.scale = TAP_SCALE;
        self.rotation_degrees = rotation_degrees;
        self.supersede()
    }

    /// Dwell elapsed: restore the resting visuals (mode stays Interacting
    /// until the settle delay elapses).
    pub fn settle(&mut self) {
        self.pose = MascotPose::Seated;
        self.scale = 1.0;
        self.rotation_degrees = 0.0;
    }

    /// Settle elapsed: the interaction is over.
    pub fn finish_interaction(&mut self) {
        self.mode = MascotMode::Idle;
    }

    /// Enter purring. Returns false (no-op) if already purring.
    pub fn enter_purring(&mut self) -> bool {
        if self.mode == MascotMode::Purring {
            return false;
        }
        self.mode = MascotMode::Purring;
        self.settle();
        self.supersede();
        true
    }

    /// Exit purring back to Idle and invalidate pending continuations.
    pub fn exit_purring(&mut self) {
        self.mode = MascotMode::Idle;
        self.settle();
        self.supersede();
    }
}

/// External purr toggle set by the sibling control on the content screen.
/// Forces enter/exit of purring the same way a drag does.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PurrSwitch(pub bool);

/// Which particle overlays are currently shown.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct EffectToggles {
    pub hearts: bool,
    pub stars: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// THEME — process-wide background store
// ═══════════════════════════════════════════════════════════════════════

/// The five named pastel presets offered by the background picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemePreset {
    PastelGreen,
    PastelPink,
    PastelBlue,
    PastelBeige,
    PastelYellow,
}

impl ThemePreset {
    pub const ALL: [ThemePreset; 5] = [
        ThemePreset::PastelGreen,
        ThemePreset::PastelPink,
        ThemePreset::PastelBlue,
        ThemePreset::PastelBeige,
        ThemePreset::PastelYellow,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ThemePreset::PastelGreen => "Pastel Green",
            ThemePreset::PastelPink => "Pastel Pink",
            ThemePreset::PastelBlue => "Pastel Blue",
            ThemePreset::PastelBeige => "Pastel Beige",
            ThemePreset::PastelYellow => "Pastel Yellow",
        }
    }

    pub fn color(self) -> Color {
        match self {
            ThemePreset::PastelGreen => Color::srgb(0.88, 0.95, 0.88),
            ThemePreset::PastelPink => Color::srgb(0.98, 0.89, 0.94),
            ThemePreset::PastelBlue => Color::srgb(0.90, 0.94, 0.99),
            ThemePreset::PastelBeige => Color::srgb(0.97, 0.94, 0.88),
            ThemePreset::PastelYellow => Color::srgb(0.99, 0.97, 0.86),
        }
    }
}

/// Current background color, read by every screen, written only by the
/// settings picker. `preset` is None until the user picks one.
#[derive(Resource, Debug, Clone)]
pub struct BackgroundTheme {
    pub preset: Option<ThemePreset>,
    pub color: Color,
}

impl Default for BackgroundTheme {
    fn default() -> Self {
        Self {
            preset: None,
            color: Color::srgb(0.98, 0.97, 0.92),
        }
    }
}

impl BackgroundTheme {
    pub fn set_preset(&mut self, preset: ThemePreset) {
        self.preset = Some(preset);
        self.color = preset.color();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// STATIC BANKS — loaded from data
// ═══════════════════════════════════════════════════════════════════════

/// Fixed bank of kitten thoughts.
#[derive(Resource, Debug, Clone, Default)]
pub struct ThoughtBank {
    pub thoughts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestionDef {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub fact: String,
}

/// Fixed bank of quiz questions; a session samples 3 without replacement.
#[derive(Resource, Debug, Clone, Default)]
pub struct QuizBank {
    pub questions: Vec<QuizQuestionDef>,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// A completed tap on the mascot, in window coordinates.
#[derive(Event, Debug, Clone)]
pub struct TapGesture {
    pub position: Vec2,
}

/// The pointer started dragging over the mascot.
#[derive(Event, Debug, Clone)]
pub struct DragStarted {
    pub position: Vec2,
}

/// The pointer was released after a drag.
#[derive(Event, Debug, Clone)]
pub struct DragEnded;

/// Request a (new) thought in the bubble.
#[derive(Event, Debug, Clone)]
pub struct ThoughtRequested;

/// One discrete feedback pulse, fired at drag-start. Fire-and-forget.
#[derive(Event, Debug, Clone)]
pub struct HapticPulse;

/// External audio interruption signal (e.g. from the platform session).
#[derive(Event, Debug, Clone)]
pub struct AudioInterrupted;

#[derive(Event, Debug, Clone)]
pub struct PlaySfxEvent {
    pub sfx_id: String,
}

/// Something a UI button can do. Carried on the button entity and emitted
/// as `UiActionEvent` by the shared pointer observers, so screens consume
/// explicit messages instead of capturing state in click closures.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    OpenQuiz,
    OpenGallery,
    OpenSettings,
    ToggleHearts,
    ToggleStars,
    TogglePurr,
    NextGalleryImage,
    BackToContent,
    SelectOption(u8),
    AdvanceQuiz,
    PickTheme(ThemePreset),
    CloseSettings,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct UiActionEvent(pub UiAction);

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const SCREEN_WIDTH: f32 = 420.0;
pub const SCREEN_HEIGHT: f32 = 760.0;

/// The mascot fills 60% of the viewport height, capped at 360 px.
pub const KITTEN_HEIGHT_FRACTION: f32 = 0.6;
pub const KITTEN_MAX_HEIGHT: f32 = 360.0;

pub const TAP_SCALE: f32 = 1.08;
pub const TAP_ROTATION_DEGREES: f32 = 6.0;
pub const TAP_DWELL_SECS: f32 = 1.2;
pub const TAP_SETTLE_SECS: f32 = 0.3;
pub const BREATHING_SCALE: f32 = 1.03;

pub const BLINK_HOLD_SECS: f32 = 0.22;
pub const BLINK_INTERVAL_MIN_SECS: f32 = 4.0;
pub const BLINK_INTERVAL_MAX_SECS: f32 = 8.0;

pub const THOUGHT_FADE_OUT_SECS: f32 = 0.2;
pub const THOUGHT_FADE_IN_SECS: f32 = 0.3;
/// Bubble sits above the mascot at this fraction of the kitten height.
pub const THOUGHT_BUBBLE_OFFSET_FRACTION: f32 = 0.75;

pub const PURR_AUDIO_PATH: &str = "audio/purr.ogg";
pub const PURR_VOLUME: f32 = 0.5;

pub const MAX_PARTICLES_PER_EMITTER: usize = 20;

pub const SPLASH_HOLD_SECS: f32 = 2.0;

/// Pointer movement beyond this (px) while held turns a press into a drag.
pub const DRAG_MIN_DISTANCE: f32 = 8.0;

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════
