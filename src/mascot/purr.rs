//! Purr audio lifecycle and drag-driven purring.
//!
//! Exactly one audio player slot exists (`PurrChannel`). Start is
//! create-if-absent, stop is despawn-if-present; both are idempotent so
//! overlapping gestures and the external switch can never double-start
//! the loop or error on a redundant stop. A missing asset server (e.g.
//! headless builds) degrades to a silent, tracked player.

use bevy::audio::Volume;
use bevy::prelude::*;

use crate::shared::*;

/// The single audio-player slot.
#[derive(Resource, Debug, Default)]
pub struct PurrChannel {
    pub player: Option<Entity>,
}

/// Marker for the looped purr audio entity.
#[derive(Component, Debug)]
pub struct PurrAudio;

pub fn start_purring(
    commands: &mut Commands,
    channel: &mut PurrChannel,
    asset_server: Option<&AssetServer>,
) {
    if channel.player.is_some() {
        return;
    }

    let mut entity = commands.spawn(PurrAudio);
    match asset_server {
        Some(server) => {
            entity.insert((
                AudioPlayer::new(server.load(PURR_AUDIO_PATH)),
                PlaybackSettings::LOOP.with_volume(Volume::new(PURR_VOLUME)),
            ));
            info!("[Mascot] Purr loop started");
        }
        None => {
            warn!("[Mascot] Audio backend unavailable, purring silently");
        }
    }
    channel.player = Some(entity.id());
}

pub fn stop_purring(commands: &mut Commands, channel: &mut PurrChannel) {
    let Some(entity) = channel.player.take() else {
        return;
    };
    if let Some(mut ec) = commands.get_entity(entity) {
        ec.despawn_recursive();
    }
    info!("[Mascot] Purr loop stopped");
}

// ─────────────────────────────────────────────────────────────────────────────
// Gesture systems
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_drag_started(
    mut commands: Commands,
    mut drags: EventReader<DragStarted>,
    mut state: ResMut<MascotState>,
    mut channel: ResMut<PurrChannel>,
    asset_server: Option<Res<AssetServer>>,
    mut haptics: EventWriter<HapticPulse>,
) {
    for _drag in drags.read() {
        if state.enter_purring() {
            start_purring(&mut commands, &mut channel, asset_server.as_deref());
            haptics.send(HapticPulse);
        }
    }
}

pub fn handle_drag_ended(
    mut commands: Commands,
    mut drags: EventReader<DragEnded>,
    mut state: ResMut<MascotState>,
    mut channel: ResMut<PurrChannel>,
    purr_switch: Res<PurrSwitch>,
) {
    for _drag in drags.read() {
        // The external switch keeps the purr alive past the drag.
        if purr_switch.0 {
            continue;
        }
        if state.mode == MascotMode::Purring {
            stop_purring(&mut commands, &mut channel);
            state.exit_purring();
        }
    }
}

/// Applies changes to the external purr switch: on forces purring the
/// same way a drag does (without the haptic), off always stops.
pub fn sync_purr_switch(
    mut commands: Commands,
    purr_switch: Res<PurrSwitch>,
    mut state: ResMut<MascotState>,
    mut channel: ResMut<PurrChannel>,
    asset_server: Option<Res<AssetServer>>,
) {
    if !purr_switch.is_changed() || purr_switch.is_added() {
        return;
    }

    if purr_switch.0 {
        if state.enter_purring() {
            start_purring(&mut commands, &mut channel, asset_server.as_deref());
        }
    } else if state.mode == MascotMode::Purring {
        stop_purring(&mut commands, &mut channel);
        state.exit_purring();
    }
}

/// An interrupted audio session stops playback and leaves the mode
/// consistent. Never surfaces to the user.
pub fn handle_audio_interrupted(
    mut commands: Commands,
    mut interruptions: EventReader<AudioInterrupted>,
    mut state: ResMut<MascotState>,
    mut channel: ResMut<PurrChannel>,
    mut purr_switch: ResMut<PurrSwitch>,
) {
    for _event in interruptions.read() {
        warn!("[Mascot] Audio session interrupted");
        stop_purring(&mut commands, &mut channel);
        purr_switch.0 = false;
        if state.mode == MascotMode::Purring {
            state.exit_purring();
        }
    }
}

/// Boundary consumer for the platform feedback channel. Fire-and-forget;
/// desktop builds just log the pulse.
pub fn handle_haptic_pulses(mut pulses: EventReader<HapticPulse>) {
    for _pulse in pulses.read() {
        debug!("[Mascot] Haptic pulse");
    }
}
