//! UI sound effects — one-shot audio sources that auto-despawn.

use bevy::prelude::*;

use crate::shared::*;

/// Maps SFX IDs (sent by other domains) to actual audio file paths.
fn sfx_path(sfx_id: &str) -> Option<&'static str> {
    match sfx_id {
        "ui_select" => Some("audio/sfx/ui_select.ogg"),
        "ui_toggle" => Some("audio/sfx/ui_toggle.ogg"),
        _ => None,
    }
}

/// Listen for PlaySfxEvent and spawn one-shot audio sources. Unknown IDs
/// and headless builds degrade to silence.
pub fn handle_play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    mut commands: Commands,
    asset_server: Option<Res<AssetServer>>,
) {
    for event in events.read() {
        let Some(server) = asset_server.as_deref() else {
            continue;
        };
        if let Some(path) = sfx_path(&event.sfx_id) {
            commands.spawn((
                AudioPlayer::new(server.load(path)),
                PlaybackSettings::DESPAWN,
            ));
        }
    }
}
