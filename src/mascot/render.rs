//! Mascot sprite sync.
//!
//! The renderer is a pure reader of `MascotState`: every frame it picks
//! the displayed pose (purring overrides whatever pose is stored), swaps
//! the sprite image, and applies scale/rotation plus the idle breathing
//! oscillation.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::shared::*;
use super::Mascot;

/// Full breath (in and out) takes 5.6 s, easing 1.0 → 1.03 → 1.0.
const BREATH_PERIOD_SECS: f32 = 5.6;

/// Cached image handles for every pose.
#[derive(Resource, Default)]
pub struct MascotSpriteData {
    pub loaded: bool,
    pub images: Vec<(MascotPose, Handle<Image>)>,
}

impl MascotSpriteData {
    pub fn handle_for(&self, pose: MascotPose) -> Option<Handle<Image>> {
        self.images
            .iter()
            .find(|(p, _)| *p == pose)
            .map(|(_, handle)| handle.clone())
    }
}

/// Idle breathing phase accumulator.
#[derive(Component, Debug, Default)]
pub struct Breathing {
    pub elapsed: f32,
}

impl Breathing {
    pub fn scale(&self) -> f32 {
        1.0 + (BREATHING_SCALE - 1.0) * 0.5 * (1.0 - (self.elapsed * TAU / BREATH_PERIOD_SECS).cos())
    }
}

/// On-screen mascot height for a given window height.
pub fn kitten_height(window_height: f32) -> f32 {
    (window_height * KITTEN_HEIGHT_FRACTION).min(KITTEN_MAX_HEIGHT)
}

pub fn load_mascot_sprites(
    asset_server: Option<Res<AssetServer>>,
    mut data: ResMut<MascotSpriteData>,
) {
    if data.loaded {
        return;
    }
    let Some(server) = asset_server else {
        return;
    };

    data.images = [
        MascotPose::Seated,
        MascotPose::Shy,
        MascotPose::Surprised,
        MascotPose::Sleeping,
        MascotPose::WavingHand,
        MascotPose::Happy,
        MascotPose::HelloWave,
        MascotPose::WavingHands,
        MascotPose::Blink,
        MascotPose::Purring,
    ]
    .into_iter()
    .map(|pose| (pose, server.load(pose.asset_path())))
    .collect();
    data.loaded = true;
}

pub fn spawn_mascot(mut commands: Commands, data: Res<MascotSpriteData>, windows: Query<&Window>) {
    let window_height = windows
        .get_single()
        .map(|w| w.height())
        .unwrap_or(SCREEN_HEIGHT);
    let height = kitten_height(window_height) * MascotPose::Seated.height_multiplier();

    commands.spawn((
        Mascot,
        Breathing::default(),
        Sprite {
            image: data.handle_for(MascotPose::Seated).unwrap_or_default(),
            custom_size: Some(Vec2::splat(height)),
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
    ));
}

pub fn breathe(time: Res<Time>, mut query: Query<&mut Breathing>) {
    for mut breathing in query.iter_mut() {
        breathing.elapsed += time.delta_secs();
    }
}

pub fn sync_mascot_sprite(
    state: Res<MascotState>,
    data: Res<MascotSpriteData>,
    windows: Query<&Window>,
    mut mascots: Query<(&mut Sprite, &mut Transform, &Breathing), With<Mascot>>,
) {
    let Ok((mut sprite, mut transform, breathing)) = mascots.get_single_mut() else {
        return;
    };

    let displayed = if state.mode == MascotMode::Purring {
        MascotPose::Purring
    } else {
        state.pose
    };

    if let Some(handle) = data.handle_for(displayed) {
        if sprite.image != handle {
            sprite.image = handle;
        }
    }

    let window_height = windows
        .get_single()
        .map(|w| w.height())
        .unwrap_or(SCREEN_HEIGHT);
    let height = kitten_height(window_height) * displayed.height_multiplier();
    sprite.custom_size = Some(Vec2::splat(height));

    let breath = if state.mode == MascotMode::Idle {
        breathing.scale()
    } else {
        1.0
    };
    transform.scale = Vec3::splat(state.scale * breath);
    transform.rotation = Quat::from_rotation_z(state.rotation_degrees.to_radians());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kitten_height_is_capped() {
        assert_eq!(kitten_height(400.0), 240.0);
        assert_eq!(kitten_height(2000.0), KITTEN_MAX_HEIGHT);
    }

    #[test]
    fn test_breathing_oscillates_within_bounds() {
        let mut breathing = Breathing::default();
        let mut max_seen: f32 = 1.0;
        for _ in 0..560 {
            breathing.elapsed += 0.01;
            let scale = breathing.scale();
            assert!((1.0..=BREATHING_SCALE + 1e-4).contains(&scale));
            max_seen = max_seen.max(scale);
        }
        assert!(max_seen > 1.02, "breath should approach the peak scale");
    }
}
