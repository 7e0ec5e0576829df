//! Gallery screen — cycles the mascot pose images with a fade swap.

use bevy::prelude::*;

use crate::shared::*;
use super::widgets::*;

/// The poses shown in the gallery. Blink and Purring are transient
/// in-interaction frames, not gallery material.
pub const GALLERY_POSES: [MascotPose; 8] = [
    MascotPose::Seated,
    MascotPose::Shy,
    MascotPose::Surprised,
    MascotPose::Sleeping,
    MascotPose::WavingHand,
    MascotPose::Happy,
    MascotPose::HelloWave,
    MascotPose::WavingHands,
];

const IMAGE_FADE_SECS: f32 = 0.3;

#[derive(Component)]
pub struct GalleryRoot;

#[derive(Component)]
pub struct GalleryImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    Out,
    In,
}

/// Current image index plus the in-flight fade swap, if any.
#[derive(Resource, Debug)]
pub struct GalleryState {
    pub index: usize,
    pub fade: Option<(Timer, FadePhase)>,
}

impl GalleryState {
    pub fn next_index(&self) -> usize {
        (self.index + 1) % GALLERY_POSES.len()
    }
}

pub fn spawn_gallery_screen(
    mut commands: Commands,
    font_handle: Res<UiFontHandle>,
    asset_server: Res<AssetServer>,
) {
    commands.insert_resource(GalleryState {
        index: 0,
        fade: None,
    });

    let font = font_handle.0.clone();

    commands
        .spawn((
            GalleryRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        padding: UiRect::top(Val::Px(20.0)),
                        ..default()
                    },
                    PickingBehavior::IGNORE,
                ))
                .with_children(|bar| {
                    spawn_title(bar, "Kitten Gallery", &font, 28.0);
                });

            parent.spawn((
                GalleryImage,
                Node {
                    width: Val::Px(320.0),
                    height: Val::Px(360.0),
                    ..default()
                },
                ImageNode {
                    image: asset_server.load(GALLERY_POSES[0].asset_path()),
                    ..default()
                },
                BorderRadius::all(Val::Px(20.0)),
                PickingBehavior::IGNORE,
            ));

            parent
                .spawn((
                    Node {
                        width: Val::Px(SCREEN_WIDTH - 80.0),
                        flex_direction: FlexDirection::Column,
                        row_gap: Val::Px(12.0),
                        padding: UiRect::bottom(Val::Px(40.0)),
                        ..default()
                    },
                    PickingBehavior::IGNORE,
                ))
                .with_children(|buttons| {
                    spawn_primary_button(
                        buttons,
                        UiAction::NextGalleryImage,
                        "Show Another Kitten",
                        &font,
                    );
                    spawn_primary_button(buttons, UiAction::BackToContent, "Back", &font);
                });
        });
}

pub fn despawn_gallery_screen(mut commands: Commands, query: Query<Entity, With<GalleryRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<GalleryState>();
}

pub fn handle_gallery_actions(
    mut actions: EventReader<UiActionEvent>,
    state: Option<ResMut<GalleryState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(mut state) = state else {
        return;
    };

    for UiActionEvent(action) in actions.read() {
        match action {
            UiAction::NextGalleryImage => {
                // Ignore taps while a swap is already running.
                if state.fade.is_none() {
                    state.fade = Some((
                        Timer::from_seconds(IMAGE_FADE_SECS, TimerMode::Once),
                        FadePhase::Out,
                    ));
                }
            }
            UiAction::BackToContent => next_state.set(AppState::Content),
            _ => {}
        }
    }
}

/// Drives the fade-out → swap → fade-in sequence.
pub fn advance_gallery_fade(
    time: Res<Time>,
    asset_server: Res<AssetServer>,
    state: Option<ResMut<GalleryState>>,
    mut images: Query<&mut ImageNode, With<GalleryImage>>,
) {
    let Some(mut state) = state else {
        return;
    };
    let Ok(mut image) = images.get_single_mut() else {
        return;
    };

    let (progress, finished, phase) = match state.fade.as_mut() {
        Some((timer, phase)) => {
            timer.tick(time.delta());
            let progress = (timer.elapsed_secs() / IMAGE_FADE_SECS).clamp(0.0, 1.0);
            (progress, timer.finished(), *phase)
        }
        None => {
            image.color = Color::WHITE;
            return;
        }
    };

    match phase {
        FadePhase::Out => {
            image.color = Color::srgba(1.0, 1.0, 1.0, 1.0 - progress);
            if finished {
                state.index = state.next_index();
                image.image = asset_server.load(GALLERY_POSES[state.index].asset_path());
                state.fade = Some((
                    Timer::from_seconds(IMAGE_FADE_SECS, TimerMode::Once),
                    FadePhase::In,
                ));
            }
        }
        FadePhase::In => {
            image.color = Color::srgba(1.0, 1.0, 1.0, progress);
            if finished {
                state.fade = None;
            }
        }
    }
}
