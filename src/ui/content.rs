//! Content screen — the mascot's home.
//!
//! The mascot itself is a world-space sprite (spawned by the mascot
//! plugin); this screen only contributes the UI chrome: the title, the
//! effect/purr toggle row, and the navigation buttons.

use bevy::prelude::*;

use crate::shared::*;
use super::widgets::*;

#[derive(Component)]
pub struct ContentRoot;

pub fn spawn_content_screen(mut commands: Commands, font_handle: Res<UiFontHandle>) {
    let font = font_handle.0.clone();

    commands
        .spawn((
            ContentRoot,
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
            // Title bar
            parent
                .spawn((
                    Node {
                        padding: UiRect::top(Val::Px(18.0)),
                        ..default()
                    },
                    PickingBehavior::IGNORE,
                ))
                .with_children(|bar| {
                    spawn_title(bar, "Kitty Calm", &font, 20.0);
                });

            // Bottom controls
            parent
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(16.0),
                        padding: UiRect {
                            left: Val::Px(20.0),
                            right: Val::Px(20.0),
                            bottom: Val::Px(40.0),
                            ..default()
                        },
                        ..default()
                    },
                    PickingBehavior::IGNORE,
                ))
                .with_children(|controls| {
                    // Effect toggles
                    controls
                        .spawn((
                            Node {
                                column_gap: Val::Px(12.0),
                                ..default()
                            },
                            PickingBehavior::IGNORE,
                        ))
                        .with_children(|row| {
                            spawn_toggle_button(row, UiAction::ToggleHearts, "Hearts", &font);
                            spawn_toggle_button(row, UiAction::ToggleStars, "Stars", &font);
                            spawn_toggle_button(row, UiAction::TogglePurr, "Purr", &font);
                        });

                    // Navigation buttons
                    controls
                        .spawn((
                            Node {
                                width: Val::Px(SCREEN_WIDTH - 40.0),
                                column_gap: Val::Px(16.0),
                                ..default()
                            },
                            PickingBehavior::IGNORE,
                        ))
                        .with_children(|row| {
                            spawn_primary_button(row, UiAction::OpenQuiz, "Quiz", &font);
                            spawn_primary_button(row, UiAction::OpenGallery, "Gallery", &font);
                            spawn_primary_button(row, UiAction::OpenSettings, "Background", &font);
                        });
                });
        });
}

pub fn despawn_content_screen(mut commands: Commands, query: Query<Entity, With<ContentRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

/// Consumes content-screen actions: navigation plus the three toggles.
pub fn handle_content_actions(
    mut actions: EventReader<UiActionEvent>,
    mut toggles: ResMut<EffectToggles>,
    mut purr_switch: ResMut<PurrSwitch>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for UiActionEvent(action) in actions.read() {
        match action {
            UiAction::OpenQuiz => next_state.set(AppState::Quiz),
            UiAction::OpenGallery => next_state.set(AppState::Gallery),
            UiAction::OpenSettings => next_state.set(AppState::Settings),
            UiAction::ToggleHearts => toggles.hearts = !toggles.hearts,
            UiAction::ToggleStars => toggles.stars = !toggles.stars,
            UiAction::TogglePurr => purr_switch.0 = !purr_switch.0,
            _ => {}
        }
    }
}

/// Keeps the toggle pills in sync with their backing state: filled blue
/// with white text while on, white with blue text while off.
pub fn update_toggle_visuals(
    toggles: Res<EffectToggles>,
    purr_switch: Res<PurrSwitch>,
    mut buttons: Query<(&UiAction, &mut BackgroundColor, &Children), With<ToggleButton>>,
    mut texts: Query<&mut TextColor>,
) {
    for (action, mut background, children) in buttons.iter_mut() {
        let on = match action {
            UiAction::ToggleHearts => toggles.hearts,
            UiAction::ToggleStars => toggles.stars,
            UiAction::TogglePurr => purr_switch.0,
            _ => continue,
        };

        background.0 = if on { button_blue() } else { Color::WHITE };
        for &child in children.iter() {
            if let Ok(mut color) = texts.get_mut(child) {
                color.0 = if on { Color::WHITE } else { button_blue_light() };
            }
        }
    }
}
