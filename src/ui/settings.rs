//! Settings screen — the background color picker.
//!
//! Five named pastel rows with a color swatch; picking one applies the
//! theme immediately and returns to the content screen, matching a
//! dismiss-on-select sheet.

use bevy::prelude::*;

use crate::shared::*;
use super::widgets::*;

#[derive(Component)]
pub struct SettingsRoot;

pub fn spawn_settings_screen(
    mut commands: Commands,
    font_handle: Res<UiFontHandle>,
    theme: Res<BackgroundTheme>,
) {
    let font = font_handle.0.clone();
    let active = theme.preset;

    commands
        .spawn((
            SettingsRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(14.0),
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            BackgroundColor(Color::srgb(0.96, 0.94, 0.90)),
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        padding: UiRect::vertical(Val::Px(20.0)),
                        ..default()
                    },
                    PickingBehavior::IGNORE,
                ))
                .with_children(|bar| {
                    spawn_title(bar, "Choose Background", &font, 24.0);
                });

            for preset in ThemePreset::ALL {
                spawn_theme_row(parent, preset, active == Some(preset), &font);
            }

            parent
                .spawn((
                    Node {
                        width: Val::Px(SCREEN_WIDTH - 80.0),
                        margin: UiRect::top(Val::Px(20.0)),
                        ..default()
                    },
                    PickingBehavior::IGNORE,
                ))
                .with_children(|row| {
                    spawn_primary_button(row, UiAction::CloseSettings, "Done", &font);
                });
        });
}

fn spawn_theme_row(
    parent: &mut ChildBuilder,
    preset: ThemePreset,
    active: bool,
    font: &Handle<Font>,
) {
    parent
        .spawn((
            UiAction::PickTheme(preset),
            Button,
            Node {
                width: Val::Percent(100.0),
                align_items: AlignItems::Center,
                column_gap: Val::Px(14.0),
                padding: UiRect::all(Val::Px(12.0)),
                ..default()
            },
            BorderRadius::all(Val::Px(12.0)),
            BackgroundColor(Color::WHITE),
        ))
        .observe(on_button_click)
        .with_children(|row| {
            // Color swatch
            row.spawn((
                Node {
                    width: Val::Px(40.0),
                    height: Val::Px(40.0),
                    border: UiRect::all(Val::Px(3.0)),
                    ..default()
                },
                BorderRadius::all(Val::Percent(50.0)),
                BorderColor(Color::WHITE),
                BackgroundColor(preset.color()),
                PickingBehavior::IGNORE,
            ));

            row.spawn((
                Text::new(preset.label()),
                TextFont {
                    font: font.clone(),
                    font_size: 18.0,
                    ..default()
                },
                TextColor(text_primary()),
                PickingBehavior::IGNORE,
            ));

            if active {
                row.spawn((
                    Text::new("\u{2713}"),
                    TextFont {
                        font: font.clone(),
                        font_size: 22.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.4, 0.6, 0.9)),
                    PickingBehavior::IGNORE,
                ));
            }
        });
}

pub fn despawn_settings_screen(mut commands: Commands, query: Query<Entity, With<SettingsRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

pub fn handle_settings_actions(
    mut actions: EventReader<UiActionEvent>,
    mut theme: ResMut<BackgroundTheme>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for UiActionEvent(action) in actions.read() {
        match action {
            UiAction::PickTheme(preset) => {
                theme.set_preset(*preset);
                next_state.set(AppState::Content);
            }
            UiAction::CloseSettings => next_state.set(AppState::Content),
            _ => {}
        }
    }
}
