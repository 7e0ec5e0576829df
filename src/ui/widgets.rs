//! Shared widget builders.
//!
//! Buttons carry a `UiAction` component and pointer observers that turn
//! clicks into `UiActionEvent` messages — screens consume explicit events
//! instead of capturing state in click closures.

use bevy::prelude::*;

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// RESOURCES
// ═══════════════════════════════════════════════════════════════════════

/// The rounded UI font, loaded once at Startup. Falls back to the default
/// font if the asset is missing.
#[derive(Resource, Debug, Clone)]
pub struct UiFontHandle(pub Handle<Font>);

pub fn load_ui_font(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(UiFontHandle(asset_server.load("fonts/rounded.ttf")));
}

// ═══════════════════════════════════════════════════════════════════════
// PALETTE
// ═══════════════════════════════════════════════════════════════════════

pub fn text_primary() -> Color {
    Color::srgb(0.2, 0.2, 0.2)
}

pub fn text_secondary() -> Color {
    Color::srgb(0.4, 0.4, 0.4)
}

pub fn button_blue() -> Color {
    Color::srgb(0.75, 0.84, 0.96)
}

pub fn button_blue_dark() -> Color {
    Color::srgb(0.68, 0.80, 0.94)
}

pub fn button_blue_light() -> Color {
    Color::srgb(0.55, 0.70, 0.88)
}

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

/// Marker for the solid blue action buttons (hover tint applies).
#[derive(Component, Debug)]
pub struct PrimaryButton;

/// Marker for the pill-shaped toggle buttons on the content screen.
#[derive(Component, Debug)]
pub struct ToggleButton;

// ═══════════════════════════════════════════════════════════════════════
// BUILDERS
// ═══════════════════════════════════════════════════════════════════════

/// Solid rounded action button.
pub fn spawn_primary_button(
    parent: &mut ChildBuilder,
    action: UiAction,
    label: &str,
    font: &Handle<Font>,
) -> Entity {
    parent
        .spawn((
            action,
            PrimaryButton,
            Button,
            Node {
                height: Val::Px(52.0),
                flex_grow: 1.0,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                padding: UiRect::horizontal(Val::Px(16.0)),
                ..default()
            },
            BorderRadius::all(Val::Px(16.0)),
            BackgroundColor(button_blue()),
        ))
        .observe(on_button_over)
        .observe(on_button_out)
        .observe(on_button_click)
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font: font.clone(),
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                PickingBehavior::IGNORE,
            ));
        })
        .id()
}

/// Pill toggle. Its on/off look is driven per-frame by the content
/// screen, so no hover observers here.
pub fn spawn_toggle_button(
    parent: &mut ChildBuilder,
    action: UiAction,
    label: &str,
    font: &Handle<Font>,
) -> Entity {
    parent
        .spawn((
            action,
            ToggleButton,
            Button,
            Node {
                height: Val::Px(36.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                padding: UiRect::horizontal(Val::Px(16.0)),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderRadius::all(Val::Px(18.0)),
            BorderColor(button_blue()),
            BackgroundColor(Color::WHITE),
        ))
        .observe(on_button_click)
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font: font.clone(),
                    font_size: 14.0,
                    ..default()
                },
                TextColor(button_blue_light()),
                PickingBehavior::IGNORE,
            ));
        })
        .id()
}

/// Large screen title.
pub fn spawn_title(parent: &mut ChildBuilder, text: &str, font: &Handle<Font>, font_size: f32) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font: font.clone(),
            font_size,
            ..default()
        },
        TextColor(text_primary()),
        PickingBehavior::IGNORE,
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// POINTER OBSERVERS
// ═══════════════════════════════════════════════════════════════════════

pub(crate) fn on_button_click(
    trigger: Trigger<Pointer<Click>>,
    query: Query<&UiAction>,
    mut actions: EventWriter<UiActionEvent>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    if let Ok(action) = query.get(trigger.entity()) {
        actions.send(UiActionEvent(*action));
        sfx.send(PlaySfxEvent {
            sfx_id: "ui_select".to_string(),
        });
    }
}

fn on_button_over(
    trigger: Trigger<Pointer<Over>>,
    mut query: Query<&mut BackgroundColor, With<PrimaryButton>>,
) {
    if let Ok(mut background) = query.get_mut(trigger.entity()) {
        background.0 = button_blue_dark();
    }
}

fn on_button_out(
    trigger: Trigger<Pointer<Out>>,
    mut query: Query<&mut BackgroundColor, With<PrimaryButton>>,
) {
    if let Ok(mut background) = query.get_mut(trigger.entity()) {
        background.0 = button_blue();
    }
}
