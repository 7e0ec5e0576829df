//! Background theme store.
//!
//! `BackgroundTheme` is the dependency-injected store: the settings
//! picker writes it, every screen reads it. This plugin mirrors the
//! current color into Bevy's `ClearColor` so the whole window background
//! follows the selection.

use bevy::prelude::*;

use crate::shared::*;

pub struct ThemePlugin;

impl Plugin for ThemePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BackgroundTheme>()
            .add_systems(Update, apply_background);
    }
}

fn apply_background(theme: Res<BackgroundTheme>, mut clear_color: ResMut<ClearColor>) {
    if !theme.is_changed() {
        return;
    }
    clear_color.0 = theme.color;
    if let Some(preset) = theme.preset {
        info!("[Theme] Background set to {}", preset.label());
    }
}
