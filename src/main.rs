mod shared;
mod input;
mod data;
mod theme;
mod mascot;
mod particles;
mod quiz;
mod ui;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Kitty Calm".into(),
                resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        // App state
        .init_state::<AppState>()
        // Shared resources
        .init_resource::<ThoughtBank>()
        .init_resource::<QuizBank>()
        .init_resource::<BackgroundTheme>()
        // Events
        .add_event::<TapGesture>()
        .add_event::<DragStarted>()
        .add_event::<DragEnded>()
        .add_event::<ThoughtRequested>()
        .add_event::<HapticPulse>()
        .add_event::<AudioInterrupted>()
        .add_event::<PlaySfxEvent>()
        .add_event::<UiActionEvent>()
        // Domain plugins
        .add_plugins(data::DataPlugin)
        .add_plugins(input::InputPlugin)
        .add_plugins(theme::ThemePlugin)
        .add_plugins(mascot::MascotPlugin)
        .add_plugins(particles::ParticlesPlugin)
        .add_plugins(quiz::QuizPlugin)
        .add_plugins(ui::UiPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
