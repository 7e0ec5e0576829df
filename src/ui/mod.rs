//! Screen shell — splash, content chrome, gallery, quiz screen, and the
//! background picker, plus the shared widget builders and UI sfx.

pub mod widgets;
pub mod splash;
pub mod content;
pub mod gallery;
pub mod quiz_screen;
pub mod settings;
pub mod audio;

use bevy::prelude::*;

use crate::shared::*;

pub use widgets::UiFontHandle;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, widgets::load_ui_font);

        // ─── UI SFX — listens in every state ───
        app.add_systems(Update, audio::handle_play_sfx);

        // ─── SPLASH ───
        app.add_systems(OnEnter(AppState::Splash), splash::spawn_splash);
        app.add_systems(OnExit(AppState::Splash), splash::despawn_splash);
        app.add_systems(
            Update,
            (splash::animate_splash_logo, splash::advance_past_splash)
                .run_if(in_state(AppState::Splash)),
        );

        // ─── CONTENT ───
        app.add_systems(OnEnter(AppState::Content), content::spawn_content_screen);
        app.add_systems(OnExit(AppState::Content), content::despawn_content_screen);
        app.add_systems(
            Update,
            (content::handle_content_actions, content::update_toggle_visuals)
                .run_if(in_state(AppState::Content)),
        );

        // ─── GALLERY ───
        app.add_systems(OnEnter(AppState::Gallery), gallery::spawn_gallery_screen);
        app.add_systems(OnExit(AppState::Gallery), gallery::despawn_gallery_screen);
        app.add_systems(
            Update,
            (gallery::handle_gallery_actions, gallery::advance_gallery_fade)
                .run_if(in_state(AppState::Gallery)),
        );

        // ─── QUIZ SCREEN ───
        app.add_systems(OnEnter(AppState::Quiz), quiz_screen::spawn_quiz_screen);
        app.add_systems(OnExit(AppState::Quiz), quiz_screen::despawn_quiz_screen);
        app.add_systems(
            Update,
            quiz_screen::refresh_quiz_panel.run_if(in_state(AppState::Quiz)),
        );

        // ─── SETTINGS ───
        app.add_systems(OnEnter(AppState::Settings), settings::spawn_settings_screen);
        app.add_systems(OnExit(AppState::Settings), settings::despawn_settings_screen);
        app.add_systems(
            Update,
            settings::handle_settings_actions.run_if(in_state(AppState::Settings)),
        );
    }
}
