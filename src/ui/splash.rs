//! Splash screen — logo ease-in, then auto-advance to the content screen.

use bevy::prelude::*;

use crate::shared::*;

#[derive(Component)]
pub struct SplashRoot;

#[derive(Component, Debug, Default)]
pub struct SplashLogo {
    pub elapsed: f32,
}

#[derive(Resource, Debug)]
pub struct SplashTimer(pub Timer);

pub fn spawn_splash(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(SplashTimer(Timer::from_seconds(
        SPLASH_HOLD_SECS,
        TimerMode::Once,
    )));

    commands
        .spawn((
            SplashRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                SplashLogo::default(),
                Node {
                    width: Val::Px(280.0),
                    ..default()
                },
                ImageNode {
                    image: asset_server.load("ui/logo.png"),
                    color: Color::srgba(1.0, 1.0, 1.0, 0.0),
                    ..default()
                },
                Transform::from_scale(Vec3::splat(0.85)),
                PickingBehavior::IGNORE,
            ));
        });
}

pub fn despawn_splash(mut commands: Commands, query: Query<Entity, With<SplashRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<SplashTimer>();
}

/// Scale 0.85 → 1.0 and fade in over the first 0.8 s.
pub fn animate_splash_logo(
    time: Res<Time>,
    mut query: Query<(&mut SplashLogo, &mut Transform, &mut ImageNode)>,
) {
    for (mut logo, mut transform, mut image) in query.iter_mut() {
        logo.elapsed += time.delta_secs();
        let progress = (logo.elapsed / 0.8).clamp(0.0, 1.0);
        let eased = 1.0 - (1.0 - progress) * (1.0 - progress);
        transform.scale = Vec3::splat(0.85 + 0.15 * eased);
        image.color = Color::srgba(1.0, 1.0, 1.0, eased);
    }
}

pub fn advance_past_splash(
    time: Res<Time>,
    timer: Option<ResMut<SplashTimer>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(mut timer) = timer else {
        return;
    };
    timer.0.tick(time.delta());
    if timer.0.just_finished() {
        next_state.set(AppState::Content);
    }
}
