//! Particle overlays: hearts and stars.
//!
//! Two instances of the same emitter pattern, differing only in tuning.
//! While its toggle is on, an emitter spawns one glyph per interval at a
//! uniformly random offset over the mascot, holds at most 20 live
//! particles (oldest evicted first), and each particle animates to its
//! end state over its fade duration before despawning. Hiding an effect
//! or leaving the screen removes the emitter and every live particle, so
//! no timer outlives its owner.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

const Z_PARTICLES: f32 = 1.0;

// ─────────────────────────────────────────────────────────────────────────────
// Tuning
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmitterKind {
    Hearts,
    Stars,
}

#[derive(Debug, Clone)]
pub struct EmitterSpec {
    pub interval_secs: f32,
    pub fade_secs: f32,
    pub glyph: &'static str,
    pub color: Color,
    pub size_range: (f32, f32),
    pub x_range: (f32, f32),
    pub y_range: (f32, f32),
    /// Upward drift over the full fade.
    pub rise: f32,
    pub end_scale: f32,
    pub spin_degrees: f32,
}

impl EmitterKind {
    pub fn spec(self) -> EmitterSpec {
        match self {
            EmitterKind::Hearts => EmitterSpec {
                interval_secs: 0.3,
                fade_secs: 2.0,
                glyph: "\u{2665}",
                color: Color::srgb(0.95, 0.4, 0.55),
                size_range: (20.0, 40.0),
                x_range: (-120.0, 120.0),
                y_range: (-150.0, 150.0),
                rise: 50.0,
                end_scale: 1.5,
                spin_degrees: 0.0,
            },
            EmitterKind::Stars => EmitterSpec {
                interval_secs: 0.25,
                fade_secs: 1.8,
                glyph: "\u{2605}",
                color: Color::srgb(0.98, 0.85, 0.35),
                size_range: (18.0, 35.0),
                x_range: (-120.0, 120.0),
                y_range: (-150.0, 150.0),
                rise: 0.0,
                end_scale: 0.3,
                spin_degrees: 360.0,
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Components
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Component, Debug)]
pub struct ParticleEmitter {
    pub kind: EmitterKind,
    pub timer: Timer,
    /// Monotonic sequence for oldest-first eviction.
    pub spawned: u64,
}

impl ParticleEmitter {
    pub fn new(kind: EmitterKind) -> Self {
        Self {
            kind,
            timer: Timer::from_seconds(kind.spec().interval_secs, TimerMode::Repeating),
            spawned: 0,
        }
    }
}

#[derive(Component, Debug)]
pub struct EffectParticle {
    pub kind: EmitterKind,
    pub seq: u64,
    pub age: Timer,
    pub origin: Vec2,
}

/// Picks the oldest particle (lowest sequence number) for eviction.
pub fn oldest_particle(particles: impl Iterator<Item = (Entity, u64)>) -> Option<Entity> {
    particles.min_by_key(|(_, seq)| *seq).map(|(entity, _)| entity)
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

/// Keeps one emitter entity alive per enabled toggle, and removes the
/// emitter plus all its particles the moment its toggle turns off.
pub fn sync_emitters(
    mut commands: Commands,
    toggles: Res<EffectToggles>,
    emitters: Query<(Entity, &ParticleEmitter)>,
    particles: Query<(Entity, &EffectParticle)>,
) {
    for (kind, enabled) in [
        (EmitterKind::Hearts, toggles.hearts),
        (EmitterKind::Stars, toggles.stars),
    ] {
        let existing = emitters.iter().find(|(_, e)| e.kind == kind);
        match (enabled, existing) {
            (true, None) => {
                commands.spawn(ParticleEmitter::new(kind));
            }
            (false, Some((entity, _))) => {
                if let Some(mut ec) = commands.get_entity(entity) {
                    ec.despawn();
                }
                for (particle_entity, particle) in particles.iter() {
                    if particle.kind == kind {
                        if let Some(mut ec) = commands.get_entity(particle_entity) {
                            ec.despawn();
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

/// Ticks each emitter and spawns one particle per elapsed interval,
/// evicting the oldest live particle first when the cap is reached.
pub fn emit_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut emitters: Query<&mut ParticleEmitter>,
    particles: Query<(Entity, &EffectParticle)>,
) {
    for mut emitter in emitters.iter_mut() {
        emitter.timer.tick(time.delta());
        if !emitter.timer.just_finished() {
            continue;
        }

        let kind = emitter.kind;
        let spec = kind.spec();

        let live: Vec<(Entity, u64)> = particles
            .iter()
            .filter(|(_, p)| p.kind == kind)
            .map(|(entity, p)| (entity, p.seq))
            .collect();
        if live.len() >= MAX_PARTICLES_PER_EMITTER {
            if let Some(entity) = oldest_particle(live.into_iter()) {
                if let Some(mut ec) = commands.get_entity(entity) {
                    ec.despawn();
                }
            }
        }

        let mut rng = rand::thread_rng();
        let origin = Vec2::new(
            rng.gen_range(spec.x_range.0..=spec.x_range.1),
            rng.gen_range(spec.y_range.0..=spec.y_range.1),
        );
        let size = rng.gen_range(spec.size_range.0..=spec.size_range.1);

        emitter.spawned += 1;
        commands.spawn((
            EffectParticle {
                kind,
                seq: emitter.spawned,
                age: Timer::from_seconds(spec.fade_secs, TimerMode::Once),
                origin,
            },
            Text2d::new(spec.glyph),
            TextFont {
                font_size: size,
                ..default()
            },
            TextColor(spec.color),
            Transform::from_translation(origin.extend(Z_PARTICLES)),
        ));
    }
}

/// Eases each particle toward its end state and despawns it when its
/// fade elapses.
pub fn animate_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut particles: Query<(Entity, &mut EffectParticle, &mut Transform, &mut TextColor)>,
) {
    for (entity, mut particle, mut transform, mut color) in particles.iter_mut() {
        particle.age.tick(time.delta());
        if particle.age.finished() {
            if let Some(mut ec) = commands.get_entity(entity) {
                ec.despawn();
            }
            continue;
        }

        let spec = particle.kind.spec();
        let progress = particle.age.elapsed_secs() / spec.fade_secs;
        // Smoothstep: gentle in and out, close enough for both curves.
        let eased = progress * progress * (3.0 - 2.0 * progress);

        transform.translation.y = particle.origin.y + spec.rise * eased;
        transform.scale = Vec3::splat(1.0 + (spec.end_scale - 1.0) * eased);
        transform.rotation = Quat::from_rotation_z((spec.spin_degrees * eased).to_radians());
        color.0 = color.0.with_alpha(1.0 - eased);
    }
}

/// Removes every emitter and particle unconditionally (screen exit).
pub fn cleanup_all_particles(
    mut commands: Commands,
    mut toggles: ResMut<EffectToggles>,
    emitters: Query<Entity, With<ParticleEmitter>>,
    particles: Query<Entity, With<EffectParticle>>,
) {
    *toggles = EffectToggles::default();
    for entity in emitters.iter().chain(particles.iter()) {
        if let Some(mut ec) = commands.get_entity(entity) {
            ec.despawn();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct ParticlesPlugin;

impl Plugin for ParticlesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EffectToggles>()
            .add_systems(
                Update,
                (sync_emitters, emit_particles, animate_particles)
                    .chain()
                    .run_if(in_state(AppState::Content)),
            )
            .add_systems(OnExit(AppState::Content), cleanup_all_particles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emitter_tuning_matches_design() {
        let hearts = EmitterKind::Hearts.spec();
        assert_eq!(hearts.interval_secs, 0.3);
        assert_eq!(hearts.fade_secs, 2.0);
        assert_eq!(hearts.rise, 50.0);
        assert_eq!(hearts.end_scale, 1.5);
        assert_eq!(hearts.spin_degrees, 0.0);

        let stars = EmitterKind::Stars.spec();
        assert_eq!(stars.interval_secs, 0.25);
        assert_eq!(stars.fade_secs, 1.8);
        assert_eq!(stars.rise, 0.0);
        assert_eq!(stars.end_scale, 0.3);
        assert_eq!(stars.spin_degrees, 360.0);
    }

    #[test]
    fn test_oldest_particle_wins_eviction() {
        let a = Entity::from_raw(1);
        let b = Entity::from_raw(2);
        let c = Entity::from_raw(3);
        let evicted = oldest_particle(vec![(a, 7), (b, 3), (c, 12)].into_iter());
        assert_eq!(evicted, Some(b));
    }

    #[test]
    fn test_oldest_particle_on_empty_set() {
        assert_eq!(oldest_particle(std::iter::empty()), None);
    }
}
