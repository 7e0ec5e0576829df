//! Idle blinking — a repeating suspend-wake loop.
//!
//! The schedule fires at a uniform random interval in [4 s, 8 s] and
//! always re-arms itself with a fresh interval, whether or not the blink
//! actually happened. Busy cycles (mode not Idle) are skipped without
//! cancelling the loop; only screen teardown removes the schedule.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;
use super::BlinkReset;

/// The stored, cancellable handle for the blink loop. Removed on teardown.
#[derive(Resource, Debug)]
pub struct BlinkSchedule {
    pub timer: Timer,
}

pub fn random_blink_interval(rng: &mut impl Rng) -> f32 {
    rng.gen_range(BLINK_INTERVAL_MIN_SECS..=BLINK_INTERVAL_MAX_SECS)
}

pub fn start_blink_schedule(mut commands: Commands) {
    let mut rng = rand::thread_rng();
    commands.insert_resource(BlinkSchedule {
        timer: Timer::from_seconds(random_blink_interval(&mut rng), TimerMode::Once),
    });
}

pub fn tick_blink_schedule(
    mut commands: Commands,
    time: Res<Time>,
    schedule: Option<ResMut<BlinkSchedule>>,
    mut state: ResMut<MascotState>,
) {
    let Some(mut schedule) = schedule else {
        return;
    };

    schedule.timer.tick(time.delta());
    if !schedule.timer.finished() {
        return;
    }

    // Re-arm first so a skipped cycle still keeps the loop alive.
    let mut rng = rand::thread_rng();
    schedule.timer = Timer::from_seconds(random_blink_interval(&mut rng), TimerMode::Once);

    if state.mode != MascotMode::Idle {
        return;
    }

    state.pose = MascotPose::Blink;
    commands.spawn(BlinkReset {
        timer: Timer::from_seconds(BLINK_HOLD_SECS, TimerMode::Once),
        generation: state.generation,
    });
}

/// Restores the seated pose after the blink hold, unless a newer
/// transition claimed the state in the meantime.
pub fn tick_blink_resets(
    mut commands: Commands,
    time: Res<Time>,
    mut state: ResMut<MascotState>,
    mut resets: Query<(Entity, &mut BlinkReset)>,
) {
    for (entity, mut reset) in resets.iter_mut() {
        reset.timer.tick(time.delta());
        if !reset.timer.finished() {
            continue;
        }

        let still_relevant = reset.generation == state.generation
            && state.mode == MascotMode::Idle
            && state.pose == MascotPose::Blink;
        if still_relevant {
            state.pose = MascotPose::Seated;
        }

        if let Some(mut ec) = commands.get_entity(entity) {
            ec.despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blink_interval_stays_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..500 {
            let interval = random_blink_interval(&mut rng);
            assert!((BLINK_INTERVAL_MIN_SECS..=BLINK_INTERVAL_MAX_SECS).contains(&interval));
        }
    }

    #[test]
    fn test_blink_intervals_vary() {
        let mut rng = rand::thread_rng();
        let first = random_blink_interval(&mut rng);
        let varied = (0..100).any(|_| (random_blink_interval(&mut rng) - first).abs() > 0.01);
        assert!(varied, "intervals should not be constant");
    }
}
