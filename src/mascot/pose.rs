//! Tap pose selection.
//!
//! A tap plays one of seven transient poses. Seated is the resting pose,
//! Blink belongs to the idle scheduler, and Purring is driven by the
//! purr mode, so none of those three are ever picked here.

use rand::Rng;

use crate::shared::MascotPose;

pub const TAP_POSES: [MascotPose; 7] = [
    MascotPose::Shy,
    MascotPose::Happy,
    MascotPose::Surprised,
    MascotPose::WavingHand,
    MascotPose::HelloWave,
    MascotPose::Sleeping,
    MascotPose::WavingHands,
];

pub fn random_tap_pose(rng: &mut impl Rng) -> MascotPose {
    TAP_POSES[rng.gen_range(0..TAP_POSES.len())]
}
