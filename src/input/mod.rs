//! Pointer input — the single point where raw mouse/touch input becomes
//! gesture events for the mascot.
//!
//! A press over the mascot region starts tracking; movement beyond
//! `DRAG_MIN_DISTANCE` while held promotes the press to a drag
//! (`DragStarted`, once), and release emits either `TapGesture` or
//! `DragEnded`. Everything downstream consumes these explicit events,
//! never the hardware state.

use bevy::prelude::*;

use crate::shared::*;

/// Tracks the in-flight press. Reset on release and on screen exit so a
/// press held across a screen change cannot leak a gesture.
#[derive(Resource, Debug, Clone, Default)]
pub struct PointerTracker {
    pub press_position: Option<Vec2>,
    pub dragging: bool,
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerTracker>()
            .add_systems(
                PreUpdate,
                track_pointer_gestures.run_if(in_state(AppState::Content)),
            )
            .add_systems(OnExit(AppState::Content), reset_tracker);
    }
}

/// True when `position` (window coordinates) falls inside the mascot's
/// on-screen rectangle: centered, 60% of the viewport height capped at
/// 360 px, roughly square.
pub fn over_mascot(window_size: Vec2, position: Vec2) -> bool {
    let kitten_height = (window_size.y * KITTEN_HEIGHT_FRACTION).min(KITTEN_MAX_HEIGHT);
    let half = kitten_height / 2.0;
    let center = window_size / 2.0;
    (position.x - center.x).abs() <= half && (position.y - center.y).abs() <= half
}

/// True when the held pointer has moved far enough to count as a drag.
pub fn exceeds_drag_threshold(press: Vec2, current: Vec2) -> bool {
    press.distance(current) > DRAG_MIN_DISTANCE
}

fn track_pointer_gestures(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut tracker: ResMut<PointerTracker>,
    mut taps: EventWriter<TapGesture>,
    mut drag_starts: EventWriter<DragStarted>,
    mut drag_ends: EventWriter<DragEnded>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let window_size = Vec2::new(window.width(), window.height());
    let cursor = window.cursor_position();

    if mouse.just_pressed(MouseButton::Left) {
        if let Some(position) = cursor {
            if over_mascot(window_size, position) {
                tracker.press_position = Some(position);
                tracker.dragging = false;
            }
        }
    }

    if mouse.pressed(MouseButton::Left) && !tracker.dragging {
        if let (Some(press), Some(position)) = (tracker.press_position, cursor) {
            if exceeds_drag_threshold(press, position) {
                tracker.dragging = true;
                drag_starts.send(DragStarted { position });
            }
        }
    }

    if mouse.just_released(MouseButton::Left) {
        if tracker.dragging {
            drag_ends.send(DragEnded);
        } else if let Some(position) = tracker.press_position {
            taps.send(TapGesture { position });
        }
        tracker.press_position = None;
        tracker.dragging = false;
    }
}

fn reset_tracker(mut tracker: ResMut<PointerTracker>) {
    *tracker = PointerTracker::default();
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Vec2 = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);

    #[test]
    fn test_center_press_is_over_mascot() {
        assert!(over_mascot(WINDOW, WINDOW / 2.0));
    }

    #[test]
    fn test_bottom_button_row_is_not_over_mascot() {
        // Bottom 10% of the window, where the nav buttons live.
        let position = Vec2::new(WINDOW.x / 2.0, WINDOW.y * 0.95);
        assert!(!over_mascot(WINDOW, position));
    }

    #[test]
    fn test_mascot_rect_is_capped_on_tall_windows() {
        let tall = Vec2::new(420.0, 2000.0);
        // 60% of 2000 would be 1200, but the cap is 360: half extent 180.
        let inside = Vec2::new(210.0, 1000.0 + 179.0);
        let outside = Vec2::new(210.0, 1000.0 + 181.0);
        assert!(over_mascot(tall, inside));
        assert!(!over_mascot(tall, outside));
    }

    #[test]
    fn test_drag_threshold() {
        let press = Vec2::new(100.0, 100.0);
        assert!(!exceeds_drag_threshold(press, Vec2::new(104.0, 100.0)));
        assert!(exceeds_drag_threshold(press, Vec2::new(112.0, 100.0)));
    }
}
