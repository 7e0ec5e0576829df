//! Thought selection and bubble cadence.
//!
//! `ThoughtRequested` swaps the bubble: if one is showing, it fades out
//! first (0.2 s), then a new thought is picked and fades in; otherwise
//! the pick happens immediately. Only one swap is ever in flight — a new
//! request replaces any pending swap timer wholesale. Selection never
//! repeats the immediately previous thought while the bank has more than
//! one entry; `ThoughtStream.last` is the only cross-call memory.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::shared::*;

/// Cross-call memory for thought selection.
#[derive(Resource, Debug, Clone, Default)]
pub struct ThoughtStream {
    pub last: Option<String>,
}

/// Logical bubble state, mirrored into the UI by `animate_thought_bubble`.
#[derive(Resource, Debug, Clone, Default)]
pub struct BubbleState {
    pub visible: bool,
    pub text: String,
    /// Pending fade-out before the next pick. Replacing it supersedes
    /// the previous swap.
    pub swap: Option<Timer>,
}

/// Marker for the bubble UI root.
#[derive(Component, Debug)]
pub struct ThoughtBubbleUi;

/// Marker for the bubble's text child.
#[derive(Component, Debug)]
pub struct ThoughtBubbleText;

/// Alpha tween on the bubble root.
#[derive(Component, Debug)]
pub struct BubbleFade {
    pub alpha: f32,
}

pub fn random_thought(bank: &[String], excluding: Option<&str>, rng: &mut impl Rng) -> String {
    let available: Vec<&String> = bank
        .iter()
        .filter(|t| Some(t.as_str()) != excluding)
        .collect();
    match available.choose(rng) {
        Some(thought) => (*thought).clone(),
        // Single-entry bank excluded itself; repetition beats silence.
        None => excluding.unwrap_or("I deserve a nap.").to_string(),
    }
}

fn pick_into_bubble(bank: &ThoughtBank, stream: &mut ThoughtStream, bubble: &mut BubbleState) {
    let mut rng = rand::thread_rng();
    let thought = random_thought(&bank.thoughts, stream.last.as_deref(), &mut rng);
    stream.last = Some(thought.clone());
    bubble.text = thought;
    bubble.visible = true;
}

// ─────────────────────────────────────────────────────────────────────────────
// Systems
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_thought_requests(
    mut requests: EventReader<ThoughtRequested>,
    bank: Res<ThoughtBank>,
    mut stream: ResMut<ThoughtStream>,
    mut bubble: ResMut<BubbleState>,
) {
    for _request in requests.read() {
        if bubble.visible {
            bubble.swap = Some(Timer::from_seconds(THOUGHT_FADE_OUT_SECS, TimerMode::Once));
        } else {
            pick_into_bubble(&bank, &mut stream, &mut bubble);
        }
    }
}

pub fn advance_thought_swap(
    time: Res<Time>,
    bank: Res<ThoughtBank>,
    mut stream: ResMut<ThoughtStream>,
    mut bubble: ResMut<BubbleState>,
) {
    let finished = match bubble.swap.as_mut() {
        Some(timer) => {
            timer.tick(time.delta());
            timer.finished()
        }
        None => false,
    };

    if finished {
        bubble.swap = None;
        pick_into_bubble(&bank, &mut stream, &mut bubble);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// UI
// ─────────────────────────────────────────────────────────────────────────────

pub fn spawn_thought_bubble(mut commands: Commands) {
    commands
        .spawn((
            ThoughtBubbleUi,
            BubbleFade { alpha: 0.0 },
            Node {
                position_type: PositionType::Absolute,
                top: Val::Percent(10.0),
                left: Val::Percent(50.0),
                width: Val::Px(280.0),
                margin: UiRect {
                    left: Val::Px(-140.0),
                    ..default()
                },
                padding: UiRect::all(Val::Px(18.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BorderRadius::all(Val::Px(28.0)),
            BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.0)),
            Visibility::Hidden,
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                ThoughtBubbleText,
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgba(0.0, 0.0, 0.0, 0.0)),
                TextLayout::new_with_justify(JustifyText::Center),
                PickingBehavior::IGNORE,
            ));
        });
}

/// Mirrors `BubbleState` into the UI: fades toward the current target
/// alpha (out while a swap is pending, in once a thought is showing) and
/// keeps the text child up to date.
pub fn animate_thought_bubble(
    time: Res<Time>,
    bubble: Res<BubbleState>,
    mut roots: Query<
        (&mut BubbleFade, &mut BackgroundColor, &mut Visibility, &Children),
        With<ThoughtBubbleUi>,
    >,
    mut texts: Query<(&mut Text, &mut TextColor), With<ThoughtBubbleText>>,
) {
    let Ok((mut fade, mut background, mut visibility, children)) = roots.get_single_mut() else {
        return;
    };

    let (target, secs) = if bubble.swap.is_some() || !bubble.visible {
        (0.0, THOUGHT_FADE_OUT_SECS)
    } else {
        (1.0, THOUGHT_FADE_IN_SECS)
    };

    let step = time.delta_secs() / secs;
    if fade.alpha < target {
        fade.alpha = (fade.alpha + step).min(target);
    } else {
        fade.alpha = (fade.alpha - step).max(target);
    }

    *visibility = if fade.alpha <= 0.01 && target == 0.0 {
        Visibility::Hidden
    } else {
        Visibility::Visible
    };

    background.0 = Color::srgba(1.0, 1.0, 1.0, fade.alpha);

    for &child in children.iter() {
        if let Ok((mut text, mut color)) = texts.get_mut(child) {
            if text.0 != bubble.text {
                text.0 = bubble.text.clone();
            }
            color.0 = Color::srgba(0.0, 0.0, 0.0, 0.8 * fade.alpha);
        }
    }
}
