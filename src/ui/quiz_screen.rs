//! Quiz screen — question panel with locked-answer reveal, then the
//! reward view.
//!
//! The panel is rebuilt whenever the session changes (selection locked,
//! question advanced) or the reward lands, so the widget tree always
//! mirrors `QuizSession` instead of patching individual nodes.

use bevy::prelude::*;

use crate::quiz::{QuizSession, RewardChoice};
use crate::shared::*;
use super::widgets::*;

#[derive(Component)]
pub struct QuizRoot;

#[derive(Component)]
pub struct QuizPanel;

pub fn spawn_quiz_screen(mut commands: Commands, font_handle: Res<UiFontHandle>) {
    let font = font_handle.0.clone();

    commands
        .spawn((
            QuizRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        padding: UiRect::top(Val::Px(24.0)),
                        ..default()
                    },
                    PickingBehavior::IGNORE,
                ))
                .with_children(|bar| {
                    spawn_title(bar, "Cat Curious Quiz", &font, 26.0);
                });

            // Rebuilt by refresh_quiz_panel.
            parent.spawn((
                QuizPanel,
                Node {
                    width: Val::Percent(100.0),
                    flex_grow: 1.0,
                    flex_direction: FlexDirection::Column,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(16.0),
                    padding: UiRect::all(Val::Px(20.0)),
                    ..default()
                },
                PickingBehavior::IGNORE,
            ));
        });
}

pub fn despawn_quiz_screen(mut commands: Commands, query: Query<Entity, With<QuizRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

pub fn refresh_quiz_panel(
    mut commands: Commands,
    font_handle: Res<UiFontHandle>,
    session: Option<Res<QuizSession>>,
    reward: Option<Res<RewardChoice>>,
    asset_server: Res<AssetServer>,
    panels: Query<Entity, With<QuizPanel>>,
) {
    let Some(session) = session else {
        return;
    };
    let Ok(panel) = panels.get_single() else {
        return;
    };

    let reward_arrived = reward.as_ref().map(|r| r.is_added()).unwrap_or(false);
    if !session.is_changed() && !reward_arrived {
        return;
    }
    // The reward lands one frame after completion; wait for it so the
    // result view never appears without its image.
    if session.completed && reward.is_none() {
        return;
    }

    let font = font_handle.0.clone();
    let mut panel_ec = commands.entity(panel);
    panel_ec.despawn_descendants();

    if session.completed {
        let image = reward.as_ref().map(|r| r.image).unwrap_or(crate::quiz::REWARD_IMAGES[0]);
        build_result_view(&mut panel_ec, &font, &asset_server, image);
    } else {
        build_question_view(&mut panel_ec, &font, &session);
    }
}

fn build_question_view(panel: &mut EntityCommands, font: &Handle<Font>, session: &QuizSession) {
    let Some(question) = session.current().cloned() else {
        return;
    };
    let progress = format!(
        "Question {} of {}",
        session.question_number(),
        session.total()
    );
    let selected = session.selected_index;
    let answered = session.has_answered;
    let correct = session.selected_correct();
    let advance_label = if session.is_last() {
        "See my reward"
    } else {
        "Next question"
    };

    panel.with_children(|parent| {
        parent.spawn((
            Text::new(progress),
            TextFont {
                font: font.clone(),
                font_size: 16.0,
                ..default()
            },
            TextColor(text_secondary()),
            PickingBehavior::IGNORE,
        ));

        parent.spawn((
            Text::new(question.prompt.clone()),
            TextFont {
                font: font.clone(),
                font_size: 20.0,
                ..default()
            },
            TextColor(text_primary()),
            TextLayout::new_with_justify(JustifyText::Left),
            PickingBehavior::IGNORE,
        ));

        for (index, option) in question.options.iter().enumerate() {
            let is_correct = index == question.correct_index;
            let is_selected = selected == Some(index);

            let background = if answered {
                if is_correct {
                    Color::srgb(0.80, 0.93, 0.82)
                } else {
                    Color::WHITE
                }
            } else if is_selected {
                Color::srgb(0.90, 0.92, 0.96)
            } else {
                Color::WHITE
            };
            let foreground = if answered && is_correct {
                Color::srgb(0.12, 0.35, 0.20)
            } else {
                text_primary()
            };

            parent
                .spawn((
                    UiAction::SelectOption(index as u8),
                    Button,
                    Node {
                        width: Val::Percent(100.0),
                        padding: UiRect {
                            left: Val::Px(16.0),
                            right: Val::Px(16.0),
                            top: Val::Px(12.0),
                            bottom: Val::Px(12.0),
                        },
                        ..default()
                    },
                    BorderRadius::all(Val::Px(14.0)),
                    BackgroundColor(background),
                ))
                .observe(on_button_click)
                .with_children(|button| {
                    button.spawn((
                        Text::new(option.clone()),
                        TextFont {
                            font: font.clone(),
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(foreground),
                        PickingBehavior::IGNORE,
                    ));
                });
        }

        if answered {
            let verdict = if correct {
                "Paw-sitively right!"
            } else {
                "Nice try, tiny human."
            };
            parent.spawn((
                Text::new(verdict),
                TextFont {
                    font: font.clone(),
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.3, 0.4, 0.2)),
                PickingBehavior::IGNORE,
            ));
            parent.spawn((
                Text::new(question.fact.clone()),
                TextFont {
                    font: font.clone(),
                    font_size: 15.0,
                    ..default()
                },
                TextColor(Color::srgb(0.25, 0.25, 0.25)),
                TextLayout::new_with_justify(JustifyText::Center),
                PickingBehavior::IGNORE,
            ));
        }

        // Advance button: dimmed (and refused by the session) until the
        // current question has been answered.
        let advance_color = if answered {
            button_blue()
        } else {
            button_blue().with_alpha(0.5)
        };
        parent
            .spawn((
                UiAction::AdvanceQuiz,
                Button,
                Node {
                    width: Val::Px(SCREEN_WIDTH - 80.0),
                    height: Val::Px(52.0),
                    margin: UiRect::top(Val::Px(12.0)),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                BorderRadius::all(Val::Px(16.0)),
                BackgroundColor(advance_color),
            ))
            .observe(on_button_click)
            .with_children(|button| {
                button.spawn((
                    Text::new(advance_label),
                    TextFont {
                        font: font.clone(),
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                    PickingBehavior::IGNORE,
                ));
            });
    });
}

fn build_result_view(
    panel: &mut EntityCommands,
    font: &Handle<Font>,
    asset_server: &AssetServer,
    image: &'static str,
) {
    let reward = asset_server.load(image);
    panel.with_children(|parent| {
        parent.spawn((
            Text::new("Purr-fect effort!"),
            TextFont {
                font: font.clone(),
                font_size: 28.0,
                ..default()
            },
            TextColor(text_primary()),
            PickingBehavior::IGNORE,
        ));
        parent.spawn((
            Text::new("Here is a special kitten just for you."),
            TextFont {
                font: font.clone(),
                font_size: 17.0,
                ..default()
            },
            TextColor(Color::srgb(0.25, 0.25, 0.25)),
            PickingBehavior::IGNORE,
        ));
        parent.spawn((
            Node {
                width: Val::Px(260.0),
                height: Val::Px(320.0),
                margin: UiRect::vertical(Val::Px(16.0)),
                ..default()
            },
            ImageNode {
                image: reward,
                ..default()
            },
            BorderRadius::all(Val::Px(20.0)),
            PickingBehavior::IGNORE,
        ));
        parent
            .spawn((
                Node {
                    width: Val::Px(SCREEN_WIDTH - 80.0),
                    ..default()
                },
                PickingBehavior::IGNORE,
            ))
            .with_children(|row| {
                spawn_primary_button(row, UiAction::BackToContent, "Back to kitty", font);
            });
    });
}
