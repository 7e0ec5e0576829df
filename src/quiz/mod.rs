//! Quiz engine.
//!
//! A session samples three questions from the seven-question bank
//! (shuffle-and-take, no repeats), walks through them one at a time, and
//! ends in a terminal reward state. The first option selection locks a
//! question; advancing requires an answer. The reward image is chosen
//! once, when the result is first reached, and stays stable for the life
//! of the result view.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::shared::*;

pub const QUESTIONS_PER_SESSION: usize = 3;

pub const REWARD_IMAGES: [&str; 5] = [
    "gallery/kitten_01.png",
    "gallery/kitten_02.png",
    "gallery/kitten_03.png",
    "gallery/kitten_04.png",
    "gallery/kitten_05.png",
];

pub fn random_reward(rng: &mut impl Rng) -> &'static str {
    REWARD_IMAGES[rng.gen_range(0..REWARD_IMAGES.len())]
}

// ─────────────────────────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Resource, Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestionDef>,
    current_index: usize,
    pub selected_index: Option<usize>,
    pub has_answered: bool,
    pub completed: bool,
}

impl QuizSession {
    /// Samples without replacement: shuffle the bank, take the first three.
    pub fn sample(bank: &QuizBank, rng: &mut impl Rng) -> Self {
        let mut questions = bank.questions.clone();
        questions.shuffle(rng);
        questions.truncate(QUESTIONS_PER_SESSION);
        Self {
            questions,
            current_index: 0,
            selected_index: None,
            has_answered: false,
            completed: false,
        }
    }

    pub fn current(&self) -> Option<&QuizQuestionDef> {
        self.questions.get(self.current_index)
    }

    pub fn question_number(&self) -> usize {
        self.current_index + 1
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    /// First selection locks the question; later taps are ignored.
    /// Returns whether the selection was accepted.
    pub fn select(&mut self, index: usize) -> bool {
        if self.completed || self.has_answered {
            return false;
        }
        let Some(question) = self.current() else {
            return false;
        };
        if index >= question.options.len() {
            return false;
        }
        self.selected_index = Some(index);
        self.has_answered = true;
        true
    }

    pub fn selected_correct(&self) -> bool {
        match (self.current(), self.selected_index) {
            (Some(question), Some(selected)) => selected == question.correct_index,
            _ => false,
        }
    }

    /// Moves to the next question, or into the terminal reward state
    /// after the last. Requires the current question to be answered.
    /// Returns whether anything changed.
    pub fn advance(&mut self) -> bool {
        if self.completed || !self.has_answered {
            return false;
        }
        if self.is_last() {
            self.completed = true;
        } else {
            self.current_index += 1;
            self.selected_index = None;
            self.has_answered = false;
        }
        true
    }
}

/// The reward image, decided once when the result is reached.
#[derive(Resource, Debug, Clone)]
pub struct RewardChoice {
    pub image: &'static str,
}

// ─────────────────────────────────────────────────────────────────────────────
// Plugin
// ─────────────────────────────────────────────────────────────────────────────

pub struct QuizPlugin;

impl Plugin for QuizPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Quiz), start_session)
            .add_systems(OnExit(AppState::Quiz), end_session)
            .add_systems(
                Update,
                handle_quiz_actions.run_if(in_state(AppState::Quiz)),
            );
    }
}

pub fn start_session(mut commands: Commands, bank: Res<QuizBank>) {
    let mut rng = rand::thread_rng();
    let session = QuizSession::sample(&bank, &mut rng);
    info!("[Quiz] Session started with {} questions", session.total());
    commands.insert_resource(session);
}

pub fn end_session(mut commands: Commands) {
    commands.remove_resource::<QuizSession>();
    commands.remove_resource::<RewardChoice>();
}

pub fn handle_quiz_actions(
    mut commands: Commands,
    mut actions: EventReader<UiActionEvent>,
    session: Option<ResMut<QuizSession>>,
    reward: Option<Res<RewardChoice>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(mut session) = session else {
        return;
    };

    for UiActionEvent(action) in actions.read() {
        match action {
            UiAction::SelectOption(index) => {
                session.select(*index as usize);
            }
            UiAction::AdvanceQuiz => {
                if session.advance() && session.completed && reward.is_none() {
                    let mut rng = rand::thread_rng();
                    let image = random_reward(&mut rng);
                    info!("[Quiz] Session complete, reward: {image}");
                    commands.insert_resource(RewardChoice { image });
                }
            }
            UiAction::BackToContent => {
                next_state.set(AppState::Content);
            }
            _ => {}
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
