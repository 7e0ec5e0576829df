//! Data layer — populates the static banks at app startup.
//!
//! This plugin runs in OnEnter(AppState::Loading), fills the thought and
//! quiz banks from the embedded RON documents, then transitions the app
//! into AppState::Splash.
//!
//! No other domain needs to seed these resources. All domain plugins can
//! safely read them once AppState has advanced past Loading.

use bevy::prelude::*;

use crate::shared::*;

const THOUGHTS_RON: &str = include_str!("thoughts.ron");
const QUESTIONS_RON: &str = include_str!("questions.ron");

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Loading), load_all_data);
    }
}

/// Single system that populates both banks and then transitions to Splash.
fn load_all_data(
    mut thought_bank: ResMut<ThoughtBank>,
    mut quiz_bank: ResMut<QuizBank>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    info!("[Data] Populating banks…");

    thought_bank.thoughts = parse_thoughts(THOUGHTS_RON);
    info!("  Thoughts loaded: {}", thought_bank.thoughts.len());

    quiz_bank.questions = parse_questions(QUESTIONS_RON);
    info!("  Quiz questions loaded: {}", quiz_bank.questions.len());

    next_state.set(AppState::Splash);
}

/// Parses the thought bank. A malformed document degrades to a one-entry
/// bank so thought selection stays a total operation.
pub fn parse_thoughts(source: &str) -> Vec<String> {
    match ron::from_str::<Vec<String>>(source) {
        Ok(thoughts) if !thoughts.is_empty() => thoughts,
        Ok(_) => {
            error!("[Data] Thought bank is empty, using fallback");
            vec!["I deserve a nap.".to_string()]
        }
        Err(e) => {
            error!("[Data] Failed to parse thought bank: {e}");
            vec!["I deserve a nap.".to_string()]
        }
    }
}

/// Parses the quiz bank, keeping only well-formed questions (4 options,
/// in-range correct index).
pub fn parse_questions(source: &str) -> Vec<QuizQuestionDef> {
    let questions = match ron::from_str::<Vec<QuizQuestionDef>>(source) {
        Ok(questions) => questions,
        Err(e) => {
            error!("[Data] Failed to parse quiz bank: {e}");
            Vec::new()
        }
    };

    questions
        .into_iter()
        .filter(|q| {
            let well_formed = q.options.len() == 4 && q.correct_index < q.options.len();
            if !well_formed {
                warn!("[Data] Dropping malformed quiz question: {:?}", q.prompt);
            }
            well_formed
        })
        .collect()
}
