use crate::models::{DisplayState, Flashcard, Spoken};
use crossterm::event::{KeyCode, KeyEvent};
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct QuizSession {
    pub flashcards: Vec<Flashcard>,
    pub current_index: usize,
    pub deck_name: String,
    pub display_state: DisplayState,
    /// Number of answers revealed since the bank was opened.
    pub completed: usize,
    pub started_at: Instant,
    pub started_wall: chrono::DateTime<chrono::Local>,
}

impl QuizSession {
    /// Starts a session on the first card. Returns `None` for an empty bank.
    pub fn new<R: Rng + ?Sized>(
        mut flashcards: Vec<Flashcard>,
        deck_name: impl Into<String>,
        shuffle: bool,
        rng: &mut R,
    ) -> Option<Self> {
        if flashcards.is_empty() {
            return None;
        }
        if shuffle {
            flashcards.shuffle(rng);
        }

        Some(Self {
            flashcards,
            current_index: 0,
            deck_name: deck_name.into(),
            display_state: DisplayState::AwaitingReveal,
            completed: 0,
            started_at: Instant::now(),
            started_wall: chrono::Local::now(),
        })
    }

    pub fn current(&self) -> &Flashcard {
        &self.flashcards[self.current_index]
    }

    pub fn question_text(&self) -> &str {
        &self.current().question
    }

    /// The answer, once revealed.
    pub fn answer_text(&self) -> Option<&str> {
        match self.display_state {
            DisplayState::AwaitingReveal => None,
            DisplayState::AwaitingNext => Some(&self.current().answer),
        }
    }

    /// Moves the rotation one step and returns the newly shown text.
    ///
    /// Reveals the answer when only the question is shown. Otherwise moves to
    /// the next question, reshuffling the bank and restarting at the first
    /// card once every card has been shown.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Spoken {
        match self.display_state {
            DisplayState::AwaitingReveal => {
                self.display_state = DisplayState::AwaitingNext;
                self.completed += 1;
                Spoken::Answer(self.current().answer.clone())
            }
            DisplayState::AwaitingNext => {
                self.current_index += 1;
                if self.current_index >= self.flashcards.len() {
                    self.current_index = 0;
                    self.flashcards.shuffle(rng);
                    tracing::debug!(deck = %self.deck_name, "bank exhausted, reshuffled");
                }
                self.display_state = DisplayState::AwaitingReveal;
                Spoken::Question(self.current().question.clone())
            }
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// 1-based position of the current card and the bank size.
    pub fn progress(&self) -> (usize, usize) {
        (self.current_index + 1, self.flashcards.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    Advance,
    OpenBrowser,
    ConfirmQuit,
    None,
}

/// Maps a key pressed on the viewer screen to the action it triggers.
pub fn handle_viewer_input(key: KeyEvent) -> ViewerAction {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => ViewerAction::Advance,
        KeyCode::Char('o') | KeyCode::Char('O') => ViewerAction::OpenBrowser,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ViewerAction::ConfirmQuit,
        _ => ViewerAction::None,
    }
}
