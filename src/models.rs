use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A question bank read from disk, ready to start a session with.
#[derive(Debug, Clone)]
pub struct LoadedBank {
    /// Sheet name for workbooks, file stem for CSV files.
    pub title: String,
    pub flashcards: Vec<Flashcard>,
    pub source: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// Only the question is on screen.
    AwaitingReveal,
    /// Question and answer are on screen; the next advance moves on.
    AwaitingNext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Viewer,
    FileBrowser,
    ErrorDialog,
    QuitConfirm,
}

/// Text produced by an advance, handed to the narrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spoken {
    Question(String),
    Answer(String),
}

impl Spoken {
    pub fn text(&self) -> &str {
        match self {
            Spoken::Question(text) | Spoken::Answer(text) => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spoken_text() {
        assert_eq!(Spoken::Question("Q".to_string()).text(), "Q");
        assert_eq!(Spoken::Answer("A".to_string()).text(), "A");
    }

    #[test]
    fn test_flashcard_new() {
        let card = Flashcard::new("What is 2+2?", String::from("Four"));
        assert_eq!(card.question, "What is 2+2?");
        assert_eq!(card.answer, "Four");
    }
}
