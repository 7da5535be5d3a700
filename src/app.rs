use crate::bank::load_bank;
use crate::browser::{BrowserOutcome, FileBrowser};
use crate::config::AppConfig;
use crate::models::{AppState, Spoken};
use crate::narrator::Narrator;
use crate::session::{handle_viewer_input, QuizSession, ViewerAction};
use crate::ui::layout::calculate_viewer_chunks;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use rand::rngs::ThreadRng;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const STATUS_MESSAGE_TIMEOUT: Duration = Duration::from_secs(4);

/// A modal message, shown until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDialog {
    pub title: String,
    pub message: String,
}

pub struct App {
    pub state: AppState,
    pub config: AppConfig,
    pub session: Option<QuizSession>,
    pub browser: Option<FileBrowser>,
    pub error: Option<ErrorDialog>,
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
    pub should_quit: bool,
    narrator: Box<dyn Narrator>,
    rng: ThreadRng,
    last_browser_dir: Option<PathBuf>,
}

impl App {
    pub fn new(config: AppConfig, narrator: Box<dyn Narrator>) -> Self {
        Self {
            state: AppState::Viewer,
            config,
            session: None,
            browser: None,
            error: None,
            status_message: None,
            status_message_time: None,
            should_quit: false,
            narrator,
            rng: rand::thread_rng(),
            last_browser_dir: None,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_message_time = Some(Instant::now());
    }

    fn show_error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.narrator.stop();
        self.error = Some(ErrorDialog {
            title: title.into(),
            message: message.into(),
        });
        self.state = AppState::ErrorDialog;
    }

    fn quit(&mut self) {
        self.narrator.stop();
        self.should_quit = true;
    }

    fn speak(&mut self, spoken: &Spoken) {
        if let Err(e) = self.narrator.say(spoken.text()) {
            tracing::warn!("narration failed: {}", e);
        }
    }

    /// Loads a question bank and starts a new session on it. On failure the
    /// error dialog is shown and the running session, if any, is kept.
    pub fn open(&mut self, path: &Path) {
        tracing::info!(path = %path.display(), "opening question bank");

        match load_bank(path) {
            Ok(bank) => {
                let session = QuizSession::new(
                    bank.flashcards,
                    bank.title,
                    self.config.shuffle_on_open,
                    &mut self.rng,
                );
                let Some(session) = session else {
                    self.show_error("No questions", format!("No questions in {}", path.display()));
                    return;
                };

                let first = Spoken::Question(session.question_text().to_string());
                self.set_status(format!(
                    "Loaded {} questions from {}",
                    session.flashcards.len(),
                    session.deck_name
                ));
                self.session = Some(session);
                self.state = AppState::Viewer;
                self.speak(&first);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "{}", e);
                self.show_error(e.title(), e.to_string());
            }
        }
    }

    /// Reveals the answer or moves to the next question. Does nothing until a
    /// bank is loaded.
    pub fn advance(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let spoken = session.advance(&mut self.rng);
        self.speak(&spoken);
    }

    fn open_browser(&mut self) {
        let start = self
            .last_browser_dir
            .clone()
            .or_else(|| self.config.start_dir.clone())
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        self.browser = Some(FileBrowser::new(start));
        self.state = AppState::FileBrowser;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        match self.state {
            AppState::Viewer => match handle_viewer_input(key) {
                ViewerAction::Advance => self.advance(),
                ViewerAction::OpenBrowser => self.open_browser(),
                ViewerAction::ConfirmQuit => self.state = AppState::QuitConfirm,
                ViewerAction::None => {}
            },
            AppState::FileBrowser => {
                let Some(browser) = self.browser.as_mut() else {
                    self.state = AppState::Viewer;
                    return;
                };
                match browser.handle_key(key) {
                    BrowserOutcome::Pending => {}
                    BrowserOutcome::Cancelled => {
                        self.last_browser_dir = Some(browser.path.clone());
                        self.browser = None;
                        self.state = AppState::Viewer;
                    }
                    BrowserOutcome::Selected(path) => {
                        self.last_browser_dir = Some(browser.path.clone());
                        self.browser = None;
                        self.state = AppState::Viewer;
                        self.open(&path);
                    }
                }
            }
            AppState::ErrorDialog => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.error = None;
                    self.state = AppState::Viewer;
                }
            }
            AppState::QuitConfirm => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.quit(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.state = AppState::Viewer;
                }
                _ => {}
            },
        }
    }

    /// Clicking either card panel advances, like pressing space.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) {
        if self.state != AppState::Viewer {
            return;
        }
        if let MouseEventKind::Up(MouseButton::Left) = mouse.kind {
            let layout = calculate_viewer_chunks(area);
            let pos = Position::new(mouse.column, mouse.row);
            if layout.question_area.contains(pos) || layout.answer_area.contains(pos) {
                self.advance();
            }
        }
    }

    /// Timer callback, run on every poll timeout of the event loop.
    pub fn tick(&mut self) {
        if let Some(since) = self.status_message_time
            && since.elapsed() >= STATUS_MESSAGE_TIMEOUT
        {
            self.status_message = None;
            self.status_message_time = None;
        }
    }

    /// Left status field: transient message, else the completed count.
    pub fn status_left(&self) -> String {
        if let Some(message) = &self.status_message {
            return message.clone();
        }
        match &self.session {
            Some(session) => format!("{} questions done", session.completed),
            None => "No question bank loaded".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NarrationError;
    use crate::models::DisplayState;
    use std::fs;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingNarrator {
        said: Arc<Mutex<Vec<String>>>,
        stops: Arc<Mutex<usize>>,
    }

    impl Narrator for RecordingNarrator {
        fn say(&mut self, text: &str) -> Result<(), NarrationError> {
            self.said.lock().unwrap().push(text.to_string());
            Ok(())
        }

        fn stop(&mut self) {
            *self.stops.lock().unwrap() += 1;
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn create_test_app() -> (App, Arc<Mutex<Vec<String>>>) {
        let narrator = RecordingNarrator::default();
        let said = narrator.said.clone();
        (App::new(AppConfig::default(), Box::new(narrator)), said)
    }

    fn create_test_app_with_stops() -> (App, Arc<Mutex<usize>>) {
        let narrator = RecordingNarrator::default();
        let stops = narrator.stops.clone();
        (App::new(AppConfig::default(), Box::new(narrator)), stops)
    }

    fn write_deck(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("capitals.csv");
        fs::write(
            &path,
            "Answer,Question\nParis,Capital of France?\nRome,Capital of Italy?\n",
        )
        .unwrap();
        path
    }

    #[test]
    fn test_advance_without_bank_does_nothing() {
        let (mut app, said) = create_test_app();
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.session.is_none());
        assert_eq!(app.state, AppState::Viewer);
        assert!(said.lock().unwrap().is_empty());
    }

    #[test]
    fn test_open_starts_session_and_narrates() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, said) = create_test_app();

        app.open(&write_deck(&dir));

        let session = app.session.as_ref().unwrap();
        assert_eq!(session.deck_name, "capitals");
        assert_eq!(session.question_text(), "Capital of France?");
        assert_eq!(app.state, AppState::Viewer);
        assert_eq!(*said.lock().unwrap(), vec!["Capital of France?"]);
    }

    #[test]
    fn test_space_and_enter_cycle_through_cards() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, said) = create_test_app();
        app.open(&write_deck(&dir));

        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Enter));

        let session = app.session.as_ref().unwrap();
        assert_eq!(session.current_index, 1);
        assert_eq!(session.display_state, DisplayState::AwaitingReveal);
        assert_eq!(session.completed, 1);
        assert_eq!(
            *said.lock().unwrap(),
            vec!["Capital of France?", "Paris", "Capital of Italy?"]
        );
    }

    #[test]
    fn test_open_missing_headers_shows_no_questions_dialog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.csv");
        fs::write(&path, "front,back\nQ,A\n").unwrap();
        let (mut app, _) = create_test_app();

        app.open(&path);

        assert_eq!(app.state, AppState::ErrorDialog);
        let error = app.error.as_ref().unwrap();
        assert_eq!(error.title, "No questions");
        assert!(error.message.contains("Cannot find questions in"));
        assert!(app.session.is_none());

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Viewer);
        assert!(app.error.is_none());
    }

    #[test]
    fn test_open_unknown_extension_keeps_running_session() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app();
        app.open(&write_deck(&dir));

        let bogus = dir.path().join("deck.pdf");
        fs::write(&bogus, "").unwrap();
        app.open(&bogus);

        assert_eq!(app.state, AppState::ErrorDialog);
        assert_eq!(app.error.as_ref().unwrap().title, "Error");
        assert!(app.error.as_ref().unwrap().message.starts_with("Unknown file extension"));
        assert_eq!(app.session.as_ref().unwrap().deck_name, "capitals");
    }

    #[test]
    fn test_browser_selection_opens_file() {
        let dir = tempfile::tempdir().unwrap();
        write_deck(&dir);
        let (mut app, _) = create_test_app();
        app.config.start_dir = Some(dir.path().to_path_buf());

        app.handle_key(key(KeyCode::Char('o')));
        assert_eq!(app.state, AppState::FileBrowser);

        // Entries: "..", "capitals.csv"
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.state, AppState::Viewer);
        assert!(app.browser.is_none());
        assert_eq!(app.session.as_ref().unwrap().deck_name, "capitals");
    }

    #[test]
    fn test_browser_cancel_returns_to_viewer() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app();
        app.config.start_dir = Some(dir.path().to_path_buf());

        app.handle_key(key(KeyCode::Char('o')));
        app.handle_key(key(KeyCode::Esc));

        assert_eq!(app.state, AppState::Viewer);
        assert!(app.browser.is_none());
    }

    #[test]
    fn test_quit_confirmation() {
        let (mut app, _) = create_test_app();

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.state, AppState::QuitConfirm);
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.state, AppState::Viewer);
        assert!(!app.should_quit);

        app.handle_key(key(KeyCode::Char('q')));
        app.handle_key(key(KeyCode::Char('y')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_any_state() {
        let (mut app, _) = create_test_app();
        app.state = AppState::ErrorDialog;
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_click_on_panel_advances() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app();
        app.open(&write_deck(&dir));

        let area = Rect::new(0, 0, 100, 30);
        let layout = calculate_viewer_chunks(area);
        let click = |column, row| MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };

        // Header clicks are ignored.
        app.handle_mouse(click(layout.header_area.x + 1, layout.header_area.y), area);
        assert_eq!(app.session.as_ref().unwrap().completed, 0);

        app.handle_mouse(
            click(layout.answer_area.x + 1, layout.answer_area.y + 1),
            area,
        );
        assert_eq!(app.session.as_ref().unwrap().completed, 1);
    }

    #[test]
    fn test_status_left() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = create_test_app();
        assert_eq!(app.status_left(), "No question bank loaded");

        app.open(&write_deck(&dir));
        assert!(app.status_left().starts_with("Loaded 2 questions"));

        app.status_message_time = Some(Instant::now() - STATUS_MESSAGE_TIMEOUT);
        app.tick();
        assert_eq!(app.status_left(), "0 questions done");
    }

    #[test]
    fn test_failed_open_silences_narration() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, stops) = create_test_app_with_stops();
        app.open(&write_deck(&dir));
        assert_eq!(*stops.lock().unwrap(), 0);

        app.open(&dir.path().join("deck.pdf"));

        assert_eq!(app.state, AppState::ErrorDialog);
        assert_eq!(*stops.lock().unwrap(), 1);
    }

    #[test]
    fn test_quitting_silences_narration() {
        let (mut app, stops) = create_test_app_with_stops();
        app.handle_key(key(KeyCode::Char('Q')));
        assert_eq!(app.state, AppState::QuitConfirm);
        assert_eq!(*stops.lock().unwrap(), 0);

        app.handle_key(key(KeyCode::Char('y')));
        assert!(app.should_quit);
        assert_eq!(*stops.lock().unwrap(), 1);

        let (mut app, stops) = create_test_app_with_stops();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert_eq!(*stops.lock().unwrap(), 1);
    }
}
