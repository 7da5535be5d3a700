pub mod app;
pub mod bank;
pub mod browser;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod narrator;
pub mod session;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use app::{App, ErrorDialog};
pub use bank::{load_bank, load_csv, load_workbook, read_questions, BankFormat};
pub use browser::{BrowserEntry, BrowserOutcome, FileBrowser};
pub use config::{AppConfig, SpeechConfig};
pub use error::{BankError, ConfigError, NarrationError};
pub use models::{AppState, DisplayState, Flashcard, LoadedBank, Spoken};
pub use narrator::{CommandNarrator, Narrator, SilentNarrator};
pub use session::{handle_viewer_input, QuizSession, ViewerAction};
pub use ui::draw;
