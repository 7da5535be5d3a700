pub mod layout;
mod popups;
pub mod theme;
mod viewer;

use crate::app::App;
use crate::models::AppState;
use ratatui::Frame;

pub use layout::{calculate_viewer_chunks, centered_rect};
pub use popups::{draw_error_dialog, draw_file_browser, draw_quit_confirmation};
pub use viewer::draw_viewer;

/// Draws the viewer and, on top of it, whichever popup the state calls for.
pub fn draw(f: &mut Frame, app: &App) {
    draw_viewer(f, app);

    match app.state {
        AppState::Viewer => {}
        AppState::FileBrowser => {
            if let Some(browser) = &app.browser {
                draw_file_browser(f, browser);
            }
        }
        AppState::ErrorDialog => {
            if let Some(error) = &app.error {
                draw_error_dialog(f, error);
            }
        }
        AppState::QuitConfirm => draw_quit_confirmation(f),
    }
}
