use crate::bank::is_supported_file;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    pub name: String,
    pub is_dir: bool,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserOutcome {
    /// Still browsing.
    Pending,
    Cancelled,
    Selected(PathBuf),
}

/// Picks a question bank file from the filesystem.
#[derive(Debug)]
pub struct FileBrowser {
    pub path: PathBuf,
    pub entries: Vec<BrowserEntry>,
    pub selected: usize,
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

impl FileBrowser {
    pub fn new(start: impl Into<PathBuf>) -> Self {
        let mut browser = Self {
            path: start.into(),
            entries: Vec::new(),
            selected: 0,
        };
        browser.refresh();
        browser
    }

    pub fn refresh(&mut self) {
        self.entries.clear();

        if let Some(parent) = self.path.parent() {
            self.entries.push(BrowserEntry {
                name: "..".to_string(),
                is_dir: true,
                path: parent.to_path_buf(),
            });
        }

        match std::fs::read_dir(&self.path) {
            Ok(entries) => {
                let mut dirs: Vec<BrowserEntry> = Vec::new();
                let mut files: Vec<BrowserEntry> = Vec::new();

                for entry in entries.flatten() {
                    let path = entry.path();
                    let name = entry.file_name().to_string_lossy().to_string();

                    if name.starts_with('.') {
                        continue;
                    }

                    if path.is_dir() {
                        dirs.push(BrowserEntry {
                            name,
                            is_dir: true,
                            path,
                        });
                    } else if is_supported_file(&path) {
                        files.push(BrowserEntry {
                            name,
                            is_dir: false,
                            path,
                        });
                    }
                }

                dirs.sort_by_key(|e| e.name.to_lowercase());
                files.sort_by_key(|e| e.name.to_lowercase());

                self.entries.extend(dirs);
                self.entries.extend(files);
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "cannot list directory: {}", e);
            }
        }

        if self.selected >= self.entries.len() {
            self.selected = 0;
        }
    }

    fn change_dir(&mut self, path: &Path) {
        self.path = path.to_path_buf();
        self.selected = 0;
        self.refresh();
    }

    pub fn selected_entry(&self) -> Option<&BrowserEntry> {
        self.entries.get(self.selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> BrowserOutcome {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return BrowserOutcome::Cancelled,
            KeyCode::Char('j') | KeyCode::Down => {
                if !self.entries.is_empty() {
                    self.selected = (self.selected + 1) % self.entries.len();
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if !self.entries.is_empty() {
                    self.selected = self
                        .selected
                        .checked_sub(1)
                        .unwrap_or(self.entries.len() - 1);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(entry) = self.selected_entry().cloned() {
                    if entry.is_dir {
                        self.change_dir(&entry.path);
                    } else {
                        return BrowserOutcome::Selected(entry.path);
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some(parent) = self.path.parent().map(Path::to_path_buf) {
                    self.change_dir(&parent);
                }
            }
            KeyCode::Char('h') => self.change_dir(&home_dir()),
            _ => {}
        }
        BrowserOutcome::Pending
    }
}
