use crate::error::BankError;
use crate::models::{Flashcard, LoadedBank};
use calamine::{open_workbook_auto, Reader};
use std::fs::File;
use std::path::{Path, PathBuf};

const QUESTION_HEADER: &str = "question";
const ANSWER_HEADER: &str = "answer";

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankFormat {
    Csv,
    Workbook,
}

impl BankFormat {
    pub fn from_path(path: &Path) -> Result<Self, BankError> {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if ext == "csv" {
            Ok(BankFormat::Csv)
        } else if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
            Ok(BankFormat::Workbook)
        } else {
            Err(BankError::UnknownExtension(path.to_path_buf()))
        }
    }
}

/// Whether the file browser should offer this path as a question bank.
pub fn is_supported_file(path: &Path) -> bool {
    BankFormat::from_path(path).is_ok()
}

fn normalize_header(cell: &str) -> String {
    cell.trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(|s| s.trim()).unwrap_or("")
}

/// Turns a table whose first row is a header into flashcards.
///
/// The header must contain a `question` and an `answer` column (compared
/// case-insensitively after trimming); otherwise the result is empty.
pub fn read_questions(rows: &[Vec<String>]) -> Vec<Flashcard> {
    let Some((header, data)) = rows.split_first() else {
        return Vec::new();
    };

    let header: Vec<String> = header.iter().map(|c| normalize_header(c)).collect();
    let qcol = header.iter().position(|c| c == QUESTION_HEADER);
    let acol = header.iter().position(|c| c == ANSWER_HEADER);

    let (Some(qcol), Some(acol)) = (qcol, acol) else {
        return Vec::new();
    };

    data.iter()
        .filter_map(|row| {
            let question = cell(row, qcol);
            let answer = cell(row, acol);
            if question.is_empty() && answer.is_empty() {
                None
            } else {
                Some(Flashcard::new(question, answer))
            }
        })
        .collect()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn load_csv(path: &Path) -> Result<LoadedBank, BankError> {
    let file = File::open(path).map_err(|source| BankError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| BankError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        if record.is_empty() {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Ok(LoadedBank {
        title: file_stem(path),
        flashcards: read_questions(&rows),
        source: path.to_path_buf(),
    })
}

/// Loads the first sheet of a workbook that carries a question bank.
///
/// Sheets that fail to read are skipped. When no sheet qualifies the bank is
/// empty and the title falls back to the file stem.
pub fn load_workbook(path: &Path) -> Result<LoadedBank, BankError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| BankError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;

    for name in workbook.sheet_names() {
        let range = match workbook.worksheet_range(&name) {
            Ok(range) => range,
            Err(e) => {
                tracing::warn!(sheet = %name, error = %e, "skipping unreadable sheet");
                continue;
            }
        };

        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();

        let flashcards = read_questions(&rows);
        if !flashcards.is_empty() {
            tracing::debug!(sheet = %name, count = flashcards.len(), "using sheet");
            return Ok(LoadedBank {
                title: name,
                flashcards,
                source: path.to_path_buf(),
            });
        }
    }

    Ok(LoadedBank {
        title: file_stem(path),
        flashcards: Vec::new(),
        source: path.to_path_buf(),
    })
}

pub fn load_bank(path: &Path) -> Result<LoadedBank, BankError> {
    let bank = match BankFormat::from_path(path)? {
        BankFormat::Csv => load_csv(path)?,
        BankFormat::Workbook => load_workbook(path)?,
    };

    if bank.flashcards.is_empty() {
        return Err(BankError::NoQuestions(PathBuf::from(path)));
    }

    tracing::info!(
        path = %path.display(),
        title = %bank.title,
        count = bank.flashcards.len(),
        "loaded question bank"
    );
    Ok(bank)
}
