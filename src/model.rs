use serde::{Deserialize, Serialize};

/// Answer key attached to a question.
///
/// Structured corpora always carry one of the four letters. Unstructured
/// documents have no answer-key line, so those records carry `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerKey {
    A,
    B,
    C,
    D,
    Unknown,
}

impl AnswerKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::Unknown => "unknown",
        }
    }

    /// Parses a single option letter, case-insensitively.
    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedQuestion {
    pub subject: String,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: AnswerKey,
    pub year: i32,
    pub source_id: Option<String>,
    pub image_path: Option<String>,
}

impl NormalizedQuestion {
    /// A record may be persisted only when the question and all four options
    /// carry text.
    pub fn is_complete(&self) -> bool {
        [
            &self.question_text,
            &self.option_a,
            &self.option_b,
            &self.option_c,
            &self.option_d,
        ]
        .iter()
        .all(|value| !value.trim().is_empty())
    }

    pub fn origin(&self) -> &'static str {
        if self.source_id.is_some() {
            "text"
        } else {
            "pdf"
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub total_added: usize,
    pub total_skipped: usize,
    pub total_duplicates: usize,
    pub total_processed: usize,
}

impl RunStats {
    pub fn absorb(&mut self, file: &FileStats) {
        self.total_added += file.added;
        self.total_skipped += file.skipped;
        self.total_duplicates += file.duplicates;
        self.total_processed += file.added + file.skipped + file.duplicates;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileStats {
    pub filename: String,
    pub year: i32,
    pub sha256: String,
    pub added: usize,
    pub skipped: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub filename: String,
    pub year: i32,
    pub added: usize,
    pub incomplete: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadRunReport {
    pub report_version: u32,
    pub started_at: String,
    pub finished_at: String,
    pub source_directory: String,
    pub db_path: String,
    pub reloaded: bool,
    pub stats: RunStats,
    pub files: Vec<FileStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseRunReport {
    pub report_version: u32,
    pub started_at: String,
    pub finished_at: String,
    pub source: String,
    pub db_path: String,
    pub total_added: usize,
    pub total_incomplete: usize,
    pub documents: Vec<DocumentStats>,
}
