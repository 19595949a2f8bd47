use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ScanState {
    SeekingQuestion,
    InQuestionBody,
    InOption(OptionSlot),
}

/// One of the four option buffers of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum OptionSlot {
    A,
    B,
    C,
    D,
}

impl OptionSlot {
    /// Maps an option-line label (`A`-`D` or `1`-`4`) to its slot.
    fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_uppercase().as_str() {
            "A" | "1" => Some(Self::A),
            "B" | "2" => Some(Self::B),
            "C" | "3" => Some(Self::C),
            "D" | "4" => Some(Self::D),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }
}

pub(super) struct ScanPatterns {
    question_start: Regex,
    option_start: Regex,
}

impl ScanPatterns {
    pub(super) fn new() -> Result<Self> {
        Ok(Self {
            question_start: Regex::new(r"^\s*(\d+)[.)]\s+")
                .context("failed to compile question start regex")?,
            option_start: Regex::new(r"^\s*[(\[]?([A-Da-d1-4])[)\].]\s+")
                .context("failed to compile option start regex")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ReconstructedQuestion {
    /// 1-based position among accepted questions of the document.
    pub(super) ordinal: usize,
    /// 1-based page on which the question started.
    pub(super) page: usize,
    pub(super) question_text: String,
    pub(super) options: [String; 4],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Finalized {
    Accepted(ReconstructedQuestion),
    Incomplete { page: usize, excerpt: String },
}

#[derive(Debug, Default)]
struct QuestionDraft {
    page: usize,
    body: Vec<String>,
    options: [Vec<String>; 4],
}

/// Line-driven state machine that rebuilds questions from unlabelled text.
///
/// Each trimmed line is tested, in order, for a question start (`12.` or
/// `12)`), then for an option start (`(a)`, `B.`, `3)`, ...) once inside a
/// question, and is otherwise appended to the buffer of the current state.
pub(super) struct LineScanner<'p> {
    patterns: &'p ScanPatterns,
    state: ScanState,
    draft: QuestionDraft,
    page: usize,
    accepted: usize,
}

impl<'p> LineScanner<'p> {
    pub(super) fn new(patterns: &'p ScanPatterns) -> Self {
        Self {
            patterns,
            state: ScanState::SeekingQuestion,
            draft: QuestionDraft::default(),
            page: 1,
            accepted: 0,
        }
    }

    #[cfg(test)]
    pub(super) fn state(&self) -> ScanState {
        self.state
    }

    pub(super) fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Feeds one line. Returns the previous question when this line starts a
    /// new one.
    pub(super) fn step(&mut self, line: &str) -> Option<Finalized> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if let Some(marker) = self.patterns.question_start.find(line) {
            let finalized = self.finish();
            self.draft = QuestionDraft {
                page: self.page,
                body: vec![line[marker.end()..].to_string()],
                ..QuestionDraft::default()
            };
            self.state = ScanState::InQuestionBody;
            return finalized;
        }

        if self.state != ScanState::SeekingQuestion {
            if let Some(captures) = self.patterns.option_start.captures(line) {
                let slot = captures
                    .get(1)
                    .and_then(|label| OptionSlot::from_label(label.as_str()));
                if let (Some(slot), Some(marker)) = (slot, captures.get(0)) {
                    self.draft.options[slot.index()].push(line[marker.end()..].to_string());
                    self.state = ScanState::InOption(slot);
                    return None;
                }
            }
        }

        match self.state {
            ScanState::SeekingQuestion => {}
            ScanState::InQuestionBody => self.draft.body.push(line.to_string()),
            ScanState::InOption(slot) => self.draft.options[slot.index()].push(line.to_string()),
        }

        None
    }

    /// Finalizes the in-progress question, if any, and returns to seeking.
    pub(super) fn finish(&mut self) -> Option<Finalized> {
        if self.state == ScanState::SeekingQuestion {
            return None;
        }

        self.state = ScanState::SeekingQuestion;
        let draft = std::mem::take(&mut self.draft);

        let question_text = clean_fragments(&draft.body);
        let options = draft.options.map(|fragments| clean_fragments(&fragments));

        if question_text.is_empty() || options.iter().any(|option| option.is_empty()) {
            return Some(Finalized::Incomplete {
                page: draft.page,
                excerpt: question_text.chars().take(60).collect(),
            });
        }

        self.accepted += 1;
        Some(Finalized::Accepted(ReconstructedQuestion {
            ordinal: self.accepted,
            page: draft.page,
            question_text,
            options,
        }))
    }
}
