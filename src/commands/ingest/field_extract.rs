use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockField {
    Question,
    OptionA,
    OptionB,
    OptionC,
    OptionD,
    Answer,
}

impl BlockField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Question => "question",
            Self::OptionA => "option_a",
            Self::OptionB => "option_b",
            Self::OptionC => "option_c",
            Self::OptionD => "option_d",
            Self::Answer => "answer",
        }
    }
}

/// Why a block could not be turned into a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRejection {
    MissingLabel(BlockField),
    EmptyField(BlockField),
    InvalidAnswer,
}

impl BlockRejection {
    pub fn describe(self) -> String {
        match self {
            Self::MissingLabel(field) => format!("missing {} label", field.as_str()),
            Self::EmptyField(field) => format!("empty {}", field.as_str()),
            Self::InvalidAnswer => "answer is not one of A-D".to_string(),
        }
    }
}

/// Turns the body of one identified block into a candidate record.
pub trait FieldExtractor {
    fn extract(&self, body: &str, year: i32) -> Result<NormalizedQuestion, BlockRejection>;
}

/// Extracts fields by label anchors.
///
/// Labels are looked up in order: `Question:`, `A.`, `B.`, `C.`, `D.`,
/// `Answer:`, each search starting where the previous label ended. A field
/// spans from the end of its label to the start of the next label, so the
/// first occurrence of the next label always closes the field. An option label
/// at the start of a line wins over an inline one, so `vitamin a.` inside the
/// question text does not open option A when an `A.` line follows. `Subject:`
/// is optional and is only honoured before the question label.
pub struct LabeledFieldExtractor {
    default_subject: String,
    subject_label: Regex,
    question_label: Regex,
    option_line_labels: [Regex; 4],
    option_inline_labels: [Regex; 4],
    answer_label: Regex,
    answer_letter: Regex,
}

impl LabeledFieldExtractor {
    pub fn new(default_subject: &str) -> Result<Self> {
        let option_line_label = |letter: char| {
            Regex::new(&format!(r"(?im)^[ \t]*{letter}\."))
                .with_context(|| format!("failed to compile option {letter} line label regex"))
        };
        let option_inline_label = |letter: char| {
            Regex::new(&format!(r"(?i)(?:^|\s){letter}\."))
                .with_context(|| format!("failed to compile option {letter} label regex"))
        };

        Ok(Self {
            default_subject: default_subject.to_string(),
            subject_label: Regex::new(r"(?i)subject\s*:")
                .context("failed to compile subject label regex")?,
            question_label: Regex::new(r"(?i)question\s*:")
                .context("failed to compile question label regex")?,
            option_line_labels: [
                option_line_label('A')?,
                option_line_label('B')?,
                option_line_label('C')?,
                option_line_label('D')?,
            ],
            option_inline_labels: [
                option_inline_label('A')?,
                option_inline_label('B')?,
                option_inline_label('C')?,
                option_inline_label('D')?,
            ],
            answer_label: Regex::new(r"(?i)answer\s*:")
                .context("failed to compile answer label regex")?,
            answer_letter: Regex::new(r"(?i)\A\s*\(?([a-d])\b")
                .context("failed to compile answer letter regex")?,
        })
    }

    fn subject_for(&self, preamble: &str) -> String {
        let subject = self
            .subject_label
            .find(preamble)
            .map(|label| clean_text(&preamble[label.end()..]))
            .unwrap_or_default();

        if subject.is_empty() {
            self.default_subject.clone()
        } else {
            subject
        }
    }
}

impl FieldExtractor for LabeledFieldExtractor {
    fn extract(&self, body: &str, year: i32) -> Result<NormalizedQuestion, BlockRejection> {
        const OPTION_FIELDS: [BlockField; 4] = [
            BlockField::OptionA,
            BlockField::OptionB,
            BlockField::OptionC,
            BlockField::OptionD,
        ];

        let question = self
            .question_label
            .find(body)
            .ok_or(BlockRejection::MissingLabel(BlockField::Question))?;
        let subject = self.subject_for(&body[..question.start()]);

        // (start, end) of each option label, in order.
        let mut option_spans = [(0_usize, 0_usize); 4];
        let mut cursor = question.end();
        for index in 0..4 {
            let label = self.option_line_labels[index]
                .find_at(body, cursor)
                .or_else(|| self.option_inline_labels[index].find_at(body, cursor))
                .ok_or(BlockRejection::MissingLabel(OPTION_FIELDS[index]))?;
            option_spans[index] = (label.start(), label.end());
            cursor = label.end();
        }

        let answer = self.answer_label.find_at(body, cursor);
        let last_option_end = answer.map(|label| label.start()).unwrap_or(body.len());

        let question_text = clean_text(&body[question.end()..option_spans[0].0]);
        let mut options: [String; 4] = Default::default();
        for index in 0..4 {
            let span_end = option_spans
                .get(index + 1)
                .map(|next| next.0)
                .unwrap_or(last_option_end);
            options[index] = clean_text(&body[option_spans[index].1..span_end]);
        }

        let answer = answer.ok_or(BlockRejection::MissingLabel(BlockField::Answer))?;
        let correct_option = self
            .answer_letter
            .captures(&body[answer.end()..])
            .and_then(|captures| captures.get(1))
            .and_then(|letter| AnswerKey::from_letter(letter.as_str()))
            .ok_or(BlockRejection::InvalidAnswer)?;

        if question_text.is_empty() {
            return Err(BlockRejection::EmptyField(BlockField::Question));
        }
        for (index, option) in options.iter().enumerate() {
            if option.is_empty() {
                return Err(BlockRejection::EmptyField(OPTION_FIELDS[index]));
            }
        }

        let [option_a, option_b, option_c, option_d] = options;
        Ok(NormalizedQuestion {
            subject,
            question_text,
            option_a,
            option_b,
            option_c,
            option_d,
            correct_option,
            year,
            source_id: None,
            image_path: None,
        })
    }
}
