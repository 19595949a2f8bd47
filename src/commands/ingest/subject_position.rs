/// Subject assignment by question position for the fixed three-section exam
/// layout: the first `section_size` questions belong to the first subject, the
/// next `section_size` to the second, everything after to the third.
///
/// Documents with a different layout are mis-tagged; nothing here detects it.
#[derive(Debug, Clone)]
pub struct PositionalSubjects {
    pub subjects: [String; 3],
    pub section_size: usize,
}

impl Default for PositionalSubjects {
    fn default() -> Self {
        Self {
            subjects: [
                "Physics".to_string(),
                "Chemistry".to_string(),
                "Biology".to_string(),
            ],
            section_size: 50,
        }
    }
}

impl PositionalSubjects {
    /// `ordinal` is 1-based; zero is treated like the first question.
    pub fn subject_for(&self, ordinal: usize) -> &str {
        let section_size = self.section_size.max(1);
        let section = ordinal.saturating_sub(1) / section_size;
        &self.subjects[section.min(2)]
    }
}
