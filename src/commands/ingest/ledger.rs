use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Classification {
    New,
    InBatchDuplicate,
    StoredDuplicate,
}

impl Classification {
    pub(super) fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InBatchDuplicate => "in_batch_duplicate",
            Self::StoredDuplicate => "stored_duplicate",
        }
    }
}

/// Identifiers accepted during one ingestion run.
///
/// The ledger lives only as long as the run; the store's own uniqueness
/// constraint stays the final arbiter across concurrent runs.
#[derive(Debug, Default)]
pub(super) struct DedupLedger {
    seen: HashSet<String>,
}

impl DedupLedger {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Classifies `source_id`, recording it when it is new. The store is only
    /// consulted for identifiers not already seen in this run.
    pub(super) fn classify<S: QuestionStore + ?Sized>(
        &mut self,
        store: &S,
        source_id: &str,
    ) -> Result<Classification> {
        if self.seen.contains(source_id) {
            return Ok(Classification::InBatchDuplicate);
        }

        if store.exists(source_id)? {
            return Ok(Classification::StoredDuplicate);
        }

        self.seen.insert(source_id.to_string());
        Ok(Classification::New)
    }

    pub(super) fn len(&self) -> usize {
        self.seen.len()
    }
}
