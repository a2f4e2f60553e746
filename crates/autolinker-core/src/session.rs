//! Suggestion sessions.
//!
//! A session lives from a detected trigger until the user picks a candidate
//! or types on. Block matches that arrive after the first answer are tagged
//! with the session they were issued for and only merged into that session.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::TextEdit;
use crate::rank::{merge, Candidate, Ranking};
use crate::rewrite::rewrite;
use crate::trigger::TriggerSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

/// Hands out session ids; only the most recent one is current
#[derive(Debug, Default)]
pub struct SessionTracker {
    generation: AtomicU64,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session, superseding every earlier one
    pub fn begin(&self) -> SessionId {
        SessionId(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Supersede the current session without starting another
    pub fn close(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, id: SessionId) -> bool {
        self.generation.load(Ordering::SeqCst) == id.0
    }
}

/// Block matches for one note, delivered after its body was read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockUpdate {
    pub session: SessionId,
    pub query: String,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestSession {
    pub id: SessionId,
    /// Document the session was opened in
    pub document: String,
    pub span: TriggerSpan,
    pub candidates: Vec<Candidate>,
    /// Body reads still outstanding
    pub pending: usize,
    max_suggestions: usize,
}

impl SuggestSession {
    pub fn new(
        id: SessionId,
        document: impl Into<String>,
        span: TriggerSpan,
        ranking: &Ranking,
        max_suggestions: usize,
    ) -> Self {
        Self {
            id,
            document: document.into(),
            span,
            candidates: ranking.candidates.clone(),
            pending: ranking.block_lookups.len(),
            max_suggestions,
        }
    }

    /// Whether a fresh trigger in `document` is the same session
    pub fn matches(&self, document: &str, span: &TriggerSpan) -> bool {
        self.document == document && &self.span == span
    }

    pub fn is_complete(&self) -> bool {
        self.pending == 0
    }

    /// Merge late block matches resolved without a read
    pub fn absorb(&mut self, candidates: Vec<Candidate>) {
        self.pending = self.pending.saturating_sub(1);
        if candidates.is_empty() {
            return;
        }
        let existing = std::mem::take(&mut self.candidates);
        self.candidates = merge(existing, candidates, &self.span.query, self.max_suggestions);
    }

    /// Merge an update issued for this session.
    ///
    /// Updates from other sessions are dropped and `false` is returned.
    pub fn apply_update(&mut self, update: BlockUpdate) -> bool {
        if update.session != self.id || update.query != self.span.query {
            return false;
        }
        self.absorb(update.candidates);
        true
    }

    /// Edit inserting `candidate` over this session's span
    pub fn rewrite(&self, candidate: &Candidate) -> Option<TextEdit> {
        rewrite(candidate, Some(&self.span))
    }
}
