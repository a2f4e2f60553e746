//! Autolinker Core Library
//!
//! Link suggestion logic: trigger detection, candidate ranking and link
//! insertion, plus the in-memory note index the ranker reads from.
//! No async runtime and no editor protocol types.
//!

pub mod command;
pub mod config;
pub mod corpus;
pub mod line_map;
pub mod model;
mod parser;
pub mod rank;
pub mod rewrite;
pub mod session;
mod store;
pub mod syntax;
pub mod trigger;
pub mod vfs;
pub mod workspace;

pub use config::{ConfigError, SuggestConfig};
pub use corpus::{BodySource, Corpus, CorpusError};
pub use rank::{Candidate, CandidateKind, Ranking};
pub use session::{BlockUpdate, SessionId, SessionTracker, SuggestSession};
pub use trigger::TriggerSpan;
pub use workspace::{Vault, Workspace};
