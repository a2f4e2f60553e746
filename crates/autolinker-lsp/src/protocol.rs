use autolinker_core::SessionId;
use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::lsp_types::CompletionItem;
use url::Url;

/// Insert `[[` at the cursor to open a link session
pub const TRIGGER_LINK_SUGGESTIONS: &str = "autolinker.triggerLinkSuggestions";

/// Insert one candidate of a live session
pub const INSERT_SUGGESTION: &str = "autolinker.insertSuggestion";

/// Sent when block matches for a live session have arrived
pub enum BlockSuggestions {}

impl Notification for BlockSuggestions {
    type Params = BlockSuggestionsParams;
    const METHOD: &'static str = "autolinker/blockSuggestions";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSuggestionsParams {
    pub session: SessionId,
    pub uri: Url,
    /// No body reads are outstanding for this session any more
    pub is_complete: bool,
    /// Full, re-ranked list for the session
    pub items: Vec<CompletionItem>,
}

/// Arguments of `autolinker.insertSuggestion`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertSuggestionParams {
    pub session: SessionId,
    /// Position of the chosen candidate in the session's list
    pub index: usize,
}
