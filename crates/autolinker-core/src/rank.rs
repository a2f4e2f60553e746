//! Candidate ranking.
//!
//! Ranking runs in two phases. [`rank`] answers immediately with every title
//! and heading match, plus a list of [`BlockLookup`]s for notes whose block
//! text can only be checked once their body has been read. Each lookup is
//! resolved later with [`scan_blocks`] (or [`resolve_blocks`]) and folded into
//! the list with [`merge`].

use feruca::{Collator, Locale, Tailoring};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::Path;

use crate::config::SuggestConfig;
use crate::corpus::{BodySource, Corpus};
use crate::line_map::utf16_len;
use crate::model::{Block, Heading, Note, NoteRef};
use crate::syntax::WikiLink;

const NOTE_GLYPH: &str = "📄";
const BLOCK_GLYPH: &str = "🔗";
const BLOCK_PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CandidateKind {
    Note,
    Heading { level: u8 },
    Block { id: String },
}

/// One entry of the suggestion list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub kind: CandidateKind,
    /// Used for sorting and exact-match detection
    pub title: String,
    pub note: NoteRef,
    pub display: String,
    /// Text written between the link delimiters when chosen
    pub link_text: String,
}

impl Candidate {
    pub fn for_note(note: &Note) -> Self {
        Self {
            kind: CandidateKind::Note,
            title: note.title.clone(),
            note: NoteRef::from(note),
            display: format!("{} {}", NOTE_GLYPH, note.title),
            link_text: note.title.clone(),
        }
    }

    pub fn for_heading(note: &Note, heading: &Heading) -> Self {
        Self {
            kind: CandidateKind::Heading {
                level: heading.level,
            },
            title: heading.text.clone(),
            note: NoteRef::from(note),
            display: format!(
                "{} {} ({})",
                "#".repeat(heading.level as usize),
                heading.text,
                note.title
            ),
            link_text: format!("{}{}", WikiLink::HEADING, heading.text),
        }
    }

    pub fn for_block(note: &NoteRef, block: &Block, line: &str) -> Self {
        let text = line.trim();
        let preview: String = text.chars().take(BLOCK_PREVIEW_CHARS).collect();
        Self {
            kind: CandidateKind::Block {
                id: block.id.clone(),
            },
            title: text.to_string(),
            note: note.clone(),
            display: format!("{} {}... ({})", BLOCK_GLYPH, preview, note.title),
            link_text: format!("{}{}", WikiLink::BLOCK, block.id),
        }
    }
}

/// Blocks of one note waiting for the note body to be read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockLookup {
    pub note: NoteRef,
    pub blocks: Vec<Block>,
}

/// Result of the synchronous ranking pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    /// Sorted and truncated title and heading matches
    pub candidates: Vec<Candidate>,
    pub block_lookups: Vec<BlockLookup>,
}

/// Rank every note except `current` against `query`.
///
/// Queries shorter than `config.min_query_length` yield an empty ranking.
pub fn rank(
    query: &str,
    corpus: &dyn Corpus,
    current: Option<&Path>,
    config: &SuggestConfig,
) -> Ranking {
    if (utf16_len(query) as usize) < config.min_query_length {
        return Ranking::default();
    }

    let needle = query.to_lowercase();
    let mut candidates = Vec::new();
    let mut block_lookups = Vec::new();

    for note in corpus.notes() {
        if current.is_some_and(|current| current == note.path.as_path()) {
            continue;
        }

        if note.title.to_lowercase().contains(&needle) {
            candidates.push(Candidate::for_note(note));
        }

        for heading in &note.headings {
            if heading.text.to_lowercase().contains(&needle) {
                candidates.push(Candidate::for_heading(note, heading));
            }
        }

        if !note.blocks.is_empty() {
            block_lookups.push(BlockLookup {
                note: NoteRef::from(note),
                blocks: note.blocks.clone(),
            });
        }
    }

    sort_candidates(&mut candidates, &needle);
    candidates.truncate(config.max_suggestions);

    Ranking {
        candidates,
        block_lookups,
    }
}

/// Match the blocks of `lookup` against `query` using the note's body text
pub fn scan_blocks(lookup: &BlockLookup, body: &str, query: &str) -> Vec<Candidate> {
    let needle = query.to_lowercase();
    let lines: Vec<&str> = body.split('\n').collect();

    lookup
        .blocks
        .iter()
        .filter_map(|block| {
            let line = lines.get(block.line())?;
            line.to_lowercase()
                .contains(&needle)
                .then(|| Candidate::for_block(&lookup.note, block, line))
        })
        .collect()
}

/// Read the body behind `lookup` and scan it.
///
/// A failed read contributes nothing.
pub fn resolve_blocks(
    lookup: &BlockLookup,
    source: &dyn BodySource,
    query: &str,
) -> Vec<Candidate> {
    match source.read_body(&lookup.note.path) {
        Ok(body) => scan_blocks(lookup, &body, query),
        Err(e) => {
            log::debug!("skipping block matches for {:?}: {}", lookup.note.path, e);
            Vec::new()
        }
    }
}

/// Fold late block candidates into an already ranked list
pub fn merge(
    existing: Vec<Candidate>,
    late: Vec<Candidate>,
    query: &str,
    max_suggestions: usize,
) -> Vec<Candidate> {
    let mut candidates = existing;
    candidates.extend(late);
    sort_candidates(&mut candidates, &query.to_lowercase());
    candidates.truncate(max_suggestions);
    candidates
}

/// Exact (case-insensitive) title matches first, then by title
fn sort_candidates(candidates: &mut [Candidate], needle: &str) {
    let mut collator = title_collator();
    candidates.sort_by(|a, b| {
        let a_exact = a.title.to_lowercase() == needle;
        let b_exact = b.title.to_lowercase() == needle;
        b_exact
            .cmp(&a_exact)
            .then_with(|| compare_titles(&mut collator, &a.title, &b.title))
    });
}

/// Root-locale Unicode collation; punctuation and spaces are not ignored
fn title_collator() -> Collator {
    Collator::new(Tailoring::Cldr(Locale::Root), false, false)
}

/// Collation order; titles that collate equal put lowercase first
fn compare_titles(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(&a, &b).then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusError;
    use crate::model::{Point, TextRange};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn range(line: u32) -> TextRange {
        TextRange {
            start: Point { line, col: 0 },
            end: Point { line, col: 0 },
        }
    }

    fn note(path: &str) -> Note {
        Note::new(PathBuf::from(path), Vec::new(), Vec::new())
    }

    fn note_with(path: &str, headings: &[(u8, &str)], blocks: &[(&str, u32)]) -> Note {
        Note::new(
            PathBuf::from(path),
            headings
                .iter()
                .map(|(level, text)| Heading {
                    level: *level,
                    text: text.to_string(),
                    range: range(0),
                })
                .collect(),
            blocks
                .iter()
                .map(|(id, line)| Block {
                    id: id.to_string(),
                    range: range(*line),
                })
                .collect(),
        )
    }

    struct MapBodies(HashMap<PathBuf, String>);

    impl BodySource for MapBodies {
        fn read_body(&self, path: &Path) -> Result<String, CorpusError> {
            self.0.get(path).cloned().ok_or_else(|| CorpusError::Read {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            })
        }
    }

    #[test]
    fn test_exact_title_match_sorts_first() {
        let corpus = vec![note("/v/abc.md"), note("/v/ab.md"), note("/v/aab.md")];
        let ranking = rank("ab", &corpus, None, &SuggestConfig::default());

        let titles: Vec<&str> = ranking.candidates.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["ab", "aab", "abc"]);
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let corpus = vec![note("/v/Rust Tips.md"), note("/v/RUST.md")];
        let ranking = rank("rust", &corpus, None, &SuggestConfig::default());
        assert_eq!(ranking.candidates[0].title, "RUST");
    }

    #[test]
    fn test_titles_differing_only_in_case() {
        let corpus = vec![note("/v/Alpha.md"), note("/b/alpha.md"), note("/v/alphabet.md")];
        let ranking = rank("lph", &corpus, None, &SuggestConfig::default());
        let titles: Vec<&str> = ranking.candidates.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["alpha", "Alpha", "alphabet"]);
    }

    #[test]
    fn test_accented_titles_sort_by_collation() {
        let corpus = vec![
            note("/v/fable.md"),
            note("/v/Élan fable.md"),
            note("/v/zebra fable.md"),
        ];
        let ranking = rank("abl", &corpus, None, &SuggestConfig::default());
        let titles: Vec<&str> = ranking.candidates.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Élan fable", "fable", "zebra fable"]);
    }

    #[test]
    fn test_accents_only_break_ties() {
        let corpus = vec![note("/v/summary.md"), note("/v/résumé.md"), note("/v/resume.md")];
        let ranking = rank("sum", &corpus, None, &SuggestConfig::default());
        let titles: Vec<&str> = ranking.candidates.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["resume", "résumé", "summary"]);
    }

    #[test]
    fn test_current_note_is_excluded() {
        let corpus = vec![
            note_with("/v/current.md", &[(1, "current heading")], &[("b1", 0)]),
            note("/v/current notes.md"),
        ];
        let ranking = rank(
            "current",
            &corpus,
            Some(Path::new("/v/current.md")),
            &SuggestConfig::default(),
        );

        assert_eq!(ranking.candidates.len(), 1);
        assert_eq!(ranking.candidates[0].title, "current notes");
        assert!(ranking.block_lookups.is_empty());
    }

    #[test]
    fn test_no_exclusion_without_current() {
        let corpus = vec![note("/v/current.md")];
        let ranking = rank("current", &corpus, None, &SuggestConfig::default());
        assert_eq!(ranking.candidates.len(), 1);
    }

    #[test]
    fn test_short_query_yields_nothing() {
        let corpus = vec![note_with("/v/a.md", &[], &[("b1", 0)])];
        let ranking = rank("a", &corpus, None, &SuggestConfig::default());
        assert_eq!(ranking, Ranking::default());

        let ranking = rank("", &corpus, None, &SuggestConfig::default());
        assert!(ranking.candidates.is_empty());
    }

    #[test]
    fn test_query_length_counts_utf16_units() {
        let corpus = vec![note("/v/🔗 links.md")];
        let ranking = rank("🔗", &corpus, None, &SuggestConfig::default());
        assert_eq!(ranking.candidates.len(), 1);
        assert_eq!(ranking.candidates[0].title, "🔗 links");
    }

    #[test]
    fn test_output_never_exceeds_max() {
        let corpus: Vec<Note> = (0..50).map(|i| note(&format!("/v/topic {i}.md"))).collect();
        for max in [5, 10, 20] {
            let config = SuggestConfig {
                max_suggestions: max,
                ..SuggestConfig::default()
            };
            let ranking = rank("topic", &corpus, None, &config);
            assert_eq!(ranking.candidates.len(), max);
        }
    }

    #[test]
    fn test_heading_candidates() {
        let corpus = vec![note_with(
            "/v/guide.md",
            &[(1, "Setup"), (3, "Advanced setup"), (2, "Usage")],
            &[],
        )];
        let ranking = rank("setup", &corpus, None, &SuggestConfig::default());

        assert_eq!(ranking.candidates.len(), 2);
        let exact = &ranking.candidates[0];
        assert_eq!(exact.kind, CandidateKind::Heading { level: 1 });
        assert_eq!(exact.display, "# Setup (guide)");
        assert_eq!(exact.link_text, "#Setup");
        assert_eq!(exact.note.title, "guide");

        let nested = &ranking.candidates[1];
        assert_eq!(nested.display, "### Advanced setup (guide)");
        assert_eq!(nested.link_text, "#Advanced setup");
    }

    #[test]
    fn test_note_candidate_display() {
        let corpus = vec![note("/v/Meeting Notes.md")];
        let ranking = rank("meet", &corpus, None, &SuggestConfig::default());
        let candidate = &ranking.candidates[0];
        assert_eq!(candidate.kind, CandidateKind::Note);
        assert_eq!(candidate.display, "📄 Meeting Notes");
        assert_eq!(candidate.link_text, "Meeting Notes");
        assert_eq!(candidate.note.path, PathBuf::from("/v/Meeting Notes.md"));
    }

    #[test]
    fn test_block_lookups_are_deferred() {
        let corpus = vec![
            note_with("/v/log.md", &[], &[("x1", 0)]),
            note("/v/plain.md"),
        ];
        let ranking = rank("zz", &corpus, None, &SuggestConfig::default());
        assert!(ranking.candidates.is_empty());
        assert_eq!(ranking.block_lookups.len(), 1);
        assert_eq!(ranking.block_lookups[0].note.title, "log");
    }

    #[test]
    fn test_scan_blocks() {
        let lookup = BlockLookup {
            note: NoteRef {
                path: PathBuf::from("/v/log.md"),
                title: "log".to_string(),
            },
            blocks: vec![
                Block {
                    id: "first".to_string(),
                    range: range(0),
                },
                Block {
                    id: "second".to_string(),
                    range: range(2),
                },
                Block {
                    id: "gone".to_string(),
                    range: range(9),
                },
            ],
        };
        let body = "  Deploy the Service today ^first\n\nunrelated ^second";
        let found = scan_blocks(&lookup, body, "SERVICE");

        assert_eq!(found.len(), 1);
        let candidate = &found[0];
        assert_eq!(candidate.kind, CandidateKind::Block { id: "first".to_string() });
        assert_eq!(candidate.title, "Deploy the Service today ^first");
        assert_eq!(candidate.link_text, "#^first");
        assert_eq!(candidate.display, "🔗 Deploy the Service today ^first... (log)");
    }

    #[test]
    fn test_block_preview_is_truncated() {
        let lookup = BlockLookup {
            note: NoteRef {
                path: PathBuf::from("/v/long.md"),
                title: "long".to_string(),
            },
            blocks: vec![Block {
                id: "l".to_string(),
                range: range(0),
            }],
        };
        let body = format!("{} ^l", "x".repeat(80));
        let found = scan_blocks(&lookup, &body, "xx");
        assert_eq!(found[0].display, format!("🔗 {}... (long)", "x".repeat(50)));
    }

    #[test]
    fn test_failed_body_read_is_swallowed() {
        let corpus = vec![
            note_with("/v/broken.md", &[], &[("b", 0)]),
            note_with("/v/good.md", &[(2, "fine heading")], &[("f", 0)]),
            note("/v/fine title.md"),
        ];
        let bodies = MapBodies(HashMap::from([(
            PathBuf::from("/v/good.md"),
            "a fine block ^f".to_string(),
        )]));

        let ranking = rank("fine", &corpus, None, &SuggestConfig::default());
        assert_eq!(ranking.candidates.len(), 2);

        let late: Vec<Candidate> = ranking
            .block_lookups
            .iter()
            .flat_map(|lookup| resolve_blocks(lookup, &bodies, "fine"))
            .collect();
        assert_eq!(late.len(), 1);
        assert_eq!(late[0].link_text, "#^f");

        let merged = merge(ranking.candidates, late, "fine", 10);
        let titles: Vec<&str> = merged.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["a fine block ^f", "fine heading", "fine title"]);
    }

    #[test]
    fn test_merge_respects_exact_match_and_max() {
        let corpus = vec![note("/v/todo.md"), note("/v/todo list.md")];
        let ranking = rank("todo", &corpus, None, &SuggestConfig::default());

        let lookup = BlockLookup {
            note: NoteRef {
                path: PathBuf::from("/v/x.md"),
                title: "x".to_string(),
            },
            blocks: vec![Block {
                id: "t".to_string(),
                range: range(0),
            }],
        };
        let late = scan_blocks(&lookup, "a todo item ^t", "todo");
        let merged = merge(ranking.candidates, late, "todo", 2);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].title, "todo");
        assert_eq!(merged[1].title, "a todo item ^t");
    }
}
