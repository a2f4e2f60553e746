use super::*;
use crate::config::SuggestConfig;
use crate::corpus::BodySource;
use crate::rank::{rank, resolve_blocks, CandidateKind};
use crate::vfs::PhysicalFileSystem;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn create_test_vault() -> (Vault, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let workspace = Workspace::new();
    let vault = Vault::new(workspace, Arc::new(PhysicalFileSystem));
    (vault, temp_dir)
}

#[test]
fn test_initialize_indexes_markdown_files() {
    let (mut vault, temp_dir) = create_test_vault();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("projects")).unwrap();
    fs::write(root.join("Roadmap.md"), "# Roadmap\n\n## Q1 goals\n\nShip it ^ship").unwrap();
    fs::write(root.join("projects/Alpha.md"), "# Alpha").unwrap();
    fs::write(root.join("projects/notes.txt"), "not a note").unwrap();

    let (files, stats) = vault.initialize(root.to_path_buf());

    assert_eq!(files.len(), 2);
    assert_eq!(stats.total_files, 2);
    assert_eq!(stats.indexed, 2);
    assert_eq!(stats.headings, 3);
    assert_eq!(stats.blocks, 1);
    assert_eq!(vault.workspace.note_count(), 2);

    let roadmap = vault.workspace.note_by_path(&root.join("Roadmap.md")).unwrap();
    assert_eq!(roadmap.title, "Roadmap");
    assert_eq!(roadmap.headings[1].text, "Q1 goals");
    assert_eq!(roadmap.headings[1].level, 2);
    assert_eq!(roadmap.blocks[0].id, "ship");
}

#[test]
fn test_update_content_replaces_metadata() {
    let (mut vault, temp_dir) = create_test_vault();
    let path = temp_dir.path().join("draft.md");

    vault.update_content(path.clone(), "# Old heading");
    vault.update_content(path.clone(), "# New heading\n\n## Second");

    let note = vault.workspace.note_by_path(&path).unwrap();
    let headings: Vec<&str> = note.headings.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(headings, vec!["New heading", "Second"]);
    assert_eq!(vault.workspace.note_count(), 1);
}

#[test]
fn test_non_markdown_content_is_ignored() {
    let (mut vault, temp_dir) = create_test_vault();
    vault.update_content(temp_dir.path().join("script.js"), "# not a heading");
    assert_eq!(vault.workspace.note_count(), 0);
}

#[test]
fn test_delete_and_rename() {
    let (mut vault, temp_dir) = create_test_vault();
    let old_path = temp_dir.path().join("old name.md");
    let new_path = temp_dir.path().join("new name.md");

    vault.update_content(old_path.clone(), "# Body");
    vault.rename_file(old_path.clone(), new_path.clone(), "# Body");

    assert!(vault.workspace.note_by_path(&old_path).is_none());
    assert_eq!(
        vault.workspace.note_by_path(&new_path).unwrap().title,
        "new name"
    );

    vault.delete_file(&new_path);
    assert_eq!(vault.workspace.note_count(), 0);
}

#[test]
fn test_body_read_failure_only_drops_that_note() {
    let (mut vault, temp_dir) = create_test_vault();
    let root = temp_dir.path();
    fs::write(root.join("kept.md"), "meeting agenda ^agenda").unwrap();
    vault.initialize(root.to_path_buf());

    // Indexed from editor content only, never written to disk
    let ghost = root.join("unsaved meeting.md");
    vault.update_content(ghost.clone(), "meeting recap ^recap");

    assert!(vault.read_body(&ghost).is_err());

    let config = SuggestConfig::default();
    let ranking = rank("meeting", &vault, None, &config);
    assert_eq!(ranking.candidates.len(), 1);
    assert_eq!(ranking.candidates[0].title, "unsaved meeting");
    assert_eq!(ranking.block_lookups.len(), 2);

    let late: Vec<_> = ranking
        .block_lookups
        .iter()
        .flat_map(|lookup| resolve_blocks(lookup, &vault, "meeting"))
        .collect();
    assert_eq!(late.len(), 1);
    assert_eq!(
        late[0].kind,
        CandidateKind::Block {
            id: "agenda".to_string()
        }
    );
}

#[test]
fn test_rank_over_vault_excludes_current_file() {
    let (mut vault, temp_dir) = create_test_vault();
    let root = temp_dir.path();
    fs::write(root.join("rust.md"), "# Rust").unwrap();
    fs::write(root.join("rust async.md"), "# Rust async").unwrap();
    vault.initialize(root.to_path_buf());

    let current = root.join("rust.md");
    let ranking = rank("rust", &vault, Some(&current), &SuggestConfig::default());

    assert!(ranking
        .candidates
        .iter()
        .all(|candidate| candidate.note.path != current));
    let titles: Vec<&str> = ranking.candidates.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["rust async", "Rust async"]);
}
