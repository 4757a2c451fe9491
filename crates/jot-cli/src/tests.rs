use chrono::{Duration, TimeZone, Utc};
use jot_core::{NewNote, Note, NoteId, NoteStore};
use pretty_assertions::assert_eq;

use crate::cli::ExportFormat;
use crate::commands::add::run_add;
use crate::commands::common::{
    format_note_lines, format_relative_time, normalize_content, note_preview, note_to_list_item,
    parse_note_id, resolve_note_content,
};
use crate::commands::delete::run_delete;
use crate::commands::export::run_export;
use crate::error::CliError;

fn note(id: i64, content: &str) -> Note {
    NewNote::with_created_time(content, Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap())
        .persisted(NoteId::new(id))
}

async fn ready_store() -> NoteStore {
    let store = NoteStore::in_memory();
    store.initialize().await.unwrap();
    store
}

#[test]
fn normalize_content_trims_and_rejects_empty() {
    assert_eq!(normalize_content("  hello  "), Some("hello".to_string()));
    assert_eq!(normalize_content(" \n\t "), None);
}

#[test]
fn normalize_content_keeps_multiline_text() {
    assert_eq!(
        normalize_content("line 1\nline 2\n"),
        Some("line 1\nline 2".to_string())
    );
}

#[test]
fn resolve_note_content_joins_arguments() {
    let parts = vec!["Buy".to_string(), "milk".to_string()];
    assert_eq!(resolve_note_content(&parts).unwrap(), "Buy milk");
}

#[test]
fn parse_note_id_accepts_integers() {
    assert_eq!(parse_note_id(" 12 ").unwrap(), NoteId::new(12));
}

#[test]
fn parse_note_id_rejects_empty_and_garbage() {
    assert!(matches!(parse_note_id("  "), Err(CliError::EmptyNoteId)));
    assert!(matches!(
        parse_note_id("abc"),
        Err(CliError::InvalidNoteId(id)) if id == "abc"
    ));
}

#[test]
fn format_relative_time_units() {
    let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    assert_eq!(format_relative_time(now - Duration::seconds(30), now), "just now");
    assert_eq!(format_relative_time(now - Duration::minutes(2), now), "2m ago");
    assert_eq!(format_relative_time(now - Duration::hours(2), now), "2h ago");
    assert_eq!(format_relative_time(now - Duration::days(3), now), "3d ago");
    assert_eq!(format_relative_time(now + Duration::hours(1), now), "just now");
}

#[test]
fn note_preview_collapses_whitespace_and_truncates() {
    let short = note(1, "  hello    world \nsecond line");
    assert_eq!(note_preview(&short, 40), "hello world");

    let long = note(2, "abcdefghijklmnopqrstuvwxyz");
    assert_eq!(note_preview(&long, 10), "abcdefg...");
}

#[test]
fn format_note_lines_keeps_order() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let lines = format_note_lines(&[note(2, "Call bank"), note(1, "Buy milk")], now);

    assert_eq!(lines.len(), 2);
    assert!(lines[0].trim_start().starts_with("2  Call bank"));
    assert!(lines[1].trim_start().starts_with("1  Buy milk"));
    assert!(lines[0].ends_with("2h ago"));
}

#[test]
fn note_to_list_item_copies_fields() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 30).unwrap();
    let item = note_to_list_item(&note(5, "Buy milk"), now);

    assert_eq!(item.id, 5);
    assert_eq!(item.content, "Buy milk");
    assert_eq!(item.relative_time, "just now");
}

#[tokio::test(flavor = "multi_thread")]
async fn add_then_delete_through_commands() {
    let store = ready_store().await;

    run_add(&["Buy".to_string(), "milk".to_string()], &store)
        .await
        .unwrap();
    let notes = store.list_all().await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].content, "Buy milk");

    run_delete(&notes[0].id.to_string(), &store).await.unwrap();
    run_delete(&notes[0].id.to_string(), &store).await.unwrap();
    assert!(store.list_all().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn export_writes_file() {
    let store = ready_store().await;
    store
        .create_note(NewNote::new("exported"))
        .await
        .unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("notes.md");
    run_export(ExportFormat::Markdown, Some(&path), &store)
        .await
        .unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("exported"));
    assert!(written.contains("createdTime: "));
}

#[tokio::test(flavor = "multi_thread")]
async fn commands_surface_store_errors_after_close() {
    let store = ready_store().await;
    store.close().await.unwrap();

    let err = run_delete("1", &store).await.unwrap_err();
    assert!(matches!(
        err,
        CliError::Core(jot_core::Error::StorageUnavailable(_))
    ));
}
