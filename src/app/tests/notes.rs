//! Saving, loading and autosave.

use anyhow::Result;
use ratatui::crossterm::event::KeyCode;

use super::helpers::{
    create_test_app, create_test_app_with_lines, create_test_app_with_settings, ctrl_key, key,
    type_str,
};
use crate::app::{App, AppMode, PromptKind, StatusLevel, welcome_lines};
use crate::cli::Args;
use crate::fs::{AutosaveSnapshot, PersistedSettings, SlashpadPaths, create_note, list_notes};

fn status_text(app: &App) -> Option<&str> {
    app.status.as_ref().map(|s| s.text.as_str())
}

fn no_args() -> Args {
    Args {
        dir: None,
        trigger: None,
        background_provider: false,
    }
}

// =============================================================================
// Startup
// =============================================================================

#[test]
fn fresh_start_shows_welcome_document() -> Result<()> {
    let (app, _dir) = create_test_app()?;

    assert_eq!(app.buffer().lines(), welcome_lines('/').as_slice());
    assert!(!app.editor.is_dirty);
    assert_eq!(app.note.id, None);
    assert!(app.paths().data_dir().is_dir());
    Ok(())
}

#[test]
fn startup_restores_autosave() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let paths = SlashpadPaths::new(dir.path());
    paths.ensure_data_dir()?;
    paths.save_autosave(&AutosaveSnapshot {
        note_id: Some("abc".to_string()),
        title: "Groceries".to_string(),
        lines: vec!["- [ ] eggs".to_string()],
    })?;

    let app = App::with_settings(paths, PersistedSettings::default());

    assert_eq!(app.buffer().lines(), ["- [ ] eggs"]);
    assert_eq!(app.note.title, "Groceries");
    assert_eq!(app.note.id.as_deref(), Some("abc"));
    assert!(!app.editor.is_dirty);
    Ok(())
}

#[test]
fn corrupt_autosave_falls_back_to_welcome_with_warning() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let paths = SlashpadPaths::new(dir.path());
    paths.ensure_data_dir()?;
    std::fs::write(paths.autosave_file(), "{not json")?;

    let app = App::with_settings(paths, PersistedSettings::default());

    assert_eq!(app.buffer().lines(), welcome_lines('/').as_slice());
    let status = app.status.as_ref().unwrap();
    assert_eq!(status.level, StatusLevel::Warning);
    assert!(status.text.starts_with("Failed to restore autosave"));
    Ok(())
}

#[test]
fn cli_trigger_overrides_settings_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let paths = SlashpadPaths::new(dir.path());
    paths.ensure_data_dir()?;
    paths.save_settings(&PersistedSettings {
        trigger: ';',
        ..PersistedSettings::default()
    })?;

    let app = App::new(paths.clone(), &no_args());
    assert_eq!(app.palette().trigger(), ';');

    let args = Args {
        trigger: Some('!'),
        ..no_args()
    };
    let app = App::new(paths, &args);
    assert_eq!(app.palette().trigger(), '!');
    Ok(())
}

#[test]
fn broken_settings_file_uses_defaults_with_warning() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let paths = SlashpadPaths::new(dir.path());
    paths.ensure_data_dir()?;
    std::fs::write(paths.settings_file(), "trigger = /")?;

    let app = App::new(paths, &no_args());

    assert_eq!(app.palette().trigger(), '/');
    assert!(status_text(&app).is_some_and(|t| t.starts_with("Failed to load settings")));
    Ok(())
}

// =============================================================================
// Saving
// =============================================================================

#[test]
fn save_without_title_asks_for_one_then_saves() -> Result<()> {
    let (mut app, _dir) = create_test_app_with_lines(&["hello"], 0, 5)?;
    type_str(&mut app, "!");
    app.write_autosave();
    assert!(app.paths().autosave_file().exists());

    app.handle_key(ctrl_key('s'));
    assert_eq!(app.mode(), AppMode::Prompt);
    assert!(matches!(
        app.prompt.as_ref().map(|p| &p.kind),
        Some(PromptKind::Title { save_after: true })
    ));

    type_str(&mut app, "  Greeting ");
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.mode(), AppMode::Edit);
    assert_eq!(status_text(&app), Some("Saved new note"));
    assert_eq!(app.note.title, "Greeting");
    assert!(!app.editor.is_dirty);
    assert!(!app.paths().autosave_file().exists());

    let notes = list_notes(app.paths())?;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Greeting");
    assert_eq!(notes[0].lines, ["hello!"]);
    assert_eq!(app.note.id.as_deref(), Some(notes[0].id.as_str()));
    Ok(())
}

#[test]
fn cancelled_title_prompt_does_not_save() -> Result<()> {
    let (mut app, _dir) = create_test_app_with_lines(&["hello"], 0, 5)?;

    app.handle_key(ctrl_key('s'));
    type_str(&mut app, "Draft");
    app.handle_key(key(KeyCode::Esc));

    assert_eq!(app.mode(), AppMode::Edit);
    assert!(app.note.title.is_empty());
    assert!(list_notes(app.paths())?.is_empty());
    Ok(())
}

#[test]
fn second_save_updates_the_same_note() -> Result<()> {
    let (mut app, _dir) = create_test_app_with_lines(&["v1"], 0, 2)?;
    app.note.title = "Versions".to_string();

    app.handle_key(ctrl_key('s'));
    assert_eq!(status_text(&app), Some("Saved new note"));
    let id = app.note.id.clone().unwrap();

    type_str(&mut app, "!");
    app.handle_key(ctrl_key('s'));
    assert_eq!(status_text(&app), Some("Note updated"));
    assert_eq!(app.note.id.as_deref(), Some(id.as_str()));

    let notes = list_notes(app.paths())?;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].lines, ["v1!"]);
    Ok(())
}

#[test]
fn saving_vanished_note_reports_and_resets_id() -> Result<()> {
    let (mut app, _dir) = create_test_app_with_lines(&["text"], 0, 0)?;
    app.note.title = "Gone".to_string();
    app.note.id = Some("missing".to_string());

    app.handle_key(ctrl_key('s'));

    let status = app.status.as_ref().unwrap();
    assert_eq!(status.level, StatusLevel::Warning);
    assert!(status.text.starts_with("Save failed"));
    assert_eq!(app.note.id, None);

    // Next save creates a new note
    app.handle_key(ctrl_key('s'));
    assert_eq!(status_text(&app), Some("Saved new note"));
    Ok(())
}

#[test]
fn title_prompt_renames_without_saving() -> Result<()> {
    let (mut app, _dir) = create_test_app_with_lines(&["text"], 0, 0)?;
    app.note.title = "Old".to_string();

    app.handle_key(ctrl_key('t'));
    assert_eq!(app.prompt.as_ref().map(|p| p.input.as_str()), Some("Old"));

    for _ in 0..3 {
        app.handle_key(key(KeyCode::Backspace));
    }
    type_str(&mut app, "New");
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.note.title, "New");
    assert!(app.editor.is_dirty);
    assert!(list_notes(app.paths())?.is_empty());
    Ok(())
}

// =============================================================================
// New note / loading
// =============================================================================

#[test]
fn new_note_clears_document_and_autosave() -> Result<()> {
    let (mut app, _dir) = create_test_app_with_lines(&["old"], 0, 3)?;
    app.note.title = "Old".to_string();
    app.write_autosave();

    app.handle_key(ctrl_key('n'));

    assert!(app.buffer().is_empty());
    assert!(app.note.title.is_empty());
    assert_eq!(app.note.id, None);
    assert!(!app.paths().autosave_file().exists());
    assert_eq!(status_text(&app), Some("New note"));
    Ok(())
}

#[test]
fn load_note_from_picker() -> Result<()> {
    let (mut app, _dir) = create_test_app()?;
    let stored = create_note(app.paths(), "Recipe", &["# Pancakes".to_string()])?;

    app.handle_key(ctrl_key('o'));
    assert_eq!(app.mode(), AppMode::Notes);
    assert_eq!(app.notes_list.notes.len(), 1);

    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.mode(), AppMode::Edit);
    assert_eq!(app.buffer().lines(), ["# Pancakes"]);
    assert_eq!(app.note.id.as_deref(), Some(stored.id.as_str()));
    assert_eq!(status_text(&app), Some("Opened \"Recipe\""));

    // The loaded note is snapshotted so a restart resumes it
    let snapshot = app.paths().load_autosave()?.unwrap();
    assert_eq!(snapshot.note_id, Some(stored.id));
    assert_eq!(snapshot.lines, ["# Pancakes"]);
    Ok(())
}

#[test]
fn picker_navigation_wraps_and_escape_closes() -> Result<()> {
    let (mut app, _dir) = create_test_app()?;
    create_note(app.paths(), "One", &[])?;
    create_note(app.paths(), "Two", &[])?;

    app.handle_key(ctrl_key('o'));
    app.handle_key(key(KeyCode::Up));
    assert_eq!(app.notes_list.selected, 1);
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.notes_list.selected, 0);

    let before = app.buffer().lines().to_vec();
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.mode(), AppMode::Edit);
    assert_eq!(app.buffer().lines(), before.as_slice());
    Ok(())
}

#[test]
fn enter_on_empty_picker_just_closes() -> Result<()> {
    let (mut app, _dir) = create_test_app()?;

    app.handle_key(ctrl_key('o'));
    assert!(app.notes_list.notes.is_empty());
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.mode(), AppMode::Edit);
    Ok(())
}

// =============================================================================
// Autosave
// =============================================================================

#[test]
fn tick_writes_autosave_after_debounce() -> Result<()> {
    let settings = PersistedSettings {
        autosave_debounce_ms: 0,
        ..PersistedSettings::default()
    };
    let (mut app, _dir) = create_test_app_with_settings(settings)?;
    app.handle_key(ctrl_key('n'));

    app.tick();
    assert!(!app.paths().autosave_file().exists());

    type_str(&mut app, "draft");
    assert!(app.editor.is_dirty);
    app.tick();

    assert!(!app.editor.is_dirty);
    let snapshot = app.paths().load_autosave()?.unwrap();
    assert_eq!(snapshot.lines, ["draft"]);
    Ok(())
}

#[test]
fn tick_waits_for_debounce() -> Result<()> {
    let settings = PersistedSettings {
        autosave_debounce_ms: 60_000,
        ..PersistedSettings::default()
    };
    let (mut app, _dir) = create_test_app_with_settings(settings)?;

    type_str(&mut app, "x");
    app.tick();

    assert!(app.editor.is_dirty);
    assert!(!app.paths().autosave_file().exists());
    Ok(())
}

#[test]
fn flush_autosave_writes_pending_changes() -> Result<()> {
    let (mut app, _dir) = create_test_app_with_lines(&[""], 0, 0)?;
    app.flush_autosave()?;
    assert!(!app.paths().autosave_file().exists());

    type_str(&mut app, "bye");
    app.flush_autosave()?;

    let snapshot = app.paths().load_autosave()?.unwrap();
    assert_eq!(snapshot.lines, ["bye"]);
    assert!(!app.editor.is_dirty);
    Ok(())
}

#[test]
fn caret_moves_do_not_dirty_the_note() -> Result<()> {
    let (mut app, _dir) = create_test_app_with_lines(&["abc"], 0, 3)?;

    app.handle_key(key(KeyCode::Left));
    app.handle_key(key(KeyCode::Home));

    assert!(!app.editor.is_dirty);
    Ok(())
}

// =============================================================================
// Paste
// =============================================================================

#[test]
fn paste_normalizes_line_endings_and_drops_control_chars() -> Result<()> {
    let (mut app, _dir) = create_test_app_with_lines(&[""], 0, 0)?;

    app.handle_paste("one\r\ntwo\rthree\u{7}");

    assert_eq!(app.buffer().lines(), ["one", "two", "three"]);
    assert!(app.editor.is_dirty);
    Ok(())
}

#[test]
fn pasted_trigger_does_not_open_palette() -> Result<()> {
    let (mut app, _dir) = create_test_app_with_lines(&[""], 0, 0)?;

    app.handle_paste("/");

    assert!(!app.palette().is_open());
    assert_eq!(app.buffer().lines(), ["/"]);
    Ok(())
}

#[test]
fn ctrl_q_quits() -> Result<()> {
    let (mut app, _dir) = create_test_app()?;
    assert!(!app.should_quit());
    app.handle_key(ctrl_key('q'));
    assert!(app.should_quit());
    Ok(())
}
