//! End-to-end checks of the arrangement engine through the public API: compose
//! sections, rearrange them the way the UI does, and export the result.

use std::fs;

use lyrics_arranger::{
    export_arrangement, render_text, Arrangement, DragResult, EditSession, SectionDraft,
    CUSTOM_LABEL, EXPORT_FILE_NAME,
};

fn draft(label: &str, lyrics: &str) -> SectionDraft {
    let mut draft = SectionDraft::default();
    draft.select_label(label);
    draft.content = lyrics.to_string();
    draft
}

#[test]
fn full_session_produces_expected_export() {
    let mut arrangement = Arrangement::new();

    let mut verse = draft("Verse 1", "la la");
    verse.song_title = "Demo".to_string();
    verse.artist = "The Testers".to_string();
    let verse_id = verse.submit(&mut arrangement).expect("verse is valid");

    let chorus_id = draft("Chorus 1", "na na")
        .submit(&mut arrangement)
        .expect("chorus is valid");

    let mut outro = draft(CUSTOM_LABEL, "fade out");
    outro.custom_label = "Outro".to_string();
    outro.submit(&mut arrangement).expect("custom label is valid");

    // Chorus again after the outro, then pull the outro to the end.
    let copy_id = arrangement.duplicate(&chorus_id).expect("chorus exists");
    assert!(arrangement.apply_drag(&DragResult::dropped(2, 3)));

    let mut edit = EditSession::open(arrangement.find(&verse_id).unwrap());
    edit.content = "la la\nla".to_string();
    assert!(edit.confirm(&mut arrangement));

    assert_eq!(
        render_text(&arrangement),
        "Verse 1\nla la\nla\n\nChorus 1\nna na\n\nChorus 1\nna na\n\nOutro\nfade out"
    );
    assert_eq!(arrangement.get(2).map(|s| &s.id), Some(&copy_id));
    assert_eq!(arrangement.get(0).unwrap().artist, "The Testers");

    let dir = tempfile::tempdir().unwrap();
    let path = export_arrangement(&arrangement, dir.path())
        .unwrap()
        .expect("non-empty arrangement exports");
    assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);
    assert_eq!(fs::read_to_string(path).unwrap(), render_text(&arrangement));
}

#[test]
fn rejected_inputs_never_touch_the_arrangement() {
    let mut arrangement = Arrangement::new();
    let kept = draft("Bridge", "keep me").submit(&mut arrangement).unwrap();
    let gone = draft("Tag", "drop me").submit(&mut arrangement).unwrap();
    assert!(arrangement.delete(&gone));
    let snapshot = arrangement.sections().to_vec();

    assert!(draft("Verse 1", "").submit(&mut arrangement).is_none());
    assert!(draft(CUSTOM_LABEL, "no label").submit(&mut arrangement).is_none());
    assert!(!arrangement.apply_drag(&DragResult::cancelled(0)));
    assert!(!arrangement.delete(&gone));
    assert!(arrangement.duplicate(&gone).is_none());
    assert!(!arrangement.update(&gone, "Tag", "zombie"));

    assert_eq!(arrangement.sections(), snapshot.as_slice());
    assert_eq!(arrangement.find(&kept).unwrap().content, "keep me");
}

#[test]
fn empty_project_has_nothing_to_export() {
    let dir = tempfile::tempdir().unwrap();
    let arrangement = Arrangement::new();
    assert_eq!(render_text(&arrangement), "");
    assert!(export_arrangement(&arrangement, dir.path()).unwrap().is_none());
}
