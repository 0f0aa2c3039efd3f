use super::*;
use crate::chunk::split_document;
use crate::guid::SequentialGuids;
use tempfile::TempDir;

fn static_bloom() -> Song {
    load_songs()
        .unwrap()
        .into_iter()
        .find(|s| s.stem == "01_Static_Bloom")
        .unwrap()
}

#[test]
fn test_song_table_loads() {
    let songs = load_songs().unwrap();
    assert_eq!(songs.len(), 14);
    assert_eq!(songs[0].stem, "01_Static_Bloom");
    assert_eq!(songs[0].bpm, 120);
    assert_eq!(songs[13].stem, "14_Politician");
    assert!(songs.iter().all(|s| !s.sections.is_empty()));
}

#[test]
fn test_section_defaults() {
    let song = static_bloom();
    let intro = &song.sections[0];
    assert_eq!(intro.ts_num, 4);
    assert_eq!(intro.ts_den_pow, 2);

    let bridge = &song.sections[4];
    assert_eq!(bridge.drums, DrumPattern::SevenEight);
    assert_eq!(bridge.bar_len(), 3.5);
}

#[test]
fn test_section_starts_accumulate() {
    let song = static_bloom();
    let starts = section_starts(&song);
    assert_eq!(starts.len(), 7);
    assert_eq!(starts[0], 0.0);
    // 8 bars of 4/4 at 120 BPM
    assert_eq!(starts[1], 16.0);
    assert_eq!(starts[2], 48.0);
    // Bridge in 7/8: 12 bars * 3.5 beats = 42 beats = 21 s
    assert_eq!(starts[5] - starts[4], 21.0);
    // 362 beats total
    assert_eq!(song.beats_to_secs(song.total_beats()), 181.0);
}

#[test]
fn test_project_has_markers_and_two_records() {
    let song = static_bloom();
    let text = song_project(&song, &mut SequentialGuids::default());

    let markers: Vec<&str> = text.lines().filter(|l| l.starts_with("  MARKER ")).collect();
    assert_eq!(markers.len(), 7);
    assert!(markers[0].starts_with("  MARKER 1 0.000000 \"Intro\" 1 0 1 B {"));
    assert!(markers[6].contains("\"Outro\""));

    assert!(text.contains("  MAXPROJLEN 0 185.000000"));
    assert!(text.contains("    PT 0 120 0"));

    let doc = split_document(&text).unwrap();
    assert_eq!(doc.records.len(), 2);
    assert!(doc.records[0].contains("    NAME \"Chords\""));
    assert!(doc.records[0].contains("    PEAKCOL 33522258"));
    assert!(doc.records[1].contains("    NAME \"Drums (Kick+Snare)\""));
    assert!(doc.records[1].contains("    PEAKCOL 22045951"));
    assert_eq!(doc.footer, vec![">".to_string()]);
}

#[test]
fn test_each_track_has_one_item_per_section() {
    let song = static_bloom();
    let text = song_project(&song, &mut SequentialGuids::default());
    let doc = split_document(&text).unwrap();

    for record in &doc.records {
        let items = record.lines().filter(|l| *l == "    <ITEM").count();
        assert_eq!(items, song.sections.len());
    }
    assert!(doc.records[1].contains("      POSITION 112.000000"));
}

#[test]
fn test_invalid_song_table() {
    assert!(matches!(parse_songs("- stem: x"), Err(RppError::Catalog(_))));

    let no_sections = "- { stem: x, title: X, bpm: 90, sections: [] }";
    let err = parse_songs(no_sections).unwrap_err();
    assert!(err.to_string().contains("song x"));
}

#[test]
fn test_drums_default_to_standard() {
    let table = r#"
- stem: x
  title: X
  bpm: 90
  sections:
    - { name: A, bars: 2, chords: [C], bpc: 4 }
"#;
    let songs = parse_songs(table).unwrap();
    assert_eq!(songs[0].sections[0].drums, DrumPattern::Standard);
    assert_eq!(songs[0].sections[0].vel, 80);
}

#[test]
fn test_velocity_above_midi_range_is_rejected() {
    let table = r#"
- stem: x
  title: X
  bpm: 90
  sections:
    - { name: A, bars: 2, chords: [C], bpc: 4, vel: 200 }
"#;
    let err = parse_songs(table).unwrap_err();
    assert!(matches!(err, RppError::Catalog(_)));
    assert!(err.to_string().contains("velocity 200"));

    let ok = table.replace("vel: 200", "vel: 127");
    assert!(parse_songs(&ok).is_ok());
}

#[test]
fn test_write_seeds() {
    let temp_dir = TempDir::new().unwrap();
    let songs = load_songs().unwrap();

    write_seeds(&songs[..2], temp_dir.path(), &mut SequentialGuids::default()).unwrap();

    let written = std::fs::read_to_string(temp_dir.path().join("01_Static_Bloom.rpp")).unwrap();
    assert!(written.starts_with("<REAPER_PROJECT 0.1"));
    assert!(written.ends_with(">\n"));
    assert!(temp_dir.path().join("02_Skywritting.rpp").exists());
    assert!(!temp_dir.path().join("03_Twin_Fish.rpp").exists());
}
