//! Album file coverage: every song has its REAPER project and both MIDI
//! exports on disk.

use crate::layout::Layout;
use crate::seed::Song;
use std::path::Path;

pub const PASS_MESSAGE: &str = "OK: Catalog has all expected REAPER and MIDI files.";

/// MIDI export prefixes, in album order. The first two songs were exported
/// before track numbers were added to file names.
const MIDI_STEMS: &[&str] = &[
    "static_bloom",
    "skywritting",
    "03_twin_fish",
    "04_binary_heart",
    "05_electric_pickle",
    "06_kaleidoscope_mind",
    "07_rise_of_neon_dawn",
    "08_whispers_at_a_void",
    "09_oddysea",
    "10_echoes_in_the_static",
    "11_foul_beast",
    "12_the_somnium_shift",
    "13_benson_and_hedges",
    "14_politician",
];

/// `<stem>.rpp` for every song
pub fn expected_projects(songs: &[Song]) -> Vec<String> {
    songs.iter().map(|s| format!("{}.rpp", s.stem)).collect()
}

/// Chord and drum `.mid` exports for every song
pub fn expected_midi() -> Vec<String> {
    MIDI_STEMS
        .iter()
        .flat_map(|stem| [format!("{}_chords.mid", stem), format!("{}_drums.mid", stem)])
        .collect()
}

/// Relative paths (`reaper/...`, `midi/...`) of expected files that do not exist
pub fn missing_files(layout: &Layout, songs: &[Song]) -> Vec<String> {
    let mut missing = missing_in(&layout.reaper_dir(), "reaper", &expected_projects(songs));
    missing.extend(missing_in(&layout.midi_dir(), "midi", &expected_midi()));
    missing
}

fn missing_in(dir: &Path, label: &str, names: &[String]) -> Vec<String> {
    names
        .iter()
        .filter(|name| !dir.join(name).exists())
        .map(|name| format!("{}/{}", label, name))
        .collect()
}
