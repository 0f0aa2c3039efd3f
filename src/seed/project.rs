use super::events::{chord_events, drum_events};
use super::midi::{midi_item, ItemPlacement};
use super::types::Song;
use crate::error::RppError;
use crate::guid::GuidSource;
use crate::layout::song_path;
use crate::output::write_all;
use std::path::Path;
use tracing::info;

/// Seconds of silence left after the last section
const TAIL_SECS: f64 = 4.0;

const CHORD_TRACK: &str = "Chords";
const DRUM_TRACK: &str = "Drums (Kick+Snare)";

/// REAPER's packed track color: red in the low byte, plus the custom-color flag
fn peak_color(r: u32, g: u32, b: u32) -> u32 {
    r + (g << 8) + (b << 16) + 0x0100_0000
}

/// Where each section starts, in seconds
pub fn section_starts(song: &Song) -> Vec<f64> {
    let mut cursor = 0.0;
    song.sections
        .iter()
        .map(|section| {
            let start = song.beats_to_secs(cursor);
            cursor += section.length_beats();
            start
        })
        .collect()
}

/// Render the full seed project for `song`: one region marker per section,
/// a chord track and a kick/snare track, one MIDI item per section on each.
pub fn song_project(song: &Song, guids: &mut dyn GuidSource) -> String {
    let starts = section_starts(song);
    let total_secs = song.beats_to_secs(song.total_beats());

    let mut chord_items = Vec::with_capacity(song.sections.len());
    let mut drum_items = Vec::with_capacity(song.sections.len());
    for (section, &start) in song.sections.iter().zip(&starts) {
        let placement = ItemPlacement {
            position_secs: start,
            length_secs: song.beats_to_secs(section.length_beats()),
            clip_beats: section.length_beats(),
        };
        chord_items.push(midi_item(&section.name, placement, &chord_events(section), guids));
        drum_items.push(midi_item(&section.name, placement, &drum_events(section), guids));
    }

    let mut lines = project_header(song.bpm, total_secs);
    for (idx, (section, start)) in song.sections.iter().zip(&starts).enumerate() {
        lines.push(format!(
            "  MARKER {} {:.6} \"{}\" 1 0 1 B {{{}}} 0",
            idx + 1,
            start,
            section.name,
            guids.next_guid()
        ));
    }
    lines.push(midi_track(CHORD_TRACK, peak_color(82, 130, 255), &chord_items, guids));
    lines.push(midi_track(DRUM_TRACK, peak_color(255, 100, 80), &drum_items, guids));
    lines.push(">".to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn midi_track(name: &str, color: u32, items: &[String], guids: &mut dyn GuidSource) -> String {
    let mut lines = vec![
        format!("  <TRACK {{{}}}", guids.next_guid()),
        format!("    NAME \"{}\"", name),
        format!("    PEAKCOL {}", color),
        "    BEAT -1".to_string(),
        "    AUTOMODE 0".to_string(),
        "    VOLPAN 1 0 0.6 -1".to_string(),
        "    MUTESOLO 0 0 0".to_string(),
        "    IPHASE 0".to_string(),
        "    PLAYOFFS 0 1".to_string(),
        "    ISBUS 0 0".to_string(),
        "    BUSCOMP 0 0 0 0 0".to_string(),
        "    SHOWINMIX 1 0.6667 0.5 1 0.5 0 0 0".to_string(),
        "    FREEMODE 0".to_string(),
        "    SEL 0".to_string(),
        "    REC 0 0 1 0 0 0 0".to_string(),
        "    VU 2".to_string(),
        "    TRACKHEIGHT 0 0 0 0 0 0".to_string(),
        "    INQ 0 0 0 0.5 100 0 0 100".to_string(),
        "    NCHAN 2".to_string(),
        "    FX 1".to_string(),
        format!("    TRACKID {{{}}}", guids.next_guid()),
        "    PERF 0".to_string(),
        "    MIDIOUT -1".to_string(),
        "    MAINSEND 1 0".to_string(),
    ];
    lines.extend(items.iter().cloned());
    lines.push("  >".to_string());
    lines.join("\n")
}

/// Project-level settings up to (not including) the region markers
fn project_header(bpm: u16, total_secs: f64) -> Vec<String> {
    let mut lines: Vec<String> = [
        "<REAPER_PROJECT 0.1 \"6.82/OSX64\" 1708000000",
        "  RIPPLE 0",
        "  GROUPOVERRIDE 0 0 0",
        "  AUTOXFADE 129",
        "  ENVATTACH 3",
        "  POOLEDENVATTACH 0",
        "  MIXERUIFLAGS 11 48",
        "  PEAKGAIN 1",
        "  FEEDBACK 0",
        "  PANLAW 1",
        "  PROJOFFS 0 0 0",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    lines.push(format!("  MAXPROJLEN 0 {:.6}", total_secs + TAIL_SECS));

    lines.extend(
        [
            "  GRID 3199 8 1 8 1 0 0 0",
            "  TIMEMODE 1 5 -1 30 0 0 -1",
            "  VIDEO_CONFIG 0 0 256",
            "  PANMODE 3",
            "  CURSOR 0",
            "  ZOOM 100 0 0",
            "  VZOOMEX 6 0",
            "  USE_REC_CFG 0",
            "  RECMODE 1",
            "  SMPTESYNC 0 30 100 40 1000 300 0 0 0 0 0",
            "  LOOP 0",
            "  LOOPGRAN 0",
            "  RECORD_PATH \"\" \"\"",
            "  <RECORD_CFG",
            "    ZXZhdw==",
            "  >",
            "  <APPLYFX_CFG",
            "  >",
            "  RENDER_FILE \"\"",
            "  RENDER_PATTERN \"\"",
            "  RENDER_FMT 0 2 0",
            "  RENDER_1X 0",
            "  RENDER_RANGE 1 0 0 18 1000",
            "  RENDER_RESAMPLE 3 0 1",
            "  RENDER_ADDTOPROJ 0",
            "  RENDER_STEMS 0",
            "  RENDER_DITHER 0",
            "  TIMELOCKMODE 1",
            "  TEMPOENVLOCKMODE 1",
            "  ITEMMIX 1",
            "  DEFPITCHMODE 589824 0",
            "  TAKELANE 1",
            "  SAMPLERATE 48000 0 0",
            "  <RENDER_CFG2",
            "  >",
            "  LOCK 1",
            "  <METRONOME 6 2",
            "    VOL 0.25 0.125",
            "    FREQ 800 1600 1",
            "    BEATLEN 4",
            "    SAMPLES \"\" \"\"",
            "    PATTERN 2863311530 2863311530",
            "    MULT 1",
            "  >",
            "  MASTER_NCH 2",
            "  MASTER_VOLUME 1",
            "  MASTER_FX 1",
            "  MASTER_SEL 0",
            "  <TEMPOENVEX",
            "    ACT 0 -1",
            "    VIS 1 0 1",
            "    LANEHEIGHT 0 0",
            "    ARM 0",
            "    DEFSHAPE 0 -1 -1",
        ]
        .iter()
        .map(|s| s.to_string()),
    );

    lines.push(format!("    PT 0 {} 0", bpm));
    lines.push("  >".to_string());
    lines.push("  <PROJBAY".to_string());
    lines.push("  >".to_string());
    lines
}

/// Write `<stem>.rpp` for every song into `output_dir`
pub fn write_seeds(
    songs: &[Song],
    output_dir: &Path,
    guids: &mut dyn GuidSource,
) -> Result<(), RppError> {
    for song in songs {
        let path = song_path(output_dir, &song.stem);
        write_all(&song_project(song, guids), &[path])?;

        let total_secs = song.beats_to_secs(song.total_beats());
        info!(
            "{}.rpp ({:.1} min, {} BPM)",
            song.stem,
            total_secs / 60.0,
            song.bpm
        );
    }
    info!(count = songs.len(), dir = %output_dir.display(), "seed projects generated");
    Ok(())
}
