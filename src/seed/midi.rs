//! Inline MIDI item blocks in REAPER's text format

use super::types::NoteEvent;
use crate::guid::GuidSource;

/// Ticks per quarter note
pub const PPQ: u32 = 960;

const NOTE_ON: u8 = 0x90;
const NOTE_OFF: u8 = 0x80;
const CONTROL_CHANGE: u8 = 0xb0;
const ALL_NOTES_OFF: u8 = 0x7b;

fn to_ticks(beats: f64) -> i64 {
    (beats * PPQ as f64).round_ties_even() as i64
}

/// Delta-timed `E` lines for a clip of `clip_beats` length.
///
/// Each note becomes a note-on/note-off pair; an all-notes-off controller
/// closes the clip. Events are ordered by tick, then status byte, so a
/// note-off sorts before a note-on at the same tick.
pub fn midi_event_lines(events: &[NoteEvent], clip_beats: f64) -> Vec<String> {
    let mut flat: Vec<(i64, u8, u8, u8)> = Vec::with_capacity(events.len() * 2 + 1);
    for ev in events {
        flat.push((to_ticks(ev.start), NOTE_ON, ev.pitch, ev.velocity));
        flat.push((to_ticks(ev.start + ev.duration), NOTE_OFF, ev.pitch, 0));
    }
    flat.push((to_ticks(clip_beats), CONTROL_CHANGE, ALL_NOTES_OFF, 0));
    flat.sort_by_key(|&(tick, status, _, _)| (tick, status));

    let mut prev = 0;
    flat.into_iter()
        .map(|(tick, status, d1, d2)| {
            let delta = tick - prev;
            prev = tick;
            format!("      E {} {:02x} {:02x} {:02x}", delta, status, d1, d2)
        })
        .collect()
}

/// Placement of one MIDI item on the timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPlacement {
    pub position_secs: f64,
    pub length_secs: f64,
    pub clip_beats: f64,
}

/// `<ITEM ...>` block holding one section's notes
pub fn midi_item(
    name: &str,
    placement: ItemPlacement,
    events: &[NoteEvent],
    guids: &mut dyn GuidSource,
) -> String {
    let mut lines = vec![
        "    <ITEM".to_string(),
        format!("      POSITION {:.6}", placement.position_secs),
        "      SNAPOFFS 0".to_string(),
        format!("      LENGTH {:.6}", placement.length_secs),
        "      LOOP 0".to_string(),
        "      ALLTAKES 0".to_string(),
        "      FADEIN 1 0 0 1 0 0 0".to_string(),
        "      FADEOUT 1 0 0 1 0 0 0".to_string(),
        "      MUTE 0 0".to_string(),
        "      SEL 0".to_string(),
        format!("      IGUID {{{}}}", guids.next_guid()),
        "      IID 1".to_string(),
        format!("      NAME \"{}\"", name),
        "      VOLPAN 1 0 1 -1".to_string(),
        "      SOFFS 0".to_string(),
        "      PLAYRATE 1 1 0 -1 0 0.0025".to_string(),
        "      CHANMODE 0".to_string(),
        format!("      GUID {{{}}}", guids.next_guid()),
        "      <SOURCE MIDI".to_string(),
        format!("        HASDATA 1 {} QN", PPQ),
        "        CCINTERP 32".to_string(),
        format!("        POOLEDEVTS {{{}}}", guids.next_guid()),
        "        LAST_REC_LAUNCHQUANT 0".to_string(),
    ];
    lines.extend(midi_event_lines(events, placement.clip_beats));
    lines.push("        CCEVT -1 0 0".to_string());
    lines.push("      >".to_string());
    lines.push("    >".to_string());
    lines.join("\n")
}
