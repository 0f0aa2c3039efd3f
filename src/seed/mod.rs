//! # Seed Projects
//!
//! Generates the per-song REAPER projects the template is later carved from.
//! Each song gets region markers for its sections and two MIDI tracks: block
//! chords and a kick/snare guide. Track 0 (chords) and track 1 (drums) are the
//! records the template keeps as arrangement scaffolds.
//!
//! The song table ships inside the crate as YAML; see [`load_songs`].
//!
//! ## Timing
//! Times are in quarter-note beats until they are written out. Sections in
//! eighth-note meters (`ts_den_pow: 3`) have half-beat counts, so a 7/8 bar is
//! 3.5 beats long. MIDI is written at [`PPQ`] ticks per beat.

mod events;
mod midi;
mod project;
mod types;
mod voicing;

pub use events::{chord_events, drum_events, KICK, SNARE};
pub use midi::{midi_event_lines, midi_item, ItemPlacement, PPQ};
pub use project::{section_starts, song_project, write_seeds};
pub use types::{DrumPattern, NoteEvent, Section, Song};
pub use voicing::{chord_voicing, note_number};

use crate::error::RppError;

const SONG_TABLE: &str = include_str!("songs.yaml");

/// Highest MIDI data byte
const MAX_VELOCITY: u8 = 127;

/// The album's song table
pub fn load_songs() -> Result<Vec<Song>, RppError> {
    parse_songs(SONG_TABLE)
}

/// Parse a song table in the `songs.yaml` format
pub fn parse_songs(source: &str) -> Result<Vec<Song>, RppError> {
    let songs: Vec<Song> =
        serde_yaml::from_str(source).map_err(|e| RppError::Catalog(e.to_string()))?;
    if let Some(song) = songs.iter().find(|s| s.sections.is_empty() || s.bpm == 0) {
        return Err(RppError::Catalog(format!(
            "song {} needs a tempo and at least one section",
            song.stem
        )));
    }
    for song in &songs {
        if let Some(section) = song.sections.iter().find(|s| s.vel > MAX_VELOCITY) {
            return Err(RppError::Catalog(format!(
                "song {} section {} has velocity {} (max {})",
                song.stem, section.name, section.vel, MAX_VELOCITY
            )));
        }
    }
    Ok(songs)
}

#[cfg(test)]
mod tests;
