//! Song table types

use serde::Deserialize;

fn default_velocity() -> u8 {
    80
}

fn default_drums() -> DrumPattern {
    DrumPattern::Standard
}

fn default_ts_num() -> u8 {
    4
}

fn default_ts_den_pow() -> u8 {
    2
}

/// Per-bar kick/snare pattern of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrumPattern {
    None,
    KickOnly,
    Standard,
    Driving,
    HalfTime,
    BridgeSparse,
    /// 7/8 groove
    #[serde(rename = "78")]
    SevenEight,
    /// 6/8 groove
    #[serde(rename = "68")]
    SixEight,
    /// 5/4 groove
    #[serde(rename = "54")]
    FiveFour,
    Intense,
    Dnb,
}

/// One arrangement section (verse, chorus, ...)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Section {
    pub name: String,
    pub bars: u32,
    pub chords: Vec<String>,
    /// Beats per chord
    pub bpc: f64,
    #[serde(default = "default_drums")]
    pub drums: DrumPattern,
    #[serde(default = "default_velocity")]
    pub vel: u8,
    #[serde(default = "default_ts_num")]
    pub ts_num: u8,
    /// Time signature denominator as a power of two (2 = quarter, 3 = eighth)
    #[serde(default = "default_ts_den_pow")]
    pub ts_den_pow: u8,
}

impl Section {
    /// Bar length in quarter-note beats
    pub fn bar_len(&self) -> f64 {
        let beat = if self.ts_den_pow == 2 { 1.0 } else { 0.5 };
        self.ts_num as f64 * beat
    }

    pub fn length_beats(&self) -> f64 {
        self.bars as f64 * self.bar_len()
    }
}

/// A song and its section plan
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Song {
    /// File name without extension, e.g. `01_Static_Bloom`
    pub stem: String,
    pub title: String,
    pub bpm: u16,
    pub sections: Vec<Section>,
}

impl Song {
    pub fn total_beats(&self) -> f64 {
        self.sections.iter().map(Section::length_beats).sum()
    }

    pub fn beats_to_secs(&self, beats: f64) -> f64 {
        beats * 60.0 / self.bpm as f64
    }
}

/// A note with start and duration in quarter-note beats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    pub pitch: u8,
    pub start: f64,
    pub duration: f64,
    pub velocity: u8,
}

impl NoteEvent {
    pub fn new(pitch: u8, start: f64, duration: f64, velocity: u8) -> Self {
        Self {
            pitch,
            start,
            duration,
            velocity,
        }
    }
}
