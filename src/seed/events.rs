//! Note event generation for chord and drum tracks

use super::types::{DrumPattern, NoteEvent, Section};
use super::voicing::chord_voicing;

pub const KICK: u8 = 36;
pub const SNARE: u8 = 38;

/// Drum hit length in beats
const HIT: f64 = 0.35;

/// Gap left between consecutive chords, in beats
const CHORD_GAP: f64 = 0.05;

/// Block chords for a section, one chord every `bpc` beats, cycling through
/// the progression. The last chord is cut at the section end.
pub fn chord_events(section: &Section) -> Vec<NoteEvent> {
    let mut events = Vec::new();
    if section.chords.is_empty() || section.bpc <= 0.0 {
        return events;
    }

    let total = section.length_beats();
    let mut beat = 0.0;
    let mut idx = 0;
    while beat < total - 0.01 {
        let symbol = &section.chords[idx % section.chords.len()];
        let duration = section.bpc.min(total - beat) - CHORD_GAP;
        for pitch in chord_voicing(symbol) {
            events.push(NoteEvent::new(pitch, beat, duration, section.vel));
        }
        beat += section.bpc;
        idx += 1;
    }
    events
}

/// Kick and snare hits for a section, bar by bar
pub fn drum_events(section: &Section) -> Vec<NoteEvent> {
    let bar_len = section.bar_len();
    let mut events = Vec::new();

    for bar in 0..section.bars {
        let b = bar as f64 * bar_len;
        let hits: &[(u8, f64, u8)] = match section.drums {
            DrumPattern::None => &[],
            DrumPattern::KickOnly => &[(KICK, 0.0, 90)],
            DrumPattern::Standard => &[
                (KICK, 0.0, 100),
                (KICK, 2.0, 95),
                (SNARE, 1.0, 90),
                (SNARE, 3.0, 90),
            ],
            DrumPattern::Driving => &[
                (KICK, 0.0, 105),
                (KICK, 0.5, 80),
                (KICK, 2.0, 100),
                (KICK, 2.5, 75),
                (SNARE, 1.0, 95),
                (SNARE, 3.0, 95),
            ],
            DrumPattern::HalfTime => &[(KICK, 0.0, 90), (SNARE, 2.0, 80)],
            DrumPattern::BridgeSparse => &[(KICK, 0.0, 85), (SNARE, 2.5, 75)],
            DrumPattern::SevenEight => &[(KICK, 0.0, 105), (KICK, 2.5, 90), (SNARE, 1.5, 95)],
            DrumPattern::SixEight => &[(KICK, 0.0, 95), (SNARE, 1.5, 85)],
            DrumPattern::FiveFour => &[
                (KICK, 0.0, 100),
                (KICK, 2.0, 90),
                (SNARE, 1.0, 88),
                (SNARE, 3.0, 88),
            ],
            DrumPattern::Intense => &[
                (KICK, 0.0, 110),
                (KICK, 1.0, 95),
                (KICK, 2.0, 105),
                (KICK, 3.0, 90),
                (SNARE, 1.0, 100),
                (SNARE, 3.0, 100),
            ],
            DrumPattern::Dnb => &[(KICK, 0.0, 110), (KICK, 2.5, 95), (SNARE, 1.5, 105)],
        };

        events.extend(
            hits.iter()
                .map(|&(pitch, offset, velocity)| NoteEvent::new(pitch, b + offset, HIT, velocity)),
        );

        // Ghost backbeat only fits in a full 4-beat bar
        if section.drums == DrumPattern::Dnb && bar_len >= 4.0 {
            events.push(NoteEvent::new(SNARE, b + 3.5, HIT, 100));
        }
    }
    events
}
