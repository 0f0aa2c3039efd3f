//! Fixed chord voicings for the seed chord track

/// Semitone offset of a note name from C
fn pitch_class(name: &str) -> Option<u8> {
    let pc = match name {
        "C" => 0,
        "C#" | "Db" => 1,
        "D" => 2,
        "D#" | "Eb" => 3,
        "E" => 4,
        "F" => 5,
        "F#" | "Gb" => 6,
        "G" => 7,
        "G#" | "Ab" => 8,
        "A" => 9,
        "A#" | "Bb" => 10,
        "B" => 11,
        _ => return None,
    };
    Some(pc)
}

/// MIDI note for a note name and octave (C4 = 60)
pub fn note_number(name: &str, octave: i8) -> Option<u8> {
    let pc = pitch_class(name)? as i16;
    let midi = 12 * (octave as i16 + 1) + pc;
    u8::try_from(midi).ok().filter(|n| *n <= 127)
}

/// Chord symbol → voiced notes, lowest first
const VOICINGS: &[(&str, &[(&str, i8)])] = &[
    ("Am", &[("A", 3), ("C", 4), ("E", 4)]),
    ("Am7", &[("A", 3), ("C", 4), ("E", 4), ("G", 4)]),
    ("A", &[("A", 3), ("C#", 4), ("E", 4)]),
    ("Bm", &[("B", 3), ("D", 4), ("F#", 4)]),
    ("Bm7b5", &[("B", 3), ("D", 4), ("F", 4), ("A", 4)]),
    ("Bm7", &[("B", 3), ("D", 4), ("F#", 4), ("A", 4)]),
    ("B", &[("B", 3), ("D#", 4), ("F#", 4)]),
    ("Bmaj7", &[("B", 2), ("D#", 3), ("F#", 3), ("A#", 3)]),
    ("Bb", &[("Bb", 2), ("D", 3), ("F", 3)]),
    ("Bbm", &[("Bb", 2), ("Db", 3), ("F", 3)]),
    ("C", &[("C", 4), ("E", 4), ("G", 4)]),
    ("C#m", &[("C#", 3), ("E", 3), ("G#", 3)]),
    ("C#m7", &[("C#", 3), ("E", 3), ("G#", 3), ("B", 3)]),
    ("Cm", &[("C", 3), ("Eb", 3), ("G", 3)]),
    ("D", &[("D", 3), ("F#", 3), ("A", 3)]),
    ("Dm", &[("D", 3), ("F", 3), ("A", 3)]),
    ("D7", &[("D", 3), ("F#", 3), ("A", 3), ("C", 4)]),
    ("Db", &[("Db", 3), ("F", 3), ("Ab", 3)]),
    ("Eb", &[("Eb", 3), ("G", 3), ("Bb", 3)]),
    ("E", &[("E", 3), ("G#", 3), ("B", 3)]),
    ("E7", &[("E", 3), ("G#", 3), ("B", 3), ("D", 4)]),
    ("Em", &[("E", 3), ("G", 3), ("B", 3)]),
    ("Emaj7", &[("E", 3), ("G#", 3), ("B", 3), ("D#", 4)]),
    ("F", &[("F", 3), ("A", 3), ("C", 4)]),
    ("F#", &[("F#", 3), ("A#", 3), ("C#", 4)]),
    ("F#7", &[("F#", 3), ("A#", 3), ("C#", 4), ("E", 4)]),
    ("F#m", &[("F#", 3), ("A", 3), ("C#", 4)]),
    ("Fmaj7", &[("F", 3), ("A", 3), ("C", 4), ("E", 4)]),
    ("Fm", &[("F", 3), ("Ab", 3), ("C", 4)]),
    ("G", &[("G", 3), ("B", 3), ("D", 4)]),
    ("Gm", &[("G", 3), ("Bb", 3), ("D", 4)]),
    ("G#", &[("G#", 3), ("C", 4), ("D#", 4)]),
    ("G#m", &[("G#", 3), ("B", 3), ("D#", 4)]),
    ("Gmaj7", &[("G", 3), ("B", 3), ("D", 4), ("F#", 4)]),
    ("Ab", &[("Ab", 3), ("C", 4), ("Eb", 4)]),
];

/// Voiced MIDI notes for a chord symbol.
///
/// Symbols outside the table voice to nothing, leaving a silent slot.
///
/// # Examples
/// ```
/// use rppgen::seed::chord_voicing;
///
/// assert_eq!(chord_voicing("Am"), vec![57, 60, 64]);
/// assert_eq!(chord_voicing("Bb"), vec![46, 50, 53]);
/// assert!(chord_voicing("Xsus9").is_empty());
/// ```
pub fn chord_voicing(symbol: &str) -> Vec<u8> {
    VOICINGS
        .iter()
        .find(|(name, _)| *name == symbol)
        .map(|(_, notes)| {
            notes
                .iter()
                .filter_map(|(note, octave)| note_number(note, *octave))
                .collect()
        })
        .unwrap_or_default()
}
