//! # Template QC
//!
//! Post-generation checks on a rendered template.
//!
//! ## Purpose
//! The generator builds the template from a catalog; this module re-reads the
//! written text on its own (it does not reuse the generator's chunk scan or
//! any of its state) and confirms the contract a mix engineer relies on.
//!
//! ## Checks
//! Run in order, stopping at the first failure:
//! 1. Every required folder, scaffold and bus name is the `NAME` of a track
//! 2. No unsupported legacy token appears anywhere in the file
//! 3. At least seven section `MARKER` lines exist
//! 4. Each contract bus has enough `AUXRECV` lines
//!
//! ## Entry Point
//! `check(text: &str) -> Result<QcPass, QcFailure>`
//!
//! ## Example
//! ```rust
//! use rppgen::qc::{check, QcFailure};
//!
//! let result = check("<REAPER_PROJECT\n>");
//! assert!(matches!(result, Err(QcFailure::MissingName(_))));
//! ```

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

/// Names every v01 template must contain
pub const REQUIRED_NAMES: &[&str] = &[
    "00_REF",
    "10_DRUMS",
    "20_BASS",
    "30_HARMONY",
    "40_LEADS",
    "50_VOX",
    "60_FX_PRINTS",
    "70_EDIT_BUILDER",
    "80_BUSES",
    "90_MIX_PRINT",
    "arr_chords_scaffold",
    "arr_drums_scaffold",
    "BUS_DRUM",
    "BUS_BASS",
    "BUS_MUSIC",
    "BUS_VOX",
    "BUS_FX",
    "BUS_PARALLEL",
    "BUS_PREMASTER",
    "mix_print_check",
];

/// Project tokens from older REAPER versions the template must not carry
pub const LEGACY_TOKENS: &[&str] = &[
    "GLOBAL_AUTO",
    "MASTER_PAN",
    "MASTER_MUTE",
    "MASTER_BYPASS",
    "MASTER_MIXENV",
    "MASTER_STEREOOUT",
];

pub const MIN_SECTION_MARKERS: usize = 7;

/// Minimum `AUXRECV` count per contract bus
pub const BUS_MINIMUMS: &[(&str, usize)] = &[
    ("BUS_DRUM", 1),
    ("BUS_BASS", 1),
    ("BUS_MUSIC", 1),
    ("BUS_VOX", 1),
    ("BUS_FX", 1),
    ("BUS_PREMASTER", 5),
];

pub const PASS_MESSAGE: &str = "v01 template QC passed.";

/// First check that failed, with the message printed after `FAIL: `
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QcFailure {
    #[error("Missing template file: {0}")]
    MissingFile(String),

    #[error("Cannot read template file {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Missing required track/folder name: {0}")]
    MissingName(String),

    #[error("Found unsupported token in template: {0}")]
    LegacyToken(String),

    #[error("Expected at least {minimum} section markers, found {found}")]
    TooFewMarkers { minimum: usize, found: usize },

    #[error("Missing track chunk for {0}")]
    MissingBus(String),

    #[error("{bus} expected >= {minimum} AUXRECV entries, found {found}")]
    TooFewSends {
        bus: String,
        minimum: usize,
        found: usize,
    },
}

/// Successful QC run
#[derive(Debug, Clone, PartialEq)]
pub struct QcPass {
    pub tracks: usize,
    pub markers: usize,
}

impl QcPass {
    pub fn message(&self) -> &'static str {
        PASS_MESSAGE
    }
}

/// Run every check against a rendered template
pub fn check(text: &str) -> Result<QcPass, QcFailure> {
    let lines: Vec<&str> = text.lines().collect();
    let chunks = track_chunks(&lines);

    check_required_names(&chunks)?;
    check_legacy_tokens(text)?;
    let markers = check_markers(&lines)?;
    check_bus_sends(&chunks)?;

    Ok(QcPass {
        tracks: chunks.len(),
        markers,
    })
}

/// Read `path` and run [`check`]
pub fn check_file(path: &Path) -> Result<QcPass, QcFailure> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => QcFailure::MissingFile(path.display().to_string()),
        _ => QcFailure::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        },
    })?;
    check(&text)
}

/// Track chunks by display name (first `NAME` line of the chunk)
fn track_chunks<'a>(lines: &[&'a str]) -> HashMap<String, Vec<&'a str>> {
    let mut chunks = HashMap::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("  <TRACK ") {
            let start = i;
            let mut depth = 1;
            i += 1;
            while i < lines.len() {
                let s = lines[i].trim();
                if s.starts_with('<') {
                    depth += 1;
                } else if s == ">" {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                i += 1;
            }
            let end = i.min(lines.len() - 1);
            let chunk = &lines[start..=end];
            if let Some(name) = chunk.iter().find_map(|l| display_name(l)) {
                chunks.insert(name.to_string(), chunk.to_vec());
            }
        }
        i += 1;
    }

    chunks
}

/// `NAME "x"` → `x`
fn display_name(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix("NAME \"")?;
    let end = rest.find('"')?;
    Some(&rest[..end])
}

fn check_required_names(chunks: &HashMap<String, Vec<&str>>) -> Result<(), QcFailure> {
    for name in REQUIRED_NAMES {
        if !chunks.contains_key(*name) {
            return Err(QcFailure::MissingName(name.to_string()));
        }
    }
    Ok(())
}

fn check_legacy_tokens(text: &str) -> Result<(), QcFailure> {
    for token in LEGACY_TOKENS {
        if text.contains(token) {
            return Err(QcFailure::LegacyToken(token.to_string()));
        }
    }
    Ok(())
}

/// `MARKER <digits> <more>` after optional indentation
fn is_marker_line(line: &str) -> bool {
    let Some(rest) = line.trim_start().strip_prefix("MARKER") else {
        return false;
    };
    let rest_trimmed = rest.trim_start();
    if rest_trimmed.len() == rest.len() {
        return false;
    }
    let digits = rest_trimmed.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && rest_trimmed[digits..].starts_with(char::is_whitespace)
}

fn check_markers(lines: &[&str]) -> Result<usize, QcFailure> {
    let markers = lines.iter().filter(|l| is_marker_line(l)).count();
    if markers < MIN_SECTION_MARKERS {
        return Err(QcFailure::TooFewMarkers {
            minimum: MIN_SECTION_MARKERS,
            found: markers,
        });
    }
    Ok(markers)
}

fn check_bus_sends(chunks: &HashMap<String, Vec<&str>>) -> Result<(), QcFailure> {
    for (bus, minimum) in BUS_MINIMUMS {
        let chunk = chunks
            .get(*bus)
            .ok_or_else(|| QcFailure::MissingBus(bus.to_string()))?;
        let found = chunk
            .iter()
            .filter(|l| l.trim_start().starts_with("AUXRECV "))
            .count();
        if found < *minimum {
            return Err(QcFailure::TooFewSends {
                bus: bus.to_string(),
                minimum: *minimum,
                found,
            });
        }
    }
    Ok(())
}
