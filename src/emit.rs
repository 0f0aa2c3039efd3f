use crate::guid::GuidSource;
use crate::patch::patch_chunk;
use crate::routing::{source_positions, NameIndex};
use crate::track::{TrackBody, TrackRecord};

/// Render a full project: header, every track chunk in order, footer.
///
/// The result is newline-joined with a single trailing newline.
pub fn emit_project(
    header: &[String],
    tracks: &[TrackRecord],
    footer: &[String],
    guids: &mut dyn GuidSource,
) -> String {
    let index = NameIndex::new(tracks);

    let mut parts: Vec<String> = Vec::with_capacity(header.len() + tracks.len() + footer.len());
    parts.extend(header.iter().cloned());
    for track in tracks {
        parts.push(emit_track(track, &index, guids));
    }
    parts.extend(footer.iter().cloned());

    let mut out = parts.join("\n");
    out.push('\n');
    out
}

/// Render one track chunk.
///
/// Preserved chunks are patched; generated chunks are built from scratch with
/// one `AUXRECV` line per resolved source.
pub fn emit_track(track: &TrackRecord, index: &NameIndex, guids: &mut dyn GuidSource) -> String {
    match &track.body {
        TrackBody::Preserved { payload, patch } => patch_chunk(payload, patch),
        TrackBody::Generated => {
            let aux: Vec<String> = source_positions(track, index)
                .into_iter()
                .map(auxrecv_line)
                .collect();
            track_chunk(track, &aux, guids)
        }
    }
}

/// Receive from track `source` at unity gain, post-fader, all channels
pub fn auxrecv_line(source: usize) -> String {
    format!("    AUXRECV {} 0 1 0 0 0 0 0 1 -1:U 0 -1 ''", source)
}

fn track_chunk(track: &TrackRecord, aux_lines: &[String], guids: &mut dyn GuidSource) -> String {
    let mut lines = vec![
        format!("  <TRACK {{{}}}", guids.next_guid()),
        format!("    NAME \"{}\"", track.name),
        "    PEAKCOL 33554431".to_string(),
        "    BEAT -1".to_string(),
        "    AUTOMODE 0".to_string(),
        format!("    MUTESOLO {} 0 0", u8::from(track.muted)),
        "    IPHASE 0".to_string(),
        "    PLAYOFFS 0 1".to_string(),
        format!("    ISBUS {}", track.role.isbus_tokens()),
        format!("    BUSCOMP {}", track.role.buscomp_tokens()),
        "    SHOWINMIX 1 0.6667 0.5 1 0.5 0 0 0".to_string(),
        "    SEL 0".to_string(),
        "    REC 0 0 1 0 0 0 0".to_string(),
        "    VU 2".to_string(),
        "    TRACKHEIGHT 0 0 0 0 0 0".to_string(),
        "    INQ 0 0 0 0.5 100 0 0 100".to_string(),
        "    NCHAN 2".to_string(),
        format!("    FX {}", u8::from(track.fx_chain)),
        format!("    TRACKID {{{}}}", guids.next_guid()),
        "    PERF 0".to_string(),
        "    MIDIOUT -1".to_string(),
    ];
    lines.extend(aux_lines.iter().cloned());
    lines.push(format!("    MAINSEND {} 0", u8::from(track.main_send)));

    if track.fx_chain {
        lines.push("    <FXCHAIN".to_string());
        lines.push("      SHOW 0".to_string());
        lines.push("      LASTSEL 0".to_string());
        lines.push("      DOCKED 0".to_string());
        lines.push("    >".to_string());
    }

    lines.push("  >".to_string());
    lines.join("\n")
}
