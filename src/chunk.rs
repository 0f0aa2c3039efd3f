use crate::error::RppError;

/// Prefix of a line that opens a top-level track chunk.
pub const TRACK_OPEN: &str = "  <TRACK ";

/// Inclusive line range of one top-level chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub start: usize,
    pub end: usize,
}

/// A project split around its track chunks.
///
/// Header and footer lines are opaque and copied back verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub header: Vec<String>,
    pub records: Vec<String>,
    pub footer: Vec<String>,
}

/// Find every top-level `TRACK` chunk in `lines`.
///
/// Depth starts at 1 on the opening line. Any nested line beginning with `<`
/// opens a sub-chunk; a line that is exactly `>` (after trimming) closes one.
/// A chunk that never closes is an error rather than being silently dropped.
pub fn locate_records<S: AsRef<str>>(lines: &[S]) -> Result<Vec<ChunkRange>, RppError> {
    let mut ranges = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if !lines[i].as_ref().starts_with(TRACK_OPEN) {
            i += 1;
            continue;
        }

        let start = i;
        let mut depth = 1usize;
        i += 1;
        let mut closed = false;

        while i < lines.len() {
            let trimmed = lines[i].as_ref().trim();
            if trimmed.starts_with('<') {
                depth += 1;
            } else if trimmed == ">" {
                depth -= 1;
                if depth == 0 {
                    ranges.push(ChunkRange { start, end: i });
                    closed = true;
                    break;
                }
            }
            i += 1;
        }

        if !closed {
            return Err(RppError::UnterminatedRecord { line: start + 1 });
        }
        i += 1;
    }

    Ok(ranges)
}

/// Split project text into header, track chunks and footer.
///
/// Lines that sit between two track chunks belong to neither and are dropped.
pub fn split_document(text: &str) -> Result<Document, RppError> {
    let lines: Vec<&str> = text.lines().collect();
    let ranges = locate_records(&lines)?;

    let (first, last) = match (ranges.first(), ranges.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Err(RppError::NoRecords),
    };

    let header = lines[..first.start].iter().map(|l| l.to_string()).collect();
    let records = ranges
        .iter()
        .map(|r| lines[r.start..=r.end].join("\n"))
        .collect();
    let footer = lines[last.end + 1..].iter().map(|l| l.to_string()).collect();

    Ok(Document {
        header,
        records,
        footer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT: &str = "<REAPER_PROJECT 0.1
  TEMPO 120 4 4
  <TRACK {A}
    NAME \"one\"
    <ITEM
      <SOURCE MIDI
        E 0 90 3c 50
      >
    >
  >
  <TRACK {B}
    NAME \"two\"
  >
>";

    #[test]
    fn test_locates_top_level_tracks() {
        let lines: Vec<&str> = PROJECT.lines().collect();
        let ranges = locate_records(&lines).unwrap();
        assert_eq!(
            ranges,
            vec![ChunkRange { start: 2, end: 9 }, ChunkRange { start: 10, end: 12 }]
        );
    }

    #[test]
    fn test_split_keeps_header_and_footer() {
        let doc = split_document(PROJECT).unwrap();
        assert_eq!(doc.header, vec!["<REAPER_PROJECT 0.1", "  TEMPO 120 4 4"]);
        assert_eq!(doc.footer, vec![">"]);
        assert_eq!(doc.records.len(), 2);
        assert!(doc.records[0].starts_with("  <TRACK {A}"));
        assert!(doc.records[0].ends_with("    >\n  >"));
        assert_eq!(doc.records[1], "  <TRACK {B}\n    NAME \"two\"\n  >");
    }

    #[test]
    fn test_nested_track_markers_do_not_open_new_records() {
        // Only lines with exactly two spaces of indent open a record
        let text = "  <TRACK {A}\n    <TRACK {inner}\n    >\n  >";
        let lines: Vec<&str> = text.lines().collect();
        let ranges = locate_records(&lines).unwrap();
        assert_eq!(ranges, vec![ChunkRange { start: 0, end: 3 }]);
    }

    #[test]
    fn test_no_records_is_an_error() {
        let result = split_document("<REAPER_PROJECT\n>");
        assert!(matches!(result, Err(RppError::NoRecords)));
    }

    #[test]
    fn test_unbalanced_record_is_an_error() {
        let text = "<REAPER_PROJECT\n  <TRACK {A}\n    <FXCHAIN\n    >";
        let result = split_document(text);
        assert!(
            matches!(result, Err(RppError::UnterminatedRecord { line: 2 })),
            "got {:?}",
            result
        );
    }

    #[test]
    fn test_lines_between_records_are_dropped() {
        let text = "HEAD\n  <TRACK {A}\n  >\n  MARKER 1 0 \"x\"\n  <TRACK {B}\n  >\nTAIL";
        let doc = split_document(text).unwrap();
        assert_eq!(doc.header, vec!["HEAD"]);
        assert_eq!(doc.records.len(), 2);
        assert_eq!(doc.footer, vec!["TAIL"]);
    }
}
