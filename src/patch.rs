use crate::track::PatchRules;

/// Rewrite the first line matching `matches` with `replacement`, keeping its
/// indentation. Returns true if a line was found.
fn patch_first<F>(lines: &mut [String], matches: F, replacement: &str) -> bool
where
    F: Fn(&str) -> bool,
{
    for line in lines.iter_mut() {
        let trimmed = line.trim_start();
        if matches(trimmed) {
            let indent = line.len() - trimmed.len();
            let patched = format!("{}{}", &line[..indent], replacement);
            *line = patched;
            return true;
        }
    }
    false
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// `KEY <digits> 0 0 ...` with exactly the given trailing tokens
fn flag_line(trimmed: &str, key: &str, tail: &[&str]) -> bool {
    let mut tokens = trimmed.split_whitespace();
    if tokens.next() != Some(key) {
        return false;
    }
    match tokens.next() {
        Some(value) if is_digits(value) => {}
        _ => return false,
    }
    tokens.eq(tail.iter().copied())
}

/// Apply the scaffold patch to a preserved track chunk.
///
/// Only the first `NAME`, `MUTESOLO`, `ISBUS`, `BUSCOMP` and `MAINSEND` lines
/// are touched; every other line is returned byte-identical. Applying the
/// same rules twice gives the same text.
pub fn patch_chunk(payload: &str, rules: &PatchRules) -> String {
    let mut lines: Vec<String> = payload.split('\n').map(str::to_string).collect();

    patch_first(
        &mut lines,
        |l| l.starts_with("NAME \""),
        &format!("NAME \"{}\"", rules.name),
    );
    patch_first(
        &mut lines,
        |l| flag_line(l, "MUTESOLO", &["0", "0"]),
        &format!("MUTESOLO {} 0 0", u8::from(rules.muted)),
    );
    patch_first(
        &mut lines,
        |l| l.starts_with("ISBUS "),
        &format!("ISBUS {}", rules.role.isbus_tokens()),
    );
    patch_first(
        &mut lines,
        |l| l.starts_with("BUSCOMP "),
        &format!("BUSCOMP {}", rules.role.buscomp_tokens()),
    );
    patch_first(
        &mut lines,
        |l| flag_line(l, "MAINSEND", &["0"]),
        &format!("MAINSEND {} 0", u8::from(rules.main_send)),
    );

    lines.join("\n")
}
