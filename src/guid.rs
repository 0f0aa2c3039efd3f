use uuid::Uuid;

/// Source of the `{...}` identifiers REAPER puts on tracks, items and markers.
///
/// Identifiers carry no meaning across runs; tests swap in
/// [`SequentialGuids`] to get reproducible output.
pub trait GuidSource {
    /// Next identifier, uppercase and hyphenated, without braces
    fn next_guid(&mut self) -> String;
}

/// Random UUIDv4 identifiers
#[derive(Debug, Default)]
pub struct RandomGuids;

impl GuidSource for RandomGuids {
    fn next_guid(&mut self) -> String {
        Uuid::new_v4().hyphenated().to_string().to_uppercase()
    }
}

/// Counter-based identifiers, valid GUID syntax
#[derive(Debug, Default)]
pub struct SequentialGuids {
    next: u128,
}

impl GuidSource for SequentialGuids {
    fn next_guid(&mut self) -> String {
        self.next += 1;
        Uuid::from_u128(self.next).hyphenated().to_string().to_uppercase()
    }
}
