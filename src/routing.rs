//! # Routing Resolver
//!
//! Buses receive audio through `AUXRECV` lines that address their sources by
//! position in the final track list. The catalog declares routes by name; this
//! module fills in each destination's source names and turns them into
//! positions once the track order is fixed.
//!
//! ## Unresolved Names
//! A declared source that names no track is dropped in [`Resolution::Lenient`]
//! mode (the default) and logged as a warning; no placeholder edge is written.
//! [`Resolution::Strict`] turns the same situation into
//! [`RppError::UnresolvedRoute`].

use crate::catalog::BusRoute;
use crate::error::RppError;
use crate::track::TrackRecord;
use std::collections::HashMap;
use tracing::warn;

/// How to treat route names that match no track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    #[default]
    Lenient,
    Strict,
}

/// Immutable name to position map over a final track list
#[derive(Debug, Clone)]
pub struct NameIndex {
    positions: HashMap<String, usize>,
}

impl NameIndex {
    pub fn new(tracks: &[TrackRecord]) -> Self {
        let positions = tracks
            .iter()
            .enumerate()
            .map(|(idx, t)| (t.name.clone(), idx))
            .collect();
        Self { positions }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }
}

/// Declared source names of one route, group members first
fn declared_sources(route: &BusRoute, tracks: &[TrackRecord]) -> Vec<String> {
    let mut names: Vec<String> = match route.group {
        Some(group) => tracks
            .iter()
            .filter(|t| t.group == Some(group))
            .map(|t| t.name.clone())
            .collect(),
        None => Vec::new(),
    };
    names.extend(route.tracks.iter().cloned());
    names
}

/// Fill in `sources` for every routed destination.
///
/// Destinations not named by any route keep an empty source list.
pub fn assign_routes(
    tracks: &mut [TrackRecord],
    routes: &[BusRoute],
    mode: Resolution,
) -> Result<(), RppError> {
    let index = NameIndex::new(tracks);

    for route in routes {
        let Some(dest) = index.position(&route.destination) else {
            if mode == Resolution::Strict {
                return Err(RppError::UnresolvedRoute {
                    destination: route.destination.clone(),
                    source_name: route.destination.clone(),
                });
            }
            warn!(
                destination = %route.destination,
                "route destination matches no track, skipping"
            );
            continue;
        };

        // Preserved chunks are only patched, never given AUXRECV lines
        if tracks[dest].is_preserved() {
            if mode == Resolution::Strict {
                return Err(RppError::PreservedDestination(route.destination.clone()));
            }
            warn!(
                destination = %route.destination,
                "route destination is a preserved scaffold, skipping"
            );
            continue;
        }

        let mut sources = Vec::new();
        for name in declared_sources(route, tracks) {
            if index.contains(&name) {
                sources.push(name);
            } else if mode == Resolution::Strict {
                return Err(RppError::UnresolvedRoute {
                    destination: route.destination.clone(),
                    source_name: name,
                });
            } else {
                warn!(
                    destination = %route.destination,
                    source = %name,
                    "dropping unresolved routing source"
                );
            }
        }
        tracks[dest].sources.extend(sources);
    }

    Ok(())
}

/// Positions of `track`'s sources in the list `index` was built from.
///
/// Names missing from the index are skipped, so a list built by
/// [`assign_routes`] always maps one-to-one.
pub fn source_positions(track: &TrackRecord, index: &NameIndex) -> Vec<usize> {
    track
        .sources
        .iter()
        .filter_map(|name| index.position(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::hierarchy::synthesize;
    use crate::track::SourceGroup;

    fn standard_tracks() -> Vec<TrackRecord> {
        let scaffolds = vec!["  <TRACK {A}\n  >".to_string(), "  <TRACK {B}\n  >".to_string()];
        synthesize(&Catalog::standard(), &scaffolds).unwrap()
    }

    fn find<'a>(tracks: &'a [TrackRecord], name: &str) -> &'a TrackRecord {
        tracks.iter().find(|t| t.name == name).unwrap()
    }

    #[test]
    fn test_standard_routes() {
        let mut tracks = standard_tracks();
        let catalog = Catalog::standard();
        assign_routes(&mut tracks, &catalog.routes, Resolution::Lenient).unwrap();

        assert_eq!(find(&tracks, "BUS_DRUM").sources.len(), 8); // 7 drums + drums scaffold
        assert_eq!(find(&tracks, "BUS_BASS").sources, vec!["bas_di", "bas_amp", "bas_synth"]);
        assert_eq!(find(&tracks, "BUS_MUSIC").sources.len(), 9);
        assert_eq!(find(&tracks, "BUS_VOX").sources.len(), 5);
        assert_eq!(find(&tracks, "BUS_FX").sources.len(), 4);
        assert_eq!(find(&tracks, "BUS_PREMASTER").sources.len(), 6);
        assert_eq!(find(&tracks, "mix_print_check").sources, vec!["BUS_PREMASTER"]);
        assert!(find(&tracks, "BUS_PARALLEL").sources.is_empty());
    }

    #[test]
    fn test_positions_follow_final_order() {
        let mut tracks = standard_tracks();
        assign_routes(&mut tracks, &Catalog::standard().routes, Resolution::Lenient).unwrap();
        let index = NameIndex::new(&tracks);

        let premaster = find(&tracks, "BUS_PREMASTER");
        let positions = source_positions(premaster, &index);
        assert_eq!(positions.len(), 6);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(tracks[positions[0]].name, "BUS_DRUM");
        assert_eq!(tracks[positions[5]].name, "BUS_PARALLEL");

        // mix_print_check references a track declared before it
        let check = find(&tracks, "mix_print_check");
        assert_eq!(source_positions(check, &index), vec![index.position("BUS_PREMASTER").unwrap()]);
    }

    #[test]
    fn test_unresolved_source_is_dropped() {
        let mut tracks = standard_tracks();
        let routes = vec![BusRoute::from_tracks(
            "BUS_PREMASTER",
            &["BUS_DRUM", "BUS_TYPO", "BUS_FX"],
        )];
        assign_routes(&mut tracks, &routes, Resolution::Lenient).unwrap();
        assert_eq!(find(&tracks, "BUS_PREMASTER").sources, vec!["BUS_DRUM", "BUS_FX"]);
    }

    #[test]
    fn test_unresolved_source_fails_in_strict_mode() {
        let mut tracks = standard_tracks();
        let routes = vec![BusRoute::from_tracks("BUS_PREMASTER", &["BUS_DRUM", "BUS_TYPO"])];
        let result = assign_routes(&mut tracks, &routes, Resolution::Strict);
        match result {
            Err(RppError::UnresolvedRoute { destination, source_name }) => {
                assert_eq!(destination, "BUS_PREMASTER");
                assert_eq!(source_name, "BUS_TYPO");
            }
            other => panic!("expected UnresolvedRoute, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_destination() {
        let mut tracks = standard_tracks();
        let routes = vec![BusRoute::from_group("BUS_NOWHERE", SourceGroup::Drums)];
        assert!(assign_routes(&mut tracks, &routes, Resolution::Lenient).is_ok());
        assert!(tracks.iter().all(|t| t.sources.is_empty()));
        assert!(assign_routes(&mut tracks, &routes, Resolution::Strict).is_err());
    }

    #[test]
    fn test_scaffold_destination_is_skipped() {
        let mut tracks = standard_tracks();
        let routes = vec![BusRoute::from_tracks("arr_chords_scaffold", &["drm_kick"])];
        assign_routes(&mut tracks, &routes, Resolution::Lenient).unwrap();
        assert!(find(&tracks, "arr_chords_scaffold").sources.is_empty());
    }

    #[test]
    fn test_scaffold_destination_fails_in_strict_mode() {
        let mut tracks = standard_tracks();
        let mut routes = Catalog::standard().routes;
        routes.push(BusRoute::from_tracks("arr_chords_scaffold", &["drm_kick"]));

        let result = assign_routes(&mut tracks, &routes, Resolution::Strict);
        match result {
            Err(RppError::PreservedDestination(name)) => {
                assert_eq!(name, "arr_chords_scaffold");
            }
            other => panic!("expected PreservedDestination, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_mode_accepts_standard_catalog() {
        let mut tracks = standard_tracks();
        let catalog = Catalog::standard();
        assert!(assign_routes(&mut tracks, &catalog.routes, Resolution::Strict).is_ok());
    }
}
