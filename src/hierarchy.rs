use crate::catalog::{Catalog, ChildDescriptor};
use crate::error::RppError;
use crate::track::{FolderRole, PatchRules, TrackBody, TrackRecord};
use std::collections::HashSet;
use tracing::debug;

/// Build the ordered track list described by `catalog`.
///
/// Each folder yields a folder-start record followed by its children; the
/// last child closes the folder. Children with a `scaffold` index preserve
/// the corresponding seed chunk instead of being generated.
pub fn synthesize(catalog: &Catalog, scaffolds: &[String]) -> Result<Vec<TrackRecord>, RppError> {
    let required = catalog.required_scaffolds();
    if scaffolds.len() < required {
        return Err(RppError::InsufficientScaffolds {
            found: scaffolds.len(),
            required,
        });
    }

    let mut tracks = Vec::new();
    let mut seen = HashSet::new();

    for folder in &catalog.folders {
        if folder.children.is_empty() {
            return Err(RppError::EmptyFolder(folder.name.clone()));
        }
        if !seen.insert(folder.name.clone()) {
            return Err(RppError::DuplicateTrackName(folder.name.clone()));
        }
        tracks.push(TrackRecord::folder(&folder.name, folder.main_send));

        let last = folder.children.len() - 1;
        for (idx, child) in folder.children.iter().enumerate() {
            if !seen.insert(child.name.clone()) {
                return Err(RppError::DuplicateTrackName(child.name.clone()));
            }
            let role = if idx == last {
                FolderRole::End
            } else {
                FolderRole::None
            };
            tracks.push(child_record(child, role, scaffolds));
        }
    }

    debug!(
        tracks = tracks.len(),
        folders = catalog.folders.len(),
        "synthesized track hierarchy"
    );
    Ok(tracks)
}

fn child_record(child: &ChildDescriptor, role: FolderRole, scaffolds: &[String]) -> TrackRecord {
    let body = match child.scaffold {
        // Bounds were checked against required_scaffolds()
        Some(seed_index) => TrackBody::Preserved {
            payload: scaffolds[seed_index].clone(),
            patch: PatchRules {
                name: child.name.clone(),
                muted: child.muted,
                role,
                main_send: child.main_send,
            },
        },
        None => TrackBody::Generated,
    };

    TrackRecord {
        name: child.name.clone(),
        role,
        main_send: child.main_send,
        fx_chain: child.fx_chain,
        muted: child.muted,
        group: child.group,
        is_bus: child.is_bus,
        sources: Vec::new(),
        body,
    }
}

/// Folder depth after every record; always 0 or 1 for a synthesized list.
pub fn folder_depths(tracks: &[TrackRecord]) -> Vec<i32> {
    let mut depth = 0;
    tracks
        .iter()
        .map(|t| {
            depth += t.role.depth_delta();
            depth
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FolderDescriptor;

    fn scaffolds() -> Vec<String> {
        vec![
            "  <TRACK {A}\n    NAME \"Chords\"\n  >".to_string(),
            "  <TRACK {B}\n    NAME \"Drums\"\n  >".to_string(),
        ]
    }

    #[test]
    fn test_standard_hierarchy() {
        let tracks = synthesize(&Catalog::standard(), &scaffolds()).unwrap();
        // 10 folders + 41 children
        assert_eq!(tracks.len(), 51);
        assert_eq!(tracks[0].name, "00_REF");
        assert_eq!(tracks[0].role, FolderRole::Start);
        assert_eq!(tracks[1].role, FolderRole::None);
        assert_eq!(tracks[2].name, "ref_mix_b");
        assert_eq!(tracks[2].role, FolderRole::End);
        assert_eq!(tracks.last().unwrap().name, "mix_print_check");
        assert_eq!(tracks.last().unwrap().role, FolderRole::End);
    }

    #[test]
    fn test_scaffolds_are_preserved_in_edit_folder() {
        let tracks = synthesize(&Catalog::standard(), &scaffolds()).unwrap();
        let preserved: Vec<&TrackRecord> = tracks.iter().filter(|t| t.is_preserved()).collect();
        assert_eq!(preserved.len(), 2);

        assert_eq!(preserved[0].name, "arr_chords_scaffold");
        assert_eq!(preserved[0].role, FolderRole::None);
        assert_eq!(preserved[1].name, "arr_drums_scaffold");
        assert_eq!(preserved[1].role, FolderRole::End);

        match &preserved[1].body {
            TrackBody::Preserved { payload, patch } => {
                assert!(payload.contains("NAME \"Drums\""));
                assert_eq!(patch.name, "arr_drums_scaffold");
                assert!(patch.muted);
                assert_eq!(patch.role, FolderRole::End);
            }
            TrackBody::Generated => panic!("expected preserved body"),
        }
    }

    #[test]
    fn test_folder_depth_returns_to_zero() {
        let tracks = synthesize(&Catalog::standard(), &scaffolds()).unwrap();
        let depths = folder_depths(&tracks);
        assert!(depths.iter().all(|d| *d == 0 || *d == 1));
        assert_eq!(*depths.last().unwrap(), 0);
    }

    #[test]
    fn test_too_few_scaffolds() {
        let result = synthesize(&Catalog::standard(), &scaffolds()[..1]);
        assert!(matches!(
            result,
            Err(RppError::InsufficientScaffolds { found: 1, required: 2 })
        ));
    }

    #[test]
    fn test_empty_folder_rejected() {
        let catalog = Catalog {
            folders: vec![FolderDescriptor::new("00_EMPTY", vec![])],
            routes: vec![],
        };
        let result = synthesize(&catalog, &[]);
        assert!(matches!(result, Err(RppError::EmptyFolder(name)) if name == "00_EMPTY"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let catalog = Catalog {
            folders: vec![FolderDescriptor::new(
                "00_REF",
                vec![ChildDescriptor::track("ref"), ChildDescriptor::track("ref")],
            )],
            routes: vec![],
        };
        let result = synthesize(&catalog, &[]);
        assert!(matches!(result, Err(RppError::DuplicateTrackName(name)) if name == "ref"));
    }

    #[test]
    fn test_single_child_folder_closes_itself() {
        let catalog = Catalog {
            folders: vec![FolderDescriptor::new("90_MIX", vec![ChildDescriptor::track("check")])],
            routes: vec![],
        };
        let tracks = synthesize(&catalog, &[]).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[1].role, FolderRole::End);
    }
}
