//! # Template Catalog
//!
//! The catalog is the configuration the synthesizer works from: an ordered
//! list of folders, each with its ordered children, plus the table that says
//! which tracks feed which bus.
//!
//! [`Catalog::standard()`] is the v01 standard template. Alternative catalogs
//! can be written as YAML and loaded with [`Catalog::from_yaml()`]:
//!
//! ```yaml
//! folders:
//!   - name: 10_DRUMS
//!     children:
//!       - { name: drm_kick, fx_chain: true, group: drums }
//!   - name: 70_EDIT_BUILDER
//!     children:
//!       - { name: arr_chords_scaffold, scaffold: 0, muted: true, group: music }
//!   - name: 80_BUSES
//!     children:
//!       - { name: BUS_DRUM, main_send: false, fx_chain: true, is_bus: true }
//! routes:
//!   - { destination: BUS_DRUM, group: drums }
//! ```
//!
//! Children send to master unless `main_send: false` is given. Folders do not
//! send to master unless `main_send: true` is given.

use crate::error::RppError;
use crate::track::SourceGroup;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One child track of a folder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildDescriptor {
    pub name: String,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub main_send: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub fx_chain: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub muted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<SourceGroup>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_bus: bool,
    /// Index of the seed track this child preserves instead of being generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaffold: Option<usize>,
}

impl ChildDescriptor {
    pub fn track(name: &str) -> Self {
        Self {
            name: name.to_string(),
            main_send: true,
            fx_chain: false,
            muted: false,
            group: None,
            is_bus: false,
            scaffold: None,
        }
    }

    /// Production track with an FX chain, routed to its category bus
    fn produced(name: &str, group: SourceGroup) -> Self {
        Self {
            fx_chain: true,
            group: Some(group),
            ..Self::track(name)
        }
    }

    fn bus(name: &str, main_send: bool) -> Self {
        Self {
            main_send,
            fx_chain: true,
            is_bus: true,
            ..Self::track(name)
        }
    }

    fn scaffold(name: &str, seed_index: usize, group: SourceGroup) -> Self {
        Self {
            muted: true,
            scaffold: Some(seed_index),
            ..Self::produced(name, group)
        }
    }
}

/// A folder and its children, in emission order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub main_send: bool,
    pub children: Vec<ChildDescriptor>,
}

impl FolderDescriptor {
    pub fn new(name: &str, children: Vec<ChildDescriptor>) -> Self {
        Self {
            name: name.to_string(),
            main_send: false,
            children,
        }
    }
}

/// Inputs of one destination track.
///
/// Sources are every track tagged with `group` (in track order) followed by
/// `tracks` (in declared order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusRoute {
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<SourceGroup>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tracks: Vec<String>,
}

impl BusRoute {
    pub fn from_group(destination: &str, group: SourceGroup) -> Self {
        Self {
            destination: destination.to_string(),
            group: Some(group),
            tracks: Vec::new(),
        }
    }

    pub fn from_tracks(destination: &str, tracks: &[&str]) -> Self {
        Self {
            destination: destination.to_string(),
            group: None,
            tracks: tracks.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Folder structure and routing table of a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub folders: Vec<FolderDescriptor>,
    #[serde(default)]
    pub routes: Vec<BusRoute>,
}

impl Catalog {
    /// Parse a catalog from YAML
    pub fn from_yaml(source: &str) -> Result<Self, RppError> {
        serde_yaml::from_str(source).map_err(|e| RppError::Catalog(e.to_string()))
    }

    pub fn to_yaml(&self) -> Result<String, RppError> {
        serde_yaml::to_string(self).map_err(|e| RppError::Catalog(e.to_string()))
    }

    /// Number of seed tracks the catalog consumes as scaffolds
    pub fn required_scaffolds(&self) -> usize {
        self.folders
            .iter()
            .flat_map(|f| f.children.iter())
            .filter_map(|c| c.scaffold)
            .map(|idx| idx + 1)
            .max()
            .unwrap_or(0)
    }

    /// The v01 standard template
    pub fn standard() -> Self {
        use SourceGroup::*;

        let folders = vec![
            FolderDescriptor::new(
                "00_REF",
                vec![
                    ChildDescriptor::track("ref_mix_a"),
                    ChildDescriptor::track("ref_mix_b"),
                ],
            ),
            FolderDescriptor::new(
                "10_DRUMS",
                ["drm_kick", "drm_snare", "drm_hats", "drm_toms", "drm_oh", "drm_room", "drm_perc"]
                    .iter()
                    .map(|n| ChildDescriptor::produced(n, Drums))
                    .collect(),
            ),
            FolderDescriptor::new(
                "20_BASS",
                ["bas_di", "bas_amp", "bas_synth"]
                    .iter()
                    .map(|n| ChildDescriptor::produced(n, Bass))
                    .collect(),
            ),
            FolderDescriptor::new(
                "30_HARMONY",
                ["gtr_rhythm_l", "gtr_rhythm_r", "keys_main", "syn_pad", "syn_arp"]
                    .iter()
                    .map(|n| ChildDescriptor::produced(n, Music))
                    .collect(),
            ),
            FolderDescriptor::new(
                "40_LEADS",
                ["gtr_lead", "syn_lead", "inst_lead_alt"]
                    .iter()
                    .map(|n| ChildDescriptor::produced(n, Music))
                    .collect(),
            ),
            FolderDescriptor::new(
                "50_VOX",
                ["vox_lead_main", "vox_double", "vox_bgv_l", "vox_bgv_r", "vox_adlib"]
                    .iter()
                    .map(|n| ChildDescriptor::produced(n, Vox))
                    .collect(),
            ),
            FolderDescriptor::new(
                "60_FX_PRINTS",
                ["fx_riser", "fx_downer", "fx_impact", "fx_transitions"]
                    .iter()
                    .map(|n| ChildDescriptor::produced(n, Fx))
                    .collect(),
            ),
            FolderDescriptor::new(
                "70_EDIT_BUILDER",
                vec![
                    ChildDescriptor::track("edit_midi_builder"),
                    ChildDescriptor::track("edit_audio_builder"),
                    ChildDescriptor::scaffold("arr_chords_scaffold", 0, Music),
                    ChildDescriptor::scaffold("arr_drums_scaffold", 1, Drums),
                ],
            ),
            FolderDescriptor::new(
                "80_BUSES",
                vec![
                    ChildDescriptor::bus("BUS_DRUM", false),
                    ChildDescriptor::bus("BUS_BASS", false),
                    ChildDescriptor::bus("BUS_MUSIC", false),
                    ChildDescriptor::bus("BUS_VOX", false),
                    ChildDescriptor::bus("BUS_FX", false),
                    ChildDescriptor::bus("BUS_PARALLEL", false),
                    ChildDescriptor::bus("BUS_PREMASTER", true),
                ],
            ),
            FolderDescriptor::new(
                "90_MIX_PRINT",
                vec![ChildDescriptor {
                    main_send: false,
                    fx_chain: true,
                    ..ChildDescriptor::track("mix_print_check")
                }],
            ),
        ];

        let routes = vec![
            BusRoute::from_group("BUS_DRUM", Drums),
            BusRoute::from_group("BUS_BASS", Bass),
            BusRoute::from_group("BUS_MUSIC", Music),
            BusRoute::from_group("BUS_VOX", Vox),
            BusRoute::from_group("BUS_FX", Fx),
            BusRoute::from_tracks(
                "BUS_PREMASTER",
                &["BUS_DRUM", "BUS_BASS", "BUS_MUSIC", "BUS_VOX", "BUS_FX", "BUS_PARALLEL"],
            ),
            BusRoute::from_tracks("mix_print_check", &["BUS_PREMASTER"]),
        ];

        Self { folders, routes }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
