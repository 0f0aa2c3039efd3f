//! # Track Model
//!
//! In-memory representation of one track or folder node of the template.
//!
//! ## Type Hierarchy
//! ```text
//! TrackRecord
//!   ├── name: String (unique within the project)
//!   ├── role: FolderRole (None | Start | End)
//!   ├── main_send: bool (sends directly to master)
//!   ├── fx_chain: bool (owns an <FXCHAIN> sub-block)
//!   ├── muted: bool
//!   ├── group: Option<SourceGroup>
//!   ├── is_bus: bool
//!   ├── sources: Vec<String> (routing sources, by name)
//!   └── body: TrackBody
//!         ├── Generated
//!         └── Preserved { payload, patch: PatchRules }
//! ```
//!
//! ## Folder Roles
//! REAPER encodes folder structure in two lines of every track chunk:
//!
//! | Role  | `ISBUS` | `BUSCOMP`   |
//! |-------|---------|-------------|
//! | Start | `1 1`   | `2 1 0 0 0` |
//! | End   | `2 -1`  | `0 0 0 0 0` |
//! | None  | `0 0`   | `0 0 0 0 0` |
//!
//! Folders are one level deep: a start record is followed by its children,
//! the last of which closes the folder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a record in the folder structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FolderRole {
    /// Ordinary member of a folder (or top-level track)
    #[default]
    None,
    /// Opens a folder; the following records are its children
    Start,
    /// Last child of a folder; closes it
    End,
}

impl FolderRole {
    /// Value of the `ISBUS` line for this role
    pub fn isbus_tokens(self) -> &'static str {
        match self {
            FolderRole::Start => "1 1",
            FolderRole::End => "2 -1",
            FolderRole::None => "0 0",
        }
    }

    /// Value of the `BUSCOMP` line for this role
    pub fn buscomp_tokens(self) -> &'static str {
        match self {
            FolderRole::Start => "2 1 0 0 0",
            FolderRole::End | FolderRole::None => "0 0 0 0 0",
        }
    }

    /// Change in folder depth after this record
    pub fn depth_delta(self) -> i32 {
        match self {
            FolderRole::Start => 1,
            FolderRole::End => -1,
            FolderRole::None => 0,
        }
    }
}

/// Production category used to route tracks into their category bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceGroup {
    Drums,
    Bass,
    Music,
    Vox,
    Fx,
}

impl fmt::Display for SourceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceGroup::Drums => "drums",
            SourceGroup::Bass => "bass",
            SourceGroup::Music => "music",
            SourceGroup::Vox => "vox",
            SourceGroup::Fx => "fx",
        };
        f.write_str(name)
    }
}

/// Fields rewritten on a preserved chunk. Everything else stays byte-identical.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchRules {
    pub name: String,
    pub muted: bool,
    pub role: FolderRole,
    pub main_send: bool,
}

/// How a record's text is produced
#[derive(Debug, Clone, PartialEq)]
pub enum TrackBody {
    /// Synthesized from scratch by the emitter
    Generated,
    /// Existing chunk from the seed project, emitted after patching
    Preserved { payload: String, patch: PatchRules },
}

/// One track or folder node of the synthesized template
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRecord {
    pub name: String,
    pub role: FolderRole,
    pub main_send: bool,
    pub fx_chain: bool,
    pub muted: bool,
    pub group: Option<SourceGroup>,
    pub is_bus: bool,
    pub sources: Vec<String>,
    pub body: TrackBody,
}

impl TrackRecord {
    /// A generated record with every flag off
    pub fn generated(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: FolderRole::None,
            main_send: false,
            fx_chain: false,
            muted: false,
            group: None,
            is_bus: false,
            sources: Vec::new(),
            body: TrackBody::Generated,
        }
    }

    /// Folder-start record
    pub fn folder(name: impl Into<String>, main_send: bool) -> Self {
        Self {
            role: FolderRole::Start,
            main_send,
            ..Self::generated(name)
        }
    }

    pub fn is_preserved(&self) -> bool {
        matches!(self.body, TrackBody::Preserved { .. })
    }
}
