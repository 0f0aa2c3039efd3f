use std::path::{Path, PathBuf};

/// Environment variable overriding the project root
pub const ROOT_ENV: &str = "RPPGEN_ROOT";

/// Fixed file locations inside an album project checkout
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root from `RPPGEN_ROOT`, falling back to the current directory
    pub fn from_env() -> Self {
        let root = std::env::var_os(ROOT_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(root)
    }

    pub fn reaper_dir(&self) -> PathBuf {
        self.root.join("reaper")
    }

    pub fn midi_dir(&self) -> PathBuf {
        self.root.join("midi")
    }

    /// Pilot song project the scaffolds are read from
    pub fn seed_project(&self) -> PathBuf {
        self.reaper_dir().join("01_Static_Bloom.rpp")
    }

    /// Canonical template path, the one QC reads
    pub fn template(&self) -> PathBuf {
        self.reaper_dir().join("templates").join("lalo_standard_v01.rpp")
    }

    /// Every path the template is written to. The pilot project itself is
    /// replaced, so the seed is only readable before the first run.
    pub fn template_destinations(&self) -> Vec<PathBuf> {
        vec![
            self.template(),
            self.reaper_dir().join("01_Static_Bloom.v01_template.rpp"),
            self.seed_project(),
        ]
    }

    pub fn song_project(&self, stem: &str) -> PathBuf {
        song_path(&self.reaper_dir(), stem)
    }
}

pub fn song_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{}.rpp", stem))
}
