//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use pharmacy_core::prelude::*;

use crate::config::{PharmacyConfig, CONFIG_NAMES};
use crate::output::Output;

/// Store type the CLI sessions run on.
pub type DynStore = Box<dyn SnapshotStore>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: PharmacyConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve(&cwd, path);
            (PharmacyConfig::load(&path)?, Some(path))
        } else {
            match Self::find_config(&cwd) {
                Some(path) => (PharmacyConfig::load(&path)?, Some(path)),
                None => (PharmacyConfig::default(), None),
            }
        };

        match &config_path {
            Some(path) => tracing::debug!(path = %path.display(), "loaded config"),
            None => tracing::debug!("no config file found, using defaults"),
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Snapshot file location.
    pub fn snapshot_path(&self) -> PathBuf {
        resolve(&self.cwd, &self.config.store.path)
    }

    /// Build the configured snapshot store.
    pub fn store(&self) -> DynStore {
        if self.config.store.enabled {
            Box::new(JsonFileStore::new(self.snapshot_path()))
        } else {
            Box::new(MemoryStore::new())
        }
    }

    /// Open a session: build the catalog, load the snapshot.
    pub fn open_session(&self) -> Result<Session<DynStore>> {
        let catalog = self.config.build_catalog()?;
        let session = Session::open(PharmacyState::new(catalog), self.store(), self.config.session);

        match session.load_status() {
            LoadStatus::FirstRun => self
                .output
                .debug("No saved data found. Starting with default data."),
            LoadStatus::Restored(report) => {
                self.output.debug(&format!(
                    "Restored stock for {} products from {}",
                    report.applied,
                    session.store().describe()
                ));
                for name in &report.unknown {
                    self.output
                        .warn(&format!("Saved stock for {} ignored: not in catalog", name));
                }
            }
            LoadStatus::Failed(reason) => self.output.warn(&format!(
                "Could not load saved data ({}). Starting with default data.",
                reason
            )),
        }

        Ok(session)
    }

    /// Report the outcome of a save.
    pub fn report_save(&self, status: &SaveStatus) {
        match status {
            SaveStatus::Saved => self.output.debug("State saved"),
            SaveStatus::Skipped => {}
            SaveStatus::Failed(reason) => self
                .output
                .warn(&format!("State not saved, changes kept in memory only: {}", reason)),
        }
    }
}

/// Resolve a path relative to a directory.
fn resolve(dir: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        dir.join(path)
    }
}
