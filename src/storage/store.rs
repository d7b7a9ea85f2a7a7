use std::{
    io,
    path::{Path, PathBuf},
};

use chrono::Utc;

use crate::domain::{catalog, Config, ReportError, Snapshot, SpaceId};

use super::document::{LoadError, SnapshotDocument};

/// Name of the data directory underneath the store root.
const DATA_DIR: &str = ".studyspot";

/// Name of the configuration file inside the data directory.
const CONFIG_FILE: &str = "config.toml";

/// A filesystem backed store of occupancy snapshots.
///
/// The store owns the current snapshot. Every mutation replaces the snapshot
/// wholesale and persists the replacement before returning, so the file on
/// disk always matches what callers observe in memory.
#[derive(Debug)]
pub struct Store {
    root: PathBuf,
    config: Config,
    snapshot: Snapshot,
}

impl Store {
    /// Opens the store rooted at `root`, seeding the built-in catalog when no
    /// usable snapshot exists.
    ///
    /// A document that fails to parse is treated as absent: the catalog is
    /// reseeded and overwrites the unreadable file. Statuses of a loaded
    /// snapshot are recomputed from the raw counts rather than trusted.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot file exists but cannot be read, or if
    /// a freshly seeded snapshot cannot be persisted.
    pub fn open(root: PathBuf) -> Result<Self, Error> {
        let config = load_config(&root);
        let data_path = data_path(&root, &config);

        let loaded = SnapshotDocument::load(&data_path)
            .and_then(|document| Snapshot::try_from(document).map_err(LoadError::from));

        let (snapshot, fresh) = match loaded {
            Ok(snapshot) => (snapshot, false),
            Err(LoadError::NotFound) => {
                tracing::debug!("No snapshot at {}, seeding the catalog", data_path.display());
                (catalog::seed(Utc::now()), true)
            }
            Err(LoadError::Io(io_error)) => return Err(Error::Io(io_error)),
            Err(error) => {
                tracing::warn!("Discarding unreadable snapshot: {error}");
                (catalog::seed(Utc::now()), true)
            }
        };

        let store = Self {
            root,
            config,
            snapshot,
        };
        if fresh {
            store.save()?;
        }
        Ok(store)
    }

    /// Returns the current snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the path of the snapshot document.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        data_path(&self.root, &self.config)
    }

    /// Applies an occupancy report and persists the updated snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the building or room does not resolve, or if the
    /// updated snapshot cannot be written to disk.
    pub fn report(
        &mut self,
        building_id: &SpaceId,
        room_id: &SpaceId,
        level: f64,
    ) -> Result<(), Error> {
        self.snapshot = self.snapshot.report_occupancy(building_id, room_id, level)?;
        self.save()?;
        tracing::info!("Recorded occupancy report for {building_id}/{room_id}");
        Ok(())
    }

    /// Discards the current snapshot and reseeds the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the reseeded snapshot cannot be persisted.
    pub fn reset(&mut self) -> Result<(), Error> {
        self.snapshot = catalog::seed(Utc::now());
        self.save()?;
        tracing::info!("Reset the snapshot to the built-in catalog");
        Ok(())
    }

    fn save(&self) -> Result<(), Error> {
        let document = SnapshotDocument::from(self.snapshot.clone());
        document.save_to_path(&self.data_path())?;
        Ok(())
    }
}

/// Errors produced by store operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The report targeted a missing building or room.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// The snapshot file could not be read or written.
    #[error("Snapshot store I/O failed")]
    Io(#[from] io::Error),
}

fn data_path(root: &Path, config: &Config) -> PathBuf {
    root.join(DATA_DIR).join(config.data_file())
}

fn load_config(root: &Path) -> Config {
    let path = root.join(DATA_DIR).join(CONFIG_FILE);
    Config::load(&path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::domain::Status;

    fn id(raw: &str) -> SpaceId {
        raw.parse().unwrap()
    }

    #[test]
    fn open_seeds_and_persists_when_empty() {
        let tmp = tempdir().unwrap();
        let store = Store::open(tmp.path().to_path_buf()).unwrap();

        assert_eq!(store.snapshot().buildings().len(), 5);
        assert!(store.data_path().exists());
    }

    #[test]
    fn reopen_loads_the_persisted_snapshot() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        let mut store = Store::open(root.clone()).unwrap();
        store.report(&id("aq"), &id("aq-3153"), 0.95).unwrap();

        let reopened = Store::open(root).unwrap();
        let (_, room) = reopened
            .snapshot()
            .find_room(&id("aq"), &id("aq-3153"))
            .unwrap();
        assert_eq!(room.occupied(), 38);
        assert_eq!(room.status(), Status::Red);
    }

    #[test]
    fn garbage_document_is_reseeded_and_overwritten() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        let data_path = root.join(DATA_DIR).join("buildings.json");
        std::fs::create_dir_all(data_path.parent().unwrap()).unwrap();
        std::fs::write(&data_path, "not json").unwrap();

        let store = Store::open(root.clone()).unwrap();
        assert_eq!(store.snapshot().buildings().len(), 5);

        // The unreadable file was replaced on open.
        let reopened = Store::open(root).unwrap();
        assert_eq!(reopened.snapshot().buildings().len(), 5);
    }

    #[test]
    fn stale_statuses_are_recomputed_on_open() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        let data_path = root.join(DATA_DIR).join("buildings.json");
        std::fs::create_dir_all(data_path.parent().unwrap()).unwrap();
        std::fs::write(
            &data_path,
            r#"{
                "_version": "1",
                "buildings": [{
                    "id": "eng",
                    "name": "Engineering",
                    "description": "Test building",
                    "open_until": "9:00 PM",
                    "status": "green",
                    "rooms": [{
                        "id": "eng-1",
                        "name": "Lab",
                        "floor": 1,
                        "capacity": 40,
                        "occupied": 38,
                        "status": "green",
                        "last_updated": "2025-09-01T12:00:00Z"
                    }]
                }]
            }"#,
        )
        .unwrap();

        let store = Store::open(root).unwrap();
        let building = store.snapshot().building(&id("eng")).unwrap();

        assert_eq!(building.status(), Status::Red);
        assert_eq!(building.rooms()[0].status(), Status::Red);
    }

    #[test]
    fn failed_report_leaves_snapshot_unchanged() {
        let tmp = tempdir().unwrap();
        let mut store = Store::open(tmp.path().to_path_buf()).unwrap();
        let before = store.snapshot().clone();

        let error = store.report(&id("aq"), &id("missing"), 0.5).unwrap_err();

        assert!(matches!(
            error,
            Error::Report(ReportError::RoomNotFound { .. })
        ));
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn reset_restores_catalog_counts() {
        let tmp = tempdir().unwrap();
        let mut store = Store::open(tmp.path().to_path_buf()).unwrap();

        store.report(&id("aq"), &id("aq-3153"), 1.0).unwrap();
        store.reset().unwrap();

        let (_, room) = store
            .snapshot()
            .find_room(&id("aq"), &id("aq-3153"))
            .unwrap();
        assert_eq!(room.occupied(), 12);
    }

    #[test]
    fn custom_data_file_is_respected() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        let config_dir = root.join(DATA_DIR);
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join(CONFIG_FILE),
            "_version = \"1\"\ndata_file = \"campus.json\"\n",
        )
        .unwrap();

        let store = Store::open(root.clone()).unwrap();

        assert_eq!(store.data_path(), config_dir.join("campus.json"));
        assert!(config_dir.join("campus.json").exists());
        assert!(!config_dir.join("buildings.json").exists());
    }
}
