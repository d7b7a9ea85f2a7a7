//! Versioned JSON document holding a serialized snapshot.

use std::{
    collections::BTreeSet,
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{space_id, Building, Room, Snapshot, SpaceId, Status};

/// A snapshot serialized as a versioned JSON document.
///
/// The document is self-describing: derived fields such as statuses are
/// written next to the raw counts so the file is meaningful on its own.
/// They are recomputed, never trusted, when the document is turned back
/// into a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions")]
#[serde(into = "Versions")]
pub struct SnapshotDocument {
    buildings: Vec<BuildingDocument>,
}

impl SnapshotDocument {
    fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writer.write_all(b"\n")
    }

    pub(crate) fn read<R: Read>(reader: R) -> Result<Self, LoadError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes the document to a specific file path.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to.
    pub fn save_to_path(&self, file_path: &Path) -> io::Result<()> {
        // Create parent directories if needed
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(file_path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)
    }

    /// Reads a document from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, cannot be read, or does not
    /// parse as a versioned snapshot document.
    pub fn load(file_path: &Path) -> Result<Self, LoadError> {
        let file = File::open(file_path).map_err(|io_error| match io_error.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound,
            _ => LoadError::Io(io_error),
        })?;

        let reader = BufReader::new(file);
        Self::read(reader)
    }
}

/// Errors that can occur when loading a snapshot document.
#[derive(Debug, thiserror::Error)]
#[error("failed to read the snapshot document")]
pub enum LoadError {
    /// The snapshot file was not found.
    NotFound,
    /// An I/O error occurred.
    Io(#[from] io::Error),
    /// The document could not be parsed as JSON.
    Json(#[from] serde_json::Error),
    /// The document contained an invalid space identifier.
    Id(#[from] space_id::Error),
}

/// The serialized versions of the document.
/// This allows the format and the domain types to evolve without breaking
/// compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 { buildings: Vec<BuildingDocument> },
}

impl From<Versions> for SnapshotDocument {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 { buildings } => Self { buildings },
        }
    }
}

impl From<SnapshotDocument> for Versions {
    fn from(document: SnapshotDocument) -> Self {
        Self::V1 {
            buildings: document.buildings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct BuildingDocument {
    id: String,
    name: String,
    description: String,
    open_until: String,
    status: Status,
    rooms: Vec<RoomDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RoomDocument {
    id: String,
    name: String,
    floor: u8,
    capacity: u32,
    occupied: u32,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    amenities: BTreeSet<String>,
    status: Status,
    last_updated: DateTime<Utc>,
}

impl From<Snapshot> for SnapshotDocument {
    fn from(snapshot: Snapshot) -> Self {
        let buildings = snapshot
            .buildings
            .into_iter()
            .map(BuildingDocument::from)
            .collect();
        Self { buildings }
    }
}

impl From<Building> for BuildingDocument {
    fn from(building: Building) -> Self {
        let Building {
            id,
            name,
            description,
            open_until,
            rooms,
            status,
        } = building;
        Self {
            id: id.to_string(),
            name,
            description,
            open_until,
            status,
            rooms: rooms.into_iter().map(RoomDocument::from).collect(),
        }
    }
}

impl From<Room> for RoomDocument {
    fn from(room: Room) -> Self {
        let Room {
            id,
            name,
            floor,
            capacity,
            occupied,
            amenities,
            status,
            last_updated,
        } = room;
        Self {
            id: id.to_string(),
            name,
            floor,
            capacity,
            occupied,
            amenities,
            status,
            last_updated,
        }
    }
}

impl TryFrom<SnapshotDocument> for Snapshot {
    type Error = space_id::Error;

    fn try_from(document: SnapshotDocument) -> Result<Self, Self::Error> {
        let buildings = document
            .buildings
            .into_iter()
            .map(Building::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(buildings))
    }
}

impl TryFrom<BuildingDocument> for Building {
    type Error = space_id::Error;

    fn try_from(document: BuildingDocument) -> Result<Self, Self::Error> {
        let BuildingDocument {
            id,
            name,
            description,
            open_until,
            // Statuses are rederived from the counts.
            status: _,
            rooms,
        } = document;
        let rooms = rooms
            .into_iter()
            .map(Room::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(SpaceId::new(id)?, name, description, open_until, rooms))
    }
}

impl TryFrom<RoomDocument> for Room {
    type Error = space_id::Error;

    fn try_from(document: RoomDocument) -> Result<Self, Self::Error> {
        let RoomDocument {
            id,
            name,
            floor,
            capacity,
            occupied,
            amenities,
            status: _,
            last_updated,
        } = document;
        Ok(Self::new(
            SpaceId::new(id)?,
            name,
            floor,
            capacity,
            occupied,
            amenities,
            last_updated,
        ))
    }
}
