//! Session snapshots using `MessagePack`.
//!
//! Only the [`World`] is written. Composites hold entity slots, so before
//! writing, each one records its topology in its members' property records;
//! after reading, the registry is rebuilt from those records.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use serpentine_foundation::{Error, ErrorKind, Result};
use serpentine_storage::World;

use crate::session::Session;

/// Snapshot layout version. Bumped when the stored shape changes.
pub const SNAPSHOT_FORMAT: u32 = 1;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    format: u32,
    world: &'a World,
}

#[derive(Deserialize)]
struct Snapshot {
    format: u32,
    world: World,
}

fn serialization_error(e: impl std::fmt::Display) -> Error {
    Error::new(ErrorKind::SerializationError(e.to_string()))
}

/// Serializes a world to bytes using `MessagePack` format.
///
/// Uses named serialization to preserve struct field names. Composite
/// records are written as they currently stand; see [`to_bytes`].
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn world_to_bytes(world: &World) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(&SnapshotRef {
        format: SNAPSHOT_FORMAT,
        world,
    })
    .map_err(serialization_error)
}

/// Deserializes a world from `MessagePack` bytes. Composites are not
/// rebuilt; see [`from_bytes`].
///
/// # Errors
///
/// Returns an error if deserialization fails or the snapshot format is not
/// one this version writes.
pub fn world_from_bytes(bytes: &[u8]) -> Result<World> {
    let snapshot: Snapshot = rmp_serde::from_slice(bytes).map_err(serialization_error)?;
    if snapshot.format != SNAPSHOT_FORMAT {
        return Err(serialization_error(format!(
            "unsupported snapshot format {} (expected {SNAPSHOT_FORMAT})",
            snapshot.format
        )));
    }
    Ok(snapshot.world)
}

/// Syncs every composite into its members' records, then serializes the
/// world.
///
/// # Errors
///
/// Returns an error if a composite cannot be synced or encoding fails.
pub fn to_bytes(session: &mut Session) -> Result<Vec<u8>> {
    session.sync_composites()?;
    let bytes = world_to_bytes(session.world())?;
    debug!(
        "snapshot of {} monsters, {} composites: {} bytes",
        session.world().monster_count(),
        session.composites().len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Deserializes a world and rebuilds its composites.
///
/// # Errors
///
/// Returns an error if decoding fails or a composite record is corrupt.
pub fn from_bytes(bytes: &[u8]) -> Result<Session> {
    Session::with_world(world_from_bytes(bytes)?)
}

fn io_error(action: &str, path: &Path) -> impl FnOnce(std::io::Error) -> Error {
    let message = format!("failed to {action} '{}'", path.display());
    move |e| Error::new(ErrorKind::IoError(format!("{message}: {e}")))
}

/// Saves a session to a file using `MessagePack` format.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
///
/// # Errors
///
/// Returns an error if a composite cannot be synced, encoding fails, or the
/// file cannot be written.
pub fn save_to_file<P: AsRef<Path>>(session: &mut Session, path: P) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_bytes(session)?;
    fs::write(path, bytes).map_err(io_error("write", path))?;
    debug!("saved snapshot to {}", path.display());
    Ok(())
}

/// Loads a session from a `MessagePack` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, deserialization fails, or
/// a composite record is corrupt.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Session> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(io_error("read", path))?;
    from_bytes(&bytes)
}
