pub mod document;
mod store;

pub use document::{LoadError, SnapshotDocument};
pub use store::{Error as StoreError, Store};
