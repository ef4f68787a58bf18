//! Shared types for the MeshAnim frame exporter.
//!
//! This crate provides the pieces shared between:
//! - `meshanim-export` (parsers and archive writer)
//! - anything that reads the produced archives back
//!
//! # Modules
//!
//! - [`mesh`] - The per-frame [`Mesh`] value
//! - [`validation`] - Index range checks shared by every parser
//! - [`formats`] - The MeshAnim archive layout, time sampling and reader

pub mod formats;
pub mod mesh;
pub mod validation;

pub use mesh::{Mesh, MeshBuilder, MeshError};
pub use validation::{index_in_range, one_based_index, MAX_FACE_SIZE, MAX_INDEX};

pub use formats::{
    Archive, ArchiveError, ArchiveHeader, BinarySerializable, MetaData, PolyMeshSample,
    PropertyValue, SampleHeader, TimeSampling, UserProperty, ARCHIVE_FORMAT,
};
