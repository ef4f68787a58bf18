//! MeshAnim archive format (.mnarc)
//!
//! A little-endian container holding one time-sampled polygon mesh object.
//! Every sample is a complete, independent frame.
//!
//! # Layout
//! ```text
//! 0x00: magic [u8; 4] = "MNAR"
//! 0x04: version u16
//! 0x06: flags u16 (reserved)
//! 0x08: time_per_cycle f64
//! 0x10: start_time f64
//! 0x18: sample_count u32
//! 0x1C: reserved u32
//! 0x20: metadata (entry count u32, then key/value string pairs)
//! var:  parent object name (string)
//! var:  geometry object name (string)
//! var:  user properties (count u32, then name string, type u8, value u8)
//! var:  samples (SampleHeader, positions, face indices, face counts)
//! ```
//!
//! Strings are a u32 byte length followed by UTF-8 bytes.
//!
//! Headers implement the [`BinarySerializable`] trait for consistent
//! serialization/deserialization.

pub mod header;
pub mod metadata;
pub mod reader;
mod serialization;
pub mod time_sampling;

pub use header::*;
pub use metadata::*;
pub use reader::*;
pub use serialization::BinarySerializable;
pub use time_sampling::*;

/// Archive format constants.
///
/// Single source of truth for the magic bytes, version and file naming.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveFormat {
    /// Magic bytes at start of the archive (4 bytes)
    pub magic: &'static [u8; 4],

    /// Format version
    pub version: u16,

    /// Name of the archive written by the exporter
    pub output_file_name: &'static str,

    /// Name of the transform object that parents the mesh
    pub parent_object_name: &'static str,
}

/// The MeshAnim archive format
pub const ARCHIVE_FORMAT: ArchiveFormat = ArchiveFormat {
    magic: b"MNAR",
    version: 1,
    output_file_name: "out.mnarc",
    parent_object_name: "root_transform",
};

/// Size of one vertex position in a sample (3 × f32)
pub const POSITION_SIZE: usize = 12;

/// Size of one face index or face count in a sample (i32)
pub const INDEX_SIZE: usize = 4;
