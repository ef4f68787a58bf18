//! Archive reader
//!
//! Parses a complete `.mnarc` file held in memory. Used to inspect exported
//! archives and to verify the writer.

use std::io::{self, Cursor, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use super::{
    ArchiveHeader, BinarySerializable, MetaData, PropertyValue, SampleHeader, TimeSampling,
    UserProperty, ARCHIVE_FORMAT,
};
use crate::mesh::{Mesh, MeshError};

/// Archive read error
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("failed to read archive: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a MeshAnim archive (bad magic)")]
    BadMagic,

    #[error("unsupported archive version {0}")]
    UnsupportedVersion(u16),

    #[error("archive truncated while reading {what}")]
    Truncated { what: &'static str },

    #[error("archive string is not valid UTF-8")]
    InvalidUtf8,

    #[error("unknown user property type {0}")]
    UnknownPropertyType(u8),

    #[error("{0} unexpected bytes after the last sample")]
    TrailingBytes(usize),
}

impl ArchiveError {
    /// Map a read failure, treating end of input as truncation of `what`
    fn reading(what: &'static str) -> impl Fn(io::Error) -> ArchiveError {
        move |e| match e.kind() {
            io::ErrorKind::UnexpectedEof => ArchiveError::Truncated { what },
            _ => ArchiveError::Io(e),
        }
    }
}

/// One time sample of the geometry object
#[derive(Debug, Clone, PartialEq)]
pub struct PolyMeshSample {
    pub positions: Vec<[f32; 3]>,
    pub face_indices: Vec<i32>,
    pub face_counts: Vec<i32>,
}

impl PolyMeshSample {
    /// Rebuild the frame this sample was written from
    pub fn to_mesh(&self) -> Result<Mesh, MeshError> {
        Mesh::new(
            self.positions.clone(),
            self.face_indices.clone(),
            self.face_counts.clone(),
        )
    }
}

/// A fully decoded archive
#[derive(Debug, Clone)]
pub struct Archive {
    pub header: ArchiveHeader,
    pub metadata: MetaData,
    pub parent_name: String,
    pub object_name: String,
    pub user_properties: Vec<UserProperty>,
    pub samples: Vec<PolyMeshSample>,
}

impl Archive {
    /// Read and decode an archive file
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Decode an archive from memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArchiveError> {
        let mut r = Cursor::new(bytes);

        let header: ArchiveHeader = read_header(&mut r, "archive header")?;
        if &header.magic != ARCHIVE_FORMAT.magic {
            return Err(ArchiveError::BadMagic);
        }
        if header.version != ARCHIVE_FORMAT.version {
            return Err(ArchiveError::UnsupportedVersion(header.version));
        }

        let mut metadata = MetaData::new();
        let entry_count = r
            .read_u32::<LittleEndian>()
            .map_err(ArchiveError::reading("metadata count"))?;
        for _ in 0..entry_count {
            let key = read_string(&mut r, "metadata key")?;
            let value = read_string(&mut r, "metadata value")?;
            metadata.set(key, value);
        }

        let parent_name = read_string(&mut r, "parent object name")?;
        let object_name = read_string(&mut r, "object name")?;

        let property_count = r
            .read_u32::<LittleEndian>()
            .map_err(ArchiveError::reading("user property count"))?;
        let mut user_properties = Vec::new();
        for _ in 0..property_count {
            let name = read_string(&mut r, "user property name")?;
            let type_tag = r
                .read_u8()
                .map_err(ArchiveError::reading("user property type"))?;
            let value = r
                .read_u8()
                .map_err(ArchiveError::reading("user property value"))?;
            let value = PropertyValue::decode(type_tag, value)
                .ok_or(ArchiveError::UnknownPropertyType(type_tag))?;
            user_properties.push(UserProperty { name, value });
        }

        let mut samples = Vec::new();
        for _ in 0..header.sample_count {
            samples.push(read_sample(&mut r)?);
        }

        let trailing = remaining(&r);
        if trailing != 0 {
            return Err(ArchiveError::TrailingBytes(trailing));
        }

        Ok(Self {
            header,
            metadata,
            parent_name,
            object_name,
            user_properties,
            samples,
        })
    }

    pub fn time_sampling(&self) -> TimeSampling {
        self.header.time_sampling
    }

    /// Time of sample `index` in seconds
    pub fn sample_time(&self, index: usize) -> f64 {
        self.header.time_sampling.sample_time(index)
    }

    /// Frame rate recorded in the archive header
    pub fn frames_per_second(&self) -> f64 {
        self.header.time_sampling.frames_per_second()
    }

    pub fn user_property(&self, name: &str) -> Option<PropertyValue> {
        self.user_properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
    }
}

fn remaining(r: &Cursor<&[u8]>) -> usize {
    let len = r.get_ref().len() as u64;
    len.saturating_sub(r.position()) as usize
}

/// Read one fixed-size header through its [`BinarySerializable`] impl
fn read_header<H: BinarySerializable>(
    r: &mut Cursor<&[u8]>,
    what: &'static str,
) -> Result<H, ArchiveError> {
    let mut buf = vec![0u8; H::SIZE];
    r.read_exact(&mut buf).map_err(ArchiveError::reading(what))?;
    H::deserialize(&buf).ok_or(ArchiveError::Truncated { what })
}

fn read_string(r: &mut Cursor<&[u8]>, what: &'static str) -> Result<String, ArchiveError> {
    let len = r
        .read_u32::<LittleEndian>()
        .map_err(ArchiveError::reading(what))? as usize;
    if len > remaining(r) {
        return Err(ArchiveError::Truncated { what });
    }
    let mut raw = vec![0u8; len];
    r.read_exact(&mut raw).map_err(ArchiveError::reading(what))?;
    String::from_utf8(raw).map_err(|_| ArchiveError::InvalidUtf8)
}

fn read_sample(r: &mut Cursor<&[u8]>) -> Result<PolyMeshSample, ArchiveError> {
    let header: SampleHeader = read_header(r, "sample header")?;

    let body_size = header.body_size().ok_or(ArchiveError::Truncated {
        what: "sample data",
    })?;
    if remaining(r) < body_size {
        return Err(ArchiveError::Truncated {
            what: "sample data",
        });
    }

    let mut positions = Vec::with_capacity(header.vertex_count as usize);
    for _ in 0..header.vertex_count {
        let mut position = [0f32; 3];
        r.read_f32_into::<LittleEndian>(&mut position)
            .map_err(ArchiveError::reading("positions"))?;
        positions.push(position);
    }

    let mut face_indices = vec![0i32; header.index_count as usize];
    r.read_i32_into::<LittleEndian>(&mut face_indices)
        .map_err(ArchiveError::reading("face indices"))?;

    let mut face_counts = vec![0i32; header.face_count as usize];
    r.read_i32_into::<LittleEndian>(&mut face_counts)
        .map_err(ArchiveError::reading("face counts"))?;

    Ok(PolyMeshSample {
        positions,
        face_indices,
        face_counts,
    })
}
