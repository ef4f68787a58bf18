//! MeshAnim archive writing
//!
//! Layout and headers live in `meshanim_shared::formats`; this module streams
//! frames into that layout.

pub use meshanim_shared::formats::*;

use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, WriteBytesExt};
use meshanim_shared::Mesh;
use tempfile::NamedTempFile;

use crate::config::ExportParameters;

/// Consumer of parsed frames, in frame order
pub trait FrameSink {
    fn write_frame(&mut self, mesh: Mesh) -> io::Result<()>;
}

impl FrameSink for Vec<Mesh> {
    fn write_frame(&mut self, mesh: Mesh) -> io::Result<()> {
        self.push(mesh);
        Ok(())
    }
}

/// Metadata recorded in every archive
pub fn archive_metadata(params: &ExportParameters) -> MetaData {
    let mut meta = MetaData::new();
    meta.set(APPLICATION_NAME_KEY, params.application_name.as_str());
    meta.set(USER_DESCRIPTION_KEY, params.scene_description.as_str());
    meta.set(DCC_FPS_KEY, format!("{:.6}", params.frames_per_second));
    meta
}

/// Streaming writer for one time-sampled mesh object.
///
/// Sample `i` is placed at `i / frames_per_second` seconds. Face winding is
/// written exactly as parsed and is read back as clockwise; frames authored
/// counter-clockwise must have their faces reversed before they get here.
pub struct ArchiveWriter<W: Write + Seek> {
    writer: W,
    sample_count: u32,
}

impl<W: Write + Seek> ArchiveWriter<W> {
    /// Write the archive header and object description
    pub fn create(mut writer: W, params: &ExportParameters) -> io::Result<Self> {
        let header = ArchiveHeader::new(TimeSampling::uniform(params.frames_per_second));
        write_header(&mut writer, &header)?;

        let meta = archive_metadata(params);
        write_u32(&mut writer, meta.len())?;
        for (key, value) in meta.iter() {
            write_string(&mut writer, key)?;
            write_string(&mut writer, value)?;
        }

        write_string(&mut writer, ARCHIVE_FORMAT.parent_object_name)?;
        write_string(&mut writer, &params.object_name)?;

        // Not a subdivision surface
        let properties = [UserProperty::new(
            MESH_TYPE_PROPERTY,
            PropertyValue::Bool(false),
        )];
        write_u32(&mut writer, properties.len())?;
        for property in &properties {
            write_string(&mut writer, &property.name)?;
            writer.write_u8(property.value.type_tag())?;
            writer.write_u8(property.value.value_byte())?;
        }

        Ok(Self {
            writer,
            sample_count: 0,
        })
    }

    /// Number of samples written so far
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Append one frame as the next time sample
    pub fn write_sample(&mut self, mesh: &Mesh) -> io::Result<()> {
        let next_count = self
            .sample_count
            .checked_add(1)
            .ok_or_else(|| invalid_data("too many samples for one archive"))?;

        let header = SampleHeader::new(
            count_u32(mesh.vertex_count(), "vertex")?,
            count_u32(mesh.indices().len(), "index")?,
            count_u32(mesh.face_count(), "face")?,
        );
        write_header(&mut self.writer, &header)?;

        for position in mesh.vertices() {
            for &component in position {
                self.writer.write_f32::<LittleEndian>(component)?;
            }
        }
        for &index in mesh.indices() {
            self.writer.write_i32::<LittleEndian>(index)?;
        }
        for &count in mesh.face_counts() {
            self.writer.write_i32::<LittleEndian>(count)?;
        }

        self.sample_count = next_count;
        Ok(())
    }

    /// Record the final sample count and flush, returning the inner writer
    pub fn finish(mut self) -> io::Result<W> {
        let end = self.writer.stream_position()?;
        self.writer
            .seek(SeekFrom::Start(ArchiveHeader::SAMPLE_COUNT_OFFSET))?;
        self.writer.write_u32::<LittleEndian>(self.sample_count)?;
        self.writer.seek(SeekFrom::Start(end))?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write + Seek> FrameSink for ArchiveWriter<W> {
    fn write_frame(&mut self, mesh: Mesh) -> io::Result<()> {
        self.write_sample(&mesh)
    }
}

/// Archive file that only appears on disk once it is complete.
///
/// Samples go to a temporary file next to the destination. [`commit`]
/// renames it into place; dropping an uncommitted archive deletes the
/// temporary file, so an aborted export leaves nothing behind.
///
/// [`commit`]: ArchiveFile::commit
pub struct ArchiveFile {
    writer: ArchiveWriter<BufWriter<NamedTempFile>>,
    path: PathBuf,
}

impl ArchiveFile {
    pub fn create(path: &Path, params: &ExportParameters) -> io::Result<Self> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(dir)?;
        let writer = ArchiveWriter::create(BufWriter::new(temp), params)?;
        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    pub fn sample_count(&self) -> u32 {
        self.writer.sample_count()
    }

    /// Finish the archive and move it to its destination
    pub fn commit(self) -> io::Result<PathBuf> {
        let temp = self
            .writer
            .finish()?
            .into_inner()
            .map_err(|e| e.into_error())?;
        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(self.path)
    }
}

impl FrameSink for ArchiveFile {
    fn write_frame(&mut self, mesh: Mesh) -> io::Result<()> {
        self.writer.write_sample(&mesh)
    }
}

/// Write a whole frame sequence as one archive
pub fn export_meshes<W, I>(writer: W, params: &ExportParameters, meshes: I) -> io::Result<W>
where
    W: Write + Seek,
    I: IntoIterator<Item = Mesh>,
{
    let mut archive = ArchiveWriter::create(writer, params)?;
    for mesh in meshes {
        archive.write_sample(&mesh)?;
    }
    archive.finish()
}

/// Write a fixed-size header through its [`BinarySerializable`] impl
pub fn write_header<W: Write, H: BinarySerializable>(w: &mut W, header: &H) -> io::Result<()> {
    let bytes = header.serialize();
    debug_assert_eq!(bytes.len(), H::SIZE);
    w.write_all(&bytes)
}

fn write_u32<W: Write>(w: &mut W, value: usize) -> io::Result<()> {
    let value = u32::try_from(value).map_err(|_| invalid_data("count exceeds u32"))?;
    w.write_u32::<LittleEndian>(value)
}

fn write_string<W: Write>(w: &mut W, s: &str) -> io::Result<()> {
    write_u32(w, s.len())?;
    w.write_all(s.as_bytes())
}

fn count_u32(count: usize, what: &str) -> io::Result<u32> {
    u32::try_from(count).map_err(|_| invalid_data(&format!("{what} count {count} exceeds u32")))
}

fn invalid_data(message: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message.to_owned())
}
