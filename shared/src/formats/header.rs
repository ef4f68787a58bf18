//! Fixed-size archive and sample headers

use super::{TimeSampling, ARCHIVE_FORMAT};

/// Archive file header (32 bytes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchiveHeader {
    pub magic: [u8; 4],
    pub version: u16,
    /// Reserved, always 0
    pub flags: u16,
    pub time_sampling: TimeSampling,
    /// Number of samples following the object description
    pub sample_count: u32,
    pub reserved: u32,
}

impl ArchiveHeader {
    pub const SIZE: usize = 32;

    /// Header for an archive with no samples yet
    pub fn new(time_sampling: TimeSampling) -> Self {
        Self {
            magic: *ARCHIVE_FORMAT.magic,
            version: ARCHIVE_FORMAT.version,
            flags: 0,
            time_sampling,
            sample_count: 0,
            reserved: 0,
        }
    }

    /// Byte offset of the sample count, patched once all samples are written
    pub const SAMPLE_COUNT_OFFSET: u64 = 0x18;

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.flags.to_le_bytes());
        bytes[8..16].copy_from_slice(&self.time_sampling.time_per_cycle.to_le_bytes());
        bytes[16..24].copy_from_slice(&self.time_sampling.start_time.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.sample_count.to_le_bytes());
        bytes[28..32].copy_from_slice(&self.reserved.to_le_bytes());
        bytes
    }

    /// Read header from bytes
    ///
    /// Magic and version are returned as found; the reader checks them.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        let f64_at = |at: usize| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&bytes[at..at + 8]);
            f64::from_le_bytes(raw)
        };
        Some(Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: u16::from_le_bytes([bytes[4], bytes[5]]),
            flags: u16::from_le_bytes([bytes[6], bytes[7]]),
            time_sampling: TimeSampling::new(f64_at(8), f64_at(16)),
            sample_count: u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]),
            reserved: u32::from_le_bytes([bytes[28], bytes[29], bytes[30], bytes[31]]),
        })
    }
}

/// Per-sample header (12 bytes)
///
/// Followed by `vertex_count` positions (3 × f32), `index_count` face vertex
/// indices (i32) and `face_count` face vertex counts (i32).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleHeader {
    pub vertex_count: u32,
    pub index_count: u32,
    pub face_count: u32,
}

impl SampleHeader {
    pub const SIZE: usize = 12;

    pub fn new(vertex_count: u32, index_count: u32, face_count: u32) -> Self {
        Self {
            vertex_count,
            index_count,
            face_count,
        }
    }

    /// Size of the sample body following this header, if it fits in `usize`
    pub fn body_size(&self) -> Option<usize> {
        let positions = (self.vertex_count as usize).checked_mul(super::POSITION_SIZE)?;
        let indices = (self.index_count as usize).checked_mul(super::INDEX_SIZE)?;
        let faces = (self.face_count as usize).checked_mul(super::INDEX_SIZE)?;
        positions.checked_add(indices)?.checked_add(faces)
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.vertex_count.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.index_count.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.face_count.to_le_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            vertex_count: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            index_count: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            face_count: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_header_layout() {
        let mut header = ArchiveHeader::new(TimeSampling::uniform(24.0));
        header.sample_count = 7;
        let bytes = header.to_bytes();

        assert_eq!(&bytes[0..4], b"MNAR");
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), 1);
        let offset = ArchiveHeader::SAMPLE_COUNT_OFFSET as usize;
        assert_eq!(&bytes[offset..offset + 4], &7u32.to_le_bytes());

        let parsed = ArchiveHeader::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.sample_count, 7);
        assert_eq!(parsed.time_sampling.time_per_cycle, 1.0 / 24.0);
    }

    #[test]
    fn test_sample_header_body_size() {
        let header = SampleHeader::new(4, 6, 2);
        assert_eq!(header.body_size(), Some(4 * 12 + 6 * 4 + 2 * 4));
        assert_eq!(SampleHeader::new(0, 0, 0).body_size(), Some(0));
    }

    #[test]
    fn test_headers_from_short_bytes() {
        assert!(ArchiveHeader::from_bytes(&[0u8; 31]).is_none());
        assert!(SampleHeader::from_bytes(&[0u8; 8]).is_none());
    }
}
