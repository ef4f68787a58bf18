//! Index validation shared by the mesh parsers.
//!
//! Archive index storage is a signed 32-bit integer, so every index accepted
//! by a parser must also fit in `i32`. Both the text and the binary parser go
//! through [`index_in_range`]; the text parser reaches it via
//! [`one_based_index`] after converting from its 1-based convention.

/// Largest index that can be stored in an archive sample.
pub const MAX_INDEX: u64 = i32::MAX as u64;

/// Largest number of vertices a single face may reference.
///
/// The binary format stores the per-face count in one byte.
pub const MAX_FACE_SIZE: i32 = u8::MAX as i32;

/// Check a 0-based index against a mesh's vertex count.
///
/// Returns the index as stored in a [`Mesh`](crate::Mesh) when
/// `index < vertex_count` and the index fits the signed 32-bit range.
#[inline]
pub fn index_in_range(index: u64, vertex_count: usize) -> Option<i32> {
    if index > MAX_INDEX {
        return None;
    }
    let as_usize = usize::try_from(index).ok()?;
    if as_usize >= vertex_count {
        return None;
    }
    i32::try_from(index).ok()
}

/// Check a 1-based index (text format convention) and convert it to 0-based.
#[inline]
pub fn one_based_index(parsed: i64, vertex_count: usize) -> Option<i32> {
    if parsed < 1 {
        return None;
    }
    index_in_range((parsed - 1) as u64, vertex_count)
}
