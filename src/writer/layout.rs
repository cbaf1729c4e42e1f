//! Byte layout of the bulk region

use super::walker::Extraction;
use crate::error::{Error, Result};
use crate::types::{ALIGNMENT, DType, HEADER_SIZE};

/// Planned position of one extracted array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub path: Vec<String>,
    pub dtype: DType,
    /// Byte offset from the start of the container
    pub offset: usize,
    /// Number of elements
    pub count: usize,
    pub byte_len: usize,
}

impl Slot {
    /// First byte past the array data
    pub fn end(&self) -> usize {
        self.offset + self.byte_len
    }

    /// Slash-joined path, for diagnostics
    pub fn path_string(&self) -> String {
        self.path.join("/")
    }
}

/// Planned layout of a container: header, then every slot, then the structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub slots: Vec<Slot>,
    /// Byte offset where the structural region begins
    pub structure_offset: usize,
}

impl Layout {
    pub fn bulk_len(&self) -> usize {
        self.structure_offset - HEADER_SIZE
    }
}

/// Assign offsets in discovery order, each array starting on a 4-byte boundary
pub fn plan(extractions: &[Extraction<'_>]) -> Result<Layout> {
    let mut cursor = HEADER_SIZE as u64;
    let mut slots = Vec::with_capacity(extractions.len());

    for extraction in extractions {
        let array = extraction.array;
        let offset = cursor;
        cursor = align_up_u64(offset + array.byte_len() as u64);
        if cursor > u64::from(u32::MAX) {
            return Err(Error::TooLarge(cursor));
        }
        slots.push(Slot {
            path: extraction.path.clone(),
            dtype: array.dtype(),
            offset: offset as usize,
            count: array.len(),
            byte_len: array.byte_len(),
        });
    }

    Ok(Layout {
        slots,
        structure_offset: cursor as usize,
    })
}

fn align_up_u64(n: u64) -> u64 {
    n.div_ceil(ALIGNMENT as u64) * ALIGNMENT as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Array;

    fn extraction<'a>(name: &str, array: &'a Array) -> Extraction<'a> {
        Extraction {
            path: vec![name.to_string()],
            array,
        }
    }

    #[test]
    fn offsets_are_padded_to_four_bytes() {
        let bytes = Array::from_slice(&[1u8, 2, 3]);
        let shorts = Array::from_slice(&[1i16, 2, 3]);
        let floats = Array::from_slice(&[0.0f32; 4]);
        let extractions = [
            extraction("bytes", &bytes),
            extraction("shorts", &shorts),
            extraction("floats", &floats),
        ];

        let layout = plan(&extractions).unwrap();
        let offsets: Vec<usize> = layout.slots.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![8, 12, 20]);
        assert_eq!(layout.structure_offset, 36);
        assert_eq!(layout.bulk_len(), 28);
        assert_eq!(layout.slots[1].count, 3);
        assert_eq!(layout.slots[1].end(), 18);
    }

    #[test]
    fn empty_arrays_take_no_space() {
        let empty = Array::from_slice::<f32>(&[]);
        let one = Array::from_slice(&[7u32]);
        let extractions = [extraction("empty", &empty), extraction("one", &one)];

        let layout = plan(&extractions).unwrap();
        assert_eq!(layout.slots[0].offset, 8);
        assert_eq!(layout.slots[0].byte_len, 0);
        assert_eq!(layout.slots[1].offset, 8);
        assert_eq!(layout.structure_offset, 12);
    }

    #[test]
    fn no_arrays_means_no_bulk_region() {
        let layout = plan(&[]).unwrap();
        assert!(layout.slots.is_empty());
        assert_eq!(layout.structure_offset, HEADER_SIZE);
        assert_eq!(layout.bulk_len(), 0);
    }
}
