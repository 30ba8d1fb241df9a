use crate::memory::MemoryTag;

/// Owned block of zero-initialised memory.
///
/// This is the "platform allocation" every bookkeeping structure is carved
/// from. The storage is word-backed so the start of the block (and every
/// 8-byte-aligned offset inside it) can hold any plain-old-data record with
/// an alignment of up to 8 bytes.
///
/// A block remembers the tag it was allocated under so that a mismatching
/// tag at free time can be reported.
pub struct MemoryBlock {
    words: Box<[u64]>,
    len: usize,
    tag: MemoryTag,
}

impl MemoryBlock {
    /// Alignment guaranteed for the first byte of every block
    pub const ALIGNMENT: usize = std::mem::align_of::<u64>();

    /// Acquire a zeroed block of exactly `len` bytes.
    ///
    /// This bypasses accounting; use `TaggedAllocator::allocate` for
    /// memory that should show up in the usage report.
    pub fn zeroed(len: usize, tag: MemoryTag) -> Self {
        let word_count = len.div_ceil(std::mem::size_of::<u64>());
        Self {
            words: vec![0u64; word_count].into_boxed_slice(),
            len,
            tag,
        }
    }

    /// Size of the block in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the block holds no bytes at all
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Tag the block was allocated with
    pub fn tag(&self) -> MemoryTag {
        self.tag
    }

    /// Whole block as bytes
    pub fn as_bytes(&self) -> &[u8] {
        &bytemuck::cast_slice::<u64, u8>(&self.words)[..self.len]
    }

    /// Whole block as mutable bytes
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let len = self.len;
        &mut bytemuck::cast_slice_mut::<u64, u8>(&mut self.words)[..len]
    }

    /// Zero every byte of the block
    pub fn zero(&mut self) {
        self.words.fill(0);
    }
}

impl std::fmt::Debug for MemoryBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBlock")
            .field("len", &self.len)
            .field("tag", &self.tag)
            .finish()
    }
}
