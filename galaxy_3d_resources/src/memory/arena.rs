//! Bump-pointer arena over one fixed block
//!
//! An `Arena` hands out consecutive, disjoint byte regions of its block
//! until it is full. There is no per-region free: the only way to reclaim
//! space is `reset_all`, which zeroes the block and rewinds to the start.
//!
//! Regions are returned as `ArenaRegion` handles (offset + length) rather
//! than raw pointers; bytes are reached through bounds-checked accessors.

use crate::error::{Error, Result};
use crate::memory::{MemoryBlock, MemoryTag, TaggedAllocator};
use crate::{engine_error, engine_trace};

const SOURCE: &str = "galaxy3d::Arena";

/// A sub-allocation inside an arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaRegion {
    offset: usize,
    len: usize,
}

impl ArenaRegion {
    /// Byte offset from the start of the arena block
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the region in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the region is zero-sized
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte of the region
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Whether two regions share at least one byte
    pub fn overlaps(&self, other: &ArenaRegion) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}

/// Bump allocator over one fixed block.
///
/// Invariant: `0 <= used <= capacity` at all times.
#[derive(Debug)]
pub struct Arena {
    capacity: usize,
    used: usize,
    memory: MemoryBlock,
    owns_memory: bool,
}

impl Arena {
    /// Create an arena over a caller-supplied block.
    ///
    /// The arena does not own the block: `destroy` hands it back.
    pub fn with_block(block: MemoryBlock) -> Self {
        Self {
            capacity: block.len(),
            used: 0,
            memory: block,
            owns_memory: false,
        }
    }

    /// Create an arena that acquires its own block through `allocator`
    pub fn create(capacity: usize, allocator: &mut TaggedAllocator) -> Self {
        Self {
            capacity,
            used: 0,
            memory: allocator.allocate(capacity, MemoryTag::Arena),
            owns_memory: true,
        }
    }

    /// Carve the next `size` bytes.
    ///
    /// Fails without touching any state when fewer than `size` bytes remain.
    pub fn allocate(&mut self, size: usize) -> Result<ArenaRegion> {
        let remaining = self.remaining();
        if size > remaining {
            engine_error!(SOURCE, "Tried to allocate {}B, only {}B remaining", size, remaining);
            return Err(Error::ArenaExhausted { requested: size, remaining });
        }

        let region = ArenaRegion { offset: self.used, len: size };
        self.used += size;
        engine_trace!(SOURCE, "Allocated {}B at offset {} ({}/{}B used)",
            size, region.offset, self.used, self.capacity);
        Ok(region)
    }

    /// Bytes of a region, or `None` if the region lies outside the block
    pub fn bytes(&self, region: ArenaRegion) -> Option<&[u8]> {
        if region.end() > self.capacity {
            return None;
        }
        self.memory.as_bytes().get(region.offset..region.end())
    }

    /// Mutable bytes of a region, or `None` if the region lies outside the block
    pub fn bytes_mut(&mut self, region: ArenaRegion) -> Option<&mut [u8]> {
        if region.end() > self.capacity {
            return None;
        }
        self.memory.as_bytes_mut().get_mut(region.offset..region.end())
    }

    /// Mutable bytes of two disjoint regions at once.
    ///
    /// Returns `None` if the regions overlap or either lies outside the block.
    pub fn split_pair_mut(
        &mut self,
        first: ArenaRegion,
        second: ArenaRegion,
    ) -> Option<(&mut [u8], &mut [u8])> {
        if first.end() > self.capacity || second.end() > self.capacity || first.overlaps(&second) {
            return None;
        }

        let bytes = self.memory.as_bytes_mut();
        if first.end() <= second.offset {
            let (head, tail) = bytes.split_at_mut(second.offset);
            Some((&mut head[first.offset..first.end()], &mut tail[..second.len]))
        } else {
            let (head, tail) = bytes.split_at_mut(first.offset);
            Some((&mut tail[..first.len], &mut head[second.offset..second.end()]))
        }
    }

    /// Zero the whole block and rewind to the start.
    ///
    /// Capacity is unchanged; every previously returned region becomes stale.
    pub fn reset_all(&mut self) {
        self.memory.zero();
        self.used = 0;
    }

    /// Tear the arena down.
    ///
    /// A self-acquired block is freed through `allocator` and `None` is
    /// returned; a caller-supplied block is handed back untouched.
    pub fn destroy(self, allocator: &mut TaggedAllocator) -> Option<MemoryBlock> {
        if self.owns_memory {
            allocator.free(self.memory, MemoryTag::Arena);
            None
        } else {
            self.into_block()
        }
    }

    /// Hand a caller-supplied block back as is.
    ///
    /// `None` for a self-acquired block: that one is only released by `destroy`.
    pub fn into_block(self) -> Option<MemoryBlock> {
        (!self.owns_memory).then_some(self.memory)
    }

    /// Total size of the block in bytes
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes handed out since creation or the last reset
    pub fn used(&self) -> usize {
        self.used
    }

    /// Bytes still available
    pub fn remaining(&self) -> usize {
        self.capacity - self.used
    }

    /// Whether the arena acquired its own block
    pub fn owns_memory(&self) -> bool {
        self.owns_memory
    }
}

#[cfg(test)]
#[path = "arena_tests.rs"]
mod tests;
