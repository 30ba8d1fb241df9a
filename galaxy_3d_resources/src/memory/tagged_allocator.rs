//! Tagged allocation accounting
//!
//! `TaggedAllocator` wraps block acquisition with running statistics: total
//! bytes, bytes per `MemoryTag`, and the number of allocations performed.
//! It never changes how memory is obtained; it only records it.
//!
//! The statistics do not own the memory they measure. Freeing with a tag
//! other than the one used at allocation time keeps memory safe (the block
//! carries its own size) but skews the per-tag figures, which is reported
//! as a warning.

use crate::memory::{MemoryBlock, MemoryTag};
use crate::{engine_info, engine_warn};

const SOURCE: &str = "galaxy3d::TaggedAllocator";

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// Running byte totals, overall and per tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryStats {
    /// Bytes currently allocated across every tag
    pub total_allocated: u64,
    /// Bytes currently allocated per tag (indexed by `MemoryTag::index`)
    pub tagged_allocations: [u64; MemoryTag::COUNT],
}

impl Default for MemoryStats {
    fn default() -> Self {
        Self {
            total_allocated: 0,
            tagged_allocations: [0; MemoryTag::COUNT],
        }
    }
}

/// Allocation wrapper recording byte/count statistics per category.
///
/// One instance is owned by the application's `ResourceSystems` context and
/// lives for the whole engine run.
#[derive(Debug, Default)]
pub struct TaggedAllocator {
    stats: MemoryStats,
    alloc_count: u64,
}

impl TaggedAllocator {
    /// Create an allocator with cleared statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a zeroed block of `size` bytes filed under `tag`
    pub fn allocate(&mut self, size: usize, tag: MemoryTag) -> MemoryBlock {
        if tag == MemoryTag::Unknown {
            engine_warn!(SOURCE, "allocate called using MemoryTag::Unknown. Re-class this allocation.");
        }

        let bytes = size as u64;
        self.stats.total_allocated += bytes;
        self.stats.tagged_allocations[tag.index()] += bytes;
        self.alloc_count += 1;

        MemoryBlock::zeroed(size, tag)
    }

    /// Release a block, subtracting its size from the `tag` bucket.
    ///
    /// `tag` must match the allocation tag or the per-tag statistics drift.
    pub fn free(&mut self, block: MemoryBlock, tag: MemoryTag) {
        if tag == MemoryTag::Unknown {
            engine_warn!(SOURCE, "free called using MemoryTag::Unknown. Re-class this allocation.");
        }
        if tag != block.tag() {
            engine_warn!(SOURCE,
                "Block of {}B allocated as {:?} freed as {:?}; tagged statistics are now out of sync",
                block.len(), block.tag(), tag);
        }

        let bytes = block.len() as u64;
        self.stats.total_allocated = release_bytes(self.stats.total_allocated, bytes, "total");
        let tagged = &mut self.stats.tagged_allocations[tag.index()];
        *tagged = release_bytes(*tagged, bytes, tag.label().trim_end());
    }

    /// Current statistics
    pub fn stats(&self) -> &MemoryStats {
        &self.stats
    }

    /// Bytes currently allocated across every tag
    pub fn total_allocated(&self) -> u64 {
        self.stats.total_allocated
    }

    /// Bytes currently allocated under `tag`
    pub fn tagged(&self, tag: MemoryTag) -> u64 {
        self.stats.tagged_allocations[tag.index()]
    }

    /// Number of allocations performed since creation (frees don't decrement it)
    pub fn allocation_count(&self) -> u64 {
        self.alloc_count
    }

    /// Human-readable per-tag usage, one line per tag
    pub fn usage_report(&self) -> String {
        let mut report = String::from("System memory use (tagged):\n");
        for tag in MemoryTag::ALL {
            let (amount, unit) = scale_bytes(self.tagged(tag));
            report.push_str(&format!("  {}: {:.2}{}\n", tag.label(), amount, unit));
        }
        report
    }

    /// Clear every statistic (end of the engine run)
    pub fn shutdown(&mut self) {
        engine_info!(SOURCE, "Shutting down with {}B still tracked over {} allocations",
            self.stats.total_allocated, self.alloc_count);
        self.stats = MemoryStats::default();
        self.alloc_count = 0;
    }
}

fn release_bytes(current: u64, bytes: u64, bucket: &str) -> u64 {
    current.checked_sub(bytes).unwrap_or_else(|| {
        engine_warn!(SOURCE,
            "Releasing {}B from '{}' which only tracks {}B; clamping at zero", bytes, bucket, current);
        0
    })
}

/// Pick the largest unit (GiB, MiB, KiB, B) the byte count fills at least once
pub fn scale_bytes(bytes: u64) -> (f64, &'static str) {
    if bytes >= GIB {
        (bytes as f64 / GIB as f64, "GiB")
    } else if bytes >= MIB {
        (bytes as f64 / MIB as f64, "MiB")
    } else if bytes >= KIB {
        (bytes as f64 / KIB as f64, "KiB")
    } else {
        (bytes as f64, "B")
    }
}

#[cfg(test)]
#[path = "tagged_allocator_tests.rs"]
mod tests;
