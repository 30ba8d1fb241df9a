//! Memory accounting and arena allocation
//!
//! Every bookkeeping structure in the resource systems is carved out of a
//! `MemoryBlock` obtained through a `TaggedAllocator`, which keeps byte
//! statistics per `MemoryTag`.

mod memory_tag;
mod memory_block;
mod tagged_allocator;
mod arena;

pub use memory_tag::MemoryTag;
pub use memory_block::MemoryBlock;
pub use tagged_allocator::{TaggedAllocator, MemoryStats, scale_bytes};
pub use arena::{Arena, ArenaRegion};
