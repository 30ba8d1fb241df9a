//! Fixed-capacity, direct-addressed string-keyed table
//!
//! `HashIndex` maps a key to exactly one bucket (`hash(key) % slot_count`)
//! and stores one fixed-size value per bucket. There is no chaining and no
//! probing: two keys reducing to the same bucket share the slot, and the
//! last `set` wins. Callers that need to tell names apart must store enough
//! information in the value to detect aliasing themselves.
//!
//! The table never allocates. It borrows a caller-supplied byte region of
//! exactly `slot_size * slot_count` bytes (typically carved from an `Arena`)
//! for its whole lifetime.
//!
//! Two storage modes exist:
//! - inline: each bucket holds a copy of a `bytemuck::Pod` value whose size
//!   equals `slot_size` (`set` / `get`)
//! - pointer: each bucket holds an address-sized word (`set_ptr` /
//!   `get_ptr`), zero meaning unset

use std::mem::size_of;
use std::ptr::NonNull;
use bytemuck::Pod;
use crate::error::Result;
use crate::{engine_bail, engine_error, engine_warn};

const SOURCE: &str = "galaxy3d::HashIndex";

/// Multiplier of the byte-wise key hash
const HASH_MULTIPLIER: u64 = 97;

/// Fixed-capacity table over borrowed memory
#[derive(Debug)]
pub struct HashIndex<'a> {
    slot_size: usize,
    slot_count: u32,
    stores_pointers: bool,
    memory: &'a mut [u8],
}

impl<'a> HashIndex<'a> {
    /// Bytes of backing memory needed for `slot_count` slots of `slot_size`
    pub fn memory_requirement(slot_size: usize, slot_count: u32) -> usize {
        slot_size * slot_count as usize
    }

    /// Build a table over `memory`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `slot_size` or `slot_count` is zero, when
    /// `memory` is not exactly `slot_size * slot_count` bytes, or when a
    /// pointer-mode table does not use address-sized slots.
    pub fn create(
        slot_size: usize,
        slot_count: u32,
        memory: &'a mut [u8],
        stores_pointers: bool,
    ) -> Result<Self> {
        if slot_size == 0 || slot_count == 0 {
            engine_bail!(SOURCE, InvalidArgument =>
                "slot_size ({}) and slot_count ({}) must be non-zero", slot_size, slot_count);
        }

        let required = Self::memory_requirement(slot_size, slot_count);
        if memory.len() != required {
            engine_bail!(SOURCE, InvalidArgument =>
                "Backing memory is {}B, expected exactly {}B ({} slots of {}B)",
                memory.len(), required, slot_count, slot_size);
        }

        if stores_pointers && slot_size != size_of::<usize>() {
            engine_bail!(SOURCE, InvalidArgument =>
                "Pointer tables need {}B slots, got {}B", size_of::<usize>(), slot_size);
        }

        Ok(Self { slot_size, slot_count, stores_pointers, memory })
    }

    /// Store a copy of `value` in the bucket for `key`.
    ///
    /// Returns `false` without touching the table when the key is empty,
    /// the value size differs from the slot size, or the table is in
    /// pointer mode.
    pub fn set<T: Pod>(&mut self, key: &str, value: &T) -> bool {
        let Some(range) = self.value_slot::<T>(key, "set") else {
            return false;
        };
        self.memory[range].copy_from_slice(bytemuck::bytes_of(value));
        true
    }

    /// Copy the value stored in the bucket for `key`.
    ///
    /// Returns `None` under the same conditions `set` fails on.
    pub fn get<T: Pod>(&self, key: &str) -> Option<T> {
        let range = self.value_slot::<T>(key, "get")?;
        Some(bytemuck::pod_read_unaligned(&self.memory[range]))
    }

    /// Store a pointer in the bucket for `key`; `None` marks the bucket unset
    pub fn set_ptr<T>(&mut self, key: &str, value: Option<NonNull<T>>) -> bool {
        let Some(range) = self.pointer_slot(key, "set_ptr") else {
            return false;
        };
        let address = value.map_or(0usize, |ptr| ptr.as_ptr() as usize);
        self.memory[range].copy_from_slice(&address.to_ne_bytes());
        true
    }

    /// Pointer stored in the bucket for `key`, `None` when unset
    pub fn get_ptr<T>(&self, key: &str) -> Option<NonNull<T>> {
        let range = self.pointer_slot(key, "get_ptr")?;
        let mut word = [0u8; size_of::<usize>()];
        word.copy_from_slice(&self.memory[range]);
        NonNull::new(usize::from_ne_bytes(word) as *mut T)
    }

    /// Copy the value stored in `bucket`, bypassing the key hash.
    ///
    /// Lets callers resolve collisions themselves by walking buckets.
    pub fn get_at<T: Pod>(&self, bucket: u32) -> Option<T> {
        let range = self.bucket_slot::<T>(bucket, "get_at")?;
        Some(bytemuck::pod_read_unaligned(&self.memory[range]))
    }

    /// Store a copy of `value` in `bucket`, bypassing the key hash
    pub fn set_at<T: Pod>(&mut self, bucket: u32, value: &T) -> bool {
        let Some(range) = self.bucket_slot::<T>(bucket, "set_at") else {
            return false;
        };
        self.memory[range].copy_from_slice(bytemuck::bytes_of(value));
        true
    }

    /// Write `value` into every bucket
    pub fn fill<T: Pod>(&mut self, value: &T) -> bool {
        if self.stores_pointers {
            engine_warn!(SOURCE, "fill should not be used with pointer tables");
            return false;
        }
        if size_of::<T>() != self.slot_size {
            engine_error!(SOURCE, "fill value is {}B, slots are {}B", size_of::<T>(), self.slot_size);
            return false;
        }

        let bytes = bytemuck::bytes_of(value);
        for slot in self.memory.chunks_exact_mut(self.slot_size) {
            slot.copy_from_slice(bytes);
        }
        true
    }

    /// Bucket `key` maps to
    pub fn bucket_index(&self, key: &str) -> u32 {
        (hash_key(key) % u64::from(self.slot_count)) as u32
    }

    /// Zero the backing memory and give up the borrow
    pub fn destroy(self) {
        self.memory.fill(0);
    }

    /// Size of one slot in bytes
    pub fn slot_size(&self) -> usize {
        self.slot_size
    }

    /// Number of buckets
    pub fn slot_count(&self) -> u32 {
        self.slot_count
    }

    /// Whether the table is in pointer mode
    pub fn stores_pointers(&self) -> bool {
        self.stores_pointers
    }

    fn value_slot<T>(&self, key: &str, operation: &str) -> Option<std::ops::Range<usize>> {
        if !self.accepts_value::<T>(operation) {
            return None;
        }
        self.slot_range(key, operation)
    }

    fn bucket_slot<T>(&self, bucket: u32, operation: &str) -> Option<std::ops::Range<usize>> {
        if !self.accepts_value::<T>(operation) {
            return None;
        }
        if bucket >= self.slot_count {
            engine_warn!(SOURCE, "{}: bucket {} is out of range ({} buckets)", operation, bucket, self.slot_count);
            return None;
        }
        let start = bucket as usize * self.slot_size;
        Some(start..start + self.slot_size)
    }

    fn accepts_value<T>(&self, operation: &str) -> bool {
        if self.stores_pointers {
            engine_warn!(SOURCE, "{} should not be used with pointer tables, use {}_ptr", operation, operation);
            return false;
        }
        if size_of::<T>() != self.slot_size {
            engine_error!(SOURCE, "{}: value is {}B, slots are {}B", operation, size_of::<T>(), self.slot_size);
            return false;
        }
        true
    }

    fn pointer_slot(&self, key: &str, operation: &str) -> Option<std::ops::Range<usize>> {
        if !self.stores_pointers {
            engine_warn!(SOURCE, "{} should not be used with value tables", operation);
            return None;
        }
        self.slot_range(key, operation)
    }

    fn slot_range(&self, key: &str, operation: &str) -> Option<std::ops::Range<usize>> {
        if key.is_empty() {
            engine_warn!(SOURCE, "{} requires a non-empty key", operation);
            return None;
        }
        let start = self.bucket_index(key) as usize * self.slot_size;
        Some(start..start + self.slot_size)
    }
}

/// Deterministic byte-wise hash of `key` (before reduction to a bucket)
pub fn hash_key(key: &str) -> u64 {
    key.bytes()
        .fold(0u64, |hash, byte| hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(u64::from(byte)))
}

#[cfg(test)]
#[path = "hash_index_tests.rs"]
mod tests;
