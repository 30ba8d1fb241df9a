/// Allocates and recycles unique `u32` backend identifiers.
///
/// Used by renderer backends to hand out internal ids for textures and
/// materials. Freed ids are recycled on subsequent allocations, so the
/// range of live ids stays dense.
///
/// # Example
///
/// ```ignore
/// let mut ids = SlotAllocator::new();
/// let a = ids.alloc();  // Some(0)
/// let b = ids.alloc();  // Some(1)
/// ids.free(0);          // 0 is now available
/// let c = ids.alloc();  // Some(0) (recycled)
/// ```
#[derive(Debug, Default)]
pub struct SlotAllocator {
    free_list: Vec<u32>,
    next_id: u32,
    len: u32,
}

impl SlotAllocator {
    /// Create a new empty allocator
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next available id.
    ///
    /// Returns `None` once every id below `u32::MAX` (the invalid sentinel)
    /// is live.
    pub fn alloc(&mut self) -> Option<u32> {
        let id = match self.free_list.pop() {
            Some(id) => id,
            None if self.next_id < u32::MAX => {
                self.next_id += 1;
                self.next_id - 1
            }
            None => return None,
        };
        self.len += 1;
        Some(id)
    }

    /// Return an id to the pool.
    ///
    /// Returns `false` (and changes nothing) for ids that were never
    /// allocated.
    pub fn free(&mut self, id: u32) -> bool {
        if id >= self.next_id || self.len == 0 {
            return false;
        }
        self.len -= 1;
        self.free_list.push(id);
        true
    }

    /// Highest id ever allocated + 1
    pub fn high_water_mark(&self) -> u32 {
        self.next_id
    }

    /// Number of currently allocated ids
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether no ids are currently allocated
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
#[path = "slot_allocator_tests.rs"]
mod tests;
