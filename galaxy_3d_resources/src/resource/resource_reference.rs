use bytemuck::{Pod, Zeroable};

/// Sentinel marking "no slot" / "no resource"
pub const INVALID_ID: u32 = u32::MAX;

/// Sharing state of one named resource.
///
/// Stored by value in the cache's `HashIndex`, keyed by resource name, and
/// always updated as a read-modify-write copy.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct ResourceReference {
    /// Number of outstanding acquisitions
    pub reference_count: u64,
    /// Slot index in the resource array, `INVALID_ID` when not loaded
    pub handle: u32,
    auto_release: u32,
}

impl ResourceReference {
    /// Unregistered: never referenced, or released back to nothing
    pub const INVALID: ResourceReference = ResourceReference {
        reference_count: 0,
        handle: INVALID_ID,
        auto_release: 0,
    };

    /// Whether the resource is unloaded once its count returns to zero
    pub fn auto_release(&self) -> bool {
        self.auto_release != 0
    }

    pub fn set_auto_release(&mut self, auto_release: bool) {
        self.auto_release = u32::from(auto_release);
    }

    /// Slot index, `None` while unloaded
    pub fn handle(&self) -> Option<u32> {
        (self.handle != INVALID_ID).then_some(self.handle)
    }

    /// Whether this is the Unregistered state
    pub fn is_unregistered(&self) -> bool {
        self.reference_count == 0 && self.handle == INVALID_ID
    }
}

impl Default for ResourceReference {
    fn default() -> Self {
        Self::INVALID
    }
}
