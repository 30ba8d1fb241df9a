use std::fmt;
use bytemuck::{Pod, Zeroable};
use crate::error::{Error, Result};

/// Maximum length of a resource name in bytes
pub const RESOURCE_NAME_MAX_LENGTH: usize = 256;

/// Bounded, fixed-size resource name.
///
/// Names live inside plain-old-data records carved from pre-allocated
/// memory, so they are stored inline as a length plus a byte buffer rather
/// than as a heap `String`. Construction validates the maximum length.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct ResourceName {
    len: u32,
    bytes: [u8; RESOURCE_NAME_MAX_LENGTH],
}

impl ResourceName {
    /// Empty name
    pub const EMPTY: ResourceName = ResourceName {
        len: 0,
        bytes: [0; RESOURCE_NAME_MAX_LENGTH],
    };

    /// Copy `name` into a bounded buffer.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `name` is longer than `RESOURCE_NAME_MAX_LENGTH` bytes.
    pub fn new(name: &str) -> Result<Self> {
        if name.len() > RESOURCE_NAME_MAX_LENGTH {
            return Err(Error::InvalidArgument(format!(
                "Resource name is {}B long, maximum is {}B",
                name.len(),
                RESOURCE_NAME_MAX_LENGTH
            )));
        }

        let mut result = Self::EMPTY;
        result.bytes[..name.len()].copy_from_slice(name.as_bytes());
        result.len = name.len() as u32;
        Ok(result)
    }

    /// Name as a string slice (empty if the stored bytes are corrupt)
    pub fn as_str(&self) -> &str {
        let len = (self.len as usize).min(RESOURCE_NAME_MAX_LENGTH);
        std::str::from_utf8(&self.bytes[..len]).unwrap_or("")
    }

    /// Whether the name holds no characters
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// ASCII case-insensitive comparison against `other`
    pub fn eq_ignore_ascii_case(&self, other: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(other)
    }
}

impl Default for ResourceName {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl PartialEq for ResourceName {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ResourceName {}

impl PartialEq<str> for ResourceName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceName({:?})", self.as_str())
    }
}

#[cfg(test)]
#[path = "resource_name_tests.rs"]
mod tests;
