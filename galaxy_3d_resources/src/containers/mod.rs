//! Fixed-capacity containers over pre-carved memory

mod hash_index;

pub use hash_index::{HashIndex, hash_key};
