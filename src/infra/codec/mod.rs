//! Explicit little-endian encoding of application structures.
pub mod cursor;
pub mod traits;
