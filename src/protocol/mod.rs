//! High-level components of the segmentation protocol: the segmentation
//! core, the bus transport layer, and the link service.
pub mod segmentation;
pub mod service;
pub mod transport;
