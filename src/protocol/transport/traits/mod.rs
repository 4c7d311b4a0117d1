//! Abstraction traits used by the transport layer (CAN bus, timer, and the
//! structure sender/receiver extensions).
pub mod can_bus;
pub mod korri_timer;
pub mod structure_receiver;
pub mod structure_sender;
