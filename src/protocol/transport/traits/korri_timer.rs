//! Asynchronous timer abstraction providing the delays used between frames
//! and the deadline of [`receive_structure_within`](super::structure_receiver::StructureReceiver::receive_structure_within).

/// Timer trait abstraction; must remain thread-safe when applicable.
pub trait KorriTimer {
    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(
        &'a mut self,
        millis: u32,
    ) -> impl core::future::Future<Output = ()> + 'a;
}
