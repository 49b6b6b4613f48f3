//! Consumer that accepts packets and does nothing with them.

use crate::consumer::Consumer;

/// Decodes everything, keeps nothing. Useful for measuring the listener alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullConsumer;

impl Consumer for NullConsumer {}
