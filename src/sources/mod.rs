//! Datagram source implementations

mod memory;
mod udp;

pub use memory::MemorySource;
pub use udp::UdpSource;
