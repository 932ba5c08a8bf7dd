//! The unit of transfer on a port: a value or the end-of-stream marker.

/// A single received unit. `EndOfStream` carries no value and must not be
/// forwarded into downstream logic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet<T> {
    Value(T),
    EndOfStream,
}

impl<T> Packet<T> {
    /// Whether this packet is the terminal marker.
    pub fn is_end(&self) -> bool {
        matches!(self, Packet::EndOfStream)
    }

    /// Extract the value, releasing the packet.
    pub fn into_value(self) -> Option<T> {
        match self {
            Packet::Value(v) => Some(v),
            Packet::EndOfStream => None,
        }
    }
}
