//! Typed ports over bounded crossbeam channels.
//!
//! [`stream`] builds a connected output/input pair. The input side blocks on
//! [`InputPort::receive`] and reports a sticky end-of-stream once the
//! upstream closes; the output side never blocks — [`OutputPort::send`]
//! returns `false` when the channel is saturated or closed, which is the
//! engine's backpressure signal.
//!
//! [`PortDescriptor`] is the static metadata a component publishes so the
//! engine can look its ports up by name and declared kind.

use crate::flow::packet::Packet;
use crossbeam_channel::{bounded, Receiver, Sender};

/// The kind of data flowing through a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    /// Ordered stream of values ending with end-of-stream.
    Stream,
    /// Scalar configuration value, set once before execution.
    Param,
}

/// Whether a port is an input or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

/// Static descriptor for a component's port.
#[derive(Debug, Clone)]
pub struct PortDescriptor {
    pub name: &'static str,
    pub direction: PortDirection,
    pub kind: PortKind,
}

impl PortDescriptor {
    pub const fn input(name: &'static str) -> Self {
        Self {
            name,
            direction: PortDirection::Input,
            kind: PortKind::Stream,
        }
    }

    pub const fn output(name: &'static str) -> Self {
        Self {
            name,
            direction: PortDirection::Output,
            kind: PortKind::Stream,
        }
    }

    pub const fn param(name: &'static str) -> Self {
        Self {
            name,
            direction: PortDirection::Input,
            kind: PortKind::Param,
        }
    }
}

/// Build a connected `(output, input)` stream pair with the given capacity.
pub fn stream<T>(capacity: usize) -> (OutputPort<T>, InputPort<T>) {
    let (tx, rx) = bounded(capacity);
    (OutputPort { tx }, InputPort { rx, ended: false })
}

/// Single-consumer receiving end of a stream.
pub struct InputPort<T> {
    rx: Receiver<T>,
    ended: bool,
}

impl<T> InputPort<T> {
    /// Block until a value arrives or the upstream closes.
    ///
    /// End-of-stream is sticky: after the first terminal packet every
    /// subsequent call also yields `EndOfStream`.
    pub fn receive(&mut self) -> Packet<T> {
        if self.ended {
            return Packet::EndOfStream;
        }
        match self.rx.recv() {
            Ok(value) => Packet::Value(value),
            Err(_) => {
                self.ended = true;
                Packet::EndOfStream
            }
        }
    }

    /// Whether end-of-stream has been observed.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Pull every remaining value, in order, until end-of-stream.
    pub fn drain(&mut self) -> Vec<T> {
        let mut out = Vec::new();
        loop {
            match self.receive() {
                Packet::Value(v) => out.push(v),
                Packet::EndOfStream => return out,
            }
        }
    }
}

/// Single-producer sending end of a stream.
///
/// Dropping the port closes the stream: the consumer sees end-of-stream
/// after draining whatever was already buffered.
pub struct OutputPort<T> {
    tx: Sender<T>,
}

impl<T> OutputPort<T> {
    /// Offer a value without blocking. Returns `false` when the channel is
    /// saturated or closed; the value is dropped in that case.
    pub fn send(&self, value: T) -> bool {
        self.tx.try_send(value).is_ok()
    }
}

impl<T: Default> OutputPort<T> {
    /// [`send`](OutputPort::send), substituting the type's default when the
    /// value is refused so downstream keeps positional alignment. Returns
    /// `false` only if the substitute was refused too.
    pub fn send_or_default(&self, value: T) -> bool {
        if self.send(value) {
            return true;
        }
        self.send(T::default())
    }
}

/// Scalar configuration cell: set once before execution, read any number of
/// times. Has no end-of-stream.
#[derive(Debug, Clone)]
pub struct ParamPort<T> {
    value: T,
}

impl<T: Clone> ParamPort<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> T {
        self.value.clone()
    }
}
