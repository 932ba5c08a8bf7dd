//! The component contract the pipeline engine drives.

use crate::flow::port::PortDescriptor;

/// A pipeline-driven unit of work.
///
/// The engine either calls [`process`](Component::process) repeatedly until
/// it returns `false`, or calls [`run`](Component::run) once. Streaming
/// components handle one element (or one tuple of elements) per `process`
/// call; batch components drain their inputs, issue a single marshaled host
/// call, emit every result, and return `false` from the first call.
pub trait Component: Send {
    /// Human-readable name, used in logs and engine lookups.
    fn name(&self) -> &str;

    /// Static port declarations for engine-side wiring by name.
    fn ports(&self) -> &[PortDescriptor];

    /// One step. `true` means "call me again"; `false` is terminal and the
    /// component will produce no more output.
    fn process(&mut self) -> bool;

    /// Drive [`process`](Component::process) to completion.
    fn run(&mut self) {
        while self.process() {}
    }
}
