//! Stream dataflow primitives.
//!
//! Values travel between components over typed, bounded ports; a port
//! delivers either a value or a sticky end-of-stream marker. On top of the
//! ports sit the stream synchronizers (aligning streams of differing lengths
//! under an explicit termination policy), the [`component::Component`]
//! contract the pipeline engine drives, and a thread-per-component reference
//! runner.
//!
//! # Design
//!
//! - **Bounded channels everywhere** — `send` reports backpressure instead of
//!   growing queues.
//! - **End-of-stream is sticky** — once a port reports it, it never yields a
//!   value again.
//! - **Synchronizers never read ahead** — after any stream of a pairing ends,
//!   no partner stream is polled speculatively.

pub mod component;
pub mod packet;
pub mod port;
pub mod runner;
pub mod sync;

pub use component::Component;
pub use packet::Packet;
pub use port::{stream, InputPort, OutputPort, ParamPort, PortDescriptor, PortDirection, PortKind};
pub use runner::Runner;
pub use sync::{GatedZip2, PairState, Zip2, Zip3};
