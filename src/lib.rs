//! # sceneflow: stream-pipeline adapters for a single-threaded scene API
//!
//! Adapter components that let a multi-threaded stream pipeline drive a
//! single-threaded, non-reentrant 3D-scene command interface. Components read
//! from typed input ports, reconcile streams of differing lengths, funnel
//! every host call onto one dedicated session thread, and emit results
//! downstream under bounded-channel backpressure.
//!
//! ## Architecture
//!
//! ```text
//! [Query] ──► [Exists]
//!        └──► [AttrName] ──► [GetValue / SetValue]
//!                                   │
//!                             HostSession (one thread)
//!                                   │
//!                                HostApi
//! ```
//!
//! - **Ports**: bounded crossbeam channels carrying one value per packet;
//!   end-of-stream is a sticky terminal marker, `send` reports backpressure.
//! - **Synchronizer**: aligns two or more input streams into tuples under an
//!   all-mandatory or primary/auxiliary termination policy.
//! - **Session**: every host call, from any component thread, executes on the
//!   one session thread that owns the [`host::HostApi`] implementation. The
//!   host never observes concurrent calls.
//! - **Components**: streaming components react per element via
//!   `process() -> bool`; batch components drain their inputs, issue a single
//!   marshaled call, and emit results in input order.
//!
//! ## Example
//!
//! ```ignore
//! use sceneflow::{components::Exists, flow::port, session::HostSession, MemoryHost, Runner};
//!
//! let session = HostSession::spawn(MemoryHost::new());
//! let (name_tx, name_rx) = port::stream(16);
//! let (exist_tx, mut exist_rx) = port::stream(16);
//!
//! let mut runner = Runner::new();
//! runner.spawn(Exists::new(session.clone(), name_rx, exist_tx));
//!
//! name_tx.send("persp".to_string());
//! drop(name_tx);
//! runner.join();
//! session.shutdown();
//! ```

pub mod components;
pub mod error;
pub mod flow;
pub mod host;
pub mod options;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use flow::component::Component;
pub use flow::packet::Packet;
pub use flow::port::{InputPort, OutputPort, ParamPort, PortDescriptor, PortDirection, PortKind};
pub use flow::runner::Runner;
pub use flow::sync::{GatedZip2, PairState, Zip2, Zip3};
pub use host::{HostApi, HostError, MemoryHost};
pub use options::OptionMap;
pub use session::{HostSession, SessionError};
pub use types::{SceneValue, ValueKind};
