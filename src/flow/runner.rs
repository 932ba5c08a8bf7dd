//! Thread-per-component reference driver.
//!
//! Stands in for the surrounding pipeline engine in tests and benches:
//! every spawned component gets its own thread and runs to completion. Tearing a pipeline down early is done by dropping upstream
//! output ports — the components observe end-of-stream on their inputs and
//! finish on their own.

use crate::flow::component::Component;
use std::thread::JoinHandle;

/// Owns the threads of the components it spawned.
#[derive(Default)]
pub struct Runner {
    handles: Vec<(String, JoinHandle<()>)>,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `component` to completion on its own thread.
    pub fn spawn(&mut self, mut component: impl Component + 'static) {
        let name = component.name().to_string();
        let thread_name = name.clone();
        let handle = std::thread::spawn(move || {
            tracing::debug!("component {} started", thread_name);
            component.run();
            tracing::debug!("component {} finished", thread_name);
        });
        self.handles.push((name, handle));
    }

    /// Wait for every component to finish. A panicking component is reported
    /// as a warning; it never takes down the rest of the pipeline.
    pub fn join(self) {
        for (name, handle) in self.handles {
            if handle.join().is_err() {
                tracing::warn!("component {} panicked", name);
            }
        }
    }
}
