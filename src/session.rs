//! Session executor: every host call runs on one dedicated thread.
//!
//! The wrapped scene API is single-threaded and non-reentrant. A
//! [`HostSession`] owns the [`HostApi`] implementation on a dedicated session
//! thread and marshals operations onto it: [`HostSession::execute`] may be
//! called from any component thread, queues the operation to the session
//! thread's mailbox, and blocks until the result comes back on a one-shot
//! reply channel. Operations are strictly serialized; a failing or panicking
//! operation is reported to its caller as a typed result and the session
//! thread stays alive for the next request.
//!
//! # Lifecycle
//!
//! The session lives for the process lifetime. [`HostSession::shutdown`]
//! stops intake, lets the session thread finish every request already
//! queued, then joins it. Submissions after shutdown are rejected with
//! [`SessionError::ShutDown`].
//!
//! A process-wide instance can be registered once via [`install`] and shared
//! through [`global`].

use crate::error::Result;
use crate::host::{HostApi, HostError};
use crate::options::OptionMap;
use crate::types::SceneValue;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread::JoinHandle;
use thiserror::Error;

/// Errors raised by the session executor itself (host failures travel
/// separately, inside the operation's return value).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The session was shut down before or while the request was serviced.
    #[error("session executor is shut down")]
    ShutDown,

    /// The operation panicked on the session thread. The thread survives.
    #[error("host operation panicked on the session thread")]
    OperationPanicked,
}

type Job = Box<dyn FnOnce(&mut dyn HostApi) + Send>;

struct Shared {
    /// `None` once shutdown has begun; the authoritative open/closed state.
    job_tx: Mutex<Option<Sender<Job>>>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

/// Cloneable handle to the session thread.
///
/// All clones refer to the same thread; dropping handles does not stop it.
/// Must not be used from inside a running operation (the session thread
/// cannot service a request it is itself waiting on).
#[derive(Clone)]
pub struct HostSession {
    shared: Arc<Shared>,
}

impl HostSession {
    /// Start a session thread owning `host`.
    pub fn spawn<H: HostApi + 'static>(host: H) -> Self {
        let (job_tx, job_rx) = unbounded::<Job>();
        let handle = std::thread::spawn(move || run_loop(host, job_rx));
        Self {
            shared: Arc::new(Shared {
                job_tx: Mutex::new(Some(job_tx)),
                thread: Mutex::new(Some(handle)),
            }),
        }
    }

    /// Run `op` on the session thread and block until it completes.
    ///
    /// Callable from any thread. The operation's own failure type (if any)
    /// is carried in `R`; `SessionError` covers only executor-level faults.
    pub fn execute<R, F>(&self, op: F) -> std::result::Result<R, SessionError>
    where
        R: Send + 'static,
        F: FnOnce(&mut dyn HostApi) -> R + Send + 'static,
    {
        let tx = {
            let guard = self
                .shared
                .job_tx
                .lock()
                .map_err(|_| SessionError::ShutDown)?;
            match guard.as_ref() {
                Some(tx) => tx.clone(),
                None => return Err(SessionError::ShutDown),
            }
        };

        let (reply_tx, reply_rx) = bounded::<std::thread::Result<R>>(1);
        let job: Job = Box::new(move |host| {
            let outcome = catch_unwind(AssertUnwindSafe(|| op(host)));
            let _ = reply_tx.send(outcome);
        });
        tx.send(job).map_err(|_| SessionError::ShutDown)?;

        match reply_rx.recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(SessionError::OperationPanicked),
            Err(_) => Err(SessionError::ShutDown),
        }
    }

    /// Marshal a single named host call.
    pub fn call(&self, op: &str, args: Vec<SceneValue>, kwargs: OptionMap) -> Result<Vec<SceneValue>> {
        let op = op.to_string();
        let values: std::result::Result<Vec<SceneValue>, HostError> =
            self.execute(move |host| host.call(&op, &args, &kwargs))?;
        Ok(values?)
    }

    /// Stop accepting requests, finish everything already queued, and join
    /// the session thread. Idempotent.
    pub fn shutdown(&self) {
        let tx = match self.shared.job_tx.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        drop(tx);

        let handle = match self.shared.thread.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        if let Some(handle) = handle {
            if handle.join().is_err() {
                tracing::warn!("scene session thread panicked during shutdown");
            }
        }
    }
}

fn run_loop<H: HostApi>(mut host: H, jobs: Receiver<Job>) {
    tracing::info!("scene session thread started");
    for job in jobs.iter() {
        job(&mut host);
    }
    tracing::info!("scene session thread exiting");
}

static GLOBAL: OnceLock<HostSession> = OnceLock::new();

/// Register the process-wide session. Fails if one is already installed,
/// handing the rejected session back to the caller.
pub fn install(session: HostSession) -> std::result::Result<(), HostSession> {
    GLOBAL.set(session)
}

/// The process-wide session, if one has been installed.
pub fn global() -> Option<&'static HostSession> {
    GLOBAL.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostResult, MemoryHost};

    /// Host that counts calls and fails on demand.
    struct FlakyHost {
        calls: u64,
    }

    impl HostApi for FlakyHost {
        fn call(&mut self, op: &str, _args: &[SceneValue], _kwargs: &OptionMap) -> HostResult {
            self.calls += 1;
            match op {
                "boom" => Err(HostError::Failed {
                    op: op.to_string(),
                    message: "requested failure".to_string(),
                }),
                _ => Ok(vec![SceneValue::Int(self.calls as i64)]),
            }
        }
    }

    #[test]
    fn test_execute_round_trip() {
        let session = HostSession::spawn(MemoryHost::new());
        let exists = session
            .call("objExists", vec![SceneValue::from("nothing")], OptionMap::new())
            .unwrap();
        assert_eq!(exists, vec![SceneValue::Bool(false)]);
        session.shutdown();
    }

    #[test]
    fn test_failure_leaves_thread_serviceable() {
        let session = HostSession::spawn(FlakyHost { calls: 0 });

        let err = session.call("boom", Vec::new(), OptionMap::new());
        assert!(err.is_err());

        // the loop must still answer after a failed operation
        let ok = session.call("ping", Vec::new(), OptionMap::new()).unwrap();
        assert_eq!(ok, vec![SceneValue::Int(2)]);
        session.shutdown();
    }

    #[test]
    fn test_panic_is_contained() {
        let session = HostSession::spawn(MemoryHost::new());

        let result: std::result::Result<(), SessionError> =
            session.execute(|_host| panic!("scripted panic"));
        assert_eq!(result, Err(SessionError::OperationPanicked));

        let after = session
            .call("objExists", vec![SceneValue::from("x")], OptionMap::new())
            .unwrap();
        assert_eq!(after, vec![SceneValue::Bool(false)]);
        session.shutdown();
    }

    #[test]
    fn test_rejects_after_shutdown() {
        let session = HostSession::spawn(MemoryHost::new());
        session.shutdown();

        let result = session.execute(|_host| ());
        assert_eq!(result, Err(SessionError::ShutDown));

        // shutdown is idempotent
        session.shutdown();
    }

    #[test]
    fn test_shutdown_completes_in_flight_request() {
        let session = HostSession::spawn(MemoryHost::new());
        let (started_tx, started_rx) = bounded::<()>(1);
        let submitter = {
            let session = session.clone();
            std::thread::spawn(move || {
                session.execute(move |_host| {
                    let _ = started_tx.send(());
                    std::thread::sleep(std::time::Duration::from_millis(30));
                    7i64
                })
            })
        };

        // wait until the operation is running, then shut down under it
        started_rx.recv().expect("operation started");
        session.shutdown();

        let outcome = submitter.join().expect("submitter thread");
        assert_eq!(outcome, Ok(7));
    }

    #[test]
    fn test_clones_share_one_thread() {
        let session = HostSession::spawn(FlakyHost { calls: 0 });
        let a = session.clone();
        let b = session.clone();
        a.call("ping", Vec::new(), OptionMap::new()).unwrap();
        let second = b.call("ping", Vec::new(), OptionMap::new()).unwrap();
        assert_eq!(second, vec![SceneValue::Int(2)]);
        session.shutdown();
    }
}
