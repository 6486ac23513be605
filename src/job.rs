//! Job orchestration: snapshot in, one terminal event out.
//!
//! A job captures an environment snapshot, builds every outbound request,
//! dispatches them all through the caller's transport, and resolves exactly
//! once when the last completion arrives. Dispatch is a bounded synchronous
//! loop: every request is registered with the completion tracker and its
//! (lazy) transport future queued before anything is polled, so the pending
//! count can never reach zero mid-dispatch even for immediately-ready
//! completions. Completions are then drained in arrival order, which may
//! differ freely from dispatch order.

use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::oneshot;
use tracing::debug;
use uuid::Uuid;

use crate::builder::build_requests;
use crate::transport::BusTransport;
use crate::types::{EnvironmentSnapshot, PeerSet};

/// Lifecycle of one job. Transitions are strictly forward; `Finished` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JobState {
    Created,
    Dispatching,
    AwaitingCompletions,
    Finished,
}

/// Counts in-flight requests for one job.
///
/// One `register` per dispatch, one `complete` per arrival. The count is
/// monotonically non-negative, so the zero transition — the job's terminal
/// event — can be observed exactly once.
struct CompletionTracker {
    pending: usize,
}

impl CompletionTracker {
    fn new() -> Self {
        Self { pending: 0 }
    }

    /// Mark one request as in flight. Must run before the request's future
    /// can complete.
    fn register(&mut self) {
        self.pending += 1;
    }

    /// Mark one request as complete. Returns true on the zero transition.
    fn complete(&mut self) -> bool {
        debug_assert!(self.pending > 0, "completion without a matching dispatch");
        self.pending -= 1;
        self.pending == 0
    }

    fn pending(&self) -> usize {
        self.pending
    }
}

/// Propagates one set of environment-variable updates to every configured
/// peer and resolves once when all of them have completed.
///
/// The snapshot is copied at construction; later mutation of the caller's
/// environment is not observed. Failed peer calls count as completions and
/// are not retried or surfaced — the terminal event carries no payload.
///
/// # Examples
///
/// ```rust,no_run
/// use envsync::{EnvironmentSnapshot, UpdateEnvironmentJob};
///
/// # async fn example(bus: impl envsync::BusTransport) {
/// let mut snapshot = EnvironmentSnapshot::new();
/// snapshot.insert("DISPLAY", ":0");
///
/// UpdateEnvironmentJob::new(bus, snapshot).run().await;
/// // every peer has now acknowledged or failed its update
/// # }
/// ```
#[derive(Debug)]
pub struct UpdateEnvironmentJob<T> {
    transport: T,
    peers: PeerSet,
    snapshot: EnvironmentSnapshot,
    id: Uuid,
}

impl<T: BusTransport> UpdateEnvironmentJob<T> {
    /// Create a job over the default session peers.
    pub fn new(transport: T, snapshot: EnvironmentSnapshot) -> Self {
        let id = Uuid::new_v4();
        debug!(job = %id, variables = snapshot.len(), state = ?JobState::Created, "job created");
        Self {
            transport,
            peers: PeerSet::default(),
            snapshot,
            id,
        }
    }

    /// Replace the fan-out targets.
    pub fn with_peers(mut self, peers: PeerSet) -> Self {
        self.peers = peers;
        self
    }

    /// Identifier of this job, as carried in its log records.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Dispatch every request and wait for all completions.
    ///
    /// Resolution of the returned future is the job's single terminal event.
    /// It always arrives: every dispatched request yields exactly one
    /// completion, success or failure alike.
    pub async fn run(self) {
        let Self {
            transport,
            peers,
            snapshot,
            id,
        } = self;

        debug!(job = %id, state = ?JobState::Dispatching, "dispatching requests");
        let requests = build_requests(&snapshot, &peers);
        drop(snapshot);

        let mut tracker = CompletionTracker::new();
        let mut in_flight = FuturesUnordered::new();
        for request in requests {
            tracker.register();
            debug!(
                job = %id,
                service = %request.peer.service,
                method = %request.peer.method,
                "dispatching"
            );
            in_flight.push(transport.call(request));
        }

        debug!(
            job = %id,
            pending = tracker.pending(),
            state = ?JobState::AwaitingCompletions,
            "dispatch complete"
        );

        while let Some(outcome) = in_flight.next().await {
            if let Err(error) = outcome {
                debug!(job = %id, %error, "peer call failed");
            }
            if tracker.complete() {
                break;
            }
        }

        debug!(job = %id, state = ?JobState::Finished, "all peers completed");
    }

    /// Run the job on the tokio runtime and return a handle to its terminal
    /// event.
    ///
    /// The job owns itself until it finishes, then drops; the handle may be
    /// awaited or discarded freely.
    pub fn spawn(self) -> JobHandle
    where
        T: 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            self.run().await;
            // The consumer may have dropped the handle; the job finishes
            // either way.
            let _ = tx.send(());
        });
        JobHandle { finished: rx }
    }
}

/// Handle to a spawned job's terminal event.
#[derive(Debug)]
pub struct JobHandle {
    finished: oneshot::Receiver<()>,
}

impl JobHandle {
    /// Wait for the job to finish. Resolves exactly once, with no payload.
    pub async fn finished(self) {
        let _ = self.finished.await;
    }
}
