/// Background verification worker
///
/// Runs one verification request off the UI thread and reports the outcome
/// through a channel. Each attempt is bounded by a timeout; failed attempts
/// are retried a fixed number of times.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use super::{check_alignment, SerialVerifier, VerificationResult};
use crate::error::VerificationError;

pub type VerificationOutcome = Result<Vec<VerificationResult>, VerificationError>;

/// Timeout and retry limits for one verification request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Upper bound for a single attempt
    pub timeout: Duration,
    /// Extra attempts after the first one fails
    pub max_retries: u32,
    /// Pause between attempts
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            max_retries: 2,
            backoff: Duration::from_millis(250),
        }
    }
}

/// Handle to an outstanding verification request
pub struct PendingVerification {
    serial_numbers: Vec<String>,
    receiver: Receiver<VerificationOutcome>,
    started: Instant,
}

impl PendingVerification {
    /// Serial numbers this request was started with
    pub fn serial_numbers(&self) -> &[String] {
        &self.serial_numbers
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Non-blocking check for the outcome
    pub fn try_finish(&self) -> Option<VerificationOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(VerificationError::WorkerDisconnected)),
        }
    }

    /// Block up to `timeout` for the outcome
    pub fn wait(&self, timeout: Duration) -> Option<VerificationOutcome> {
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(VerificationError::WorkerDisconnected)),
        }
    }
}

/// Start verifying `serial_numbers` on a background thread
pub fn spawn_verification(
    verifier: Arc<dyn SerialVerifier>,
    serial_numbers: Vec<String>,
    policy: RetryPolicy,
) -> PendingVerification {
    let (tx, rx) = bounded(1);
    let request = serial_numbers.clone();

    info!(
        count = request.len(),
        attempts = policy.total_attempts(),
        "Starting serial number verification"
    );

    let spawned = thread::Builder::new()
        .name("serial-verification".to_string())
        .spawn(move || {
            let outcome = run_with_retry(&verifier, &request, policy);
            // Receiver gone means the session was dropped; nothing to report to
            let _ = tx.send(outcome);
        });

    let receiver = match spawned {
        Ok(_) => rx,
        Err(e) => {
            error!("Failed to start verification worker: {}", e);
            let (tx, rx) = bounded(1);
            let _ = tx.send(Err(VerificationError::Unavailable(format!(
                "failed to start verification worker: {e}"
            ))));
            rx
        }
    };

    PendingVerification {
        serial_numbers,
        receiver,
        started: Instant::now(),
    }
}

fn run_with_retry(
    verifier: &Arc<dyn SerialVerifier>,
    serial_numbers: &[String],
    policy: RetryPolicy,
) -> VerificationOutcome {
    let attempts = policy.total_attempts();
    let mut last_error = VerificationError::WorkerDisconnected;

    for attempt in 1..=attempts {
        let (outcome, straggler) = attempt_once(verifier, serial_numbers, policy.timeout, attempt);

        // At most one verifier call runs at a time, so a timed-out call is
        // waited out before the next attempt. Its late reply is discarded.
        if let Some(late) = straggler {
            let _ = late.recv();
            debug!(attempt, "Timed-out verification call settled");
        }

        match outcome.and_then(|results| check_alignment(serial_numbers, &results).map(|()| results)) {
            Ok(results) => {
                info!(attempt, "Verification succeeded");
                return Ok(results);
            }
            Err(e) => {
                warn!(attempt, attempts, "Verification attempt failed: {}", e);
                last_error = e;
            }
        }

        if attempt < attempts && !policy.backoff.is_zero() {
            thread::sleep(policy.backoff);
        }
    }

    error!(attempts, "Verification gave up: {}", last_error);
    if attempts == 1 {
        Err(last_error)
    } else {
        Err(VerificationError::Exhausted {
            attempts,
            last: Box::new(last_error),
        })
    }
}

/// One call to the verifier, given up on after `timeout`. A call that times
/// out keeps running; its receiver is handed back so the caller can wait
/// for it to finish.
fn attempt_once(
    verifier: &Arc<dyn SerialVerifier>,
    serial_numbers: &[String],
    timeout: Duration,
    attempt: u32,
) -> (VerificationOutcome, Option<Receiver<VerificationOutcome>>) {
    let (tx, rx) = bounded(1);
    let verifier = Arc::clone(verifier);
    let request = serial_numbers.to_vec();

    let spawned = thread::Builder::new()
        .name(format!("serial-verification-attempt-{attempt}"))
        .spawn(move || {
            let _ = tx.send(verifier.verify(&request));
        });
    if let Err(e) = spawned {
        let error = VerificationError::Unavailable(format!("failed to start attempt: {e}"));
        return (Err(error), None);
    }

    match rx.recv_timeout(timeout) {
        Ok(outcome) => (outcome, None),
        Err(RecvTimeoutError::Timeout) => (Err(VerificationError::Timeout { attempt }), Some(rx)),
        Err(RecvTimeoutError::Disconnected) => (Err(VerificationError::WorkerDisconnected), None),
    }
}
