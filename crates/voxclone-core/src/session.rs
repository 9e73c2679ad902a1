use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::error::SpeechError;
use crate::extract::extract_audio_url;
use crate::params::GenerationParameters;
use crate::state::{GenerationOutcome, ReadinessState};
use crate::transport::SpeechTransport;

/// Endpoint route of the space's synthesis function
pub const GENERATE_ROUTE: &str = "/generate_speech";

/// Fixed message when the space answered but produced no audio reference
const NO_AUDIO_MESSAGE: &str = "No audio generated. Please try again.";

/// One UI session's worth of generation state
///
/// Sequences probe → build → call → extract over a [`SpeechTransport`]
/// and holds the two observable values: the space's readiness and the
/// outcome of the latest generation request. Operations take `&self` so
/// a shared handle can be driven from UI event handlers; the session
/// itself enforces the single-flight invariants rather than relying on
/// the presentation layer disabling buttons.
pub struct SpeechSession<T> {
    transport: T,
    state: Mutex<SessionState>,
    generating: AtomicBool,
    waking: AtomicBool,
    /// Bumped by every probe/wake so a superseded attempt's result is discarded
    probe_epoch: AtomicU64,
}

struct SessionState {
    readiness: ReadinessState,
    outcome: GenerationOutcome,
}

/// Clears a single-flight flag when the owning operation finishes,
/// including when its future is dropped mid-call.
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<T: SpeechTransport> SpeechSession<T> {
    /// New session in the initial state: readiness `Checking`, outcome `Idle`
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: Mutex::new(SessionState {
                readiness: ReadinessState::Checking,
                outcome: GenerationOutcome::Idle,
            }),
            generating: AtomicBool::new(false),
            waking: AtomicBool::new(false),
            probe_epoch: AtomicU64::new(0),
        }
    }

    /// Current readiness of the space
    pub fn readiness(&self) -> ReadinessState {
        self.lock().readiness
    }

    /// Outcome of the latest generation request
    pub fn outcome(&self) -> GenerationOutcome {
        self.lock().outcome.clone()
    }

    /// Initial availability probe
    ///
    /// Any failure collapses to `Sleeping`: the space may merely be
    /// suspended, and the wake-up flow is the recovery path. This never
    /// returns `Error` and never propagates the underlying failure.
    pub async fn probe(&self) -> ReadinessState {
        let epoch = self.begin_check();

        let next = match self.transport.probe().await {
            Ok(()) => ReadinessState::Ready,
            Err(e) => {
                tracing::warn!("space probe failed, treating as asleep: {e}");
                ReadinessState::Sleeping
            }
        };

        self.finish_check(epoch, next);
        next
    }

    /// User-triggered retry from `Sleeping`
    ///
    /// The same handshake as [`Self::probe`], but a failure here means a
    /// deliberate retry did not bring the space back, so it lands in
    /// `Error` instead of re-offering the automatic path. At most one
    /// wake-up runs at a time; re-invocation is a no-op returning the
    /// current readiness.
    pub async fn wake_up(&self) -> ReadinessState {
        if self.waking.swap(true, Ordering::AcqRel) {
            return self.readiness();
        }
        let _flight = FlightGuard(&self.waking);

        let epoch = self.begin_check();

        let next = match self.transport.probe().await {
            Ok(()) => ReadinessState::Ready,
            Err(e) => {
                tracing::warn!("wake-up attempt failed: {e}");
                ReadinessState::Error
            }
        };

        self.finish_check(epoch, next);
        next
    }

    /// Issue one synthesis request
    ///
    /// Blank text and an already-running request are rejected up front
    /// without touching the stored outcome. Remote failures are absorbed
    /// into the returned [`GenerationOutcome::Failure`]; a failed call is
    /// also taken as evidence the space went unavailable, re-arming the
    /// wake-up flow.
    pub async fn generate(&self, params: &GenerationParameters) -> Result<GenerationOutcome, SpeechError> {
        params.validate()?;

        if self.generating.swap(true, Ordering::AcqRel) {
            return Err(SpeechError::Busy);
        }
        let _flight = FlightGuard(&self.generating);

        self.set_outcome(GenerationOutcome::Loading);

        let payload = params.to_payload();
        tracing::debug!(text_len = params.text.len(), "requesting speech synthesis");

        let outcome = match self.transport.call(GENERATE_ROUTE, payload).await {
            Ok(envelope) => {
                // The call completed, so the space is demonstrably awake
                // even when the payload carries no audio reference.
                self.set_readiness(ReadinessState::Ready);

                extract_audio_url(&envelope).map_or_else(
                    || {
                        tracing::warn!("generation response carried no audio URL: {envelope}");
                        GenerationOutcome::Failure(NO_AUDIO_MESSAGE.to_owned())
                    },
                    GenerationOutcome::Success,
                )
            }
            Err(e) => {
                tracing::warn!("generation call failed: {e}");
                self.set_readiness(ReadinessState::Sleeping);
                GenerationOutcome::Failure(format!("Failed to generate audio: {e}"))
            }
        };

        self.set_outcome(outcome.clone());
        Ok(outcome)
    }

    /// Mark a check as started and return its epoch for the stale guard
    fn begin_check(&self) -> u64 {
        let epoch = self.probe_epoch.fetch_add(1, Ordering::AcqRel) + 1;
        self.set_readiness(ReadinessState::Checking);
        epoch
    }

    /// Record a check's result unless a newer check has since started
    fn finish_check(&self, epoch: u64, next: ReadinessState) {
        if self.probe_epoch.load(Ordering::Acquire) == epoch {
            self.set_readiness(next);
        }
    }

    fn set_readiness(&self, readiness: ReadinessState) {
        self.lock().readiness = readiness;
    }

    fn set_outcome(&self, outcome: GenerationOutcome) {
        self.lock().outcome = outcome;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionState> {
        // Held only to swap small values, never across an await
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
