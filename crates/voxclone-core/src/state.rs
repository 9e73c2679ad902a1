use std::fmt;

/// Reachability of the remote inference space
///
/// Spaces on free hardware suspend after a period of inactivity, so an
/// unreachable endpoint is first treated as asleep rather than broken.
/// Only a deliberate wake-up attempt that still fails lands in `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessState {
    /// A probe or wake-up attempt is in progress
    Checking,
    /// The space answered its config handshake
    Ready,
    /// The space did not answer; it may be suspended and wakeable
    Sleeping,
    /// A user-triggered wake-up failed
    Error,
}

impl fmt::Display for ReadinessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Checking => "checking",
            Self::Ready => "ready",
            Self::Sleeping => "sleeping",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// Result of one generation request as seen by a presentation layer
///
/// Exactly one value is live per session; every request replaces it
/// wholesale, never merges with prior state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// No request has been made yet
    Idle,
    /// A request is in flight
    Loading,
    /// Synthesis finished; the URL points at the generated audio
    Success(String),
    /// The request failed with a user-presentable message
    Failure(String),
}

impl GenerationOutcome {
    /// URL of the generated audio, if this outcome is a success
    pub fn audio_url(&self) -> Option<&str> {
        match self {
            Self::Success(url) => Some(url),
            _ => None,
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}
