/// Errors returned directly to the caller of a session operation
///
/// Remote failures are not surfaced here; they are absorbed into
/// [`crate::GenerationOutcome::Failure`] and [`crate::ReadinessState`]
/// transitions so every failure path leaves the session retryable.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    /// The text to synthesize is empty or whitespace-only
    #[error("no text to synthesize")]
    EmptyText,

    /// A generation request is already in flight
    #[error("a generation request is already in flight")]
    Busy,
}
