#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod extract;
mod params;
mod session;
mod state;
mod transport;

pub use error::SpeechError;
pub use extract::extract_audio_url;
pub use params::{EXAMPLE_PROMPTS, ExamplePrompt, GenerationParameters};
pub use session::{GENERATE_ROUTE, SpeechSession};
pub use state::{GenerationOutcome, ReadinessState};
pub use transport::{SpeechTransport, TransportError};
