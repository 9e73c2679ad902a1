use serde_json::{Value, json};

use crate::error::SpeechError;

const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_TOP_P: f64 = 0.85;
const DEFAULT_TOP_K: u32 = 50;
const DEFAULT_SEED: i64 = 42;

/// Sampling parameters for one synthesis request
///
/// Consumed once per request, never persisted. The numeric ranges mirror
/// the sliders the space exposes; values outside them are clamped when
/// the payload is built, since the space's behavior on invalid input is
/// unspecified.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParameters {
    /// Text to synthesize; must be non-blank before a request is allowed
    pub text: String,
    /// Prosody randomness, 0.1 to 1.0
    pub temperature: f64,
    /// Nucleus sampling threshold, 0.1 to 1.0
    pub top_p: f64,
    /// Vocabulary selection limit, 1 to 100
    pub top_k: u32,
    /// Random seed for reproducible output
    pub seed: i64,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            text: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            top_k: DEFAULT_TOP_K,
            seed: DEFAULT_SEED,
        }
    }
}

impl GenerationParameters {
    /// Parameters with default sampling values for the given text
    pub fn for_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Reject blank text before any request is issued
    pub fn validate(&self) -> Result<(), SpeechError> {
        if self.text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }
        Ok(())
    }

    /// Build the positional data payload the space's endpoint expects
    ///
    /// Order matches the endpoint's declared inputs:
    /// `[text, temperature, top_p, top_k, seed]`.
    pub fn to_payload(&self) -> Vec<Value> {
        vec![
            json!(self.text),
            json!(clamp_unit(self.temperature, DEFAULT_TEMPERATURE)),
            json!(clamp_unit(self.top_p, DEFAULT_TOP_P)),
            json!(self.top_k.clamp(1, 100)),
            json!(self.seed),
        ]
    }
}

/// Clamp a sampling knob to its 0.1..=1.0 range, replacing non-finite input
fn clamp_unit(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.1, 1.0)
    } else {
        fallback
    }
}

/// A canned prompt shipped with the demo
#[derive(Debug, Clone, Copy)]
pub struct ExamplePrompt {
    pub text: &'static str,
    pub temperature: f64,
}

impl ExamplePrompt {
    /// Parameters for this prompt, with default values for the other knobs
    pub fn parameters(&self) -> GenerationParameters {
        GenerationParameters {
            text: self.text.to_owned(),
            temperature: self.temperature,
            ..GenerationParameters::default()
        }
    }
}

/// Example prompts the original demo offered, with their tuned temperatures
pub const EXAMPLE_PROMPTS: &[ExamplePrompt] = &[
    ExamplePrompt {
        text: "Hola, soy Pedro. Bienvenidos a mi demostración de clonación de voz.",
        temperature: 0.7,
    },
    ExamplePrompt {
        text: "La inteligencia artificial ha avanzado mucho en los últimos años.",
        temperature: 0.5,
    },
    ExamplePrompt {
        text: "¿Cómo va todo? Espero que estés teniendo un excelente día.",
        temperature: 0.8,
    },
    ExamplePrompt {
        text: "A todo el mundo le gusta el jarabe para la tos, el olor del jarabe para la tos.",
        temperature: 0.7,
    },
];
