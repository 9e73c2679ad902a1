#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use args::Args;
use clap::Parser;
use voxclone_client::SpaceClient;
use voxclone_config::Config;
use voxclone_core::{EXAMPLE_PROMPTS, GenerationOutcome, GenerationParameters, ReadinessState, SpeechSession};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(&args.log);

    let config = Config::load(&args.config)?;
    let client = SpaceClient::new(&config.space)?;
    let session = SpeechSession::new(client.clone());

    tracing::info!(space = %client.base_url(), "checking space availability");

    await_ready(&session, args.wake).await?;

    let params = build_parameters(&args, &config)?;
    tracing::info!(text = %params.text, "generating speech");

    match session.generate(&params).await? {
        GenerationOutcome::Success(url) => {
            println!("{url}");

            if let Some(path) = &args.output {
                let audio = client.fetch_audio(&url).await?;
                std::fs::write(path, &audio)
                    .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
                tracing::info!(path = %path.display(), bytes = audio.len(), "audio saved");
            }

            Ok(())
        }
        GenerationOutcome::Failure(message) => {
            if session.readiness() == ReadinessState::Sleeping {
                tracing::warn!("the space went unavailable; re-run with --wake to retry");
            }
            anyhow::bail!(message)
        }
        // generate() resolves to Success or Failure before returning
        outcome => anyhow::bail!("unexpected outcome: {outcome:?}"),
    }
}

/// Probe the space and, when allowed, wake it from a suspended state
async fn await_ready<T: voxclone_core::SpeechTransport>(
    session: &SpeechSession<T>,
    wake: bool,
) -> anyhow::Result<()> {
    match session.probe().await {
        ReadinessState::Ready => Ok(()),
        ReadinessState::Sleeping if wake => {
            tracing::info!("space is asleep, attempting to wake it");
            match session.wake_up().await {
                ReadinessState::Ready => Ok(()),
                state => anyhow::bail!("wake-up failed (state: {state}); the space may be down"),
            }
        }
        ReadinessState::Sleeping => {
            anyhow::bail!("the space appears to be asleep; pass --wake to try waking it")
        }
        state => anyhow::bail!("space is not ready (state: {state})"),
    }
}

/// Merge config defaults, an optional example prompt, and CLI overrides
fn build_parameters(args: &Args, config: &Config) -> anyhow::Result<GenerationParameters> {
    let defaults = &config.defaults;

    let mut params = match args.example {
        Some(index) => EXAMPLE_PROMPTS
            .get(index)
            .ok_or_else(|| anyhow::anyhow!("no example prompt {index} (have {})", EXAMPLE_PROMPTS.len()))?
            .parameters(),
        None => {
            let text = args
                .text
                .clone()
                .or_else(|| defaults.text.clone())
                .ok_or_else(|| anyhow::anyhow!("no text given and no default prompt configured"))?;

            GenerationParameters {
                text,
                temperature: defaults.temperature,
                top_p: defaults.top_p,
                top_k: defaults.top_k,
                seed: defaults.seed,
            }
        }
    };

    if let Some(temperature) = args.temperature {
        params.temperature = temperature;
    }
    if let Some(top_p) = args.top_p {
        params.top_p = top_p;
    }
    if let Some(top_k) = args.top_k {
        params.top_k = top_k;
    }
    if let Some(seed) = args.seed {
        params.seed = seed;
    }

    Ok(params)
}

fn init_tracing(filter: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}
