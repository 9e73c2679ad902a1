pub mod mock_space;

use voxclone_client::SpaceClient;
use voxclone_config::SpaceConfig;
use voxclone_core::SpeechSession;

/// Session wired to a real HTTP client against the given space
pub fn session(config: &SpaceConfig) -> SpeechSession<SpaceClient> {
    SpeechSession::new(SpaceClient::new(config).expect("valid space config"))
}

/// Configuration pointing at a port nothing listens on
pub async fn unreachable_config() -> SpaceConfig {
    // Bind to grab a free port, then release it so connections are refused
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    SpaceConfig {
        address: format!("http://{addr}"),
        auth_token: None,
        call_timeout_seconds: 2,
    }
}
