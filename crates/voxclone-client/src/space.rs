use url::Url;

use crate::error::ClientError;

/// Resolve a space address to the base URL of its Gradio API
///
/// Accepts either a full `http(s)://` URL or a Hugging Face `owner/space`
/// id. Ids map to the standard Spaces subdomain: lowercased, with `.` and
/// `_` folded to `-`, as `https://{owner}-{space}.hf.space`.
pub fn resolve_base_url(address: &str) -> Result<Url, ClientError> {
    let address = address.trim();

    if address.is_empty() {
        return Err(ClientError::Config("space address is empty".to_owned()));
    }

    if address.starts_with("http://") || address.starts_with("https://") {
        return Url::parse(address).map_err(|e| ClientError::Config(format!("invalid space URL: {e}")));
    }

    let Some((owner, space)) = address.split_once('/') else {
        return Err(ClientError::Config(format!(
            "space address must be a URL or an owner/space id, got `{address}`"
        )));
    };

    if owner.is_empty() || space.is_empty() || space.contains('/') {
        return Err(ClientError::Config(format!("malformed space id `{address}`")));
    }

    let host = format!("{}-{}.hf.space", subdomain_part(owner), subdomain_part(space));

    Url::parse(&format!("https://{host}"))
        .map_err(|e| ClientError::Config(format!("space id `{address}` resolves to an invalid URL: {e}")))
}

fn subdomain_part(part: &str) -> String {
    part.to_lowercase().replace(['.', '_'], "-")
}
