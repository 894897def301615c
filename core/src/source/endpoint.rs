use crate::error::{CoreError, CoreResult};
use std::net::IpAddr;
use url::Url;

/// Validates and normalizes the data source base URL.
///
/// `https` is required; plain `http` is accepted only for a loopback host so a
/// local PostgREST can be used during development. Hosts come back lowercased
/// punycode from the parser; the trailing slash, query and fragment are dropped.
pub fn validate_source_url(raw: &str) -> CoreResult<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|_| CoreError::Config("invalid data source URL".to_string()))?;

    let host = url
        .host_str()
        .ok_or_else(|| CoreError::Config("data source URL missing host".to_string()))?
        .to_string();

    match url.scheme() {
        "https" => {}
        "http" if is_loopback_host(&host) => {}
        "http" => {
            return Err(CoreError::Config(
                "data source URL must use https unless it is loopback".to_string(),
            ))
        }
        _ => {
            return Err(CoreError::Config(
                "data source URL scheme must be http or https".to_string(),
            ))
        }
    }

    let trimmed = url.path().trim_end_matches('/').to_string();
    url.set_path(&trimmed);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn is_loopback_host(host: &str) -> bool {
    if host.eq_ignore_ascii_case("localhost") {
        return true;
    }
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    bare.parse::<IpAddr>().is_ok_and(|ip| ip.is_loopback())
}
