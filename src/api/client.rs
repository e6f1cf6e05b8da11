use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::types::*;
use super::GameBackend;

/// Blocking JSON client for the farm backend
pub struct HttpBackend {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn post_json<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let result = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(body);

        read_json(path, result)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        read_json(path, self.agent.get(&url).call())
    }
}

impl GameBackend for HttpBackend {
    fn create_or_resume(&self, request: &PlayerRequest) -> Result<PlayerResponse, ApiError> {
        self.post_json("/api/player", request)
    }

    fn perform_action(&self, request: &ActionRequest) -> Result<ActionResponse, ApiError> {
        self.post_json("/api/perform_action", request)
    }

    fn environment(&self) -> Result<NasaData, ApiError> {
        let resp: EnvironmentResponse = self.get_json("/api/game_state")?;
        resp.nasa_data
            .ok_or_else(|| ApiError::InvalidResponse("No nasa_data returned".to_string()))
    }
}

/// Decode a response body. Error statuses still carry the backend's JSON
/// envelope, so only transport failures short-circuit.
fn read_json<T: DeserializeOwned>(
    path: &str,
    result: Result<ureq::Response, ureq::Error>,
) -> Result<T, ApiError> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            log::debug!("{} answered HTTP {}", path, code);
            response
        }
        Err(ureq::Error::Transport(transport)) => return Err(map_transport(transport)),
    };

    response
        .into_json::<T>()
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

fn map_transport(transport: ureq::Transport) -> ApiError {
    let timed_out = std::error::Error::source(&transport)
        .and_then(|source| source.downcast_ref::<std::io::Error>())
        .map(|io| matches!(io.kind(), std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock))
        .unwrap_or(false);

    if timed_out {
        ApiError::Timeout
    } else {
        ApiError::Network(transport.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = HttpBackend::new("http://localhost:5000/", Duration::from_secs(1));
        assert_eq!(backend.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) is closed on any sane test host
        let backend = HttpBackend::new("http://127.0.0.1:9", Duration::from_secs(2));
        let err = backend.environment().unwrap_err();
        assert!(matches!(err, ApiError::Network(_) | ApiError::Timeout));
    }
}
