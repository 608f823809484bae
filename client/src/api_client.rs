//! Agent backend client
//!
//! HTTP client for the two agent endpoints the chat screen uses:
//! listing agents and sending a message to one of them.

use crate::config::ApiConfig;
use crate::error::ClientError;
use crate::reply::Reply;
use crate::types::{Agent, ApiEnvelope, SendTextOptions, SendTextRequest, TextResponseData};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;

/// The operations the chat screen needs from an agent backend
#[async_trait]
pub trait AgentApi: Send + Sync {
    /// Fetch the list of available agents
    async fn list_agents(&self) -> Result<Vec<Agent>, ClientError>;

    /// Send one user message to an agent and interpret the reply
    async fn send_text(
        &self,
        agent_id: &str,
        input: &str,
        conversation_id: &str,
    ) -> Result<Reply, ClientError>;
}

/// [`AgentApi`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpAgentClient {
    client: reqwest::Client,
    base_url: Url,
    user_id: String,
}

impl HttpAgentClient {
    /// Build a client from configuration
    ///
    /// # Errors
    /// * Returns `ClientError::Config` if the base URL is invalid.
    pub fn new(client: reqwest::Client, config: &ApiConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client,
            base_url: config.parsed_base_url()?,
            user_id: config.user_id.clone(),
        })
    }

    /// The backend origin requests are sent to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/api/agents[/{segments}...]`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::Config("base URL cannot be a base".to_string()))?;
            path.pop_if_empty().push("api").push("agents");
            path.extend(segments);
        }
        Ok(url)
    }
}

#[async_trait]
impl AgentApi for HttpAgentClient {
    async fn list_agents(&self) -> Result<Vec<Agent>, ClientError> {
        let url = self.endpoint(&[])?;

        tracing::debug!(url = %url, "Fetching agent list");

        let response = self.client.get(url).send().await?;
        let envelope: ApiEnvelope<Vec<Agent>> = read_json(response).await?;

        if !envelope.success {
            return Err(ClientError::Unsuccessful("agent list".to_string()));
        }

        let agents = envelope.data.unwrap_or_default();
        tracing::debug!(count = agents.len(), "Received agent list");
        Ok(agents)
    }

    async fn send_text(
        &self,
        agent_id: &str,
        input: &str,
        conversation_id: &str,
    ) -> Result<Reply, ClientError> {
        let url = self.endpoint(&[agent_id, "text"])?;

        let request_body = SendTextRequest {
            input: input.to_string(),
            options: SendTextOptions {
                user_id: self.user_id.clone(),
                conversation_id: conversation_id.to_string(),
            },
        };

        tracing::debug!(
            url = %url,
            agent_id = %agent_id,
            conversation_id = %conversation_id,
            input_len = input.len(),
            "Sending message to agent"
        );

        let response = self.client.post(url).json(&request_body).send().await?;
        let envelope: ApiEnvelope<TextResponseData> = read_json(response).await?;

        if !envelope.success {
            tracing::warn!(agent_id = %agent_id, "Agent reported an unsuccessful exchange");
        }

        let reply = Reply::interpret(envelope.data);
        tracing::debug!(agent_id = %agent_id, reply = %reply_kind(&reply), "Received agent reply");
        Ok(reply)
    }
}

/// Check the status, then parse the body as JSON
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());

        tracing::error!(
            status_code = status.as_u16(),
            error_body = %body,
            "Agent backend returned error status"
        );

        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await?;
    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(source) => Err(ClientError::Decode { source, body }),
    }
}

fn reply_kind(reply: &Reply) -> &'static str {
    match reply {
        Reply::Messages(_) => "messages",
        Reply::Text(_) => "text",
        Reply::Fallback => "fallback",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_ID;

    fn client_for(base_url: &str) -> HttpAgentClient {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
        };
        HttpAgentClient::new(reqwest::Client::new(), &config).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let client = client_for("http://localhost:3141");
        assert_eq!(
            client.endpoint(&[]).unwrap().as_str(),
            "http://localhost:3141/api/agents"
        );
        assert_eq!(
            client.endpoint(&["a1", "text"]).unwrap().as_str(),
            "http://localhost:3141/api/agents/a1/text"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_encodes_ids() {
        let client = client_for("http://localhost:3141/backend/");
        assert_eq!(
            client.endpoint(&["my agent/1", "text"]).unwrap().as_str(),
            "http://localhost:3141/backend/api/agents/my%20agent%2F1/text"
        );
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let config = ApiConfig {
            base_url: "file:///tmp".to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
        };
        let result = HttpAgentClient::new(reqwest::Client::new(), &config);
        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}
