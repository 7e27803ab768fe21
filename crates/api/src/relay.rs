use std::sync::Arc;

use llm::AnthropicClient;
use prompt::AnalysisRequest;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::{ConfigurationError, RelayError, ValidationError};
use crate::metrics::{Metrics, Outcome, TimedOperation};

/// Validates a board, builds the prompt, makes the one upstream call.
///
/// Holds no per-request state; one instance serves every request.
#[derive(Clone)]
pub struct Relay {
    client: AnthropicClient,
    api_key: Option<String>,
    metrics: Arc<Metrics>,
}

impl Relay {
    pub fn new(client: AnthropicClient, api_key: Option<String>, metrics: Arc<Metrics>) -> Self {
        Self {
            client,
            api_key,
            metrics,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run one `/analyze` request body through the pipeline.
    pub async fn analyze(&self, body: &[u8]) -> Result<String, RelayError> {
        let result = self.run(body).await;

        let outcome = match &result {
            Ok(analysis) => {
                info!(analysis = %analysis, "Connections solution");
                Outcome::Success
            }
            Err(RelayError::Validation(e)) => {
                warn!(error = %e, "Rejected analyze request");
                Outcome::ClientError
            }
            Err(e) => {
                error!(error = %e, "Failed to analyze words");
                Outcome::Failure
            }
        };
        self.metrics.record_request(outcome);

        result
    }

    async fn run(&self, body: &[u8]) -> Result<String, RelayError> {
        let request = parse_request(body)?;
        let prompt = prompt::build_prompt(request.words());
        debug!(prompt_len = prompt.len(), "Built prompt");

        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ConfigurationError::MissingApiKey)?;

        let timer = TimedOperation::start();
        let result = self.client.generate(api_key, &prompt).await;
        let elapsed = timer.elapsed();
        self.metrics.record_upstream(elapsed);
        debug!(
            elapsed_ms = elapsed.as_millis() as u64,
            ok = result.is_ok(),
            "Upstream call finished"
        );

        result.map_err(RelayError::from)
    }
}

/// Pull the board out of a raw request body.
///
/// A missing, empty, `null` or non-object body is treated the same as a
/// missing `words` field.
pub fn parse_request(body: &[u8]) -> Result<AnalysisRequest, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ValidationError::MissingWords);
    }

    let value: Value = serde_json::from_slice(body).map_err(|_| ValidationError::MalformedBody)?;

    let words = match value {
        Value::Object(mut fields) => fields
            .remove("words")
            .ok_or(ValidationError::MissingWords)?,
        _ => return Err(ValidationError::MissingWords),
    };

    serde_json::from_value(words).map_err(|_| ValidationError::WrongWordCount)
}
