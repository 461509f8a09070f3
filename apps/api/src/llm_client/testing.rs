//! Fake LLM providers for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{CompletionRequest, LlmError, LlmErrorKind, LlmProvider};

/// Returns scripted responses in order and records every request it receives.
/// Once the script is exhausted the last response is repeated.
pub struct RecordingLlm {
    responses: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl RecordingLlm {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|r| r.to_string()).collect()),
            last: Mutex::new(String::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn request(&self, index: usize) -> CompletionRequest {
        self.requests.lock().unwrap()[index].clone()
    }
}

#[async_trait]
impl LlmProvider for RecordingLlm {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request);
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.responses.lock().unwrap().pop_front() {
            *last = next;
        }
        Ok(last.clone())
    }
}

/// Fails every call with the given kind.
pub struct FailingLlm {
    pub kind: LlmErrorKind,
    pub calls: Mutex<usize>,
}

impl FailingLlm {
    pub fn new(kind: LlmErrorKind) -> Self {
        Self {
            kind,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl LlmProvider for FailingLlm {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, LlmError> {
        *self.calls.lock().unwrap() += 1;
        Err(LlmError::new(self.kind, "simulated provider failure"))
    }
}

/// Succeeds on the first `ok_calls` calls, then fails with `Failure`.
pub struct FlakyLlm {
    inner: RecordingLlm,
    ok_calls: usize,
}

impl FlakyLlm {
    pub fn new(responses: &[&str], ok_calls: usize) -> Self {
        Self {
            inner: RecordingLlm::new(responses),
            ok_calls,
        }
    }
}

#[async_trait]
impl LlmProvider for FlakyLlm {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        if self.inner.calls() >= self.ok_calls {
            return Err(LlmError::failure("simulated provider failure"));
        }
        self.inner.complete(request).await
    }
}

/// Waits `delay` before answering, to keep a stage in flight.
pub struct SlowLlm {
    delay: Duration,
    response: String,
}

impl SlowLlm {
    pub fn new(delay: Duration, response: &str) -> Self {
        Self {
            delay,
            response: response.to_string(),
        }
    }
}

#[async_trait]
impl LlmProvider for SlowLlm {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, LlmError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.response.clone())
    }
}
