use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::github::transport::{GraphQLRequest, GraphQLResponse, GraphQLTransport, TransportError};

/// A scripted transport that serves canned GraphQL bodies without any
/// network calls.
///
/// Replies are queued per operation name and consumed in order. Every call
/// is recorded, so tests can assert which operations ran and with what
/// variables. Useful for tests and demos that must not require a token.
#[derive(Default)]
pub struct StubTransport {
    replies: Mutex<HashMap<String, VecDeque<StubReply>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

#[derive(Debug, Clone)]
enum StubReply {
    Body(Value),
    Error(String),
}

/// One call observed by [`StubTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub operation: String,
    pub variables: Value,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a full GraphQL response body (`{"data": ..., "errors": ...}`).
    pub fn reply(self, operation: &str, body: Value) -> Self {
        self.push(operation, StubReply::Body(body));
        self
    }

    /// Queue a transport failure carrying `message`.
    pub fn fail(self, operation: &str, message: &str) -> Self {
        self.push(operation, StubReply::Error(message.to_owned()));
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Operation names of every call made so far, in order.
    pub fn operations(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.operation).collect()
    }

    fn push(&self, operation: &str, reply: StubReply) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(operation.to_owned())
            .or_default()
            .push_back(reply);
    }

    fn next_reply(&self, operation: &str) -> Option<StubReply> {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(operation)
            .and_then(VecDeque::pop_front)
    }
}

impl GraphQLTransport for StubTransport {
    async fn execute<V, D>(
        &self,
        request: &GraphQLRequest<V>,
    ) -> Result<GraphQLResponse<D>, TransportError>
    where
        V: Serialize + Send + Sync,
        D: DeserializeOwned + Send,
    {
        let variables = serde_json::to_value(&request.variables)
            .map_err(|e| TransportError::new(format!("stub: encoding variables: {e}")))?;
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedCall {
                operation: request.operation_name.to_owned(),
                variables,
            });

        match self.next_reply(request.operation_name) {
            Some(StubReply::Body(body)) => serde_json::from_value(body)
                .map_err(|e| TransportError::new(format!("stub: decoding response: {e}"))),
            Some(StubReply::Error(message)) => Err(TransportError::new(message)),
            None => Err(TransportError::new(format!(
                "stub: no reply scripted for {}",
                request.operation_name
            ))),
        }
    }
}
