//! In-memory transport double for unit tests.

use crate::{RawResponse, Transport};
use async_trait::async_trait;
use reqwest::Method;
use roster_core::{RosterError, RosterResult};
use std::collections::VecDeque;
use std::sync::Mutex;

/// What the fake answers to one request.
#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, String),
    NetworkDown,
}

impl Reply {
    pub fn ok(body: serde_json::Value) -> Self {
        Self::Status(200, body.to_string())
    }
}

/// Replays a script of replies, then repeats `fallback` forever.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Reply>>,
    fallback: Option<Reply>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Reply>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn always(reply: Reply) -> Self {
        Self {
            fallback: Some(reply),
            ..Self::new(Vec::new())
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, method: Method, url: &str) -> RosterResult<RawResponse> {
        assert_eq!(method, Method::GET);
        self.requests.lock().unwrap().push(url.to_string());

        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .or_else(|| self.fallback.clone())
            .expect("unexpected request: script exhausted");

        match reply {
            Reply::Status(status, body) => Ok(RawResponse::new(status, body)),
            Reply::NetworkDown => Err(RosterError::Network("connection refused".to_string())),
        }
    }
}
