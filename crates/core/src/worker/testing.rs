//! In-process network stub for manager tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::network::Network;
use crate::{Error, Request, Response};

/// Serves canned bodies by URL, 404 for anything else, and fails every
/// request while offline. Records each URL it was asked for.
#[derive(Default)]
pub(crate) struct StubNetwork {
    routes: HashMap<String, String>,
    offline: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl StubNetwork {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn serve(mut self, url: &str, body: &str) -> Self {
        self.routes.insert(url.to_string(), body.to_string());
        self
    }

    pub(crate) fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Network for StubNetwork {
    async fn fetch(&self, request: &Request) -> Result<Response, Error> {
        let url = request.url().to_string();
        self.calls.lock().unwrap().push(url.clone());

        if self.offline.load(Ordering::SeqCst) {
            return Err(Error::Network(format!("offline: {url}")));
        }

        let (status, body) = match self.routes.get(&url) {
            Some(body) => (200, body.clone()),
            None => (404, "not found".to_string()),
        };

        Ok(Response {
            url,
            status,
            content_type: Some("text/html".to_string()),
            headers: vec![("content-type".to_string(), "text/html".to_string())],
            body: body.into_bytes(),
        })
    }
}
