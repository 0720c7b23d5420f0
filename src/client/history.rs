//! Request history log.

use std::sync::Mutex;

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};

use crate::MockRequest;

/// Snapshot of one request as it entered dispatch.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Ordered log of every request the client has seen, matched or not.
#[derive(Debug, Default)]
pub struct RequestHistory {
    entries: Mutex<Vec<RecordedRequest>>,
}

impl RequestHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&self, request: &MockRequest) {
        let entry = RecordedRequest {
            method: request.method().clone(),
            uri: request.uri().clone(),
            headers: request.headers().clone(),
            body: request.body().clone(),
        };
        self.entries
            .lock()
            .expect("history lock poisoned")
            .push(entry);
    }

    /// Copy of the log, oldest request first.
    pub fn snapshot(&self) -> Vec<RecordedRequest> {
        self.entries.lock().expect("history lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("history lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_preserve_order_and_content() {
        let history = RequestHistory::new();
        for path in ["/first", "/second"] {
            let request = http::Request::builder()
                .method(Method::POST)
                .uri(path)
                .body(Bytes::from_static(b"payload"))
                .unwrap();
            history.record(&request);
        }

        let snapshot = history.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].uri.path(), "/first");
        assert_eq!(snapshot[1].uri.path(), "/second");
        assert_eq!(snapshot[0].body.as_ref(), b"payload");
        assert_eq!(snapshot[0].method, Method::POST);
    }
}
