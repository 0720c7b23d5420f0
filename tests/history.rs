//! Request history recording.

use http::{Method, StatusCode};
use mockhttp::MockClient;

#[tokio::test]
async fn every_request_is_recorded_in_order() {
    let client = MockClient::new();
    client.when_url("/known").unwrap().then_status(StatusCode::OK);

    client.get("http://mockhttp.local/known").await.unwrap();
    client
        .post("http://mockhttp.local/unknown", "payload")
        .await
        .unwrap();

    let history = client.request_history();
    assert_eq!(history.len(), 2);

    assert_eq!(history[0].method, Method::GET);
    assert_eq!(history[0].uri.path(), "/known");

    // Unmatched requests are recorded too.
    assert_eq!(history[1].method, Method::POST);
    assert_eq!(history[1].uri.path(), "/unknown");
    assert_eq!(history[1].body.as_ref(), b"payload");
}

#[tokio::test]
async fn history_starts_empty() {
    let client = MockClient::new();
    assert!(client.request_history().is_empty());
}
