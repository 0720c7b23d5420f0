//! A mocked HTTP repository: PUT stores a resource by registering a GET
//! rule for the same url from inside the PUT action. Exercises re-entrant
//! rule registration during dispatch, sequentially and in parallel.

use http::header::CONTENT_TYPE;
use http::{Method, StatusCode};
use mockhttp::content::{read_json, response, ResponseExt};
use mockhttp::{matchers, MockClient};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Widget {
    name: String,
    rating: i32,
}

/// Build a client where any PUT stores its body and registers a GET rule
/// answering with the stored content.
fn repository() -> MockClient {
    // RUST_LOG=mockhttp=debug shows the resolution decisions.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let client = MockClient::new()
        .with_base_url("http://mockhttp.local")
        .unwrap();

    let registrar = client.clone();
    client
        .when(matchers::method(Method::PUT))
        .respond_with(move |put| {
            let registrar = registrar.clone();
            async move {
                let stored = put.body().clone();
                let media_type = put
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("application/octet-stream")
                    .to_string();

                registrar
                    .when(matchers::method(Method::GET))
                    .and(matchers::exact_uri(put.uri().clone()))
                    .then(move |_get| {
                        response(StatusCode::OK)
                            .with_body(stored.clone(), &media_type)
                            .expect("stored media type round-trips")
                    });

                Ok(response(StatusCode::OK))
            }
        });

    client
}

async fn put_widget(repo: &MockClient, url: &str, widget: &Widget) {
    let body = serde_json::to_vec(widget).unwrap();
    let request = http::Request::builder()
        .method(Method::PUT)
        .uri(url)
        .header(CONTENT_TYPE, "application/json")
        .body(bytes::Bytes::from(body))
        .unwrap();
    let reply = repo.send(request).await.unwrap();
    assert_eq!(reply.status(), StatusCode::OK);
}

#[tokio::test]
async fn fetches_previously_put_content() {
    let repo = repository();
    put_widget(
        &repo,
        "http://mockhttp.local/widget/1",
        &Widget {
            name: "Foo".into(),
            rating: 10,
        },
    )
    .await;

    let reply = repo.get("/widget/1").await.unwrap();
    assert_eq!(reply.status(), StatusCode::OK);
    assert_eq!(
        reply.headers().get(CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let widget: Widget = read_json(reply.body()).unwrap();
    assert_eq!(widget.name, "Foo");
    assert_eq!(widget.rating, 10);
}

#[tokio::test]
async fn latest_put_wins() {
    let repo = repository();
    put_widget(
        &repo,
        "http://mockhttp.local/widget/1",
        &Widget {
            name: "Foo".into(),
            rating: 15,
        },
    )
    .await;
    put_widget(
        &repo,
        "http://mockhttp.local/widget/1",
        &Widget {
            name: "Foo-2".into(),
            rating: 25,
        },
    )
    .await;

    let reply = repo.get("/widget/1").await.unwrap();
    let widget: Widget = read_json(reply.body()).unwrap();
    assert_eq!(widget.name, "Foo-2");
    assert_eq!(widget.rating, 25);
}

#[tokio::test]
async fn stores_multiple_resources_independently() {
    let repo = repository();
    let widgets = [
        ("http://mockhttp.local/widget/1", "Foo", 15),
        ("http://mockhttp.local/widget/2", "Bar", 25),
        ("http://mockhttp.local/widget/3", "Zut", 10),
    ];
    for (url, name, rating) in widgets {
        put_widget(
            &repo,
            url,
            &Widget {
                name: name.into(),
                rating,
            },
        )
        .await;
    }

    for (url, name, rating) in widgets {
        let path = url.strip_prefix("http://mockhttp.local").unwrap();
        let reply = repo.get(path).await.unwrap();
        assert_eq!(reply.status(), StatusCode::OK);
        let widget: Widget = read_json(reply.body()).unwrap();
        assert_eq!(widget.name, name);
        assert_eq!(widget.rating, rating);
    }
}

#[tokio::test]
async fn unknown_resources_still_fall_back() {
    let repo = repository();
    let reply = repo.get("/widget/404").await.unwrap();
    assert_eq!(reply.status(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn parallel_put_then_get_neither_deadlocks_nor_corrupts_rules() {
    let repo = repository();

    let mut tasks = Vec::new();
    for id in 0..64 {
        let repo = repo.clone();
        tasks.push(tokio::spawn(async move {
            let url = format!("http://mockhttp.local/widget/{id}");
            let widget = Widget {
                name: format!("widget-{id}"),
                rating: id,
            };
            put_widget(&repo, &url, &widget).await;

            let reply = repo.get(&url).await.unwrap();
            assert_eq!(reply.status(), StatusCode::OK);
            let fetched: Widget = read_json(reply.body()).unwrap();
            assert_eq!(fetched, widget);
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }

    // One PUT rule plus one GET rule per stored widget.
    assert_eq!(repo.engine().len(), 1 + 64);
}
