use std::sync::{Arc, Mutex};

use api::{ApiConfig, AppState, router};
use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode, header},
    routing::{get, post},
};
use rag_gateway::RagGatewayConfig;
use serde_json::{Value, json};
use tower::ServiceExt;

type Seen = Arc<Mutex<Vec<Value>>>;

/// Fake RAG service that records every forwarded body.
async fn spawn_upstream(seen: Seen) -> String {
    async fn chat(State(seen): State<Seen>, Json(body): Json<Value>) -> Json<Value> {
        seen.lock().unwrap().push(body);
        Json(json!({
            "answer": "DMA stands for designated market area.",
            "chunks": [{ "id": "c1", "metadata": { "source": "report.pdf" } }]
        }))
    }

    let app = Router::new()
        .route("/chat", post(chat))
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .with_state(seen);
    serve(app).await
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn proxy(base_url: &str) -> Router {
    let config = ApiConfig {
        address: "127.0.0.1:0".into(),
        gateway: RagGatewayConfig::new(base_url).unwrap(),
    };
    router(Arc::new(AppState::new(config).unwrap()))
}

fn post_json(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/rag")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn read_json(res: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn forwards_request_body_unchanged() {
    let seen: Seen = Arc::default();
    let app = proxy(&spawn_upstream(seen.clone()).await);

    let input = json!({ "question": "What is the DMA metric?", "top_k": 6, "where": { "dma": "Boston" } });
    let res = app.oneshot(post_json(input.to_string())).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        read_json(res).await,
        json!({
            "answer": "DMA stands for designated market area.",
            "chunks": [{ "id": "c1", "metadata": { "source": "report.pdf" } }]
        })
    );
    assert_eq!(seen.lock().unwrap().as_slice(), &[input]);
}

#[tokio::test]
async fn substitutes_default_top_k_only_when_absent() {
    let seen: Seen = Arc::default();
    let app = proxy(&spawn_upstream(seen.clone()).await);

    let res = app
        .clone()
        .oneshot(post_json(json!({ "question": "q" }).to_string()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .oneshot(post_json(json!({ "question": "q", "top_k": 3 }).to_string()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0], json!({ "question": "q", "top_k": 6 }));
    assert_eq!(seen[1], json!({ "question": "q", "top_k": 3 }));
}

#[tokio::test]
async fn empty_question_and_empty_body_are_forwarded() {
    let seen: Seen = Arc::default();
    let app = proxy(&spawn_upstream(seen.clone()).await);

    let res = app
        .clone()
        .oneshot(post_json(json!({ "question": "" }).to_string()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.oneshot(post_json(Body::empty())).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0], json!({ "question": "", "top_k": 6 }));
    assert_eq!(seen[1], json!({ "top_k": 6 }));
}

#[tokio::test]
async fn unusual_field_types_are_forwarded_unchanged() {
    let seen: Seen = Arc::default();
    let app = proxy(&spawn_upstream(seen.clone()).await);

    let inputs = [
        json!({ "question": "q", "top_k": 6.0 }),
        json!({ "question": "q", "where": [] }),
        json!({ "question": "q", "top_k": "6", "where": { "dma": null } }),
        json!({ "question": 42, "top_k": -1 }),
    ];
    for input in &inputs {
        let res = app.clone().oneshot(post_json(input.to_string())).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{input}");
    }

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0], json!({ "question": "q", "top_k": 6.0 }));
    assert_eq!(seen[1], json!({ "question": "q", "top_k": 6, "where": [] }));
    assert_eq!(seen[2], inputs[2]);
    assert_eq!(seen[3], inputs[3]);
}

#[tokio::test]
async fn non_post_methods_are_rejected_without_forwarding() {
    let seen: Seen = Arc::default();
    let app = proxy(&spawn_upstream(seen.clone()).await);

    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let req = Request::builder()
            .method(method)
            .uri("/api/rag")
            .body(Body::empty())
            .unwrap();
        let res = app.clone().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(read_json(res).await, json!({ "error": "Method not allowed" }));
    }
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let seen: Seen = Arc::default();
    let app = proxy(&spawn_upstream(seen.clone()).await);

    let res = app.oneshot(post_json("{\"question\":")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = read_json(res).await;
    assert!(body["error"].as_str().is_some_and(|m| !m.is_empty()));
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_upstream_yields_500_with_message() {
    let app = proxy(&closed_port_url().await);

    let res = app
        .oneshot(post_json(json!({ "question": "q" }).to_string()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = read_json(res).await;
    let obj = body.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert!(obj["error"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn non_json_upstream_body_yields_500() {
    let upstream = Router::new().route("/chat", post(|| async { "<html>oops</html>" }));
    let app = proxy(&serve(upstream).await);

    let res = app
        .oneshot(post_json(json!({ "question": "q" }).to_string()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(read_json(res).await["error"].as_str().unwrap().contains("oops"));
}

#[tokio::test]
async fn health_reports_upstream_state() {
    let app = proxy(&spawn_upstream(Arc::default()).await);
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = read_json(res).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["upstream"]["ok"], true);

    let app = proxy(&closed_port_url().await);
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let body = read_json(app.oneshot(req).await.unwrap()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["upstream"]["ok"], false);
}
