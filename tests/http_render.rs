use std::io::Cursor;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use memedrop::catalog::{Catalog, Template};
use memedrop::clipboard::NoClipboard;
use memedrop::notification::ToastRuntime;
use memedrop::render::{HttpRenderClient, RenderBackend, RenderError, RenderKind, RenderRequest};
use memedrop::session::Session;
use memedrop::state::GenerationPhase;
use memedrop::storage::DownloadService;
use memedrop::studio::Studio;

type Received = Arc<Mutex<Vec<(&'static str, serde_json::Value)>>>;

fn png() -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    image::RgbaImage::new(8, 6)
        .write_to(&mut buffer, image::ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

async fn flatten(
    State(received): State<Received>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    received.lock().unwrap().push(("generate", body));
    ([(header::CONTENT_TYPE, "image/png")], png())
}

async fn sticker(
    State(received): State<Received>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    received.lock().unwrap().push(("sticker", body));
    (
        [
            (header::CONTENT_TYPE, "image/webp"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"sticker.webp\""),
        ],
        b"RIFF\0\0\0\0WEBPVP8 ".to_vec(),
    )
}

async fn broken() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "template fetch exploded")
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn healthy_service() -> (String, Received) {
    let received = Received::default();
    let router = Router::new()
        .route("/api/memes/generate/", post(flatten))
        .route("/api/memes/sticker/", post(sticker))
        .with_state(Arc::clone(&received));
    (serve(router).await, received)
}

async fn failing_service() -> String {
    let router = Router::new()
        .route("/api/memes/generate/", post(broken))
        .route("/api/memes/sticker/", post(broken));
    serve(router).await
}

fn request() -> RenderRequest {
    RenderRequest {
        image_url: "https://i.imgflip.com/4t0m5.jpg".to_string(),
        top_text: "A".to_string(),
        bottom_text: "B".to_string(),
    }
}

#[tokio::test]
async fn flatten_posts_json_body_and_returns_payload() {
    let (base_url, received) = healthy_service().await;
    let client = HttpRenderClient::new(base_url);

    let payload = client.render(RenderKind::Flatten, &request()).await.unwrap();

    assert_eq!(payload, png());
    assert_eq!(
        received.lock().unwrap().as_slice(),
        &[(
            "generate",
            serde_json::json!({
                "image_url": "https://i.imgflip.com/4t0m5.jpg",
                "top_text": "A",
                "bottom_text": "B",
            })
        )]
    );
}

#[tokio::test]
async fn sticker_targets_sticker_endpoint() {
    let (base_url, received) = healthy_service().await;
    let client = HttpRenderClient::new(format!("{base_url}/"));

    let payload = client.render(RenderKind::Sticker, &request()).await.unwrap();

    assert!(payload.starts_with(b"RIFF"));
    assert_eq!(received.lock().unwrap()[0].0, "sticker");
}

#[tokio::test]
async fn non_success_status_is_reported_with_body() {
    let client = HttpRenderClient::new(failing_service().await);

    let err = client
        .render(RenderKind::Flatten, &request())
        .await
        .unwrap_err();

    match err {
        RenderError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "template fetch exploded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = HttpRenderClient::new(format!("http://{addr}"));

    let err = client
        .render(RenderKind::Flatten, &request())
        .await
        .unwrap_err();

    assert!(matches!(err, RenderError::Request(_)));
}

fn session(downloads: &std::path::Path) -> Session {
    Session::new(
        Catalog::bundled().unwrap(),
        Studio::new(vec![Template::new("https://i.imgflip.com/4t0m5.jpg", "Doge")]),
        ToastRuntime::new(),
        NoClipboard,
        DownloadService::with_dir(downloads.to_path_buf()),
    )
}

#[tokio::test]
async fn session_generates_and_downloads_against_live_service() {
    let (base_url, _received) = healthy_service().await;
    let client = HttpRenderClient::new(base_url);
    let downloads = tempfile::tempdir().unwrap();

    let mut session = session(downloads.path());
    session.studio_mut().set_top_text("such");
    session.studio_mut().set_bottom_text("wow");

    session.generate(&client).await.unwrap();
    let path = session.download().unwrap().unwrap();

    assert_eq!(path, downloads.path().join("meme.png"));
    assert_eq!(std::fs::read(path).unwrap(), png());
    assert_eq!(session.studio().registry().live_count(), 1);
    assert_eq!(
        session.toasts().current_message().as_deref(),
        Some("Meme generated!")
    );

    session.generate_sticker(&client).await.unwrap();
    assert!(downloads.path().join("sticker.webp").exists());
    assert_eq!(session.studio().registry().live_count(), 1);
}

#[tokio::test]
async fn session_survives_backend_failure() {
    let client = HttpRenderClient::new(failing_service().await);
    let downloads = tempfile::tempdir().unwrap();

    let mut session = session(downloads.path());

    assert!(session.generate(&client).await.is_err());

    assert_eq!(session.studio().phase(), GenerationPhase::Idle);
    assert_eq!(
        session.studio().last_settled(),
        Some(GenerationPhase::Failed)
    );
    assert_eq!(session.studio().registry().live_count(), 0);
    assert_eq!(session.download().unwrap(), None);
    assert_eq!(
        session.toasts().current_message().as_deref(),
        Some("Failed to generate meme. Is the backend running?")
    );
}
