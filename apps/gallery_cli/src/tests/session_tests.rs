use std::sync::Mutex;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use shared::{
    domain::{CommentId, UserId},
    error::ApiErrorBody,
    protocol::{Comment, CreateCommentRequest},
};
use tokio::net::TcpListener;

use super::*;

#[derive(Clone, Default)]
struct Backend {
    comments: Arc<Mutex<Vec<Comment>>>,
    renamed: Arc<Mutex<Vec<RenameForm>>>,
}

async fn list_comments(
    State(backend): State<Backend>,
    Path(wallpaper_id): Path<i64>,
) -> Json<Vec<Comment>> {
    let comments = backend.comments.lock().expect("comments lock");
    Json(
        comments
            .iter()
            .filter(|c| c.wallpaper_id == WallpaperId(wallpaper_id))
            .cloned()
            .collect(),
    )
}

async fn create_comment(
    State(backend): State<Backend>,
    Json(payload): Json<CreateCommentRequest>,
) -> impl IntoResponse {
    if payload.wallpaper_id == WallpaperId(401) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ApiErrorBody {
                error: "Please log in to post comments".to_string(),
                details: None,
            }),
        )
            .into_response();
    }
    let mut comments = backend.comments.lock().expect("comments lock");
    let id = comments.len() as i64 + 1;
    comments.insert(
        0,
        Comment {
            id: CommentId(id),
            wallpaper_id: payload.wallpaper_id,
            user_id: UserId(5),
            username: "tess".to_string(),
            text: payload.text,
            created_at: chrono::Utc::now(),
        },
    );
    (
        StatusCode::CREATED,
        Json(serde_json::json!({"success": true, "id": id})),
    )
        .into_response()
}

async fn rename_wallpaper(
    State(backend): State<Backend>,
    Form(form): Form<RenameForm>,
) -> Redirect {
    backend.renamed.lock().expect("renamed lock").push(form);
    Redirect::to("/wallpapers")
}

async fn wallpapers() -> &'static str {
    "wallpapers"
}

async fn spawn_backend(backend: Backend) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/api/comments/:wallpaper_id", get(list_comments))
        .route("/api/comments", post(create_comment))
        .route("/rename", post(rename_wallpaper))
        .route("/wallpapers", get(wallpapers))
        .with_state(backend);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn post_then_show_round_trips_through_backend() {
    let url = spawn_backend(Backend::default()).await;
    let api: Arc<dyn CommentsApi> = Arc::new(GalleryClient::new(url));
    let settings = UiSettings::default();

    let empty = show_comments(api.clone(), &settings, WallpaperId(12)).await;
    assert!(empty.contains("No comments yet"));

    let html = post_comment(api.clone(), &settings, WallpaperId(12), "  <i>stunning</i> ")
        .await
        .expect("post comment");
    assert!(html.contains("&lt;i&gt;stunning"), "{html}");
    assert!(!html.contains("<i>"));
    assert!(html.contains(">tess<"));

    let other = show_comments(api, &settings, WallpaperId(13)).await;
    assert!(other.contains("No comments yet"));
}

#[tokio::test]
async fn rejected_post_surfaces_the_alert() {
    let url = spawn_backend(Backend::default()).await;
    let api: Arc<dyn CommentsApi> = Arc::new(GalleryClient::new(url));

    let err = post_comment(api, &UiSettings::default(), WallpaperId(401), "hi")
        .await
        .expect_err("unauthorized post");
    assert_eq!(
        err.to_string(),
        gallery_ui::components::wallpaper_modal::POST_FAILED_ALERT
    );
}

#[tokio::test]
async fn rename_sends_trimmed_name_and_follows_redirect() {
    let backend = Backend::default();
    let url = spawn_backend(backend.clone()).await;
    let client = GalleryClient::new(url.clone());

    let location = rename(
        &client,
        &UiSettings::default(),
        WallpaperId(42),
        "Old",
        Some("  Aurora  ".to_string()),
    )
    .await
    .expect("rename");
    assert_eq!(location, Some(format!("{url}/wallpapers")));

    let renamed = backend.renamed.lock().expect("renamed lock").clone();
    assert_eq!(
        renamed,
        vec![RenameForm {
            wallpaper_id: "42".to_string(),
            new_name: "Aurora".to_string(),
        }]
    );
}

#[tokio::test]
async fn blank_rename_is_abandoned() {
    let client = GalleryClient::new("http://127.0.0.1:9");
    let location = rename(
        &client,
        &UiSettings::default(),
        WallpaperId(42),
        "Old",
        Some("   ".to_string()),
    )
    .await
    .expect("blank rename");
    assert_eq!(location, None);
}

#[tokio::test(start_paused = true)]
async fn layout_reports_row_spans() {
    let spans = layout(
        &UiSettings::default(),
        &[300.0, 160.0, 10.0],
        Some("40px"),
        Some("10px"),
    )
    .await;
    assert_eq!(spans, vec!["span 7", "span 4", "span 1"]);
}

#[tokio::test(start_paused = true)]
async fn layout_falls_back_to_default_metrics() {
    // Zero gap and a non-numeric row height fall back to 40 and 10.
    let spans = layout(&UiSettings::default(), &[300.0], Some("0"), Some("auto")).await;
    assert_eq!(spans, vec!["span 7"]);
}
