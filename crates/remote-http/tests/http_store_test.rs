use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::{post, put};
use bytes::Bytes;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use remote_http::HttpContentStore;
use session::{
    ContentDescriptor, RemoteContentStore, SaveLessonRequest, SessionError, VIDEO_CONTENT_TYPE,
    VideoFile,
};

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

fn store_at(addr: SocketAddr) -> HttpContentStore {
    HttpContentStore::new(format!("http://{addr}"))
}

fn sample_descriptor() -> ContentDescriptor {
    ContentDescriptor {
        storage_key: "vod/abc".to_string(),
        location: "https://cdn.example/vod/abc.mp4".to_string(),
        size_bytes: Some(2_048),
    }
}

#[tokio::test]
async fn fetch_content_round_trip() {
    let app = Router::new().route(
        "/course/fetch-content",
        post(|Json(body): Json<Value>| async move {
            let found = body["content_id"] == "content-9" && body["course_id"] == "course-1";
            Json(json!({
                "success": found,
                "content": {
                    "storage_key": "vod/abc",
                    "location": "https://cdn.example/vod/abc.mp4",
                    "size_bytes": 2048,
                },
            }))
        }),
    );
    let store = store_at(serve(app).await);

    let descriptor = store
        .fetch_content(&"content-9".to_string(), &"course-1".to_string())
        .await
        .expect("fetch succeeds");

    assert_eq!(descriptor, sample_descriptor());
}

#[tokio::test]
async fn fetch_content_missing_maps_to_not_found() {
    let app = Router::new().route(
        "/course/fetch-content",
        post(|| async { Json(json!({"success": false})) }),
    );
    let store = store_at(serve(app).await);

    let error = store
        .fetch_content(&"content-9".to_string(), &"course-1".to_string())
        .await
        .expect_err("fetch must fail");

    assert_eq!(
        error,
        SessionError::ContentNotFound {
            content_id: "content-9".to_string()
        }
    );
}

#[tokio::test]
async fn upload_streams_progress_and_parses_descriptor() {
    let received = Arc::new(Mutex::new(0usize));
    let capture = Arc::clone(&received);
    let app = Router::new().route(
        "/course/upload-video",
        post(move |body: Bytes| {
            let capture = Arc::clone(&capture);
            async move {
                *capture.lock().expect("lock received") = body.len();
                Json(json!({
                    "success": true,
                    "content": {
                        "storage_key": "vod/new",
                        "location": "https://cdn.example/vod/new.mp4",
                    },
                }))
            }
        }),
    );
    let store = store_at(serve(app).await);

    let payload = Bytes::from(vec![7u8; 200 * 1024]);
    let file = VideoFile {
        file_name: "intro.mp4".to_string(),
        bytes: payload.clone(),
    };
    let mut percents = Vec::new();
    let descriptor = store
        .upload_video(&"course-1".to_string(), &file, &mut |percent| {
            percents.push(percent);
        })
        .await
        .expect("upload succeeds");

    assert_eq!(descriptor.storage_key, "vod/new");
    assert_eq!(descriptor.location, "https://cdn.example/vod/new.mp4");
    assert_eq!(descriptor.size_bytes, None);

    assert!(!percents.is_empty());
    assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(*percents.last().expect("at least one percent"), 100);

    // The multipart body framed the whole payload.
    assert!(*received.lock().expect("lock received") > payload.len());
}

#[tokio::test]
async fn upload_rejection_maps_to_validation() {
    let app = Router::new().route(
        "/course/upload-video",
        post(|| async { Json(json!({"success": false, "message": "unsupported type"})) }),
    );
    let store = store_at(serve(app).await);

    let file = VideoFile {
        file_name: "intro.avi".to_string(),
        bytes: Bytes::from_static(b"not really a video"),
    };
    let error = store
        .upload_video(&"course-1".to_string(), &file, &mut |_| {})
        .await
        .expect_err("upload must fail");

    assert_eq!(
        error,
        SessionError::Validation {
            message: "unsupported type".to_string()
        }
    );
}

#[tokio::test]
async fn delete_flattens_descriptor_into_body() {
    let app = Router::new().route(
        "/course/delete-file",
        post(|Json(body): Json<Value>| async move {
            let ok = body["storage_key"] == "vod/abc" && body["course_id"] == "course-1";
            Json(json!({"success": ok}))
        }),
    );
    let store = store_at(serve(app).await);

    store
        .delete_content(&sample_descriptor(), &"course-1".to_string())
        .await
        .expect("delete succeeds");
}

#[tokio::test]
async fn delete_rejection_maps_to_transport() {
    let app = Router::new().route(
        "/course/delete-file",
        post(|| async { Json(json!({"success": false, "message": "object locked"})) }),
    );
    let store = store_at(serve(app).await);

    let error = store
        .delete_content(&sample_descriptor(), &"course-1".to_string())
        .await
        .expect_err("delete must fail");

    assert_eq!(
        error,
        SessionError::Transport {
            message: "object locked".to_string()
        }
    );
}

#[tokio::test]
async fn save_sends_full_payload() {
    let seen = Arc::new(Mutex::new(None::<Value>));
    let capture = Arc::clone(&seen);
    let app = Router::new().route(
        "/course/sections/lessons",
        put(move |Json(body): Json<Value>| {
            let capture = Arc::clone(&capture);
            async move {
                *capture.lock().expect("lock payload") = Some(body);
                Json(json!({"success": true}))
            }
        }),
    );
    let store = store_at(serve(app).await);

    let request = SaveLessonRequest {
        title: "Intro".to_string(),
        description: "<p>Hi</p>".to_string(),
        content_type: VIDEO_CONTENT_TYPE.to_string(),
        content: sample_descriptor(),
        for_preview: true,
        course_id: "course-1".to_string(),
        section_id: "section-2".to_string(),
        lesson_id: "lesson-7".to_string(),
        content_id: Some("content-9".to_string()),
    };
    store.save_lesson(&request).await.expect("save succeeds");

    let body = seen
        .lock()
        .expect("lock payload")
        .clone()
        .expect("payload captured");
    assert_eq!(body["title"], "Intro");
    assert_eq!(body["description"], "<p>Hi</p>");
    assert_eq!(body["content_type"], "Video");
    assert_eq!(body["content"]["storage_key"], "vod/abc");
    assert_eq!(body["for_preview"], true);
    assert_eq!(body["course_id"], "course-1");
    assert_eq!(body["section_id"], "section-2");
    assert_eq!(body["lesson_id"], "lesson-7");
    assert_eq!(body["content_id"], "content-9");
}

#[tokio::test]
async fn save_rejection_maps_to_validation() {
    let app = Router::new().route(
        "/course/sections/lessons",
        put(|| async { Json(json!({"success": false, "message": "title required"})) }),
    );
    let store = store_at(serve(app).await);

    let request = SaveLessonRequest {
        title: String::new(),
        description: String::new(),
        content_type: VIDEO_CONTENT_TYPE.to_string(),
        content: sample_descriptor(),
        for_preview: false,
        course_id: "course-1".to_string(),
        section_id: "section-2".to_string(),
        lesson_id: "lesson-7".to_string(),
        content_id: None,
    };
    let error = store
        .save_lesson(&request)
        .await
        .expect_err("save must fail");

    assert_eq!(
        error,
        SessionError::Validation {
            message: "title required".to_string()
        }
    );
}

#[tokio::test]
async fn non_success_status_maps_to_transport() {
    let app = Router::new().route(
        "/course/fetch-content",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let store = store_at(serve(app).await);

    let error = store
        .fetch_content(&"content-9".to_string(), &"course-1".to_string())
        .await
        .expect_err("fetch must fail");

    assert!(matches!(error, SessionError::Transport { .. }));
}
