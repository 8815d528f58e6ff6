//! Integration tests for the backing-store accessors.
//!
//! Stands up a fake hosted-store REST surface on an ephemeral port and
//! drives the typed stores against it: upsert overwrite semantics, the
//! wire contract (filters, ordering, Prefer headers, credentials), error
//! mapping and the thumbnail upload flow.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Query as AxumQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use creatordesk::backend::{
    ActivityStore, BackendClient, BackendError, ContentKind, ContentStore, NewGrowthStat,
    NewSavedContent, Platform, StatsStore, TutorialStore,
};

/// One observed request, for wire-contract assertions.
#[derive(Clone, Debug)]
struct SeenRequest {
    params: HashMap<String, String>,
    prefer: Option<String>,
    apikey: Option<String>,
    authorization: Option<String>,
    content_type: Option<String>,
    x_upsert: Option<String>,
}

/// In-memory stand-in for the hosted store.
#[derive(Clone, Default)]
struct FakeStore {
    /// Growth rows keyed by `user|date|platform`
    stats: Arc<Mutex<HashMap<String, Value>>>,
    /// Saved-content rows in insert order
    content: Arc<Mutex<Vec<Value>>>,
    /// Every request observed, in order
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl FakeStore {
    fn observe(&self, params: &HashMap<String, String>, headers: &HeaderMap) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.seen.lock().unwrap().push(SeenRequest {
            params: params.clone(),
            prefer: header("prefer"),
            apikey: header("apikey"),
            authorization: header("authorization"),
            content_type: header("content-type"),
            x_upsert: header("x-upsert"),
        });
    }

    fn last_seen(&self) -> SeenRequest {
        self.seen.lock().unwrap().last().cloned().unwrap()
    }
}

async fn upsert_stat(
    State(store): State<FakeStore>,
    AxumQuery(params): AxumQuery<HashMap<String, String>>,
    headers: HeaderMap,
    Json(row): Json<Value>,
) -> Json<Vec<Value>> {
    store.observe(&params, &headers);

    let key = format!(
        "{}|{}|{}",
        row["user_id"].as_str().unwrap(),
        row["date"].as_str().unwrap(),
        row["platform"].as_str().unwrap()
    );
    let mut stored = row;
    stored["id"] = json!(Uuid::new_v4().to_string());
    stored["created_at"] = json!("2025-06-01T08:00:00Z");
    store.stats.lock().unwrap().insert(key, stored.clone());

    Json(vec![stored])
}

async fn list_stats(
    State(store): State<FakeStore>,
    AxumQuery(params): AxumQuery<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Vec<Value>> {
    store.observe(&params, &headers);
    let rows: Vec<Value> = store.stats.lock().unwrap().values().cloned().collect();
    Json(rows)
}

async fn insert_content(
    State(store): State<FakeStore>,
    AxumQuery(params): AxumQuery<HashMap<String, String>>,
    headers: HeaderMap,
    Json(row): Json<Value>,
) -> Json<Vec<Value>> {
    store.observe(&params, &headers);

    let mut stored = row;
    stored["id"] = json!(Uuid::new_v4().to_string());
    {
        let mut content = store.content.lock().unwrap();
        stored["created_at"] = json!(format!("2025-06-01T08:{:02}:00Z", content.len()));
        content.push(stored.clone());
    }

    Json(vec![stored])
}

async fn list_content(
    State(store): State<FakeStore>,
    AxumQuery(params): AxumQuery<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Vec<Value>> {
    store.observe(&params, &headers);
    // Newest first, as the requested ordering would return
    let mut rows = store.content.lock().unwrap().clone();
    rows.reverse();
    Json(rows)
}

async fn delete_content(
    State(store): State<FakeStore>,
    AxumQuery(params): AxumQuery<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Vec<Value>> {
    store.observe(&params, &headers);

    let target = params
        .get("id")
        .and_then(|v| v.strip_prefix("eq."))
        .unwrap_or_default()
        .to_string();
    let mut content = store.content.lock().unwrap();
    let removed: Vec<Value> = content
        .iter()
        .filter(|r| r["id"].as_str() == Some(target.as_str()))
        .cloned()
        .collect();
    content.retain(|r| r["id"].as_str() != Some(target.as_str()));

    Json(removed)
}

async fn empty_rows(
    State(store): State<FakeStore>,
    AxumQuery(params): AxumQuery<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Value> {
    store.observe(&params, &headers);
    Json(json!([]))
}

async fn accept_object(
    State(store): State<FakeStore>,
    AxumQuery(params): AxumQuery<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Value> {
    store.observe(&params, &headers);
    Json(json!({"Key": "tutorial-thumbnails/stored"}))
}

async fn patch_tutorial(
    State(store): State<FakeStore>,
    AxumQuery(params): AxumQuery<HashMap<String, String>>,
    headers: HeaderMap,
    Json(patch): Json<Value>,
) -> Json<Vec<Value>> {
    store.observe(&params, &headers);

    let id = params
        .get("id")
        .and_then(|v| v.strip_prefix("eq."))
        .unwrap_or_default();
    let row = json!({
        "id": id,
        "title": "Lighting basics",
        "description": null,
        "category": null,
        "video_url": null,
        "thumbnail_url": patch.get("thumbnail_url").cloned().unwrap_or(Value::Null),
        "published": false,
        "created_at": "2025-06-01T08:00:00Z",
        "updated_at": "2025-06-01T09:00:00Z"
    });

    Json(vec![row])
}

fn rest_router(store: &FakeStore) -> Router {
    Router::new()
        .route("/rest/v1/growth_stats", post(upsert_stat).get(list_stats))
        .route(
            "/rest/v1/saved_content",
            post(insert_content).get(list_content).delete(delete_content),
        )
        .route("/rest/v1/activity_log", get(empty_rows))
        .route("/rest/v1/tutorials", get(empty_rows).patch(patch_tutorial))
        .route(
            "/storage/v1/object/tutorial-thumbnails/{id}/{file}",
            post(accept_object),
        )
        .with_state(store.clone())
}

/// Serve an axum app on an ephemeral port.
async fn spawn_app(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Fake store plus a client pointed at it.
async fn store_fixture() -> (FakeStore, Arc<BackendClient>) {
    let store = FakeStore::default();
    let addr = spawn_app(rest_router(&store)).await;
    let client = Arc::new(BackendClient::new(
        format!("http://{}", addr),
        "anon".to_string(),
    ));
    (store, client)
}

fn june_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

/// Test that re-recording the same (user, date, platform) overwrites the row.
#[tokio::test]
async fn test_growth_stat_upsert_overwrites_previous_snapshot() {
    let (_store, client) = store_fixture().await;
    let stats = StatsStore::new(client);
    let user_id = Uuid::new_v4();

    stats
        .record(&NewGrowthStat {
            user_id,
            date: june_first(),
            platform: Platform::Youtube,
            followers: 100,
            views: 2000,
        })
        .await
        .unwrap();

    let stored = stats
        .record(&NewGrowthStat {
            user_id,
            date: june_first(),
            platform: Platform::Youtube,
            followers: 150,
            views: 2600,
        })
        .await
        .unwrap();
    assert_eq!(stored.followers, 150);

    let history = stats.history(user_id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].followers, 150);
    assert_eq!(history[0].views, 2600);
}

/// Test that the same day on different platforms stays two rows.
#[tokio::test]
async fn test_growth_snapshots_differ_by_platform() {
    let (_store, client) = store_fixture().await;
    let stats = StatsStore::new(client);
    let user_id = Uuid::new_v4();

    for platform in [Platform::Youtube, Platform::Tiktok] {
        stats
            .record(&NewGrowthStat {
                user_id,
                date: june_first(),
                platform,
                followers: 100,
                views: 2000,
            })
            .await
            .unwrap();
    }

    let history = stats.history(user_id).await.unwrap();
    assert_eq!(history.len(), 2);
}

/// Test that upserts name the conflict key and merge preference on the wire.
#[tokio::test]
async fn test_upsert_sends_conflict_key_and_merge_preference() {
    let (store, client) = store_fixture().await;
    let stats = StatsStore::new(client);

    stats
        .record(&NewGrowthStat {
            user_id: Uuid::new_v4(),
            date: june_first(),
            platform: Platform::Instagram,
            followers: 10,
            views: 50,
        })
        .await
        .unwrap();

    let seen = store.last_seen();
    assert_eq!(
        seen.params.get("on_conflict").map(String::as_str),
        Some("user_id,date,platform")
    );
    let prefer = seen.prefer.unwrap();
    assert!(prefer.contains("resolution=merge-duplicates"));
    assert!(prefer.contains("return=representation"));
}

/// Test that the newest-snapshot read asks for exactly one row, newest first.
#[tokio::test]
async fn test_latest_snapshot_asks_for_one_newest_row() {
    let (store, client) = store_fixture().await;
    let stats = StatsStore::new(client);
    let user_id = Uuid::new_v4();

    let empty = stats.latest_for(user_id, Platform::Youtube).await.unwrap();
    assert!(empty.is_none());

    stats
        .record(&NewGrowthStat {
            user_id,
            date: june_first(),
            platform: Platform::Youtube,
            followers: 120,
            views: 3400,
        })
        .await
        .unwrap();

    let latest = stats.latest_for(user_id, Platform::Youtube).await.unwrap();
    assert_eq!(latest.unwrap().followers, 120);

    let seen = store.last_seen();
    assert_eq!(
        seen.params.get("user_id").cloned(),
        Some(format!("eq.{}", user_id))
    );
    assert_eq!(
        seen.params.get("platform").map(String::as_str),
        Some("eq.youtube")
    );
    assert_eq!(
        seen.params.get("order").map(String::as_str),
        Some("date.desc")
    );
    assert_eq!(seen.params.get("limit").map(String::as_str), Some("1"));
}

/// Test saving, listing newest-first and deleting generated content.
#[tokio::test]
async fn test_saved_content_round_trip() {
    let (_store, client) = store_fixture().await;
    let content = ContentStore::new(client);
    let user_id = Uuid::new_v4();

    let first = content
        .save(&NewSavedContent {
            user_id,
            kind: ContentKind::Script,
            title: "Pasta episode script".to_string(),
            body: "Hook: ...".to_string(),
        })
        .await
        .unwrap();
    let second = content
        .save(&NewSavedContent {
            user_id,
            kind: ContentKind::Ideas,
            title: "Five video ideas".to_string(),
            body: "1. ...".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(second.kind, ContentKind::Ideas);

    let listed = content.list_for(user_id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);

    content.remove(first.id).await.unwrap();
    let listed = content.list_for(user_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, second.id);
}

/// Test that deleting a row that is not there reports not-found.
#[tokio::test]
async fn test_removing_absent_content_is_not_found() {
    let (_store, client) = store_fixture().await;
    let content = ContentStore::new(client);

    let result = content.remove(Uuid::new_v4()).await;
    assert!(matches!(result, Err(BackendError::NotFound)));
}

/// Test that a unique-key violation surfaces as a conflict error.
#[tokio::test]
async fn test_duplicate_insert_surfaces_conflict() {
    let app = Router::new().route(
        "/rest/v1/saved_content",
        post(|| async {
            (
                StatusCode::CONFLICT,
                Json(json!({
                    "message": "duplicate key value violates unique constraint \"saved_content_pkey\""
                })),
            )
        }),
    );
    let addr = spawn_app(app).await;
    let client = Arc::new(BackendClient::new(
        format!("http://{}", addr),
        "anon".to_string(),
    ));
    let content = ContentStore::new(client);

    let result = content
        .save(&NewSavedContent {
            user_id: Uuid::new_v4(),
            kind: ContentKind::Plan,
            title: "Duplicate".to_string(),
            body: "...".to_string(),
        })
        .await;

    match result {
        Err(BackendError::Conflict(message)) => assert!(message.contains("duplicate key")),
        other => panic!("expected Conflict, got {:?}", other),
    }
}

/// Test that list reads are scoped to the owner and ordered newest-first.
#[tokio::test]
async fn test_list_requests_are_owner_scoped_and_ordered() {
    let (store, client) = store_fixture().await;
    let content = ContentStore::new(client);
    let user_id = Uuid::new_v4();

    content.list_for(user_id).await.unwrap();

    let seen = store.last_seen();
    assert_eq!(seen.params.get("select").map(String::as_str), Some("*"));
    assert_eq!(
        seen.params.get("user_id").cloned(),
        Some(format!("eq.{}", user_id))
    );
    assert_eq!(
        seen.params.get("order").map(String::as_str),
        Some("created_at.desc")
    );
}

/// Test that the bearer token is the anon key until a session is installed.
#[tokio::test]
async fn test_bearer_falls_back_to_anon_key_until_signed_in() {
    let (store, client) = store_fixture().await;
    let content = ContentStore::new(client.clone());
    let user_id = Uuid::new_v4();

    content.list_for(user_id).await.unwrap();
    let seen = store.last_seen();
    assert_eq!(seen.apikey.as_deref(), Some("anon"));
    assert_eq!(seen.authorization.as_deref(), Some("Bearer anon"));

    client.set_access_token("user-jwt".to_string()).await;
    content.list_for(user_id).await.unwrap();
    let seen = store.last_seen();
    assert_eq!(seen.apikey.as_deref(), Some("anon"));
    assert_eq!(seen.authorization.as_deref(), Some("Bearer user-jwt"));
}

/// Test that the activity feed asks for a limited, newest-first tail.
#[tokio::test]
async fn test_activity_feed_requests_a_limited_tail() {
    let (store, client) = store_fixture().await;
    let activity = ActivityStore::new(client);
    let user_id = Uuid::new_v4();

    let entries = activity.recent(user_id, 5).await.unwrap();
    assert!(entries.is_empty());

    let seen = store.last_seen();
    assert_eq!(seen.params.get("limit").map(String::as_str), Some("5"));
    assert_eq!(
        seen.params.get("order").map(String::as_str),
        Some("created_at.desc")
    );
    assert_eq!(
        seen.params.get("user_id").cloned(),
        Some(format!("eq.{}", user_id))
    );
}

/// Test that only the member listing filters on the published flag.
#[tokio::test]
async fn test_published_filter_applies_only_to_member_listing() {
    let (store, client) = store_fixture().await;
    let tutorials = TutorialStore::new(client);

    tutorials.published().await.unwrap();
    let seen = store.last_seen();
    assert_eq!(
        seen.params.get("published").map(String::as_str),
        Some("eq.true")
    );

    tutorials.all().await.unwrap();
    let seen = store.last_seen();
    assert!(seen.params.get("published").is_none());
}

/// Test the thumbnail flow: upload with overwrite, then row pointed at the public URL.
#[tokio::test]
async fn test_thumbnail_upload_stores_object_and_patches_row() {
    let store = FakeStore::default();
    let addr = spawn_app(rest_router(&store)).await;
    let client = Arc::new(BackendClient::new(
        format!("http://{}", addr),
        "anon".to_string(),
    ));
    let tutorials = TutorialStore::new(client);
    let id = Uuid::new_v4();

    let updated = tutorials
        .upload_thumbnail(id, "Cover.PNG", vec![0x89, 0x50, 0x4e, 0x47])
        .await
        .unwrap();

    let expected_url = format!(
        "http://{}/storage/v1/object/public/tutorial-thumbnails/{}/thumbnail.png",
        addr, id
    );
    assert_eq!(updated.thumbnail_url.as_deref(), Some(expected_url.as_str()));

    // The storage request carried the overwrite flag and image MIME type
    let storage_request = store
        .seen
        .lock()
        .unwrap()
        .iter()
        .find(|r| r.x_upsert.is_some())
        .cloned()
        .unwrap();
    assert_eq!(storage_request.x_upsert.as_deref(), Some("true"));
    assert_eq!(storage_request.content_type.as_deref(), Some("image/png"));
}
