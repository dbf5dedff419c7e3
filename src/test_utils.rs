//! Test fixtures, in-memory collaborators and a fully assembled router

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::{json, Map, Value};
use tower::ServiceExt;

use crate::{
    app,
    clients::{BeatmapProvider, DifficultyCalculator, BEATMAP_PROVIDER, DIFFICULTY_CALCULATOR},
    config::SecurityConfig,
    container::Container,
    db::{
        repositories::{AttributeCache, ScoreRepository},
        ATTRIBUTE_CACHE, SCORE_REPOSITORY,
    },
    error::AppResult,
    handlers,
    models::{
        Beatmap, BeatmapRef, CalculationInput, DifficultyAttributes, PerformanceAttributes,
        PerformanceCalculation, Score,
    },
    registry::ComponentRegistry,
    services,
};

pub const TEST_KEY: &str = "test-internal-key";
pub const SAMPLE_HASH: &str = "d41d8cd98f00b204e9800998ecf8427e";
pub const SAMPLE_UID: u32 = 51076;

pub fn sample_beatmap() -> Beatmap {
    Beatmap {
        id: 75,
        hash: SAMPLE_HASH.to_string(),
        title: "DISCO PRINCE".to_string(),
        artist: "Kenji Ninuma".to_string(),
        creator: "peppy".to_string(),
        version: "Normal".to_string(),
        max_combo: Some(314),
        osu_file: "osu file format v14".to_string(),
    }
}

pub fn sample_attributes() -> DifficultyAttributes {
    let mut details = Map::new();
    details.insert("aim_difficulty".to_string(), json!(1.1));
    details.insert("tap_difficulty".to_string(), json!(0.9));

    DifficultyAttributes {
        star_rating: 2.4,
        max_combo: 314,
        details,
    }
}

pub fn sample_calculation() -> PerformanceCalculation {
    let mut details = Map::new();
    details.insert("aim".to_string(), json!(20.5));

    PerformanceCalculation {
        difficulty: sample_attributes(),
        performance: PerformanceAttributes {
            total: 48.7,
            details,
        },
    }
}

pub fn sample_score() -> Score {
    Score {
        id: 9001,
        uid: SAMPLE_UID as i32,
        hash: SAMPLE_HASH.to_string(),
        mods: r#"[{"acronym":"HD"}]"#.to_string(),
        score: 1_500_000,
        combo: 310,
        n300: 150,
        n100: 3,
        n50: 0,
        nmiss: 1,
        slider_ticks_missed: Some(0),
        slider_ends_dropped: Some(1),
        date: Utc::now(),
    }
}

/// Knows only the sample beatmap
pub struct FakeBeatmaps;

#[async_trait]
impl BeatmapProvider for FakeBeatmaps {
    async fn fetch_beatmap(&self, beatmap: &BeatmapRef) -> AppResult<Option<Beatmap>> {
        let known = match beatmap {
            BeatmapRef::Id(id) => *id == 75,
            BeatmapRef::Hash(hash) => hash == SAMPLE_HASH,
        };
        Ok(known.then(sample_beatmap))
    }
}

pub struct FakeCalculator;

#[async_trait]
impl DifficultyCalculator for FakeCalculator {
    async fn difficulty(&self, _input: &CalculationInput) -> AppResult<DifficultyAttributes> {
        Ok(sample_attributes())
    }

    async fn performance(&self, _input: &CalculationInput) -> AppResult<PerformanceCalculation> {
        Ok(sample_calculation())
    }
}

/// Holds the sample score only
pub struct FakeScores;

#[async_trait]
impl ScoreRepository for FakeScores {
    async fn find_best(&self, uid: u32, hash: &str) -> AppResult<Option<Score>> {
        Ok((uid == SAMPLE_UID && hash == SAMPLE_HASH).then(sample_score))
    }
}

#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, DifficultyAttributes>>,
}

#[async_trait]
impl AttributeCache for MemoryCache {
    async fn get(&self, key: &str) -> AppResult<Option<DifficultyAttributes>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn put(&self, key: &str, attributes: &DifficultyAttributes) -> AppResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), attributes.clone());
        Ok(())
    }
}

/// Registry and container wired like production, with in-memory collaborators
pub fn test_components() -> (ComponentRegistry, Container) {
    let mut registry = ComponentRegistry::new();
    let mut container = Container::new();

    container
        .register_instance(BEATMAP_PROVIDER, Arc::new(FakeBeatmaps) as Arc<dyn BeatmapProvider>)
        .unwrap();
    container
        .register_instance(
            DIFFICULTY_CALCULATOR,
            Arc::new(FakeCalculator) as Arc<dyn DifficultyCalculator>,
        )
        .unwrap();
    container
        .register_instance(SCORE_REPOSITORY, Arc::new(FakeScores) as Arc<dyn ScoreRepository>)
        .unwrap();
    container
        .register_instance(
            ATTRIBUTE_CACHE,
            Arc::new(MemoryCache::default()) as Arc<dyn AttributeCache>,
        )
        .unwrap();

    services::register(&mut registry, &mut container).unwrap();
    handlers::register(
        &mut registry,
        &mut container,
        &SecurityConfig {
            internal_key: TEST_KEY.to_string(),
        },
    )
    .unwrap();

    (registry, container)
}

pub fn test_router() -> Router {
    let (registry, container) = test_components();
    app::build_router(&registry, &container).unwrap()
}

/// Send a request and decode the JSON response
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        registry::ComponentKind,
        routing::RouterAssembler,
    };
    use axum::http::Method;

    const ATTRIBUTES: &str = "/api/difficulty/attributes";

    #[test]
    fn test_assembled_route_table() {
        let (registry, container) = test_components();
        let assembly = RouterAssembler::new(&registry, &container).assemble().unwrap();

        let routes: Vec<_> = assembly
            .bindings
            .iter()
            .map(|b| (b.method.clone(), b.path.as_str()))
            .collect();
        assert_eq!(
            routes,
            vec![
                (Method::GET, "/health"),
                (Method::GET, "/api/difficulty/attributes"),
                (Method::POST, "/api/difficulty/attributes"),
                (Method::POST, "/api/performance/calculate"),
                (Method::GET, "/api/performance/score"),
            ]
        );

        assert!(assembly.bindings[0].interceptors.is_empty());
        assert_eq!(
            assembly.bindings[1].interceptors,
            vec![
                "authenticate",
                "validate_gamemode",
                "validate_calculation_method",
                "validate_beatmap_id",
                "validate_beatmap_hash",
                "validate_mods",
            ]
        );
        assert_eq!(registry.list_declared(ComponentKind::Service).count(), 3);
        assert_eq!(registry.list_declared(ComponentKind::HandlerGroup).count(), 3);
    }

    #[tokio::test]
    async fn test_health_needs_no_key() {
        let (status, body) = send(test_router(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_valid_gamemode_is_kept() {
        let uri = format!("{ATTRIBUTES}?key={TEST_KEY}&gamemode=droid&calculationmethod=0&beatmapid=75");
        let (status, body) = send(test_router(), get(&uri)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["gamemode"], "droid");
        assert_eq!(body["calculation_method"], 0);
        assert_eq!(body["beatmap"]["id"], 75);
        assert_eq!(body["attributes"]["star_rating"], 2.4);
        assert_eq!(body["attributes"]["aim_difficulty"], 1.1);
        assert!(body["beatmap"].get("osu_file").is_none());
    }

    #[tokio::test]
    async fn test_unknown_gamemode_is_rejected() {
        let uri = format!("{ATTRIBUTES}?key={TEST_KEY}&gamemode=foo&calculationmethod=0&beatmapid=75");
        let (status, body) = send(test_router(), get(&uri)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "Invalid gamemode: foo. Valid modes are: droid, osu." })
        );
    }

    #[tokio::test]
    async fn test_beatmap_reference_is_required() {
        let request = post_json(
            ATTRIBUTES,
            json!({ "key": TEST_KEY, "gamemode": "osu", "calculationmethod": "1" }),
        );
        let (status, body) = send(test_router(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "Either beatmap ID or hash must be provided." })
        );
    }

    #[tokio::test]
    async fn test_negative_beatmap_id_is_rejected() {
        let request = post_json(
            ATTRIBUTES,
            json!({ "key": TEST_KEY, "gamemode": "osu", "calculationmethod": 0, "beatmapid": "-5" }),
        );
        let (status, body) = send(test_router(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Beatmap ID must be a positive integer." }));
    }

    #[tokio::test]
    async fn test_wrong_key_wins_over_other_errors() {
        let request = post_json(
            ATTRIBUTES,
            json!({ "key": "nope", "gamemode": "foo", "beatmapid": "-5" }),
        );
        let (status, body) = send(test_router(), request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Invalid internal key." }));

        let (status, _) = send(test_router(), get(&format!("{ATTRIBUTES}?gamemode=droid"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_mods_text_is_parsed() {
        let request = post_json(
            ATTRIBUTES,
            json!({
                "key": TEST_KEY,
                "gamemode": "droid",
                "calculationmethod": 0,
                "beatmaphash": SAMPLE_HASH.to_uppercase(),
                "mods": r#"[{"acronym":"HD"}]"#,
            }),
        );
        let (status, body) = send(test_router(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mods"], json!([{ "acronym": "HD" }]));
        assert_eq!(body["beatmap"]["hash"], SAMPLE_HASH);
    }

    #[tokio::test]
    async fn test_form_body_is_accepted() {
        let request = Request::post(ATTRIBUTES)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(format!(
                "key={TEST_KEY}&gamemode=osu&calculationmethod=1&beatmapid=75"
            )))
            .unwrap();
        let (status, body) = send(test_router(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["calculation_method"], 1);
    }

    #[tokio::test]
    async fn test_unknown_beatmap_is_not_found() {
        let uri = format!("{ATTRIBUTES}?key={TEST_KEY}&gamemode=droid&calculationmethod=0&beatmapid=76");
        let (status, body) = send(test_router(), get(&uri)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Beatmap not found." }));
    }

    #[tokio::test]
    async fn test_performance_calculation() {
        let request = post_json(
            "/api/performance/calculate",
            json!({
                "key": TEST_KEY,
                "gamemode": "osu",
                "calculationmethod": 0,
                "beatmapid": 75,
                "maxcombo": "300",
                "n300": 140, "n100": 10, "n50": 2, "nmiss": 2,
                "tappenalty": "1.3",
            }),
        );
        let (status, body) = send(test_router(), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["performance"]["total"], 48.7);
        assert_eq!(body["difficulty"]["max_combo"], 314);
    }

    #[tokio::test]
    async fn test_partial_hit_counts_are_rejected() {
        let request = post_json(
            "/api/performance/calculate",
            json!({
                "key": TEST_KEY,
                "gamemode": "osu",
                "calculationmethod": 0,
                "beatmapid": 75,
                "n300": 140,
            }),
        );
        let (status, body) = send(test_router(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "n300, n100, n50, and nmiss must be provided together." })
        );
    }

    #[tokio::test]
    async fn test_max_combo_beyond_u32_is_rejected() {
        let request = post_json(
            "/api/performance/calculate",
            json!({
                "key": TEST_KEY,
                "gamemode": "osu",
                "calculationmethod": 0,
                "beatmapid": 75,
                "maxcombo": 5_000_000_000_u64,
            }),
        );
        let (status, body) = send(test_router(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Max combo must not exceed 4294967295." }));
    }

    #[tokio::test]
    async fn test_tap_penalty_below_one_is_rejected() {
        let request = post_json(
            "/api/performance/calculate",
            json!({
                "key": TEST_KEY,
                "gamemode": "droid",
                "calculationmethod": 0,
                "beatmapid": 75,
                "tappenalty": 0.5,
            }),
        );
        let (status, body) = send(test_router(), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "Tap penalty must be a finite number of at least 1." })
        );
    }

    #[tokio::test]
    async fn test_stored_score_performance() {
        let uri = format!(
            "/api/performance/score?key={TEST_KEY}&gamemode=droid&calculationmethod=1&beatmaphash={SAMPLE_HASH}&uid={SAMPLE_UID}"
        );
        let (status, body) = send(test_router(), get(&uri)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mods"], json!([{ "acronym": "HD" }]));
        assert_eq!(body["calculation_method"], 1);
    }

    #[tokio::test]
    async fn test_score_lookup_errors() {
        let base = format!(
            "/api/performance/score?key={TEST_KEY}&gamemode=droid&calculationmethod=0&beatmaphash={SAMPLE_HASH}"
        );

        let (status, body) = send(test_router(), get(&format!("{base}&uid=1"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Score not found." }));

        let (status, body) = send(test_router(), get(&format!("{base}&uid=abc"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Player ID must be a positive integer." }));

        let (status, body) = send(test_router(), get(&base)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Player ID must be a positive integer." }));
    }

    #[tokio::test]
    async fn test_unreadable_body_without_key_is_unauthorized() {
        let unsupported = Request::post(ATTRIBUTES)
            .header(CONTENT_TYPE, "text/plain")
            .body(Body::from("hello"))
            .unwrap();
        let (status, body) = send(test_router(), unsupported).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Invalid internal key." }));

        let truncated = Request::post(ATTRIBUTES)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(format!(r#"{{"key":"{TEST_KEY}","gamemode":"#)))
            .unwrap();
        let (status, body) = send(test_router(), truncated).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Invalid internal key." }));
    }
}
