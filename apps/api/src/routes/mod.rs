pub mod health;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::auth::middleware::require_auth;
use crate::errors::route_not_found;
use crate::state::AppState;
use crate::{ats, counselor, matching, profile, resume};

pub fn build_router(state: AppState) -> Router {
    // Everything here requires a verified bearer token.
    let protected = Router::new()
        // Resume API
        .route(
            "/api/resume",
            get(resume::handlers::handle_get_resume).post(resume::handlers::handle_save_resume),
        )
        .route(
            "/api/resume/sections/:section",
            put(resume::handlers::handle_save_section),
        )
        .route(
            "/api/resume/analyze",
            post(resume::handlers::handle_analyze_stored),
        )
        // Jobs & matching
        .route(
            "/api/jobs",
            get(matching::handlers::handle_list_jobs).post(matching::handlers::handle_create_job),
        )
        .route(
            "/api/jobs/matches",
            get(matching::handlers::handle_ranked_matches),
        )
        .route(
            "/api/jobs/:id/match",
            get(matching::handlers::handle_job_match),
        )
        // Profiles
        .route(
            "/api/profile",
            get(profile::handlers::handle_get_profile).put(profile::handlers::handle_put_profile),
        )
        .route(
            "/api/user/profile",
            get(profile::handlers::handle_user_profile),
        )
        .route(
            "/api/user/resumes",
            get(resume::handlers::handle_list_resumes),
        )
        // AI counselor
        .route("/api/ai/counsel", post(counselor::handlers::handle_counsel))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/analyze", post(ats::handlers::handle_analyze))
        .route("/api/download", post(resume::handlers::handle_download))
        .merge(protected)
        .fallback(route_not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::ats::KeywordAtsScorer;
    use crate::auth::testing::StaticVerifier;
    use crate::counselor::prompts::QUIZ_FALLBACK;
    use crate::counselor::testing::StubGenerator;
    use crate::counselor::CounselorService;
    use crate::resume::ResumeContext;
    use crate::session::memory::MemorySessionStore;
    use crate::store::memory::MemoryStore;

    const TOKEN: &str = "token-alice";

    fn test_state(generator: StubGenerator) -> AppState {
        let store = Arc::new(MemoryStore::default());
        AppState {
            store: store.clone(),
            resumes: ResumeContext::new(
                store,
                Arc::new(MemorySessionStore::new()),
                Duration::from_secs(60),
            ),
            verifier: Arc::new(StaticVerifier::default().with_user(TOKEN, "alice")),
            ats: Arc::new(KeywordAtsScorer),
            counselor: CounselorService::new(Arc::new(generator)),
        }
    }

    fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> Response {
        app.clone().oneshot(req).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn sample_resume() -> Value {
        json!({
            "personalInfo": {"fullName": "Alice Doe", "email": "alice@example.com"},
            "skills": ["React", "TypeScript"]
        })
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = build_router(test_state(StubGenerator::Fail));
        let response = send(&app, request(Method::GET, "/health", None, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let app = build_router(test_state(StubGenerator::Fail));

        let response = send(&app, request(Method::GET, "/api/resume", None, None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["error"]["code"], "UNAUTHORIZED");

        let response = send(
            &app,
            request(Method::GET, "/api/profile", Some("forged"), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_analyze_without_token() {
        let app = build_router(test_state(StubGenerator::Fail));
        let body = json!({
            "resume": {"skills": ["React"]},
            "jobDescription": "Looking for a React and AWS engineer"
        });
        let response = send(&app, request(Method::POST, "/api/analyze", None, Some(body))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let report = json_body(response).await;
        assert_eq!(report["score"], 50);
        assert_eq!(report["matchedKeywords"], json!(["React"]));
        assert_eq!(report["missingKeywords"], json!(["AWS"]));
    }

    #[tokio::test]
    async fn test_resume_save_and_stale_version() {
        let app = build_router(test_state(StubGenerator::Fail));

        let response = send(&app, request(Method::GET, "/api/resume", Some(TOKEN), None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let created = send(
            &app,
            request(
                Method::POST,
                "/api/resume",
                Some(TOKEN),
                Some(json!({"resume": sample_resume()})),
            ),
        )
        .await;
        assert_eq!(created.status(), StatusCode::OK);
        assert_eq!(json_body(created).await["version"], 1);

        let updated = send(
            &app,
            request(
                Method::POST,
                "/api/resume",
                Some(TOKEN),
                Some(json!({"resume": sample_resume(), "version": 1})),
            ),
        )
        .await;
        assert_eq!(updated.status(), StatusCode::OK);
        assert_eq!(json_body(updated).await["version"], 2);

        let stale = send(
            &app,
            request(
                Method::POST,
                "/api/resume",
                Some(TOKEN),
                Some(json!({"resume": sample_resume(), "version": 1})),
            ),
        )
        .await;
        assert_eq!(stale.status(), StatusCode::CONFLICT);
        assert_eq!(json_body(stale).await["error"]["code"], "VERSION_CONFLICT");

        let fetched = send(&app, request(Method::GET, "/api/resume", Some(TOKEN), None)).await;
        let fetched = json_body(fetched).await;
        assert_eq!(fetched["version"], 2);
        assert_eq!(fetched["resume"]["personalInfo"]["fullName"], "Alice Doe");
    }

    #[tokio::test]
    async fn test_analyze_tolerates_null_fields() {
        let app = build_router(test_state(StubGenerator::Fail));
        let body = json!({
            "resume": {
                "personalInfo": {"fullName": "Ada", "summary": null},
                "skills": ["React", "AWS", null],
                "template": null
            },
            "jobDescription": "Looking for a React and AWS engineer"
        });
        let response = send(&app, request(Method::POST, "/api/analyze", None, Some(body))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let report = json_body(response).await;
        assert_eq!(report["score"], 100);
        assert_eq!(report["matchedKeywords"], json!(["React", "AWS"]));
    }

    #[tokio::test]
    async fn test_malformed_save_rejected_and_document_kept() {
        let app = build_router(test_state(StubGenerator::Fail));
        send(
            &app,
            request(
                Method::POST,
                "/api/resume",
                Some(TOKEN),
                Some(json!({"resume": sample_resume()})),
            ),
        )
        .await;

        for bad in [
            json!({"skills": "React"}),
            json!({"workExperience": {"company": "Acme"}}),
        ] {
            let response = send(
                &app,
                request(
                    Method::POST,
                    "/api/resume",
                    Some(TOKEN),
                    Some(json!({"resume": bad, "version": 1})),
                ),
            )
            .await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
        }

        let fetched = send(&app, request(Method::GET, "/api/resume", Some(TOKEN), None)).await;
        let fetched = json_body(fetched).await;
        assert_eq!(fetched["version"], 1);
        assert_eq!(fetched["resume"]["skills"], json!(["React", "TypeScript"]));
    }

    #[tokio::test]
    async fn test_section_save_recovers_from_stale_version() {
        let app = build_router(test_state(StubGenerator::Fail));
        send(
            &app,
            request(
                Method::POST,
                "/api/resume",
                Some(TOKEN),
                Some(json!({"resume": sample_resume()})),
            ),
        )
        .await;
        send(
            &app,
            request(
                Method::POST,
                "/api/resume",
                Some(TOKEN),
                Some(json!({"resume": sample_resume(), "version": 1})),
            ),
        )
        .await;

        // Client still thinks it is at version 1.
        let response = send(
            &app,
            request(
                Method::PUT,
                "/api/resume/sections/skills",
                Some(TOKEN),
                Some(json!({"data": ["Rust", "Go"], "version": 1})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let stored = json_body(response).await;
        assert_eq!(stored["version"], 3);
        assert_eq!(stored["resume"]["skills"], json!(["Rust", "Go"]));
        assert_eq!(stored["resume"]["personalInfo"]["fullName"], "Alice Doe");
    }

    #[tokio::test]
    async fn test_unknown_section_rejected() {
        let app = build_router(test_state(StubGenerator::Fail));
        let response = send(
            &app,
            request(
                Method::PUT,
                "/api/resume/sections/hobbies",
                Some(TOKEN),
                Some(json!({"data": []})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_counsel_falls_back_on_model_failure() {
        let app = build_router(test_state(StubGenerator::Fail));
        let response = send(
            &app,
            request(
                Method::POST,
                "/api/ai/counsel",
                Some(TOKEN),
                Some(json!({"mode": "quiz", "context": {}})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let reply = json_body(response).await;
        assert_eq!(reply["text"], QUIZ_FALLBACK);
        assert_eq!(reply["source"], "fallback");
    }

    #[tokio::test]
    async fn test_counsel_rejects_unknown_mode() {
        let app = build_router(test_state(StubGenerator::Reply("hi".to_string())));
        let response = send(
            &app,
            request(
                Method::POST,
                "/api/ai/counsel",
                Some(TOKEN),
                Some(json!({"mode": "horoscope"})),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_job_match_flow() {
        let app = build_router(test_state(StubGenerator::Fail));
        send(
            &app,
            request(
                Method::PUT,
                "/api/profile",
                Some(TOKEN),
                Some(json!({"skills": ["react", "node.js"], "role": "seeker"})),
            ),
        )
        .await;

        let created = send(
            &app,
            request(
                Method::POST,
                "/api/jobs",
                Some(TOKEN),
                Some(json!({
                    "title": "Full-stack Engineer",
                    "skillsRequired": [{"name": "React"}, {"name": "Node.js"}, {"name": "AWS"}],
                    "experienceRange": {"label": "2-4 years"},
                    "workMode": "Remote"
                })),
            ),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let job_id = json_body(created).await["id"].as_str().unwrap().to_string();

        let matched = send(
            &app,
            request(
                Method::GET,
                &format!("/api/jobs/{job_id}/match"),
                Some(TOKEN),
                None,
            ),
        )
        .await;
        assert_eq!(matched.status(), StatusCode::OK);
        let result = json_body(matched).await;
        assert_eq!(result["score"], 70);
        assert_eq!(
            result["explanation"],
            "Matched 2 of 3 required skills. Work mode: Remote."
        );

        let ranked = send(
            &app,
            request(Method::GET, "/api/jobs/matches", Some(TOKEN), None),
        )
        .await;
        let ranked = json_body(ranked).await;
        assert_eq!(ranked.as_array().unwrap().len(), 1);
        assert_eq!(ranked[0]["jobId"], job_id.as_str());
    }

    #[tokio::test]
    async fn test_missing_job_is_404() {
        let app = build_router(test_state(StubGenerator::Fail));
        let response = send(
            &app,
            request(
                Method::GET,
                "/api/jobs/00000000-0000-0000-0000-000000000000/match",
                Some(TOKEN),
                None,
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_download_text_and_pdf() {
        let app = build_router(test_state(StubGenerator::Fail));
        let text = send(
            &app,
            request(
                Method::POST,
                "/api/download",
                None,
                Some(json!({"resume": sample_resume(), "format": "text"})),
            ),
        )
        .await;
        assert_eq!(text.status(), StatusCode::OK);
        assert!(text
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("attachment"));

        let pdf = send(
            &app,
            request(
                Method::POST,
                "/api/download",
                None,
                Some(json!({"resume": sample_resume(), "format": "pdf"})),
            ),
        )
        .await;
        assert_eq!(pdf.status(), StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let app = build_router(test_state(StubGenerator::Fail));
        let response = send(&app, request(Method::GET, "/api/nope", None, None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
    }
}
