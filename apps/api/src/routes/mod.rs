pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ats::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // ATS scan API
        .route("/api/v1/ats/scan", post(handlers::handle_scan))
        .route("/api/v1/ats/score", post(handlers::handle_score))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use bytes::Bytes;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::ats::extract::{single_page_pdf, TextExtractor};
    use crate::config::Config;
    use crate::errors::ScanError;

    const BOUNDARY: &str = "ats-test-boundary";

    struct FixedExtractor(Result<&'static str, &'static str>);

    #[async_trait]
    impl TextExtractor for FixedExtractor {
        async fn extract_text(
            &self,
            _bytes: Bytes,
            _content_type: Option<&str>,
        ) -> Result<String, ScanError> {
            self.0
                .map(str::to_string)
                .map_err(|e| ScanError::Extraction(e.to_string()))
        }
    }

    fn app() -> Router {
        build_router(AppState::new(Config::default()))
    }

    fn app_with_extractor(extractor: FixedExtractor) -> Router {
        build_router(AppState::new(Config::default()).with_extractor(Arc::new(extractor)))
    }

    fn multipart_body(parts: &[(&str, &str)]) -> String {
        let mut body = String::new();
        for (name, value) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            if *name == "resume" {
                body.push_str(
                    "Content-Disposition: form-data; name=\"resume\"; filename=\"cv.txt\"\r\n\
                     Content-Type: text/plain\r\n\r\n",
                );
            } else {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                ));
            }
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn scan_request(parts: &[(&str, &str)]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/ats/scan")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    fn pdf_scan_request(pdf: &[u8], job_description: &str) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"resume\"; filename=\"cv.pdf\"\r\n\
                 Content-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(pdf);
        body.extend_from_slice(
            format!(
                "\r\n--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"jobDescription\"\r\n\r\n\
                 {job_description}\r\n--{BOUNDARY}--\r\n"
            )
            .as_bytes(),
        );

        Request::builder()
            .method("POST")
            .uri("/api/v1/ats/scan")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn score_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/ats/score")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "ats-api");
    }

    #[tokio::test]
    async fn test_scan_plain_text_resume() {
        let response = app()
            .oneshot(scan_request(&[
                ("resume", "Experienced engineer skilled in react and python."),
                (
                    "jobDescription",
                    "We need someone with react, python, and docker experience.",
                ),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["score"], 67);
        assert_eq!(body["match_level"], "Medium");
        assert_eq!(body["missing_keywords"], json!(["docker"]));
        assert_eq!(body["scorer_backend"], "weighted");
    }

    #[tokio::test]
    async fn test_scan_pdf_resume() {
        let pdf = single_page_pdf("Experienced engineer skilled in react and python.");
        let response = app()
            .oneshot(pdf_scan_request(
                &pdf,
                "We need someone with react, python, and docker experience.",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["score"], 67);
        assert_eq!(body["matched_keywords"], json!(["react", "python"]));
        assert_eq!(body["missing_keywords"], json!(["docker"]));
    }

    #[tokio::test]
    async fn test_scan_accepts_snake_case_field() {
        let response = app()
            .oneshot(scan_request(&[
                ("resume", "rust kafka"),
                ("job_description", "rust kafka"),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["score"], 100);
    }

    #[tokio::test]
    async fn test_scan_missing_job_description_is_400() {
        let response = app()
            .oneshot(scan_request(&[("resume", "rust kafka")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "INPUT_MISSING");
    }

    #[tokio::test]
    async fn test_scan_blank_job_description_is_400() {
        let response = app()
            .oneshot(scan_request(&[("resume", "rust kafka"), ("jobDescription", "   ")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_scan_extraction_failure_is_400() {
        let response = app_with_extractor(FixedExtractor(Err("corrupt xref table")))
            .oneshot(scan_request(&[("resume", "x"), ("jobDescription", "rust")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "EXTRACTION_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Could not extract text from the document"
        );
    }

    #[tokio::test]
    async fn test_scan_blank_extracted_text_is_validation_error() {
        let response = app_with_extractor(FixedExtractor(Ok(" \n\n ")))
            .oneshot(scan_request(&[("resume", "x"), ("jobDescription", "rust")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_scan_over_body_limit_is_413() {
        let config = Config {
            max_upload_bytes: 256,
            ..Config::default()
        };
        let big = "rust ".repeat(100);
        let response = build_router(AppState::new(config))
            .oneshot(scan_request(&[("resume", &big), ("jobDescription", "rust")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_score_json_endpoint() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/ats/score")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "resume_text": "python",
                    "job_description": "python observability tracing dashboards"
                })
                .to_string(),
            ))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["score"], 77);
        assert_eq!(body["missing_keywords"], json!([]));
    }

    #[tokio::test]
    async fn test_score_json_missing_field_is_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/ats/score")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({ "resume_text": "python" }).to_string()))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "INPUT_MISSING");
    }

    #[tokio::test]
    async fn test_score_malformed_json_uses_error_envelope() {
        let response = app().oneshot(score_request("not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert!(body["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_score_wrong_field_type_is_400() {
        let response = app()
            .oneshot(score_request(r#"{"resume_text": 5, "job_description": "rust"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "BAD_REQUEST");
    }
}
