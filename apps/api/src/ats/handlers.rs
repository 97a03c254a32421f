//! Axum route handlers for the ATS scan API.

use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{info, warn};

use crate::ats::report::ScanReport;
use crate::ats::scoring::{validate_job_description, ScoringRequest};
use crate::errors::{AppError, ScanError};
use crate::state::AppState;

const REQUIRED_FIELDS_MESSAGE: &str = "Resume and Job Description are required.";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// Pre-extracted text variant of a scan.
#[derive(Debug, Deserialize)]
pub struct ScoreTextRequest {
    pub resume_text: Option<String>,
    pub job_description: Option<String>,
}

struct UploadedResume {
    bytes: Bytes,
    content_type: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/scan
///
/// Multipart upload: `resume` (file) + `jobDescription` (text).
/// Extracts the resume text, then scores it against the job description.
pub async fn handle_scan(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScanReport>, AppError> {
    let mut resume: Option<UploadedResume> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(multipart_error)?;
                resume = Some(UploadedResume {
                    bytes,
                    content_type,
                });
            }
            Some("jobDescription") | Some("job_description") => {
                job_description = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let (Some(resume), Some(job_description)) = (resume, job_description) else {
        warn!("Scan rejected: missing resume or job description");
        return Err(ScanError::InputMissing(REQUIRED_FIELDS_MESSAGE.to_string()).into());
    };

    // Reject a blank JD before paying for extraction.
    validate_job_description(&job_description)?;

    let resume_text = state
        .extractor
        .extract_text(resume.bytes, resume.content_type.as_deref())
        .await?;

    let report = run_scan(
        &state,
        ScoringRequest {
            resume_text,
            job_description,
        },
    )?;
    Ok(Json(report))
}

/// POST /api/v1/ats/score
///
/// JSON body with already-extracted resume text.
pub async fn handle_score(
    State(state): State<AppState>,
    payload: Result<Json<ScoreTextRequest>, JsonRejection>,
) -> Result<Json<ScanReport>, AppError> {
    let Json(request) = payload.map_err(json_error)?;

    let (Some(resume_text), Some(job_description)) =
        (request.resume_text, request.job_description)
    else {
        return Err(ScanError::InputMissing(REQUIRED_FIELDS_MESSAGE.to_string()).into());
    };

    let report = run_scan(
        &state,
        ScoringRequest {
            resume_text,
            job_description,
        },
    )?;
    Ok(Json(report))
}

fn run_scan(state: &AppState, request: ScoringRequest) -> Result<ScanReport, ScanError> {
    if let Err(e) = request.validate() {
        warn!("Scan rejected: {e}");
        return Err(e);
    }

    let result = state
        .scorer
        .score(&request.resume_text, &request.job_description);

    info!(
        score = result.score,
        match_level = ?result.match_level,
        matched = result.matched_keywords.len(),
        missing = result.missing_keywords.len(),
        backend = state.scorer.backend(),
        "ATS scan complete"
    );

    Ok(ScanReport::new(result, state.scorer.backend()))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::BadRequest(e.body_text())
    }
}

fn json_error(rejection: JsonRejection) -> AppError {
    warn!("Score rejected: {}", rejection.body_text());
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(rejection.body_text())
    } else {
        AppError::BadRequest(rejection.body_text())
    }
}
