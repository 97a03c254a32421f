//! Scoring Engine — weighted keyword coverage of a job description by a resume.
//!
//! Default: `WeightedKeywordScorer` (Tier-1 terms weigh 10, everything else 1).
//! Alternative: `CosineSimilarityScorer` (term-frequency cosine, same list shaping).
//!
//! `AppState` holds an `Arc<dyn AtsScorer>`, picked at startup via `ATS_SCORER`.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::ats::keywords::{classify, KeywordTier};
use crate::ats::tokenizer::{token_set, tokenize, unique_tokens};
use crate::errors::ScanError;

pub const MAX_MATCHED_KEYWORDS: usize = 15;
pub const MAX_MISSING_KEYWORDS: usize = 10;

const HIGH_THRESHOLD: u32 = 80;
const MEDIUM_THRESHOLD: u32 = 50;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Qualitative band derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchLevel {
    Low,
    Medium,
    High,
}

impl MatchLevel {
    pub fn from_score(score: u32) -> Self {
        if score >= HIGH_THRESHOLD {
            MatchLevel::High
        } else if score >= MEDIUM_THRESHOLD {
            MatchLevel::Medium
        } else {
            MatchLevel::Low
        }
    }
}

/// Resume text and job-description text to compare.
#[derive(Debug, Clone)]
pub struct ScoringRequest {
    pub resume_text: String,
    pub job_description: String,
}

impl ScoringRequest {
    /// Rejects blank inputs. Runs before any tokenization.
    pub fn validate(&self) -> Result<(), ScanError> {
        validate_inputs(&self.resume_text, &self.job_description)
    }
}

pub fn validate_resume_text(resume_text: &str) -> Result<(), ScanError> {
    if resume_text.trim().is_empty() {
        return Err(ScanError::Validation(
            "resume text is empty after extraction".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_job_description(job_description: &str) -> Result<(), ScanError> {
    if job_description.trim().is_empty() {
        return Err(ScanError::Validation(
            "job description cannot be empty".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_inputs(resume_text: &str, job_description: &str) -> Result<(), ScanError> {
    validate_resume_text(resume_text)?;
    validate_job_description(job_description)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringResult {
    pub score: u32, // 0 – 100
    pub match_level: MatchLevel,
    pub matched_keywords: Vec<String>, // ≤ 15, first-seen JD order
    pub missing_keywords: Vec<String>, // ≤ 10, Tier-1 only
    pub summary: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// A resume-vs-JD scorer. Implementations are pure and share no mutable state,
/// so a single instance serves every request.
pub trait AtsScorer: Send + Sync {
    /// Diagnostic tag reported alongside every result.
    fn backend(&self) -> &'static str;

    fn score(&self, resume_text: &str, jd_text: &str) -> ScoringResult;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScorerBackend {
    #[default]
    Weighted,
    Cosine,
}

impl FromStr for ScorerBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weighted" => Ok(ScorerBackend::Weighted),
            "cosine" => Ok(ScorerBackend::Cosine),
            other => Err(format!(
                "unknown scorer backend '{other}' (expected 'weighted' or 'cosine')"
            )),
        }
    }
}

pub fn build_scorer(backend: ScorerBackend) -> Arc<dyn AtsScorer> {
    match backend {
        ScorerBackend::Weighted => Arc::new(WeightedKeywordScorer),
        ScorerBackend::Cosine => Arc::new(CosineSimilarityScorer),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WeightedKeywordScorer — default
// ────────────────────────────────────────────────────────────────────────────

/// Weighted keyword coverage.
///
/// Algorithm:
/// 1. R = resume token set, J = unique JD tokens in first-seen order
/// 2. for each t in J: weight = 10 (Tier-1) or 1; total += weight;
///    matched → earned += weight, otherwise Tier-1 misses are recorded
/// 3. score = round(earned / total × 100), 0 when total is 0
pub struct WeightedKeywordScorer;

impl AtsScorer for WeightedKeywordScorer {
    fn backend(&self) -> &'static str {
        "weighted"
    }

    fn score(&self, resume_text: &str, jd_text: &str) -> ScoringResult {
        score_texts(resume_text, jd_text)
    }
}

/// Validating entry point: blank inputs are rejected, everything else is scored.
pub fn score_resume_against_job(
    resume_text: &str,
    job_description: &str,
) -> Result<ScoringResult, ScanError> {
    validate_inputs(resume_text, job_description)?;

    Ok(score_texts(resume_text, job_description))
}

/// The weighted algorithm itself. Total: never fails, any input yields a result.
pub fn score_texts(resume_text: &str, jd_text: &str) -> ScoringResult {
    let coverage = keyword_coverage(resume_text, jd_text);
    let score = rounded_percentage(coverage.earned, coverage.total_possible);
    shape_result(score, coverage)
}

// ────────────────────────────────────────────────────────────────────────────
// CosineSimilarityScorer — term-frequency cosine
// ────────────────────────────────────────────────────────────────────────────

/// Cosine similarity of the two token-frequency vectors, scaled to 0 – 100.
/// Matched / missing lists are shaped exactly like the weighted scorer's.
pub struct CosineSimilarityScorer;

impl AtsScorer for CosineSimilarityScorer {
    fn backend(&self) -> &'static str {
        "cosine"
    }

    fn score(&self, resume_text: &str, jd_text: &str) -> ScoringResult {
        let similarity = cosine_similarity(
            &term_frequencies(resume_text),
            &term_frequencies(jd_text),
        );
        let score = ((similarity * 100.0).round() as u32).min(100);
        shape_result(score, keyword_coverage(resume_text, jd_text))
    }
}

fn term_frequencies(text: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

fn cosine_similarity(a: &HashMap<String, u32>, b: &HashMap<String, u32>) -> f64 {
    let dot: f64 = a
        .iter()
        .filter_map(|(term, &x)| b.get(term).map(|&y| x as f64 * y as f64))
        .sum();
    let norm = |v: &HashMap<String, u32>| {
        v.values()
            .map(|&x| (x as f64) * (x as f64))
            .sum::<f64>()
            .sqrt()
    };
    let denom = norm(a) * norm(b);
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared coverage + shaping
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct Coverage {
    total_possible: u32,
    earned: u32,
    matched: Vec<String>,
    missing: Vec<String>,
}

fn keyword_coverage(resume_text: &str, jd_text: &str) -> Coverage {
    let resume_tokens: HashSet<String> = token_set(resume_text);
    let jd_tokens = unique_tokens(jd_text);

    let mut coverage = Coverage::default();
    for token in jd_tokens {
        let tier = classify(&token);
        let weight = tier.weight();
        coverage.total_possible += weight;

        if resume_tokens.contains(&token) {
            coverage.earned += weight;
            coverage.matched.push(token);
        } else if tier == KeywordTier::Tier1 {
            coverage.missing.push(token);
        }
    }

    tracing::debug!(
        resume_tokens = resume_tokens.len(),
        total_possible = coverage.total_possible,
        earned = coverage.earned,
        "keyword coverage computed"
    );
    coverage
}

/// `round(earned / total × 100)` with halves rounded away from zero, in integer
/// arithmetic so x.5 boundaries are exact. Zero total scores 0.
fn rounded_percentage(earned: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (earned, total) = (earned as u64, total as u64);
    let rounded = (earned * 200 + total) / (total * 2);
    (rounded as u32).min(100)
}

fn shape_result(score: u32, coverage: Coverage) -> ScoringResult {
    let matched_count = coverage.matched.len();
    let mut matched_keywords = coverage.matched;
    matched_keywords.truncate(MAX_MATCHED_KEYWORDS);
    let mut missing_keywords = coverage.missing;
    missing_keywords.truncate(MAX_MISSING_KEYWORDS);

    ScoringResult {
        score,
        match_level: MatchLevel::from_score(score),
        matched_keywords,
        missing_keywords,
        summary: format!("Found {matched_count} matching skills and keywords."),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
