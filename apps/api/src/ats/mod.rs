// ATS scanner: resume-to-job-description keyword matching.
// Pipeline: extract -> tokenize -> classify -> score -> report.
// Everything below `handlers` is pure and synchronous except extraction.

pub mod extract;
pub mod handlers;
pub mod keywords;
pub mod report;
pub mod scoring;
pub mod tokenizer;

pub use scoring::{score_resume_against_job, MatchLevel, ScoringResult};
