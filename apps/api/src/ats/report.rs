//! Wire shape of a scan: the scoring result plus recommendations and the backend tag.

use serde::Serialize;

use crate::ats::scoring::{MatchLevel, ScoringResult};

const RECOMMENDED_MISSING_TERMS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub score: u32,
    pub match_level: MatchLevel,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub scorer_backend: String, // "weighted" | "cosine"
}

impl ScanReport {
    pub fn new(result: ScoringResult, scorer_backend: &str) -> Self {
        let recommendations = build_recommendations(result.score, &result.missing_keywords);
        ScanReport {
            score: result.score,
            match_level: result.match_level,
            matched_keywords: result.matched_keywords,
            missing_keywords: result.missing_keywords,
            summary: result.summary,
            recommendations,
            scorer_backend: scorer_backend.to_string(),
        }
    }
}

fn build_recommendations(score: u32, missing: &[String]) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !missing.is_empty() {
        let terms: Vec<&str> = missing
            .iter()
            .take(RECOMMENDED_MISSING_TERMS)
            .map(String::as_str)
            .collect();
        recommendations.push(format!(
            "Your resume is missing key terms found in the job description: {}.",
            terms.join(", ")
        ));
    }

    if score < 50 {
        recommendations.push(
            "Your resume has a low match score. Consider tailoring it more specifically to the job description."
                .to_string(),
        );
    } else if score >= 80 {
        recommendations
            .push("Great match! Your resume aligns well with the job description.".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ats::scoring::score_texts;
    use serde_json::Value;

    #[test]
    fn test_report_maps_fields_and_tags_backend() {
        let result = score_texts(
            "Experienced engineer skilled in react and python.",
            "We need someone with react, python, and docker experience.",
        );
        let report = ScanReport::new(result, "weighted");
        let json: Value = serde_json::to_value(&report).unwrap();

        assert_eq!(json["score"], 67);
        assert_eq!(json["match_level"], "Medium");
        assert_eq!(json["matched_keywords"], serde_json::json!(["react", "python"]));
        assert_eq!(json["missing_keywords"], serde_json::json!(["docker"]));
        assert_eq!(json["summary"], "Found 2 matching skills and keywords.");
        assert_eq!(json["scorer_backend"], "weighted");
    }

    #[test]
    fn test_recommendations_list_first_five_missing_terms() {
        let missing: Vec<String> = ["react", "node", "aws", "python", "sql", "docker"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let recs = build_recommendations(60, &missing);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].ends_with("react, node, aws, python, sql."));
        assert!(!recs[0].contains("docker"));
    }

    #[test]
    fn test_recommendations_low_score() {
        let recs = build_recommendations(20, &[]);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("low match score"));
    }

    #[test]
    fn test_recommendations_high_score() {
        let recs = build_recommendations(95, &[]);
        assert_eq!(
            recs,
            vec!["Great match! Your resume aligns well with the job description.".to_string()]
        );
    }

    #[test]
    fn test_recommendations_medium_score_without_gaps_is_empty() {
        assert!(build_recommendations(65, &[]).is_empty());
    }
}
