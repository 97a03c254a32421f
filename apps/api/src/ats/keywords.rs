//! Keyword reference sets — the curated Tier-1 skill vocabulary and the stop-word list.
//!
//! Both sets are built once on first use and never mutated afterwards, so every scan
//! shares them without locking.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Weight of a Tier-1 (curated skill/technology) keyword.
pub const TIER_1_WEIGHT: u32 = 10;

/// Weight of any other surviving token.
pub const TIER_2_WEIGHT: u32 = 1;

// `go`, `c#` and `ci/cd` can never come out of the tokenizer (too short / split on
// punctuation). They stay listed; pruning them changes the reference data.
static TIER_1_KEYWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "react", "node", "aws", "python", "sql", "docker", "typescript", "nextjs", "java",
        "figma", "kubernetes", "terraform", "go", "rust", "c++", "c#", ".net", "javascript",
        "angular", "vue", "graphql", "mongodb", "postgresql", "redis", "kafka", "spark",
        "hadoop", "azure", "gcp", "linux", "git", "ci/cd", "jenkins",
    ]
    .into_iter()
    .collect()
});

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "and", "the", "for", "with", "from", "that", "this", "have", "are", "will", "can",
        "you", "your", "work", "team", "year", "years", "experience", "role", "skills", "job",
        "description", "requirements", "qualifications", "looking", "must", "should",
        "ability", "knowledge", "using", "development", "software", "engineering", "engineer",
        "system", "systems", "design", "good", "strong",
        // general filler
        "about", "all", "also", "any", "been", "both", "but", "could", "does", "each", "etc",
        "had", "has", "her", "his", "how", "into", "its", "join", "more", "need", "needs",
        "not", "only", "other", "our", "ours", "out", "over", "own", "per", "she", "some",
        "someone", "such", "than", "them", "their", "then", "there", "these", "they",
        "those", "very", "via", "was", "were", "what", "when", "where", "which", "while",
        "who", "whom", "why", "would", "yours",
    ]
    .into_iter()
    .collect()
});

/// Importance tier of a job-description token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordTier {
    Tier1,
    Tier2,
}

impl KeywordTier {
    pub fn weight(self) -> u32 {
        match self {
            KeywordTier::Tier1 => TIER_1_WEIGHT,
            KeywordTier::Tier2 => TIER_2_WEIGHT,
        }
    }
}

/// Tags a token as Tier-1 when it is in the curated vocabulary, Tier-2 otherwise.
/// Tokens are expected to be already normalised by the tokenizer.
pub fn classify(token: &str) -> KeywordTier {
    if TIER_1_KEYWORDS.contains(token) {
        KeywordTier::Tier1
    } else {
        KeywordTier::Tier2
    }
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}
