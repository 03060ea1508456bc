//! Keyword matching between a free-text task and module metadata.

use crate::domains::tools::ModuleDescriptor;

/// Words that carry no signal about which module is wanted.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "at", "be", "can", "do", "for", "from", "how", "i", "in", "into",
    "is", "it", "me", "my", "of", "on", "or", "our", "some", "that", "the", "this", "to", "up",
    "want", "we", "what", "which", "with",
];

/// Lower-cased, de-duplicated keywords of a task, in order of appearance.
///
/// Single characters are dropped: they are left over from contractions and
/// possessives (`job's`) and match almost any text.
pub fn keywords(task: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for word in task
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 1)
        .map(str::to_lowercase)
    {
        if !STOPWORDS.contains(&word.as_str()) && !out.contains(&word) {
            out.push(word);
        }
    }
    out
}

/// How well a module matches a set of keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatch {
    /// Number of distinct keywords found in the module's metadata.
    pub score: usize,
    /// Use cases containing at least one keyword, in catalog order.
    pub matched_use_cases: Vec<&'static str>,
}

/// Match keywords against a module's name, description and use cases.
///
/// Matching is a case-insensitive substring test, so `run` also matches
/// `running`. Returns `None` when no keyword matches.
pub fn score(descriptor: &ModuleDescriptor, keywords: &[String]) -> Option<ModuleMatch> {
    let name = descriptor.name.replace('_', " ");
    let description = descriptor.description.to_lowercase();
    let use_cases: Vec<String> = descriptor
        .use_cases
        .iter()
        .map(|u| u.to_lowercase())
        .collect();

    let score = keywords
        .iter()
        .filter(|k| {
            name.contains(k.as_str())
                || description.contains(k.as_str())
                || use_cases.iter().any(|u| u.contains(k.as_str()))
        })
        .count();
    if score == 0 {
        return None;
    }

    let matched_use_cases = descriptor
        .use_cases
        .iter()
        .zip(&use_cases)
        .filter(|(_, lower)| keywords.iter().any(|k| lower.contains(k.as_str())))
        .map(|(original, _)| *original)
        .collect();

    Some(ModuleMatch {
        score,
        matched_use_cases,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> ModuleDescriptor {
        ModuleDescriptor {
            name: "vector_search",
            description: "Provision vector search endpoints and run similarity queries",
            tool_count: 3,
            use_cases: vec!["build a rag retrieval index", "query nearest neighbors"],
            role_tags: vec![],
        }
    }

    #[test]
    fn test_keywords_drop_stopwords_and_duplicates() {
        assert_eq!(keywords("Run a SQL query, then run it again!"), vec!["run", "sql", "query", "then", "again"]);
        assert!(keywords("  ").is_empty());
    }

    #[test]
    fn test_keywords_ignore_possessives() {
        assert_eq!(keywords("what's the job's schedule"), vec!["job", "schedule"]);
        assert_eq!(keywords("the cluster's policy"), vec!["cluster", "policy"]);
    }

    #[test]
    fn test_score_counts_distinct_keywords() {
        let m = score(&descriptor(), &keywords("RAG index with similarity search")).unwrap();
        assert_eq!(m.score, 4);
        assert_eq!(m.matched_use_cases, vec!["build a rag retrieval index"]);
    }

    #[test]
    fn test_name_matches_without_use_case() {
        let m = score(&descriptor(), &keywords("vector")).unwrap();
        assert_eq!(m.score, 1);
        assert!(m.matched_use_cases.is_empty());
        assert!(score(&descriptor(), &keywords("dashboard")).is_none());
    }
}
