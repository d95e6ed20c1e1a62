//! Keyword-overlap scoring.
//!
//! This is the fallback relevance signal when no embeddings are
//! available: count how often each whitespace-separated query token
//! occurs in the document, and heavily reward documents containing the
//! entire query verbatim.

/// Flat bonus for a document containing the whole query as a substring.
/// Large enough that an exact-phrase match always outranks any
/// realistic token-overlap score.
const EXACT_PHRASE_BONUS: u32 = 100;

/// Score a document against a query by keyword overlap.
///
/// Both sides are lower-cased. The score is the sum over query tokens
/// of their substring-occurrence counts in the document, plus
/// [`EXACT_PHRASE_BONUS`] when the full query appears verbatim.
/// A score of 0 means the document is not a candidate.
pub fn keyword_score(query: &str, document: &str) -> u32 {
    let query_lower = query.to_lowercase();
    let doc_lower = document.to_lowercase();

    let mut score: u32 = query_lower
        .split_whitespace()
        .map(|kw| doc_lower.matches(kw).count() as u32)
        .sum();

    if !query_lower.is_empty() && doc_lower.contains(&query_lower) {
        score += EXACT_PHRASE_BONUS;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_counts_token_occurrences() {
        let score = keyword_score("chat services", "Yardstick offers chat services and chat bots");
        // "chat" twice, "services" once, and the phrase "chat services"
        // occurs verbatim, so +100.
        assert_eq!(score, 103);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            keyword_score("PRICING", "Contact us for pricing"),
            keyword_score("pricing", "Contact us for pricing"),
        );
    }

    #[test]
    fn test_exact_phrase_outranks_scattered_tokens() {
        let query = "ai chat services";
        let phrase_doc = "Yardstick provides ai chat services to enterprises";
        let scattered = "Our ai team builds chat tools and other services, services, services";

        assert!(keyword_score(query, phrase_doc) > keyword_score(query, scattered));
    }

    #[test]
    fn test_no_match_is_zero() {
        assert_eq!(keyword_score("quantum widgets", "Contact us for pricing"), 0);
    }

    #[test]
    fn test_empty_query_is_zero() {
        assert_eq!(keyword_score("", "Contact us for pricing"), 0);
        assert_eq!(keyword_score("   ", "Contact us for pricing"), 0);
    }
}
