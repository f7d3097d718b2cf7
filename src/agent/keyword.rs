use anyhow::Result;
use async_trait::async_trait;
use lazy_static::lazy_static;

use super::{Decision, Message, Router};
use crate::tools::{names, ToolRegistry};

lazy_static! {
    static ref CHEMISTRY_TERMS: Vec<&'static str> = vec![
        "chemistry", "chemical", "molecule", "molecules", "mole", "moles", "reaction",
        "reactions", "acid", "base", "ph", "element", "elements", "compound", "compounds",
        "periodic", "stoichiometry", "bond", "bonds", "electron", "electrons", "atom",
        "atoms", "titration", "oxidation", "solvent", "solute",
    ];
    static ref PHYSICS_TERMS: Vec<&'static str> = vec![
        "physics", "force", "forces", "newton", "velocity", "acceleration", "momentum",
        "energy", "gravity", "mass", "friction", "wave", "waves", "optics", "circuit",
        "voltage", "current", "magnet", "magnetic", "kinematics", "projectile", "torque",
        "thermodynamics", "quantum",
    ];
    static ref SEARCH_TERMS: Vec<&'static str> = vec![
        "search", "look up", "lookup", "find out", "google", "latest", "news", "recent",
        "today", "who is", "browse", "internet", "web",
    ];
}

/// Deterministic routing policy: score each subject by keyword hits in the
/// query, highest score wins, ties go to the earlier registry entry, zero
/// hits go to the default tool. Phrases match as substrings, single terms
/// match whole words only ("ion" must not fire on "question").
pub struct KeywordRouter;

fn score(query: &str, terms: &[&str]) -> usize {
    let words: Vec<&str> = query
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();
    terms
        .iter()
        .filter(|term| {
            let term: &str = term;
            if term.contains(' ') {
                query.contains(term)
            } else {
                words.contains(&term)
            }
        })
        .count()
}

#[async_trait]
impl Router for KeywordRouter {
    fn backend_name(&self) -> &'static str {
        "keyword"
    }

    async fn select(
        &self,
        query: &str,
        _history: &[Message],
        _registry: &ToolRegistry,
    ) -> Result<Decision> {
        let query = query.to_lowercase();
        let scored = [
            (names::CHEMISTRY, score(&query, &CHEMISTRY_TERMS)),
            (names::PHYSICS, score(&query, &PHYSICS_TERMS)),
            (names::WEB_SEARCH, score(&query, &SEARCH_TERMS)),
        ];

        let (selected, _) = scored.iter().copied().fold(
            (names::GENERAL, 0),
            |(best_name, best_score), (name, score)| {
                // Strictly greater, so ties keep the earlier registry entry
                // and zero hits keep the general helper.
                if score > best_score {
                    (name, score)
                } else {
                    (best_name, best_score)
                }
            },
        );
        tracing::debug!(tool = selected, "keyword routing");
        Ok(Decision::Tool(selected.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::WebSearchTool;
    use std::time::Duration;

    fn registry() -> ToolRegistry {
        ToolRegistry::standard(WebSearchTool::new(3, Duration::from_secs(1)))
    }

    async fn route(query: &str) -> String {
        match KeywordRouter.select(query, &[], &registry()).await.unwrap() {
            Decision::Tool(name) => name,
            Decision::Direct(_) => panic!("keyword router never answers directly"),
        }
    }

    #[tokio::test]
    async fn newton_questions_go_to_physics() {
        assert_eq!(route("What is Newton's second law?").await, names::PHYSICS);
    }

    #[tokio::test]
    async fn reaction_questions_go_to_chemistry() {
        assert_eq!(
            route("How do I balance this chemical reaction?").await,
            names::CHEMISTRY
        );
    }

    #[tokio::test]
    async fn explicit_search_phrasing_goes_to_web_search() {
        assert_eq!(
            route("Can you look up the latest fusion news?").await,
            names::WEB_SEARCH
        );
    }

    #[tokio::test]
    async fn unmatched_and_empty_queries_go_to_the_general_helper() {
        assert_eq!(route("What's for dinner?").await, names::GENERAL);
        assert_eq!(route("").await, names::GENERAL);
    }

    #[test]
    fn single_terms_match_whole_words_only() {
        // "ion" is not in the tables, but guard the idea with a live term:
        // "mass" must not fire on "massachusetts".
        assert_eq!(score("massachusetts", &PHYSICS_TERMS), 0);
        assert_eq!(score("the mass of the ball", &PHYSICS_TERMS), 1);
    }

    #[test]
    fn phrases_match_as_substrings() {
        assert_eq!(score("please look up something", &SEARCH_TERMS), 1);
    }
}
