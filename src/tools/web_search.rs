use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::{names, SubjectTool};

const ENDPOINT: &str = "https://api.duckduckgo.com/";

/// Web lookup backed by the DuckDuckGo Instant Answer API. Returns at most
/// `max_results` hits; every failure of the lookup is rendered as text so
/// the tool itself never errors.
pub struct WebSearchTool {
    client: reqwest::Client,
    endpoint: String,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Heading", default)]
    heading: String,
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "AbstractURL", default)]
    abstract_url: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Deserialize)]
struct RelatedTopic {
    #[serde(rename = "Text", default)]
    text: String,
    #[serde(rename = "FirstURL", default)]
    first_url: String,
}

#[derive(Debug, PartialEq)]
struct SearchHit {
    title: String,
    url: String,
}

impl WebSearchTool {
    pub fn new(max_results: usize, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: ENDPOINT.to_string(),
            max_results,
        }
    }

    #[cfg(test)]
    fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    async fn lookup(&self, query: &str) -> Result<Vec<SearchHit>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_redirect", "1"),
                ("no_html", "1"),
            ])
            .send()
            .await
            .context("search request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("search service answered {}", response.status());
        }

        let body: SearchResponse = response
            .json()
            .await
            .context("failed to parse search response")?;

        Ok(collect_hits(body, self.max_results))
    }
}

fn collect_hits(body: SearchResponse, max_results: usize) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    if !body.abstract_text.is_empty() && !body.abstract_url.is_empty() {
        let title = if body.heading.is_empty() {
            body.abstract_text.clone()
        } else {
            body.heading.clone()
        };
        hits.push(SearchHit {
            title,
            url: body.abstract_url.clone(),
        });
    }
    for topic in body.related_topics {
        if hits.len() >= max_results {
            break;
        }
        if !topic.text.is_empty() && !topic.first_url.is_empty() {
            hits.push(SearchHit {
                title: topic.text,
                url: topic.first_url,
            });
        }
    }
    hits.truncate(max_results);
    hits
}

#[async_trait]
impl SubjectTool for WebSearchTool {
    fn name(&self) -> &'static str {
        names::WEB_SEARCH
    }

    fn description(&self) -> &'static str {
        "Search the web for additional information."
    }

    async fn invoke(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return "What would you like me to search for?".to_string();
        }
        match self.lookup(query).await {
            Ok(hits) if hits.is_empty() => format!(
                "Searching the web for: {query}. Nothing came back; try rephrasing the question."
            ),
            Ok(hits) => {
                let mut reply = format!("Searching the web for: {query}. Here's what I found:");
                for hit in hits {
                    reply.push_str(&format!("\n- {} ({})", hit.title, hit.url));
                }
                reply
            }
            Err(err) => {
                tracing::warn!("web search failed: {err:#}");
                format!("Web search for \"{query}\" failed: {err:#}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(payload: &str) -> SearchResponse {
        serde_json::from_str(payload).unwrap()
    }

    #[test]
    fn hits_are_capped_and_require_both_title_and_url() {
        let body = parsed(
            r#"{
                "Heading": "Newton's laws of motion",
                "AbstractText": "Three laws describing the motion of bodies.",
                "AbstractURL": "https://en.wikipedia.org/wiki/Newton's_laws_of_motion",
                "RelatedTopics": [
                    {"Text": "Classical mechanics", "FirstURL": "https://example.org/a"},
                    {"Text": "Missing URL", "FirstURL": ""},
                    {"Text": "Inertia", "FirstURL": "https://example.org/b"},
                    {"Text": "Momentum", "FirstURL": "https://example.org/c"}
                ]
            }"#,
        );
        let hits = collect_hits(body, 3);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].title, "Newton's laws of motion");
        assert_eq!(hits[1].title, "Classical mechanics");
        assert_eq!(hits[2].title, "Inertia");
    }

    #[test]
    fn empty_payload_yields_no_hits() {
        let body = parsed("{}");
        assert!(collect_hits(body, 3).is_empty());
    }

    #[tokio::test]
    async fn empty_query_gets_a_clarification_without_touching_the_network() {
        let tool = WebSearchTool::new(3, Duration::from_millis(100))
            .with_endpoint("http://127.0.0.1:9/unreachable");
        let reply = tool.invoke("   ").await;
        assert_eq!(reply, "What would you like me to search for?");
    }

    #[tokio::test]
    async fn lookup_failure_is_reported_as_text() {
        // Port 9 (discard) is closed on any sane host, so the request fails
        // fast with a connection error.
        let tool = WebSearchTool::new(3, Duration::from_millis(500))
            .with_endpoint("http://127.0.0.1:9/unreachable");
        let reply = tool.invoke("newton").await;
        assert!(reply.contains("failed"), "unexpected reply: {reply}");
        assert!(reply.contains("newton"));
    }
}
