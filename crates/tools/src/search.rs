//! Search tool: canned results keyed on the query text.
//!
//! No network access. Results are deterministic so agent runs that call
//! `search|...` are reproducible.

use async_trait::async_trait;
use reactloop_core::catalog::ParameterDescriptor;
use reactloop_core::error::ToolError;
use reactloop_core::tool::Tool;
use serde::Serialize;

const RESULT_COUNT: usize = 3;

pub struct SearchTool;

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        "search"
    }

    fn description(&self) -> &str {
        "Search the web. Returns a JSON list of results with title, url and snippet."
    }

    fn parameters(&self) -> Vec<ParameterDescriptor> {
        vec![ParameterDescriptor::required("query", "string", "The search query")]
    }

    async fn execute(&self, args: &str) -> Result<String, ToolError> {
        let query = args.trim();
        if query.is_empty() {
            return Err(ToolError::InvalidArguments("empty search query".into()));
        }

        let hits = lookup(query);
        serde_json::to_string(&hits).map_err(|e| ToolError::ExecutionFailed {
            tool_name: self.name().to_string(),
            reason: e.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
struct SearchHit {
    title: String,
    url: String,
    snippet: String,
}

impl SearchHit {
    fn new(title: &str, url: &str, snippet: &str) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }
}

fn lookup(query: &str) -> Vec<SearchHit> {
    let q = query.to_lowercase();

    if q.contains("rust") {
        return vec![
            SearchHit::new(
                "The Rust Programming Language",
                "https://doc.rust-lang.org/book/",
                "Rust is a systems programming language focused on safety, speed, and concurrency.",
            ),
            SearchHit::new(
                "Rust by Example",
                "https://doc.rust-lang.org/rust-by-example/",
                "Runnable examples that illustrate Rust concepts and standard library usage.",
            ),
            SearchHit::new(
                "crates.io",
                "https://crates.io/",
                "The Rust community's package registry.",
            ),
        ];
    }

    if q.contains("weather") || q.contains("forecast") {
        return vec![
            SearchHit::new(
                "National Weather Service",
                "https://weather.gov/",
                "Current conditions and forecasts across the United States.",
            ),
            SearchHit::new(
                "OpenWeatherMap",
                "https://openweathermap.org/",
                "Weather API with current data and forecasts for any location.",
            ),
        ];
    }

    let words = query.split_whitespace().collect::<Vec<_>>().join(" ");
    let encoded = urlencoding::encode(&words);
    (1..=RESULT_COUNT)
        .map(|page| SearchHit {
            title: format!("Result {page} for: {query}"),
            url: format!("https://example.com/search?q={encoded}&p={page}"),
            snippet: format!("Placeholder result for '{query}'."),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(output: &str) -> Vec<serde_json::Value> {
        serde_json::from_str(output).unwrap()
    }

    #[tokio::test]
    async fn rust_queries_get_rust_results() {
        let out = SearchTool.execute("rust ownership").await.unwrap();
        let results = hits(&out);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["url"], "https://doc.rust-lang.org/book/");
    }

    #[tokio::test]
    async fn generic_queries_are_encoded() {
        let out = SearchTool.execute("  capital of  france ").await.unwrap();
        let results = hits(&out);
        assert_eq!(results.len(), RESULT_COUNT);
        assert_eq!(results[0]["title"], "Result 1 for: capital of  france");
        assert_eq!(
            results[2]["url"],
            "https://example.com/search?q=capital%20of%20france&p=3"
        );
    }

    #[tokio::test]
    async fn reserved_characters_stay_inside_the_query() {
        let out = SearchTool.execute("a&b#c?d=1+2").await.unwrap();
        let results = hits(&out);
        assert_eq!(
            results[0]["url"],
            "https://example.com/search?q=a%26b%23c%3Fd%3D1%2B2&p=1"
        );
    }

    #[tokio::test]
    async fn non_ascii_queries_are_percent_encoded() {
        let out = SearchTool.execute("café münchen").await.unwrap();
        let results = hits(&out);
        assert_eq!(
            results[0]["url"],
            "https://example.com/search?q=caf%C3%A9%20m%C3%BCnchen&p=1"
        );
    }

    #[tokio::test]
    async fn output_is_single_line() {
        let out = SearchTool.execute("weather today").await.unwrap();
        assert!(!out.contains('\n'));
        assert_eq!(hits(&out).len(), 2);
    }

    #[tokio::test]
    async fn results_are_deterministic() {
        let a = SearchTool.execute("tokio").await.unwrap();
        let b = SearchTool.execute("tokio").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let err = SearchTool.execute("").await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
