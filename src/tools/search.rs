//! web_search 工具：把 SearchClient 暴露给 Agent
//!
//! args: {"query": "...", "limit": 3}；结果拼成「URL + 正文」的分节文本，
//! 供模型直接阅读。空结果返回提示文本而非错误。

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::search::SearchClient;
use crate::tools::Tool;

/// web_search 工具：limit 上限由构造时给定，调用可以再往下调
pub struct WebSearchTool {
    search: Arc<dyn SearchClient>,
    max_results: usize,
}

impl WebSearchTool {
    pub fn new(search: Arc<dyn SearchClient>, max_results: usize) -> Self {
        Self { search, max_results }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web and return scraped page content for each result. Args: {\"query\": \"...\", \"limit\": 3 (optional)}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": { "type": "string" },
                "limit": { "type": "integer" }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .trim();
        if query.is_empty() {
            return Err("Missing query".to_string());
        }

        let limit = args
            .get("limit")
            .and_then(|v| v.as_u64())
            .map(|n| n as usize)
            .unwrap_or(self.max_results)
            .min(self.max_results);

        tracing::info!(query = %query, limit, "web_search tool");
        let hits = self.search.search(query, limit).await?;

        if hits.is_empty() {
            return Ok(format!("No results for: {}", query));
        }

        let sections: Vec<String> = hits
            .iter()
            .map(|h| format!("URL: {}\nTitle: {}\n{}", h.url, h.title, h.content))
            .collect();
        Ok(sections.join("\n---\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{MockSearchClient, SearchHit};

    #[tokio::test]
    async fn test_formats_hits() {
        let search = MockSearchClient::new();
        search.push_hits(vec![SearchHit {
            url: "https://example.com".to_string(),
            title: "Example".to_string(),
            content: "Body text".to_string(),
        }]);
        let tool = WebSearchTool::new(Arc::new(search), 5);

        let out = tool
            .execute(serde_json::json!({"query": "example"}))
            .await
            .unwrap();
        assert!(out.contains("URL: https://example.com"));
        assert!(out.contains("Body text"));
    }

    #[tokio::test]
    async fn test_missing_query_errors() {
        let tool = WebSearchTool::new(Arc::new(MockSearchClient::new()), 5);
        assert!(tool.execute(serde_json::json!({})).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_results_are_not_an_error() {
        let tool = WebSearchTool::new(Arc::new(MockSearchClient::new()), 5);
        let out = tool
            .execute(serde_json::json!({"query": "nothing"}))
            .await
            .unwrap();
        assert!(out.contains("No results"));
    }
}
