//! Firecrawl 搜索客户端
//!
//! POST {base_url}/v1/search，带 scrapeOptions 让服务端直接返回 markdown 正文，
//! 省去二次抓取。API Key 从 FIRECRAWL_API_KEY 读取，缺失时在首次调用处报错。

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::search::{SearchClient, SearchHit};

pub struct FirecrawlClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    max_content_chars: usize,
}

impl FirecrawlClient {
    pub fn new(base_url: &str, timeout_secs: u64, max_content_chars: usize) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: std::env::var("FIRECRAWL_API_KEY").ok(),
            max_content_chars,
        }
    }

    /// 正文超出 max_content_chars 时按字符截断（送入模型前的粗剪）
    fn clamp(&self, content: String) -> String {
        if content.chars().count() > self.max_content_chars {
            content.chars().take(self.max_content_chars).collect()
        } else {
            content
        }
    }
}

#[async_trait]
impl SearchClient for FirecrawlClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| "FIRECRAWL_API_KEY not set".to_string())?;

        tracing::info!(query = %query, limit, "firecrawl search");

        let response = self
            .client
            .post(format!("{}/v1/search", self.base_url))
            .bearer_auth(api_key)
            .json(&json!({
                "query": query,
                "limit": limit,
                "scrapeOptions": { "formats": ["markdown"] }
            }))
            .send()
            .await
            .map_err(|e| format!("Search request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("Search error: HTTP {}", response.status()));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse search response: {}", e))?;

        let hits = data["data"]
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|r| {
                        let url = r["url"].as_str()?.to_string();
                        // 优先 markdown 正文，缺失时退回摘要
                        let content = r["markdown"]
                            .as_str()
                            .or_else(|| r["description"].as_str())
                            .unwrap_or("")
                            .to_string();
                        Some(SearchHit {
                            url,
                            title: r["title"].as_str().unwrap_or("").to_string(),
                            content: self.clamp(content),
                        })
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Ok(hits.into_iter().take(limit).collect())
    }
}
