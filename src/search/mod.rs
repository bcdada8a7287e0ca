//! 搜索/抓取层：统一的 SearchClient 抽象与实现（Firecrawl 兼容 / Mock）
//!
//! 一个接口：给定查询串与结果数上限，返回按序的 (url, 正文) 列表。
//! 流水线与 Agent 的 web_search 工具都走这层，不直接碰 HTTP。

pub mod firecrawl;
pub mod mock;

pub use firecrawl::FirecrawlClient;
pub use mock::MockSearchClient;

use async_trait::async_trait;

/// 单条搜索结果：url + 标题 + 抓取到的可读正文
#[derive(Clone, Debug, Default)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    pub content: String,
}

/// 搜索客户端 trait：limit 限定返回条数，空结果是合法输出而非错误
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, String>;
}
