//! Mock 搜索客户端（用于测试，无需 API）
//!
//! 按脚本顺序返回预置结果，每次 search 消费一条；脚本耗尽时返回空结果。

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::search::{SearchClient, SearchHit};

/// Mock 客户端：出队预置的 Result，空脚本时返回空列表
#[derive(Debug, Default)]
pub struct MockSearchClient {
    responses: Mutex<VecDeque<Result<Vec<SearchHit>, String>>>,
}

impl MockSearchClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置一次成功的搜索结果
    pub fn push_hits(&self, hits: Vec<SearchHit>) {
        self.responses.lock().unwrap().push_back(Ok(hits));
    }

    /// 预置一次失败
    pub fn push_error(&self, message: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Err(message.into()));
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, String> {
        tracing::debug!(query = %query, limit, "mock search");
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(hits)) => Ok(hits.into_iter().take(limit).collect()),
            Some(Err(e)) => Err(e),
            None => Ok(Vec::new()),
        }
    }
}
