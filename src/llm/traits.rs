//! LLM 客户端抽象
//!
//! 所有后端（OpenAI 兼容 / Mock）实现 LlmClient：complete 发送一组带角色的消息，
//! 返回单条文本回复。错误以 String 形式返回，由调用方决定如何归类。

use async_trait::async_trait;

use crate::message::Message;

/// LLM 客户端 trait：非流式完成
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// 发送消息列表，取回一条文本回复
    async fn complete(&self, messages: &[Message]) -> Result<String, String>;
}
