//! LLM 层：客户端抽象与实现（OpenAI 兼容 / Mock），以及模型输出解析辅助

pub mod mock;
pub mod openai;
pub mod traits;

pub use mock::MockLlmClient;
pub use openai::OpenAiClient;
pub use traits::LlmClient;

use std::sync::Arc;

use crate::config::AppConfig;

/// 按配置创建 LLM 客户端：有 OPENAI_API_KEY 走 OpenAI 兼容端点，否则落回 Mock
pub fn create_llm_from_config(cfg: &AppConfig) -> Arc<dyn LlmClient> {
    if std::env::var("OPENAI_API_KEY").is_ok() {
        let base = cfg.llm.base_url.as_deref();
        tracing::info!("Using OpenAI LLM ({})", cfg.llm.model);
        Arc::new(OpenAiClient::new(
            base,
            &cfg.llm.model,
            std::env::var("OPENAI_API_KEY").ok().as_deref(),
        ))
    } else {
        tracing::warn!("OPENAI_API_KEY not set, using Mock LLM");
        Arc::new(MockLlmClient::new())
    }
}

/// 从模型回复中提取最外层 JSON 对象：去掉 ``` 围栏，取首个 `{` 到末个 `}` 的子串。
/// 模型常把 JSON 包在围栏或说明文字里，直接 serde 解析会失败。
pub fn extract_json_object(response: &str) -> Option<&str> {
    let trimmed = response.trim();
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&trimmed[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_json() {
        assert_eq!(extract_json_object(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_extract_fenced_json() {
        let fenced = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json_object(fenced), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_extract_json_with_prose() {
        let resp = "Here is the analysis:\n{\"pricing_model\": \"Free\"}\nHope it helps.";
        assert_eq!(extract_json_object(resp), Some("{\"pricing_model\": \"Free\"}"));
    }

    #[test]
    fn test_extract_none_when_no_braces() {
        assert_eq!(extract_json_object("no json here"), None);
    }
}
