//! 工具调用 Agent 循环
//!
//! 每轮：把历史 + 用户输入发给模型；回复若是 `{"tool": ..., "args": {...}}`
//! 则执行对应工具并把观察结果喂回去，最多 max_rounds 轮；回复是普通文本
//! 即为最终答案。工具执行失败作为观察结果反馈给模型，不中断本轮。

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::time::timeout;

use crate::error::AgentError;
use crate::llm::{extract_json_object, LlmClient};
use crate::message::Message;
use crate::tools::ToolRegistry;

/// 模型发起的一次工具调用
#[derive(Debug, Deserialize)]
struct ToolCall {
    tool: String,
    #[serde(default)]
    args: Value,
}

/// 工具调用 Agent：持有 LLM 与封闭的工具集，run_turn 处理单轮用户输入
pub struct ToolAgent {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    max_rounds: usize,
    tool_timeout_secs: u64,
}

/// 解析模型回复中的工具调用；非 JSON 或缺 tool 字段视为最终答案
fn parse_tool_call(response: &str) -> Option<ToolCall> {
    let json = extract_json_object(response)?;
    let call: ToolCall = serde_json::from_str(json).ok()?;
    if call.tool.trim().is_empty() {
        return None;
    }
    Some(call)
}

impl ToolAgent {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        tools: ToolRegistry,
        max_rounds: usize,
        tool_timeout_secs: u64,
    ) -> Self {
        Self {
            llm,
            tools,
            max_rounds,
            tool_timeout_secs,
        }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// 跑一轮对话：history 为 system + 既往轮次 + 本轮用户消息，返回最终文本答案。
    /// 调用方在成功后才把 user/assistant 写入历史，失败的轮次不留痕。
    pub async fn run_turn(&self, history: &[Message]) -> Result<String, AgentError> {
        let mut messages = history.to_vec();

        for round in 0..self.max_rounds {
            let response = self
                .llm
                .complete(&messages)
                .await
                .map_err(AgentError::Llm)?;

            let Some(call) = parse_tool_call(&response) else {
                return Ok(response);
            };

            tracing::info!(tool = %call.tool, round, "agent tool call");
            let observation = match timeout(
                Duration::from_secs(self.tool_timeout_secs),
                self.tools.execute(&call.tool, call.args),
            )
            .await
            {
                Ok(Ok(output)) => output,
                Ok(Err(e)) => {
                    tracing::warn!(tool = %call.tool, error = %e, "tool failed");
                    format!("Tool {} failed: {}", call.tool, e)
                }
                Err(_) => {
                    tracing::warn!(tool = %call.tool, "tool timed out");
                    format!("Tool {} timed out", call.tool)
                }
            };

            messages.push(Message::assistant(response));
            messages.push(Message::user(format!("Observation: {}", observation)));
        }

        // 轮数耗尽：让模型用已有信息收尾
        messages.push(Message::user(
            "Tool budget exhausted. Answer now with the information you already have, plain text only.",
        ));
        self.llm.complete(&messages).await.map_err(AgentError::Llm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockLlmClient;
    use crate::tools::Tool;
    use async_trait::async_trait;

    struct StaticTool {
        output: &'static str,
    }

    #[async_trait]
    impl Tool for StaticTool {
        fn name(&self) -> &str {
            "lookup"
        }

        fn description(&self) -> &str {
            "Return a fixed string"
        }

        async fn execute(&self, _args: Value) -> Result<String, String> {
            Ok(self.output.to_string())
        }
    }

    fn agent_with(llm: MockLlmClient) -> ToolAgent {
        let mut tools = ToolRegistry::new();
        tools.register(StaticTool { output: "found: 42" });
        ToolAgent::new(Arc::new(llm), tools, 3, 5)
    }

    #[test]
    fn test_parse_tool_call() {
        let call = parse_tool_call(r#"{"tool": "lookup", "args": {"q": "x"}}"#).unwrap();
        assert_eq!(call.tool, "lookup");
        assert_eq!(call.args["q"], "x");
        assert!(parse_tool_call("just an answer").is_none());
        assert!(parse_tool_call(r#"{"tool": ""}"#).is_none());
    }

    #[tokio::test]
    async fn test_plain_reply_is_final_answer() {
        let llm = MockLlmClient::with_responses(["The answer is 7."]);
        let agent = agent_with(llm);
        let out = agent.run_turn(&[Message::user("q")]).await.unwrap();
        assert_eq!(out, "The answer is 7.");
    }

    #[tokio::test]
    async fn test_tool_round_then_answer() {
        let llm = MockLlmClient::with_responses([
            r#"{"tool": "lookup", "args": {}}"#,
            "Based on the lookup, the answer is 42.",
        ]);
        let agent = agent_with(llm);
        let out = agent.run_turn(&[Message::user("q")]).await.unwrap();
        assert!(out.contains("42"));
    }

    #[tokio::test]
    async fn test_unknown_tool_fed_back_as_observation() {
        let llm = MockLlmClient::with_responses([
            r#"{"tool": "missing", "args": {}}"#,
            "I could not use that tool.",
        ]);
        let agent = agent_with(llm);
        let out = agent.run_turn(&[Message::user("q")]).await.unwrap();
        assert_eq!(out, "I could not use that tool.");
    }

    #[tokio::test]
    async fn test_round_budget_forces_final_answer() {
        let llm = MockLlmClient::with_responses([
            r#"{"tool": "lookup", "args": {}}"#,
            r#"{"tool": "lookup", "args": {}}"#,
            r#"{"tool": "lookup", "args": {}}"#,
            "Final answer after budget.",
        ]);
        let agent = agent_with(llm);
        let out = agent.run_turn(&[Message::user("q")]).await.unwrap();
        assert_eq!(out, "Final answer after budget.");
    }
}
