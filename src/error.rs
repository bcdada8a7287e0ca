//! 错误类型
//!
//! 流水线内部：搜索/模型调用失败即中止当前查询（WorkflowError）；
//! 单个候选的解析失败由降级记录兜底，不会出现在这里。
//! Agent 侧：单轮错误（AgentError）由入口捕获并打印，不终止会话。

use thiserror::Error;

/// 结构化调研流水线的硬失败（整条查询中止，不产生部分结果）
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Search failed: {0}")]
    Search(String),

    #[error("LLM error: {0}")]
    Llm(String),
}

/// 交互 Agent 单轮错误（入口打印 Error: <message> 后继续会话）。
/// 工具失败/超时在循环内转成观察结果喂回模型，不会升级成本错误。
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    Llm(String),
}
