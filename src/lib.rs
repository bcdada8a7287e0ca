//! Scout - Rust 产品调研助手
//!
//! 模块划分：
//! - **agent**: 工具调用 Agent 循环（scout-agent 入口使用）
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **error**: 错误类型（WorkflowError / AgentError）
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / Mock）
//! - **message**: 对话消息与短期记忆
//! - **prompts**: 提示词构造
//! - **report**: 调研结果的控制台渲染
//! - **search**: 搜索/抓取客户端（Firecrawl 兼容 / Mock）
//! - **tools**: 工具箱（web_search、scrape）与注册表
//! - **workflow**: 结构化调研流水线与数据模型

pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod message;
pub mod prompts;
pub mod report;
pub mod search;
pub mod tools;
pub mod workflow;
