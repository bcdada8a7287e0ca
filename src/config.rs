//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `SCOUT__*` 覆盖（双下划线表示嵌套，
//! 如 `SCOUT__LLM__MODEL=gpt-4o-mini`）。API Key 只从环境变量读取
//! （OPENAI_API_KEY / FIRECRAWL_API_KEY），缺失时在首次外部调用处报错。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub workflow: WorkflowSection,
    #[serde(default)]
    pub agent: AgentSection,
}

/// [llm] 段：模型与端点
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    /// 后端：openai（或任意 OpenAI 兼容端点）
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// 自定义 base_url，未设置时走官方端点
    pub base_url: Option<String>,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4.1-mini".to_string()
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: None,
        }
    }
}

/// [search] 段：搜索/抓取服务（Firecrawl 兼容）端点与限制
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    #[serde(default = "default_search_base_url")]
    pub base_url: String,
    #[serde(default = "default_search_timeout_secs")]
    pub timeout_secs: u64,
    /// 单条搜索结果正文的最大字符数，超出截断
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
}

fn default_search_base_url() -> String {
    "https://api.firecrawl.dev".to_string()
}

fn default_search_timeout_secs() -> u64 {
    30
}

fn default_max_content_chars() -> usize {
    8000
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            timeout_secs: default_search_timeout_secs(),
            max_content_chars: default_max_content_chars(),
        }
    }
}

/// [workflow] 段：流水线的规模上限（控制模型上下文与调用成本）
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkflowSection {
    /// 第一步文章搜索的结果数上限
    #[serde(default = "default_max_search_results")]
    pub max_search_results: usize,
    /// 进入深入调研的候选数上限
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    /// 单篇文章允许抽取的名称数上限
    #[serde(default = "default_names_per_article")]
    pub names_per_article: usize,
    /// 送入结构化分析的站点正文窗口（字符数）
    #[serde(default = "default_analysis_content_chars")]
    pub analysis_content_chars: usize,
}

fn default_max_search_results() -> usize {
    5
}

fn default_max_candidates() -> usize {
    4
}

fn default_names_per_article() -> usize {
    5
}

fn default_analysis_content_chars() -> usize {
    2500
}

impl Default for WorkflowSection {
    fn default() -> Self {
        Self {
            max_search_results: default_max_search_results(),
            max_candidates: default_max_candidates(),
            names_per_article: default_names_per_article(),
            analysis_content_chars: default_analysis_content_chars(),
        }
    }
}

/// [agent] 段：交互 Agent 的输入/历史/工具调用限制
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentSection {
    /// 单轮用户输入的最大字符数，超出截断
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
    /// 对话历史保留轮数（短期记忆）
    #[serde(default = "default_max_context_turns")]
    pub max_context_turns: usize,
    /// 单轮允许的工具调用轮数上限
    #[serde(default = "default_max_tool_rounds")]
    pub max_tool_rounds: usize,
    /// 单次工具调用超时（秒）
    #[serde(default = "default_tool_timeout_secs")]
    pub tool_timeout_secs: u64,
}

fn default_max_input_chars() -> usize {
    175_000
}

fn default_max_context_turns() -> usize {
    20
}

fn default_max_tool_rounds() -> usize {
    5
}

fn default_tool_timeout_secs() -> u64 {
    30
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            max_input_chars: default_max_input_chars(),
            max_context_turns: default_max_context_turns(),
            max_tool_rounds: default_max_tool_rounds(),
            tool_timeout_secs: default_tool_timeout_secs(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmSection::default(),
            search: SearchSection::default(),
            workflow: WorkflowSection::default(),
            agent: AgentSection::default(),
        }
    }
}

/// 从 config 目录加载配置，环境变量 SCOUT__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 SCOUT__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("SCOUT")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.workflow.max_search_results, 5);
        assert_eq!(cfg.workflow.max_candidates, 4);
        assert_eq!(cfg.workflow.analysis_content_chars, 2500);
        assert_eq!(cfg.agent.max_input_chars, 175_000);
        assert_eq!(cfg.llm.provider, "openai");
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scout.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            "[workflow]\nmax_candidates = 2\n\n[llm]\nmodel = \"gpt-4o\"\n"
        )
        .unwrap();

        let cfg = load_config(Some(path)).unwrap();
        assert_eq!(cfg.workflow.max_candidates, 2);
        assert_eq!(cfg.llm.model, "gpt-4o");
        // 未覆盖的键保持默认
        assert_eq!(cfg.workflow.max_search_results, 5);
    }
}
