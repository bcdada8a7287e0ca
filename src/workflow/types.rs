//! 工作流类型定义
//!
//! 单次查询的中间状态（WorkflowState）、结构化分析记录（CompanyAnalysis）
//! 与最终结果（ResearchResult）。记录一经构造不再修改；解析失败时用降级
//! 记录兜底，description 固定为失败哨兵，与真实描述可区分。

use serde::{Deserialize, Serialize};

use crate::llm::extract_json_object;
use crate::search::SearchHit;

/// 结构化分析失败时 description 的哨兵值
pub const ANALYSIS_FAILED: &str = "Analysis failed";

/// 站点未知时 website 的占位值
pub const UNKNOWN_WEBSITE: &str = "Unknown";

/// 定价模式的固定词表（模型自由文本一律归一到这里，解析不了就是 Unknown）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PricingModel {
    Free,
    Freemium,
    Paid,
    Enterprise,
    Subscription,
    #[default]
    Unknown,
}

impl PricingModel {
    /// 从模型输出的标签解析，不区分大小写
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "free" => Self::Free,
            "freemium" => Self::Freemium,
            "paid" => Self::Paid,
            "enterprise" => Self::Enterprise,
            "subscription" => Self::Subscription,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for PricingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Free => "Free",
            Self::Freemium => "Freemium",
            Self::Paid => "Paid",
            Self::Enterprise => "Enterprise",
            Self::Subscription => "Subscription",
            Self::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// 单个候选的结构化分析记录（构造后不可变）
#[derive(Debug, Clone, Serialize)]
pub struct CompanyAnalysis {
    pub name: String,
    pub website: String,
    pub pricing_model: PricingModel,
    /// true 开源 / false 闭源 / None 不明
    pub is_open_source: Option<bool>,
    pub tech_stack: Vec<String>,
    pub description: String,
    pub api_available: Option<bool>,
    pub language_support: Vec<String>,
    pub integration_capabilities: Vec<String>,
}

/// 模型 JSON 的接收结构：所有字段可缺省，缺省走默认值
#[derive(Debug, Default, Deserialize)]
struct RawAnalysis {
    #[serde(default)]
    pricing_model: Option<String>,
    #[serde(default)]
    is_open_source: Option<bool>,
    #[serde(default)]
    tech_stack: Vec<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    api_available: Option<bool>,
    #[serde(default)]
    language_support: Vec<String>,
    #[serde(default)]
    integration_capabilities: Vec<String>,
}

impl CompanyAnalysis {
    /// 降级记录：只有 name/website，其余字段默认，description 为失败哨兵。
    /// 候选仍被记录，消费者能看到「找到了但没分析成」。
    pub fn degraded(name: &str, website: &str) -> Self {
        Self {
            name: name.to_string(),
            website: website.to_string(),
            pricing_model: PricingModel::Unknown,
            is_open_source: None,
            tech_stack: Vec::new(),
            description: ANALYSIS_FAILED.to_string(),
            api_available: None,
            language_support: Vec::new(),
            integration_capabilities: Vec::new(),
        }
    }

    /// 从模型回复解析；任一环节失败即返回降级记录，绝不让单个候选拖垮整批
    pub fn from_model_response(name: &str, website: &str, response: &str) -> Self {
        let Some(json) = extract_json_object(response) else {
            tracing::warn!(name = %name, "analysis response has no JSON object, degrading");
            return Self::degraded(name, website);
        };

        let raw: RawAnalysis = match serde_json::from_str(json) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "analysis JSON parse failed, degrading");
                return Self::degraded(name, website);
            }
        };

        Self {
            name: name.to_string(),
            website: website.to_string(),
            pricing_model: raw
                .pricing_model
                .as_deref()
                .map(PricingModel::from_label)
                .unwrap_or_default(),
            is_open_source: raw.is_open_source,
            tech_stack: raw.tech_stack,
            // description 缺失视同分析失败，保证哨兵语义成立
            description: raw
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| ANALYSIS_FAILED.to_string()),
            api_available: raw.api_available,
            language_support: raw.language_support,
            integration_capabilities: raw.integration_capabilities,
        }
    }

    /// 是否为降级记录
    pub fn is_degraded(&self) -> bool {
        self.description == ANALYSIS_FAILED
    }
}

/// 单次查询的流水线状态：各步骤按序填充对应字段，查询结束即丢弃
#[derive(Debug, Default)]
pub struct WorkflowState {
    pub query: String,
    /// 第一步的原始搜索结果，只供抽取步消费
    pub search_results: Vec<SearchHit>,
    /// 去重截断后的候选名单
    pub extracted_tools: Vec<String>,
    /// 按候选顺序追加的分析记录
    pub companies: Vec<CompanyAnalysis>,
    /// 最终推荐；companies 为空时缺省
    pub analysis: Option<String>,
}

impl WorkflowState {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            ..Default::default()
        }
    }
}

/// 流水线终态输出（交给入口渲染）
#[derive(Debug)]
pub struct ResearchResult {
    pub query: String,
    pub companies: Vec<CompanyAnalysis>,
    pub analysis: Option<String>,
}
