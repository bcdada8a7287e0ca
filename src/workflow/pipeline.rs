//! 调研流水线：Search → Extract → Research → Recommend → Done
//!
//! 严格线性、无回边；每步消费上一步输出并填充 WorkflowState 对应字段。
//! 搜索/模型调用失败即中止整条查询；单个候选的空抓取或解析失败只降级该
//! 候选，不影响批次。全程单线程顺序执行，候选逐个处理。

use std::sync::Arc;

use crate::config::WorkflowSection;
use crate::error::WorkflowError;
use crate::llm::LlmClient;
use crate::message::Message;
use crate::prompts;
use crate::search::SearchClient;
use crate::workflow::types::{CompanyAnalysis, ResearchResult, WorkflowState, UNKNOWN_WEBSITE};

/// 按行解析名称抽取回复：trim、丢空行、上限 cap 条
pub fn parse_tool_names(response: &str, cap: usize) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .take(cap)
        .collect()
}

/// 不区分大小写去重（首见保留、顺序不变），并截断到前 cap 个
pub fn dedup_candidates(names: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for name in names {
        let key = name.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(name);
        if out.len() == cap {
            break;
        }
    }
    out
}

/// 流水线本体：持有 LLM 与搜索客户端，每次 run 处理一条查询
pub struct ResearchPipeline {
    llm: Arc<dyn LlmClient>,
    search: Arc<dyn SearchClient>,
    limits: WorkflowSection,
}

impl ResearchPipeline {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchClient>,
        limits: WorkflowSection,
    ) -> Self {
        Self { llm, search, limits }
    }

    /// 跑完整条流水线，返回不可变结果；任一硬失败中止查询，不返回部分结果
    pub async fn run(&self, query: &str) -> Result<ResearchResult, WorkflowError> {
        let mut state = WorkflowState::new(query);

        self.search_step(&mut state).await?;
        self.extract_step(&mut state).await?;
        self.research_step(&mut state).await?;
        self.recommend_step(&mut state).await?;

        Ok(ResearchResult {
            query: state.query,
            companies: state.companies,
            analysis: state.analysis,
        })
    }

    /// 第一步：文章搜索。零结果合法，下游自然得到空候选。
    async fn search_step(&self, state: &mut WorkflowState) -> Result<(), WorkflowError> {
        state.search_results = self
            .search
            .search(&state.query, self.limits.max_search_results)
            .await
            .map_err(WorkflowError::Search)?;
        tracing::info!(
            query = %state.query,
            results = state.search_results.len(),
            "search step done"
        );
        Ok(())
    }

    /// 第二步：逐篇抽取候选名，保序累积后去重截断
    async fn extract_step(&self, state: &mut WorkflowState) -> Result<(), WorkflowError> {
        let mut names = Vec::new();
        for hit in &state.search_results {
            let messages = vec![
                Message::system(prompts::TOOL_EXTRACTION_SYSTEM),
                Message::user(prompts::tool_extraction_user(&state.query, &hit.content)),
            ];
            let response = self
                .llm
                .complete(&messages)
                .await
                .map_err(WorkflowError::Llm)?;
            names.extend(parse_tool_names(&response, self.limits.names_per_article));
        }

        state.extracted_tools = dedup_candidates(names, self.limits.max_candidates);
        tracing::info!(candidates = ?state.extracted_tools, "extract step done");
        Ok(())
    }

    /// 第三步：逐个候选做定向搜索 + 结构化分析。
    /// 抓取为空记降级记录（站点占位）；解析失败也降级；搜索/模型报错则中止。
    async fn research_step(&self, state: &mut WorkflowState) -> Result<(), WorkflowError> {
        for name in &state.extracted_tools {
            let hits = self
                .search
                .search(&format!("{} company pricing", name), 1)
                .await
                .map_err(WorkflowError::Search)?;

            let company = match hits.into_iter().next() {
                Some(hit) if !hit.content.trim().is_empty() => {
                    // 正文窗口截断，控制模型上下文
                    let window: String = hit
                        .content
                        .chars()
                        .take(self.limits.analysis_content_chars)
                        .collect();
                    let messages = vec![
                        Message::system(prompts::TOOL_ANALYSIS_SYSTEM),
                        Message::user(prompts::tool_analysis_user(name, &window)),
                    ];
                    let response = self
                        .llm
                        .complete(&messages)
                        .await
                        .map_err(WorkflowError::Llm)?;
                    CompanyAnalysis::from_model_response(name, &hit.url, &response)
                }
                Some(hit) => {
                    tracing::warn!(name = %name, url = %hit.url, "empty site content, degrading");
                    CompanyAnalysis::degraded(name, &hit.url)
                }
                None => {
                    tracing::warn!(name = %name, "no site result, degrading");
                    CompanyAnalysis::degraded(name, UNKNOWN_WEBSITE)
                }
            };
            state.companies.push(company);
        }
        tracing::info!(companies = state.companies.len(), "research step done");
        Ok(())
    }

    /// 第四步：最终推荐。没有任何候选分析时跳过，analysis 保持缺省。
    async fn recommend_step(&self, state: &mut WorkflowState) -> Result<(), WorkflowError> {
        if state.companies.is_empty() {
            tracing::info!("no companies analyzed, skipping recommendation");
            return Ok(());
        }

        let company_data =
            serde_json::to_string(&state.companies).unwrap_or_else(|_| "[]".to_string());
        let messages = vec![
            Message::system(prompts::RECOMMENDATIONS_SYSTEM),
            Message::user(prompts::recommendations_user(&state.query, &company_data)),
        ];
        let response = self
            .llm
            .complete(&messages)
            .await
            .map_err(WorkflowError::Llm)?;
        state.analysis = Some(response);
        tracing::info!("recommendation step done");
        Ok(())
    }
}
