//! Prompt 构造
//!
//! 三类提示词：名称抽取（期待按行输出）、结构化分析（期待严格 JSON）、
//! 最终推荐（期待 3-4 句自由文本），以及交互 Agent 的 system prompt。
//! 正文窗口截断由调用方完成，这里只做拼接。

/// 名称抽取 system prompt
pub const TOOL_EXTRACTION_SYSTEM: &str = "You are a researcher of prices, promotions, \
offers and deals. Extract specific names of tools, libraries, platforms or services \
from articles. Focus on real products/tools/solutions/services that consumers show \
interest in and can actually use.";

/// 名称抽取 user prompt：要求只回产品名，每行一个
pub fn tool_extraction_user(query: &str, content: &str) -> String {
    format!(
        r#"Query: {query}
Article content: {content}

Extract a list of specific product/tool/solution/service names mentioned in this content that are relevant to "{query}".

Rules:
- Only include actual product names, no generic terms
- Focus on tools/solutions/services consumers can buy, obtain, subscribe to or use directly
- Include both commercial and open-source options
- Limit to the 5 most relevant results
- Return only the product names, one per line, no descriptions

Example format:
Amazon
Nubank
OpenAI
Groq"#
    )
}

/// 结构化分析 system prompt
pub const TOOL_ANALYSIS_SYSTEM: &str = "You are analyzing prices, promotions, offers \
and deals of products/tools/solutions/services for the category the user asked about. \
Focus on extracting information relevant to consumers. Pay special attention to \
conditions, discounts, commercial model, prerequisites, technology, APIs, SDKs and \
ways to buy, obtain, subscribe to or use the product.";

/// 结构化分析 user prompt：要求输出一个 JSON 对象，字段与 CompanyAnalysis 对齐
pub fn tool_analysis_user(company_name: &str, content: &str) -> String {
    format!(
        r#"Company/Tool: {company_name}
Website content: {content}

Analyze this content from a consumer perspective and reply with a single JSON object with exactly these fields:
- "pricing_model": one of "Free", "Freemium", "Paid", "Enterprise", "Subscription" or "Unknown"
- "is_open_source": true if open source, false if proprietary, null if unclear
- "tech_stack": list of technologies used by the product
- "description": brief one-sentence description of what this product delivers to the consumer
- "api_available": true if a REST API, GraphQL, SDK or programmatic access is mentioned, null if unclear
- "language_support": list of programming languages explicitly supported (e.g. Python, JavaScript, Go)
- "integration_capabilities": list of tools/platforms it integrates with (e.g. GitHub, VS Code, Docker, AWS)

Reply with the JSON object only, no surrounding text."#
    )
}

/// 最终推荐 system prompt
pub const RECOMMENDATIONS_SYSTEM: &str = "You are a senior researcher providing quick, \
concise technical recommendations. Keep responses brief and practical - at most 3 to 4 \
sentences in total.";

/// 最终推荐 user prompt：给定候选汇总，要求 3-4 句覆盖选择、价格、技术优势、当前条件
pub fn recommendations_user(query: &str, company_data: &str) -> String {
    format!(
        r#"Consumer query: {query}
Tools/technologies analyzed: {company_data}

Provide a brief recommendation (3-4 sentences at most) covering:
- Which tool is the best and why
- Key cost/pricing considerations
- Main technical advantage
- The best current offer, price or conditions

No lengthy explanations needed."#
    )
}

/// 交互 Agent 的 system prompt：列出可用工具与合法 tool call 的 JSON 格式
pub fn agent_system_prompt(tool_descriptions: &[(String, String)], call_schema: &str) -> String {
    let tools: String = tool_descriptions
        .iter()
        .map(|(name, desc)| format!("- {}: {}", name, desc))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an assistant that can search the web, scrape sites and extract data to research commercial products, tools and services for the user. Think step by step and use the appropriate tools.

Available tools:
{tools}

To call a tool, reply with a single JSON object and nothing else, matching this schema:
{call_schema}

When you have enough information, reply with your final answer as plain text (no JSON)."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_prompt_mentions_query_and_content() {
        let p = tool_extraction_user("code review tools", "Some article text");
        assert!(p.contains("code review tools"));
        assert!(p.contains("Some article text"));
        assert!(p.contains("one per line"));
    }

    #[test]
    fn test_analysis_prompt_lists_all_fields() {
        let p = tool_analysis_user("SonarQube", "pricing page text");
        for field in [
            "pricing_model",
            "is_open_source",
            "tech_stack",
            "description",
            "api_available",
            "language_support",
            "integration_capabilities",
        ] {
            assert!(p.contains(field), "missing field {field}");
        }
    }

    #[test]
    fn test_agent_system_prompt_lists_tools() {
        let tools = vec![
            ("web_search".to_string(), "search the web".to_string()),
            ("scrape".to_string(), "fetch a page".to_string()),
        ];
        let p = agent_system_prompt(&tools, "{}");
        assert!(p.contains("- web_search: search the web"));
        assert!(p.contains("- scrape: fetch a page"));
    }
}
