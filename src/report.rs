//! 结果渲染：把 ResearchResult 排成人读的控制台报告
//!
//! 列表字段只展示前几项（tech/语言前 5、集成前 4），降级记录的哨兵描述不展示。

use crate::workflow::{ResearchResult, ANALYSIS_FAILED};

/// 三态布尔的展示
fn tri_state(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "Yes",
        Some(false) => "No",
        None => "Unknown",
    }
}

/// 渲染整份报告（标题 + 公司列表 + 推荐）
pub fn render_report(result: &ResearchResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("\nResults for: {}\n", result.query));
    out.push_str(&"=".repeat(60));
    out.push('\n');

    for (i, company) in result.companies.iter().enumerate() {
        out.push_str(&format!("\n{}. 🏢 {}\n", i + 1, company.name));
        out.push_str(&format!("   🌐 Website: {}\n", company.website));
        out.push_str(&format!("   💰 Pricing: {}\n", company.pricing_model));
        out.push_str(&format!(
            "   📖 Open Source: {}\n",
            tri_state(company.is_open_source)
        ));

        if !company.tech_stack.is_empty() {
            out.push_str(&format!(
                "   🛠️  Tech: {}\n",
                company.tech_stack[..company.tech_stack.len().min(5)].join(", ")
            ));
        }

        if !company.language_support.is_empty() {
            out.push_str(&format!(
                "   💻 Languages: {}\n",
                company.language_support[..company.language_support.len().min(5)].join(", ")
            ));
        }

        if let Some(api) = company.api_available {
            let api_status = if api { "✅ Available" } else { "❌ Not available" };
            out.push_str(&format!("   🔌 API: {}\n", api_status));
        }

        if !company.integration_capabilities.is_empty() {
            out.push_str(&format!(
                "   🔗 Integrations: {}\n",
                company.integration_capabilities
                    [..company.integration_capabilities.len().min(4)]
                    .join(", ")
            ));
        }

        if company.description != ANALYSIS_FAILED {
            out.push_str(&format!("   📝 Description: {}\n", company.description));
        }
    }

    if let Some(analysis) = &result.analysis {
        out.push_str("\nRecommendations:\n");
        out.push_str(&"-".repeat(40));
        out.push('\n');
        out.push_str(analysis);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::{CompanyAnalysis, PricingModel, UNKNOWN_WEBSITE};

    fn sample_company() -> CompanyAnalysis {
        CompanyAnalysis {
            name: "SonarQube".to_string(),
            website: "https://www.sonarsource.com".to_string(),
            pricing_model: PricingModel::Freemium,
            is_open_source: Some(true),
            tech_stack: vec!["Java".into(), "Elasticsearch".into()],
            description: "Static analysis platform.".to_string(),
            api_available: Some(true),
            language_support: vec!["Java".into(), "Python".into()],
            integration_capabilities: vec!["GitHub".into(), "Jenkins".into()],
        }
    }

    #[test]
    fn test_report_includes_company_fields() {
        let result = ResearchResult {
            query: "code review tools".to_string(),
            companies: vec![sample_company()],
            analysis: Some("SonarQube is the best fit.".to_string()),
        };
        let report = render_report(&result);
        assert!(report.contains("Results for: code review tools"));
        assert!(report.contains("1. 🏢 SonarQube"));
        assert!(report.contains("Pricing: Freemium"));
        assert!(report.contains("Open Source: Yes"));
        assert!(report.contains("API: ✅ Available"));
        assert!(report.contains("Description: Static analysis platform."));
        assert!(report.contains("Recommendations:"));
    }

    #[test]
    fn test_report_hides_sentinel_description() {
        let result = ResearchResult {
            query: "q".to_string(),
            companies: vec![CompanyAnalysis::degraded("Ghost", UNKNOWN_WEBSITE)],
            analysis: None,
        };
        let report = render_report(&result);
        assert!(report.contains("Ghost"));
        assert!(report.contains("Website: Unknown"));
        assert!(!report.contains("Description:"));
        assert!(!report.contains("Recommendations:"));
    }

    #[test]
    fn test_report_truncates_list_fields() {
        let mut company = sample_company();
        company.tech_stack = (0..8).map(|i| format!("t{i}")).collect();
        company.integration_capabilities = (0..8).map(|i| format!("x{i}")).collect();
        let result = ResearchResult {
            query: "q".to_string(),
            companies: vec![company],
            analysis: None,
        };
        let report = render_report(&result);
        assert!(report.contains("t4"));
        assert!(!report.contains("t5"));
        assert!(report.contains("x3"));
        assert!(!report.contains("x4"));
    }
}
