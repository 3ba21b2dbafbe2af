//! Chat context
//!
//! Flattens an analysis report and its recommendations into template
//! variables a chat layer can splice into its prompt. No prompt text lives
//! here.

use std::collections::HashMap;

use crate::analysis::{personalized_tips, AnalysisReport, DailyTip};
use crate::recommend::PersonalizedRecommendations;

/// How many recommendation titles are listed in `recommendations`
const MAX_LISTED: usize = 5;

/// Everything a chat reply may quote about the user's finances
#[derive(Debug, Clone)]
pub struct ChatContext {
    pub report: AnalysisReport,
    pub recommendations: PersonalizedRecommendations,
    pub daily_tip: Option<DailyTip>,
}

impl ChatContext {
    pub fn new(report: AnalysisReport, recommendations: PersonalizedRecommendations) -> Self {
        Self {
            report,
            recommendations,
            daily_tip: None,
        }
    }

    pub fn with_daily_tip(mut self, tip: DailyTip) -> Self {
        self.daily_tip = Some(tip);
        self
    }

    /// Convert to template variables for prompt rendering
    pub fn to_template_vars(&self) -> HashMap<&'static str, String> {
        let mut vars = HashMap::new();
        let report = &self.report;

        vars.insert("period", report.period.to_string());
        vars.insert("total_income", format!("{:.2}", report.total_income));
        vars.insert("total_expenses", format!("{:.2}", report.total_expenses));
        vars.insert("savings_rate", format!("{:.1}", report.savings_rate));
        vars.insert("assets_purchased", format!("{:.2}", report.assets_purchased));
        vars.insert(
            "liabilities_purchased",
            format!("{:.2}", report.liabilities_purchased),
        );
        vars.insert("behavior_score", format!("{:.0}", report.behavior_score));
        vars.insert("analysis_summary", report.recommendations.join("\n"));

        let tips = personalized_tips(report);
        if !tips.is_empty() {
            vars.insert("personalized_tips", tips.join("\n"));
        }

        vars.insert(
            "recommendation_count",
            self.recommendations.len().to_string(),
        );
        if let Some(top) = self.recommendations.top() {
            vars.insert("top_recommendation", top.title.clone());
            vars.insert("top_recommendation_description", top.description.clone());
            vars.insert("top_recommendation_steps", top.action_steps.join("\n"));
        }
        if !self.recommendations.is_empty() {
            let listed = self
                .recommendations
                .iter()
                .take(MAX_LISTED)
                .map(|r| format!("[{}] {}", r.priority, r.title))
                .collect::<Vec<_>>()
                .join("\n");
            vars.insert("recommendations", listed);
        }

        if let Some(ref tip) = self.daily_tip {
            vars.insert("daily_tip", tip.text.clone());
            vars.insert("daily_tip_book", tip.book.title().to_string());
        }

        vars
    }
}
