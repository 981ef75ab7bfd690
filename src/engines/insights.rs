use crate::format::format_compact_currency;
use crate::models::{AiInsight, Severity, SeverityFilter};
use serde::Serialize;

pub const EMPTY_MESSAGE: &str = "No insights match this filter.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOption {
    pub value: SeverityFilter,
    pub label: &'static str,
    pub count: usize,
    pub color: Option<&'static str>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightCard {
    pub id: String,
    pub severity: Severity,
    pub severity_label: &'static str,
    pub color: &'static str,
    pub category: String,
    pub title: String,
    pub description: String,
    pub recommended_action: String,
    pub estimated_impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsView {
    pub filter: SeverityFilter,
    pub options: Vec<FilterOption>,
    pub insights: Vec<InsightCard>,
    pub critical_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub total_impact: f64,
    pub total_impact_label: String,
    pub empty_message: Option<&'static str>,
}

pub fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "rose",
        Severity::Warning => "amber",
        Severity::Info => "emerald",
    }
}

/// Keeps dataset order; `All` passes everything through.
pub fn filter_insights(insights: &[AiInsight], filter: SeverityFilter) -> Vec<&AiInsight> {
    insights
        .iter()
        .filter(|insight| filter.matches(insight.severity))
        .collect()
}

pub fn count_severity(insights: &[AiInsight], severity: Severity) -> usize {
    insights
        .iter()
        .filter(|insight| insight.severity == severity)
        .count()
}

/// Only positive impact values count as recoverable revenue; negative values are
/// reductions (churn, ticket volume) and are left out.
pub fn total_impact(insights: &[AiInsight]) -> f64 {
    insights
        .iter()
        .map(|insight| insight.impact_value)
        .filter(|value| *value > 0.0)
        .sum()
}

pub fn insights_view(insights: &[AiInsight], filter: SeverityFilter) -> InsightsView {
    let cards = filter_insights(insights, filter)
        .into_iter()
        .map(insight_card)
        .collect::<Vec<_>>();
    let total = total_impact(insights);

    let options = SeverityFilter::ALL
        .into_iter()
        .map(|option| FilterOption {
            value: option,
            label: option.label(),
            count: insights
                .iter()
                .filter(|insight| option.matches(insight.severity))
                .count(),
            color: match option {
                SeverityFilter::All => None,
                SeverityFilter::Critical => Some(severity_color(Severity::Critical)),
                SeverityFilter::Warning => Some(severity_color(Severity::Warning)),
                SeverityFilter::Info => Some(severity_color(Severity::Info)),
            },
            active: option == filter,
        })
        .collect();

    tracing::debug!(filter = filter.label(), matched = cards.len(), "insights view computed");

    InsightsView {
        filter,
        options,
        empty_message: cards.is_empty().then_some(EMPTY_MESSAGE),
        insights: cards,
        critical_count: count_severity(insights, Severity::Critical),
        warning_count: count_severity(insights, Severity::Warning),
        info_count: count_severity(insights, Severity::Info),
        total_impact: total,
        total_impact_label: format_compact_currency(total),
    }
}

pub(crate) fn insight_card(insight: &AiInsight) -> InsightCard {
    InsightCard {
        id: insight.id.clone(),
        severity: insight.severity,
        severity_label: insight.severity.as_str(),
        color: severity_color(insight.severity),
        category: insight.category.clone(),
        title: insight.title.clone(),
        description: insight.description.clone(),
        recommended_action: insight.recommended_action.clone(),
        estimated_impact: insight.estimated_impact.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn builtin_summary_counts_and_impact() {
        let dataset = Dataset::builtin(1);
        let view = insights_view(dataset.ai_insights(), SeverityFilter::All);
        assert_eq!(view.insights.len(), 6);
        assert_eq!(view.critical_count, 2);
        assert_eq!(view.warning_count, 2);
        assert_eq!(view.info_count, 2);
        assert_eq!(view.total_impact, 21_450.0);
        assert_eq!(view.total_impact_label, "$21.5K");
        assert!(view.empty_message.is_none());
    }

    #[test]
    fn filter_keeps_original_order_and_global_counts() {
        let dataset = Dataset::builtin(1);
        let view = insights_view(dataset.ai_insights(), SeverityFilter::Info);
        let ids: Vec<&str> = view.insights.iter().map(|card| card.id.as_str()).collect();
        assert_eq!(ids, vec!["5", "6"]);
        assert_eq!(view.critical_count, 2);
        assert_eq!(view.total_impact, 21_450.0);

        let active: Vec<_> = view.options.iter().filter(|option| option.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].value, SeverityFilter::Info);
        assert_eq!(view.options[0].count, 6);
        assert_eq!(view.options[0].color, None);
    }

    #[test]
    fn no_matches_shows_empty_state() {
        let dataset = Dataset::builtin(1);
        let warnings_only: Vec<AiInsight> = dataset
            .ai_insights()
            .iter()
            .filter(|insight| insight.severity == Severity::Warning)
            .cloned()
            .collect();
        let view = insights_view(&warnings_only, SeverityFilter::Critical);
        assert!(view.insights.is_empty());
        assert_eq!(view.empty_message, Some(EMPTY_MESSAGE));
        assert_eq!(view.total_impact, 0.0);
        assert_eq!(view.total_impact_label, "$0");
    }
}
