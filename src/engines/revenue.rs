use crate::format::{format_change, format_compact_currency, format_currency};
use crate::models::{ChangeType, CustomerSegment, GrowthMetric, MonthlyRevenue, Plan};
use serde::Serialize;

pub const DEFAULT_INITIAL_MRR: f64 = 600_000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueRow {
    pub month: String,
    #[serde(rename = "startingMRR")]
    pub starting_mrr: f64,
    #[serde(rename = "newMRR")]
    pub new_mrr: f64,
    pub expansion: f64,
    pub contraction: f64,
    pub churn: f64,
    pub net_new: f64,
    #[serde(rename = "endingMRR")]
    pub ending_mrr: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueTotals {
    #[serde(rename = "newMRR")]
    pub new_mrr: f64,
    pub expansion: f64,
    pub contraction: f64,
    pub churn: f64,
    pub net_new: f64,
    #[serde(rename = "endingMRR")]
    pub ending_mrr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueRowLabels {
    pub month: String,
    pub starting: String,
    pub new_mrr: String,
    pub expansion: String,
    pub contraction: String,
    pub churn: String,
    pub net_new: String,
    pub net_new_positive: bool,
    pub ending: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentShare {
    pub plan: Plan,
    pub mrr: f64,
    pub mrr_label: String,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthCard {
    pub label: String,
    pub value: String,
    pub change_label: String,
    pub change_type: ChangeType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueView {
    pub rows: Vec<RevenueRow>,
    pub row_labels: Vec<RevenueRowLabels>,
    pub totals: RevenueTotals,
    pub segment_total_mrr: f64,
    pub segment_total_label: String,
    pub segments: Vec<SegmentShare>,
    pub growth_cards: Vec<GrowthCard>,
    pub axis_labels: Vec<String>,
}

/// Left-to-right fold: each month starts from the previous month's ending balance.
pub fn running_totals(months: &[MonthlyRevenue], initial_mrr: f64) -> Vec<RevenueRow> {
    let mut balance = initial_mrr;
    months
        .iter()
        .map(|month| {
            let starting_mrr = balance;
            let net_new = month.new_mrr + month.expansion - month.contraction - month.churn;
            let ending_mrr = starting_mrr + net_new;
            balance = ending_mrr;
            RevenueRow {
                month: month.month.clone(),
                starting_mrr,
                new_mrr: month.new_mrr,
                expansion: month.expansion,
                contraction: month.contraction,
                churn: month.churn,
                net_new,
                ending_mrr,
            }
        })
        .collect()
}

/// Flow columns are summed; the ending balance is the last month's, not a sum.
pub fn totals(rows: &[RevenueRow], initial_mrr: f64) -> RevenueTotals {
    let mut totals = rows.iter().fold(RevenueTotals::default(), |acc, row| RevenueTotals {
        new_mrr: acc.new_mrr + row.new_mrr,
        expansion: acc.expansion + row.expansion,
        contraction: acc.contraction + row.contraction,
        churn: acc.churn + row.churn,
        net_new: acc.net_new + row.net_new,
        ending_mrr: 0.0,
    });
    totals.ending_mrr = rows.last().map(|row| row.ending_mrr).unwrap_or(initial_mrr);
    totals
}

pub fn segment_shares(segments: &[CustomerSegment]) -> (f64, Vec<SegmentShare>) {
    let total: f64 = segments.iter().map(|segment| segment.mrr).sum();
    let shares = segments
        .iter()
        .map(|segment| SegmentShare {
            plan: segment.name,
            mrr: segment.mrr,
            mrr_label: format_currency(segment.mrr),
            share: if total > 0.0 { segment.mrr / total * 100.0 } else { 0.0 },
        })
        .collect();
    (total, shares)
}

pub fn revenue_view(
    months: &[MonthlyRevenue],
    segments: &[CustomerSegment],
    growth: &[GrowthMetric],
    initial_mrr: f64,
) -> RevenueView {
    let rows = running_totals(months, initial_mrr);
    let totals = totals(&rows, initial_mrr);
    let (segment_total_mrr, segments) = segment_shares(segments);

    let row_labels = rows.iter().map(row_labels).collect();
    let axis_labels = rows
        .iter()
        .map(|row| format_compact_currency(row.ending_mrr))
        .collect();

    RevenueView {
        rows,
        row_labels,
        totals,
        segment_total_mrr,
        segment_total_label: format_currency(segment_total_mrr),
        segments,
        growth_cards: growth
            .iter()
            .map(|metric| GrowthCard {
                label: metric.label.clone(),
                value: metric.value.clone(),
                change_label: format_change(metric.change),
                change_type: metric.change_type,
            })
            .collect(),
        axis_labels,
    }
}

fn row_labels(row: &RevenueRow) -> RevenueRowLabels {
    RevenueRowLabels {
        month: row.month.clone(),
        starting: format_currency(row.starting_mrr),
        new_mrr: format!("+{}", format_currency(row.new_mrr)),
        expansion: format!("+{}", format_currency(row.expansion)),
        contraction: format!("-{}", format_currency(row.contraction)),
        churn: format!("-{}", format_currency(row.churn)),
        net_new: format_currency(row.net_new.abs()),
        net_new_positive: row.net_new >= 0.0,
        ending: format_currency(row.ending_mrr),
    }
}
