use crate::engines::insights::{insight_card, InsightCard};
use crate::format::{format_currency, format_metric_value};
use crate::models::{AiInsight, ChangeType, Customer, HealthCategory, KpiMetric, MetricFormat, MonthlyRevenue, Plan};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const POSITIVE_LINE_COLOR: &str = "#10b981";
const NEGATIVE_LINE_COLOR: &str = "#f43f5e";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartType {
    #[default]
    Area,
    Line,
    Bar,
}

impl ChartType {
    pub const ALL: [ChartType; 3] = [ChartType::Area, ChartType::Line, ChartType::Bar];

    pub fn label(self) -> &'static str {
        match self {
            Self::Area => "Area",
            Self::Line => "Line",
            Self::Bar => "Bar",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiCard {
    pub label: String,
    pub value: f64,
    pub format: MetricFormat,
    pub value_label: String,
    pub change_label: String,
    pub change_type: ChangeType,
    pub line_color: &'static str,
    pub sparkline: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestMonth {
    pub month: String,
    pub revenue: f64,
    pub revenue_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopCustomer {
    pub id: String,
    pub name: String,
    pub plan: Plan,
    pub plan_badge: &'static str,
    pub mrr_label: String,
    pub health_score: u8,
    pub health_color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewView {
    pub today_label: String,
    pub kpis: Vec<KpiCard>,
    pub chart_types: Vec<ChartType>,
    pub total_revenue: f64,
    pub total_revenue_label: String,
    pub best_month: Option<BestMonth>,
    pub avg_monthly_growth: f64,
    pub avg_monthly_growth_label: String,
    pub top_customers: Vec<TopCustomer>,
    pub top_insights: Vec<InsightCard>,
}

#[derive(Debug, Clone, Copy)]
pub struct OverviewLimits {
    pub top_customers: usize,
    pub top_insights: usize,
}

impl Default for OverviewLimits {
    fn default() -> Self {
        Self {
            top_customers: 5,
            top_insights: 3,
        }
    }
}

pub fn overview_view(
    kpis: &[KpiMetric],
    months: &[MonthlyRevenue],
    customers: &[Customer],
    insights: &[AiInsight],
    limits: OverviewLimits,
    today: NaiveDate,
) -> OverviewView {
    let total = total_revenue(months);
    let growth = average_growth(months);

    OverviewView {
        today_label: today_label(today),
        kpis: kpis.iter().map(kpi_card).collect(),
        chart_types: ChartType::ALL.to_vec(),
        total_revenue: total,
        total_revenue_label: format_currency(total),
        best_month: best_month(months).map(|month| BestMonth {
            month: month.month.clone(),
            revenue: month.revenue,
            revenue_label: format_currency(month.revenue),
        }),
        avg_monthly_growth: growth,
        avg_monthly_growth_label: format!("{:.1}%", growth),
        top_customers: customers
            .iter()
            .take(limits.top_customers)
            .map(top_customer)
            .collect(),
        top_insights: insights
            .iter()
            .take(limits.top_insights)
            .map(insight_card)
            .collect(),
    }
}

/// `Monday, October 19, 2026`
pub fn today_label(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn total_revenue(months: &[MonthlyRevenue]) -> f64 {
    months.iter().map(|month| month.revenue).sum()
}

/// Highest revenue month; the earliest one wins a tie.
pub fn best_month(months: &[MonthlyRevenue]) -> Option<&MonthlyRevenue> {
    months.iter().fold(None, |best, month| match best {
        Some(current) if month.revenue <= current.revenue => Some(current),
        _ => Some(month),
    })
}

/// Mean month-over-month growth in percent, rounded to one decimal.
/// Steps out of a zero-revenue month have no defined growth and are skipped.
pub fn average_growth(months: &[MonthlyRevenue]) -> f64 {
    let rates: Vec<f64> = months
        .windows(2)
        .filter(|pair| pair[0].revenue > 0.0)
        .map(|pair| (pair[1].revenue - pair[0].revenue) / pair[0].revenue * 100.0)
        .collect();
    if rates.is_empty() {
        return 0.0;
    }
    let mean = rates.iter().sum::<f64>() / rates.len() as f64;
    (mean * 10.0).round() / 10.0
}

fn kpi_card(metric: &KpiMetric) -> KpiCard {
    let positive = metric.change_type == ChangeType::Positive;
    KpiCard {
        label: metric.label.clone(),
        value: metric.value,
        format: metric.format,
        value_label: format_metric_value(metric.value, metric.format),
        change_label: if positive {
            format!("+{}%", metric.change)
        } else {
            format!("{}%", metric.change)
        },
        change_type: metric.change_type,
        line_color: if positive { POSITIVE_LINE_COLOR } else { NEGATIVE_LINE_COLOR },
        sparkline: metric.sparkline.clone(),
    }
}

fn top_customer(customer: &Customer) -> TopCustomer {
    TopCustomer {
        id: customer.id.clone(),
        name: customer.name.clone(),
        plan: customer.plan,
        plan_badge: customer.plan.badge_variant(),
        mrr_label: format_currency(customer.mrr),
        health_score: customer.health_score,
        health_color: HealthCategory::from_score(customer.health_score).color(),
    }
}
