pub mod builtin;

use crate::errors::{AppError, AppResult};
use crate::models::{
    AiInsight, Customer, CustomerSegment, DailyActiveUsers, EngagementCell, FeatureUsage, FunnelStage,
    GrowthMetric, KpiMetric, MonthlyRevenue, NavItem, SessionMetric, UserFlow, UserMetrics,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const HEATMAP_DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
pub const HEATMAP_HOURS: u8 = 24;
pub const CUSTOMER_TREND_LEN: usize = 5;

static LAST_ACTIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(m|h|d) ago$").expect("valid last-active regex"));

/// Raw collections as they appear in a dataset file. Nothing here is validated;
/// wrap it in [`Dataset::new`] before handing it to an engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatasetRecords {
    pub kpi_metrics: Vec<KpiMetric>,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub customers: Vec<Customer>,
    pub customer_segments: Vec<CustomerSegment>,
    pub ai_insights: Vec<AiInsight>,
    #[serde(alias = "funnelData")]
    pub funnel: Vec<FunnelStage>,
    pub feature_usage: Vec<FeatureUsage>,
    pub user_metrics: Vec<UserMetrics>,
    pub daily_active_users: Vec<DailyActiveUsers>,
    pub session_metrics: Vec<SessionMetric>,
    pub engagement_heatmap: Vec<EngagementCell>,
    pub growth_metrics: Vec<GrowthMetric>,
    pub user_flow: Option<UserFlow>,
    #[serde(alias = "navigationItems")]
    pub navigation: Vec<NavItem>,
}

/// Validated, read-only dashboard data. Engines borrow slices from it and never
/// mutate it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: DatasetRecords,
}

impl Dataset {
    pub fn new(records: DatasetRecords) -> AppResult<Self> {
        validate(&records)?;
        Ok(Self { records })
    }

    pub fn builtin(seed: u64) -> Self {
        Self {
            records: builtin::records(seed),
        }
    }

    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        let records = serde_json::from_str::<DatasetRecords>(raw)
            .map_err(|error| AppError::InvalidData(format!("dataset json: {}", error)))?;
        Self::new(records)
    }

    pub fn from_yaml_str(raw: &str) -> AppResult<Self> {
        let records = serde_yaml::from_str::<DatasetRecords>(raw)
            .map_err(|error| AppError::InvalidData(format!("dataset yaml: {}", error)))?;
        Self::new(records)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::NotFound(format!("dataset file {}", path.display())));
        }
        let raw = std::fs::read_to_string(path)?;
        let dataset = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&raw)?,
            Some("yaml") | Some("yml") => Self::from_yaml_str(&raw)?,
            _ => {
                return Err(AppError::Config(format!(
                    "Unsupported dataset format '{}': expected .json, .yaml or .yml",
                    path.display()
                )))
            }
        };
        tracing::info!(
            path = %path.display(),
            customers = dataset.customers().len(),
            months = dataset.monthly_revenue().len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn records(&self) -> &DatasetRecords {
        &self.records
    }

    pub fn kpi_metrics(&self) -> &[KpiMetric] {
        &self.records.kpi_metrics
    }

    pub fn monthly_revenue(&self) -> &[MonthlyRevenue] {
        &self.records.monthly_revenue
    }

    pub fn customers(&self) -> &[Customer] {
        &self.records.customers
    }

    pub fn customer_segments(&self) -> &[CustomerSegment] {
        &self.records.customer_segments
    }

    pub fn ai_insights(&self) -> &[AiInsight] {
        &self.records.ai_insights
    }

    pub fn funnel(&self) -> &[FunnelStage] {
        &self.records.funnel
    }

    pub fn feature_usage(&self) -> &[FeatureUsage] {
        &self.records.feature_usage
    }

    pub fn user_metrics(&self) -> &[UserMetrics] {
        &self.records.user_metrics
    }

    pub fn daily_active_users(&self) -> &[DailyActiveUsers] {
        &self.records.daily_active_users
    }

    pub fn session_metrics(&self) -> &[SessionMetric] {
        &self.records.session_metrics
    }

    pub fn engagement_heatmap(&self) -> &[EngagementCell] {
        &self.records.engagement_heatmap
    }

    pub fn growth_metrics(&self) -> &[GrowthMetric] {
        &self.records.growth_metrics
    }

    pub fn user_flow(&self) -> Option<&UserFlow> {
        self.records.user_flow.as_ref()
    }

    pub fn navigation(&self) -> &[NavItem] {
        &self.records.navigation
    }
}

fn validate(records: &DatasetRecords) -> AppResult<()> {
    for metric in &records.kpi_metrics {
        if metric.sparkline.is_empty() {
            return Err(invalid(format!("KPI '{}' has an empty sparkline", metric.label)));
        }
    }

    for month in &records.monthly_revenue {
        let amounts = [
            month.revenue,
            month.new_mrr,
            month.expansion,
            month.contraction,
            month.churn,
        ];
        if amounts.iter().any(|amount| !amount.is_finite() || *amount < 0.0) {
            return Err(invalid(format!(
                "month '{}' has a negative or non-finite amount",
                month.month
            )));
        }
    }

    validate_customers(&records.customers)?;

    let mut segment_plans = HashSet::new();
    for segment in &records.customer_segments {
        if !segment_plans.insert(segment.name) {
            return Err(invalid(format!(
                "duplicate customer segment '{}'",
                segment.name.as_str()
            )));
        }
    }

    let mut insight_ids = HashSet::new();
    for insight in &records.ai_insights {
        if !insight_ids.insert(insight.id.as_str()) {
            return Err(invalid(format!("duplicate insight id '{}'", insight.id)));
        }
    }

    if let Some(first) = records.funnel.first() {
        if first.conversion_rate.is_some() {
            return Err(invalid(format!(
                "first funnel stage '{}' cannot have a conversion rate",
                first.name
            )));
        }
    }

    let mut feature_names = HashSet::new();
    for feature in &records.feature_usage {
        if !feature_names.insert(feature.name.as_str()) {
            return Err(invalid(format!("duplicate feature '{}'", feature.name)));
        }
        if !(0.0..=100.0).contains(&feature.adoption) {
            return Err(invalid(format!(
                "feature '{}' adoption {} is outside 0..=100",
                feature.name, feature.adoption
            )));
        }
    }

    for metric in &records.session_metrics {
        if metric.sparkline.is_empty() {
            return Err(invalid(format!("session metric '{}' has an empty sparkline", metric.label)));
        }
    }

    validate_heatmap(&records.engagement_heatmap)?;

    if let Some(flow) = &records.user_flow {
        for connection in &flow.connections {
            if connection.from >= flow.middle.len() || connection.to >= flow.destinations.len() {
                return Err(invalid(format!(
                    "user flow connection {} -> {} points outside the node lists",
                    connection.from, connection.to
                )));
            }
        }
    }

    let mut hrefs = HashSet::new();
    for item in &records.navigation {
        if !hrefs.insert(item.href.as_str()) {
            return Err(invalid(format!("duplicate navigation href '{}'", item.href)));
        }
    }

    Ok(())
}

fn validate_customers(customers: &[Customer]) -> AppResult<()> {
    let mut ids = HashSet::new();
    for customer in customers {
        if !ids.insert(customer.id.as_str()) {
            return Err(invalid(format!("duplicate customer id '{}'", customer.id)));
        }
        if customer.trend.len() != CUSTOMER_TREND_LEN {
            return Err(invalid(format!(
                "customer '{}' trend must have {} points, found {}",
                customer.id,
                CUSTOMER_TREND_LEN,
                customer.trend.len()
            )));
        }
        if customer.health_score > 100 {
            return Err(invalid(format!(
                "customer '{}' health score {} exceeds 100",
                customer.id, customer.health_score
            )));
        }
        if !customer.mrr.is_finite() || customer.mrr < 0.0 {
            return Err(invalid(format!("customer '{}' has an invalid MRR", customer.id)));
        }
        if !LAST_ACTIVE_RE.is_match(&customer.last_active) {
            return Err(invalid(format!(
                "customer '{}' last active '{}' is not a relative time like '2h ago'",
                customer.id, customer.last_active
            )));
        }
    }
    Ok(())
}

/// The heatmap must be a full Mon..Sun x 0..23 grid; an empty one is rejected too.
fn validate_heatmap(cells: &[EngagementCell]) -> AppResult<()> {
    let mut seen = HashSet::new();
    for cell in cells {
        if !HEATMAP_DAYS.contains(&cell.day.as_str()) {
            return Err(invalid(format!("heatmap day '{}' is not one of Mon..Sun", cell.day)));
        }
        if cell.hour >= HEATMAP_HOURS {
            return Err(invalid(format!("heatmap hour {} is outside 0..=23", cell.hour)));
        }
        if !seen.insert((cell.day.as_str(), cell.hour)) {
            return Err(invalid(format!("duplicate heatmap cell {} {}:00", cell.day, cell.hour)));
        }
    }

    let expected = HEATMAP_DAYS.len() * usize::from(HEATMAP_HOURS);
    if seen.len() != expected {
        return Err(invalid(format!(
            "heatmap has {} cells, expected a complete grid of {}",
            seen.len(),
            expected
        )));
    }
    Ok(())
}

fn invalid(message: String) -> AppError {
    AppError::InvalidData(message)
}
