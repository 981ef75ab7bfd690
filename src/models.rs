use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Plan {
    Enterprise,
    Growth,
    Starter,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Enterprise, Plan::Growth, Plan::Starter];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Enterprise => "Enterprise",
            Self::Growth => "Growth",
            Self::Starter => "Starter",
        }
    }

    /// Sort rank used by the customer table: larger plans rank higher.
    pub fn rank(self) -> u8 {
        match self {
            Self::Enterprise => 3,
            Self::Growth => 2,
            Self::Starter => 1,
        }
    }

    pub fn badge_variant(self) -> &'static str {
        match self {
            Self::Enterprise => "enterprise",
            Self::Growth => "growth",
            Self::Starter => "starter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricFormat {
    Currency,
    Number,
    Percent,
    Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureTrend {
    Up,
    Down,
    Stable,
}

impl FeatureTrend {
    pub fn rank(self) -> u8 {
        match self {
            Self::Up => 2,
            Self::Stable => 1,
            Self::Down => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthCategory {
    Healthy,
    #[serde(rename = "At Risk")]
    AtRisk,
    Critical,
}

impl HealthCategory {
    /// Above 70 is healthy, 40 through 70 inclusive is at risk, below 40 is critical.
    pub fn from_score(score: u8) -> Self {
        if score > 70 {
            Self::Healthy
        } else if score >= 40 {
            Self::AtRisk
        } else {
            Self::Critical
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::AtRisk => "At Risk",
            Self::Critical => "Critical",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Healthy => "emerald",
            Self::AtRisk => "amber",
            Self::Critical => "rose",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlanFilter {
    #[default]
    All,
    Enterprise,
    Growth,
    Starter,
}

impl PlanFilter {
    pub fn matches(self, plan: Plan) -> bool {
        match self {
            Self::All => true,
            Self::Enterprise => plan == Plan::Enterprise,
            Self::Growth => plan == Plan::Growth,
            Self::Starter => plan == Plan::Starter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HealthFilter {
    #[default]
    All,
    Healthy,
    #[serde(rename = "At Risk")]
    AtRisk,
    Critical,
}

impl HealthFilter {
    pub fn matches(self, category: HealthCategory) -> bool {
        match self {
            Self::All => true,
            Self::Healthy => category == HealthCategory::Healthy,
            Self::AtRisk => category == HealthCategory::AtRisk,
            Self::Critical => category == HealthCategory::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityFilter {
    #[default]
    All,
    Critical,
    Warning,
    Info,
}

impl SeverityFilter {
    pub const ALL: [SeverityFilter; 4] = [
        SeverityFilter::All,
        SeverityFilter::Critical,
        SeverityFilter::Warning,
        SeverityFilter::Info,
    ];

    pub fn matches(self, severity: Severity) -> bool {
        match self {
            Self::All => true,
            Self::Critical => severity == Severity::Critical,
            Self::Warning => severity == Severity::Warning,
            Self::Info => severity == Severity::Info,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomerSortField {
    Name,
    Plan,
    Mrr,
    Users,
    HealthScore,
    LastActive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureSortField {
    Name,
    Adoption,
    Trend,
    UserCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateRange {
    #[serde(rename = "7D")]
    SevenDays,
    #[default]
    #[serde(rename = "30D")]
    ThirtyDays,
    #[serde(rename = "90D")]
    NinetyDays,
    #[serde(rename = "12M")]
    TwelveMonths,
}

impl DateRange {
    pub const ALL: [DateRange; 4] = [
        DateRange::SevenDays,
        DateRange::ThirtyDays,
        DateRange::NinetyDays,
        DateRange::TwelveMonths,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SevenDays => "7D",
            Self::ThirtyDays => "30D",
            Self::NinetyDays => "90D",
            Self::TwelveMonths => "12M",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiMetric {
    pub label: String,
    pub value: f64,
    pub change: f64,
    pub change_type: ChangeType,
    pub format: MetricFormat,
    #[serde(alias = "sparklineData")]
    pub sparkline: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    pub month: String,
    pub revenue: f64,
    #[serde(rename = "newMRR", alias = "newMrr")]
    pub new_mrr: f64,
    pub expansion: f64,
    pub contraction: f64,
    pub churn: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub plan: Plan,
    pub mrr: f64,
    pub users: u32,
    pub health_score: u8,
    pub last_active: String,
    pub trend: Vec<f64>,
}

impl Customer {
    pub fn health_category(&self) -> HealthCategory {
        HealthCategory::from_score(self.health_score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSegment {
    pub name: Plan,
    pub percentage: f64,
    pub mrr: f64,
    pub customer_count: u32,
    pub avg_health_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiInsight {
    pub id: String,
    pub severity: Severity,
    pub category: String,
    pub title: String,
    pub description: String,
    pub recommended_action: String,
    pub estimated_impact: String,
    pub impact_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelStage {
    pub name: String,
    pub count: u64,
    pub conversion_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureUsage {
    pub name: String,
    pub adoption: f64,
    pub trend: FeatureTrend,
    pub user_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMetrics {
    pub month: String,
    pub active_users: u64,
    pub new_signups: u64,
    pub churned: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActiveUsers {
    pub date: String,
    pub users: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetric {
    pub label: String,
    pub value: String,
    pub change: f64,
    pub change_type: ChangeType,
    #[serde(alias = "sparklineData")]
    pub sparkline: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementCell {
    pub day: String,
    pub hour: u8,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthMetric {
    pub label: String,
    pub value: String,
    pub change: f64,
    pub change_type: ChangeType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowOutcome {
    Positive,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    pub label: String,
    pub percent: f64,
    pub users: u64,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub outcome: Option<FlowOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowConnection {
    pub from: usize,
    pub to: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFlow {
    pub source: FlowNode,
    pub middle: Vec<FlowNode>,
    pub destinations: Vec<FlowNode>,
    pub connections: Vec<FlowConnection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub label: String,
    pub href: String,
    pub icon: String,
    pub section: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    pub initial_mrr: f64,
    pub page_size: usize,
    pub counter_duration_ms: u64,
    pub top_customer_count: usize,
    pub top_insight_count: usize,
    pub random_seed: u64,
    pub default_date_range: DateRange,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            initial_mrr: 600_000.0,
            page_size: 10,
            counter_duration_ms: 1_200,
            top_customer_count: 5,
            top_insight_count: 3,
            random_seed: 42,
            default_date_range: DateRange::ThirtyDays,
        }
    }
}
