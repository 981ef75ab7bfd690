use crate::dataset::{DatasetRecords, HEATMAP_DAYS};
use crate::models::{
    AiInsight, ChangeType, Customer, CustomerSegment, DailyActiveUsers, EngagementCell, FeatureTrend,
    FeatureUsage, FlowConnection, FlowNode, FlowOutcome, FunnelStage, GrowthMetric, KpiMetric, MetricFormat,
    MonthlyRevenue, NavItem, Plan, SessionMetric, Severity, UserFlow, UserMetrics,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DAU_DAYS: usize = 30;

/// The stock InsightFlow dataset. `seed` drives the generated daily-active-user
/// series and the engagement heatmap so the same seed always yields the same data.
pub fn records(seed: u64) -> DatasetRecords {
    let mut rng = StdRng::seed_from_u64(seed);
    let daily_active_users = daily_active_users(&mut rng);
    let engagement_heatmap = engagement_heatmap(&mut rng);

    DatasetRecords {
        kpi_metrics: kpi_metrics(),
        monthly_revenue: monthly_revenue(),
        customers: customers(),
        customer_segments: customer_segments(),
        ai_insights: ai_insights(),
        funnel: funnel(),
        feature_usage: feature_usage(),
        user_metrics: user_metrics(),
        daily_active_users,
        session_metrics: session_metrics(),
        engagement_heatmap,
        growth_metrics: growth_metrics(),
        user_flow: Some(user_flow()),
        navigation: navigation(),
    }
}

fn kpi(label: &str, value: f64, change: f64, format: MetricFormat, sparkline: &[f64]) -> KpiMetric {
    KpiMetric {
        label: label.to_string(),
        value,
        change,
        change_type: ChangeType::Positive,
        format,
        sparkline: sparkline.to_vec(),
    }
}

fn kpi_metrics() -> Vec<KpiMetric> {
    vec![
        kpi(
            "Monthly Recurring Revenue",
            847_329.0,
            12.5,
            MetricFormat::Currency,
            &[
                620_000.0, 645_000.0, 672_000.0, 698_000.0, 710_000.0, 725_000.0, 742_000.0, 768_000.0,
                790_000.0, 805_000.0, 828_000.0, 847_329.0,
            ],
        ),
        kpi(
            "Annual Recurring Revenue",
            10_167_948.0,
            15.2,
            MetricFormat::Currency,
            &[
                7_440_000.0, 7_740_000.0, 8_064_000.0, 8_376_000.0, 8_520_000.0, 8_700_000.0,
                8_904_000.0, 9_216_000.0, 9_480_000.0, 9_660_000.0, 9_936_000.0, 10_167_948.0,
            ],
        ),
        kpi(
            "Active Users",
            34_521.0,
            8.3,
            MetricFormat::Number,
            &[
                28_100.0, 28_900.0, 29_500.0, 30_200.0, 30_800.0, 31_200.0, 31_900.0, 32_400.0, 33_000.0,
                33_500.0, 34_000.0, 34_521.0,
            ],
        ),
        kpi(
            "Churn Rate",
            2.1,
            -0.3,
            MetricFormat::Percent,
            &[3.2, 3.0, 2.9, 2.8, 2.7, 2.6, 2.5, 2.4, 2.3, 2.2, 2.1, 2.1],
        ),
        kpi(
            "NPS Score",
            72.0,
            5.0,
            MetricFormat::Score,
            &[58.0, 60.0, 62.0, 63.0, 65.0, 66.0, 67.0, 68.0, 69.0, 70.0, 71.0, 72.0],
        ),
        kpi(
            "Avg Revenue Per User",
            24.53,
            3.1,
            MetricFormat::Currency,
            &[20.10, 20.80, 21.20, 21.90, 22.30, 22.70, 23.10, 23.50, 23.80, 24.00, 24.30, 24.53],
        ),
    ]
}

fn month(month: &str, revenue: f64, new_mrr: f64, expansion: f64, contraction: f64, churn: f64) -> MonthlyRevenue {
    MonthlyRevenue {
        month: month.to_string(),
        revenue,
        new_mrr,
        expansion,
        contraction,
        churn,
    }
}

fn monthly_revenue() -> Vec<MonthlyRevenue> {
    vec![
        month("Jan", 620_000.0, 45_000.0, 22_000.0, 8_000.0, 12_000.0),
        month("Feb", 645_000.0, 48_000.0, 25_000.0, 7_500.0, 11_500.0),
        month("Mar", 672_000.0, 52_000.0, 28_000.0, 9_000.0, 13_000.0),
        month("Apr", 698_000.0, 50_000.0, 30_000.0, 8_500.0, 11_000.0),
        month("May", 710_000.0, 42_000.0, 24_000.0, 10_000.0, 14_000.0),
        month("Jun", 725_000.0, 47_000.0, 27_000.0, 7_000.0, 10_000.0),
        month("Jul", 742_000.0, 49_000.0, 29_000.0, 8_000.0, 11_000.0),
        month("Aug", 768_000.0, 55_000.0, 32_000.0, 9_500.0, 12_500.0),
        month("Sep", 790_000.0, 51_000.0, 28_000.0, 7_500.0, 10_500.0),
        month("Oct", 805_000.0, 46_000.0, 26_000.0, 8_000.0, 11_000.0),
        month("Nov", 828_000.0, 53_000.0, 31_000.0, 9_000.0, 12_000.0),
        month("Dec", 847_329.0, 56_000.0, 34_000.0, 8_500.0, 10_500.0),
    ]
}

#[allow(clippy::too_many_arguments)]
fn customer(
    id: &str,
    name: &str,
    plan: Plan,
    mrr: f64,
    users: u32,
    health_score: u8,
    last_active: &str,
    trend: [f64; 5],
) -> Customer {
    Customer {
        id: id.to_string(),
        name: name.to_string(),
        plan,
        mrr,
        users,
        health_score,
        last_active: last_active.to_string(),
        trend: trend.to_vec(),
    }
}

fn customers() -> Vec<Customer> {
    vec![
        customer("1", "Acme Corporation", Plan::Enterprise, 52_000.0, 450, 92, "2h ago", [48_000.0, 49_000.0, 50_000.0, 51_000.0, 52_000.0]),
        customer("2", "Globex Industries", Plan::Enterprise, 48_500.0, 380, 88, "1h ago", [44_000.0, 45_000.0, 46_000.0, 47_500.0, 48_500.0]),
        customer("3", "Initech Solutions", Plan::Enterprise, 41_000.0, 320, 75, "4h ago", [42_000.0, 41_500.0, 41_200.0, 41_000.0, 41_000.0]),
        customer("4", "Umbrella Corp", Plan::Growth, 28_000.0, 210, 82, "30m ago", [24_000.0, 25_000.0, 26_000.0, 27_000.0, 28_000.0]),
        customer("5", "Stark Dynamics", Plan::Growth, 24_500.0, 185, 91, "15m ago", [20_000.0, 21_000.0, 22_000.0, 23_500.0, 24_500.0]),
        customer("6", "Wayne Systems", Plan::Growth, 22_000.0, 160, 68, "1d ago", [23_000.0, 22_800.0, 22_500.0, 22_200.0, 22_000.0]),
        customer("7", "Osborn Tech", Plan::Growth, 19_500.0, 140, 45, "3d ago", [22_000.0, 21_500.0, 20_800.0, 20_000.0, 19_500.0]),
        customer("8", "Pied Piper", Plan::Starter, 8_500.0, 65, 94, "5m ago", [6_000.0, 6_800.0, 7_200.0, 7_800.0, 8_500.0]),
        customer("9", "Hooli Inc", Plan::Starter, 6_200.0, 48, 35, "5d ago", [8_000.0, 7_500.0, 7_000.0, 6_500.0, 6_200.0]),
        customer("10", "Prestige Worldwide", Plan::Starter, 4_800.0, 32, 58, "12h ago", [4_500.0, 4_600.0, 4_700.0, 4_750.0, 4_800.0]),
    ]
}

fn customer_segments() -> Vec<CustomerSegment> {
    vec![
        CustomerSegment { name: Plan::Enterprise, percentage: 23.0, mrr: 412_000.0, customer_count: 45, avg_health_score: 85 },
        CustomerSegment { name: Plan::Growth, percentage: 41.0, mrr: 289_000.0, customer_count: 128, avg_health_score: 72 },
        CustomerSegment { name: Plan::Starter, percentage: 36.0, mrr: 146_000.0, customer_count: 312, avg_health_score: 65 },
    ]
}

#[allow(clippy::too_many_arguments)]
fn insight(
    id: &str,
    severity: Severity,
    category: &str,
    title: &str,
    description: &str,
    recommended_action: &str,
    estimated_impact: &str,
    impact_value: f64,
) -> AiInsight {
    AiInsight {
        id: id.to_string(),
        severity,
        category: category.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        recommended_action: recommended_action.to_string(),
        estimated_impact: estimated_impact.to_string(),
        impact_value,
    }
}

fn ai_insights() -> Vec<AiInsight> {
    vec![
        insight(
            "1",
            Severity::Critical,
            "Churn Risk",
            "High-value customer showing disengagement signals",
            "Hooli Inc (Starter, $6,200 MRR) has shown a 42% decrease in platform usage over the past 30 days. Login frequency dropped from daily to weekly, and key feature adoption has stalled.",
            "Schedule an immediate customer success check-in. Offer a personalized onboarding session for underutilized features and consider a temporary discount to re-engage.",
            "+$6,200 MRR retained",
            6_200.0,
        ),
        insight(
            "2",
            Severity::Critical,
            "Revenue",
            "Enterprise expansion opportunity detected",
            "Acme Corporation has exceeded their user seat limit by 15% for 3 consecutive months. Their API usage is at 92% capacity, indicating strong product-market fit and growth.",
            "Proactively reach out with an enterprise tier upgrade proposal. Highlight additional capacity, priority support, and custom integrations available in the next tier.",
            "+$12,000 MRR",
            12_000.0,
        ),
        insight(
            "3",
            Severity::Warning,
            "Product",
            "Feature adoption gap in Growth segment",
            "Only 34% of Growth-tier customers are using the advanced analytics dashboard, despite it being a key differentiator. This segment shows 2.3x higher retention when the feature is adopted.",
            "Launch an in-app guided tour for advanced analytics. Create segment-specific email campaign highlighting use cases and ROI examples from similar companies.",
            "-2% churn rate",
            -2.0,
        ),
        insight(
            "4",
            Severity::Warning,
            "Operations",
            "Support ticket volume trending upward",
            "Support tickets have increased 28% month-over-month, with \"integration setup\" being the most common category (41% of tickets). Average first response time has increased to 4.2 hours.",
            "Create comprehensive integration documentation and video tutorials. Consider implementing a self-service integration wizard to reduce ticket volume by an estimated 35%.",
            "-35% support tickets",
            -35.0,
        ),
        insight(
            "5",
            Severity::Info,
            "Growth",
            "Viral coefficient increasing in Starter segment",
            "Starter plan customers are referring 1.4 new users per account, up from 0.8 last quarter. The referral-to-conversion rate is 23%, significantly above the 12% industry average.",
            "Double down on the referral program. Implement a tiered rewards system offering account credits for successful referrals. Consider a \"Refer 3, Get Pro\" promotion.",
            "+850 new signups/month",
            850.0,
        ),
        insight(
            "6",
            Severity::Info,
            "Market",
            "Competitor pricing shift creates opportunity",
            "Two major competitors have increased their pricing by 20-30% this quarter. Social media sentiment analysis shows growing dissatisfaction among their user base, with \"too expensive\" appearing in 34% of recent reviews.",
            "Launch a competitive migration campaign with special pricing for switchers. Create comparison landing pages highlighting value proposition and offer free data migration assistance.",
            "+2,400 potential leads",
            2_400.0,
        ),
    ]
}

fn funnel() -> Vec<FunnelStage> {
    [
        ("Visitors", 125_000, None),
        ("Signups", 8_750, Some(7.0)),
        ("Activated", 5_250, Some(60.0)),
        ("Paying", 2_100, Some(40.0)),
        ("Retained", 1_680, Some(80.0)),
    ]
    .into_iter()
    .map(|(name, count, conversion_rate)| FunnelStage {
        name: name.to_string(),
        count,
        conversion_rate,
    })
    .collect()
}

fn feature_usage() -> Vec<FeatureUsage> {
    [
        ("Dashboard Analytics", 94.0, FeatureTrend::Up, 32_449),
        ("Custom Reports", 78.0, FeatureTrend::Up, 26_926),
        ("API Integrations", 65.0, FeatureTrend::Up, 22_439),
        ("Team Collaboration", 59.0, FeatureTrend::Stable, 20_367),
        ("Automated Alerts", 52.0, FeatureTrend::Up, 17_951),
        ("Data Export", 45.0, FeatureTrend::Down, 15_534),
        ("Advanced Filters", 38.0, FeatureTrend::Up, 13_118),
        ("AI Predictions", 28.0, FeatureTrend::Up, 9_666),
    ]
    .into_iter()
    .map(|(name, adoption, trend, user_count)| FeatureUsage {
        name: name.to_string(),
        adoption,
        trend,
        user_count,
    })
    .collect()
}

fn user_metrics() -> Vec<UserMetrics> {
    [
        ("Jan", 28_100, 3_200, 890),
        ("Feb", 28_900, 3_400, 820),
        ("Mar", 29_500, 3_600, 950),
        ("Apr", 30_200, 3_500, 780),
        ("May", 30_800, 3_300, 910),
        ("Jun", 31_200, 3_450, 850),
        ("Jul", 31_900, 3_550, 880),
        ("Aug", 32_400, 3_700, 920),
        ("Sep", 33_000, 3_600, 800),
        ("Oct", 33_500, 3_450, 860),
        ("Nov", 34_000, 3_650, 910),
        ("Dec", 34_521, 3_800, 840),
    ]
    .into_iter()
    .map(|(month, active_users, new_signups, churned)| UserMetrics {
        month: month.to_string(),
        active_users,
        new_signups,
        churned,
    })
    .collect()
}

fn daily_active_users(rng: &mut StdRng) -> Vec<DailyActiveUsers> {
    (0..DAU_DAYS)
        .map(|day| {
            let jitter: f64 = rng.random();
            DailyActiveUsers {
                date: format!("Dec {}", day + 1),
                users: (28_000.0 + jitter * 7_000.0 + day as f64 * 100.0).floor() as u64,
            }
        })
        .collect()
}

fn session_metrics() -> Vec<SessionMetric> {
    [
        ("Avg Session Duration", "8m 42s", 5.2, vec![7.2, 7.5, 7.8, 8.0, 8.1, 8.3, 8.5, 8.7]),
        ("Pages per Session", "6.4", 2.8, vec![5.8, 5.9, 6.0, 6.1, 6.2, 6.3, 6.3, 6.4]),
        ("Bounce Rate", "24.3%", -1.5, vec![28.0, 27.2, 26.5, 26.0, 25.5, 25.0, 24.8, 24.3]),
        ("Return Rate", "68.7%", 3.4, vec![62.0, 63.5, 64.8, 65.5, 66.2, 67.0, 67.8, 68.7]),
    ]
    .into_iter()
    .map(|(label, value, change, sparkline)| SessionMetric {
        label: label.to_string(),
        value: value.to_string(),
        change,
        change_type: ChangeType::Positive,
        sparkline,
    })
    .collect()
}

/// Office hours are busiest, evenings moderate, nights quiet; weekends run at 40%.
fn engagement_heatmap(rng: &mut StdRng) -> Vec<EngagementCell> {
    let mut cells = Vec::with_capacity(HEATMAP_DAYS.len() * 24);
    for (day_index, day) in HEATMAP_DAYS.iter().enumerate() {
        let day_factor = if day_index < 5 { 1.0 } else { 0.4 };
        for hour in 0..24u8 {
            let base = match hour {
                9..=17 => 800.0,
                6..=21 => 400.0,
                _ => 100.0,
            };
            let jitter: f64 = rng.random();
            cells.push(EngagementCell {
                day: (*day).to_string(),
                hour,
                count: (base * day_factor * (0.7 + jitter * 0.6)).floor() as u64,
            });
        }
    }
    cells
}

fn growth_metrics() -> Vec<GrowthMetric> {
    [
        ("Net Revenue Retention", "112%", 4.2, ChangeType::Positive),
        ("Gross Margin", "78.5%", 2.1, ChangeType::Positive),
        ("LTV", "$2,847", 8.5, ChangeType::Positive),
        ("CAC", "$385", 0.3, ChangeType::Neutral),
    ]
    .into_iter()
    .map(|(label, value, change, change_type)| GrowthMetric {
        label: label.to_string(),
        value: value.to_string(),
        change,
        change_type,
    })
    .collect()
}

fn flow_node(label: &str, percent: f64, users: u64, outcome: Option<FlowOutcome>) -> FlowNode {
    FlowNode {
        label: label.to_string(),
        percent,
        users,
        outcome,
    }
}

fn user_flow() -> UserFlow {
    UserFlow {
        source: flow_node("Landing Page", 100.0, 34_521, None),
        middle: vec![
            flow_node("Dashboard", 45.0, 15_534, None),
            flow_node("Reports", 30.0, 10_356, None),
            flow_node("Settings", 15.0, 5_178, None),
            flow_node("Other", 10.0, 3_453, None),
        ],
        destinations: vec![
            flow_node("Conversion", 46.0, 15_882, Some(FlowOutcome::Positive)),
            flow_node("Drop-off", 18.0, 6_214, Some(FlowOutcome::Negative)),
        ],
        connections: vec![
            FlowConnection { from: 0, to: 0, value: 28.0 },
            FlowConnection { from: 1, to: 0, value: 18.0 },
            FlowConnection { from: 2, to: 1, value: 10.0 },
            FlowConnection { from: 3, to: 1, value: 8.0 },
        ],
    }
}

fn navigation() -> Vec<NavItem> {
    [
        ("Dashboard", "/dashboard", "LayoutDashboard", "Overview"),
        ("Analytics", "/analytics", "BarChart3", "Overview"),
        ("Revenue", "/revenue", "DollarSign", "Revenue"),
        ("Customers", "/customers", "Users", "Revenue"),
        ("Engagement", "/engagement", "Activity", "Product"),
        ("AI Insights", "/ai-insights", "Sparkles", "Product"),
    ]
    .into_iter()
    .map(|(label, href, icon, section)| NavItem {
        label: label.to_string(),
        href: href.to_string(),
        icon: icon.to_string(),
        section: section.to_string(),
    })
    .collect()
}
