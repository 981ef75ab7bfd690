use crate::dataset::{HEATMAP_DAYS, HEATMAP_HOURS};
use crate::format::format_number;
use crate::models::{EngagementCell, FeatureSortField, FeatureTrend, FeatureUsage, FunnelStage, UserMetrics};
use crate::pipeline::{by_f64, by_key, by_str, Comparator, Pipeline, SortDirection, SortState};
use serde::{Deserialize, Serialize};

pub const HEAT_BAND_CLASSES: [&str; 5] = [
    "bg-slate-100",
    "bg-indigo-100",
    "bg-indigo-300",
    "bg-indigo-500",
    "bg-indigo-700",
];
const HEAT_BAND_THRESHOLDS: [f64; 4] = [0.2, 0.4, 0.6, 0.8];
const HOUR_LABEL_STEP: u8 = 3;
pub const MIN_FUNNEL_WIDTH_PCT: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GrowthSeries {
    ActiveUsers,
    NewSignups,
    Churned,
}

/// Legend state for the user growth chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeriesVisibility {
    pub active_users: bool,
    pub new_signups: bool,
    pub churned: bool,
}

impl Default for SeriesVisibility {
    fn default() -> Self {
        Self {
            active_users: true,
            new_signups: true,
            churned: true,
        }
    }
}

impl SeriesVisibility {
    pub fn toggle(&mut self, series: GrowthSeries) {
        let flag = match series {
            GrowthSeries::ActiveUsers => &mut self.active_users,
            GrowthSeries::NewSignups => &mut self.new_signups,
            GrowthSeries::Churned => &mut self.churned,
        };
        *flag = !*flag;
    }

    pub fn is_visible(&self, series: GrowthSeries) -> bool {
        match series {
            GrowthSeries::ActiveUsers => self.active_users,
            GrowthSeries::NewSignups => self.new_signups,
            GrowthSeries::Churned => self.churned,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub sort: SortState<FeatureSortField>,
    pub series: SeriesVisibility,
}

impl Default for AnalyticsQuery {
    fn default() -> Self {
        Self {
            sort: SortState::new(FeatureSortField::Adoption, SortDirection::Desc),
            series: SeriesVisibility::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRow {
    pub name: String,
    pub adoption: f64,
    pub trend: FeatureTrend,
    pub user_count: u64,
    pub user_count_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    pub day: String,
    pub hour: u8,
    pub count: u64,
    pub ratio: f64,
    pub band: usize,
    pub class_name: &'static str,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapView {
    pub days: Vec<String>,
    pub hour_labels: Vec<u8>,
    pub min: u64,
    pub max: u64,
    pub cells: Vec<HeatmapCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelRow {
    pub name: String,
    pub count: u64,
    pub count_label: String,
    pub conversion_rate: Option<f64>,
    pub conversion_label: Option<String>,
    pub width_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub month: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_users: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_signups: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub churned: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsView {
    pub features: Vec<FeatureRow>,
    pub sort: SortState<FeatureSortField>,
    pub heatmap: HeatmapView,
    pub funnel: Vec<FunnelRow>,
    pub user_growth: Vec<GrowthPoint>,
    pub series: SeriesVisibility,
}

pub fn analytics_view(
    features: &[FeatureUsage],
    heatmap: &[EngagementCell],
    funnel: &[FunnelStage],
    user_metrics: &[UserMetrics],
    query: &AnalyticsQuery,
) -> AnalyticsView {
    AnalyticsView {
        features: sort_features(features, query.sort)
            .into_iter()
            .map(feature_row)
            .collect(),
        sort: query.sort,
        heatmap: heatmap_view(heatmap),
        funnel: funnel_view(funnel),
        user_growth: user_growth(user_metrics, query.series),
        series: query.series,
    }
}

pub fn sort_features(features: &[FeatureUsage], sort: SortState<FeatureSortField>) -> Vec<&FeatureUsage> {
    Pipeline::new()
        .sort_by(comparator(sort.field), sort.direction)
        .run(features)
}

fn comparator(field: FeatureSortField) -> Comparator<'static, FeatureUsage> {
    match field {
        FeatureSortField::Name => Box::new(by_str(feature_name)),
        FeatureSortField::Adoption => Box::new(by_f64(|feature: &FeatureUsage| feature.adoption)),
        FeatureSortField::Trend => Box::new(by_key(|feature: &FeatureUsage| feature.trend.rank())),
        FeatureSortField::UserCount => Box::new(by_key(|feature: &FeatureUsage| feature.user_count)),
    }
}

fn feature_name(feature: &FeatureUsage) -> &str {
    &feature.name
}

pub(crate) fn feature_row(feature: &FeatureUsage) -> FeatureRow {
    FeatureRow {
        name: feature.name.clone(),
        adoption: feature.adoption,
        trend: feature.trend,
        user_count: feature.user_count,
        user_count_label: format_number(feature.user_count as f64),
    }
}

/// Position of `count` between the grid minimum and maximum. A flat grid maps
/// every cell to 0.
pub fn heat_ratio(count: u64, min: u64, max: u64) -> f64 {
    if max == min {
        return 0.0;
    }
    (count as f64 - min as f64) / (max as f64 - min as f64)
}

pub fn heat_band(ratio: f64) -> usize {
    HEAT_BAND_THRESHOLDS
        .iter()
        .position(|threshold| ratio < *threshold)
        .unwrap_or(HEAT_BAND_THRESHOLDS.len())
}

pub fn heatmap_view(cells: &[EngagementCell]) -> HeatmapView {
    let grid_size = HEATMAP_DAYS.len() * usize::from(HEATMAP_HOURS);
    let mut slots = Vec::with_capacity(grid_size);
    for day in HEATMAP_DAYS {
        for hour in 0..HEATMAP_HOURS {
            let count = match cells.iter().find(|cell| cell.day == day && cell.hour == hour) {
                Some(cell) => cell.count,
                None => {
                    if !cells.is_empty() {
                        tracing::warn!(day, hour, "heatmap cell missing, rendering as zero");
                    }
                    0
                }
            };
            slots.push((day, hour, count));
        }
    }

    // The range covers the counts as rendered, so every ratio stays within 0..=1.
    let min = slots.iter().map(|(_, _, count)| *count).min().unwrap_or(0);
    let max = slots.iter().map(|(_, _, count)| *count).max().unwrap_or(0);

    let grid = slots
        .into_iter()
        .map(|(day, hour, count)| {
            let ratio = heat_ratio(count, min, max);
            let band = heat_band(ratio);
            HeatmapCell {
                day: day.to_string(),
                hour,
                count,
                ratio,
                band,
                class_name: HEAT_BAND_CLASSES[band],
                tooltip: format!("{} {}:00 - {} sessions", day, hour, format_number(count as f64)),
            }
        })
        .collect();

    HeatmapView {
        days: HEATMAP_DAYS.iter().map(|day| day.to_string()).collect(),
        hour_labels: (0..HEATMAP_HOURS).filter(|hour| hour % HOUR_LABEL_STEP == 0).collect(),
        min,
        max,
        cells: grid,
    }
}

/// Bars are sized against the first stage, never narrower than the minimum width.
pub fn funnel_view(stages: &[FunnelStage]) -> Vec<FunnelRow> {
    let top = stages.first().map(|stage| stage.count).unwrap_or(1).max(1) as f64;
    stages
        .iter()
        .map(|stage| FunnelRow {
            name: stage.name.clone(),
            count: stage.count,
            count_label: format_number(stage.count as f64),
            conversion_rate: stage.conversion_rate,
            conversion_label: stage.conversion_rate.map(|rate| format!("{}% conversion", rate)),
            width_pct: (stage.count as f64 / top * 100.0).max(MIN_FUNNEL_WIDTH_PCT),
        })
        .collect()
}

pub fn user_growth(metrics: &[UserMetrics], series: SeriesVisibility) -> Vec<GrowthPoint> {
    metrics
        .iter()
        .map(|point| GrowthPoint {
            month: point.month.clone(),
            active_users: series.active_users.then_some(point.active_users),
            new_signups: series.new_signups.then_some(point.new_signups),
            churned: series.churned.then_some(point.churned),
        })
        .collect()
}
