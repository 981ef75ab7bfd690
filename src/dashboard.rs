use crate::animation::AnimatedCounter;
use crate::dataset::Dataset;
use crate::engines::analytics::{analytics_view, AnalyticsQuery, AnalyticsView};
use crate::engines::customers::{customers_view, CustomerQuery, CustomersView};
use crate::engines::engagement::{engagement_view, EngagementView};
use crate::engines::insights::{insights_view, InsightsView};
use crate::engines::overview::{overview_view, OverviewLimits, OverviewView};
use crate::engines::revenue::{revenue_view, RevenueView};
use crate::errors::AppResult;
use crate::models::{AppSettings, DateRange, SeverityFilter};
use crate::navigation::{navigation_view, NavigationView};
use crate::settings::{load_settings, merge_settings};
use chrono::NaiveDate;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

/// Entry point for a host UI: owns the dataset and the current settings and hands
/// out one view model per page. Cheap to clone; clones share both.
#[derive(Clone)]
pub struct DashboardCore {
    dataset: Arc<Dataset>,
    settings: Arc<RwLock<AppSettings>>,
}

impl DashboardCore {
    pub fn new(dataset: Dataset, settings: AppSettings) -> Self {
        Self {
            dataset: Arc::new(dataset),
            settings: Arc::new(RwLock::new(settings)),
        }
    }

    pub fn builtin(settings: AppSettings) -> Self {
        let dataset = Dataset::builtin(settings.random_seed);
        Self::new(dataset, settings)
    }

    /// Loads settings from `settings_path` (defaults when the file is missing) and the
    /// dataset from `dataset_path`, falling back to the built-in dataset.
    pub fn open(settings_path: &Path, dataset_path: Option<&Path>) -> AppResult<Self> {
        let settings = load_settings(settings_path)?;
        let dataset = match dataset_path {
            Some(path) => Dataset::load(path)?,
            None => Dataset::builtin(settings.random_seed),
        };
        tracing::info!(
            settings = %settings_path.display(),
            customers = dataset.customers().len(),
            "dashboard core ready"
        );
        Ok(Self::new(dataset, settings))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn settings(&self) -> AppSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn update_settings(&self, update: serde_json::Value) -> AppResult<AppSettings> {
        let mut guard = self.settings.write().unwrap_or_else(PoisonError::into_inner);
        let updated = merge_settings(&guard, update)?;
        *guard = updated.clone();
        tracing::info!(page_size = updated.page_size, initial_mrr = updated.initial_mrr, "settings updated");
        Ok(updated)
    }

    pub fn overview(&self) -> OverviewView {
        self.overview_on(chrono::Local::now().date_naive())
    }

    pub fn overview_on(&self, today: NaiveDate) -> OverviewView {
        let settings = self.settings();
        let limits = OverviewLimits {
            top_customers: settings.top_customer_count,
            top_insights: settings.top_insight_count,
        };
        overview_view(
            self.dataset.kpi_metrics(),
            self.dataset.monthly_revenue(),
            self.dataset.customers(),
            self.dataset.ai_insights(),
            limits,
            today,
        )
    }

    /// Default customer query with the configured page size.
    pub fn customer_query(&self) -> CustomerQuery {
        CustomerQuery {
            page_size: self.settings().page_size,
            ..CustomerQuery::default()
        }
    }

    pub fn customers(&self, query: &CustomerQuery) -> CustomersView {
        let view = customers_view(self.dataset.customers(), self.dataset.customer_segments(), query);
        tracing::debug!(
            matched = view.page.total,
            page = view.page.page_index,
            search = %query.search,
            "customer view computed"
        );
        view
    }

    pub fn analytics(&self, query: &AnalyticsQuery) -> AnalyticsView {
        analytics_view(
            self.dataset.feature_usage(),
            self.dataset.engagement_heatmap(),
            self.dataset.funnel(),
            self.dataset.user_metrics(),
            query,
        )
    }

    pub fn revenue(&self) -> RevenueView {
        let initial_mrr = self.settings().initial_mrr;
        let view = revenue_view(
            self.dataset.monthly_revenue(),
            self.dataset.customer_segments(),
            self.dataset.growth_metrics(),
            initial_mrr,
        );
        tracing::debug!(initial_mrr, ending_mrr = view.totals.ending_mrr, "revenue view computed");
        view
    }

    pub fn engagement(&self) -> EngagementView {
        engagement_view(
            self.dataset.daily_active_users(),
            self.dataset.session_metrics(),
            self.dataset.feature_usage(),
            self.dataset.user_flow(),
        )
    }

    pub fn insights(&self, filter: SeverityFilter) -> InsightsView {
        insights_view(self.dataset.ai_insights(), filter)
    }

    /// Sidebar and top bar for `path`; `range` defaults to the configured date range.
    pub fn navigation(&self, path: &str, range: Option<DateRange>) -> NavigationView {
        let range = range.unwrap_or(self.settings().default_date_range);
        navigation_view(self.dataset.navigation(), path, range)
    }

    pub fn counter(&self, target: f64) -> AnimatedCounter {
        AnimatedCounter::new(target, Duration::from_millis(self.settings().counter_duration_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_settings() {
        let core = DashboardCore::builtin(AppSettings::default());
        let clone = core.clone();
        clone
            .update_settings(serde_json::json!({ "initialMrr": 500000 }))
            .expect("update");
        assert_eq!(core.settings().initial_mrr, 500_000.0);
        assert_eq!(core.revenue().rows[0].starting_mrr, 500_000.0);
    }

    #[test]
    fn rejected_update_keeps_previous_settings() {
        let core = DashboardCore::builtin(AppSettings::default());
        assert!(core.update_settings(serde_json::json!({ "pageSize": 0 })).is_err());
        assert_eq!(core.settings().page_size, 10);
    }

    #[test]
    fn settings_drive_views() {
        let settings = AppSettings {
            page_size: 4,
            top_customer_count: 2,
            counter_duration_ms: 0,
            ..AppSettings::default()
        };
        let core = DashboardCore::builtin(settings);
        let view = core.customers(&core.customer_query());
        assert_eq!(view.page.items.len(), 4);
        assert_eq!(view.page.page_count, 3);

        let today = NaiveDate::from_ymd_opt(2026, 10, 19).expect("date");
        assert_eq!(core.overview_on(today).top_customers.len(), 2);
        assert!(core.counter(10.0).is_finished(Duration::ZERO));
        assert_eq!(core.navigation("/", None).date_ranges[1].label, "30D");
    }
}
