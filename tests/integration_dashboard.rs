use chrono::NaiveDate;
use insightflow_lib::engines::analytics::AnalyticsQuery;
use insightflow_lib::engines::customers::{toggle_expanded, CustomerQuery};
use insightflow_lib::models::{CustomerSortField, FeatureSortField, HealthFilter, PlanFilter, SeverityFilter};
use insightflow_lib::pipeline::{SortDirection, SortState};
use insightflow_lib::{AppError, AppSettings, DashboardCore, Dataset};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from("tests/fixtures").join(name)
}

fn fixture_core() -> DashboardCore {
    let dataset = Dataset::load(&fixture("small-dataset.yaml")).expect("load fixture dataset");
    DashboardCore::new(dataset, AppSettings::default())
}

#[test]
fn fixture_dataset_loads_and_validates() {
    let core = fixture_core();
    assert_eq!(core.dataset().customers().len(), 3);
    assert_eq!(core.dataset().monthly_revenue().len(), 3);
    assert_eq!(core.dataset().engagement_heatmap().len(), 168);
    assert!(core.dataset().user_flow().is_none());
}

#[test]
fn missing_and_unsupported_dataset_files_are_reported() {
    let missing = Dataset::load(&fixture("does-not-exist.yaml"));
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("dataset.toml");
    std::fs::write(&path, "customers = []").expect("write dataset");
    let unsupported = Dataset::load(&path).expect_err("toml is not supported");
    assert!(unsupported.to_string().starts_with("CONFIG_INVALID"));

    let broken = dir.path().join("dataset.json");
    std::fs::write(&broken, r#"{"customers": [{"id": "x"}]}"#).expect("write dataset");
    assert!(matches!(Dataset::load(&broken), Err(AppError::InvalidData(_))));

    let no_heatmap = dir.path().join("no-heatmap.yaml");
    std::fs::write(&no_heatmap, "customers: []\n").expect("write dataset");
    let err = Dataset::load(&no_heatmap).expect_err("missing heatmap rejected");
    assert!(matches!(err, AppError::InvalidData(_)));
    assert!(err.to_string().contains("complete grid"));
}

#[test]
fn fixture_heatmap_spans_full_range() {
    let core = fixture_core();
    let heatmap = core.analytics(&AnalyticsQuery::default()).heatmap;
    assert_eq!(heatmap.cells.len(), 168);
    assert_eq!(heatmap.min, 0);
    assert_eq!(heatmap.max, 623);
    assert_eq!(heatmap.cells[0].band, 0);
    assert_eq!(heatmap.cells[167].band, 4);
    assert_eq!(heatmap.cells[167].tooltip, "Sun 23:00 - 623 sessions");
}

#[test]
fn customer_search_filters_and_sorts() {
    let core = fixture_core();
    let query = CustomerQuery {
        search: "ALPHA".to_string(),
        sort: SortState::new(CustomerSortField::Name, SortDirection::Asc),
        ..core.customer_query()
    };
    let view = core.customers(&query);
    let names: Vec<&str> = view.page.items.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha Labs", "alphabet soup"]);
    assert_eq!(view.showing_label, "Showing 1-2 of 2 customers");
    assert!(view.empty_message.is_none());

    let spaced = core.customers(&CustomerQuery {
        search: "alpha ".to_string(),
        ..core.customer_query()
    });
    let names: Vec<&str> = spaced.page.items.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha Labs"]);

    let at_risk = core.customers(&CustomerQuery {
        health: HealthFilter::AtRisk,
        ..core.customer_query()
    });
    let names: Vec<&str> = at_risk.page.items.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["Beta Works"]);

    let none = core.customers(&CustomerQuery {
        search: "alpha".to_string(),
        plan: PlanFilter::Starter,
        ..core.customer_query()
    });
    assert!(none.page.items.is_empty());
    assert_eq!(none.empty_message, Some("No customers match your filters."));
    assert_eq!(none.showing_label, "Showing 0-0 of 0 customers");
}

#[test]
fn customer_rows_expand_and_page() {
    let core = fixture_core();
    let expanded = toggle_expanded(None, "c3");
    let view = core.customers(&CustomerQuery {
        expanded_id: expanded.clone(),
        page_size: 2,
        ..core.customer_query()
    });
    assert_eq!(view.page.page_count, 2);
    assert_eq!(view.page.items[0].name, "Alpha Labs");
    assert_eq!(view.page.items[1].name, "alphabet soup");
    assert!(view.page.items[1].expanded);
    assert!(!view.page.items[1].striped);
    assert_eq!(toggle_expanded(expanded.as_deref(), "c3"), None);

    let beyond = core.customers(&CustomerQuery {
        page_index: 5,
        ..core.customer_query()
    });
    assert!(beyond.page.items.is_empty());
    assert_eq!(beyond.page.total, 3);
}

#[test]
fn revenue_fold_uses_configured_initial_mrr() {
    let core = fixture_core();
    let view = core.revenue();
    let endings: Vec<f64> = view.rows.iter().map(|row| row.ending_mrr).collect();
    assert_eq!(endings, vec![608_000.0, 606_000.0, 614_000.0]);
    assert_eq!(view.totals.net_new, 14_000.0);
    assert_eq!(view.totals.ending_mrr, 614_000.0);
    assert!(!view.row_labels[1].net_new_positive);

    core.update_settings(serde_json::json!({ "initialMrr": 0 }))
        .expect("update settings");
    assert_eq!(core.revenue().totals.ending_mrr, 14_000.0);
}

#[test]
fn overview_and_insights_summaries() {
    let core = fixture_core();
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).expect("date");
    let overview = core.overview_on(today);
    assert_eq!(overview.today_label, "Monday, October 19, 2026");
    assert_eq!(overview.best_month.map(|best| best.month), Some("Feb".to_string()));
    assert_eq!(overview.avg_monthly_growth, 4.0);
    assert_eq!(overview.top_customers.len(), 3);
    assert_eq!(overview.top_insights.len(), 2);

    let insights = core.insights(SeverityFilter::All);
    assert_eq!(insights.total_impact, 1_500.0);
    assert_eq!(insights.total_impact_label, "$1.5K");
    assert_eq!(insights.critical_count, 0);

    let critical = core.insights(SeverityFilter::Critical);
    assert!(critical.insights.is_empty());
    assert!(critical.empty_message.is_some());
}

#[test]
fn builtin_core_end_to_end() {
    let core = DashboardCore::builtin(AppSettings::default());

    let revenue = core.revenue();
    assert_eq!(revenue.rows[0].ending_mrr, 647_000.0);
    assert_eq!(revenue.rows[1].starting_mrr, 647_000.0);
    assert_eq!(core.insights(SeverityFilter::All).total_impact, 21_450.0);

    let analytics = core.analytics(&AnalyticsQuery {
        sort: SortState::new(FeatureSortField::Name, SortDirection::Asc),
        ..AnalyticsQuery::default()
    });
    assert_eq!(analytics.features[0].name, "Advanced Filters");
    assert_eq!(analytics.heatmap.cells.len(), 168);
    assert!(analytics.heatmap.cells.iter().all(|cell| cell.band <= 4));

    let engagement = core.engagement();
    assert_eq!(engagement.daily_active_users.len(), 30);

    let navigation = core.navigation("/engagement", None);
    assert_eq!(navigation.title, "Engagement");
}

#[test]
fn views_serialize_in_camel_case() {
    let core = DashboardCore::builtin(AppSettings::default());
    let json = serde_json::to_value(core.revenue()).expect("serialize revenue");
    assert!(json["rows"][0].get("startingMRR").is_some());
    assert!(json["totals"].get("netNew").is_some());

    let json = serde_json::to_value(core.customers(&core.customer_query())).expect("serialize customers");
    assert!(json["page"].get("pageCount").is_some());
    assert_eq!(json["sort"]["field"], "mrr");
}

#[test]
fn settings_file_drives_core() {
    let dir = tempfile::tempdir().expect("temp dir");
    let settings_path = dir.path().join("settings.json");
    std::fs::write(&settings_path, r#"{"pageSize": 3, "topInsightCount": 1}"#).expect("write settings");

    let core = DashboardCore::open(&settings_path, Some(&fixture("small-dataset.yaml"))).expect("open core");
    assert_eq!(core.settings().page_size, 3);
    let today = NaiveDate::from_ymd_opt(2026, 1, 1).expect("date");
    assert_eq!(core.overview_on(today).top_insights.len(), 1);

    let builtin = DashboardCore::open(&dir.path().join("absent.yaml"), None).expect("defaults");
    assert_eq!(builtin.settings(), AppSettings::default());
    assert_eq!(builtin.dataset().customers().len(), 10);
}
