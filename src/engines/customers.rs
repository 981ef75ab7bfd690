use crate::format::{format_currency, format_number};
use crate::models::{
    Customer, CustomerSegment, CustomerSortField, HealthCategory, HealthFilter, Plan, PlanFilter,
};
use crate::pipeline::{
    by_f64, by_key, by_str, contains_ignore_case, window, Comparator, Page, Pipeline, SortDirection, SortState,
};
use serde::{Deserialize, Serialize};

pub const EMPTY_MESSAGE: &str = "No customers match your filters.";
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerQuery {
    pub search: String,
    pub plan: PlanFilter,
    pub health: HealthFilter,
    pub sort: SortState<CustomerSortField>,
    pub page_index: usize,
    pub page_size: usize,
    pub expanded_id: Option<String>,
}

impl Default for CustomerQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            plan: PlanFilter::All,
            health: HealthFilter::All,
            sort: SortState::new(CustomerSortField::Mrr, SortDirection::Desc),
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            expanded_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentCard {
    pub plan: Plan,
    pub percentage: f64,
    pub customer_count: u32,
    pub customer_count_label: String,
    pub mrr: f64,
    pub mrr_label: String,
    pub avg_health_score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub plan: Plan,
    pub plan_badge: &'static str,
    pub mrr: f64,
    pub mrr_label: String,
    pub users: u32,
    pub users_label: String,
    pub health_score: u8,
    pub health_category: HealthCategory,
    pub health_color: &'static str,
    pub last_active: String,
    pub trend: Vec<f64>,
    pub expanded: bool,
    pub striped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomersView {
    pub segments: Vec<SegmentCard>,
    pub page: Page<CustomerRow>,
    pub sort: SortState<CustomerSortField>,
    pub showing_label: String,
    pub empty_message: Option<&'static str>,
}

/// Filters and sorts in page order: search, plan, health, then the column sort.
pub fn filter_customers<'c>(customers: &'c [Customer], query: &CustomerQuery) -> Vec<&'c Customer> {
    // Blank input disables the filter; otherwise the raw text is matched.
    let searching = !query.search.trim().is_empty();
    let needle = query.search.clone();
    let plan = query.plan;
    let health = query.health;

    Pipeline::new()
        .filter_if(searching, move |customer: &Customer| contains_ignore_case(&customer.name, &needle))
        .filter_if(plan != PlanFilter::All, move |customer: &Customer| plan.matches(customer.plan))
        .filter_if(health != HealthFilter::All, move |customer: &Customer| {
            health.matches(customer.health_category())
        })
        .sort_by(comparator(query.sort.field), query.sort.direction)
        .run(customers)
}

pub fn customers_view(
    customers: &[Customer],
    segments: &[CustomerSegment],
    query: &CustomerQuery,
) -> CustomersView {
    let matched = filter_customers(customers, query);
    let page = window(matched, query.page_index, query.page_size);

    let rows = page
        .items
        .iter()
        .enumerate()
        .map(|(index, customer)| {
            let expanded = query.expanded_id.as_deref() == Some(customer.id.as_str());
            customer_row(customer, expanded, index % 2 == 1 && !expanded)
        })
        .collect::<Vec<_>>();

    let showing_label = format!(
        "Showing {}-{} of {} customers",
        page.range_start, page.range_end, page.total
    );
    let empty_message = rows.is_empty().then_some(EMPTY_MESSAGE);

    CustomersView {
        segments: segments.iter().map(segment_card).collect(),
        page: Page {
            items: rows,
            page_index: page.page_index,
            page_size: page.page_size,
            page_count: page.page_count,
            total: page.total,
            range_start: page.range_start,
            range_end: page.range_end,
        },
        sort: query.sort,
        showing_label,
        empty_message,
    }
}

/// Clicking the expanded row collapses it; clicking any other row expands that one.
pub fn toggle_expanded(current: Option<&str>, id: &str) -> Option<String> {
    if current == Some(id) {
        None
    } else {
        Some(id.to_string())
    }
}

fn comparator(field: CustomerSortField) -> Comparator<'static, Customer> {
    match field {
        CustomerSortField::Name => Box::new(by_str(customer_name)),
        CustomerSortField::Plan => Box::new(by_key(|customer: &Customer| customer.plan.rank())),
        CustomerSortField::Mrr => Box::new(by_f64(|customer: &Customer| customer.mrr)),
        CustomerSortField::Users => Box::new(by_key(|customer: &Customer| customer.users)),
        CustomerSortField::HealthScore => Box::new(by_key(|customer: &Customer| customer.health_score)),
        CustomerSortField::LastActive => Box::new(by_str(customer_last_active)),
    }
}

fn customer_name(customer: &Customer) -> &str {
    &customer.name
}

fn customer_last_active(customer: &Customer) -> &str {
    &customer.last_active
}

fn customer_row(customer: &Customer, expanded: bool, striped: bool) -> CustomerRow {
    let category = customer.health_category();
    CustomerRow {
        id: customer.id.clone(),
        name: customer.name.clone(),
        plan: customer.plan,
        plan_badge: customer.plan.badge_variant(),
        mrr: customer.mrr,
        mrr_label: format_currency(customer.mrr),
        users: customer.users,
        users_label: format_number(f64::from(customer.users)),
        health_score: customer.health_score,
        health_category: category,
        health_color: category.color(),
        last_active: customer.last_active.clone(),
        trend: customer.trend.clone(),
        expanded,
        striped,
    }
}

fn segment_card(segment: &CustomerSegment) -> SegmentCard {
    SegmentCard {
        plan: segment.name,
        percentage: segment.percentage,
        customer_count: segment.customer_count,
        customer_count_label: format_number(f64::from(segment.customer_count)),
        mrr: segment.mrr,
        mrr_label: format_currency(segment.mrr),
        avg_health_score: segment.avg_health_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn names(customers: &[&Customer]) -> Vec<String> {
        customers.iter().map(|customer| customer.name.clone()).collect()
    }

    #[test]
    fn health_boundaries() {
        assert_eq!(HealthCategory::from_score(71), HealthCategory::Healthy);
        assert_eq!(HealthCategory::from_score(70), HealthCategory::AtRisk);
        assert_eq!(HealthCategory::from_score(40), HealthCategory::AtRisk);
        assert_eq!(HealthCategory::from_score(39), HealthCategory::Critical);
    }

    #[test]
    fn default_query_sorts_by_mrr_descending() {
        let dataset = Dataset::builtin(1);
        let out = filter_customers(dataset.customers(), &CustomerQuery::default());
        assert_eq!(out.len(), 10);
        assert!(out.windows(2).all(|pair| pair[0].mrr >= pair[1].mrr));
        assert_eq!(out[0].name, "Acme Corporation");
    }

    #[test]
    fn search_is_case_insensitive_and_complete() {
        let dataset = Dataset::builtin(1);
        let query = CustomerQuery {
            search: "CORP".to_string(),
            ..CustomerQuery::default()
        };
        let out = filter_customers(dataset.customers(), &query);
        assert_eq!(names(&out), vec!["Acme Corporation", "Umbrella Corp"]);
        for customer in dataset.customers() {
            let listed = out.iter().any(|found| found.id == customer.id);
            assert_eq!(listed, customer.name.to_lowercase().contains("corp"));
        }
    }

    #[test]
    fn search_keeps_surrounding_whitespace() {
        let dataset = Dataset::builtin(1);
        let trailing = CustomerQuery {
            search: "corp ".to_string(),
            ..CustomerQuery::default()
        };
        assert!(filter_customers(dataset.customers(), &trailing).is_empty());

        let inner = CustomerQuery {
            search: "Pied P".to_string(),
            ..CustomerQuery::default()
        };
        assert_eq!(names(&filter_customers(dataset.customers(), &inner)), vec!["Pied Piper"]);

        let blank = CustomerQuery {
            search: "   ".to_string(),
            ..CustomerQuery::default()
        };
        assert_eq!(filter_customers(dataset.customers(), &blank).len(), 10);
    }

    #[test]
    fn plan_and_health_filters_compose() {
        let dataset = Dataset::builtin(1);
        let query = CustomerQuery {
            plan: PlanFilter::Growth,
            health: HealthFilter::AtRisk,
            ..CustomerQuery::default()
        };
        let out = filter_customers(dataset.customers(), &query);
        assert_eq!(names(&out), vec!["Wayne Systems", "Osborn Tech"]);

        let critical = CustomerQuery {
            health: HealthFilter::Critical,
            ..CustomerQuery::default()
        };
        assert_eq!(names(&filter_customers(dataset.customers(), &critical)), vec!["Hooli Inc"]);
    }

    #[test]
    fn plan_sort_uses_rank_and_keeps_dataset_order_for_ties() {
        let dataset = Dataset::builtin(1);
        let query = CustomerQuery {
            sort: SortState::new(CustomerSortField::Plan, SortDirection::Asc),
            ..CustomerQuery::default()
        };
        let out = filter_customers(dataset.customers(), &query);
        assert_eq!(out[0].name, "Pied Piper");
        assert_eq!(out[3].plan, Plan::Growth);
        assert_eq!(out[9].name, "Initech Solutions");
    }

    #[test]
    fn reversing_direction_reverses_untied_keys() {
        let dataset = Dataset::builtin(1);
        let asc = CustomerQuery {
            sort: SortState::new(CustomerSortField::Name, SortDirection::Asc),
            ..CustomerQuery::default()
        };
        let desc = CustomerQuery {
            sort: SortState::new(CustomerSortField::Name, SortDirection::Desc),
            ..CustomerQuery::default()
        };
        let mut forward = names(&filter_customers(dataset.customers(), &asc));
        let backward = names(&filter_customers(dataset.customers(), &desc));
        assert_eq!(forward[0], "Acme Corporation");
        forward.reverse();
        assert_eq!(forward, backward);

        let again = names(&filter_customers(dataset.customers(), &desc));
        assert_eq!(again, backward);
    }

    #[test]
    fn every_field_and_direction_orders_adjacent_rows() {
        let dataset = Dataset::builtin(1);
        let position = |customer: &Customer| {
            dataset
                .customers()
                .iter()
                .position(|candidate| candidate.id == customer.id)
        };
        let cases: [(CustomerSortField, fn(&Customer, &Customer) -> std::cmp::Ordering); 6] = [
            (CustomerSortField::Name, |a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
            (CustomerSortField::Plan, |a, b| a.plan.rank().cmp(&b.plan.rank())),
            (CustomerSortField::Mrr, |a, b| a.mrr.total_cmp(&b.mrr)),
            (CustomerSortField::Users, |a, b| a.users.cmp(&b.users)),
            (CustomerSortField::HealthScore, |a, b| a.health_score.cmp(&b.health_score)),
            (CustomerSortField::LastActive, |a, b| a.last_active.cmp(&b.last_active)),
        ];

        for (field, expected) in cases {
            for direction in [SortDirection::Asc, SortDirection::Desc] {
                let query = CustomerQuery {
                    sort: SortState::new(field, direction),
                    ..CustomerQuery::default()
                };
                let out = filter_customers(dataset.customers(), &query);
                assert_eq!(out.len(), 10, "{:?} {:?}", field, direction);
                for pair in out.windows(2) {
                    let ordering = direction.apply(expected(pair[0], pair[1]));
                    assert_ne!(ordering, std::cmp::Ordering::Greater, "{:?} {:?}", field, direction);
                    if ordering == std::cmp::Ordering::Equal {
                        assert!(position(pair[0]) < position(pair[1]), "ties keep dataset order");
                    }
                }
            }
        }
    }

    #[test]
    fn last_active_sorts_lexicographically() {
        let dataset = Dataset::builtin(1);
        let query = CustomerQuery {
            sort: SortState::new(CustomerSortField::LastActive, SortDirection::Asc),
            ..CustomerQuery::default()
        };
        let out = filter_customers(dataset.customers(), &query);
        let actives = out.iter().map(|customer| customer.last_active.as_str()).collect::<Vec<_>>();
        assert_eq!(actives[0], "12h ago");
        assert_eq!(actives[1], "15m ago");
    }

    #[test]
    fn unmatched_search_renders_empty_state() {
        let dataset = Dataset::builtin(1);
        let query = CustomerQuery {
            search: "zzz-no-such-company".to_string(),
            ..CustomerQuery::default()
        };
        let view = customers_view(dataset.customers(), dataset.customer_segments(), &query);
        assert!(view.page.is_empty());
        assert_eq!(view.empty_message, Some(EMPTY_MESSAGE));
        assert_eq!(view.showing_label, "Showing 0-0 of 0 customers");
    }

    #[test]
    fn view_formats_rows_and_marks_expanded() {
        let dataset = Dataset::builtin(1);
        let query = CustomerQuery {
            expanded_id: Some("2".to_string()),
            ..CustomerQuery::default()
        };
        let view = customers_view(dataset.customers(), dataset.customer_segments(), &query);
        assert_eq!(view.showing_label, "Showing 1-10 of 10 customers");
        assert_eq!(view.segments.len(), 3);
        assert_eq!(view.segments[2].customer_count_label, "312");

        let acme = &view.page.items[0];
        assert_eq!(acme.mrr_label, "$52,000");
        assert_eq!(acme.plan_badge, "enterprise");
        assert_eq!(acme.health_color, "emerald");
        assert!(!acme.striped);

        let globex = &view.page.items[1];
        assert!(globex.expanded);
        assert!(!globex.striped);
        assert!(view.page.items[3].striped);
    }

    #[test]
    fn paging_past_the_end_is_empty() {
        let dataset = Dataset::builtin(1);
        let query = CustomerQuery {
            page_index: 1,
            ..CustomerQuery::default()
        };
        let view = customers_view(dataset.customers(), dataset.customer_segments(), &query);
        assert!(view.page.is_empty());
        assert_eq!(view.page.total, 10);
    }

    #[test]
    fn toggling_rows() {
        assert_eq!(toggle_expanded(None, "3"), Some("3".to_string()));
        assert_eq!(toggle_expanded(Some("3"), "3"), None);
        assert_eq!(toggle_expanded(Some("3"), "4"), Some("4".to_string()));
    }
}
