use crate::engines::analytics::{feature_row, sort_features, FeatureRow};
use crate::format::{format_change, format_number};
use crate::models::{
    ChangeType, DailyActiveUsers, FeatureSortField, FeatureUsage, FlowConnection, FlowNode, FlowOutcome,
    SessionMetric, UserFlow,
};
use crate::pipeline::{SortDirection, SortState};
use serde::Serialize;

/// Every fifth DAU date gets an axis tick.
const DAU_TICK_INTERVAL: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DauPoint {
    pub date: String,
    pub users: u64,
    pub users_label: String,
    pub tick: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCard {
    pub label: String,
    pub value: String,
    pub change_label: String,
    pub change_type: ChangeType,
    pub sparkline: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNodeView {
    pub label: String,
    pub percent_label: String,
    pub users_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<FlowOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFlowView {
    pub source: FlowNodeView,
    pub middle: Vec<FlowNodeView>,
    pub destinations: Vec<FlowNodeView>,
    pub connections: Vec<FlowConnection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementView {
    pub daily_active_users: Vec<DauPoint>,
    pub peak_daily_users: Option<u64>,
    pub sessions: Vec<SessionCard>,
    pub features: Vec<FeatureRow>,
    pub user_flow: Option<UserFlowView>,
}

pub fn engagement_view(
    daily_active_users: &[DailyActiveUsers],
    sessions: &[SessionMetric],
    features: &[FeatureUsage],
    user_flow: Option<&UserFlow>,
) -> EngagementView {
    let by_adoption = SortState::new(FeatureSortField::Adoption, SortDirection::Desc);

    EngagementView {
        daily_active_users: daily_active_users
            .iter()
            .enumerate()
            .map(|(index, day)| DauPoint {
                date: day.date.clone(),
                users: day.users,
                users_label: format_number(day.users as f64),
                tick: index % DAU_TICK_INTERVAL == 0,
            })
            .collect(),
        peak_daily_users: daily_active_users.iter().map(|day| day.users).max(),
        sessions: sessions.iter().map(session_card).collect(),
        features: sort_features(features, by_adoption)
            .into_iter()
            .map(feature_row)
            .collect(),
        user_flow: user_flow.map(flow_view),
    }
}

fn session_card(metric: &SessionMetric) -> SessionCard {
    SessionCard {
        label: metric.label.clone(),
        value: metric.value.clone(),
        change_label: format_change(metric.change),
        change_type: metric.change_type,
        sparkline: metric.sparkline.clone(),
    }
}

fn flow_view(flow: &UserFlow) -> UserFlowView {
    UserFlowView {
        source: node_view(&flow.source),
        middle: flow.middle.iter().map(node_view).collect(),
        destinations: flow.destinations.iter().map(node_view).collect(),
        connections: flow.connections.clone(),
    }
}

fn node_view(node: &FlowNode) -> FlowNodeView {
    FlowNodeView {
        label: node.label.clone(),
        percent_label: format!("{}%", node.percent),
        users_label: format!("{} users", format_number(node.users as f64)),
        outcome: node.outcome,
    }
}
