use crate::format::class_names;
use crate::models::{DateRange, NavItem};
use serde::Serialize;

pub const DEFAULT_PAGE_TITLE: &str = "Dashboard";

const LINK_BASE_CLASS: &str = "flex items-center gap-3 px-3 py-2.5 rounded-lg text-sm font-medium";
const LINK_ACTIVE_CLASS: &str = "bg-white/10 text-white border-indigo-500";
const LINK_IDLE_CLASS: &str = "text-slate-400 hover:bg-white/5 border-transparent";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub label: String,
    pub href: String,
    pub icon: String,
    pub active: bool,
    pub class_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavSection {
    pub title: String,
    pub items: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeOption {
    pub value: DateRange,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationView {
    pub title: String,
    pub sections: Vec<NavSection>,
    pub date_ranges: Vec<DateRangeOption>,
}

/// Sections appear in the order their first item appears; items keep dataset order.
pub fn group_by_section(items: &[NavItem], current_path: &str) -> Vec<NavSection> {
    let mut sections: Vec<NavSection> = Vec::new();
    for item in items {
        let active = item.href == current_path;
        let link = NavLink {
            label: item.label.clone(),
            href: item.href.clone(),
            icon: item.icon.clone(),
            active,
            class_name: class_names([
                Some(LINK_BASE_CLASS),
                active.then_some(LINK_ACTIVE_CLASS),
                (!active).then_some(LINK_IDLE_CLASS),
            ]),
        };
        match sections.iter_mut().find(|section| section.title == item.section) {
            Some(section) => section.items.push(link),
            None => sections.push(NavSection {
                title: item.section.clone(),
                items: vec![link],
            }),
        }
    }
    sections
}

pub fn page_title<'a>(items: &'a [NavItem], path: &str) -> &'a str {
    items
        .iter()
        .find(|item| item.href == path)
        .map(|item| item.label.as_str())
        .unwrap_or(DEFAULT_PAGE_TITLE)
}

pub fn date_range_options(selected: DateRange) -> Vec<DateRangeOption> {
    DateRange::ALL
        .into_iter()
        .map(|range| DateRangeOption {
            value: range,
            label: range.label(),
            active: range == selected,
        })
        .collect()
}

pub fn navigation_view(items: &[NavItem], path: &str, range: DateRange) -> NavigationView {
    NavigationView {
        title: page_title(items, path).to_string(),
        sections: group_by_section(items, path),
        date_ranges: date_range_options(range),
    }
}
