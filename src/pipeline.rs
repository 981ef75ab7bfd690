use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Column sort selection. Clicking the active column flips the direction,
/// clicking another column selects it in descending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + PartialEq> SortState<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn toggle(&mut self, field: F) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Desc;
        }
    }

    pub fn toggled(mut self, field: F) -> Self {
        self.toggle(field);
        self
    }

    /// Direction arrow to show on a column header, if that column is active.
    pub fn indicator(&self, field: F) -> Option<SortDirection> {
        (self.field == field).then_some(self.direction)
    }
}

pub type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + 'a>;
pub type Comparator<'a, T> = Box<dyn Fn(&T, &T) -> Ordering + 'a>;

/// Ordered predicates followed by an optional stable sort. Running it never
/// touches the source slice.
pub struct Pipeline<'a, T> {
    filters: Vec<Predicate<'a, T>>,
    comparator: Option<Comparator<'a, T>>,
}

impl<'a, T> Default for Pipeline<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> Pipeline<'a, T> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            comparator: None,
        }
    }

    pub fn filter(mut self, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        self.filters.push(Box::new(predicate));
        self
    }

    pub fn filter_if(self, enabled: bool, predicate: impl Fn(&T) -> bool + 'a) -> Self {
        if enabled {
            self.filter(predicate)
        } else {
            self
        }
    }

    pub fn sort_by(
        mut self,
        comparator: impl Fn(&T, &T) -> Ordering + 'a,
        direction: SortDirection,
    ) -> Self {
        self.comparator = Some(Box::new(move |a: &T, b: &T| {
            direction.apply(comparator(a, b))
        }));
        self
    }

    pub fn run<'s>(&self, items: &'s [T]) -> Vec<&'s T> {
        let mut out = items
            .iter()
            .filter(|item| self.filters.iter().all(|predicate| predicate(*item)))
            .collect::<Vec<_>>();
        if let Some(comparator) = &self.comparator {
            out.sort_by(|a, b| comparator(*a, *b));
        }
        out
    }
}

pub fn by_key<T, K: Ord>(key: impl Fn(&T) -> K) -> impl Fn(&T, &T) -> Ordering {
    move |a: &T, b: &T| key(a).cmp(&key(b))
}

pub fn by_f64<T>(key: impl Fn(&T) -> f64) -> impl Fn(&T, &T) -> Ordering {
    move |a: &T, b: &T| key(a).total_cmp(&key(b))
}

pub fn by_str<T>(key: impl Fn(&T) -> &str) -> impl Fn(&T, &T) -> Ordering {
    move |a: &T, b: &T| compare_text(key(a), key(b))
}

/// Case-insensitive ordering with a case-sensitive tiebreak so distinct strings
/// never compare equal.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub total: usize,
    /// 1-based position of the first item, 0 for an empty page.
    pub range_start: usize,
    pub range_end: usize,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Zero-based page window. A page index past the end yields an empty page rather
/// than clamping to the last one.
pub fn window<T>(items: Vec<T>, page_index: usize, page_size: usize) -> Page<T> {
    let total = items.len();
    let page_size = page_size.max(1);
    let page_count = total.div_ceil(page_size);
    let offset = page_index.saturating_mul(page_size);

    let page_items = if page_index < page_count {
        items.into_iter().skip(offset).take(page_size).collect::<Vec<_>>()
    } else {
        Vec::new()
    };

    let (range_start, range_end) = if page_items.is_empty() {
        (0, 0)
    } else {
        (offset + 1, offset + page_items.len())
    };

    Page {
        items: page_items,
        page_index,
        page_size,
        page_count,
        total,
        range_start,
        range_end,
    }
}
