//! Derived product views: filter, sort, paginate.
//!
//! The whole view is a pure function of the product list and a [`ViewQuery`];
//! nothing about the current view is kept on the ledger.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use localshop_core::ValueObject;

use crate::product::{Product, ProductStatus};

/// Products per page.
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Quantity,
    Price,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Search, filter, sort and page selection for the product list.
///
/// Every builder that changes a filter or the sort order returns a query on
/// page 1; only [`ViewQuery::with_page`] moves between pages.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewQuery {
    search: String,
    category: Option<String>,
    status: Option<ProductStatus>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    sort_key: SortKey,
    sort_direction: SortDirection,
    page: usize,
}

impl ValueObject for ViewQuery {}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            status: None,
            min_price: None,
            max_price: None,
            sort_key: SortKey::Name,
            sort_direction: SortDirection::Asc,
            page: 1,
        }
    }
}

impl ViewQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            page: 1,
            ..self
        }
    }

    /// `None` shows every category.
    pub fn with_category(self, category: Option<String>) -> Self {
        Self {
            category,
            page: 1,
            ..self
        }
    }

    /// `None` shows every status.
    pub fn with_status(self, status: Option<ProductStatus>) -> Self {
        Self {
            status,
            page: 1,
            ..self
        }
    }

    /// Inclusive selling-price bounds; either side may be open.
    pub fn with_price_range(self, min_price: Option<f64>, max_price: Option<f64>) -> Self {
        Self {
            min_price,
            max_price,
            page: 1,
            ..self
        }
    }

    pub fn with_sort(self, sort_key: SortKey, sort_direction: SortDirection) -> Self {
        Self {
            sort_key,
            sort_direction,
            page: 1,
            ..self
        }
    }

    pub fn toggle_sort_direction(self) -> Self {
        let direction = self.sort_direction.toggled();
        let key = self.sort_key;
        self.with_sort(key, direction)
    }

    /// Pages are 1-based; 0 is treated as 1.
    pub fn with_page(self, page: usize) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn status(&self) -> Option<ProductStatus> {
        self.status
    }

    pub fn min_price(&self) -> Option<f64> {
        self.min_price
    }

    pub fn max_price(&self) -> Option<f64> {
        self.max_price
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Conjunction of every active filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && self.matches_category(product)
            && self.matches_status(product)
            && self.matches_price(product)
    }

    fn matches_search(&self, product: &Product) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        [&product.name, &product.sku, &product.brand]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| product.category == category)
    }

    fn matches_status(&self, product: &Product) -> bool {
        self.status.is_none_or(|status| product.status == status)
    }

    fn matches_price(&self, product: &Product) -> bool {
        let price = product.selling_price;
        self.min_price.is_none_or(|min| price >= min) && self.max_price.is_none_or(|max| price <= max)
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = match self.sort_key {
            SortKey::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
            SortKey::Quantity => a.stock_quantity.cmp(&b.stock_quantity),
            SortKey::Price => a.selling_price.total_cmp(&b.selling_price),
        };
        match self.sort_direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// One page of a derived view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was requested.
    pub page: usize,
    pub page_size: usize,
    /// Number of products matching the filters, across all pages.
    pub total_items: usize,
    pub total_pages: usize,
}

/// Filtered and sorted products, before pagination.
///
/// Sorting is stable: products with equal sort keys keep their catalog order,
/// in both directions.
pub fn filter_and_sort<'a>(products: &'a [Product], query: &ViewQuery) -> Vec<&'a Product> {
    let mut filtered: Vec<&Product> = products.iter().filter(|p| query.matches(p)).collect();
    filtered.sort_by(|a, b| query.compare(a, b));
    filtered
}

/// The page of products `query` selects.
pub fn compute_view(products: &[Product], query: &ViewQuery) -> Page<Product> {
    let filtered = filter_and_sort(products, query);
    let total_items = filtered.len();
    let start = (query.page - 1).saturating_mul(PAGE_SIZE);

    let items = filtered
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    Page {
        items,
        page: query.page,
        page_size: PAGE_SIZE,
        total_items,
        total_pages: total_items.div_ceil(PAGE_SIZE),
    }
}
