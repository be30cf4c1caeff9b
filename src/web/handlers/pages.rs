// Page handlers for HTML rendering with Askama

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use askama::Template;

use crate::api_server::{AppError, AppState, VehicleQuery};
use crate::forms::{min_date, today_local};
use crate::inventory::{SortKey, VehicleCard};
use crate::navigation::ChromeState;

/// Buckets offered by the price select
pub const PRICE_BUCKETS: &[(&str, &str)] = &[
    ("all", "All Prices"),
    ("0-30000", "Under $30,000"),
    ("30000-50000", "$30,000 - $50,000"),
    ("50000-80000", "$50,000 - $80,000"),
    ("80000+", "$80,000+"),
];

const SORT_OPTIONS: &[(SortKey, &str)] = &[
    (SortKey::Featured, "Featured"),
    (SortKey::PriceLow, "Price: Low to High"),
    (SortKey::PriceHigh, "Price: High to Low"),
    (SortKey::Year, "Newest First"),
];

/// `?menu=open` renders the mobile menu expanded
#[derive(Debug, Default, serde::Deserialize)]
pub struct NavQuery {
    pub menu: Option<String>,
}

impl NavQuery {
    fn chrome(&self) -> ChromeState {
        ChromeState::from_menu_param(self.menu.as_deref())
    }
}

/// One `<option>` of a select
pub struct SelectItem {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Card as rendered in the grid
pub struct CardView {
    pub position: usize,
    pub title: String,
    pub category: String,
    pub price: String,
    pub image: String,
    pub badge: String,
    pub features: Vec<String>,
}

impl CardView {
    fn new(position: usize, card: &VehicleCard) -> Self {
        Self {
            position,
            title: card.title.clone(),
            category: card.category.clone(),
            price: card.display_price(),
            image: card.image.clone().unwrap_or_default(),
            badge: card.badge.clone().unwrap_or_default(),
            features: card.features.clone(),
        }
    }
}

// ============================================================================
// Home Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub title: String,
    pub chrome: ChromeState,
    pub menu_href: String,
    pub vehicle_count: usize,
    pub featured: Vec<CardView>,
    pub min_date: String,
}

pub async fn home_page(
    State(state): State<AppState>,
    Query(nav): Query<NavQuery>,
) -> impl IntoResponse {
    let chrome = nav.chrome();
    let featured = state
        .inventory
        .cards()
        .iter()
        .enumerate()
        .take(3)
        .map(|(i, card)| CardView::new(i, card))
        .collect();

    let template = HomeTemplate {
        title: "Prestige Motors".to_string(),
        chrome,
        menu_href: format!("?menu={}", chrome.toggle_param()),
        vehicle_count: state.inventory.len(),
        featured,
        min_date: min_date(today_local()),
    };
    Html(template.render().unwrap_or_else(|e| {
        format!("Template error: {}", e)
    }))
}

// ============================================================================
// Inventory Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/inventory.html")]
pub struct InventoryTemplate {
    pub title: String,
    pub chrome: ChromeState,
    pub menu_href: String,
    pub categories: Vec<SelectItem>,
    pub prices: Vec<SelectItem>,
    pub sorts: Vec<SelectItem>,
    pub cards: Vec<CardView>,
    pub hidden_count: usize,
}

pub async fn inventory_page(
    State(state): State<AppState>,
    Query(query): Query<VehicleQuery>,
    Query(nav): Query<NavQuery>,
) -> Result<Html<String>, AppError> {
    let filters = query.filter_state()?;
    let view = state.inventory.view(&filters);
    let chrome = nav.chrome();
    let menu_href = format!(
        "?category={}&price={}&sort={}&menu={}",
        filters.category,
        filters.price_range,
        filters.sort.as_str(),
        chrome.toggle_param()
    );

    let selected_category = filters.category.to_string();
    let mut categories = vec![SelectItem {
        value: "all".to_string(),
        label: "All Vehicles".to_string(),
        selected: selected_category == "all",
    }];
    categories.extend(state.inventory.categories().into_iter().map(|c| SelectItem {
        value: c.to_string(),
        label: c.to_uppercase(),
        selected: c == selected_category,
    }));

    let selected_price = filters.price_range.to_string();
    let prices = PRICE_BUCKETS
        .iter()
        .map(|(value, label)| SelectItem {
            value: value.to_string(),
            label: label.to_string(),
            selected: *value == selected_price,
        })
        .collect();

    let sorts = SORT_OPTIONS
        .iter()
        .map(|(key, label)| SelectItem {
            value: key.as_str().to_string(),
            label: label.to_string(),
            selected: *key == filters.sort,
        })
        .collect();

    let cards = view
        .visible
        .iter()
        .zip(state.inventory.visible_cards(&view))
        .map(|(&pos, card)| CardView::new(pos, card))
        .collect();

    let template = InventoryTemplate {
        title: "Our Inventory".to_string(),
        chrome,
        menu_href,
        categories,
        prices,
        sorts,
        cards,
        hidden_count: view.hidden.len(),
    };
    Ok(Html(template.render().unwrap_or_else(|e| {
        format!("Template error: {}", e)
    })))
}
