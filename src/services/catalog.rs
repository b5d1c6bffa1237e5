use serde::Serialize;

use crate::api::CatalogProvider;
use crate::domain::money::format_amount;
use crate::domain::pricing::{PriceTier, TierOption};
use crate::domain::product::Product;
use crate::forms::catalog::CatalogUpload;
use crate::services::{ServiceError, ServiceResult};
use crate::session::RegisterSession;

/// Counts reported after a catalog load.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LoadSummary {
    /// Products now in the catalog.
    pub products: usize,
    /// Clients now offered at checkout.
    pub clients: usize,
}

/// Loads or refreshes the session's catalog and client list from the
/// backend.
///
/// Nothing is replaced until both fetches succeed, so a failed load
/// leaves the previous snapshot usable.
pub fn load_register<P>(session: &mut RegisterSession, provider: &P) -> ServiceResult<LoadSummary>
where
    P: CatalogProvider + ?Sized,
{
    if session.is_locked() {
        return Err(ServiceError::EditingLocked);
    }

    let products = provider.fetch_products().map_err(ServiceError::from)?;
    let clients = provider.fetch_clients().map_err(ServiceError::from)?;

    let summary = LoadSummary {
        products: session.catalog.replace(products),
        clients: clients.len(),
    };
    session.clients = clients;

    log::info!(
        "register loaded: {} products, {} clients",
        summary.products,
        summary.clients
    );

    Ok(summary)
}

/// Products matching the search box contents.
///
/// A blank term keeps the catalog hidden unless the idle listing is
/// switched on.
pub fn search_products(session: &RegisterSession, term: &str) -> Vec<ProductCard> {
    let trimmed = term.trim();
    if trimmed.is_empty() && !session.config.show_idle_catalog {
        return Vec::new();
    }

    session
        .catalog
        .search(trimmed)
        .into_iter()
        .map(ProductCard::from_product)
        .collect()
}

/// Replaces the catalog from an uploaded CSV snapshot.
pub fn import_snapshot(
    session: &mut RegisterSession,
    upload: CatalogUpload,
) -> ServiceResult<usize> {
    if session.is_locked() {
        return Err(ServiceError::EditingLocked);
    }

    let products = upload
        .into_products()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;
    let count = session.catalog.replace(products);

    log::info!("catalog snapshot imported: {count} products");

    Ok(count)
}

/// View model for one product card in the search results.
#[derive(Debug, Serialize)]
pub struct ProductCard {
    pub id: i32,
    pub name: String,
    pub item_number: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub size_range: Option<String>,
    pub units_per_bundle: Option<i64>,
    pub price_cents: i64,
    pub price_formatted: String,
    /// Offered tiers with the default pre-selected.
    pub tiers: Vec<TierOptionView>,
    pub stock_quantity: i64,
    pub low_stock: bool,
}

impl ProductCard {
    fn from_product(product: &Product) -> Self {
        let default_tier = product.default_tier();
        let tiers = product
            .tier_options()
            .into_iter()
            .map(|option| TierOptionView::from_option(option, default_tier))
            .collect();

        Self {
            id: product.id,
            name: product.name.clone(),
            item_number: product.item_number.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            size_range: product.size_range.clone(),
            units_per_bundle: product.units_per_bundle,
            price_cents: product.price_cents,
            price_formatted: format_amount(product.price_cents),
            tiers,
            stock_quantity: product.stock_quantity,
            low_stock: product.is_low_stock(),
        }
    }
}

/// View model for one tier in the card's price chooser.
#[derive(Debug, Serialize)]
pub struct TierOptionView {
    pub tier: PriceTier,
    pub label: &'static str,
    pub amount_cents: i64,
    pub amount_formatted: String,
    pub selected: bool,
}

impl TierOptionView {
    fn from_option(option: TierOption, selected_tier: PriceTier) -> Self {
        Self {
            tier: option.tier,
            label: option.label,
            amount_cents: option.amount_cents,
            amount_formatted: format_amount(option.amount_cents),
            selected: option.tier == selected_tier,
        }
    }
}
