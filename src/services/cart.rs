use serde::Serialize;

use crate::MAX_LINE_QUANTITY;
use crate::catalog::normalize_scan;
use crate::domain::cart::CartLine;
use crate::domain::money::format_amount;
use crate::domain::pricing::PriceTier;
use crate::forms::cart::{QuantityForm, TierChoiceForm};
use crate::services::{ServiceError, ServiceResult};
use crate::session::{LinePrompt, RegisterSession};

/// Opens the add-line prompt for a product.
///
/// Products offering a single tier skip the chooser and go straight to
/// the quantity dialog.
pub fn begin_line(session: &mut RegisterSession, product_id: i32) -> ServiceResult<LinePrompt> {
    if session.is_locked() {
        return Err(ServiceError::EditingLocked);
    }

    let product = session
        .catalog
        .get(product_id)
        .ok_or(ServiceError::ProductNotFound(product_id))?;

    let options = product.tier_options();
    let prompt = if options.len() == 1 {
        LinePrompt::AwaitingQuantity {
            product_id,
            tier: options[0].tier,
            unit_price_cents: options[0].amount_cents,
        }
    } else {
        LinePrompt::AwaitingTier {
            product_id,
            selected: product.default_tier(),
            options,
        }
    };

    session.set_prompt(prompt.clone());
    Ok(prompt)
}

/// Resolves the tier chooser into a quantity dialog.
///
/// A bad tier key keeps the chooser open for another try; a product
/// that left the catalog since the chooser opened closes it.
pub fn select_tier(
    session: &mut RegisterSession,
    form: TierChoiceForm,
) -> ServiceResult<LinePrompt> {
    if session.is_locked() {
        return Err(ServiceError::EditingLocked);
    }

    let product_id = match session.prompt() {
        Some(LinePrompt::AwaitingTier { product_id, .. }) => *product_id,
        _ => {
            return Err(ServiceError::Validation(
                "no tier selection is in progress".to_string(),
            ));
        }
    };

    let tier = form
        .into_tier()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let unit_price_cents = match resolve_tier_price(session, product_id, tier) {
        Ok(price) => price,
        Err(err) => {
            if matches!(err, ServiceError::ProductNotFound(_)) {
                session.clear_prompt();
            }
            return Err(err);
        }
    };

    let prompt = LinePrompt::AwaitingQuantity {
        product_id,
        tier,
        unit_price_cents,
    };
    session.set_prompt(prompt.clone());
    Ok(prompt)
}

/// Commits the quantity dialog into the cart.
///
/// A bad quantity keeps the dialog open so the cashier can correct it.
pub fn confirm_quantity(
    session: &mut RegisterSession,
    form: QuantityForm,
) -> ServiceResult<CartLineView> {
    if session.is_locked() {
        return Err(ServiceError::EditingLocked);
    }

    let (product_id, tier, unit_price_cents) = match session.prompt() {
        Some(LinePrompt::AwaitingQuantity {
            product_id,
            tier,
            unit_price_cents,
        }) => (*product_id, *tier, *unit_price_cents),
        _ => {
            return Err(ServiceError::Validation(
                "no quantity entry is in progress".to_string(),
            ));
        }
    };

    let quantity = form
        .into_quantity()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    match add_resolved_line(session, product_id, tier, unit_price_cents, quantity) {
        Ok(view) => {
            session.clear_prompt();
            Ok(view)
        }
        Err(err) => {
            if matches!(err, ServiceError::ProductNotFound(_)) {
                session.clear_prompt();
            }
            Err(err)
        }
    }
}

/// Closes the add-line prompt without touching the cart.
pub fn cancel_prompt(session: &mut RegisterSession) -> ServiceResult<()> {
    if session.is_locked() {
        return Err(ServiceError::EditingLocked);
    }

    session.clear_prompt();
    Ok(())
}

/// Adds a line directly at a known tier, bypassing the prompt flow.
pub fn add_line(
    session: &mut RegisterSession,
    product_id: i32,
    tier: PriceTier,
    quantity: i64,
) -> ServiceResult<CartLineView> {
    if session.is_locked() {
        return Err(ServiceError::EditingLocked);
    }
    if quantity < 1 {
        return Err(ServiceError::Validation(
            "quantity must be at least 1".to_string(),
        ));
    }

    let unit_price_cents = resolve_tier_price(session, product_id, tier)?;
    add_resolved_line(session, product_id, tier, unit_price_cents, quantity)
}

/// Applies a stepper delta to the quantity of the line addressed by
/// product and unit price.
///
/// The quantity floors at 1; dropping a line is a separate operation.
pub fn change_quantity(
    session: &mut RegisterSession,
    product_id: i32,
    unit_price_cents: i64,
    delta: i64,
) -> ServiceResult<CartLineView> {
    if session.is_locked() {
        return Err(ServiceError::EditingLocked);
    }

    let line = match session.cart.find_line(product_id, unit_price_cents) {
        Some(line) => line.clone(),
        None => return Err(ServiceError::LineNotFound(product_id)),
    };

    if line
        .quantity
        .checked_add(delta)
        .is_none_or(|stepped| stepped > MAX_LINE_QUANTITY)
    {
        return Err(ServiceError::Validation(format!(
            "quantity cannot exceed {MAX_LINE_QUANTITY}"
        )));
    }

    let quantity = session
        .cart
        .adjust_quantity(product_id, unit_price_cents, delta)
        .ok_or(ServiceError::LineNotFound(product_id))?;

    let updated = CartLine { quantity, ..line };
    Ok(CartLineView::from(&updated))
}

/// Removes every line for a product, across all tiers.
///
/// Removing a product that is not in the cart succeeds as a no-op.
/// Returns the number of lines dropped.
pub fn remove_line(session: &mut RegisterSession, product_id: i32) -> ServiceResult<usize> {
    if session.is_locked() {
        return Err(ServiceError::EditingLocked);
    }

    Ok(session.cart.remove_product(product_id))
}

/// Empties the cart and abandons any open prompt.
pub fn clear_cart(session: &mut RegisterSession) -> ServiceResult<()> {
    if session.is_locked() {
        return Err(ServiceError::EditingLocked);
    }

    session.cart.clear();
    session.clear_prompt();
    Ok(())
}

/// Outcome of a barcode or article-code scan.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// The code matched and one unit was added at the default tier.
    Added { line: CartLineView },
    /// Nothing in the catalog carries the scanned code.
    NoMatch,
}

/// Resolves a scanned code against the catalog and adds one unit at
/// the product's default tier.
///
/// Barcodes match byte for byte, article codes ignoring case. A miss
/// never mutates the cart.
pub fn scan(session: &mut RegisterSession, input: &str) -> ServiceResult<ScanOutcome> {
    if session.is_locked() {
        return Err(ServiceError::EditingLocked);
    }

    let code = normalize_scan(input);
    if code.is_empty() {
        return Ok(ScanOutcome::NoMatch);
    }

    let resolved = session
        .catalog
        .match_exact(code)
        .map(|product| (product.id, product.default_tier()));
    let Some((product_id, tier)) = resolved else {
        log::debug!("scan missed: {code}");
        return Ok(ScanOutcome::NoMatch);
    };

    let unit_price_cents = resolve_tier_price(session, product_id, tier)?;
    let line = add_resolved_line(session, product_id, tier, unit_price_cents, 1)?;

    Ok(ScanOutcome::Added { line })
}

/// Renders the cart panel.
pub fn cart_view(session: &RegisterSession) -> CartView {
    let total_cents = session.cart.total_cents();

    CartView {
        lines: session
            .cart
            .lines()
            .iter()
            .map(CartLineView::from)
            .collect(),
        total_cents,
        total_formatted: format_amount(total_cents),
        locked: session.is_locked(),
    }
}

fn resolve_tier_price(
    session: &RegisterSession,
    product_id: i32,
    tier: PriceTier,
) -> ServiceResult<i64> {
    let product = session
        .catalog
        .get(product_id)
        .ok_or(ServiceError::ProductNotFound(product_id))?;

    product.tier_price(tier).ok_or_else(|| {
        ServiceError::Validation(format!(
            "the {} price is not offered for {}",
            tier.label(),
            product.name
        ))
    })
}

fn add_resolved_line(
    session: &mut RegisterSession,
    product_id: i32,
    tier: PriceTier,
    unit_price_cents: i64,
    quantity: i64,
) -> ServiceResult<CartLineView> {
    let (product_name, item_number) = match session.catalog.get(product_id) {
        Some(product) => (product.name.clone(), product.item_number.clone()),
        None => return Err(ServiceError::ProductNotFound(product_id)),
    };

    let current = session
        .cart
        .find_line(product_id, unit_price_cents)
        .map_or(0, |line| line.quantity);
    if current
        .checked_add(quantity)
        .is_none_or(|merged| merged > MAX_LINE_QUANTITY)
    {
        return Err(ServiceError::Validation(format!(
            "quantity cannot exceed {MAX_LINE_QUANTITY}"
        )));
    }

    let line = session.cart.merge_line(CartLine {
        product_id,
        product_name,
        item_number,
        tier,
        unit_price_cents,
        quantity,
    });

    Ok(CartLineView::from(line))
}

/// View model for one cart row.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub product_id: i32,
    pub product_name: String,
    pub item_number: Option<String>,
    pub tier: PriceTier,
    pub tier_label: &'static str,
    pub unit_price_cents: i64,
    pub unit_price_formatted: String,
    pub quantity: i64,
    pub line_total_cents: i64,
    pub line_total_formatted: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            product_name: line.product_name.clone(),
            item_number: line.item_number.clone(),
            tier: line.tier,
            tier_label: line.tier.label(),
            unit_price_cents: line.unit_price_cents,
            unit_price_formatted: format_amount(line.unit_price_cents),
            quantity: line.quantity,
            line_total_cents: line.line_total_cents(),
            line_total_formatted: format_amount(line.line_total_cents()),
        }
    }
}

/// View model for the cart panel.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total_cents: i64,
    pub total_formatted: String,
    pub locked: bool,
}
