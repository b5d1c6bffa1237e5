use chrono::NaiveDateTime;
use serde::Serialize;

use crate::api::payloads::{SaleRequest, remito_path};
use crate::api::{CatalogProvider, SalesGateway};
use crate::domain::client::Client;
use crate::domain::money::format_amount;
use crate::domain::sale::{PaymentMethod, PaymentStatus};
use crate::forms::checkout::CheckoutForm;
use crate::services::catalog::load_register;
use crate::services::{ServiceError, ServiceResult};
use crate::session::RegisterSession;

/// View model for the checkout dialog.
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    pub total_cents: i64,
    pub total_formatted: String,
    /// Clients offered in the dropdown.
    pub clients: Vec<Client>,
    /// Method pre-selected in the dialog.
    pub default_payment_method: PaymentMethod,
}

/// Everything the UI shows once a sale went through.
#[derive(Debug, Serialize)]
pub struct SaleCompletion {
    pub sale_id: i32,
    /// Path of the printable receipt.
    pub remito_path: String,
    pub total_cents: i64,
    pub total_formatted: String,
    pub amount_paid_cents: i64,
    pub amount_paid_formatted: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub timestamp: NaiveDateTime,
}

/// Opens the checkout dialog, locking the cart against edits.
pub fn begin_checkout(session: &mut RegisterSession) -> ServiceResult<CheckoutView> {
    if session.cart.is_empty() {
        return Err(ServiceError::Validation("the cart is empty".to_string()));
    }

    session.enter_checkout();

    let total_cents = session.cart.total_cents();
    Ok(CheckoutView {
        total_cents,
        total_formatted: format_amount(total_cents),
        clients: session.clients.clone(),
        default_payment_method: session.config.default_payment_method,
    })
}

/// Closes the checkout dialog, unlocking the cart untouched.
pub fn cancel_checkout(session: &mut RegisterSession) -> ServiceResult<()> {
    if !session.is_locked() {
        return Err(ServiceError::Validation(
            "no checkout is in progress".to_string(),
        ));
    }

    session.leave_checkout();
    Ok(())
}

/// Submits the sale behind the open checkout dialog.
///
/// Validation failures keep the dialog open for correction. A failed
/// submission unlocks the cart untouched so the cashier can resume
/// editing and try again. After a successful submission the cart is
/// cleared and the catalog refreshed; a refresh failure is logged but
/// never fails the completed sale.
pub fn submit_checkout<P, G>(
    session: &mut RegisterSession,
    provider: &P,
    gateway: &G,
    form: CheckoutForm,
) -> ServiceResult<SaleCompletion>
where
    P: CatalogProvider + ?Sized,
    G: SalesGateway + ?Sized,
{
    if !session.is_locked() {
        return Err(ServiceError::Validation(
            "no checkout is in progress".to_string(),
        ));
    }

    let total_cents = session.cart.total_cents();
    let draft = form
        .into_sale_draft(total_cents, session.config.default_payment_method)
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    if let Some(client_id) = draft.client_id
        && !session.clients.iter().any(|client| client.id == client_id)
    {
        return Err(ServiceError::Validation(format!(
            "unknown client {client_id}"
        )));
    }

    let request = SaleRequest::from_cart(&session.cart, &draft);
    log::debug!(
        "submitting sale: {} lines, {} due, {} tendered",
        request.items.len(),
        format_amount(total_cents),
        format_amount(draft.amount_paid_cents)
    );

    let receipt = match gateway.submit_sale(&request) {
        Ok(receipt) => receipt,
        Err(err) => {
            session.leave_checkout();
            return Err(ServiceError::from(err));
        }
    };

    session.cart.clear();
    session.leave_checkout();

    if let Err(err) = load_register(session, provider) {
        log::warn!("catalog refresh after sale {} failed: {err}", receipt.id);
    }

    log::info!(
        "sale {} completed: {} by {}",
        receipt.id,
        format_amount(receipt.total_amount),
        receipt.payment_method.key()
    );

    Ok(SaleCompletion {
        sale_id: receipt.id,
        remito_path: remito_path(receipt.id),
        total_cents: receipt.total_amount,
        total_formatted: format_amount(receipt.total_amount),
        amount_paid_cents: receipt.amount_paid,
        amount_paid_formatted: format_amount(receipt.amount_paid),
        payment_method: receipt.payment_method,
        payment_status: receipt.payment_status,
        timestamp: receipt.timestamp,
    })
}
