use chrono::NaiveDateTime;

use crate::catalog::Catalog;
use crate::config::RegisterConfig;
use crate::domain::cart::Cart;
use crate::domain::client::Client;
use crate::domain::pricing::{PriceTier, TierOption};

/// Observable phase of a register session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No lines in the cart yet.
    Empty,
    /// The cart is being edited.
    Building,
    /// A checkout dialog is open or a submission is in flight; every
    /// cart mutation is locked out.
    CheckoutPending,
}

/// Pending two-step add-line prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum LinePrompt {
    /// The tier chooser is open.
    AwaitingTier {
        /// Product being added.
        product_id: i32,
        /// Tiers the user may pick from.
        options: Vec<TierOption>,
        /// Tier pre-selected in the chooser.
        selected: PriceTier,
    },
    /// The quantity dialog is open for a resolved tier.
    AwaitingQuantity {
        /// Product being added.
        product_id: i32,
        /// Tier the price was resolved from.
        tier: PriceTier,
        /// Resolved price in cents for one unit.
        unit_price_cents: i64,
    },
}

/// Register state owned exclusively by one UI session.
///
/// The session is plain data; the operations on it live in the service
/// layer, which enforces the checkout lock before every mutation.
#[derive(Debug)]
pub struct RegisterSession {
    /// Product snapshot used for matching and lookups.
    pub catalog: Catalog,
    /// Clients offered in the checkout dropdown.
    pub clients: Vec<Client>,
    /// The current sale's cart.
    pub cart: Cart,
    /// Policy knobs.
    pub config: RegisterConfig,
    /// When the session was opened.
    pub opened_at: NaiveDateTime,
    checkout_pending: bool,
    prompt: Option<LinePrompt>,
}

impl Default for RegisterSession {
    fn default() -> Self {
        Self::new(RegisterConfig::default())
    }
}

impl RegisterSession {
    /// Open a session with the given policy knobs.
    pub fn new(config: RegisterConfig) -> Self {
        Self {
            catalog: Catalog::new(),
            clients: Vec::new(),
            cart: Cart::new(),
            config,
            opened_at: chrono::Local::now().naive_utc(),
            checkout_pending: false,
            prompt: None,
        }
    }

    /// Observable phase of the session.
    pub fn phase(&self) -> SessionPhase {
        if self.checkout_pending {
            SessionPhase::CheckoutPending
        } else if self.cart.is_empty() {
            SessionPhase::Empty
        } else {
            SessionPhase::Building
        }
    }

    /// Whether cart edits are currently locked out.
    pub fn is_locked(&self) -> bool {
        self.checkout_pending
    }

    /// The open add-line prompt, when any.
    pub fn prompt(&self) -> Option<&LinePrompt> {
        self.prompt.as_ref()
    }

    pub(crate) fn set_prompt(&mut self, prompt: LinePrompt) {
        self.prompt = Some(prompt);
    }

    pub(crate) fn clear_prompt(&mut self) {
        self.prompt = None;
    }

    /// Enter the checkout phase, abandoning any open prompt.
    pub(crate) fn enter_checkout(&mut self) {
        self.prompt = None;
        self.checkout_pending = true;
    }

    /// Leave the checkout phase, back to cart editing.
    pub(crate) fn leave_checkout(&mut self) {
        self.checkout_pending = false;
    }
}
