//! Helpers for integration tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

use nexpos_register::api::payloads::{SaleReceipt, SaleRequest};
use nexpos_register::api::{ApiError, ApiResult, CatalogProvider, SalesGateway};
use nexpos_register::domain::client::Client;
use nexpos_register::domain::product::{Product, ProductPatch};
use nexpos_register::domain::sale::PaymentStatus;

/// In-memory stand-in for the store backend.
///
/// Mirrors the backend's sale rules: items are priced at the product's
/// current unit price, stock is decremented per sale, and a sale that
/// would overdraw stock is rejected with a `detail` message.
pub struct FakeBackend {
    pub products: RefCell<Vec<Product>>,
    pub clients: Vec<Client>,
    /// Every accepted sale request, in submission order.
    pub sales: RefCell<Vec<SaleRequest>>,
    /// When set, every call fails as if the backend were unreachable.
    pub fail_transport: Cell<bool>,
    /// When set, sale submissions are rejected with this detail.
    pub reject_detail: RefCell<Option<String>>,
    next_sale_id: Cell<i32>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            products: RefCell::new(seed_products()),
            clients: seed_clients(),
            sales: RefCell::new(Vec::new()),
            fail_transport: Cell::new(false),
            reject_detail: RefCell::new(None),
            next_sale_id: Cell::new(1),
        }
    }

    pub fn stock_of(&self, product_id: i32) -> Option<i64> {
        self.products
            .borrow()
            .iter()
            .find(|product| product.id == product_id)
            .map(|product| product.stock_quantity)
    }

    fn check_transport(&self) -> ApiResult<()> {
        if self.fail_transport.get() {
            return Err(ApiError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

impl CatalogProvider for FakeBackend {
    fn fetch_products(&self) -> ApiResult<Vec<Product>> {
        self.check_transport()?;
        Ok(self.products.borrow().clone())
    }

    fn fetch_clients(&self) -> ApiResult<Vec<Client>> {
        self.check_transport()?;
        Ok(self.clients.clone())
    }

    fn update_product(&self, product_id: i32, patch: &ProductPatch) -> ApiResult<Product> {
        self.check_transport()?;

        let mut products = self.products.borrow_mut();
        let Some(product) = products.iter_mut().find(|p| p.id == product_id) else {
            return Err(ApiError::rejected_from_body(
                r#"{"detail": "Product not found"}"#,
            ));
        };

        if let Some(name) = &patch.name {
            product.name = name.clone();
        }
        if let Some(description) = &patch.description {
            product.description = description.clone();
        }
        if let Some(price_cents) = patch.price_cents {
            product.price_cents = price_cents;
        }
        if let Some(retail) = patch.retail_price_cents {
            product.retail_price_cents = retail;
        }
        if let Some(bulk) = patch.bulk_price_cents {
            product.bulk_price_cents = bulk;
        }
        if let Some(stock) = patch.stock_quantity {
            product.stock_quantity = stock;
        }

        Ok(product.clone())
    }
}

impl SalesGateway for FakeBackend {
    fn submit_sale(&self, request: &SaleRequest) -> ApiResult<SaleReceipt> {
        self.check_transport()?;

        if let Some(detail) = self.reject_detail.borrow().as_ref() {
            return Err(ApiError::Rejected {
                detail: detail.clone(),
            });
        }

        let mut products = self.products.borrow_mut();

        let mut total_cents = 0i64;
        let mut required: HashMap<i32, i64> = HashMap::new();
        for item in &request.items {
            let product = products
                .iter()
                .find(|product| product.id == item.product_id)
                .ok_or_else(|| {
                    ApiError::rejected_from_body(r#"{"detail": "Product not found"}"#)
                })?;

            total_cents += product.price_cents * item.quantity;
            *required.entry(item.product_id).or_insert(0) += item.quantity;
        }

        for (product_id, quantity) in &required {
            let product = products
                .iter()
                .find(|product| product.id == *product_id)
                .expect("product validated above");
            if product.stock_quantity < *quantity {
                let body = format!(r#"{{"detail": "Insufficient stock for {}"}}"#, product.name);
                return Err(ApiError::rejected_from_body(&body));
            }
        }

        for (product_id, quantity) in required {
            if let Some(product) = products.iter_mut().find(|p| p.id == product_id) {
                product.stock_quantity -= quantity;
            }
        }

        let id = self.next_sale_id.get();
        self.next_sale_id.set(id + 1);
        self.sales.borrow_mut().push(request.clone());

        Ok(SaleReceipt {
            id,
            timestamp: fixed_datetime(),
            total_amount: total_cents,
            amount_paid: request.amount_paid,
            payment_status: PaymentStatus::from_amounts(request.amount_paid, total_cents),
            payment_method: request.payment_method,
        })
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn fixed_datetime() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(10, 30, 0))
        .unwrap_or_default()
}

pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Gomon Pin Negro".to_string(),
            description: Some("Gomon de pin reforzado".to_string()),
            barcode: Some("711100000001".to_string()),
            item_number: Some("7111".to_string()),
            price_cents: 750_000,
            retail_price_cents: None,
            bulk_price_cents: Some(710_000),
            stock_quantity: 120,
            min_stock_level: 10,
            category: Some("Gomones".to_string()),
            size_range: Some("35 al 40".to_string()),
            units_per_bundle: Some(12),
        },
        Product {
            id: 2,
            name: "Gomon NO Pin".to_string(),
            description: None,
            barcode: None,
            item_number: Some("7098".to_string()),
            price_cents: 600_000,
            retail_price_cents: Some(650_000),
            bulk_price_cents: Some(550_000),
            stock_quantity: 80,
            min_stock_level: 10,
            category: Some("Gomones".to_string()),
            size_range: Some("35 al 40".to_string()),
            units_per_bundle: Some(12),
        },
        Product {
            id: 3,
            name: "Articulo 7110".to_string(),
            description: None,
            barcode: None,
            item_number: Some("7110".to_string()),
            price_cents: 1_300_000,
            retail_price_cents: None,
            bulk_price_cents: Some(1_250_000),
            stock_quantity: 40,
            min_stock_level: 5,
            category: None,
            size_range: Some("27 al 34".to_string()),
            units_per_bundle: Some(12),
        },
        Product {
            id: 4,
            name: "Gomon 1/2 Alto".to_string(),
            description: None,
            barcode: Some("708300000004".to_string()),
            item_number: Some("7083".to_string()),
            price_cents: 850_000,
            retail_price_cents: None,
            bulk_price_cents: None,
            stock_quantity: 8,
            min_stock_level: 10,
            category: Some("Gomones".to_string()),
            size_range: None,
            units_per_bundle: None,
        },
        Product {
            id: 5,
            name: "Articulo 7091".to_string(),
            description: None,
            barcode: None,
            item_number: Some("7091".to_string()),
            price_cents: 720_000,
            retail_price_cents: None,
            bulk_price_cents: None,
            stock_quantity: 200,
            min_stock_level: 0,
            category: None,
            size_range: None,
            units_per_bundle: None,
        },
    ]
}

pub fn seed_clients() -> Vec<Client> {
    vec![
        Client {
            id: 1,
            name: "Consumidor Final".to_string(),
            cuit: None,
        },
        Client {
            id: 2,
            name: "Distribuidora San Martin".to_string(),
            cuit: Some("30-12345678-9".to_string()),
        },
    ]
}
