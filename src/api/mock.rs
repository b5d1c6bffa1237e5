use mockall::mock;

use super::{ApiResult, CatalogProvider, SalesGateway};
use crate::api::payloads::{SaleReceipt, SaleRequest};
use crate::domain::client::Client;
use crate::domain::product::{Product, ProductPatch};

mock! {
    pub CatalogProvider {}

    impl CatalogProvider for CatalogProvider {
        fn fetch_products(&self) -> ApiResult<Vec<Product>>;
        fn fetch_clients(&self) -> ApiResult<Vec<Client>>;
        fn update_product(&self, product_id: i32, patch: &ProductPatch) -> ApiResult<Product>;
    }
}

mock! {
    pub SalesGateway {}

    impl SalesGateway for SalesGateway {
        fn submit_sale(&self, request: &SaleRequest) -> ApiResult<SaleReceipt>;
    }
}
