use crate::api::CatalogProvider;
use crate::domain::product::Product;
use crate::forms::products::EditProductForm;
use crate::services::{ServiceError, ServiceResult};
use crate::session::RegisterSession;

/// Pushes a product edit to the backend and mirrors it in the local
/// catalog.
///
/// The catalog copy only changes once the backend has accepted the
/// patch.
pub fn update_product<P>(
    session: &mut RegisterSession,
    provider: &P,
    product_id: i32,
    form: EditProductForm,
) -> ServiceResult<Product>
where
    P: CatalogProvider + ?Sized,
{
    if session.is_locked() {
        return Err(ServiceError::EditingLocked);
    }

    if session.catalog.get(product_id).is_none() {
        return Err(ServiceError::ProductNotFound(product_id));
    }

    let patch = form
        .into_product_patch()
        .map_err(|err| ServiceError::Validation(err.to_string()))?;

    let updated = provider
        .update_product(product_id, &patch)
        .map_err(ServiceError::from)?;

    session.catalog.apply_update(updated.clone());
    log::info!("product {product_id} updated");

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::api::mock::MockCatalogProvider;

    fn product(id: i32, name: &str, price_cents: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: None,
            barcode: None,
            item_number: Some(format!("70{id:02}")),
            price_cents,
            retail_price_cents: None,
            bulk_price_cents: None,
            stock_quantity: 120,
            min_stock_level: 10,
            category: None,
            size_range: None,
            units_per_bundle: None,
        }
    }

    fn session_with_product() -> RegisterSession {
        let mut session = RegisterSession::default();
        session
            .catalog
            .replace(vec![product(1, "Gomon Pin Negro", 750_000)]);
        session
    }

    fn edit_form() -> EditProductForm {
        EditProductForm {
            name: Some(" Gomon Pin Negro ".to_string()),
            description: None,
            price: Some("7800.00".to_string()),
            price_retail: Some("8000.00".to_string()),
            price_bulk: Some("".to_string()),
            stock_quantity: Some(95),
        }
    }

    #[test]
    fn update_product_patches_backend_and_catalog() {
        let mut session = session_with_product();

        let mut provider = MockCatalogProvider::new();
        provider
            .expect_update_product()
            .times(1)
            .withf(|product_id, patch| {
                assert_eq!(*product_id, 1);
                assert_eq!(patch.name.as_deref(), Some("Gomon Pin Negro"));
                assert_eq!(patch.price_cents, Some(780_000));
                assert_eq!(patch.retail_price_cents, Some(Some(800_000)));
                assert_eq!(patch.bulk_price_cents, Some(None));
                assert_eq!(patch.stock_quantity, Some(95));
                true
            })
            .returning(|product_id, patch| {
                let mut updated = product(product_id, "Gomon Pin Negro", 780_000);
                updated.retail_price_cents = Some(800_000);
                if let Some(quantity) = patch.stock_quantity {
                    updated.stock_quantity = quantity;
                }
                Ok(updated)
            });

        let updated = update_product(&mut session, &provider, 1, edit_form())
            .expect("expected success");

        assert_eq!(updated.price_cents, 780_000);
        assert_eq!(
            session.catalog.get(1).map(|p| (p.price_cents, p.stock_quantity)),
            Some((780_000, 95))
        );
    }

    #[test]
    fn update_product_rejects_unknown_products() {
        let mut session = session_with_product();
        let provider = MockCatalogProvider::new();

        let result = update_product(&mut session, &provider, 99, edit_form());

        assert!(matches!(result, Err(ServiceError::ProductNotFound(99))));
    }

    #[test]
    fn update_product_rejects_empty_forms() {
        let mut session = session_with_product();
        let provider = MockCatalogProvider::new();

        let form = EditProductForm {
            name: None,
            description: None,
            price: None,
            price_retail: None,
            price_bulk: None,
            stock_quantity: None,
        };

        let result = update_product(&mut session, &provider, 1, form);

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn update_product_keeps_the_catalog_on_backend_rejection() {
        let mut session = session_with_product();

        let mut provider = MockCatalogProvider::new();
        provider
            .expect_update_product()
            .times(1)
            .returning(|_, _| {
                Err(ApiError::rejected_from_body(
                    r#"{"detail": "Product not found"}"#,
                ))
            });

        let result = update_product(&mut session, &provider, 1, edit_form());

        assert!(matches!(result, Err(ServiceError::Rejected(_))));
        assert_eq!(session.catalog.get(1).map(|p| p.price_cents), Some(750_000));
    }

    #[test]
    fn update_product_is_refused_during_checkout() {
        let mut session = session_with_product();
        session.enter_checkout();
        let provider = MockCatalogProvider::new();

        let result = update_product(&mut session, &provider, 1, edit_form());

        assert!(matches!(result, Err(ServiceError::EditingLocked)));
    }
}
