use crate::domain::product::Product;

/// In-memory snapshot of the product catalog, kept in backend order.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a freshly fetched snapshot. Returns the product count.
    pub fn replace(&mut self, products: Vec<Product>) -> usize {
        self.products = products;
        self.products.len()
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Whether the snapshot holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Number of products in the snapshot.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Look up a product by id.
    pub fn get(&self, id: i32) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Replace the entry matching `product.id` after a quick edit.
    ///
    /// An id missing from the snapshot is ignored; the next full
    /// refresh reconciles.
    pub fn apply_update(&mut self, product: Product) {
        if let Some(existing) = self
            .products
            .iter_mut()
            .find(|candidate| candidate.id == product.id)
        {
            *existing = product;
        }
    }

    /// Substring match against name, barcode and article code.
    ///
    /// The term is lowercased once; names and article codes are
    /// compared lowercased, barcodes as stored. An empty term matches
    /// every product at this layer; hiding the idle catalog is a policy
    /// applied by the caller.
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let needle = term.trim().to_lowercase();
        self.products
            .iter()
            .filter(|product| product_matches(product, &needle))
            .collect()
    }

    /// Resolve a scanned or typed code to exactly one product.
    ///
    /// Matches the barcode byte-for-byte or the article code ignoring
    /// ASCII case. The first product in catalog order wins when the
    /// data carries duplicates.
    pub fn match_exact(&self, term: &str) -> Option<&Product> {
        self.products.iter().find(|product| {
            product.barcode.as_deref() == Some(term)
                || product
                    .item_number
                    .as_deref()
                    .is_some_and(|code| code.eq_ignore_ascii_case(term))
        })
    }
}

fn product_matches(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    if product.name.to_lowercase().contains(needle) {
        return true;
    }

    if product
        .barcode
        .as_deref()
        .is_some_and(|barcode| barcode.contains(needle))
    {
        return true;
    }

    product
        .item_number
        .as_deref()
        .is_some_and(|code| code.to_lowercase().contains(needle))
}

/// Strips surrounding whitespace from scanner input, including the
/// trailing CR/LF/TAB terminator most scanners append.
pub fn normalize_scan(input: &str) -> &str {
    input.trim()
}
