use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

use csv::{StringRecord, Trim};
use thiserror::Error;

use crate::domain::money::parse_amount;
use crate::domain::product::Product;
use crate::forms::sanitize_inline_text;

/// Result type returned by the catalog snapshot helpers.
pub type CatalogUploadResult<T> = Result<T, CatalogUploadError>;

/// Errors that can occur while loading a catalog snapshot from CSV.
#[derive(Debug, Error)]
pub enum CatalogUploadError {
    /// The CSV is missing required columns.
    #[error("snapshot is missing the required `id`, `name` or `price` headers")]
    MissingRequiredHeaders,
    /// A row has an unusable product id.
    #[error("row {row} has no usable product id")]
    InvalidId { row: usize },
    /// A row is missing a product name.
    #[error("row {row} is missing a product name")]
    MissingName { row: usize },
    /// A row has an unusable amount in a price column.
    #[error("row {row} has invalid {field} `{value}`")]
    InvalidAmount {
        row: usize,
        field: &'static str,
        value: String,
    },
    /// A row has an unusable integer column.
    #[error("row {row} has invalid {field} `{value}`")]
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },
    /// Two rows share a product id.
    #[error("row {row} repeats product id {id}")]
    DuplicateId { row: usize, id: i32 },
    /// Two rows share a barcode.
    #[error("row {row} repeats barcode `{value}`")]
    DuplicateBarcode { row: usize, value: String },
    /// Two rows share an article code.
    #[error("row {row} repeats item number `{value}`")]
    DuplicateItemNumber { row: usize, value: String },
    /// The snapshot contains no products.
    #[error("snapshot contains no products")]
    EmptyUpload,
    /// Reading the snapshot file failed.
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    /// CSV parsing failures.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// CSV-backed catalog snapshot, used to seed a register without the
/// products endpoint.
///
/// Requires `id`, `name` and `price` columns; `barcode`, `item_number`,
/// `price_retail`, `price_bulk`, `stock`, `description`, `category`,
/// `size_range` and `units_per_bundle` are optional. Matching relies on
/// unique ids, barcodes and item numbers, so duplicates are rejected
/// here.
#[derive(Debug)]
pub struct CatalogUpload {
    /// Optional filename provided by the caller.
    pub file_name: Option<String>,
    /// Raw CSV bytes.
    pub bytes: Vec<u8>,
}

impl CatalogUpload {
    /// Construct an upload from in-memory CSV data.
    pub fn new(file_name: Option<String>, bytes: Vec<u8>) -> Self {
        Self { file_name, bytes }
    }

    /// Read an upload from a CSV file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CatalogUploadResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        Ok(Self { file_name, bytes })
    }

    /// Parse the CSV into catalog products.
    pub fn into_products(self) -> CatalogUploadResult<Vec<Product>> {
        let CatalogUpload { bytes, .. } = self;
        let cursor = Cursor::new(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(cursor);

        let headers = reader.headers()?.clone();
        let columns = locate_catalog_headers(&headers);

        let (Some(id_index), Some(name_index), Some(price_index)) =
            (columns.id, columns.name, columns.price)
        else {
            return Err(CatalogUploadError::MissingRequiredHeaders);
        };

        let mut products = Vec::new();
        let mut seen_ids: HashSet<i32> = HashSet::new();
        let mut seen_barcodes: HashSet<String> = HashSet::new();
        let mut seen_item_numbers: HashSet<String> = HashSet::new();

        for (index, row) in reader.records().enumerate() {
            let row_number = index + 2; // account for header row
            let record = row?;

            let id: i32 = field(&record, Some(id_index))
                .and_then(|value| value.parse().ok())
                .ok_or(CatalogUploadError::InvalidId { row: row_number })?;
            if !seen_ids.insert(id) {
                return Err(CatalogUploadError::DuplicateId {
                    row: row_number,
                    id,
                });
            }

            let name = field(&record, Some(name_index))
                .map(sanitize_inline_text)
                .filter(|value| !value.is_empty())
                .ok_or(CatalogUploadError::MissingName { row: row_number })?;

            let barcode = field(&record, columns.barcode).map(str::to_string);
            if let Some(barcode) = barcode.as_ref()
                && !seen_barcodes.insert(barcode.clone())
            {
                return Err(CatalogUploadError::DuplicateBarcode {
                    row: row_number,
                    value: barcode.clone(),
                });
            }

            let item_number = field(&record, columns.item_number).map(str::to_string);
            if let Some(item_number) = item_number.as_ref()
                && !seen_item_numbers.insert(item_number.to_lowercase())
            {
                return Err(CatalogUploadError::DuplicateItemNumber {
                    row: row_number,
                    value: item_number.clone(),
                });
            }

            // an empty price cell falls back to zero, like the wire payload
            let price_cents = parse_amount_field(&record, Some(price_index), "price", row_number)?
                .unwrap_or(0);
            let retail_price_cents =
                parse_amount_field(&record, columns.price_retail, "retail price", row_number)?;
            let bulk_price_cents =
                parse_amount_field(&record, columns.price_bulk, "bulk price", row_number)?;

            let stock_quantity =
                parse_integer_field(&record, columns.stock, "stock", row_number)?.unwrap_or(0);
            let units_per_bundle =
                parse_integer_field(&record, columns.units_per_bundle, "units per bundle", row_number)?;

            let description = field(&record, columns.description)
                .map(sanitize_inline_text)
                .filter(|value| !value.is_empty());
            let category = field(&record, columns.category)
                .map(sanitize_inline_text)
                .filter(|value| !value.is_empty());
            let size_range = field(&record, columns.size_range)
                .map(sanitize_inline_text)
                .filter(|value| !value.is_empty());

            products.push(Product {
                id,
                name,
                description,
                barcode,
                item_number,
                price_cents,
                retail_price_cents,
                bulk_price_cents,
                stock_quantity,
                min_stock_level: 0,
                category,
                size_range,
                units_per_bundle,
            });
        }

        if products.is_empty() {
            return Err(CatalogUploadError::EmptyUpload);
        }

        Ok(products)
    }
}

struct CatalogHeaderIndexes {
    id: Option<usize>,
    name: Option<usize>,
    price: Option<usize>,
    price_retail: Option<usize>,
    price_bulk: Option<usize>,
    barcode: Option<usize>,
    item_number: Option<usize>,
    stock: Option<usize>,
    description: Option<usize>,
    category: Option<usize>,
    size_range: Option<usize>,
    units_per_bundle: Option<usize>,
}

fn locate_catalog_headers(headers: &StringRecord) -> CatalogHeaderIndexes {
    CatalogHeaderIndexes {
        id: locate_header(headers, "id"),
        name: locate_header(headers, "name"),
        price: locate_header(headers, "price"),
        price_retail: locate_header(headers, "price_retail"),
        price_bulk: locate_header(headers, "price_bulk"),
        barcode: locate_header(headers, "barcode"),
        item_number: locate_header(headers, "item_number"),
        stock: locate_header(headers, "stock"),
        description: locate_header(headers, "description"),
        category: locate_header(headers, "category"),
        size_range: locate_header(headers, "size_range"),
        units_per_bundle: locate_header(headers, "units_per_bundle"),
    }
}

fn locate_header(headers: &StringRecord, expected: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(expected))
}

fn field<'a>(record: &'a StringRecord, index: Option<usize>) -> Option<&'a str> {
    index
        .and_then(|index| record.get(index))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_amount_field(
    record: &StringRecord,
    index: Option<usize>,
    name: &'static str,
    row_number: usize,
) -> CatalogUploadResult<Option<i64>> {
    match field(record, index) {
        None => Ok(None),
        Some(raw) => parse_amount(raw)
            .map(Some)
            .ok_or(CatalogUploadError::InvalidAmount {
                row: row_number,
                field: name,
                value: raw.to_string(),
            }),
    }
}

fn parse_integer_field(
    record: &StringRecord,
    index: Option<usize>,
    name: &'static str,
    row_number: usize,
) -> CatalogUploadResult<Option<i64>> {
    match field(record, index) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| CatalogUploadError::InvalidNumber {
                row: row_number,
                field: name,
                value: raw.to_string(),
            }),
    }
}
