pub mod api;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod forms;
pub mod services;
pub mod session;

/// Upper bound for a single cart line's quantity.
pub const MAX_LINE_QUANTITY: i64 = 9_999;
