//! # pdv-core
//!
//! The point-of-sale domain without I/O: products, sales, request payloads,
//! field rules, checkout planning and the stored line-item format.
//!
//! `pdv-db` feeds [`checkout::plan_checkout`] the products a request
//! references and applies the returned [`CheckoutPlan`] inside one
//! transaction; nothing in this crate touches the database.
//!
//! ## Example
//!
//! ```rust
//! use pdv_core::checkout::plan_checkout;
//! use pdv_core::{CheckoutItem, Product};
//!
//! let stock = vec![Product { id: 1, name: "Coffee".into(), price: 10.0, stock: 5 }];
//! let plan = plan_checkout(&[CheckoutItem { product_id: 1, quantity: 2 }], &stock).unwrap();
//!
//! assert_eq!(plan.total, 20.0);
//! assert_eq!(plan.decrements[0].quantity, 2);
//! ```

pub mod checkout;
pub mod error;
pub mod line_items;
pub mod types;
pub mod validation;

pub use checkout::{CheckoutPlan, StockDecrement};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

/// Maximum length of a product name, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
