//! Table access, one repository per table.
//!
//! Each call borrows a pooled connection for its own duration. Sales have no
//! insert here; they are written only by
//! [`Database::checkout`](crate::Database::checkout).

pub mod product;
pub mod sale;
