//! # pdv-db
//!
//! SQLite persistence for Mini PDV: the connection pool, the embedded
//! schema, product and sale repositories, and the transactional checkout.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  pdv-server handlers                                                   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Database ──┬── products()  → ProductRepository   (CRUD)               │
//! │  (pool.rs)  ├── sales()     → SaleRepository      (read-only)          │
//! │             └── checkout()  → one Transaction: decrement + insert sale │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  pdv.db  (WAL)   tables: products, sales                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```rust,ignore
//! use pdv_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./pdv.db")).await?;
//! let sale = db.checkout(&request.items).await?;
//! ```

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use checkout::CheckoutError;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
