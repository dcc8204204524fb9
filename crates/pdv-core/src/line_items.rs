//! # Line Item Encoding
//!
//! A sale's line items are stored as one versioned JSON document in the
//! `sales.items` column:
//!
//! ```json
//! {"version":1,"items":[{"product_id":1,"name":"Coffee","quantity":2,"unit_price":10.0,"subtotal":20.0}]}
//! ```
//!
//! Readers must check `version` before trusting the shape of `items`.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::LineItem;

/// Encoding version written by this build.
pub const LINE_ITEMS_VERSION: u32 = 1;

#[derive(Serialize)]
struct DocumentRef<'a> {
    version: u32,
    items: &'a [LineItem],
}

#[derive(Deserialize)]
struct Header {
    version: u32,
}

#[derive(Deserialize)]
struct DocumentV1 {
    items: Vec<LineItem>,
}

/// Encodes line items into the current document version.
pub fn encode(items: &[LineItem]) -> CoreResult<String> {
    let document = DocumentRef {
        version: LINE_ITEMS_VERSION,
        items,
    };
    Ok(serde_json::to_string(&document)?)
}

/// Decodes a stored document, dispatching on its version.
pub fn decode(raw: &str) -> CoreResult<Vec<LineItem>> {
    let header: Header = serde_json::from_str(raw)?;

    match header.version {
        1 => {
            let document: DocumentV1 = serde_json::from_str(raw)?;
            Ok(document.items)
        }
        version => Err(CoreError::UnsupportedEncoding { version }),
    }
}
