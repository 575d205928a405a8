// SPDX-License-Identifier: MPL-2.0
//! Cyclic adjacency over the catalog ordering.
//!
//! Pure index arithmetic: both directions wrap around, so every id in the
//! catalog has a next and a previous neighbour (itself, for a one-asset
//! catalog). Position is not tracked here; the viewer owns the selection.

use super::Catalog;
use crate::error::{Error, Result};

/// Returns the id following `current_id` in catalog order, wrapping from the
/// last asset back to the first.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when `current_id` is not in the catalog.
pub fn next(catalog: &Catalog, current_id: &str) -> Result<String> {
    let index = catalog
        .index_of(current_id)
        .ok_or_else(|| Error::NotFound(current_id.to_string()))?;
    let wrapped = (index + 1) % catalog.len();
    Ok(catalog.descriptors()[wrapped].id.clone())
}

/// Returns the id preceding `current_id` in catalog order, wrapping from the
/// first asset back to the last.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when `current_id` is not in the catalog.
pub fn previous(catalog: &Catalog, current_id: &str) -> Result<String> {
    let index = catalog
        .index_of(current_id)
        .ok_or_else(|| Error::NotFound(current_id.to_string()))?;
    let wrapped = if index == 0 {
        catalog.len() - 1
    } else {
        index - 1
    };
    Ok(catalog.descriptors()[wrapped].id.clone())
}
