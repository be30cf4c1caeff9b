//! Vehicle Inventory Module
//!
//! Listing data for the showroom pages and the filter/sort engine that
//! drives the inventory grid.
//!
//! ## Pieces
//! - `types`: `VehicleCard` and its display content
//! - `filter`: `FilterState`, `PriceRange`, `SortKey` and the pure `apply` pass
//! - `catalog`: `Inventory`, the full collection plus per-request views

pub mod types;
pub mod filter;
pub mod catalog;

pub use types::VehicleCard;
pub use filter::{apply, CategoryFilter, FilterError, FilterState, PriceRange, SortKey};
pub use catalog::{Inventory, InventoryError, InventoryView};
