//! Inventory - the full card collection
//!
//! Loaded once at startup and shared read-only. Every filter pass produces
//! an `InventoryView` over it; hidden cards stay in the collection so the
//! next pass can bring them back.

use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::Serialize;
use thiserror::Error;

use super::filter::{visible_positions, FilterState};
use super::types::VehicleCard;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("failed to read inventory file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse inventory JSON")]
    Json(#[from] serde_json::Error),
}

/// Result of one filter pass, as positions into the inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryView {
    /// Visible cards in display order
    pub visible: Vec<usize>,
    /// Hidden cards in original order
    pub hidden: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct Inventory {
    cards: Vec<VehicleCard>,
}

impl Inventory {
    pub fn new(cards: Vec<VehicleCard>) -> Self {
        Self { cards }
    }

    /// Load a JSON array of cards
    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        let contents = fs::read_to_string(path).map_err(|source| InventoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, InventoryError> {
        let cards: Vec<VehicleCard> = serde_json::from_str(json)?;
        Ok(Self::new(cards))
    }

    pub fn cards(&self) -> &[VehicleCard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&VehicleCard> {
        self.cards.get(position)
    }

    /// Partition the full collection for the given selections
    pub fn view(&self, state: &FilterState) -> InventoryView {
        let visible = visible_positions(&self.cards, state);

        let mut shown = vec![false; self.cards.len()];
        for &i in &visible {
            shown[i] = true;
        }
        let hidden = (0..self.cards.len()).filter(|&i| !shown[i]).collect();

        InventoryView { visible, hidden }
    }

    /// Visible cards of a view, in display order
    pub fn visible_cards(&self, view: &InventoryView) -> Vec<&VehicleCard> {
        view.visible.iter().filter_map(|&i| self.cards.get(i)).collect()
    }

    /// Distinct categories in first-seen order (for the category select)
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for card in &self.cards {
            if !seen.contains(&card.category.as_str()) {
                seen.push(&card.category);
            }
        }
        seen
    }

    /// Number of cards per category
    pub fn category_counts(&self) -> FxHashMap<&str, usize> {
        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(card.category.as_str()).or_insert(0) += 1;
        }
        counts
    }
}
