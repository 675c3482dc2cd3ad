use crate::types::{BoardConfig, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// One fixed column on the wall: a stable identity plus an ordered list of
/// card ids. Order within a column is user-controlled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub cards: Vec<ItemId>,
}

impl Column {
    fn empty(index: usize) -> Self {
        Self {
            id: format!("column-{}", index),
            cards: Vec::new(),
        }
    }
}

/// The whole wall layout: an owned, ordered list of columns.
///
/// Every transition returns a fresh `Board` rather than mutating in place,
/// so a rendering layer can diff old against new by value and the single
/// writer invariant stays mechanical. Transitions are total: whatever the
/// input, a valid `Board` comes back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    columns: Vec<Column>,
}

impl Board {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            columns: (0..config.column_count).map(Column::empty).collect(),
        }
    }

    /// Build a board with the given card placement, one inner vec per column.
    pub fn from_cards(cards: Vec<Vec<ItemId>>) -> Self {
        Self {
            columns: cards
                .into_iter()
                .enumerate()
                .map(|(index, cards)| Column {
                    id: format!("column-{}", index),
                    cards,
                })
                .collect(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }

    /// Locate a card by id, returning (column index, position in column).
    pub fn locate(&self, id: &str) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(col, column)| {
            column
                .cards
                .iter()
                .position(|card| card.as_str() == id)
                .map(|pos| (col, pos))
        })
    }

    fn column_index(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.id == id)
    }

    /// Fold a freshly fetched item list into the current placement.
    ///
    /// Ids no longer present upstream are dropped; surviving cards keep their
    /// column and relative order; brand-new ids are appended to the least
    /// loaded column in the order they appear in `incoming`. A duplicate id in
    /// `incoming` is placed once, at its first occurrence.
    pub fn reconcile(&self, incoming: &[ItemId]) -> Board {
        let keep: HashSet<&ItemId> = incoming.iter().collect();

        let mut columns: Vec<Column> = self
            .columns
            .iter()
            .map(|column| Column {
                id: column.id.clone(),
                cards: column
                    .cards
                    .iter()
                    .filter(|card| keep.contains(card))
                    .cloned()
                    .collect(),
            })
            .collect();

        let mut placed: HashSet<ItemId> = columns
            .iter()
            .flat_map(|column| column.cards.iter().cloned())
            .collect();

        if columns.is_empty() {
            return Board { columns };
        }

        let mut appended = 0usize;
        for id in incoming {
            if placed.contains(id) {
                continue;
            }
            let target = least_loaded(&columns);
            columns[target].cards.push(id.clone());
            placed.insert(id.clone());
            appended += 1;
        }

        debug!(
            "Reconciled {} incoming items: {} new, {} total on board",
            incoming.len(),
            appended,
            placed.len()
        );

        Board { columns }
    }

    /// Apply one completed drag gesture.
    ///
    /// `over_id` is either a column identity (drop on empty column area) or
    /// another card's id (drop over a card, the dragged card lands immediately
    /// before it). Unresolvable gestures are no-ops: a stale drag is never a
    /// reason to lose a card.
    pub fn apply_move(&self, active_id: &str, over_id: &str) -> Board {
        let (source_col, source_pos) = match self.locate(active_id) {
            Some(found) => found,
            None => {
                debug!("Dragged card {} is not on the board, ignoring", active_id);
                return self.clone();
            }
        };

        let over_column = self.column_index(over_id);
        let target_col = match over_column.or_else(|| self.locate(over_id).map(|(col, _)| col)) {
            Some(col) => col,
            None => {
                debug!("Drop target {} resolves to no column, ignoring", over_id);
                return self.clone();
            }
        };

        // Dropping a card onto itself moves nothing.
        if source_col == target_col && active_id == over_id {
            return self.clone();
        }

        let mut columns = self.columns.clone();
        let card = columns[source_col].cards.remove(source_pos);

        // Index is computed after removal; a target card that was the dragged
        // card itself, or has gone stale, falls back to the column tail.
        let insert_pos = if over_column.is_some() {
            columns[target_col].cards.len()
        } else {
            columns[target_col]
                .cards
                .iter()
                .position(|c| c.as_str() == over_id)
                .unwrap_or(columns[target_col].cards.len())
        };
        columns[target_col].cards.insert(insert_pos, card);

        debug!(
            "Moved card {} from column {} to column {} at position {}",
            active_id, source_col, target_col, insert_pos
        );

        Board { columns }
    }
}

/// Index of the column holding the fewest cards; the lowest index wins ties.
pub fn least_loaded(columns: &[Column]) -> usize {
    let mut best = 0;
    for (index, column) in columns.iter().enumerate().skip(1) {
        if column.cards.len() < columns[best].cards.len() {
            best = index;
        }
    }
    best
}
