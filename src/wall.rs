use crate::board::{Board, Column};
use crate::types::{BoardConfig, ItemId, Post};
use std::collections::HashMap;
use tracing::{debug, info};

/// The wall's serialized state: the column layout plus the post records the
/// layout's ids join back to for rendering.
///
/// Both transitions take `&mut self`, so there is exactly one logical writer
/// and transitions apply in the order their events arrive. Each transition
/// replaces the whole `Board` value; callers never observe a half-applied
/// layout.
pub struct Wall {
    board: Board,
    posts: HashMap<ItemId, Post>,
}

impl Wall {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            board: Board::new(config),
            posts: HashMap::new(),
        }
    }

    /// A fresh item list arrived from the feed provider.
    ///
    /// Callers skip this entirely on a failed or empty fetch, which leaves
    /// the layout untouched.
    pub fn on_items_fetched(&mut self, posts: Vec<Post>) {
        let ids: Vec<ItemId> = posts.iter().map(|post| post.id.clone()).collect();

        self.posts = posts
            .into_iter()
            .map(|post| (post.id.clone(), post))
            .collect();
        self.board = self.board.reconcile(&ids);

        info!(
            "Wall reconciled: {} posts across {} columns",
            self.board.card_count(),
            self.board.columns().len()
        );
    }

    /// A drag gesture completed. `over_id` is the column identity or card id
    /// the pointer was released over; an unresolvable target changes nothing.
    pub fn on_drag_completed(&mut self, active_id: &str, over_id: &str) {
        debug!("Drag completed: {} over {}", active_id, over_id);
        self.board = self.board.apply_move(active_id, over_id);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn post(&self, id: &ItemId) -> Option<&Post> {
        self.posts.get(id)
    }

    /// Columns joined back to full post records, in rendering order.
    ///
    /// Ids with no matching record are skipped rather than surfaced; the
    /// board's id set always comes from the same fetch that filled the join
    /// map, so a miss means a stale gesture already handled as a no-op.
    pub fn columns(&self) -> Vec<(&str, Vec<&Post>)> {
        self.board
            .columns()
            .iter()
            .map(|column: &Column| {
                let posts = column
                    .cards
                    .iter()
                    .filter_map(|id| self.posts.get(id))
                    .collect();
                (column.id.as_str(), posts)
            })
            .collect()
    }
}

impl Default for Wall {
    fn default() -> Self {
        Self::new(&BoardConfig::default())
    }
}
