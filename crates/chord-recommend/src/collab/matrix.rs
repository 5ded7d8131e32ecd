//! Dense user × item rating matrix, rebuilt per request.
//!
//! Columns are laid out as the concatenation of the song, album, and artist
//! ranges. Rows are assigned through [`UserIndex`], an explicit bijective
//! `UserId -> row` mapping; user identifiers are never reused as indices
//! directly.

use std::collections::HashMap;

use tracing::{debug, warn};

use chord_core::errors::ChordResult;
use chord_core::models::{ItemCounts, ItemId, ItemKind, ItemRef, UserId};
use chord_core::traits::ICatalogStore;

/// Bijective mapping between user ids and dense matrix rows.
///
/// Row order follows the catalog's user iteration order for a fixed
/// snapshot. Whether the id-issuing collaborator keeps ids dense under
/// deletion is its own concern; only this table would change if it did not.
#[derive(Debug)]
pub struct UserIndex {
    rows: HashMap<UserId, usize>,
    users: Vec<UserId>,
}

impl UserIndex {
    pub fn build(catalog: &dyn ICatalogStore) -> ChordResult<Self> {
        let users = catalog.user_ids()?;
        let rows = users
            .iter()
            .enumerate()
            .map(|(row, user)| (*user, row))
            .collect();
        Ok(Self { rows, users })
    }

    pub fn row_of(&self, user: UserId) -> Option<usize> {
        self.rows.get(&user).copied()
    }

    pub fn user_at(&self, row: usize) -> UserId {
        self.users[row]
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn users(&self) -> &[UserId] {
        &self.users
    }
}

/// Dense row-major rating matrix. Zero means unrated.
#[derive(Debug)]
pub struct RatingMatrix {
    cells: Vec<f64>,
    cols: usize,
    counts: ItemCounts,
    user_index: UserIndex,
}

impl RatingMatrix {
    /// Build the matrix from every user's reviews. First write wins:
    /// duplicate ratings for the same user/item never overwrite. Records
    /// whose target falls outside the known item ranges are logged and
    /// skipped.
    pub fn build(catalog: &dyn ICatalogStore) -> ChordResult<Self> {
        let counts = catalog.item_counts()?;
        let user_index = UserIndex::build(catalog)?;
        let cols = counts.total();
        let mut cells = vec![0.0; user_index.len() * cols];

        for (row, user) in user_index.users().iter().enumerate() {
            for review in catalog.reviews_by_user(*user)? {
                let Some(col) = col_of(&counts, review.target) else {
                    warn!(user = %user, target = %review.target, "rating targets an out-of-range item; skipped");
                    continue;
                };
                let cell = &mut cells[row * cols + col];
                if *cell == 0.0 {
                    *cell = f64::from(review.rating.value());
                }
            }
        }

        debug!(
            rows = user_index.len(),
            cols,
            "rating matrix built"
        );
        Ok(Self {
            cells,
            cols,
            counts,
            user_index,
        })
    }

    pub fn rows(&self) -> usize {
        self.user_index.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row_of(&self, user: UserId) -> Option<usize> {
        self.user_index.row_of(user)
    }

    pub fn user_at(&self, row: usize) -> UserId {
        self.user_index.user_at(row)
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn value(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.cols + col]
    }

    /// Inverse of the column layout: which item a column stands for.
    pub fn item_ref_of_col(&self, col: usize) -> ItemRef {
        debug_assert!(col < self.cols);
        for kind in ItemKind::ALL {
            let offset = self.counts.offset(kind);
            if col < offset + self.counts.span(kind) {
                return ItemRef::new(kind, ItemId((col - offset) as u32 + 1));
            }
        }
        unreachable!("column {col} outside all item ranges");
    }
}

/// Column of a rating target: `(id - 1) + offset(kind)`, or `None` when the
/// id falls outside its kind's range (malformed record).
fn col_of(counts: &ItemCounts, target: ItemRef) -> Option<usize> {
    let id = target.id.value() as usize;
    if id == 0 || id > counts.span(target.kind) {
        return None;
    }
    Some(id - 1 + counts.offset(target.kind))
}
