use serde::{Deserialize, Serialize};

/// The kind of a reviewable item. Variant order defines the column ranges of
/// the rating matrix: songs first, then albums, then artists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Song,
    Album,
    Artist,
}

impl ItemKind {
    /// All kinds in matrix-range order.
    pub const ALL: [ItemKind; 3] = [ItemKind::Song, ItemKind::Album, ItemKind::Artist];
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Song => write!(f, "song"),
            ItemKind::Album => write!(f, "album"),
            ItemKind::Artist => write!(f, "artist"),
        }
    }
}

/// 1-based per-kind item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl ItemId {
    pub fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lightweight item identity: `(id, kind)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: ItemId,
    pub kind: ItemKind,
}

impl ItemRef {
    pub fn new(kind: ItemKind, id: ItemId) -> Self {
        Self { id, kind }
    }
}

impl std::fmt::Display for ItemRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// A reviewable entity: song, album, or artist.
///
/// Identity (equality, hashing) is `(id, kind)` only; the display name is
/// payload. Derived per-generation state such as TF-IDF vectors never lives
/// here; it is owned by the engine generation that computed it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub name: String,
}

impl Item {
    pub fn new(kind: ItemKind, id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
        }
    }

    pub fn item_ref(&self) -> ItemRef {
        ItemRef {
            id: self.id,
            kind: self.kind,
        }
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.kind == other.kind
    }
}

impl Eq for Item {}

impl std::hash::Hash for Item {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.kind.hash(state);
    }
}

/// Per-kind catalog sizes, used to lay out the rating-matrix column ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCounts {
    pub songs: usize,
    pub albums: usize,
    pub artists: usize,
}

impl ItemCounts {
    pub fn total(&self) -> usize {
        self.songs + self.albums + self.artists
    }

    /// Column offset of a kind's range: songs at 0, albums after songs,
    /// artists after albums.
    pub fn offset(&self, kind: ItemKind) -> usize {
        match kind {
            ItemKind::Song => 0,
            ItemKind::Album => self.songs,
            ItemKind::Artist => self.songs + self.albums,
        }
    }

    /// Number of columns in a kind's range.
    pub fn span(&self, kind: ItemKind) -> usize {
        match kind {
            ItemKind::Song => self.songs,
            ItemKind::Album => self.albums,
            ItemKind::Artist => self.artists,
        }
    }
}
