use serde::{Deserialize, Serialize};

/// What changed since the host last painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationTopic {
    /// New input series: domain, legend presence and paths.
    Series,
    /// Container width changed: x range, axes, paths, legend anchor.
    Layout,
    /// Hover selection or visibility changed.
    Cursor,
}

impl InvalidationTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::Series => 1 << 0,
            Self::Layout => 1 << 1,
            Self::Cursor => 1 << 2,
        }
    }
}

/// Bitmask of invalidation topics used by hosts for selective repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvalidationTopics {
    bits: u8,
}

impl InvalidationTopics {
    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: InvalidationTopic::Series.bit()
                | InvalidationTopic::Layout.bit()
                | InvalidationTopic::Cursor.bit(),
        }
    }

    #[must_use]
    pub const fn with(self, topic: InvalidationTopic) -> Self {
        Self {
            bits: self.bits | topic.bit(),
        }
    }

    pub fn insert(&mut self, topic: InvalidationTopic) {
        self.bits |= topic.bit();
    }

    #[must_use]
    pub const fn contains(self, topic: InvalidationTopic) -> bool {
        self.bits & topic.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Whether the change requires more than a cursor overlay repaint.
    #[must_use]
    pub const fn requires_full_redraw(self) -> bool {
        self.contains(InvalidationTopic::Series) || self.contains(InvalidationTopic::Layout)
    }
}
