//! Identity and timestamp lifecycle shared by all entities
//!
//! Every entity embeds an [`EntityMeta`] by value instead of inheriting from a
//! common base; there is no behavior that varies across entity kinds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity plus creation/modification timestamps
///
/// `id` and `created_at` are fixed at construction. `updated_at` starts equal
/// to `created_at` and only moves forward through [`EntityMeta::touch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMeta<I> {
    /// Unique identifier
    pub(crate) id: I,

    /// When the entity was created
    pub(crate) created_at: DateTime<Utc>,

    /// When the entity was last modified
    pub(crate) updated_at: DateTime<Utc>,
}

impl<I: Copy + Default> EntityMeta<I> {
    /// Assign a fresh ID and stamp both timestamps with the current time
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: I::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<I: Copy + Default> Default for EntityMeta<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Copy> EntityMeta<I> {
    pub fn id(&self) -> I {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Refresh the modification timestamp
    ///
    /// Never moves `updated_at` behind `created_at`, even if the wall clock
    /// has stepped backwards.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.created_at);
    }
}
