//! Reaction rows -> `ReactionSet`

use std::collections::HashMap;

use blog_core::entities::{LikeStatus, Reaction, ReactionSet};
use blog_core::error::DomainError;
use blog_core::traits::RepoResult;
use uuid::Uuid;

use crate::models::ReactionModel;

impl ReactionModel {
    /// Bucket and record for this row
    pub fn into_entry(self) -> RepoResult<(LikeStatus, Reaction)> {
        let status = self
            .status
            .parse::<LikeStatus>()
            .map_err(DomainError::DatabaseError)?;
        Ok((
            status,
            Reaction {
                user_id: self.user_id,
                created_at: self.created_at,
            },
        ))
    }
}

/// Fold rows (ordered by `created_at`) into one set per entity
pub fn group_reactions(rows: Vec<ReactionModel>) -> RepoResult<HashMap<Uuid, ReactionSet>> {
    let mut entries: HashMap<Uuid, Vec<(LikeStatus, Reaction)>> = HashMap::new();
    for row in rows {
        let entity_id = row.entity_id;
        entries.entry(entity_id).or_default().push(row.into_entry()?);
    }

    Ok(entries
        .into_iter()
        .map(|(id, rows)| (id, ReactionSet::from_entries(rows)))
        .collect())
}
