//! Reactions - like/dislike state per user per post or comment
//!
//! A [`ReactionSet`] keeps three buckets (`likes`, `dislikes`, `none`).
//! A user is present in at most one of them. The `none` bucket records a
//! withdrawn reaction so "never reacted" and "reacted then reset" stay
//! distinguishable in storage; clients only ever see [`LikeStatus::None`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Like status as exposed to clients and accepted in `likeStatus` bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LikeStatus {
    #[default]
    None,
    Like,
    Dislike,
}

impl LikeStatus {
    pub const ALL: [LikeStatus; 3] = [LikeStatus::Like, LikeStatus::Dislike, LikeStatus::None];

    /// Storage/wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Like => "Like",
            Self::Dislike => "Dislike",
        }
    }
}

impl fmt::Display for LikeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LikeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(Self::None),
            "Like" => Ok(Self::Like),
            "Dislike" => Ok(Self::Dislike),
            other => Err(format!("unknown like status: {other}")),
        }
    }
}

/// Kind of entity that can be reacted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactableKind {
    Post,
    Comment,
}

/// A post or comment addressed by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReactionTarget {
    pub kind: ReactableKind,
    pub id: Uuid,
}

impl ReactionTarget {
    pub fn post(id: Uuid) -> Self {
        Self {
            kind: ReactableKind::Post,
            id,
        }
    }

    pub fn comment(id: Uuid) -> Self {
        Self {
            kind: ReactableKind::Comment,
            id,
        }
    }
}

/// One user's reaction record. Never mutated, only moved between buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reaction {
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Outcome of [`ReactionSet::set`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No prior entry and the requested status was `None`
    Unchanged,
    /// A fresh entry was placed in the bucket for `current`
    Placed {
        previous: Option<LikeStatus>,
        current: LikeStatus,
    },
}

/// Counts and viewer status for a single reactable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LikesInfo {
    pub likes_count: u64,
    pub dislikes_count: u64,
    pub my_status: LikeStatus,
}

/// The three reaction buckets of one post or comment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionSet {
    likes: Vec<Reaction>,
    dislikes: Vec<Reaction>,
    none: Vec<Reaction>,
}

impl ReactionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a set from stored `(status, reaction)` rows.
    ///
    /// A later row for the same user replaces an earlier one, so the
    /// single-bucket invariant holds even for inconsistent input.
    pub fn from_entries(entries: impl IntoIterator<Item = (LikeStatus, Reaction)>) -> Self {
        let mut set = Self::new();
        for (status, reaction) in entries {
            set.remove(reaction.user_id);
            set.bucket_mut(status).push(reaction);
        }
        set
    }

    pub fn bucket(&self, status: LikeStatus) -> &[Reaction] {
        match status {
            LikeStatus::Like => &self.likes,
            LikeStatus::Dislike => &self.dislikes,
            LikeStatus::None => &self.none,
        }
    }

    fn bucket_mut(&mut self, status: LikeStatus) -> &mut Vec<Reaction> {
        match status {
            LikeStatus::Like => &mut self.likes,
            LikeStatus::Dislike => &mut self.dislikes,
            LikeStatus::None => &mut self.none,
        }
    }

    /// Bucket currently holding `user_id`, if any
    pub fn status_of(&self, user_id: Uuid) -> Option<LikeStatus> {
        LikeStatus::ALL
            .into_iter()
            .find(|status| self.bucket(*status).iter().any(|r| r.user_id == user_id))
    }

    /// Move `user_id` into the bucket for `desired`, stamping the entry with `at`.
    ///
    /// The previous entry is filtered out of every bucket before the insert,
    /// leaving no holes and no duplicates.
    pub fn set(&mut self, user_id: Uuid, desired: LikeStatus, at: DateTime<Utc>) -> Transition {
        let previous = self.remove(user_id);
        if previous.is_none() && desired == LikeStatus::None {
            return Transition::Unchanged;
        }

        self.bucket_mut(desired).push(Reaction {
            user_id,
            created_at: at,
        });
        Transition::Placed {
            previous,
            current: desired,
        }
    }

    fn remove(&mut self, user_id: Uuid) -> Option<LikeStatus> {
        let mut found = None;
        for status in LikeStatus::ALL {
            let bucket = self.bucket_mut(status);
            let before = bucket.len();
            bucket.retain(|r| r.user_id != user_id);
            if bucket.len() != before && found.is_none() {
                found = Some(status);
            }
        }
        found
    }

    #[inline]
    pub fn likes_count(&self) -> u64 {
        self.likes.len() as u64
    }

    #[inline]
    pub fn dislikes_count(&self) -> u64 {
        self.dislikes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.likes.is_empty() && self.dislikes.is_empty() && self.none.is_empty()
    }

    /// Status of `viewer`; anonymous viewers always get `None`.
    ///
    /// Dislikes are checked after likes and win if both match.
    pub fn my_status(&self, viewer: Option<Uuid>) -> LikeStatus {
        let Some(viewer) = viewer else {
            return LikeStatus::None;
        };

        let mut status = LikeStatus::None;
        if self.likes.iter().any(|r| r.user_id == viewer) {
            status = LikeStatus::Like;
        }
        if self.dislikes.iter().any(|r| r.user_id == viewer) {
            status = LikeStatus::Dislike;
        }
        status
    }

    /// Project the set into client-facing counts for `viewer`
    pub fn project(&self, viewer: Option<Uuid>) -> LikesInfo {
        LikesInfo {
            likes_count: self.likes_count(),
            dislikes_count: self.dislikes_count(),
            my_status: self.my_status(viewer),
        }
    }

    /// Most recent likes, newest first
    pub fn newest_likes(&self, limit: usize) -> Vec<Reaction> {
        let mut likes = self.likes.clone();
        likes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        likes.truncate(limit);
        likes
    }

    /// Every stored entry with its bucket
    pub fn entries(&self) -> impl Iterator<Item = (LikeStatus, &Reaction)> {
        LikeStatus::ALL
            .into_iter()
            .flat_map(move |status| self.bucket(status).iter().map(move |r| (status, r)))
    }
}
