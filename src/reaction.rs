//! Reaction domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of reaction a user left on an object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionType {
    #[default]
    Like,
    Love,
    Haha,
    Wow,
    Sad,
    Angry,
}

/// A reaction by an owner on an object.
///
/// `id`, `created_at` and `updated_at` are assigned by the store; callers
/// leave them at their defaults on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: u64,
    pub object_id: u64,
    pub owner_id: u64,
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
    pub deleted: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Reaction {
    pub fn new(object_id: u64, owner_id: u64, reaction_type: ReactionType) -> Self {
        Self {
            object_id,
            owner_id,
            reaction_type,
            ..Self::default()
        }
    }
}

/// Ordered collection of reactions returned by a query.
pub type List = Vec<Reaction>;

/// Filter and pagination parameters for count and query.
///
/// Empty lists and `None` values do not constrain the result.
/// A `limit` of zero means unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    pub before: Option<DateTime<Utc>>,
    pub deleted: Option<bool>,
    pub object_ids: Vec<u64>,
    pub owner_ids: Vec<u64>,
    pub types: Vec<ReactionType>,
    pub limit: usize,
}

impl QueryOptions {
    /// Whether `reaction` passes every filter (ignores `limit`).
    pub fn matches(&self, reaction: &Reaction) -> bool {
        if let Some(deleted) = self.deleted {
            if reaction.deleted != deleted {
                return false;
            }
        }

        if let (Some(before), Some(created)) = (self.before, reaction.created_at) {
            if created >= before {
                return false;
            }
        }

        (self.object_ids.is_empty() || self.object_ids.contains(&reaction.object_id))
            && (self.owner_ids.is_empty() || self.owner_ids.contains(&reaction.owner_id))
            && (self.types.is_empty() || self.types.contains(&reaction.reaction_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_options_match_everything() {
        let reaction = Reaction::new(1, 2, ReactionType::Wow);
        assert!(QueryOptions::default().matches(&reaction));
    }

    #[test]
    fn test_options_filter_by_ids_and_type() {
        let reaction = Reaction::new(10, 20, ReactionType::Love);

        let opts = QueryOptions {
            object_ids: vec![10],
            types: vec![ReactionType::Love, ReactionType::Sad],
            ..Default::default()
        };
        assert!(opts.matches(&reaction));

        let opts = QueryOptions {
            owner_ids: vec![21],
            ..Default::default()
        };
        assert!(!opts.matches(&reaction));
    }

    #[test]
    fn test_options_filter_by_deleted_and_before() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut reaction = Reaction::new(1, 1, ReactionType::Like);
        reaction.created_at = Some(created);
        reaction.deleted = true;

        let opts = QueryOptions {
            deleted: Some(false),
            ..Default::default()
        };
        assert!(!opts.matches(&reaction));

        let opts = QueryOptions {
            before: Some(created),
            ..Default::default()
        };
        assert!(!opts.matches(&reaction));

        let opts = QueryOptions {
            before: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
            deleted: Some(true),
            ..Default::default()
        };
        assert!(opts.matches(&reaction));
    }

    #[test]
    fn test_reaction_type_serializes_lowercase() {
        let json = serde_json::to_value(Reaction::new(1, 2, ReactionType::Haha)).unwrap();
        assert_eq!(json["type"], "haha");
    }
}
