//! Route rules and the validated table that holds them.

use morpho_core::{ErrorTag, TaskCatalog, TaskId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{Result, RoutingError};

/// One entry of the route table.
///
/// Exactly one of `if_error_tag` and `if_mastered` is set in a valid rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    /// Task category this rule applies to.
    pub from_task_type: String,
    /// Fires when the signal carries this tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_error_tag: Option<ErrorTag>,
    /// Fires when the signal's mastery flag equals this value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub if_mastered: Option<bool>,
    /// Next task.
    pub to_task_id: TaskId,
}

impl RouteRule {
    /// Error-tag rule.
    pub fn on_error(from_task_type: impl Into<String>, tag: ErrorTag, to: impl Into<TaskId>) -> Self {
        Self {
            from_task_type: from_task_type.into(),
            if_error_tag: Some(tag),
            if_mastered: None,
            to_task_id: to.into(),
        }
    }

    /// Mastery rule.
    pub fn on_mastered(from_task_type: impl Into<String>, mastered: bool, to: impl Into<TaskId>) -> Self {
        Self {
            from_task_type: from_task_type.into(),
            if_error_tag: None,
            if_mastered: Some(mastered),
            to_task_id: to.into(),
        }
    }

    fn check(&self, index: usize) -> Result<()> {
        let invalid = |message: &str| RoutingError::InvalidRule {
            index,
            from_task_type: self.from_task_type.clone(),
            message: message.to_owned(),
        };
        if self.from_task_type.trim().is_empty() {
            return Err(invalid("empty from_task_type"));
        }
        if self.to_task_id.trim().is_empty() {
            return Err(invalid("empty to_task_id"));
        }
        match (self.if_error_tag, self.if_mastered) {
            (None, None) => Err(invalid("needs if_error_tag or if_mastered")),
            (Some(_), Some(_)) => Err(invalid("sets both if_error_tag and if_mastered")),
            _ => Ok(()),
        }
    }
}

/// Ordered, validated route rules.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RouteTable {
    routes: Vec<RouteRule>,
}

#[derive(Deserialize)]
struct RawTable {
    routes: Vec<RouteRule>,
}

impl RouteTable {
    /// Build a table, rejecting malformed rules.
    pub fn new(routes: Vec<RouteRule>) -> Result<Self> {
        for (index, rule) in routes.iter().enumerate() {
            rule.check(index)?;
        }
        debug!(count = routes.len(), "route table loaded");
        Ok(Self { routes })
    }

    /// Parse `{ "routes": [...] }`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawTable = serde_json::from_str(json)?;
        Self::new(raw.routes)
    }

    /// Reject rules whose target is not in the catalog.
    pub fn validate_targets(&self, catalog: &TaskCatalog) -> Result<()> {
        for (index, rule) in self.routes.iter().enumerate() {
            if !catalog.contains(&rule.to_task_id) {
                return Err(RoutingError::UnknownTarget {
                    index,
                    to_task_id: rule.to_task_id.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Rules in table order.
    pub fn routes(&self) -> &[RouteRule] {
        &self.routes
    }

    /// Rules for one task category, in table order.
    pub fn rules_for<'a>(&'a self, task_type: &'a str) -> impl Iterator<Item = &'a RouteRule> {
        self.routes
            .iter()
            .filter(move |rule| rule.from_task_type == task_type)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
