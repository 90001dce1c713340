//! JSON reports for the one-shot CLI commands.

use anyhow::Result;
use morpho_core::{ErrorTag, ResponseMap};
use morpho_guidance::{GuidanceRules, evaluate_with};
use morpho_join::resolve_join_with_prefix;
use morpho_routing::{RouteSignal, next_task_id};
use morpho_scoring::{ScoringRules, score_with};
use serde_json::{Value, json};

use crate::content::Content;

/// `join`: the resolved word and the convention that fired.
pub fn join_report(base: &str, suffix: &str, prefix: Option<&str>) -> Value {
    let resolution = resolve_join_with_prefix(prefix.unwrap_or_default(), base, suffix);
    let kind = resolution.convention;
    json!({
        "stem": resolution.stem,
        "word": resolution.word,
        "convention": kind,
        "label": kind.label(),
        "explanation": kind.convention().explanation,
        "note": resolution.note,
    })
}

/// `check`: the evidence validator's verdict.
pub fn check_report(
    content: &Content,
    rules: &GuidanceRules,
    task_id: &str,
    responses: &ResponseMap,
) -> Result<Value> {
    let task = content.task(task_id)?;
    let status = evaluate_with(rules, task, responses);
    Ok(json!({
        "task_id": task.id,
        "version": rules.version,
        "supported": status.supported,
        "focus": status.focus,
        "prompts": status.prompts,
    }))
}

/// `score`: the legacy scorer's summary.
pub fn score_report(
    content: &Content,
    rules: &ScoringRules,
    task_id: &str,
    responses: &ResponseMap,
) -> Result<Value> {
    let task = content.task(task_id)?;
    let summary = score_with(rules, task, responses);
    Ok(json!({
        "task_id": task.id,
        "mastered": summary.mastered,
        "error_tags": summary.error_tags,
    }))
}

/// `next`: the routed task id, `null` at the end of the sequence.
pub fn next_report(
    content: &Content,
    task_id: &str,
    mastered: bool,
    error_tags: &[ErrorTag],
) -> Result<Value> {
    let task = content.task(task_id)?;
    let signal = RouteSignal {
        mastered,
        error_tags: error_tags.to_vec(),
    };
    let next = next_task_id(&content.routes, task, &signal);
    Ok(json!({
        "from": task.id,
        "task_type": task.task_type,
        "next": next,
    }))
}
