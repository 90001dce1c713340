//! Task and route content.

use std::path::Path;

use anyhow::{Context, Result, bail};
use morpho_core::{ResponseMap, Task, TaskCatalog, TaskId};
use morpho_routing::RouteTable;
use morpho_settings::ContentSettings;
use tracing::{debug, info};

const SAMPLE_TASKS: &str = include_str!("../../../data/tasks.json");
const SAMPLE_ROUTES: &str = include_str!("../../../data/routes.json");

/// A task catalog together with the route table that links its tasks.
#[derive(Clone, Debug)]
pub struct Content {
    /// Every task, keyed by id.
    pub catalog: TaskCatalog,
    /// Routes between task categories.
    pub routes: RouteTable,
}

impl Content {
    /// Parse both documents and check every route target exists.
    pub fn from_json(tasks_json: &str, routes_json: &str) -> Result<Self> {
        let catalog = TaskCatalog::from_json_str(tasks_json).context("invalid task content")?;
        let routes = RouteTable::from_json_str(routes_json).context("invalid route table")?;
        routes
            .validate_targets(&catalog)
            .context("route table does not match task content")?;
        if catalog.is_empty() {
            bail!("task content has no tasks");
        }
        debug!(tasks = catalog.len(), routes = routes.len(), "content parsed");
        Ok(Self { catalog, routes })
    }

    /// Load the files named in the settings.
    pub fn load(settings: &ContentSettings) -> Result<Self> {
        Self::load_paths(
            Path::new(&settings.tasks_path),
            Path::new(&settings.routes_path),
        )
    }

    /// Load content from explicit paths.
    pub fn load_paths(tasks_path: &Path, routes_path: &Path) -> Result<Self> {
        let tasks = std::fs::read_to_string(tasks_path)
            .with_context(|| format!("failed to read tasks: {}", tasks_path.display()))?;
        let routes = std::fs::read_to_string(routes_path)
            .with_context(|| format!("failed to read routes: {}", routes_path.display()))?;
        let content = Self::from_json(&tasks, &routes)?;
        info!(
            tasks_path = %tasks_path.display(),
            routes_path = %routes_path.display(),
            "content loaded"
        );
        Ok(content)
    }

    /// The sample lessons compiled into the binary.
    pub fn sample() -> Result<Self> {
        Self::from_json(SAMPLE_TASKS, SAMPLE_ROUTES)
    }

    /// Look up a task.
    pub fn task(&self, id: &str) -> Result<&Task> {
        Ok(self.catalog.get(id)?)
    }

    /// Resolve the task a session starts on: the requested id, or the first
    /// authored task.
    pub fn start_task_id(&self, requested: Option<&str>) -> Result<TaskId> {
        match requested.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Ok(self.task(id)?.id.clone()),
            None => self
                .catalog
                .ids()
                .first()
                .cloned()
                .context("task content has no tasks"),
        }
    }
}

/// Read a learner response file: a JSON object of field id to text.
pub fn load_responses(path: &Path) -> Result<ResponseMap> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read responses: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("responses must be a JSON object of strings: {}", path.display()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
