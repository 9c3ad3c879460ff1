//! Slash-command usage from the history log.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::HistoryEntry;

/// Number of top commands reported.
pub const TOP_COMMANDS: usize = 5;

/// Leading `/word` of a history line (ASCII word characters only).
static COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/[A-Za-z0-9_]+").expect("command pattern is valid"));

/// Command usage for a period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandMetrics {
    /// Most used slash commands, most frequent first
    pub top_commands: Vec<CommandCount>,
    /// Distinct slash commands used
    pub command_diversity: u64,
    /// Every history entry, slash command or not
    pub total_commands: u64,
    pub most_active_project: Option<ProjectActivity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandCount {
    /// e.g. "/plugin"
    pub command: String,
    pub count: u64,
}

/// The project directory with the most history entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectActivity {
    /// Full project path
    pub path: String,
    /// Last path segment
    pub name: String,
    pub count: u64,
}

/// Extract the slash command a history line starts with, if any.
pub fn extract_command(display: &str) -> Option<&str> {
    COMMAND_RE.find(display).map(|m| m.as_str())
}

/// Short name for a project path: its final segment, or the whole path when
/// that segment is empty.
pub fn project_name(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => path,
    }
}

/// Calculate command metrics from history entries.
pub fn command_metrics(history: &[HistoryEntry]) -> CommandMetrics {
    if history.is_empty() {
        return CommandMetrics::default();
    }

    let mut commands: IndexMap<&str, u64> = IndexMap::new();
    let mut projects: IndexMap<&str, u64> = IndexMap::new();

    for entry in history {
        if let Some(command) = extract_command(&entry.display) {
            *commands.entry(command).or_insert(0) += 1;
        }
        if let Some(project) = entry.project.as_deref().filter(|p| !p.is_empty()) {
            *projects.entry(project).or_insert(0) += 1;
        }
    }

    let command_diversity = commands.len() as u64;

    let mut ranked: Vec<(&str, u64)> = commands.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let top_commands = ranked
        .into_iter()
        .take(TOP_COMMANDS)
        .map(|(command, count)| CommandCount {
            command: command.to_string(),
            count,
        })
        .collect();

    let mut most_active: Option<(&str, u64)> = None;
    for (path, count) in projects {
        if most_active.map_or(true, |(_, best)| count > best) {
            most_active = Some((path, count));
        }
    }

    CommandMetrics {
        top_commands,
        command_diversity,
        total_commands: history.len() as u64,
        most_active_project: most_active.map(|(path, count)| ProjectActivity {
            path: path.to_string(),
            name: project_name(path).to_string(),
            count,
        }),
    }
}
