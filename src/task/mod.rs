//! Named tasks with declared predecessors, resolved once into a run order.

use crate::config::Config;
use crate::error::CliError;
use std::collections::BTreeSet;
use std::fmt;

/// Work a task performs. Group tasks have none and only order their
/// predecessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Commit,
    Tag,
    Merge,
}

pub const BUILTIN_TASKS: &[(&str, Action)] = &[
    ("git:commit", Action::Commit),
    ("git:tag", Action::Tag),
    ("git:merge", Action::Merge),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    pub predecessors: Vec<String>,
    pub action: Option<Action>,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    tasks: Vec<Task>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in actions plus the group tasks declared in the configuration.
    pub fn from_config(config: &Config) -> Result<Self, CliError> {
        let mut graph = TaskGraph::new();
        for (name, action) in BUILTIN_TASKS {
            graph.add(name, Vec::new(), Some(*action));
        }
        for (name, predecessors) in config.task_groups()? {
            graph.add(&name, predecessors, None);
        }
        Ok(graph)
    }

    /// Adds a task. Declaring an existing name again appends predecessors
    /// and keeps its action.
    pub fn add(&mut self, name: &str, predecessors: Vec<String>, action: Option<Action>) {
        match self.tasks.iter_mut().find(|t| t.name == name) {
            Some(task) => {
                for predecessor in predecessors {
                    if !task.predecessors.contains(&predecessor) {
                        task.predecessors.push(predecessor);
                    }
                }
                if task.action.is_none() {
                    task.action = action;
                }
            }
            None => self.tasks.push(Task {
                name: name.to_string(),
                predecessors,
                action,
            }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }

    /// Everything `target` depends on, transitively, including itself.
    fn closure(&self, target: &str) -> Result<BTreeSet<&str>, CliError> {
        let mut seen = BTreeSet::new();
        let mut stack = vec![target];
        while let Some(name) = stack.pop() {
            let task = self
                .get(name)
                .ok_or_else(|| CliError::UnknownTask(name.to_string()))?;
            if seen.insert(task.name.as_str()) {
                stack.extend(task.predecessors.iter().map(String::as_str));
            }
        }
        Ok(seen)
    }

    /// Order in which to run `target` and its predecessors. Each task appears
    /// once; ready tasks run in declaration order.
    pub fn plan(&self, target: &str) -> Result<Vec<&Task>, CliError> {
        let needed = self.closure(target)?;
        let mut done: BTreeSet<&str> = BTreeSet::new();
        let mut order = Vec::with_capacity(needed.len());

        while order.len() < needed.len() {
            let ready = self.tasks.iter().find(|task| {
                needed.contains(task.name.as_str())
                    && !done.contains(task.name.as_str())
                    && task
                        .predecessors
                        .iter()
                        .all(|p| done.contains(p.as_str()))
            });

            match ready {
                Some(task) => {
                    done.insert(task.name.as_str());
                    order.push(task);
                }
                None => {
                    let stuck = needed
                        .iter()
                        .filter(|name| !done.contains(*name))
                        .copied()
                        .collect::<Vec<_>>();
                    return Err(CliError::TaskCycle(stuck.join(", ")));
                }
            }
        }

        Ok(order)
    }
}
