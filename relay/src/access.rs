//! Access control: a file-backed, hot-reloaded allow/deny list.

// Layer 1: Standard library imports
use std::path::{Path, PathBuf};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use notify::{RecursiveMode, Watcher};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

// Layer 3: Internal module imports
use crate::subject::Subject;

/// Failure modes surfaced by [`AccessControl`] construction. Runtime
/// reload/parse failures never surface as errors — they degrade to
/// "no rules", allowing everything.
#[derive(Debug, Error)]
pub enum AccessControlError {
    /// The filesystem watcher could not be installed.
    #[error("access rules watcher error: {0}")]
    Watch(#[from] notify::Error),
}

/// `{ from, to, action, priority }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRule {
    /// Sender subject pattern.
    pub from: String,
    /// Recipient subject pattern.
    pub to: String,
    /// Disposition when this rule matches first.
    pub action: AccessAction,
    /// Higher values are evaluated first.
    pub priority: i64,
}

/// Disposition of a matched [`AccessRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessAction {
    /// Permit the publish.
    Allow,
    /// Reject the publish.
    Deny,
}

/// The outcome of [`AccessControl::check_access`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDecision {
    /// Whether the publish may proceed.
    pub allowed: bool,
    /// The rule that decided, if any matched (default-allow has none).
    pub matched_rule: Option<AccessRule>,
}

/// File-backed, hot-reloaded access control list.
pub struct AccessControl {
    rules: Arc<RwLock<Vec<AccessRule>>>,
    path: PathBuf,
    _watcher: Option<notify::RecommendedWatcher>,
}

impl AccessControl {
    /// Load `path` (if present) and install a filesystem watcher that
    /// reloads on every change. Parsing failures degrade to "no rules".
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, AccessControlError> {
        let path = path.into();
        let rules = Arc::new(RwLock::new(load_rules(&path)));

        let watch_rules = rules.clone();
        let watch_path = path.clone();
        let mut watcher = notify::recommended_watcher(move |event: notify::Result<notify::Event>| {
            if event.is_ok() {
                *watch_rules.write() = load_rules(&watch_path);
                debug!(path = %watch_path.display(), "access rules reloaded");
            }
        })?;
        if let Some(parent) = path.parent() {
            if parent.exists() {
                watcher.watch(parent, RecursiveMode::NonRecursive)?;
            }
        }

        Ok(Self {
            rules,
            path,
            _watcher: Some(watcher),
        })
    }

    /// Construct an in-memory-only instance (tests, or no file configured).
    pub fn with_rules(rules: Vec<AccessRule>) -> Self {
        let mut sorted = rules;
        sort_rules(&mut sorted);
        Self {
            rules: Arc::new(RwLock::new(sorted)),
            path: PathBuf::new(),
            _watcher: None,
        }
    }

    /// Evaluate rules in priority order; the first matching rule's action
    /// decides. No match defaults to allow.
    pub fn check_access(&self, from: &Subject, to: &Subject) -> AccessDecision {
        for rule in self.rules.read().iter() {
            let Ok(from_pattern) = Subject::pattern(rule.from.clone()) else {
                continue;
            };
            let Ok(to_pattern) = Subject::pattern(rule.to.clone()) else {
                continue;
            };
            if from_pattern.matches(from) && to_pattern.matches(to) {
                return AccessDecision {
                    allowed: rule.action == AccessAction::Allow,
                    matched_rule: Some(rule.clone()),
                };
            }
        }
        AccessDecision {
            allowed: true,
            matched_rule: None,
        }
    }

    /// Upsert by `(from, to, priority)`; persists atomically and re-sorts.
    pub fn add_rule(&self, rule: AccessRule) {
        let mut rules = self.rules.write();
        rules.retain(|r| !(r.from == rule.from && r.to == rule.to && r.priority == rule.priority));
        rules.push(rule);
        sort_rules(&mut rules);
        self.persist(&rules);
    }

    /// Remove any rule matching `from`/`to`, regardless of priority.
    pub fn remove_rule(&self, from: &str, to: &str) {
        let mut rules = self.rules.write();
        rules.retain(|r| !(r.from == from && r.to == to));
        self.persist(&rules);
    }

    /// Snapshot copy; mutating the returned list does not affect internal
    /// state.
    pub fn list_rules(&self) -> Vec<AccessRule> {
        self.rules.read().clone()
    }

    fn persist(&self, rules: &[AccessRule]) {
        if self.path.as_os_str().is_empty() {
            return;
        }
        if let Err(err) = write_rules_atomic(&self.path, rules) {
            warn!(error = %err, "failed to persist access rules");
        }
    }
}

fn sort_rules(rules: &mut [AccessRule]) {
    rules.sort_by(|a, b| b.priority.cmp(&a.priority));
}

fn load_rules(path: &Path) -> Vec<AccessRule> {
    let Ok(raw) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    let Ok(mut rules) = serde_json::from_str::<Vec<AccessRule>>(&raw) else {
        return Vec::new();
    };
    sort_rules(&mut rules);
    rules
}

fn write_rules_atomic(path: &Path, rules: &[AccessRule]) -> std::io::Result<()> {
    let json = serde_json::to_vec_pretty(rules)?;
    let tmp = path.with_extension("tmp");
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subj(s: &str) -> Subject {
        Subject::concrete(s).unwrap()
    }

    fn rule(from: &str, to: &str, action: AccessAction, priority: i64) -> AccessRule {
        AccessRule {
            from: from.to_string(),
            to: to.to_string(),
            action,
            priority,
        }
    }

    #[test]
    fn test_no_rules_defaults_to_allow() {
        let access = AccessControl::with_rules(vec![]);
        let decision = access.check_access(&subj("relay.agent.a"), &subj("relay.agent.b"));
        assert!(decision.allowed);
        assert!(decision.matched_rule.is_none());
    }

    #[test]
    fn test_deny_rule_blocks_matching_publish() {
        let access = AccessControl::with_rules(vec![rule(
            "relay.agent.*",
            "relay.system.*",
            AccessAction::Deny,
            10,
        )]);
        let decision = access.check_access(&subj("relay.agent.a"), &subj("relay.system.pulse.x"));
        assert!(!decision.allowed);
    }

    #[test]
    fn test_higher_priority_rule_evaluated_first() {
        let access = AccessControl::with_rules(vec![
            rule("relay.agent.*", "relay.agent.*", AccessAction::Deny, 1),
            rule("relay.agent.*", "relay.agent.*", AccessAction::Allow, 10),
        ]);
        let decision = access.check_access(&subj("relay.agent.a"), &subj("relay.agent.b"));
        assert!(decision.allowed);
    }

    #[test]
    fn test_add_rule_upserts_by_from_to_priority() {
        let access = AccessControl::with_rules(vec![rule(
            "relay.agent.a",
            "relay.agent.b",
            AccessAction::Allow,
            5,
        )]);
        access.add_rule(rule("relay.agent.a", "relay.agent.b", AccessAction::Deny, 5));
        assert_eq!(access.list_rules().len(), 1);
        assert_eq!(access.list_rules()[0].action, AccessAction::Deny);
    }

    #[test]
    fn test_remove_rule_removes_any_priority() {
        let access = AccessControl::with_rules(vec![
            rule("relay.agent.a", "relay.agent.b", AccessAction::Deny, 5),
            rule("relay.agent.a", "relay.agent.b", AccessAction::Allow, 10),
        ]);
        access.remove_rule("relay.agent.a", "relay.agent.b");
        assert!(access.list_rules().is_empty());
    }

    #[test]
    fn test_list_rules_is_a_copy() {
        let access = AccessControl::with_rules(vec![rule(
            "relay.agent.a",
            "relay.agent.b",
            AccessAction::Allow,
            1,
        )]);
        let mut snapshot = access.list_rules();
        snapshot.clear();
        assert_eq!(access.list_rules().len(), 1);
    }

    #[test]
    fn test_missing_file_degrades_to_no_rules() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");
        let access = AccessControl::load(&path).unwrap();
        assert!(access.list_rules().is_empty());
        let decision = access.check_access(&subj("relay.agent.a"), &subj("relay.agent.b"));
        assert!(decision.allowed);
    }

    #[test]
    fn test_corrupt_file_degrades_to_no_rules() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("access-rules.json");
        std::fs::write(&path, b"not json").unwrap();
        let access = AccessControl::load(&path).unwrap();
        assert!(access.list_rules().is_empty());
    }
}
