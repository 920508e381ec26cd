//! Upgrades a stored resume of any known shape into the current `ResumeDocument`.
//!
//! Works on raw JSON first so that malformed or foreign data degrades to defaults
//! field by field instead of failing the whole load. Applying it to an already
//! current document is a no-op.

use std::collections::HashSet;

use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::models::resume::{EntryId, PersonalField, ResumeDocument, SkillCategory};
use crate::resume::editing::unused_id;

const EXPERIENCE_FIELDS: &[&str] = &["company", "role", "date", "description"];
const EDUCATION_FIELDS: &[&str] = &["school", "degree", "date", "description"];
const PROJECT_FIELDS: &[&str] = &["name", "description", "liveUrl", "githubUrl"];

/// Produces a current-shape document from whatever was stored, or the empty
/// document when nothing was.
pub fn migrate(raw: Option<&Value>) -> ResumeDocument {
    let Some(raw) = raw else {
        return ResumeDocument::default();
    };
    let normalized = migrate_value(raw);
    match serde_json::from_value(normalized) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("Migrated resume still failed to decode, starting empty: {e}");
            ResumeDocument::default()
        }
    }
}

/// The JSON half of [`migrate`]: returns an object in the serialized shape of
/// `ResumeDocument`. Unknown top-level keys are carried over untouched.
pub fn migrate_value(raw: &Value) -> Value {
    let Some(obj) = raw.as_object() else {
        warn!("Stored resume is not a JSON object; resetting to defaults");
        return serde_json::to_value(ResumeDocument::default()).unwrap_or(Value::Null);
    };

    let experience = migrate_entries(
        obj.get("experience"),
        "experience",
        EXPERIENCE_FIELDS,
        |_| {},
    );
    let education = migrate_entries(obj.get("education"), "education", EDUCATION_FIELDS, |_| {});
    let projects = migrate_entries(
        obj.get("projects"),
        "projects",
        PROJECT_FIELDS,
        upgrade_project,
    );

    let mut migrated = obj.clone();
    for (key, value) in [
        ("personal", migrate_personal(obj.get("personal"))),
        (
            "summary",
            Value::String(coerce_string(obj.get("summary"), "summary")),
        ),
        ("experience", experience),
        ("education", education),
        ("projects", projects),
        ("skills", migrate_skills(obj.get("skills"))),
    ] {
        migrated.insert(key.to_string(), value);
    }
    Value::Object(migrated)
}

/// Applies the legacy project upgrade to a caller-supplied `projects` list so
/// a replaced section keeps its `link` the same way a stored one does.
/// Anything that is not a list of objects is left for the decoder to judge.
pub fn upgrade_legacy_projects(raw: &mut Value) {
    if let Value::Array(items) = raw {
        for item in items.iter_mut() {
            if let Value::Object(entry) = item {
                upgrade_project(entry);
            }
        }
    }
}

fn migrate_personal(raw: Option<&Value>) -> Value {
    let source = match raw {
        None => None,
        Some(Value::Object(map)) => Some(map),
        Some(_) => {
            warn!("Resume field 'personal' is not an object; resetting");
            None
        }
    };
    let mut personal = Map::new();
    for field in PersonalField::ALL {
        let key = field.key();
        let value = source.and_then(|m| m.get(key));
        personal.insert(key.to_string(), Value::String(coerce_string(value, key)));
    }
    Value::Object(personal)
}

fn migrate_skills(raw: Option<&Value>) -> Value {
    let mut categorized = Map::new();
    match raw {
        Some(Value::Array(items)) => {
            info!("Upgrading {} legacy flat skills into categories", items.len());
            categorized.insert("technical".to_string(), string_list(raw));
            categorized.insert("soft".to_string(), json!([]));
            categorized.insert("tools".to_string(), json!([]));
        }
        Some(Value::Object(map)) => {
            for category in SkillCategory::ALL {
                let items = string_list(map.get(category.as_str()));
                categorized.insert(category.as_str().to_string(), items);
            }
        }
        other => {
            if other.is_some_and(|v| !v.is_null()) {
                warn!("Resume field 'skills' has an unknown shape; resetting");
            }
            for category in SkillCategory::ALL {
                categorized.insert(category.as_str().to_string(), json!([]));
            }
        }
    }
    Value::Object(categorized)
}

/// Legacy projects carry a single `link`; it moves into `liveUrl` unless the
/// entry already has one. `techStack` is always a list of strings afterwards.
fn upgrade_project(entry: &mut Map<String, Value>) {
    if let Some(link) = entry.remove("link") {
        let link = coerce_string(Some(&link), "link");
        let has_live_url = entry
            .get("liveUrl")
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty());
        if !has_live_url && !link.is_empty() {
            info!("Carrying legacy project link into liveUrl");
            entry.insert("liveUrl".to_string(), Value::String(link));
        }
    }
    let tech_stack = string_list(entry.get("techStack"));
    entry.insert("techStack".to_string(), tech_stack);
}

fn migrate_entries(
    raw: Option<&Value>,
    section: &str,
    string_fields: &[&str],
    upgrade: impl Fn(&mut Map<String, Value>),
) -> Value {
    let items = match raw {
        None | Some(Value::Null) => return json!([]),
        Some(Value::Array(items)) => items,
        Some(_) => {
            warn!("Resume section '{section}' is not a list; resetting");
            return json!([]);
        }
    };

    let mut entries: Vec<Map<String, Value>> = items
        .iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(map.clone()),
            _ => {
                warn!("Dropping non-object entry in '{section}'");
                None
            }
        })
        .collect();

    for entry in entries.iter_mut() {
        upgrade(entry);
        for &field in string_fields {
            let value = coerce_string(entry.get(field), field);
            entry.insert(field.to_string(), Value::String(value));
        }
    }
    normalize_ids(&mut entries, section);

    Value::Array(entries.into_iter().map(Value::Object).collect())
}

/// Keeps every valid, first-seen id and hands out fresh ones (above the
/// current maximum where possible) to entries whose id is missing, malformed
/// or duplicated.
fn normalize_ids(entries: &mut [Map<String, Value>], section: &str) {
    let mut taken = HashSet::new();
    let kept: Vec<Option<EntryId>> = entries
        .iter()
        .map(|e| e.get("id").and_then(parse_id).filter(|id| taken.insert(*id)))
        .collect();
    let mut next = taken
        .iter()
        .max()
        .map_or(1, |max: &EntryId| max.checked_add(1).unwrap_or(1));

    for (entry, kept) in entries.iter_mut().zip(kept) {
        let id = match kept {
            Some(id) => id,
            None => {
                let fresh = unused_id(&taken, next);
                warn!("Assigning new id {fresh} to entry in '{section}'");
                taken.insert(fresh);
                next = fresh.checked_add(1).unwrap_or(1);
                fresh
            }
        };
        entry.insert("id".to_string(), json!(id));
    }
}

fn parse_id(value: &Value) -> Option<EntryId> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_string(value: Option<&Value>, field: &str) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(_) => {
            warn!("Resume field '{field}' is not a string; resetting");
            String::new()
        }
    }
}

fn string_list(value: Option<&Value>) -> Value {
    match value {
        Some(Value::Array(items)) => Value::Array(
            items
                .iter()
                .filter_map(|item| item.as_str().map(|s| Value::String(s.to_string())))
                .collect(),
        ),
        _ => json!([]),
    }
}
