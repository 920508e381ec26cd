use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::resume::{EntryId, ResumeDocument};

/// Character limit the editor applies to project descriptions.
pub const PROJECT_DESCRIPTION_LIMIT: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationIssue {
    pub section: String,
    pub entry_id: Option<EntryId>,
    pub reason: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub passed: bool,
    pub issues: Vec<ValidationIssue>,
}

/// Opt-in checks on top of the permissive editing API. Never blocks a
/// mutation; callers decide what to do with the report.
///
/// Flags:
/// - an email without `@` or without a dot in its domain
/// - project descriptions over the editor limit
/// - experience entries missing company or role
/// - education entries missing school, degree or date
/// - ids repeated inside one section
pub fn validate_document(doc: &ResumeDocument) -> ValidationReport {
    let mut issues = Vec::new();

    let email = doc.personal.email.trim();
    if !email.is_empty() && !looks_like_email(email) {
        issues.push(ValidationIssue {
            section: "personal".to_string(),
            entry_id: None,
            reason: format!("'{email}' does not look like an email address"),
            suggestion: "Use the form name@domain.tld".to_string(),
        });
    }

    for entry in &doc.experience {
        let mut missing = Vec::new();
        if entry.company.trim().is_empty() {
            missing.push("company");
        }
        if entry.role.trim().is_empty() {
            missing.push("role");
        }
        if !missing.is_empty() {
            issues.push(missing_fields_issue("experience", entry.id, &missing));
        }
    }

    for entry in &doc.education {
        let mut missing = Vec::new();
        if entry.school.trim().is_empty() {
            missing.push("school");
        }
        if entry.degree.trim().is_empty() {
            missing.push("degree");
        }
        if entry.date.trim().is_empty() {
            missing.push("date");
        }
        if !missing.is_empty() {
            issues.push(missing_fields_issue("education", entry.id, &missing));
        }
    }

    for project in &doc.projects {
        let len = project.description.chars().count();
        if len > PROJECT_DESCRIPTION_LIMIT {
            issues.push(ValidationIssue {
                section: "projects".to_string(),
                entry_id: Some(project.id),
                reason: format!(
                    "Description is {len} characters (limit {PROJECT_DESCRIPTION_LIMIT})"
                ),
                suggestion: "Trim the description to the strongest one or two bullets".to_string(),
            });
        }
    }

    check_duplicate_ids("experience", doc.experience.iter().map(|e| e.id), &mut issues);
    check_duplicate_ids("education", doc.education.iter().map(|e| e.id), &mut issues);
    check_duplicate_ids("projects", doc.projects.iter().map(|e| e.id), &mut issues);

    ValidationReport {
        passed: issues.is_empty(),
        issues,
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

fn missing_fields_issue(section: &str, id: EntryId, missing: &[&str]) -> ValidationIssue {
    ValidationIssue {
        section: section.to_string(),
        entry_id: Some(id),
        reason: format!("Missing {}", missing.join(", ")),
        suggestion: format!("Fill in {} or remove the entry", missing.join(" and ")),
    }
}

fn check_duplicate_ids(
    section: &str,
    ids: impl Iterator<Item = EntryId>,
    issues: &mut Vec<ValidationIssue>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            issues.push(ValidationIssue {
                section: section.to_string(),
                entry_id: Some(id),
                reason: format!("Id {id} is used by more than one entry"),
                suggestion: "Re-create the duplicated entry so it gets its own id".to_string(),
            });
        }
    }
}
