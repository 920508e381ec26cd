//! Pure document transformations. Each returns a new document and leaves the
//! receiver untouched; none of them can fail.

use std::collections::HashSet;

use chrono::Utc;

use crate::models::resume::{
    CategorizedSkills, EducationEntry, EntryId, EntrySection, ExperienceEntry, PersonalField,
    ProjectEntry, ResumeDocument, SectionValue, SkillCategory, Skills,
};

impl ResumeDocument {
    pub fn with_personal_field(&self, field: PersonalField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.personal.get_mut(field) = value.into();
        next
    }

    /// Replaces one section wholesale. The value is taken as given.
    pub fn with_section(&self, value: SectionValue) -> Self {
        let mut next = self.clone();
        match value {
            SectionValue::Summary(summary) => next.summary = summary,
            SectionValue::Experience(entries) => next.experience = entries,
            SectionValue::Education(entries) => next.education = entries,
            SectionValue::Projects(entries) => next.projects = entries,
            SectionValue::Skills(skills) => next.skills = skills,
        }
        next
    }

    pub fn entry_ids(&self, section: EntrySection) -> Vec<EntryId> {
        match section {
            EntrySection::Experience => self.experience.iter().map(|e| e.id).collect(),
            EntrySection::Education => self.education.iter().map(|e| e.id).collect(),
            EntrySection::Projects => self.projects.iter().map(|e| e.id).collect(),
        }
    }

    /// Appends an empty entry and returns it with its freshly assigned id.
    pub fn with_new_entry(&self, section: EntrySection) -> (Self, EntryId) {
        let id = next_entry_id(&self.entry_ids(section), Utc::now().timestamp_millis());
        let mut next = self.clone();
        match section {
            EntrySection::Experience => next.experience.push(ExperienceEntry {
                id,
                ..Default::default()
            }),
            EntrySection::Education => next.education.push(EducationEntry {
                id,
                ..Default::default()
            }),
            EntrySection::Projects => next.projects.push(ProjectEntry {
                id,
                ..Default::default()
            }),
        }
        (next, id)
    }

    /// Drops the entry with `id`; unknown ids leave the section as it was.
    pub fn without_entry(&self, section: EntrySection, id: EntryId) -> Self {
        let mut next = self.clone();
        match section {
            EntrySection::Experience => next.experience.retain(|e| e.id != id),
            EntrySection::Education => next.education.retain(|e| e.id != id),
            EntrySection::Projects => next.projects.retain(|e| e.id != id),
        }
        next
    }

    /// Adds `skill` to `category` unless it is blank or already there. Flat
    /// skills are categorized first.
    pub fn with_skill(&self, category: SkillCategory, skill: &str) -> Self {
        let mut next = self.clone();
        let mut skills = categorized(&next.skills);
        push_unique(skills.get_mut(category), skill);
        next.skills = Skills::Categorized(skills);
        next
    }

    pub fn without_skill(&self, category: SkillCategory, index: usize) -> Self {
        let mut next = self.clone();
        let mut skills = categorized(&next.skills);
        let items = skills.get_mut(category);
        if index < items.len() {
            items.remove(index);
        }
        next.skills = Skills::Categorized(skills);
        next
    }

    pub fn with_tech_tag(&self, project: EntryId, tag: &str) -> Self {
        let mut next = self.clone();
        if let Some(p) = next.projects.iter_mut().find(|p| p.id == project) {
            push_unique(&mut p.tech_stack, tag);
        }
        next
    }

    pub fn without_tech_tag(&self, project: EntryId, index: usize) -> Self {
        let mut next = self.clone();
        if let Some(p) = next.projects.iter_mut().find(|p| p.id == project) {
            if index < p.tech_stack.len() {
                p.tech_stack.remove(index);
            }
        }
        next
    }
}

fn categorized(skills: &Skills) -> CategorizedSkills {
    skills.clone().into_categorized()
}

fn push_unique(items: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !items.iter().any(|s| s == value) {
        items.push(value.to_string());
    }
}

/// Creation timestamp in milliseconds, bumped past the largest existing id so
/// two entries created within the same millisecond never collide.
fn next_entry_id(existing: &[EntryId], now_millis: i64) -> EntryId {
    let start = match existing.iter().max() {
        Some(&max) if max >= now_millis => max.checked_add(1).unwrap_or(now_millis),
        _ => now_millis,
    };
    let taken: HashSet<EntryId> = existing.iter().copied().collect();
    unused_id(&taken, start)
}

/// First id at or above `start` that is not in `taken`. Past `EntryId::MAX`
/// the search continues from 1.
pub(crate) fn unused_id(taken: &HashSet<EntryId>, start: EntryId) -> EntryId {
    (start..=EntryId::MAX)
        .chain(1..start)
        .find(|id| !taken.contains(id))
        .unwrap_or(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::sample::sample_resume;

    fn two_jobs() -> ResumeDocument {
        let mut doc = ResumeDocument::default();
        doc.experience = vec![
            ExperienceEntry {
                id: 1,
                company: "First".into(),
                ..Default::default()
            },
            ExperienceEntry {
                id: 2,
                company: "Second".into(),
                ..Default::default()
            },
        ];
        doc
    }

    #[test]
    fn test_set_personal_field_touches_only_that_field() {
        let doc = sample_resume();
        let next = doc.with_personal_field(PersonalField::Email, "new@example.com");
        assert_eq!(next.personal.email, "new@example.com");
        assert_eq!(next.personal.full_name, doc.personal.full_name);
        assert_eq!(next.experience, doc.experience);
        assert_eq!(doc.personal.email, "alex.morgan@example.com");
    }

    #[test]
    fn test_replace_section_is_permissive() {
        let doc = ResumeDocument::default();
        let next = doc.with_section(SectionValue::Education(vec![EducationEntry::default()]));
        assert_eq!(next.education.len(), 1);
        let next = next.with_section(SectionValue::Skills(Skills::Flat(vec!["Go".into()])));
        assert_eq!(next.skills, Skills::Flat(vec!["Go".into()]));
    }

    #[test]
    fn test_remove_entry_by_id_preserves_order() {
        let next = two_jobs().without_entry(EntrySection::Experience, 2);
        assert_eq!(next.experience.len(), 1);
        assert_eq!(next.experience[0].id, 1);
        assert_eq!(next.experience[0].company, "First");
    }

    #[test]
    fn test_remove_unknown_entry_is_noop() {
        let doc = two_jobs();
        assert_eq!(doc.without_entry(EntrySection::Experience, 99), doc);
    }

    #[test]
    fn test_add_entry_appends_empty_entry_with_unique_id() {
        let (doc, first) = ResumeDocument::default().with_new_entry(EntrySection::Projects);
        let (doc, second) = doc.with_new_entry(EntrySection::Projects);
        assert_ne!(first, second);
        assert_eq!(doc.projects.len(), 2);
        assert_eq!(doc.projects[1].id, second);
        assert!(doc.projects[1].name.is_empty());
        assert!(doc.projects[1].tech_stack.is_empty());
    }

    #[test]
    fn test_next_entry_id_uses_timestamp_or_bumps_past_max() {
        assert_eq!(next_entry_id(&[], 1_000), 1_000);
        assert_eq!(next_entry_id(&[1, 2], 1_000), 1_000);
        assert_eq!(next_entry_id(&[1_000], 1_000), 1_001);
        assert_eq!(next_entry_id(&[5_000, 3], 1_000), 5_001);
    }

    #[test]
    fn test_next_entry_id_at_integer_ceiling_stays_unique() {
        assert_eq!(next_entry_id(&[EntryId::MAX], 1_000), 1_000);
        assert_eq!(next_entry_id(&[EntryId::MAX, 1_000], 1_000), 1_001);
        assert_eq!(next_entry_id(&[EntryId::MAX - 1, EntryId::MAX], EntryId::MAX - 1), 1);
    }

    #[test]
    fn test_entries_added_after_max_id_are_removable_one_by_one() {
        let mut doc = ResumeDocument::default();
        doc.experience.push(ExperienceEntry {
            id: EntryId::MAX,
            ..Default::default()
        });
        let (doc, first) = doc.with_new_entry(EntrySection::Experience);
        let (doc, second) = doc.with_new_entry(EntrySection::Experience);

        let ids: HashSet<_> = doc.entry_ids(EntrySection::Experience).into_iter().collect();
        assert_eq!(ids.len(), 3);
        assert_ne!(first, EntryId::MAX);
        assert_ne!(second, EntryId::MAX);

        let doc = doc.without_entry(EntrySection::Experience, first);
        assert_eq!(doc.experience.len(), 2);
    }

    #[test]
    fn test_add_skill_dedups_within_category() {
        let doc = ResumeDocument::default()
            .with_skill(SkillCategory::Tools, "Git")
            .with_skill(SkillCategory::Tools, " Git ")
            .with_skill(SkillCategory::Technical, "Git")
            .with_skill(SkillCategory::Soft, "   ");
        let skills = doc.skills.into_categorized();
        assert_eq!(skills.tools, vec!["Git"]);
        assert_eq!(skills.technical, vec!["Git"]);
        assert!(skills.soft.is_empty());
    }

    #[test]
    fn test_add_skill_categorizes_flat_skills() {
        let mut doc = ResumeDocument::default();
        doc.skills = Skills::Flat(vec!["Rust".into()]);
        let next = doc.with_skill(SkillCategory::Soft, "Mentoring");
        let skills = next.skills.into_categorized();
        assert_eq!(skills.technical, vec!["Rust"]);
        assert_eq!(skills.soft, vec!["Mentoring"]);
    }

    #[test]
    fn test_remove_skill_by_index() {
        let doc = ResumeDocument::default()
            .with_skill(SkillCategory::Technical, "Rust")
            .with_skill(SkillCategory::Technical, "Go")
            .with_skill(SkillCategory::Technical, "Zig");
        let next = doc.without_skill(SkillCategory::Technical, 1);
        assert_eq!(next.skills.clone().into_categorized().technical, vec!["Rust", "Zig"]);
        assert_eq!(next.without_skill(SkillCategory::Technical, 10), next);
    }

    #[test]
    fn test_tech_tags_on_project() {
        let doc = sample_resume()
            .with_tech_tag(1, "React")
            .with_tech_tag(1, "OpenAI")
            .with_tech_tag(1, " React ")
            .with_tech_tag(42, "Ignored");
        assert_eq!(doc.projects[0].tech_stack, vec!["React", "OpenAI"]);

        let doc = doc.without_tech_tag(1, 0);
        assert_eq!(doc.projects[0].tech_stack, vec!["OpenAI"]);
    }
}
