//! ATS readiness score: a fixed-weight checklist over the resume document.
//!
//! Pure and linear in the size of the document; recomputed after every mutation.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeDocument;

pub const MAX_SCORE: u32 = 100;
pub const MAX_SUGGESTIONS: usize = 3;

const SUMMARY_MIN_WORDS: usize = 40;
const SUMMARY_MAX_WORDS: usize = 120;
const MIN_PROJECTS: usize = 2;
const MIN_EXPERIENCE: usize = 1;
const MIN_SKILLS: usize = 8;

/// A digit, a percent sign, or a standalone `k` / `x` ("10 k users", "3 x faster").
static QUANTIFIED_IMPACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\d|%|\bk\b|\bx\b").expect("impact pattern is valid"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u32,
    pub suggestions: Vec<String>,
}

/// One checklist item. `ALL` is in evaluation order, which is also the order
/// suggestions are surfaced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtsRule {
    SummaryLength,
    ProjectCount,
    ExperiencePresent,
    SkillCount,
    ProfileLinks,
    QuantifiedImpact,
    EducationComplete,
    ContactBasics,
}

impl AtsRule {
    pub const ALL: [AtsRule; 8] = [
        AtsRule::SummaryLength,
        AtsRule::ProjectCount,
        AtsRule::ExperiencePresent,
        AtsRule::SkillCount,
        AtsRule::ProfileLinks,
        AtsRule::QuantifiedImpact,
        AtsRule::EducationComplete,
        AtsRule::ContactBasics,
    ];

    pub fn points(self) -> u32 {
        match self {
            AtsRule::SummaryLength => 15,
            AtsRule::ProjectCount => 10,
            AtsRule::ExperiencePresent => 10,
            AtsRule::SkillCount => 10,
            AtsRule::ProfileLinks => 10,
            AtsRule::QuantifiedImpact => 15,
            AtsRule::EducationComplete => 10,
            AtsRule::ContactBasics => 20,
        }
    }

    /// Message shown when the rule fails. Links, education and contact basics
    /// never produce one.
    pub fn suggestion(self) -> Option<&'static str> {
        match self {
            AtsRule::SummaryLength => Some("Expand summary to 40-120 words."),
            AtsRule::ProjectCount => Some("Add at least 2 projects."),
            AtsRule::ExperiencePresent => Some("Add at least 1 internship or work experience."),
            AtsRule::SkillCount => Some("Add more skills (target 8+ across categories)."),
            AtsRule::QuantifiedImpact => {
                Some("Add measurable impact (numbers, %, etc.) to bullets.")
            }
            AtsRule::ProfileLinks | AtsRule::EducationComplete | AtsRule::ContactBasics => None,
        }
    }

    pub fn is_satisfied(self, doc: &ResumeDocument) -> bool {
        match self {
            AtsRule::SummaryLength => {
                let words = word_count(&doc.summary);
                (SUMMARY_MIN_WORDS..=SUMMARY_MAX_WORDS).contains(&words)
            }
            AtsRule::ProjectCount => doc.projects.len() >= MIN_PROJECTS,
            AtsRule::ExperiencePresent => doc.experience.len() >= MIN_EXPERIENCE,
            AtsRule::SkillCount => doc.skills.total_count() >= MIN_SKILLS,
            AtsRule::ProfileLinks => {
                !doc.personal.github.is_empty() || !doc.personal.linkedin.is_empty()
            }
            AtsRule::QuantifiedImpact => doc
                .experience
                .iter()
                .map(|e| e.description.as_str())
                .chain(doc.projects.iter().map(|p| p.description.as_str()))
                .any(has_quantified_impact),
            AtsRule::EducationComplete => {
                !doc.education.is_empty()
                    && doc.education.iter().all(|e| {
                        !e.school.is_empty() && !e.degree.is_empty() && !e.date.is_empty()
                    })
            }
            AtsRule::ContactBasics => {
                !doc.personal.full_name.is_empty() && !doc.personal.email.is_empty()
            }
        }
    }
}

/// Whitespace-separated tokens; an empty or blank string has zero words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn has_quantified_impact(text: &str) -> bool {
    QUANTIFIED_IMPACT.is_match(text)
}

/// Scores the document and returns up to three suggestions in rule order.
pub fn compute_ats_score(doc: &ResumeDocument) -> ScoreResult {
    let mut score = 0;
    let mut suggestions = Vec::new();

    for rule in AtsRule::ALL {
        if rule.is_satisfied(doc) {
            score += rule.points();
        } else if let Some(message) = rule.suggestion() {
            suggestions.push(message.to_string());
        }
    }

    suggestions.truncate(MAX_SUGGESTIONS);

    ScoreResult {
        score: score.min(MAX_SCORE),
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{
        CategorizedSkills, EducationEntry, ExperienceEntry, ProjectEntry, Skills,
    };
    use crate::resume::sample::sample_resume;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    fn complete_document() -> ResumeDocument {
        let mut doc = ResumeDocument::default();
        doc.personal.full_name = "Ada Lovelace".into();
        doc.personal.email = "ada@example.com".into();
        doc.personal.github = "github.com/ada".into();
        doc.summary = words(60);
        doc.experience.push(ExperienceEntry {
            id: 1,
            company: "Analytical Engines".into(),
            role: "Engineer".into(),
            date: "1843".into(),
            description: "Cut runtime by 40%".into(),
        });
        doc.education.push(EducationEntry {
            id: 1,
            school: "Home".into(),
            degree: "Mathematics".into(),
            date: "1835".into(),
            description: String::new(),
        });
        doc.projects = vec![
            ProjectEntry {
                id: 1,
                name: "Notes".into(),
                ..Default::default()
            },
            ProjectEntry {
                id: 2,
                name: "Bernoulli".into(),
                ..Default::default()
            },
        ];
        doc.skills = Skills::Categorized(CategorizedSkills {
            technical: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            soft: vec!["e".into(), "f".into()],
            tools: vec!["g".into(), "h".into()],
        });
        doc
    }

    #[test]
    fn test_rule_points_total_one_hundred() {
        let total: u32 = AtsRule::ALL.iter().map(|r| r.points()).sum();
        assert_eq!(total, MAX_SCORE);
    }

    #[test]
    fn test_complete_document_scores_one_hundred() {
        let result = compute_ats_score(&complete_document());
        assert_eq!(result.score, 100);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_empty_document_scores_zero_with_first_three_suggestions() {
        let result = compute_ats_score(&ResumeDocument::default());
        assert_eq!(result.score, 0);
        assert_eq!(
            result.suggestions,
            vec![
                "Expand summary to 40-120 words.",
                "Add at least 2 projects.",
                "Add at least 1 internship or work experience.",
            ]
        );
    }

    #[test]
    fn test_summary_word_count_boundaries() {
        let mut doc = complete_document();
        for (n, expected) in [(39, 85), (40, 100), (120, 100), (121, 85)] {
            doc.summary = words(n);
            assert_eq!(compute_ats_score(&doc).score, expected, "{n} words");
        }
    }

    #[test]
    fn test_word_count_ignores_surrounding_and_repeated_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t "), 0);
        assert_eq!(word_count("  one   two\nthree  "), 3);
    }

    #[test]
    fn test_impact_detection() {
        assert!(has_quantified_impact("Improved performance by 40%"));
        assert!(has_quantified_impact("Grew revenue X times over"));
        assert!(has_quantified_impact("Reached K monthly users"));
        assert!(has_quantified_impact("Cut cost by a third, %-wise"));
        assert!(!has_quantified_impact("Led a team"));
        assert!(!has_quantified_impact("Worked on the kiosk experience"));
    }

    #[test]
    fn test_impact_checks_projects_as_well_as_experience() {
        let mut doc = complete_document();
        doc.experience[0].description = "Led a team".into();
        assert!(!AtsRule::QuantifiedImpact.is_satisfied(&doc));
        doc.projects[1].description = "Served 10k requests".into();
        assert!(AtsRule::QuantifiedImpact.is_satisfied(&doc));
    }

    #[test]
    fn test_skill_count_is_shape_agnostic() {
        let mut doc = complete_document();
        assert!(AtsRule::SkillCount.is_satisfied(&doc));

        doc.skills = Skills::Flat(
            ["a", "b", "c", "d", "e", "f", "g", "h"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        assert!(AtsRule::SkillCount.is_satisfied(&doc));

        doc.skills = Skills::Flat(vec!["a".into(); 7]);
        assert!(!AtsRule::SkillCount.is_satisfied(&doc));
    }

    #[test]
    fn test_links_rule_fails_silently() {
        let mut doc = complete_document();
        doc.personal.github.clear();
        let result = compute_ats_score(&doc);
        assert_eq!(result.score, 90);
        assert!(result.suggestions.is_empty());

        doc.personal.linkedin = "linkedin.com/in/ada".into();
        assert_eq!(compute_ats_score(&doc).score, 100);
    }

    #[test]
    fn test_incomplete_education_fails_silently() {
        let mut doc = complete_document();
        doc.education.push(EducationEntry {
            id: 2,
            school: "Somewhere".into(),
            ..Default::default()
        });
        let result = compute_ats_score(&doc);
        assert_eq!(result.score, 90);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_contact_basics_require_name_and_email() {
        let mut doc = complete_document();
        doc.personal.email.clear();
        let result = compute_ats_score(&doc);
        assert_eq!(result.score, 80);
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_suggestions_keep_rule_order_and_cap() {
        let mut doc = complete_document();
        doc.projects.clear();
        doc.skills = Skills::default();
        doc.experience[0].description = "Led a team".into();
        let result = compute_ats_score(&doc);
        assert_eq!(
            result.suggestions,
            vec![
                "Add at least 2 projects.",
                "Add more skills (target 8+ across categories).",
                "Add measurable impact (numbers, %, etc.) to bullets.",
            ]
        );
        assert_eq!(result.score, 100 - 10 - 10 - 15);
    }

    #[test]
    fn test_sample_resume_score() {
        let result = compute_ats_score(&sample_resume());
        assert_eq!(result.score, 75);
        assert_eq!(
            result.suggestions,
            vec!["Expand summary to 40-120 words.", "Add at least 2 projects."]
        );
    }
}
