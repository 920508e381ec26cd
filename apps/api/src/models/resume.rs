use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity key of an entry within its own section. Assigned once at creation.
pub type EntryId = i64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub title: String,
    pub website: String,
    pub linkedin: String,
    pub github: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FullName,
    Email,
    Phone,
    Location,
    Title,
    Website,
    Linkedin,
    Github,
}

impl PersonalField {
    pub const ALL: [PersonalField; 8] = [
        PersonalField::FullName,
        PersonalField::Email,
        PersonalField::Phone,
        PersonalField::Location,
        PersonalField::Title,
        PersonalField::Website,
        PersonalField::Linkedin,
        PersonalField::Github,
    ];

    /// Key used in the serialized document.
    pub fn key(self) -> &'static str {
        match self {
            PersonalField::FullName => "fullName",
            PersonalField::Email => "email",
            PersonalField::Phone => "phone",
            PersonalField::Location => "location",
            PersonalField::Title => "title",
            PersonalField::Website => "website",
            PersonalField::Linkedin => "linkedin",
            PersonalField::Github => "github",
        }
    }
}

impl PersonalInfo {
    pub fn get_mut(&mut self, field: PersonalField) -> &mut String {
        match field {
            PersonalField::FullName => &mut self.full_name,
            PersonalField::Email => &mut self.email,
            PersonalField::Phone => &mut self.phone,
            PersonalField::Location => &mut self.location,
            PersonalField::Title => &mut self.title,
            PersonalField::Website => &mut self.website,
            PersonalField::Linkedin => &mut self.linkedin,
            PersonalField::Github => &mut self.github,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub id: EntryId,
    pub company: String,
    pub role: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub id: EntryId,
    pub school: String,
    pub degree: String,
    pub date: String,
    pub description: String,
}

/// Current project shape. The legacy `{ id, name, description, link }` shape is
/// upgraded by the migrator before it ever reaches this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectEntry {
    pub id: EntryId,
    pub name: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub live_url: String,
    pub github_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Technical,
    Soft,
    Tools,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 3] = [
        SkillCategory::Technical,
        SkillCategory::Soft,
        SkillCategory::Tools,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SkillCategory::Technical => "technical",
            SkillCategory::Soft => "soft",
            SkillCategory::Tools => "tools",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorizedSkills {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub tools: Vec<String>,
}

impl CategorizedSkills {
    pub fn get_mut(&mut self, category: SkillCategory) -> &mut Vec<String> {
        match category {
            SkillCategory::Technical => &mut self.technical,
            SkillCategory::Soft => &mut self.soft,
            SkillCategory::Tools => &mut self.tools,
        }
    }

    pub fn total(&self) -> usize {
        self.technical.len() + self.soft.len() + self.tools.len()
    }
}

/// Skills in either of the two recognized shapes. `Flat` only exists at the
/// storage boundary; the migrator normalizes it to `Categorized`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Skills {
    Flat(Vec<String>),
    Categorized(CategorizedSkills),
}

impl Default for Skills {
    fn default() -> Self {
        Skills::Categorized(CategorizedSkills::default())
    }
}

impl Skills {
    /// Number of skills regardless of shape.
    pub fn total_count(&self) -> usize {
        match self {
            Skills::Flat(items) => items.len(),
            Skills::Categorized(c) => c.total(),
        }
    }

    /// Flat lists land in `technical`.
    pub fn into_categorized(self) -> CategorizedSkills {
        match self {
            Skills::Flat(items) => CategorizedSkills {
                technical: items,
                ..Default::default()
            },
            Skills::Categorized(c) => c,
        }
    }
}

/// Root aggregate: one per session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeDocument {
    pub personal: PersonalInfo,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Skills,
    /// Top-level keys this version does not know about, kept verbatim.
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

/// Sections that can be replaced wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    Experience,
    Education,
    Projects,
    Skills,
}

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Projects => "projects",
            Section::Skills => "skills",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "summary" => Some(Section::Summary),
            "experience" => Some(Section::Experience),
            "education" => Some(Section::Education),
            "projects" => Some(Section::Projects),
            "skills" => Some(Section::Skills),
            _ => None,
        }
    }
}

/// Repeated sections whose items carry an `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySection {
    Experience,
    Education,
    Projects,
}

impl EntrySection {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "experience" => Some(EntrySection::Experience),
            "education" => Some(EntrySection::Education),
            "projects" => Some(EntrySection::Projects),
            _ => None,
        }
    }
}

/// A caller-supplied replacement for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionValue {
    Summary(String),
    Experience(Vec<ExperienceEntry>),
    Education(Vec<EducationEntry>),
    Projects(Vec<ProjectEntry>),
    Skills(Skills),
}

impl SectionValue {
    /// Decodes raw JSON for `section`. Only the JSON types are checked; entry
    /// contents are taken as given.
    pub fn decode(section: Section, raw: Value) -> Result<Self, serde_json::Error> {
        Ok(match section {
            Section::Summary => SectionValue::Summary(serde_json::from_value(raw)?),
            Section::Experience => SectionValue::Experience(serde_json::from_value(raw)?),
            Section::Education => SectionValue::Education(serde_json::from_value(raw)?),
            Section::Projects => SectionValue::Projects(serde_json::from_value(raw)?),
            Section::Skills => SectionValue::Skills(serde_json::from_value(raw)?),
        })
    }
}
