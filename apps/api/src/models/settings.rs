use serde::{Deserialize, Serialize};

/// Visual template used by the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Modern,
    Classic,
    Minimal,
}

impl Template {
    pub const ALL: [Template; 3] = [Template::Modern, Template::Classic, Template::Minimal];

    pub fn as_str(self) -> &'static str {
        match self {
            Template::Modern => "modern",
            Template::Classic => "classic",
            Template::Minimal => "minimal",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofField {
    Lovable,
    Github,
    Deploy,
}

/// Proof-of-submission links collected on the final submission page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProofLinks {
    pub lovable: String,
    pub github: String,
    pub deploy: String,
}

impl ProofLinks {
    pub fn set(&mut self, field: ProofField, value: String) {
        match field {
            ProofField::Lovable => self.lovable = value,
            ProofField::Github => self.github = value,
            ProofField::Deploy => self.deploy = value,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.lovable.is_empty() && !self.github.is_empty() && !self.deploy.is_empty()
    }

    /// Plain-text block the user copies into their final submission.
    pub fn submission_text(&self) -> String {
        format!(
            "------------------------------------------\n\
             AI Resume Builder — Final Submission\n\
             \n\
             Lovable Project: {}\n\
             GitHub Repository: {}\n\
             Live Deployment: {}\n\
             \n\
             Features Implemented:\n\
             - Two-column Builder implementation\n\
             - Real-time Resume Context state\n\
             - Clean A4 Preview & Print\n\
             - Tailwind Premium Design System\n\
             ------------------------------------------\n",
            self.lovable, self.github, self.deploy
        )
    }
}
