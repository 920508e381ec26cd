use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::models::resume::{
    EntryId, EntrySection, PersonalField, ResumeDocument, SectionValue, SkillCategory, Skills,
};
use crate::models::settings::{ProofField, ProofLinks, Template};
use crate::resume::migration::migrate;
use crate::resume::sample::{sample_resume, suggested_skills};
use crate::resume::scoring::{compute_ats_score, ScoreResult};
use crate::store::{KeyValueStore, LEGACY_RESUME_KEY, PROOF_KEY, RESUME_KEY, TEMPLATE_KEY};

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeView {
    pub document: ResumeDocument,
    pub score: ScoreResult,
    pub template: Template,
}

/// The single editing session: owns the document and keeps its score and the
/// stored copy in step with every mutation.
pub struct ResumeSession {
    store: Arc<dyn KeyValueStore>,
    document: ResumeDocument,
    score: ScoreResult,
    template: Template,
    proof: ProofLinks,
}

impl ResumeSession {
    /// Restores the session from `store`. The canonical key wins; the legacy
    /// key is only consulted when the canonical one is empty. Whatever is found
    /// goes through the migrator and is written back under the canonical key.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let mut raw = read_best_effort(store.as_ref(), RESUME_KEY).await;
        if raw.is_none() {
            raw = read_best_effort(store.as_ref(), LEGACY_RESUME_KEY).await;
            if raw.is_some() {
                info!("Loaded resume from legacy key '{LEGACY_RESUME_KEY}'");
            }
        }
        let document = migrate(raw.as_ref());

        let template = read_best_effort(store.as_ref(), TEMPLATE_KEY)
            .await
            .and_then(|v| v.as_str().and_then(Template::from_name))
            .unwrap_or_default();

        let proof = read_best_effort(store.as_ref(), PROOF_KEY)
            .await
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();

        let score = compute_ats_score(&document);
        info!(
            "Resume session loaded via {} store (score {})",
            store.backend_name(),
            score.score
        );

        let session = Self {
            store,
            document,
            score,
            template,
            proof,
        };
        session.persist_document().await;
        session
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn score(&self) -> &ScoreResult {
        &self.score
    }

    pub fn template(&self) -> Template {
        self.template
    }

    pub fn proof(&self) -> &ProofLinks {
        &self.proof
    }

    pub fn view(&self) -> ResumeView {
        ResumeView {
            document: self.document.clone(),
            score: self.score.clone(),
            template: self.template,
        }
    }

    pub async fn set_personal_field(&mut self, field: PersonalField, value: String) {
        let next = self.document.with_personal_field(field, value);
        self.commit(next).await;
    }

    pub async fn replace_section(&mut self, value: SectionValue) {
        let next = self.document.with_section(value);
        self.commit(next).await;
    }

    pub async fn load_sample(&mut self) {
        self.commit(sample_resume()).await;
    }

    pub async fn add_entry(&mut self, section: EntrySection) -> EntryId {
        let (next, id) = self.document.with_new_entry(section);
        self.commit(next).await;
        id
    }

    pub async fn remove_entry(&mut self, section: EntrySection, id: EntryId) {
        let next = self.document.without_entry(section, id);
        self.commit(next).await;
    }

    pub async fn add_skill(&mut self, category: SkillCategory, skill: &str) {
        let next = self.document.with_skill(category, skill);
        self.commit(next).await;
    }

    pub async fn remove_skill(&mut self, category: SkillCategory, index: usize) {
        let next = self.document.without_skill(category, index);
        self.commit(next).await;
    }

    pub async fn apply_suggested_skills(&mut self) {
        let next = self
            .document
            .with_section(SectionValue::Skills(Skills::Categorized(suggested_skills())));
        self.commit(next).await;
    }

    pub async fn add_tech_tag(&mut self, project: EntryId, tag: &str) {
        let next = self.document.with_tech_tag(project, tag);
        self.commit(next).await;
    }

    pub async fn remove_tech_tag(&mut self, project: EntryId, index: usize) {
        let next = self.document.without_tech_tag(project, index);
        self.commit(next).await;
    }

    pub async fn set_template(&mut self, template: Template) {
        self.template = template;
        write_best_effort(
            self.store.as_ref(),
            TEMPLATE_KEY,
            &Value::String(template.as_str().to_string()),
        )
        .await;
    }

    pub async fn set_proof_link(&mut self, field: ProofField, value: String) {
        self.proof.set(field, value);
        match serde_json::to_value(&self.proof) {
            Ok(value) => write_best_effort(self.store.as_ref(), PROOF_KEY, &value).await,
            Err(e) => warn!("Could not serialize proof links: {e}"),
        }
    }

    /// Swaps in the whole next document, rescores, then persists.
    async fn commit(&mut self, next: ResumeDocument) {
        self.document = next;
        self.score = compute_ats_score(&self.document);
        debug!("Resume updated (score {})", self.score.score);
        self.persist_document().await;
    }

    async fn persist_document(&self) {
        match serde_json::to_value(&self.document) {
            Ok(value) => write_best_effort(self.store.as_ref(), RESUME_KEY, &value).await,
            Err(e) => warn!("Could not serialize resume: {e}"),
        }
    }
}

async fn read_best_effort(store: &dyn KeyValueStore, key: &str) -> Option<Value> {
    match store.get(key).await {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to read '{key}', treating as empty: {e}");
            None
        }
    }
}

async fn write_best_effort(store: &dyn KeyValueStore, key: &str, value: &Value) {
    if let Err(e) = store.set(key, value).await {
        warn!("Failed to persist '{key}': {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    use crate::models::resume::CategorizedSkills;
    use crate::store::{MemoryStore, StoreError};

    async fn empty_session() -> (Arc<MemoryStore>, ResumeSession) {
        let store = Arc::new(MemoryStore::new());
        let session = ResumeSession::load(store.clone()).await;
        (store, session)
    }

    async fn stored_document(store: &MemoryStore) -> ResumeDocument {
        let value = store.get(RESUME_KEY).await.unwrap().unwrap();
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_first_load_is_empty_and_scores_zero() {
        let (store, session) = empty_session().await;
        assert_eq!(session.document(), &ResumeDocument::default());
        assert_eq!(session.score().score, 0);
        assert_eq!(session.score().suggestions.len(), 3);
        assert_eq!(session.template(), Template::Modern);
        assert_eq!(stored_document(&store).await, ResumeDocument::default());
    }

    #[tokio::test]
    async fn test_load_migrates_legacy_key_into_canonical_key() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                LEGACY_RESUME_KEY,
                &json!({
                    "personal": { "fullName": "Sam", "email": "sam@example.com" },
                    "projects": [{ "id": 1, "name": "P", "description": "", "link": "p.dev" }],
                    "skills": ["Rust", "SQL"]
                }),
            )
            .await
            .unwrap();

        let session = ResumeSession::load(store.clone()).await;
        assert_eq!(session.document().projects[0].live_url, "p.dev");
        assert_eq!(
            session.document().skills,
            Skills::Categorized(CategorizedSkills {
                technical: vec!["Rust".into(), "SQL".into()],
                ..Default::default()
            })
        );
        assert_eq!(session.score().score, 20);
        assert_eq!(&stored_document(&store).await, session.document());
    }

    #[tokio::test]
    async fn test_canonical_key_wins_over_legacy() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(LEGACY_RESUME_KEY, &json!({ "summary": "old" }))
            .await
            .unwrap();
        store
            .set(RESUME_KEY, &json!({ "summary": "new" }))
            .await
            .unwrap();
        let session = ResumeSession::load(store).await;
        assert_eq!(session.document().summary, "new");
    }

    #[tokio::test]
    async fn test_every_mutation_rescores_and_persists() {
        let (store, mut session) = empty_session().await;

        session
            .set_personal_field(PersonalField::FullName, "Ada".into())
            .await;
        session
            .set_personal_field(PersonalField::Email, "ada@example.com".into())
            .await;
        assert_eq!(session.score().score, 20);

        let id = session.add_entry(EntrySection::Experience).await;
        assert_eq!(session.score().score, 30);
        assert_eq!(stored_document(&store).await.experience[0].id, id);

        session.remove_entry(EntrySection::Experience, id).await;
        assert_eq!(session.score().score, 20);
        assert!(stored_document(&store).await.experience.is_empty());
    }

    #[tokio::test]
    async fn test_load_sample_replaces_everything_at_once() {
        let (store, mut session) = empty_session().await;
        session
            .replace_section(SectionValue::Summary("draft".into()))
            .await;
        session.load_sample().await;

        assert_eq!(session.document(), &sample_resume());
        assert_eq!(session.score().score, 75);
        assert_eq!(stored_document(&store).await, sample_resume());
    }

    #[tokio::test]
    async fn test_suggested_skills_meet_skill_target() {
        let (_store, mut session) = empty_session().await;
        session.apply_suggested_skills().await;
        assert_eq!(session.document().skills.total_count(), 10);
        assert_eq!(session.score().score, 10);
    }

    #[tokio::test]
    async fn test_skill_and_tech_tags() {
        let (_store, mut session) = empty_session().await;
        session.add_skill(SkillCategory::Tools, "Git").await;
        session.add_skill(SkillCategory::Tools, "Git").await;
        session.add_skill(SkillCategory::Tools, "Nix").await;
        session.remove_skill(SkillCategory::Tools, 0).await;
        assert_eq!(
            session.document().skills.clone().into_categorized().tools,
            vec!["Nix"]
        );

        let project = session.add_entry(EntrySection::Projects).await;
        session.add_tech_tag(project, "Rust").await;
        session.add_tech_tag(project, "Axum").await;
        session.remove_tech_tag(project, 0).await;
        assert_eq!(session.document().projects[0].tech_stack, vec!["Axum"]);
    }

    #[tokio::test]
    async fn test_template_and_proof_survive_reload() {
        let (store, mut session) = empty_session().await;
        session.set_template(Template::Classic).await;
        session
            .set_proof_link(ProofField::Github, "https://github.com/a/b".into())
            .await;

        let reloaded = ResumeSession::load(store).await;
        assert_eq!(reloaded.template(), Template::Classic);
        assert_eq!(reloaded.proof().github, "https://github.com/a/b");
        assert!(!reloaded.proof().is_complete());
    }

    #[tokio::test]
    async fn test_unknown_stored_template_falls_back_to_default() {
        let store = Arc::new(MemoryStore::new());
        store.set(TEMPLATE_KEY, &json!("neon")).await.unwrap();
        let session = ResumeSession::load(store).await;
        assert_eq!(session.template(), Template::Modern);
    }

    struct FailingStore;

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
            Err(StoreError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk gone"),
            })
        }

        async fn set(&self, key: &str, _value: &Value) -> Result<(), StoreError> {
            Err(StoreError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk gone"),
            })
        }

        fn backend_name(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_storage_failures_do_not_break_editing() {
        let mut session = ResumeSession::load(Arc::new(FailingStore)).await;
        session.load_sample().await;
        assert_eq!(session.document(), &sample_resume());
        assert_eq!(session.score().score, 75);
    }
}
