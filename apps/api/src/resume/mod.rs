// Resume engine: document editing, schema migration, ATS readiness scoring and
// the opt-in validation layer, plus the session and HTTP handlers on top.

pub mod editing;
pub mod handlers;
pub mod migration;
pub mod sample;
pub mod scoring;
pub mod session;
pub mod validation;
