//! Transformation session: the learned artifact and its approval state.
//!
//! A session holds at most one [`TransformArtifact`] at a time. Installing
//! a new artifact resets approval to [`Approval::Unapproved`]; approval is
//! one-directional and can only be cleared by replacing the artifact.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Artifact Types
// =============================================================================

/// How the learned transformation executes: a fitted numeric function or
/// an LLM-synthesized code snippet. Wire field `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Fitted numeric function (`func_name` + `params`); safe to apply
    /// without review.
    Numeric,
    /// LLM-synthesized function source; requires explicit human approval
    /// before any apply action.
    Llm,
}

/// One example prediction from the learn call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearnedExample {
    pub input: String,
    pub expected: String,
    pub predicted: String,
}

/// The learned transformation, as returned by `POST /preview-transform`.
///
/// Immutable once created; a new learn call replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformArtifact {
    /// Open-ended classification label ("numeric", "string",
    /// "algorithmic", ...). Echoed back verbatim on apply calls.
    pub transformation_type: String,

    /// Execution kind, decides the approval gate.
    #[serde(rename = "type")]
    pub kind: ArtifactKind,

    /// Human-readable rationale, or the full function source for LLM
    /// artifacts.
    pub description: String,

    /// Fitted function name (numeric artifacts only).
    #[serde(default)]
    pub func_name: Option<String>,

    /// Fitted parameters (numeric artifacts only).
    #[serde(default)]
    pub params: Option<Vec<Value>>,

    /// Example predictions on the training data.
    #[serde(default)]
    pub examples: Vec<LearnedExample>,
}

// =============================================================================
// Approval
// =============================================================================

/// Explicit approval state owned by the session, reset exactly when the
/// artifact is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Approval {
    #[default]
    Unapproved,
    Approved,
}

/// Apply was attempted on an unapproved LLM artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalRequired;

impl std::fmt::Display for ApprovalRequired {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Please approve the transformation function before proceeding.")
    }
}

impl std::error::Error for ApprovalRequired {}

// =============================================================================
// Session
// =============================================================================

/// Fields the DB adapters send describing the current artifact.
///
/// LLM artifacts carry their function source; numeric artifacts carry the
/// fitted function name and parameters. The unused half is sent empty,
/// matching the service contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactPayload {
    pub transformation_type: String,
    pub function_code: String,
    pub func_name: String,
    pub params: Vec<Value>,
}

/// The transformation session. Global across wizard steps: learned once,
/// usable by the file apply and both DB adapters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformSession {
    artifact: Option<TransformArtifact>,
    approval: Approval,
}

impl TransformSession {
    /// Install a freshly learned artifact, resetting approval.
    pub fn install(&mut self, artifact: TransformArtifact) {
        self.artifact = Some(artifact);
        self.approval = Approval::Unapproved;
    }

    /// Drop the artifact (e.g. when a training file changes).
    pub fn clear(&mut self) {
        self.artifact = None;
        self.approval = Approval::Unapproved;
    }

    pub fn artifact(&self) -> Option<&TransformArtifact> {
        self.artifact.as_ref()
    }

    pub fn approval(&self) -> Approval {
        self.approval
    }

    /// One-directional approve. No effect without an artifact.
    pub fn approve(&mut self) {
        if self.artifact.is_some() {
            self.approval = Approval::Approved;
        }
    }

    /// Whether the approve control is relevant (LLM artifacts only).
    pub fn needs_approval(&self) -> bool {
        matches!(
            self.artifact.as_ref().map(|a| a.kind),
            Some(ArtifactKind::Llm)
        ) && self.approval == Approval::Unapproved
    }

    /// Gate for every apply action: numeric artifacts pass unconditionally,
    /// LLM artifacts require [`Approval::Approved`].
    pub fn ensure_apply_allowed(&self) -> Result<&TransformArtifact, ApprovalRequired> {
        let artifact = self.artifact.as_ref().ok_or(ApprovalRequired)?;
        match artifact.kind {
            ArtifactKind::Numeric => Ok(artifact),
            ArtifactKind::Llm => match self.approval {
                Approval::Approved => Ok(artifact),
                Approval::Unapproved => Err(ApprovalRequired),
            },
        }
    }

    /// The artifact descriptor the DB adapters post.
    pub fn payload(&self) -> Option<ArtifactPayload> {
        let artifact = self.artifact.as_ref()?;
        Some(match artifact.kind {
            ArtifactKind::Llm => ArtifactPayload {
                transformation_type: artifact.transformation_type.clone(),
                function_code: artifact.description.clone(),
                func_name: String::new(),
                params: Vec::new(),
            },
            ArtifactKind::Numeric => ArtifactPayload {
                transformation_type: artifact.transformation_type.clone(),
                function_code: String::new(),
                func_name: artifact.func_name.clone().unwrap_or_default(),
                params: artifact.params.clone().unwrap_or_default(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn llm_artifact() -> TransformArtifact {
        TransformArtifact {
            transformation_type: "String-based".to_string(),
            kind: ArtifactKind::Llm,
            description: "def transform(x):\n    return x.upper()".to_string(),
            func_name: None,
            params: None,
            examples: vec![LearnedExample {
                input: "alice".into(),
                expected: "ALICE".into(),
                predicted: "ALICE".into(),
            }],
        }
    }

    fn numeric_artifact() -> TransformArtifact {
        TransformArtifact {
            transformation_type: "numeric".to_string(),
            kind: ArtifactKind::Numeric,
            description: "linear: y = 2x + 1".to_string(),
            func_name: Some("linear".to_string()),
            params: Some(vec![json!(2.0), json!(1.0)]),
            examples: Vec::new(),
        }
    }

    #[test]
    fn test_deserialize_llm_artifact() {
        let json = r#"{
            "type": "llm",
            "description": "def transform(x): return x",
            "examples": [{"input": "a", "expected": "A", "predicted": "A"}],
            "transformation_type": "String-based",
            "used_fallback": false
        }"#;
        let artifact: TransformArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.kind, ArtifactKind::Llm);
        assert!(artifact.func_name.is_none());
        assert_eq!(artifact.examples.len(), 1);
    }

    #[test]
    fn test_deserialize_numeric_artifact() {
        let json = r#"{
            "type": "numeric",
            "description": "Fitted linear function",
            "examples": [],
            "transformation_type": "numeric",
            "func_name": "linear",
            "params": [2.0, 1.0]
        }"#;
        let artifact: TransformArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.kind, ArtifactKind::Numeric);
        assert_eq!(artifact.func_name.as_deref(), Some("linear"));
        assert_eq!(artifact.params.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_llm_apply_blocked_until_approved() {
        let mut session = TransformSession::default();
        session.install(llm_artifact());

        assert!(session.ensure_apply_allowed().is_err());
        assert!(session.needs_approval());

        session.approve();
        assert!(session.ensure_apply_allowed().is_ok());
        assert!(!session.needs_approval());
    }

    #[test]
    fn test_numeric_apply_never_blocked() {
        let mut session = TransformSession::default();
        session.install(numeric_artifact());

        assert!(session.ensure_apply_allowed().is_ok());
        assert!(!session.needs_approval());
    }

    #[test]
    fn test_no_artifact_blocks_apply() {
        let session = TransformSession::default();
        assert!(session.ensure_apply_allowed().is_err());
    }

    #[test]
    fn test_install_resets_approval() {
        let mut session = TransformSession::default();
        session.install(llm_artifact());
        session.approve();
        assert_eq!(session.approval(), Approval::Approved);

        // A new learn call replaces the artifact and drops approval.
        session.install(llm_artifact());
        assert_eq!(session.approval(), Approval::Unapproved);
        assert!(session.ensure_apply_allowed().is_err());
    }

    #[test]
    fn test_approve_without_artifact_is_noop() {
        let mut session = TransformSession::default();
        session.approve();
        assert_eq!(session.approval(), Approval::Unapproved);
    }

    #[test]
    fn test_payload_llm_carries_function_code() {
        let mut session = TransformSession::default();
        session.install(llm_artifact());

        let payload = session.payload().unwrap();
        assert!(payload.function_code.starts_with("def transform"));
        assert!(payload.func_name.is_empty());
        assert!(payload.params.is_empty());
    }

    #[test]
    fn test_payload_numeric_carries_func_name_and_params() {
        let mut session = TransformSession::default();
        session.install(numeric_artifact());

        let payload = session.payload().unwrap();
        assert!(payload.function_code.is_empty());
        assert_eq!(payload.func_name, "linear");
        assert_eq!(payload.params, vec![json!(2.0), json!(1.0)]);
    }
}
