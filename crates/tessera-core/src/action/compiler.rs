use std::collections::BTreeMap;

use serde_json::{Value, json};
use tracing::debug;

use super::condition::{self, Condition};
use super::control::{FindMatch, IfElse, SetContentType, UnmatchedAction};
use super::payload::{PayloadAction, PayloadList, PayloadSpec};
use super::predb::AttachReleaseFromPredb;
use super::video::ParseVideoContent;
use super::workflow::Workflow;
use super::ExecutableAction;
use crate::error::{Result, TesseraError};

/// One kind of action, registered with a [`Compiler`] under its tag.
pub trait Action: Send + Sync {
    /// Tag that selects this action in a rule definition.
    fn name(&self) -> &'static str;

    /// Validates the definition at `ctx` and binds it into a closure.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Compile`] if the definition has the wrong shape.
    fn compile_action(&self, ctx: &CompilerContext<'_>) -> Result<ExecutableAction>;

    /// JSON Schema of the definition this action accepts.
    fn json_schema(&self) -> Value;
}

/// A position inside a rule definition being compiled.
pub struct CompilerContext<'a> {
    source: &'a Value,
    path: Vec<String>,
    compiler: &'a Compiler,
}

impl<'a> CompilerContext<'a> {
    #[must_use]
    pub fn new(compiler: &'a Compiler, source: &'a Value) -> Self {
        Self {
            source,
            path: Vec::new(),
            compiler,
        }
    }

    #[must_use]
    pub fn source(&self) -> &'a Value {
        self.source
    }

    /// JSON-pointer-like location, e.g. `/1/find_match/0`.
    #[must_use]
    pub fn path(&self) -> String {
        if self.path.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", self.path.join("/"))
        }
    }

    /// Descends into `source`, found under `segment` of the current value.
    #[must_use]
    pub fn child(&self, segment: impl ToString, source: &'a Value) -> Self {
        let mut path = self.path.clone();
        path.push(segment.to_string());
        Self {
            source,
            path,
            compiler: self.compiler,
        }
    }

    /// A compile error located at this position.
    #[must_use]
    pub fn error(&self, message: impl Into<String>) -> TesseraError {
        TesseraError::Compile {
            path: self.path(),
            message: message.into(),
        }
    }

    /// Compiles the action at this position.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Compile`] for unknown tags or invalid payloads.
    pub fn compile_action(&self) -> Result<ExecutableAction> {
        self.compiler.compile_action(self)
    }

    /// Compiles the condition at this position.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Compile`] for unknown or malformed conditions.
    pub fn compile_condition(&self) -> Result<Condition> {
        condition::compile(self)
    }
}

/// Extracts the tag of a bare-string or single-key-object definition.
pub(crate) fn tag_of<'v>(ctx: &CompilerContext<'_>, value: &'v Value, what: &str) -> Result<&'v str> {
    match value {
        Value::String(tag) => Ok(tag),
        Value::Object(map) if map.len() == 1 => map
            .keys()
            .next()
            .map(String::as_str)
            .ok_or_else(|| ctx.error(format!("expected {what}"))),
        _ => Err(ctx.error(format!("expected {what}: a tag string or a single-key object"))),
    }
}

/// The registry of actions, keyed by tag.
pub struct Compiler {
    actions: BTreeMap<&'static str, Box<dyn Action>>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::empty()
            .with_action(AttachReleaseFromPredb)
            .with_action(ParseVideoContent)
            .with_action(SetContentType)
            .with_action(UnmatchedAction)
            .with_action(FindMatch)
            .with_action(IfElse)
    }
}

/// The workflow run when no other is configured: parse the name, then try
/// to attach a known release.
#[must_use]
pub fn default_workflow() -> Value {
    json!(["parse_video_content", "attach_release_from_predb"])
}

impl Compiler {
    /// A registry with no actions.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            actions: BTreeMap::new(),
        }
    }

    /// Registers `action`, replacing any action with the same tag.
    #[must_use]
    pub fn with_action(mut self, action: impl Action + 'static) -> Self {
        self.actions.insert(action.name(), Box::new(action));
        self
    }

    /// Registered tags, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.actions.keys().copied().collect()
    }

    /// Compiles a rule definition (a JSON array of actions) into a workflow.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Compile`] pointing at the first invalid node.
    pub fn compile_workflow(&self, source: &Value) -> Result<Workflow> {
        let ctx = CompilerContext::new(self, source);
        let actions = PayloadList::new(PayloadAction).unmarshal(&ctx)?;
        debug!(actions = actions.len(), "compiled workflow");
        Ok(Workflow::new(actions))
    }

    fn compile_action(&self, ctx: &CompilerContext<'_>) -> Result<ExecutableAction> {
        let tag = tag_of(ctx, ctx.source(), "an action")?;
        let action = self
            .actions
            .get(tag)
            .ok_or_else(|| ctx.error(format!("unknown action {tag:?}")))?;
        action.compile_action(ctx)
    }

    /// JSON Schema describing every definition this compiler accepts.
    #[must_use]
    pub fn json_schema(&self) -> Value {
        let actions: Vec<Value> = self.actions.values().map(|a| a.json_schema()).collect();
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "workflow",
            "type": "array",
            "items": { "$ref": "#/definitions/action" },
            "definitions": {
                "action": { "oneOf": actions },
                "condition": condition::json_schema(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile_error(source: Value) -> (String, String) {
        match Compiler::default().compile_workflow(&source) {
            Err(TesseraError::Compile { path, message }) => (path, message),
            Err(other) => panic!("expected compile error, got {other}"),
            Ok(_) => panic!("expected compile error, got a workflow"),
        }
    }

    #[test]
    fn default_registry() {
        assert_eq!(
            Compiler::default().names(),
            vec![
                "attach_release_from_predb",
                "find_match",
                "if_else",
                "parse_video_content",
                "set_content_type",
                "unmatched",
            ]
        );
    }

    #[test]
    fn compiles_default_workflow() {
        let workflow = Compiler::default().compile_workflow(&default_workflow()).unwrap();
        assert_eq!(workflow.len(), 2);
    }

    #[test]
    fn root_must_be_a_list() {
        let (path, message) = compile_error(json!({"parse_video_content": null}));
        assert_eq!(path, "/");
        assert!(message.contains("array"), "{message}");
    }

    #[test]
    fn unknown_tag_reports_its_path() {
        let (path, message) = compile_error(json!([
            "parse_video_content",
            {"find_match": ["nope"]}
        ]));
        assert_eq!(path, "/1/find_match/0");
        assert!(message.contains("unknown action \"nope\""), "{message}");
    }

    #[test]
    fn literal_actions_reject_payloads() {
        let (path, _) = compile_error(json!([{"attach_release_from_predb": {"x": 1}}]));
        assert_eq!(path, "/0");
    }

    #[test]
    fn multi_key_objects_are_rejected() {
        let (path, _) = compile_error(json!([{"unmatched": null, "find_match": []}]));
        assert_eq!(path, "/0");
    }

    #[test]
    fn schema_lists_every_action() {
        let schema = Compiler::default().json_schema();
        let actions = schema["definitions"]["action"]["oneOf"].as_array().unwrap();
        assert_eq!(actions.len(), 6);
        assert!(schema["definitions"]["condition"].is_object());
        assert_eq!(schema["items"]["$ref"], "#/definitions/action");
    }

    #[test]
    fn empty_compiler_knows_nothing() {
        let compiler = Compiler::empty();
        assert!(compiler.names().is_empty());
        assert!(compiler.compile_workflow(&json!(["unmatched"])).is_err());
        assert!(compiler.compile_workflow(&json!([])).is_ok());
    }
}
