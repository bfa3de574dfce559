//! Boolean tests over the running classification, used by `if_else`.

use serde_json::{Value, json};

use super::ExecutionContext;
use super::compiler::{CompilerContext, tag_of};
use super::payload::{
    PayloadCondition, PayloadList, PayloadLiteral, PayloadSingleKeyValue, PayloadSpec,
    PayloadStruct,
};
use crate::error::Result;
use crate::types::{ContentType, FilesStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
    /// Holds when the accumulated content type is listed; `None` stands for unknown.
    ContentType(Vec<Option<ContentType>>),
    FilesStatus(Vec<FilesStatus>),
    HasBaseTitle,
    HasHint,
}

impl Condition {
    #[must_use]
    pub fn check(&self, ctx: &ExecutionContext) -> bool {
        match self {
            Self::And(all) => all.iter().all(|c| c.check(ctx)),
            Self::Or(any) => any.iter().any(|c| c.check(ctx)),
            Self::Not(inner) => !inner.check(ctx),
            Self::ContentType(types) => types.contains(&ctx.result.content_type()),
            Self::FilesStatus(statuses) => statuses.contains(&ctx.torrent.files_status),
            Self::HasBaseTitle => ctx.result.base_title().is_some(),
            Self::HasHint => ctx.torrent.hint.is_some(),
        }
    }
}

const AND: PayloadSingleKeyValue<PayloadList<PayloadCondition>> = PayloadSingleKeyValue {
    key: "and",
    description: "Holds when every condition holds",
    value: PayloadList::new(PayloadCondition),
};

const OR: PayloadSingleKeyValue<PayloadList<PayloadCondition>> = PayloadSingleKeyValue {
    key: "or",
    description: "Holds when any condition holds",
    value: PayloadList::new(PayloadCondition),
};

const NOT: PayloadSingleKeyValue<PayloadCondition> = PayloadSingleKeyValue {
    key: "not",
    description: "Holds when the condition does not",
    value: PayloadCondition,
};

const HAS_BASE_TITLE: PayloadLiteral = PayloadLiteral {
    literal: "has_base_title",
    description: "Holds when a base title has been found",
};

const HAS_HINT: PayloadLiteral = PayloadLiteral {
    literal: "has_hint",
    description: "Holds when the torrent carries a content type hint",
};

fn content_type_spec() -> PayloadSingleKeyValue<PayloadStruct<Vec<Option<ContentType>>>> {
    let mut names: Vec<Value> = ContentType::NAMES.iter().map(|n| json!(n)).collect();
    names.push(Value::Null);
    PayloadSingleKeyValue {
        key: "content_type",
        description: "Holds when the content type is listed; null matches an unknown type",
        value: PayloadStruct::new(json!({ "type": "array", "items": { "enum": names } })),
    }
}

fn files_status_spec() -> PayloadSingleKeyValue<PayloadStruct<Vec<FilesStatus>>> {
    PayloadSingleKeyValue {
        key: "files_status",
        description: "Holds when the torrent's files status is listed",
        value: PayloadStruct::new(json!({
            "type": "array",
            "items": { "enum": ["no_info", "single", "multi", "over_threshold"] },
        })),
    }
}

/// Compiles the condition at `ctx`.
pub(crate) fn compile(ctx: &CompilerContext<'_>) -> Result<Condition> {
    let tag = tag_of(ctx, ctx.source(), "a condition")?;
    if ctx.source().is_string() {
        return match tag {
            "has_base_title" => HAS_BASE_TITLE.unmarshal(ctx).map(|()| Condition::HasBaseTitle),
            "has_hint" => HAS_HINT.unmarshal(ctx).map(|()| Condition::HasHint),
            _ => Err(ctx.error(format!("unknown condition {tag:?}"))),
        };
    }
    match tag {
        "and" => AND.unmarshal(ctx).map(Condition::And),
        "or" => OR.unmarshal(ctx).map(Condition::Or),
        "not" => NOT.unmarshal(ctx).map(|c| Condition::Not(Box::new(c))),
        "content_type" => content_type_spec().unmarshal(ctx).map(Condition::ContentType),
        "files_status" => files_status_spec().unmarshal(ctx).map(Condition::FilesStatus),
        _ => Err(ctx.error(format!("unknown condition {tag:?}"))),
    }
}

/// Schema of every condition form.
pub(crate) fn json_schema() -> Value {
    json!({
        "oneOf": [
            AND.json_schema(),
            OR.json_schema(),
            NOT.json_schema(),
            content_type_spec().json_schema(),
            files_status_spec().json_schema(),
            HAS_BASE_TITLE.json_schema(),
            HAS_HINT.json_schema(),
        ]
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::action::Compiler;
    use crate::action::testing::{CountingSearch, context};
    use crate::error::TesseraError;

    fn compile_json(value: Value) -> Result<Condition> {
        let compiler = Compiler::empty();
        CompilerContext::new(&compiler, &value).compile_condition()
    }

    #[test]
    fn compiles_nested_forms() {
        let condition = compile_json(json!({
            "and": [
                "has_base_title",
                {"not": "has_hint"},
                {"or": [{"content_type": ["movie", null]}, {"files_status": ["multi"]}]}
            ]
        }))
        .unwrap();
        assert_eq!(
            condition,
            Condition::And(vec![
                Condition::HasBaseTitle,
                Condition::Not(Box::new(Condition::HasHint)),
                Condition::Or(vec![
                    Condition::ContentType(vec![Some(ContentType::Movie), None]),
                    Condition::FilesStatus(vec![FilesStatus::Multi]),
                ]),
            ])
        );
    }

    #[test]
    fn errors_point_into_the_tree() {
        let path = |value| match compile_json(value) {
            Err(TesseraError::Compile { path, .. }) => path,
            other => panic!("expected compile error, got {other:?}"),
        };
        assert_eq!(path(json!("is_big")), "/");
        assert_eq!(path(json!({"and": ["has_hint", {"nope": 1}]})), "/and/1");
        assert_eq!(path(json!({"not": {"content_type": ["film"]}})), "/not/content_type");
        assert_eq!(path(json!({"and": "has_hint"})), "/and");
        assert_eq!(path(json!({"and": [], "or": []})), "/");
    }

    #[test]
    fn checks_against_the_context() {
        let mut ctx = context("Some Movie 2001", Arc::new(CountingSearch::default()));
        let unknown = Condition::ContentType(vec![None]);
        let movie = Condition::ContentType(vec![Some(ContentType::Movie)]);
        assert!(unknown.check(&ctx));
        assert!(!movie.check(&ctx));
        assert!(!Condition::HasBaseTitle.check(&ctx));
        assert!(!Condition::HasHint.check(&ctx));
        assert!(Condition::FilesStatus(vec![FilesStatus::NoInfo]).check(&ctx));

        ctx.result.set_content_type(Some(ContentType::Movie));
        ctx.result.set_base_title(Some("Some Movie".into()));
        assert!(movie.check(&ctx));
        assert!(Condition::And(vec![movie.clone(), Condition::HasBaseTitle]).check(&ctx));
        assert!(!Condition::Or(vec![unknown.clone(), Condition::HasHint]).check(&ctx));
        assert!(Condition::Not(Box::new(unknown)).check(&ctx));
        assert!(Condition::And(Vec::new()).check(&ctx));
        assert!(!Condition::Or(Vec::new()).check(&ctx));
    }

    #[test]
    fn schema_covers_every_form() {
        let schema = json_schema();
        assert_eq!(schema["oneOf"].as_array().unwrap().len(), 7);
    }
}
