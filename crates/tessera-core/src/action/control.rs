//! Control-flow and bookkeeping actions.

use std::sync::Arc;

use serde_json::{Value, json};

use super::compiler::{Action, CompilerContext};
use super::condition::Condition;
use super::payload::{
    PayloadAction, PayloadCondition, PayloadEnum, PayloadList, PayloadLiteral,
    PayloadSingleKeyValue, PayloadSpec,
};
use super::{ExecutableAction, ExecutionContext};
use crate::error::{Result, TesseraError};
use crate::types::{Classification, ContentType};

/// `{"set_content_type": "movie" | null}`
#[derive(Debug, Clone, Copy, Default)]
pub struct SetContentType;

const SET_CONTENT_TYPE: PayloadSingleKeyValue<PayloadEnum> = PayloadSingleKeyValue {
    key: "set_content_type",
    description: "Set the content type, or clear it with null",
    value: PayloadEnum {
        values: &ContentType::NAMES,
        nullable: true,
    },
};

impl Action for SetContentType {
    fn name(&self) -> &'static str {
        SET_CONTENT_TYPE.key
    }

    fn compile_action(&self, ctx: &CompilerContext<'_>) -> Result<ExecutableAction> {
        let content_type = SET_CONTENT_TYPE
            .unmarshal(ctx)?
            .map(|name| name.parse::<ContentType>())
            .transpose()
            .map_err(|e| ctx.error(e.to_string()))?;
        Ok(ExecutableAction::new(move |mut exec: ExecutionContext| async move {
            exec.result.set_content_type(content_type);
            Ok(exec.result)
        }))
    }

    fn json_schema(&self) -> Value {
        SET_CONTENT_TYPE.json_schema()
    }
}

/// `"unmatched"`: always declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnmatchedAction;

const UNMATCHED: PayloadLiteral = PayloadLiteral {
    literal: "unmatched",
    description: "Decline to match, ending the workflow or moving find_match on",
};

impl Action for UnmatchedAction {
    fn name(&self) -> &'static str {
        UNMATCHED.literal
    }

    fn compile_action(&self, ctx: &CompilerContext<'_>) -> Result<ExecutableAction> {
        UNMATCHED.unmarshal(ctx)?;
        Ok(ExecutableAction::new(|_: ExecutionContext| async {
            Err::<Classification, TesseraError>(TesseraError::Unmatched)
        }))
    }

    fn json_schema(&self) -> Value {
        UNMATCHED.json_schema()
    }
}

/// `{"find_match": [..]}`: the first child that does not decline wins.
///
/// Each child starts from the same accumulator, so a declining child leaves
/// no trace.
#[derive(Debug, Clone, Copy, Default)]
pub struct FindMatch;

const FIND_MATCH: PayloadSingleKeyValue<PayloadList<PayloadAction>> = PayloadSingleKeyValue {
    key: "find_match",
    description: "Try each action in turn until one matches",
    value: PayloadList::new(PayloadAction),
};

impl Action for FindMatch {
    fn name(&self) -> &'static str {
        FIND_MATCH.key
    }

    fn compile_action(&self, ctx: &CompilerContext<'_>) -> Result<ExecutableAction> {
        let children: Arc<[ExecutableAction]> = FIND_MATCH.unmarshal(ctx)?.into();
        Ok(ExecutableAction::new(move |exec: ExecutionContext| {
            let children = Arc::clone(&children);
            async move {
                for child in children.iter() {
                    match child.run(exec.clone()).await {
                        Err(e) if e.is_unmatched() => {}
                        other => return other,
                    }
                }
                Err(TesseraError::Unmatched)
            }
        }))
    }

    fn json_schema(&self) -> Value {
        FIND_MATCH.json_schema()
    }
}

/// Body of an `if_else` definition.
#[derive(Debug, Clone, Copy, Default)]
struct IfElseSpec;

const IF_ELSE_FIELDS: [&str; 3] = ["condition", "if_action", "else_action"];

impl PayloadSpec for IfElseSpec {
    type Output = (Condition, ExecutableAction, Option<ExecutableAction>);

    fn unmarshal(&self, ctx: &CompilerContext<'_>) -> Result<Self::Output> {
        let Value::Object(map) = ctx.source() else {
            return Err(ctx.error("expected an object with condition and if_action"));
        };
        if let Some(extra) = map.keys().find(|k| !IF_ELSE_FIELDS.contains(&k.as_str())) {
            return Err(ctx.error(format!("unexpected field {extra:?}")));
        }
        let Some(condition) = map.get("condition") else {
            return Err(ctx.error("missing field \"condition\""));
        };
        let Some(if_action) = map.get("if_action") else {
            return Err(ctx.error("missing field \"if_action\""));
        };

        let condition = PayloadCondition.unmarshal(&ctx.child("condition", condition))?;
        let if_action = PayloadAction.unmarshal(&ctx.child("if_action", if_action))?;
        let else_action = map
            .get("else_action")
            .map(|source| PayloadAction.unmarshal(&ctx.child("else_action", source)))
            .transpose()?;
        Ok((condition, if_action, else_action))
    }

    fn json_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "condition": PayloadCondition.json_schema(),
                "if_action": PayloadAction.json_schema(),
                "else_action": PayloadAction.json_schema(),
            },
            "required": ["condition", "if_action"],
            "additionalProperties": false,
        })
    }
}

/// `{"if_else": {"condition": .., "if_action": .., "else_action": ..}}`
///
/// Without an `else_action`, a false condition leaves the result untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IfElse;

const IF_ELSE: PayloadSingleKeyValue<IfElseSpec> = PayloadSingleKeyValue {
    key: "if_else",
    description: "Run one action or another depending on a condition",
    value: IfElseSpec,
};

impl Action for IfElse {
    fn name(&self) -> &'static str {
        IF_ELSE.key
    }

    fn compile_action(&self, ctx: &CompilerContext<'_>) -> Result<ExecutableAction> {
        let (condition, if_action, else_action) = IF_ELSE.unmarshal(ctx)?;
        Ok(ExecutableAction::new(move |exec: ExecutionContext| {
            let branch = if condition.check(&exec) {
                Some(if_action.clone())
            } else {
                else_action.clone()
            };
            async move {
                match branch {
                    Some(action) => action.run(exec).await,
                    None => Ok(exec.result),
                }
            }
        }))
    }

    fn json_schema(&self) -> Value {
        IF_ELSE.json_schema()
    }
}
