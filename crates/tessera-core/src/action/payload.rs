//! # Payload Specs
//!
//! Typed shapes for the pieces of a rule definition. A spec both validates
//! a raw JSON value into a typed value and describes itself as JSON Schema.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::compiler::CompilerContext;
use super::condition::Condition;
use super::ExecutableAction;
use crate::error::Result;

pub trait PayloadSpec {
    type Output;

    /// Validates the value at `ctx` against this shape.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Compile`](crate::TesseraError::Compile) located
    /// at the offending node.
    fn unmarshal(&self, ctx: &CompilerContext<'_>) -> Result<Self::Output>;

    fn json_schema(&self) -> Value;
}

/// A fixed string, used as a bare action tag.
#[derive(Debug, Clone, Copy)]
pub struct PayloadLiteral {
    pub literal: &'static str,
    pub description: &'static str,
}

impl PayloadSpec for PayloadLiteral {
    type Output = ();

    fn unmarshal(&self, ctx: &CompilerContext<'_>) -> Result<()> {
        match ctx.source() {
            Value::String(s) if s == self.literal => Ok(()),
            _ => Err(ctx.error(format!("expected the literal {:?}", self.literal))),
        }
    }

    fn json_schema(&self) -> Value {
        json!({
            "type": "string",
            "const": self.literal,
            "description": self.description,
        })
    }
}

/// An object with exactly one key whose value has shape `V`.
#[derive(Debug, Clone, Copy)]
pub struct PayloadSingleKeyValue<V> {
    pub key: &'static str,
    pub description: &'static str,
    pub value: V,
}

impl<V: PayloadSpec> PayloadSpec for PayloadSingleKeyValue<V> {
    type Output = V::Output;

    fn unmarshal(&self, ctx: &CompilerContext<'_>) -> Result<V::Output> {
        let Value::Object(map) = ctx.source() else {
            return Err(ctx.error(format!("expected an object with the single key {:?}", self.key)));
        };
        match map.get(self.key) {
            Some(value) if map.len() == 1 => self.value.unmarshal(&ctx.child(self.key, value)),
            _ => Err(ctx.error(format!("expected an object with the single key {:?}", self.key))),
        }
    }

    fn json_schema(&self) -> Value {
        json!({
            "type": "object",
            "description": self.description,
            "properties": { self.key: self.value.json_schema() },
            "required": [self.key],
            "additionalProperties": false,
        })
    }
}

/// A JSON array whose items have shape `V`.
#[derive(Debug, Clone, Copy)]
pub struct PayloadList<V> {
    pub item: V,
}

impl<V> PayloadList<V> {
    pub const fn new(item: V) -> Self {
        Self { item }
    }
}

impl<V: PayloadSpec> PayloadSpec for PayloadList<V> {
    type Output = Vec<V::Output>;

    fn unmarshal(&self, ctx: &CompilerContext<'_>) -> Result<Vec<V::Output>> {
        let Value::Array(items) = ctx.source() else {
            return Err(ctx.error("expected an array"));
        };
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.item.unmarshal(&ctx.child(i, item)))
            .collect()
    }

    fn json_schema(&self) -> Value {
        json!({
            "type": "array",
            "items": self.item.json_schema(),
        })
    }
}

/// One string out of a fixed set, optionally `null`.
#[derive(Debug, Clone, Copy)]
pub struct PayloadEnum {
    pub values: &'static [&'static str],
    pub nullable: bool,
}

impl PayloadSpec for PayloadEnum {
    type Output = Option<String>;

    fn unmarshal(&self, ctx: &CompilerContext<'_>) -> Result<Option<String>> {
        match ctx.source() {
            Value::String(s) if self.values.contains(&s.as_str()) => Ok(Some(s.clone())),
            Value::Null if self.nullable => Ok(None),
            other => Err(ctx.error(format!(
                "expected one of {:?}{}, got {other}",
                self.values,
                if self.nullable { " or null" } else { "" }
            ))),
        }
    }

    fn json_schema(&self) -> Value {
        let mut values: Vec<Value> = self.values.iter().map(|v| json!(v)).collect();
        if self.nullable {
            values.push(Value::Null);
        }
        json!({ "enum": values })
    }
}

/// Any value `serde` can deserialize into `T`, described by an explicit schema.
pub struct PayloadStruct<T> {
    schema: Value,
    _marker: PhantomData<fn() -> T>,
}

impl<T> PayloadStruct<T> {
    #[must_use]
    pub fn new(schema: Value) -> Self {
        Self {
            schema,
            _marker: PhantomData,
        }
    }
}

impl<T: DeserializeOwned> PayloadSpec for PayloadStruct<T> {
    type Output = T;

    fn unmarshal(&self, ctx: &CompilerContext<'_>) -> Result<T> {
        serde_json::from_value(ctx.source().clone()).map_err(|e| ctx.error(e.to_string()))
    }

    fn json_schema(&self) -> Value {
        self.schema.clone()
    }
}

/// A nested action.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadAction;

impl PayloadSpec for PayloadAction {
    type Output = ExecutableAction;

    fn unmarshal(&self, ctx: &CompilerContext<'_>) -> Result<ExecutableAction> {
        ctx.compile_action()
    }

    fn json_schema(&self) -> Value {
        json!({ "$ref": "#/definitions/action" })
    }
}

/// A nested condition.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadCondition;

impl PayloadSpec for PayloadCondition {
    type Output = Condition;

    fn unmarshal(&self, ctx: &CompilerContext<'_>) -> Result<Condition> {
        ctx.compile_condition()
    }

    fn json_schema(&self) -> Value {
        json!({ "$ref": "#/definitions/condition" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Compiler;
    use crate::error::TesseraError;
    use crate::types::ContentType;

    fn unmarshal<S: PayloadSpec>(spec: &S, value: &Value) -> Result<S::Output> {
        let compiler = Compiler::empty();
        spec.unmarshal(&CompilerContext::new(&compiler, value))
    }

    fn error_path<T>(result: Result<T>) -> String {
        match result {
            Err(TesseraError::Compile { path, .. }) => path,
            _ => panic!("expected compile error"),
        }
    }

    const LITERAL: PayloadLiteral = PayloadLiteral {
        literal: "tag",
        description: "a tag",
    };

    #[test]
    fn literal_accepts_only_itself() {
        assert!(unmarshal(&LITERAL, &json!("tag")).is_ok());
        assert!(unmarshal(&LITERAL, &json!("other")).is_err());
        assert!(unmarshal(&LITERAL, &json!({"tag": null})).is_err());
        assert_eq!(LITERAL.json_schema()["const"], "tag");
    }

    #[test]
    fn single_key_value_nests_paths() {
        let spec = PayloadSingleKeyValue {
            key: "pick",
            description: "",
            value: PayloadList::new(LITERAL),
        };
        assert_eq!(unmarshal(&spec, &json!({"pick": ["tag", "tag"]})).unwrap().len(), 2);
        assert_eq!(error_path(unmarshal(&spec, &json!({"pick": ["tag", 3]}))), "/pick/1");
        assert_eq!(error_path(unmarshal(&spec, &json!({"pick": [], "extra": 1}))), "/");
        assert_eq!(error_path(unmarshal(&spec, &json!(["tag"]))), "/");
        assert_eq!(spec.json_schema()["required"], json!(["pick"]));
    }

    #[test]
    fn enum_with_null() {
        let spec = PayloadEnum {
            values: &["a", "b"],
            nullable: true,
        };
        assert_eq!(unmarshal(&spec, &json!("b")).unwrap().as_deref(), Some("b"));
        assert_eq!(unmarshal(&spec, &json!(null)).unwrap(), None);
        assert!(unmarshal(&spec, &json!("c")).is_err());
        assert_eq!(spec.json_schema(), json!({"enum": ["a", "b", null]}));

        let strict = PayloadEnum {
            values: &["a"],
            nullable: false,
        };
        assert!(unmarshal(&strict, &json!(null)).is_err());
    }

    #[test]
    fn struct_uses_serde() {
        let spec: PayloadStruct<Vec<Option<ContentType>>> =
            PayloadStruct::new(json!({"type": "array"}));
        assert_eq!(
            unmarshal(&spec, &json!(["movie", null])).unwrap(),
            vec![Some(ContentType::Movie), None]
        );
        assert!(unmarshal(&spec, &json!(["film"])).is_err());
        assert_eq!(spec.json_schema(), json!({"type": "array"}));
    }
}
