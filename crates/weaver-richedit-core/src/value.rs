//! Values returned by script evaluation in the embedded engine.
//!
//! Engines hand back loosely-typed results. Everything downstream of the
//! command channel reads them through [`EvalValue::coerce`], which folds them
//! into a single string form. An empty string means "no usable result".

/// A native evaluation result as reported by the engine binding.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalValue {
    /// Integral number.
    Int(i64),
    /// Non-integral number. Not coerced; treated like "no result".
    Float(f64),
    Bool(bool),
    Str(String),
    /// `null`, `undefined`, or an object the binding could not convert.
    None,
}

impl EvalValue {
    /// Fold the value into the string convention every decoder reads.
    ///
    /// Integers become their decimal form, booleans become `"true"`/`"false"`,
    /// strings pass through, anything else is the empty string.
    pub fn coerce(&self) -> String {
        match self {
            EvalValue::Int(n) => n.to_string(),
            EvalValue::Bool(b) => b.to_string(),
            EvalValue::Str(s) => s.clone(),
            EvalValue::Float(_) | EvalValue::None => String::new(),
        }
    }

    /// Map a JSON value (as delivered by most webview bindings) into an `EvalValue`.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(b) => EvalValue::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => EvalValue::Int(i),
                None => n.as_f64().map(EvalValue::Float).unwrap_or(EvalValue::None),
            },
            serde_json::Value::String(s) => EvalValue::Str(s.clone()),
            _ => EvalValue::None,
        }
    }
}

impl From<i64> for EvalValue {
    fn from(n: i64) -> Self {
        EvalValue::Int(n)
    }
}

impl From<bool> for EvalValue {
    fn from(b: bool) -> Self {
        EvalValue::Bool(b)
    }
}

impl From<&str> for EvalValue {
    fn from(s: &str) -> Self {
        EvalValue::Str(s.to_string())
    }
}

impl From<String> for EvalValue {
    fn from(s: String) -> Self {
        EvalValue::Str(s)
    }
}
