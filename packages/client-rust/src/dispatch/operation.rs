//! Operation capability, positional call arguments, and the call envelope.

use async_trait::async_trait;
use haapi_core::{ApiResponse, DomainError, InvokeError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::context::DispatchContext;

// ---------------------------------------------------------------------------
// ApiOperation
// ---------------------------------------------------------------------------

/// A named, invocable remote operation.
///
/// Operations are registered once at startup and shared read-only by every
/// dispatch. One `call` is one attempt: the dispatcher owns retries, so an
/// operation must not loop on failures itself.
#[async_trait]
pub trait ApiOperation: Send + Sync {
    /// Unique registry key, e.g. `"ankama.account.status"`.
    fn name(&self) -> &'static str;

    /// Perform one attempt.
    ///
    /// Transport failures are returned as `InvokeError::Transport` so the
    /// dispatcher can classify them. Domain errors (bad arguments) are
    /// terminal and bypass classification.
    async fn call(
        &self,
        ctx: &DispatchContext,
        args: &CallArgs,
    ) -> Result<ApiResponse, InvokeError>;
}

// ---------------------------------------------------------------------------
// CallArgs
// ---------------------------------------------------------------------------

/// Positional arguments for an operation call.
///
/// Values are JSON so heterogeneous arguments (api keys, numeric ids, flags)
/// travel through a single, cloneable container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallArgs(Vec<Value>);

impl CallArgs {
    #[must_use]
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    /// Argument `index` rendered as plain text, or `None` if absent or `null`.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_ARGUMENT` if the value is an array or object.
    pub fn text(&self, index: usize, name: &str) -> Result<Option<String>, DomainError> {
        match self.0.get(index) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(DomainError::invalid_argument(format!(
                "argument `{name}` (position {index}) must be a scalar, got {other}"
            ))),
        }
    }

    /// Like [`CallArgs::text`], but the argument must be present.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_ARGUMENT` if the value is absent, `null`, or not a scalar.
    pub fn required_text(&self, index: usize, name: &str) -> Result<String, DomainError> {
        self.text(index, name)?.ok_or_else(|| {
            DomainError::invalid_argument(format!(
                "missing required argument `{name}` (position {index})"
            ))
        })
    }
}

impl From<Vec<Value>> for CallArgs {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl FromIterator<Value> for CallArgs {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Build `CallArgs` from a list of values convertible into JSON.
#[macro_export]
macro_rules! call_args {
    () => {
        $crate::dispatch::CallArgs::empty()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::dispatch::CallArgs::new(vec![$($crate::__serde_json::Value::from($value)),+])
    };
}

// ---------------------------------------------------------------------------
// ApiCall
// ---------------------------------------------------------------------------

/// A dispatch request: operation name plus its arguments.
///
/// Serialises as `{"name": "...", "args": [...]}`; `args` may be omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiCall {
    pub name: String,
    #[serde(default)]
    pub args: CallArgs,
}

impl ApiCall {
    #[must_use]
    pub fn new(name: impl Into<String>, args: CallArgs) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}
