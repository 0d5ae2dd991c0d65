//! The fixed HAAPI operation catalog.
//!
//! Every catalog entry is an [`EndpointOperation`]: a declarative description
//! of one endpoint call (verb, whether it needs the session api key, and
//! where each positional argument goes). Registration is an explicit list, so
//! the set of operation names is known at compile time.

mod operations;

use async_trait::async_trait;
use haapi_core::{
    ApiRequest, ApiResponse, DomainError, Endpoint, HttpMethod, InvokeError, UrlBuilder,
};
use tracing::debug;

use crate::dispatch::{ApiOperation, CallArgs, DispatchContext, OperationRegistry};
use crate::traits::SessionAuth;

pub use operations::CATALOG;

// ---------------------------------------------------------------------------
// Param
// ---------------------------------------------------------------------------

/// Where an argument is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// URL query string.
    Query,
    /// Form-encoded request body.
    Form,
}

/// One positional argument of a catalog operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub placement: Placement,
    pub required: bool,
}

impl Param {
    #[must_use]
    pub const fn query(name: &'static str) -> Self {
        Self {
            name,
            placement: Placement::Query,
            required: true,
        }
    }

    #[must_use]
    pub const fn query_opt(name: &'static str) -> Self {
        Self {
            name,
            placement: Placement::Query,
            required: false,
        }
    }

    #[must_use]
    pub const fn form(name: &'static str) -> Self {
        Self {
            name,
            placement: Placement::Form,
            required: true,
        }
    }

    #[must_use]
    pub const fn form_opt(name: &'static str) -> Self {
        Self {
            name,
            placement: Placement::Form,
            required: false,
        }
    }
}

// ---------------------------------------------------------------------------
// EndpointOperation
// ---------------------------------------------------------------------------

/// A catalog operation: one request to one endpoint.
///
/// Argument layout: when `api_key` is set, position 0 is the api key (sent
/// as the `APIKEY` header) and `params` follow from position 1. A null or
/// absent key falls back to the session's current key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointOperation {
    pub name: &'static str,
    pub endpoint: Endpoint,
    pub method: HttpMethod,
    pub api_key: bool,
    pub params: &'static [Param],
}

impl EndpointOperation {
    /// Most positional arguments this operation accepts.
    #[must_use]
    pub fn arity(&self) -> usize {
        usize::from(self.api_key) + self.params.len()
    }

    /// Map call arguments to a transport request. No I/O.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_ARGUMENT` for a missing required argument (including
    /// an api key that is neither passed nor held by `session`), a non-scalar
    /// argument, or too many arguments.
    pub fn build_request(
        &self,
        urls: &UrlBuilder,
        session: &dyn SessionAuth,
        args: &CallArgs,
    ) -> Result<ApiRequest, DomainError> {
        if args.len() > self.arity() {
            return Err(DomainError::invalid_argument(format!(
                "`{}` takes at most {} arguments, got {}",
                self.name,
                self.arity(),
                args.len()
            )));
        }

        let offset = usize::from(self.api_key);
        let api_key = if self.api_key {
            let key = args.text(0, "api_key")?.or_else(|| session.api_key());
            Some(key.ok_or_else(|| {
                DomainError::invalid_argument(
                    "missing required argument `api_key` (position 0) and no session key",
                )
            })?)
        } else {
            None
        };

        let mut query: Vec<(&str, String)> = Vec::new();
        let mut form: Vec<(String, String)> = Vec::new();
        for (i, param) in self.params.iter().enumerate() {
            let index = offset + i;
            let value = if param.required {
                Some(args.required_text(index, param.name)?)
            } else {
                args.text(index, param.name)?
            };
            let Some(value) = value else { continue };
            match param.placement {
                Placement::Query => query.push((param.name, value)),
                Placement::Form => form.push((param.name.to_string(), value)),
            }
        }

        let mut request = ApiRequest::new(self.method, urls.build_url(self.endpoint, &query));
        request.api_key = api_key;
        request.form = form;
        Ok(request)
    }
}

#[async_trait]
impl ApiOperation for EndpointOperation {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn call(
        &self,
        ctx: &DispatchContext,
        args: &CallArgs,
    ) -> Result<ApiResponse, InvokeError> {
        let request = self.build_request(&ctx.urls, &*ctx.auth, args)?;
        debug!(
            operation = self.name,
            method = %request.method,
            endpoint = %self.endpoint,
            "sending request"
        );
        Ok(ctx.transport.perform(request).await?)
    }
}

/// Register every catalog operation.
pub fn register_catalog(registry: &mut OperationRegistry) {
    for operation in CATALOG {
        registry.register(*operation);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
