// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Form-to-request binding
//!
//! Turns a submittable form value into a dispatch: the target address
//! comes from the form action (overridable), the payload from the field
//! set (overridable), and the settled outcome is routed to registered
//! success/error callbacks.

use crate::dispatch::{DispatchOptions, Dispatcher, Payload};
use crate::error::{Error, Result};
use crate::outcome::DispatchResult;

/// Extracted form value, independent of any DOM
#[derive(Debug, Clone, Default)]
pub struct Form {
    /// Form action attribute, the default target address
    pub action: Option<String>,
    /// Form method attribute; missing or unrecognized means post
    pub method: Option<String>,
    /// Field name/value pairs in document order
    pub fields: Vec<(String, String)>,
}

impl Form {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the action
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Set the method
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Append a field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

type ApiFn = Box<dyn Fn(&Form, Option<&str>) -> Option<String> + Send + Sync>;
type DataFn = Box<dyn Fn(&Form) -> Payload + Send + Sync>;
type SuccessFn = Box<dyn Fn(DispatchResult) + Send + Sync>;
type ErrorFn = Box<dyn Fn(Error) + Send + Sync>;

/// Submit interceptor routing a form through the dispatcher
pub struct FormBinding {
    api: Option<ApiFn>,
    data: Option<DataFn>,
    success: SuccessFn,
    error: ErrorFn,
}

impl Default for FormBinding {
    fn default() -> Self {
        Self::new()
    }
}

impl FormBinding {
    /// Create a binding with no-op outcome handlers
    pub fn new() -> Self {
        Self {
            api: None,
            data: None,
            success: Box::new(|_| {}),
            error: Box::new(|_| {}),
        }
    }

    /// Override target-address derivation; receives the form and its
    /// action attribute
    pub fn api<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Form, Option<&str>) -> Option<String> + Send + Sync + 'static,
    {
        self.api = Some(Box::new(callback));
        self
    }

    /// Override payload derivation
    pub fn data<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Form) -> Payload + Send + Sync + 'static,
    {
        self.data = Some(Box::new(callback));
        self
    }

    /// Register the success handler
    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: Fn(DispatchResult) + Send + Sync + 'static,
    {
        self.success = Box::new(callback);
        self
    }

    /// Register the error handler
    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(Error) + Send + Sync + 'static,
    {
        self.error = Box::new(callback);
        self
    }

    /// Dispatch the form through `dispatcher`
    ///
    /// Fails synchronously when no target address can be derived.
    /// Transport outcomes are routed to the registered callbacks, never
    /// returned.
    pub async fn submit(&self, dispatcher: &Dispatcher, form: &Form) -> Result<()> {
        let address = match &self.api {
            Some(callback) => callback(form, form.action.as_deref()),
            None => form.action.clone(),
        };
        let address = address.ok_or(Error::MissingAddress)?;

        let payload = match &self.data {
            Some(callback) => callback(form),
            None => Payload::Form(form.fields.clone()),
        };

        let mut options = DispatchOptions::new();
        if let Some(method) = &form.method {
            options = options.method(method.clone());
        }

        let handle = dispatcher.dispatch(&address, options)?;
        match handle.launch(payload).await {
            Ok(result) => (self.success)(result),
            Err(err) => (self.error)(err),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_action_fails_before_dispatch() {
        let dispatcher = Dispatcher::new().unwrap();
        let binding = FormBinding::new();
        let form = Form::new().field("a", "1");

        let err = binding.submit(&dispatcher, &form).await.unwrap_err();
        assert!(matches!(err, Error::MissingAddress));
    }

    #[tokio::test]
    async fn test_api_override_can_supply_address() {
        let dispatcher = Dispatcher::new().unwrap();
        // Override returns None: still a synchronous failure
        let binding = FormBinding::new().api(|_, _| None);
        let form = Form::new().action("https://example.com/submit");
        assert!(binding.submit(&dispatcher, &form).await.is_err());
    }

    #[test]
    fn test_form_builder() {
        let form = Form::new()
            .action("/login")
            .method("post")
            .field("user", "john")
            .field("pass", "secret");
        assert_eq!(form.action.as_deref(), Some("/login"));
        assert_eq!(form.fields.len(), 2);
    }
}
