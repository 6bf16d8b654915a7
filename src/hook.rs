//! Query hook contract between an ORM adapter and observers
//!
//! The adapter calls `before_query` ahead of execution and `after_query`
//! once the query has completed. `QueryHooks` is the adapter-side registry
//! that fans both calls out to every registered hook. It exists for ORM
//! adapter authors; code that only logs queries can call `QueryLogger`
//! directly.

use crate::error::Result;
use crate::event::QueryEvent;
use std::collections::HashMap;
use std::sync::Arc;

/// Correlation token threaded from `before_query` to `after_query`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryContext {
    /// Arbitrary key-value metadata set by the adapter or by hooks
    pub metadata: HashMap<String, String>,
}

impl QueryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Callbacks invoked around every query
pub trait QueryHook: Send + Sync {
    /// Called before execution; returns the context to carry forward
    ///
    /// Default implementation returns `ctx` unchanged.
    fn before_query(&self, ctx: QueryContext, _event: &QueryEvent) -> QueryContext {
        ctx
    }

    /// Called after execution with the completed event
    ///
    /// An error means the hook itself is misconfigured; adapters must
    /// propagate it.
    fn after_query(&self, ctx: &QueryContext, event: &QueryEvent) -> Result<()>;
}

/// Ordered set of hooks registered with an adapter
#[derive(Clone, Default)]
pub struct QueryHooks {
    hooks: Vec<Arc<dyn QueryHook>>,
}

impl QueryHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook; hooks run in registration order
    pub fn add(&mut self, hook: impl QueryHook + 'static) -> &mut Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Register a shared hook
    pub fn add_shared(&mut self, hook: Arc<dyn QueryHook>) -> &mut Self {
        self.hooks.push(hook);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Thread `ctx` through every hook's `before_query`
    pub fn before_query(&self, ctx: QueryContext, event: &QueryEvent) -> QueryContext {
        self.hooks
            .iter()
            .fold(ctx, |ctx, hook| hook.before_query(ctx, event))
    }

    /// Run every hook's `after_query`, stopping at the first error
    pub fn after_query(&self, ctx: &QueryContext, event: &QueryEvent) -> Result<()> {
        for hook in &self.hooks {
            hook.after_query(ctx, event)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for QueryHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryHooks")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
