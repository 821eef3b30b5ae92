use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::error::{Error, Result};

/// Builds the HTML content of one view from its options.
#[async_trait]
pub trait ViewBuilder: Send + Sync {
    async fn build(&self, options: &Value) -> Result<String>;
}

/// Adapter letting a plain async closure act as a [`ViewBuilder`].
pub struct FnViewBuilder<F>(pub F);

#[async_trait]
impl<F> ViewBuilder for FnViewBuilder<F>
where
    F: Fn(&Value) -> BoxFuture<'static, Result<String>> + Send + Sync,
{
    async fn build(&self, options: &Value) -> Result<String> {
        (self.0)(options).await
    }
}

/// Static registry entry for one view. Built once at startup, immutable
/// thereafter. The parent relation forms a forest used for breadcrumb
/// highlighting only.
pub struct ViewDescriptor {
    pub name: String,
    pub parent: Option<String>,
    /// Secret views can only be activated through internal navigation,
    /// never as a direct target.
    pub secret: bool,
    builder: Arc<dyn ViewBuilder>,
}

impl ViewDescriptor {
    pub fn new(name: impl Into<String>, builder: Arc<dyn ViewBuilder>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            secret: false,
            builder,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }
}

/// The named-view directory.
pub struct ViewRegistry {
    views: HashMap<String, ViewDescriptor>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self {
            views: HashMap::new(),
        }
    }

    pub fn register(mut self, descriptor: ViewDescriptor) -> Self {
        self.views.insert(descriptor.name.clone(), descriptor);
        self
    }

    /// A view is valid if it exists in the registry.
    pub fn is_valid(&self, view: &str) -> bool {
        self.views.contains_key(view)
    }

    /// Whether the view is secret; `None` for unknown views.
    pub fn is_secret(&self, view: &str) -> Option<bool> {
        self.views.get(view).map(|v| v.secret)
    }

    /// The parent view name, or `fallback` when the view is unknown.
    /// A known, rootless view has no parent.
    pub fn parent_of<'a>(&'a self, view: &str, fallback: Option<&'a str>) -> Option<&'a str> {
        match self.views.get(view) {
            Some(descriptor) => descriptor.parent.as_deref(),
            None => fallback,
        }
    }

    /// Activates a view: runs its builder and returns the content.
    ///
    /// Secret views require `allow_secret`; violating that is a loud
    /// error, not a silent no-op.
    pub async fn activate(
        &self,
        view: &str,
        options: &Value,
        allow_secret: bool,
    ) -> Result<String> {
        let descriptor = self
            .views
            .get(view)
            .ok_or_else(|| Error::UnknownView(view.to_string()))?;

        if descriptor.secret && !allow_secret {
            return Err(Error::SecretView(view.to_string()));
        }

        descriptor.builder.build(options).await
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}
