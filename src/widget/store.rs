//! Mounted widget instances and their storage.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::{Answer, QueryError};
use crate::chat::{InteractionController, PendingQuery};

/// One mounted widget: launcher, modal and chat state for a single page view.
#[derive(Debug)]
pub struct WidgetInstance {
    id: String,
    /// Whether the chat modal is showing.
    open: bool,
    controller: InteractionController,
    last_activity: DateTime<Utc>,
}

impl WidgetInstance {
    fn new(id: String, greeting: &str) -> Self {
        Self {
            id,
            open: false,
            controller: InteractionController::new(greeting),
            last_activity: Utc::now(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the modal open or closed. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut InteractionController {
        &mut self.controller
    }

    fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// Check if the instance has been idle longer than `timeout`.
    ///
    /// An instance with a query in flight never expires.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        if self.controller.is_awaiting() {
            return false;
        }
        match (Utc::now() - self.last_activity).to_std() {
            Ok(idle) => idle > timeout,
            // Negative duration: clock went backwards.
            Err(_) => false,
        }
    }
}

/// Thread-safe registry of mounted widget instances.
///
/// Cloning is cheap; clones share the same instances.
#[derive(Debug, Clone)]
pub struct WidgetStore {
    inner: Arc<WidgetStoreInner>,
}

#[derive(Debug)]
struct WidgetStoreInner {
    greeting: String,
    instances: RwLock<HashMap<String, WidgetInstance>>,
}

impl WidgetStore {
    /// Create a store whose instances greet readers with `greeting`.
    #[must_use]
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(WidgetStoreInner {
                greeting: greeting.into(),
                instances: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Mount a new instance and return its id.
    #[must_use]
    pub fn mount(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let instance = WidgetInstance::new(id.clone(), &self.inner.greeting);
        self.inner
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), instance);
        id
    }

    /// Run `f` against the instance `id`, or return `None` if it is not mounted.
    pub fn with_instance<R>(&self, id: &str, f: impl FnOnce(&mut WidgetInstance) -> R) -> Option<R> {
        let mut guard = self
            .inner
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let instance = guard.get_mut(id)?;
        instance.touch();
        Some(f(instance))
    }

    /// Flip the modal of instance `id`. Returns the new open state.
    pub fn toggle(&self, id: &str) -> Option<bool> {
        self.with_instance(id, WidgetInstance::toggle)
    }

    /// Close the modal of instance `id`.
    pub fn close(&self, id: &str) -> Option<()> {
        self.with_instance(id, WidgetInstance::close)
    }

    /// Start a query on instance `id`.
    ///
    /// Returns `Some(None)` when the instance ignored the submit.
    pub fn begin(&self, id: &str, raw_text: &str) -> Option<Option<PendingQuery>> {
        self.with_instance(id, |instance| instance.controller_mut().begin(raw_text))
    }

    /// Deliver the outcome of a query started on instance `id`.
    ///
    /// Returns `false` when the instance was unmounted while the query was in
    /// flight; the outcome is dropped.
    pub fn settle(
        &self,
        id: &str,
        ticket: PendingQuery,
        outcome: Result<Answer, QueryError>,
    ) -> bool {
        let settled = self.with_instance(id, move |instance| {
            instance.controller_mut().settle(ticket, outcome);
        });
        if settled.is_none() {
            tracing::debug!(
                name: "widget.settle.unmounted",
                widget_id = %id,
                "Dropping answer for unmounted widget"
            );
        }
        settled.is_some()
    }

    /// Remove instance `id`. Returns whether it was mounted.
    pub fn unmount(&self, id: &str) -> bool {
        self.inner
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some()
    }

    /// Check whether instance `id` is mounted.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.inner
            .instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Get the number of mounted instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove instances that have been idle longer than the timeout.
    ///
    /// Returns the number of instances removed.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self
            .inner
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = guard.len();
        guard.retain(|_, instance| !instance.is_expired_with_timeout(timeout));
        before - guard.len()
    }
}
