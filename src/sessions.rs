// src/sessions.rs
use std::time::Duration;

use moka::future::Cache;
use uuid::Uuid;

use crate::client::ProductClient;
use crate::component::AddProductForm;
use crate::handle::{FormHandle, spawn_form};

const MAX_OPEN_FORMS: u64 = 10_000;

/// Every page load mounts its own form, so admins (and reloads) never share a
/// draft. The id is rendered into the page's htmx paths.
///
/// Entries that see no request for `idle_timeout` are evicted; dropping the
/// last handle stops the form's task.
#[derive(Clone)]
pub struct FormSessions {
    forms: Cache<Uuid, FormHandle>,
    client: ProductClient,
}

impl FormSessions {
    pub fn new(client: ProductClient, idle_timeout: Duration) -> Self {
        let forms = Cache::builder()
            .max_capacity(MAX_OPEN_FORMS)
            .time_to_idle(idle_timeout)
            .build();
        Self { forms, client }
    }

    /// Starts an empty form and registers it under a fresh id.
    pub async fn mount(&self) -> (Uuid, FormHandle) {
        let form_id = Uuid::new_v4();
        let form = spawn_form(AddProductForm::new(self.client.clone()));
        self.forms.insert(form_id, form.clone()).await;
        tracing::info!(
            "Mounted product form {} (~{} open)",
            form_id,
            self.forms.entry_count()
        );
        (form_id, form)
    }

    pub async fn get(&self, form_id: &Uuid) -> Option<FormHandle> {
        self.forms.get(form_id).await
    }
}
