// src/handle.rs

use tokio::sync::{mpsc, oneshot, watch};

use crate::component::{AddProductForm, FormSnapshot};
use crate::errors::{FormError, SubmitError};
use crate::image::{PreviewRequest, load_preview};
use crate::models::ImageFile;
use crate::notifications::Notification;

enum FormEvent {
    FieldChanged {
        name: String,
        value: String,
        reply: oneshot::Sender<Result<FormSnapshot, FormError>>,
    },
    AvailabilityChanged {
        available: bool,
        reply: oneshot::Sender<FormSnapshot>,
    },
    FileSelected {
        file: Option<ImageFile>,
        reply: oneshot::Sender<FormSnapshot>,
    },
    PreviewLoaded {
        token: u64,
        preview: Option<String>,
    },
    Submit {
        reply: oneshot::Sender<Notification>,
    },
    SubmissionFinished {
        result: Result<(), SubmitError>,
        reply: oneshot::Sender<Notification>,
    },
}

/// Cloneable front end to a running form. All state lives on the form's own
/// task; callers only send events and read published snapshots.
#[derive(Clone)]
pub struct FormHandle {
    events: mpsc::UnboundedSender<FormEvent>,
    snapshots: watch::Receiver<FormSnapshot>,
}

/// Moves `form` onto its own task and returns a handle to it. The task stops
/// once every handle is dropped and its spawned work has reported back.
pub fn spawn_form(form: AddProductForm) -> FormHandle {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let (snapshot_tx, snapshot_rx) = watch::channel(form.snapshot());

    let task = FormTask {
        form,
        events: events_tx.downgrade(),
        snapshots: snapshot_tx,
    };
    tokio::spawn(task.run(events_rx));

    FormHandle {
        events: events_tx,
        snapshots: snapshot_rx,
    }
}

impl FormHandle {
    async fn request<T>(
        &self,
        make_event: impl FnOnce(oneshot::Sender<T>) -> FormEvent,
    ) -> Result<T, FormError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.events
            .send(make_event(reply_tx))
            .map_err(|_| FormError::Closed)?;
        reply_rx.await.map_err(|_| FormError::Closed)
    }

    pub async fn set_field(
        &self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<FormSnapshot, FormError> {
        let name = name.to_string();
        let value = value.into();
        self.request(|reply| FormEvent::FieldChanged { name, value, reply })
            .await?
    }

    pub async fn set_available(&self, available: bool) -> Result<FormSnapshot, FormError> {
        self.request(|reply| FormEvent::AvailabilityChanged { available, reply })
            .await
    }

    /// Returns as soon as the file is stored. The preview shows up in a later
    /// snapshot, see [`FormHandle::preview_settled`].
    pub async fn select_file(&self, file: Option<ImageFile>) -> Result<FormSnapshot, FormError> {
        self.request(|reply| FormEvent::FileSelected { file, reply })
            .await
    }

    /// Sends the current draft and waits for the backend's answer.
    pub async fn submit(&self) -> Result<Notification, FormError> {
        self.request(|reply| FormEvent::Submit { reply }).await
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.snapshots.clone()
    }

    /// Waits until no preview read is outstanding for the current selection.
    pub async fn preview_settled(&self) -> Result<FormSnapshot, FormError> {
        let mut snapshots = self.snapshots.clone();
        let settled = snapshots
            .wait_for(|s| !s.preview_loading)
            .await
            .map_err(|_| FormError::Closed)?;
        Ok(FormSnapshot::clone(&settled))
    }
}

struct FormTask {
    form: AddProductForm,
    events: mpsc::WeakUnboundedSender<FormEvent>,
    snapshots: watch::Sender<FormSnapshot>,
}

impl FormTask {
    async fn run(mut self, mut events: mpsc::UnboundedReceiver<FormEvent>) {
        tracing::debug!("Product form started");
        while let Some(event) = events.recv().await {
            self.handle(event);
        }
        tracing::debug!("Product form stopped");
    }

    fn handle(&mut self, event: FormEvent) {
        // Every state change happens here, one event at a time.
        match event {
            FormEvent::FieldChanged { name, value, reply } => {
                let result = self
                    .form
                    .set_field_by_name(&name, value)
                    .map(|()| self.publish());
                let _ = reply.send(result);
            }
            FormEvent::AvailabilityChanged { available, reply } => {
                self.form.set_available(available);
                let _ = reply.send(self.publish());
            }
            FormEvent::FileSelected { file, reply } => {
                // The file is stored now; its preview arrives as a later event.
                if let Some(request) = self.form.select_file(file) {
                    self.spawn_preview(request);
                }
                let _ = reply.send(self.publish());
            }
            FormEvent::PreviewLoaded { token, preview } => {
                // Stale reads are dropped inside `apply_preview`.
                if self.form.apply_preview(token, preview) {
                    tracing::debug!("Preview for token {} applied", token);
                    self.publish();
                }
            }
            FormEvent::Submit { reply } => {
                let Some(events) = self.events.upgrade() else {
                    tracing::warn!("Form is shutting down, submission dropped");
                    return;
                };
                // Capture draft and image now, then let the request run on its
                // own task so edits keep flowing while it is pending.
                let request = self.form.begin_submit();
                self.publish();
                tokio::spawn(async move {
                    let result = request.await;
                    if events
                        .send(FormEvent::SubmissionFinished { result, reply })
                        .is_err()
                    {
                        tracing::warn!("Form stopped before the submission finished");
                    }
                });
            }
            FormEvent::SubmissionFinished { result, reply } => {
                // Success resets whatever the form holds by now.
                let notification = self.form.finish_submit(result);
                self.publish();
                let _ = reply.send(notification);
            }
        }
    }

    fn spawn_preview(&self, request: PreviewRequest) {
        let Some(events) = self.events.upgrade() else {
            return;
        };
        tokio::spawn(async move {
            let preview = load_preview(&request).await;
            let token = request.token;
            if events
                .send(FormEvent::PreviewLoaded { token, preview })
                .is_err()
            {
                tracing::debug!("Form stopped before preview {} was read", token);
            }
        });
    }

    // Views and waiters only ever read what is published here.
    fn publish(&self) -> FormSnapshot {
        let snapshot = self.form.snapshot();
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }
}
