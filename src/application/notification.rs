//! NotificationDispatcher - Fire-and-forget delivery of outbound notifications.
//!
//! Handlers never wait on delivery. They hand a [`NotificationJob`] to the
//! dispatcher, which queues it on a bounded channel. A background
//! [`NotificationWorker`] drains the queue, expands comment events into
//! per-recipient notifications, and logs delivery failures.
//!
//! ## Fan-out rules
//!
//! | Event | Recipients |
//! |-------|------------|
//! | New comment | Every moderator of the domain except the author |
//! | Approved reply | Author of the parent comment, unless anonymous or the replier |

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::comment::CommentCreated;
use crate::domain::foundation::DomainError;
use crate::ports::{
    CommentRepository, CommenterRepository, DomainRepository, Notification, Notifier, Recipient,
};

/// Work item accepted by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationJob {
    /// Deliver one notification to one recipient.
    Direct {
        notification: Notification,
        recipient: Recipient,
    },
    /// Fan a newly created comment out to moderators and the parent author.
    CommentCreated(CommentCreated),
}

/// Cloneable handle used by handlers to enqueue notifications.
#[derive(Clone)]
pub struct NotificationDispatcher {
    sender: mpsc::Sender<NotificationJob>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher together with the receiving end of its queue.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<NotificationJob>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Creates a dispatcher and spawns a worker draining its queue.
    pub fn spawn(capacity: usize, worker: NotificationWorker) -> (Self, JoinHandle<()>) {
        let (dispatcher, receiver) = Self::channel(capacity);
        let handle = tokio::spawn(worker.run(receiver));
        (dispatcher, handle)
    }

    /// Enqueues a job without waiting. A full or closed queue drops the job.
    pub fn dispatch(&self, job: NotificationJob) {
        if let Err(err) = self.sender.try_send(job) {
            let reason = match err {
                mpsc::error::TrySendError::Full(_) => "queue full",
                mpsc::error::TrySendError::Closed(_) => "queue closed",
            };
            warn!(reason, "Dropping notification");
        }
    }

    pub fn notify(&self, notification: Notification, recipient: Recipient) {
        self.dispatch(NotificationJob::Direct {
            notification,
            recipient,
        });
    }
}

/// Background consumer of the notification queue.
pub struct NotificationWorker {
    notifier: Arc<dyn Notifier>,
    domains: Arc<dyn DomainRepository>,
    comments: Arc<dyn CommentRepository>,
    commenters: Arc<dyn CommenterRepository>,
}

impl NotificationWorker {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        domains: Arc<dyn DomainRepository>,
        comments: Arc<dyn CommentRepository>,
        commenters: Arc<dyn CommenterRepository>,
    ) -> Self {
        Self {
            notifier,
            domains,
            comments,
            commenters,
        }
    }

    /// Drains the queue until every dispatcher handle is dropped.
    pub async fn run(self, mut receiver: mpsc::Receiver<NotificationJob>) {
        while let Some(job) = receiver.recv().await {
            self.process(job).await;
        }
        debug!("Notification queue closed");
    }

    /// Handles one job. Returns the number of notifications delivered.
    pub async fn process(&self, job: NotificationJob) -> usize {
        let deliveries = match job {
            NotificationJob::Direct {
                notification,
                recipient,
            } => vec![(notification, recipient)],
            NotificationJob::CommentCreated(event) => match self.expand(&event).await {
                Ok(deliveries) => deliveries,
                Err(err) => {
                    warn!(
                        comment_id = %event.comment_id,
                        error = %err,
                        "Failed to resolve notification recipients"
                    );
                    return 0;
                }
            },
        };

        let mut delivered = 0;
        for (notification, recipient) in deliveries {
            match self.notifier.notify(&notification, &recipient).await {
                Ok(()) => delivered += 1,
                Err(err) => warn!(
                    kind = notification.kind(),
                    recipient = %recipient.email,
                    error = %err,
                    "Notification delivery failed"
                ),
            }
        }
        delivered
    }

    async fn expand(
        &self,
        event: &CommentCreated,
    ) -> Result<Vec<(Notification, Recipient)>, DomainError> {
        let mut deliveries = Vec::new();

        let author = if event.author_id.is_anonymous() {
            None
        } else {
            self.commenters.find_by_id(&event.author_id).await?
        };
        let author_email = author.as_ref().map(|a| a.email().to_string());

        if let Some(domain) = self.domains.find(&event.domain).await? {
            for moderator in domain.moderators() {
                if author_email
                    .as_deref()
                    .is_some_and(|email| email.eq_ignore_ascii_case(moderator))
                {
                    continue;
                }
                deliveries.push((
                    Notification::NewComment {
                        domain: event.domain.clone(),
                        path: event.path.clone(),
                        comment_id: event.comment_id.clone(),
                        html: event.html.clone(),
                        pending_moderation: event.awaits_moderation(),
                    },
                    Recipient {
                        email: moderator.clone(),
                        name: moderator.clone(),
                    },
                ));
            }
        }

        if event.awaits_moderation() {
            return Ok(deliveries);
        }
        let Some(parent_id) = event.parent.comment_id() else {
            return Ok(deliveries);
        };
        let Some(parent) = self.comments.find(parent_id).await? else {
            return Ok(deliveries);
        };
        let parent_author = parent.author_id();
        if parent_author.is_anonymous() || parent_author == &event.author_id {
            return Ok(deliveries);
        }
        if let Some(recipient) = self.commenters.find_by_id(parent_author).await? {
            deliveries.push((
                Notification::Reply {
                    domain: event.domain.clone(),
                    path: event.path.clone(),
                    comment_id: event.comment_id.clone(),
                    html: event.html.clone(),
                },
                Recipient {
                    email: recipient.email().to_string(),
                    name: recipient.name().to_string(),
                },
            ));
        }

        Ok(deliveries)
    }
}
