//! Pushes the supported language list to subscribers.
//!
//! Every push carries the full current list, never a diff.

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::languages::Language;

/// Default channel for language list updates.
pub const SUPPORTED_LANGUAGES_CHANNEL: &str = "supported-languages-update";

/// Notification transport.
pub trait Notifier: Send + Sync {
    fn notify(&self, channel: &str, languages: &[Language]) -> Result<()>;
}

/// Binds a notifier to one channel.
#[derive(Clone)]
pub struct Publisher {
    notifier: Arc<dyn Notifier>,
    channel: String,
}

impl Publisher {
    pub fn new(notifier: Arc<dyn Notifier>, channel: impl Into<String>) -> Self {
        Self {
            notifier,
            channel: channel.into(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Push `languages` on the channel. Transport failures are logged, not returned.
    pub fn publish(&self, languages: &[Language]) {
        match self.notifier.notify(&self.channel, languages) {
            Ok(()) => debug!(
                "Published {} languages on '{}'",
                languages.len(),
                self.channel
            ),
            Err(e) => warn!("Failed to publish on '{}': {:#}", self.channel, e),
        }
    }
}

/// One push on a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub channel: String,
    pub languages: Vec<Language>,
}

/// In-process transport backed by a tokio broadcast channel.
pub struct ChannelNotifier {
    sender: broadcast::Sender<Notification>,
}

impl ChannelNotifier {
    /// `capacity` bounds how many pushes a slow subscriber may lag behind.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for ChannelNotifier {
    fn default() -> Self {
        Self::new(16)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, channel: &str, languages: &[Language]) -> Result<()> {
        let notification = Notification {
            channel: channel.to_string(),
            languages: languages.to_vec(),
        };
        // An error here only means nobody is subscribed yet.
        if self.sender.send(notification).is_err() {
            debug!("No subscribers on '{}'", channel);
        }
        Ok(())
    }
}
