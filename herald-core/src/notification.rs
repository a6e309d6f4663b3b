//! Bundled notification payloads.
//!
//! The registry treats payloads as opaque. These types are the defaults used
//! when a registry is built without explicit type parameters, and model what a
//! platform notification service hands over: a delivered [`Notification`] and
//! the user's [`NotificationResponse`] to it.

use crate::message::Message;
use std::{collections::BTreeMap, time::SystemTime};

/// Action identifier reported when the user simply opened the notification.
pub const DEFAULT_ACTION_IDENTIFIER: &str = "default";

/// Displayable content of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationContent {
    /// Headline shown in bold.
    pub title: Option<String>,
    /// Secondary line under the title.
    pub subtitle: Option<String>,
    /// Main text.
    pub body: Option<String>,
    /// Arbitrary key/value data attached by the sender.
    pub data: BTreeMap<String, String>,
    /// Badge count to set on the application icon.
    pub badge: Option<u32>,
    /// Name of the sound played on delivery.
    pub sound: Option<String>,
}

/// A delivered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    identifier: String,
    date: SystemTime,
    content: NotificationContent,
}

impl Notification {
    /// Creates a notification delivered now with empty content.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            date: SystemTime::now(),
            content: NotificationContent::default(),
        }
    }

    /// Sets the delivery time.
    pub fn date(mut self, date: SystemTime) -> Self {
        self.date = date;
        self
    }

    /// Replaces the whole content.
    pub fn content(mut self, content: NotificationContent) -> Self {
        self.content = content;
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.content.title = Some(title.into());
        self
    }

    /// Sets the subtitle.
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.content.subtitle = Some(subtitle.into());
        self
    }

    /// Sets the body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.content.body = Some(body.into());
        self
    }

    /// Adds one data entry, replacing any previous value for `key`.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.content.data.insert(key.into(), value.into());
        self
    }

    /// Sender-assigned identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// When the notification was delivered.
    pub fn delivered_at(&self) -> SystemTime {
        self.date
    }

    /// Displayable content.
    pub fn body_content(&self) -> &NotificationContent {
        &self.content
    }
}

impl Message for Notification {}

/// The user's action on a previously delivered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationResponse {
    action_identifier: String,
    user_text: Option<String>,
    notification: Notification,
}

impl NotificationResponse {
    /// A response for the default action (the notification was opened).
    pub fn opened(notification: Notification) -> Self {
        Self::new(DEFAULT_ACTION_IDENTIFIER, notification)
    }

    /// A response for the named action.
    pub fn new(action_identifier: impl Into<String>, notification: Notification) -> Self {
        Self {
            action_identifier: action_identifier.into(),
            user_text: None,
            notification,
        }
    }

    /// Attaches text typed by the user (text-input actions).
    pub fn with_user_text(mut self, text: impl Into<String>) -> Self {
        self.user_text = Some(text.into());
        self
    }

    /// Identifier of the action the user picked.
    pub fn action_identifier(&self) -> &str {
        &self.action_identifier
    }

    /// Text entered by the user, if the action accepted input.
    pub fn user_text(&self) -> Option<&str> {
        self.user_text.as_deref()
    }

    /// The notification this response refers to.
    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    /// Returns `true` if the user opened the notification without picking an action.
    pub fn is_default_action(&self) -> bool {
        self.action_identifier == DEFAULT_ACTION_IDENTIFIER
    }
}

impl Message for NotificationResponse {}
