use serde::Serialize;

/// A non-fatal, user-facing message produced while handling one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Category or field name the message refers to.
    pub key: String,
    pub message: String,
    /// Optional status hint for the caller's response mapping (HTTP semantics).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl Notification {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
            status_code: None,
        }
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }
}

/// Append-only accumulator scoped to a single logical request.
///
/// Insertion order is preserved and identical notifications are all kept, so
/// callers can surface `first()` as a summary message.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.items.push(notification);
    }

    pub fn add(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.push(Notification::new(key, message));
    }

    pub fn add_with_status(
        &mut self,
        key: impl Into<String>,
        message: impl Into<String>,
        status_code: u16,
    ) {
        self.push(Notification::new(key, message).with_status(status_code));
    }

    pub fn add_many<I>(&mut self, notifications: I)
    where
        I: IntoIterator,
        I::Item: Into<Notification>,
    {
        self.items
            .extend(notifications.into_iter().map(Into::into));
    }

    pub fn has_any(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn all(&self) -> &[Notification] {
        &self.items
    }

    pub fn first(&self) -> Option<&Notification> {
        self.items.first()
    }

    /// First notification carrying a status hint, if any.
    pub fn first_with_status(&self) -> Option<&Notification> {
        self.items.iter().find(|n| n.status_code.is_some())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
