//! Render-ready snapshots of widget state.
//!
//! Components never see a [`WidgetInstance`]; handlers take a snapshot under
//! the store lock and render after releasing it.

use std::fmt::Write as _;

use chrono::{DateTime, Local, Utc};

use crate::chat::{Message, Sender};
use crate::config::WidgetConfig;
use crate::widget::WidgetInstance;

/// Format used when the configured time format is invalid.
const FALLBACK_TIME_FORMAT: &str = "%H:%M";

/// One message as it will be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub dom_id: String,
    pub text: String,
    pub sender: Sender,
    /// Local time-of-day label.
    pub time_label: String,
    /// RFC 3339 timestamp for the `<time>` element.
    pub datetime: String,
}

impl MessageView {
    fn from_message(widget_id: &str, message: &Message, time_format: &str) -> Self {
        Self {
            dom_id: format!("cw-{widget_id}-msg-{}", message.id()),
            text: message.text().to_owned(),
            sender: message.sender(),
            time_label: time_label(message.timestamp(), time_format),
            datetime: message.timestamp().to_rfc3339(),
        }
    }
}

/// Chat panel state: transcript, loading flag and composer text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub widget_id: String,
    pub title: String,
    pub placeholder: String,
    pub messages: Vec<MessageView>,
    pub awaiting: bool,
    pub pending_input: String,
    pub poll_interval_ms: u64,
}

impl PanelView {
    /// Snapshot the chat panel of `instance`.
    #[must_use]
    pub fn from_instance(instance: &WidgetInstance, config: &WidgetConfig) -> Self {
        let controller = instance.controller();
        Self {
            widget_id: instance.id().to_owned(),
            title: config.title.clone(),
            placeholder: config.placeholder.clone(),
            messages: controller
                .transcript()
                .messages()
                .iter()
                .map(|m| MessageView::from_message(instance.id(), m, &config.time_format))
                .collect(),
            awaiting: controller.is_awaiting(),
            pending_input: controller.pending_input().to_owned(),
            poll_interval_ms: config.poll_interval_ms,
        }
    }

    #[must_use]
    pub fn dom_id(&self) -> String {
        panel_dom_id(&self.widget_id)
    }
}

/// Whole widget state: launcher plus (when open) the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetView {
    pub widget_id: String,
    pub open: bool,
    pub panel: PanelView,
}

impl WidgetView {
    #[must_use]
    pub fn from_instance(instance: &WidgetInstance, config: &WidgetConfig) -> Self {
        Self {
            widget_id: instance.id().to_owned(),
            open: instance.is_open(),
            panel: PanelView::from_instance(instance, config),
        }
    }

    #[must_use]
    pub fn dom_id(&self) -> String {
        widget_dom_id(&self.widget_id)
    }
}

#[must_use]
pub fn widget_dom_id(widget_id: &str) -> String {
    format!("cw-{widget_id}")
}

#[must_use]
pub fn panel_dom_id(widget_id: &str) -> String {
    format!("cw-{widget_id}-panel")
}

/// Format `timestamp` in server-local time.
fn time_label(timestamp: DateTime<Utc>, format: &str) -> String {
    let local = timestamp.with_timezone(&Local);
    let mut label = String::new();
    if write!(label, "{}", local.format(format)).is_err() {
        label.clear();
        let _ = write!(label, "{}", local.format(FALLBACK_TIME_FORMAT));
    }
    label
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::widget::WidgetStore;

    #[test]
    fn test_time_label_formats_hours_and_minutes() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 13, 7, 0).unwrap();
        let label = time_label(ts, "%H:%M");
        assert_eq!(label.len(), 5);
        assert_eq!(&label[2..3], ":");
    }

    #[test]
    fn test_invalid_time_format_falls_back() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 13, 7, 0).unwrap();
        let label = time_label(ts, "%Q");
        assert_eq!(label.len(), 5);
        assert!(!label.contains('%'));
    }

    #[test]
    fn test_panel_snapshot_tracks_controller() {
        let store = WidgetStore::new("Hi!");
        let id = store.mount();
        store.begin(&id, "question").unwrap();

        let panel = store
            .with_instance(&id, |w| PanelView::from_instance(w, &WidgetConfig::default()))
            .unwrap();

        assert!(panel.awaiting);
        assert_eq!(panel.messages.len(), 2);
        assert_eq!(panel.messages[1].sender, Sender::User);
        assert_eq!(panel.messages[1].text, "question");
        assert_ne!(panel.messages[0].dom_id, panel.messages[1].dom_id);
        assert_eq!(panel.dom_id(), format!("cw-{id}-panel"));
    }
}
