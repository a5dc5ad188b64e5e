//! Dashboard session management.
//!
//! Holds the current widget values for the single shared dashboard and
//! broadcasts a freshly recomputed state after every change. The dataset
//! itself lives in the [`Dashboard`] and is never mutated.

use std::collections::HashMap;
use std::sync::Arc;

use salesdash_core::dashboard::{END_DATE, START_DATE};
use salesdash_core::{Dashboard, DashboardView, Dimension, FilterCriteria, Summary, WidgetDef, WidgetValue};
use tokio::sync::{RwLock, broadcast};

use crate::error::{ServerError, ServerResult};
use crate::protocol::ServerMessage;

/// Capacity for the broadcast channel.
/// Clients that fall this far behind miss intermediate states, which is
/// harmless because every message carries the full state.
const MESSAGE_CHANNEL_CAPACITY: usize = 64;

/// The dashboard shown to every connected browser.
pub struct DashboardSession {
    /// Read-only dataset and coordinate table.
    dashboard: Dashboard,

    /// Page title.
    title: String,

    /// Current widget values, keyed by widget ID.
    widget_values: HashMap<String, WidgetValue>,

    /// Broadcast channel for server messages.
    tx: broadcast::Sender<ServerMessage>,
}

/// Thread-safe session handle.
pub type SessionHandle = Arc<RwLock<DashboardSession>>;

impl DashboardSession {
    /// Create a new session with no filters applied.
    pub fn new(
        dashboard: Dashboard,
        title: impl Into<String>,
    ) -> (Self, broadcast::Receiver<ServerMessage>) {
        let (tx, rx) = broadcast::channel(MESSAGE_CHANNEL_CAPACITY);
        let session = Self {
            dashboard,
            title: title.into(),
            widget_values: HashMap::new(),
            tx,
        };
        (session, rx)
    }

    /// Subscribe to server messages.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerMessage> {
        self.tx.subscribe()
    }

    /// Send a message to every subscriber.
    pub fn broadcast(&self, msg: ServerMessage) {
        // No receivers is fine: nobody is looking at the dashboard.
        let _ = self.tx.send(msg);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current widget values.
    pub fn widget_values(&self) -> &HashMap<String, WidgetValue> {
        &self.widget_values
    }

    /// Recompute the dashboard from the current widget values.
    pub fn get_state(&self) -> ServerMessage {
        self.state_message(self.dashboard.render(&self.widget_values))
    }

    /// Store a new widget value and broadcast the recomputed state.
    pub fn update_widget_value(&mut self, widget_id: String, value: WidgetValue) -> ServerResult<()> {
        if !is_known_widget(&widget_id) {
            return Err(ServerError::UnknownWidget(widget_id));
        }
        tracing::debug!("Widget {} updated", widget_id);
        self.widget_values.insert(widget_id, value);
        self.recompute();
        Ok(())
    }

    /// Drop every widget value and broadcast the unfiltered state.
    pub fn reset_filters(&mut self) {
        self.widget_values.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        let view = self.dashboard.render(&self.widget_values);
        self.retain_offered(&view.widgets);
        self.broadcast(self.state_message(view));
    }

    /// Forget selections the cascade no longer offers, so they stay cleared
    /// when the options widen again.
    fn retain_offered(&mut self, widgets: &[WidgetDef]) {
        for widget in widgets {
            if let WidgetDef::MultiSelect { id, selected, .. } = widget {
                if let Some(value) = self.widget_values.get_mut(id) {
                    if matches!(value, WidgetValue::Selection(_)) {
                        *value = WidgetValue::Selection(selected.clone());
                    }
                }
            }
        }
    }

    fn state_message(&self, view: DashboardView) -> ServerMessage {
        ServerMessage::DashboardState {
            title: self.title.clone(),
            widgets: view.widgets,
            criteria: view.criteria,
            total_rows: view.total_rows,
            filtered_rows: view.filtered_rows,
            summary: view.summary,
        }
    }

    /// Run the pipeline for explicit criteria, ignoring the widget values.
    pub fn summarize(&self, criteria: &FilterCriteria) -> Summary {
        self.dashboard.refresh(criteria)
    }
}

fn is_known_widget(id: &str) -> bool {
    id == START_DATE || id == END_DATE || Dimension::ALL.iter().any(|d| d.id() == id)
}
