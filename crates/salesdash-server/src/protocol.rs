//! WebSocket protocol messages for the salesdash server.
//!
//! Defines the message types exchanged between the browser and the server.

use salesdash_core::{FilterCriteria, Summary, WidgetDef, WidgetValue};
use serde::{Deserialize, Serialize};

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Request the current dashboard state.
    GetState,

    /// Update a filter widget value. Triggers a full recompute.
    WidgetUpdate {
        /// Widget identifier.
        widget_id: String,
        /// New widget value.
        value: WidgetValue,
    },

    /// Clear every filter back to its default.
    ResetFilters,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full dashboard state (sent on connection and after every change).
    DashboardState {
        /// Page title.
        title: String,
        /// Filter widgets with their current options and values.
        widgets: Vec<WidgetDef>,
        /// Criteria the widgets currently express.
        criteria: FilterCriteria,
        /// Rows in the full dataset.
        total_rows: usize,
        /// Rows left after filtering.
        filtered_rows: usize,
        /// KPIs and chart tables, or the no-data outcome.
        summary: Summary,
    },

    /// Generic error message.
    Error {
        /// Error description.
        message: String,
    },
}
