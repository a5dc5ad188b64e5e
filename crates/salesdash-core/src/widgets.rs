//! Filter widgets.
//!
//! The dashboard describes its inputs as [`WidgetDef`]s; the browser draws
//! them and sends back [`WidgetValue`]s. A [`WidgetContext`] carries the
//! current values through one registration pass, so each register call
//! returns what the user picked (or the default) and records the widget for
//! the frontend.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::parse_date;

/// Widget definition sent to the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetDef {
    /// Calendar date picker.
    DateInput {
        /// Unique widget ID.
        id: String,
        /// Human-readable label.
        label: String,
        /// Earliest selectable date.
        min: NaiveDate,
        /// Latest selectable date.
        max: NaiveDate,
        /// Current value; `None` means the bound is open.
        value: Option<NaiveDate>,
    },
    /// Multi-select box.
    MultiSelect {
        /// Unique widget ID.
        id: String,
        /// Human-readable label.
        label: String,
        /// Available options, in first-appearance order.
        options: Vec<String>,
        /// Currently selected options.
        selected: Vec<String>,
    },
}

impl WidgetDef {
    /// Get the widget ID.
    pub fn id(&self) -> &str {
        match self {
            WidgetDef::DateInput { id, .. } => id,
            WidgetDef::MultiSelect { id, .. } => id,
        }
    }
}

/// Widget value sent by the frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidgetValue {
    /// Selected options (for multi-selects).
    Selection(Vec<String>),
    /// Raw date text (for date inputs); `None` clears the bound.
    Date(Option<String>),
}

impl WidgetValue {
    /// Get as a selection list.
    pub fn as_selection(&self) -> Option<&[String]> {
        match self {
            WidgetValue::Selection(values) => Some(values),
            _ => None,
        }
    }

    /// Get as raw date text. `Some(None)` means explicitly cleared.
    pub fn as_date(&self) -> Option<Option<&str>> {
        match self {
            WidgetValue::Date(raw) => Some(raw.as_deref()),
            _ => None,
        }
    }
}

/// Registration pass over the current widget values.
#[derive(Debug, Default)]
pub struct WidgetContext {
    /// Registered widgets during this pass.
    pub widgets: Vec<WidgetDef>,
    /// Current widget values (set by user interaction).
    pub values: HashMap<String, WidgetValue>,
}

impl WidgetContext {
    /// Create a new empty widget context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a widget context with pre-set values.
    pub fn with_values(values: HashMap<String, WidgetValue>) -> Self {
        Self {
            widgets: Vec::new(),
            values,
        }
    }

    /// Register a date input and return its current value.
    ///
    /// Missing values use `default`. Cleared or unparseable values yield
    /// `None`, which the filter treats as no restriction.
    pub fn register_date_input(
        &mut self,
        id: &str,
        label: &str,
        min: NaiveDate,
        max: NaiveDate,
        default: Option<NaiveDate>,
    ) -> Option<NaiveDate> {
        let value = match self.values.get(id).and_then(WidgetValue::as_date) {
            None => default,
            Some(None) => None,
            Some(Some(raw)) if raw.trim().is_empty() => None,
            Some(Some(raw)) => {
                let parsed = parse_date(raw);
                if parsed.is_none() {
                    tracing::warn!("Ignoring invalid date {:?} for widget {}", raw, id);
                }
                parsed
            }
        };

        self.widgets.push(WidgetDef::DateInput {
            id: id.to_string(),
            label: label.to_string(),
            min,
            max,
            value,
        });

        value
    }

    /// Register a multi-select and return the selected options.
    ///
    /// Selected values that are no longer among `options` are dropped.
    pub fn register_multiselect(&mut self, id: &str, label: &str, options: Vec<String>) -> Vec<String> {
        let selected: Vec<String> = self
            .values
            .get(id)
            .and_then(WidgetValue::as_selection)
            .map(|values| {
                values
                    .iter()
                    .filter(|v| options.contains(v))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        self.widgets.push(WidgetDef::MultiSelect {
            id: id.to_string(),
            label: label.to_string(),
            options,
            selected: selected.clone(),
        });

        selected
    }

    /// Get all registered widgets.
    pub fn take_widgets(&mut self) -> Vec<WidgetDef> {
        std::mem::take(&mut self.widgets)
    }
}
