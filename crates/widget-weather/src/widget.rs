//! Widget lookup seam. Durable storage lives outside this crate; anything
//! that can map a widget id to its location plugs in here.

use parking_lot::RwLock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::WeatherError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Widget {
    pub id: String,
    pub location: String,
}

pub trait WidgetLocations: Send + Sync {
    /// Stored location of the widget, or `None` if no such widget exists.
    fn location_for(&self, id: &str) -> Option<String>;
}

/// Process-local widget registry.
#[derive(Debug, Default)]
pub struct InMemoryWidgets {
    widgets: RwLock<HashMap<String, Widget>>,
    next_id: AtomicU64,
}

impl InMemoryWidgets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a widget. The location is stored trimmed but keeps its casing.
    pub fn create(&self, location: &str) -> Result<Widget, WeatherError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(WeatherError::InvalidInput);
        }

        let id = (self.next_id.fetch_add(1, Ordering::Relaxed) + 1).to_string();
        let widget = Widget {
            id: id.clone(),
            location: location.to_string(),
        };
        self.widgets.write().insert(id, widget.clone());
        Ok(widget)
    }

    pub fn remove(&self, id: &str) -> bool {
        self.widgets.write().remove(id).is_some()
    }

    /// All widgets, newest first.
    pub fn list(&self) -> Vec<Widget> {
        let mut widgets: Vec<Widget> = self.widgets.read().values().cloned().collect();
        widgets.sort_by_key(|w| std::cmp::Reverse(w.id.parse::<u64>().unwrap_or(0)));
        widgets
    }
}

impl WidgetLocations for InMemoryWidgets {
    fn location_for(&self, id: &str) -> Option<String> {
        self.widgets.read().get(id).map(|w| w.location.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_trims_location() {
        let widgets = InMemoryWidgets::new();
        let widget = widgets.create("  Berlin ").unwrap();
        assert_eq!(widget.location, "Berlin");
        assert_eq!(widgets.location_for(&widget.id).as_deref(), Some("Berlin"));
    }

    #[test]
    fn test_create_rejects_blank_location() {
        let widgets = InMemoryWidgets::new();
        assert!(matches!(widgets.create("   "), Err(WeatherError::InvalidInput)));
        assert!(widgets.list().is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let widgets = InMemoryWidgets::new();
        let a = widgets.create("Berlin").unwrap();
        let b = widgets.create("Berlin").unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_list_newest_first() {
        let widgets = InMemoryWidgets::new();
        widgets.create("Berlin").unwrap();
        widgets.create("Hamburg").unwrap();
        widgets.create("München").unwrap();

        let locations: Vec<_> = widgets.list().into_iter().map(|w| w.location).collect();
        assert_eq!(locations, vec!["München", "Hamburg", "Berlin"]);
    }

    #[test]
    fn test_remove() {
        let widgets = InMemoryWidgets::new();
        let widget = widgets.create("Berlin").unwrap();

        assert!(widgets.remove(&widget.id));
        assert!(!widgets.remove(&widget.id));
        assert!(widgets.location_for(&widget.id).is_none());
    }
}
