//! Optional analytics reporting.
//!
//! Events are always logged at debug level. They are forwarded to an
//! [`AnalyticsSink`] only when one is installed; without one, tracking is a
//! no-op and never affects the caller.

/// External reporting function.
pub trait AnalyticsSink {
    fn event(&mut self, category: &str, action: &str, label: &str);

    fn page_view(&mut self, page_name: &str);
}

#[derive(Default)]
pub struct Analytics {
    sink: Option<Box<dyn AnalyticsSink>>,
}

impl Analytics {
    /// Analytics with no sink; every call only logs.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_sink(sink: Box<dyn AnalyticsSink>) -> Self {
        Self { sink: Some(sink) }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn track_event(&mut self, category: &str, action: &str, label: &str) {
        if let Some(sink) = self.sink.as_mut() {
            sink.event(category, action, label);
        }
        log::debug!("Event tracked: {} - {} - {}", category, action, label);
    }

    pub fn track_page_view(&mut self, page_name: &str) {
        if let Some(sink) = self.sink.as_mut() {
            sink.page_view(page_name);
        }
        log::debug!("Page view tracked: {}", page_name);
    }
}

impl std::fmt::Debug for Analytics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analytics")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingSink {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl AnalyticsSink for RecordingSink {
        fn event(&mut self, category: &str, action: &str, label: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{}/{}/{}", category, action, label));
        }

        fn page_view(&mut self, page_name: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("view/{}", page_name));
        }
    }

    #[test]
    fn test_disabled_is_noop() {
        let mut analytics = Analytics::disabled();
        assert!(!analytics.is_enabled());
        analytics.track_event("tool", "open", "word-counter");
        analytics.track_page_view("home");
    }

    #[test]
    fn test_events_forwarded_to_sink() {
        let sink = RecordingSink::default();
        let events = sink.events.clone();
        let mut analytics = Analytics::with_sink(Box::new(sink));

        analytics.track_event("tool", "open", "word-counter");
        analytics.track_page_view("home");

        assert_eq!(
            *events.lock().unwrap(),
            vec!["tool/open/word-counter".to_string(), "view/home".to_string()]
        );
    }
}
