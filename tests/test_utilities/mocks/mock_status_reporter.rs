use uv_audit::prelude::*;

/// Mock StatusReporter for testing that captures messages
#[derive(Default, Clone)]
pub struct MockStatusReporter {
    pub messages: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

impl MockStatusReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.get_messages().iter().any(|m| m.contains(text))
    }
}

impl StatusReporter for MockStatusReporter {
    fn report(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn report_success(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Success: {}", message));
    }

    fn report_warning(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(format!("Warning: {}", message));
    }
}
