use crate::display::interface::ResultDisplay;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// Records every message written, for assertions in tests.
#[derive(Clone, Default)]
pub struct ResultDisplayFake {
    messages: Arc<Mutex<Vec<String>>>,
}

impl ResultDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    pub fn last_message(&self) -> Option<String> {
        self.messages().last().cloned()
    }
}

impl ResultDisplay for ResultDisplayFake {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.messages
            .lock()
            .map_err(|_| "display lock poisoned")?
            .push(String::new());
        Ok(())
    }

    fn write_message(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.messages
            .lock()
            .map_err(|_| "display lock poisoned")?
            .push(text.to_string());
        Ok(())
    }
}
