use crate::display::interface::ResultDisplay;
use std::error::Error;

pub struct ResultDisplayConsole {
    message: String,
}

impl ResultDisplayConsole {
    pub fn new() -> Self {
        Self {
            message: String::new(),
        }
    }

    fn render_display(&self) {
        let width = self.message.chars().count().max(16);
        println!("┌{}┐", "─".repeat(width));
        println!("│{:<width$}│", self.message, width = width);
        println!("└{}┘", "─".repeat(width));
    }
}

impl ResultDisplay for ResultDisplayConsole {
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.message.clear();
        Ok(())
    }

    fn write_message(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.message = text.to_string();
        self.render_display();
        Ok(())
    }
}
