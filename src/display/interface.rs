use std::error::Error;

/// Surface the outcome of a prediction is written to.
pub trait ResultDisplay: Send + Sync {
    /// Remove the previous message
    fn clear(&mut self) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Replace the shown message with `text`
    fn write_message(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
}
