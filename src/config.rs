use chrono::Offset;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub model_path: PathBuf,
    pub confidence_threshold: f32,
    pub cache_model: bool,
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./model/street_condition.onnx"),
            confidence_threshold: 0.4,
            cache_model: false,
            logger_timezone: local_timezone(),
        }
    }
}

fn local_timezone() -> chrono::FixedOffset {
    chrono::Local::now().offset().fix()
}
