use crate::error::PipelineError;

pub const NUM_CLASSES: usize = 3;

/// Class index order matches the label order the model was trained with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Good,
    ModerateDeterioration,
    SevereDeterioration,
}

impl Condition {
    pub const ALL: [Condition; NUM_CLASSES] = [
        Condition::Good,
        Condition::ModerateDeterioration,
        Condition::SevereDeterioration,
    ];

    pub fn from_index(index: usize) -> Option<Condition> {
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Condition::Good => "Good Condition",
            Condition::ModerateDeterioration => "Moderate Deterioration",
            Condition::SevereDeterioration => "Severe Deterioration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PredictionResult {
    Confident { condition: Condition, score: f32 },
    LowConfidence { max_score: f32 },
}

/// Index and value of the maximum score. Ties keep the first index.
pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &score) in scores.iter().enumerate() {
        match best {
            Some((_, max)) if score <= max => {}
            _ => best = Some((index, score)),
        }
    }
    best
}

pub fn decide(scores: &[f32], threshold: f32) -> Result<PredictionResult, PipelineError> {
    if scores.len() != NUM_CLASSES {
        return Err(PipelineError::InferenceFailure(format!(
            "expected {} scores, model produced {}",
            NUM_CLASSES,
            scores.len()
        )));
    }
    if let Some(bad) = scores.iter().find(|s| !s.is_finite()) {
        return Err(PipelineError::InferenceFailure(format!(
            "model produced a non-finite score: {}",
            bad
        )));
    }

    let (index, max_score) = argmax(scores)
        .ok_or_else(|| PipelineError::InferenceFailure("model produced no scores".to_string()))?;

    if max_score > threshold {
        let condition = Condition::from_index(index).ok_or_else(|| {
            PipelineError::InferenceFailure(format!("no label for class index {}", index))
        })?;
        Ok(PredictionResult::Confident {
            condition,
            score: max_score,
        })
    } else {
        Ok(PredictionResult::LowConfidence { max_score })
    }
}
