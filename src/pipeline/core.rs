use crate::classifier::decision::PredictionResult;
use crate::classifier::interface::Model;
use crate::error::PipelineError;
use crate::preprocess::image::ImageHandle;
use crate::tensor::ScopedTensor;
use std::sync::Arc;

#[derive(Debug)]
pub enum State {
    Idle,
    Preprocessing,
    ModelLoading { input: ScopedTensor },
    Inferring,
    Deciding,
    Done { result: PredictionResult },
    Errored { error: PipelineError },
}

impl State {
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Done { .. } | State::Errored { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            State::Idle => "Idle",
            State::Preprocessing => "Preprocessing",
            State::ModelLoading { .. } => "ModelLoading",
            State::Inferring => "Inferring",
            State::Deciding => "Deciding",
            State::Done { .. } => "Done",
            State::Errored { .. } => "Errored",
        }
    }
}

#[derive(Debug)]
pub enum Event {
    PredictRequested { image: ImageHandle },
    PreprocessDone(Result<ScopedTensor, PipelineError>),
    ModelLoadDone(Result<Arc<dyn Model>, PipelineError>),
    InferenceDone(Result<ScopedTensor, PipelineError>),
    DecideDone(Result<PredictionResult, PipelineError>),
}

impl Event {
    fn into_error(self) -> Option<PipelineError> {
        match self {
            Event::PreprocessDone(Err(error))
            | Event::ModelLoadDone(Err(error))
            | Event::InferenceDone(Err(error))
            | Event::DecideDone(Err(error)) => Some(error),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum Effect {
    Preprocess { image: ImageHandle },
    LoadModel,
    Infer { model: Arc<dyn Model>, input: ScopedTensor },
    Decide { output: ScopedTensor },
}

pub fn init() -> (State, Vec<Effect>) {
    (State::Idle, vec![])
}

/// Tensors carried by a discarded state or event are released when they
/// are dropped here.
pub fn transition(state: State, event: Event) -> (State, Vec<Effect>) {
    match (state, event) {
        (State::Idle, Event::PredictRequested { image }) => {
            (State::Preprocessing, vec![Effect::Preprocess { image }])
        }
        (State::Preprocessing, Event::PreprocessDone(Ok(input))) => {
            (State::ModelLoading { input }, vec![Effect::LoadModel])
        }
        (State::ModelLoading { input }, Event::ModelLoadDone(Ok(model))) => {
            (State::Inferring, vec![Effect::Infer { model, input }])
        }
        (State::Inferring, Event::InferenceDone(Ok(output))) => {
            (State::Deciding, vec![Effect::Decide { output }])
        }
        (State::Deciding, Event::DecideDone(Ok(result))) => (State::Done { result }, vec![]),

        (state, event) if !state.is_terminal() => match event.into_error() {
            Some(error) => (State::Errored { error }, vec![]),
            None => (state, vec![]),
        },

        (state, _) => (state, vec![]),
    }
}
