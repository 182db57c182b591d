use crate::chart::error::RenderError;
use crate::loader::error::LoadError;
use crate::ranking::error::RankError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TripPlannerError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Rank(#[from] RankError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl TripPlannerError {
    /// The error followed by each of its sources, separated by `": "`.
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}
