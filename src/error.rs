use thiserror::Error;

/// Failure classification for one analysis attempt. Everything that can go
/// wrong between selecting an image and holding a parsed record lands here;
/// nothing propagates past the orchestrator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("no image selected")]
    NoImageSelected,
    #[error("image could not be encoded for upload")]
    ImageConversionFailed,
    #[error("an analysis is already in progress")]
    AnalysisInProgress,
    #[error("invalid response from the server")]
    InvalidResponse,
    #[error("API error: {0}")]
    Api(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AnalysisError {
    pub fn user_message(&self) -> String {
        match self {
            Self::NoImageSelected => "No image selected".to_string(),
            Self::ImageConversionFailed => {
                "Failed to process the image. Please try another photo.".to_string()
            }
            Self::AnalysisInProgress => {
                "An analysis is already running. Please wait for it to finish.".to_string()
            }
            Self::InvalidResponse => {
                "Received an invalid response from the server. Please try again.".to_string()
            }
            Self::Api(message) => format!("API Error: {}", message),
            Self::Unexpected(description) => {
                format!("An unexpected error occurred: {}", description)
            }
        }
    }
}
