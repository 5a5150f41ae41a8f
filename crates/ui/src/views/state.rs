use services::SessionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    StartFailed,
    SubmitFailed,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn from_session(err: &SessionError) -> Self {
        match err {
            SessionError::Start(_) => Self::StartFailed,
            SessionError::Submit(_) => Self::SubmitFailed,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::StartFailed => "Failed to start test. Please try again.",
            Self::SubmitFailed => "Failed to submit test. Please try again.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }
}
