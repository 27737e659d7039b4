//! Error types for the conversation orchestrator.

use vantage_core::VantageError;

/// Errors returned to the caller of `submit`.
///
/// Backend failures are not in this enum: the orchestrator contains them
/// as error turns and the conversation stays usable. These variants cover
/// only input rejection, where the conversation is left unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("question cannot be empty")]
    EmptyQuestion,
    #[error("question exceeds maximum length of {0} characters")]
    QuestionTooLong(usize),
    #[error("a turn is already in flight for this session")]
    TurnInFlight,
}

impl From<ChatError> for VantageError {
    fn from(err: ChatError) -> Self {
        VantageError::Chat(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::EmptyQuestion.to_string(), "question cannot be empty");
        assert_eq!(
            ChatError::QuestionTooLong(2000).to_string(),
            "question exceeds maximum length of 2000 characters"
        );
        assert_eq!(
            ChatError::TurnInFlight.to_string(),
            "a turn is already in flight for this session"
        );
    }

    #[test]
    fn test_chat_error_into_vantage_error() {
        let err: VantageError = ChatError::TurnInFlight.into();
        assert!(matches!(err, VantageError::Chat(_)));
    }
}
