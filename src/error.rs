/// Error taxonomy for navigation commands
use thiserror::Error;

/// Everything a navigation command can fail with.
///
/// All variants are terminal for the invocation that raised them; nothing
/// here is fatal to the extension.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("Invalid URL `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Could not determine a valid AEM content path.")]
    NoContentPath,

    #[error("This view is not available from a form. Only the editor can be opened.")]
    UnsupportedFromForms,

    #[error("Forms have no published view.")]
    NotApplicable,

    #[error("UI Toggle is only available in Sites, DAM, XF, or Editor view.")]
    UnsupportedView,

    #[error("AEM environment not detected.")]
    EnvironmentNotDetected,

    #[error("AEM instance not detected.")]
    InstanceNotDetected,

    #[error("No other AEM environment to switch to from `{0}`.")]
    NoOtherEnvironment(String),

    #[error("Unknown command `{0}`.")]
    UnknownCommand(String),

    #[error("Invalid navigation config: {0}")]
    Config(#[from] serde_json::Error),
}

/// How an error is presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The current URL has no content path the target can use
    UnresolvableInput,
    /// The target makes no sense for the current page
    UnsupportedOperation,
    /// Hostname or instance could not be matched across environments
    Correspondence,
    /// Broken wiring: unknown command ids or bad configuration
    Internal,
}

impl ErrorCategory {
    pub fn title(&self) -> &'static str {
        match self {
            ErrorCategory::UnresolvableInput => "Page not recognised",
            ErrorCategory::UnsupportedOperation => "Not available here",
            ErrorCategory::Correspondence => "Environment mismatch",
            ErrorCategory::Internal => "Extension error",
        }
    }
}

impl NavError {
    /// Text shown to the user, headed by the error category
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.category().title(), self)
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            NavError::InvalidUrl { .. } | NavError::NoContentPath => ErrorCategory::UnresolvableInput,
            NavError::UnsupportedFromForms | NavError::NotApplicable | NavError::UnsupportedView => {
                ErrorCategory::UnsupportedOperation
            }
            NavError::EnvironmentNotDetected
            | NavError::InstanceNotDetected
            | NavError::NoOtherEnvironment(_) => ErrorCategory::Correspondence,
            NavError::UnknownCommand(_) | NavError::Config(_) => ErrorCategory::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(NavError::NoContentPath.category(), ErrorCategory::UnresolvableInput);
        assert_eq!(NavError::UnsupportedFromForms.category(), ErrorCategory::UnsupportedOperation);
        assert_eq!(NavError::NotApplicable.category(), ErrorCategory::UnsupportedOperation);
        assert_eq!(NavError::UnsupportedView.category(), ErrorCategory::UnsupportedOperation);
        assert_eq!(NavError::EnvironmentNotDetected.category(), ErrorCategory::Correspondence);
        assert_eq!(NavError::InstanceNotDetected.category(), ErrorCategory::Correspondence);
        assert_eq!(NavError::UnknownCommand("x".to_string()).category(), ErrorCategory::Internal);
    }

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            NavError::NoContentPath.to_string(),
            "Could not determine a valid AEM content path."
        );
        assert_eq!(NavError::EnvironmentNotDetected.to_string(), "AEM environment not detected.");
    }

    #[test]
    fn test_user_message_names_category() {
        assert_eq!(
            NavError::UnsupportedFromForms.user_message(),
            "Not available here: This view is not available from a form. Only the editor can be opened."
        );
        assert_eq!(
            NavError::InstanceNotDetected.user_message(),
            "Environment mismatch: AEM instance not detected."
        );
    }

    #[test]
    fn test_invalid_url_keeps_source() {
        let source = url::Url::parse("not a url").unwrap_err();
        let err = NavError::InvalidUrl {
            url: "not a url".to_string(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.category(), ErrorCategory::UnresolvableInput);
    }
}
