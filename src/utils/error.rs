use thiserror::Error;

#[derive(Error, Debug)]
pub enum CellError {
    #[error("Invalid argument '{field}' = {value}: {reason}")]
    InvalidArgument {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Bound exceeded: {value} with step {step} would cross {bound}")]
    BoundExceeded { value: i64, step: i64, bound: String },

    #[error("Unknown counter: {name}")]
    UnknownCounter { name: String },

    #[error("Expectation failed at step {step}: expected {expected}, got {actual}")]
    ExpectationFailed {
        step: usize,
        expected: i64,
        actual: i64,
    },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CellError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Argument,
    Bounds,
    Scenario,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CellError {
    pub fn invalid_argument(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        CellError::InvalidArgument {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CellError::InvalidArgument { .. } => ErrorCategory::Argument,
            CellError::BoundExceeded { .. } => ErrorCategory::Bounds,
            CellError::UnknownCounter { .. } | CellError::ExpectationFailed { .. } => {
                ErrorCategory::Scenario
            }
            CellError::ConfigValidationError { .. } | CellError::MissingConfigError { .. } => {
                ErrorCategory::Configuration
            }
            CellError::IoError(_) | CellError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // try_* 操作越界時數值不變，僅為警告
            CellError::BoundExceeded { .. } => ErrorSeverity::Low,
            CellError::ExpectationFailed { .. } => ErrorSeverity::Medium,
            CellError::InvalidArgument { .. }
            | CellError::UnknownCounter { .. }
            | CellError::ConfigValidationError { .. }
            | CellError::MissingConfigError { .. } => ErrorSeverity::High,
            CellError::IoError(_) | CellError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// 根據錯誤嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CellError::InvalidArgument { field, .. } => {
                format!("Check the value of '{}'; step must be non-zero and initial must lie within the bounds", field)
            }
            CellError::BoundExceeded { .. } => {
                "Use increment()/decrement() to saturate at the bound, or reset() the counter".to_string()
            }
            CellError::UnknownCounter { name } => {
                format!("Declare a [[counters]] entry named '{}' in the scenario", name)
            }
            CellError::ExpectationFailed { .. } => {
                "Review the expected values in [[steps]], or set stop_on_mismatch = false".to_string()
            }
            CellError::ConfigValidationError { field, .. } => {
                format!("Fix the '{}' entry in the scenario file", field)
            }
            CellError::MissingConfigError { field } => {
                format!("Add the required '{}' section to the scenario file", field)
            }
            CellError::IoError(_) => "Make sure the file exists and is readable".to_string(),
            CellError::SerializationError(_) => "Report output could not be encoded".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Argument => format!("Invalid counter arguments: {}", self),
            ErrorCategory::Bounds => format!("Counter bound reached: {}", self),
            ErrorCategory::Scenario => format!("Scenario failed: {}", self),
            ErrorCategory::Configuration => format!("Invalid scenario file: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}
