/// Benchmark error type. Every variant except `Validation` means the
/// environment cannot run the benchmark and the caller should stop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// A GPU object (texture, query, buffer, program) could not be created
    ResourceCreation(String),
    ShaderCompilation(String),
    ProgramLink(String),
    /// Pixel transfer into a texture failed
    Transfer(String),
    /// Browser or WebGL2 context not available
    Platform(String),
    ValidationError(String),
}

impl AppError {
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AppError::ValidationError(_))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::ResourceCreation(msg) => write!(f, "Resource Creation Error: {}", msg),
            AppError::ShaderCompilation(msg) => write!(f, "Shader Compilation Error: {}", msg),
            AppError::ProgramLink(msg) => write!(f, "Program Link Error: {}", msg),
            AppError::Transfer(msg) => write!(f, "Transfer Error: {}", msg),
            AppError::Platform(msg) => write!(f, "Platform Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<AppError> for wasm_bindgen::JsValue {
    fn from(error: AppError) -> Self {
        wasm_bindgen::JsValue::from_str(&error.to_string())
    }
}

pub type RenderingResult<T> = Result<T, AppError>;
pub type ValidationResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn only_validation_errors_are_recoverable() {
        assert!(!AppError::ValidationError("size".into()).is_fatal());
        assert!(AppError::Transfer("lost context".into()).is_fatal());
        assert!(AppError::ProgramLink("bad".into()).is_fatal());
    }

    #[test]
    fn display_names_the_failure_kind() {
        let err = AppError::ShaderCompilation("ERROR: 0:3 syntax".into());
        assert_eq!(err.to_string(), "Shader Compilation Error: ERROR: 0:3 syntax");
    }
}
