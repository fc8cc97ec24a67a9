use crate::utils::output::OutputStyle;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("System error: {0}")]
    System(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Result type alias for consistent error handling across the application
pub type AppResult<T> = Result<T, AppError>;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

pub enum FlowResult {
    NotFound {
        item_type: String,
        search_term: String,
    },
    EmptyList {
        item_type: String,
    },
    Cancelled(String),
}

pub fn report_error(err: &AppError) {
    match err {
        AppError::Network(msg) => {
            eprintln!("🌐 {}", OutputStyle::error(&format!("Network: {}", msg)));
        }
        AppError::Store(msg) => {
            eprintln!("🗄️  {}", OutputStyle::error(&format!("Store: {}", msg)));
        }
        AppError::Auth(msg) => {
            eprintln!("🔒 {}", OutputStyle::warning(&format!("Auth: {}", msg)));
        }
        AppError::Validation(msg) => {
            eprintln!("⚠️  {}", OutputStyle::warning(msg));
        }
        AppError::NotFound(what) => {
            eprintln!("⚠️  {}", OutputStyle::warning(&format!("{} not found", what)));
        }
        AppError::Io(e) => {
            eprintln!("❌ {}", OutputStyle::error(e));
        }
        AppError::System(msg) => {
            eprintln!("❌ {}", OutputStyle::error(msg));
        }
    }
}

pub fn handle_flow(flow: FlowResult) {
    match flow {
        FlowResult::NotFound {
            item_type,
            search_term,
        } => {
            let msg = format!("{} '{}' not found", item_type, search_term);
            println!("⚠️  {}", OutputStyle::warning(&msg));
        }
        FlowResult::EmptyList { item_type } => {
            let msg = format!("No {} found", item_type);
            println!("{}", OutputStyle::muted(&msg));
        }
        FlowResult::Cancelled(msg) => {
            println!("⏹️  {}", OutputStyle::muted(&msg));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(ref msg) if msg.contains("missing file")));
    }

    #[test]
    fn test_not_found_message() {
        let err = AppError::NotFound("Product 'p-1'".to_string());
        assert_eq!(err.to_string(), "Product 'p-1' not found");
    }
}
