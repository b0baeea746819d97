use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("PDF error: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidInputError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required input: {field}")]
    MissingInputError { field: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid PDF file: {message}")]
    InvalidPdfError { message: String },

    #[error("PDF is password protected")]
    EncryptedPdfError,

    #[error("Invalid page range: {0}")]
    PageRangeError(String),

    #[error("Monthly payment {payment:.2} does not cover interest of {interest:.2}")]
    PaymentTooLowError { payment: f64, interest: f64 },

    #[error("Decoding error: {message}")]
    DecodeError { message: String },
}

pub type Result<T> = std::result::Result<T, ToolError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Config,
    Document,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ToolError {
    pub fn invalid_input(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        ToolError::InvalidInputError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ToolError::InvalidInputError { .. }
            | ToolError::MissingInputError { .. }
            | ToolError::PageRangeError(_)
            | ToolError::PaymentTooLowError { .. }
            | ToolError::DecodeError { .. } => ErrorCategory::Input,
            ToolError::ConfigValidationError { .. } => ErrorCategory::Config,
            ToolError::PdfError(_)
            | ToolError::InvalidPdfError { .. }
            | ToolError::EncryptedPdfError => ErrorCategory::Document,
            ToolError::IoError(_)
            | ToolError::SerializationError(_)
            | ToolError::CsvError(_)
            | ToolError::ZipError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Document => ErrorSeverity::High,
            ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 對應 CLI 的退出碼
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Document => 1,
            ErrorCategory::Config => 2,
            ErrorCategory::System => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ToolError::InvalidInputError { .. } => "Check the value and try a different input",
            ToolError::MissingInputError { .. } => "Provide the input as an argument, with --file, or on stdin",
            ToolError::ConfigValidationError { .. } => "Fix the configuration file and run again",
            ToolError::PdfError(_) | ToolError::InvalidPdfError { .. } => {
                "Make sure the file is a valid, uncorrupted PDF"
            }
            ToolError::EncryptedPdfError => "Remove the password protection and try again",
            ToolError::PageRangeError(_) => "Use page numbers like 1-3, 5, 8-10 within the document",
            ToolError::PaymentTooLowError { .. } => "Increase the monthly payment",
            ToolError::DecodeError { .. } => "Check the input matches the selected encoding",
            ToolError::IoError(_) => "Check the file path and permissions",
            ToolError::SerializationError(_) | ToolError::CsvError(_) | ToolError::ZipError(_) => {
                "Try again; if the problem persists report it with --verbose output"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ToolError::PdfError(e) => pdf_message_for(&e.to_string()),
            ToolError::InvalidPdfError { message } => pdf_message_for(message),
            ToolError::EncryptedPdfError => pdf_message_for("encrypted"),
            ToolError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "File not found".to_string()
            }
            other => other.to_string(),
        }
    }
}

/// 依錯誤文字對應成使用者看得懂的訊息
pub fn pdf_message_for(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if lower.contains("password") || lower.contains("encrypt") || lower.contains("decrypt") {
        "This PDF is password protected. Please remove the password and try again.".to_string()
    } else if lower.contains("invalid")
        || lower.contains("header")
        || lower.contains("xref")
        || lower.contains("trailer")
        || lower.contains("parse")
    {
        "Invalid or corrupted PDF file. Please try a different file.".to_string()
    } else {
        "Failed to process the PDF file. Please try a different file.".to_string()
    }
}
