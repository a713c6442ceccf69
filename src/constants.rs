//! Global Constants
//!
//! Centralized defaults for configuration and tuning.

/// File tree and extraction constants
pub mod analysis {
    /// Directory names pruned at any depth before descent
    pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
        ".git",
        "node_modules",
        "__pycache__",
        ".env",
        "venv",
        ".vscode",
        ".idea",
        "dist",
        "build",
    ];

    /// Characters of file content kept for AI prompts
    pub const DEFAULT_PREVIEW_CHARS: usize = 2000;

    /// Files above this size are skipped (1MB)
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

    /// Bytes inspected for NUL when sniffing binary content
    pub const BINARY_SNIFF_BYTES: usize = 8000;
}

/// Enrichment constants
pub mod enrichment {
    /// Functions per file that get their own model call
    pub const DEFAULT_FUNCTION_CAP: usize = 5;

    /// Concurrent model calls
    pub const DEFAULT_CONCURRENCY: usize = 4;

    /// Per-call timeout
    pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 60;

    pub const FILE_TEMPERATURE: f32 = 0.3;
    pub const FUNCTION_TEMPERATURE: f32 = 0.2;
}

/// Document rendering constants
pub mod render {
    /// Imports listed per file section before truncation
    pub const MAX_LISTED_IMPORTS: usize = 10;

    pub const ANALYSIS_NOT_AVAILABLE: &str = "Analysis not available";
}

/// Network constants
pub mod network {
    /// HTTP client timeout for provider requests
    pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

    pub const DEFAULT_MAX_TOKENS: usize = 2048;
}
