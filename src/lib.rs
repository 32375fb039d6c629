pub mod dump;
pub mod error;
pub mod repl;
pub mod scanner;

// Re-export the scanning surface for convenience
pub use error::{ErrorSink, ScanError, ScanErrorKind, ScanErrors};
pub use scanner::token::{Literal, Span, Token, TokenKind};
pub use scanner::{ScanOptions, scan, scan_collect, scan_with_options};
