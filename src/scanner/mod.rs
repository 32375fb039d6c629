pub mod lexer;
pub mod options;
pub mod token;

use crate::error::{ErrorSink, ScanErrors};
use lexer::Lexer;
pub use options::ScanOptions;
use token::Token;

/// Scan source code into a list of tokens, reporting malformed input to
/// `sink`. The list always ends with an `EOF` token.
pub fn scan(source: &str, sink: &mut dyn ErrorSink) -> Vec<Token> {
    Lexer::new(source, sink).scan_tokens()
}

pub fn scan_with_options(
    source: &str,
    options: ScanOptions,
    sink: &mut dyn ErrorSink,
) -> Vec<Token> {
    Lexer::with_options(source, options, sink).scan_tokens()
}

/// Scan and keep every reported error alongside the tokens.
pub fn scan_collect(source: &str, options: ScanOptions) -> (Vec<Token>, ScanErrors) {
    let mut errors = ScanErrors::new();
    let tokens = scan_with_options(source, options, &mut errors);
    (tokens, errors)
}
