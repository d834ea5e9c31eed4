//! Utility macros for the compiler.
//!
//! - `MK_TOKEN!` - Creates a Token instance, with or without a lexeme

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$line` - The source line the token starts on
/// * `$value` - Optional lexeme text (literals and identifiers)
///
/// # Example
///
/// ```ignore
/// let semi = MK_TOKEN!(TokenKind::Semicolon, 3);
/// let number = MK_TOKEN!(TokenKind::Int, 3, "42".to_string());
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $line:expr) => {
        Token {
            kind: $kind,
            line: $line,
            value: None,
        }
    };
    ($kind:expr, $line:expr, $value:expr) => {
        Token {
            kind: $kind,
            line: $line,
            value: Some($value),
        }
    };
}
