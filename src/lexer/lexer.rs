use std::{str::Chars, sync::Arc};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    ast::types::LangType,
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

const SKIP_CHARS: &[char] = &[' ', '\t', '\n', '\r'];

/// Longest run of fractional digits a float literal may carry.
pub const MAX_FRACTION_DIGITS: usize = 5;

lazy_static! {
    static ref INT_PATTERN: Regex = Regex::new(r"^[0-9]+$").unwrap();
    static ref FLOAT_PATTERN: Regex = Regex::new(r"^[0-9]+\.[0-9]{1,5}$").unwrap();
}

/// Pull-based scanner over a forward-only character stream with one
/// character of pushback.
pub struct Lexer<'a> {
    chars: Chars<'a>,
    pushback: Option<char>,
    line: u32,
    file: Arc<str>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file: Option<&str>) -> Lexer<'a> {
        Lexer {
            chars: source.chars(),
            pushback: None,
            line: 1,
            file: Arc::from(file.unwrap_or("shell")),
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn file(&self) -> Arc<str> {
        Arc::clone(&self.file)
    }

    pub fn get_position(&self) -> Position {
        Position(self.line, Arc::clone(&self.file))
    }

    fn read(&mut self) -> Option<char> {
        self.pushback.take().or_else(|| self.chars.next())
    }

    fn unread(&mut self, c: char) {
        debug_assert!(self.pushback.is_none(), "only one character of pushback");
        self.pushback = Some(c);
    }

    /// Produces the next token. Once the stream is exhausted every call
    /// returns `EOF`.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        let c = loop {
            match self.read() {
                None => return Ok(MK_TOKEN!(TokenKind::EOF, self.line)),
                Some('\n') => self.line += 1,
                Some(c) if SKIP_CHARS.contains(&c) => {}
                Some(c) => break c,
            }
        };

        if c.is_ascii_digit() {
            self.unread(c);
            return self.scan_number();
        }
        if c.is_alphabetic() {
            self.unread(c);
            return Ok(self.scan_word());
        }

        let kind = match c {
            ';' => TokenKind::Semicolon,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Dash,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '=' => TokenKind::Assignment,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedCharacter { character: c },
                    self.get_position(),
                ))
            }
        };

        Ok(MK_TOKEN!(kind, self.line))
    }

    fn take_digits(&mut self, into: &mut String) -> usize {
        let mut count = 0;
        while let Some(c) = self.read() {
            if c.is_ascii_digit() {
                into.push(c);
                count += 1;
            } else {
                self.unread(c);
                break;
            }
        }
        count
    }

    fn scan_number(&mut self) -> Result<Token, Error> {
        let mut lexeme = String::new();
        self.take_digits(&mut lexeme);

        match self.read() {
            Some('.') => {
                lexeme.push('.');
                let fraction = self.take_digits(&mut lexeme);

                if FLOAT_PATTERN.is_match(&lexeme) && LangType::Float.parses(&lexeme) {
                    return Ok(MK_TOKEN!(TokenKind::Float, self.line, lexeme));
                }

                let message = if FLOAT_PATTERN.is_match(&lexeme) {
                    String::from("too large for a double")
                } else if fraction == 0 {
                    String::from("no digits after the decimal point")
                } else {
                    format!(
                        "{} fractional digits, at most {} allowed",
                        fraction, MAX_FRACTION_DIGITS
                    )
                };
                Err(Error::new(
                    ErrorImpl::MalformedNumber { token: lexeme, message },
                    self.get_position(),
                ))
            }
            other => {
                if let Some(c) = other {
                    self.unread(c);
                }
                if !INT_PATTERN.is_match(&lexeme) {
                    return Err(Error::new(
                        ErrorImpl::MalformedNumber { token: lexeme, message: String::from("not a number") },
                        self.get_position(),
                    ));
                }
                if !LangType::Int.parses(&lexeme) {
                    return Err(Error::new(
                        ErrorImpl::MalformedNumber {
                            token: lexeme,
                            message: String::from("does not fit in a 64-bit integer"),
                        },
                        self.get_position(),
                    ));
                }
                Ok(MK_TOKEN!(TokenKind::Int, self.line, lexeme))
            }
        }
    }

    fn scan_word(&mut self) -> Token {
        let mut word = String::new();
        while let Some(c) = self.read() {
            if c.is_alphanumeric() {
                word.push(c);
            } else {
                self.unread(c);
                break;
            }
        }

        if let Some(kind) = RESERVED_LOOKUP.get(word.as_str()) {
            MK_TOKEN!(*kind, self.line)
        } else {
            MK_TOKEN!(TokenKind::Identifier, self.line, word)
        }
    }
}

/// Scans the whole source eagerly. The final token is always `EOF`.
pub fn tokenize(source: &str, file: Option<&str>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token()?;
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
