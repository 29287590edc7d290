use ecma_ast::{TextRange, TextSize};

use crate::ParseError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Name,
    Number,
    String,

    // Keywords
    Break,
    Case,
    Catch,
    Const,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    False,
    Finally,
    For,
    Function,
    If,
    In,
    Instanceof,
    Let,
    New,
    Null,
    Return,
    Switch,
    Throw,
    True,
    Try,
    Typeof,
    Var,
    Void,
    While,
    With,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semi,
    Comma,
    Dot,
    Colon,
    Question,
    QuestionQuestion,
    Equal,
    EqEqual,
    EqEqEqual,
    NotEqual,
    NotEqEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,
    Exclamation,
    Tilde,
    Amper,
    Vbar,
    CircumFlex,
    DoubleAmper,
    DoubleVbar,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,

    EndOfFile,
}

impl TokenKind {
    fn keyword(name: &str) -> Option<TokenKind> {
        let kind = match name {
            "break" => TokenKind::Break,
            "case" => TokenKind::Case,
            "catch" => TokenKind::Catch,
            "const" => TokenKind::Const,
            "continue" => TokenKind::Continue,
            "debugger" => TokenKind::Debugger,
            "default" => TokenKind::Default,
            "delete" => TokenKind::Delete,
            "do" => TokenKind::Do,
            "else" => TokenKind::Else,
            "false" => TokenKind::False,
            "finally" => TokenKind::Finally,
            "for" => TokenKind::For,
            "function" => TokenKind::Function,
            "if" => TokenKind::If,
            "in" => TokenKind::In,
            "instanceof" => TokenKind::Instanceof,
            "let" => TokenKind::Let,
            "new" => TokenKind::New,
            "null" => TokenKind::Null,
            "return" => TokenKind::Return,
            "switch" => TokenKind::Switch,
            "throw" => TokenKind::Throw,
            "true" => TokenKind::True,
            "try" => TokenKind::Try,
            "typeof" => TokenKind::Typeof,
            "var" => TokenKind::Var,
            "void" => TokenKind::Void,
            "while" => TokenKind::While,
            "with" => TokenKind::With,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) range: TextRange,
    /// Whether a line terminator separates this token from the previous one.
    pub(crate) newline_before: bool,
}

/// Splits `source` into tokens, ending with a single [`TokenKind::EndOfFile`].
pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    if u32::try_from(source.len()).is_err() {
        return Err(ParseError::new(
            "source text exceeds 4GiB",
            TextRange::default(),
        ));
    }
    Lexer::new(source).tokenize()
}

struct Lexer<'src> {
    source: &'src str,
    offset: usize,
    newline_before: bool,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            newline_before: false,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia()?;
            let start = self.offset;
            let Some(c) = self.peek() else {
                tokens.push(self.token(TokenKind::EndOfFile, start));
                return Ok(tokens);
            };

            let kind = if is_identifier_start(c) {
                self.lex_name()
            } else if c.is_ascii_digit()
                || (c == '.' && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()))
            {
                self.lex_number()?
            } else if c == '"' || c == '\'' {
                self.lex_string(c)?
            } else {
                self.lex_punctuation(c)?
            };

            tokens.push(self.token(kind, start));
            self.newline_before = false;
        }
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            range: TextRange::new(text_size(start), text_size(self.offset)),
            newline_before: self.newline_before,
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.offset..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.source[self.offset..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.offset += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        while let Some(c) = self.peek() {
            match c {
                '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                    self.newline_before = true;
                    self.bump();
                }
                c if c.is_whitespace() => {
                    self.bump();
                }
                '/' if self.peek_nth(1) == Some('/') => {
                    while self.peek().is_some_and(|c| !is_line_terminator(c)) {
                        self.bump();
                    }
                }
                '/' if self.peek_nth(1) == Some('*') => {
                    let start = self.offset;
                    self.offset += 2;
                    loop {
                        match self.bump() {
                            Some('*') if self.eat('/') => break,
                            Some(c) if is_line_terminator(c) => self.newline_before = true,
                            Some(_) => {}
                            None => {
                                return Err(ParseError::new(
                                    "unterminated block comment",
                                    TextRange::new(text_size(start), text_size(self.offset)),
                                ))
                            }
                        }
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn lex_name(&mut self) -> TokenKind {
        let start = self.offset;
        while self.peek().is_some_and(is_identifier_continue) {
            self.bump();
        }
        TokenKind::keyword(&self.source[start..self.offset]).unwrap_or(TokenKind::Name)
    }

    fn lex_number(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.offset;
        if self.peek() == Some('0') && matches!(self.peek_nth(1), Some('x' | 'X')) {
            self.offset += 2;
            let digits = self.offset;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.bump();
            }
            if digits == self.offset {
                return Err(ParseError::new(
                    "expected hexadecimal digits",
                    TextRange::new(text_size(start), text_size(self.offset)),
                ));
            }
        } else {
            self.eat_digits();
            if self.eat('.') {
                self.eat_digits();
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                self.bump();
                if !self.eat('+') {
                    self.eat('-');
                }
                self.eat_digits();
            }
        }

        if self.peek().is_some_and(is_identifier_start) {
            return Err(ParseError::new(
                "identifier starts immediately after numeric literal",
                TextRange::new(text_size(start), text_size(self.offset)),
            ));
        }
        Ok(TokenKind::Number)
    }

    fn eat_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
    }

    fn lex_string(&mut self, quote: char) -> Result<TokenKind, ParseError> {
        let start = self.offset;
        self.bump();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(TokenKind::String),
                Some('\\') => {
                    self.bump();
                }
                Some(c) if !is_line_terminator(c) => {}
                _ => {
                    return Err(ParseError::new(
                        "unterminated string literal",
                        TextRange::new(text_size(start), text_size(self.offset)),
                    ))
                }
            }
        }
    }

    fn lex_punctuation(&mut self, c: char) -> Result<TokenKind, ParseError> {
        let start = self.offset;
        self.bump();
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ';' => TokenKind::Semi,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            '~' => TokenKind::Tilde,
            '?' => {
                if self.eat('?') {
                    TokenKind::QuestionQuestion
                } else {
                    TokenKind::Question
                }
            }
            '=' => {
                if self.eat('=') {
                    if self.eat('=') {
                        TokenKind::EqEqEqual
                    } else {
                        TokenKind::EqEqual
                    }
                } else {
                    TokenKind::Equal
                }
            }
            '!' => {
                if self.eat('=') {
                    if self.eat('=') {
                        TokenKind::NotEqEqual
                    } else {
                        TokenKind::NotEqual
                    }
                } else {
                    TokenKind::Exclamation
                }
            }
            '<' => {
                if self.eat('<') {
                    TokenKind::LeftShift
                } else if self.eat('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.eat('>') {
                    if self.eat('>') {
                        TokenKind::UnsignedRightShift
                    } else {
                        TokenKind::RightShift
                    }
                } else if self.eat('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            '+' => {
                if self.eat('+') {
                    TokenKind::PlusPlus
                } else if self.eat('=') {
                    TokenKind::PlusEqual
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.eat('-') {
                    TokenKind::MinusMinus
                } else if self.eat('=') {
                    TokenKind::MinusEqual
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.eat('*') {
                    TokenKind::DoubleStar
                } else if self.eat('=') {
                    TokenKind::StarEqual
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                if self.eat('=') {
                    TokenKind::SlashEqual
                } else {
                    TokenKind::Slash
                }
            }
            '%' => {
                if self.eat('=') {
                    TokenKind::PercentEqual
                } else {
                    TokenKind::Percent
                }
            }
            '&' => {
                if self.eat('&') {
                    TokenKind::DoubleAmper
                } else {
                    TokenKind::Amper
                }
            }
            '|' => {
                if self.eat('|') {
                    TokenKind::DoubleVbar
                } else {
                    TokenKind::Vbar
                }
            }
            '^' => TokenKind::CircumFlex,
            _ => {
                return Err(ParseError::new(
                    format!("unexpected character `{c}`"),
                    TextRange::new(text_size(start), text_size(self.offset)),
                ))
            }
        };
        Ok(kind)
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

fn is_identifier_continue(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Converts a byte offset into a [`TextSize`]; `tokenize` guarantees the source fits in `u32`.
#[allow(clippy::cast_possible_truncation)]
fn text_size(offset: usize) -> TextSize {
    TextSize::new(offset as u32)
}
