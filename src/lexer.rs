use crate::ast::{Position, Token, TokenKind};
use crate::error::ParseError;

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn location(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.position += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if matches!(ch, ' ' | '\t' | '\n' | '\r') {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' || ch == '-' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self, quote: char) -> Result<String, ParseError> {
        let start = self.location();
        let mut result = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance(); // Consume backslash
                    match self.current_char() {
                        Some(escaped) => {
                            result.push(escaped);
                            self.advance();
                        }
                        None => break,
                    }
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(ParseError::new("Unterminated string literal", start))
    }

    fn read_number(&mut self) -> String {
        let mut number = String::new();
        let mut is_float = false;

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_float
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        number
    }

    fn single(&mut self, kind: TokenKind, text: &str) -> Token {
        let start = self.location();
        self.advance();
        Token::new(kind, text, start)
    }

    fn pair(&mut self, kind: TokenKind, text: &str) -> Token {
        let start = self.location();
        self.advance();
        self.advance();
        Token::new(kind, text, start)
    }

    /// Returns the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        self.skip_whitespace();

        let start = self.location();
        let token = match self.current_char() {
            None => return Ok(None),
            Some('|') => self.single(TokenKind::Pipe, "|"),
            Some('.') => self.single(TokenKind::Dot, "."),
            Some('(') => self.single(TokenKind::OpenParen, "("),
            Some(')') => self.single(TokenKind::CloseParen, ")"),
            Some(',') => self.single(TokenKind::Comma, ","),
            Some('=') => {
                if self.peek_char(1) == Some('=') {
                    self.pair(TokenKind::Operator, "==")
                } else {
                    self.single(TokenKind::Equals, "=")
                }
            }
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    self.pair(TokenKind::Operator, "!=")
                } else {
                    return Err(ParseError::new("Unexpected character '!'", start));
                }
            }
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.pair(TokenKind::Operator, ">=")
                } else {
                    self.single(TokenKind::Operator, ">")
                }
            }
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    self.pair(TokenKind::Operator, "<=")
                } else {
                    self.single(TokenKind::Operator, "<")
                }
            }
            Some(quote @ ('"' | '\'')) => {
                let text = self.read_string(quote)?;
                Token::new(TokenKind::String, text, start)
            }
            Some('-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                Token::new(TokenKind::Number, self.read_number(), start)
            }
            Some(ch) if ch.is_ascii_digit() => {
                Token::new(TokenKind::Number, self.read_number(), start)
            }
            Some(ch) if ch.is_alphabetic() || ch == '_' || ch == '-' => {
                let word = self.read_word();
                Token::new(TokenKind::for_word(&word), word, start)
            }
            Some(ch) => {
                return Err(ParseError::new(
                    format!("Unexpected character '{}'", ch),
                    start,
                ));
            }
        };

        Ok(Some(token))
    }
}

/// Splits query text into tokens, left to right.
///
/// # Examples
///
/// ```
/// use mcpql::{tokenize, TokenKind};
///
/// let tokens = tokenize("github | list_issues").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, vec![TokenKind::Identifier, TokenKind::Pipe, TokenKind::Identifier]);
/// assert_eq!(tokens[2].column(), 10);
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    log::trace!("lexed {} tokens", tokens.len());
    Ok(tokens)
}

#[test]
fn test_keywords() {
    let tokens = tokenize("where project take sort by count extend asc desc and or not").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Where,
            TokenKind::Project,
            TokenKind::Take,
            TokenKind::Sort,
            TokenKind::By,
            TokenKind::Count,
            TokenKind::Extend,
            TokenKind::Asc,
            TokenKind::Desc,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Not,
        ]
    );
}

#[test]
fn test_pipe() {
    let tokens = tokenize("a | where x >= 5").unwrap();
    assert_eq!(tokens[1].kind, TokenKind::Pipe);
    assert_eq!(tokens[4].kind, TokenKind::Operator);
    assert_eq!(tokens[4].text, ">=");
    assert_eq!(tokens[5].kind, TokenKind::Number);
    assert_eq!(tokens[5].text, "5");
}
