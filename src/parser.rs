use indexmap::IndexMap;

use crate::{
    ast::{Comparator, Condition, Operator, Position, Query, Token, TokenKind, Value},
    error::ParseError,
    lexer::tokenize,
};

/// Recursive-descent parser over a token stream, one token of lookahead.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            position: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Position reported when input ends early: the last consumed token.
    fn end_position(&self) -> Position {
        self.position
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .or_else(|| self.tokens.last())
            .map(|t| t.position)
            .unwrap_or_default()
    }

    /// Builds an "Expected X but found Y" error at the offending token.
    fn unexpected(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::new(
                format!("Expected {} but found '{}'", expected, token.text),
                token.position,
            ),
            None => ParseError::new(
                format!("Expected {} but found end of input", expected),
                self.end_position(),
            ),
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            // check() guarantees a token is present
            self.advance().ok_or_else(|| self.unexpected(expected))
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Parse a complete query
    pub fn parse_query(&mut self) -> Result<Query, ParseError> {
        let provider = self.expect(TokenKind::Identifier, "provider name")?.text;

        if self.check(TokenKind::Pipe) || self.check(TokenKind::Dot) {
            self.advance();
        } else {
            return Err(self.unexpected("'|' or '.' after provider name"));
        }

        let tool = self.expect(TokenKind::Identifier, "tool name")?.text;

        let parameters = if self.check(TokenKind::OpenParen) {
            self.parse_parameters()?
        } else {
            IndexMap::new()
        };

        let mut operators = vec![];
        while self.check(TokenKind::Pipe) {
            self.advance();
            operators.push(self.parse_operator()?);
        }

        if self.peek().is_some() {
            return Err(self.unexpected("'|' or end of query"));
        }

        log::debug!(
            "parsed {}.{} with {} parameter(s) and {} operator(s)",
            provider,
            tool,
            parameters.len(),
            operators.len()
        );

        Ok(Query {
            provider,
            tool,
            parameters,
            operators,
        })
    }

    fn parse_parameters(&mut self) -> Result<IndexMap<String, Value>, ParseError> {
        self.expect(TokenKind::OpenParen, "'('")?;
        let mut parameters = IndexMap::new();

        if self.check(TokenKind::CloseParen) {
            self.advance();
            return Ok(parameters);
        }

        loop {
            let name = match self.peek() {
                Some(token) if token.is_word() => token.text.clone(),
                _ => return Err(self.unexpected("parameter name")),
            };
            self.advance();

            self.expect(TokenKind::Equals, "'=' after parameter name")?;
            let value = self.parse_parameter_value()?;
            parameters.insert(name, value);

            if self.check(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }

        self.expect(TokenKind::CloseParen, "',' or ')'")?;
        Ok(parameters)
    }

    fn parse_parameter_value(&mut self) -> Result<Value, ParseError> {
        let token = match self.peek() {
            Some(token) => token.clone(),
            None => return Err(self.unexpected("parameter value")),
        };

        let value = match token.kind {
            TokenKind::String => Value::String(token.text),
            TokenKind::Number => {
                let n = token.text.parse::<f64>().map_err(|_| {
                    ParseError::new(format!("Invalid number '{}'", token.text), token.position)
                })?;
                Value::Number(n)
            }
            TokenKind::Boolean => Value::Bool(token.text.eq_ignore_ascii_case("true")),
            _ if token.is_word() => Value::String(token.text),
            _ => return Err(self.unexpected("parameter value")),
        };

        self.advance();
        Ok(value)
    }

    fn parse_operator(&mut self) -> Result<Operator, ParseError> {
        let kind = match self.peek() {
            Some(token) => token.kind,
            None => return Err(self.unexpected("operator")),
        };

        match kind {
            TokenKind::Where => self.parse_where(),
            TokenKind::Project => self.parse_project(),
            TokenKind::Take => self.parse_take(),
            TokenKind::Sort => self.parse_sort(),
            TokenKind::Count => {
                self.advance();
                Ok(Operator::Count)
            }
            TokenKind::Extend => self.parse_extend(),
            _ => Err(self.unexpected(
                "operator (where, project, take, sort, count, extend)",
            )),
        }
    }

    fn parse_where(&mut self) -> Result<Operator, ParseError> {
        self.advance(); // consume 'where'
        let mut conditions = vec![self.parse_condition()?];

        while self.check(TokenKind::And) || self.check(TokenKind::Or) {
            if let Some(token) = self.advance()
                && token.kind == TokenKind::Or
            {
                log::warn!(
                    "'or' at {} is evaluated as 'and'; where conditions are always combined with and",
                    token.position
                );
            }
            conditions.push(self.parse_condition()?);
        }

        Ok(Operator::Where { conditions })
    }

    fn parse_condition(&mut self) -> Result<Condition, ParseError> {
        let column = self.expect(TokenKind::Identifier, "column name")?.text;

        let op_token = self.expect(TokenKind::Operator, "comparison operator")?;
        let operator = Comparator::from_token(&op_token.text).ok_or_else(|| {
            ParseError::new(
                format!("Unknown comparison operator '{}'", op_token.text),
                op_token.position,
            )
        })?;

        let value = match self.peek() {
            Some(token)
                if matches!(
                    token.kind,
                    TokenKind::String
                        | TokenKind::Number
                        | TokenKind::Boolean
                        | TokenKind::Identifier
                ) =>
            {
                token.text.clone()
            }
            _ => return Err(self.unexpected("value after comparison operator")),
        };
        self.advance();

        Ok(Condition {
            column,
            operator,
            value,
        })
    }

    fn parse_project(&mut self) -> Result<Operator, ParseError> {
        self.advance(); // consume 'project'
        let mut columns = vec![self.expect(TokenKind::Identifier, "column name")?.text];

        while self.check(TokenKind::Comma) {
            self.advance();
            columns.push(self.expect(TokenKind::Identifier, "column name")?.text);
        }

        Ok(Operator::Project { columns })
    }

    fn parse_take(&mut self) -> Result<Operator, ParseError> {
        self.advance(); // consume 'take'
        let token = self.expect(TokenKind::Number, "row count after 'take'")?;
        let count = token.text.parse::<usize>().map_err(|_| {
            ParseError::new(
                format!(
                    "Expected non-negative integer after 'take' but found '{}'",
                    token.text
                ),
                token.position,
            )
        })?;
        Ok(Operator::Take { count })
    }

    fn parse_sort(&mut self) -> Result<Operator, ParseError> {
        self.advance(); // consume 'sort'
        if self.check(TokenKind::By) {
            self.advance();
        }

        let column = self.expect(TokenKind::Identifier, "column name")?.text;

        let ascending = if self.check(TokenKind::Asc) {
            self.advance();
            true
        } else if self.check(TokenKind::Desc) {
            self.advance();
            false
        } else {
            true
        };

        Ok(Operator::Sort { column, ascending })
    }

    fn parse_extend(&mut self) -> Result<Operator, ParseError> {
        self.advance(); // consume 'extend'
        let column_name = self.expect(TokenKind::Identifier, "column name")?.text;
        self.expect(TokenKind::Equals, "'=' after column name")?;

        // Expression is kept as raw text up to the next pipe
        let mut parts = vec![];
        while let Some(token) = self.peek() {
            if token.kind == TokenKind::Pipe {
                break;
            }
            parts.push(token.text.clone());
            self.advance();
        }

        Ok(Operator::Extend {
            column_name,
            expression: parts.join(" "),
        })
    }
}

/// Parses query text into a [`Query`].
///
/// # Examples
///
/// ```
/// use mcpql::{parse, Operator, Value};
///
/// let query = parse("github | list_issues(repo='org/repo') | take 5").unwrap();
/// assert_eq!(query.provider, "github");
/// assert_eq!(query.tool, "list_issues");
/// assert_eq!(query.parameters["repo"], Value::String("org/repo".into()));
/// assert_eq!(query.operators, vec![Operator::Take { count: 5 }]);
/// ```
pub fn parse(input: &str) -> Result<Query, ParseError> {
    let tokens = tokenize(input)?;
    Parser::new(tokens).parse_query()
}

#[test]
fn test_dot_form_without_operators() {
    let query = parse("filesystem.read_file(path='/tmp/data.csv')").unwrap();
    assert_eq!(query.provider, "filesystem");
    assert_eq!(query.tool, "read_file");
    assert!(query.operators.is_empty());
}

#[test]
fn test_missing_tool_points_at_last_token() {
    let err = parse("github |").unwrap_err();
    assert!(err.message.contains("tool name"));
    assert_eq!((err.line, err.column), (1, 8));
}
