//! Recursive-descent parser for EasyLang.
//!
//! The parser owns the lexer and holds exactly one lookahead token. Grammar
//! violations abort with a single [`ParseError`] naming the line, the expected
//! production, and the observed token kind.

use std::{error::Error, fmt::Display, mem};

use log::debug;

use crate::{
    ast::{
        Assignment, Ast, BinaryExpr, BinaryVerb, Block, Expression, FnCall, FnDef, If, Print,
        Read, Return, Statement, WhileLoop,
    },
    lexer::{Lexer, Token, TokenKind},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Parse error at line {}: {}", self.line, self.message)
    }
}

impl Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

fn comparison_verb(kind: TokenKind) -> Option<BinaryVerb> {
    match kind {
        TokenKind::Equal => Some(BinaryVerb::Equal),
        TokenKind::NotEqual => Some(BinaryVerb::NotEqual),
        TokenKind::GreaterThan => Some(BinaryVerb::GreaterThan),
        TokenKind::LessThan => Some(BinaryVerb::LessThan),
        TokenKind::GreaterOrEqual => Some(BinaryVerb::GreaterOrEqual),
        TokenKind::LessOrEqual => Some(BinaryVerb::LessOrEqual),
        _ => None,
    }
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();

        Self { lexer, current }
    }

    /// Parse a whole program. The top-level statement list must consume the
    /// entire input.
    pub fn parse_program(mut self) -> ParseResult<Ast> {
        let block = self.parse_statements()?;
        self.expect(TokenKind::Eof, "end of input")?;

        debug!("parsed program with {} top-level statements", block.statements.len());

        Ok(Ast::from_nodes(block.statements))
    }

    /// Consume the lookahead and pull the next token from the lexer.
    fn advance(&mut self) -> Token {
        mem::replace(&mut self.current, self.lexer.next_token())
    }

    fn accept(&mut self, kind: TokenKind) -> bool {
        if self.current.kind == kind {
            self.advance();
            return true;
        }

        false
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> ParseResult<()> {
        if self.current.kind == kind {
            self.advance();
            return Ok(());
        }

        Err(self.error(format!("expected {what} but found {}", self.current.kind)))
    }

    fn expect_identifier(&mut self, what: &str) -> ParseResult<String> {
        if self.current.kind != TokenKind::Identifier {
            return Err(self.error(format!("expected {what} but found {}", self.current.kind)));
        }

        let token = self.advance();
        Ok(token.text.unwrap_or_default())
    }

    fn error(&self, message: String) -> ParseError {
        ParseError {
            message,
            line: self.current.line,
        }
    }

    /// Whether the lookahead is the identifier `else`. `else` is not a
    /// keyword; it is recognized positionally.
    fn at_else(&self) -> bool {
        self.current.kind == TokenKind::Identifier
            && self.current.text.as_deref() == Some("else")
    }

    /// Every statement ends in a `.`, one or more newlines, or implicitly
    /// when the next token already starts a new statement or closes a block.
    fn expect_terminator(&mut self) -> ParseResult<()> {
        match self.current.kind {
            TokenKind::Dot | TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Set
            | TokenKind::Print
            | TokenKind::Read
            | TokenKind::If
            | TokenKind::While
            | TokenKind::End
            | TokenKind::Function
            | TokenKind::Return
            | TokenKind::RBrace
            | TokenKind::Eof => Ok(()),
            TokenKind::Identifier if self.at_else() => Ok(()),
            kind => Err(self.error(format!(
                "expected '.' or newline after statement but found {kind}"
            ))),
        }
    }

    /// Parse statements up to the next block closer (`end`, `}`, `else`,
    /// `then`, `do`) or the end of the input. Blank lines and stray dots
    /// between statements are skipped.
    fn parse_statements(&mut self) -> ParseResult<Block> {
        let mut statements = vec![];

        loop {
            while matches!(self.current.kind, TokenKind::Newline | TokenKind::Dot) {
                self.advance();
            }

            match self.current.kind {
                TokenKind::Eof
                | TokenKind::End
                | TokenKind::Then
                | TokenKind::Do
                | TokenKind::RBrace => break,
                TokenKind::Identifier if self.at_else() => break,
                _ => statements.push(self.parse_statement()?),
            }
        }

        Ok(Block { statements })
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.current.kind {
            TokenKind::Set => self.parse_set(),
            TokenKind::Print => {
                self.advance();
                let value = self.parse_expression()?;
                self.expect_terminator()?;
                Ok(Statement::Print(Print { value }))
            }
            TokenKind::Read => {
                self.advance();
                let name = self.expect_identifier("identifier after 'read'")?;
                self.expect_terminator()?;
                Ok(Statement::Read(Read { name }))
            }
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::Function => self.parse_fn_def(),
            TokenKind::Return => self.parse_return(),
            _ => {
                // a bare expression statement prints its value
                let value = self.parse_expression()?;
                self.expect_terminator()?;
                Ok(Statement::Print(Print { value }))
            }
        }
    }

    fn parse_set(&mut self) -> ParseResult<Statement> {
        self.advance();
        let name = self.expect_identifier("identifier after 'set'")?;
        self.expect(TokenKind::To, "'to'")?;
        let value = self.parse_expression()?;
        self.expect_terminator()?;

        Ok(Statement::Assignment(Assignment { name, value }))
    }

    fn parse_if(&mut self) -> ParseResult<Statement> {
        self.advance();
        let condition = self.parse_compare()?;
        self.expect(TokenKind::Then, "'then'")?;
        let then_block = self.parse_statements()?;

        let else_block = if self.at_else() {
            self.advance();
            Some(self.parse_statements()?)
        } else {
            None
        };

        self.expect(TokenKind::End, "'end' to close 'if'")?;
        self.expect_terminator()?;

        Ok(Statement::If(If {
            condition,
            then_block,
            else_block,
        }))
    }

    fn parse_while(&mut self) -> ParseResult<Statement> {
        self.advance();
        let condition = self.parse_compare()?;
        self.expect(TokenKind::Do, "'do'")?;
        let block = self.parse_statements()?;
        self.expect(TokenKind::End, "'end' to close 'while'")?;
        self.expect_terminator()?;

        Ok(Statement::WhileLoop(WhileLoop { condition, block }))
    }

    fn parse_fn_def(&mut self) -> ParseResult<Statement> {
        self.advance();
        let name = self.expect_identifier("function name after 'function'")?;
        self.expect(TokenKind::LParen, "'('")?;

        let mut params = vec![];
        if self.current.kind != TokenKind::RParen {
            params.push(self.expect_identifier("parameter name")?);
            while self.accept(TokenKind::Comma) {
                params.push(self.expect_identifier("parameter name")?);
            }
        }

        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::LBrace, "'{'")?;
        let block = self.parse_statements()?;
        self.expect(TokenKind::RBrace, "'}' to close function body")?;

        debug!("parsed definition of function '{name}'");

        // no terminator after the closing brace
        Ok(Statement::FnDef(FnDef {
            name,
            params,
            block,
        }))
    }

    fn parse_return(&mut self) -> ParseResult<Statement> {
        self.advance();

        let value = match self.current.kind {
            TokenKind::Dot | TokenKind::Newline | TokenKind::RBrace => None,
            _ => Some(self.parse_expression()?),
        };
        self.expect_terminator()?;

        Ok(Statement::Return(Return { value }))
    }

    /// Conditions: a single optional comparison, then any number of `and`
    /// clauses. `and` recurses into `parse_compare` on the right, so it is
    /// right-associative.
    fn parse_compare(&mut self) -> ParseResult<Expression> {
        let mut node = self.parse_expression()?;

        if let Some(verb) = comparison_verb(self.current.kind) {
            self.advance();
            let rhs = self.parse_expression()?;
            node = Expression::Binary(BinaryExpr::new(verb, node, rhs));
        }

        while self.accept(TokenKind::And) {
            let rhs = self.parse_compare()?;
            node = Expression::Binary(BinaryExpr::new(BinaryVerb::And, node, rhs));
        }

        Ok(node)
    }

    fn parse_expression(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_term()?;

        loop {
            let verb = match self.current.kind {
                TokenKind::Plus => BinaryVerb::Plus,
                TokenKind::Minus => BinaryVerb::Minus,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = Expression::Binary(BinaryExpr::new(verb, left, right));
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_factor()?;

        loop {
            let verb = match self.current.kind {
                TokenKind::Times => BinaryVerb::Times,
                TokenKind::Divide => BinaryVerb::Divide,
                TokenKind::Modulo => BinaryVerb::Modulo,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            left = Expression::Binary(BinaryExpr::new(verb, left, right));
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> ParseResult<Expression> {
        match self.current.kind {
            TokenKind::Number => {
                let token = self.advance();
                let text = token.text.unwrap_or_default();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| self.error(format!("invalid number literal '{text}'")))?;
                Ok(Expression::Number(value))
            }
            TokenKind::String => {
                let token = self.advance();
                Ok(Expression::Str(token.text.unwrap_or_default()))
            }
            TokenKind::Identifier => {
                let token = self.advance();
                let name = token.text.unwrap_or_default();

                if self.accept(TokenKind::LParen) {
                    let mut args = vec![];
                    if self.current.kind != TokenKind::RParen {
                        args.push(self.parse_expression()?);
                        while self.accept(TokenKind::Comma) {
                            args.push(self.parse_expression()?);
                        }
                    }
                    self.expect(TokenKind::RParen, "')'")?;

                    return Ok(Expression::Call(FnCall { name, args }));
                }

                Ok(Expression::Var(name))
            }
            TokenKind::LParen => {
                self.advance();
                let expression = self.parse_expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(expression)
            }
            TokenKind::Minus => {
                // unary minus desugars to `0 - factor`
                self.advance();
                let right = self.parse_factor()?;
                Ok(Expression::Binary(BinaryExpr::new(
                    BinaryVerb::Minus,
                    Expression::Number(0.0),
                    right,
                )))
            }
            kind => Err(self.error(format!("unexpected {kind} in expression"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Ast {
        Parser::new(input)
            .parse_program()
            .expect("program should parse")
    }

    fn num(value: f64) -> Expression {
        Expression::Number(value)
    }

    fn var(name: &str) -> Expression {
        Expression::Var(name.into())
    }

    fn binary(verb: BinaryVerb, lhs: Expression, rhs: Expression) -> Expression {
        Expression::Binary(BinaryExpr::new(verb, lhs, rhs))
    }

    #[test]
    fn test_parse_set_with_precedence() {
        let ast = parse("set a to 2 + 3 * 4.");

        assert_eq!(
            Ast::from_nodes(vec![Statement::Assignment(Assignment {
                name: "a".into(),
                value: binary(
                    BinaryVerb::Plus,
                    num(2.0),
                    binary(BinaryVerb::Times, num(3.0), num(4.0)),
                ),
            })]),
            ast
        );
    }

    #[test]
    fn test_parse_arithmetic_is_left_associative() {
        let ast = parse("print 10 - 4 - 3.");

        assert_eq!(
            Ast::from_nodes(vec![Statement::Print(Print {
                value: binary(
                    BinaryVerb::Minus,
                    binary(BinaryVerb::Minus, num(10.0), num(4.0)),
                    num(3.0),
                ),
            })]),
            ast
        );
    }

    #[test]
    fn test_parse_bare_expression_becomes_print() {
        assert_eq!(parse("print 1 + 2."), parse("1 + 2."));
    }

    #[test]
    fn test_parse_unary_minus_desugars() {
        let ast = parse("print -x.");

        assert_eq!(
            Ast::from_nodes(vec![Statement::Print(Print {
                value: binary(BinaryVerb::Minus, num(0.0), var("x")),
            })]),
            ast
        );
    }

    #[test]
    fn test_parse_if_else() {
        let ast = parse("if x > 5 then print \"big\". else print \"small\". end.");

        assert_eq!(
            Ast::from_nodes(vec![Statement::If(If {
                condition: binary(BinaryVerb::GreaterThan, var("x"), num(5.0)),
                then_block: Block {
                    statements: vec![Statement::Print(Print {
                        value: Expression::Str("big".into()),
                    })],
                },
                else_block: Some(Block {
                    statements: vec![Statement::Print(Print {
                        value: Expression::Str("small".into()),
                    })],
                }),
            })]),
            ast
        );
    }

    #[test]
    fn test_parse_and_is_right_associative() {
        let ast = parse("if a and b and c then end.");

        let Statement::If(If { condition, .. }) = &ast.nodes()[0] else {
            panic!("expected an if statement");
        };

        assert_eq!(
            &binary(
                BinaryVerb::And,
                var("a"),
                binary(BinaryVerb::And, var("b"), var("c")),
            ),
            condition
        );
    }

    #[test]
    fn test_parse_function_definition() {
        let ast = parse("function add(a, b) { return a + b. }");

        assert_eq!(
            Ast::from_nodes(vec![Statement::FnDef(FnDef {
                name: "add".into(),
                params: vec!["a".into(), "b".into()],
                block: Block {
                    statements: vec![Statement::Return(Return {
                        value: Some(binary(BinaryVerb::Plus, var("a"), var("b"))),
                    })],
                },
            })]),
            ast
        );
    }

    #[test]
    fn test_parse_call_with_arguments() {
        let ast = parse("print f(n + 10, 2).");

        assert_eq!(
            Ast::from_nodes(vec![Statement::Print(Print {
                value: Expression::Call(FnCall {
                    name: "f".into(),
                    args: vec![binary(BinaryVerb::Plus, var("n"), num(10.0)), num(2.0)],
                }),
            })]),
            ast
        );
    }

    #[test]
    fn test_parse_return_without_value() {
        let ast = parse("function f() { return. }");

        let Statement::FnDef(FnDef { block, .. }) = &ast.nodes()[0] else {
            panic!("expected a function definition");
        };

        assert_eq!(
            vec![Statement::Return(Return { value: None })],
            block.statements
        );
    }

    #[test]
    fn test_parse_newlines_terminate_statements() {
        assert_eq!(parse("set a to 1\nprint a\n"), parse("set a to 1. print a."));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let source = "set a to 1. while a < 3 do set a to a + 1. end. print a.";

        assert_eq!(parse(source), parse(source));
    }

    #[test]
    fn test_parse_missing_to_is_an_error() {
        let result = Parser::new("set a 5.").parse_program();

        assert_eq!(
            Err(ParseError {
                message: "expected 'to' but found number".into(),
                line: 1,
            }),
            result
        );
    }

    #[test]
    fn test_parse_missing_terminator_is_an_error() {
        let result = Parser::new("print 1 2.").parse_program();

        assert_eq!(
            Err(ParseError {
                message: "expected '.' or newline after statement but found number".into(),
                line: 1,
            }),
            result
        );
    }

    #[test]
    fn test_parse_error_reports_line_number() {
        let result = Parser::new("set a to 1\nset b 2\n").parse_program();

        assert_eq!(
            Err(ParseError {
                message: "expected 'to' but found number".into(),
                line: 2,
            }),
            result
        );
    }

    #[test]
    fn test_parse_unclosed_while_is_an_error() {
        let result = Parser::new("while 1 do print 1.").parse_program();

        assert_eq!(
            Err(ParseError {
                message: "expected 'end' to close 'while' but found end of input".into(),
                line: 1,
            }),
            result
        );
    }

    #[test]
    fn test_parse_trailing_tokens_are_an_error() {
        let result = Parser::new("print 1. end").parse_program();

        assert_eq!(
            Err(ParseError {
                message: "expected end of input but found 'end'".into(),
                line: 1,
            }),
            result
        );
    }

    #[test]
    fn test_parse_unknown_token_is_an_error() {
        let result = Parser::new("set a to 1 = 2.").parse_program();

        assert_eq!(
            Err(ParseError {
                message: "expected '.' or newline after statement but found unknown character"
                    .into(),
                line: 1,
            }),
            result
        );
    }
}
