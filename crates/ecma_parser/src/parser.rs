use ecma_ast::{
    BinaryOp, CatchClause, Expr, ExprArray, ExprAssign, ExprBinary, ExprBooleanLiteral, ExprCall,
    ExprConditional, ExprFunction, ExprMember, ExprName, ExprNew, ExprNullLiteral,
    ExprNumberLiteral, ExprSequence, ExprStringLiteral, ExprSubscript, ExprUnary, ExprUpdate,
    Identifier, Ranged, Script, Stmt, StmtBlock, StmtBreak, StmtContinue, StmtDebugger,
    StmtDoWhile, StmtEmpty, StmtExpr, StmtFor, StmtForIn, StmtForOf, StmtFunctionDef, StmtIf,
    StmtLabeled, StmtReturn, StmtSwitch, StmtThrow, StmtTry, StmtVar, StmtWhile, StmtWith,
    SwitchCase, TextRange, TextSize, UnaryOp, UpdateOp, VarDeclarator, VarKind,
};

use crate::lexer::{tokenize, Token, TokenKind};
use crate::ParseError;

type ParseResult<T> = Result<T, ParseError>;

/// Parses `source` as a script.
pub fn parse_script(source: &str) -> Result<Script, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        source,
        tokens,
        position: 0,
    };

    let mut body = Vec::new();
    while !parser.at(TokenKind::EndOfFile) {
        body.push(parser.parse_statement()?);
    }

    Ok(Script {
        range: TextRange::up_to(parser.current().range.end()),
        body,
    })
}

struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    position: usize,
}

impl<'src> Parser<'src> {
    fn current(&self) -> Token {
        self.tokens[self.position]
    }

    fn nth(&self, n: usize) -> TokenKind {
        let index = (self.position + n).min(self.tokens.len() - 1);
        self.tokens[index].kind
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn at_contextual(&self, keyword: &str) -> bool {
        self.at(TokenKind::Name) && self.text(self.current()) == keyword
    }

    fn text(&self, token: Token) -> &'src str {
        &self.source[token.range]
    }

    fn bump(&mut self) -> Token {
        let token = self.current();
        if token.kind != TokenKind::EndOfFile {
            self.position += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<Token> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current();
        let found = if token.kind == TokenKind::EndOfFile {
            "end of file".to_string()
        } else {
            format!("`{}`", self.text(token))
        };
        ParseError::new(format!("expected {expected}, found {found}"), token.range)
    }

    /// End offset of the most recently consumed token.
    fn previous_end(&self) -> TextSize {
        self.position
            .checked_sub(1)
            .map(|index| self.tokens[index].range.end())
            .unwrap_or_default()
    }

    fn range_from(&self, start: TextSize) -> TextRange {
        TextRange::new(start, self.previous_end())
    }

    /// Consumes a statement terminator, applying automatic semicolon insertion.
    fn expect_semicolon(&mut self) -> ParseResult<()> {
        if self.eat(TokenKind::Semi)
            || self.at(TokenKind::RBrace)
            || self.at(TokenKind::EndOfFile)
            || self.current().newline_before
        {
            Ok(())
        } else {
            Err(self.unexpected("`;`"))
        }
    }

    fn parse_identifier(&mut self) -> ParseResult<Identifier> {
        let token = self.expect(TokenKind::Name, "an identifier")?;
        Ok(Identifier::new(self.text(token), token.range))
    }

    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.current().range.start();
        match self.current().kind {
            TokenKind::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            TokenKind::Semi => {
                self.bump();
                Ok(Stmt::Empty(StmtEmpty {
                    range: self.range_from(start),
                }))
            }
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let mut var = self.parse_var_declaration(false)?;
                self.expect_semicolon()?;
                var.range = self.range_from(start);
                Ok(Stmt::Var(var))
            }
            TokenKind::Function => self.parse_function_definition(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => {
                self.bump();
                let test = self.parse_parenthesized_expression()?;
                let body = self.parse_statement()?;
                Ok(Stmt::While(StmtWhile {
                    range: self.range_from(start),
                    test: Box::new(test),
                    body: Box::new(body),
                }))
            }
            TokenKind::Do => {
                self.bump();
                let body = self.parse_statement()?;
                self.expect(TokenKind::While, "`while`")?;
                let test = self.parse_parenthesized_expression()?;
                self.eat(TokenKind::Semi);
                Ok(Stmt::DoWhile(StmtDoWhile {
                    range: self.range_from(start),
                    body: Box::new(body),
                    test: Box::new(test),
                }))
            }
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Break => {
                self.bump();
                let label = self.parse_jump_label()?;
                self.expect_semicolon()?;
                Ok(Stmt::Break(StmtBreak {
                    range: self.range_from(start),
                    label,
                }))
            }
            TokenKind::Continue => {
                self.bump();
                let label = self.parse_jump_label()?;
                self.expect_semicolon()?;
                Ok(Stmt::Continue(StmtContinue {
                    range: self.range_from(start),
                    label,
                }))
            }
            TokenKind::Return => {
                self.bump();
                let value = if self.at(TokenKind::Semi)
                    || self.at(TokenKind::RBrace)
                    || self.at(TokenKind::EndOfFile)
                    || self.current().newline_before
                {
                    None
                } else {
                    Some(Box::new(self.parse_expression(false)?))
                };
                self.expect_semicolon()?;
                Ok(Stmt::Return(StmtReturn {
                    range: self.range_from(start),
                    value,
                }))
            }
            TokenKind::Throw => {
                self.bump();
                if self.current().newline_before {
                    return Err(ParseError::new(
                        "line break is not allowed after `throw`",
                        self.current().range,
                    ));
                }
                let value = self.parse_expression(false)?;
                self.expect_semicolon()?;
                Ok(Stmt::Throw(StmtThrow {
                    range: self.range_from(start),
                    value: Box::new(value),
                }))
            }
            TokenKind::Try => self.parse_try_statement(),
            TokenKind::Switch => self.parse_switch_statement(),
            TokenKind::With => {
                self.bump();
                let object = self.parse_parenthesized_expression()?;
                let body = self.parse_statement()?;
                Ok(Stmt::With(StmtWith {
                    range: self.range_from(start),
                    object: Box::new(object),
                    body: Box::new(body),
                }))
            }
            TokenKind::Debugger => {
                self.bump();
                self.expect_semicolon()?;
                Ok(Stmt::Debugger(StmtDebugger {
                    range: self.range_from(start),
                }))
            }
            TokenKind::Name if self.nth(1) == TokenKind::Colon => {
                let label = self.parse_identifier()?;
                self.bump();
                let body = self.parse_statement()?;
                Ok(Stmt::Labeled(StmtLabeled {
                    range: self.range_from(start),
                    label,
                    body: Box::new(body),
                }))
            }
            _ => {
                let value = self.parse_expression(false)?;
                self.expect_semicolon()?;
                Ok(Stmt::Expr(StmtExpr {
                    range: self.range_from(start),
                    value: Box::new(value),
                }))
            }
        }
    }

    fn parse_block(&mut self) -> ParseResult<StmtBlock> {
        let start = self.expect(TokenKind::LBrace, "`{`")?.range.start();
        let body = self.parse_block_body()?;
        Ok(StmtBlock {
            range: self.range_from(start),
            body,
        })
    }

    /// Parses statements up to and including the closing `}`.
    fn parse_block_body(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut body = Vec::new();
        while !self.at(TokenKind::RBrace) {
            if self.at(TokenKind::EndOfFile) {
                return Err(self.unexpected("`}`"));
            }
            body.push(self.parse_statement()?);
        }
        self.bump();
        Ok(body)
    }

    fn parse_jump_label(&mut self) -> ParseResult<Option<Identifier>> {
        if self.at(TokenKind::Name) && !self.current().newline_before {
            Ok(Some(self.parse_identifier()?))
        } else {
            Ok(None)
        }
    }

    /// Parses `var a = 1, b` without the terminating semicolon.
    fn parse_var_declaration(&mut self, no_in: bool) -> ParseResult<StmtVar> {
        let keyword = self.bump();
        let kind = match keyword.kind {
            TokenKind::Let => VarKind::Let,
            TokenKind::Const => VarKind::Const,
            _ => VarKind::Var,
        };

        let mut declarations = Vec::new();
        loop {
            let name = self.parse_identifier()?;
            let init = if self.eat(TokenKind::Equal) {
                Some(Box::new(self.parse_assignment_expression(no_in)?))
            } else {
                None
            };
            declarations.push(VarDeclarator {
                range: self.range_from(name.start()),
                name,
                init,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        Ok(StmtVar {
            range: self.range_from(keyword.range.start()),
            kind,
            declarations,
        })
    }

    fn parse_function_definition(&mut self) -> ParseResult<Stmt> {
        let start = self.bump().range.start();
        let name = self.parse_identifier()?;
        let parameters = self.parse_parameters()?;
        self.expect(TokenKind::LBrace, "`{`")?;
        let body = self.parse_block_body()?;
        Ok(Stmt::FunctionDef(StmtFunctionDef {
            range: self.range_from(start),
            name,
            parameters,
            body,
        }))
    }

    fn parse_parameters(&mut self) -> ParseResult<Vec<Identifier>> {
        self.expect(TokenKind::LParen, "`(`")?;
        let mut parameters = Vec::new();
        while !self.eat(TokenKind::RParen) {
            parameters.push(self.parse_identifier()?);
            if !self.at(TokenKind::RParen) {
                self.expect(TokenKind::Comma, "`,`")?;
            }
        }
        Ok(parameters)
    }

    fn parse_if_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.bump().range.start();
        let test = self.parse_parenthesized_expression()?;
        let body = self.parse_statement()?;
        let orelse = if self.eat(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Stmt::If(StmtIf {
            range: self.range_from(start),
            test: Box::new(test),
            body: Box::new(body),
            orelse,
        }))
    }

    fn parse_for_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.bump().range.start();
        self.expect(TokenKind::LParen, "`(`")?;

        let head = if self.at(TokenKind::Semi) {
            None
        } else if matches!(
            self.current().kind,
            TokenKind::Var | TokenKind::Let | TokenKind::Const
        ) {
            Some(Stmt::Var(self.parse_var_declaration(true)?))
        } else {
            let value = self.parse_expression(true)?;
            Some(Stmt::Expr(StmtExpr {
                range: value.range(),
                value: Box::new(value),
            }))
        };

        if let Some(left) = head {
            if self.eat(TokenKind::In) {
                let right = self.parse_expression(false)?;
                self.expect(TokenKind::RParen, "`)`")?;
                let body = self.parse_statement()?;
                return Ok(Stmt::ForIn(StmtForIn {
                    range: self.range_from(start),
                    left: Box::new(left),
                    right: Box::new(right),
                    body: Box::new(body),
                }));
            }
            if self.at_contextual("of") {
                self.bump();
                let right = self.parse_assignment_expression(false)?;
                self.expect(TokenKind::RParen, "`)`")?;
                let body = self.parse_statement()?;
                return Ok(Stmt::ForOf(StmtForOf {
                    range: self.range_from(start),
                    left: Box::new(left),
                    right: Box::new(right),
                    body: Box::new(body),
                }));
            }
            return self.parse_for_rest(start, Some(Box::new(left)));
        }

        self.parse_for_rest(start, None)
    }

    /// Parses `; test; update) body` of a classic `for` statement.
    fn parse_for_rest(&mut self, start: TextSize, init: Option<Box<Stmt>>) -> ParseResult<Stmt> {
        self.expect(TokenKind::Semi, "`;`")?;
        let test = if self.at(TokenKind::Semi) {
            None
        } else {
            Some(Box::new(self.parse_expression(false)?))
        };
        self.expect(TokenKind::Semi, "`;`")?;
        let update = if self.at(TokenKind::RParen) {
            None
        } else {
            Some(Box::new(self.parse_expression(false)?))
        };
        self.expect(TokenKind::RParen, "`)`")?;
        let body = self.parse_statement()?;
        Ok(Stmt::For(StmtFor {
            range: self.range_from(start),
            init,
            test,
            update,
            body: Box::new(body),
        }))
    }

    fn parse_try_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.bump().range.start();
        let body = self.parse_block()?;

        let handler = if self.at(TokenKind::Catch) {
            let catch_start = self.bump().range.start();
            let param = if self.eat(TokenKind::LParen) {
                let param = self.parse_primary_expression()?;
                self.expect(TokenKind::RParen, "`)`")?;
                Some(Box::new(param))
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(CatchClause {
                range: self.range_from(catch_start),
                param,
                body,
            })
        } else {
            None
        };

        let finalizer = if self.eat(TokenKind::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(self.unexpected("`catch` or `finally`"));
        }

        Ok(Stmt::Try(StmtTry {
            range: self.range_from(start),
            body,
            handler,
            finalizer,
        }))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<Stmt> {
        let start = self.bump().range.start();
        let discriminant = self.parse_parenthesized_expression()?;
        self.expect(TokenKind::LBrace, "`{`")?;

        let mut cases = Vec::new();
        while !self.eat(TokenKind::RBrace) {
            let case_start = self.current().range.start();
            let test = match self.current().kind {
                TokenKind::Case => {
                    self.bump();
                    Some(Box::new(self.parse_expression(false)?))
                }
                TokenKind::Default => {
                    self.bump();
                    None
                }
                _ => return Err(self.unexpected("`case`, `default` or `}`")),
            };
            self.expect(TokenKind::Colon, "`:`")?;

            let mut consequent = Vec::new();
            while !matches!(
                self.current().kind,
                TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::EndOfFile
            ) {
                consequent.push(self.parse_statement()?);
            }
            cases.push(SwitchCase {
                range: self.range_from(case_start),
                test,
                consequent,
            });
        }

        Ok(Stmt::Switch(StmtSwitch {
            range: self.range_from(start),
            discriminant: Box::new(discriminant),
            cases,
        }))
    }

    fn parse_parenthesized_expression(&mut self) -> ParseResult<Expr> {
        self.expect(TokenKind::LParen, "`(`")?;
        let expr = self.parse_expression(false)?;
        self.expect(TokenKind::RParen, "`)`")?;
        Ok(expr)
    }

    /// Parses a comma-separated expression. `no_in` disables the `in` operator,
    /// as required in `for` heads.
    fn parse_expression(&mut self, no_in: bool) -> ParseResult<Expr> {
        let first = self.parse_assignment_expression(no_in)?;
        if !self.at(TokenKind::Comma) {
            return Ok(first);
        }

        let start = first.start();
        let mut elts = vec![first];
        while self.eat(TokenKind::Comma) {
            elts.push(self.parse_assignment_expression(no_in)?);
        }
        Ok(Expr::Sequence(ExprSequence {
            range: self.range_from(start),
            elts,
        }))
    }

    fn parse_assignment_expression(&mut self, no_in: bool) -> ParseResult<Expr> {
        let target = self.parse_conditional_expression(no_in)?;
        let op = match self.current().kind {
            TokenKind::Equal => None,
            TokenKind::PlusEqual => Some(BinaryOp::Add),
            TokenKind::MinusEqual => Some(BinaryOp::Sub),
            TokenKind::StarEqual => Some(BinaryOp::Mul),
            TokenKind::SlashEqual => Some(BinaryOp::Div),
            TokenKind::PercentEqual => Some(BinaryOp::Mod),
            _ => return Ok(target),
        };

        if !matches!(target, Expr::Name(_) | Expr::Member(_) | Expr::Subscript(_)) {
            return Err(ParseError::new(
                "invalid assignment target",
                target.range(),
            ));
        }

        self.bump();
        let value = self.parse_assignment_expression(no_in)?;
        Ok(Expr::Assign(ExprAssign {
            range: TextRange::new(target.start(), value.end()),
            target: Box::new(target),
            op,
            value: Box::new(value),
        }))
    }

    fn parse_conditional_expression(&mut self, no_in: bool) -> ParseResult<Expr> {
        let test = self.parse_binary_expression(0, no_in)?;
        if !self.eat(TokenKind::Question) {
            return Ok(test);
        }
        let body = self.parse_assignment_expression(false)?;
        self.expect(TokenKind::Colon, "`:`")?;
        let orelse = self.parse_assignment_expression(no_in)?;
        Ok(Expr::Conditional(ExprConditional {
            range: TextRange::new(test.start(), orelse.end()),
            test: Box::new(test),
            body: Box::new(body),
            orelse: Box::new(orelse),
        }))
    }

    fn binary_operator(&self, no_in: bool) -> Option<(BinaryOp, u8)> {
        let operator = match self.current().kind {
            TokenKind::QuestionQuestion => (BinaryOp::NullishCoalescing, 1),
            TokenKind::DoubleVbar => (BinaryOp::Or, 2),
            TokenKind::DoubleAmper => (BinaryOp::And, 3),
            TokenKind::Vbar => (BinaryOp::BitOr, 4),
            TokenKind::CircumFlex => (BinaryOp::BitXor, 5),
            TokenKind::Amper => (BinaryOp::BitAnd, 6),
            TokenKind::EqEqual => (BinaryOp::Eq, 7),
            TokenKind::NotEqual => (BinaryOp::NotEq, 7),
            TokenKind::EqEqEqual => (BinaryOp::StrictEq, 7),
            TokenKind::NotEqEqual => (BinaryOp::StrictNotEq, 7),
            TokenKind::Less => (BinaryOp::Lt, 8),
            TokenKind::LessEqual => (BinaryOp::LtE, 8),
            TokenKind::Greater => (BinaryOp::Gt, 8),
            TokenKind::GreaterEqual => (BinaryOp::GtE, 8),
            TokenKind::Instanceof => (BinaryOp::Instanceof, 8),
            TokenKind::In if !no_in => (BinaryOp::In, 8),
            TokenKind::LeftShift => (BinaryOp::LShift, 9),
            TokenKind::RightShift => (BinaryOp::RShift, 9),
            TokenKind::UnsignedRightShift => (BinaryOp::URShift, 9),
            TokenKind::Plus => (BinaryOp::Add, 10),
            TokenKind::Minus => (BinaryOp::Sub, 10),
            TokenKind::Star => (BinaryOp::Mul, 11),
            TokenKind::Slash => (BinaryOp::Div, 11),
            TokenKind::Percent => (BinaryOp::Mod, 11),
            TokenKind::DoubleStar => (BinaryOp::Exp, 12),
            _ => return None,
        };
        Some(operator)
    }

    fn parse_binary_expression(&mut self, min_precedence: u8, no_in: bool) -> ParseResult<Expr> {
        let mut left = self.parse_unary_expression()?;
        while let Some((op, precedence)) = self.binary_operator(no_in) {
            if precedence < min_precedence {
                break;
            }
            self.bump();
            // `**` is right-associative.
            let next_precedence = if op == BinaryOp::Exp {
                precedence
            } else {
                precedence + 1
            };
            let right = self.parse_binary_expression(next_precedence, no_in)?;
            left = Expr::Binary(ExprBinary {
                range: TextRange::new(left.start(), right.end()),
                left: Box::new(left),
                op,
                right: Box::new(right),
            });
        }
        Ok(left)
    }

    fn parse_unary_expression(&mut self) -> ParseResult<Expr> {
        let token = self.current();
        let op = match token.kind {
            TokenKind::Exclamation => UnaryOp::Not,
            TokenKind::Tilde => UnaryOp::BitNot,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Minus,
            TokenKind::Typeof => UnaryOp::Typeof,
            TokenKind::Void => UnaryOp::Void,
            TokenKind::Delete => UnaryOp::Delete,
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                self.bump();
                let target = self.parse_unary_expression()?;
                return Ok(Expr::Update(ExprUpdate {
                    range: TextRange::new(token.range.start(), target.end()),
                    op: update_op(token.kind),
                    prefix: true,
                    target: Box::new(target),
                }));
            }
            _ => return self.parse_postfix_expression(),
        };

        self.bump();
        let operand = self.parse_unary_expression()?;
        Ok(Expr::Unary(ExprUnary {
            range: TextRange::new(token.range.start(), operand.end()),
            op,
            operand: Box::new(operand),
        }))
    }

    fn parse_postfix_expression(&mut self) -> ParseResult<Expr> {
        let target = self.parse_call_expression()?;
        let token = self.current();
        if matches!(token.kind, TokenKind::PlusPlus | TokenKind::MinusMinus)
            && !token.newline_before
        {
            self.bump();
            return Ok(Expr::Update(ExprUpdate {
                range: TextRange::new(target.start(), token.range.end()),
                op: update_op(token.kind),
                prefix: false,
                target: Box::new(target),
            }));
        }
        Ok(target)
    }

    fn parse_call_expression(&mut self) -> ParseResult<Expr> {
        let mut expr = if self.at(TokenKind::New) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };

        loop {
            expr = match self.current().kind {
                TokenKind::LParen => {
                    let arguments = self.parse_arguments()?;
                    Expr::Call(ExprCall {
                        range: self.range_from(expr.start()),
                        func: Box::new(expr),
                        arguments,
                    })
                }
                TokenKind::Dot | TokenKind::LBracket => self.parse_member_suffix(expr)?,
                _ => return Ok(expr),
            };
        }
    }

    /// Parses `.name` or `[index]` following `object`.
    fn parse_member_suffix(&mut self, object: Expr) -> ParseResult<Expr> {
        let start = object.start();
        if self.eat(TokenKind::Dot) {
            let token = self.bump();
            let name = self.text(token);
            if !name.starts_with(|c: char| c.is_alphabetic() || c == '_' || c == '$') {
                return Err(ParseError::new("expected a property name", token.range));
            }
            Ok(Expr::Member(ExprMember {
                range: self.range_from(start),
                object: Box::new(object),
                property: Identifier::new(name, token.range),
            }))
        } else {
            self.expect(TokenKind::LBracket, "`[`")?;
            let index = self.parse_expression(false)?;
            self.expect(TokenKind::RBracket, "`]`")?;
            Ok(Expr::Subscript(ExprSubscript {
                range: self.range_from(start),
                value: Box::new(object),
                index: Box::new(index),
            }))
        }
    }

    fn parse_new_expression(&mut self) -> ParseResult<Expr> {
        let start = self.bump().range.start();
        let mut func = if self.at(TokenKind::New) {
            self.parse_new_expression()?
        } else {
            self.parse_primary_expression()?
        };
        while matches!(self.current().kind, TokenKind::Dot | TokenKind::LBracket) {
            func = self.parse_member_suffix(func)?;
        }
        let arguments = if self.at(TokenKind::LParen) {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(Expr::New(ExprNew {
            range: self.range_from(start),
            func: Box::new(func),
            arguments,
        }))
    }

    fn parse_arguments(&mut self) -> ParseResult<Vec<Expr>> {
        self.expect(TokenKind::LParen, "`(`")?;
        let mut arguments = Vec::new();
        while !self.eat(TokenKind::RParen) {
            arguments.push(self.parse_assignment_expression(false)?);
            if !self.at(TokenKind::RParen) {
                self.expect(TokenKind::Comma, "`,`")?;
            }
        }
        Ok(arguments)
    }

    fn parse_primary_expression(&mut self) -> ParseResult<Expr> {
        let token = self.current();
        let expr = match token.kind {
            TokenKind::Name => {
                self.bump();
                Expr::Name(ExprName {
                    range: token.range,
                    id: self.text(token).to_string(),
                })
            }
            TokenKind::Number => {
                self.bump();
                Expr::NumberLiteral(ExprNumberLiteral {
                    range: token.range,
                    value: parse_number(self.text(token), token.range)?,
                })
            }
            TokenKind::String => {
                self.bump();
                Expr::StringLiteral(ExprStringLiteral {
                    range: token.range,
                    value: unescape(self.text(token)),
                })
            }
            TokenKind::True | TokenKind::False => {
                self.bump();
                Expr::BooleanLiteral(ExprBooleanLiteral {
                    range: token.range,
                    value: token.kind == TokenKind::True,
                })
            }
            TokenKind::Null => {
                self.bump();
                Expr::NullLiteral(ExprNullLiteral { range: token.range })
            }
            TokenKind::LParen => self.parse_parenthesized_expression()?,
            TokenKind::LBracket => {
                self.bump();
                let mut elts = Vec::new();
                while !self.eat(TokenKind::RBracket) {
                    elts.push(self.parse_assignment_expression(false)?);
                    if !self.at(TokenKind::RBracket) {
                        self.expect(TokenKind::Comma, "`,`")?;
                    }
                }
                Expr::Array(ExprArray {
                    range: self.range_from(token.range.start()),
                    elts,
                })
            }
            TokenKind::Function => {
                self.bump();
                let name = if self.at(TokenKind::Name) {
                    Some(self.parse_identifier()?)
                } else {
                    None
                };
                let parameters = self.parse_parameters()?;
                self.expect(TokenKind::LBrace, "`{`")?;
                let body = self.parse_block_body()?;
                Expr::Function(ExprFunction {
                    range: self.range_from(token.range.start()),
                    name,
                    parameters,
                    body,
                })
            }
            _ => return Err(self.unexpected("an expression")),
        };
        Ok(expr)
    }
}

fn update_op(kind: TokenKind) -> UpdateOp {
    if kind == TokenKind::PlusPlus {
        UpdateOp::Increment
    } else {
        UpdateOp::Decrement
    }
}

#[allow(clippy::cast_precision_loss)]
fn parse_number(text: &str, range: TextRange) -> ParseResult<f64> {
    let value = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).map(|value| value as f64).ok()
    } else {
        text.parse::<f64>().ok()
    };
    value.ok_or_else(|| ParseError::new(format!("invalid number literal `{text}`"), range))
}

/// Strips the quotes of a string literal and resolves the common escape sequences.
fn unescape(literal: &str) -> String {
    let inner = &literal[1..literal.len() - 1];
    let mut value = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some('r') => value.push('\r'),
            Some('0') => value.push('\0'),
            Some(other) => value.push(other),
            None => {}
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use ecma_ast::{BinaryOp, Expr, Ranged, Stmt};
    use test_case::test_case;

    use super::parse_script;

    fn single_statement(source: &str) -> Stmt {
        let mut script = parse_script(source).unwrap();
        assert_eq!(script.body.len(), 1, "{source}");
        script.body.remove(0)
    }

    #[test_case("foo();", "expression")]
    #[test_case("var a = 1, b;", "var")]
    #[test_case("function f(a, b) { return a; }", "function")]
    #[test_case("if (a) b(); else c();", "if")]
    #[test_case("while (a) {}", "while")]
    #[test_case("do { a(); } while (b)", "do-while")]
    #[test_case("for (i = 0; i < 10; i++) {}", "for")]
    #[test_case("for (;;) {}", "for")]
    #[test_case("for (var k in obj) {}", "for-in")]
    #[test_case("for (let v of list) {}", "for-of")]
    #[test_case("try { a(); } catch (e) { b(); } finally { c(); }", "try")]
    #[test_case("try { a(); } catch { b(); }", "try")]
    #[test_case("switch (x) { case 1: a(); break; default: b(); }", "switch")]
    #[test_case("outer: while (a) {}", "labeled")]
    #[test_case(";", "empty")]
    #[test_case("debugger;", "debugger")]
    #[test_case("with (obj) { a(); }", "with")]
    #[test_case("{ a(); b(); }", "block")]
    fn statement_kinds(source: &str, kind: &str) {
        assert_eq!(single_statement(source).kind_name(), kind);
    }

    #[test]
    fn expression_statement_range_includes_semicolon() {
        let Stmt::Expr(stmt) = single_statement("foo(1, 2);") else {
            panic!("expected an expression statement");
        };
        assert_eq!(u32::from(stmt.range.end()), 10);
        assert_eq!(u32::from(stmt.value.range().end()), 9);
    }

    #[test]
    fn binary_precedence() {
        let Stmt::Expr(stmt) = single_statement("a || b && c + d * e;") else {
            panic!("expected an expression statement");
        };
        let Expr::Binary(or) = &*stmt.value else {
            panic!("expected a binary expression");
        };
        assert_eq!(or.op, BinaryOp::Or);
        let Expr::Binary(and) = &*or.right else {
            panic!("expected a binary expression");
        };
        assert_eq!(and.op, BinaryOp::And);
    }

    #[test]
    fn automatic_semicolon_insertion() {
        let script = parse_script("a()\nb()\nreturn\nc").unwrap();
        assert_eq!(script.body.len(), 4);
        assert!(matches!(&script.body[2], Stmt::Return(ret) if ret.value.is_none()));
    }

    #[test]
    fn break_label_on_same_line_only() {
        let script = parse_script("while (a) { break\nfoo }").unwrap();
        let Stmt::While(stmt) = &script.body[0] else {
            panic!("expected a while statement");
        };
        let Stmt::Block(block) = &*stmt.body else {
            panic!("expected a block");
        };
        assert!(matches!(&block.body[0], Stmt::Break(brk) if brk.label.is_none()));
        assert_eq!(block.body.len(), 2);
    }

    #[test]
    fn for_in_head_excludes_in_operator() {
        let Stmt::ForIn(stmt) = single_statement("for (var k in a in b) {}") else {
            panic!("expected a for-in statement");
        };
        assert!(stmt.left.is_var_stmt());
        assert!(stmt.right.is_binary_expr());
    }

    #[test_case("if (a", "expected `)`, found end of file")]
    #[test_case("a b", "expected `;`, found `b`")]
    #[test_case("1 = 2;", "invalid assignment target")]
    #[test_case("try {}", "expected `catch` or `finally`, found end of file")]
    fn errors(source: &str, message: &str) {
        assert_eq!(parse_script(source).unwrap_err().message, message);
    }
}
