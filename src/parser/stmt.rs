use crate::{
    ast::{
        expressions::Expr,
        operators::BinOperator,
        statements::{
            AssignStmt, AugAssignStmt, ClassDefStmt, ExpressionStmt, ForStmt, FunctionDefStmt, IfStmt,
            ImportStmt, ReturnStmt, Stmt, WhileStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::{parse_expr, parse_expr_list, starts_expr}, lookups::BindingPower},
    Span,
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if parser.current_token_kind() == TokenKind::Indent {
        return Err(Error::new(
            ErrorImpl::IndentationError { message: String::from("unexpected indent") },
            parser.get_position(),
        ));
    }

    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()) {
        let handler = *handler;
        return handler(parser);
    }

    parse_simple_stmt(parser)
}

/// Expression statements, assignments and augmented assignments.
pub fn parse_simple_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let first = parse_expr_list(parser)?;
    let start = first.get_span().start.clone();

    let stmt = if parser.current_token_kind() == TokenKind::Assignment {
        let mut targets = vec![first];
        parser.advance();
        let mut value = parse_expr_list(parser)?;

        while parser.current_token_kind() == TokenKind::Assignment {
            parser.advance();
            targets.push(value);
            value = parse_expr_list(parser)?;
        }

        for target in targets.iter() {
            check_target(target)?;
        }

        Stmt::Assign(AssignStmt {
            targets,
            value,
            span: parser.span_from(start),
        })
    } else if parser.current_token_kind().is_augmented_assignment() {
        check_target(&first)?;
        let operator_token = parser.advance();
        let op = BinOperator::from_token(operator_token.kind).unwrap_or(BinOperator::Add);
        let value = parse_expr_list(parser)?;

        Stmt::AugAssign(AugAssignStmt {
            target: first,
            op,
            value,
            span: parser.span_from(start),
        })
    } else {
        Stmt::Expr(ExpressionStmt {
            span: first.get_span().clone(),
            expression: first,
        })
    };

    expect_stmt_end(parser)?;
    Ok(stmt)
}

/// Consumes the end of a simple statement: `;`, a newline, or nothing before a dedent/EOF.
pub fn expect_stmt_end(parser: &mut Parser) -> Result<(), Error> {
    match parser.current_token_kind() {
        TokenKind::Semicolon => {
            parser.advance();
            if parser.current_token_kind() == TokenKind::Newline {
                parser.advance();
            }
            Ok(())
        }
        TokenKind::Newline => {
            parser.advance();
            Ok(())
        }
        TokenKind::EOF | TokenKind::Dedent => Ok(()),
        _ => Err(parser.unexpected_detailed("expected end of statement")),
    }
}

/// `: NEWLINE INDENT stmt+ DEDENT`, or a simple statement on the same line.
pub fn parse_block(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    parser.expect(TokenKind::Colon)?;

    if parser.current_token_kind() != TokenKind::Newline {
        return Ok(vec![parse_simple_stmt(parser)?]);
    }

    parser.advance();
    if parser.current_token_kind() != TokenKind::Indent {
        return Err(Error::new(
            ErrorImpl::IndentationError { message: String::from("expected an indented block") },
            parser.get_position(),
        ));
    }
    parser.advance();

    let mut body = vec![];
    while parser.current_token_kind() != TokenKind::Dedent && parser.has_tokens() {
        if parser.current_token_kind() == TokenKind::Newline {
            parser.advance();
            continue;
        }
        body.push(parse_stmt(parser)?);
    }

    if parser.current_token_kind() == TokenKind::Dedent {
        parser.advance();
    }

    Ok(body)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let test = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    let orelse = match parser.current_token_kind() {
        // `elif` is an `if` nested in the else branch
        TokenKind::Elif => vec![parse_if_stmt(parser)?],
        TokenKind::Else => {
            parser.advance();
            parse_block(parser)?
        }
        _ => vec![],
    };

    Ok(Stmt::If(IfStmt {
        test,
        body,
        orelse,
        span: parser.span_from(start),
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let test = parse_expr(parser, BindingPower::Default)?;
    let body = parse_block(parser)?;

    Ok(Stmt::While(WhileStmt {
        test,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;
    let target = parse_expr_list(parser)?;

    let error = parser.unexpected_detailed("expected `in` after the loop target");
    parser.expect_error(TokenKind::In, Some(error))?;

    let iter = parse_expr_list(parser)?;
    let body = parse_block(parser)?;

    Ok(Stmt::For(ForStmt {
        target,
        iter,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_fn_def_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let error = parser.unexpected_detailed("expected function name");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    parser.expect(TokenKind::OpenParen)?;
    let mut params = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        params.push(parser.expect(TokenKind::Identifier)?.value);

        // Annotations and defaults are parsed and dropped
        if parser.current_token_kind() == TokenKind::Colon {
            parser.advance();
            parse_expr(parser, BindingPower::Default)?;
        }
        if parser.current_token_kind() == TokenKind::Assignment {
            parser.advance();
            parse_expr(parser, BindingPower::Default)?;
        }

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseParen {
            return Err(parser.unexpected());
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        parse_expr(parser, BindingPower::Default)?;
    }

    let body = parse_block(parser)?;

    Ok(Stmt::FunctionDef(FunctionDefStmt {
        name,
        params,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_class_def_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let error = parser.unexpected_detailed("expected class name");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    let mut bases = vec![];
    if parser.current_token_kind() == TokenKind::OpenParen {
        parser.advance();
        while parser.current_token_kind() != TokenKind::CloseParen {
            bases.push(parse_expr(parser, BindingPower::Default)?);
            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else if parser.current_token_kind() != TokenKind::CloseParen {
                return Err(parser.unexpected());
            }
        }
        parser.expect(TokenKind::CloseParen)?;
    }

    let body = parse_block(parser)?;

    Ok(Stmt::ClassDef(ClassDefStmt {
        name,
        bases,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let value = if starts_expr(parser) {
        Some(parse_expr_list(parser)?)
    } else {
        None
    };

    let span = parser.span_from(start);
    expect_stmt_end(parser)?;

    Ok(Stmt::Return(ReturnStmt { value, span }))
}

/// `import a.b` and `from a import b` are kept as the dotted module path only.
pub fn parse_import_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start;

    let mut module = parser.expect(TokenKind::Identifier)?.value;
    while parser.current_token_kind() == TokenKind::Dot {
        parser.advance();
        module.push('.');
        module.push_str(&parser.expect(TokenKind::Identifier)?.value);
    }

    // The imported names and aliases are not needed downstream
    while !matches!(
        parser.current_token_kind(),
        TokenKind::Newline | TokenKind::Semicolon | TokenKind::EOF | TokenKind::Dedent
    ) {
        parser.advance();
    }

    let span = parser.span_from(start);
    expect_stmt_end(parser)?;

    Ok(Stmt::Import(ImportStmt { module, span }))
}

/// `pass`, `break` and `continue`.
pub fn parse_keyword_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance();
    let span: Span = token.span;

    expect_stmt_end(parser)?;

    Ok(match token.kind {
        TokenKind::Break => Stmt::Break(span),
        TokenKind::Continue => Stmt::Continue(span),
        _ => Stmt::Pass(span),
    })
}

fn is_target(expr: &Expr) -> bool {
    match expr {
        Expr::Name(_) | Expr::Attribute(_) | Expr::Subscript(_) => true,
        Expr::Tuple(tuple) => tuple.elts.iter().all(is_target),
        _ => false,
    }
}

fn check_target(expr: &Expr) -> Result<(), Error> {
    if is_target(expr) {
        Ok(())
    } else {
        Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: expr.kind_name().to_string(),
                message: String::from("cannot assign to this expression"),
            },
            expr.get_span().start.clone(),
        ))
    }
}
