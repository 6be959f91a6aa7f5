use crate::{
    ast::{
        expressions::{
            AttributeExpr, BinOpExpr, BoolOpExpr, CallExpr, CompareExpr, ConstantExpr, Expr, ListExpr,
            Literal, NameExpr, SubscriptExpr, TupleExpr, UnaryOpExpr,
        },
        operators::{BinOperator, BoolOperator, CompareOperator, UnaryOperator},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected()),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let next_bp = *parser.get_bp_lookup().get(&token_kind).unwrap_or(&BindingPower::Default);
        if next_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(parser.unexpected()),
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

/// Whether the current token can start an expression.
pub fn starts_expr(parser: &Parser) -> bool {
    parser.get_nud_lookup().contains_key(&parser.current_token_kind())
}

/// Parses `a, b, c` into a Tuple, or a single expression when there is no comma.
pub fn parse_expr_list(parser: &mut Parser) -> Result<Expr, Error> {
    let first = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() != TokenKind::Comma {
        return Ok(first);
    }

    let start = first.get_span().start.clone();
    let mut elts = vec![first];

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        if !starts_expr(parser) {
            break;
        }
        elts.push(parse_expr(parser, BindingPower::Default)?);
    }

    Ok(Expr::Tuple(TupleExpr {
        elts,
        span: parser.span_from(start),
    }))
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    let value = match token.kind {
        TokenKind::Integer => Literal::Int(token.value.clone()),
        TokenKind::Float => match token.value.parse::<f64>() {
            Ok(value) => Literal::Float(value),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value.clone() },
                    token.span.start.clone(),
                ))
            }
        },
        TokenKind::String => Literal::Str(token.value.clone()),
        TokenKind::True => Literal::Bool(true),
        TokenKind::False => Literal::Bool(false),
        TokenKind::None => Literal::None,
        TokenKind::Identifier => {
            parser.advance();
            return Ok(Expr::Name(NameExpr {
                id: token.value,
                span: token.span,
            }));
        }
        _ => return Err(parser.unexpected()),
    };

    parser.advance();
    Ok(Expr::Constant(ConstantExpr {
        value,
        span: token.span,
    }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let op = match BinOperator::from_token(operator_token.kind) {
        Some(op) => op,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: operator_token.value },
                operator_token.span.start,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::BinOp(BinOpExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left: Box::new(left),
        op,
        right: Box::new(right),
    }))
}

/// `**` binds right to left and tighter than a unary minus on its left.
pub fn parse_power_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let right = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::BinOp(BinOpExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left: Box::new(left),
        op: BinOperator::Pow,
        right: Box::new(right),
    }))
}

pub fn parse_compare_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let op = match CompareOperator::from_token(operator_token.kind) {
        Some(op) => op,
        None => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken { token: operator_token.value },
                operator_token.span.start,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Compare(CompareExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left: Box::new(left),
        op,
        right: Box::new(right),
    }))
}

pub fn parse_bool_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let op = if operator_token.kind == TokenKind::And {
        BoolOperator::And
    } else {
        BoolOperator::Or
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::BoolOp(BoolOpExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        op,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let rhs = parse_expr(parser, BindingPower::Unary)?;

    prefix(operator_token.kind, operator_token.span.start, rhs)
}

pub fn parse_not_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let rhs = parse_expr(parser, BindingPower::LogicalNot)?;

    prefix(operator_token.kind, operator_token.span.start, rhs)
}

fn prefix(kind: TokenKind, start: crate::Position, operand: Expr) -> Result<Expr, Error> {
    let op = match UnaryOperator::from_token(kind) {
        Some(op) => op,
        None => return Err(Error::new(ErrorImpl::UnexpectedToken { token: kind.to_string() }, start)),
    };

    Ok(Expr::UnaryOp(UnaryOpExpr {
        span: Span {
            start,
            end: operand.get_span().end.clone(),
        },
        op,
        operand: Box::new(operand),
    }))
}

/// `( expr )` is plain grouping; `()` and `(a, b)` are tuples.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start;

    if parser.current_token_kind() == TokenKind::CloseParen {
        parser.advance();
        return Ok(Expr::Tuple(TupleExpr {
            elts: vec![],
            span: parser.span_from(start),
        }));
    }

    let expr = parse_expr_list(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_list_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start;
    let elts = parse_sequence(parser, TokenKind::CloseBracket)?;

    Ok(Expr::List(ListExpr {
        elts,
        span: parser.span_from(start),
    }))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let args = parse_sequence(parser, TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpr {
        span: parser.span_from(left.get_span().start.clone()),
        func: Box::new(left),
        args,
    }))
}

pub fn parse_subscript_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let index = parse_expr_list(parser)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::Subscript(SubscriptExpr {
        span: parser.span_from(left.get_span().start.clone()),
        value: Box::new(left),
        index: Box::new(index),
    }))
}

pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let error = parser.unexpected_detailed("expected attribute name after `.`");
    let attr = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    Ok(Expr::Attribute(AttributeExpr {
        span: parser.span_from(left.get_span().start.clone()),
        value: Box::new(left),
        attr,
    }))
}

/// Comma separated expressions up to and including `close`; a trailing comma is allowed.
fn parse_sequence(parser: &mut Parser, close: TokenKind) -> Result<Vec<Expr>, Error> {
    let mut elts = vec![];

    while parser.current_token_kind() != close {
        elts.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != close {
            return Err(parser.unexpected());
        }
    }

    parser.expect(close)?;
    Ok(elts)
}
