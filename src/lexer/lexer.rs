use std::{iter::Peekable, rc::Rc, str::Chars};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), Error>;

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler
}

// Every pattern is anchored; the first one matching at the cursor wins, so
// longer operators are listed before their prefixes.
lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^\\r?\\n[ \\t\\f]*").unwrap(), handler: newline_handler },
        RegexPattern { regex: Regex::new("^[ \\t\\f]+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^\\\\\\r?\\n").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^#[^\\r\\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^[\\p{XID_Start}_][\\p{XID_Continue}]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^([0-9][0-9_]*(\\.[0-9_]*)?|\\.[0-9][0-9_]*)([eE][+-]?[0-9][0-9_]*)?").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\"(?:[^\"\\\\\\r\\n]|\\\\.)*\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^'(?:[^'\\\\\\r\\n]|\\\\.)*'").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^\\[").unwrap(), handler: open_handler },
        RegexPattern { regex: Regex::new("^\\]").unwrap(), handler: close_handler },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: open_handler },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: close_handler },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: open_handler },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: close_handler },
        RegexPattern { regex: Regex::new("^\\*\\*=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::StarStarEquals, "**=") },
        RegexPattern { regex: Regex::new("^\\*\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::StarStar, "**") },
        RegexPattern { regex: Regex::new("^\\*=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new("^//=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::SlashSlashEquals, "//=") },
        RegexPattern { regex: Regex::new("^//").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::SlashSlash, "//") },
        RegexPattern { regex: Regex::new("^/=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::SlashEquals, "/=") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^<<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LeftShiftEquals, "<<=") },
        RegexPattern { regex: Regex::new("^<<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LeftShift, "<<") },
        RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RightShiftEquals, ">>=") },
        RegexPattern { regex: Regex::new("^>>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RightShift, ">>") },
        RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
        RegexPattern { regex: Regex::new("^->").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->") },
        RegexPattern { regex: Regex::new("^\\+=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=") },
        RegexPattern { regex: Regex::new("^-=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=") },
        RegexPattern { regex: Regex::new("^%=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PercentEquals, "%=") },
        RegexPattern { regex: Regex::new("^\\|=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PipeEquals, "|=") },
        RegexPattern { regex: Regex::new("^\\^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CaretEquals, "^=") },
        RegexPattern { regex: Regex::new("^&=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::AmpersandEquals, "&=") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-") },
        RegexPattern { regex: Regex::new("^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
        RegexPattern { regex: Regex::new("^@").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::At, "@") },
        RegexPattern { regex: Regex::new("^\\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|") },
        RegexPattern { regex: Regex::new("^\\^").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Caret, "^") },
        RegexPattern { regex: Regex::new("^&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Ampersand, "&") },
        RegexPattern { regex: Regex::new("^~").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~") },
        RegexPattern { regex: Regex::new("^\\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
    ];
}

#[derive(Clone)]
pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
    /// Open indentation levels, innermost last. Always starts with column 0.
    indent_stack: Vec<usize>,
    /// Depth of open brackets; newlines inside brackets are not significant.
    nesting: usize,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("<stdin>"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
            indent_stack: vec![0],
            nesting: 0,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position(self.pos, Rc::clone(&self.file))
    }

    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos, Rc::clone(&self.file)),
            end: Position(self.pos + len, Rc::clone(&self.file)),
        }
    }

    /// Closes the current logical line, unless nothing is open.
    fn end_logical_line(&mut self) {
        let open = match self.tokens.last() {
            Some(token) => !matches!(token.kind, TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent),
            None => false,
        };

        if open {
            let span = self.span_of(0);
            self.push(MK_TOKEN!(TokenKind::Newline, String::from("\\n"), span));
        }
    }

    fn indent_to(&mut self, width: usize) -> Result<(), Error> {
        let top = *self.indent_stack.last().unwrap_or(&0);

        if width > top {
            self.indent_stack.push(width);
            let span = self.span_of(0);
            self.push(MK_TOKEN!(TokenKind::Indent, String::from("<indent>"), span));
            return Ok(());
        }

        while width < *self.indent_stack.last().unwrap_or(&0) {
            self.indent_stack.pop();
            let span = self.span_of(0);
            self.push(MK_TOKEN!(TokenKind::Dedent, String::from("<dedent>"), span));
        }

        if width != *self.indent_stack.last().unwrap_or(&0) {
            return Err(Error::new(
                ErrorImpl::IndentationError { message: String::from("unindent does not match any outer indentation level") },
                self.position(),
            ));
        }

        Ok(())
    }
}

fn indentation_width(whitespace: &str) -> usize {
    whitespace.chars().fold(0, |width, ch| match ch {
        '\t' => width + 8 - (width % 8),
        ' ' | '\x0c' => width + 1,
        _ => width,
    })
}

fn matched_len(lexer: &Lexer, regex: &Regex) -> usize {
    regex.find(lexer.remainder()).map(|m| m.end()).unwrap_or(0)
}

fn newline_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = regex.find(lexer.remainder()).map(|m| m.as_str().to_string()).unwrap_or_default();

    if lexer.nesting > 0 {
        lexer.advance_n(matched.len());
        return Ok(());
    }

    lexer.end_logical_line();
    lexer.advance_n(matched.len());

    // Blank and comment-only lines never change the indentation level
    match lexer.at() {
        None | Some('\n') | Some('\r') | Some('#') => Ok(()),
        Some(_) => {
            let width = indentation_width(matched.trim_start_matches(['\r', '\n']));
            lexer.indent_to(width)
        }
    }
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = matched_len(lexer, regex);
    lexer.advance_n(matched);
    Ok(())
}

fn open_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    let kind = match lexer.at() {
        Some('(') => TokenKind::OpenParen,
        Some('[') => TokenKind::OpenBracket,
        _ => TokenKind::OpenCurly,
    };
    let value = lexer.remainder()[..1].to_string();

    let span = lexer.span_of(1);
    lexer.push(MK_TOKEN!(kind, value, span));
    lexer.nesting += 1;
    lexer.advance_n(1);
    Ok(())
}

fn close_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    let kind = match lexer.at() {
        Some(')') => TokenKind::CloseParen,
        Some(']') => TokenKind::CloseBracket,
        _ => TokenKind::CloseCurly,
    };
    let value = lexer.remainder()[..1].to_string();

    let span = lexer.span_of(1);
    lexer.push(MK_TOKEN!(kind, value, span));
    lexer.nesting = lexer.nesting.saturating_sub(1);
    lexer.advance_n(1);
    Ok(())
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = regex.find(lexer.remainder()).map(|m| m.as_str().to_string()).unwrap_or_default();
    let is_float = matched.contains(['.', 'e', 'E']);

    if !underscores_separate_digits(&matched) {
        return Err(Error::new(ErrorImpl::NumberParseError { token: matched }, lexer.position()));
    }
    let value = matched.replace('_', "");

    // Python rejects leading zeros on non-zero integer literals
    if !is_float && value.len() > 1 && value.starts_with('0') && value.chars().any(|ch| ch != '0') {
        return Err(Error::new(ErrorImpl::NumberParseError { token: matched }, lexer.position()));
    }

    let kind = if is_float { TokenKind::Float } else { TokenKind::Integer };
    let span = lexer.span_of(matched.len());
    lexer.push(MK_TOKEN!(kind, value, span));
    lexer.advance_n(matched.len());
    Ok(())
}

/// Every `_` in a number sits between two digits.
fn underscores_separate_digits(number: &str) -> bool {
    let bytes = number.as_bytes();

    bytes.iter().enumerate().all(|(index, byte)| {
        *byte != b'_'
            || (index > 0
                && bytes[index - 1].is_ascii_digit()
                && bytes.get(index + 1).is_some_and(u8::is_ascii_digit))
    })
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = regex.find(lexer.remainder()).map(|m| m.as_str().to_string()).unwrap_or_default();
    let string_literal = &matched[1..matched.len() - 1];

    let result = decode_escapes(string_literal).map_err(|message| {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed { token: matched.clone(), message },
            lexer.position(),
        )
    })?;

    let span = lexer.span_of(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::String, result, span));
    lexer.advance_n(matched.len());
    Ok(())
}

/// Reads exactly `count` hex digits as a code point.
fn hex_escape(chars: &mut Peekable<Chars>, count: usize, name: &str) -> Result<u32, String> {
    let mut hex = String::new();

    for _ in 0..count {
        match chars.peek() {
            Some(ch) if ch.is_ascii_hexdigit() => {
                hex.push(*ch);
                chars.next();
            }
            _ => return Err(format!("truncated \\{} escape", name)),
        }
    }

    u32::from_str_radix(&hex, 16).map_err(|_| format!("truncated \\{} escape", name))
}

fn code_point(value: u32) -> Result<char, String> {
    match char::from_u32(value) {
        Some(ch) => Ok(ch),
        None if (0xD800..=0xDFFF).contains(&value) => Err(String::from("surrogate code points are not supported")),
        None => Err(String::from("illegal Unicode character")),
    }
}

/// Decodes the backslash escapes of a string literal body.
///
/// Unknown escapes such as `\q` keep their backslash.
pub fn decode_escapes(literal: &str) -> Result<String, String> {
    let mut result = String::new();
    let mut chars = literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        let Some(&escape) = chars.peek() else {
            result.push(ch);
            break;
        };

        match escape {
            'n' => { result.push('\n'); chars.next(); }
            't' => { result.push('\t'); chars.next(); }
            'r' => { result.push('\r'); chars.next(); }
            'a' => { result.push('\u{07}'); chars.next(); }
            'b' => { result.push('\u{08}'); chars.next(); }
            'f' => { result.push('\u{0C}'); chars.next(); }
            'v' => { result.push('\u{0B}'); chars.next(); }
            '\\' | '"' | '\'' => { result.push(escape); chars.next(); }
            '0'..='7' => {
                let mut value = 0;
                for _ in 0..3 {
                    match chars.peek().and_then(|ch| ch.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                result.push(code_point(value)?);
            }
            'x' => {
                chars.next();
                result.push(code_point(hex_escape(&mut chars, 2, "xXX")?)?);
            }
            'u' => {
                chars.next();
                result.push(code_point(hex_escape(&mut chars, 4, "uXXXX")?)?);
            }
            'U' => {
                chars.next();
                result.push(code_point(hex_escape(&mut chars, 8, "UXXXXXXXX")?)?);
            }
            'N' => {
                chars.next();
                if chars.next() != Some('{') {
                    return Err(String::from("malformed \\N character escape"));
                }

                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') if !name.is_empty() => break,
                        Some('}') | None => return Err(String::from("malformed \\N character escape")),
                        Some(ch) => name.push(ch),
                    }
                }

                match unicode_names2::character(&name.to_uppercase()) {
                    Some(ch) => result.push(ch),
                    None => return Err(format!("unknown Unicode character name `{}`", name)),
                }
            }
            _ => result.push(ch),
        }
    }

    Ok(result)
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let value = regex.find(lexer.remainder()).map(|m| m.as_str().to_string()).unwrap_or_default();
    let kind = RESERVED_LOOKUP.get(value.as_str()).copied().unwrap_or(TokenKind::Identifier);

    let span = lexer.span_of(value.len());
    lexer.advance_n(value.len());
    lexer.push(MK_TOKEN!(kind, value, span));
    Ok(())
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    // The first logical line must start in column 0
    let leading = lex.remainder().len() - lex.remainder().trim_start_matches([' ', '\t', '\x0c']).len();
    if leading > 0 {
        let first = lex.remainder()[leading..].chars().next();
        if !matches!(first, None | Some('\n') | Some('\r') | Some('#')) {
            return Err(Error::new(ErrorImpl::IndentationError { message: String::from("unexpected indent") }, lex.position()));
        }
    }

    while !lex.at_eof() {
        let mut matched = false;

        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(lex.remainder()) {
                (pattern.handler)(&mut lex, &pattern.regex)?;
                matched = true;
                break;
            }
        }

        if !matched {
            let token = lex.at().map(String::from).unwrap_or_default();
            return Err(Error::new(ErrorImpl::UnrecognisedToken { token }, lex.position()));
        }
    }

    lex.end_logical_line();
    while lex.indent_stack.len() > 1 {
        lex.indent_stack.pop();
        let span = lex.span_of(0);
        lex.push(MK_TOKEN!(TokenKind::Dedent, String::from("<dedent>"), span));
    }

    let span = lex.span_of(0);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
    Ok(lex.tokens)
}
