use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

/// Binary arithmetic and bitwise operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOperator {
    Add,
    Sub,
    Mult,
    MatMult,
    Div,
    FloorDiv,
    Mod,
    Pow,
    LShift,
    RShift,
    BitOr,
    BitXor,
    BitAnd,
}

impl BinOperator {
    pub fn from_token(kind: TokenKind) -> Option<BinOperator> {
        match kind {
            TokenKind::Plus | TokenKind::PlusEquals => Some(BinOperator::Add),
            TokenKind::Dash | TokenKind::MinusEquals => Some(BinOperator::Sub),
            TokenKind::Star | TokenKind::StarEquals => Some(BinOperator::Mult),
            TokenKind::At => Some(BinOperator::MatMult),
            TokenKind::Slash | TokenKind::SlashEquals => Some(BinOperator::Div),
            TokenKind::SlashSlash | TokenKind::SlashSlashEquals => Some(BinOperator::FloorDiv),
            TokenKind::Percent | TokenKind::PercentEquals => Some(BinOperator::Mod),
            TokenKind::StarStar | TokenKind::StarStarEquals => Some(BinOperator::Pow),
            TokenKind::LeftShift | TokenKind::LeftShiftEquals => Some(BinOperator::LShift),
            TokenKind::RightShift | TokenKind::RightShiftEquals => Some(BinOperator::RShift),
            TokenKind::Pipe | TokenKind::PipeEquals => Some(BinOperator::BitOr),
            TokenKind::Caret | TokenKind::CaretEquals => Some(BinOperator::BitXor),
            TokenKind::Ampersand | TokenKind::AmpersandEquals => Some(BinOperator::BitAnd),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinOperator::Add => "+",
            BinOperator::Sub => "-",
            BinOperator::Mult => "*",
            BinOperator::MatMult => "@",
            BinOperator::Div => "/",
            BinOperator::FloorDiv => "//",
            BinOperator::Mod => "%",
            BinOperator::Pow => "**",
            BinOperator::LShift => "<<",
            BinOperator::RShift => ">>",
            BinOperator::BitOr => "|",
            BinOperator::BitXor => "^",
            BinOperator::BitAnd => "&",
        }
    }
}

impl Display for BinOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    USub,
    UAdd,
    Invert,
    Not,
}

impl UnaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<UnaryOperator> {
        match kind {
            TokenKind::Dash => Some(UnaryOperator::USub),
            TokenKind::Plus => Some(UnaryOperator::UAdd),
            TokenKind::Tilde => Some(UnaryOperator::Invert),
            TokenKind::Not => Some(UnaryOperator::Not),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOperator {
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
}

impl CompareOperator {
    pub fn from_token(kind: TokenKind) -> Option<CompareOperator> {
        match kind {
            TokenKind::Equals => Some(CompareOperator::Eq),
            TokenKind::NotEquals => Some(CompareOperator::NotEq),
            TokenKind::Less => Some(CompareOperator::Lt),
            TokenKind::LessEquals => Some(CompareOperator::LtE),
            TokenKind::Greater => Some(CompareOperator::Gt),
            TokenKind::GreaterEquals => Some(CompareOperator::GtE),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOperator {
    And,
    Or,
}
