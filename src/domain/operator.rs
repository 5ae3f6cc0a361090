//! The closed set of IDS composition operators (U+2FF0..U+2FFF).

use std::fmt;

use crate::domain::error::{DomainError, DomainResult};

/// Ideographic description operator.
///
/// Each operator composes a fixed number of operand shapes. The set is
/// closed: sixteen symbols, arity 1, 2 or 3, not extensible at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    /// ⿰
    LeftRight,
    /// ⿱
    AboveBelow,
    /// ⿲
    LeftMiddleRight,
    /// ⿳
    AboveMiddleBelow,
    /// ⿴
    FullSurround,
    /// ⿵
    SurroundAbove,
    /// ⿶
    SurroundBelow,
    /// ⿷
    SurroundLeft,
    /// ⿸
    SurroundUpperLeft,
    /// ⿹
    SurroundUpperRight,
    /// ⿺
    SurroundLowerLeft,
    /// ⿻
    Overlaid,
    /// ⿼
    SurroundRight,
    /// ⿽
    SurroundLowerRight,
    /// ⿾
    Reflection,
    /// ⿿
    Rotation,
}

/// All operators, in code point order.
pub const ALL_OPERATORS: [Operator; 16] = [
    Operator::LeftRight,
    Operator::AboveBelow,
    Operator::LeftMiddleRight,
    Operator::AboveMiddleBelow,
    Operator::FullSurround,
    Operator::SurroundAbove,
    Operator::SurroundBelow,
    Operator::SurroundLeft,
    Operator::SurroundUpperLeft,
    Operator::SurroundUpperRight,
    Operator::SurroundLowerLeft,
    Operator::Overlaid,
    Operator::SurroundRight,
    Operator::SurroundLowerRight,
    Operator::Reflection,
    Operator::Rotation,
];

impl Operator {
    /// Look up an operator by its symbol.
    pub fn from_symbol(symbol: char) -> DomainResult<Self> {
        match symbol {
            '⿰' => Ok(Operator::LeftRight),
            '⿱' => Ok(Operator::AboveBelow),
            '⿲' => Ok(Operator::LeftMiddleRight),
            '⿳' => Ok(Operator::AboveMiddleBelow),
            '⿴' => Ok(Operator::FullSurround),
            '⿵' => Ok(Operator::SurroundAbove),
            '⿶' => Ok(Operator::SurroundBelow),
            '⿷' => Ok(Operator::SurroundLeft),
            '⿸' => Ok(Operator::SurroundUpperLeft),
            '⿹' => Ok(Operator::SurroundUpperRight),
            '⿺' => Ok(Operator::SurroundLowerLeft),
            '⿻' => Ok(Operator::Overlaid),
            '⿼' => Ok(Operator::SurroundRight),
            '⿽' => Ok(Operator::SurroundLowerRight),
            '⿾' => Ok(Operator::Reflection),
            '⿿' => Ok(Operator::Rotation),
            other => Err(DomainError::UnknownOperator(other)),
        }
    }

    /// True if `symbol` denotes one of the sixteen operators.
    pub fn is_symbol(symbol: char) -> bool {
        ('\u{2FF0}'..='\u{2FFF}').contains(&symbol)
    }

    /// The operator's symbol.
    pub fn symbol(&self) -> char {
        match self {
            Operator::LeftRight => '⿰',
            Operator::AboveBelow => '⿱',
            Operator::LeftMiddleRight => '⿲',
            Operator::AboveMiddleBelow => '⿳',
            Operator::FullSurround => '⿴',
            Operator::SurroundAbove => '⿵',
            Operator::SurroundBelow => '⿶',
            Operator::SurroundLeft => '⿷',
            Operator::SurroundUpperLeft => '⿸',
            Operator::SurroundUpperRight => '⿹',
            Operator::SurroundLowerLeft => '⿺',
            Operator::Overlaid => '⿻',
            Operator::SurroundRight => '⿼',
            Operator::SurroundLowerRight => '⿽',
            Operator::Reflection => '⿾',
            Operator::Rotation => '⿿',
        }
    }

    /// Number of operands the operator composes.
    ///
    /// The unary group (⿻ ⿾ ⿿) follows the source data convention, where
    /// overlay marks a single transformed shape rather than a pair.
    pub fn arity(&self) -> usize {
        match self {
            Operator::LeftMiddleRight | Operator::AboveMiddleBelow => 3,
            Operator::Overlaid | Operator::Reflection | Operator::Rotation => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case('⿰', 2)]
    #[case('⿱', 2)]
    #[case('⿴', 2)]
    #[case('⿺', 2)]
    #[case('⿽', 2)]
    #[case('⿲', 3)]
    #[case('⿳', 3)]
    #[case('⿻', 1)]
    #[case('⿾', 1)]
    #[case('⿿', 1)]
    fn given_operator_symbol_when_looking_up_then_returns_arity(
        #[case] symbol: char,
        #[case] expected: usize,
    ) {
        let op = Operator::from_symbol(symbol).unwrap();
        assert_eq!(op.arity(), expected);
        assert_eq!(op.symbol(), symbol);
    }

    #[test]
    fn given_unknown_symbol_when_looking_up_then_errors() {
        let err = Operator::from_symbol('木').unwrap_err();
        assert_eq!(err, DomainError::UnknownOperator('木'));
    }

    #[test]
    fn given_all_operators_when_counting_then_sixteen_known_symbols() {
        assert_eq!(ALL_OPERATORS.len(), 16);
        for op in ALL_OPERATORS {
            assert!(Operator::is_symbol(op.symbol()));
            assert_eq!(Operator::from_symbol(op.symbol()).unwrap(), op);
        }
    }
}
