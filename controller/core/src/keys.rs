//! Keys and Actions
//!
//! The keypad vocabulary shared by every surface. A [`Key`] is something a
//! user can press on the keypad; an [`Action`] is what the input buffer does
//! about it.
//!
//! Every mapping in this module is an exhaustive `match`, so adding a key
//! without deciding what it does is a compile error rather than a key that
//! silently does nothing.

use serde::{Deserialize, Serialize};

/// Binary and postfix operators on the keypad
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `×`
    Multiply,
    /// `÷`
    Divide,
    /// `^`
    Power,
    /// `%`
    Percent,
}

impl Operator {
    /// Token appended to the expression
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Power => "^",
            Self::Percent => "%",
        }
    }
}

/// Function-call prefixes on the scientific keypad
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Function {
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
    /// Base-10 logarithm
    Log,
    /// Natural logarithm
    Ln,
    /// Square root
    Sqrt,
}

impl Function {
    /// Token appended to the expression, including the opening parenthesis
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Sin => "sin(",
            Self::Cos => "cos(",
            Self::Tan => "tan(",
            Self::Log => "log(",
            Self::Ln => "ln(",
            Self::Sqrt => "√(",
        }
    }

    /// Keypad label (without the parenthesis)
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Sqrt => "√",
        }
    }
}

/// Named constants on the scientific keypad
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constant {
    /// π
    Pi,
    /// Euler's number
    E,
}

impl Constant {
    /// Token appended to the expression
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Pi => "π",
            Self::E => "e",
        }
    }
}

/// A key on the calculator keypad
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A decimal digit (0-9)
    Digit(u8),
    /// Decimal point
    Decimal,
    /// An operator
    Operator(Operator),
    /// A function prefix
    Function(Function),
    /// A constant
    Constant(Constant),
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `AC`: clear everything
    Clear,
    /// `DEL`: delete the last character
    Delete,
    /// `=`: evaluate
    Equals,
}

impl Key {
    /// Text shown on the keypad button
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.token().to_string(),
            Self::Function(f) => f.label().to_string(),
            Self::Constant(c) => c.token().to_string(),
            Self::OpenParen => "(".to_string(),
            Self::CloseParen => ")".to_string(),
            Self::Clear => "AC".to_string(),
            Self::Delete => "DEL".to_string(),
            Self::Equals => "=".to_string(),
        }
    }

    /// The buffer action performed when this key is pressed
    #[must_use]
    pub fn action(self) -> Action {
        match self {
            Self::Digit(d) => Action::Append(d.min(9).to_string()),
            Self::Decimal => Action::Append(".".to_string()),
            Self::Operator(op) => Action::Append(op.token().to_string()),
            Self::Function(f) => Action::Append(f.token().to_string()),
            Self::Constant(c) => Action::Append(c.token().to_string()),
            Self::OpenParen => Action::Append("(".to_string()),
            Self::CloseParen => Action::Append(")".to_string()),
            Self::Clear => Action::Clear,
            Self::Delete => Action::DeleteLast,
            Self::Equals => Action::Evaluate,
        }
    }
}

/// An edit applied to the input buffer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Reset the buffer to `"0"`
    Clear,
    /// Remove the last character (or clear when a reset is pending)
    DeleteLast,
    /// Send the buffer to the evaluation service
    Evaluate,
    /// Mark the whole buffer for overwrite without changing it
    SelectAll,
    /// Append an opaque token
    Append(String),
}

impl Action {
    /// Resolve a typed character to an action
    ///
    /// Mirrors the keyboard shortcuts of the keypad: `*` and `/` map to the
    /// keypad's `×` and `÷`, and `s`, `c`, `t`, `l` type function prefixes.
    /// Returns `None` for characters with no binding.
    #[must_use]
    pub fn from_key_char(c: char) -> Option<Self> {
        let key = match c {
            '0'..='9' => Key::Digit(c as u8 - b'0'),
            '.' => Key::Decimal,
            '+' => Key::Operator(Operator::Add),
            '-' => Key::Operator(Operator::Subtract),
            '*' => Key::Operator(Operator::Multiply),
            '/' => Key::Operator(Operator::Divide),
            '^' => Key::Operator(Operator::Power),
            '(' => Key::OpenParen,
            ')' => Key::CloseParen,
            's' => Key::Function(Function::Sin),
            'c' => Key::Function(Function::Cos),
            't' => Key::Function(Function::Tan),
            'l' => Key::Function(Function::Log),
            _ => return None,
        };
        Some(key.action())
    }

    /// Whether a sound cue accompanies this action
    ///
    /// Select-all is a silent gesture; every other edit clicks.
    #[must_use]
    pub fn plays_cue(&self) -> bool {
        match self {
            Self::SelectAll => false,
            Self::Clear | Self::DeleteLast | Self::Evaluate | Self::Append(_) => true,
        }
    }
}

/// Keypad arrangement
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// Digits and the four basic operators
    #[default]
    Standard,
    /// Standard keys plus functions, constants and parentheses
    Scientific,
}

impl Layout {
    /// Layout for the scientific toggle state
    #[must_use]
    pub fn from_scientific(scientific: bool) -> Self {
        if scientific {
            Self::Scientific
        } else {
            Self::Standard
        }
    }

    /// Whether this is the scientific layout
    #[must_use]
    pub fn is_scientific(self) -> bool {
        matches!(self, Self::Scientific)
    }

    /// Rows of keys, top to bottom
    #[must_use]
    pub fn rows(self) -> Vec<Vec<Key>> {
        use Key::{Clear, CloseParen, Decimal, Delete, Digit, Equals, OpenParen};
        use Operator::{Add, Divide, Multiply, Percent, Power, Subtract};

        let standard: [Vec<Key>; 5] = [
            vec![Clear, Delete, Key::Operator(Percent), Key::Operator(Divide)],
            vec![Digit(7), Digit(8), Digit(9), Key::Operator(Multiply)],
            vec![Digit(4), Digit(5), Digit(6), Key::Operator(Subtract)],
            vec![Digit(1), Digit(2), Digit(3), Key::Operator(Add)],
            vec![Digit(0), Decimal, Equals],
        ];

        match self {
            Self::Standard => standard.to_vec(),
            Self::Scientific => {
                let prefixes: [[Key; 2]; 5] = [
                    [Key::Function(Function::Sin), Key::Function(Function::Cos)],
                    [Key::Function(Function::Tan), Key::Function(Function::Log)],
                    [Key::Function(Function::Ln), Key::Function(Function::Sqrt)],
                    [Key::Constant(Constant::Pi), Key::Constant(Constant::E)],
                    [OpenParen, CloseParen],
                ];
                standard
                    .into_iter()
                    .zip(prefixes)
                    .enumerate()
                    .map(|(i, (row, prefix))| {
                        let mut keys = prefix.to_vec();
                        // The power key rides on the last row so every row keeps its width
                        if i == 4 {
                            keys.push(Key::Operator(Power));
                        }
                        keys.extend(row);
                        keys
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_bindings() {
        assert_eq!(Action::from_key_char('7'), Some(Action::Append("7".into())));
        assert_eq!(Action::from_key_char('.'), Some(Action::Append(".".into())));
        assert_eq!(Action::from_key_char('*'), Some(Action::Append("×".into())));
        assert_eq!(Action::from_key_char('/'), Some(Action::Append("÷".into())));
        assert_eq!(Action::from_key_char('s'), Some(Action::Append("sin(".into())));
        assert_eq!(Action::from_key_char('l'), Some(Action::Append("log(".into())));
        assert_eq!(Action::from_key_char(')'), Some(Action::Append(")".into())));
    }

    #[test]
    fn test_unbound_characters() {
        assert_eq!(Action::from_key_char('x'), None);
        assert_eq!(Action::from_key_char('='), None);
        assert_eq!(Action::from_key_char(' '), None);
    }

    #[test]
    fn test_key_actions() {
        assert_eq!(Key::Clear.action(), Action::Clear);
        assert_eq!(Key::Delete.action(), Action::DeleteLast);
        assert_eq!(Key::Equals.action(), Action::Evaluate);
        assert_eq!(
            Key::Function(Function::Sqrt).action(),
            Action::Append("√(".into())
        );
        assert_eq!(Key::Constant(Constant::Pi).action(), Action::Append("π".into()));
        assert_eq!(Key::Function(Function::Sqrt).label(), "√");
    }

    #[test]
    fn test_select_all_is_silent() {
        assert!(!Action::SelectAll.plays_cue());
        assert!(Action::Evaluate.plays_cue());
        assert!(Action::Append("1".into()).plays_cue());
    }

    #[test]
    fn test_layout_rows() {
        let standard = Layout::Standard.rows();
        assert_eq!(standard.len(), 5);
        assert_eq!(standard[0][0], Key::Clear);

        let scientific = Layout::Scientific.rows();
        assert_eq!(scientific.len(), 5);
        assert_eq!(scientific[0][0], Key::Function(Function::Sin));
        assert!(scientific[4].contains(&Key::Operator(Operator::Power)));
        assert!(!standard.iter().flatten().any(|k| matches!(k, Key::Function(_))));
    }

    #[test]
    fn test_layout_from_toggle() {
        assert_eq!(Layout::from_scientific(true), Layout::Scientific);
        assert_eq!(Layout::from_scientific(false), Layout::Standard);
        assert!(Layout::Scientific.is_scientific());
    }
}
