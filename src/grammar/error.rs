use std::error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    MalformedRule { line: usize, message: String },
    EmptyGrammar,
    ReservedSymbol(String),
    DuplicateSymbol(String),
    UndefinedNonTerminal(String),
    UndefinedSymbol(String),
    LeftRecursionDetected(String),
    LL1Conflict { non_terminal: String, lookahead: String },
    NoRuleFor { non_terminal: String, lookahead: String },
    TerminalMismatch { expected: String, found: String },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::MalformedRule { line, message } => {
                write!(f, "Line {}: {}", line, message)
            }
            GrammarError::EmptyGrammar => write!(f, "Grammar contains no rules"),
            GrammarError::ReservedSymbol(name) => {
                write!(f, "Symbol name '{}' is reserved", name)
            }
            GrammarError::DuplicateSymbol(name) => {
                write!(f, "Symbol '{}' is declared more than once", name)
            }
            GrammarError::UndefinedNonTerminal(name) => {
                write!(f, "Undefined non-terminal: {}", name)
            }
            GrammarError::UndefinedSymbol(name) => write!(f, "Undefined symbol: {}", name),
            GrammarError::LeftRecursionDetected(name) => {
                write!(
                    f,
                    "Left recursion detected involving non-terminal: {}",
                    name
                )
            }
            GrammarError::LL1Conflict {
                non_terminal,
                lookahead,
            } => {
                write!(
                    f,
                    "Grammar is not LL(1): conflict at M[{}, {}]",
                    non_terminal, lookahead
                )
            }
            GrammarError::NoRuleFor {
                non_terminal,
                lookahead,
            } => write!(f, "No rule for ({}, {})", non_terminal, lookahead),
            GrammarError::TerminalMismatch { expected, found } => {
                write!(
                    f,
                    "Terminal mismatch: expected '{}', found '{}'",
                    expected, found
                )
            }
        }
    }
}

impl error::Error for GrammarError {}
