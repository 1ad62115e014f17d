use super::grammar::{END_MARK_IDX, EPSILON_IDX};
use super::{GrammarError, END_MARK, EPSILON};
use crate::grammar::Grammar;

impl Grammar {
    /// Builds a validated grammar from rule text and the declared
    /// non-terminal and terminal vocabularies. The start symbol is the left
    /// side of the first rule line.
    pub fn parse(
        rules: &str,
        non_terminals: &[&str],
        terminals: &[&str],
    ) -> Result<Self, GrammarError> {
        let mut g = Self::new();

        for name in non_terminals.iter().map(|s| s.trim()) {
            if name.is_empty() {
                continue;
            }
            if name == EPSILON || name == END_MARK {
                return Err(GrammarError::ReservedSymbol(name.to_string()));
            }
            if g.get_symbol_index(name).is_some() {
                return Err(GrammarError::DuplicateSymbol(name.to_string()));
            }
            g.add_non_terminal(name);
        }
        for name in terminals.iter().map(|s| s.trim()) {
            if name.is_empty() {
                continue;
            }
            if name == EPSILON || name == END_MARK {
                return Err(GrammarError::ReservedSymbol(name.to_string()));
            }
            if g.get_symbol_index(name).is_some() {
                return Err(GrammarError::DuplicateSymbol(name.to_string()));
            }
            g.add_terminal(name.to_string());
        }

        let mut raw_productions: Vec<(usize, usize, &str)> = Vec::new();

        let mut previous_left: Option<usize> = None;
        for (i, line) in rules.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let (left, rights): (usize, &str) = if let Some((left_str, rights)) =
                line.split_once("->")
            {
                let left_str = left_str.trim();
                if left_str.is_empty() {
                    return Err(GrammarError::MalformedRule {
                        line: i + 1,
                        message: "empty left side".to_string(),
                    });
                }
                if left_str.split_whitespace().count() != 1 {
                    return Err(GrammarError::MalformedRule {
                        line: i + 1,
                        message: "left side contains whitespace".to_string(),
                    });
                }
                let left = match g.get_symbol_index(left_str) {
                    Some(idx) if g.symbols[idx].non_terminal().is_some() => idx,
                    _ => return Err(GrammarError::UndefinedNonTerminal(left_str.to_string())),
                };
                (left, rights.trim())
            } else {
                let trimmed = line.trim();
                match (previous_left, trimmed.starts_with('|')) {
                    (Some(idx), true) => (idx, trimmed[1..].trim()),
                    _ => {
                        return Err(GrammarError::MalformedRule {
                            line: i + 1,
                            message: "cannot find left side".to_string(),
                        })
                    }
                }
            };

            previous_left = Some(left);
            if g.start_symbol.is_none() {
                g.start_symbol = Some(left);
            }

            raw_productions.push((i + 1, left, rights));
        }

        if raw_productions.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }

        for (line, left, rights) in raw_productions {
            for right in rights.split('|') {
                let mut symbols: Vec<usize> = Vec::new();
                for s in right.split_whitespace() {
                    match g.get_symbol_index(s) {
                        // the end marker is reserved for the parser and may
                        // not appear in a rule
                        Some(idx) if idx != END_MARK_IDX => symbols.push(idx),
                        _ => return Err(GrammarError::UndefinedSymbol(s.to_string())),
                    }
                }
                if symbols.is_empty() {
                    return Err(GrammarError::MalformedRule {
                        line,
                        message: "empty alternative".to_string(),
                    });
                }
                // the empty string is written as a lone epsilon
                if symbols.contains(&EPSILON_IDX) && symbols.len() > 1 {
                    return Err(GrammarError::MalformedRule {
                        line,
                        message: "epsilon must be the only symbol of its alternative"
                            .to_string(),
                    });
                }
                g.add_production(left, symbols);
            }
        }

        Ok(g)
    }
}
