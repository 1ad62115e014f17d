use std::collections::HashSet;

use super::GrammarError;
use crate::grammar::Grammar;

impl Grammar {
    /// Rejects grammars where some non-terminal can reappear as the leading
    /// symbol of its own derivation chain, directly or through other
    /// non-terminals. Such grammars would send the FIRST computation and the
    /// table-driven parser into a loop.
    pub fn detect_left_recursion(&self) -> Result<(), GrammarError> {
        for nt in self.non_terminal_iter() {
            let mut visited: HashSet<usize> = HashSet::new();
            if self.leading_cycle(nt.index, nt.index, &mut visited) {
                return Err(GrammarError::LeftRecursionDetected(nt.name.clone()));
            }
        }
        Ok(())
    }

    fn leading_cycle(&self, start: usize, current: usize, visited: &mut HashSet<usize>) -> bool {
        if !visited.insert(current) {
            // already explored in this search; a revisit is a dead end
            return false;
        }

        let nt = match self.symbols[current].non_terminal() {
            Some(nt) => nt,
            None => return false,
        };
        for production in &nt.productions {
            if let Some(&first) = production.first() {
                if first == start {
                    return true;
                }
                if self.symbols[first].non_terminal().is_some()
                    && self.leading_cycle(start, first, visited)
                {
                    return true;
                }
            }
        }
        false
    }
}
