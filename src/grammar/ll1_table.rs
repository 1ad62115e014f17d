use std::collections::HashMap;

use super::first_follow::{FirstSets, FollowSets};
use super::grammar::{END_MARK_IDX, EPSILON_IDX};
use super::GrammarError;
use crate::grammar::Grammar;

/// The LL(1) decision table: at most one production per
/// (non-terminal, lookahead) cell. Row and column key orders follow symbol
/// declaration order and are kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LL1Table {
    pub(crate) non_terminals: Vec<usize>,
    pub(crate) lookaheads: Vec<usize>,
    entries: HashMap<(usize, usize), Vec<usize>>,
}

impl LL1Table {
    pub fn build(
        grammar: &Grammar,
        firsts: &FirstSets,
        follows: &FollowSets,
    ) -> Result<Self, GrammarError> {
        let non_terminals: Vec<usize> = grammar.non_terminal_iter().map(|nt| nt.index).collect();
        let mut lookaheads: Vec<usize> = grammar.terminal_indices();
        lookaheads.push(END_MARK_IDX);

        let mut entries: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
        for nt in grammar.non_terminal_iter() {
            for production in &nt.productions {
                // for [#] the scan yields {#}, so the selection set becomes
                // FOLLOW(nt) exactly
                let mut selection = firsts.first_of_production(production);
                if selection.remove(&EPSILON_IDX) {
                    selection.extend(follows.follow(nt.index));
                }

                let mut selection: Vec<usize> = selection.into_iter().collect();
                selection.sort_unstable();
                for lookahead in selection {
                    if entries
                        .insert((nt.index, lookahead), production.clone())
                        .is_some()
                    {
                        return Err(GrammarError::LL1Conflict {
                            non_terminal: nt.name.clone(),
                            lookahead: grammar.get_symbol_name(lookahead).to_string(),
                        });
                    }
                }
            }
        }

        Ok(LL1Table {
            non_terminals,
            lookaheads,
            entries,
        })
    }

    pub fn production_for(&self, non_terminal: usize, lookahead: usize) -> Option<&Vec<usize>> {
        self.entries.get(&(non_terminal, lookahead))
    }
}
