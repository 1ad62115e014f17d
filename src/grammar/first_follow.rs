use std::collections::{HashMap, HashSet};

use super::grammar::{Symbol, END_MARK_IDX, EPSILON_IDX};
use crate::grammar::Grammar;

/// FIRST sets of every declared non-terminal, keyed by symbol index.
/// Terminals are their own FIRST set and are not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstSets {
    sets: HashMap<usize, HashSet<usize>>,
}

impl FirstSets {
    pub fn compute(grammar: &Grammar) -> Self {
        let mut sets: HashMap<usize, HashSet<usize>> = HashMap::new();
        for nt in grammar.non_terminal_iter() {
            Self::first_of(grammar, &mut sets, nt.index, 0);
        }
        FirstSets { sets }
    }

    fn first_of(
        grammar: &Grammar,
        memo: &mut HashMap<usize, HashSet<usize>>,
        symbol: usize,
        depth: usize,
    ) -> HashSet<usize> {
        // bounded once left recursion has been rejected
        assert!(
            depth <= grammar.symbols.len(),
            "FIRST recursion deeper than the symbol count"
        );

        if let Some(first) = memo.get(&symbol) {
            return first.clone();
        }
        let nt = match &grammar.symbols[symbol] {
            Symbol::NonTerminal(nt) => nt,
            _ => return HashSet::from([symbol]),
        };

        // seeded before the scan so a nullable-prefix cycle sees a partial
        // set instead of recursing forever
        memo.insert(symbol, HashSet::new());

        let mut first: HashSet<usize> = HashSet::new();
        for production in &nt.productions {
            if production[..] == [EPSILON_IDX] {
                first.insert(EPSILON_IDX);
                continue;
            }
            let mut nullable_prefix = true;
            for &s in production {
                let s_first = Self::first_of(grammar, memo, s, depth + 1);
                let has_epsilon = s_first.contains(&EPSILON_IDX);
                first.extend(s_first.into_iter().filter(|&i| i != EPSILON_IDX));
                if !has_epsilon {
                    nullable_prefix = false;
                    break;
                }
            }
            if nullable_prefix {
                first.insert(EPSILON_IDX);
            }
        }
        memo.insert(symbol, first.clone());
        first
    }

    /// FIRST of a single grammar symbol.
    pub fn first(&self, symbol: usize) -> HashSet<usize> {
        match self.sets.get(&symbol) {
            Some(set) => set.clone(),
            None => HashSet::from([symbol]),
        }
    }

    pub fn contains_epsilon(&self, symbol: usize) -> bool {
        symbol == EPSILON_IDX || self.sets.get(&symbol).map_or(false, |s| s.contains(&EPSILON_IDX))
    }

    /// FIRST of a symbol sequence: the left-to-right scan shared by the
    /// FOLLOW engine and the table builder. Epsilon is included exactly when
    /// every symbol of the sequence is nullable.
    pub fn first_of_production(&self, production: &[usize]) -> HashSet<usize> {
        let mut first: HashSet<usize> = HashSet::new();
        for &s in production {
            let s_first = self.first(s);
            let has_epsilon = s_first.contains(&EPSILON_IDX);
            first.extend(s_first.into_iter().filter(|&i| i != EPSILON_IDX));
            if !has_epsilon {
                return first;
            }
        }
        first.insert(EPSILON_IDX);
        first
    }
}

/// FOLLOW sets of every declared non-terminal, keyed by symbol index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowSets {
    sets: HashMap<usize, HashSet<usize>>,
}

impl FollowSets {
    pub fn compute(grammar: &Grammar, firsts: &FirstSets) -> Self {
        let mut sets: HashMap<usize, HashSet<usize>> = grammar
            .non_terminal_iter()
            .map(|nt| (nt.index, HashSet::new()))
            .collect();
        if let Some(start) = grammar.start_symbol {
            sets.get_mut(&start).unwrap().insert(END_MARK_IDX);
        }

        let mut changed = true;
        while changed {
            changed = false;
            for left in grammar.non_terminal_iter() {
                for production in &left.productions {
                    for (i, &symbol) in production.iter().enumerate() {
                        if grammar.symbols[symbol].non_terminal().is_none() {
                            continue;
                        }

                        let mut addition: HashSet<usize> = HashSet::new();
                        if i + 1 < production.len() {
                            let next_first = firsts.first(production[i + 1]);
                            let next_nullable = next_first.contains(&EPSILON_IDX);
                            addition
                                .extend(next_first.into_iter().filter(|&s| s != EPSILON_IDX));
                            if next_nullable {
                                addition.extend(sets[&left.index].iter().cloned());
                            }
                        } else {
                            addition.extend(sets[&left.index].iter().cloned());
                        }

                        let follow = sets.get_mut(&symbol).unwrap();
                        let before = follow.len();
                        follow.extend(addition);
                        if follow.len() > before {
                            changed = true;
                        }
                    }
                }
            }
        }

        FollowSets { sets }
    }

    /// FOLLOW of a non-terminal; empty for anything else.
    pub fn follow(&self, symbol: usize) -> HashSet<usize> {
        self.sets.get(&symbol).cloned().unwrap_or_default()
    }
}
