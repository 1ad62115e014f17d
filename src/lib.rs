extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

mod grammar;
pub use grammar::{analyze, Analysis, Grammar, GrammarError};

fn split_names(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[wasm_bindgen]
pub fn first_follow_to_json(rules: &str, non_terminals: &str, terminals: &str) -> String {
    match grammar::analyze(rules, &split_names(non_terminals), &split_names(terminals)) {
        Ok(a) => a
            .grammar
            .to_first_follow_output_vec(&a.firsts, &a.follows)
            .to_json(),
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}

#[wasm_bindgen]
pub fn ll1_table_to_json(rules: &str, non_terminals: &str, terminals: &str) -> String {
    match grammar::analyze(rules, &split_names(non_terminals), &split_names(terminals)) {
        Ok(a) => a.table.to_output(&a.grammar).to_json(),
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}

#[wasm_bindgen]
pub fn parse_input_to_json(
    rules: &str,
    non_terminals: &str,
    terminals: &str,
    input: &str,
) -> String {
    let a = match grammar::analyze(rules, &split_names(non_terminals), &split_names(terminals)) {
        Ok(a) => a,
        Err(e) => return format!("{{\"error\":\"{}\"}}", e),
    };
    match a.parse_input(input) {
        Ok(run) => run.to_output(&a.grammar).to_json(),
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}

#[cfg(test)]
mod parse_tests {
    use crate::grammar::GrammarError;
    use crate::Grammar;

    #[test]
    fn simple_parse() {
        let g = Grammar::parse("S -> a", &["S"], &["a"]).unwrap();

        let s = g.symbol_table.get("S").cloned().unwrap();
        let a = g.symbol_table.get("a").cloned().unwrap();

        assert_eq!(g.get_symbol_name(s), "S");
        assert_eq!(g.get_symbol_name(a), "a");
        assert_eq!(g.symbols[s].non_terminal().unwrap().productions[0], vec![a]);
        assert_eq!(g.start_symbol, Some(s));
    }

    #[test]
    fn alternatives_and_continuation_lines() {
        let g = Grammar::parse("S -> a\n | b c", &["S"], &["a", "b", "c"]).unwrap();

        let s = g.symbol_table["S"];
        let a = g.symbol_table["a"];
        let b = g.symbol_table["b"];
        let c = g.symbol_table["c"];

        assert_eq!(g.symbols[s].non_terminal().unwrap().productions[0], vec![a]);
        assert_eq!(
            g.symbols[s].non_terminal().unwrap().productions[1],
            vec![b, c]
        );
    }

    #[test]
    fn start_symbol_is_first_rule_left_side() {
        let g = Grammar::parse("B -> b\nA -> a B", &["A", "B"], &["a", "b"]).unwrap();
        assert_eq!(g.start_symbol, Some(g.symbol_table["B"]));
    }

    #[test]
    fn undefined_left_side() {
        let e = Grammar::parse("X -> a", &["S"], &["a"]).unwrap_err();
        assert_eq!(e, GrammarError::UndefinedNonTerminal("X".to_string()));
    }

    #[test]
    fn terminal_as_left_side() {
        let e = Grammar::parse("a -> a", &["S"], &["a"]).unwrap_err();
        assert_eq!(e, GrammarError::UndefinedNonTerminal("a".to_string()));
    }

    #[test]
    fn undefined_right_side_symbol() {
        let e = Grammar::parse("S -> a q", &["S"], &["a"]).unwrap_err();
        assert_eq!(e, GrammarError::UndefinedSymbol("q".to_string()));
    }

    #[test]
    fn end_marker_is_not_a_rule_symbol() {
        let e = Grammar::parse("S -> a $", &["S"], &["a"]).unwrap_err();
        assert_eq!(e, GrammarError::UndefinedSymbol("$".to_string()));
    }

    #[test]
    fn reserved_names_are_rejected() {
        let e = Grammar::parse("S -> a", &["S", "#"], &["a"]).unwrap_err();
        assert_eq!(e, GrammarError::ReservedSymbol("#".to_string()));

        let e = Grammar::parse("S -> a", &["S"], &["a", "$"]).unwrap_err();
        assert_eq!(e, GrammarError::ReservedSymbol("$".to_string()));
    }

    #[test]
    fn duplicate_declarations_are_rejected() {
        let e = Grammar::parse("S -> a", &["S", "S"], &["a"]).unwrap_err();
        assert_eq!(e, GrammarError::DuplicateSymbol("S".to_string()));

        let e = Grammar::parse("S -> a", &["S"], &["a", "S"]).unwrap_err();
        assert_eq!(e, GrammarError::DuplicateSymbol("S".to_string()));
    }

    #[test]
    fn malformed_rules() {
        assert!(matches!(
            Grammar::parse("-> a", &["S"], &["a"]).unwrap_err(),
            GrammarError::MalformedRule { line: 1, .. }
        ));
        assert!(matches!(
            Grammar::parse("S a -> b", &["S"], &["a", "b"]).unwrap_err(),
            GrammarError::MalformedRule { line: 1, .. }
        ));
        assert!(matches!(
            Grammar::parse("| a", &["S"], &["a"]).unwrap_err(),
            GrammarError::MalformedRule { line: 1, .. }
        ));
        assert!(matches!(
            Grammar::parse("S -> a |", &["S"], &["a"]).unwrap_err(),
            GrammarError::MalformedRule { line: 1, .. }
        ));
    }

    #[test]
    fn epsilon_must_stand_alone() {
        assert!(matches!(
            Grammar::parse("S -> a #", &["S"], &["a"]).unwrap_err(),
            GrammarError::MalformedRule { line: 1, .. }
        ));
    }

    #[test]
    fn empty_document() {
        let e = Grammar::parse("  \n  ", &["S"], &["a"]).unwrap_err();
        assert_eq!(e, GrammarError::EmptyGrammar);
    }
}

#[cfg(test)]
mod left_recursion_tests {
    use crate::grammar::GrammarError;
    use crate::Grammar;

    #[test]
    fn direct_left_recursion() {
        let g = Grammar::parse("A -> A x", &["A"], &["x"]).unwrap();
        assert_eq!(
            g.detect_left_recursion().unwrap_err(),
            GrammarError::LeftRecursionDetected("A".to_string())
        );
    }

    #[test]
    fn indirect_left_recursion() {
        let g = Grammar::parse("A -> B\nB -> A", &["A", "B"], &[]).unwrap();
        assert_eq!(
            g.detect_left_recursion().unwrap_err(),
            GrammarError::LeftRecursionDetected("A".to_string())
        );
    }

    #[test]
    fn right_recursion_is_fine() {
        let g = Grammar::parse("A -> x A | y", &["A"], &["x", "y"]).unwrap();
        assert!(g.detect_left_recursion().is_ok());
    }

    #[test]
    fn acyclic_leading_non_terminal_is_fine() {
        let g = Grammar::parse("A -> B x\nB -> y", &["A", "B"], &["x", "y"]).unwrap();
        assert!(g.detect_left_recursion().is_ok());
    }

    #[test]
    fn left_recursion_reported_before_any_table() {
        let e = crate::analyze("A -> A a | b", &["A"], &["a", "b"]).unwrap_err();
        assert_eq!(e, GrammarError::LeftRecursionDetected("A".to_string()));
    }
}

#[cfg(test)]
mod first_follow_tests {
    use std::collections::HashSet;

    use crate::grammar::{analyze, Analysis};
    use crate::Grammar;

    const EXPR_RULES: &str =
        "E -> T E'\nE' -> + T E' | #\nT -> F T'\nT' -> * F T' | #\nF -> ( E ) | id";
    const EXPR_NTS: [&str; 5] = ["E", "E'", "T", "T'", "F"];
    const EXPR_TS: [&str; 5] = ["+", "*", "(", ")", "id"];

    pub fn expr_analysis() -> Analysis {
        analyze(EXPR_RULES, &EXPR_NTS, &EXPR_TS).unwrap()
    }

    pub fn names(g: &Grammar, set: &HashSet<usize>) -> Vec<String> {
        let mut names: Vec<String> = set.iter().map(|&i| g.get_symbol_name(i).to_string()).collect();
        names.sort();
        names
    }

    #[test]
    fn first_sets_of_expression_grammar() {
        let a = expr_analysis();
        let g = &a.grammar;

        assert_eq!(names(g, &a.firsts.first(g.symbol_table["F"])), ["(", "id"]);
        assert_eq!(names(g, &a.firsts.first(g.symbol_table["E"])), ["(", "id"]);
        assert_eq!(names(g, &a.firsts.first(g.symbol_table["E'"])), ["#", "+"]);
        assert_eq!(names(g, &a.firsts.first(g.symbol_table["T'"])), ["#", "*"]);
    }

    #[test]
    fn first_of_terminal_is_itself() {
        let a = expr_analysis();
        let id = a.grammar.symbol_table["id"];
        assert_eq!(a.firsts.first(id), HashSet::from([id]));
    }

    #[test]
    fn epsilon_in_first_iff_nullable() {
        let a = analyze("S -> A B\nA -> #\nB -> #", &["S", "A", "B"], &[]).unwrap();
        let g = &a.grammar;
        // S derives the empty string through nullable symbols only
        assert!(a.firsts.contains_epsilon(g.symbol_table["S"]));
        assert!(a.firsts.contains_epsilon(g.symbol_table["A"]));

        let a = analyze("S -> A b\nA -> #", &["S", "A"], &["b"]).unwrap();
        let g = &a.grammar;
        assert!(!a.firsts.contains_epsilon(g.symbol_table["S"]));
    }

    #[test]
    fn follow_sets_of_expression_grammar() {
        let a = expr_analysis();
        let g = &a.grammar;

        assert_eq!(names(g, &a.follows.follow(g.symbol_table["E"])), ["$", ")"]);
        assert_eq!(names(g, &a.follows.follow(g.symbol_table["E'"])), ["$", ")"]);
        assert_eq!(
            names(g, &a.follows.follow(g.symbol_table["T"])),
            ["$", ")", "+"]
        );
        assert_eq!(
            names(g, &a.follows.follow(g.symbol_table["F"])),
            ["$", ")", "*", "+"]
        );
    }

    #[test]
    fn follow_of_start_contains_end_marker() {
        let a = analyze("S -> a", &["S"], &["a"]).unwrap();
        let g = &a.grammar;
        assert!(names(g, &a.follows.follow(g.symbol_table["S"])).contains(&"$".to_string()));
    }
}

#[cfg(test)]
mod ll1_table_tests {
    use super::first_follow_tests::expr_analysis;
    use crate::grammar::grammar::EPSILON_IDX;
    use crate::grammar::{analyze, GrammarError};

    #[test]
    fn expression_grammar_table_entries() {
        let a = expr_analysis();
        let g = &a.grammar;

        let e = g.symbol_table["E"];
        let e_prime = g.symbol_table["E'"];
        let id = g.symbol_table["id"];
        let plus = g.symbol_table["+"];
        let end = g.symbol_table["$"];

        assert_eq!(
            a.table.production_for(e, id),
            Some(&vec![g.symbol_table["T"], e_prime])
        );
        // nullable alternative lands in the FOLLOW cells
        assert_eq!(a.table.production_for(e_prime, end), Some(&vec![EPSILON_IDX]));
        assert_eq!(a.table.production_for(e, plus), None);
    }

    #[test]
    fn common_lookahead_is_a_conflict() {
        let e = analyze("S -> a | a b", &["S"], &["a", "b"]).unwrap_err();
        assert_eq!(
            e,
            GrammarError::LL1Conflict {
                non_terminal: "S".to_string(),
                lookahead: "a".to_string(),
            }
        );
    }

    #[test]
    fn nullable_prefix_recursion_surfaces_as_conflict() {
        // A -> B A with nullable B is not leading-symbol left recursion, but
        // the shared lookahead still rules the grammar out
        let e = analyze("A -> B A | x\nB -> #", &["A", "B"], &["x"]).unwrap_err();
        assert!(matches!(e, GrammarError::LL1Conflict { .. }));
    }
}
