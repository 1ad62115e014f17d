pub mod error;
pub mod first_follow;
pub mod grammar;
pub mod left_recursion;
pub mod ll1_parser;
pub mod ll1_table;
pub mod parse;
pub mod pretty_print;

pub use error::GrammarError;
pub use first_follow::{FirstSets, FollowSets};
pub use grammar::Grammar;
pub use ll1_parser::{ParseRun, ParseTree};
pub use ll1_table::LL1Table;

pub const EPSILON: &str = "#";
pub const END_MARK: &str = "$";

/// All derived structures of one analysis run. Rebuilt from scratch whenever
/// the grammar changes; there is no incremental update path.
#[derive(Debug)]
pub struct Analysis {
    pub grammar: Grammar,
    pub firsts: FirstSets,
    pub follows: FollowSets,
    pub table: LL1Table,
}

pub fn analyze(
    rules: &str,
    non_terminals: &[&str],
    terminals: &[&str],
) -> Result<Analysis, GrammarError> {
    let grammar = Grammar::parse(rules, non_terminals, terminals)?;
    grammar.detect_left_recursion()?;
    let firsts = FirstSets::compute(&grammar);
    let follows = FollowSets::compute(&grammar, &firsts);
    let table = LL1Table::build(&grammar, &firsts, &follows)?;
    Ok(Analysis {
        grammar,
        firsts,
        follows,
        table,
    })
}

impl Analysis {
    pub fn parse_input(&self, input: &str) -> Result<ParseRun, GrammarError> {
        self.table.parse_input(&self.grammar, input)
    }
}
