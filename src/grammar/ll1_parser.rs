use super::grammar::{Symbol, END_MARK_IDX, EPSILON_IDX};
use super::ll1_table::LL1Table;
use super::GrammarError;
use crate::grammar::Grammar;

/// One node of the concrete parse tree: a symbol label plus ordered
/// children. Nodes live in the arena owned by `ParseTree`; children are
/// arena handles, never shared pointers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTreeNode {
    pub symbol: usize,
    pub children: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    nodes: Vec<ParseTreeNode>,
}

impl ParseTree {
    fn new(root_symbol: usize) -> Self {
        Self {
            nodes: vec![ParseTreeNode {
                symbol: root_symbol,
                children: Vec::new(),
            }],
        }
    }

    fn push_node(&mut self, symbol: usize) -> usize {
        self.nodes.push(ParseTreeNode {
            symbol,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    fn attach(&mut self, parent: usize, child: usize) {
        self.nodes[parent].children.push(child);
    }

    pub fn root(&self) -> usize {
        0
    }

    pub fn node(&self, handle: usize) -> &ParseTreeNode {
        &self.nodes[handle]
    }
}

/// Outcome of one table-driven run. The trace and the (possibly partial)
/// tree are kept even when the input is rejected, so a failed run can still
/// be rendered step by step.
#[derive(Debug, PartialEq, Eq)]
pub struct ParseRun {
    pub trace: Vec<String>,
    pub tree: ParseTree,
    pub outcome: Result<(), GrammarError>,
}

impl ParseRun {
    pub fn accepted(&self) -> bool {
        self.outcome.is_ok()
    }
}

fn snapshot(grammar: &Grammar, stack: &[usize], buffer: &[usize]) -> String {
    let stack: Vec<&str> = stack.iter().map(|&s| grammar.get_symbol_name(s)).collect();
    let buffer: Vec<&str> = buffer.iter().map(|&s| grammar.get_symbol_name(s)).collect();
    format!(
        "Stack: [{}] | Buffer: [{}]",
        stack.join(" "),
        buffer.join(" ")
    )
}

impl LL1Table {
    /// Runs the stack/buffer machine over a space-separated token string,
    /// producing the derivation trace and the parse tree.
    pub fn parse_input(&self, grammar: &Grammar, input: &str) -> Result<ParseRun, GrammarError> {
        let start = match grammar.start_symbol {
            Some(start) => start,
            None => return Err(GrammarError::EmptyGrammar),
        };

        let mut buffer: Vec<usize> = Vec::new();
        for token in input.split_whitespace() {
            match grammar.get_symbol_index(token) {
                Some(idx) if grammar.symbols[idx].is_terminal() => buffer.push(idx),
                _ => return Err(GrammarError::UndefinedSymbol(token.to_string())),
            }
        }
        buffer.push(END_MARK_IDX);

        let mut tree = ParseTree::new(start);
        let mut stack: Vec<usize> = vec![END_MARK_IDX, start];
        // parallel to `stack`; the bottom end marker has no tree node
        let mut node_stack: Vec<Option<usize>> = vec![None, Some(tree.root())];
        let mut cursor: usize = 0;
        let mut trace: Vec<String> = Vec::new();

        let outcome = loop {
            trace.push(snapshot(grammar, &stack, &buffer[cursor..]));

            let top = *stack.last().unwrap();
            let head = buffer[cursor];

            if top == END_MARK_IDX && head == END_MARK_IDX {
                break Ok(());
            }

            if top == head {
                stack.pop();
                node_stack.pop();
                cursor += 1;
            } else if let Symbol::NonTerminal(nt) = &grammar.symbols[top] {
                let production = match self.production_for(top, head) {
                    Some(production) => production.clone(),
                    None => {
                        break Err(GrammarError::NoRuleFor {
                            non_terminal: nt.name.clone(),
                            lookahead: grammar.get_symbol_name(head).to_string(),
                        })
                    }
                };

                stack.pop();
                let parent = node_stack.pop().unwrap().unwrap();
                if production[..] == [EPSILON_IDX] {
                    let leaf = tree.push_node(EPSILON_IDX);
                    tree.attach(parent, leaf);
                } else {
                    let handles: Vec<usize> = production
                        .iter()
                        .map(|&symbol| {
                            let handle = tree.push_node(symbol);
                            tree.attach(parent, handle);
                            handle
                        })
                        .collect();
                    // reversed so the leftmost symbol ends up on top,
                    // preserving leftmost-derivation order
                    for (&symbol, &handle) in production.iter().zip(handles.iter()).rev() {
                        stack.push(symbol);
                        node_stack.push(Some(handle));
                    }
                }
            } else {
                break Err(GrammarError::TerminalMismatch {
                    expected: grammar.get_symbol_name(top).to_string(),
                    found: grammar.get_symbol_name(head).to_string(),
                });
            }
        };

        Ok(ParseRun {
            trace,
            tree,
            outcome,
        })
    }
}
