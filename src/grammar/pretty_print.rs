use crowbook_text_processing::escape;
use serde::Serialize;

use super::first_follow::{FirstSets, FollowSets};
use super::ll1_parser::{ParseRun, ParseTree};
use super::ll1_table::LL1Table;
use super::{Grammar, EPSILON};

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize, multiline: bool) -> String {
        self.rights
            .iter()
            .map(|right| right.join(" "))
            .enumerate()
            .map(|(i, right)| {
                if i == 0 {
                    format!("{:>width$} -> {}", self.left, right, width = left_width)
                } else if multiline {
                    format!("{:>width$}  | {}", "", right, width = left_width)
                } else {
                    format!(" | {}", right)
                }
            })
            .collect::<Vec<_>>()
            .join(if multiline { "\n" } else { "" })
    }

    pub fn to_latex(&self, and_sign: bool) -> String {
        if self.rights.is_empty() {
            return String::new();
        }

        let left = if and_sign {
            format!("{} & \\rightarrow &", escape::tex(self.left))
        } else {
            format!("{} \\rightarrow ", escape::tex(self.left))
        };
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(|s| escape::tex(*s))
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        let output = left + &right;
        output.replace(EPSILON, "\\epsilon")
    }
}

#[derive(Serialize)]
pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .productions
            .iter()
            .map(|p| p.left.len())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len, true))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex(true)))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

impl Grammar {
    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let mut productions = Vec::new();
        for non_terminal in self.non_terminal_iter() {
            let rights = non_terminal
                .productions
                .iter()
                .map(|production| self.production_to_vec_str(production))
                .collect();
            productions.push(ProductionOutput {
                left: non_terminal.name.as_str(),
                rights,
            });
        }
        ProductionOutputVec { productions }
    }
}

#[derive(Serialize)]
struct FirstFollowOutput<'a> {
    name: &'a str,
    first: Vec<&'a str>,
    follow: Vec<&'a str>,
}

impl FirstFollowOutput<'_> {
    fn to_plaintext(&self) -> String {
        format!(
            "{} | {} | {}",
            self.name,
            self.first.join(", "),
            self.follow.join(", ")
        )
    }

    fn to_latex(&self) -> String {
        fn f(a: &Vec<&str>) -> String {
            a.iter()
                .map(|s| escape::tex(*s))
                .collect::<Vec<_>>()
                .join(r"\ ")
                .replace(EPSILON, r"$\epsilon$")
        }

        format!(
            "{} & {} & {}",
            escape::tex(self.name),
            f(&self.first),
            f(&self.follow)
        )
    }
}

#[derive(Serialize)]
pub struct FirstFollowOutputVec<'a> {
    data: Vec<FirstFollowOutput<'a>>,
}

impl FirstFollowOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| s.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }

    pub fn to_latex(&self) -> String {
        let content = self
            .data
            .iter()
            .map(|e| e.to_latex())
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{c|c|c}\n".to_string()
            + "Symbol & First & Follow\\\\\\hline\n"
            + &content
            + "\\\\\n\\end{tabular}"
    }
}

impl Grammar {
    pub fn to_first_follow_output_vec(
        &self,
        firsts: &FirstSets,
        follows: &FollowSets,
    ) -> FirstFollowOutputVec {
        let mut data = Vec::new();
        for non_terminal in self.non_terminal_iter() {
            let mut t = FirstFollowOutput {
                name: non_terminal.name.as_str(),
                first: firsts
                    .first(non_terminal.index)
                    .iter()
                    .map(|&idx| self.get_symbol_name(idx))
                    .collect(),
                follow: follows
                    .follow(non_terminal.index)
                    .iter()
                    .map(|&idx| self.get_symbol_name(idx))
                    .collect(),
            };
            t.first.sort();
            t.follow.sort();
            data.push(t);
        }
        FirstFollowOutputVec { data }
    }
}

#[derive(Serialize)]
struct LL1TableRow<'a> {
    non_terminal: &'a str,
    cells: Vec<Option<String>>,
}

#[derive(Serialize)]
pub struct LL1TableOutput<'a> {
    terminals: Vec<&'a str>,
    rows: Vec<LL1TableRow<'a>>,
}

impl LL1TableOutput<'_> {
    pub fn to_plaintext(&self) -> String {
        let mut header: Vec<String> = vec![String::new()];
        header.extend(self.terminals.iter().map(|&t| t.to_string()));
        let mut output: Vec<Vec<String>> = vec![header];
        for row in &self.rows {
            let mut line: Vec<String> = vec![row.non_terminal.to_string()];
            line.extend(
                row.cells
                    .iter()
                    .map(|cell| cell.clone().unwrap_or_default()),
            );
            output.push(line);
        }

        let mut width = vec![0; self.terminals.len() + 1];
        for j in 0..output[0].len() {
            width[j] = output.iter().map(|line| line[j].len()).max().unwrap();
        }
        output
            .iter()
            .map(|line| {
                line.iter()
                    .enumerate()
                    .map(|(i, s)| format!("{:>width$}", s, width = width[i]))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        let mut header: Vec<String> = vec![format!(
            "\\[\\begin{{array}}{{c{}}}\n",
            "|l".repeat(self.terminals.len()),
        )];
        header.extend(
            self.terminals
                .iter()
                .map(|&t| format!("\\text{{{}}}", escape::tex(t))),
        );
        let header = header.join(" & ");

        let mut output: Vec<String> = Vec::new();
        for row in &self.rows {
            let mut line: Vec<String> = vec![escape::tex(row.non_terminal).to_string()];
            line.extend(row.cells.iter().map(|cell| match cell {
                Some(cell) => escape::tex(cell)
                    .replace("->", "\\rightarrow")
                    .replace(EPSILON, "\\epsilon"),
                None => String::new(),
            }));
            output.push(line.join(" & "));
        }

        let output = output.join("\\\\\n");

        header + "\\\\\\hline\n" + &output + "\n\\end{array}\\]"
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

impl LL1Table {
    pub fn to_output<'a>(&self, grammar: &'a Grammar) -> LL1TableOutput<'a> {
        let terminals: Vec<&str> = self
            .lookaheads
            .iter()
            .map(|&idx| grammar.get_symbol_name(idx))
            .collect();

        let mut rows: Vec<LL1TableRow> = Vec::new();
        for &nt in &self.non_terminals {
            let cells = self
                .lookaheads
                .iter()
                .map(|&lookahead| {
                    self.production_for(nt, lookahead).map(|production| {
                        format!(
                            "{} -> {}",
                            grammar.get_symbol_name(nt),
                            grammar.production_to_vec_str(production).join(" ")
                        )
                    })
                })
                .collect();
            rows.push(LL1TableRow {
                non_terminal: grammar.get_symbol_name(nt),
                cells,
            });
        }

        LL1TableOutput { terminals, rows }
    }
}

#[derive(Serialize)]
pub struct ParseTreeOutput<'a> {
    symbol: &'a str,
    children: Vec<ParseTreeOutput<'a>>,
}

impl ParseTreeOutput<'_> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

impl ParseTree {
    pub fn to_output<'a>(&self, grammar: &'a Grammar) -> ParseTreeOutput<'a> {
        self.node_to_output(grammar, self.root())
    }

    fn node_to_output<'a>(&self, grammar: &'a Grammar, handle: usize) -> ParseTreeOutput<'a> {
        let node = self.node(handle);
        ParseTreeOutput {
            symbol: grammar.get_symbol_name(node.symbol),
            children: node
                .children
                .iter()
                .map(|&child| self.node_to_output(grammar, child))
                .collect(),
        }
    }

    pub fn to_plaintext(&self, grammar: &Grammar) -> String {
        let mut output = String::new();
        self.render_node(grammar, self.root(), "", true, &mut output);
        output
    }

    pub fn to_latex(&self, grammar: &Grammar) -> String {
        format!(
            "\\begin{{verbatim}}\n{}\\end{{verbatim}}",
            self.to_plaintext(grammar)
        )
    }

    fn render_node(
        &self,
        grammar: &Grammar,
        handle: usize,
        prefix: &str,
        is_last: bool,
        output: &mut String,
    ) {
        let node = self.node(handle);
        output.push_str(prefix);
        output.push_str(if is_last { "└── " } else { "├── " });
        output.push_str(grammar.get_symbol_name(node.symbol));
        output.push('\n');

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        for (i, &child) in node.children.iter().enumerate() {
            self.render_node(
                grammar,
                child,
                &child_prefix,
                i == node.children.len() - 1,
                output,
            );
        }
    }
}

#[derive(Serialize)]
pub struct ParseRunOutput<'a> {
    accepted: bool,
    error: Option<String>,
    trace: &'a [String],
    tree: ParseTreeOutput<'a>,
}

impl ParseRunOutput<'_> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}

impl ParseRun {
    pub fn to_output<'a>(&'a self, grammar: &'a Grammar) -> ParseRunOutput<'a> {
        ParseRunOutput {
            accepted: self.accepted(),
            error: self.outcome.as_ref().err().map(|e| e.to_string()),
            trace: &self.trace,
            tree: self.tree.to_output(grammar),
        }
    }

    pub fn to_plaintext(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        for (i, step) in self.trace.iter().enumerate() {
            lines.push(format!("{:>3}. {}", i + 1, step));
        }
        match &self.outcome {
            Ok(()) => lines.push("Input accepted".to_string()),
            Err(e) => lines.push(format!("Input rejected: {}", e)),
        }
        lines.join("\n")
    }

    pub fn to_latex(&self) -> String {
        format!("\\begin{{verbatim}}\n{}\n\\end{{verbatim}}", self.to_plaintext())
    }
}
