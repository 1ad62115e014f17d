pub mod grammar;
use std::{fs, io::BufRead};

use grammar::{Analysis, GrammarError, ParseRun};

pub use grammar::Grammar;

fn print_help() {
    println!("Usage: ll1-parser-helper outputs [options] [grammar file]");
    println!("outputs:");
    println!("  prod: Productions");
    println!("  ff: FIRST and FOLLOW sets");
    println!("  table: LL(1) parsing table");
    println!("  parse: Derivation trace for the %input token string");
    println!("  tree: Parse tree for the %input token string");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
    println!();
    println!("The grammar file holds one rule per line (LHS -> alt | alt, '#' for");
    println!("epsilon) plus %nonterminals, %terminals and %input directive lines.");
}

struct GrammarDocument {
    rules: String,
    non_terminals: Vec<String>,
    terminals: Vec<String>,
    input: Option<String>,
}

fn parse_document(text: &str) -> GrammarDocument {
    let mut doc = GrammarDocument {
        rules: String::new(),
        non_terminals: Vec::new(),
        terminals: Vec::new(),
        input: None,
    };
    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("%nonterminals") {
            doc.non_terminals
                .extend(rest.split_whitespace().map(String::from));
        } else if let Some(rest) = trimmed.strip_prefix("%terminals") {
            doc.terminals
                .extend(rest.split_whitespace().map(String::from));
        } else if let Some(rest) = trimmed.strip_prefix("%input") {
            doc.input = Some(rest.trim().to_string());
        } else {
            doc.rules.push_str(line);
            doc.rules.push('\n');
        }
    }
    doc
}

fn run_parser(analysis: &Analysis, doc: &GrammarDocument) -> Result<ParseRun, GrammarError> {
    match &doc.input {
        Some(input) => analysis.parse_input(input),
        None => {
            eprintln!("No %input directive in the grammar document");
            std::process::exit(1);
        }
    }
}

fn main() {
    let mut outputs: Vec<&str> = Vec::new();
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let mut i: usize = 0;
    while i < args.len() && ["prod", "ff", "table", "parse", "tree"].contains(&args[i].as_str()) {
        outputs.push(args[i].as_str());
        i += 1;
    }

    enum OutputFormat {
        Plain,
        LaTeX,
        JSON,
    }
    let mut output_format = OutputFormat::Plain;

    while i < args.len() && ["-h", "--help", "-l", "-j"].contains(&args[i].as_str()) {
        if args[i] == "-h" || args[i] == "--help" {
            print_help();
            return;
        } else if args[i] == "-l" {
            output_format = OutputFormat::LaTeX;
        } else if args[i] == "-j" {
            output_format = OutputFormat::JSON;
        }
        i += 1;
    }

    if i + 1 < args.len() || outputs.is_empty() {
        print_help();
        return;
    }

    let input: String = if i == args.len() {
        std::io::stdin()
            .lock()
            .lines()
            .map(|l| l.unwrap())
            .collect::<Vec<String>>()
            .join("\n")
    } else {
        fs::read_to_string(args[i].as_str()).expect("Failed to read file")
    };

    let doc = parse_document(&input);
    let non_terminals: Vec<&str> = doc.non_terminals.iter().map(String::as_str).collect();
    let terminals: Vec<&str> = doc.terminals.iter().map(String::as_str).collect();

    let analysis = match grammar::analyze(&doc.rules, &non_terminals, &terminals) {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    for output in outputs {
        if output == "prod" {
            let t = analysis.grammar.to_production_output_vec();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json(),
                }
            );
        }
        if output == "ff" {
            let t = analysis
                .grammar
                .to_first_follow_output_vec(&analysis.firsts, &analysis.follows);
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json(),
                }
            );
        }
        if output == "table" {
            let t = analysis.table.to_output(&analysis.grammar);
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::JSON => t.to_json(),
                }
            );
        }
        if output == "parse" {
            match run_parser(&analysis, &doc) {
                Ok(run) => println!(
                    "{}",
                    match output_format {
                        OutputFormat::Plain => run.to_plaintext(),
                        OutputFormat::LaTeX => run.to_latex(),
                        OutputFormat::JSON => run.to_output(&analysis.grammar).to_json(),
                    }
                ),
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        if output == "tree" {
            match run_parser(&analysis, &doc) {
                Ok(run) => println!(
                    "{}",
                    match output_format {
                        OutputFormat::Plain => run.tree.to_plaintext(&analysis.grammar),
                        OutputFormat::LaTeX => run.tree.to_latex(&analysis.grammar),
                        OutputFormat::JSON => run.tree.to_output(&analysis.grammar).to_json(),
                    }
                ),
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
