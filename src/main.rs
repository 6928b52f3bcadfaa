//! vibera - relational algebra query shell

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use vibera::config::{DEFAULT_HISTORY_CAPACITY, DEFAULT_MAX_DEPTH};
use vibera::command::StoreCommand;
use vibera::export::{render_table, to_csv, to_json};
use vibera::samples::load_samples;
use vibera::{EngineConfig, Relation, RelationStore, Session};

/// vibera - evaluate relational algebra expressions over in-memory relations
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file to seed the relation store from
    #[arg(long)]
    store: Option<PathBuf>,

    /// Load the ETUDIANT and COURS sample relations
    #[arg(long)]
    samples: bool,

    /// Evaluate one expression and exit
    #[arg(short, long)]
    expr: Option<String>,

    /// Output format for results
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Maximum expression nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Number of queries kept in the REPL history
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history: usize,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut store = match &args.store {
        Some(path) => RelationStore::load_json(path)?,
        None => RelationStore::new(),
    };
    if args.samples {
        load_samples(&mut store).context("Failed to load sample relations")?;
    }

    let config = EngineConfig::default()
        .with_max_depth(args.max_depth)
        .with_history_capacity(args.history);
    let mut session = Session::new(store, config);

    match &args.expr {
        Some(expr) => {
            let outcome = session.execute(expr)?;
            println!("{}", format_relation(&outcome.relation, args.format)?);
            Ok(())
        }
        None => run_repl(&mut session, args.format),
    }
}

fn format_relation(relation: &Relation, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Table => render_table(relation),
        OutputFormat::Csv => to_csv(relation),
        OutputFormat::Json => to_json(relation).context("Failed to serialize result")?,
    })
}

fn run_repl(session: &mut Session, format: OutputFormat) -> Result<()> {
    println!("vibera v{}", env!("CARGO_PKG_VERSION"));
    println!("Operators: σ[cond](R)  π[a, b](R)  ρ[name](R)  R ∪ S  R - S  R ⨝ S");
    println!("Commands: :relations  :history  :show <n>  :create  :insert  :update  :delete  :drop  :help  :quit");
    if session.relation_names().is_empty() {
        println!("The store is empty; start with --samples or --store <FILE>.");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("vibera> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("Failed to read input")?;
        let line = line.trim();

        match line {
            "" => continue,
            ":quit" | ":q" | ":exit" => break,
            ":help" => print_help(),
            ":relations" => print_relations(session),
            ":history" => print_history(session),
            _ if line.starts_with(":show") => {
                show_history_entry(session, line.trim_start_matches(":show"), format)?
            }
            _ if line.starts_with(':') => run_store_command(session, line),
            query => match session.execute(query) {
                Ok(outcome) => {
                    println!("{}", format_relation(&outcome.relation, format)?);
                    println!(
                        "{} tuple(s) in {:.2} ms",
                        outcome.relation.len(),
                        outcome.elapsed.as_secs_f64() * 1000.0
                    );
                }
                Err(e) => println!("Error: {}", e),
            },
        }
    }

    Ok(())
}

fn print_help() {
    println!("Expressions:");
    println!("  σ[Age > 21](ETUDIANT)          selection (also Select)");
    println!("  π[Nom, Ville](ETUDIANT)        projection (also Project)");
    println!("  ρ[E](ETUDIANT)                 rename (also Rename)");
    println!("  R ∪ S, R - S, R ⨝ S            union, difference, natural join");
    println!("  Binary operators split at the leftmost one: A ∪ B - C is A ∪ (B - C).");
    println!("Commands:");
    println!("  :relations    list stored relations");
    println!("  :history      list past queries, newest first");
    println!("  :show <n>     show the result of history entry n");
    println!("  :create NAME a, b            create an empty relation");
    println!("  :insert NAME v1, v2          append a tuple, values in column order");
    println!("  :update NAME i v1, v2        replace tuple i (0-based)");
    println!("  :delete NAME i               remove tuple i");
    println!("  :drop NAME                   remove a relation");
    println!("  :quit         leave");
}

fn run_store_command(session: &Session, line: &str) {
    let command = match StoreCommand::parse(line) {
        Ok(Some(command)) => command,
        Ok(None) => {
            println!("Unknown command: {}", line);
            return;
        }
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };

    let store = session.store();
    let result = command.apply(&mut store.write());
    match result {
        Ok(message) => println!("{}", message),
        Err(e) => println!("Error: {}", e),
    }
}

fn print_relations(session: &Session) {
    let store = session.store();
    let store = store.read();
    if store.is_empty() {
        println!("(no relations)");
        return;
    }
    for (name, relation) in store.iter() {
        let columns = store.columns(name).unwrap_or_default().join(", ");
        println!("{} ({}) - {} tuple(s)", name, columns, relation.len());
    }
}

fn print_history(session: &Session) {
    if session.history().is_empty() {
        println!("(no queries yet)");
        return;
    }
    for (i, entry) in session.history().iter().enumerate() {
        println!("[{}] {} - {} tuple(s)", i, entry.query, entry.result_count);
    }
}

fn show_history_entry(session: &Session, index: &str, format: OutputFormat) -> Result<()> {
    let Ok(index) = index.trim().parse::<usize>() else {
        println!("Usage: :show <n>");
        return Ok(());
    };
    match session.history().get(index) {
        Some(entry) => {
            println!("{}", entry.query);
            println!("{}", format_relation(&entry.relation, format)?);
        }
        None => println!("No history entry {}", index),
    }
    Ok(())
}
