//! Encodes one pseudo-Boolean constraint and prints the CNF in DIMACS format.
//!
//! Run with:
//! ```bash
//! cargo run --example pbenc -- "+2 x1 +3 x2 -4 ~x3 <= 4"
//! cargo run --example pbenc -- --strategy adder-network "1 x1 1 x2 1 x3 >= 2"
//! cargo run --example pbenc -- --max-clauses 10 --dot diagram.dot "3 x1 5 x2 2 x3 7 x4 = 9"
//! ```

use std::fs;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{bail, eyre, WrapErr};
use log::info;

use pb_bdd::bdd::BddEncoder;
use pb_bdd::config::{Construction, EncoderConfig, Strategy};
use pb_bdd::constraint::{Comparator, PbConstraint};
use pb_bdd::db::{Cnf, VarCounter};
use pb_bdd::dispatch::EncodingDispatcher;
use pb_bdd::types::{Lit, Var};

#[derive(Debug, Copy, Clone, ValueEnum)]
enum StrategyArg {
    AdderNetwork,
    BddUnlimited,
    BddLimited,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::AdderNetwork => Strategy::AdderNetwork,
            StrategyArg::BddUnlimited => Strategy::BddUnlimited,
            StrategyArg::BddLimited => Strategy::BddLimited,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Pseudo-Boolean constraint to DIMACS CNF")]
struct Cli {
    /// Constraint in OPB-like syntax, e.g. "+2 x1 -3 ~x2 <= 4"
    constraint: String,

    /// Strategy tried first
    #[arg(long, value_enum, default_value = "bdd-limited")]
    strategy: StrategyArg,

    /// Strategies tried after an overflow
    #[arg(long, value_enum, value_delimiter = ',', default_value = "adder-network")]
    fallback: Vec<StrategyArg>,

    /// Clause ceiling of the limited decision diagram
    #[arg(long, default_value = "1000000")]
    max_clauses: u64,

    /// Disable the monotone shortcut
    #[arg(long)]
    no_shortcut: bool,

    /// Use the recursive diagram construction
    #[arg(long)]
    recursive: bool,

    /// Write the decision diagram in DOT format to this file
    #[arg(long)]
    dot: Option<PathBuf>,
}

/// Parses `<coef> <lit> ... <op> <bound>`, literals written as `x3` or `~x3`.
fn parse_constraint(input: &str) -> color_eyre::Result<(PbConstraint, u32)> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let Some(op_pos) = tokens.iter().position(|t| matches!(*t, "<=" | ">=" | "=")) else {
        bail!("missing comparison operator in {:?}", input);
    };
    if op_pos + 2 != tokens.len() {
        bail!("expected a single bound after {:?}", tokens[op_pos]);
    }
    if op_pos % 2 != 0 {
        bail!("terms must be coefficient/literal pairs");
    }

    let mut max_var = 0;
    let mut terms = Vec::with_capacity(op_pos / 2);
    for pair in tokens[..op_pos].chunks(2) {
        let coef: i64 = pair[0]
            .parse()
            .wrap_err_with(|| format!("bad coefficient {:?}", pair[0]))?;
        let (negated, name) = match pair[1].strip_prefix('~') {
            Some(rest) => (true, rest),
            None => (false, pair[1]),
        };
        let id: u32 = name
            .strip_prefix('x')
            .ok_or_else(|| eyre!("bad literal {:?}", pair[1]))?
            .parse()
            .wrap_err_with(|| format!("bad literal {:?}", pair[1]))?;
        if id == 0 || id >= i32::MAX as u32 {
            bail!("variable {} out of range", id);
        }
        max_var = max_var.max(id);
        terms.push((Lit::new(Var::new(id), negated), coef));
    }

    let bound: i64 = tokens[op_pos + 1]
        .parse()
        .wrap_err_with(|| format!("bad bound {:?}", tokens[op_pos + 1]))?;
    let comparator = match tokens[op_pos] {
        "<=" => Comparator::Leq(bound),
        ">=" => Comparator::Geq(bound),
        _ => Comparator::Eq(bound),
    };
    Ok((PbConstraint::new(terms, comparator)?, max_var))
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let cli = Cli::parse();
    let (constraint, max_var) = parse_constraint(&cli.constraint)?;
    info!("constraint: {}", constraint);

    let construction = if cli.recursive {
        Construction::Recursive
    } else {
        Construction::Iterative
    };
    let config = EncoderConfig::default()
        .with_strategy(cli.strategy.into())
        .with_fallback_order(cli.fallback.iter().map(|&s| Strategy::from(s)))
        .with_max_clauses(cli.max_clauses)
        .with_monotonic_shortcut(!cli.no_shortcut)
        .with_construction(construction);

    if let Some(path) = &cli.dot {
        let diagram = BddEncoder::from_config(&config, false).build_diagram(&constraint);
        info!(
            "diagram: {} gates reachable, {} models",
            diagram.size(),
            diagram.sat_count()
        );
        fs::write(path, diagram.to_dot()?).wrap_err_with(|| format!("cannot write {}", path.display()))?;
        info!("wrote {}", path.display());
    }

    let time_encode = std::time::Instant::now();
    let mut vars = VarCounter::new(max_var);
    let mut cnf = Cnf::new();
    let mut dispatcher = EncodingDispatcher::new(config);
    let used = dispatcher.encode(&constraint, &mut cnf, &mut vars)?;
    info!(
        "encoded with {} in {:.3}s: {} clauses, {} aux vars (attempts: {:?})",
        used,
        time_encode.elapsed().as_secs_f64(),
        cnf.len(),
        vars.max_var() - max_var,
        dispatcher.attempts()
    );

    print!("{}", cnf.to_dimacs(vars.max_var())?);
    Ok(())
}
