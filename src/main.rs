use anyhow::{Context, Result};
use clap::Parser;
use lfsr::{from_bits, read_binary_string, Feedback, Fibonacci, Galois, Register};
use num_bigint::BigUint;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Parses a non-negative integer written in decimal or with a `0b`, `0o` or
/// `0x` prefix. Underscores are ignored.
fn parse_uint(s: &str) -> Result<BigUint, String> {
    let s = s.trim().replace('_', "");
    let (digits, radix) = match s.get(..2) {
        Some("0b" | "0B") => (&s[2..], 2),
        Some("0o" | "0O") => (&s[2..], 8),
        Some("0x" | "0X") => (&s[2..], 16),
        _ => (s.as_str(), 10),
    };
    if digits.is_empty() {
        return Err(format!("missing digits in '{}'", s));
    }
    if radix == 2 {
        return read_binary_string(digits)
            .map(|bits| from_bits(&bits))
            .map_err(|e| e.to_string());
    }
    BigUint::parse_bytes(digits.as_bytes(), radix).ok_or_else(|| format!("invalid integer '{}'", s))
}

/// Parses `polynomial:state`.
fn parse_part(s: &str) -> Result<(BigUint, BigUint), String> {
    let (polynomial, state) = s
        .split_once(':')
        .ok_or_else(|| format!("expected polynomial:state, got '{}'", s))?;
    Ok((parse_uint(polynomial)?, parse_uint(state)?))
}

#[derive(clap::Parser)]
#[command(name = "lfsr", about = "Linear feedback shift register models")]
struct Cli {
    /// Feedback topology
    #[arg(long, value_enum, default_value_t = Model::Fibonacci, global = true)]
    model: Model,
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum Model {
    Fibonacci,
    Galois,
}

#[derive(clap::Subcommand)]
enum Command {
    #[command(name = "next")]
    Next {
        #[arg(value_parser = parse_uint)]
        poly: BigUint,
        /// Initial state; random and non-zero when omitted
        #[arg(value_parser = parse_uint)]
        state: Option<BigUint>,
    },
    #[command(name = "cycle")]
    Cycle {
        #[arg(value_parser = parse_uint)]
        poly: BigUint,
        rounds: u64,
        #[arg(value_parser = parse_uint)]
        state: Option<BigUint>,
    },
    #[command(name = "full-cycle")]
    FullCycle {
        #[arg(value_parser = parse_uint)]
        poly: BigUint,
        #[arg(value_parser = parse_uint)]
        state: Option<BigUint>,
    },
    #[command(name = "table")]
    Table {
        #[arg(value_parser = parse_uint)]
        poly: BigUint,
        #[arg(value_parser = parse_uint)]
        state: Option<BigUint>,
    },
    #[command(name = "algebraic")]
    Algebraic {
        #[arg(value_parser = parse_uint)]
        poly: BigUint,
    },
    /// Concatenates registers given as polynomial:state, first most significant
    #[command(name = "compose")]
    Compose {
        #[arg(value_parser = parse_part, required = true)]
        parts: Vec<(BigUint, BigUint)>,
    },
}

fn build<F: Feedback>(poly: BigUint, state: Option<BigUint>) -> Result<Register<F>> {
    let context = || format!("building {} register for {:#b}", F::NAME, poly);
    match state {
        Some(state) => Register::new(poly.clone(), state).with_context(context),
        None => {
            let mut register = Register::new(poly.clone(), 0u32).with_context(context)?;
            let state = register.randomize(&mut rand::thread_rng());
            info!(state = %register.state_bits(), value = %state, "picked random state");
            Ok(register)
        }
    }
}

fn run<F: Feedback>(command: Command) -> Result<()> {
    match command {
        Command::Next { poly, state } => {
            let mut register = build::<F>(poly, state)?;
            println!("{}", register.next());
        }
        Command::Cycle {
            poly,
            rounds,
            state,
        } => {
            let mut register = build::<F>(poly, state)?;
            println!("{}", register.cycle(rounds));
        }
        Command::FullCycle { poly, state } => {
            let mut register = build::<F>(poly, state)?;
            println!("{}", register.full_cycle());
        }
        Command::Table { poly, state } => {
            let mut register = build::<F>(poly, state)?;
            let table = register.state_table()?;
            print!("{}", table);
        }
        Command::Algebraic { poly } => {
            let register = build::<F>(poly, Some(BigUint::default()))?;
            println!("{}", register.algebraic());
        }
        Command::Compose { parts } => {
            let mut registers = parts
                .into_iter()
                .map(|(poly, state)| build::<F>(poly, Some(state)))
                .collect::<Result<Vec<_>>>()?;
            let composite = Register::from_registers(&mut registers)?;
            println!("polynomial = {:#b}", composite.polynomial());
            println!("state = {:#b}", composite.state());
            println!("field order = {}", composite.field_order());
            println!("{}", composite.algebraic());
        }
    }
    Ok(())
}

fn setup_tracing() -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let sub = Registry::default()
        .with(EnvFilter::from_default_env())
        .with(fmt_layer);
    tracing::subscriber::set_global_default(sub).context("setting tracing subscriber")
}

fn main() -> Result<()> {
    setup_tracing()?;
    let cli = Cli::parse();

    match cli.model {
        Model::Fibonacci => run::<Fibonacci>(cli.command),
        Model::Galois => run::<Galois>(cli.command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_uint() {
        assert_eq!(parse_uint("11").unwrap(), BigUint::from(11u32));
        assert_eq!(parse_uint("0b1011").unwrap(), BigUint::from(11u32));
        assert_eq!(parse_uint("0b0000_1011").unwrap(), BigUint::from(11u32));
        assert_eq!(parse_uint("0o13").unwrap(), BigUint::from(11u32));
        assert_eq!(parse_uint("0xb").unwrap(), BigUint::from(11u32));
        assert!(parse_uint("0b").is_err());
        assert!(parse_uint("0b102").is_err());
        assert!(parse_uint("-3").is_err());
    }

    #[test]
    fn test_parse_part() {
        assert_eq!(
            parse_part("0b1011:3").unwrap(),
            (BigUint::from(11u32), BigUint::from(3u32))
        );
        assert!(parse_part("0b1011").is_err());
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::parse_from(["lfsr", "--model", "galois", "cycle", "0b10011", "5", "1"]);
        assert_eq!(cli.model, Model::Galois);
        match cli.command {
            Command::Cycle {
                poly,
                rounds,
                state,
            } => {
                assert_eq!(poly, BigUint::from(0b10011u32));
                assert_eq!(rounds, 5);
                assert_eq!(state, Some(BigUint::from(1u32)));
            }
            _ => panic!("expected cycle"),
        }
    }

    #[test]
    fn test_build_random_state() {
        let register = build::<Galois>(BigUint::from(0b10011u32), None).unwrap();
        assert_ne!(register.initial_state(), BigUint::default());
    }

    #[test]
    fn test_run_rejects_wide_state() {
        let command = Command::Next {
            poly: BigUint::from(0b1011u32),
            state: Some(BigUint::from(0b10000u32)),
        };
        assert!(run::<Fibonacci>(command).is_err());
    }
}
