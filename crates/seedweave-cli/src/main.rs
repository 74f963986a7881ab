//! Seedweave inspection binary.
//!
//! Regenerates derived values from a seed so they can be compared across
//! machines or implementations without shipping the values themselves.
//!
//! # Usage
//!
//! ```bash
//! # 8x8 invertible matrix for label "m1"
//! seedweave --seed 00000000000000000000000000000000 --name test matrix --label m1 --size 8
//!
//! # Seed from the environment, 64 raw keystream bytes
//! SEEDWEAVE_SEED=000102030405060708090a0b0c0d0e0f seedweave stream --label iv --len 64
//! ```

use std::io::Write;

use clap::{Parser, Subcommand};
use seedweave_core::{ByteStream, Matrix, RandomError, RandomSource, Shuffle, StreamSource};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Seedweave deterministic generator
#[derive(Parser, Debug)]
#[command(name = "seedweave")]
#[command(about = "Regenerate seed-derived permutations, matrices, and sequences")]
#[command(version)]
struct Args {
    /// Seed as 32 hex characters
    #[arg(long, env = "SEEDWEAVE_SEED", hide_env_values = true)]
    seed: String,

    /// Generator name bound into every derivation
    #[arg(long, default_value = "seedweave")]
    name: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Raw keystream bytes as hex
    Stream {
        /// Label selecting the stream
        #[arg(long)]
        label: String,
        /// Number of bytes to print
        #[arg(long, default_value_t = 32)]
        len: usize,
    },
    /// Permutation of 0..16
    Shuffle {
        /// Label selecting the permutation
        #[arg(long)]
        label: String,
    },
    /// Invertible GF(2) matrix, one row of bits per line
    Matrix {
        /// Label selecting the matrix
        #[arg(long)]
        label: String,
        /// Dimension in bits
        #[arg(long, default_value_t = 128)]
        size: usize,
    },
    /// Non-negative integers with an exact sum
    Dirichlet {
        /// Label selecting the sequence
        #[arg(long)]
        label: String,
        /// Number of entries
        #[arg(long)]
        length: usize,
        /// Target sum
        #[arg(long)]
        sum: usize,
    },
    /// Non-decreasing integers ending at a maximum
    Monotone {
        /// Label selecting the sequence
        #[arg(long)]
        label: String,
        /// Number of entries
        #[arg(long)]
        length: usize,
        /// Final value
        #[arg(long)]
        max: usize,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("seed is not valid hex: {0}")]
    SeedHex(#[from] hex::FromHexError),

    #[error(transparent)]
    Random(#[from] RandomError),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut generator = open_generator(&args.name, &args.seed)?;
    tracing::debug!(name = %args.name, command = ?args.command, "generator ready");

    let output = run(&mut generator, &args.command)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;

    Ok(())
}

fn open_generator(name: &str, seed_hex: &str) -> Result<RandomSource, CliError> {
    let seed = hex::decode(seed_hex.trim())?;
    Ok(RandomSource::new(name, &seed)?)
}

fn run<S: StreamSource>(
    generator: &mut RandomSource<S>,
    command: &Command,
) -> Result<String, CliError> {
    let output = match command {
        Command::Stream { label, len } => {
            let mut bytes = vec![0u8; *len];
            generator.stream(label.as_bytes()).fill(&mut bytes);
            hex::encode(bytes)
        },
        Command::Shuffle { label } => render_shuffle(&generator.shuffle(label.as_bytes())),
        Command::Matrix { label, size } => {
            render_matrix(&generator.matrix(label.as_bytes(), *size))
        },
        Command::Dirichlet { label, length, sum } => {
            render_sequence(&generator.dirichlet(label.as_bytes(), *length, *sum)?)
        },
        Command::Monotone { label, length, max } => {
            render_sequence(&generator.monotone(label.as_bytes(), *length, *max)?)
        },
    };

    Ok(output)
}

fn render_shuffle(shuffle: &Shuffle) -> String {
    render_sequence(&shuffle.as_array().map(usize::from))
}

fn render_matrix(matrix: &Matrix) -> String {
    (0..matrix.size())
        .map(|i| {
            (0..matrix.size()).map(|j| if matrix.get(i, j) { '1' } else { '0' }).collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_sequence(values: &[usize]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ZERO_SEED: &str = "00000000000000000000000000000000";

    #[test]
    fn render_identity_shuffle() {
        insta::assert_snapshot!(render_shuffle(&Shuffle::identity()), @"0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15");
    }

    #[test]
    fn render_identity_matrix() {
        insta::assert_snapshot!(render_matrix(&Matrix::identity(4)), @r"
        1000
        0100
        0010
        0001
        ");
    }

    #[test]
    fn render_sequence_space_separated() {
        insta::assert_snapshot!(render_sequence(&[0, 12, 12, 300]), @"0 12 12 300");
    }

    #[test]
    fn open_generator_rejects_bad_hex() {
        let err = open_generator("test", "zz").unwrap_err();
        assert!(matches!(err, CliError::SeedHex(_)));
    }

    #[test]
    fn open_generator_rejects_short_seed() {
        let err = open_generator("test", "0011").unwrap_err();
        assert!(matches!(err, CliError::Random(RandomError::Crypto(_))));
        assert_eq!(err.to_string(), "invalid key length: expected 16, got 2");
    }

    #[test]
    fn run_matches_library_calls() {
        let mut cli = open_generator("test", ZERO_SEED).unwrap();
        let mut lib = RandomSource::new("test", &[0u8; 16]).unwrap();

        let output = run(&mut cli, &Command::Matrix { label: "m1".to_string(), size: 8 }).unwrap();
        assert_eq!(output, render_matrix(&lib.matrix(b"m1", 8)));

        let output = run(&mut cli, &Command::Stream { label: "m1".to_string(), len: 20 }).unwrap();
        assert_eq!(output, hex::encode(lib.stream(b"m1").take_bytes(20)));
    }

    #[test]
    fn run_monotone_ends_at_max() {
        let mut generator = open_generator("test", ZERO_SEED).unwrap();
        let command = Command::Monotone { label: "f".to_string(), length: 5, max: 90 };

        let output = run(&mut generator, &command).unwrap();

        assert!(output.ends_with(" 90"));
        assert_eq!(output.split(' ').count(), 5);
    }

    #[test]
    fn run_reports_empty_distribution() {
        let mut generator = open_generator("test", ZERO_SEED).unwrap();
        let command = Command::Dirichlet { label: "d".to_string(), length: 0, sum: 3 };

        let err = run(&mut generator, &command).unwrap_err();
        assert!(matches!(err, CliError::Random(RandomError::EmptyDistribution { sum: 3 })));
    }

    #[test]
    fn parses_subcommand_arguments() {
        let args = Args::try_parse_from([
            "seedweave", "--seed", ZERO_SEED, "--name", "test", "matrix", "--label", "m1", "--size",
            "8",
        ])
        .unwrap();

        assert_eq!(args.name, "test");
        assert_eq!(args.command, Command::Matrix { label: "m1".to_string(), size: 8 });
    }

    #[test]
    fn matrix_size_defaults_to_aes_block() {
        let args =
            Args::try_parse_from(["seedweave", "--seed", ZERO_SEED, "matrix", "--label", "m"])
                .unwrap();

        assert_eq!(args.name, "seedweave");
        assert_eq!(args.command, Command::Matrix { label: "m".to_string(), size: 128 });
    }
}
