use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::Parser;

use passrule::{ErrorKind, PassOptions, PasswordPolicy, Secret};

/// Generate random passwords that satisfy a set of rules.
///
/// Without any class flags or a policy, passwords use lowercase, uppercase, numbers and special
/// characters.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Length of each password. Overrides the policy's length.
    length: Option<usize>,
    /// Include the digits 0-9.
    #[arg(long)]
    numbers: bool,
    /// Include a-z.
    #[arg(long)]
    lowercase: bool,
    /// Include A-Z.
    #[arg(long)]
    uppercase: bool,
    /// Include special characters (!@#$%^&*()`=+-_).
    #[arg(long)]
    special: bool,
    /// Include a custom set of characters; may be given more than once.
    #[arg(long, value_name = "CHARS")]
    custom: Vec<String>,
    /// Reject passwords with two identical characters next to each other.
    #[arg(long)]
    no_repeats: bool,
    /// Reject passwords containing this text; may be given more than once.
    #[arg(long, value_name = "TEXT")]
    exclude: Vec<String>,
    /// How many passwords to try before giving up.
    #[arg(long)]
    iterations: Option<u32>,
    /// Number of passwords to generate.
    #[arg(long, default_value_t = 1)]
    count: usize,
    /// Read rules from a YAML policy file; flags add to it.
    #[arg(long)]
    policy: Option<PathBuf>,
    /// Print the passwords as a JSON array.
    #[arg(long)]
    json: bool,
}

const DEFAULT_LENGTH: usize = 16;

fn run() -> Result<(), ProgError> {
    env_logger::init();
    let args = Args::parse();

    let mut policy = match args.policy.as_ref() {
        Some(path) => load_policy(path)?,
        None => PasswordPolicy {
            length: DEFAULT_LENGTH,
            ..Default::default()
        },
    };
    merge_args(&mut policy, &args);
    if args.policy.is_none() && !has_classes(&policy) {
        policy.numbers = true;
        policy.lowercase = true;
        policy.uppercase = true;
        policy.special = true;
    }
    log::debug!("generating {} password(s) with {policy:?}", args.count);

    let options = policy.to_options();
    let passwords = (0..args.count)
        .map(|_| generate(&options))
        .collect::<Result<Vec<_>, _>>()?;
    print_passwords(&passwords, args.json).context("failed to write passwords to stdout")?;
    Ok(())
}

fn main() {
    match run() {
        Ok(()) => (),
        Err(ProgError::Other(err)) => {
            eprintln!("{err:?}");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

fn load_policy(path: &Path) -> anyhow::Result<PasswordPolicy> {
    let file = File::open(path)
        .with_context(|| format!("failed to open policy file {}", path.display()))?;
    PasswordPolicy::from_yaml(file)
        .with_context(|| format!("failed to parse policy file {}", path.display()))
}

fn merge_args(policy: &mut PasswordPolicy, args: &Args) {
    if let Some(length) = args.length {
        policy.length = length;
    }
    policy.numbers |= args.numbers;
    policy.lowercase |= args.lowercase;
    policy.uppercase |= args.uppercase;
    policy.special |= args.special;
    policy.custom.extend(args.custom.iter().cloned());
    policy.no_repeats |= args.no_repeats;
    policy.exclude.extend(args.exclude.iter().cloned());
    if args.iterations.is_some() {
        policy.iterations = args.iterations;
    }
}

fn has_classes(policy: &PasswordPolicy) -> bool {
    policy.numbers
        || policy.lowercase
        || policy.uppercase
        || policy.special
        || !policy.custom.is_empty()
}

fn generate(options: &PassOptions) -> Result<Secret, ProgError> {
    options.generate().map_err(|err| match err.kind() {
        ErrorKind::IterationsExhausted => ProgError::Exhausted(options.iterations()),
        ErrorKind::InvalidOptions => ProgError::InvalidOptions(err),
        ErrorKind::RandomSource => ProgError::Generation(err),
    })
}

fn print_passwords(passwords: &[Secret], json: bool) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer(&mut out, passwords)?;
        writeln!(out)?;
    } else {
        for password in passwords {
            writeln!(out, "{}", password.as_str())?;
        }
    }
    out.flush()?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error(
        "No password satisfied the rules within {0} attempts; relax the rules or raise --iterations."
    )]
    Exhausted(u32),
    #[error("Invalid password rules: {0}")]
    InvalidOptions(#[source] passrule::GenerationError),
    #[error("Password generation failed: {0}")]
    Generation(#[source] passrule::GenerationError),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}
