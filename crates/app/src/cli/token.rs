use clap::{Args, Subcommand};
use guestgate::tokens::{DEFAULT_MAX_ATTEMPTS, TokenFormat, TokenGenerator};
use jiff::Timestamp;
use rustc_hash::FxHashSet;

#[derive(Debug, Args)]
pub(crate) struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommand,
}

#[derive(Debug, Subcommand)]
enum TokenSubcommand {
    /// Print unique sample tokens for a format
    Sample(SampleTokensArgs),
}

#[derive(Debug, Args)]
struct SampleTokensArgs {
    /// Token format: pin4, alnum6 or hex32
    #[arg(long, env = "TOKEN_FORMAT", default_value_t = TokenFormat::Alnum6)]
    format: TokenFormat,

    /// Number of tokens to print
    #[arg(long, default_value_t = 5)]
    count: usize,

    /// Random draws per token before falling back to a time-derived value
    #[arg(long, env = "TOKEN_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,
}

pub(crate) fn run(command: TokenCommand) -> Result<(), String> {
    match command.command {
        TokenSubcommand::Sample(args) => sample(&args),
    }
}

fn sample(args: &SampleTokensArgs) -> Result<(), String> {
    if args.count == 0 {
        return Err("count must be at least 1".to_string());
    }

    let generator = TokenGenerator::new(args.format).with_max_attempts(args.max_attempts);
    let mut issued = FxHashSet::default();

    for _ in 0..args.count {
        let token = generator.generate(&issued, Timestamp::now());

        println!("{token}");

        issued.insert(String::from(token));
    }

    Ok(())
}
