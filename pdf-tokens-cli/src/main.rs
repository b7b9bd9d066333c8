use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdf_tokens::tokens::encoding::encode_utf16_be;
use pdf_tokens::{HexToken, Lexer, LexerOptions};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pdftokens",
    about = "Inspect PDF syntax tokens and hex strings",
    version,
    author
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a file, one per line
    Tokens {
        /// Input file, or '-' for stdin
        input: PathBuf,

        /// Fail on the first malformed construct instead of recovering
        #[arg(long)]
        strict: bool,

        /// Stop after this many tokens
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Hex string utilities
    Hex {
        #[command(subcommand)]
        action: HexAction,
    },
}

#[derive(Subcommand)]
enum HexAction {
    /// Decode hex digits and show bytes, text and integer value
    Decode {
        /// Hex digits, with or without the surrounding '<' '>'
        digits: String,
    },

    /// Encode text as a hex string
    Encode {
        /// Text to encode
        text: String,

        /// Emit a byte order mark followed by UTF-16BE instead of UTF-8 bytes
        #[arg(long)]
        utf16: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_input(input: &Path) -> Result<Box<dyn Read>> {
    if input.as_os_str() == "-" {
        return Ok(Box::new(io::stdin()));
    }
    let file = File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    Ok(Box::new(file))
}

fn print_tokens(input: &Path, strict: bool, limit: Option<usize>) -> Result<()> {
    let options = if strict {
        LexerOptions::strict()
    } else {
        LexerOptions::lenient()
    };
    let mut lexer = Lexer::with_options(open_input(input)?, options);

    let mut count = 0;
    while limit.map_or(true, |limit| count < limit) {
        let token = lexer
            .next_token()
            .with_context(|| format!("Lexing failed at byte {}", lexer.position()))?;
        let Some(token) = token else {
            break;
        };
        println!("{:<10} {}", token.kind(), token);
        count += 1;
    }

    for warning in lexer.warnings() {
        eprintln!("warning: byte {}: {}", warning.position, warning.message);
    }
    info!("{count} tokens, {} warnings", lexer.warnings().len());
    Ok(())
}

fn decode_hex(digits: &str) -> Result<()> {
    let digits = digits.trim();
    let digits = digits
        .strip_prefix('<')
        .and_then(|d| d.strip_suffix('>'))
        .unwrap_or(digits);
    let digits: String = digits.chars().filter(|c| !c.is_whitespace()).collect();
    debug!("Decoding {} hex digits", digits.len());

    let token = HexToken::decode(&digits).context("Invalid hex string")?;

    println!("bytes:    {}", token.to_hex_string());
    println!("length:   {}", token.len());
    println!("encoding: {}", if token.is_utf16() { "UTF-16BE" } else { "single-byte" });
    println!("text:     {:?}", token.text());
    if let Ok(value) = token.to_integer() {
        println!("integer:  {value}");
    }
    Ok(())
}

fn encode_hex(text: &str, utf16: bool) {
    let token = if utf16 {
        HexToken::from(encode_utf16_be(text))
    } else {
        HexToken::from_bytes(text.as_bytes())
    };
    println!("{token}");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Tokens {
            input,
            strict,
            limit,
        } => print_tokens(&input, strict, limit)?,
        Commands::Hex { action } => match action {
            HexAction::Decode { digits } => decode_hex(&digits)?,
            HexAction::Encode { text, utf16 } => encode_hex(&text, utf16),
        },
    }

    Ok(())
}
