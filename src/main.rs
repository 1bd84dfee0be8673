#![allow(unused_assignments)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

/// varconf Configuration Language Compiler
///
/// Compiles varconf source to YAML or JSON.
#[derive(Parser)]
#[command(name = "varconf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile source to YAML or JSON
    Compile {
        /// Source file to compile (`-` reads stdin)
        file: PathBuf,

        /// Output file (extension picks the format when --format is absent: .json, otherwise YAML)
        output: Option<PathBuf>,

        /// Force output format: yaml, json, json-pretty
        #[arg(short, long)]
        format: Option<String>,

        /// Indent JSON output by this many spaces (implies pretty JSON)
        #[arg(long, value_name = "WIDTH")]
        indent: Option<usize>,

        /// Start YAML output with a `---` document marker
        #[arg(long)]
        document_start: bool,

        /// Print output to stdout, don't write files
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate source without emitting output
    Check {
        /// Source file to check (`-` reads stdin)
        file: PathBuf,
    },

    /// Internal: Lex a file and print tokens (for debugging)
    #[command(hide = true)]
    Lex {
        /// Source file to lex
        file: PathBuf,
    },

    /// Internal: Parse a file and print the document tree (for debugging)
    #[command(hide = true)]
    Parse {
        /// Source file to parse
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    // Set up miette for nice error output
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(false)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Compile {
            file,
            output,
            format,
            indent,
            document_start,
            dry_run,
        } => {
            let options = varconf::EmitOptions {
                indent,
                document_start,
            };
            cmd_compile(file, output, format, &options, dry_run)
        }
        Commands::Check { file } => cmd_check(file),
        Commands::Lex { file } => cmd_lex(file),
        Commands::Parse { file } => cmd_parse(file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let kind = e.kind();
            let exit_code = match kind {
                varconf::ErrorKind::Lexical | varconf::ErrorKind::Syntax => ExitCode::from(1),
                varconf::ErrorKind::Semantic => ExitCode::from(2),
                varconf::ErrorKind::Io => ExitCode::from(3),
            };
            eprintln!("{}", kind);
            eprintln!("{:?}", miette::Report::new(e));
            exit_code
        }
    }
}

/// Install a stderr subscriber; warnings only unless -v is given
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn cmd_compile(
    file: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    options: &varconf::EmitOptions,
    dry_run: bool,
) -> varconf::ConfResult<()> {
    // Determine output format
    let output_format = if let Some(ref fmt) = format {
        varconf::OutputFormat::parse(fmt).ok_or_else(|| {
            varconf::ConfError::io_error(format!(
                "unknown output format '{}'. Use: yaml, json, json-pretty",
                fmt
            ))
        })?
    } else if let Some(ref out) = output {
        varconf::OutputFormat::from_extension(out.extension().and_then(|e| e.to_str()))
    } else {
        varconf::OutputFormat::Yaml
    };

    let source = varconf::read_source(&file)?;
    tracing::debug!(file = %file.display(), format = ?output_format, "compiling");

    // Everything is compiled before anything is written, so a failure leaves no output
    let value = varconf::compile_source(&source)?;
    let mut result = varconf::emit_with(&value, output_format, options)?;
    if !result.ends_with('\n') {
        result.push('\n');
    }

    match output {
        Some(out_path) if !dry_run => {
            std::fs::write(&out_path, &result).map_err(|e| {
                varconf::ConfError::io_error(format!(
                    "failed to write {}: {}",
                    out_path.display(),
                    e
                ))
            })?;
            tracing::info!("Wrote {}", out_path.display());
        }
        _ => print!("{}", result),
    }

    Ok(())
}

fn cmd_check(file: PathBuf) -> varconf::ConfResult<()> {
    let source = varconf::read_source(&file)?;
    varconf::compile_source(&source)?;

    if varconf::compiler::is_stdin(&file) {
        eprintln!("<stdin>: OK");
    } else {
        eprintln!("{}: OK", file.display());
    }

    Ok(())
}

fn cmd_lex(file: PathBuf) -> varconf::ConfResult<()> {
    let source = varconf::read_source(&file)?;
    let tokens = varconf::Lexer::new(&source).tokenize()?;

    println!("Tokens from {}:", file.display());
    println!("{:-<60}", "");

    for token in tokens {
        println!("{:>6}  {:12} {}", token.offset, token.kind.name(), token.lexeme);
    }

    Ok(())
}

fn cmd_parse(file: PathBuf) -> varconf::ConfResult<()> {
    let source = varconf::read_source(&file)?;
    let value = varconf::compile_source(&source)?;
    println!("{:#?}", value);
    Ok(())
}
