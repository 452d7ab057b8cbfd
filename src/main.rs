use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use mcpql::cli::{self, CheckOptions, CheckResult, CliError, OutputFormat};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "mcpql")]
#[command(about = "MCPQL - call provider tools and post-process their results as tables")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Output {
    Json,
    Table,
}

impl From<Output> for OutputFormat {
    fn from(output: Output) -> Self {
        match output {
            Output::Json => OutputFormat::Json,
            Output::Table => OutputFormat::Table,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a query and run its pipeline over a JSON tool result
    Check {
        /// The MCPQL query
        query: String,

        /// JSON tool result (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't execute
        #[arg(long)]
        syntax_only: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        output: Output,
    },

    /// Report whether a query is valid, with the error position if not
    Validate {
        query: String,
    },

    /// Print a query in canonical form
    Fmt {
        query: String,
    },

    /// Report whether text looks like an MCPQL query
    Detect {
        text: String,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'mcpql docs' to list categories)
        category: String,
    },

    /// Short tutorial
    Onboard,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            query,
            input,
            pretty,
            syntax_only,
            output,
        } => run_check(query, input, pretty, syntax_only, output.into()),
        Commands::Validate { query } => run_validate(&query),
        Commands::Fmt { query } => {
            println!("{}", mcpql::format(&query));
            Ok(())
        }
        Commands::Detect { text } => {
            println!("{}", mcpql::looks_like_mcpql(&text));
            Ok(())
        }
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
        Commands::Onboard => {
            print!("{}", cli::get_onboarding_content());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbosity > 0 {
        let level = match verbosity {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };
        builder.filter_level(level);
    } else if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(log::LevelFilter::Warn);
    }
    builder.init();
}

fn run_validate(query: &str) -> Result<(), CliError> {
    let result = mcpql::validate(query);
    if result.is_valid {
        println!("valid");
        return Ok(());
    }

    eprintln!(
        "{} at line {}, column {}",
        result.error_message.unwrap_or_default(),
        result.error_line.unwrap_or(1),
        result.error_column.unwrap_or(1)
    );
    std::process::exit(1);
}

fn run_check(
    query: String,
    input: Option<String>,
    pretty: bool,
    syntax_only: bool,
    format: OutputFormat,
) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !syntax_only && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        query,
        input,
        pretty,
        syntax_only,
        format,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Success(table) => {
            let rendered = cli::render(&table, &options)?;
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
