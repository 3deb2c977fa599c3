//! CLI entry point for mailarchive.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser)]
#[command(
    name = "mailarchive",
    version,
    about = "Archive unread IMAP messages to one directory per message"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (default: search standard locations)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// IMAP server hostname (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// IMAP server port (overrides config)
    #[arg(long)]
    port: Option<u16>,

    /// IMAP username (overrides config)
    #[arg(short, long)]
    username: Option<String>,

    /// IMAP password (prefer the environment variable over the flag)
    #[arg(long, env = "MAILARCHIVE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Mailbox to archive from (overrides config)
    #[arg(short, long)]
    mailbox: Option<String>,

    /// Archive output directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => return cmd_completions(shell),
        Some(Commands::Manpage) => return cmd_manpage(),
        None => {}
    }

    let mut config = mailarchive::config::load_config(cli.config.as_deref())?;

    // CLI overrides
    if let Some(host) = cli.host {
        config.imap.host = host;
    }
    if let Some(port) = cli.port {
        config.imap.port = port;
    }
    if let Some(username) = cli.username {
        config.imap.username = username;
    }
    if let Some(password) = cli.password {
        config.imap.password = password;
    }
    if let Some(mailbox) = cli.mailbox {
        config.imap.mailbox = mailbox;
    }
    if let Some(output) = cli.output {
        config.archive.output_dir = output;
    }

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    config.validate()?;

    cmd_run(&config, cli.json)
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &mailarchive::config::Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    // Try to set up file logging
    let log_dir = mailarchive::config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "mailarchive.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Run the archiver and print the summary.
fn cmd_run(config: &mailarchive::config::Config, json: bool) -> anyhow::Result<()> {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Archiving [{bar:40.cyan/blue}] {pos}/{len}")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let summary = mailarchive::archiver::run(config, &|current, total| {
        pb.set_length(total as u64);
        pb.set_position(current as u64);
    })?;

    pb.finish_and_clear();

    if json {
        print_summary_json(config, &summary)?;
    } else {
        print_summary_table(config, &summary);
    }

    Ok(())
}

/// Print the run summary in a human-readable table.
fn print_summary_table(
    config: &mailarchive::config::Config,
    summary: &mailarchive::archiver::RunSummary,
) {
    println!();
    println!("  {:<20} {}", "Mailbox", config.imap.mailbox);
    println!("  {:<20} {}", "Unread found", summary.unread);
    println!("  {:<20} {}", "Archived", summary.archived);
    if summary.failed > 0 {
        println!("  {:<20} {}", "Failed", summary.failed);
    }
    println!(
        "  {:<20} {}",
        "Output",
        config.archive.output_dir.display()
    );
    println!();
}

/// Print the run summary as JSON.
fn print_summary_json(
    config: &mailarchive::config::Config,
    summary: &mailarchive::archiver::RunSummary,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "mailbox": config.imap.mailbox,
        "unread": summary.unread,
        "archived": summary.archived,
        "failed": summary.failed,
        "output_dir": config.archive.output_dir.to_string_lossy(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "mailarchive", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}
