use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use chatfmt::{Config, Error, message};
use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "chatfmt")]
#[command(about = "Format chat replies as structured JSON, HTML or plain text")]
struct Cli {
    /// Input file (reads stdin when omitted or "-")
    input: Option<PathBuf>,

    /// Output file (writes stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Renderer config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Treat the input as a JSON array of {role, content} messages
    #[arg(long)]
    transcript: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Html,
    Text,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::compiled_default(),
    };

    let input = read_input(cli.input.as_ref())?;
    let rendered = if cli.transcript {
        render_transcript(&input, cli.format, &config)?
    } else {
        render_reply(&input, cli.format, &config)?
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, rendered).map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;
            log::info!("wrote {}", path.display());
        }
        None => io::stdout()
            .write_all(rendered.as_bytes())
            .context("failed to write to stdout")?,
    }

    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            log::info!("reading {}", path.display());
            fs::read_to_string(path)
                .map_err(|source| Error::Read {
                    path: path.clone(),
                    source,
                })
                .map_err(Into::into)
        }
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

fn render_reply(reply: &str, format: Format, config: &Config) -> anyhow::Result<String> {
    Ok(match format {
        Format::Json => {
            let mut json = chatfmt::reply_to_json(reply)?;
            json.push('\n');
            json
        }
        Format::Html => chatfmt::reply_to_html_with_config(reply, config),
        Format::Text => chatfmt::reply_to_text_with_config(reply, config),
    })
}

fn render_transcript(input: &str, format: Format, config: &Config) -> anyhow::Result<String> {
    let messages = message::load_transcript(input)?;
    log::info!("formatting {} messages", messages.len());
    let formatted = message::format_transcript(&messages);

    if let Format::Json = format {
        let mut json = serde_json::to_string_pretty(&formatted).map_err(Error::Json)?;
        json.push('\n');
        return Ok(json);
    }

    let mut out = String::new();
    for (i, msg) in formatted.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let role = match msg.role {
            chatfmt::Role::User => "user",
            chatfmt::Role::Assistant => "assistant",
        };
        match format {
            Format::Html => {
                out.push_str(&format!("<div class=\"message {role}\">\n"));
                out.push_str(&chatfmt::html::render(&msg.document.blocks, &config.html));
                out.push_str("</div>\n");
            }
            _ => {
                out.push_str(&format!("[{role}]\n"));
                out.push_str(&chatfmt::text::render(&msg.document.blocks, &config.text));
            }
        }
    }
    Ok(out)
}
