//! Terminal front end for reviewing ratio-20 peptides.
//!
//! Reads a newline delimited list of dataset URLs (or local paths), then
//! takes one command per line on stdin until every dataset is reviewed.
//! With `-` the URL list is read from stdin too, up to the first blank
//! line, and the commands follow it.
use clap::Parser;
use dtaselect_annotate::{Command, Config, Decision, HttpTransport, Session, Transport};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "annotate")]
#[command(about = "Review ratio-20 peptide identifications", long_about = None)]
#[command(version)]
struct Cli {
    /// File with one dataset URL (or local path) per line, or `-` to read
    /// the list from stdin up to the first blank line
    urls: PathBuf,

    /// JSON config file with endpoints and the target ratio
    #[arg(long)]
    config: Option<PathBuf>,

    /// Endpoint that renders the annotated report
    #[arg(long)]
    annotate_url: Option<String>,

    /// Endpoint that stores the annotations
    #[arg(long)]
    persist_url: Option<String>,

    /// Ratio text that marks a peptide for review
    #[arg(long)]
    ratio: Option<String>,

    #[arg(short, long)]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

enum Input {
    Command(Command),
    Quit,
    Help,
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "a" | "right" => Input::Command(Command::Accept),
        "r" | "left" => Input::Command(Command::Reject),
        "s" | "down" | "" => Input::Command(Command::Skip),
        "b" | "up" => Input::Command(Command::Retreat),
        "n" => Input::Command(Command::NextGroup),
        "p" => Input::Command(Command::PreviousGroup),
        "q" => Input::Quit,
        _ => Input::Help,
    }
}

/// Read URL lines until the first blank line or EOF, leaving the rest of
/// `input` for commands
fn read_url_list<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut urls = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 || line.trim().is_empty() {
            return Ok(urls);
        }
        urls.push_str(&line);
    }
}

fn render<T: Transport>(session: &Session<T>, out: &mut impl Write) -> io::Result<()> {
    let protein = match session.current_protein() {
        Some(prot) => prot,
        None => return Ok(()),
    };
    let cursor = session.cursor();
    writeln!(
        out,
        "\n[{}/{}] {} {} {}",
        cursor.protein + 1,
        session.dataset().proteins.len(),
        protein.index,
        protein.ipi.as_deref().unwrap_or(""),
        protein.symbol.as_deref().unwrap_or("")
    )?;
    if let Some(desc) = protein.description.as_deref() {
        writeln!(out, "    {}", desc)?;
    }
    for (i, pep) in protein.peptides.iter().enumerate() {
        let mark = if cursor.peptide == Some(i) {
            '>'
        } else if pep.ratio != cursor.ratio() {
            '.'
        } else {
            match pep.annotation {
                Decision::Accepted => '+',
                Decision::Rejected => '-',
                Decision::Undecided => ' ',
            }
        };
        writeln!(
            out,
            "  {} {:<40} ratio {:<6} z={} seg {}",
            mark, pep.sequence, pep.ratio, pep.charge, pep.segment
        )?;
    }
    if let Some(url) = session.chromatogram_url() {
        writeln!(out, "  chromatogram: {}", url)?;
    }
    let summary = session.summary();
    write!(
        out,
        "  accepted {} rejected {} remaining {} > ",
        summary.accepted, summary.rejected, summary.undecided
    )?;
    out.flush()
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    if let Some(url) = cli.annotate_url {
        config.annotate_url = url;
    }
    if let Some(url) = cli.persist_url {
        config.persist_url = url;
    }
    if let Some(ratio) = cli.ratio {
        config.target_ratio = ratio;
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let urls = if cli.urls.as_os_str() == "-" {
        read_url_list(&mut input)?
    } else {
        fs::read_to_string(&cli.urls)?
    };

    let transport = HttpTransport::new(&config)?;
    let mut session = Session::new(transport, &config);
    session.start(&urls)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !session.is_finished() {
        render(&session, &mut out)?;
    }
    for line in input.lines() {
        if session.is_finished() {
            break;
        }
        let line = line?;
        match parse_input(&line) {
            Input::Command(cmd) => {
                if let Err(e) = session.apply(cmd) {
                    log::error!("{}", e);
                }
            }
            Input::Quit => break,
            Input::Help => writeln!(
                out,
                "commands: a/right accept, r/left reject, s/down skip, b/up back, n next, p previous, q quit"
            )?,
        }
        if session.is_finished() {
            break;
        }
        render(&session, &mut out)?;
    }

    let summary = session.summary();
    writeln!(
        out,
        "\naccepted {} rejected {} undecided {}",
        summary.accepted, summary.rejected, summary.undecided
    )?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        process::exit(1);
    }
}
