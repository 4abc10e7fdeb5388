use std::io::Read;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;

use chatbuf::config::Config;
use chatbuf::directory::BufferDirectory;
use chatbuf::export::to_json;
use chatbuf::logging::init_tracing;
use chatbuf::mirror::ObjectMirror;
use chatbuf::script;
use chatbuf::signal::SignalLog;

/// Replay a script of buffer commands and print the resulting buffer list.
#[derive(Parser, Debug)]
#[command(name = "chatbuf", version, about)]
struct Cli {
    /// Script file; reads stdin when omitted or `-`
    script: Option<PathBuf>,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the crash-dump description instead of JSON
    #[arg(long)]
    dump: bool,

    /// Print the published object paths
    #[arg(long)]
    objects: bool,

    /// Print every lifecycle signal that was sent
    #[arg(long)]
    signals: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    let source = read_script(cli.script.as_ref())?;
    let commands = script::parse_script(&source)?;

    let mut dir = BufferDirectory::new(config);
    let mirror = ObjectMirror::shared();
    let signals = SignalLog::shared();
    dir.subscribe(Rc::clone(&mirror));
    dir.subscribe(Rc::clone(&signals));

    for line in script::run(&mut dir, &commands)? {
        println!("{line}");
    }
    dir.check_numbering()?;

    if cli.signals {
        for (name, buffer) in &signals.borrow().events {
            match buffer {
                Some(buffer) => println!("signal {name} {buffer}"),
                None => println!("signal {name}"),
            }
        }
    }
    if cli.objects {
        for path in mirror.borrow().paths() {
            println!("{path}");
        }
    }
    if cli.dump {
        for row in dir.log_dump() {
            println!("{row}");
        }
    } else {
        println!("{}", to_json(&dir.infolist())?);
    }
    Ok(())
}

fn read_script(path: Option<&PathBuf>) -> Result<String> {
    match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display())),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read script from stdin")?;
            Ok(source)
        }
    }
}
