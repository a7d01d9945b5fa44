use ansi_term::Colour::Red;
use linefeed::{DefaultTerminal, Interface, ReadResult, Terminal};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const PROMPT: &str = "dl> ";

pub fn setup() -> io::Result<Interface<DefaultTerminal>> {
    let interface = linefeed::Interface::new("dl")?;
    interface.set_prompt(PROMPT)?;
    if let Some(path) = history_path() {
        interface.load_history(path).ok();
    };
    Ok(interface)
}

fn history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|mut path| {
        path.push(".dl_history");
        path
    })
}

pub fn save_history<T: Terminal>(interface: &Interface<T>) -> io::Result<()> {
    match history_path() {
        Some(path) => interface.save_history(path),
        None => Ok(()),
    }
}

/// Renders the outcome of one line the way the shell shows it.
pub fn format_outcome<E: std::fmt::Display>(outcome: &Result<String, E>, colour: bool) -> String {
    match outcome {
        Ok(text) => text.clone(),
        Err(e) if colour => Red.paint(format!("error: {}", e)).to_string(),
        Err(e) => format!("error: {}", e),
    }
}

pub fn repl<T, E, F>(interface: &Interface<T>, mut processor: F)
where
    T: Terminal,
    E: std::fmt::Display,
    F: FnMut(&str) -> Result<String, E>,
{
    let colour = atty::is(atty::Stream::Stdout);
    loop {
        match interface.read_line() {
            Ok(ReadResult::Eof) => break,
            Ok(ReadResult::Signal(sig)) => {
                writeln!(interface, "Received signal {:?}", sig).ok();
            }
            Ok(ReadResult::Input(line)) => {
                if line.trim().is_empty() {
                    continue;
                }
                interface.add_history_unique(line.clone());
                let outcome = processor(&line);
                writeln!(interface, "{}", format_outcome(&outcome, colour)).ok();
            }
            Err(e) => {
                writeln!(interface, "Error: {}", e).ok();
                break;
            }
        }
    }
}

/// Non-interactive loop for piped input: no prompt, no line editing.
pub fn batch<R, W, E, F>(input: R, mut output: W, mut processor: F) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    E: std::fmt::Display,
    F: FnMut(&str) -> Result<String, E>,
{
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let outcome = processor(&line);
        writeln!(output, "{}", format_outcome(&outcome, false))?;
    }
    Ok(())
}

/// Runs the shell, picking line editing only when stdin is a terminal.
pub fn run<E, F>(processor: F) -> io::Result<()>
where
    E: std::fmt::Display,
    F: FnMut(&str) -> Result<String, E>,
{
    if atty::is(atty::Stream::Stdin) {
        let interface = setup()?;
        repl(&interface, processor);
        save_history(&interface)
    } else {
        let stdin = io::stdin();
        let stdout = io::stdout();
        batch(stdin.lock(), stdout.lock(), processor)
    }
}
