//! Interactive inspection shell over a loaded cache.

use hickory_proto::rr::{DNSClass, Name};
use rescache_store::{text, Cache};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const PROMPT: &str = "> ";

/// Run the line loop until `exit` or end of input.
///
/// Commands:
/// - `find <name>`: print the entries cached for that name in the working class
/// - `setclass <class>`: change the working class
/// - `exit`: leave the shell
pub fn run(cache: &Cache, initial_class: DNSClass) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut class = initial_class;

    loop {
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let arg = parts.next().unwrap_or("");

        match command {
            "find" => match Name::from_str(arg) {
                Ok(name) => text::write_name_entry(cache, &mut stdout, &name, class)?,
                Err(e) => writeln!(stdout, "invalid name '{}': {}", arg, e)?,
            },
            "setclass" => match DNSClass::from_str(arg) {
                Ok(new_class) => class = new_class,
                Err(e) => writeln!(stdout, "invalid class '{}': {}", arg, e)?,
            },
            "exit" => break,
            other => writeln!(stdout, "unknown command: {}", other)?,
        }
    }
    Ok(())
}
