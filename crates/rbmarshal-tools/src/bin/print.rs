//! Decodes a marshalled file and prints its rendering to stdout.

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: marshal-print <file>");
    };

    let data = std::fs::read(&path).with_context(|| format!("failed to read {}", path))?;
    let value = rbmarshal::decode(&data)
        .with_context(|| format!("failed to decode {}", path))?;
    println!("{}", value);
    Ok(())
}
