//! Decodes a marshalled file and writes the re-encoded bytes back out.

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
    let mut args = std::env::args().skip(1);
    let (Some(input), Some(output)) = (args.next(), args.next()) else {
        bail!("usage: marshal-reencode <in> <out>");
    };

    let data = std::fs::read(&input).with_context(|| format!("failed to read {}", input))?;
    let value = rbmarshal::decode(&data)
        .with_context(|| format!("failed to decode {}", input))?;
    let bytes = rbmarshal::encode(&value)
        .with_context(|| format!("failed to re-encode {}", input))?;
    std::fs::write(&output, bytes).with_context(|| format!("failed to write {}", output))?;
    Ok(())
}
