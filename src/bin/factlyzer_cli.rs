//! Command-line front end: scores article text from args or stdin and
//! animates the result as `i/100` frames.

use std::io::{self, Read, Write};
use std::time::Duration;

use factlyzer::{api::EMPTY_TEXT_WARNING, logging, TrustScore};

const FRAME_DELAY: Duration = Duration::from_millis(20);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    logging::init_tracing("factlyzer=warn");

    let (_cfg, pipeline) = factlyzer::bootstrap()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let text = if args.is_empty() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.join(" ")
    };

    if text.trim().is_empty() {
        eprintln!("{EMPTY_TEXT_WARNING}");
        return Ok(());
    }

    println!("Analyzing credibility...");
    let a = pipeline.analyze(&text);

    let mut out = io::stdout();
    for i in a.score.ticker() {
        write!(out, "\r{}", TrustScore::new(i.into()))?;
        out.flush()?;
        tokio::time::sleep(FRAME_DELAY).await;
    }
    writeln!(out)?;
    println!("{}: {}", a.level, a.message);

    Ok(())
}
