use std::sync::Arc;

use clap::Parser;
use printer::StdoutSink;

#[derive(Parser)]
#[command(name = "printer")]
#[command(about = "Prints 0 1 0 2 ... 0 n with three coordinated workers", long_about = None)]
struct Cli {
    /// Highest number to emit.
    #[arg(short, long, default_value = "5")]
    n: u32,
}

#[tokio::main]
async fn main() -> Result<(), printer::PrintError> {
    // install global collector configured based on RUST_LOG env var.
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    printer::run(cli.n, Arc::new(StdoutSink)).await?;
    println!();
    Ok(())
}
