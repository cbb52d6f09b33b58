use anyhow::Result;
use clap::Parser;
use routinely::cli::{self, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    cli::run(Cli::parse()).await
}
