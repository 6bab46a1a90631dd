use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use keeper_runtime::{chat::run_chat, init_logging, server, Settings};
use tokio::io::BufReader;

#[derive(Parser)]
#[command(author, version, about = "Turn a conversation about your memories into a story")]
struct Cli {
    #[command(flatten)]
    settings: Settings,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Serve the JSON API
    Serve {
        /// Address to bind the HTTP server
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: String,
    },
    /// Interview on this terminal
    Chat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging("info");
    let cli = Cli::parse();
    let session = cli.settings.session()?;

    match cli.cmd {
        Cmd::Serve { addr } => {
            let addr: SocketAddr = addr.parse()?;
            server::serve(addr, Arc::new(session)).await?;
        }
        Cmd::Chat => {
            let stdin = BufReader::new(tokio::io::stdin());
            run_chat(&session, stdin, tokio::io::stdout()).await?;
        }
    }
    Ok(())
}
