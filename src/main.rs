use anyhow::Result;
use clap::Parser;

use todo_list::config::{ServerArgs, ServerConfig};
use todo_list::logging::init_logging;
use todo_list::server::TaskServer;

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();
    init_logging("info");

    let config = ServerConfig::from(args);
    TaskServer::start(config).await?;
    Ok(())
}
