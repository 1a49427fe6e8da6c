//! krill entry point

use anyhow::Result;
use clap::Parser;
use krill::{App, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let app = App::parse();
    app.init_tracing();

    match &app.command {
        Command::Chat(chat) => chat.run(app.no_stream).await,
        Command::Generate => krill::generate(),
    }
}
