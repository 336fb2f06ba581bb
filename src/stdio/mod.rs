mod protocol;
mod server;

use crate::error::Result;
use std::io;
use tracing::info;

pub use protocol::{JoinArguments, Message, MessageContent, SplitArguments, SplitFileArguments};
pub use server::Server;

/// Serve requests on stdin/stdout until the peer disconnects.
pub fn run_stdio_mode() -> Result<()> {
    info!("stdio server starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut server = Server::new(stdin.lock(), stdout.lock());
    server.run()?;

    info!("stdio server exiting");
    Ok(())
}
