//! Loads the JSON Web Key Set of an endpoint and prints its keys.
//!
//! Usage:
//!      cargo run --bin jwks -- <endpoint> [--kid <kid>] [--pem]

use anyhow::Context;
use clap::Parser;
use jwks_cache::Client;
use jwks_cache::config::TransportConfig;
use std::io::Write;

#[derive(Parser, Debug)]
#[command(name = "jwks", about = "Load and display keys from a JWKS endpoint")]
struct Args {
    /// Absolute URL of the JWKS document
    endpoint: String,

    /// Key id to look up. Lists all key ids if omitted.
    #[arg(long)]
    kid: Option<String>,

    /// Print the certificate of the key in PEM format instead of JSON.
    #[arg(long, requires = "kid")]
    pem: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    jwks_cache::util::tracing::init();

    let args = Args::parse();

    let http = TransportConfig::from_environment()?.build_client()?;
    let client = Client::new(&args.endpoint, http)
        .await
        .with_context(|| format!("Failed to load JWKS from {}", args.endpoint))?;

    let Some(kid) = args.kid else {
        for key_id in client.key_ids() {
            println!("{key_id}");
        }
        return Ok(());
    };

    let mut stdout = std::io::stdout().lock();
    if args.pem {
        let pem = client.lookup_as_pem(&kid).await?;
        stdout.write_all(&pem)?;
        writeln!(stdout)?;
    } else {
        let jwk = client.lookup(&kid).await?;
        serde_json::to_writer_pretty(&mut stdout, &jwk)?;
        writeln!(stdout)?;
    }

    Ok(())
}
