/// ENS off-chain lookup gateway
///
/// Reads one CCIP-Read request (`{"sender": "0x…", "data": "0x…"}`) from
/// stdin and writes the signed response (`{"data": "0x…"}`) to stdout.

use anyhow::Context;
use ens_offchain_coder::config::GatewayConfig;
use ens_offchain_coder::gateway::Gateway;
use std::io::{self, Read, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::from_env().context("failed to load configuration")?;

    // Initialize logging; stdout carries the response
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_new(&config.logging.level)
                .unwrap_or_else(|_| "ens_offchain_coder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    config.validate().context("invalid configuration")?;

    let gateway = Gateway::from_config(&config).context("failed to start gateway")?;

    let mut body = String::new();
    io::stdin()
        .read_to_string(&mut body)
        .context("failed to read request from stdin")?;

    let response = gateway
        .handle_json(&body)
        .context("failed to answer lookup")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", response)?;

    Ok(())
}
