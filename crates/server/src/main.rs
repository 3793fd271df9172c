use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use fleet_core::config::{
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_UPSTREAM_URL, DEFAULT_USER_AGENT, FetchConfig,
};
use fleet_core::fetch::UpstreamClient;
use fleet_core::logging::setup_logging;
use fleet_server::ProxyServer;

#[derive(Parser, Debug)]
#[command(name = "fleet-server", version, about = "Proxy for the fleet status API")]
struct Args {
    /// Address to listen on
    #[arg(short, long, env = "FLEET_LISTEN", default_value = "127.0.0.1:3000")]
    listen: SocketAddr,

    /// Upstream fleet status endpoint
    #[arg(short, long, env = "FLEET_UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    upstream_url: String,

    /// User-Agent sent to the upstream
    #[arg(long, env = "FLEET_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Upstream request timeout in seconds, 0 to disable
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    timeout_secs: u64,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let timeout = (args.timeout_secs > 0).then(|| Duration::from_secs(args.timeout_secs));
    let config = FetchConfig::new(args.upstream_url)
        .with_user_agent(args.user_agent)
        .with_timeout(timeout);
    let upstream = UpstreamClient::new(&config)?;

    let server = ProxyServer::bind(args.listen, upstream).await?;
    info!(url = %server.url(), upstream = %config.url, "serving transportation data");

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    server.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_every_setting_has_env_fallback() {
        let command = Args::command();
        let env = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(OsStr::to_owned)
        };

        assert_eq!(env("listen").as_deref(), Some(OsStr::new("FLEET_LISTEN")));
        assert_eq!(env("upstream_url").as_deref(), Some(OsStr::new("FLEET_UPSTREAM_URL")));
        assert_eq!(env("user_agent").as_deref(), Some(OsStr::new("FLEET_USER_AGENT")));
    }

    #[test]
    fn test_user_agent_override() {
        let args = Args::try_parse_from(["fleet-server", "--user-agent", "fleet-test/1.0"]).unwrap();
        assert_eq!(args.user_agent, "fleet-test/1.0");
    }
}
