use std::net::SocketAddr;
use std::path::PathBuf;

use getopts::Options;
use tokio::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub address: SocketAddr,
    pub events: PathBuf,
    pub enable_cache: bool,
    pub cache_ttl: Duration,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Serve(Args),
    Help(String),
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "a",
        "address",
        "Socket address (IP and port) to listen on [Default: 127.0.0.1:8080]",
        "SOCKET_ADDRESS",
    );
    opts.optopt(
        "e",
        "events",
        "TOML file listing the events to serve [Default: events.toml]",
        "PATH",
    );
    opts.optflag(
        "c",
        "enable-cache",
        "Enable caching of rendered documents [Default: false]",
    );
    opts.optopt(
        "t",
        "cache-ttl",
        "Time-to-live for cached documents [Default: 3600]",
        "SECONDS",
    );
    opts
}

/// Parses the arguments following the program name.
pub fn parse(args: Vec<String>) -> Result<Command, String> {
    let opts = opts();
    let matches = opts.parse(args).map_err(|fail| fail.to_string())?;

    if matches.opt_present("help") {
        return Ok(Command::Help(
            opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))),
        ));
    }

    let address = matches
        .opt_get_default("address", SocketAddr::from(([127, 0, 0, 1], 8080)))
        .map_err(|err| format!("Provided value for option 'address' is invalid: {err}"))?;

    let events = matches
        .opt_str("events")
        .map_or_else(|| PathBuf::from("events.toml"), PathBuf::from);

    let enable_cache = matches.opt_present("enable-cache");

    let cache_ttl = matches
        .opt_get_default("cache-ttl", 3600)
        .map(Duration::from_secs)
        .map_err(|err| format!("Provided value for option 'cache-ttl' is invalid: {err}"))?;

    Ok(Command::Serve(Args {
        address,
        events,
        enable_cache,
        cache_ttl,
    }))
}
