//! Server implementation

#![warn(missing_docs)]

mod http;

use std::thread;

use eyre::{eyre, Result, WrapErr};
use train_reservation_core::{Config, RequestHandler, Service, DEFAULT_STARTING_POINT};
use tracing_subscriber::EnvFilter;

/// Command line options
#[derive(Debug)]
struct Opts {
    /// Configuration of the train reservation services
    config: Config,

    /// Port for the HTTP server to listen on, defaults to the service's port
    port: Option<u16>,
    /// Host for the HTTP server to listen on
    host: String,
    /// Number of worker threads
    threads: u32,
}

impl Opts {
    fn from_args() -> Result<Self> {
        Self::parse(std::env::args().skip(1), std::env::var("STARTING_POINT").ok())
    }

    /// Parse `args` (without the program name); `starting_point_env` is the
    /// value of `STARTING_POINT`, if set
    fn parse(
        args: impl IntoIterator<Item = String>,
        starting_point_env: Option<String>,
    ) -> Result<Self> {
        let mut opts = Opts {
            config: Config::default(),
            port: None,
            host: String::from("127.0.0.1"),
            threads: 8,
        };
        let mut starting_point = None;

        let mut option: Option<String> = None;
        for arg in args {
            if let Some(opt) = option {
                match opt.as_str() {
                    "-service" => opts.config.service = arg.parse().map_err(|e| eyre!("{e}"))?,
                    "-port" => {
                        opts.port = Some(arg.parse().wrap_err("-port takes a decimal u16")?)
                    }
                    "-host" => opts.host = arg,
                    "-threads" => {
                        opts.threads = arg.parse().wrap_err("-threads takes a decimal u32")?
                    }
                    "-starting-point" => {
                        starting_point =
                            Some(arg.parse().wrap_err("-starting-point takes a decimal u64")?)
                    }
                    "-train-data" => opts.config.train_data = Some(arg.into()),
                    _ => return Err(eyre!("unknown option {opt}")),
                }
                option = None;
            } else {
                option = Some(arg);
            }
        }
        if let Some(opt) = option {
            return Err(eyre!("option {opt} is missing its value"));
        }
        if opts.threads == 0 {
            return Err(eyre!("-threads must be at least 1"));
        }

        if opts.config.service == Service::BookingReference {
            opts.config.starting_point =
                starting_point.unwrap_or_else(|| starting_point_from_env(starting_point_env));
        }
        Ok(opts)
    }

    fn port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.config.service.default_port())
    }
}

/// Interpret the value of `STARTING_POINT`
fn starting_point_from_env(value: Option<String>) -> u64 {
    match value.map(|v| v.parse::<u64>()) {
        Some(Ok(starting_point)) => starting_point,
        _ => {
            tracing::warn!(
                "Environment variable STARTING_POINT not set or invalid, defaulting to '{DEFAULT_STARTING_POINT}'."
            );
            DEFAULT_STARTING_POINT
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_thread_names(true)
        .init();
}

fn http_loop<H: RequestHandler>(server: &tiny_http::Server, service: Service, handler: &H) {
    loop {
        match server.recv() {
            Ok(rq) => {
                if let Some(rq) = http::parse(rq, service) {
                    handler.handle(rq);
                }
            }
            Err(err) => {
                tracing::error!(%err, "HTTP receive failed");
                return;
            }
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let opts = Opts::from_args()?;
    tracing::debug!(?opts, "Application starting.");

    let handler = train_reservation_engine::launch(&opts.config)?;

    let server = tiny_http::Server::http((opts.host.as_str(), opts.port()))
        .map_err(|e| eyre!("could not bind {}:{}: {e}", opts.host, opts.port()))?;
    tracing::info!(
        service = ?opts.config.service,
        addr = ?server.server_addr(),
        threads = opts.threads,
        "Application started."
    );

    let service = opts.config.service;
    thread::scope(|s| -> Result<()> {
        for i in 0..opts.threads {
            thread::Builder::new()
                .name(format!("worker_{i}"))
                .spawn_scoped(s, || http_loop(&server, service, &handler))?;
        }
        Ok(())
    })?;

    tracing::info!("Server shutdown.");
    Ok(())
}
