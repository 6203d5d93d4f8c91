use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;

mod auth;
mod config;
mod dashboard;
mod error;
mod login;
mod pages;
mod startup;
mod system;
mod testing;

use actix_web::{middleware::Logger, web, App, HttpServer};
use auth::{CredentialTable, TokenService};
use config::Config;
use pages::PageStub;
use system::{MetricsSampler, ModuleRegistry};
use testing::TestStore;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "maskservice.yaml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Bind host override
    #[arg(long)]
    host: Option<String>,

    /// Run a single backend instead of the whole suite
    #[arg(long)]
    service: Option<Service>,
}

/// One backend of the suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Service {
    Login,
    Dashboard,
    Tests,
    System,
    Devices,
    Reports,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    startup::display_startup_banner(VERSION);

    let config_path = cli.config.exists().then(|| cli.config.as_path());
    let config = Config::load(&cli.config, cli.host.clone()).map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!(e)
    })?;

    startup::StartupLogger::display_startup_info(&config, config_path);

    run_services(&config, cli.service).await
}

/// Shared application state handed to the per-service servers
struct SuiteState {
    tokens: web::Data<TokenService>,
    credentials: web::Data<CredentialTable>,
    test_store: web::Data<TestStore>,
    sampler: web::Data<MetricsSampler>,
    registry: web::Data<ModuleRegistry>,
}

impl SuiteState {
    fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            tokens: web::Data::new(TokenService::new(&config.auth.jwt)?),
            credentials: web::Data::new(CredentialTable::new(&config.auth)),
            test_store: web::Data::new(TestStore::new()),
            sampler: web::Data::new(MetricsSampler::new()),
            registry: web::Data::new(ModuleRegistry::new()),
        })
    }
}

/// Bind and run the selected backends, one `HttpServer` per port
async fn run_services(config: &Config, only: Option<Service>) -> Result<()> {
    let state = SuiteState::new(config)?;
    let host = config.server.host.clone();
    let ports = config.server.ports.clone();

    let selected = |service: Service| only.is_none() || only == Some(service);
    let mut servers = Vec::new();

    if selected(Service::Login) {
        let tokens = state.tokens.clone();
        let credentials = state.credentials.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(tokens.clone())
                .app_data(credentials.clone())
                .wrap(Logger::default())
                .configure(login::configure)
        })
        .bind((host.as_str(), ports.login))?;
        info!("Login service listening on {}:{}", host, ports.login);
        servers.push(server.run());
    }

    if selected(Service::Dashboard) {
        let tokens = state.tokens.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(tokens.clone())
                .wrap(Logger::default())
                .configure(dashboard::configure)
        })
        .bind((host.as_str(), ports.dashboard))?;
        info!("Dashboard service listening on {}:{}", host, ports.dashboard);
        servers.push(server.run());
    }

    if selected(Service::Tests) {
        let test_store = state.test_store.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(test_store.clone())
                .wrap(Logger::default())
                .configure(testing::configure)
        })
        .bind((host.as_str(), ports.tests))?;
        info!("Tests service listening on {}:{}", host, ports.tests);
        servers.push(server.run());
    }

    if selected(Service::System) {
        let sampler = state.sampler.clone();
        let registry = state.registry.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(sampler.clone())
                .app_data(registry.clone())
                .wrap(Logger::default())
                .configure(system::configure)
        })
        .bind((host.as_str(), ports.system))?;
        info!("System service listening on {}:{}", host, ports.system);
        servers.push(server.run());
    }

    if selected(Service::Devices) {
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(PageStub::DEVICES))
                .wrap(Logger::default())
                .configure(pages::configure)
        })
        .bind((host.as_str(), ports.devices))?;
        info!("Devices service listening on {}:{}", host, ports.devices);
        servers.push(server.run());
    }

    if selected(Service::Reports) {
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(PageStub::REPORTS))
                .wrap(Logger::default())
                .configure(pages::configure)
        })
        .bind((host.as_str(), ports.reports))?;
        info!("Reports service listening on {}:{}", host, ports.reports);
        servers.push(server.run());
    }

    info!("✅ MaskService suite started ({} services)", servers.len());

    // Each server stops on its own shutdown signal; wait for all of them
    join_servers(servers).await
}

/// Await every server, surfacing the first failure
async fn join_servers(servers: Vec<actix_web::dev::Server>) -> Result<()> {
    let handles: Vec<_> = servers.into_iter().map(tokio::spawn).collect();
    for handle in handles {
        handle.await??;
    }
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(true),
        )
        .with(env_filter)
        .init();

    Ok(())
}
