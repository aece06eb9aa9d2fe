mod bootstrap;
mod di;
mod pidfile;
mod server;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use guardian_domain::CliOverrides;
use guardian_jobs::{BlocklistSyncJob, FirewallSyncJob, JobRunner, StatsFlushJob, ThreatSyncJob};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Guardian Daemon (C8): DNS resolver/filter, threat intelligence ingestor,
/// firewall control plane and alert pipeline, run as a single process.
#[derive(Parser)]
#[command(name = "guardiand", version)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Override the bind address for both the DNS and HTTP listeners.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the log level (e.g. "debug", "guardian_dns=trace,info").
    #[arg(short, long)]
    log_level: Option<String>,

    /// Path to the PID file used as the single-instance lock.
    #[arg(long, default_value = "/var/run/guardiand.pid")]
    pid_file: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides { bind_address: cli.bind, log_level: cli.log_level };
    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    info!("Guardian Daemon starting");

    let _pid_lock = pidfile::PidFile::acquire(&cli.pid_file)?;

    let database_url = format!("sqlite://{}", config.database.path);
    let (write_pool, read_pool) = bootstrap::init_database(&database_url, &config.database).await?;

    let http_client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(config.dns.resolve_timeout_ms * 4))
        .build()?;

    let repos = di::Repositories::build(write_pool, read_pool, &config).await?;
    let use_cases = di::UseCases::build(&repos, &config, http_client);
    let dns_services = di::DnsServices::build(&use_cases);

    let shutdown = CancellationToken::new();

    let dns_addr: SocketAddr = format!("{}:{}", config.dns.host, config.dns.port).parse()?;
    let web_addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.web_port).parse()?;

    let app_state = guardian_api::AppState {
        guardian_add_rule: use_cases.guardian_add_rule.clone(),
        guardian_remove_rule: use_cases.guardian_remove_rule.clone(),
        guardian_list_rules: use_cases.guardian_list_rules.clone(),
        guardian_blocklist_sources: use_cases.guardian_blocklist_sources.clone(),
        guardian_update_all_blocklists: use_cases.guardian_update_all_blocklists.clone(),
        guardian_stats: use_cases.guardian_stats.clone(),
        guardian_status: use_cases.guardian_status.clone(),
        guardian_health: use_cases.guardian_health.clone(),

        threat_sync_all: use_cases.threat_sync_all.clone(),
        threat_sync_single: use_cases.threat_sync_single.clone(),
        threat_stats: use_cases.threat_stats.clone(),
        threat_lookup: use_cases.threat_lookup.clone(),
        threat_list_feeds: use_cases.threat_list_feeds.clone(),
        threat_feed_parsers: use_cases.threat_feed_parsers.clone(),

        firewall_add_rule: use_cases.firewall_add_rule.clone(),
        firewall_remove_rule: use_cases.firewall_remove_rule.clone(),
        firewall_toggle_rule: use_cases.firewall_toggle_rule.clone(),
        firewall_list_rules: use_cases.firewall_list_rules.clone(),
        firewall_status: use_cases.firewall_status.clone(),
        firewall_list_events: use_cases.firewall_list_events.clone(),
        firewall_daily_stats: use_cases.firewall_daily_stats.clone(),
        firewall_sync_threat_rules: use_cases.firewall_sync_threat_rules.clone(),
        firewall_sync_port_rules: use_cases.firewall_sync_port_rules.clone(),
        firewall_install_adapter: use_cases.firewall_install_adapter.clone(),

        config: Arc::new(RwLock::new(config.clone())),
    };

    let mut job_runner = JobRunner::new()
        .with_blocklist_sync(
            BlocklistSyncJob::new(use_cases.guardian_update_all_blocklists.clone())
                .with_interval(config.dns.blocklist_update_hours * 3_600)
                .with_cancellation(shutdown.clone()),
        )
        .with_threat_sync(ThreatSyncJob::new(use_cases.threat_sync_all.clone()).with_cancellation(shutdown.clone()))
        .with_stats_flush(StatsFlushJob::new(repos.stats.clone()).with_cancellation(shutdown.clone()));

    if config.firewall.auto_sync_ports {
        job_runner = job_runner.with_firewall_sync(
            FirewallSyncJob::new(use_cases.firewall_sync_threat_rules.clone(), use_cases.firewall_sync_port_rules.clone())
                .with_cancellation(shutdown.clone()),
        );
    }

    let jobs_task = tokio::spawn(job_runner.start());
    let dns_task = tokio::spawn(server::start_dns_server(dns_addr, dns_services.handler.clone(), shutdown.clone()));
    let web_task = tokio::spawn(server::start_web_server(web_addr, app_state, shutdown.clone()));

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::select! {
        _ = ctrl_c => info!("shutdown signal received"),
    }
    shutdown.cancel();

    if let Err(e) = dns_task.await? {
        error!(error = %e, "DNS server exited with error");
    }
    if let Err(e) = web_task.await? {
        error!(error = %e, "HTTP server exited with error");
    }
    jobs_task.abort();

    info!("Guardian Daemon stopped");
    Ok(())
}
