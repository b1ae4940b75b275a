use mimalloc::MiMalloc;
use schema_probe::{
    Config, PostgrestClient,
    probe::{self, render_fatal, render_header, render_report},
};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("❌ {e}");
            return ExitCode::FAILURE;
        }
    };

    // stdout carries only the report.
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        proxy = %cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        connect_timeout_secs = cfg.connect_timeout_secs,
        timeout_secs = cfg.timeout_secs,
        loglevel = %cfg.loglevel
    );

    let result = probe::run(&cfg, |creds, cfg| {
        print!("{}", render_header(creds));
        PostgrestClient::new(creds, cfg)
    })
    .await;

    match &result {
        Ok(report) => print!("{}", render_report(report)),
        Err(e) if e.is_configuration() => eprintln!("❌ {e}"),
        Err(e) => {
            error!(error = %e, "probe aborted");
            eprint!("{}", render_fatal(e));
        }
    }
    ExitCode::from(probe::exit_code(&result))
}
