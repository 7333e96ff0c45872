use appconfig::{
    database_url, AppConfigPatch, Client, ConfigStore, Error, Outcome, RestClient, RunError,
    Runner, Settings, DEFAULT_DOWNLOAD_URL, DEFAULT_MIN_VERSION, DEFAULT_TABLE,
};
use clap::{Parser, ValueEnum};
use std::process::ExitCode;

mod logging;

/// Missing credential, bad flags or unusable settings.
const EXIT_MISCONFIGURED: u8 = 1;

/// Remote failure with `--strict`.
const EXIT_REMOTE_FAILURE: u8 = 2;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// Hosted REST table api, authenticated with the service-role key.
    Rest,
    /// Direct PostgreSQL connection (POSTGRES_PROVIDER / POSTGRES_URL).
    Postgres,
}

#[derive(Parser)]
#[command(version, about = "Update or insert the app_config row with the minimum app version and its download url.", long_about = None)]
struct Cli {
    /// Oldest app version still allowed to run.
    #[arg(long, default_value = DEFAULT_MIN_VERSION)]
    min_version: String,

    /// Where the current build can be downloaded from.
    #[arg(long, default_value = DEFAULT_DOWNLOAD_URL)]
    download_url: String,

    #[arg(long, default_value = DEFAULT_TABLE)]
    table: String,

    #[arg(long, value_enum, default_value_t = Backend::Rest)]
    backend: Backend,

    /// Write the singleton row in one insert-or-update instead of look-up-then-write.
    #[arg(long)]
    atomic: bool,

    /// Exit with status 2 when the remote service cannot be reached or the write fails.
    #[arg(long)]
    strict: bool,
}

impl Cli {
    fn remote_failure(&self) -> u8 {
        if self.strict {
            EXIT_REMOTE_FAILURE
        } else {
            0
        }
    }
}

fn log_causes(err: &dyn std::error::Error) {
    let mut source = err.source();
    while let Some(cause) = source {
        log::error!("caused by: {}", cause);
        source = cause.source();
    }
}

async fn execute<S>(store: S, patch: &AppConfigPatch, atomic: bool) -> Result<Outcome, RunError>
where
    S: ConfigStore,
{
    let runner = Runner::new(store);
    if atomic {
        runner.run_atomic(patch).await
    } else {
        runner.run(patch).await
    }
}

/// Runs the tool against the environment visible through `lookup` and
/// returns the process exit status.
async fn run_cli<F>(cli: Cli, lookup: F) -> u8
where
    F: Fn(&str) -> Option<String>,
{
    // The credential is checked before anything touches the network,
    // whichever backend is selected.
    let settings = match Settings::from_lookup(&lookup) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            return EXIT_MISCONFIGURED;
        }
    };

    let patch = match AppConfigPatch::builder()
        .min_version(cli.min_version.as_str())
        .download_url(cli.download_url.as_str())
        .build()
    {
        Ok(patch) => patch,
        Err(e) => {
            log::error!("{}", e);
            return EXIT_MISCONFIGURED;
        }
    };

    log::info!("Updating {}...", cli.table);

    let result = match cli.backend {
        Backend::Rest => match RestClient::builder().table(&cli.table).build(&settings) {
            Ok(store) => execute(store, &patch, cli.atomic).await,
            Err(e) => {
                log::error!("{}", e);
                log_causes(&e);
                return EXIT_MISCONFIGURED;
            }
        },
        Backend::Postgres => {
            let url = database_url(&lookup);
            match Client::builder().table(&cli.table).connect_to(url).await {
                Ok(store) => execute(store, &patch, cli.atomic).await,
                Err(e @ Error::Config { .. }) => {
                    log::error!("{}", e);
                    return EXIT_MISCONFIGURED;
                }
                Err(e) => {
                    log::error!("Connect Error: {}", e);
                    log_causes(&e);
                    return cli.remote_failure();
                }
            }
        }
    };

    match result {
        Ok(outcome) => {
            let label = match outcome {
                Outcome::Updated(_) => "Update Success",
                Outcome::Inserted(_) => "Insert Success",
                Outcome::Upserted(_) => "Upsert Success",
            };
            match serde_json::to_string_pretty(outcome.rows()) {
                Ok(rows) => log::info!("{}: {}", label, rows),
                Err(_) => log::info!("{}: {:?}", label, outcome.rows()),
            }
            0
        }
        Err(e) => {
            log::error!("{}", e);
            log_causes(e.inner());
            cli.remote_failure()
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // a missing .env file is fine
    let _ = dotenvy::dotenv();
    logging::init();

    let cli = Cli::parse();
    ExitCode::from(run_cli(cli, |name| std::env::var(name).ok()).await)
}
