//! CLI entry point: load the environment, run the scenario suite, and exit
//! non-zero unless everything passed.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wikicheck::{
    Config, Context, LoginScenario, Runner, Scenario, SearchScenario, TextSizeScenario,
};

#[derive(Parser, Debug)]
#[command(name = "wikicheck", version, about = "End-to-end Wikipedia scenario checks over WebDriver")]
struct Args {
    /// WebDriver server to connect to; overrides WEBDRIVER_URL.
    #[arg(long)]
    webdriver_url: Option<String>,

    /// Run with a visible browser window instead of headless.
    #[arg(long)]
    headed: bool,

    /// Run only the named dependent scenario (the login gate still runs
    /// first).
    #[arg(long)]
    only: Option<String>,

    /// Skip the login gate and reuse the session artifact from a previous
    /// run.
    #[arg(long)]
    skip_login: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("wikicheck: {}", e);
            return ExitCode::from(2);
        }
    };
    if let Some(url) = args.webdriver_url {
        config.webdriver_url = url;
    }

    let search = SearchScenario;
    let text_size = TextSizeScenario;
    let all: Vec<&dyn Scenario> = vec![&search, &text_size];
    let dependents: Vec<&dyn Scenario> = match args.only {
        Some(ref name) => {
            let picked: Vec<&dyn Scenario> = all
                .into_iter()
                .filter(|s| s.name() == name)
                .collect();
            if picked.is_empty() && name != "login" {
                eprintln!("wikicheck: no scenario named `{}`", name);
                return ExitCode::from(2);
            }
            picked
        }
        None => all,
    };

    let mut runner = Runner::new(Context::new(config));
    if args.headed {
        runner = runner.headed();
    }

    let report = if args.skip_login {
        runner.run_dependents(&dependents).await
    } else {
        runner.run(&LoginScenario, &dependents).await
    };

    for outcome in &report.outcomes {
        println!(
            "{:>24}  {}  ({} attempt(s))",
            outcome.name, outcome.status, outcome.attempts
        );
    }

    if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
