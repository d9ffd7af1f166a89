use anyhow::Context;
use clap::Parser;
use medgate::{app_state::AppState, http::setup_http_server, init_telemetry, settings::config::Settings};
use medgate_core::authorization::Registry;
use tokio::time::sleep;
use tracing::info;

#[derive(Parser)]
#[command(name = "medgate")]
#[command(about = "Role based access control for a medical appointment service")]
#[clap(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser)]
enum Commands {
    /// Show current configuration and exit
    Config,
    /// Print the role permission matrix as YAML and exit
    Roles,
    /// Start the medgate server (default)
    Run,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.as_ref().unwrap_or(&Commands::Run) {
        Commands::Config => {
            let settings = Settings::new().context("Failed to load settings")?;
            println!("{:#?}", &settings);
            return Ok(());
        }
        Commands::Roles => {
            let snapshot = Registry::shared().snapshot();
            print!("{}", serde_norway::to_string(&snapshot)?);
            return Ok(());
        }
        Commands::Run => {}
    }

    let settings = Settings::new().context("Failed to load settings")?;
    init_telemetry::init_telemetry_and_tracing(&settings.telemetry)?;

    let app_state = AppState::new(settings).await?;

    let mut handles = vec![];
    {
        let handle = setup_http_server(
            app_state.clone(),
            &app_state.settings.api.bind_address,
            app_state.settings.traces_enabled(),
        )
        .await?;
        handles.push(handle);
    }

    sleep(std::time::Duration::from_millis(100)).await;

    loop {
        handles.retain(|handle| !handle.is_finished());

        if handles.is_empty() {
            info!("All tasks are done");
            break;
        }

        sleep(std::time::Duration::from_millis(200)).await;
    }

    Ok(())
}
