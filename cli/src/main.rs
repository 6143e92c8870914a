//! CLI entrypoint for nexus-call-hub
//!
//! Wires the layers together with dependency injection: config →
//! HTTP client → gateways → registry/coordinator → use cases →
//! presentation.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use hub_application::{
    CancellationCoordinator, Credentials, LoginUseCase, QueueFeed as _, RoomDirectory as _,
    RunChatUseCase, StreamRegistry,
};
use hub_domain::AuthSession;
use hub_infrastructure::{
    ConfigLoader, FileConfig, HttpAuthGateway, HttpChatGateway, HttpQueueFeed, HttpRoomDirectory,
    HubApiClient,
};
use hub_presentation::{ChatRepl, Cli, Command, ConsoleFormatter};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    info!("Backend: {}", config.server.base_url);

    // === Dependency Injection ===
    let client = Arc::new(HubApiClient::new(
        config.server.base_url.clone(),
        config.server.timeout(),
    )?);
    let chat_gateway = Arc::new(
        HttpChatGateway::new(client.clone()).with_stream_timeout(config.server.stream_timeout()),
    );
    let registry = Arc::new(StreamRegistry::new());

    match cli.command {
        Command::Chat { login } => {
            if login {
                let auth_gateway = Arc::new(HttpAuthGateway::new(client.clone()));
                let user = prompt_login(auth_gateway).await?;
                if !cli.quiet {
                    println!("{}", ConsoleFormatter::user_line(&user));
                }
            }

            let use_case = Arc::new(RunChatUseCase::new(chat_gateway.clone(), registry.clone()));
            let coordinator = Arc::new(CancellationCoordinator::new(registry, chat_gateway));

            ChatRepl::new(use_case, coordinator)
                .with_quiet(cli.quiet)
                .run()
                .await?;
        }

        Command::Ask { message } => {
            let use_case = RunChatUseCase::new(chat_gateway, registry);
            let text = use_case.ask(hub_domain::ChatRequest::new(message)).await?;
            println!("{text}");
        }

        Command::Rooms => {
            let directory = HttpRoomDirectory::new(client);
            let rooms = directory.list_rooms().await?;
            print!("{}", ConsoleFormatter::rooms(&rooms));
        }

        Command::Queue { watch } => {
            let feed = HttpQueueFeed::new(client);
            loop {
                let status = feed.queue_status().await?;
                let agents = feed.agents().await?;
                print!("{}", ConsoleFormatter::queue(&status, &agents));
                if !watch {
                    break;
                }
                tokio::time::sleep(Duration::from_secs(config.queue.refresh_secs)).await;
                println!();
            }
        }
    }

    Ok(())
}

/// Prompt for credentials on stdin and log in, retrying on rejection.
async fn prompt_login(gateway: Arc<dyn hub_application::AuthGateway>) -> Result<hub_domain::User> {
    let use_case = LoginUseCase::new(gateway);
    let mut session = AuthSession::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let username = read_field(&mut lines, "Username: ").await?;
        let password = read_field(&mut lines, "Password: ").await?;

        match use_case
            .execute(Credentials::new(username, password), &mut session)
            .await
        {
            Ok(user) => return Ok(user),
            Err(e) => {
                eprintln!("{}", ConsoleFormatter::error_line(&e.to_string()));
                if session.login_attempts() >= 3 {
                    anyhow::bail!("too many failed login attempts");
                }
            }
        }
    }
}

async fn read_field(
    lines: &mut tokio::io::Lines<BufReader<tokio::io::Stdin>>,
    prompt: &str,
) -> Result<String> {
    use std::io::Write as _;
    print!("{prompt}");
    std::io::stdout().flush()?;
    let line = lines
        .next_line()
        .await?
        .ok_or_else(|| anyhow::anyhow!("stdin closed"))?;
    Ok(line.trim().to_string())
}
