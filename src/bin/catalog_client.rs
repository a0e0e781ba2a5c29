use clap::{Parser, Subcommand};
use dotenv::dotenv;
use quicktutor_backend::client::{
    AuthApi, CatalogApi, CatalogSync, CatalogView, ClientError, Filter, HttpCatalogApi, SessionStore, TerminalView,
};
use quicktutor_backend::config::ClientConfig;
use quicktutor_backend::dto::user_dto::{LoginRequest, SignupRequest};
use quicktutor_backend::util::logger::Logger;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "catalog-client", version, about = "QuickTutor course catalog client")]
struct Cli {
    /// Server URL (overrides CATALOG_BASE_URL)
    #[arg(long)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the catalog and keep it fresh until Ctrl-C
    Watch {
        #[arg(long, default_value = "all")]
        tag: String,
        #[arg(long, default_value = "")]
        query: String,
        /// Poll interval in seconds (overrides CATALOG_POLL_INTERVAL)
        #[arg(long)]
        interval: Option<u64>,
        /// Poll only, never open the push stream
        #[arg(long)]
        no_push: bool,
    },
    /// Fetch the catalog once and print it
    List {
        #[arg(long, default_value = "all")]
        tag: String,
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Create an account
    Signup {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: String,
    },
    /// Log in with an email or username
    Login {
        identifier: String,
        #[arg(long)]
        password: String,
    },
    /// Show the logged-in user
    Me,
    /// Forget the stored session
    Logout,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenv();
    Logger::init_console("info,quicktutor_backend=info");

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ClientError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(server) = cli.server {
        config.base_url = server;
    }
    config.validate()?;

    let api = Arc::new(HttpCatalogApi::new(&config.base_url));
    let sessions = SessionStore::new(config.session_file.clone());

    match cli.command {
        Commands::Watch { tag, query, interval, no_push } => {
            if let Some(secs) = interval {
                config.poll_interval = Duration::from_secs(secs);
                config.validate()?;
            }
            watch(api, &config, Filter::new(tag, query), !no_push && config.push_enabled).await;
        }
        Commands::List { tag, query } => {
            let courses = api.fetch_courses().await?;
            TerminalView.render(&Filter::new(tag, query).render(&courses));
        }
        Commands::Signup { name, email, username, password } => {
            let request = SignupRequest { name, email, username, password, role: None };
            let res = api.signup(&request).await?;
            println!("{}", res.message);
        }
        Commands::Login { identifier, password } => {
            let request = if identifier.contains('@') {
                LoginRequest { email: Some(identifier), username: None, password: Some(password) }
            } else {
                LoginRequest { email: None, username: Some(identifier), password: Some(password) }
            };
            let res = sessions.login(api.as_ref(), &request).await?;
            println!("{} as {} ({})", res.message, res.user.name, res.user.role);
        }
        Commands::Me => match sessions.current_user(api.as_ref()).await? {
            Some(user) => println!(
                "{} ({}) {}",
                user.name,
                user.role,
                user.email.or(user.username).unwrap_or_default()
            ),
            None => return Err(ClientError::NotLoggedIn),
        },
        Commands::Logout => {
            sessions.logout(api.as_ref()).await?;
            println!("Logged out");
        }
    }
    Ok(())
}

async fn watch(api: Arc<HttpCatalogApi>, config: &ClientConfig, filter: Filter, push: bool) {
    let sync = CatalogSync::new(api, Arc::new(TerminalView));
    sync.initial_render().await;
    sync.set_filter(filter).await;

    let poller = {
        let sync = sync.clone();
        let every = config.poll_interval;
        tokio::spawn(async move { sync.poll_loop(every).await })
    };
    let pusher = push.then(|| {
        let sync = sync.clone();
        tokio::spawn(async move { sync.push_channel().await })
    });

    info!("Watching {} (Ctrl-C to stop)", config.base_url);
    let _ = tokio::signal::ctrl_c().await;

    poller.abort();
    if let Some(pusher) = pusher {
        pusher.abort();
    }
}
