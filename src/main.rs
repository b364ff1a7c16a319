use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sitecontent::connector::adapter::http::run_server;
use sitecontent::connector::api::{Container, ContainerConfig, Router};
use sitecontent::domain::DEFAULT_CONTACT_EMAIL;
use sitecontent::{Commands, ContactDefaults};

#[derive(Parser)]
#[command(name = "sitecontent")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true, default_value = "~/.sitecontent")]
    data_dir: String,

    /// Keep documents in memory only (nothing survives the process)
    #[arg(long, global = true)]
    memory_storage: bool,

    /// Public contact address used when the contact document is seeded
    #[arg(long, global = true, env = "SITE_CONTACT_EMAIL", default_value = DEFAULT_CONTACT_EMAIL)]
    contact_email: String,

    #[arg(long, global = true, env = "EMAILJS_SERVICE_ID", default_value = "")]
    service_id: String,

    #[arg(long, global = true, env = "EMAILJS_TEMPLATE_ID", default_value = "")]
    template_id: String,

    #[arg(long, global = true, env = "EMAILJS_PUBLIC_KEY", default_value = "")]
    public_key: String,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn contact_defaults(&self) -> ContactDefaults {
        ContactDefaults {
            email: self.contact_email.clone(),
            recipient_email: self.contact_email.clone(),
            service_id: self.service_id.clone(),
            template_id: self.template_id.clone(),
            public_key: self.public_key.clone(),
            ..ContactDefaults::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose when set.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(cli.verbose)));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ContainerConfig {
        data_dir: expand_tilde(&cli.data_dir),
        memory_storage: cli.memory_storage,
        contact: cli.contact_defaults(),
    };
    let container = Container::new(config)?;

    if let Commands::Serve { port, public } = cli.command {
        let host = if public { [0, 0, 0, 0] } else { [127, 0, 0, 1] };
        if container.memory_storage() {
            info!("Using in-memory storage; content is lost on shutdown");
        } else {
            info!("Using content database in {}", container.data_dir());
        }
        return run_server(Arc::new(container), SocketAddr::from((host, port))).await;
    }

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}

fn default_log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
