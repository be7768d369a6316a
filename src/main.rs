use clap::{Parser, Subcommand};

use wuphf_client::{
    direct_chat_id, ChatSync, Config, ConfigError, HttpChatService, Session, Snapshot,
};

#[derive(Parser)]
#[command(name = "wuphf-client")]
#[command(about = "Browse and send WUPHF chats from the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Signed-in user id (overrides config)
    #[arg(short, long)]
    user_id: Option<String>,

    /// Authorization token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every chat of the signed-in user
    Chats,
    /// Show the message history of a chat
    History {
        chat_id: String,
    },
    /// Send a message and show the updated chat
    Send {
        /// Target chat id
        #[arg(long, conflicts_with = "to", required_unless_present = "to")]
        chat: Option<String>,
        /// Recipient user id; the direct chat id is derived from it
        #[arg(long)]
        to: Option<String>,
        message: String,
    },
    /// Print the chat id shared by a set of users
    ChatId {
        #[arg(required = true)]
        participants: Vec<String>,
    },
    /// Generate default config
    InitConfig,
    /// Show version
    Version,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Version => {
            println!("wuphf-client v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => init_config(),
        Commands::ChatId { participants } => {
            println!("{}", direct_chat_id(participants.as_slice()));
        }
        command => {
            let config = load_config(&cli.config, cli.user_id.clone(), cli.token.clone());
            if let Err(e) = run(&config, command) {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        }
    }
}

fn load_config(path: &str, user_id: Option<String>, token: Option<String>) -> Config {
    let mut config = if std::path::Path::new(path).exists() {
        Config::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        })
    } else {
        Config::default()
    };
    config.apply_env();

    if user_id.is_some() {
        config.session.user_id = user_id;
    }
    if token.is_some() {
        config.session.token = token;
    }
    config
}

fn run(config: &Config, command: &Commands) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    let session = config.session()?;
    let remote = HttpChatService::with_timeout(&config.server.base_url, config.timeout())?;
    let sync = ChatSync::new(remote).with_policy(config.fetch_policy());

    tracing::info!("Using chat service at {}", sync.remote().base_url());

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        match command {
            Commands::Chats => {
                sync.load_chat_list(&session).await;
                print_chat_list(&sync.snapshot());
            }
            Commands::History { chat_id } => {
                sync.load_chat_messages(&session, chat_id).await;
                print_history(&sync.snapshot(), chat_id);
            }
            Commands::Send { chat, to, message } => {
                let chat_id = resolve_chat(&session, chat.as_deref(), to.as_deref())?;
                sync.load_chat_messages(&session, &chat_id).await;
                sync.send_and_echo(&session, &chat_id, message.as_str()).await?;
                println!("Sent to {}", chat_id);

                // A chat without history (e.g. a first message) has nothing to echo into
                let snapshot = sync.snapshot();
                if snapshot.chat(&chat_id).is_some() {
                    print_history(&snapshot, &chat_id);
                }
            }
            _ => {}
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

fn resolve_chat(session: &Session, chat: Option<&str>, to: Option<&str>) -> Result<String, ConfigError> {
    match (chat, to) {
        (Some(chat_id), _) => Ok(chat_id.to_string()),
        (None, Some(recipient)) => Ok(direct_chat_id(&[session.user_id.as_str(), recipient])),
        (None, None) => Err(ConfigError::MissingField("--chat or --to".to_string())),
    }
}

fn print_chat_list(snapshot: &Snapshot) {
    if let Some(error) = snapshot.list_status.error() {
        println!("Error: {}", error);
        return;
    }
    if snapshot.chats.is_empty() {
        println!("No chats yet.");
        return;
    }
    for chat in &snapshot.chats {
        match chat.last_message() {
            Some(last) => println!("{}  ({} messages, last: {})", chat.id, chat.messages.len(), last),
            None => println!("{}", chat.id),
        }
    }
}

fn print_history(snapshot: &Snapshot, chat_id: &str) {
    if let Some(error) = snapshot.message_status.get(chat_id).and_then(|s| s.error()) {
        println!("Error: {}", error);
        return;
    }
    match snapshot.chat(chat_id) {
        Some(chat) if !chat.is_empty() => {
            for message in &chat.messages {
                println!("{}", message);
            }
        }
        _ => println!("No messages in {}.", chat_id),
    }
}

fn init_config() {
    match Config::default().to_yaml() {
        Ok(yaml) => {
            println!("{}", yaml);
            println!("\nSave this to config.yaml and adjust as needed.");
        }
        Err(e) => tracing::error!("Failed to render config: {}", e),
    }
}
