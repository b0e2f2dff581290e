/// Coogs - command-line client for Coogs Music
use clap::{Args, Parser, Subcommand};
use coogs_cli::{play::WalkOptions, App, CliConfig};
use coogs_core::{ArtistId, FileSessionStore, ListenerId, Session, SongId, ToastKind};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "coogs")]
#[command(about = "Coogs Music client", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the stored session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Show a listener profile
    Profile(ListenerArg),
    /// Show like/pin status for songs
    Status {
        /// Song ids
        #[arg(required = true)]
        ids: Vec<u64>,
        #[command(flatten)]
        listener: ListenerArg,
    },
    /// Like or unlike a song
    Like {
        song: u64,
        #[command(flatten)]
        listener: ListenerArg,
    },
    /// Pin or unpin a song
    Pin {
        song: u64,
        #[command(flatten)]
        listener: ListenerArg,
    },
    /// List playlists
    Playlists(ListenerArg),
    /// Show subscription
    Subscription(ListenerArg),
    /// List advertisements
    Ads,
    /// Play songs headlessly, reporting each play
    Play {
        /// Song ids in queue order
        #[arg(required = true)]
        ids: Vec<u64>,
        /// Shuffle before playing
        #[arg(long)]
        shuffle: bool,
        /// Queue index to start from
        #[arg(long, default_value_t = 0)]
        start: usize,
        /// Stop after this many track starts
        #[arg(long, default_value_t = 100)]
        max_plays: usize,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Store a session
    Set {
        /// Listener id
        #[arg(long, conflicts_with = "artist", required_unless_present = "artist")]
        listener: Option<u64>,
        /// Artist id
        #[arg(long)]
        artist: Option<u64>,
        /// Display username
        #[arg(short, long)]
        username: String,
    },
    /// Print the stored session
    Show,
    /// Forget the stored session
    Clear,
}

#[derive(Args)]
struct ListenerArg {
    /// Listener id (defaults to the stored session)
    #[arg(short, long)]
    listener: Option<u64>,
}

impl ListenerArg {
    fn id(&self) -> Option<ListenerId> {
        self.listener.map(ListenerId::new)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coogs=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api.url = url;
    }

    let sessions = Arc::new(FileSessionStore::new(config.session_path()));
    let app = App::new(config, sessions)?;
    let mut toasts = app.toasts().subscribe();

    let result = run(&app, cli.command).await;

    while let Ok(toast) = toasts.try_recv() {
        let label = match toast.kind {
            ToastKind::Success => "ok",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        };
        eprintln!("[{}] {}", label, toast.message);
    }

    result
}

async fn run(app: &App, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Session { action } => session(app, action)?,
        Commands::Profile(listener) => {
            let profile = app.profile(app.listener(listener.id())?).await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Commands::Status { ids, listener } => {
            let listener_id = app.listener(listener.id())?;
            let ids: Vec<SongId> = ids.into_iter().map(SongId::new).collect();
            let view = app.song_status(listener_id, &ids).await?;

            for id in view.ordered {
                let pin = if view.pinned == Some(id) { "pinned" } else { "" };
                let like = if view.liked.contains(&id) { "liked" } else { "" };
                println!("{:>8}  {:<6} {}", id.get(), like, pin);
            }
        }
        Commands::Like { song, listener } => {
            let listener_id = app.listener(listener.id())?;
            let liked = app.toggle_like(listener_id, SongId::new(song)).await?;
            println!("song {} {}", song, if liked { "liked" } else { "not liked" });
        }
        Commands::Pin { song, listener } => {
            let listener_id = app.listener(listener.id())?;
            match app.toggle_pin(listener_id, SongId::new(song)).await? {
                Some(pinned) => println!("pinned song {}", pinned),
                None => println!("no pinned song"),
            }
        }
        Commands::Playlists(listener) => {
            for playlist in app.playlists(app.listener(listener.id())?).await? {
                println!(
                    "{:>6}  {} ({} tracks)",
                    playlist.playlist_id.get(), playlist.name, playlist.track_count
                );
            }
        }
        Commands::Subscription(listener) => {
            match app.subscription(app.listener(listener.id())?).await? {
                Some(subscription) => {
                    println!("{}", serde_json::to_string_pretty(&subscription)?);
                }
                None => println!("no subscription"),
            }
        }
        Commands::Ads => {
            for ad in app.advertisements().await? {
                println!("{}  {}", ad.ad_name, ad.link.unwrap_or_default());
            }
        }
        Commands::Play {
            ids,
            shuffle,
            start,
            max_plays,
        } => {
            let ids: Vec<SongId> = ids.into_iter().map(SongId::new).collect();
            let run = app
                .play(
                    &ids,
                    WalkOptions {
                        shuffle,
                        start_index: start,
                        max_plays,
                    },
                )
                .await?;

            let played: Vec<String> = run.played.iter().map(ToString::to_string).collect();
            println!("played: {}", played.join(" "));
            if !run.reported {
                println!("(no listener session, plays were not reported)");
            }
        }
    }

    Ok(())
}

fn session(app: &App, action: SessionAction) -> anyhow::Result<()> {
    match action {
        SessionAction::Set {
            listener,
            artist,
            username,
        } => {
            let session = match (listener, artist) {
                (Some(id), _) => Session::listener(ListenerId::new(id), username),
                (None, Some(id)) => Session::artist(ArtistId::new(id), username),
                (None, None) => anyhow::bail!("either --listener or --artist is required"),
            };
            app.save_session(&session)?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        SessionAction::Show => match app.session()? {
            Some(session) => println!("{}", serde_json::to_string_pretty(&session)?),
            None => println!("not logged in"),
        },
        SessionAction::Clear => app.clear_session()?,
    }

    Ok(())
}
