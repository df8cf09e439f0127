#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleships::{
    generate_map, init_logging, map_file, ui::print_own_board, AiPlayer, Board, CliPlayer,
    GameEngine, GameStatus, InMemoryTransport, Player, PlayerNode, Role, SessionConfig,
    TcpTransport, Transport, DEFAULT_MAX_CONSECUTIVE_FAILURES, DEFAULT_READ_TIMEOUT,
};

#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use std::path::PathBuf;
#[cfg(feature = "std")]
use tokio::net::TcpListener;
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum PlayerType {
    Human,
    Ai,
}

/// Options shared by the networked modes.
#[derive(Args, Debug)]
#[cfg(feature = "std")]
struct GameOpts {
    #[arg(long)]
    port: u16,
    /// Board file; generated and saved there when missing.
    #[arg(long)]
    map: PathBuf,
    #[arg(long, value_enum, default_value_t = PlayerType::Human)]
    player: PlayerType,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Seconds to wait for each peer message.
    #[arg(long, default_value_t = DEFAULT_READ_TIMEOUT.as_secs())]
    timeout_secs: u64,
    /// Consecutive receive failures tolerated before giving up.
    #[arg(long, default_value_t = DEFAULT_MAX_CONSECUTIVE_FAILURES)]
    max_failures: u32,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Wait for one opponent to connect; the opponent fires first.
    Server {
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
        #[command(flatten)]
        opts: GameOpts,
    },
    /// Connect to a waiting server and fire the first shot.
    Client {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[command(flatten)]
        opts: GameOpts,
    },
    /// AI against AI on this machine.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Generate a valid board, printing it or saving it to a file.
    Generate {
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Server { bind, opts } => {
            let mut rng = make_rng(opts.seed);
            let board = map_file::load_or_generate(&opts.map, &mut rng)?;
            let addr = format!("{}:{}", bind, opts.port);
            let listener = TcpListener::bind(&addr).await?;
            println!("Waiting for an opponent on {}...", addr);
            let (stream, peer) = listener.accept().await?;
            drop(listener);
            println!("Opponent connected from {}", peer);
            let transport = TcpTransport::with_timeout(stream, Duration::from_secs(opts.timeout_secs));
            play(board, Box::new(transport), Role::Responder, &opts, rng).await?;
        }
        Commands::Client { host, opts } => {
            let mut rng = make_rng(opts.seed);
            let board = map_file::load_or_generate(&opts.map, &mut rng)?;
            let addr = format!("{}:{}", host, opts.port);
            println!("Connecting to {}...", addr);
            let stream = tokio::net::TcpStream::connect(&addr).await?;
            println!("Connected.");
            let transport = TcpTransport::with_timeout(stream, Duration::from_secs(opts.timeout_secs));
            play(board, Box::new(transport), Role::Starter, &opts, rng).await?;
        }
        Commands::Local { seed } => {
            println!("Starting local AI vs AI game...");
            let mut rng1 = make_rng(seed);
            let mut rng2 = match seed {
                Some(s) => SmallRng::seed_from_u64(s.wrapping_add(1)),
                None => SmallRng::from_rng(&mut rand::rng()),
            };
            let board1 = Board::from_map(&generate_map(&mut rng1).map_err(|e| anyhow::anyhow!(e))?)
                .map_err(|e| anyhow::anyhow!(e))?;
            let board2 = Board::from_map(&generate_map(&mut rng2).map_err(|e| anyhow::anyhow!(e))?)
                .map_err(|e| anyhow::anyhow!(e))?;

            let (t1, t2) = InMemoryTransport::pair();
            let f1 = async move {
                let mut node = PlayerNode::new(
                    Box::new(AiPlayer::new()),
                    GameEngine::new(board1),
                    Box::new(t1),
                    SessionConfig::new(Role::Starter),
                );
                let status = node.run(&mut rng1).await?;
                Ok::<_, anyhow::Error>((status, node.shots_fired()))
            };
            let f2 = async move {
                let mut node = PlayerNode::new(
                    Box::new(AiPlayer::new()),
                    GameEngine::new(board2),
                    Box::new(t2),
                    SessionConfig::new(Role::Responder),
                );
                let status = node.run(&mut rng2).await?;
                Ok::<_, anyhow::Error>((status, node.shots_fired()))
            };
            let ((s1, n1), (s2, n2)) = tokio::try_join!(f1, f2)?;
            println!("Player 1: {:?} after {} shots", s1, n1);
            println!("Player 2: {:?} after {} shots", s2, n2);
        }
        Commands::Generate { out, seed } => {
            let mut rng = make_rng(seed);
            let map = generate_map(&mut rng).map_err(|e| anyhow::anyhow!(e))?;
            match out {
                Some(path) => {
                    std::fs::write(&path, &map)?;
                    println!("Board saved to {}", path.display());
                }
                None => {
                    let board = Board::from_map(&map).map_err(|e| anyhow::anyhow!(e))?;
                    print_own_board(&board);
                    println!("{}", map);
                }
            }
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn play(
    board: Board,
    transport: Box<dyn Transport>,
    role: Role,
    opts: &GameOpts,
    mut rng: SmallRng,
) -> anyhow::Result<()> {
    print_own_board(&board);
    let player: Box<dyn Player> = match opts.player {
        PlayerType::Human => Box::new(CliPlayer::new()),
        PlayerType::Ai => {
            println!("AI player selected.");
            Box::new(AiPlayer::new())
        }
    };
    let config = SessionConfig {
        role,
        read_timeout: Duration::from_secs(opts.timeout_secs),
        max_consecutive_failures: opts.max_failures,
    };
    let mut node = PlayerNode::new(player, GameEngine::new(board), transport, config);
    match node.run(&mut rng).await {
        Ok(GameStatus::Won) => println!("You won!"),
        Ok(GameStatus::Lost) => println!("You lost."),
        Ok(GameStatus::InProgress) => {}
        Err(e) => return Err(e.context("game ended with an error")),
    }
    Ok(())
}
