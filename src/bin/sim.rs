use battleships::{
    generate_map, AiPlayer, Board, GameEngine, GameStatus, InMemoryTransport, PlayerNode, Role,
    SessionConfig,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde::Serialize;

#[derive(Serialize)]
struct SideSummary {
    status: GameStatus,
    shots: usize,
}

#[derive(Serialize)]
struct Summary {
    player1: SideSummary,
    player2: SideSummary,
    winner: Option<&'static str>,
}

async fn side(seed: u64, transport: InMemoryTransport, role: Role) -> anyhow::Result<SideSummary> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let map = generate_map(&mut rng).map_err(|e| anyhow::anyhow!(e))?;
    let board = Board::from_map(&map).map_err(|e| anyhow::anyhow!(e))?;
    let mut node = PlayerNode::new(
        Box::new(AiPlayer::new()),
        GameEngine::new(board),
        Box::new(transport),
        SessionConfig::new(role),
    );
    let status = node.run(&mut rng).await?;
    Ok(SideSummary {
        status,
        shots: node.shots_fired(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let (t1, t2) = InMemoryTransport::pair();
    let (player1, player2) = tokio::try_join!(
        side(seed1, t1, Role::Starter),
        side(seed2, t2, Role::Responder)
    )?;

    let winner = match (player1.status, player2.status) {
        (GameStatus::Won, GameStatus::Lost) => Some("player1"),
        (GameStatus::Lost, GameStatus::Won) => Some("player2"),
        _ => None,
    };

    let summary = Summary {
        player1,
        player2,
        winner,
    };
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
