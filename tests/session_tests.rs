#![cfg(feature = "std")]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use battleships::{
    generate_map, AiPlayer, Board, GameEngine, GameStatus, InMemoryTransport, PlayerNode,
    ProtocolError, Role, SessionConfig, Transport, TurnState,
};
use rand::{rngs::SmallRng, SeedableRng};

const ONE_SHIP: &str = "\
..........
..........
..........
..........
..........
..........
#.........
..........
..........
..........";

fn node(map: &str, transport: Box<dyn Transport>, config: SessionConfig) -> PlayerNode {
    let board = Board::from_map(map).unwrap();
    PlayerNode::new(Box::new(AiPlayer::new()), GameEngine::new(board), transport, config)
}

fn random_board(rng: &mut SmallRng) -> Board {
    Board::from_map_validated(&generate_map(rng).unwrap()).unwrap()
}

/// Replays scripted receive results and records everything sent.
struct ScriptedTransport {
    script: VecDeque<Result<String, String>>,
    failing_sends: usize,
    sent: Arc<Mutex<Vec<String>>>,
    closed: Arc<Mutex<bool>>,
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        if self.failing_sends > 0 {
            self.failing_sends -= 1;
            return Err(anyhow::anyhow!("broken pipe"));
        }
        self.sent.lock().unwrap().push(line.to_string());
        Ok(())
    }

    async fn recv(&mut self) -> anyhow::Result<String> {
        match self.script.pop_front() {
            Some(Ok(line)) => Ok(line),
            Some(Err(e)) => Err(anyhow::anyhow!(e)),
            None => std::future::pending().await,
        }
    }

    async fn close(&mut self) -> anyhow::Result<()> {
        *self.closed.lock().unwrap() = true;
        Ok(())
    }
}

fn scripted(
    script: Vec<Result<&str, &str>>,
) -> (ScriptedTransport, Arc<Mutex<Vec<String>>>, Arc<Mutex<bool>>) {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let closed = Arc::new(Mutex::new(false));
    let transport = ScriptedTransport {
        script: script
            .into_iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect(),
        failing_sends: 0,
        sent: sent.clone(),
        closed: closed.clone(),
    };
    (transport, sent, closed)
}

#[tokio::test]
async fn ai_vs_ai_in_memory_game_finishes() {
    let mut rng1 = SmallRng::seed_from_u64(1);
    let mut rng2 = SmallRng::seed_from_u64(2);
    let board1 = random_board(&mut rng1);
    let board2 = random_board(&mut rng2);
    let (t1, t2) = InMemoryTransport::pair();

    let f1 = async move {
        let mut n = PlayerNode::new(
            Box::new(AiPlayer::new()),
            GameEngine::new(board1),
            Box::new(t1),
            SessionConfig::new(Role::Starter),
        );
        let status = n.run(&mut rng1).await?;
        Ok::<_, anyhow::Error>((status, n.shots_fired(), n.state(), n.engine().board().all_sunk()))
    };
    let f2 = async move {
        let mut n = PlayerNode::new(
            Box::new(AiPlayer::new()),
            GameEngine::new(board2),
            Box::new(t2),
            SessionConfig::new(Role::Responder),
        );
        let status = n.run(&mut rng2).await?;
        Ok::<_, anyhow::Error>((status, n.shots_fired(), n.state(), n.engine().board().all_sunk()))
    };
    let (a, b) = tokio::try_join!(f1, f2).unwrap();

    assert_eq!(a.2, TurnState::GameOver);
    assert_eq!(b.2, TurnState::GameOver);
    match (a.0, b.0) {
        (GameStatus::Won, GameStatus::Lost) => assert!(b.3 && !a.3),
        (GameStatus::Lost, GameStatus::Won) => assert!(a.3 && !b.3),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(a.1 <= 100 && b.1 <= 100);
}

#[tokio::test]
async fn responder_answers_start_and_loses_on_last_ship() {
    let (t1, mut peer) = InMemoryTransport::pair();
    let mut rng = SmallRng::seed_from_u64(5);
    let handle = tokio::spawn(async move {
        let mut n = node(ONE_SHIP, Box::new(t1), SessionConfig::new(Role::Responder));
        let result = n.run(&mut rng).await;
        (result.map_err(|e| e.to_string()), n.state())
    });

    peer.send("start;G1").await.unwrap();
    let reply = peer.recv().await.unwrap();
    assert!(reply.starts_with("game-over;"), "{}", reply);

    let (result, state) = handle.await.unwrap();
    assert_eq!(result, Ok(GameStatus::Lost));
    assert_eq!(state, TurnState::GameOver);
    assert!(peer.recv().await.is_err());
}

#[tokio::test]
async fn starter_stops_after_game_over_report() {
    let (transport, sent, closed) = scripted(vec![Ok("game-over;A1")]);
    let mut n = node(ONE_SHIP, Box::new(transport), SessionConfig::new(Role::Starter));
    let mut rng = SmallRng::seed_from_u64(9);

    assert_eq!(n.state(), TurnState::Init);
    assert_eq!(n.run(&mut rng).await.unwrap(), GameStatus::Won);
    assert_eq!(n.shots_fired(), 1);
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].starts_with("start;"));
    assert!(*closed.lock().unwrap());
}

#[tokio::test]
async fn miss_is_answered_with_own_result_and_next_shot() {
    let (transport, sent, _) = scripted(vec![Ok("start;A1"), Ok("game-over;B2")]);
    let mut n = node(ONE_SHIP, Box::new(transport), SessionConfig::new(Role::Responder));
    let mut rng = SmallRng::seed_from_u64(11);

    assert_eq!(n.run(&mut rng).await.unwrap(), GameStatus::Won);
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].starts_with("miss;"));
}

#[tokio::test]
async fn failed_receives_resend_the_last_line() {
    let (transport, sent, closed) =
        scripted(vec![Err("reset"), Err("reset"), Ok("game-over;A1")]);
    let mut n = node(ONE_SHIP, Box::new(transport), SessionConfig::new(Role::Starter));
    let mut rng = SmallRng::seed_from_u64(3);

    assert_eq!(n.run(&mut rng).await.unwrap(), GameStatus::Won);
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 3);
    assert!(sent.iter().all(|line| line == &sent[0]));
    assert!(*closed.lock().unwrap());
}

#[tokio::test]
async fn too_many_failures_abandon_the_game() {
    let (transport, sent, closed) = scripted(vec![Err("reset"), Err("reset"), Err("reset")]);
    let mut n = node(ONE_SHIP, Box::new(transport), SessionConfig::new(Role::Starter));
    let mut rng = SmallRng::seed_from_u64(3);

    let err = n.run(&mut rng).await.unwrap_err();
    assert!(format!("{:#}", err).contains("consecutive failures"));
    assert_eq!(n.status(), GameStatus::InProgress);
    // the opening line plus one resend per tolerated failure
    assert_eq!(sent.lock().unwrap().len(), 3);
    assert!(*closed.lock().unwrap());
}

#[tokio::test]
async fn failed_send_is_retried_while_waiting() {
    let (mut transport, sent, _) = scripted(vec![Err("reset"), Ok("game-over;A1")]);
    transport.failing_sends = 1;
    let mut n = node(ONE_SHIP, Box::new(transport), SessionConfig::new(Role::Starter));
    let mut rng = SmallRng::seed_from_u64(3);

    assert_eq!(n.run(&mut rng).await.unwrap(), GameStatus::Won);
    // the opening line only got through on the resend
    assert_eq!(sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn game_over_reply_survives_a_failed_write() {
    let (mut transport, sent, _) = scripted(vec![Ok("start;G1")]);
    transport.failing_sends = 1;
    let mut n = node(ONE_SHIP, Box::new(transport), SessionConfig::new(Role::Responder));
    let mut rng = SmallRng::seed_from_u64(12);

    assert_eq!(n.run(&mut rng).await.unwrap(), GameStatus::Lost);
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].starts_with("game-over;"), "{}", sent[0]);
}

#[tokio::test]
async fn undeliverable_game_over_is_an_error() {
    let (mut transport, sent, closed) = scripted(vec![Ok("start;G1")]);
    transport.failing_sends = 3;
    let mut n = node(ONE_SHIP, Box::new(transport), SessionConfig::new(Role::Responder));
    let mut rng = SmallRng::seed_from_u64(12);

    let err = n.run(&mut rng).await.unwrap_err();
    assert!(format!("{:#}", err).contains("could not deliver the final result"));
    assert!(sent.lock().unwrap().is_empty());
    assert!(*closed.lock().unwrap());
}

#[tokio::test]
async fn silent_peer_times_out() {
    let (transport, _, closed) = scripted(vec![]);
    let config = SessionConfig {
        role: Role::Starter,
        read_timeout: Duration::from_millis(20),
        max_consecutive_failures: 2,
    };
    let mut n = node(ONE_SHIP, Box::new(transport), config);
    let mut rng = SmallRng::seed_from_u64(4);

    let err = n.run(&mut rng).await.unwrap_err();
    assert!(format!("{:#}", err).contains("no reply within"));
    assert!(*closed.lock().unwrap());
}

#[tokio::test]
async fn second_start_is_a_desync() {
    let (transport, _, closed) = scripted(vec![Ok("start;J10"), Ok("start;J9")]);
    let mut n = node(ONE_SHIP, Box::new(transport), SessionConfig::new(Role::Responder));
    let mut rng = SmallRng::seed_from_u64(6);

    let err = n.run(&mut rng).await.unwrap_err();
    assert_eq!(err.downcast_ref::<ProtocolError>(), Some(&ProtocolError::UnexpectedStart));
    assert!(*closed.lock().unwrap());
}

#[tokio::test]
async fn result_before_any_shot_is_a_desync() {
    let (transport, _, _) = scripted(vec![Ok("hit;A1")]);
    let mut n = node(ONE_SHIP, Box::new(transport), SessionConfig::new(Role::Responder));
    let mut rng = SmallRng::seed_from_u64(6);

    let err = n.run(&mut rng).await.unwrap_err();
    assert_eq!(err.downcast_ref::<ProtocolError>(), Some(&ProtocolError::UnexpectedResult));
}

#[tokio::test]
async fn malformed_line_fails_fast() {
    let (transport, sent, _) = scripted(vec![Ok("hello there")]);
    let mut n = node(ONE_SHIP, Box::new(transport), SessionConfig::new(Role::Responder));
    let mut rng = SmallRng::seed_from_u64(8);

    let err = n.run(&mut rng).await.unwrap_err();
    assert!(err.to_string().contains("bad message"));
    assert!(sent.lock().unwrap().is_empty());
}
