#![cfg(feature = "std")]

use log::{debug, error, info, warn};
use rand::rngs::SmallRng;

use crate::{
    common::ProtocolError,
    config::{Role, SessionConfig},
    coord::Coord,
    game::{GameEngine, GameStatus},
    player::Player,
    protocol::Message,
    transport::Transport,
};

/// Where the turn protocol currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Nothing sent or received yet.
    Init,
    /// A line has been sent (or we are the responder); waiting for one reply.
    AwaitingPeer,
    /// Applying a received message and composing the reply.
    Processing(Message),
    /// Terminal. No further messages are sent or expected.
    GameOver,
}

/// Drives one game: combines a player, the engine and a transport.
pub struct PlayerNode {
    player: Box<dyn Player>,
    engine: GameEngine,
    transport: Box<dyn Transport>,
    config: SessionConfig,
    state: TurnState,
    /// Our shot still waiting for its outcome.
    pending_shot: Option<Coord>,
    /// Last line sent, resent after a failed receive.
    last_sent: Option<String>,
    consecutive_failures: u32,
}

impl PlayerNode {
    pub fn new(
        player: Box<dyn Player>,
        engine: GameEngine,
        transport: Box<dyn Transport>,
        config: SessionConfig,
    ) -> Self {
        Self {
            player,
            engine,
            transport,
            config,
            state: TurnState::Init,
            pending_shot: None,
            last_sent: None,
            consecutive_failures: 0,
        }
    }

    /// Play until game over. The transport is closed on every exit path.
    pub async fn run(&mut self, rng: &mut SmallRng) -> anyhow::Result<GameStatus> {
        let result = self.play(rng).await;
        if let Err(e) = self.transport.close().await {
            debug!("closing transport: {}", e);
        }
        match &result {
            Ok(status) => {
                info!("game finished: {:?}", status);
                self.player.game_over(&self.engine);
            }
            Err(e) => error!("game abandoned: {:#}", e),
        }
        result
    }

    async fn play(&mut self, rng: &mut SmallRng) -> anyhow::Result<GameStatus> {
        loop {
            self.state = match self.state {
                TurnState::Init => self.open(rng).await?,
                TurnState::AwaitingPeer => TurnState::Processing(self.await_peer().await?),
                TurnState::Processing(msg) => self.process(rng, msg).await?,
                TurnState::GameOver => return Ok(self.engine.status()),
            };
        }
    }

    async fn open(&mut self, rng: &mut SmallRng) -> anyhow::Result<TurnState> {
        if self.config.role == Role::Starter {
            let shot = self.player.select_target(rng, self.engine.knowledge());
            info!("opening the game with a shot at {}", shot);
            self.send(Message::Start { shot }).await?;
            self.pending_shot = Some(shot);
        } else {
            info!("waiting for the opponent to open the game");
        }
        Ok(TurnState::AwaitingPeer)
    }

    /// Receive exactly one message, resending our last line after each
    /// failed attempt until the failure budget runs out.
    async fn await_peer(&mut self) -> anyhow::Result<Message> {
        loop {
            let received =
                match tokio::time::timeout(self.config.read_timeout, self.transport.recv()).await {
                    Ok(r) => r,
                    Err(_) => Err(anyhow::anyhow!(
                        "no reply within {:?}",
                        self.config.read_timeout
                    )),
                };
            match received {
                Ok(line) => {
                    self.consecutive_failures = 0;
                    debug!("received: {}", line);
                    return line
                        .parse::<Message>()
                        .map_err(|e| anyhow::anyhow!(e).context(format!("bad message {:?}", line)));
                }
                Err(e) => {
                    self.consecutive_failures += 1;
                    warn!(
                        "connection error ({}/{}): {:#}",
                        self.consecutive_failures, self.config.max_consecutive_failures, e
                    );
                    if self.consecutive_failures >= self.config.max_consecutive_failures {
                        return Err(e.context(format!(
                            "giving up after {} consecutive failures",
                            self.consecutive_failures
                        )));
                    }
                    if let Some(line) = self.last_sent.clone() {
                        info!("resending: {}", line);
                        if let Err(e) = self.transport.send(&line).await {
                            warn!("resend failed: {:#}", e);
                        }
                    }
                }
            }
        }
    }

    async fn process(&mut self, rng: &mut SmallRng, msg: Message) -> anyhow::Result<TurnState> {
        match (msg, self.pending_shot) {
            (Message::Start { .. }, None) => {}
            (Message::Start { .. }, Some(_)) => {
                return Err(anyhow::anyhow!(ProtocolError::UnexpectedStart));
            }
            (Message::Reply { .. }, None) => {
                return Err(anyhow::anyhow!(ProtocolError::UnexpectedResult));
            }
            (Message::Reply { outcome, .. }, Some(mine)) => {
                self.engine.record_shot_result(mine, outcome);
                self.player.handle_shot_result(mine, outcome);
                self.pending_shot = None;
                if self.engine.status() == GameStatus::Won {
                    return Ok(TurnState::GameOver);
                }
            }
        }

        let incoming = msg.shot();
        let next_shot = self.player.select_target(rng, self.engine.knowledge());
        let reply = self.engine.opponent_shot(incoming, next_shot);
        if let Some(outcome) = reply.outcome() {
            self.player.handle_opponent_shot(incoming, outcome);
        }
        if reply.is_game_over() {
            self.deliver_final(reply).await?;
            return Ok(TurnState::GameOver);
        }
        self.send(reply).await?;
        self.pending_shot = Some(next_shot);
        Ok(TurnState::AwaitingPeer)
    }

    /// A failed write counts against the failure budget; the line is resent
    /// while awaiting the reply.
    async fn send(&mut self, msg: Message) -> anyhow::Result<()> {
        let line = msg.encode();
        debug!("sending: {}", line);
        let result = self.transport.send(&line).await;
        self.last_sent = Some(line);
        if let Err(e) = result {
            self.consecutive_failures += 1;
            warn!(
                "send failed ({}/{}): {:#}",
                self.consecutive_failures, self.config.max_consecutive_failures, e
            );
            if self.consecutive_failures >= self.config.max_consecutive_failures {
                return Err(e.context("giving up after repeated send failures"));
            }
        }
        Ok(())
    }

    /// Write the game-over line, retrying until it is written or the
    /// failure budget is spent.
    async fn deliver_final(&mut self, msg: Message) -> anyhow::Result<()> {
        let line = msg.encode();
        self.last_sent = Some(line.clone());
        loop {
            debug!("sending: {}", line);
            match self.transport.send(&line).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    self.consecutive_failures += 1;
                    warn!(
                        "send failed ({}/{}): {:#}",
                        self.consecutive_failures, self.config.max_consecutive_failures, e
                    );
                    if self.consecutive_failures >= self.config.max_consecutive_failures {
                        return Err(e.context("could not deliver the final result"));
                    }
                }
            }
        }
    }

    /// Current status of the underlying game engine.
    pub fn status(&self) -> GameStatus {
        self.engine.status()
    }

    /// Current turn-protocol state.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Total number of our shots that have been answered.
    pub fn shots_fired(&self) -> usize {
        self.engine.shots_fired()
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }
}
