//! The turn and scoring state machine.
//!
//! ```text
//!  NotStarted --start_game--> AwaitingPlayer1Play <--> AwaitingPlayer2Play
//!                                   |                       |
//!                                   +--> HandEnded <--------+
//!                                          |     |
//!                                 next hand      max_score reached
//!                                          v     v
//!                             AwaitingPlayerNPlay  GameEnded
//! ```
//!
//! ## Operations
//!
//! - `start_game`: reset scores, shuffle, deal, player 1 opens
//! - `play_domino`: validate, place, score the open ends, then either end
//!   the hand (domino out) or hand the turn to the opponent
//! - `player_is_blocked`: record a block; two blocks end the hand
//!
//! Every operation validates the whole request first. A rejected request
//! returns a `RulesError` and changes nothing.
//!
//! ## Turn handoff
//!
//! The opponent gets the turn if they can play. If not they draw exactly
//! one domino (which may still be unplayable). With the stock exhausted
//! they are blocked on the spot.

use tracing::{debug, info, warn};

use super::event::{GameEvent, GameObserver, NullObserver};
use super::scoring::{block_award, domino_out_points, play_points};
use super::turn::{GameResult, HandResult, PlayOutcome, TurnState};
use crate::board::{Board, End};
use crate::core::{GameConfig, GameRng, GameRngState, PlayerId, PlayerMap, Result, RulesError};
use crate::tiles::{Domino, DominoId, Hand, Stock};

/// A fixed deal for the first hand, in place of a shuffle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deal {
    pub hands: PlayerMap<Hand>,
    /// Remaining stock, top = end of vec.
    pub stock: Stock,
}

impl Deal {
    #[must_use]
    pub fn new(player1: Hand, player2: Hand, stock: Stock) -> Self {
        let mut hands = PlayerMap::with_default();
        hands[PlayerId::ONE] = player1;
        hands[PlayerId::TWO] = player2;
        Self { hands, stock }
    }

    /// Every tile must be a member of the double-`max_pip` set, dealt once.
    fn validate(&self, max_pip: u8) -> Result<()> {
        for (player, hand) in self.hands.iter() {
            if hand.is_empty() {
                return Err(RulesError::EmptyDealtHand { player });
            }
        }
        let set = Domino::full_set(max_pip);
        let mut seen: Vec<DominoId> = Vec::new();
        let held = self.hands.iter().flat_map(|(_, hand)| hand.iter());
        for domino in held.chain(self.stock.iter()) {
            let id = domino.id();
            let known = set
                .get(id.raw() as usize)
                .is_some_and(|canonical| canonical.same_pips(domino));
            if !known {
                return Err(RulesError::NotInSet { domino: id });
            }
            if seen.contains(&id) {
                return Err(RulesError::DuplicateDomino { domino: id });
            }
            seen.push(id);
        }
        Ok(())
    }
}

/// What happened when the turn passed to the next player.
#[derive(Default)]
struct Handoff {
    drawn: Option<(PlayerId, DominoId)>,
    hand_result: Option<HandResult>,
}

/// Runs a two-player game: turns, scoring, hand and game transitions.
///
/// The controller owns the board, both hands and the stock, and is their
/// only mutator. Presentation code reads state through the accessors and
/// listens for `GameEvent`s through the injected observer.
pub struct Controller<O: GameObserver = NullObserver> {
    config: GameConfig,
    rng: GameRng,
    stock: Stock,
    board: Board,
    hands: PlayerMap<Hand>,
    scores: PlayerMap<u32>,
    blocked: PlayerMap<bool>,
    state: TurnState,
    hand_number: u32,
    opener: PlayerId,
    observer: O,
}

impl Controller<NullObserver> {
    /// Create a controller that reports events nowhere.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_observer(config, NullObserver)
    }
}

impl<O: GameObserver> Controller<O> {
    /// Create a controller reporting events to `observer`.
    ///
    /// Fails if `config` cannot be dealt.
    pub fn with_observer(config: GameConfig, observer: O) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rng: GameRng::new(config.seed),
            stock: Stock::new(config.max_pip),
            board: Board::new(),
            hands: PlayerMap::with_default(),
            scores: PlayerMap::with_value(0),
            blocked: PlayerMap::with_value(false),
            state: TurnState::NotStarted,
            hand_number: 0,
            opener: PlayerId::ONE,
            config,
            observer,
        })
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> TurnState {
        self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player]
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores[player]
    }

    #[must_use]
    pub fn scores(&self) -> &PlayerMap<u32> {
        &self.scores
    }

    #[must_use]
    pub fn is_blocked(&self, player: PlayerId) -> bool {
        self.blocked[player]
    }

    /// Dominoes left in the stock.
    #[must_use]
    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    /// 1-based number of the current hand, 0 before the game starts.
    #[must_use]
    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }

    /// The player who opened the current hand.
    #[must_use]
    pub fn opener(&self) -> PlayerId {
        self.opener
    }

    /// RNG position, enough to reproduce the next shuffle.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Every legal (domino, attach point) pair for `player` right now.
    ///
    /// Empty unless it is `player`'s turn.
    #[must_use]
    pub fn legal_plays(&self, player: PlayerId) -> Vec<(DominoId, Option<End>)> {
        if self.state.active_player() != Some(player) {
            return Vec::new();
        }
        self.hands[player]
            .iter()
            .flat_map(|d| {
                self.board
                    .legal_attachments(d)
                    .into_iter()
                    .map(move |attach| (d.id(), attach))
            })
            .collect()
    }

    /// The winner, once the game has ended.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if self.state != TurnState::GameEnded {
            return None;
        }
        let one = self.scores[PlayerId::ONE];
        let two = self.scores[PlayerId::TWO];
        Some(match one.cmp(&two) {
            std::cmp::Ordering::Greater => GameResult::Winner(PlayerId::ONE),
            std::cmp::Ordering::Less => GameResult::Winner(PlayerId::TWO),
            std::cmp::Ordering::Equal => GameResult::Draw,
        })
    }

    // === Operations ===

    /// Start (or restart) a game: scores to zero, fresh shuffle and deal,
    /// player 1 to open.
    pub fn start_game(&mut self) {
        self.reset_game();
        self.start_hand(PlayerId::ONE);
        self.emit_scores();
    }

    /// Start a game from a fixed deal instead of a shuffle.
    ///
    /// Later hands are shuffled as usual.
    pub fn start_game_with(&mut self, deal: Deal) -> Result<()> {
        deal
            .validate(self.config.max_pip)
            .inspect_err(|err| warn!(%err, "rejected deal"))?;
        self.reset_game();
        self.begin_hand(PlayerId::ONE, deal.hands, deal.stock);
        self.emit_scores();
        Ok(())
    }

    /// Play `domino` from `player`'s hand onto the open end `attach`.
    ///
    /// `attach` is `None` only for the first domino of a hand.
    pub fn play_domino(
        &mut self,
        player: PlayerId,
        domino: DominoId,
        attach: Option<End>,
    ) -> Result<PlayOutcome> {
        let tile = self
            .validate_play(player, domino, attach)
            .inspect_err(|err| warn!(%player, %domino, %err, "rejected play"))?;

        let placed = self.board.append(tile, attach)?;
        let removed = self.hands[player].remove(domino);
        debug_assert!(removed.is_some(), "validated domino missing from hand");
        self.blocked[player] = false;

        let open_end_sum = self.board.open_end_sum();
        debug!(%player, domino = %placed, ?attach, open_end_sum, "played");
        self.emit(GameEvent::Played {
            player,
            domino,
            attach,
            open_end_sum,
        });

        let mut points = play_points(open_end_sum);
        self.award(player, points);

        if self.hands[player].is_empty() {
            let opponent = player.opponent();
            let opponent_pips = self.hands[opponent].pip_total();
            let award = domino_out_points(&self.hands[opponent]);
            self.award(player, award);
            points += award;

            let result = HandResult::DominoOut {
                winner: player,
                opponent_pips,
                award,
            };
            self.finish_hand(result.clone(), player);
            return Ok(PlayOutcome {
                points,
                hand_result: Some(result),
                drawn: None,
                state: self.state,
            });
        }

        let handoff = self.hand_off(player.opponent());
        Ok(PlayOutcome {
            points,
            hand_result: handoff.hand_result,
            drawn: handoff.drawn,
            state: self.state,
        })
    }

    /// `player` cannot play. Two consecutive blocks end the hand.
    pub fn player_is_blocked(&mut self, player: PlayerId) -> Result<PlayOutcome> {
        self.check_turn(player)
            .and_then(|()| {
                if self.hands[player].has_playable(&self.board) {
                    Err(RulesError::HasLegalPlay { player })
                } else {
                    Ok(())
                }
            })
            .inspect_err(|err| warn!(%player, %err, "rejected block"))?;

        let handoff = self.block(player);
        let points = match &handoff.hand_result {
            Some(result) if result.scorer() == Some(player) => result.award(),
            _ => 0,
        };
        Ok(PlayOutcome {
            points,
            hand_result: handoff.hand_result,
            drawn: handoff.drawn,
            state: self.state,
        })
    }

    // === Internals ===

    fn check_turn(&self, player: PlayerId) -> Result<()> {
        match self.state {
            TurnState::NotStarted => Err(RulesError::NotStarted),
            TurnState::GameEnded => Err(RulesError::GameOver),
            state if state.active_player() == Some(player) => Ok(()),
            _ => Err(RulesError::NotYourTurn { player }),
        }
    }

    fn validate_play(
        &self,
        player: PlayerId,
        domino: DominoId,
        attach: Option<End>,
    ) -> Result<Domino> {
        self.check_turn(player)?;
        let tile = self.hands[player]
            .get(domino)
            .copied()
            .ok_or(RulesError::DominoNotInHand { player, domino })?;
        self.board.placement_for(&tile, attach)?;
        Ok(tile)
    }

    fn emit(&mut self, event: GameEvent) {
        self.observer.on_event(&event);
    }

    fn emit_scores(&mut self) {
        self.emit(GameEvent::ScoreChanged {
            player1: self.scores[PlayerId::ONE],
            player2: self.scores[PlayerId::TWO],
        });
    }

    fn award(&mut self, player: PlayerId, points: u32) {
        if points == 0 {
            return;
        }
        self.scores[player] += points;
        debug!(%player, points, total = self.scores[player], "scored");
        self.emit_scores();
    }

    fn reset_game(&mut self) {
        self.scores = PlayerMap::with_value(0);
        self.hand_number = 0;
        info!(seed = self.rng.seed(), max_score = self.config.max_score, "game started");
        self.emit(GameEvent::GameStarted);
    }

    /// Clear the table, shuffle and deal a new hand.
    fn start_hand(&mut self, opener: PlayerId) {
        let mut stock = Stock::new(self.config.max_pip);
        stock.shuffle(&mut self.rng);

        let mut hands: PlayerMap<Hand> = PlayerMap::with_default();
        for (_, hand) in hands.iter_mut() {
            stock.deal(hand, self.config.hand_size);
        }
        self.begin_hand(opener, hands, stock);
    }

    fn begin_hand(&mut self, opener: PlayerId, hands: PlayerMap<Hand>, stock: Stock) {
        self.board.clear();
        self.hands = hands;
        self.stock = stock;
        self.blocked = PlayerMap::with_value(false);
        self.hand_number += 1;
        self.opener = opener;
        self.state = TurnState::awaiting(opener);

        info!(hand = self.hand_number, %opener, stock = self.stock.len(), "hand started");
        self.emit(GameEvent::HandStarted {
            hand: self.hand_number,
            opener,
        });
    }

    /// Score is settled; end the game or deal the next hand.
    fn finish_hand(&mut self, result: HandResult, next_opener: PlayerId) {
        self.state = TurnState::HandEnded;
        info!(hand = self.hand_number, ?result, "hand ended");
        self.emit(GameEvent::HandEnded { result });

        let max = self.config.max_score;
        if self.scores.iter().any(|(_, &score)| score >= max) {
            self.state = TurnState::GameEnded;
            if let Some(result) = self.result() {
                info!(?result, "game ended");
                self.emit(GameEvent::GameEnded { result });
            }
            return;
        }
        self.start_hand(next_opener);
    }

    /// Give the turn to `next`, drawing for them once if they cannot play.
    fn hand_off(&mut self, next: PlayerId) -> Handoff {
        self.state = TurnState::awaiting(next);
        if self.hands[next].has_playable(&self.board) {
            return Handoff::default();
        }

        match self.stock.draw() {
            Some(domino) => {
                let id = domino.id();
                self.hands[next].add(domino);
                debug!(player = %next, %domino, left = self.stock.len(), "drew");
                self.emit(GameEvent::Drew {
                    player: next,
                    domino: id,
                });
                Handoff {
                    drawn: Some((next, id)),
                    hand_result: None,
                }
            }
            None => {
                debug!(player = %next, "stock exhausted");
                self.block(next)
            }
        }
    }

    fn block(&mut self, player: PlayerId) -> Handoff {
        self.blocked[player] = true;
        debug!(%player, "blocked");
        self.emit(GameEvent::Blocked { player });

        if !self.blocked[player.opponent()] {
            return self.hand_off(player.opponent());
        }

        let pip_totals = PlayerMap::new(|p| self.hands[p].pip_total());
        let (awardee, award) = match block_award(&pip_totals) {
            Some((p, points)) => (Some(p), points),
            None => (None, 0),
        };
        if let Some(p) = awardee {
            self.award(p, award);
        }

        let result = HandResult::Blocked {
            awardee,
            pip_totals,
            award,
        };
        self.finish_hand(result.clone(), awardee.unwrap_or(self.opener));
        Handoff {
            drawn: None,
            hand_result: Some(result),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::EventLog;

    /// Double-six domino with its canonical id.
    fn d(id: u8, a: u8, b: u8) -> Domino {
        Domino::new(DominoId::new(id), a, b)
    }

    fn deal(one: Vec<Domino>, two: Vec<Domino>, stock: Vec<Domino>) -> Deal {
        Deal::new(
            Hand::from_dominoes(one),
            Hand::from_dominoes(two),
            Stock::from_dominoes(6, stock),
        )
    }

    fn controller_with(deal: Deal) -> Controller<EventLog> {
        let mut c = Controller::with_observer(GameConfig::new(), EventLog::new()).unwrap();
        c.start_game_with(deal).unwrap();
        c
    }

    #[test]
    fn test_start_game_deals_both_hands() {
        let mut c = Controller::new(GameConfig::new().with_seed(9)).unwrap();
        assert_eq!(c.state(), TurnState::NotStarted);

        c.start_game();

        assert_eq!(c.state(), TurnState::AwaitingPlayer1Play);
        assert_eq!(c.hand(PlayerId::ONE).len(), 7);
        assert_eq!(c.hand(PlayerId::TWO).len(), 7);
        assert_eq!(c.stock_len(), 14);
        assert_eq!(c.hand_number(), 1);
        assert_eq!(c.scores(), &PlayerMap::with_value(0));
        assert!(c.board().is_empty());
    }

    #[test]
    fn test_operations_before_start() {
        let mut c = Controller::new(GameConfig::new()).unwrap();

        assert_eq!(
            c.play_domino(PlayerId::ONE, DominoId::new(0), None),
            Err(RulesError::NotStarted)
        );
        assert_eq!(c.player_is_blocked(PlayerId::ONE), Err(RulesError::NotStarted));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Controller::new(GameConfig::new().with_hand_size(0));
        assert!(matches!(
            result,
            Err(RulesError::Config(crate::core::ConfigError::ZeroHandSize))
        ));
    }

    #[test]
    fn test_scoring_play_awards_mover() {
        let mut c = controller_with(deal(
            vec![d(25, 5, 5), d(1, 0, 1)],
            vec![d(5, 5, 0), d(27, 6, 6)],
            vec![],
        ));

        // Lone 5-5 shows 10
        let outcome = c.play_domino(PlayerId::ONE, DominoId::new(25), None).unwrap();
        assert_eq!(outcome.points, 10);
        assert_eq!(c.score(PlayerId::ONE), 10);
        assert_eq!(c.state(), TurnState::AwaitingPlayer2Play);

        // 5-5 crosswise (10) + 0 = 10
        let outcome = c
            .play_domino(PlayerId::TWO, DominoId::new(5), Some(End::Right))
            .unwrap();
        assert_eq!(outcome.points, 10);
        assert_eq!(c.score(PlayerId::TWO), 10);
    }

    #[test]
    fn test_validation_failures_change_nothing() {
        let mut c = controller_with(deal(
            vec![d(25, 5, 5), d(1, 0, 1)],
            vec![d(5, 5, 0), d(27, 6, 6)],
            vec![d(13, 2, 2)],
        ));

        assert_eq!(
            c.play_domino(PlayerId::TWO, DominoId::new(5), None),
            Err(RulesError::NotYourTurn {
                player: PlayerId::TWO
            })
        );
        assert_eq!(
            c.play_domino(PlayerId::ONE, DominoId::new(5), None),
            Err(RulesError::DominoNotInHand {
                player: PlayerId::ONE,
                domino: DominoId::new(5)
            })
        );
        assert_eq!(
            c.play_domino(PlayerId::ONE, DominoId::new(25), Some(End::Left)),
            Err(RulesError::AttachOnEmptyBoard)
        );
        assert_eq!(
            c.player_is_blocked(PlayerId::ONE),
            Err(RulesError::HasLegalPlay {
                player: PlayerId::ONE
            })
        );

        c.play_domino(PlayerId::ONE, DominoId::new(25), None).unwrap();
        let before_board = c.board().clone();
        let before_hand = c.hand(PlayerId::TWO).clone();

        assert_eq!(
            c.play_domino(PlayerId::TWO, DominoId::new(27), Some(End::Right)),
            Err(RulesError::Mismatch {
                domino: DominoId::new(27),
                end: End::Right,
                open: 5
            })
        );
        assert_eq!(
            c.play_domino(PlayerId::TWO, DominoId::new(5), Some(End::Up)),
            Err(RulesError::EndNotOpen { end: End::Up })
        );
        assert_eq!(c.board(), &before_board);
        assert_eq!(c.hand(PlayerId::TWO), &before_hand);
        assert_eq!(c.state(), TurnState::AwaitingPlayer2Play);
    }

    #[test]
    fn test_handoff_draws_once() {
        // Player 2 holds nothing matching 5; the stock top is also useless.
        let mut c = controller_with(deal(
            vec![d(25, 5, 5), d(1, 0, 1)],
            vec![d(27, 6, 6)],
            vec![d(5, 5, 0), d(14, 2, 3)],
        ));

        let outcome = c.play_domino(PlayerId::ONE, DominoId::new(25), None).unwrap();

        assert_eq!(outcome.drawn, Some((PlayerId::TWO, DominoId::new(14))));
        assert_eq!(c.hand(PlayerId::TWO).len(), 2);
        assert_eq!(c.stock_len(), 1);
        assert_eq!(c.state(), TurnState::AwaitingPlayer2Play);
        assert!(!c.hand(PlayerId::TWO).has_playable(c.board()));

        let draws = c
            .observer()
            .events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Drew { .. }))
            .count();
        assert_eq!(draws, 1);
    }

    #[test]
    fn test_exhausted_stock_blocks_immediately() {
        let mut c = controller_with(deal(
            vec![d(25, 5, 5), d(11, 5, 1)],
            vec![d(27, 6, 6)],
            vec![],
        ));

        let outcome = c.play_domino(PlayerId::ONE, DominoId::new(25), None).unwrap();

        assert!(outcome.drawn.is_none());
        assert!(c.is_blocked(PlayerId::TWO));
        assert_eq!(c.state(), TurnState::AwaitingPlayer1Play);
    }

    #[test]
    fn test_result_none_until_game_ends() {
        let c = controller_with(deal(vec![d(25, 5, 5)], vec![d(27, 6, 6)], vec![]));
        assert_eq!(c.result(), None);
    }

    #[test]
    fn test_legal_plays() {
        let mut c = controller_with(deal(
            vec![d(25, 5, 5), d(1, 0, 1)],
            vec![d(5, 5, 0), d(27, 6, 6)],
            vec![],
        ));

        assert_eq!(
            c.legal_plays(PlayerId::ONE),
            vec![(DominoId::new(25), None), (DominoId::new(1), None)]
        );
        assert!(c.legal_plays(PlayerId::TWO).is_empty());

        c.play_domino(PlayerId::ONE, DominoId::new(25), None).unwrap();
        assert_eq!(
            c.legal_plays(PlayerId::TWO),
            vec![
                (DominoId::new(5), Some(End::Left)),
                (DominoId::new(5), Some(End::Right))
            ]
        );
    }

    #[test]
    fn test_bad_deals_rejected() {
        let mut c = Controller::new(GameConfig::new()).unwrap();

        assert_eq!(
            c.start_game_with(deal(vec![d(25, 5, 5)], vec![d(25, 5, 5)], vec![])),
            Err(RulesError::DuplicateDomino {
                domino: DominoId::new(25)
            })
        );
        assert_eq!(
            c.start_game_with(deal(vec![d(25, 5, 5)], vec![], vec![])),
            Err(RulesError::EmptyDealtHand {
                player: PlayerId::TWO
            })
        );
        assert_eq!(
            c.start_game_with(Deal::default()),
            Err(RulesError::EmptyDealtHand {
                player: PlayerId::ONE
            })
        );
        assert_eq!(c.state(), TurnState::NotStarted);
    }

    #[test]
    fn test_deal_outside_set_rejected() {
        let mut c = Controller::new(GameConfig::new()).unwrap();

        // A second 5-5 under another id
        assert_eq!(
            c.start_game_with(deal(vec![d(25, 5, 5)], vec![d(20, 5, 5)], vec![])),
            Err(RulesError::NotInSet {
                domino: DominoId::new(20)
            })
        );
        // Pips beyond double-six
        assert_eq!(
            c.start_game_with(deal(vec![d(25, 5, 5)], vec![d(27, 6, 6)], vec![d(35, 7, 7)])),
            Err(RulesError::NotInSet {
                domino: DominoId::new(35)
            })
        );
        assert_eq!(c.state(), TurnState::NotStarted);

        // Pip order doesn't matter
        assert!(c
            .start_game_with(deal(vec![d(26, 6, 5)], vec![d(27, 6, 6)], vec![]))
            .is_ok());
    }
}
