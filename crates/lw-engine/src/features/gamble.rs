//! Gamble — double-or-nothing card game
//!
//! Draw a card from a uniform 52-card deck; guessing its color doubles the
//! staked win, guessing the exact suit quadruples it. Any wrong guess ends
//! the sequence with nothing; five successful steps cash out.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Maximum successful gamble steps
pub const MAX_GAMBLE_STEPS: u8 = 5;

/// Card suit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn color(&self) -> CardColor {
        match self {
            Suit::Hearts | Suit::Diamonds => CardColor::Red,
            Suit::Clubs | Suit::Spades => CardColor::Black,
        }
    }
}

/// Card color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardColor {
    Red,
    Black,
}

/// A playing card (rank 1 = ace … 13 = king)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: u8,
}

impl Card {
    pub fn color(&self) -> CardColor {
        self.suit.color()
    }

    /// Rank label for presentation
    pub fn rank_label(&self) -> &'static str {
        const LABELS: [&str; 13] = [
            "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
        ];
        LABELS[(self.rank as usize - 1).min(12)]
    }
}

/// The player's guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GambleChoice {
    /// Color guess - pays 2x
    Color(CardColor),
    /// Exact suit guess - pays 4x
    Suit(Suit),
}

impl GambleChoice {
    /// Payout factor for a correct guess
    pub fn factor(&self) -> u32 {
        match self {
            GambleChoice::Color(_) => 2,
            GambleChoice::Suit(_) => 4,
        }
    }
}

/// One resolved gamble step
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GambleRound {
    pub card: Card,
    pub success: bool,
    /// Win after this step (0 on a loss)
    pub new_win: f64,
    /// The sequence is over (loss, or max steps reached)
    pub ended: bool,
}

/// Running double-or-nothing state
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GambleSession {
    /// Win currently at stake
    pub current_win: f64,
    /// Successful steps taken
    pub step: u8,
    /// Sequence still accepting guesses
    pub active: bool,
}

impl GambleSession {
    /// Stake a win
    pub fn new(win_amount: f64) -> Self {
        Self {
            current_win: win_amount,
            step: 0,
            active: win_amount > 0.0,
        }
    }
}

/// Draw one card, uniform over the 52-card deck
pub fn draw_card<R: Rng + ?Sized>(rng: &mut R) -> Card {
    Card {
        suit: Suit::ALL[rng.gen_range(0..4)],
        rank: rng.gen_range(1..=13),
    }
}

/// Does the guess match the drawn card?
pub fn resolve_choice(card: Card, choice: GambleChoice) -> bool {
    match choice {
        GambleChoice::Color(color) => card.color() == color,
        GambleChoice::Suit(suit) => card.suit == suit,
    }
}

/// Play one gamble step. A loss zeroes the stake and ends the sequence;
/// the fifth success cashes out.
pub fn play_gamble_round<R: Rng + ?Sized>(
    session: &mut GambleSession,
    choice: GambleChoice,
    rng: &mut R,
) -> GambleRound {
    let card = draw_card(rng);

    if !session.active {
        return GambleRound {
            card,
            success: false,
            new_win: session.current_win,
            ended: true,
        };
    }

    let success = resolve_choice(card, choice);
    if success {
        session.current_win *= choice.factor() as f64;
        session.step += 1;
    } else {
        session.current_win = 0.0;
    }

    let ended = !success || session.step >= MAX_GAMBLE_STEPS;
    if ended {
        session.active = false;
    }

    GambleRound {
        card,
        success,
        new_win: session.current_win,
        ended,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn resolve_color_and_suit() {
        let card = Card {
            suit: Suit::Hearts,
            rank: 7,
        };
        assert!(resolve_choice(card, GambleChoice::Color(CardColor::Red)));
        assert!(!resolve_choice(card, GambleChoice::Color(CardColor::Black)));
        assert!(resolve_choice(card, GambleChoice::Suit(Suit::Hearts)));
        assert!(!resolve_choice(card, GambleChoice::Suit(Suit::Spades)));
    }

    #[test]
    fn payout_factors() {
        assert_eq!(GambleChoice::Color(CardColor::Red).factor(), 2);
        assert_eq!(GambleChoice::Suit(Suit::Clubs).factor(), 4);
    }

    #[test]
    fn loss_zeroes_and_ends() {
        let mut rng = StdRng::seed_from_u64(1);
        // Run sessions until one loses a round.
        for _ in 0..100 {
            let mut session = GambleSession::new(10.0);
            let round = play_gamble_round(&mut session, GambleChoice::Suit(Suit::Hearts), &mut rng);
            if !round.success {
                assert_eq!(round.new_win, 0.0);
                assert!(round.ended);
                assert!(!session.active);
                return;
            }
        }
        panic!("suit guess never lost in 100 rounds");
    }

    #[test]
    fn win_doubles_current_stake() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..200 {
            let mut session = GambleSession::new(8.0);
            let round =
                play_gamble_round(&mut session, GambleChoice::Color(CardColor::Red), &mut rng);
            if round.success {
                assert_eq!(round.new_win, 16.0);
                assert!(!round.ended);
                assert_eq!(session.step, 1);
                return;
            }
        }
        panic!("color guess never won in 200 rounds");
    }

    #[test]
    fn five_successes_cash_out() {
        let mut session = GambleSession::new(1.0);
        session.step = MAX_GAMBLE_STEPS - 1;
        let mut rng = StdRng::seed_from_u64(3);

        // Force a success by trying both colors until one hits.
        for _ in 0..100 {
            let mut trial = session;
            let round =
                play_gamble_round(&mut trial, GambleChoice::Color(CardColor::Red), &mut rng);
            if round.success {
                assert!(round.ended);
                assert!(!trial.active);
                assert_eq!(trial.step, MAX_GAMBLE_STEPS);
                return;
            }
        }
        panic!("no success observed");
    }

    #[test]
    fn inactive_session_refuses_play() {
        let mut session = GambleSession::new(0.0);
        assert!(!session.active);
        let mut rng = StdRng::seed_from_u64(4);
        let round = play_gamble_round(&mut session, GambleChoice::Color(CardColor::Red), &mut rng);
        assert!(round.ended);
        assert_eq!(round.new_win, 0.0);
    }

    #[test]
    fn rank_labels() {
        assert_eq!(Card { suit: Suit::Clubs, rank: 1 }.rank_label(), "A");
        assert_eq!(Card { suit: Suit::Clubs, rank: 13 }.rank_label(), "K");
        assert_eq!(Card { suit: Suit::Clubs, rank: 10 }.rank_label(), "10");
    }
}
