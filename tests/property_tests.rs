//! Property tests: mana payment and random play.

use proptest::prelude::*;
use rust_mtg::cards::starter;
use rust_mtg::game::{play_out, Game, MoveSelector, RandomLegal};
use rust_mtg::{Action, GameBuilder, Keyword, ManaColor, ManaCost, ManaPool};

const COLORS: [ManaColor; 6] = [
    ManaColor::White,
    ManaColor::Blue,
    ManaColor::Black,
    ManaColor::Red,
    ManaColor::Green,
    ManaColor::Colorless,
];

fn pool_strategy() -> impl Strategy<Value = ManaPool> {
    prop::array::uniform6(0u32..4).prop_map(|amounts| {
        let pairs: Vec<_> = COLORS.iter().copied().zip(amounts).collect();
        ManaPool::from_amounts(&pairs)
    })
}

fn cost_strategy() -> impl Strategy<Value = ManaCost> {
    (0u32..5, prop::array::uniform6(0u32..3)).prop_map(|(generic, colored)| {
        COLORS
            .iter()
            .zip(colored)
            .fold(ManaCost::free().with_generic(generic), |cost, (color, n)| cost.with_colored(*color, n))
    })
}

fn deck_game(seed: u64, colors: (usize, usize)) -> Game {
    let pick = |i: usize| COLORS[i % 5];
    GameBuilder::new(starter::catalog())
        .deck(0, starter::sample_deck(pick(colors.0), pick(colors.0 + 1)))
        .deck(1, starter::sample_deck(pick(colors.1), pick(colors.1 + 2)))
        .build(seed)
        .unwrap()
}

/// Check what must hold after every decision of a random game.
fn check_position(game: &Game) {
    game.graph().check_invariants().unwrap();

    let moves = game.legal_moves().unwrap();
    let before = game.graph().clone();
    assert_eq!(game.legal_moves().unwrap(), moves);
    assert_eq!(game.graph(), &before);

    for (_, player) in game.graph().players() {
        assert!(player.lands_played_this_turn <= game.config().lands_per_turn);
    }

    for card in game.graph().battlefield_cards() {
        let c = game.graph().characteristics(card).unwrap();
        if c.is_creature {
            let state = game.graph().permanent(card).unwrap();
            assert!(c.toughness > 0 && state.damage_taken < c.toughness, "{card} should be dead");
        }
    }

    for action in &moves {
        if let Action::DeclareBlocker { blocker, attacker } = action {
            let ac = game.graph().characteristics(*attacker).unwrap();
            let bc = game.graph().characteristics(*blocker).unwrap();
            if ac.has(Keyword::Flying) {
                assert!(bc.has(Keyword::Flying) || bc.has(Keyword::Reach));
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// `can_pay` agrees with `pay`, and a payment spends exactly the
    /// cost's mana value.
    #[test]
    fn test_can_pay_matches_pay(pool in pool_strategy(), cost in cost_strategy()) {
        let mut paid = pool;
        let result = paid.pay(&cost);
        prop_assert_eq!(pool.can_pay(&cost), result.is_ok());
        match result {
            Ok(payment) => {
                prop_assert_eq!(payment.total(), cost.mana_value());
                prop_assert_eq!(paid.total() + cost.mana_value(), pool.total());
            }
            Err(_) => prop_assert_eq!(paid, pool),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    /// Random legal play never breaks the board.
    #[test]
    fn test_random_play_keeps_invariants(seed in 0u64..1000, colors in (0usize..5, 0usize..5)) {
        let mut game = deck_game(seed, colors);
        let mut selector = RandomLegal::seeded(seed ^ 0x5eed);
        for _ in 0..600 {
            if game.result().is_some() {
                break;
            }
            check_position(&game);
            let moves = game.legal_moves().unwrap();
            let player = game.acting_player();
            match selector.select(player, &moves) {
                Some(action) => {
                    game.execute_move(action).unwrap();
                }
                None => {
                    game.progress(false).unwrap();
                }
            }
        }
        check_position(&game);
    }

    /// The same seed and selector give the same game.
    #[test]
    fn test_random_play_is_deterministic(seed in 0u64..1000) {
        let play = || {
            let mut game = deck_game(seed, (1, 3));
            let mut selector = RandomLegal::seeded(seed);
            play_out(&mut game, &mut selector, 300).unwrap();
            game
        };
        let (a, b) = (play(), play());
        prop_assert_eq!(a.graph(), b.graph());
        prop_assert_eq!(a.history(), b.history());
    }
}
