//! Perft node counts for well-known positions
//!
//! Counts from https://www.chessprogramming.org/Perft_Results, kept to
//! depths that run quickly in a debug build.

use rules_engine::GameState;

macro_rules! assert_perft {
    ($($name:ident: $fen:tt, [$($nodes:expr),*],)*) => {$(
        #[test]
        fn $name() {
            let game = GameState::from_fen($fen).unwrap();
            for (depth, &nodes) in [$($nodes),*].iter().enumerate() {
                let depth = depth as u32 + 1;
                assert_eq!(game.perft(depth), Ok(nodes), "{} at depth {depth}", stringify!($name));
            }
        }
    )*};
}

assert_perft!(
    starting_position: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", [20, 400, 8902],
    kiwipete: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", [48, 2039],
    position_3: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", [14, 191, 2812],
    position_4: "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1", [6, 264, 9467],
    position_5: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8", [44, 1486],
    position_6: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10", [46, 2079],
);

#[test]
#[ignore = "slow in debug builds"]
fn kiwipete_depth_3() {
    let game = GameState::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    assert_eq!(game.perft(3), Ok(97_862));
}
