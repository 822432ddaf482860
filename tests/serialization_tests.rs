//! State serialization round-trip tests.
//!
//! The state blob is the only persisted entity; a reloaded game must be
//! indistinguishable from the one that was unloaded, including the order
//! of `players_order` and of the player-keyed maps.

use proptest::prelude::*;
use serde_json::json;
use turnwheel::{
    Brain, Command, CommandFactory, Controller, DiceRng, GameState, Model, PlayerAttrs, PlayerId,
};

fn start_params() -> serde_json::Value {
    json!({
        "command": "StartGame",
        "players": {
            "H1": { "brain": "human", "color": "blue" },
            "H2": { "brain": "human", "color": "red" },
            "R3": { "brain": "robot", "color": "green" },
        }
    })
}

#[test]
fn test_reloaded_game_keeps_playing() {
    let mut game = Controller::with_seed(42);
    game.execute(start_params()).unwrap();
    game.execute(json!({ "command": "RollDice", "player": "H1" }))
        .unwrap();

    let blob = game.model().unload().unwrap();

    // A fresh controller/model pair resumes from the blob alone.
    let mut resumed = Controller::new(
        Model::new(None),
        CommandFactory::new(),
        Box::new(DiceRng::new(99)),
    );
    resumed.model_mut().load(&blob).unwrap();

    assert_eq!(resumed.model().state(), game.model().state());

    let output = resumed
        .execute(json!({ "command": "EndTurn", "player": "H1" }))
        .unwrap();
    assert_eq!(
        output.lines(),
        ["H1 has ended their turn.", "H2, now it is your turn."]
    );
}

#[test]
fn test_blob_round_trips_through_a_file() {
    let mut game = Controller::with_seed(42);
    game.execute(start_params()).unwrap();

    let blob = game.model().unload().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");
    std::fs::write(&path, &blob).unwrap();
    let read_back = std::fs::read_to_string(&path).unwrap();

    let mut reloaded = Model::new(None);
    reloaded.load(&read_back).unwrap();

    assert_eq!(reloaded.state(), game.model().state());
}

#[test]
fn test_blob_preserves_order_and_keys() {
    let mut game = Controller::with_seed(42);
    game.execute(start_params()).unwrap();

    let blob = game.model().unload().unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();

    assert_eq!(value["players_order"], json!(["H1", "H2", "R3"]));

    // JSON object order matches the turn order.
    let player_keys: Vec<_> = value["players"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(player_keys, ["H1", "H2", "R3"]);

    assert_eq!(value["turn"]["player_id"], json!("H1"));
    assert_eq!(value["turn"]["round"], json!(1));
    assert_eq!(value["turn"]["commands"], json!(["RollDice"]));
}

#[test]
fn test_absent_state_round_trip() {
    let model = Model::new(None);
    let blob = model.unload().unwrap();
    assert_eq!(blob, "null");

    let mut reloaded = Model::new(None);
    reloaded.load(&blob).unwrap();
    assert!(reloaded.stateless());
}

/// Arbitrary valid game states: unique ids, matching key sets across the
/// three player-keyed collections, a cursor that (when set) points at a
/// roster member.
fn arb_state() -> impl Strategy<Value = GameState> {
    prop::collection::btree_set("[A-Z][a-z0-9]{0,5}", 1..6).prop_flat_map(|ids| {
        let ids: Vec<String> = ids.into_iter().collect();
        let n = ids.len();
        (
            prop::collection::vec(any::<bool>(), n),
            prop::collection::vec(prop::option::of((1u8..=6, 1u8..=6)), n),
            0u32..1000,
            prop::option::of(0..n),
        )
            .prop_map(move |(robots, rolls, round, cursor)| {
                let mut state = GameState::template();
                for ((id, robot), roll) in ids.iter().zip(robots).zip(rolls) {
                    let id = PlayerId::new(id.clone());
                    let brain = if robot { Brain::Robot } else { Brain::Human };
                    state.players_order.push(id.clone());
                    state.players.insert(id.clone(), PlayerAttrs::new(brain, "blue"));
                    state.board.insert(id, roll);
                }
                state.turn.round = round;
                state.turn.player_id = cursor.map(|i| state.players_order[i].clone());
                state.turn.commands.push(Command::RollDice);
                state
            })
    })
}

proptest! {
    #[test]
    fn prop_state_json_round_trip(state in arb_state()) {
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(&back, &state);

        let player_keys: Vec<_> = back.players.keys().cloned().collect();
        let board_keys: Vec<_> = back.board.keys().cloned().collect();
        prop_assert_eq!(&player_keys, &back.players_order);
        prop_assert_eq!(&board_keys, &back.players_order);
    }

    #[test]
    fn prop_model_unload_load_round_trip(state in arb_state()) {
        let model = Model::new(Some(state));
        let blob = model.unload().unwrap();

        let mut reloaded = Model::new(None);
        reloaded.load(&blob).unwrap();

        prop_assert_eq!(reloaded.state(), model.state());
    }
}
