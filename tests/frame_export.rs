//! JSON frame export (requires `--features visualize`)

#![cfg(feature = "visualize")]

use treeplay::{Operation, Script};

mod test_helpers;
use test_helpers::*;

#[test]
fn frame_serialises_with_renderer_field_names() {
    let mut player = player_for(Script::new(vec![
        Operation::insert(50, 100),
        Operation::search(7, 100),
    ]));
    player.start();
    player.step();

    let json: serde_json::Value =
        serde_json::to_value(player.snapshot()).expect("frame serialises");

    assert_eq!(json["search_result"], "not-found");
    assert_eq!(json["highlighted_line"], 12);
    assert_eq!(json["nodes"][0]["value"], 50);
    assert_eq!(json["nodes"][0]["x"], 250.0);
    assert_eq!(json["operation"]["kind"], "search");
    assert!(json["edges"].as_array().unwrap().is_empty());
}
