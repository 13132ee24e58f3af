use super::*;
use yare::parameterized;

#[parameterized(
    liquid_soap = { NodeId::LiquidSoap, "LIQUID_SOAP" },
    hls = { NodeId::Hls, "HLS" },
    prefetch = { NodeId::Prefetch, "PREFETCH" },
    search = { NodeId::Search, "SEARCH" },
    coordinator = { NodeId::Coordinator, "COORDINATOR" },
    db = { NodeId::Db, "DB" },
    now_playing = { NodeId::NowPlaying, "NOW_PLAYING" },
    api = { NodeId::Api, "API" },
)]
fn display_matches_wire_name(id: NodeId, expected: &str) {
    assert_eq!(id.to_string(), expected);
}

#[test]
fn serde_round_trip_uses_screaming_snake_case() {
    for id in NodeId::ALL {
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_str()));
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

#[test]
fn all_is_exhaustive_and_unique() {
    let set: std::collections::HashSet<_> = NodeId::ALL.iter().collect();
    assert_eq!(set.len(), NodeId::ALL.len());
}
