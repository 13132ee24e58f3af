use super::*;
use ward_core::SupervisorConfig;

fn ids(descriptors: &[NodeDescriptor]) -> Vec<NodeId> {
    descriptors.iter().map(|d| d.id).collect()
}

#[test]
fn builds_all_eight_nodes_in_declaration_order() {
    let config = SupervisorConfig::default();
    let (bus, _bus_rx) = ControlBus::new();
    let descriptors = build(&config, &bus);

    assert_eq!(
        ids(&descriptors),
        vec![
            NodeId::LiquidSoap,
            NodeId::Hls,
            NodeId::Db,
            NodeId::Prefetch,
            NodeId::Search,
            NodeId::Coordinator,
            NodeId::NowPlaying,
            NodeId::Api,
        ]
    );
}

#[test]
fn hls_depends_only_on_liquid_soap() {
    let config = SupervisorConfig::default();
    let (bus, _bus_rx) = ControlBus::new();
    let descriptors = build(&config, &bus);

    let hls = descriptors.iter().find(|d| d.id == NodeId::Hls).unwrap();
    assert_eq!(hls.parents, [NodeId::LiquidSoap].into_iter().collect());
}

#[test]
fn coordinator_fans_in_from_prefetch_and_search() {
    let config = SupervisorConfig::default();
    let (bus, _bus_rx) = ControlBus::new();
    let descriptors = build(&config, &bus);

    let coordinator = descriptors.iter().find(|d| d.id == NodeId::Coordinator).unwrap();
    assert_eq!(coordinator.parents, [NodeId::Prefetch, NodeId::Search].into_iter().collect());
}

#[test]
fn api_sits_on_top_of_db_coordinator_and_now_playing() {
    let config = SupervisorConfig::default();
    let (bus, _bus_rx) = ControlBus::new();
    let descriptors = build(&config, &bus);

    let api = descriptors.iter().find(|d| d.id == NodeId::Api).unwrap();
    assert_eq!(api.parents, [NodeId::Db, NodeId::Coordinator, NodeId::NowPlaying].into_iter().collect());
}

#[test]
fn a_disabled_override_propagates_to_its_descriptor() {
    let mut config = SupervisorConfig::default();
    config.nodes.insert(NodeId::Search, ward_core::NodeOverride { disabled: true, ..Default::default() });
    let (bus, _bus_rx) = ControlBus::new();
    let descriptors = build(&config, &bus);

    let search = descriptors.iter().find(|d| d.id == NodeId::Search).unwrap();
    assert!(search.disabled);
    let prefetch = descriptors.iter().find(|d| d.id == NodeId::Prefetch).unwrap();
    assert!(!prefetch.disabled);
}
