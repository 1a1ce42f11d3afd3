use ugrid::engine::MemoryStore;
use ugrid::error::Error;
use ugrid::{Network1d, Network1dDimensions, Topology};

mod common;
use common::network;

#[test]
fn network_round_trip() {
    let store = MemoryStore::in_memory();
    let expected = network();

    let mut file = ugrid::create(&store, "network.nc").unwrap();
    let index = file.define(&expected).unwrap();
    assert_eq!(index, 0);
    file.put(index, &expected).unwrap();
    file.close().unwrap();

    let file = ugrid::open(&store, "network.nc").unwrap();
    assert_eq!(file.count::<Network1d>().unwrap(), 1);
    let dimensions = file.inquire::<Network1d>(0).unwrap();
    assert_eq!(
        dimensions,
        Network1dDimensions {
            num_nodes: 2,
            num_edges: 1,
            num_geometry_nodes: 25,
        }
    );
    assert_eq!(dimensions.num_branches(), 1);

    let read: Network1d = file.get(0).unwrap();
    assert_eq!(read.node_x, vec![293.78, 538.89]);
    assert_eq!(read, expected);
}

#[test]
fn derived_dimensions() {
    let dimensions = network().dimensions();
    assert_eq!(dimensions.num_branches(), 1);
    assert_eq!(dimensions.num_geometry_nodes, 25);
}

#[test]
fn out_of_range() {
    let store = MemoryStore::in_memory();
    let mut file = ugrid::create(&store, "network.nc").unwrap();
    let network = network();
    file.define(&network).unwrap();

    assert!(matches!(
        file.inquire::<Network1d>(1),
        Err(Error::NotFound(_))
    ));
    assert!(matches!(file.get::<Network1d>(3), Err(Error::NotFound(_))));
    assert!(matches!(file.put(1, &network), Err(Error::NotFound(_))));
}

#[test]
fn manual_read_protocol() {
    let store = MemoryStore::in_memory();
    let mut file = ugrid::create(&store, "network.nc").unwrap();
    let expected = network();
    let index = file.define(&expected).unwrap();
    file.put(index, &expected).unwrap();

    let dimensions = file.inquire::<Network1d>(index).unwrap();
    let mut record = Network1d::allocate(dimensions, file.encoding());
    file.fill::<Network1d>(index, &mut record).unwrap();
    assert_eq!(record.geometry_nodes_x.len(), 25);
    assert_eq!(record.num_edge_geometry_nodes, vec![25]);

    let mut short = Network1d::allocate(
        Network1dDimensions {
            num_geometry_nodes: 24,
            ..dimensions
        },
        file.encoding(),
    );
    assert!(matches!(
        file.fill::<Network1d>(index, &mut short),
        Err(Error::Consistency(_))
    ));
}

#[test]
fn put_needs_defined_dimensions() {
    let store = MemoryStore::in_memory();
    let mut file = ugrid::create(&store, "network.nc").unwrap();
    let defined = network();
    let index = file.define(&defined).unwrap();

    let mut longer = network();
    longer.geometry_nodes_x.push(600.0);
    longer.geometry_nodes_y.push(1000.0);
    longer.num_edge_geometry_nodes = vec![26];
    assert!(matches!(
        file.put(index, &longer),
        Err(Error::Consistency(_))
    ));
}

#[test]
fn invalid_networks_are_rejected() {
    let store = MemoryStore::in_memory();
    let mut file = ugrid::create(&store, "network.nc").unwrap();

    let mut network = network();
    network.edge_node = vec![0, 2];
    assert!(matches!(file.define(&network), Err(Error::Consistency(_))));

    let mut network = common::network();
    network.num_edge_geometry_nodes = vec![20];
    assert!(matches!(file.define(&network), Err(Error::Consistency(_))));

    assert_eq!(file.count::<Network1d>().unwrap(), 0);
}

#[test]
fn duplicate_names() {
    let store = MemoryStore::in_memory();
    let mut file = ugrid::create(&store, "network.nc").unwrap();
    file.define(&network()).unwrap();
    let err = file.define(&network()).unwrap_err();
    assert!(matches!(err, Error::Store(_)));
    assert!(err.to_string().contains("already exists"));
}
