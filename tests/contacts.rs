use ugrid::engine::MemoryStore;
use ugrid::error::Error;
use ugrid::{Contacts, ContactsDimensions, Location, UGridFile};

mod common;
use common::{contacts, mesh1d, mesh2d, network};

/// A file holding the network, the 1d mesh and the 2d mesh
fn meshes<'s>(store: &'s MemoryStore, path: &str) -> UGridFile<'s, MemoryStore> {
    let mut file = ugrid::create(store, path).unwrap();
    let network = network();
    let index = file.define(&network).unwrap();
    file.put(index, &network).unwrap();
    let mesh = mesh1d();
    let index = file.define(&mesh).unwrap();
    file.put(index, &mesh).unwrap();
    let mesh = mesh2d();
    let index = file.define(&mesh).unwrap();
    file.put(index, &mesh).unwrap();
    file
}

#[test]
fn contacts_round_trip() {
    let store = MemoryStore::in_memory();
    let expected = contacts();
    let mut file = meshes(&store, "contacts.nc");
    let index = file.define(&expected).unwrap();
    file.put(index, &expected).unwrap();
    file.close().unwrap();

    let file = ugrid::open(&store, "contacts.nc").unwrap();
    assert_eq!(
        file.inquire::<Contacts>(0).unwrap(),
        ContactsDimensions { num_contacts: 23 }
    );
    let read: Contacts = file.get(0).unwrap();
    assert_eq!(read.edges, expected.edges);
    assert_eq!(read.contact_type, Some(vec![3; 23]));
    assert_eq!(read.mesh_from_location, Location::Face);
    assert_eq!(read.mesh_to_location, Location::Node);
    assert_eq!(read, expected);

    let attributes = file.variable_attributes("contacts").unwrap();
    assert!(attributes.contains(&(
        "contact".to_string(),
        "mesh2d: face mesh1d: node".to_string()
    )));
}

#[test]
fn contacts_without_extras() {
    let store = MemoryStore::in_memory();
    let expected = Contacts {
        contact_type: None,
        contact_id: Vec::new(),
        contact_long_name: Vec::new(),
        ..contacts()
    };
    let mut file = meshes(&store, "contacts.nc");
    let index = file.define(&expected).unwrap();
    file.put(index, &expected).unwrap();
    assert_eq!(file.get::<Contacts>(index).unwrap(), expected);
}

#[test]
fn unknown_meshes() {
    let store = MemoryStore::in_memory();
    let mut file = meshes(&store, "contacts.nc");

    let mut links = contacts();
    links.mesh_to_name = "network1d".into();
    assert!(matches!(file.define(&links), Err(Error::Schema(_))));

    let mut links = contacts();
    links.mesh_from_name = "mesh3d".into();
    assert!(matches!(file.define(&links), Err(Error::Schema(_))));

    assert_eq!(file.count::<Contacts>().unwrap(), 0);
}

#[test]
fn contact_types_per_link() {
    let store = MemoryStore::in_memory();
    let mut file = meshes(&store, "contacts.nc");
    let mut links = contacts();
    links.contact_type = Some(vec![3; 22]);
    assert!(matches!(file.define(&links), Err(Error::Consistency(_))));
}
