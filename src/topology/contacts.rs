use super::{check_optional_len, decode_names, encode_names, Encoding, Topology};
use crate::error::{self, expect_len};
use crate::file::UGridFile;
use crate::store::{FileId, Status, Store};
use crate::text;
use crate::types::{Location, TopologyKind};

/// Links from locations of one mesh to locations of another
#[derive(Debug, Clone, PartialEq)]
pub struct Contacts {
    pub name: String,
    pub mesh_from_name: String,
    pub mesh_to_name: String,
    pub mesh_from_location: Location,
    pub mesh_to_location: Location,
    /// `(from, to)` index pairs
    pub edges: Vec<i32>,
    pub contact_type: Option<Vec<i32>>,
    pub contact_id: Vec<String>,
    pub contact_long_name: Vec<String>,
}

impl Default for Contacts {
    fn default() -> Self {
        Self {
            name: String::new(),
            mesh_from_name: String::new(),
            mesh_to_name: String::new(),
            mesh_from_location: Location::Node,
            mesh_to_location: Location::Node,
            edges: Vec::new(),
            contact_type: None,
            contact_id: Vec::new(),
            contact_long_name: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactsDimensions {
    pub num_contacts: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContactsRecord {
    pub name: Vec<u8>,
    pub mesh_from_name: Vec<u8>,
    pub mesh_to_name: Vec<u8>,
    pub mesh_from_location: i32,
    pub mesh_to_location: i32,
    pub edges: Vec<i32>,
    pub contact_type: Option<Vec<i32>>,
    pub contact_id: Option<Vec<u8>>,
    pub contact_long_name: Option<Vec<u8>>,
    pub num_contacts: usize,
}

impl Topology for Contacts {
    const KIND: TopologyKind = TopologyKind::Contacts;
    type Dimensions = ContactsDimensions;
    type Record = ContactsRecord;

    fn name(&self) -> &str {
        &self.name
    }

    fn dimensions(&self) -> ContactsDimensions {
        ContactsDimensions {
            num_contacts: self.edges.len() / 2,
        }
    }

    fn validate(&self) -> error::Result<()> {
        let num_contacts = self.dimensions().num_contacts;
        if self.edges.len() % 2 != 0 {
            return Err(error::Error::Consistency(
                "edges must hold (from, to) pairs".into(),
            ));
        }
        if let Some(contact_type) = &self.contact_type {
            expect_len("contact_type", contact_type.len(), num_contacts)?;
        }
        check_optional_len("contact_id", self.contact_id.len(), num_contacts)?;
        check_optional_len(
            "contact_long_name",
            self.contact_long_name.len(),
            num_contacts,
        )
    }

    fn check_references<S: Store + ?Sized>(&self, file: &UGridFile<'_, S>) -> error::Result<()> {
        let width = file.widths().name;
        let mut meshes = file.topology_names(TopologyKind::Mesh1d)?;
        meshes.extend(file.topology_names(TopologyKind::Mesh2d)?);
        for mesh in [&self.mesh_from_name, &self.mesh_to_name] {
            let wanted = text::fit(mesh, width);
            if !meshes.iter().any(|name| name == wanted) {
                return Err(error::Error::Schema(format!(
                    "contacts {:?} refer to missing mesh {:?}",
                    self.name, mesh
                )));
            }
        }
        Ok(())
    }

    fn to_record(&self, encoding: Encoding) -> ContactsRecord {
        let widths = encoding.widths;
        ContactsRecord {
            name: text::encode_one(&self.name, widths.name),
            mesh_from_name: text::encode_one(&self.mesh_from_name, widths.name),
            mesh_to_name: text::encode_one(&self.mesh_to_name, widths.name),
            mesh_from_location: encoding.enums.location(self.mesh_from_location),
            mesh_to_location: encoding.enums.location(self.mesh_to_location),
            edges: self.edges.clone(),
            contact_type: self.contact_type.clone(),
            contact_id: encode_names(&self.contact_id, widths.name),
            contact_long_name: encode_names(&self.contact_long_name, widths.long_name),
            num_contacts: self.dimensions().num_contacts,
        }
    }

    fn allocate(dims: ContactsDimensions, encoding: Encoding) -> ContactsRecord {
        let widths = encoding.widths;
        ContactsRecord {
            name: text::blank(1, widths.name),
            mesh_from_name: text::blank(1, widths.name),
            mesh_to_name: text::blank(1, widths.name),
            mesh_from_location: encoding.enums.location(Location::Node),
            mesh_to_location: encoding.enums.location(Location::Node),
            edges: vec![0; 2 * dims.num_contacts],
            contact_type: Some(vec![0; dims.num_contacts]),
            contact_id: Some(text::blank(dims.num_contacts, widths.name)),
            contact_long_name: Some(text::blank(dims.num_contacts, widths.long_name)),
            num_contacts: dims.num_contacts,
        }
    }

    fn record_dimensions(record: &ContactsRecord) -> ContactsDimensions {
        ContactsDimensions {
            num_contacts: record.num_contacts,
        }
    }

    fn from_record(record: &ContactsRecord, encoding: Encoding) -> error::Result<Self> {
        let widths = encoding.widths;
        Ok(Contacts {
            name: text::decode_one(&record.name, widths.name)?,
            mesh_from_name: text::decode_one(&record.mesh_from_name, widths.name)?,
            mesh_to_name: text::decode_one(&record.mesh_to_name, widths.name)?,
            mesh_from_location: encoding.enums.location_from_value(record.mesh_from_location)?,
            mesh_to_location: encoding.enums.location_from_value(record.mesh_to_location)?,
            edges: record.edges.clone(),
            contact_type: record.contact_type.clone(),
            contact_id: decode_names(
                record.contact_id.as_ref(),
                record.num_contacts,
                widths.name,
            )?,
            contact_long_name: decode_names(
                record.contact_long_name.as_ref(),
                record.num_contacts,
                widths.long_name,
            )?,
        })
    }

    fn inquire<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        topology: usize,
        dimensions: &mut ContactsDimensions,
    ) -> Status {
        store.contacts_inquire(file, topology, dimensions)
    }

    fn fill<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        topology: usize,
        record: &mut ContactsRecord,
    ) -> Status {
        store.contacts_get(file, topology, record)
    }

    fn define<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        record: &ContactsRecord,
        topology: &mut usize,
    ) -> Status {
        store.contacts_define(file, record, topology)
    }

    fn put<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        topology: usize,
        record: &ContactsRecord,
    ) -> Status {
        store.contacts_put(file, topology, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::NameWidths;
    use crate::types::StoreEnums;

    #[test]
    fn locations_use_store_values() {
        let encoding = Encoding {
            widths: NameWidths {
                name: 40,
                long_name: 80,
            },
            enums: StoreEnums {
                topologies: [0, 1, 2, 3],
                locations: [5, 6, 7],
            },
        };
        let contacts = Contacts {
            name: "2d1dlinks".into(),
            mesh_from_name: "mesh2d".into(),
            mesh_to_name: "1dmesh".into(),
            mesh_from_location: Location::Face,
            mesh_to_location: Location::Node,
            edges: vec![13, 1, 70, 5],
            contact_type: Some(vec![3, 3]),
            ..Default::default()
        };
        assert!(contacts.validate().is_ok());

        let record = contacts.to_record(encoding);
        assert_eq!(record.mesh_from_location, 7);
        assert_eq!(record.mesh_to_location, 5);
        assert_eq!(record.num_contacts, 2);
        assert!(record.contact_id.is_none());

        let back = Contacts::from_record(&record, encoding).unwrap();
        assert_eq!(back, contacts);
    }

    #[test]
    fn odd_edges() {
        let contacts = Contacts {
            edges: vec![1, 2, 3],
            ..Default::default()
        };
        assert!(contacts.validate().is_err());
    }
}
