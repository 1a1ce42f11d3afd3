//! Contacts topology variables
//!
//! The contact pairs of `C` are the values of `C` itself, declared over
//! `C_nContacts` and `Two`. Its `contact` attribute names both meshes and
//! their locations as `"<from>: <location> <to>: <location>"`.

use super::convention::*;
use crate::dataset::{Dataset, ValueKind};
use crate::error::{self, expect_len, Error};
use crate::text::{self, NameWidths};
use crate::topology::{ContactsDimensions, ContactsRecord};
use crate::types::{Location, StoreEnums};

struct Names {
    topology: String,
    contacts: String,
    contact_type: String,
    contact_id: String,
    contact_long_name: String,
}

impl Names {
    fn new(topology: &str) -> Self {
        let name = |suffix: &str| format!("{}_{}", topology, suffix);
        Self {
            topology: topology.to_string(),
            contacts: name("nContacts"),
            contact_type: name("contact_type"),
            contact_id: name("id"),
            contact_long_name: name("long_name"),
        }
    }
}

/// Both ends of a contact topology as written in its `contact` attribute
#[derive(Debug, PartialEq)]
pub(super) struct Ends {
    pub from: String,
    pub from_location: Location,
    pub to: String,
    pub to_location: Location,
}

impl Ends {
    fn parse(contact: &str) -> error::Result<Self> {
        let bad = || Error::Consistency(format!("malformed contact attribute {:?}", contact));
        let tokens: Vec<&str> = contact.split_whitespace().collect();
        let [from, from_location, to, to_location] = tokens[..] else {
            return Err(bad());
        };
        let mesh = |token: &str| token.strip_suffix(':').map(str::to_string).ok_or_else(bad);
        let location = |token: &str| Location::from_name(token).ok_or_else(bad);
        Ok(Self {
            from: mesh(from)?,
            from_location: location(from_location)?,
            to: mesh(to)?,
            to_location: location(to_location)?,
        })
    }

    fn to_attribute(&self) -> String {
        format!(
            "{}: {} {}: {}",
            self.from, self.from_location, self.to, self.to_location
        )
    }
}

pub(super) fn ends(ds: &dyn Dataset, topology: &str) -> error::Result<Ends> {
    let contact = str_attribute(ds, Some(topology), "contact").ok_or_else(|| {
        Error::Consistency(format!("{} has no contact attribute", topology))
    })?;
    Ends::parse(&contact)
}

fn check_record(record: &ContactsRecord) -> error::Result<()> {
    expect_len("edges", record.edges.len(), 2 * record.num_contacts)?;
    if let Some(contact_type) = &record.contact_type {
        if !contact_type.is_empty() {
            expect_len("contact_type", contact_type.len(), record.num_contacts)?;
        }
    }
    Ok(())
}

pub(super) fn define(
    ds: &mut dyn Dataset,
    widths: NameWidths,
    enums: &StoreEnums,
    record: &ContactsRecord,
) -> error::Result<String> {
    check_record(record)?;
    let n = Names::new(&record_name(&record.name)?);
    let ends = Ends {
        from: record_name(&record.mesh_from_name)?,
        from_location: enums.location_from_value(record.mesh_from_location)?,
        to: record_name(&record.mesh_to_name)?,
        to_location: enums.location_from_value(record.mesh_to_location)?,
    };

    ensure_dimension(ds, &n.contacts, record.num_contacts)?;
    ensure_dimension(ds, TWO, 2)?;

    let mut topology: Attributes = vec![
        (CF_ROLE, MESH_TOPOLOGY_CONTACT.into()),
        ("contact", ends.to_attribute().into()),
        ("start_index", 0.into()),
        ("long_name", "Mesh contact links".into()),
    ];
    if record.num_contacts > 0 {
        if record.contact_type.as_ref().map_or(false, |t| !t.is_empty()) {
            define_variable(
                ds,
                &n.contact_type,
                ValueKind::Int,
                &[n.contacts.as_str()],
                vec![("long_name", "Type of contact".into())],
            )?;
            topology.push(("contact_type", n.contact_type.as_str().into()));
        }
        if record.contact_id.is_some() {
            ensure_text_dimension(ds, STR_LENGTH_IDS, widths.name)?;
            define_names(ds, &n.contact_id, &n.contacts, STR_LENGTH_IDS, "ID of contacts")?;
            topology.push(("contact_id", n.contact_id.as_str().into()));
        }
        if record.contact_long_name.is_some() {
            ensure_text_dimension(ds, STR_LENGTH_LONG_NAMES, widths.long_name)?;
            define_names(
                ds,
                &n.contact_long_name,
                &n.contacts,
                STR_LENGTH_LONG_NAMES,
                "Long name of contacts",
            )?;
            topology.push(("contact_long_name", n.contact_long_name.as_str().into()));
        }
        define_variable(ds, &n.topology, ValueKind::Int, &[n.contacts.as_str(), TWO], topology)?;
    } else {
        define_variable(ds, &n.topology, ValueKind::Int, &[], topology)?;
    }
    Ok(n.topology)
}

pub(super) fn put(ds: &mut dyn Dataset, topology: &str, record: &ContactsRecord) -> error::Result<()> {
    check_record(record)?;
    let n = Names::new(topology);
    put_ints(ds, &n.topology, &record.edges)?;
    put_optional_ints(ds, &n.contact_type, record.contact_type.as_ref())?;
    put_optional_names(ds, &n.contact_id, record.contact_id.as_ref(), record.num_contacts)?;
    put_optional_names(
        ds,
        &n.contact_long_name,
        record.contact_long_name.as_ref(),
        record.num_contacts,
    )
}

pub(super) fn inquire(ds: &dyn Dataset, topology: &str) -> ContactsDimensions {
    let n = Names::new(topology);
    ContactsDimensions {
        num_contacts: dimension_or_zero(ds, &n.contacts),
    }
}

pub(super) fn get(
    ds: &dyn Dataset,
    topology: &str,
    enums: &StoreEnums,
    record: &mut ContactsRecord,
) -> error::Result<()> {
    let n = Names::new(topology);
    let ends = ends(ds, topology)?;
    let width = record.name.len();
    copy_into("name", &mut record.name, &text::encode_one(topology, width))?;
    let width = record.mesh_from_name.len();
    copy_into(
        "mesh_from_name",
        &mut record.mesh_from_name,
        &text::encode_one(&ends.from, width),
    )?;
    let width = record.mesh_to_name.len();
    copy_into(
        "mesh_to_name",
        &mut record.mesh_to_name,
        &text::encode_one(&ends.to, width),
    )?;
    record.mesh_from_location = enums.location(ends.from_location);
    record.mesh_to_location = enums.location(ends.to_location);

    if record.num_contacts > 0 {
        fill_ints(ds, &n.topology, &mut record.edges)?;
    } else {
        copy_into("edges", &mut record.edges, &[])?;
    }
    fill_optional_ints(ds, &n.contact_type, &mut record.contact_type)?;
    fill_names(ds, &n.contact_id, &mut record.contact_id, record.num_contacts)?;
    fill_names(
        ds,
        &n.contact_long_name,
        &mut record.contact_long_name,
        record.num_contacts,
    )
}
