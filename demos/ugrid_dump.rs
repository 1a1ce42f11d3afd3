use clap::Parser;
use ugrid::engine::NetcdfStore;
use ugrid::{Contacts, Location, Mesh1d, Mesh2d, Network1d, Store, TopologyKind, UGridFile};

/// Lists the UGRID topologies of a NetCDF file
#[derive(Debug, Parser)]
struct Opt {
    path: std::path::PathBuf,
    /// Also list the attributes of every data variable
    #[arg(short, long)]
    attributes: bool,
}

fn main() {
    env_logger::init();
    let opt = Opt::parse();

    match run(&opt) {
        Err(e) => {
            println!("{}", e);
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}

fn run(opt: &Opt) -> Result<(), Box<dyn std::error::Error>> {
    let store = NetcdfStore::netcdf();
    let file = ugrid::open(&store, &opt.path)?;
    println!("{} ({})", opt.path.display(), file.store_version()?);

    for index in 0..file.count::<Network1d>()? {
        let network: Network1d = file.get(index)?;
        let dims = file.inquire::<Network1d>(index)?;
        println!(
            "network1d {}: {} nodes, {} branches, {} geometry nodes",
            network.name, dims.num_nodes, dims.num_branches(), dims.num_geometry_nodes
        );
        print_data(&file, TopologyKind::Network1d, index, opt.attributes)?;
    }
    for index in 0..file.count::<Mesh1d>()? {
        let mesh: Mesh1d = file.get(index)?;
        let dims = file.inquire::<Mesh1d>(index)?;
        println!(
            "mesh1d {} on {}: {} nodes, {} edges",
            mesh.name, mesh.network_name, dims.num_nodes, dims.num_edges
        );
        print_data(&file, TopologyKind::Mesh1d, index, opt.attributes)?;
    }
    for index in 0..file.count::<Mesh2d>()? {
        let mesh: Mesh2d = file.get(index)?;
        let dims = file.inquire::<Mesh2d>(index)?;
        println!(
            "mesh2d {}: {} nodes, {} edges, {} faces (up to {} nodes), {} layers",
            mesh.name,
            dims.num_nodes,
            dims.num_edges,
            dims.num_faces,
            dims.num_face_nodes_max,
            dims.num_layers
        );
        print_data(&file, TopologyKind::Mesh2d, index, opt.attributes)?;
    }
    for index in 0..file.count::<Contacts>()? {
        let contacts: Contacts = file.get(index)?;
        println!(
            "contacts {}: {} links from {} ({}) to {} ({})",
            contacts.name,
            contacts.edges.len() / 2,
            contacts.mesh_from_name,
            contacts.mesh_from_location,
            contacts.mesh_to_name,
            contacts.mesh_to_location
        );
    }
    file.close()?;
    Ok(())
}

fn print_data<S: Store + ?Sized>(
    file: &UGridFile<'_, S>,
    kind: TopologyKind,
    index: usize,
    attributes: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for location in Location::ALL {
        for variable in file.topology_data_variables(kind, index, location)? {
            println!("\t{} on {}: {:?}", variable, location, file.variable_dimensions(&variable)?);
            if attributes {
                for (name, value) in file.variable_attributes(&variable)? {
                    println!("\t\t{} = {}", name, value);
                }
            }
        }
    }
    Ok(())
}
