//! Solid Solver Example - Cantilever Bar
//!
//! A rectangular bar meshed with hexahedral cells, each split into six
//! tetrahedra. The left face is fixed, the right face carries a downward
//! tip load, and gravity acts on every element.

use anyhow::Context;
use solid_solver::prelude::*;

/// Corner offsets of one hex cell, then the six-tet split sharing the
/// main diagonal.
const HEX_CORNERS: [(usize, usize, usize); 8] = [
    (0, 0, 0),
    (1, 0, 0),
    (1, 1, 0),
    (0, 1, 0),
    (0, 0, 1),
    (1, 0, 1),
    (1, 1, 1),
    (0, 1, 1),
];

const HEX_TETS: [[usize; 4]; 6] = [
    [0, 1, 2, 6],
    [0, 2, 3, 6],
    [0, 3, 7, 6],
    [0, 7, 4, 6],
    [0, 4, 5, 6],
    [0, 5, 1, 6],
];

fn signed_volume(nodes: &[Node], ids: &[usize; 4]) -> f64 {
    let p: Vec<Vec3> = ids.iter().map(|&id| nodes[id - 1].position()).collect();
    let j = nalgebra::Matrix3::from_rows(&[
        (p[1] - p[0]).transpose(),
        (p[2] - p[0]).transpose(),
        (p[3] - p[0]).transpose(),
    ]);
    j.determinant() / 6.0
}

/// Build a bar of `nx` x `ny` x `nz` unit cubes as a tetrahedral mesh.
fn build_bar(
    nx: usize,
    ny: usize,
    nz: usize,
    material: Material,
    gravity: Option<Vec3>,
) -> anyhow::Result<SolidModel> {
    let node_id = |i: usize, j: usize, k: usize| 1 + i + (nx + 1) * (j + (ny + 1) * k);

    let mut nodes = Vec::with_capacity((nx + 1) * (ny + 1) * (nz + 1));
    for k in 0..=nz {
        for j in 0..=ny {
            for i in 0..=nx {
                nodes.push(Node::new(node_id(i, j, k), i as f64, j as f64, k as f64));
            }
        }
    }
    let mut model = SolidModel::new(nodes.clone()).context("mesh node numbering")?;

    let mut element_id = 0;
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let corner_ids: Vec<usize> = HEX_CORNERS
                    .iter()
                    .map(|&(di, dj, dk)| node_id(i + di, j + dj, k + dk))
                    .collect();
                for tet in &HEX_TETS {
                    let mut ids = [
                        corner_ids[tet[0]],
                        corner_ids[tet[1]],
                        corner_ids[tet[2]],
                        corner_ids[tet[3]],
                    ];
                    // Repair inverted connectivity before the element ctor
                    // rejects it
                    if signed_volume(&nodes, &ids) <= 0.0 {
                        ids.swap(2, 3);
                    }
                    element_id += 1;
                    model
                        .add_element(element_id, ids, material, gravity)
                        .with_context(|| format!("element {element_id}"))?;
                }
            }
        }
    }

    // Fix the x = 0 face
    for k in 0..=nz {
        for j in 0..=ny {
            model.set_prescribed_displacement(node_id(0, j, k), 0.0, 0.0, 0.0)?;
        }
    }
    Ok(model)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Solid Solver Example: Cantilever Bar ===\n");

    let (nx, ny, nz) = (4, 1, 1);
    let steel = Material::steel();
    let gravity = Vec3::new(0.0, 0.0, -9.81);
    let mut model = build_bar(nx, ny, nz, steel, Some(gravity))?;

    // Downward tip load shared by the free-end face
    let tip_nodes: Vec<usize> = (0..=nz)
        .flat_map(|k| (0..=ny).map(move |j| 1 + nx + (nx + 1) * (j + (ny + 1) * k)))
        .collect();
    let tip_force = -10_000.0 / tip_nodes.len() as f64;
    for node_id in &tip_nodes {
        model.add_force(*node_id, 0.0, 0.0, tip_force)?;
    }

    println!(
        "Mesh: {} nodes, {} elements\n",
        model.nodes().len(),
        model.elements().len()
    );

    println!("Running linear analysis...\n");
    model.analysis()?;

    write_report(&model, &mut std::io::stdout())?;

    let summary = model.summary()?;
    println!();
    println!("Summary:");
    println!(
        "  Max displacement: {:.4}mm at node {}",
        summary.max_displacement * 1000.0,
        summary.max_disp_node
    );
    println!(
        "  Max reaction: {:.2}kN at node {}",
        summary.max_reaction / 1000.0,
        summary.max_reaction_node
    );
    println!(
        "  Max von Mises: {:.3}MPa in element {}",
        summary.max_von_mises / 1e6,
        summary.max_stress_element
    );

    println!("\n=== Analysis Complete ===");
    Ok(())
}
