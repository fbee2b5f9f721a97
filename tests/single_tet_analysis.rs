use solid_solver::prelude::*;

fn unit_tet_nodes() -> Vec<Node> {
    vec![
        Node::new(1, 0.0, 0.0, 0.0),
        Node::new(2, 1.0, 0.0, 0.0),
        Node::new(3, 0.0, 1.0, 0.0),
        Node::new(4, 0.0, 0.0, 1.0),
    ]
}

#[test]
fn single_tet_equilibrium() {
    // Single tetrahedron, E = 210 GPa, nu = 0.3, node 1 fully fixed, unit
    // x-force at node 2. The remaining rotational flexibility makes the
    // constrained matrix poorly conditioned, but the load is self-consistent
    // and the solve must return finite displacements with x-equilibrium.
    let mut model = SolidModel::new(unit_tet_nodes()).unwrap();
    let material = Material::new(210e9, 0.3, 7850.0).unwrap();
    model.add_element(1, [1, 2, 3, 4], material, None).unwrap();

    model.set_prescribed_displacement(1, 0.0, 0.0, 0.0).unwrap();
    model.add_force(2, 1.0, 0.0, 0.0).unwrap();

    model.analysis().unwrap();

    let u = model.displacements().unwrap();
    assert_eq!(u.len(), 12);
    for value in u.iter() {
        assert!(value.is_finite(), "displacements must contain no NaNs");
    }

    // Global force equilibrium in x: reactions plus the applied load cancel
    let r = model.reactions().unwrap();
    let sum_rx: f64 = (0..4).map(|i| r[3 * i]).sum();
    assert!(
        (sum_rx + 1.0).abs() < 1e-6,
        "x-equilibrium violated: sum of reactions = {sum_rx}"
    );
}

#[test]
fn stress_recovery_is_local() {
    // Per-element stress depends only on the element's own nodal
    // displacements: prescribing a uniform-strain field on every node makes
    // both elements report identical stress.
    let nodes = vec![
        Node::new(1, 0.0, 0.0, 0.0),
        Node::new(2, 1.0, 0.0, 0.0),
        Node::new(3, 0.0, 1.0, 0.0),
        Node::new(4, 0.0, 0.0, 1.0),
        Node::new(5, 1.0, 1.0, 1.0),
    ];
    let mut model = SolidModel::new(nodes.clone()).unwrap();
    let material = Material::new(1e6, 0.25, 0.0).unwrap();
    model.add_element(1, [1, 2, 3, 4], material, None).unwrap();
    model.add_element(2, [2, 3, 4, 5], material, None).unwrap();

    // u = 0.001 * x everywhere: uniform strain εxx = 0.001
    let eps = 0.001;
    for node in &nodes {
        model
            .set_prescribed_displacement(node.id, eps * node.x, 0.0, 0.0)
            .unwrap();
    }
    model.analysis().unwrap();

    let stresses = model.element_stresses().unwrap();
    assert_eq!(stresses.len(), 2);
    let first = &stresses[0];
    let second = &stresses[1];
    assert!((first.sxx - second.sxx).abs() < first.sxx.abs() * 1e-9);
    assert!((first.von_mises - second.von_mises).abs() < first.von_mises * 1e-9);

    // Constant-strain value matches the constitutive relation directly
    let d = material.constitutive_matrix();
    assert!((first.sxx - d[(0, 0)] * eps).abs() < 1e-3);
    assert!((first.syy - d[(1, 0)] * eps).abs() < 1e-3);
}

#[test]
fn max_von_mises_tracks_owning_element() {
    // Two elements, load applied so the element attached to the loaded apex
    // carries more stress
    let nodes = vec![
        Node::new(1, 0.0, 0.0, 0.0),
        Node::new(2, 1.0, 0.0, 0.0),
        Node::new(3, 0.0, 1.0, 0.0),
        Node::new(4, 0.0, 0.0, 1.0),
        Node::new(5, 1.0, 1.0, 1.0),
    ];
    let mut model = SolidModel::new(nodes).unwrap();
    let material = Material::steel();
    model.add_element(1, [1, 2, 3, 4], material, None).unwrap();
    model.add_element(2, [2, 3, 4, 5], material, None).unwrap();

    for node_id in [1, 2, 3] {
        model
            .set_prescribed_displacement(node_id, 0.0, 0.0, 0.0)
            .unwrap();
    }
    model.add_force(5, 2000.0, 0.0, -5000.0).unwrap();
    model.analysis().unwrap();

    let (max_vm, element_id) = model.max_von_mises().unwrap();
    let listed_max = model
        .element_stresses()
        .unwrap()
        .iter()
        .map(|s| s.von_mises)
        .fold(0.0_f64, f64::max);
    assert!(max_vm > 0.0);
    assert_eq!(max_vm, listed_max);
    assert_eq!(max_vm, model.element_stress(element_id).unwrap().von_mises);
}

#[test]
fn gravity_cantilever_sags() {
    // Two stacked tetrahedra under gravity, base fixed: everything moves
    // down and the reactions carry the total weight
    let nodes = vec![
        Node::new(1, 0.0, 0.0, 0.0),
        Node::new(2, 1.0, 0.0, 0.0),
        Node::new(3, 0.0, 1.0, 0.0),
        Node::new(4, 0.0, 0.0, 1.0),
        Node::new(5, 1.0, 1.0, 1.0),
    ];
    let mut model = SolidModel::new(nodes).unwrap();
    let material = Material::steel();
    let gravity = Vec3::new(0.0, 0.0, -9.81);
    model
        .add_element(1, [1, 2, 3, 4], material, Some(gravity))
        .unwrap();
    model
        .add_element(2, [2, 3, 4, 5], material, Some(gravity))
        .unwrap();

    for node_id in [1, 2, 3] {
        model
            .set_prescribed_displacement(node_id, 0.0, 0.0, 0.0)
            .unwrap();
    }
    model.analysis().unwrap();

    let total_volume: f64 = model.elements().iter().map(|e| e.volume()).sum();
    let weight = material.rho * 9.81 * total_volume;

    // Sum of all z-reactions balances the body force
    let r = model.reactions().unwrap();
    let sum_z: f64 = (0..5).map(|i| r[3 * i + 2]).sum();
    assert!(
        (sum_z - weight).abs() < weight * 1e-8,
        "reactions must carry the weight: {sum_z} vs {weight}"
    );

    // The free top node sags
    let top = model.node_displacement(5).unwrap();
    assert!(top.dz < 0.0);
}

#[test]
fn repeated_analysis_is_idempotent() {
    let mut model = SolidModel::new(unit_tet_nodes()).unwrap();
    model
        .add_element(1, [1, 2, 3, 4], Material::steel(), None)
        .unwrap();
    for node_id in [1, 2, 3] {
        model
            .set_prescribed_displacement(node_id, 0.0, 0.0, 0.0)
            .unwrap();
    }
    model.add_force(4, 100.0, 50.0, -75.0).unwrap();

    model.analysis().unwrap();
    let first = model.displacements().unwrap().clone();
    model.analysis().unwrap();
    let second = model.displacements().unwrap().clone();

    assert_eq!(first, second);
}

#[test]
fn report_writes_full_document() {
    let mut model = SolidModel::new(unit_tet_nodes()).unwrap();
    model
        .add_element(1, [1, 2, 3, 4], Material::steel(), None)
        .unwrap();
    for node_id in [1, 2, 3] {
        model
            .set_prescribed_displacement(node_id, 0.0, 0.0, 0.0)
            .unwrap();
    }
    model.add_force(4, 0.0, 0.0, 1000.0).unwrap();
    model.analysis().unwrap();

    let mut buf = Vec::new();
    write_report(&model, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("Input Data"));
    assert!(text.contains("Result Data"));
    assert!(text.contains("Max Von Mises Stress"));
}
