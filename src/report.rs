//! Fixed-width plain-text report of model inputs and analysis results
//!
//! Layout: an input section (node and element tables), the boundary
//! conditions (prescribed displacements and assembled nodal forces), then
//! the result section (displacements, reactions, element von Mises).
//! Columns are 20 characters wide and right-justified, except the element
//! node-id list which gets 36; floats carry about 10 significant digits.

use std::io::Write;

use crate::boundary::NODE_DOF;
use crate::error::SolverResult;
use crate::model::SolidModel;

const COL: usize = 20;
/// The element node-id list gets a wider column than everything else
const NODE_LIST_COL: usize = 36;

/// Format a float with roughly 10 significant digits, trimming trailing
/// zeros, falling back to exponent notation outside a readable range.
fn fmt_g(x: f64) -> String {
    if x == 0.0 {
        return "0".to_string();
    }
    if !x.is_finite() {
        return format!("{x}");
    }
    let mag = x.abs();
    if (1e-4..1e10).contains(&mag) {
        let exp = mag.log10().floor() as i32;
        let decimals = (9 - exp).max(0) as usize;
        let s = format!("{x:.decimals$}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        let s = format!("{x:.9e}");
        match s.split_once('e') {
            Some((mantissa, exponent)) => {
                let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
                format!("{mantissa}e{exponent}")
            }
            None => s,
        }
    }
}

fn cell(text: &str) -> String {
    format!("{text:>COL$}")
}

fn wide_cell(text: &str) -> String {
    format!("{text:>NODE_LIST_COL$}")
}

fn num(x: f64) -> String {
    cell(&fmt_g(x))
}

fn rule(columns: usize) -> String {
    "-".repeat(COL * columns)
}

/// Write the full fixed-width report for an analyzed model.
///
/// Fails with [`crate::error::SolverError::NotAnalyzed`] when the model has
/// no solution to report.
pub fn write_report<W: Write>(model: &SolidModel, out: &mut W) -> SolverResult<()> {
    let displacements = model.displacements()?;
    let reactions = model.reactions()?;
    let stresses = model.element_stresses()?;

    writeln!(out, "*********************************")?;
    writeln!(out, "*          Input Data           *")?;
    writeln!(out, "*********************************")?;
    writeln!(out)?;

    writeln!(out, "***** Node Data ******")?;
    writeln!(out, "{}{}{}{}", cell("No"), cell("X"), cell("Y"), cell("Z"))?;
    writeln!(out, "{}", rule(4))?;
    for node in model.nodes() {
        writeln!(
            out,
            "{}{}{}{}",
            cell(&node.id.to_string()),
            num(node.x),
            num(node.y),
            num(node.z)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "***** Element Data ******")?;
    writeln!(
        out,
        "{}{}{}{}{}{}",
        cell("No"),
        cell("Type"),
        wide_cell("Node No"),
        cell("Young"),
        cell("Poisson"),
        cell("Density")
    )?;
    writeln!(out, "{}", "-".repeat(COL * 5 + NODE_LIST_COL))?;
    for element in model.elements() {
        let node_ids = element
            .node_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            out,
            "{}{}{}{}{}{}",
            cell(&element.id.to_string()),
            cell("Tet4"),
            wide_cell(&node_ids),
            num(element.material.e),
            num(element.material.nu),
            num(element.material.rho)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "***** SPC Constraint Data ******")?;
    writeln!(
        out,
        "{}{}{}{}",
        cell("NodeNo"),
        cell("X Displacement"),
        cell("Y Displacement"),
        cell("Z Displacement")
    )?;
    writeln!(out, "{}", rule(4))?;
    let prescribed = model.boundary().prescribed_displacements();
    for node in model.nodes() {
        let base = NODE_DOF * (node.id - 1);
        let values = &prescribed[base..base + NODE_DOF];
        if values.iter().all(|v| v.is_none()) {
            continue;
        }
        let fmt_opt = |v: &Option<f64>| match v {
            Some(value) => num(*value),
            None => cell("free"),
        };
        writeln!(
            out,
            "{}{}{}{}",
            cell(&node.id.to_string()),
            fmt_opt(&values[0]),
            fmt_opt(&values[1]),
            fmt_opt(&values[2])
        )?;
    }
    writeln!(out)?;

    writeln!(out, "***** Nodal Force Data ******")?;
    writeln!(
        out,
        "{}{}{}{}",
        cell("NodeNo"),
        cell("X Force"),
        cell("Y Force"),
        cell("Z Force")
    )?;
    writeln!(out, "{}", rule(4))?;
    let forces = model.external_force_vector();
    for node in model.nodes() {
        let base = NODE_DOF * (node.id - 1);
        writeln!(
            out,
            "{}{}{}{}",
            cell(&node.id.to_string()),
            num(forces[base]),
            num(forces[base + 1]),
            num(forces[base + 2])
        )?;
    }
    writeln!(out)?;

    writeln!(out, "**********************************")?;
    writeln!(out, "*          Result Data           *")?;
    writeln!(out, "**********************************")?;
    writeln!(out)?;

    writeln!(out, "***** Displacement Data ******")?;
    writeln!(
        out,
        "{}{}{}{}{}",
        cell("NodeNo"),
        cell("Magnitude"),
        cell("X Displacement"),
        cell("Y Displacement"),
        cell("Z Displacement")
    )?;
    writeln!(out, "{}", rule(5))?;
    for node in model.nodes() {
        let base = NODE_DOF * (node.id - 1);
        let (dx, dy, dz) = (
            displacements[base],
            displacements[base + 1],
            displacements[base + 2],
        );
        let magnitude = (dx * dx + dy * dy + dz * dz).sqrt();
        writeln!(
            out,
            "{}{}{}{}{}",
            cell(&node.id.to_string()),
            num(magnitude),
            num(dx),
            num(dy),
            num(dz)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "***** Reaction Force Data ******")?;
    writeln!(
        out,
        "{}{}{}{}{}",
        cell("NodeNo"),
        cell("Magnitude"),
        cell("X Force"),
        cell("Y Force"),
        cell("Z Force")
    )?;
    writeln!(out, "{}", rule(5))?;
    for node in model.nodes() {
        let base = NODE_DOF * (node.id - 1);
        let (fx, fy, fz) = (
            reactions[base],
            reactions[base + 1],
            reactions[base + 2],
        );
        let magnitude = (fx * fx + fy * fy + fz * fz).sqrt();
        writeln!(
            out,
            "{}{}{}{}{}",
            cell(&node.id.to_string()),
            num(magnitude),
            num(fx),
            num(fy),
            num(fz)
        )?;
    }
    writeln!(out)?;

    writeln!(out, "***** Element Stress Data ******")?;
    writeln!(
        out,
        "{}{}{}{}{}",
        cell("ElementNo"),
        cell("Von Mises"),
        cell("Sxx"),
        cell("Syy"),
        cell("Szz")
    )?;
    writeln!(out, "{}", rule(5))?;
    for stress in stresses {
        writeln!(
            out,
            "{}{}{}{}{}",
            cell(&stress.element.to_string()),
            num(stress.von_mises),
            num(stress.sxx),
            num(stress.syy),
            num(stress.szz)
        )?;
    }
    writeln!(out)?;

    let (max_vm, max_element) = model.max_von_mises()?;
    writeln!(
        out,
        "Max Von Mises Stress: {} (Element {})",
        fmt_g(max_vm),
        max_element
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Material, Node};
    use crate::error::SolverError;

    fn analyzed_model() -> SolidModel {
        let nodes = vec![
            Node::new(1, 0.0, 0.0, 0.0),
            Node::new(2, 1.0, 0.0, 0.0),
            Node::new(3, 0.0, 1.0, 0.0),
            Node::new(4, 0.0, 0.0, 1.0),
        ];
        let mut model = SolidModel::new(nodes).unwrap();
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
        model
    }

    #[test]
    fn test_report_requires_analysis() {
        let nodes = vec![
            Node::new(1, 0.0, 0.0, 0.0),
            Node::new(2, 1.0, 0.0, 0.0),
            Node::new(3, 0.0, 1.0, 0.0),
            Node::new(4, 0.0, 0.0, 1.0),
        ];
        let mut model = SolidModel::new(nodes).unwrap();
        model
            .add_element(1, [1, 2, 3, 4], Material::steel(), None)
            .unwrap();
        let mut buf = Vec::new();
        assert!(matches!(
            write_report(&model, &mut buf),
            Err(SolverError::NotAnalyzed)
        ));
    }

    #[test]
    fn test_report_sections_present() {
        let model = analyzed_model();
        let mut buf = Vec::new();
        write_report(&model, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        for section in [
            "***** Node Data ******",
            "***** Element Data ******",
            "***** SPC Constraint Data ******",
            "***** Nodal Force Data ******",
            "***** Displacement Data ******",
            "***** Reaction Force Data ******",
            "***** Element Stress Data ******",
            "Max Von Mises Stress",
        ] {
            assert!(text.contains(section), "missing section: {section}");
        }
        // SPC section lists the three fixed nodes, not the loaded apex
        let spc = text
            .split("***** SPC Constraint Data ******")
            .nth(1)
            .unwrap()
            .split("*****")
            .next()
            .unwrap();
        for node in ["1", "2", "3"] {
            assert!(spc.contains(&format!("{node:>20}")));
        }
        assert!(!spc.contains(&format!("{:>20}", "4")));
    }

    #[test]
    fn test_fmt_g() {
        assert_eq!(fmt_g(0.0), "0");
        assert_eq!(fmt_g(1.0), "1");
        assert_eq!(fmt_g(-2.5), "-2.5");
        assert_eq!(fmt_g(0.3), "0.3");
        // More than 10 significant digits falls back to exponent notation,
        // with trailing mantissa zeros trimmed there as well
        assert_eq!(fmt_g(200e9), "2e11");
        assert_eq!(fmt_g(1e-12), "1e-12");
        assert_eq!(fmt_g(-2.5e10), "-2.5e10");
    }

    #[test]
    fn test_element_node_list_column_width() {
        let model = analyzed_model();
        let mut buf = Vec::new();
        write_report(&model, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        // The node-id list occupies its own 36-character column
        assert!(text.contains(&format!("{:>36}", "1 2 3 4")));
        assert!(text.contains(&format!("{:>36}", "Node No")));
        // The element table rule spans five 20-char columns plus the wide one
        assert!(text.contains(&"-".repeat(20 * 5 + 36)));
    }
}
