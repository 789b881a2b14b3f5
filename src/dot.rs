//! Diagram to DOT (Graphviz) conversion.
//!
//! The generated DOT output follows these conventions:
//! - **Constants** (0 and 1) are squares at the bottom (sink rank)
//! - **Decision nodes** are circles labeled with their literal, grouped by term position
//! - **AND/OR gates** (produced by the monotone shortcut) are diamonds labeled `&` or `|`
//! - **Leaves** are plaintext literals
//! - **Edges**: solid lines are high (then) edges, dashed lines are low (else) edges,
//!   dotted lines are gate operands
//! - **Root** is a rectangle at the top (source rank)
//!
//! ```
//! use pb_bdd::bdd::BddEncoder;
//! use pb_bdd::constraint::{Comparator, PbConstraint};
//! use pb_bdd::types::Lit;
//!
//! let c = PbConstraint::cardinality((1..=3).map(Lit::from_dimacs), Comparator::Leq(1)).unwrap();
//! let diagram = BddEncoder::unlimited().build_diagram(&c);
//! let dot = diagram.to_dot().unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! assert!(dot.starts_with("graph {"));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;

use crate::bdd::Diagram;
use crate::gate::{Gate, GateId};

/// Configuration options for DOT output generation.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for decision nodes (default: "circle")
    pub node_shape: &'static str,
    /// Shape for AND/OR gates (default: "diamond")
    pub gate_shape: &'static str,
    /// Shape for constants (default: "square")
    pub terminal_shape: &'static str,
    /// Shape for the root marker (default: "rect")
    pub root_shape: &'static str,
    /// Style for high (then) edges (default: "solid")
    pub high_edge_style: &'static str,
    /// Style for low (else) edges (default: "dashed")
    pub low_edge_style: &'static str,
    /// Style for gate operand edges (default: "dotted")
    pub operand_edge_style: &'static str,
    /// Whether to use HTML labels for subscripts (default: true)
    pub use_html_labels: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            gate_shape: "diamond",
            terminal_shape: "square",
            root_shape: "rect",
            high_edge_style: "solid",
            low_edge_style: "dashed",
            operand_edge_style: "dotted",
            use_html_labels: true,
        }
    }
}

impl Diagram {
    /// Converts the diagram to DOT (Graphviz) format.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the diagram to DOT format with custom configuration.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let graph = self.graph();
        let position: HashMap<_, _> = self
            .terms()
            .iter()
            .enumerate()
            .map(|(i, t)| (t.lit.var(), i))
            .collect();
        let label = |lit: crate::types::Lit| {
            let sign = if lit.is_negated() { "¬" } else { "" };
            if config.use_html_labels {
                format!("<{}x<SUB>{}</SUB>>", sign, lit.var().id())
            } else {
                format!("\"{}x{}\"", sign, lit.var().id())
            }
        };

        let mut dot = String::new();
        writeln!(dot, "graph {{")?;
        writeln!(dot, "node [shape={}, fixedsize=true];", config.node_shape)?;

        writeln!(dot, "{{ rank=sink")?;
        writeln!(dot, "0 [shape={}, label=\"0\"];", config.terminal_shape)?;
        writeln!(dot, "1 [shape={}, label=\"1\"];", config.terminal_shape)?;
        writeln!(dot, "}}")?;

        let reachable = graph.descendants(self.root());

        // Group non-constant gates by the term they decide (or guard)
        let mut levels = BTreeMap::<usize, Vec<GateId>>::new();
        for &id in &reachable {
            let lit = match graph.gate(id) {
                Gate::Const(_) => continue,
                Gate::Leaf(lit) | Gate::Ite(lit, _, _) => lit,
                Gate::And(a, b) | Gate::Or(a, b) => match (graph.gate(a), graph.gate(b)) {
                    (Gate::Leaf(x), Gate::Leaf(y)) => {
                        if position[&x.var()] <= position[&y.var()] {
                            x
                        } else {
                            y
                        }
                    }
                    (Gate::Leaf(x), _) | (_, Gate::Leaf(x)) => x,
                    _ => continue,
                },
            };
            levels.entry(position[&lit.var()]).or_default().push(id);
        }

        for level in levels.values() {
            writeln!(dot, "{{ rank=same")?;
            for &id in level {
                match graph.gate(id) {
                    Gate::Leaf(lit) => writeln!(dot, "{} [shape=plaintext, label={}];", id.index(), label(lit))?,
                    Gate::Ite(lit, _, _) => writeln!(dot, "{} [label={}];", id.index(), label(lit))?,
                    Gate::And(..) => writeln!(dot, "{} [shape={}, label=\"&\"];", id.index(), config.gate_shape)?,
                    Gate::Or(..) => writeln!(dot, "{} [shape={}, label=\"|\"];", id.index(), config.gate_shape)?,
                    Gate::Const(_) => {}
                }
            }
            writeln!(dot, "}}")?;
        }

        for &id in &reachable {
            match graph.gate(id) {
                Gate::Const(_) | Gate::Leaf(_) => {}
                Gate::Ite(_, high, low) => {
                    writeln!(dot, "{} -- {} [style={}];", id.index(), high.index(), config.high_edge_style)?;
                    writeln!(dot, "{} -- {} [style={}];", id.index(), low.index(), config.low_edge_style)?;
                }
                Gate::And(a, b) | Gate::Or(a, b) => {
                    for child in [a, b] {
                        writeln!(
                            dot,
                            "{} -- {} [style={}];",
                            id.index(),
                            child.index(),
                            config.operand_edge_style
                        )?;
                    }
                }
            }
        }

        writeln!(dot, "{{ rank=source")?;
        writeln!(dot, "r [shape={}, label=\"{}\"];", config.root_shape, self.root())?;
        writeln!(dot, "}}")?;
        writeln!(dot, "r -- {};", self.root().index())?;

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
