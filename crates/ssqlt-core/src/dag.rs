//! Foreign-key dependency graph and topological ordering

use crate::error::{CoreError, CoreResult};
use crate::table::Table;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::BTreeMap;

/// DFS marking state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Unvisited,
    InProgress,
    Done,
}

/// One frame of the explicit DFS stack
struct Frame {
    node: NodeIndex,
    successors: Vec<NodeIndex>,
    cursor: usize,
}

/// A directed graph of table dependencies.
///
/// Edges run from a referenced table to the table declaring the foreign key,
/// so the topological order lists referenced tables before referencing ones.
#[derive(Debug)]
pub struct DependencyGraph {
    /// The underlying graph
    graph: DiGraph<String, ()>,

    /// Map from table name to node index, sorted for deterministic traversal
    node_map: BTreeMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: BTreeMap::new(),
        }
    }

    /// Add a table to the graph
    pub fn add_table(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(name) {
            idx
        } else {
            let idx = self.graph.add_node(name.to_string());
            self.node_map.insert(name.to_string(), idx);
            idx
        }
    }

    /// Add an edge from `referenced` to `referencing`
    pub fn add_dependency(&mut self, referencing: &str, referenced: &str) {
        if referencing == referenced {
            log::debug!("Ignoring self-reference on table '{}'", referencing);
            return;
        }
        let from = self.add_table(referenced);
        let to = self.add_table(referencing);
        if self.graph.find_edge(from, to).is_none() {
            self.graph.add_edge(from, to, ());
        }
    }

    /// Build the graph from the tables of one schema.
    ///
    /// Foreign keys to tables outside `tables` cannot be ordered against and
    /// are skipped.
    pub fn from_tables(tables: &BTreeMap<String, Table>) -> Self {
        let mut graph = Self::new();
        for name in tables.keys() {
            graph.add_table(name);
        }
        for table in tables.values() {
            for fk in &table.foreign_keys {
                if fk.ref_schema == table.schema && tables.contains_key(&fk.ref_table) {
                    graph.add_dependency(&table.name, &fk.ref_table);
                } else {
                    log::warn!(
                        "Foreign key on {} references {}.{} outside its schema; not ordered",
                        table.qualified_name(),
                        fk.ref_schema,
                        fk.ref_table
                    );
                }
            }
        }
        graph
    }

    /// Direct successors of a node, sorted by name
    fn sorted_successors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        let mut successors: Vec<NodeIndex> = self.graph.neighbors(node).collect();
        successors.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
        successors
    }

    /// Tables in topological order (referenced tables first).
    ///
    /// Iterative depth-first search with three-color marking; the result is
    /// the reverse of the finish order. Reaching an in-progress node means a
    /// cycle, reported with that node's name.
    pub fn topological_order(&self) -> CoreResult<Vec<String>> {
        let mut color = vec![Color::Unvisited; self.graph.node_count()];
        let mut finished: Vec<NodeIndex> = Vec::with_capacity(self.graph.node_count());

        for &start in self.node_map.values() {
            if color[start.index()] != Color::Unvisited {
                continue;
            }
            color[start.index()] = Color::InProgress;
            let mut stack = vec![Frame {
                node: start,
                successors: self.sorted_successors(start),
                cursor: 0,
            }];

            while let Some(frame) = stack.last_mut() {
                let next = frame.successors.get(frame.cursor).copied();
                frame.cursor += 1;
                match next {
                    Some(succ) => match color[succ.index()] {
                        Color::Unvisited => {
                            color[succ.index()] = Color::InProgress;
                            stack.push(Frame {
                                node: succ,
                                successors: self.sorted_successors(succ),
                                cursor: 0,
                            });
                        }
                        Color::InProgress => {
                            return Err(CoreError::CircularDependency {
                                node: self.graph[succ].clone(),
                            });
                        }
                        Color::Done => {}
                    },
                    None => {
                        let node = frame.node;
                        color[node.index()] = Color::Done;
                        finished.push(node);
                        stack.pop();
                    }
                }
            }
        }

        finished.reverse();
        Ok(finished
            .into_iter()
            .map(|idx| self.graph[idx].clone())
            .collect())
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the dependency order of one schema's tables
pub fn resolve(tables: &BTreeMap<String, Table>) -> CoreResult<Vec<String>> {
    DependencyGraph::from_tables(tables).topological_order()
}

#[cfg(test)]
#[path = "dag_test.rs"]
mod tests;
