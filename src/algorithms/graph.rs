//! Breadth-first and depth-first traversal
//!
//! Neighbors are visited in ascending node order so that a given graph
//! always produces the same trace.

use crate::error::{TraceError, TraceResult};
use crate::trace::{Algorithm, Recorder};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphInput {
    pub node_count: usize,
    pub edges: Vec<(usize, usize)>,
    pub directed: bool,
    pub start: usize,
}

impl GraphInput {
    fn check(&self, algorithm: &'static str) -> TraceResult<()> {
        if self.node_count == 0 {
            return Err(TraceError::invalid_input(algorithm, "graph has no nodes"));
        }
        if self.start >= self.node_count {
            return Err(TraceError::invalid_input(
                algorithm,
                format!(
                    "start node {} is outside 0..{}",
                    self.start, self.node_count
                ),
            ));
        }
        if let Some((a, b)) = self
            .edges
            .iter()
            .find(|(a, b)| *a >= self.node_count || *b >= self.node_count)
        {
            return Err(TraceError::invalid_input(
                algorithm,
                format!("edge {a}-{b} leaves the graph of {} nodes", self.node_count),
            ));
        }
        Ok(())
    }

    /// Sorted, de-duplicated adjacency lists
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.node_count];
        for &(a, b) in &self.edges {
            adjacency[a].push(b);
            if !self.directed {
                adjacency[b].push(a);
            }
        }
        for neighbors in &mut adjacency {
            neighbors.sort_unstable();
            neighbors.dedup();
        }
        adjacency
    }
}

/// Parse one `a-b` edge, for command-line use
pub fn parse_edge(text: &str) -> Result<(usize, usize), String> {
    let (a, b) = text
        .split_once('-')
        .ok_or_else(|| format!("expected an edge like 0-1, got '{text}'"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<usize>()
            .map_err(|e| format!("bad node '{s}' in edge '{text}': {e}"))
    };
    Ok((parse(a)?, parse(b)?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphEvent {
    /// Node added to the frontier
    Push(usize),
    /// Node taken off the frontier and visited
    Visit(usize),
    /// Node already marked, ignored
    Skip(usize),
    Complete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphSnapshot {
    /// Nodes discovered so far
    pub marked: Vec<bool>,
    /// Frontier contents, next-out first
    pub frontier: Vec<usize>,
    pub current: Option<usize>,
    /// Visit order so far
    pub order: Vec<usize>,
    pub event: GraphEvent,
}

struct Walk {
    marked: Vec<bool>,
    order: Vec<usize>,
    current: Option<usize>,
}

impl Walk {
    fn new(node_count: usize) -> Self {
        Walk {
            marked: vec![false; node_count],
            order: Vec::new(),
            current: None,
        }
    }

    fn snapshot(&self, frontier: Vec<usize>, event: GraphEvent) -> GraphSnapshot {
        GraphSnapshot {
            marked: self.marked.clone(),
            frontier,
            current: self.current,
            order: self.order.clone(),
            event,
        }
    }

    fn complete_description(&self) -> String {
        let order: Vec<String> = self.order.iter().map(ToString::to_string).collect();
        format!("Traversal complete: {}", order.join(" → "))
    }
}

/// Queue-based traversal; nodes are marked when enqueued
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst;

impl Algorithm for BreadthFirst {
    type Input = GraphInput;
    type Snapshot = GraphSnapshot;

    fn name(&self) -> &'static str {
        "bfs"
    }

    fn validate(&self, input: &GraphInput) -> TraceResult<()> {
        input.check(self.name())
    }

    fn run(&self, input: &GraphInput, recorder: &mut Recorder<GraphSnapshot>) -> TraceResult<()> {
        let adjacency = input.adjacency();
        let mut walk = Walk::new(input.node_count);
        let mut queue = VecDeque::from([input.start]);
        walk.marked[input.start] = true;
        let frontier = |q: &VecDeque<usize>| q.iter().copied().collect::<Vec<_>>();

        recorder.record(
            walk.snapshot(frontier(&queue), GraphEvent::Push(input.start)),
            format!("Enqueue start node {}", input.start),
        )?;

        while let Some(node) = queue.pop_front() {
            walk.current = Some(node);
            walk.order.push(node);
            recorder.record(
                walk.snapshot(frontier(&queue), GraphEvent::Visit(node)),
                format!("Dequeue and visit {node}"),
            )?;

            for &next in &adjacency[node] {
                if walk.marked[next] {
                    recorder.record(
                        walk.snapshot(frontier(&queue), GraphEvent::Skip(next)),
                        format!("{next} already discovered"),
                    )?;
                } else {
                    walk.marked[next] = true;
                    queue.push_back(next);
                    recorder.record(
                        walk.snapshot(frontier(&queue), GraphEvent::Push(next)),
                        format!("Enqueue neighbor {next} of {node}"),
                    )?;
                }
            }
        }

        walk.current = None;
        let description = walk.complete_description();
        recorder.record(walk.snapshot(Vec::new(), GraphEvent::Complete), description)
    }
}

/// Stack-based traversal; nodes are marked when popped
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirst;

impl Algorithm for DepthFirst {
    type Input = GraphInput;
    type Snapshot = GraphSnapshot;

    fn name(&self) -> &'static str {
        "dfs"
    }

    fn validate(&self, input: &GraphInput) -> TraceResult<()> {
        input.check(self.name())
    }

    fn run(&self, input: &GraphInput, recorder: &mut Recorder<GraphSnapshot>) -> TraceResult<()> {
        let adjacency = input.adjacency();
        let mut walk = Walk::new(input.node_count);
        let mut stack = vec![input.start];
        let frontier = |s: &[usize]| s.iter().rev().copied().collect::<Vec<_>>();

        recorder.record(
            walk.snapshot(frontier(&stack[..]), GraphEvent::Push(input.start)),
            format!("Push start node {}", input.start),
        )?;

        while let Some(node) = stack.pop() {
            if walk.marked[node] {
                recorder.record(
                    walk.snapshot(frontier(&stack[..]), GraphEvent::Skip(node)),
                    format!("Pop {node}: already visited"),
                )?;
                continue;
            }

            walk.marked[node] = true;
            walk.current = Some(node);
            walk.order.push(node);
            recorder.record(
                walk.snapshot(frontier(&stack[..]), GraphEvent::Visit(node)),
                format!("Pop and visit {node}"),
            )?;

            // reversed so the smallest neighbor is popped first
            for &next in adjacency[node].iter().rev() {
                if !walk.marked[next] {
                    stack.push(next);
                    recorder.record(
                        walk.snapshot(frontier(&stack[..]), GraphEvent::Push(next)),
                        format!("Push neighbor {next} of {node}"),
                    )?;
                }
            }
        }

        walk.current = None;
        let description = walk.complete_description();
        recorder.record(walk.snapshot(Vec::new(), GraphEvent::Complete), description)
    }
}
