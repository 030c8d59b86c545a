//! Floor-plan connectivity between slot positions.
//!
//! Nodes are slot positions in the master ordering (0-based here). Errors
//! report 1-based slot numbers, which is how callers address slots.

use std::collections::VecDeque;

use serde::Serialize;

use crate::types::{ParkError, Result};

/// Node visit captured during a breadth-first traversal.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct BfsVisit {
    /// 0-based position of the visited slot.
    pub position: usize,
    /// Distance in hops from the origin.
    pub depth: u32,
}

/// Undirected, unweighted graph over slot positions.
#[derive(Clone, Debug)]
pub struct FloorGraph {
    adjacency: Vec<Vec<usize>>,
}

impl FloorGraph {
    /// Builds a graph with `len` nodes from 0-based edges.
    ///
    /// Self-loops and repeated edges are dropped. Neighbour lists are kept in
    /// ascending order so traversals are deterministic.
    pub fn new<I>(len: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut adjacency = vec![Vec::new(); len];
        for (a, b) in edges {
            if a >= len || b >= len {
                return Err(ParkError::InvalidEdge {
                    a: a + 1,
                    b: b + 1,
                    len,
                });
            }
            if a == b {
                continue;
            }
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        for list in &mut adjacency {
            list.sort_unstable();
            list.dedup();
        }
        Ok(Self { adjacency })
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Neighbours of `position` in ascending order.
    pub fn neighbors(&self, position: usize) -> Result<&[usize]> {
        self.check(position)?;
        Ok(&self.adjacency[position])
    }

    /// Fewest hops between two positions.
    pub fn shortest_hops(&self, src: usize, dest: usize) -> Result<u32> {
        let (dist, _) = self.search(src, dest)?;
        dist[dest].ok_or_else(|| self.unreachable(src, dest))
    }

    /// Positions along one shortest route, both endpoints included.
    pub fn shortest_path(&self, src: usize, dest: usize) -> Result<Vec<usize>> {
        let (dist, parent) = self.search(src, dest)?;
        if dist[dest].is_none() {
            return Err(self.unreachable(src, dest));
        }
        let mut path = vec![dest];
        let mut cursor = dest;
        while cursor != src {
            cursor = parent[cursor];
            path.push(cursor);
        }
        path.reverse();
        Ok(path)
    }

    /// Breadth-first traversal from `start`, down to `max_depth` hops inclusive.
    pub fn bfs(&self, start: usize, max_depth: u32) -> Result<Vec<BfsVisit>> {
        self.check(start)?;
        let mut seen = vec![false; self.len()];
        let mut queue: VecDeque<(usize, u32)> = VecDeque::new();
        let mut visits = Vec::new();
        queue.push_back((start, 0));
        seen[start] = true;
        while let Some((position, depth)) = queue.pop_front() {
            visits.push(BfsVisit { position, depth });
            if depth >= max_depth {
                continue;
            }
            for &next in &self.adjacency[position] {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back((next, depth + 1));
                }
            }
        }
        Ok(visits)
    }

    /// BFS from `src` that stops once `dest` is dequeued.
    fn search(&self, src: usize, dest: usize) -> Result<(Vec<Option<u32>>, Vec<usize>)> {
        self.check(src)?;
        self.check(dest)?;
        let mut dist: Vec<Option<u32>> = vec![None; self.len()];
        let mut parent: Vec<usize> = (0..self.len()).collect();
        let mut queue = VecDeque::new();
        dist[src] = Some(0);
        queue.push_back(src);
        while let Some(node) = queue.pop_front() {
            if node == dest {
                break;
            }
            let next_depth = dist[node].map_or(0, |d| d + 1);
            for &next in &self.adjacency[node] {
                if dist[next].is_none() {
                    dist[next] = Some(next_depth);
                    parent[next] = node;
                    queue.push_back(next);
                }
            }
        }
        Ok((dist, parent))
    }

    fn check(&self, position: usize) -> Result<()> {
        if position < self.len() {
            Ok(())
        } else {
            Err(ParkError::OutOfRange {
                slot: u32::try_from(position + 1).unwrap_or(u32::MAX),
                len: self.len(),
            })
        }
    }

    fn unreachable(&self, src: usize, dest: usize) -> ParkError {
        ParkError::Unreachable {
            src: u32::try_from(src + 1).unwrap_or(u32::MAX),
            dest: u32::try_from(dest + 1).unwrap_or(u32::MAX),
        }
    }
}
