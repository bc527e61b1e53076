//! Nearest common ancestor of union members.

use crate::{
    Result,
    graph::TypeGraph,
    hierarchy::{Hierarchy, ancestor_chain},
};

/// Resolve the nearest shared supertype of a union's member types.
///
/// Members are de-duplicated preserving order, and a single distinct member
/// resolves to itself. Otherwise the candidate must appear in every member's
/// ancestor chain (the member itself excluded); the one with the smallest
/// worst-case distance wins, ties broken by name. With no shared ancestor the
/// result is `universal_base`.
///
/// # Errors
///
/// Returns [`crate::Error::Cycle`] if a member's chain loops.
pub fn common_ancestor(graph: &TypeGraph, members: &[&str], universal_base: &str) -> Result<String> {
    let unique = dedup(members);
    if unique.len() < 2 {
        return Ok(single_or_base(&unique, universal_base));
    }

    let chains = unique
        .iter()
        .map(|member| ancestor_chain(graph, member))
        .collect::<Result<Vec<_>>>()?;
    Ok(nearest_shared(&chains).map_or_else(|| universal_base.to_string(), String::from))
}

impl Hierarchy<'_> {
    /// [`common_ancestor`] over the precomputed chains of a cycle-free graph.
    pub fn common_ancestor(&self, members: &[&str], universal_base: &str) -> String {
        let unique = dedup(members);
        if unique.len() < 2 {
            return single_or_base(&unique, universal_base);
        }

        let chains: Vec<Vec<&str>> = unique.iter().map(|m| self.chain(m).to_vec()).collect();
        nearest_shared(&chains).map_or_else(|| universal_base.to_string(), String::from)
    }
}

fn dedup<'a>(members: &[&'a str]) -> Vec<&'a str> {
    let mut unique: Vec<&'a str> = Vec::with_capacity(members.len());
    for &member in members {
        if !unique.contains(&member) {
            unique.push(member);
        }
    }
    unique
}

fn single_or_base(unique: &[&str], universal_base: &str) -> String {
    unique.first().copied().unwrap_or(universal_base).to_string()
}

fn nearest_shared<'a>(chains: &[Vec<&'a str>]) -> Option<&'a str> {
    let (first, rest) = chains.split_first()?;

    first
        .iter()
        .enumerate()
        .filter_map(|(pos, &candidate)| {
            let mut worst = pos;
            for chain in rest {
                worst = worst.max(chain.iter().position(|n| *n == candidate)?);
            }
            Some((worst, candidate))
        })
        .min()
        .map(|(_, candidate)| candidate)
}
