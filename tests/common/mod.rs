//! Explicit reference model: a family over `N` variables is a set of bit masks.

#![allow(dead_code)]

use std::collections::BTreeSet;

use rand::prelude::*;
use zdd_rs::reference::ZddId;
use zdd_rs::types::Var;
use zdd_rs::zdd::ZddManager;

pub const N: u32 = 5;

pub type Model = BTreeSet<u32>;

/// A random family where each of the `2^N` sets is present with probability `1/k`.
pub fn random_model(rng: &mut impl Rng, k: u32) -> Model {
    (0..1u32 << N).filter(|_| rng.random_ratio(1, k)).collect()
}

pub fn vars_of(mask: u32) -> Vec<Var> {
    (0..N).filter(|i| mask & (1 << i) != 0).map(Var::from_index).collect()
}

pub fn mask_of(set: &[Var]) -> u32 {
    set.iter().map(|v| 1 << v.index()).sum()
}

/// Build the family; safe under collections since the accumulator stays protected.
pub fn build(mgr: &ZddManager, model: &Model) -> ZddId {
    let mut acc = ZddId::EMPTY;
    for &mask in model {
        let _acc = mgr.protect(acc);
        let cube = mgr.cube_vars(&vars_of(mask)).unwrap();
        acc = mgr.union(acc, cube);
    }
    acc
}

pub fn model_of(mgr: &ZddManager, f: ZddId) -> Model {
    mgr.iter_sets(f).map(|set| mask_of(&set)).collect()
}

pub fn is_subset(a: u32, b: u32) -> bool {
    a & !b == 0
}

pub fn union(p: &Model, q: &Model) -> Model {
    p.union(q).copied().collect()
}

pub fn intersect(p: &Model, q: &Model) -> Model {
    p.intersection(q).copied().collect()
}

pub fn diff(p: &Model, q: &Model) -> Model {
    p.difference(q).copied().collect()
}

pub fn mul(p: &Model, q: &Model) -> Model {
    p.iter().flat_map(|&a| q.iter().map(move |&b| a | b)).collect()
}

/// Weak division: `r` such that `r ∪ c ∈ p` and `r ∩ c = ∅` for every `c ∈ q`.
pub fn div(p: &Model, q: &Model) -> Model {
    (0..1u32 << N)
        .filter(|&r| q.iter().all(|&c| r & c == 0 && p.contains(&(r | c))))
        .collect()
}

pub fn restrict(f: &Model, c: &Model) -> Model {
    f.iter().copied().filter(|&x| c.iter().any(|&y| is_subset(y, x))).collect()
}

pub fn no_supset(f: &Model, c: &Model) -> Model {
    f.iter().copied().filter(|&x| !c.iter().any(|&y| is_subset(y, x))).collect()
}

pub fn no_subset(f: &Model, c: &Model) -> Model {
    f.iter().copied().filter(|&x| !c.iter().any(|&y| is_subset(x, y))).collect()
}

pub fn max_set(x: &Model) -> Model {
    x.iter()
        .copied()
        .filter(|&a| !x.iter().any(|&b| a != b && is_subset(a, b)))
        .collect()
}

pub fn min_set(x: &Model) -> Model {
    x.iter()
        .copied()
        .filter(|&a| !x.iter().any(|&b| a != b && is_subset(b, a)))
        .collect()
}

pub fn subset0(f: &Model, v: u32) -> Model {
    f.iter().copied().filter(|&x| x & (1 << v) == 0).collect()
}

pub fn subset1(f: &Model, v: u32) -> Model {
    f.iter().copied().filter(|&x| x & (1 << v) != 0).map(|x| x & !(1 << v)).collect()
}

pub fn change(f: &Model, v: u32) -> Model {
    f.iter().map(|&x| x ^ (1 << v)).collect()
}
