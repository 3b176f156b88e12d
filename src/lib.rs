//! # zdd-rs: Zero-Suppressed Decision Diagrams in Rust
//!
//! **`zdd-rs`** is a manager-centric library for **Zero-Suppressed Decision Diagrams (ZDDs)**:
//! canonical, structurally shared representations of families of finite sets,
//! with a library of set-algebraic operations implemented as memoized recursive graph walks.
//!
//! ## What is a ZDD?
//!
//! A ZDD is a decision diagram whose nodes `(var, lo, hi)` split a family into the sets
//! without `var` (`lo`) and the sets with `var` (`hi`, stored with `var` removed).
//! Nodes whose `hi` child is the empty family are elided (the **zero-suppression rule**),
//! which makes sparse families, where most elements are absent from most sets, very compact.
//!
//! ## Key Features
//!
//! - **Manager-Centric Architecture**: All operations go through the [`ZddManager`][crate::zdd::ZddManager], which owns the node arena and guarantees canonical form.
//! - **Garbage Collection**: Nodes are reference counted by the caller and reclaimed by a mark-sweep collection when the arena fills up. RAII guards ([`Root`][crate::guard::Root], [`Protected`][crate::guard::Protected]) keep the bookkeeping out of sight.
//! - **Operation Caches**: One direct-mapped cache per operation family, purged on every collection.
//! - **Rich API**: union, intersection, difference, subset/change, cube algebra (`mul`, `div`, `modulo`), restriction, dominance filters (`no_supset`, `no_subset`), antichains (`max_set`, `min_set`) and counting.
//!
//! ## Basic Usage
//!
//! ```rust
//! use zdd_rs::zdd::ZddManager;
//!
//! // 1. Initialize the manager and create variables
//! let mgr = ZddManager::new();
//! let v = mgr.new_vars(4);
//!
//! // 2. Build families: {{v0}, {v1}} and {{v3, v1}}
//! let f = mgr.union(mgr.single(v[0])?, mgr.single(v[1])?);
//! let g = mgr.cube("1010")?;
//!
//! // 3. Keep results alive across later operations
//! let f = mgr.root(f);
//!
//! // 4. Query
//! assert_eq!(mgr.count(f.id()), 2);
//! assert_eq!(mgr.intersect(f.id(), g), mgr.empty());
//!
//! // 5. {v1} is contained in {v1, v3}, so it is not maximal
//! let m = mgr.max_set(mgr.union(f.id(), g));
//! assert_eq!(mgr.collect_sets(m).len(), 2);
//! assert!(mgr.contains(m, &[v[1], v[3]]));
//! assert!(!mgr.contains(m, &[v[1]]));
//! # Ok::<(), zdd_rs::error::ZddError>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`zdd`]**: The [`ZddManager`][crate::zdd::ZddManager], the canonical constructor and memory management.
//! - **[`algebra`]**, **[`unate`]**, **[`constraint`]**, **[`graph`]**, **[`count`]**: Algorithm families.
//! - **[`storage`]**: The node arena with its unique tables and garbage collector.
//! - **[`cache`]**: Operation caches.
//! - **[`config`]**: Arena and cache sizing.

pub mod algebra;
pub mod cache;
pub mod config;
pub mod constraint;
pub mod count;
pub mod error;
pub mod graph;
pub mod guard;
pub mod iter;
pub mod node;
pub mod reference;
pub mod storage;
pub mod subtable;
pub mod types;
pub mod unate;
pub mod utils;
pub mod zdd;
