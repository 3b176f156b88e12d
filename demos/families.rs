use clap::Parser;

use zdd_rs::reference::ZddId;
use zdd_rs::types::Var;
use zdd_rs::zdd::ZddManager;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of variables.
    #[arg(value_name = "INT", default_value = "4")]
    n: usize,

    /// Show debug logs.
    #[clap(long)]
    verbose: bool,
}

fn show(mgr: &ZddManager, name: &str, f: ZddId) {
    let mut sets = mgr.collect_sets(f);
    sets.sort();
    let sets: Vec<String> = sets
        .iter()
        .map(|set| {
            let items: Vec<String> = set.iter().map(Var::to_string).collect();
            format!("{{{}}}", items.join(","))
        })
        .collect();
    println!(
        "{:<28} = {{{}}}  ({} sets, {} nodes)",
        name,
        sets.join(", "),
        mgr.count(f),
        mgr.node_count(f)
    );
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    let level = if args.verbose {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;
    println!("args = {:?}", args);

    let mgr = ZddManager::new();
    let v = mgr.new_vars(args.n.max(4));

    let a = mgr.root(mgr.union(mgr.single(v[0])?, mgr.single(v[1])?));
    show(&mgr, "{v0} ∪ {v1}", a.id());

    let c = mgr.root(mgr.cube("1010")?);
    show(&mgr, "cube(1010)", c.id());

    let u = mgr.root(mgr.universe(3)?);
    show(&mgr, "universe(3)", u.id());

    show(&mgr, "universe(3) ∩ {v0} ∪ {v1}", mgr.intersect(u.id(), a.id()));
    show(&mgr, "universe(3) \\ {v0} ∪ {v1}", mgr.diff(u.id(), a.id()));
    show(&mgr, "subset1(universe(3), v2)", mgr.subset1(u.id(), v[2])?);
    show(&mgr, "change(cube(1010), v0)", mgr.change(c.id(), v[0])?);

    let m = mgr.root(mgr.mul(a.id(), c.id()));
    show(&mgr, "mul(a, cube(1010))", m.id());
    show(&mgr, "div(mul, cube(1010))", mgr.div(m.id(), c.id()));
    show(&mgr, "modulo(universe(3), a)", mgr.modulo(u.id(), a.id()));

    show(&mgr, "restrict(universe(3), a)", mgr.restrict(u.id(), a.id()));
    show(&mgr, "no_supset(universe(3), a)", mgr.no_supset(u.id(), a.id()));
    show(&mgr, "no_subset(universe(3), a)", mgr.no_subset(u.id(), a.id()));
    show(&mgr, "max_set(universe(3))", mgr.max_set(u.id()));
    show(&mgr, "min_set(universe(3) \\ {∅})", mgr.min_set(mgr.diff(u.id(), ZddId::BASE)));
    show(&mgr, "all_edge(v0, v3)", mgr.all_edge(v[0], v[3])?);

    if let Err(e) = mgr.single(Var::from_index(v.len() as u32)) {
        println!("single(v{}) fails: {}", v.len(), e);
    }

    println!("mgr = {:?}", mgr);
    Ok(())
}
