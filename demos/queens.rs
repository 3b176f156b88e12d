use clap::Parser;
use log::info;

use zdd_rs::config::ZddConfig;
use zdd_rs::reference::ZddId;
use zdd_rs::types::Var;
use zdd_rs::zdd::ZddManager;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of queens.
    #[arg(value_name = "INT", default_value = "8")]
    n: usize,

    /// Initial arena size (in bits, so the actual size is `2^size` nodes).
    #[clap(long, value_name = "INT", default_value = "10")]
    size: usize,

    /// Arena ceiling (in bits).
    #[clap(long, value_name = "INT", default_value = "24")]
    max_size: usize,

    /// Collect whenever the arena is full, even without dead nodes.
    #[clap(long)]
    eager_gc: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let mut config = ZddConfig::default()
        .with_initial_nodes(1 << args.size)
        .with_max_nodes(1 << args.max_size);
    if args.eager_gc {
        config = config.with_simple_deadcount_threshold(0);
    }
    let mgr = ZddManager::with_config(config);
    println!("mgr = {:?}", mgr);

    // Encode N-queens problem:
    // - a set is a placement, one variable per cell
    // - one queen per row (product of row choices)
    // - no two queens attack each other (no superset of an attacking pair)
    let n = args.n;
    println!("Encoding n-queens problem with n = {}", n);
    let cells = mgr.new_vars(n * n);
    let cell = |i: usize, j: usize| -> Var { cells[i * n + j] };

    let mut attacks = mgr.root(ZddId::EMPTY);
    for i in 0..n {
        for j in 0..n {
            for k in i + 1..n {
                for l in 0..n {
                    let same_col = j == l;
                    let same_diag = (i as i64 - k as i64).abs() == (j as i64 - l as i64).abs();
                    if same_col || same_diag {
                        let pair = mgr.cube_vars(&[cell(i, j), cell(k, l)])?;
                        attacks = mgr.root(mgr.union(attacks.id(), pair));
                    }
                }
            }
        }
    }
    println!(
        "Attacking pairs: {} ({} nodes)",
        mgr.count(attacks.id()),
        mgr.node_count(attacks.id())
    );

    let mut placements = mgr.root(ZddId::BASE);
    for i in 0..n {
        let mut row = mgr.root(ZddId::EMPTY);
        for j in 0..n {
            let single = mgr.single(cell(i, j))?;
            row = mgr.root(mgr.union(row.id(), single));
        }
        let extended = mgr.mul(placements.id(), row.id());
        placements = mgr.root(mgr.no_supset(extended, attacks.id()));
        info!(
            "after row {}: {} partial placements, {} nodes",
            i,
            mgr.count(placements.id()),
            mgr.node_count(placements.id())
        );
    }

    println!("mgr = {:?}", mgr);
    println!("Solutions: {}", mgr.count_exact(placements.id()));
    if let Some(mut solution) = mgr.sat_one(placements.id()) {
        solution.sort();
        let cols: Vec<usize> = solution.iter().map(|&v| usize::from(v) % n).collect();
        println!("One solution (column per row): {:?}", cols);
    }

    let stats = mgr.stats();
    println!("arena: {:?}", stats.arena);
    for cache in &stats.caches {
        println!(
            "cache {:>10}: {} slots, {} hits, {} misses, {} faults ({:.1}% hit rate)",
            cache.name,
            cache.capacity,
            cache.hits,
            cache.misses,
            cache.faults,
            100.0 * cache.hit_rate()
        );
    }

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
