use log::{error, info, LevelFilter};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use structopt::StructOpt;

use std::time;

use ordtree::{AnyTree, Kind, Tree};

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u128>,

    #[structopt(long = "variant")] // default, all variants
    variant: Option<Kind>,

    #[structopt(long = "loads", default_value = "1000000")] // default 1M
    loads: usize,

    #[structopt(long = "sets", default_value = "0")]
    sets: usize,

    #[structopt(long = "dels", default_value = "0")]
    dels: usize,

    #[structopt(long = "gets", default_value = "0")]
    gets: usize,

    #[structopt(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() {
    let opts = Opt::from_args();

    let res = TermLogger::init(
        opts.log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
    if let Err(err) = res {
        eprintln!("logger init failed: {}", err);
    }

    let seed = opts.seed.unwrap_or_else(random);
    info!("perf seed {}", seed);

    let kinds = match opts.variant {
        Some(kind) => vec![kind],
        None => Kind::ALL.to_vec(),
    };
    for kind in kinds.into_iter() {
        do_perf(kind, seed, &opts)
    }
}

fn do_perf(kind: Kind, seed: u128, opts: &Opt) {
    let mut rng = SmallRng::from_seed(seed.to_le_bytes());
    let mut index: AnyTree<u64> = AnyTree::new(kind);

    // initial load
    let start = time::Instant::now();
    for _i in 0..opts.loads {
        index.insert(rng.gen::<u64>());
    }
    info!(
        "{}: loaded {} items in {:?}, height {}",
        kind,
        index.len(),
        start.elapsed(),
        index.height()
    );

    let start = time::Instant::now();
    let total = opts.sets + opts.dels + opts.gets;
    let (mut n_sets, mut n_dels, mut n_gets) = (0, 0, 0);
    let mut n = total;
    while n > 0 {
        let op = rng.gen::<usize>() % total;

        let key = rng.gen::<u64>();
        if op < opts.sets {
            if index.insert(key) {
                n_sets += 1;
            }
        } else if op < (opts.sets + opts.dels) {
            if index.remove(&key).is_some() {
                n_dels += 1;
            }
        } else if index.contains(&key) {
            n_gets += 1;
        }
        n -= 1;
    }
    if total > 0 {
        info!(
            "{}: incremental {} operations in {:?}, hits sets:{} dels:{} gets:{}",
            kind,
            total,
            start.elapsed(),
            n_sets,
            n_dels,
            n_gets
        );
    }

    let start = time::Instant::now();
    let n = index.iter().count();
    info!("{}: iterated {} items in {:?}", kind, n, start.elapsed());

    let start = time::Instant::now();
    match index.validate() {
        Ok(()) => info!("{}: validated in {:?}", kind, start.elapsed()),
        Err(err) => error!("{}: {}", kind, err),
    }
}
