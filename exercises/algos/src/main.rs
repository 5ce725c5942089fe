use std::process;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use algos::hashtags::SAMPLE_POSTS;

#[derive(Parser)]
#[command(name = "algos")]
#[command(about = "Coursework algorithm routines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Minimum measurements to cover n levels with k materials
    Measurements { k: usize, n: u64 },
    /// k-th smallest pairwise product of two sorted arrays
    KthProduct {
        /// First sorted array, comma-separated
        a: String,
        /// Second sorted array, comma-separated
        b: String,
        k: u64,
    },
    /// Minimum rewards for a rating sequence
    Rewards {
        /// Ratings, comma-separated
        ratings: String,
    },
    /// Closest pair of points by Manhattan distance
    ClosestPair {
        /// X coordinates, comma-separated
        xs: String,
        /// Y coordinates, comma-separated
        ys: String,
    },
    /// MST weight over n devices plus the cheapest module
    NetworkCost {
        n: usize,
        /// Module costs, comma-separated
        modules: String,
        /// Edges as device1,device2,cost triples separated by semicolons
        edges: String,
    },
    /// Top hashtags of the built-in post sample
    Hashtags {
        #[arg(default_value = "3")]
        k: usize,
    },
    /// Fewest roads to collect all packages
    PackageRoutes {
        /// 0/1 package markers per vertex, comma-separated
        packages: String,
        /// Roads as u,v pairs separated by semicolons
        roads: String,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(message) = dispatch(cli.command) {
        eprintln!("{}", message);
        process::exit(2);
    }
}

fn dispatch(command: Commands) -> Result<(), String> {
    match command {
        Commands::Measurements { k, n } => {
            let s = algos::min_measurements(k, n).map_err(|e| e.to_string())?;
            println!("{}", s);
        }
        Commands::KthProduct { a, b, k } => {
            let a: Vec<i32> = parse_list(&a)?;
            let b: Vec<i32> = parse_list(&b)?;
            let product =
                algos::kth_smallest_product(&a, &b, k).map_err(|e| e.to_string())?;
            println!("{}", product);
        }
        Commands::Rewards { ratings } => {
            let ratings: Vec<i32> = parse_list(&ratings)?;
            println!("{}", algos::min_rewards(&ratings));
        }
        Commands::ClosestPair { xs, ys } => {
            let xs: Vec<i32> = parse_list(&xs)?;
            let ys: Vec<i32> = parse_list(&ys)?;
            let (i, j) =
                algos::closest_lexicographical_pair(&xs, &ys).map_err(|e| e.to_string())?;
            println!("[{}, {}]", i, j);
        }
        Commands::NetworkCost { n, modules, edges } => {
            let modules: Vec<i64> = parse_list(&modules)?;
            let edges = parse_groups(&edges)?
                .into_iter()
                .map(|g: Vec<usize>| match g.as_slice() {
                    &[u, v, w] => Ok((u, v, w as i64)),
                    other => Err(format!("expected u,v,cost, got {:?}", other)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            let cost =
                algos::min_total_cost(n, &modules, &edges).map_err(|e| e.to_string())?;
            println!("{}", cost);
        }
        Commands::Hashtags { k } => {
            println!("+-------------+---------+");
            println!("|   HASHTAG   |  COUNT  |");
            println!("+-------------+---------+");
            for (tag, count) in algos::top_hashtags(&SAMPLE_POSTS, k) {
                println!("| {:<11} | {:<7} |", tag, count);
            }
            println!("+-------------+---------+");
        }
        Commands::PackageRoutes { packages, roads } => {
            let packages: Vec<u8> = parse_list(&packages)?;
            let roads = parse_groups(&roads)?
                .into_iter()
                .map(|g: Vec<usize>| match g.as_slice() {
                    &[u, v] => Ok((u, v)),
                    other => Err(format!("expected u,v, got {:?}", other)),
                })
                .collect::<Result<Vec<_>, _>>()?;
            let cost =
                algos::min_roads_to_collect(&packages, &roads).map_err(|e| e.to_string())?;
            println!("{}", cost);
        }
    }
    Ok(())
}

fn parse_list<T: FromStr>(input: &str) -> Result<Vec<T>, String> {
    input
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.trim()
                .parse()
                .map_err(|_| format!("could not parse {:?}", part))
        })
        .collect()
}

fn parse_groups<T: FromStr>(input: &str) -> Result<Vec<Vec<T>>, String> {
    input
        .split(';')
        .filter(|group| !group.trim().is_empty())
        .map(parse_list)
        .collect()
}
