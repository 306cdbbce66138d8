use recur_core::structures::{Digraph, Tree, TreeNode, Undirected};
use recur_core::{
    ancestors, descendants, postorder, prune, Direction, MultiRecursiveIterator, Order,
    RecursiveIterator, CHILDREN,
};
use std::collections::VecDeque;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1_000_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: recur-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run every structure (default)");
        println!("  lsystem     Fractal branching tree (wide, shallow)");
        println!("  dla         Diffusion-limited aggregation digraph (deep, with loops)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts (undirected)");
        println!("  random      Erdos-Renyi uniform random edges (directed)");
        println!();
        println!("Default node_count: 1000000");
        println!("Set RUST_LOG=recur_core=debug to log traversal summaries.");
        return;
    }

    if node_count < 2 {
        eprintln!("node_count must be at least 2");
        return;
    }

    println!("recur-bench");
    println!("===========");
    println!();

    let runs: Vec<(&str, fn(u64))> = match mode {
        "lsystem" => vec![("L-system tree", bench_lsystem)],
        "dla" => vec![("DLA (organic branching)", bench_dla)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", bench_small_world)],
        "random" => vec![("Erdos-Renyi random", bench_random)],
        "all" => vec![
            ("L-system tree", bench_lsystem as fn(u64)),
            ("DLA (organic branching)", bench_dla),
            ("Small-world (Watts-Strogatz)", bench_small_world),
            ("Erdos-Renyi random", bench_random),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, run) in runs {
        println!("--- {} ---", name);
        println!("Target: {} nodes", node_count);
        run(node_count);
        println!();
    }
}

/// Time one full traversal and print a result row.
fn timed<I: Iterator>(label: &str, iter: impl FnOnce() -> I) {
    let t = Instant::now();
    let count = iter().count();
    let elapsed = t.elapsed();
    println!(
        "{:<28} {:>12} {:>8.1}ms",
        label,
        count,
        elapsed.as_secs_f64() * 1000.0
    );
}

fn header() {
    println!();
    println!("{:<28} {:>12} {:>10}", "traversal", "yielded", "time");
    println!("{:-<28} {:->12} {:->10}", "", "", "");
}

fn bench_lsystem(node_count: u64) {
    let t = Instant::now();
    let tree = gen_lsystem(node_count);
    println!(
        "Generated in {:.2}s — {} nodes",
        t.elapsed().as_secs_f64(),
        tree.len()
    );

    let Ok(root) = tree.node(0) else { return };
    header();
    timed("pre-order", || RecursiveIterator::new(root, Order::Pre));
    timed("post-order", || RecursiveIterator::new(root, Order::Post));
    timed("pre-order, reversed", || {
        RecursiveIterator::new(root, Order::Pre).with_direction(Direction::Reverse)
    });
    timed("pre-order, pruned (odd)", || {
        RecursiveIterator::new(root, Order::Pre)
            .with_prune(prune(|n: &TreeNode<u64>| *n.value() % 2 == 1))
    });

    let last = tree.len() - 1;
    if let Ok(leaf) = tree.node(last) {
        timed("ancestors of last leaf", || ancestors(leaf));
    }
}

fn bench_dla(node_count: u64) {
    let t = Instant::now();
    let graph = gen_dla(node_count);
    print_graph_stats(&graph, t);

    let Some(seed) = graph.node(0) else { return };
    header();
    // Edges point from new nodes toward the seed, so the seed's descendants
    // follow incoming edges via `ancestors`.
    timed("seed: ancestors (pre)", || ancestors(seed));
    timed("seed: ancestors (post)", || postorder(ancestors(seed), None));

    if let Some(tip) = graph.node(node_count - 1) {
        timed("tip: descendants", || descendants(tip));
    }
}

fn bench_small_world(node_count: u64) {
    let t = Instant::now();
    let graph = gen_small_world(node_count);
    println!(
        "Generated in {:.2}s — {} nodes, {} links",
        t.elapsed().as_secs_f64(),
        graph.node_count(),
        graph.link_count()
    );

    let Ok(start) = graph.node(0) else { return };
    header();
    timed("pre-order", || RecursiveIterator::new(start, Order::Pre));
    timed("post-order", || RecursiveIterator::new(start, Order::Post));
}

fn bench_random(node_count: u64) {
    let t = Instant::now();
    let graph = gen_random(node_count);
    print_graph_stats(&graph, t);

    let Some(start) = graph.node(0) else { return };
    header();
    timed("descendants (pre)", || descendants(start));
    timed("descendants (post, reversed)", || {
        MultiRecursiveIterator::new(start, CHILDREN, Order::Post)
            .with_direction(Direction::Reverse)
    });
    timed("ancestors (pre)", || ancestors(start));
}

fn print_graph_stats(graph: &Digraph, started: Instant) {
    println!(
        "Generated in {:.2}s — {} nodes, {} edges, ~{:.0}MB",
        started.elapsed().as_secs_f64(),
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );
}

// ---------------------------------------------------------------------------
// Generators — all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// L-system fractal tree: every node spawns `branching` children, breadth
/// first, until `node_count` is reached. Node values are their index.
fn gen_lsystem(node_count: u64) -> Tree<u64> {
    let mut tree = Tree::with_capacity(node_count as usize);
    let branching = 3u64;
    let root = tree.insert(0);

    let mut next_id: u64 = 1;
    let mut frontier: Vec<usize> = vec![root];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                if let Ok(child) = tree.push_child(parent, next_id) {
                    next_frontier.push(child);
                }
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }

    tree
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new node attaches to a random recent "surface" node, with an
/// occasional second edge to any older node (creating shortcuts). The
/// resulting paths are deep, which stresses the explicit frame stack.
fn gen_dla(node_count: u64) -> Digraph {
    let mut graph = Digraph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(77777);

    graph.add_node(0, "Seed");

    // VecDeque for O(1) pop_front when evicting oldest surface nodes.
    let mut surface: VecDeque<u64> = VecDeque::with_capacity(10001);
    surface.push_back(0);
    let surface_max = 10000usize;

    for new_node in 1..node_count {
        graph.add_node(new_node, "Particle");

        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        graph.add_edge(new_node, attach_to);

        // 10% chance of a second connection (creates loops / shortcuts)
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next(new_node);
            if other != attach_to {
                graph.add_edge(new_node, other);
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    graph
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each node links to its `k` next neighbors on the ring; each link is
/// rewired to a random node with probability `p`. Many short cycles.
fn gen_small_world(node_count: u64) -> Undirected {
    let k = 5u64;
    let p = 0.05f64;
    let mut graph = Undirected::with_capacity(node_count as usize);
    let mut rng = FastRng::new(67890);

    for _ in 0..node_count {
        graph.add_node();
    }

    for i in 0..node_count {
        for j in 1..=k {
            let mut neighbor = (i + j) % node_count;
            if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                if rewired != i {
                    neighbor = rewired;
                }
            }
            // Indices come from 0..node_count, all of which exist.
            let _ = graph.link(i as usize, neighbor as usize);
        }
    }

    graph
}

/// Erdos-Renyi: ~10 uniform random directed edges per node.
fn gen_random(node_count: u64) -> Digraph {
    let target_edges = node_count * 10;
    let mut graph = Digraph::with_capacity(node_count as usize);
    let mut rng = FastRng::new(54321);

    for i in 0..node_count {
        graph.add_node(i, "Concept");
    }

    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            graph.add_edge(from, to);
        }
    }

    graph
}
