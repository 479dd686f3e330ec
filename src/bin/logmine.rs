use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};
use tracing_subscriber::EnvFilter;

use logmine::{ClusterOpts, ClusterSummary, Clusterer};

fn init_parallelism() {
    static START: Once = Once::new();
    START.call_once(|| {
        let n = num_cpus::get();
        let _ = rayon::ThreadPoolBuilder::new().num_threads(n).build_global();
    });
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[derive(Parser, Debug)]
#[command(name = "logmine", version, about = "Cluster log lines into recurring patterns")]
struct Cli {
    /// Input files (`-` for stdin). May be repeated.
    #[arg(required = false)]
    input: Vec<String>,

    /// TOML file with clustering options; flags below override it
    #[arg(long = "config")]
    config: Option<String>,

    /// Highest distance (0..=1) at which a line still joins a cluster
    #[arg(long = "max-distance")]
    max_distance: Option<f64>,
    /// Hide clusters with fewer members
    #[arg(long = "min-members")]
    min_members: Option<usize>,
    /// Token delimiter characters
    #[arg(long = "delimiters")]
    delimiters: Option<String>,
    /// Mask numbers, IPs, ids and similar tokens before clustering
    #[arg(long = "mask", default_value_t = false)]
    mask: bool,
    /// Marker printed for wildcard slots
    #[arg(long = "wildcard")]
    wildcard: Option<String>,

    /// Read all input, then cluster length buckets in parallel
    #[arg(long = "parallel", default_value_t = false)]
    parallel: bool,

    /// Output format: json | table
    #[arg(long = "format", default_value = "json")]
    format: String,
    /// Sort clusters by: count (desc) | created
    #[arg(long = "sort", default_value = "count")]
    sort_by: String,
    #[arg(long = "top")]
    top: Option<usize>,
}

impl Cli {
    fn cluster_opts(&self) -> anyhow::Result<ClusterOpts> {
        let mut opts = match &self.config {
            Some(path) => ClusterOpts::load(path)?,
            None => ClusterOpts::default(),
        };
        if let Some(d) = self.max_distance { opts.max_distance = d; }
        if let Some(m) = self.min_members { opts.min_members = m; }
        if let Some(d) = &self.delimiters { opts.delimiters = d.clone(); }
        if self.mask { opts.mask_variables = true; }
        if let Some(w) = &self.wildcard { opts.wildcard = w.clone(); }
        opts.validate()?;
        Ok(opts)
    }
}

/// Feed every line of every source to `on_line` until it returns `false`.
fn for_each_line<F>(paths: &[String], mut on_line: F) -> io::Result<()>
where
    F: FnMut(&str) -> bool,
{
    fn read_source<R: BufRead, F: FnMut(&str) -> bool>(reader: R, on_line: &mut F) -> io::Result<bool> {
        for line in reader.lines() {
            if !on_line(&line?) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    for p in paths {
        let keep_going = if p == "-" {
            let stdin = io::stdin();
            read_source(stdin.lock(), &mut on_line)?
        } else {
            let f = File::open(p)?;
            // Larger buffer reduces syscalls on big files.
            read_source(BufReader::with_capacity(1 << 20, f), &mut on_line)?
        };
        if !keep_going {
            break;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    init_parallelism();
    let cli = Cli::parse();
    let opts = cli.cluster_opts()?;

    let input_files = if cli.input.is_empty() {
        vec!["-".to_string()]
    } else {
        cli.input.clone()
    };
    if input_files.iter().any(|p| p == "-") && atty::is(atty::Stream::Stdin) {
        tracing::warn!("reading log lines from the terminal; end input with Ctrl-D");
    }

    // First Ctrl-C stops reading and prints what has been clustered so far.
    let running = Arc::new(AtomicBool::new(true));
    {
        let r = running.clone();
        let _ = ctrlc::set_handler(move || {
            if !r.swap(false, Ordering::SeqCst) {
                std::process::exit(130);
            }
        });
    }

    let mut clusters = if cli.parallel {
        let mut lines = Vec::new();
        for_each_line(&input_files, |l| {
            lines.push(l.to_string());
            running.load(Ordering::SeqCst)
        })?;
        tracing::info!(lines = lines.len(), "input read, clustering in parallel");
        logmine::shard::cluster_sharded(&lines, &opts)?
    } else {
        let mut engine = Clusterer::new(&opts)?;
        for_each_line(&input_files, |l| {
            engine.process_line(l);
            running.load(Ordering::SeqCst)
        })?;
        tracing::info!(
            lines = engine.lines_seen(),
            clusters = engine.index().len(),
            "input exhausted"
        );
        engine.result()
    };

    match cli.sort_by.as_str() {
        "created" => {}
        _ => clusters.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.id.cmp(&b.id))),
    }
    if let Some(top) = cli.top { clusters.truncate(top); }

    if cli.format == "table" {
        print_table(&clusters);
    } else {
        println!("{}", serde_json::to_string_pretty(&clusters)?);
    }
    Ok(())
}

fn print_table(clusters: &[ClusterSummary]) {
    println!("{:<8} {:<8} {:<9} {}", "Count", "Freq", "Wildcards", "Template");
    for c in clusters {
        println!("{:<8} {:<8.4} {:<9} {}", c.count, c.frequency, c.wildcards, c.template);
    }
}
