// tracetty: step-by-step algorithm playback in the terminal

use std::fs::File;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use tracetty::algorithms::graph::parse_edge;
use tracetty::algorithms::input::{random_sorted_values, random_values, retry_seed};
use tracetty::algorithms::{
    BinarySearch, BreadthFirst, BubbleSort, DepthFirst, GraphInput, InsertionSort, LcsInput,
    LinearSearch, LongestCommonSubsequence, NQueens, SearchInput, SelectionSort,
};
use tracetty::config::{PlaybackConfig, DEFAULT_SNAPSHOT_LIMIT};
use tracetty::playback::{GlobalCoordinator, MonotonicClock, PlaybackController};
use tracetty::trace::{Algorithm, TraceBuilder};
use tracetty::ui::{App, SnapshotView, TraceSource};

/// Range of generated values when no explicit array is given
const RANDOM_RANGE: std::ops::RangeInclusive<i64> = 0..=99;

#[derive(Parser, Debug)]
#[command(name = "tracetty", version, about)]
struct Cli {
    #[command(subcommand)]
    algorithm: AlgorithmCmd,

    #[command(flatten)]
    playback: PlaybackArgs,
}

#[derive(Args, Debug)]
struct PlaybackArgs {
    /// Global speed multiplier.
    #[arg(long, global = true, default_value_t = 1.0)]
    speed: f64,

    /// Interval between steps at 1x, in milliseconds.
    #[arg(long, global = true, default_value_t = 1000)]
    interval_ms: u64,

    /// Shortest allowed interval between steps, in milliseconds.
    #[arg(long, global = true, default_value_t = 16)]
    floor_ms: u64,

    /// Positions advanced per timer tick.
    #[arg(long, global = true, default_value = "1")]
    steps_per_tick: NonZeroUsize,

    /// Start paused instead of playing.
    #[arg(long, global = true)]
    paused: bool,

    /// Print step descriptions to stdout instead of opening the TUI.
    #[arg(long, global = true)]
    headless: bool,

    /// Write logs to this file (the TUI logs nowhere otherwise).
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Refuse traces longer than this.
    #[arg(long, global = true, default_value_t = DEFAULT_SNAPSHOT_LIMIT)]
    snapshot_limit: usize,
}

#[derive(Args, Debug)]
struct ValuesArgs {
    /// Comma-separated input array; random when omitted.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    values: Option<Vec<i64>>,

    /// Seed for the random array. Each retry uses the next seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Length of the random array.
    #[arg(long, default_value_t = 12)]
    len: usize,
}

#[derive(Subcommand, Debug)]
enum AlgorithmCmd {
    /// Sort an array.
    Sort {
        #[arg(long, value_enum, default_value_t = SortMethod::Bubble)]
        method: SortMethod,
        #[command(flatten)]
        input: ValuesArgs,
    },
    /// Search an array for a target.
    Search {
        #[arg(long, value_enum, default_value_t = SearchMethod::Binary)]
        method: SearchMethod,
        #[arg(long, allow_hyphen_values = true)]
        target: i64,
        #[command(flatten)]
        input: ValuesArgs,
    },
    /// Traverse a graph.
    Graph {
        #[arg(long, value_enum, default_value_t = GraphMethod::Bfs)]
        method: GraphMethod,
        /// Number of nodes, numbered from 0.
        #[arg(long)]
        nodes: usize,
        /// Edges as a-b, comma-separated.
        #[arg(long = "edges", value_delimiter = ',', value_parser = parse_edge)]
        edges: Vec<(usize, usize)>,
        #[arg(long)]
        directed: bool,
        #[arg(long, default_value_t = 0)]
        start: usize,
    },
    /// Fill a longest-common-subsequence table.
    Lcs { left: String, right: String },
    /// Place N queens on an N×N board.
    Queens {
        #[arg(default_value_t = 8)]
        n: usize,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortMethod {
    Bubble,
    Insertion,
    Selection,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SearchMethod {
    Linear,
    Binary,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GraphMethod {
    Bfs,
    Dfs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.playback.log_file.as_deref(), cli.playback.headless)?;

    let settings = &cli.playback;
    match cli.algorithm {
        AlgorithmCmd::Sort { method, input } => {
            let values = move |attempt: u64| match &input.values {
                Some(values) => values.clone(),
                None => random_values(
                    retry_seed(input.seed, attempt),
                    input.len,
                    RANDOM_RANGE,
                ),
            };
            match method {
                SortMethod::Bubble => launch(BubbleSort, values, settings),
                SortMethod::Insertion => launch(InsertionSort, values, settings),
                SortMethod::Selection => launch(SelectionSort, values, settings),
            }
        }
        AlgorithmCmd::Search {
            method,
            target,
            input,
        } => {
            let search = move |attempt: u64| SearchInput {
                values: match &input.values {
                    Some(values) => values.clone(),
                    None => random_sorted_values(
                        retry_seed(input.seed, attempt),
                        input.len,
                        RANDOM_RANGE,
                    ),
                },
                target,
            };
            match method {
                SearchMethod::Linear => launch(LinearSearch, search, settings),
                SearchMethod::Binary => launch(BinarySearch, search, settings),
            }
        }
        AlgorithmCmd::Graph {
            method,
            nodes,
            edges,
            directed,
            start,
        } => {
            let graph = GraphInput {
                node_count: nodes,
                edges,
                directed,
                start,
            };
            let graph = move |_: u64| graph.clone();
            match method {
                GraphMethod::Bfs => launch(BreadthFirst, graph, settings),
                GraphMethod::Dfs => launch(DepthFirst, graph, settings),
            }
        }
        AlgorithmCmd::Lcs { left, right } => {
            let input = LcsInput { left, right };
            launch(LongestCommonSubsequence, move |_| input.clone(), settings)
        }
        AlgorithmCmd::Queens { n } => launch(NQueens, move |_| n, settings),
    }
}

fn init_logging(log_file: Option<&Path>, headless: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None if headless => builder.with_writer(io::stderr).try_init(),
        // stderr would corrupt the alternate screen
        None => return Ok(()),
    };
    installed.map_err(|e| anyhow::anyhow!("installing log subscriber: {e}"))
}

/// Build the trace source for one algorithm and hand it to the TUI or the
/// headless printer.
fn launch<A>(
    algorithm: A,
    mut input: impl FnMut(u64) -> A::Input + 'static,
    settings: &PlaybackArgs,
) -> anyhow::Result<()>
where
    A: Algorithm + 'static,
    A::Snapshot: SnapshotView,
{
    let config = PlaybackConfig {
        base_interval: Duration::from_millis(settings.interval_ms),
        floor: Duration::from_millis(settings.floor_ms),
        steps_per_tick: settings.steps_per_tick,
        autoplay: !settings.paused,
    };
    config.validate().context("invalid playback settings")?;
    let coordinator = GlobalCoordinator::with_preferences(settings.speed, false)
        .context("invalid speed")?;

    let name = algorithm.name();
    let builder = TraceBuilder::new().with_snapshot_limit(settings.snapshot_limit);
    let source: TraceSource<A::Snapshot> =
        Box::new(move |attempt| builder.build(&algorithm, &input(attempt)));

    if settings.headless {
        run_headless(source, coordinator, config)
    } else {
        run_tui(name, source, coordinator, config)
    }
}

fn run_tui<S: SnapshotView + 'static>(
    name: &str,
    source: TraceSource<S>,
    coordinator: GlobalCoordinator,
    config: PlaybackConfig,
) -> anyhow::Result<()> {
    let mut app = App::new(
        name,
        source,
        coordinator,
        Rc::new(MonotonicClock::new()),
        config,
    );

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")
}

/// Play the whole trace in real time, one line per step
fn run_headless<S>(
    mut source: TraceSource<S>,
    mut coordinator: GlobalCoordinator,
    config: PlaybackConfig,
) -> anyhow::Result<()> {
    let store = source(0)?;
    let mut controller = PlaybackController::new(
        Rc::new(store),
        config.with_autoplay(true),
        coordinator.subscribe(),
        Rc::new(MonotonicClock::new()),
    )?;

    let total = controller.len();
    let print = |c: &PlaybackController<S>| {
        println!("[{}/{}] {}", c.position() + 1, total, c.current_step().description);
    };
    print(&controller);

    while !controller.is_terminal() {
        let Some(wait) = controller.time_until_next_tick() else {
            break;
        };
        std::thread::sleep(wait);
        if controller.poll().advanced {
            print(&controller);
        }
    }
    Ok(())
}
