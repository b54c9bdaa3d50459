use serde::Serialize;
use skilltree::{
    BuildOptions, CompareSummary, ConnectionType, DrawType, NodeId, NodeStates, SkillTree,
    SpriteKey, TreeOptions,
};
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Tree(skilltree::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Tree(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<skilltree::Error> for CliError {
    fn from(value: skilltree::Error) -> Self {
        Self::Tree(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Summary,
    Classify,
    Connections,
    Compare,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    options: Option<String>,
    against: Option<String>,
    scale: Option<f64>,
    lenient: bool,
    pretty: bool,
    allocate: Vec<NodeId>,
    hover: Vec<NodeId>,
    pathing: Vec<NodeId>,
    search: Option<String>,
}

fn usage() -> &'static str {
    "skilltree-cli\n\
\n\
USAGE:\n\
  skilltree-cli [summary] [COMMON] [<path>|-]\n\
  skilltree-cli classify [COMMON] [STATE] [<path>|-]\n\
  skilltree-cli connections [COMMON] [STATE] [<path>|-]\n\
  skilltree-cli compare --against <path> [COMMON] [<path>|-]\n\
\n\
COMMON:\n\
  --options <Opts.json>  per-version options (start class)\n\
  --scale <n>            zoom scale override\n\
  --lenient              place nodes on unknown orbits at the origin instead of failing\n\
  --pretty               pretty-print JSON\n\
\n\
STATE:\n\
  --allocate <id>        mark node allocated (repeatable)\n\
  --hover <id>           mark node hovered (repeatable)\n\
  --path <id>            mark node on the preview path (repeatable)\n\
  --search <text>        highlight nodes matching <text>\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the tree payload is read from stdin.\n\
  - Set SKILLTREE_LOG (e.g. SKILLTREE_LOG=debug) to see build diagnostics on stderr.\n\
"
}

fn next_id<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<NodeId, CliError> {
    let Some(raw) = it.next() else {
        return Err(CliError::Usage(usage()));
    };
    raw.parse::<NodeId>().map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "summary" => args.command = Command::Summary,
            "classify" => args.command = Command::Classify,
            "connections" => args.command = Command::Connections,
            "compare" => args.command = Command::Compare,
            "--pretty" => args.pretty = true,
            "--lenient" => args.lenient = true,
            "--options" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.options = Some(path.clone());
            }
            "--against" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.against = Some(path.clone());
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let scale = scale.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.scale = Some(scale);
            }
            "--allocate" => args.allocate.push(next_id(&mut it)?),
            "--hover" => args.hover.push(next_id(&mut it)?),
            "--path" => args.pathing.push(next_id(&mut it)?),
            "--search" => {
                let Some(text) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.search = Some(text.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if matches!(args.command, Command::Compare) && args.against.is_none() {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

#[derive(Serialize)]
struct SummaryOut {
    nodes: usize,
    scale: f64,
    bounds: [f64; 4],
    width: f64,
    height: f64,
    allocated: Vec<NodeId>,
    normal_points: usize,
    ascendancy_points: usize,
    highlighted: usize,
}

#[derive(Serialize)]
struct NodeOut<'a> {
    id: NodeId,
    name: &'a str,
    position: [f64; 2],
    state: NodeStates,
    draw_type: DrawType,
    frame: Option<String>,
    sprite: SpriteKey,
    icon: &'a str,
    target_size: [f64; 2],
}

#[derive(Serialize)]
struct ConnectionOut {
    a: NodeId,
    b: NodeId,
    kind: ConnectionType,
    style: &'static str,
}

#[derive(Serialize)]
struct CompareOut {
    shared: usize,
    moved: usize,
    only_here: usize,
    only_there: usize,
    moved_nodes: Vec<NodeId>,
}

impl CompareOut {
    fn new(summary: CompareSummary, tree: &SkillTree) -> Self {
        Self {
            shared: summary.shared,
            moved: summary.moved,
            only_here: summary.only_here,
            only_there: summary.only_there,
            moved_nodes: tree
                .nodes_where(|n| n.has_state(NodeStates::MOVED))
                .map(|n| n.id)
                .collect(),
        }
    }
}

fn load_tree(text: &str, args: &Args) -> Result<SkillTree, CliError> {
    let mut options = if args.lenient {
        BuildOptions::lenient()
    } else {
        BuildOptions::strict()
    };
    if let Some(path) = &args.options {
        let tree_options = TreeOptions::from_json(&std::fs::read_to_string(path)?)?;
        options = options.with_tree_options(&tree_options);
    }
    if let Some(scale) = args.scale {
        options = options.with_scale(scale);
    }
    Ok(SkillTree::from_json(text, &options)?)
}

fn apply_state(tree: &mut SkillTree, args: &Args) -> Result<(), CliError> {
    for &id in &args.allocate {
        tree.set_state(id, NodeStates::ACTIVE)?;
    }
    for &id in &args.hover {
        tree.set_state(id, NodeStates::HOVERED)?;
    }
    for &id in &args.pathing {
        tree.set_state(id, NodeStates::PATHING)?;
    }
    if let Some(query) = &args.search {
        let matches = tree.highlight_matching(query);
        tracing::debug!(query = %query, matches, "search applied");
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let mut tree = load_tree(&text, &args)?;
    apply_state(&mut tree, &args)?;

    match args.command {
        Command::Summary => {
            let bounds = tree.bounds();
            let counts = tree.counts();
            let mut allocated: Vec<NodeId> = tree.skilled_nodes().iter().map(|n| n.id).collect();
            allocated.sort_unstable();
            let out = SummaryOut {
                nodes: tree.len(),
                scale: tree.scale(),
                bounds: [bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y],
                width: tree.width(),
                height: tree.height(),
                allocated,
                normal_points: counts.normal,
                ascendancy_points: counts.ascendancy,
                highlighted: tree.highlighted_nodes().len(),
            };
            write_json(&out, args.pretty)
        }
        Command::Classify => {
            let mut out = Vec::with_capacity(tree.len());
            for node in tree.nodes() {
                let c = tree.classify(node.id)?;
                let p = node.position();
                out.push(NodeOut {
                    id: node.id,
                    name: &node.name,
                    position: [p.x, p.y],
                    state: node.state(),
                    draw_type: c.draw_type,
                    frame: c.frame.map(|f| f.key()),
                    sprite: c.sprite,
                    icon: node.icon(),
                    target_size: [c.target_size.width, c.target_size.height],
                });
            }
            write_json(&out, args.pretty)
        }
        Command::Connections => {
            let out: Vec<ConnectionOut> = tree
                .connections()
                .into_iter()
                .map(|c| ConnectionOut {
                    a: c.a,
                    b: c.b,
                    kind: c.kind,
                    style: c.style.as_str(),
                })
                .collect();
            write_json(&out, args.pretty)
        }
        Command::Compare => {
            let Some(path) = args.against.as_deref() else {
                return Err(CliError::Usage(usage()));
            };
            let other = load_tree(&std::fs::read_to_string(path)?, &args)?;
            let summary = tree.mark_compared(&other);
            write_json(&CompareOut::new(summary, &tree), args.pretty)
        }
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("SKILLTREE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
