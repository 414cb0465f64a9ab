use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

use lineascope_client::{FetchError, LineageBackend, RestLineageClient};
use lineascope_core::{
    Config, DatasetRole, FlowDirection, Notification, NotificationCode, Severity,
};
use lineascope_engine::{ExplorerView, SelectionState, ViewBuilder};
use lineascope_graph::{LayerGrouping, LineageGraph};
use lineascope_layout::LayeredLayout;

/// LineaScope - dataset lineage exploration from the terminal
#[derive(Parser)]
#[command(name = "lineascope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: lineascope.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend service to query (default: config's default_backend)
    #[arg(short, long, global = true)]
    backend: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DirectionArg {
    Forward,
    Reverse,
}

impl From<DirectionArg> for FlowDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Forward => FlowDirection::Forward,
            DirectionArg::Reverse => FlowDirection::Reverse,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GraphFormat {
    Text,
    Dot,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List reporting layers and their datasets
    Layers {
        /// Flow direction
        #[arg(short, long, value_enum, default_value = "forward")]
        direction: DirectionArg,
    },

    /// Show the lineage path of a dataset
    Path {
        /// Dataset id to start from
        dataset: String,

        /// Flow direction
        #[arg(short, long, value_enum, default_value = "forward")]
        direction: DirectionArg,
    },

    /// Assemble and render the lineage graph around a dataset
    Graph {
        /// Dataset id to start from
        dataset: String,

        /// Flow direction
        #[arg(short, long, value_enum, default_value = "forward")]
        direction: DirectionArg,

        /// Highlight edges carrying this transformation rule
        #[arg(short, long)]
        select: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: GraphFormat,

        /// Write a JSON report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Look up transformation rule detail
    Rule {
        /// Rule id
        rule_id: String,

        /// Source dataset the rule reads from
        #[arg(short, long)]
        source: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load config if specified
    let config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else if std::path::Path::new("lineascope.toml").exists() {
        Config::from_file(std::path::Path::new("lineascope.toml"))?
    } else {
        if cli.verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    let client = build_client(&config, cli.backend.as_deref(), cli.verbose)?;

    match cli.command {
        Commands::Layers { direction } => {
            layers_command(&client, direction.into(), cli.verbose).await
        }
        Commands::Path { dataset, direction } => {
            path_command(&client, &dataset, direction.into(), cli.verbose).await
        }
        Commands::Graph {
            dataset,
            direction,
            select,
            format,
            output,
        } => {
            graph_command(
                &config,
                &client,
                &dataset,
                direction.into(),
                select.as_deref(),
                format,
                output.as_deref(),
                cli.verbose,
            )
            .await
        }
        Commands::Rule { rule_id, source } => {
            rule_command(&client, &rule_id, &source, cli.verbose).await
        }
    }
}

/// Construct the client for the selected backend
///
/// The backend is always chosen explicitly (flag or config default);
/// LINEASCOPE_TOKEN overrides the configured token.
fn build_client(
    config: &Config,
    backend: Option<&str>,
    verbose: bool,
) -> Result<RestLineageClient> {
    let (name, backend_config) = config.backend(backend)?;

    let mut client = RestLineageClient::from_config(name, backend_config);
    if let Ok(token) = std::env::var("LINEASCOPE_TOKEN") {
        client = client.with_token(token);
    }
    tracing::debug!(backend = name, url = %backend_config.base_url, "constructed lineage client");

    if verbose {
        eprintln!(
            "{} {} ({})",
            "Using backend:".cyan(),
            name,
            backend_config.base_url
        );
    }

    Ok(client)
}

/// Map a fetch result, treating a malformed response as "no data"
///
/// Network and status errors stay errors; a body that fails to decode
/// produces an empty result plus a notification, so the command renders
/// an empty state instead of dying.
fn fetch_or_empty<T>(
    result: Result<Vec<T>, FetchError>,
    backend: &str,
) -> Result<(Vec<T>, Option<Notification>)> {
    match result {
        Ok(items) => Ok((items, None)),
        Err(FetchError::InvalidResponse(detail)) => {
            let note = Notification::new(
                NotificationCode::MalformedResponse,
                Severity::Warn,
                format!("Response could not be decoded: {}", detail),
            )
            .with_backend(backend);
            Ok((Vec::new(), Some(note)))
        }
        Err(error) => {
            print_notification(&Notification::new(
                NotificationCode::FetchFailed,
                Severity::Error,
                error.to_string(),
            ));
            std::process::exit(1);
        }
    }
}

fn print_notification(note: &Notification) {
    let tag = match note.severity {
        Severity::Error => format!("[{}]", note.code).red(),
        Severity::Warn => format!("[{}]", note.code).yellow(),
        Severity::Info => format!("[{}]", note.code).cyan(),
    };
    eprintln!("{} {}", tag, note.message);
}

/// Layers command - list reporting layers
async fn layers_command(
    client: &RestLineageClient,
    direction: FlowDirection,
    verbose: bool,
) -> Result<()> {
    if verbose {
        eprintln!("{} {} layers...", "Fetching".cyan(), direction);
    }

    let (layers, note) =
        fetch_or_empty(client.fetch_layers(direction).await, client.name())?;
    if let Some(note) = &note {
        print_notification(note);
    }

    let grouping = LayerGrouping::from_layers(layers);
    if grouping.is_empty() {
        println!("{}", "No layers to display".yellow());
        return Ok(());
    }

    println!(
        "{} ({} datasets across {} layers)",
        "Lineage layers".bold(),
        grouping.dataset_count(),
        grouping.layers().len()
    );
    for layer in grouping.layers() {
        println!("\n{}", layer.layer.bold().bright_blue());
        for dataset in &layer.datasets {
            println!("  {}", dataset);
        }
    }

    Ok(())
}

/// Path command - show the connections on a dataset's lineage path
async fn path_command(
    client: &RestLineageClient,
    dataset: &str,
    direction: FlowDirection,
    verbose: bool,
) -> Result<()> {
    if verbose {
        eprintln!(
            "{} {} path of {}...",
            "Fetching".cyan(),
            direction,
            dataset
        );
    }

    let (connections, note) = fetch_or_empty(
        client.fetch_path(direction, dataset).await,
        client.name(),
    )?;
    if let Some(note) = &note {
        print_notification(note);
    }

    if connections.is_empty() {
        println!("{}", "No lineage data for this dataset".yellow());
        return Ok(());
    }

    let graph = LineageGraph::from_connections(&connections);
    let reach = match direction {
        FlowDirection::Forward => graph.downstream(dataset),
        FlowDirection::Reverse => graph.upstream(dataset),
    };

    println!("{} {}", "Dataset:".bold(), dataset.green());
    println!(
        "{} {} datasets via {} connections",
        "Reaches:".bold(),
        reach.len(),
        connections.len()
    );
    println!();
    for conn in &connections {
        println!(
            "  {} {} {}  ({})",
            conn.source_dataset,
            "->".dimmed(),
            conn.destination_dataset,
            conn.rule_id.dimmed()
        );
    }

    Ok(())
}

/// Graph command - assemble, lay out, and render the lineage view
#[allow(clippy::too_many_arguments)]
async fn graph_command(
    config: &Config,
    client: &RestLineageClient,
    dataset: &str,
    direction: FlowDirection,
    select: Option<&str>,
    format: GraphFormat,
    output: Option<&std::path::Path>,
    verbose: bool,
) -> Result<()> {
    let (connections, note) = fetch_or_empty(
        client.fetch_path(direction, dataset).await,
        client.name(),
    )?;

    let mut notifications = Vec::new();
    if let Some(note) = note {
        print_notification(&note);
        notifications.push(note);
    }

    let mut selection = SelectionState::new();
    if let Some(rule_id) = select {
        selection.select(rule_id);
    }

    let builder = ViewBuilder::new(Box::new(LayeredLayout))
        .with_layout(config.layout.clone())
        .with_highlight(config.highlight.clone());
    let view = builder.build(&connections, direction, &selection);

    if view.is_empty() {
        notifications.push(
            Notification::new(
                NotificationCode::EmptyLineage,
                Severity::Info,
                format!("No lineage data for {}", dataset),
            )
            .with_dataset(dataset),
        );
        if !matches!(format, GraphFormat::Json) {
            println!("{}", "No lineage data to display".yellow());
        }
    } else {
        if verbose {
            eprintln!(
                "{} {} nodes, {} edges",
                "Assembled".cyan(),
                view.nodes.len(),
                view.edges.len()
            );
        }

        match format {
            GraphFormat::Text => print_view(&view),
            GraphFormat::Dot => println!("{}", render_dot(&view)),
            GraphFormat::Json => {}
        }
    }

    let report = view.into_report(notifications);

    if matches!(format, GraphFormat::Json) {
        println!("{}", report.to_json()?);
    }

    if let Some(path) = output {
        report.save_to_file(path)?;
        if verbose {
            eprintln!("{} {}", "Report saved to:".green(), path.display());
        }
    }

    Ok(())
}

/// Rule command - print transformation rule detail
async fn rule_command(
    client: &RestLineageClient,
    rule_id: &str,
    source: &str,
    verbose: bool,
) -> Result<()> {
    if verbose {
        eprintln!("{} rule {} from {}...", "Fetching".cyan(), rule_id, source);
    }

    let (rules, note) = fetch_or_empty(
        client.fetch_rule(rule_id, source).await,
        client.name(),
    )?;
    if let Some(note) = &note {
        print_notification(note);
    }

    if rules.is_empty() {
        print_notification(&Notification::new(
            NotificationCode::RuleNotFound,
            Severity::Warn,
            format!("No rule {} for source {}", rule_id, source),
        ));
        return Ok(());
    }

    for rule in &rules {
        println!("{} {}", "Rule:".bold(), rule.rule_id.green());
        println!("{} {}", "Source:".bold(), rule.source_dataset);
        if let Some(destination) = &rule.destination_dataset {
            println!("{} {}", "Destination:".bold(), destination);
        }
        for (key, value) in &rule.attributes {
            println!("{} {}", format!("{}:", key).bold(), value);
        }
        println!();
    }

    Ok(())
}

/// Print the assembled view as a role-grouped listing
fn print_view(view: &ExplorerView) {
    println!("{}", "=".repeat(60).bright_blue());
    println!("{}", "Lineage graph".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());

    for role in [
        DatasetRole::Source,
        DatasetRole::Intermediate,
        DatasetRole::Destination,
        DatasetRole::Unknown,
    ] {
        let nodes: Vec<_> = view.nodes.iter().filter(|n| n.role == role).collect();
        if nodes.is_empty() {
            continue;
        }

        println!("\n{}", role.to_string().bold());
        for node in nodes {
            match node.position {
                Some(pos) => println!("  {}  ({:.0}, {:.0})", node.label, pos.x, pos.y),
                None => println!("  {}", node.label),
            }
        }
    }

    println!("\n{}", "connections".bold());
    for edge in &view.edges {
        let line = format!(
            "  {} -> {}  ({})",
            edge.connection.source_dataset, edge.connection.destination_dataset, edge.rule_id()
        );
        if edge.style.selected {
            println!("{}", line.bright_magenta().bold());
        } else {
            println!("{}", line);
        }
    }
}

/// Render the view as a Graphviz digraph
fn render_dot(view: &ExplorerView) -> String {
    let mut out = String::new();
    out.push_str("digraph lineage {\n");
    out.push_str(match view.direction {
        FlowDirection::Forward => "    rankdir=LR;\n",
        FlowDirection::Reverse => "    rankdir=RL;\n",
    });
    out.push_str("    node [shape=box, style=rounded];\n");

    for node in &view.nodes {
        let color = match node.role {
            DatasetRole::Source => "#2e7d32",
            DatasetRole::Intermediate => "#1565c0",
            DatasetRole::Destination => "#c62828",
            DatasetRole::Unknown => "#616161",
        };
        out.push_str(&format!(
            "    \"{}\" [label=\"{}\", color=\"{}\"];\n",
            node.id, node.label, color
        ));
    }

    for edge in &view.edges {
        out.push_str(&format!(
            "    \"{}\" -> \"{}\" [label=\"{}\", color=\"{}\", penwidth={}];\n",
            edge.connection.source_dataset,
            edge.connection.destination_dataset,
            edge.rule_id(),
            edge.style.color,
            edge.style.stroke_width
        ));
    }

    out.push_str("}\n");
    out
}
