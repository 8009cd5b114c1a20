use anyhow::{ensure, Context};
use clap::Parser;
use feed_bridge::bridge::{feed_bind_address, is_failure_status, FeedBridge};
use feed_bridge::model::FeedState;
use quakecore::feed::{FeedLoader, StaticFeed};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod feed_bridge;
mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Synthetic earthquake feed and offline map driver")]
struct Args {
    /// Run a single load and report the rendered markers
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 250)]
    events: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Use the fixed reference events instead of a random catalog
    #[arg(long, default_value_t = false)]
    reference: bool,
    /// Load from the public USGS feed instead of a synthetic catalog
    #[arg(long, default_value_t = false)]
    live: bool,
    /// Write the rendered Leaflet page to this path
    #[arg(long)]
    export: Option<PathBuf>,
    /// Answer feed requests with this HTTP status instead of the catalog
    #[arg(long)]
    fail_status: Option<u16>,
    /// Serve the synthetic feed on 127.0.0.1:9000 until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    if let Some(code) = args.fail_status {
        ensure!(
            is_failure_status(code),
            "--fail-status must be a 4xx or 5xx code, got {code}"
        );
    }

    let mut workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.events, args.seed)
    };
    workflow_config.reference |= args.reference;
    workflow_config.live |= args.live;
    if args.export.is_some() {
        workflow_config.export = args.export;
    }

    let runner = Runner::new(workflow_config.clone());
    let catalog = runner.catalog()?;
    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime")?;

    if args.offline {
        let result = if workflow_config.live {
            runtime.block_on(runner.execute(&FeedLoader::new()))
        } else {
            runtime.block_on(runner.execute(&StaticFeed::new(catalog.clone())))
        };

        match (&result.summary, &result.feed_error) {
            (Some(summary), _) => println!(
                "Offline run -> markers {}, deep {}, skipped {}",
                summary.markers, result.deep_markers, summary.skipped
            ),
            (None, Some(err)) => println!("Offline run -> load failed: {err}"),
            (None, None) => println!("Offline run -> no outcome"),
        }

        if let Some(path) = &workflow_config.export {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &result.page)
                .with_context(|| format!("writing map page {}", path.display()))?;
            println!("Map page written to {}", path.display());
        }

        let report_path = PathBuf::from("tools/data/offline_markers.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(result.report_line().as_bytes())?;
    }

    if args.serve {
        let bridge = FeedBridge::spawn(
            FeedState::new(Default::default(), args.fail_status),
            feed_bind_address(),
        );
        bridge.publish(catalog)?;
        bridge.publish_status("Feed bridge running on http://127.0.0.1:9000/feed (Ctrl+C to stop)...");
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
