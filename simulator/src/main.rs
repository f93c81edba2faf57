use anyhow::Context;
use clap::Parser;
use generator::profile::{build_scan, GeneratorConfig, SensorRig};
use gui_bridge::bridge::GuiBridge;
use scopecore::feed::latest_value;
use scopecore::prelude::FrameSnapshot;
use scopecore::scan::VendorDb;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Offline driver and HTTP frame bridge for the Wi-Fi radar scope")]
struct Args {
    /// Run an offline frame batch and emit a baseline summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Frames to run in offline mode (720 = two full sweeps at 1 deg/frame)
    #[arg(long, default_value_t = 720)]
    frames: usize,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Vendor prefix table, one `PREFIX|Name` entry per line
    #[arg(long)]
    vendor_db: Option<PathBuf>,
    /// Synthetic networks in the generated scene
    #[arg(long, default_value_t = 8)]
    networks: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Keep the HTTP bridge alive for a renderer
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::default()
    };

    let vendors = match args.vendor_db.or_else(|| workflow_config.vendor_db.clone()) {
        Some(path) => VendorDb::from_path(&path)
            .with_context(|| format!("loading vendor table {}", path.display()))?,
        None => VendorDb::empty(),
    };

    let generator_config = GeneratorConfig {
        network_count: args.networks,
        seed: args.seed,
        ..Default::default()
    };

    let (scan_publisher, scan_feed) = latest_value();
    let (sensor_publisher, sensor_feed) = latest_value();
    let scan_publisher = Arc::new(scan_publisher);

    let runner = Runner::new(&workflow_config, vendors, scan_feed, sensor_feed)?;
    let runner = Arc::new(Mutex::new(runner));
    let bridge = GuiBridge::new(runner.clone(), scan_publisher.clone());

    if args.offline {
        scan_publisher.publish(build_scan(&generator_config, 0));
        let mut rig = SensorRig::new(&generator_config);
        let mut ping_total = 0usize;
        let mut last_frame = FrameSnapshot::default();
        {
            let mut runner = runner.lock().unwrap();
            for _ in 0..args.frames {
                sensor_publisher.publish(rig.advance(1.0 / 60.0));
                let frame = runner.tick();
                ping_total += frame.pings.len();
                last_frame = frame;
            }
        }

        println!(
            "Offline run -> frames {}, targets {}, pings {}, heading {:.1} {}",
            args.frames,
            last_frame.target_count,
            ping_total,
            last_frame.heading_deg,
            last_frame.compass_point
        );
        bridge.publish_status("Offline frame batch complete.");

        let metrics = runner.lock().unwrap().metrics();
        let report = format!(
            "frames={} targets={} pings={} scans={} heading={:.1}\n",
            metrics.frames,
            last_frame.target_count,
            metrics.pings,
            metrics.scans,
            last_frame.heading_deg
        );
        let report_path = PathBuf::from("tools/data/offline_frames.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(report.as_bytes())?;
    }

    if args.serve {
        bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        scan_publisher.publish(build_scan(&generator_config, 0));

        // Background rig: sensor samples at 50 Hz, a fresh scan every 10 s.
        let background_config = generator_config.clone();
        let background_scans = scan_publisher.clone();
        thread::spawn(move || {
            let mut rig = SensorRig::new(&background_config);
            let mut epoch = 0u64;
            let mut since_scan = 0.0f32;
            loop {
                sensor_publisher.publish(rig.advance(0.02));
                since_scan += 0.02;
                if since_scan >= 10.0 {
                    since_scan = 0.0;
                    epoch += 1;
                    background_scans.publish(build_scan(&background_config, epoch));
                }
                thread::sleep(Duration::from_millis(20));
            }
        });

        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
