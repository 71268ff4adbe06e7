//! fs - frame scheduler demo host
//!
//! Runs configured timers in a frame loop and inspects soft placement.

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use framesched::cli::{Cli, Command};
use framesched::config::Config;
use framesched::driver::{FrameLoop, RegisteredTimer, RunReport, register_timers, soft_plan};
use framesched::{ManualClock, MonotonicClock, Scheduler};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to install subscriber: {}", e))?;

    debug!(?level, "Logging initialized");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;
    info!("fs starting");

    match cli.command {
        Command::Run {
            fps,
            duration,
            simulate,
            jitter_ms,
            lazy,
        } => {
            let mut loop_config = config.frame_loop.clone();
            if let Some(fps) = fps {
                loop_config.fps = fps;
            }
            if let Some(duration) = duration {
                loop_config.duration_secs = duration;
            }
            if let Some(jitter_ms) = jitter_ms {
                loop_config.jitter_ms = jitter_ms;
            }
            loop_config.simulate |= simulate;
            loop_config.lazy |= lazy;
            cmd_run(&config, FrameLoop::new(loop_config))
        }
        Command::Plan { count, interval } => cmd_plan(count, interval),
        Command::Config => {
            print!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
    }
}

fn cmd_run(config: &Config, frame_loop: FrameLoop) -> Result<()> {
    debug!(timers = config.timers.len(), "cmd_run: called");
    let (report, timers) = if frame_loop.config().simulate {
        let clock = ManualClock::new(0.0);
        let mut scheduler = Scheduler::with_config(clock.clone(), config.scheduler.clone());
        let timers = register_timers(&mut scheduler, &config.timers).context("Failed to register timers")?;
        (frame_loop.run_simulated(&clock, &mut scheduler), timers)
    } else {
        let mut scheduler = Scheduler::with_config(MonotonicClock::new(), config.scheduler.clone());
        let timers = register_timers(&mut scheduler, &config.timers).context("Failed to register timers")?;
        (frame_loop.run_realtime(&mut scheduler), timers)
    };

    print_report(&report, &timers);
    Ok(())
}

fn print_report(report: &RunReport, timers: &[RegisteredTimer]) {
    println!(
        "{} {} frames, {:.3}s, avg frame {:.2}ms",
        "✓".green(),
        report.frames,
        report.running_time,
        report.average_interval * 1000.0
    );
    for timer in timers {
        println!("  {:<16} {}", timer.name.cyan(), timer.calls.get().to_string().yellow());
    }
    let stats = &report.stats;
    println!(
        "  {} calls={} catch_ups={} soft_reschedules={} peak_heap={} peak_immediate={}",
        "stats".dimmed(),
        stats.calls,
        stats.tight_catch_ups,
        stats.soft_reschedules,
        stats.peak_heap,
        stats.peak_immediate
    );
}

fn cmd_plan(count: usize, interval: f64) -> Result<()> {
    debug!(count, interval, "cmd_plan: called");
    let plan = soft_plan(count, interval).context("Failed to build plan")?;
    for entry in plan {
        println!(
            "{} next={:.6} last={:.6}",
            entry.handle.to_string().yellow(),
            entry.next_ts,
            entry.last_ts
        );
    }
    Ok(())
}
