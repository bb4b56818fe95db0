use std::time::Duration;

use anyhow::Context;
use duelist::kernel::event::Event;
use duelist::kernel::time::TICK_MS;
use duelist::kernel::world::WorldSnapshot;
use duelist::{Config, Reactor, Scheduler};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

// Lines from the host feed (Never touch Kernel directly)
enum FeedLine {
    Event(Event),
    World(Box<WorldSnapshot>),
}

fn parse_line(line: &str) -> anyhow::Result<Option<FeedLine>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if let Some(raw) = line.strip_prefix("world ") {
        let world: WorldSnapshot = serde_json::from_str(raw).context("bad world snapshot")?;
        return Ok(Some(FeedLine::World(Box::new(world))));
    }
    Ok(Some(FeedLine::Event(line.parse()?)))
}

fn load_config() -> anyhow::Result<Config> {
    let mut args = std::env::args().skip(1);
    let config = match args.next().as_deref() {
        Some("--config") => {
            let path = args.next().context("--config needs a path")?;
            let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            Config::from_json(&raw)?
        }
        Some(pairs) => Config::from_args(pairs)?,
        None => Config::default().validate()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    let config = load_config()?;
    let mut reactor = Reactor::new(config);
    let mut scheduler = Scheduler::default();
    let mut world = WorldSnapshot::new("self");
    tracing::info!("Duelist core booting. Tasks: {:?}", scheduler.task_names());

    let shutdown = CancellationToken::new();
    let (tx, mut rx) = mpsc::channel::<FeedLine>(256);

    // Ctrl+C
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    // Stdin feed; EOF ends the session
    let feed_done = shutdown.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_line(&line) {
                Ok(Some(parsed)) => {
                    if tx.send(parsed).await.is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => tracing::warn!("Skipping feed line `{}`: {:#}", line, e),
            }
        }
        feed_done.cancel();
    });

    let mut cadence = tokio::time::interval(Duration::from_millis(TICK_MS));
    cadence.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = cadence.tick() => {}
        }

        let mut events = Vec::new();
        while let Ok(line) = rx.try_recv() {
            match line {
                FeedLine::Event(event) => events.push(event),
                FeedLine::World(snapshot) => world = *snapshot,
            }
        }

        if let Some(command) = reactor.tick_step(events, &mut scheduler, &world) {
            tracing::info!(tick = reactor.now().frame, state = ?reactor.state.current(), "Motor: {:?}", command);
        }
    }

    // Drain whatever arrived before shutdown
    while let Ok(line) = rx.try_recv() {
        if let FeedLine::Event(event) = line {
            reactor.dispatch(event);
        }
    }

    let summary = reactor.telemetry.aggregate_session(reactor.now().frame);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
