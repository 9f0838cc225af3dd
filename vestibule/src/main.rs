//! A terminal sign-in client for a spreadsheet-backed user store

/// The "functional core" to the main module's "imperative shell"
mod app;

/// Configuration and argument parsing
mod config;

/// Focus-ring macro for form fields
mod form_fields;

use app::{App, EffectContext};
use clap::Parser;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use std::{io, process::ExitCode, sync::Arc};
use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedSender},
    task::JoinHandle,
    time,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> io::Result<ExitCode> {
    let config = config::Config::parse();

    // The terminal owns stdout, so logs go to a file in the data
    // directory. `RUST_LOG` filters as usual.
    std::fs::create_dir_all(config.data_dir())?;
    let log_file = tracing_appender::rolling::never(config.data_dir(), "vestibule.log");
    let (log_writer, _log_guard) = tracing_appender::non_blocking(log_file);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_writer)
                .with_ansi(false),
        )
        .init();

    let mut terminal = ratatui::init();
    terminal.clear()?;
    let res = run(terminal, Arc::new(config)).await;
    ratatui::restore();
    res
}

/// Manage the lifecycle of the app
async fn run(mut terminal: DefaultTerminal, config: Arc<config::Config>) -> io::Result<ExitCode> {
    let mut app = App::new();
    let context = Arc::new(EffectContext::new());

    // We expect side-effectful behaviors (that is, things like FS or
    // network access) to take place via async tasks. Once those tasks are
    // done, we read their results off of a channel. We keep track of
    // outstanding effects so we can exit cleanly.
    let (effect_tx, mut effect_rx) = unbounded_channel();
    let mut outstanding_effects = Vec::with_capacity(1);

    // Initialize the app, spawn a task to handle side effects, and render
    // the first frame. We could render before spawning for a slightly
    // faster draw, but defer it so that anything taken care of in
    // `app.init` will reflect in the first draw.
    outstanding_effects.push(spawn_effect_task(
        effect_tx.clone(),
        Arc::clone(&context),
        Arc::clone(&config),
        app.init(),
    ));
    terminal.draw(|frame| app.render(frame))?;

    let mut event_stream = EventStream::new();

    // Ticks drive toast expiry, so they come much faster than anything
    // network-bound.
    let mut ticks = time::interval(time::Duration::from_secs(1));

    // Start our event loop!
    loop {
        // First thing we do is wait for an event. This can be either
        // external input or the async result of a effect. This is an
        // `Option<_>` because we don't necessarily need to pay attention
        // to every single piece of external input.
        let next_action_opt = tokio::select! {
            event_opt = event_stream.next() => {
                match event_opt {
                    Some(Ok(Event::Key(key_event))) => {
                        Some(app::Action::Key(key_event))
                    }
                    Some(Err(err)) => {
                        Some(app::Action::Problem(err.to_string()))
                    }
                    _ => None,
                }
            },

            _ = ticks.tick() => {
                Some(app::Action::TimePassed)
            },

            action_opt = effect_rx.recv() => {
                action_opt
            }
        };

        // Once we have an action, we send it to `app.handle` to get any
        // next effects, and handle those the same way we handled init.
        if let Some(action) = next_action_opt {
            for effect in app.handle(action) {
                outstanding_effects.push(spawn_effect_task(
                    effect_tx.clone(),
                    Arc::clone(&context),
                    Arc::clone(&config),
                    effect,
                ));
            }
        }

        // Now that we handled the event, we re-render to display any
        // changes the app cares about.
        terminal.draw(|frame| app.render(frame))?;

        // If the message we just handled was from an outstanding effect,
        // we need to remove the completed `JoinHandle` from the list.
        // This list should never be too long (since we do this on every
        // pass through the event loop) so a full scan is fine.
        outstanding_effects.retain(|handle| !handle.is_finished());

        // Finally, if the app indicates that it should exit, we wait for
        // all outstanding effects to finish (e.g. so settings writes hit
        // the disk) before exiting the loop with the exit code from the
        // app.
        if let Some(code) = app.should_exit() {
            for effect in outstanding_effects.drain(..) {
                let _ = effect.await;
            }

            return Ok(code);
        }
    }
}

/// Spawn a task to run an effect and send the next action to the app.
fn spawn_effect_task(
    effect_tx: UnboundedSender<app::Action>,
    context: Arc<EffectContext>,
    config: Arc<config::Config>,
    effect: app::Effect,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Some(next_action) = effect.run(&context, &config).await {
            // If the channel is closed we're shutting down, and it's OK
            // to drop the message.
            let _ = effect_tx.send(next_action);
        }
    })
}
