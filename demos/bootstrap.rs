// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boots an application from a root directory and prints its configuration.
//!
//! ```text
//! cargo run --example bootstrap -- --root /srv/app --set db.main.host=10.0.0.5
//! ```

use clap::{Arg, ArgAction, Command};
use ministruts::adapters::CommandLineAdapter;
use ministruts::domain::ConnectionSettings;
use ministruts::prelude::*;
use ministruts::service::{init_logging, LogSettings};
use ministruts::signals::{dispatch_signals, PendingSignals, Signal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("bootstrap")
        .arg(
            Arg::new("root")
                .long("root")
                .default_value(".")
                .help("Application root directory"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .action(ArgAction::Append)
                .help("Override a configuration key (key=value)"),
        )
        .get_matches();

    let root = matches
        .get_one::<String>("root")
        .cloned()
        .unwrap_or_else(|| ".".to_string());

    let mut ctx = AppContext::new(AppOptions::new(root).env_prefix("APP_"))?;
    ctx.config_mut()
        .add_source(Box::new(CommandLineAdapter::from_arg_matches(&matches, "set")?))?;

    init_logging(&LogSettings::from_config(ctx.config())?)?;

    for key in ctx.config().keys() {
        println!("{} = {}", key, ctx.config().get(&key)?);
    }

    match ConnectionSettings::from_config(ctx.config(), "main") {
        Ok(db) => println!("db.main -> {}://{}", db.connector, db.host),
        Err(e) => println!("db.main not configured: {}", e),
    }

    match ctx.messenger() {
        Ok(messenger) => {
            if let Err(e) = messenger.send("ops", "application started") {
                println!("{}: {}", messenger.name(), e);
            }
        }
        Err(e) => println!("no messenger: {}", e),
    }

    // SIGHUP triggers a reload on the next dispatch
    let reload = Arc::new(AtomicBool::new(false));
    let pending = PendingSignals::new();
    let flag = reload.clone();
    pending.on(Signal::Hangup, move |_| flag.store(true, Ordering::SeqCst));
    pending.raise(Signal::Hangup);

    if dispatch_signals(&pending) && reload.load(Ordering::SeqCst) {
        ctx.config_mut().reload()?;
        println!("reloaded {} keys", ctx.config().keys().len());
    }

    Ok(())
}
