use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use console::style;
use git_date_rewrite::idle::{self, EnigoKeyTap, IdleConfig};
use git_date_rewrite::prompt::{ConfirmPrompter, DialoguerConfirmPrompter};

/// Wires Ctrl-C to a cancellation flag and runs the idle-prevention loop
/// until the flag is raised.
fn run() -> Result<i32, ()> {
    let mut confirm = DialoguerConfirmPrompter;
    match confirm.confirm("Start pressing keys now? (Ctrl-C to stop)", true) {
        Ok(true) => {}
        Ok(false) => {
            println!("{}", style("Canceled. No keys pressed.").yellow().bold());
            return Ok(0);
        }
        Err(e) => {
            eprintln!("{}", style(format!("Prompt error: {}", e)).red().bold());
            return Err(());
        }
    }

    let cancel = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&cancel);
    match ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst)) {
        Ok(()) => {}
        Err(e) => {
            eprintln!(
                "{}",
                style(format!("Cannot install Ctrl-C handler: {}", e)).red().bold()
            );
            return Err(());
        }
    }

    let mut tap = match EnigoKeyTap::new() {
        Ok(tap) => tap,
        Err(e) => {
            eprintln!("{}", style(e).red().bold());
            return Err(());
        }
    };

    let config = IdleConfig::new(Instant::now());
    let mut rng = rand::thread_rng();

    match idle::run(&config, &mut tap, &mut rng, &cancel) {
        Ok(presses) => {
            println!(
                "{}",
                style(format!("Good morning! Pressed {} keys.", presses)).green().bold()
            );
            Ok(0)
        }
        Err(e) => {
            eprintln!("{}", style(e).red().bold());
            Err(())
        }
    }
}

/// Entry point for the `no-afk` binary. Exits 0 on cancellation, 1 on error.
fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(_) => std::process::exit(1),
    }
}
