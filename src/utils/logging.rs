use std::sync::atomic::{AtomicBool, Ordering};
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;
use once_cell::sync::Lazy;

static ENABLE_LOGGING: AtomicBool = AtomicBool::new(false);
static LOG_TO_FILE: AtomicBool = AtomicBool::new(false);
static LOG_FILE: Lazy<Mutex<Option<std::fs::File>>> = Lazy::new(|| Mutex::new(None));

const DEFAULT_LOG_FILE: &str = "toymc.log";

/// Initializes logging based on environment variables:
/// - TOYMC_LOGGING: enables/disables logging (true/false)
/// - TOYMC_LOG_TO_FILE: send log lines to a file instead of stdout (true/false, default false)
/// - TOYMC_LOG_FILE: path of the log file (default `toymc.log`)
///
/// To enable logging in tests, run: TOYMC_LOGGING=true cargo test -- --nocapture
pub fn init_logging() {
    match env::var("TOYMC_LOGGING") {
        Ok(value) => {
            match value.as_str() {
                "true" => {
                    ENABLE_LOGGING.store(true, Ordering::SeqCst);
                    if env::var("TOYMC_LOG_TO_FILE").unwrap_or_else(|_| "false".to_string()) == "true" {
                        let path = env::var("TOYMC_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
                        match OpenOptions::new().create(true).append(true).open(&path) {
                            Ok(file) => {
                                if let Ok(mut guard) = LOG_FILE.lock() {
                                    *guard = Some(file);
                                    LOG_TO_FILE.store(true, Ordering::SeqCst);
                                }
                            }
                            Err(e) => eprintln!("Failed to open log file {}: {}, logging to stdout", path, e),
                        }
                    }
                }
                "false" => ENABLE_LOGGING.store(false, Ordering::SeqCst),
                _ => panic!("\nError: TOYMC_LOGGING environment variable must be 'true' or 'false'\n\nTo run the program, use one of:\n  TOYMC_LOGGING=true cargo run\n  TOYMC_LOGGING=false cargo run\n"),
            }
        }
        Err(_) => ENABLE_LOGGING.store(false, Ordering::SeqCst),
    }
}

pub fn log(prefix: &str, message: &str) {
    if ENABLE_LOGGING.load(Ordering::SeqCst) {
        let log_message = format!("  [{}]   {}\n", prefix, message);

        if LOG_TO_FILE.load(Ordering::SeqCst) {
            if let Ok(mut guard) = LOG_FILE.lock() {
                if let Some(file) = guard.as_mut() {
                    if let Err(e) = file.write_all(log_message.as_bytes()) {
                        eprintln!("Failed to write to log file: {}", e);
                    }
                    if let Err(e) = file.flush() {
                        eprintln!("Failed to flush log file: {}", e);
                    }
                }
            }
        } else {
            print!("{}", log_message);
        }
    }
}
