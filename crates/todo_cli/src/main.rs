//! Command-line transport for the todo core.
//!
//! # Responsibility
//! - Map `todo_cli <operation> [arguments-json]` onto one dispatched request.
//! - Print the JSON response envelope and exit non-zero on failure.
//!
//! Configuration comes from `TODO_DB_PATH`, `TODO_ID_POLICY`,
//! `TODO_LOG_LEVEL` and `TODO_LOG_DIR`.

use log::warn;
use serde_json::Value;
use std::process::ExitCode;
use todo_core::{execute, init_logging, AppConfig, Arguments, OperationResponse};

const USAGE: &str = "usage: todo_cli <operation> [arguments-json]\n       todo_cli ping";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(operation) = args.first() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    if operation == "ping" {
        println!("todo_core ping={}", todo_core::ping());
        println!("todo_core version={}", todo_core::core_version());
        return ExitCode::SUCCESS;
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("todo_cli: {err}");
            return ExitCode::from(2);
        }
    };
    if let Some(log_dir) = config.log_dir.as_deref().and_then(|dir| dir.to_str()) {
        if let Err(err) = init_logging(config.log_level, log_dir) {
            eprintln!("todo_cli: logging disabled: {err}");
        }
    }

    let arguments = match parse_arguments(args.get(1).map(String::as_str)) {
        Ok(arguments) => arguments,
        Err(message) => {
            eprintln!("todo_cli: {message}");
            return ExitCode::from(2);
        }
    };

    let response = execute(&config.service(), operation, &arguments);
    print_response(&response);
    if response.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn parse_arguments(raw: Option<&str>) -> Result<Arguments, String> {
    let Some(raw) = raw else {
        return Ok(Arguments::new());
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(arguments)) => Ok(arguments),
        Ok(_) => Err("arguments must be a JSON object".to_string()),
        Err(err) => Err(format!("arguments are not valid JSON: {err}")),
    }
}

fn print_response(response: &OperationResponse) {
    match serde_json::to_string_pretty(response) {
        Ok(text) => println!("{text}"),
        Err(err) => {
            warn!("event=cli_output module=cli status=error error={err}");
            eprintln!("todo_cli: failed to encode response: {err}");
        }
    }
}
