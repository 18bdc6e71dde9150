//! `dfs-client` — thin interactive REPL over [`dfs::client::ClientEngine`]
//! (spec §6: "reads commands from stdin: create|write|read|delete|stream|
//! info|help|exit").

use std::io::{self, BufRead, Write};

use dfs::client::ClientEngine;

const CACHE_CAPACITY: usize = 1024;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(ns_host), Some(ns_port)) = (args.next(), args.next()) else {
        eprintln!("usage: dfs-client <naming_server_host> <naming_server_port>");
        return std::process::ExitCode::FAILURE;
    };
    let ns_port: u16 = match ns_port.parse() {
        Ok(port) => port,
        Err(_) => {
            eprintln!("invalid naming server port: {ns_port}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let engine = ClientEngine::new(ns_host, ns_port, CACHE_CAPACITY);
    let stdin = io::stdin();
    print_help();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !run_command(&engine, line).await {
            break;
        }
    }
    std::process::ExitCode::SUCCESS
}

/// Runs one REPL command; returns `false` to stop the loop (`exit`).
async fn run_command(engine: &ClientEngine, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or("");
    let rest: Vec<&str> = parts.collect();

    match command {
        "help" => print_help(),
        "exit" => return false,
        "create" => match rest.as_slice() {
            [path] => report(engine.create(path, 0o644).await),
            _ => eprintln!("usage: create <path>"),
        },
        "write" => match rest.as_slice() {
            [path, offset, data] => match offset.parse::<u64>() {
                Ok(offset) => report(engine.write(path, offset, data.as_bytes()).await),
                Err(_) => eprintln!("invalid offset: {offset}"),
            },
            _ => eprintln!("usage: write <path> <offset> <data>"),
        },
        "read" => match rest.as_slice() {
            [path, offset, length] => match (offset.parse::<u64>(), length.parse::<u32>()) {
                (Ok(offset), Ok(length)) => match engine.read(path, offset, length).await {
                    Ok(data) => println!("{}", String::from_utf8_lossy(&data)),
                    Err(err) => eprintln!("error: {err}"),
                },
                _ => eprintln!("invalid offset/length"),
            },
            _ => eprintln!("usage: read <path> <offset> <length>"),
        },
        "delete" => match rest.as_slice() {
            [path] => report(engine.delete(path).await),
            _ => eprintln!("usage: delete <path>"),
        },
        "stream" => match rest.as_slice() {
            [path] => {
                let stdout = io::stdout();
                let result = engine
                    .stream(path, 0, |chunk| {
                        let _ = stdout.lock().write_all(chunk);
                    })
                    .await;
                report(result);
            }
            _ => eprintln!("usage: stream <path>"),
        },
        "info" => match rest.as_slice() {
            [path] => match engine.get_file_info(path).await {
                Ok(info) => println!("size={} permissions={:o}", info.file_size, info.permissions),
                Err(err) => eprintln!("error: {err}"),
            },
            _ => eprintln!("usage: info <path>"),
        },
        other => eprintln!("unknown command: {other} (try 'help')"),
    }
    true
}

fn report(result: dfs::Result<()>) {
    match result {
        Ok(()) => println!("ok"),
        Err(err) => eprintln!("error: {err}"),
    }
}

fn print_help() {
    println!(
        "commands: create <path> | write <path> <offset> <data> | read <path> <offset> <length> | \
         delete <path> | stream <path> | info <path> | help | exit"
    );
}
