use base64::{engine::general_purpose, Engine};
use clap::Parser;
use log::info;
use serde::Serialize;
use winsched::tasks::schtasks::TaskApi;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Full path to TOML task list
    #[clap(short, long, value_parser)]
    toml: Option<String>,

    /// Base64 encoded TOML file
    #[clap(short, long, value_parser)]
    data: Option<String>,

    /// Print the current state of a Task
    #[clap(short, long, value_parser)]
    query: Option<String>,

    /// Read Tasks with the Task Scheduler 1.0 interface
    #[clap(long)]
    legacy: bool,
}

fn main() {
    let args = Args::parse();

    if let Some(name) = args.query {
        let api = if args.legacy {
            TaskApi::V1
        } else {
            TaskApi::V2
        };
        match winsched::core::query_task(&name, api) {
            Ok(result) => print_json(&result),
            Err(err) => println!("[winsched] Failed to query task {name}: {err:?}"),
        }
        return;
    }

    println!("[winsched] Starting task reconciliation!");
    let outcome_results = if let Some(toml) = args.toml {
        winsched::core::parse_toml_file(&toml)
    } else if let Some(data) = args.data {
        let toml_data_results = general_purpose::STANDARD.decode(&data);
        let toml_data = match toml_data_results {
            Ok(results) => results,
            Err(err) => {
                println!("[winsched] Failed to base64 decode TOML data {data}, error: {err:?}");
                return;
            }
        };
        winsched::core::parse_toml_data(&toml_data)
    } else {
        println!("[winsched] No TOML file or data provided!");
        return;
    };

    match outcome_results {
        Ok(outcomes) => {
            info!("[winsched] Reconciliation success");
            print_json(&outcomes);
        }
        Err(err) => {
            println!("[winsched] Failed to reconcile tasks: {err:?}");
            return;
        }
    }
    println!("[winsched] Finished task reconciliation!");
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(result) => println!("{result}"),
        Err(err) => println!("[winsched] Failed to serialize output: {err:?}"),
    }
}
