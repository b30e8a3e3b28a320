use std::time::Duration;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use service_broker_api::domain::apiresponses::LastOperationResponse;
use service_broker_api::domain::specs::LastOperationState;

#[derive(Parser)]
#[command(name = "broker-cli")]
#[command(about = "Query an Open Service Broker", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Value of the X-Broker-API-Version header.
    #[arg(long, default_value = "2.14")]
    api_version: String,

    /// Basic auth user, for brokers that require it.
    #[arg(long)]
    user: Option<String>,

    #[arg(long, requires = "user")]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the service catalog
    Catalog,
    /// Fetch a service instance
    Instance {
        instance_id: String,
    },
    /// Fetch a service binding
    Binding {
        instance_id: String,
        binding_id: String,
    },
    /// Poll the last operation of an instance, or of a binding with --binding-id
    LastOperation {
        instance_id: String,

        #[arg(long)]
        binding_id: Option<String>,

        #[arg(long)]
        service_id: Option<String>,

        #[arg(long)]
        plan_id: Option<String>,

        /// Operation data returned by the asynchronous request.
        #[arg(long)]
        operation: Option<String>,

        /// Keep polling until the operation succeeds or fails.
        #[arg(long)]
        wait: bool,

        /// Seconds between polls with --wait.
        #[arg(long, default_value_t = 5)]
        interval: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    if let Commands::LastOperation {
        wait: true,
        interval,
        ..
    } = &cli.command
    {
        return wait_for_operation(&cli, &client, Duration::from_secs(*interval)).await;
    }

    let res = build_request(&cli, &client)?.send().await?;
    print_response(res).await
}

fn build_request(
    cli: &Cli,
    client: &reqwest::Client,
) -> Result<RequestBuilder, Box<dyn std::error::Error>> {
    let mut headers = HeaderMap::new();
    headers.insert(
        "x-broker-api-version",
        HeaderValue::from_str(&cli.api_version)?,
    );

    let base = cli.url.trim_end_matches('/');
    let request = match &cli.command {
        Commands::Catalog => client.get(format!("{}/v2/catalog", base)),
        Commands::Instance { instance_id } => {
            client.get(format!("{}/v2/service_instances/{}", base, instance_id))
        }
        Commands::Binding {
            instance_id,
            binding_id,
        } => client.get(format!(
            "{}/v2/service_instances/{}/service_bindings/{}",
            base, instance_id, binding_id
        )),
        Commands::LastOperation {
            instance_id,
            binding_id,
            service_id,
            plan_id,
            operation,
            ..
        } => {
            let url = match binding_id {
                Some(binding_id) => format!(
                    "{}/v2/service_instances/{}/service_bindings/{}/last_operation",
                    base, instance_id, binding_id
                ),
                None => format!("{}/v2/service_instances/{}/last_operation", base, instance_id),
            };
            let query: Vec<(&str, &String)> = [
                ("service_id", service_id),
                ("plan_id", plan_id),
                ("operation", operation),
            ]
            .into_iter()
            .filter_map(|(key, value)| value.as_ref().map(|value| (key, value)))
            .collect();
            client.get(url).query(&query)
        }
    };

    let request = match &cli.user {
        Some(user) => request.basic_auth(user, cli.password.as_ref()),
        None => request,
    };
    Ok(request.headers(headers))
}

/// Poll last_operation until it reports a terminal state.
/// 410 Gone means the instance or binding was deleted, which ends a deprovision or unbind.
async fn wait_for_operation(
    cli: &Cli,
    client: &reqwest::Client,
    interval: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let res = build_request(cli, client)?.send().await?;
        match res.status() {
            StatusCode::GONE => {
                println!("gone");
                return Ok(());
            }
            status if !status.is_success() => return print_response(res).await,
            _ => {}
        }

        let operation: LastOperationResponse = res.json().await?;
        match &operation.description {
            Some(description) => println!("{}: {}", operation.state, description),
            None => println!("{}", operation.state),
        }

        if operation.state.is_terminal() {
            return match operation.state {
                LastOperationState::Failed => Err("operation failed".into()),
                _ => Ok(()),
            };
        }
        tokio::time::sleep(interval).await;
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: broker returned status {}", status);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) if !text.is_empty() => println!("{}", text),
        Err(_) => {}
    }

    if status.is_success() {
        Ok(())
    } else {
        Err(format!("request failed with status {}", status).into())
    }
}
