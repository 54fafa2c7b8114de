mod args;
mod plan;

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use models::endpoints;
use models::events::{decode_event, encode_command, encode_event};
use models::{ClientCommand, LoginRequest, LoginResponse};
use serde_json::Value;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::args::Cli;
use crate::plan::{ApiCall, Plan};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("missing token; run `fleetctl login` and pass --token or set FLEET_TOKEN")]
    MissingToken,
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("--data must be a JSON object")]
    NotAnObject,
    #[error(transparent)]
    Model(#[from] models::ModelError),
    #[error("{resource} does not support a --{filter} filter")]
    UnsupportedFilter { resource: &'static str, filter: &'static str },
    #[error(transparent)]
    Endpoint(#[from] models::endpoints::EndpointError),
    #[error("websocket failed: {0}")]
    Ws(Box<tokio_tungstenite::tungstenite::Error>),
}

impl From<tokio_tungstenite::tungstenite::Error> for CliError {
    fn from(error: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Ws(Box::new(error))
    }
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    token: Option<String>,
}

impl CliContext {
    fn token(&self) -> Result<&str, CliError> {
        self.token.as_deref().filter(|t| !t.trim().is_empty()).ok_or(CliError::MissingToken)
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = CliContext { base_url: cli.base_url, token: cli.token };

    match plan::plan(cli.command)? {
        Plan::Login(request) => run_login(&ctx, &request).await,
        Plan::Call(call) => {
            let value = api_request(&ctx, call).await?;
            print_json(&value)
        }
        Plan::Listen { commands, limit } => run_listen(&ctx, &commands, limit).await,
    }
}

async fn run_login(ctx: &CliContext, request: &LoginRequest) -> Result<(), CliError> {
    let url = endpoints::join(&ctx.base_url, endpoints::AUTH_LOGIN);
    let response = reqwest::Client::new().post(url).json(request).send().await?;
    let body = read_body(response).await?;
    let login: LoginResponse = serde_json::from_value(body)?;
    eprintln!("signed in as {}", login.user.display_name());
    println!("{}", login.access_token);
    Ok(())
}

async fn api_request(ctx: &CliContext, call: ApiCall) -> Result<Value, CliError> {
    let token = ctx.token()?;
    let url = endpoints::join(&ctx.base_url, &call.path);

    let request = reqwest::Client::new().request(call.method, &url).bearer_auth(token);
    let request = if let Some(json) = call.body { request.json(&json) } else { request };

    read_body(request.send().await?).await
}

async fn read_body(response: reqwest::Response) -> Result<Value, CliError> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(CliError::Status { status: status.as_u16(), body: text });
    }
    plan::parse_response(&text)
}

async fn run_listen(ctx: &CliContext, commands: &[ClientCommand], limit: Option<usize>) -> Result<(), CliError> {
    let url = endpoints::socket_url(&ctx.base_url, ctx.token()?)?;
    let (mut stream, _) = connect_async(url).await?;
    eprintln!("connected");

    for command in commands {
        stream.send(Message::Text(encode_command(command).into())).await?;
    }

    let mut received = 0_usize;
    while let Some(message) = stream.next().await {
        match message? {
            Message::Text(text) => match decode_event(&text) {
                Ok(event) => {
                    println!("{}", encode_event(&event));
                    received = received.saturating_add(1);
                    if limit.is_some_and(|limit| received >= limit) {
                        break;
                    }
                }
                Err(error) => eprintln!("skipping frame: {error}"),
            },
            Message::Close(_) => break,
            _ => {}
        }
    }

    eprintln!("socket closed after {received} events");
    Ok(())
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
