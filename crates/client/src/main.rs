//! feedback-client CLI entry point.

use chrono::Utc;
use clap::Parser;

use feedback_client::cli::{Cli, Commands, OutputFormat};
use feedback_client::output::{json, pretty, render};
use feedback_client::{ClientError, Dashboard, FeedbackClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut client = FeedbackClient::new(&cli.base_url);
    if let Some(token) = &cli.token {
        client = client.with_token(token);
    }

    match cli.command {
        Commands::Messages(messages_cmd) => {
            use feedback_client::cli::messages::MessagesAction;
            match messages_cmd.action {
                MessagesAction::List => {
                    let messages = client.list_messages().await?;
                    println!(
                        "{}",
                        render(&messages, cli.format, |m| pretty::format_messages(m, Utc::now()))
                    );
                }
                MessagesAction::Get { id } => {
                    let message = client.get_message(&id).await?;
                    println!(
                        "{}",
                        render(&message, cli.format, |m| pretty::format_message(m, Utc::now()))
                    );
                }
                MessagesAction::Delete { id } => {
                    let mut dashboard = Dashboard::new(client);
                    dashboard.load().await;
                    if let Some(message) = dashboard.state().error_message() {
                        return Err(load_error(message, dashboard.last_error()).into());
                    }

                    if dashboard.delete(&id).await? {
                        if !cli.quiet {
                            println!("Deleted message {id}");
                        }
                    } else {
                        let notice = dashboard
                            .state()
                            .view()
                            .and_then(|view| view.notice())
                            .unwrap_or("Failed to delete message");
                        return Err(ClientError::Dashboard(notice.to_string()).into());
                    }
                }
                MessagesAction::Reply { id, text } => {
                    let mut dashboard = Dashboard::new(client);
                    dashboard.load().await;
                    if let Some(message) = dashboard.state().error_message() {
                        return Err(load_error(message, dashboard.last_error()).into());
                    }

                    dashboard.open_reply(&id)?;
                    dashboard.update_draft(&id, text)?;
                    let outcome = dashboard.submit_reply(&id).await?;
                    println!("{}", render(&outcome, cli.format, pretty::format_outcome));
                    if !outcome.success {
                        std::process::exit(1);
                    }
                }
            }
        }
        Commands::Dashboard(dashboard_cmd) => {
            let mut dashboard = Dashboard::new(client);
            let mut dropped = dashboard.load().await;

            for _ in 0..dashboard_cmd.retries {
                match dashboard.retry().await {
                    Some(count) => dropped = count,
                    None => break,
                }
            }

            if !cli.quiet {
                if let Some(detail) = dashboard.last_error() {
                    eprintln!("error: {detail}");
                }
                if dropped > 0 {
                    eprintln!("warning: skipped {dropped} invalid records");
                }
            }

            match cli.format {
                OutputFormat::Json => println!("{}", json::format_dashboard(dashboard.state())),
                OutputFormat::Pretty => {
                    println!("{}", pretty::format_dashboard(dashboard.state(), Utc::now()))
                }
            }
        }
        Commands::Health(health_cmd) => {
            use feedback_client::cli::health::HealthAction;
            match health_cmd.action {
                HealthAction::Live => {
                    let live = client.livez().await?;
                    if !cli.quiet {
                        println!("{}", if live { "live" } else { "not live" });
                    }
                    if !live {
                        std::process::exit(1);
                    }
                }
                HealthAction::Status => {
                    let report = client.healthz().await?;
                    println!("{}", render(&report, cli.format, pretty::format_health));
                }
            }
        }
    }

    Ok(())
}

fn load_error(message: &str, detail: Option<&str>) -> ClientError {
    match detail {
        Some(detail) => ClientError::Dashboard(format!("{message}: {detail}")),
        None => ClientError::Dashboard(message.to_string()),
    }
}
