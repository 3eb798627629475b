//! Lists the open issues of a project.
//!
//! Reads the connection settings from `REDMINE_URL`, `REDMINE_API_KEY` (or
//! `REDMINE_USERNAME`/`REDMINE_PASSWORD`) and takes the project identifier as
//! the first argument.
//!
//! Run with: `cargo run --example list_issues -- my-project`

use redmine_client::resources::IssueListParams;
use redmine_client::{Client, ClientConfig, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "redmine_client=debug,list_issues=info".into()),
        )
        .init();

    let project = std::env::args().nth(1).unwrap_or_else(|| "website".to_string());
    let client = Client::new(ClientConfig::from_env()?);

    let params = IssueListParams {
        project_id: Some(project.as_str().into()),
        status_id: Some("open".to_string()),
        sort: Some("updated_on:desc".to_string()),
        limit: Some(25),
        ..Default::default()
    };

    let response = client.issues().list(&params).await?;

    println!("{} open issues in {}", response["total_count"], project);
    if let Some(issues) = response["issues"].as_array() {
        for issue in issues {
            println!(
                "#{:<6} [{}] {}",
                issue["id"], issue["status"]["name"], issue["subject"]
            );
        }
    }

    Ok(())
}
