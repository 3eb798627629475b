//! # redmine-client - a typed async client for the Redmine REST API
//!
//! Resource methods map to HTTP calls against `{base_url}/{resource}.json`.
//! The client picks one authentication mechanism, reuses a single transport
//! session, flattens multi-valued query parameters and reports every failure
//! as one descriptive [`Error`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use redmine_client::{Client, ClientConfig};
//! use redmine_client::resources::{IssueFields, IssueListParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), redmine_client::Error> {
//!     let client = Client::new(
//!         ClientConfig::builder()
//!             .base_url("https://redmine.example.com")
//!             .api_key("0123456789abcdef")
//!             .build()?,
//!     );
//!
//!     // GET issues.json?project_id=website&tracker_id=1,2
//!     let issues = client
//!         .issues()
//!         .list(&IssueListParams {
//!             project_id: Some("website".into()),
//!             tracker_id: vec![1, 2],
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("{} issues", issues["total_count"]);
//!
//!     // POST issues.json with {"issue": {...}}
//!     let created = client
//!         .issues()
//!         .create(&IssueFields {
//!             project_id: Some("website".into()),
//!             subject: Some("Broken link on the home page".to_string()),
//!             watcher_user_ids: vec![3, 5],
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("Created issue #{}", created["issue"]["id"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Authentication
//!
//! - an API key is sent in the `X-Redmine-API-Key` header and wins over anything else
//! - otherwise a username and password are sent as HTTP basic credentials
//! - otherwise requests are anonymous, which works for public resources
//!
//! Impersonation (`X-Redmine-Switch-User`) is added on top of whichever
//! mechanism was chosen. Authentication is resolved once, when the first
//! request creates the session.
//!
//! ## Error Handling
//!
//! ```no_run
//! use redmine_client::{Client, ClientConfig, Error};
//! use redmine_client::resources::IssueFields;
//!
//! # async fn example(client: Client) {
//! match client.issues().create(&IssueFields::default()).await {
//!     Ok(issue) => println!("{}", issue),
//!     Err(Error::Validation { messages, .. }) => eprintln!("Rejected: {}", messages.join("; ")),
//!     Err(Error::Connection { base_url, code }) => {
//!         eprintln!("{} unreachable: {}", base_url, code)
//!     }
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! # }
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events (request execution at `debug`, responses at
//! `info`, failures at `warn`). Credentials are never logged.

pub mod auth;
mod client;
pub mod config;
mod error;
pub mod params;
pub mod request;
pub mod resources;
pub mod session;

pub use client::Client;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{translate, Error, ErrorKind, Result};
pub use request::{Payload, RequestDescriptor, RequestMode};
pub use session::Session;
