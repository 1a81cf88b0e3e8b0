//! Admin CLI for a running everbloom server.
//!
//! Logs in with the admin password, keeps the token in a local file, and
//! drives the JSON API: list/create/publish blogs, list/create/activate
//! retreats, list subscribers, health check.

use clap::{Parser, Subcommand};
use reqwest::blocking::Client;
use serde_json::json;
use std::fs;

const TOKEN_FILE: &str = ".everbloom-token";

#[derive(Parser)]
#[command(name = "site-cli")]
#[command(about = "Admin CLI for the everbloom site", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the server's health endpoint
    Health,
    /// Log in and store the admin token locally
    Login {
        #[arg(short, long)]
        password: String,
    },
    /// Clear the admin cookie server-side and remove the local token
    Logout,
    ListUsers,
    ListBlogs {
        /// Only published posts
        #[arg(long)]
        published: bool,
    },
    CreateBlog {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        subtitle: String,
        #[arg(short, long)]
        description: String,
    },
    /// Set a blog's published flag
    PublishBlog {
        #[arg(short, long)]
        id: String,
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        published: bool,
    },
    DeleteBlog {
        #[arg(short, long)]
        id: String,
    },
    ListRetreats {
        /// Only active retreats
        #[arg(long)]
        active: bool,
    },
    CreateRetreat {
        #[arg(short, long)]
        label: String,
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        price: f64,
        #[arg(short, long)]
        description: String,
    },
    /// Set a retreat's active flag
    ActivateRetreat {
        #[arg(short, long)]
        id: String,
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        active: bool,
    },
    DeleteRetreat {
        #[arg(short, long)]
        id: String,
    },
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn send(
    client: &Client,
    method: reqwest::Method,
    url: String,
    body: Option<serde_json::Value>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut req = client.request(method, url);
    // Token goes along as a Bearer header; the gate only checks presence,
    // but it keeps the CLI honest about which calls are admin actions.
    if let Ok(token) = fs::read_to_string(TOKEN_FILE) {
        req = req.bearer_auth(token.trim());
    }
    if let Some(body) = body {
        req = req.json(&body);
    }
    let response = req.send()?;
    let status = response.status();
    let value: serde_json::Value = response.json()?;
    if !status.is_success() {
        eprintln!("server returned {status}");
    }
    print_json(&value);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = Client::new();
    let base = cli.url.trim_end_matches('/').to_string();

    use reqwest::Method;
    match cli.command {
        Commands::Health => send(&client, Method::GET, format!("{base}/api/health"), None),
        Commands::Login { password } => {
            let response = client
                .post(format!("{base}/api/admin/login"))
                .json(&json!({ "password": password }))
                .send()?;
            let status = response.status();
            let value: serde_json::Value = response.json()?;
            if status.is_success() {
                if let Some(token) = value["token"].as_str() {
                    fs::write(TOKEN_FILE, token)?;
                    println!("logged in; token saved to {TOKEN_FILE}");
                }
            } else {
                eprintln!("login failed ({status})");
            }
            print_json(&value);
            Ok(())
        }
        Commands::Logout => {
            let _ = fs::remove_file(TOKEN_FILE);
            send(&client, Method::POST, format!("{base}/api/admin/logout"), Some(json!({})))
        }
        Commands::ListUsers => send(&client, Method::GET, format!("{base}/api/users"), None),
        Commands::ListBlogs { published } => {
            let query = if published { "?published=true" } else { "" };
            send(&client, Method::GET, format!("{base}/api/blogs{query}"), None)
        }
        Commands::CreateBlog {
            title,
            subtitle,
            description,
        } => send(
            &client,
            Method::POST,
            format!("{base}/api/blogs"),
            Some(json!({
                "title": title,
                "subtitle": subtitle,
                "description": description,
            })),
        ),
        Commands::PublishBlog { id, published } => send(
            &client,
            Method::PATCH,
            format!("{base}/api/blogs/{id}"),
            Some(json!({ "isPublished": published })),
        ),
        Commands::DeleteBlog { id } => send(
            &client,
            Method::DELETE,
            format!("{base}/api/blogs/{id}"),
            None,
        ),
        Commands::ListRetreats { active } => {
            let query = if active { "?active=true" } else { "" };
            send(&client, Method::GET, format!("{base}/api/retreats{query}"), None)
        }
        Commands::CreateRetreat {
            label,
            title,
            price,
            description,
        } => send(
            &client,
            Method::POST,
            format!("{base}/api/retreats"),
            Some(json!({
                "label": label,
                "title": title,
                "price": price,
                "description": description,
            })),
        ),
        Commands::ActivateRetreat { id, active } => send(
            &client,
            Method::PATCH,
            format!("{base}/api/retreats/{id}"),
            Some(json!({ "isActive": active })),
        ),
        Commands::DeleteRetreat { id } => send(
            &client,
            Method::DELETE,
            format!("{base}/api/retreats/{id}"),
            None,
        ),
    }
}
