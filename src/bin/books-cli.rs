use clap::Parser;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "books-cli")]
#[command(about = "Search best-sellers history through a running books-proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long)]
    author: Option<String>,

    #[arg(short, long)]
    title: Option<String>,

    /// May be repeated.
    #[arg(short, long)]
    isbn: Vec<String>,

    /// 0 or a multiple of 20.
    #[arg(short, long)]
    offset: Option<u64>,
}

impl Cli {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(author) = &self.author {
            query.push(("author", author.clone()));
        }
        if let Some(title) = &self.title {
            query.push(("title", title.clone()));
        }
        for isbn in &self.isbn {
            query.push(("isbn[]", isbn.clone()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        query
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/v1/nyt/books", cli.url.trim_end_matches('/')))
        .query(&cli.query())
        .send()
        .await?;

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;

    if !status.is_success() {
        eprintln!("Error: books-proxy returned status {}", status);
        eprintln!("{}", serde_json::to_string_pretty(&json)?);
        std::process::exit(1);
    }

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
