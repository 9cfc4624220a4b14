use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use rand::Rng;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[arg(short, long, default_value_t = 100)]
    requests: usize,

    #[arg(short, long, default_value_t = 16)]
    concurrency: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let permits = Arc::new(Semaphore::new(args.concurrency.max(1)));
    let ok = Arc::new(AtomicUsize::new(0));
    let endpoint = format!("{}/add", args.url.trim_end_matches('/'));

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    let mut v = vec![];

    for i in 0..args.requests {
        let form = {
            let mut rng = rand::rng();
            [
                ("date", format!("load-{:05}", i)),
                ("steps", rng.random_range(0..30_000).to_string()),
                ("calories", rng.random_range(0..1_500).to_string()),
                ("distance", format!("{:.2}", rng.random_range(0.0..25.0))),
                ("active_minutes", rng.random_range(0..240).to_string()),
            ]
        };

        let permit = permits.clone().acquire_owned().await?;

        let client = client.clone();
        let endpoint = endpoint.clone();
        let ok = ok.clone();
        let t = tokio::spawn(async move {
            let _permit = permit;
            match client.post(&endpoint).form(&form).send().await {
                Ok(resp) if resp.status().is_redirection() => {
                    ok.fetch_add(1, Ordering::Relaxed);
                    debug!("add sent")
                }
                Ok(resp) => debug!("add rejected: {}", resp.status()),
                Err(e) => debug!("error sending request: {e}"),
            }
        });
        v.push(t);
    }

    for t in v {
        let _ = t.await;
    }

    info!(
        "{} of {} adds accepted",
        ok.load(Ordering::Relaxed),
        args.requests
    );

    Ok(())
}
