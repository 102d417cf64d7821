use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use deal_intel::config::ApiConfig;
use deal_intel::deal::Deal;
use deal_intel::intelligence::{HttpDealApi, IntelligenceService, analyse, personalize};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let force_refresh = if let Some(pos) = args.iter().position(|a| a == "--force-refresh") {
        args.remove(pos);
        true
    } else {
        false
    };

    let Some(target) = args.first() else {
        eprintln!("Usage: deal-intel [--force-refresh] <deal.json | deal-uuid>");
        eprintln!("  <deal.json>   analyse a deal snapshot locally");
        eprintln!("  <deal-uuid>   fetch intelligence from DEAL_API_BASE_URL");
        std::process::exit(2);
    };

    let intelligence = if let Ok(deal_id) = target.parse::<Uuid>() {
        // Remote path: richer analysis with local fallback
        let config = ApiConfig::from_env().unwrap_or_else(|| {
            eprintln!("Error: DEAL_API_BASE_URL not set");
            eprintln!("  export DEAL_API_BASE_URL=https://crm.example.com/api");
            std::process::exit(1);
        });
        let api = Arc::new(HttpDealApi::new(&config)?);
        let service = IntelligenceService::new(api);
        service.intelligence(deal_id, force_refresh).await?
    } else {
        // Local path: pure engine over a deal snapshot file
        let raw = std::fs::read_to_string(target)?;
        let deal: Deal = serde_json::from_str(&raw)?;
        let now = Utc::now();
        let mut intelligence = analyse(&deal, now);
        // Fill draft placeholders before printing
        intelligence.suggested_power_move = intelligence
            .suggested_power_move
            .map(|m| personalize(&m, &deal, now));
        intelligence
    };

    println!("{}", serde_json::to_string_pretty(&intelligence)?);
    Ok(())
}
