//! Standalone demo: attach the sim client component to one actor and run a
//! full load → tick → save cycle against a live simulation server.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sim_client::{DEFAULT_BASE_URL, SimClientComponent};
use sim_host::Host;
use sim_http::ReqwestTransport;

#[derive(Parser)]
#[command(
    name = "sim_demo",
    about = "Drives one load → tick → save cycle against a simulation server"
)]
struct Args {
    /// Base URL of the simulation server
    #[arg(short, long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Event name delivered with the tick
    #[arg(short, long, default_value = "player_chat")]
    event: String,

    /// Params for the tick, as serialised JSON
    #[arg(short, long, default_value = "{}")]
    params: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let mut host = Host::new(Arc::new(ReqwestTransport::new()));

    // Subscribe before spawning so the load reply is observed too.
    let mut component = SimClientComponent::with_base_url(&args.base_url);
    component
        .state_updated()
        .subscribe(|payload| info!(payload, "sim state updated"));

    info!(base_url = %args.base_url, "spawning sim client actor");
    let actor = host.spawn(component);
    host.run_until_idle().await;

    info!(event = %args.event, "sending tick");
    host.with_component_mut::<SimClientComponent, _>(actor, |component, ctx| {
        component.tick(ctx, &args.event, &args.params);
    });
    host.run_until_idle().await;

    info!("despawning actor; flushing the save");
    host.despawn(actor);
    host.run_until_idle().await;

    Ok(())
}
