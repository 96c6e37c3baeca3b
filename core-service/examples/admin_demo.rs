//! Lists every managed resource against a running backend.
//!
//! ```text
//! ADMIN_API_URL=http://localhost:5000 ADMIN_DEMO_TOKEN=... \
//!     cargo run -p core-service --example admin_demo
//! ```

use anyhow::Context;
use core_service::content::models::{
    Category, ContactAddress, Counter, GalleryItem, Project, Slider, SocialLink,
};
use core_service::content::{ErrorKind, Outcome, Resource};
use core_service::logging::{init_logging, LogLevel, LoggingConfig};
use core_service::{AdminService, CancellationScope};
use std::fmt::Debug;

async fn show<R: Resource + Debug>(service: &AdminService, scope: &CancellationScope) -> bool {
    let kind = R::KIND;
    match service.content().list::<R>(scope).await {
        Outcome::Success(records) => {
            println!("{}: {} record(s)", kind, records.len());
            for record in records.iter().take(3) {
                println!("  {:?}", record);
                if let Some(url) = service.content().record_image_url(record) {
                    println!("    image: {}", url);
                }
            }
            true
        }
        Outcome::Unauthenticated => {
            println!("{}: not signed in", kind);
            false
        }
        Outcome::Failure(failure) => {
            println!("{}: {} (status {:?})", kind, failure, failure.status);
            failure.kind != ErrorKind::Unauthorized
        }
        Outcome::Cancelled => false,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default().with_level(LogLevel::Debug))
        .context("failed to initialise logging")?;

    let service = AdminService::from_env().context("set ADMIN_API_URL to the backend URL")?;

    if let Ok(token) = std::env::var("ADMIN_DEMO_TOKEN") {
        service.login(token).await?;
    }

    let scope = CancellationScope::new();
    let _guard = scope.guard();

    let ok = show::<Slider>(&service, &scope).await
        && show::<GalleryItem>(&service, &scope).await
        && show::<Project>(&service, &scope).await
        && show::<Category>(&service, &scope).await
        && show::<Counter>(&service, &scope).await
        && show::<ContactAddress>(&service, &scope).await
        && show::<SocialLink>(&service, &scope).await;

    if !ok && !service.is_authenticated().await {
        println!("Sign in again and export ADMIN_DEMO_TOKEN");
    }

    Ok(())
}
