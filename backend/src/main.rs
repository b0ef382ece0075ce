//! Demo entry-point: runs one generation request through the lifecycle
//! against in-memory collaborators and logs every notification.

use std::sync::Arc;

use color_eyre::eyre::{Result, eyre};
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use sitegen::GenerationSettings;
use sitegen::domain::{
    Account, AccountId, GenerationLifecycle, GenerationOutcome, Identity, Project,
    ProjectCatalogue, PromptText,
};
use sitegen::outbound::{
    InMemoryCreditStore, InMemoryProjectRepository, SimulatedGenerationBackend,
    TracingNotificationSink,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = GenerationSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load generation settings: {err}"))?;
    run(settings).await
}

async fn run(settings: GenerationSettings) -> Result<()> {
    let account = Account::new(
        AccountId::random(),
        Identity::new("John Doe", "john@example.com")?,
    );

    let credits = Arc::new(InMemoryCreditStore::new());
    credits.open_account(*account.id(), settings.starting_credits())?;

    let mut backend = SimulatedGenerationBackend::new(settings.latency());
    if settings.fail_generation {
        backend = backend.failing_with("simulated generation failure");
    }

    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let lifecycle = GenerationLifecycle::new(
        Arc::new(backend),
        Arc::clone(&credits),
        Arc::new(TracingNotificationSink),
        Arc::clone(&clock),
    );

    let pending = match lifecycle.submit(settings.prompt(), &account).await {
        Ok(pending) => pending,
        Err(rejection) => {
            warn!(
                account_id = %account.id(),
                title = rejection.title(),
                description = rejection.description(),
                reason = %rejection,
                "generation rejected"
            );
            return Ok(());
        }
    };
    let outcome = pending.outcome().await;

    let projects = Arc::new(InMemoryProjectRepository::new());
    if let GenerationOutcome::Succeeded { site, .. } = &outcome {
        let prompt = PromptText::new(settings.prompt())?;
        projects.insert(Project::draft_from_site(
            *account.id(),
            &prompt,
            site,
            clock.utc(),
        ));
    }

    let listing = ProjectCatalogue::new(projects)
        .list(account.id(), None)
        .await?;
    let stats = listing.stats();
    info!(
        account_id = %account.id(),
        outcome = %outcome.status(),
        total = stats.total,
        draft = stats.draft,
        published = stats.published,
        "dashboard refreshed"
    );
    Ok(())
}
