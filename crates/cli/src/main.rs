//! Jobboard CLI - browse ranked job postings from the terminal

mod browse;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobboard_core::application::{InitialFilters, Intent, ListingController};
use jobboard_core::domain::{JobId, LocationFilter};
use jobboard_core::port::{ListingEndpoint, SystemTimeProvider};
use jobboard_infra_http::listing_endpoint_impl::DEFAULT_API_URL;
use jobboard_infra_http::{HttpEndpointConfig, HttpListingEndpoint};

#[derive(Parser)]
#[command(name = "jobboard")]
#[command(about = "Ranked job listings in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Listing API root
    #[arg(long, env = "JOBBOARD_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "JOBBOARD_TIMEOUT_SECS", default_value = "30")]
    timeout_secs: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommended jobs, landing-page style
    Home,

    /// Search the listing
    List {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show one job from a listing page
    Show {
        /// Job ID
        job_id: String,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Interactive browsing session
    Browse {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Free-text search
    #[arg(short, long)]
    search: Option<String>,

    /// any, remote, hybrid or onsite
    #[arg(short, long)]
    location: Option<String>,

    /// Page number (1-based)
    #[arg(short, long)]
    page: Option<u32>,
}

impl FilterArgs {
    fn into_initial(self) -> Result<InitialFilters> {
        // The controller is lenient with navigation input; the CLI is not
        if let Some(location) = &self.location {
            location
                .parse::<LocationFilter>()
                .with_context(|| format!("Invalid --location {location:?}"))?;
        }
        if self.page == Some(0) {
            anyhow::bail!("--page starts at 1");
        }

        let initial = InitialFilters::new(self.search, self.location);
        Ok(match self.page {
            Some(page) => initial.with_page(page),
            None => initial,
        })
    }
}

fn init_logging() -> Result<()> {
    let log_format = std::env::var("JOBBOARD_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("jobboard=info"))
        .context("Failed to create env filter")?;

    // stdout belongs to the listing output
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

/// Mount a controller and wait for its first page to land
async fn load(endpoint: &dyn ListingEndpoint, initial: InitialFilters) -> ListingController {
    let mut controller = ListingController::new(initial);
    let request = controller.mount();
    controller.settle(endpoint, request).await;
    controller
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let config = HttpEndpointConfig::new(&cli.api_url)
        .with_timeout(Duration::from_secs(cli.timeout_secs));
    info!(api_url = %config.base_url, "Jobboard v{}", jobboard_core::VERSION);

    let endpoint: Arc<dyn ListingEndpoint> =
        Arc::new(HttpListingEndpoint::new(config).context("Failed to build HTTP client")?);
    let clock = SystemTimeProvider;

    match cli.command {
        Commands::Home => {
            let controller = load(endpoint.as_ref(), InitialFilters::default()).await;
            print!("{}", render::landing(&controller.view_model(), &clock));
        }

        Commands::List { filters } => {
            let controller = load(endpoint.as_ref(), filters.into_initial()?).await;
            print!("{}", render::listing(&controller.view_model(), &clock));
        }

        Commands::Show { job_id, filters } => {
            let mut controller = load(endpoint.as_ref(), filters.into_initial()?).await;
            // selecting never fetches
            controller.dispatch(Intent::Select(JobId::new(job_id.as_str())));

            let vm = controller.view_model();
            match (&vm.selected_job, &vm.error) {
                (Some(job), _) => print!("{}", render::detail(job, &clock)),
                (None, Some(failure)) => {
                    anyhow::bail!("Could not load jobs: {}", render::failure_line(failure))
                }
                (None, None) => println!(
                    "{}",
                    format!("Job {job_id} is not on page {} of this listing", vm.page).yellow()
                ),
            }
        }

        Commands::Browse { filters } => {
            browse::run(endpoint, filters.into_initial()?).await?;
        }
    }

    Ok(())
}
