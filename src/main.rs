use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use property_promoter::admin::{AdminPanel, MediaNamespace, PropertyDraft, UploadFile, UploadReport};
use property_promoter::auth::Credentials;
use property_promoter::backend::{AuthProvider, MemoryBackend, ObjectStorage, RecordStore, RestBackend};
use property_promoter::catalog::{CatalogSession, CatalogView, FilterState};
use property_promoter::config::Config;
use property_promoter::contact::{contact_cards, property_inquiry_link, ContactForm, Interest};
use property_promoter::media::{MediaCarousel, MediaKind, Render};
use property_promoter::models::{Property, Session};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEMO_ADMIN_EMAIL: &str = "admin@demo.local";
const DEMO_ADMIN_PASSWORD: &str = "demo-admin";

#[derive(Parser)]
#[command(name = "promoter", version, about = "Property listings and admin tools for a real-estate promoter")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use built-in demo listings instead of the hosted backend
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List featured properties
    Catalog(FilterArgs),
    /// Show the media carousel for one property
    Media {
        id: String,
        /// Item to show (0-based)
        #[arg(long, default_value_t = 0)]
        index: usize,
    },
    /// Build a WhatsApp link asking about one property
    Inquire { id: String },
    /// Build a WhatsApp link for a contact inquiry
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        message: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, value_enum, default_value_t = Interest::LandPurchase)]
        interest: Interest,
    },
    /// Register a new account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Manage properties (requires an admin account)
    Admin {
        #[arg(long, env = "PROMOTER_ADMIN_EMAIL")]
        email: Option<String>,
        #[arg(long, env = "PROMOTER_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Resume an existing session instead of signing in
        #[arg(long, env = "PROMOTER_ACCESS_TOKEN", hide_env_values = true)]
        token: Option<String>,
        #[command(subcommand)]
        action: AdminAction,
    },
}

/// How the admin command gets its session
enum Login {
    Password(Credentials),
    Token(String),
}

#[derive(Args)]
struct FilterArgs {
    /// Case-insensitive text matched against title, location and description
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long = "type", default_value = "all")]
    kind: String,
    #[arg(long, default_value = "all")]
    location: String,
}

#[derive(Args)]
struct DraftArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    area: Option<String>,
    #[arg(long = "type")]
    kind: Option<String>,
    #[arg(long)]
    badge: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    featured: Option<bool>,
    /// Image files to upload
    #[arg(long = "image")]
    images: Vec<PathBuf>,
    /// Video files to upload
    #[arg(long = "video")]
    videos: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Show every property with its view count
    List,
    /// Create a property
    Create(DraftArgs),
    /// Update fields of an existing property
    Update {
        id: String,
        #[command(flatten)]
        fields: DraftArgs,
    },
    /// Delete a property
    Delete { id: String },
    /// Upload media files and print their public URLs
    Upload {
        #[arg(long = "image")]
        images: Vec<PathBuf>,
        #[arg(long = "video")]
        videos: Vec<PathBuf>,
    },
}

/// Backend the commands run against
enum Backend {
    Rest(RestBackend),
    Memory(Arc<MemoryBackend>),
}

impl Backend {
    fn from_cli(cli: &Cli, config: &Config) -> Result<Self> {
        if cli.demo {
            let demo = MemoryBackend::demo()
                .with_account(Credentials::new(DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD), true);
            return Ok(Backend::Memory(Arc::new(demo)));
        }
        let settings = config.require_backend()?;
        Ok(Backend::Rest(RestBackend::new(settings)?))
    }

    fn store(&self) -> Arc<dyn RecordStore> {
        match self {
            Backend::Rest(rest) => Arc::new(rest.clone()),
            Backend::Memory(memory) => memory.clone(),
        }
    }

    fn auth(&self) -> Arc<dyn AuthProvider> {
        match self {
            Backend::Rest(rest) => Arc::new(rest.clone()),
            Backend::Memory(memory) => memory.clone(),
        }
    }

    /// Store and storage acting as the signed-in user
    fn for_session(&self, session: &Session) -> (Arc<dyn RecordStore>, Arc<dyn ObjectStorage>) {
        match self {
            Backend::Rest(rest) => {
                let scoped = rest.with_session(session);
                let store: Arc<dyn RecordStore> = Arc::new(scoped.clone());
                let storage: Arc<dyn ObjectStorage> = Arc::new(scoped);
                (store, storage)
            }
            Backend::Memory(memory) => {
                let store: Arc<dyn RecordStore> = memory.clone();
                let storage: Arc<dyn ObjectStorage> = memory.clone();
                (store, storage)
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    info!("🏠 {}", config.business.name);

    let backend = Backend::from_cli(&cli, &config)?;

    match cli.command {
        Command::Catalog(filters) => show_catalog(&backend, &config, filters).await,
        Command::Media { id, index } => show_media(&backend, &id, index).await,
        Command::Inquire { id } => {
            let property = find_featured(&backend, &id).await?;
            println!(
                "Open this link to ask about {}:\n{}",
                property.title,
                property_inquiry_link(&config.business.whatsapp_number, &property)
            );
            Ok(())
        }
        Command::Contact {
            name,
            phone,
            message,
            email,
            interest,
        } => {
            let mut form = ContactForm {
                name,
                email,
                phone,
                interest,
                message,
            };
            let link = form.submit(&config.business.whatsapp_number)?;
            println!("Open this link to send your inquiry via WhatsApp:\n{}", link);
            println!();
            for card in contact_cards(&config.business) {
                println!("{}: {} ({})", card.title, card.details, card.subtitle);
            }
            Ok(())
        }
        Command::Signup { email, password } => {
            let credentials = Credentials::new(email, password);
            credentials.validate()?;
            backend
                .auth()
                .sign_up(&credentials)
                .await
                .context("Sign up failed")?;
            println!("Account created for {}. Check your email to confirm it.", credentials.email);
            Ok(())
        }
        Command::Admin {
            email,
            password,
            token,
            action,
        } => {
            let login = match (token, email, password) {
                (Some(token), _, _) => Login::Token(token),
                (None, Some(email), Some(password)) => Login::Password(Credentials::new(email, password)),
                _ => bail!("Provide --email and --password, or --token"),
            };
            run_admin(&backend, login, action).await
        }
    }
}

async fn show_catalog(backend: &Backend, config: &Config, filters: FilterArgs) -> Result<()> {
    let mut session = CatalogSession::new(backend.store());
    let properties = session
        .load_catalog()
        .await
        .context("Failed to load properties. Please try again later.")?;

    let filter = FilterState::new(filters.search, filters.kind.as_str(), filters.location.as_str());
    let view = CatalogView::build(&properties, &filter);

    println!("Types: {}", view.facets.types.join(", "));
    println!("Locations: {}", view.facets.locations.join(", "));
    println!("{}\n", view.summary());

    if let Some(message) = view.empty_message() {
        println!("{}", message);
        if view.can_clear {
            println!("Clear the filters to see every listing.");
        }
        return Ok(());
    }

    for (i, property) in view.visible.iter().enumerate() {
        print_listing(i + 1, property);
        println!(
            "   Contact: {}",
            property_inquiry_link(&config.business.whatsapp_number, property)
        );
        println!();
    }

    Ok(())
}

fn print_listing(position: usize, property: &Property) {
    let badge = property
        .badge
        .as_deref()
        .map(|b| format!(" [{}]", b))
        .unwrap_or_default();
    println!("{}. {}{} ({})", position, property.title, badge, property.price);
    println!("   {} · {} · {}", property.location, property.area, property.kind);
    if let Some(description) = &property.description {
        println!("   {}", description);
    }

    println!(
        "   Media: {} image(s), {} video(s)",
        property.display_images().len(),
        property.videos.len()
    );
    println!("   ID: {}", property.id);
}

async fn find_featured(backend: &Backend, id: &str) -> Result<Property> {
    let mut session = CatalogSession::new(backend.store());
    let properties = session.load_catalog().await?;
    properties
        .into_iter()
        .find(|p| p.id == id)
        .with_context(|| format!("No featured property with id {}", id))
}

async fn show_media(backend: &Backend, id: &str, index: usize) -> Result<()> {
    let property = find_featured(backend, id).await?;

    let mut carousel = MediaCarousel::for_property(&property);
    carousel.jump_to(index)?;

    match carousel.render() {
        Render::Image { url, alt } => println!("Image: {} ({})", url, alt),
        Render::Video { url, .. } => println!("Video (with controls): {}", url),
    }

    if carousel.shows_controls() {
        let dots: String = carousel
            .indicators()
            .iter()
            .map(|i| match (i.active, i.kind) {
                (true, _) => '●',
                (false, MediaKind::Video) => '▶',
                (false, MediaKind::Image) => '○',
            })
            .collect();
        println!("{}  ({} of {})", dots, carousel.current_index() + 1, carousel.len());
    }

    Ok(())
}

async fn run_admin(backend: &Backend, login: Login, action: AdminAction) -> Result<()> {
    let auth = backend.auth();
    let (session, signed_in) = match login {
        Login::Password(credentials) => {
            credentials.validate()?;
            let session = auth.sign_in(&credentials).await.context("Sign in failed")?;
            (session, true)
        }
        Login::Token(token) => {
            let session = auth
                .current_session(&token)
                .await?
                .context("Session expired, sign in again")?;
            (session, false)
        }
    };

    let (store, storage) = backend.for_session(&session);
    let outcome = match AdminPanel::open(Some(session.clone()), store, storage) {
        Ok(panel) => run_admin_action(&panel, action).await,
        Err(e) => Err(e.into()),
    };

    // A resumed session belongs to the caller and stays open
    if signed_in {
        if let Err(e) = auth.sign_out(&session).await {
            warn!("Sign out failed: {}", e);
        }
    }
    outcome
}

async fn run_admin_action(panel: &AdminPanel, action: AdminAction) -> Result<()> {
    match action {
        AdminAction::List => {
            let rows = panel.overview().await?;
            println!("Properties ({})\n", rows.len());
            for row in rows {
                let p = &row.property;
                let extra = if row.extra_images > 0 {
                    format!(" +{}", row.extra_images)
                } else {
                    String::new()
                };
                println!(
                    "{} | {} | {} | {} | {} | views: {} | featured: {} | image: {}{}",
                    p.id,
                    p.title,
                    p.location,
                    p.price,
                    p.kind,
                    row.views,
                    if p.featured { "Yes" } else { "No" },
                    row.thumbnail.as_deref().unwrap_or("-"),
                    extra
                );
            }
        }
        AdminAction::Create(fields) => {
            let mut draft = PropertyDraft::default();
            apply_fields(panel, &mut draft, fields).await?;
            panel.create(&draft).await?;
            info!("Property created successfully");
        }
        AdminAction::Update { id, fields } => {
            let existing = panel
                .list_properties()
                .await?
                .into_iter()
                .find(|p| p.id == id)
                .with_context(|| format!("No property with id {}", id))?;
            let mut draft = PropertyDraft::from_property(&existing);
            apply_fields(panel, &mut draft, fields).await?;
            panel.update(&id, &draft).await?;
            info!("Property updated successfully");
        }
        AdminAction::Delete { id } => {
            panel.delete(&id).await?;
            info!("Property deleted successfully");
        }
        AdminAction::Upload { images, videos } => {
            for (namespace, paths) in [(MediaNamespace::Images, images), (MediaNamespace::Videos, videos)] {
                if paths.is_empty() {
                    continue;
                }
                let report = panel.upload(namespace, read_files(&paths).await?).await;
                report_uploads(&report, namespace);
                for url in &report.uploaded {
                    println!("{}", url);
                }
            }
        }
    }

    Ok(())
}

async fn apply_fields(panel: &AdminPanel, draft: &mut PropertyDraft, fields: DraftArgs) -> Result<()> {
    let DraftArgs {
        title,
        location,
        price,
        area,
        kind,
        badge,
        description,
        featured,
        images,
        videos,
    } = fields;

    for (target, value) in [
        (&mut draft.title, title),
        (&mut draft.location, location),
        (&mut draft.price, price),
        (&mut draft.area, area),
        (&mut draft.kind, kind),
        (&mut draft.badge, badge),
        (&mut draft.description, description),
    ] {
        if let Some(value) = value {
            *target = value;
        }
    }
    if let Some(featured) = featured {
        draft.featured = featured;
    }

    if !images.is_empty() {
        let report = panel.upload_images(draft, read_files(&images).await?).await;
        report_uploads(&report, MediaNamespace::Images);
    }
    if !videos.is_empty() {
        let report = panel.upload_videos(draft, read_files(&videos).await?).await;
        report_uploads(&report, MediaNamespace::Videos);
    }
    Ok(())
}

async fn read_files(paths: &[PathBuf]) -> Result<Vec<UploadFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let file = UploadFile::from_path(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        files.push(file);
    }
    Ok(files)
}

fn report_uploads(report: &UploadReport, namespace: MediaNamespace) {
    for failure in &report.failures {
        warn!("{}: {}", failure.file, failure.reason);
    }
    info!("{}", report.summary(namespace));
}
