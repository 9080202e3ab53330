use std::sync::Arc;

use aapda_mitra::client::map::{MapView, PrecisionPin, TILE_ATTRIBUTION};
use aapda_mitra::client::{
    Action, Controller, Coordinate, FixedLocationProvider, HttpReportsApi, Identity, ReportsApi,
    View,
};
use aapda_mitra::features::reports::models::IncidentType;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "aapda")]
#[command(about = "Report emergencies and view the live incident grid")]
#[command(version)]
struct Cli {
    /// Base URL of the AapdaMitra server
    #[arg(long, env = "AAPDA_API_URL", default_value = "http://localhost:5000")]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every reported incident, newest first
    List,
    /// Submit an emergency report
    Report(ReportArgs),
}

#[derive(Args)]
struct ReportArgs {
    /// Incident category, e.g. "Fire Emergency"
    #[arg(short, long = "type", default_value_t = IncidentType::default())]
    incident_type: IncidentType,

    #[arg(short, long, default_value = "")]
    description: String,

    /// Latitude of the device fix
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the device fix
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Move the precision pin to LAT,LNG before submitting
    #[arg(long, value_name = "LAT,LNG", allow_hyphen_values = true)]
    drag_to: Option<Coordinate>,

    #[arg(long, env = "AAPDA_USER_ID")]
    user_id: String,

    #[arg(long, env = "AAPDA_USER_NAME")]
    user_name: Option<String>,

    #[arg(long, env = "AAPDA_USER_PHOTO")]
    user_photo: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let api = Arc::new(HttpReportsApi::new(&cli.api_url)?);

    match cli.command {
        Command::List => {
            let reports = api.list_reports().await?;
            print_grid(&MapView::live_grid(&reports));
            Ok(())
        }
        Command::Report(args) => report(api, args).await,
    }
}

async fn report(api: Arc<HttpReportsApi>, args: ReportArgs) -> anyhow::Result<()> {
    let fix = args.lat.zip(args.lng).map(|(lat, lng)| Coordinate::new(lat, lng));
    let mut controller = Controller::new(api, Arc::new(FixedLocationProvider::new(fix)));

    controller
        .dispatch(Action::SignedIn(Identity {
            uid: args.user_id,
            display_name: args.user_name,
            photo_url: args.user_photo,
        }))
        .await;
    controller.dispatch(Action::ShowView(View::Report)).await;
    controller
        .dispatch(Action::SelectType(args.incident_type))
        .await;
    controller
        .dispatch(Action::EditDescription(args.description))
        .await;
    controller.dispatch(Action::RequestLocation).await;

    if let Some(notice) = controller.state().notice.clone() {
        eprintln!("{}", notice.message());
        controller.dispatch(Action::DismissNotice).await;
    }

    if let Some(target) = args.drag_to {
        controller.dispatch(Action::PinDragged(target)).await;
    }
    if let Some(pin) = controller.state().precision_pin() {
        println!("{}: {}", PrecisionPin::HINT, pin.label());
    }

    controller.dispatch(Action::Submit).await;

    let notice = controller.state().notice.clone();
    if let Some(notice) = &notice {
        if notice.is_error() {
            anyhow::bail!(notice.message());
        }
        println!("{}", notice.message());
        controller.dispatch(Action::DismissNotice).await;
    }

    print_grid(&controller.state().live_map());
    Ok(())
}

fn print_grid(view: &MapView) {
    println!(
        "LIVE GRID ({} incidents, centre {}, zoom {})",
        view.markers.len(),
        view.center,
        view.zoom
    );
    for marker in &view.markers {
        println!("{}", marker);
    }
    println!("{}", TILE_ATTRIBUTION);
}
