use anyhow::Context;
use clap::Parser;
use room_booking::adapters::{JsonFileSink, LoggingNavigator, LoggingSink};
use room_booking::config::toml_config::{LogFormat, SinkKind};
use room_booking::core::SubmissionSink;
use room_booking::domain::slot::SlotSelection;
use room_booking::utils::error::ErrorSeverity;
use room_booking::utils::{logger, validation::Validate};
use room_booking::{AppConfig, BookingError, BookingFormModel, BookingSession, CliConfig, DraftFile};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    let mut app_config = match &args.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?,
        None => AppConfig::default(),
    };

    if args.json_logs || app_config.logging.format == LogFormat::Json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting room-booking");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    if let Some(output_path) = &args.output_path {
        app_config.submission.output_path = output_path.clone();
        tracing::info!("🔧 Output path overridden to: {}", output_path);
    }

    if let Err(e) = args.validate().and_then(|_| app_config.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let mut draft = DraftFile::from_file(&args.draft)
        .with_context(|| format!("Failed to load draft file '{}'", args.draft))?;
    if let Some(slot) = &args.slot {
        draft.slot = Some(slot.clone());
    }

    let result = match app_config.submission.sink {
        SinkKind::Json => {
            let sink = JsonFileSink::new(app_config.output_path());
            run(sink, &app_config, &draft, args.dry_run).await
        }
        SinkKind::Log => run(LoggingSink::new(), &app_config, &draft, args.dry_run).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Booking failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        if let BookingError::Validation(err) = &e {
            for violation in err.violations() {
                eprintln!("   - {}", violation);
            }
        }
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run<S: SubmissionSink>(
    sink: S,
    app_config: &AppConfig,
    draft: &DraftFile,
    dry_run: bool,
) -> room_booking::Result<()> {
    let schedule = app_config.schedule()?;
    let mut session = BookingSession::with_schedule(sink, LoggingNavigator, schedule);

    let form = match draft.slot()? {
        Some(slot) => session.begin_from_slot(&slot),
        None => session.begin(),
    };
    draft.apply_to(form)?;

    display_summary(session.form()?, draft.slot()?.as_ref());

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - the booking will not be submitted");
        session.form()?.validate()?;
        println!("✅ Draft is valid");
        return Ok(());
    }

    let id = session.submit().await?;
    println!("✅ Booking {} submitted", id);
    Ok(())
}

fn display_summary(form: &BookingFormModel, slot: Option<&SlotSelection>) {
    let draft = form.draft();
    println!("📋 Booking Summary:");
    if let Some(slot) = slot {
        println!("  From calendar: {} - {}", slot.start, slot.end);
    }
    println!("  Room type: {}", draft.room_type.label());
    println!("  Booking type: {}", form.booking_type().label());
    println!("  {}: {}", draft.details.required_field().name(), draft.details.purpose());
    println!("  Attendees: {}", draft.attendees);
    println!("  Dates: {}", draft.date_range.display());
    if form.is_multi_day() {
        println!("  Periods: (not available for multi-day bookings)");
    } else {
        println!("  Periods: {} - {}", draft.start_period, draft.end_period);
    }
    println!("  Phone: {}", draft.phone_number);
    println!();
}
