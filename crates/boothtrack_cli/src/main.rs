//! `boothtrack` command-line front-end.
//!
//! # Responsibility
//! - Resolve config, open the configured store and seed defaults.
//! - Map each subcommand onto one core service call and print the result.

mod cmd;
mod render;

use boothtrack_core::import::{HttpSheetFetcher, ImportTarget};
use boothtrack_core::repo::{PersonRepository, ShowRepository};
use boothtrack_core::view::{
    booth_detail_view, booth_list_view, dashboard_view, filter_options_view, mapper_view,
    rep_cards, show_cards, Filters,
};
use boothtrack_core::{
    default_log_level, init_logging, open_db, seed_defaults, AdminService, AppConfig, AppState,
    ImportRequest, ImportService, KvStore, LeadService, ReportService, SqliteStore,
    StorageBackend, Store,
};
use cmd::{CardCommand, Commands, ImportArgs, ListArgs, RepCommand, ShowCommand};
use log::error;
use std::error::Error;
use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn Error>>;

fn main() -> ExitCode {
    let command_line = cmd::CommandLine::parse_args();
    match run(command_line) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command_line: cmd::CommandLine) -> CliResult<()> {
    let config = AppConfig::resolve(command_line.config.as_deref())?;
    if let Some(dir) = &config.logging.dir {
        let level = config.logging.level.as_deref().unwrap_or(default_log_level());
        init_logging(level, dir)?;
    }

    let path = config.storage_path();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match config.storage.backend {
        StorageBackend::Sqlite => {
            let conn = open_db(&path)?;
            let store = SqliteStore::try_new(&conn)?;
            seed_defaults(&store)?;
            dispatch(&store, &config, command_line.command)
        }
        StorageBackend::Kv => {
            let store = KvStore::open(&path)?;
            seed_defaults(&store)?;
            dispatch(&store, &config, command_line.command)
        }
    }
}

fn dispatch<S: Store>(store: &S, config: &AppConfig, command: Commands) -> CliResult<()> {
    let admin = AdminService::new(store);
    let leads = LeadService::new(store);

    match command {
        Commands::Shows(ShowCommand::List) => {
            print!("{}", render::shows(&show_cards(&admin.list_shows()?)));
        }
        Commands::Shows(ShowCommand::Add { name, location }) => {
            let show = admin.add_show(&name, &location)?;
            println!("added show {}", show.id);
        }
        Commands::Shows(ShowCommand::Delete { id }) => {
            admin.delete_show(&id)?;
            println!("deleted show {id}");
        }
        Commands::Reps(RepCommand::List) => {
            let reps = admin.list_reps()?;
            let owners: Vec<Option<String>> =
                reps.iter().map(|rep| rep.crm_owner_id.clone()).collect();
            print!("{}", render::reps(&rep_cards(&reps), &owners));
        }
        Commands::Reps(RepCommand::Add { name, owner_id }) => {
            let rep = admin.add_rep(&name, owner_id.as_deref())?;
            println!("added rep {}", rep.id);
        }
        Commands::Reps(RepCommand::Delete { id }) => {
            admin.delete_rep(&id)?;
            println!("deleted rep {id}");
        }
        Commands::Reps(RepCommand::Owner { id, owner_id }) => {
            let rep = admin.set_rep_owner_id(&id, owner_id.as_deref())?;
            match rep.crm_owner_id {
                Some(owner) => println!("{} is CRM owner {owner}", rep.name),
                None => println!("{} has no CRM owner id", rep.name),
            }
        }
        Commands::List(args) => list(store, args)?,
        Commands::Filters => print!("{}", render::filter_options(&filter_options_view())),
        Commands::Clear {
            show,
            rep,
            list_type,
        } => {
            let removed = admin.clear_list(&show, rep.as_deref(), list_type)?;
            println!("removed {removed} booths from {}", list_type.label());
        }
        Commands::Remove { booth } => {
            leads.delete(booth)?;
            println!("removed booth {booth}");
        }
        Commands::Detail { booth } => {
            let booth = leads.get(booth)?;
            let people = store.people_for_domain(&booth.show_id, &booth.domain)?;
            let owner = leads.owner_rep(&booth)?;
            print!(
                "{}",
                render::booth_detail(&booth_detail_view(&booth, &people, owner.as_ref()))
            );
        }
        Commands::Status { booth, status } => {
            let booth = leads.set_status(booth, status)?;
            println!("{}: {}", booth.company_name, booth.status.label());
        }
        Commands::Notes { booth, text } => {
            leads.set_notes(booth, &text)?;
        }
        Commands::Contact { booth, name } => {
            leads.set_contact_name(booth, &name)?;
        }
        Commands::Orders { booth, option } => {
            let booth = leads.set_orders_per_month(booth, &option)?;
            println!("orders/mo: {}", booth.orders_per_month);
        }
        Commands::Aov { booth, option } => {
            let booth = leads.set_aov(booth, &option)?;
            println!("aov: {}", booth.aov);
        }
        Commands::Card(CardCommand::Attach { booth, image }) => {
            let bytes = std::fs::read(&image)?;
            leads.attach_card(booth, &bytes, image_mime(&image))?;
            println!("card attached");
        }
        Commands::Card(CardCommand::Remove { booth }) => {
            leads.remove_card(booth)?;
            println!("card removed");
        }
        Commands::FollowUp { booth } => println!("{}", leads.copy_for_follow_up(booth)?),
        Commands::Demo { booth } => println!("{}", leads.copy_for_demo(booth)?),
        Commands::Claim { booth, rep } => {
            let copy = leads.claim(booth, &rep)?;
            println!("claimed {} into {rep}'s hit list as {}", copy.company_name, copy.id);
        }
        Commands::Import(args) => import(store, config, args)?,
        Commands::People { show, domain } => {
            let people = match domain {
                Some(domain) => store.people_for_domain(&show, &domain)?,
                None => store.list_people(&show)?,
            };
            print!("{}", render::people(&people));
        }
        Commands::Dashboard { show } => {
            let stats = ReportService::new(store).dashboard(&show)?;
            let name = store
                .get_show(&show)?
                .map(|show| show.name)
                .unwrap_or_default();
            print!("{}", render::dashboard(&dashboard_view(&name, &stats)));
        }
        Commands::Export {
            show,
            rep,
            list_type,
            output,
        } => {
            let csv = ReportService::new(store).export_csv(&show, rep.as_deref(), list_type)?;
            match output {
                Some(path) => std::fs::write(path, csv)?,
                None => print!("{csv}"),
            }
        }
    }
    Ok(())
}

fn list<S: Store>(store: &S, args: ListArgs) -> CliResult<()> {
    let mut state = AppState::load(store)?;
    if state.shows.iter().all(|show| show.id != args.show) {
        return Err(format!("show not found: {}", args.show).into());
    }
    state.select_show(&args.show);
    state.open_list(store, args.rep.as_deref(), args.list_type)?;

    state.set_search(args.search.unwrap_or_default());
    state.sort_by = args.sort;
    state.filters = Filters {
        platform: args.platform,
        protection: args.protection,
        returns: args.returns,
        min_revenue: args.min_revenue,
        status: args.status,
    }
    .validated()?;
    print!("{}", render::booth_list(&booth_list_view(&state)));
    Ok(())
}

fn import<S: Store>(store: &S, config: &AppConfig, args: ImportArgs) -> CliResult<()> {
    let service = ImportService::new(store);
    let mut pending = match (&args.url, &args.file) {
        (Some(url), _) => {
            let fetcher = HttpSheetFetcher::new()?;
            service.fetch_sheet(
                url,
                &config.import.sheet_export_template,
                &fetcher,
                args.target,
            )?
        }
        (None, Some(file)) => service.preview(&std::fs::read_to_string(file)?, args.target)?,
        (None, None) => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            service.preview(&text, args.target)?
        }
    };

    for (field, header) in &args.overrides {
        pending.override_column(field, header)?;
    }
    print!("{}", render::mapper(&mapper_view(&pending)));
    if args.dry_run {
        return Ok(());
    }

    let summary = service.confirm(
        &pending,
        &ImportRequest {
            show_id: args.show,
            rep_id: args.rep,
        },
    )?;
    let noun = match summary.target {
        ImportTarget::People => "people",
        ImportTarget::Booths(_) => "records",
    };
    println!(
        "Imported {} {noun} (replaced {})",
        summary.imported, summary.replaced
    );
    Ok(())
}

fn image_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}
