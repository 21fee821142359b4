//! `garilink` - CLI for the GariLink data core
//!
//! This binary provides the command-line interface for managing vehicles,
//! maintenance history, reminders, service providers and community groups.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::collections::HashSet;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Parser;

use garilink::cli::{
    Cli, Command, ConfigCommand, DashboardCommand, GroupCommand, MaintenanceCommand,
    ProfileCommand, ProviderCommand, ReminderCommand, StatsCommand, VehicleCommand,
};
use garilink::due::{reminder_due, service_due, upcoming_services};
use garilink::model::{
    sort_by_date_desc, Group, GroupPost, MaintenanceRecord, Recurrence, Reminder, ReminderTarget,
    ServiceProvider, UserProfile, Vehicle,
};
use garilink::search::{provider_in_category, search_providers};
use garilink::{init_logging, Config, RecordStore};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Vehicle(cmd) => handle_vehicle(&config, cmd),
        Command::Maintenance(cmd) => handle_maintenance(&config, cmd),
        Command::Reminder(cmd) => handle_reminder(&config, cmd),
        Command::Provider(cmd) => handle_provider(&config, cmd),
        Command::Group(cmd) => handle_group(&config, cmd),
        Command::Profile(cmd) => handle_profile(&config, cmd),
        Command::Dashboard(cmd) => handle_dashboard(&config, &cmd),
        Command::Stats(cmd) => handle_stats(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Open the record store at the configured path.
fn open_store(config: &Config) -> Result<RecordStore> {
    let mut store = RecordStore::open(config.database_path())
        .with_context(|| format!("opening database at {}", config.database_path().display()))?;
    store.set_warn_threshold(config.storage.list_warn_threshold);
    Ok(store)
}

fn handle_vehicle(config: &Config, cmd: VehicleCommand) -> Result<()> {
    let store = open_store(config)?;

    match cmd {
        VehicleCommand::Add {
            make,
            model,
            year,
            plate,
            mileage,
        } => {
            let vehicle = Vehicle::new(&config.profile.user_id, make, model, year, plate, mileage);
            let added = store.add(vehicle)?;
            println!("Added vehicle {}: {}", added.id, added.label());
        }
        VehicleCommand::List { json } => {
            let vehicles: Vec<Vehicle> = store.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&vehicles)?);
            } else if vehicles.is_empty() {
                println!("No vehicles yet. Add one with `garilink vehicle add`.");
            } else {
                for vehicle in &vehicles {
                    println!(
                        "{}  {}  {} km",
                        vehicle.id,
                        vehicle.label(),
                        vehicle.current_mileage
                    );
                }
            }
        }
        VehicleCommand::Show { id, json } => {
            let Some(vehicle) = store.get::<Vehicle>(&id)? else {
                bail!("no vehicle with id {id}");
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&vehicle)?);
            } else {
                println!("{}", vehicle.label());
                println!("  Id:              {}", vehicle.id);
                println!("  Owner:           {}", vehicle.owner_id);
                println!("  Mileage:         {} km", vehicle.current_mileage);
                match vehicle.next_service_mileage {
                    Some(next) => {
                        let due = service_due(vehicle.current_mileage, next);
                        if due.is_due {
                            println!(
                                "  Next service:    {} km (overdue by {} km)",
                                next, -due.km_remaining
                            );
                        } else {
                            println!(
                                "  Next service:    {} km (in {} km)",
                                next, due.km_remaining
                            );
                        }
                    }
                    None => println!("  Next service:    not set"),
                }
            }
        }
        VehicleCommand::Update {
            id,
            mileage,
            next_service,
        } => {
            let Some(mut vehicle) = store.get::<Vehicle>(&id)? else {
                bail!("no vehicle with id {id}");
            };
            if mileage.is_none() && next_service.is_none() {
                bail!("nothing to update; pass --mileage and/or --next-service");
            }
            if let Some(mileage) = mileage {
                vehicle.current_mileage = mileage;
            }
            if let Some(next) = next_service {
                vehicle.next_service_mileage = Some(next);
            }
            store.update(&vehicle)?;
            println!("Updated vehicle {}", vehicle.id);
        }
        VehicleCommand::Remove { id } => {
            if store.remove::<Vehicle>(&id)? {
                // No cascade: history stays behind for record-keeping
                let orphaned = store
                    .list_where(|r: &MaintenanceRecord| r.vehicle_id == id)?
                    .len();
                println!("Removed vehicle {id}");
                if orphaned > 0 {
                    println!("Kept {orphaned} maintenance record(s) for it.");
                }
            } else {
                println!("No vehicle with id {id}; nothing removed.");
            }
        }
    }
    Ok(())
}

fn handle_maintenance(config: &Config, cmd: MaintenanceCommand) -> Result<()> {
    let store = open_store(config)?;

    match cmd {
        MaintenanceCommand::Add {
            vehicle_id,
            service,
            mileage,
            cost,
            notes,
        } => {
            let mut record = MaintenanceRecord::new(vehicle_id, service, mileage, cost);
            if let Some(notes) = notes {
                record = record.with_notes(notes);
            }
            let added = store.add(record)?;
            println!("Recorded {} ({})", added.service_type, added.id);
        }
        MaintenanceCommand::List {
            vehicle_id,
            limit,
            json,
        } => {
            let mut records: Vec<MaintenanceRecord> =
                store.list_where(|r: &MaintenanceRecord| r.vehicle_id == vehicle_id)?;
            sort_by_date_desc(&mut records);
            records.truncate(limit.unwrap_or(config.display.list_limit));

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else if records.is_empty() {
                println!("No maintenance records for vehicle {vehicle_id}.");
            } else {
                for record in &records {
                    println!(
                        "{}  {}  {} km  {:.2}  {}",
                        record.serviced_at.format("%Y-%m-%d"),
                        record.service_type,
                        record.mileage,
                        record.cost,
                        record.id
                    );
                }
            }
        }
        MaintenanceCommand::Remove { id } => {
            if store.remove::<MaintenanceRecord>(&id)? {
                println!("Removed maintenance record {id}");
            } else {
                println!("No maintenance record with id {id}; nothing removed.");
            }
        }
    }
    Ok(())
}

fn handle_reminder(config: &Config, cmd: ReminderCommand) -> Result<()> {
    let store = open_store(config)?;

    match cmd {
        ReminderCommand::Add {
            vehicle_id,
            title,
            date,
            mileage,
            every_days,
            every_km,
        } => {
            // clap guarantees exactly one of date/mileage is present
            let target = match (date, mileage) {
                (Some(date), None) => ReminderTarget::Date(parse_date(&date)?),
                (None, Some(mileage)) => ReminderTarget::Mileage(mileage),
                _ => bail!("pass exactly one of --date or --mileage"),
            };

            let mut reminder = Reminder::new(vehicle_id, title, target);
            if let Some(days) = every_days {
                reminder = reminder.with_recurrence(Recurrence::Days(days));
            } else if let Some(km) = every_km {
                reminder = reminder.with_recurrence(Recurrence::Kilometres(km));
            }

            let added = store.add(reminder)?;
            println!("Added reminder {}: {}", added.id, added.title);
        }
        ReminderCommand::List {
            vehicle_id,
            all,
            json,
        } => {
            let reminders: Vec<Reminder> = store.list_where(|r: &Reminder| {
                let vehicle_matches = vehicle_id
                    .as_ref()
                    .map_or(true, |wanted| &r.vehicle_id == wanted);
                vehicle_matches && (all || !r.completed)
            })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&reminders)?);
            } else if reminders.is_empty() {
                println!("No reminders.");
            } else {
                for reminder in &reminders {
                    let target = match reminder.target {
                        ReminderTarget::Date(date) => date.format("%Y-%m-%d").to_string(),
                        ReminderTarget::Mileage(km) => format!("{km} km"),
                    };
                    let status = if reminder.completed { "done" } else { "open" };
                    println!(
                        "{}  [{}]  {}  (due {})",
                        reminder.id, status, reminder.title, target
                    );
                }
            }
        }
        ReminderCommand::Complete { id } => {
            let Some(mut reminder) = store.get::<Reminder>(&id)? else {
                bail!("no reminder with id {id}");
            };
            reminder.complete();
            store.update(&reminder)?;
            if reminder.completed {
                println!("Completed reminder {}", reminder.id);
            } else {
                let next = match reminder.target {
                    ReminderTarget::Date(date) => date.format("%Y-%m-%d").to_string(),
                    ReminderTarget::Mileage(km) => format!("{km} km"),
                };
                println!("Completed; next occurrence due {next}");
            }
        }
        ReminderCommand::Remove { id } => {
            if store.remove::<Reminder>(&id)? {
                println!("Removed reminder {id}");
            } else {
                println!("No reminder with id {id}; nothing removed.");
            }
        }
    }
    Ok(())
}

/// Parse a YYYY-MM-DD date as midnight UTC.
fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("invalid date {input:?}; expected YYYY-MM-DD"))?;
    let naive = date
        .and_hms_opt(0, 0, 0)
        .context("invalid time components")?;
    Ok(DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn handle_provider(config: &Config, cmd: ProviderCommand) -> Result<()> {
    let store = open_store(config)?;

    match cmd {
        ProviderCommand::Add {
            name,
            location,
            services,
            phone,
            rating,
        } => {
            let mut provider = ServiceProvider::new(name, services, location);
            provider.phone = phone;
            provider.rating = rating;
            let added = store.add(provider)?;
            println!("Added provider {}: {}", added.id, added.name);
        }
        ProviderCommand::List { json } => {
            let providers: Vec<ServiceProvider> = store.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&providers)?);
            } else if providers.is_empty() {
                println!("No service providers yet.");
            } else {
                for provider in &providers {
                    print_provider(provider);
                }
            }
        }
        ProviderCommand::Search {
            query,
            category,
            json,
        } => {
            let providers: Vec<ServiceProvider> = store.list()?;
            let mut hits = search_providers(&providers, &query);
            if let Some(category) = category {
                hits.retain(|provider| provider_in_category(provider, category));
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else if hits.is_empty() {
                println!("No matching providers.");
            } else {
                for provider in hits {
                    print_provider(provider);
                }
            }
        }
    }
    Ok(())
}

fn print_provider(provider: &ServiceProvider) {
    let rating = provider
        .rating
        .map_or_else(|| "unrated".to_string(), |r| format!("{r:.1}"));
    println!(
        "{}  {}  [{}]  {}  ({})",
        provider.id,
        provider.name,
        provider.services.join(", "),
        provider.location,
        rating
    );
}

fn handle_group(config: &Config, cmd: GroupCommand) -> Result<()> {
    let store = open_store(config)?;

    match cmd {
        GroupCommand::Create { name, description } => {
            let added = store.add(Group::new(name, description))?;
            println!("Created group {}: {}", added.id, added.name);
        }
        GroupCommand::List { json } => {
            let groups: Vec<Group> = store.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else if groups.is_empty() {
                println!("No groups yet.");
            } else {
                for group in &groups {
                    println!("{}  {}  - {}", group.id, group.name, group.description);
                }
            }
        }
        GroupCommand::Post { group_id, body } => {
            if store.get::<Group>(&group_id)?.is_none() {
                bail!("no group with id {group_id}");
            }
            let post = GroupPost::new(group_id, &config.profile.user_id, body);
            let added = store.add(post)?;
            println!("Posted {}", added.id);
        }
        GroupCommand::Posts { group_id, json } => {
            let mut posts: Vec<GroupPost> =
                store.list_where(|p: &GroupPost| p.group_id == group_id)?;
            posts.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));

            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else if posts.is_empty() {
                println!("No posts in group {group_id}.");
            } else {
                for post in &posts {
                    println!(
                        "{}  {}  {}",
                        post.posted_at.format("%Y-%m-%d %H:%M"),
                        post.author_id,
                        post.body
                    );
                }
            }
        }
    }
    Ok(())
}

fn handle_profile(config: &Config, cmd: ProfileCommand) -> Result<()> {
    let store = open_store(config)?;
    let user_id = &config.profile.user_id;

    match cmd {
        ProfileCommand::Show { json } => {
            let profiles: Vec<UserProfile> =
                store.list_where(|p: &UserProfile| &p.user_id == user_id)?;
            match profiles.into_iter().next() {
                Some(profile) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&profile)?);
                    } else {
                        println!("Profile for {}", profile.user_id);
                        println!("  Name:   {}", profile.display_name);
                        println!(
                            "  Email:  {}",
                            profile.email.as_deref().unwrap_or("not set")
                        );
                        println!("  Units:  {}", profile.units);
                    }
                }
                None => {
                    println!("No saved profile for {user_id}. Set one with `garilink profile set`.");
                }
            }
        }
        ProfileCommand::Set {
            display_name,
            email,
            units,
        } => {
            let existing: Vec<UserProfile> =
                store.list_where(|p: &UserProfile| &p.user_id == user_id)?;
            let mut profile = existing.into_iter().next().unwrap_or_else(|| {
                UserProfile::new(user_id, &config.profile.display_name)
            });

            if let Some(name) = display_name {
                profile.display_name = name;
            }
            if let Some(email) = email {
                profile.email = Some(email);
            }
            if let Some(units) = units {
                profile.units = units.into();
            }

            if profile.id.is_empty() {
                let added = store.add(profile)?;
                println!("Saved profile {}", added.id);
            } else {
                store.update(&profile)?;
                println!("Updated profile {}", profile.id);
            }
        }
    }
    Ok(())
}

fn handle_dashboard(config: &Config, cmd: &DashboardCommand) -> Result<()> {
    let store = open_store(config)?;
    let now = Utc::now();

    let vehicles: Vec<Vehicle> = store.list()?;
    let upcoming = upcoming_services(&vehicles);

    // A reminder is due when its date has passed, or its vehicle's current
    // mileage has reached the target.
    let open_reminders: Vec<Reminder> = store.list_where(|r: &Reminder| !r.completed)?;
    let due_reminders: Vec<&Reminder> = open_reminders
        .iter()
        .filter(|reminder| match reminder.target {
            ReminderTarget::Date(date) => reminder_due(date, now).is_due,
            ReminderTarget::Mileage(target) => vehicles
                .iter()
                .find(|v| v.id == reminder.vehicle_id)
                .is_some_and(|v| service_due(v.current_mileage, target).is_due),
        })
        .collect();

    if cmd.json {
        let output = serde_json::json!({
            "upcoming_services": upcoming,
            "due_reminders": due_reminders,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Upcoming services");
    println!("-----------------");
    if upcoming.is_empty() {
        println!("No vehicles with a next-service target.");
    } else {
        for item in &upcoming {
            if item.due.is_due {
                println!(
                    "DUE   {}  overdue by {} km",
                    item.label, -item.due.km_remaining
                );
            } else {
                println!("      {}  in {} km", item.label, item.due.km_remaining);
            }
        }
    }

    if !due_reminders.is_empty() {
        println!();
        println!("Due reminders");
        println!("-------------");
        for reminder in due_reminders {
            println!("{}  {}", reminder.id, reminder.title);
        }
    }

    Ok(())
}

fn handle_stats(config: &Config, cmd: &StatsCommand) -> Result<()> {
    let store = open_store(config)?;
    let stats = store.stats()?;

    // Orphans: children whose parent record no longer exists
    let vehicle_ids: HashSet<String> = store
        .list::<Vehicle>()?
        .into_iter()
        .map(|v| v.id)
        .collect();
    let group_ids: HashSet<String> =
        store.list::<Group>()?.into_iter().map(|g| g.id).collect();

    let orphaned_maintenance = store
        .list_where(|r: &MaintenanceRecord| !vehicle_ids.contains(&r.vehicle_id))?
        .len();
    let orphaned_reminders = store
        .list_where(|r: &Reminder| !vehicle_ids.contains(&r.vehicle_id))?
        .len();
    let orphaned_posts = store
        .list_where(|p: &GroupPost| !group_ids.contains(&p.group_id))?
        .len();

    if cmd.json {
        let namespaces: Vec<serde_json::Value> = stats
            .namespaces
            .iter()
            .map(|n| serde_json::json!({ "namespace": n.namespace, "count": n.count }))
            .collect();
        let output = serde_json::json!({
            "database_path": config.database_path(),
            "db_size_bytes": stats.db_size_bytes,
            "namespaces": namespaces,
            "orphaned": {
                "maintenance_records": orphaned_maintenance,
                "reminders": orphaned_reminders,
                "group_posts": orphaned_posts,
            },
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("garilink stats");
    println!("--------------");
    println!("Database:  {}", config.database_path().display());
    println!("Size:      {} bytes", stats.db_size_bytes);
    println!();
    if stats.namespaces.is_empty() {
        println!("No records yet.");
    } else {
        for ns in &stats.namespaces {
            println!("  {:<22} {}", ns.namespace, ns.count);
        }
    }
    if orphaned_maintenance + orphaned_reminders + orphaned_posts > 0 {
        println!();
        println!("Orphaned records (parent deleted):");
        println!("  maintenance_records    {orphaned_maintenance}");
        println!("  reminders              {orphaned_reminders}");
        println!("  group_posts            {orphaned_posts}");
    }

    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:       {}", config.database_path().display());
                println!(
                    "  List warn threshold: {}",
                    config.storage.list_warn_threshold
                );
                println!();
                println!("[Profile]");
                println!("  User id:             {}", config.profile.user_id);
                println!("  Display name:        {}", config.profile.display_name);
                println!("  Units:               {}", config.profile.units);
                println!();
                println!("[Display]");
                println!("  List limit:          {}", config.display.list_limit);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
