use anyhow::{bail, Context, Result};
use handyhub_core::models::{
    BookingQuery, NewBooking, ProfileUpdate, ProviderApplication, ProviderQuery, ReviewQuery,
};
use handyhub_core::{Config, FallbackMode, HandyHub, StoreBackend};
use serde_json::{json, Value};
use tracing::warn;

use crate::cli::{BookingCommand, Cli, Commands, ProfileCommand, ProviderCommand};

/// Run a parsed command line against the configured backend
pub async fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load().unwrap_or_else(|err| {
        warn!(error = %err, "Failed to load config, using defaults");
        Config::default()
    });

    let mut client_config = config.client_config();
    if let Some(url) = cli.api_url {
        client_config.base_url = url;
    }
    if cli.offline {
        client_config.fallback = FallbackMode::Offline;
    } else if cli.auto_signup {
        client_config.fallback = FallbackMode::AutoSignup;
    }

    let backend = match cli.store.as_deref() {
        Some(name) => name.parse::<StoreBackend>()?,
        None => config.store,
    };
    let store = backend.open(None).context("Failed to open credential store")?;
    let hub = HandyHub::new(&client_config, store).context("Failed to create API client")?;

    match cli.command {
        Commands::Login { email, password } => {
            let password = password_or_prompt(password)?;
            let auth = hub.session().login(&email, &password).await?;
            remember_login(&mut config, &email);
            print_json(&json!({ "user": auth.user, "offline": auth.offline }))
        }
        Commands::Signup { email, name, password } => {
            let password = password_or_prompt(password)?;
            let auth = hub.session().signup(&email, &password, &name).await?;
            remember_login(&mut config, &email);
            print_json(&json!({ "user": auth.user, "offline": auth.offline }))
        }
        Commands::DemoLogin { index } => {
            let accounts = hub.session().demo_accounts();
            let Some(account) = index.checked_sub(1).and_then(|i| accounts.get(i)) else {
                bail!("Demo account {} does not exist (choose 1-{})", index, accounts.len());
            };
            let auth = hub.session().login_demo(account).await?;
            remember_login(&mut config, account.email);
            print_json(&json!({ "user": auth.user, "offline": auth.offline }))
        }
        Commands::DemoAccounts => {
            for (i, account) in hub.session().demo_accounts().iter().enumerate() {
                println!("{}. {} <{}>", i + 1, account.name, account.email);
            }
            Ok(())
        }
        Commands::Logout => {
            hub.session().logout().await?;
            println!("Logged out");
            Ok(())
        }
        Commands::Whoami => match hub.session().current_user() {
            Some(user) => print_json(&user),
            None => bail!("Not logged in"),
        },
        Commands::Status => print_json(&json!({
            "authenticated": hub.session().is_authenticated(),
            "offline": hub.session().is_offline(),
            "fallback": hub.session().fallback().as_str(),
            "apiUrl": client_config.base_url,
        })),
        Commands::Providers(command) => providers(&hub, command).await,
        Commands::Bookings(command) => bookings(&hub, command).await,
        Commands::Profile(command) => profile(&hub, command).await,
    }
}

async fn providers(hub: &HandyHub, command: ProviderCommand) -> Result<()> {
    let response: Value = match command {
        ProviderCommand::List {
            category,
            location,
            min_rating,
            page,
            limit,
        } => {
            let query = ProviderQuery {
                category,
                location,
                min_rating,
                page,
                limit,
            };
            hub.providers().list(&query).await?
        }
        ProviderCommand::Show { id } => hub.providers().get(&id).await?,
        ProviderCommand::Reviews { id, page, limit } => {
            hub.providers().reviews(&id, ReviewQuery::new(page, limit)).await?
        }
    };
    print_json(&response)
}

async fn bookings(hub: &HandyHub, command: BookingCommand) -> Result<()> {
    let response: Value = match command {
        BookingCommand::Create(args) => {
            let booking = NewBooking {
                provider_id: args.provider,
                service: args.service,
                date: args.date,
                time: args.time,
                location: args.location,
                notes: args.notes,
                amount: args.amount,
            };
            hub.bookings().create(&booking).await?
        }
        BookingCommand::List { status, page, limit } => {
            hub.bookings()
                .list(&BookingQuery { status, page, limit })
                .await?
        }
        BookingCommand::Show { id } => hub.bookings().get(&id).await?,
        BookingCommand::Status { id, status } => hub.bookings().update_status(&id, &status).await?,
        BookingCommand::Cancel { id } => hub.bookings().cancel(&id).await?,
    };
    print_json(&response)
}

async fn profile(hub: &HandyHub, command: ProfileCommand) -> Result<()> {
    let response: Value = match command {
        ProfileCommand::Show => hub.users().profile().await?,
        ProfileCommand::Update {
            name,
            phone,
            location,
            avatar,
        } => {
            let update = ProfileUpdate {
                full_name: name,
                phone,
                location,
                avatar,
            };
            hub.users().update_profile(&update).await?
        }
        ProfileCommand::BecomeProvider {
            services,
            experience,
            certifications,
        } => {
            let application = ProviderApplication {
                services,
                experience,
                certifications: (!certifications.is_empty()).then_some(certifications),
            };
            hub.users().become_provider(&application).await?
        }
    };
    print_json(&response)
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => rpassword::prompt_password("Password: ").context("Failed to read password"),
    }
}

/// Failing to save preferences must not fail a successful login
fn remember_login(config: &mut Config, email: &str) {
    config.record_login(email.trim());
    if let Err(err) = config.save() {
        warn!(error = %err, "Failed to save config");
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
