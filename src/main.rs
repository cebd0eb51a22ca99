use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use steam_collection_sync::config::{BackendPreference, SyncConfig, load_cfg};
use steam_collection_sync::platform::{discover_accounts, locate_steam_root};
use steam_collection_sync::{
    AccountId, CatalogStore, MembershipSnapshot, SyncOutcome, TracingObserver,
    read_first_supported, sync_first_supported,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--help") {
        println!("{}", USAGE_TEXT);
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[steam-collection-sync] {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> CliResult<()> {
    let mut config = load_cfg();
    apply_args(&mut config, args)?;

    let steam_root = locate_steam_root(config.steam_path.as_deref());
    let account = select_account(&config, &steam_root)?;
    tracing::info!(steam = %steam_root.display(), %account, "using Steam installation");

    let stores = CatalogStore::candidates(&steam_root, account, config.backend, config.backup);

    if args.iter().any(|arg| arg == "--list") {
        return list(&stores);
    }

    let Some(snapshot_path) = option_value(args, "--snapshot")? else {
        eprintln!("{}", USAGE_TEXT);
        return Err("nothing to do: pass --snapshot FILE or --list".into());
    };
    let snapshot = read_snapshot(Path::new(snapshot_path))?;

    match sync_first_supported(&stores, &snapshot, &TracingObserver)? {
        SyncOutcome::Committed {
            backend,
            collections,
        } => println!("Synchronized {} collections into the {} catalog", collections, backend),
        SyncOutcome::NotApplicable => {
            println!("No collections catalog found for account {}; nothing synchronized", account)
        }
    }
    Ok(())
}

/// Command line options override the settings file
fn apply_args(config: &mut SyncConfig, args: &[String]) -> CliResult<()> {
    if let Some(steam) = option_value(args, "--steam")? {
        config.steam_path = Some(PathBuf::from(steam));
    }
    if let Some(account) = option_value(args, "--account")? {
        config.account = Some(account.to_string());
    }
    if let Some(backend) = option_value(args, "--backend")? {
        config.backend = BackendPreference::parse(backend).ok_or_else(|| {
            format!("unknown backend {:?}, expected auto, file or leveldb", backend)
        })?;
    }
    Ok(())
}

fn option_value<'a>(args: &'a [String], name: &str) -> CliResult<Option<&'a str>> {
    let Some(index) = args.iter().position(|arg| arg == name) else {
        return Ok(None);
    };
    match args.get(index + 1) {
        Some(value) if !value.starts_with("--") => Ok(Some(value.as_str())),
        _ => Err(format!("{} requires a value", name).into()),
    }
}

fn select_account(config: &SyncConfig, steam_root: &Path) -> CliResult<AccountId> {
    if let Some(account) = config.account_id()? {
        return Ok(account);
    }

    let accounts = discover_accounts(steam_root);
    match accounts.as_slice() {
        [account] => Ok(*account),
        [] => Err(format!(
            "no Steam accounts under {}",
            steam_root.join("userdata").display()
        )
        .into()),
        _ => {
            let found: Vec<String> = accounts.iter().map(AccountId::to_string).collect();
            Err(format!(
                "several Steam accounts found ({}), pass --account",
                found.join(", ")
            )
            .into())
        }
    }
}

fn read_snapshot(path: &Path) -> CliResult<MembershipSnapshot> {
    let file = File::open(path).map_err(|e| format!("failed to open {}: {}", path.display(), e))?;
    let snapshot = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("invalid snapshot {}: {}", path.display(), e))?;
    Ok(snapshot)
}

fn list(stores: &[CatalogStore]) -> CliResult<()> {
    let Some((backend, collections)) = read_first_supported(stores, &TracingObserver)? else {
        println!("No collections catalog found on this installation");
        return Ok(());
    };

    println!("{} collections in the {} catalog:", collections.len(), backend);
    for collection in collections {
        let kind = if collection.value.is_dynamic() { " (dynamic)" } else { "" };
        println!(
            "  {:<40} {:>5} games{}",
            collection.value.name,
            collection.value.added.len(),
            kind
        );
    }
    Ok(())
}

static USAGE_TEXT: &str = r#"
Usage: steam-collection-sync [OPTIONS]

Options:
    --snapshot <file>     Merge the membership snapshot (JSON) into the Steam collections catalog
    --list                Print the collections currently in the catalog
    --account <id>        Steam account: 12345, [U:1:12345] or a SteamID64
                          (default: the only account in userdata)
    --backend <backend>   auto, file or leveldb (default: auto)
    --steam <path>        Steam root directory. Located automatically if omitted
    --help                Show this message

Settings are read from $XDG_DATA_HOME/steam-collection-sync/settings.json.
Log verbosity follows RUST_LOG.
"#;
