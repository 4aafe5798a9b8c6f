//! cgs-backend - accreditation document browser backend
//!
//! Renders the college → program → area → parameter → document hierarchy as
//! data: a static YAML catalog names the colleges and programs, and Google
//! Drive (used purely as a remote file listing service) holds the folders and
//! documents underneath each program.

mod catalog;
mod classify;
mod error;
mod models;
mod resolver;
mod storage;
mod text;

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use catalog::Catalog;
use error::Result;
use resolver::ListingResolver;
use storage::DriveStorage;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

fn usage() -> ! {
    eprintln!("Usage: cgs-backend <college> [program] [container-id] [--documents]");
    eprintln!();
    eprintln!("  <college>                    programs of a college (catalog only)");
    eprintln!("  <college> <program>          area folders of a program");
    eprintln!("  <college> <program> <id>     parameter folders of an area, with pdf children");
    eprintln!("  ... <id> --documents         pdf documents of a parameter folder");
    eprintln!("  <college> <program> --summary  raw {{id, name, type}} listing");
    eprintln!("  <college> <program> --type=<pdf|folder|any>  generic filtered listing");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CATALOG_PATH        catalog file (default ./catalog.yml)");
    eprintln!("  DRIVE_ACCESS_TOKEN  Drive access token (or GOOGLE_DRIVE_TOKEN)");
    std::process::exit(1);
}

/// Main entry point for the listing backend.
///
/// One invocation performs one resolution:
/// 1. Loads and validates the catalog from CATALOG_PATH (or ./catalog.yml)
/// 2. Builds the Drive client from an environment-supplied access token
/// 3. Resolves the navigation path given on the command line
/// 4. Prints the result as pretty JSON
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let documents = args.contains(&"--documents".to_string());
    let summary = args.contains(&"--summary".to_string());
    let filter_name = args
        .iter()
        .find_map(|a| a.strip_prefix("--type="))
        .map(str::to_string);
    let path: Vec<&str> = args
        .iter()
        .filter(|a| !a.starts_with("--"))
        .map(|a| a.as_str())
        .collect();

    if path.is_empty() || path.len() > 3 {
        usage();
    }

    let catalog_path = env::var("CATALOG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("catalog.yml"));
    if !catalog_path.exists() {
        eprintln!("Error: catalog file not found: {}", catalog_path.display());
        eprintln!("Set CATALOG_PATH or place a catalog.yml next to the binary.");
        std::process::exit(1);
    }

    let catalog = Arc::new(Catalog::load(&catalog_path)?);
    if catalog.is_empty() {
        tracing::warn!("catalog is empty; every navigation path will resolve to not-found");
    } else {
        tracing::debug!(programs = catalog.programs().count(), "catalog ready");
    }

    // The college page is served from the catalog alone; everything deeper
    // needs the remote storage collaborator.
    if path.len() == 1 {
        let college = catalog.college(path[0])?;
        println!("{}", serde_json::to_string_pretty(college)?);
        return Ok(());
    }

    let token = match storage::resolve_drive_token() {
        Some(token) => token,
        None => {
            eprintln!("Error: no Drive access token found!");
            eprintln!("Please set DRIVE_ACCESS_TOKEN or GOOGLE_DRIVE_TOKEN");
            std::process::exit(1);
        }
    };
    let drive = Arc::new(DriveStorage::new(token, DEFAULT_TIMEOUT)?);
    let resolver = ListingResolver::new(catalog, drive);

    // --type=<name> asks for a generic listing; the filter name is validated
    // inside the resolver, so a typo fails loudly instead of listing anyway.
    if let (Some(name), [college, program]) = (filter_name.as_deref(), path.as_slice()) {
        let listing = resolver.listing(college, program, name).await?;
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    let output = match (path.as_slice(), documents, summary) {
        ([college, program], _, true) => {
            serde_json::to_string_pretty(&resolver.file_summaries(college, program).await?)?
        }
        ([college, program], _, false) => {
            serde_json::to_string_pretty(&resolver.program_areas(college, program).await?)?
        }
        ([college, program, container], true, _) => serde_json::to_string_pretty(
            &resolver
                .parameter_documents(college, program, container)
                .await?,
        )?,
        ([college, program, container], false, _) => serde_json::to_string_pretty(
            &resolver.area_parameters(college, program, container).await?,
        )?,
        _ => usage(),
    };

    println!("{output}");
    Ok(())
}
