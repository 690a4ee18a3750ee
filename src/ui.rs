// UI layer: provides the interactive region menu using `dialoguer` and
// renders the per-aircraft report blocks. The flow is small and
// synchronous: select, authenticate, query, print, done.

use anyhow::Result;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::{AuthError, OpenSkyClient};
use crate::config::{Config, Region};
use crate::report::AircraftReport;

/// Run the single-shot flow. Failures in either network stage end the
/// run with a console notice; only setup problems (no terminal, no TLS)
/// bubble up as errors.
pub fn run(config: Config) -> Result<()> {
    let client = OpenSkyClient::new(&config)?;
    let region = choose_region(&config.regions)?;

    let auth_spinner = spinner("Requesting access token...");
    let token = client.authenticate(&config.credentials);
    auth_spinner.finish_and_clear();
    let token = match token {
        Ok(token) => token,
        Err(error) => {
            // Auth failure skips the query stage entirely.
            report_auth_failure(&error);
            return Ok(());
        }
    };

    println!();
    println!("Searching for aircraft over {}...", region.name);
    println!("{}", "-".repeat(region.name.len() + 35));

    let query_spinner = spinner("Querying state vectors...");
    let result = client.fetch_states(&token, &region.bounds);
    query_spinner.finish_and_clear();

    match result {
        Ok(states) if states.is_empty() => {
            println!("No aircraft found in your area at this time.");
        }
        Ok(states) => {
            println!("Found {} aircraft:", states.len());
            println!();
            for state in &states {
                println!("{}", AircraftReport::from_state(state));
                println!();
            }
        }
        Err(error) => {
            println!("The airspace query failed: {}", error);
        }
    }
    Ok(())
}

/// Show the region menu and return the chosen entry.
///
/// Note: `Select::interact()` is keyboard-driven: arrow keys and Enter
/// choose an option.
fn choose_region(regions: &[Region]) -> Result<&Region> {
    let names: Vec<&str> = regions.iter().map(|region| region.name.as_str()).collect();
    let selection = Select::new()
        .with_prompt("Select a search area")
        .items(&names)
        .default(0)
        .interact()?;
    Ok(&regions[selection])
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(message.to_string());
    spinner
}

fn report_auth_failure(error: &AuthError) {
    println!("Could not retrieve an access token: {}", error);
    if matches!(error, AuthError::MissingCredentials) {
        println!("Set OPENSKY_CLIENT_ID and OPENSKY_CLIENT_SECRET in your environment and run again.");
    }
}
