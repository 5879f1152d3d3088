//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `permapages_core` linkage without any network access.
//! - Print the rendered queries for an owner address when one is given.

use permapages_core::{build_query, ProtocolConfig, QueryIntent};

fn main() {
    println!("permapages_core ping={}", permapages_core::ping());
    println!(
        "permapages_core version={}",
        permapages_core::core_version()
    );

    let Some(owner) = std::env::args().nth(1) else {
        return;
    };
    let config = ProtocolConfig::default();
    for intent in [
        QueryIntent::ProfileByOwner(&owner),
        QueryIntent::PagesByOwner(&owner),
        QueryIntent::DeployHistory,
    ] {
        println!("# {}", intent.name());
        println!("{}", build_query(&intent, &config));
    }
}
