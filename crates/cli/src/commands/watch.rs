// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use bfpu_client::{ClientConfig, Code, Input, Output, RunClient, Speed, State};
use bfpu_core::ResourceKind;
use tracing::info;

use super::Session;
use crate::display;
use crate::error::Result;

/// Prints every change of `resources` (all when empty) until Ctrl-C.
pub async fn run(config: ClientConfig, resources: Vec<ResourceKind>) -> Result<()> {
    let mut session = Session::new(config)?;
    let mut resources = if resources.is_empty() {
        ResourceKind::ALL.to_vec()
    } else {
        resources
    };
    resources.sort_by_key(|resource| resource.as_str());
    resources.dedup();
    for resource in resources {
        print_changes(session.client(), resource);
    }
    session.connect()?;

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal?;
                info!("interrupted");
                return Ok(());
            }
            report = session.next_report() => match report {
                Some(report) => eprintln!("warning: {}", report),
                None => return Ok(()),
            },
        }
    }
}

fn print_changes(client: &RunClient, resource: ResourceKind) {
    match resource {
        ResourceKind::Code => {
            client.subscribe::<Code>(|text| {
                println!("{}", display::text_event(ResourceKind::Code, text))
            });
        }
        ResourceKind::Input => {
            client.subscribe::<Input>(|text| {
                println!("{}", display::text_event(ResourceKind::Input, text))
            });
        }
        ResourceKind::Output => {
            client.subscribe::<Output>(|text| {
                println!("{}", display::text_event(ResourceKind::Output, text))
            });
        }
        ResourceKind::State => {
            client.subscribe::<State>(|state| println!("{}", display::state_event(state)));
        }
        ResourceKind::Speed => {
            client.subscribe::<Speed>(|speed| println!("speed: {}", speed));
        }
    }
}
